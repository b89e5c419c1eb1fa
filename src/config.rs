/// Connection settings for the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    /// Raw SESSION_KEY value; validated when the cookie key is built.
    pub session_key: Option<String>,
    pub completion: CompletionConfig,
    pub workspace_idle_minutes: u64,
    /// Generations allowed per client IP per rate-limit window.
    pub generation_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            session_key: None,
            completion: CompletionConfig::default(),
            workspace_idle_minutes: 120,
            generation_limit: 10,
        }
    }
}

/// Load settings from the process environment (after `.env`, if any).
pub fn load_settings() -> Settings {
    settings_from(|key| std::env::var(key).ok())
}

/// Build settings from an arbitrary variable lookup. Blank values count as
/// unset; unparseable numbers fall back to the default with a warning.
pub fn settings_from(lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut settings = Settings::default();

    if let Some(v) = get("BIND_ADDR") {
        settings.bind_addr = v;
    }
    settings.session_key = get("SESSION_KEY");

    settings.completion.api_key = get("OPENAI_API_KEY");
    if let Some(v) = get("OPENAI_BASE_URL") {
        settings.completion.base_url = v;
    }
    if let Some(v) = get("OPENAI_MODEL") {
        settings.completion.model = v;
    }
    if let Some(v) = get("COMPLETION_TIMEOUT_SECS") {
        settings.completion.timeout_secs =
            parse_positive("COMPLETION_TIMEOUT_SECS", &v, settings.completion.timeout_secs);
    }
    if let Some(v) = get("WORKSPACE_IDLE_MINUTES") {
        settings.workspace_idle_minutes =
            parse_positive("WORKSPACE_IDLE_MINUTES", &v, settings.workspace_idle_minutes);
    }
    if let Some(v) = get("GENERATION_LIMIT") {
        settings.generation_limit =
            parse_positive("GENERATION_LIMIT", &v, settings.generation_limit as u64) as usize;
    }

    settings
}

fn parse_positive(key: &str, value: &str, default: u64) -> u64 {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
            log::warn!("{key}={value:?} is not a positive integer, using {default}");
            default
        }
    }
}
