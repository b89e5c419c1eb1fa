use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use rand::Rng;

use super::metadata::EventMetadata;
use super::program::{ProgramError, ProgramState};
use super::template::{EventCategory, EventTemplate};

/// Script returned by the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub event_name: String,
    pub text: String,
}

/// All state of one interactive session.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub program: ProgramState,
    pub metadata: EventMetadata,
    pub script: Option<GeneratedScript>,
}

impl Workspace {
    /// Fresh session: school category, its default template selected and
    /// the event name prefilled with the template name.
    pub fn new(today: NaiveDate) -> Self {
        let category = EventCategory::default();
        let template = category.default_template();
        let mut metadata = EventMetadata::new(category, today);
        metadata.name = template.key.to_string();
        Workspace {
            program: ProgramState::from_template(template),
            metadata,
            script: None,
        }
    }

    pub fn category(&self) -> EventCategory {
        self.metadata.category
    }

    /// Switch category, reinitializing from its default template.
    /// Returns whether anything changed.
    pub fn select_category(&mut self, category: EventCategory) -> bool {
        if self.metadata.category == category {
            return false;
        }
        self.metadata.category = category;
        self.apply_template(category.default_template());
        true
    }

    /// Select a template of the current category by key. No-op when the
    /// key is already active.
    pub fn select_template(&mut self, key: &str) -> Result<bool, ProgramError> {
        let template = self
            .category()
            .find_template(key)
            .ok_or_else(|| ProgramError::UnknownTemplate(key.to_string()))?;
        Ok(self.apply_template(template))
    }

    fn apply_template(&mut self, template: &EventTemplate) -> bool {
        let previous = self.program.active_template_key().to_string();
        if !self.program.select_template(template) {
            return false;
        }
        let name = self.metadata.name.trim();
        if name.is_empty() || name == previous {
            self.metadata.name = if template.is_manual() {
                String::new()
            } else {
                template.key.to_string()
            };
        }
        true
    }

    /// Both generation gates: a named event and at least one item.
    pub fn can_generate(&self) -> bool {
        !self.metadata.name.trim().is_empty() && !self.program.is_empty()
    }
}

struct Entry {
    workspace: Workspace,
    touched: Instant,
}

/// Server-side home of every live workspace, keyed by an opaque id that
/// the session cookie carries.
#[derive(Clone, Default)]
pub struct WorkspaceStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workspace and return its id.
    pub fn create(&self, today: NaiveDate) -> String {
        let id = generate_id();
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(
            id.clone(),
            Entry { workspace: Workspace::new(today), touched: Instant::now() },
        );
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        let map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.contains_key(id)
    }

    /// Snapshot of a workspace. Refreshes its idle timer.
    pub fn get(&self, id: &str) -> Option<Workspace> {
        self.with(id, |ws| ws.clone())
    }

    /// Run `f` against the workspace under the store lock. Refreshes the
    /// idle timer. `None` if the id is unknown.
    pub fn with<R>(&self, id: &str, f: impl FnOnce(&mut Workspace) -> R) -> Option<R> {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = map.get_mut(id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.workspace))
    }

    pub fn discard(&self, id: &str) -> bool {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(id).is_some()
    }

    /// Drop workspaces untouched for longer than `ttl`. Returns how many went.
    pub fn purge_idle(&self, ttl: Duration) -> usize {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = map.len();
        map.retain(|_, entry| entry.touched.elapsed() <= ttl);
        before - map.len()
    }

    pub fn len(&self) -> usize {
        let map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Random 32-byte hex id.
fn generate_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}
