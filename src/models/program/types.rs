use std::fmt;

/// Minutes given to every item created from a template.
pub const DEFAULT_DURATION_MINUTES: u32 = 5;

/// Longest duration a single item may have (one day).
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// One row of the event program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub label: String,
    pub duration_minutes: u32,
    pub detail: String,
}

impl EventItem {
    pub fn new(label: impl Into<String>, duration_minutes: u32, detail: impl Into<String>) -> Self {
        EventItem {
            label: label.into(),
            duration_minutes,
            detail: detail.into(),
        }
    }

    /// Item created from a template entry: default duration, no detail.
    pub fn from_template(label: &str) -> Self {
        EventItem::new(label, DEFAULT_DURATION_MINUTES, "")
    }
}

/// A single field change addressed at one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    Label(String),
    Duration(u32),
    Detail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    IndexOutOfRange { index: usize, len: usize },
    InvalidDuration(u32),
    UnknownTemplate(String),
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::IndexOutOfRange { index, len } => {
                write!(f, "item {index} does not exist (program has {len} items)")
            }
            ProgramError::InvalidDuration(minutes) => {
                write!(
                    f,
                    "duration must be between 1 and {MAX_DURATION_MINUTES} minutes, got {minutes}"
                )
            }
            ProgramError::UnknownTemplate(key) => write!(f, "unknown template '{key}'"),
        }
    }
}

impl std::error::Error for ProgramError {}
