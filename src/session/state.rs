use actix_session::Session;
use chrono::Local;

use crate::errors::AppError;
use crate::models::workspace::{Workspace, WorkspaceStore};

const WORKSPACE_KEY: &str = "workspace_id";

/// Id of this session's workspace, creating one when the session has none
/// or its workspace was purged.
pub fn workspace_id(session: &Session, store: &WorkspaceStore) -> Result<String, AppError> {
    if let Some(id) = session.get::<String>(WORKSPACE_KEY)? {
        if store.contains(&id) {
            return Ok(id);
        }
        log::info!("Workspace expired, starting a new one");
    }
    let id = store.create(Local::now().date_naive());
    session.insert(WORKSPACE_KEY, &id)?;
    Ok(id)
}

/// Run `f` against this session's workspace under the store lock.
pub fn with_workspace<R>(
    session: &Session,
    store: &WorkspaceStore,
    f: impl FnOnce(&mut Workspace) -> R,
) -> Result<R, AppError> {
    let id = workspace_id(session, store)?;
    store
        .with(&id, f)
        .ok_or_else(|| AppError::Session(format!("workspace {id} vanished mid-request")))
}

/// Discard this session's workspace. The next request starts fresh.
pub fn discard_workspace(session: &Session, store: &WorkspaceStore) {
    if let Ok(Some(id)) = session.get::<String>(WORKSPACE_KEY) {
        store.discard(&id);
    }
    session.remove(WORKSPACE_KEY);
}

/// Queue a one-shot message for the next page render.
pub fn set_flash(session: &Session, kind: FlashKind, message: impl Into<String>) {
    let _ = session.insert("flash", message.into());
    let _ = session.insert("flash_kind", kind.as_str());
}

/// Take the pending flash message, if any.
pub fn take_flash(session: &Session) -> Option<Flash> {
    let message = session.get::<String>("flash").unwrap_or(None)?;
    let kind = session.get::<String>("flash_kind").unwrap_or(None);
    session.remove("flash");
    session.remove("flash_kind");
    Some(Flash {
        kind: FlashKind::parse(kind.as_deref().unwrap_or("info")),
        message,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Info => "info",
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "success" => FlashKind::Success,
            "error" => FlashKind::Error,
            _ => FlashKind::Info,
        }
    }
}

/// A flash message as the page template sees it.
#[derive(Debug, Clone)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    /// CSS class suffix for the message box.
    pub fn css_class(&self) -> &'static str {
        self.kind.as_str()
    }
}
