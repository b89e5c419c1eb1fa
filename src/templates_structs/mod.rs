// Template context structures for Askama templates.

use actix_session::Session;

use crate::errors::AppError;
use crate::session::csrf;
use crate::session::state::{Flash, take_flash};

pub const APP_NAME: &str = "행사 시나리오 생성기";

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub app_name: String,
    pub csrf_token: String,
    pub flash: Option<Flash>,
}

impl PageContext {
    pub fn build(session: &Session) -> Result<Self, AppError> {
        let csrf_token = csrf::get_or_create_token(session)?;
        let flash = take_flash(session);
        Ok(Self { app_name: APP_NAME.to_string(), csrf_token, flash })
    }
}

mod scenario;

pub use self::scenario::{ChoiceOption, ItemRow, ScenarioPageTemplate, ScriptView};
