use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::submission::{INVALID_DURATION, ScenarioSubmission, parse_minutes, program_error_message};
use super::{CsrfForm, redirect_home};
use crate::errors::AppError;
use crate::models::program::{EventItem, ItemField, ProgramError};
use crate::models::workspace::WorkspaceStore;
use crate::session::csrf;
use crate::session::state::{FlashKind, set_flash, with_workspace};

/// Form input for adding or editing a program item.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub label: String,
    pub duration_minutes: String,
    #[serde(default)]
    pub detail: String,
    pub csrf_token: String,
}

fn flash_program_error(session: &Session, err: &ProgramError) {
    log::warn!("Program edit rejected: {err}");
    set_flash(session, FlashKind::Error, program_error_message(err));
}

/// POST /items: append an item. An empty label is ignored without a message.
pub async fn add(
    store: web::Data<WorkspaceStore>,
    session: Session,
    form: web::Form<ItemForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let label = form.label.trim();
    if label.is_empty() {
        return Ok(redirect_home());
    }
    let Some(minutes) = parse_minutes(&form.duration_minutes) else {
        set_flash(&session, FlashKind::Error, INVALID_DURATION);
        return Ok(redirect_home());
    };

    let item = EventItem::new(label, minutes, form.detail.trim());
    if let Err(e) = with_workspace(&session, &store, |ws| ws.program.add_item(item))? {
        flash_program_error(&session, &e);
    }
    Ok(redirect_home())
}

/// POST /items/{index}: update label, duration and detail of one item
pub async fn edit(
    store: web::Data<WorkspaceStore>,
    session: Session,
    path: web::Path<usize>,
    form: web::Form<ItemForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let index = path.into_inner();
    let Some(minutes) = parse_minutes(&form.duration_minutes) else {
        set_flash(&session, FlashKind::Error, INVALID_DURATION);
        return Ok(redirect_home());
    };

    let fields = [
        ItemField::Label(form.label.trim().to_string()),
        ItemField::Duration(minutes),
        ItemField::Detail(form.detail.trim().to_string()),
    ];
    let result = with_workspace(&session, &store, |ws| {
        fields
            .into_iter()
            .try_for_each(|field| ws.program.edit_item(index, field).map(|_| ()))
    })?;

    if let Err(e) = result {
        flash_program_error(&session, &e);
    }
    Ok(redirect_home())
}

/// POST /items/{index}/delete: remove one item; later items shift up
pub async fn delete(
    store: web::Data<WorkspaceStore>,
    session: Session,
    path: web::Path<usize>,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let index = path.into_inner();
    match with_workspace(&session, &store, |ws| ws.program.remove_item(index))? {
        Ok(removed) => log::debug!("Removed item {index} '{}'", removed.label),
        Err(e) => flash_program_error(&session, &e),
    }
    Ok(redirect_home())
}

/// POST /items/update: apply every row (and the metadata) as shown on the
/// page, then the row delete that was pressed, if any.
pub async fn update_all(
    store: web::Data<WorkspaceStore>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let submission = ScenarioSubmission::from_pairs(form.into_inner());
    csrf::validate_csrf(&session, &submission.csrf_token)?;

    let errors = with_workspace(&session, &store, |ws| submission.apply(ws))?;
    if !errors.is_empty() {
        set_flash(&session, FlashKind::Error, errors.join(" "));
    } else if submission.delete.is_none() {
        set_flash(&session, FlashKind::Success, "행사 순서를 저장했습니다.");
    }
    Ok(redirect_home())
}
