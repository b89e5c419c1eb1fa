use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::submission::ScenarioSubmission;
use super::{CsrfForm, redirect_home};
use crate::errors::{AppError, render};
use crate::models::template::EventCategory;
use crate::models::workspace::WorkspaceStore;
use crate::session::csrf;
use crate::session::state::{FlashKind, discard_workspace, set_flash, with_workspace};
use crate::templates_structs::{PageContext, ScenarioPageTemplate};

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub category: String,
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplateForm {
    pub template: String,
    pub csrf_token: String,
}

/// GET /: the whole scenario form
pub async fn index(
    store: web::Data<WorkspaceStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ws = with_workspace(&session, &store, |ws| ws.clone())?;
    let ctx = PageContext::build(&session)?;
    render(ScenarioPageTemplate::from_workspace(ctx, &ws))
}

/// POST /category: switch event category, reinitializing the program
pub async fn select_category(
    store: web::Data<WorkspaceStore>,
    session: Session,
    form: web::Form<CategoryForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let category = EventCategory::from_code(&form.category)
        .ok_or_else(|| AppError::BadRequest(format!("unknown category '{}'", form.category)))?;

    let changed = with_workspace(&session, &store, |ws| ws.select_category(category))?;
    if changed {
        log::info!("Category switched to {}", category.code());
    }
    Ok(redirect_home())
}

/// POST /template: select a template of the current category
pub async fn select_template(
    store: web::Data<WorkspaceStore>,
    session: Session,
    form: web::Form<TemplateForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let key = form.template.trim();
    match with_workspace(&session, &store, |ws| ws.select_template(key))? {
        Ok(true) => set_flash(&session, FlashKind::Info, format!("'{key}' 템플릿으로 행사 순서를 초기화했습니다.")),
        Ok(false) => {}
        Err(e) => {
            log::warn!("Template selection rejected: {e}");
            set_flash(&session, FlashKind::Error, "선택한 템플릿을 찾을 수 없습니다.");
        }
    }
    Ok(redirect_home())
}

/// POST /metadata: save event name, date, location, presenters and VIP
/// attendees, together with any row edits on screen
pub async fn save_metadata(
    store: web::Data<WorkspaceStore>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let submission = ScenarioSubmission::from_pairs(form.into_inner());
    csrf::validate_csrf(&session, &submission.csrf_token)?;

    let errors = with_workspace(&session, &store, |ws| submission.apply(ws))?;
    if errors.is_empty() {
        set_flash(&session, FlashKind::Success, "기본 정보를 저장했습니다.");
    } else {
        set_flash(&session, FlashKind::Error, errors.join(" "));
    }
    Ok(redirect_home())
}

/// POST /reset: discard the workspace; the next page load starts fresh
pub async fn reset(
    store: web::Data<WorkspaceStore>,
    session: Session,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    discard_workspace(&session, &store);
    set_flash(&session, FlashKind::Info, "새 행사를 시작합니다.");
    Ok(redirect_home())
}
