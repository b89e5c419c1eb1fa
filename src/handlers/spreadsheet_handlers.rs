use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::{attachment, redirect_home};
use crate::errors::AppError;
use crate::models::spreadsheet::{ImportError, XLSX_CONTENT_TYPE, export, import};
use crate::models::workspace::WorkspaceStore;
use crate::session::csrf;
use crate::session::state::{FlashKind, set_flash, with_workspace};

#[derive(MultipartForm)]
pub struct UploadForm {
    #[multipart(limit = "2MB")]
    pub file: Bytes,
    pub csrf_token: Text<String>,
}

/// GET /spreadsheet/template: blank starter workbook
pub async fn download_template() -> Result<HttpResponse, AppError> {
    let bytes = export::starter_workbook()?;
    Ok(attachment("행사순서_템플릿.xlsx", "program-template.xlsx", XLSX_CONTENT_TYPE, bytes))
}

/// GET /spreadsheet/current: current program as a workbook
pub async fn download_current(
    store: web::Data<WorkspaceStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let items = with_workspace(&session, &store, |ws| ws.program.items().to_vec())?;
    let bytes = export::export_items(&items)?;
    Ok(attachment("현재_행사순서.xlsx", "program.xlsx", XLSX_CONTENT_TYPE, bytes))
}

/// POST /spreadsheet/upload: replace the program with the uploaded rows.
/// A rejected file leaves the program untouched.
pub async fn upload(
    store: web::Data<WorkspaceStore>,
    session: Session,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token.0)?;

    let file_name = form.file.file_name.clone().unwrap_or_default();
    match import::import_items(&form.file.data) {
        Ok(items) => {
            let count = items.len();
            with_workspace(&session, &store, |ws| ws.program.replace_items(items))?;
            log::info!("Imported {count} item(s) from '{file_name}'");
            set_flash(&session, FlashKind::Success, "엑셀 파일이 성공적으로 업로드되었습니다.");
        }
        Err(e) => {
            log::warn!("Rejected upload '{file_name}': {e}");
            let message = match &e {
                ImportError::Format(detail) => format!(
                    "올바른 형식의 엑셀 파일이 아닙니다. 템플릿을 다운로드하여 사용해주세요. ({detail})"
                ),
                ImportError::Parse(detail) => format!("파일 처리 중 오류가 발생했습니다: {detail}"),
            };
            set_flash(&session, FlashKind::Error, message);
        }
    }
    Ok(redirect_home())
}
