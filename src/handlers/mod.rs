pub mod generate_handlers;
pub mod item_handlers;
pub mod scenario_handlers;
pub mod spreadsheet_handlers;
pub mod submission;

use actix_web::{
    HttpResponse,
    http::header::{Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue},
    web,
};
use serde::Deserialize;

/// Form carrying only the CSRF token (single-row delete, reset).
#[derive(Debug, Deserialize)]
pub struct CsrfForm {
    pub csrf_token: String,
}

/// Register every route of the scenario form.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(scenario_handlers::index))
        .route("/category", web::post().to(scenario_handlers::select_category))
        .route("/template", web::post().to(scenario_handlers::select_template))
        .route("/metadata", web::post().to(scenario_handlers::save_metadata))
        .route("/reset", web::post().to(scenario_handlers::reset))
        // Program items
        .route("/items", web::post().to(item_handlers::add))
        // Before `/items/{index}`, which would otherwise claim this path.
        .route("/items/update", web::post().to(item_handlers::update_all))
        .route("/items/{index}", web::post().to(item_handlers::edit))
        .route("/items/{index}/delete", web::post().to(item_handlers::delete))
        // Spreadsheets
        .route("/spreadsheet/template", web::get().to(spreadsheet_handlers::download_template))
        .route("/spreadsheet/current", web::get().to(spreadsheet_handlers::download_current))
        .route("/spreadsheet/upload", web::post().to(spreadsheet_handlers::upload))
        // Generation
        .route("/generate", web::post().to(generate_handlers::generate))
        .route("/script/download", web::get().to(generate_handlers::download_script));
}

/// 303 back to the form page.
pub(crate) fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/"))
        .finish()
}

/// Download response with a UTF-8 filename and an ASCII fallback.
pub(crate) fn attachment(
    filename: &str,
    fallback: &str,
    content_type: &str,
    body: Vec<u8>,
) -> HttpResponse {
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![
            DispositionParam::Filename(fallback.to_string()),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: filename.as_bytes().to_vec(),
            }),
        ],
    };
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(disposition)
        .body(body)
}

/// Replace characters that are unsafe in a download filename.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "행사".to_string()
    } else {
        cleaned
    }
}
