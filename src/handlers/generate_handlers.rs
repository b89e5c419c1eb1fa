use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};

use super::submission::ScenarioSubmission;
use super::{attachment, redirect_home, sanitize_filename};
use crate::completion::CompletionClient;
use crate::errors::AppError;
use crate::models::workspace::{GeneratedScript, WorkspaceStore};
use crate::prompt;
use crate::session::csrf;
use crate::session::rate_limit::GenerationLimiter;
use crate::session::state::{FlashKind, set_flash, with_workspace, workspace_id};

/// POST /generate: save what is on screen, build the prompt and ask the
/// completion endpoint for a script.
///
/// Both gates (event name, at least one item) are checked before any
/// external call. A failed call keeps the previous script and is shown as-is.
pub async fn generate(
    req: HttpRequest,
    store: web::Data<WorkspaceStore>,
    client: web::Data<CompletionClient>,
    limiter: web::Data<GenerationLimiter>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let submission = ScenarioSubmission::from_pairs(form.into_inner());
    csrf::validate_csrf(&session, &submission.csrf_token)?;

    // The same workspace receives the script after the call, even if the
    // session changes meanwhile. The lock is never held across the call.
    let id = workspace_id(&session, &store)?;
    let (errors, ws) = store
        .with(&id, |ws| (submission.apply(ws), ws.clone()))
        .ok_or_else(|| AppError::Session(format!("workspace {id} vanished mid-request")))?;

    if !errors.is_empty() {
        set_flash(&session, FlashKind::Error, errors.join(" "));
        return Ok(redirect_home());
    }
    if ws.metadata.name.trim().is_empty() {
        set_flash(&session, FlashKind::Error, "행사명을 입력해주세요.");
        return Ok(redirect_home());
    }
    if ws.program.is_empty() {
        set_flash(&session, FlashKind::Error, "행사 순서를 하나 이상 추가해주세요.");
        return Ok(redirect_home());
    }

    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if !limiter.try_acquire(ip) {
        log::warn!("Generation rate limit hit for {ip}");
        set_flash(
            &session,
            FlashKind::Error,
            "시나리오 생성 요청이 너무 많습니다. 잠시 후 다시 시도해주세요.",
        );
        return Ok(redirect_home());
    }

    let system = prompt::system_instruction(ws.category());
    let user_prompt = prompt::build_generation_prompt(&ws.metadata, ws.program.items());
    log::info!(
        "Generating script for '{}' ({} items) with {}",
        ws.metadata.name,
        ws.program.len(),
        client.model()
    );

    match client.complete(&system, &user_prompt).await {
        Ok(text) => {
            let script = GeneratedScript { event_name: ws.metadata.name.clone(), text };
            if store.with(&id, |ws| ws.script = Some(script)).is_some() {
                set_flash(&session, FlashKind::Success, "시나리오가 생성되었습니다.");
            } else {
                log::warn!("Workspace {id} expired during generation, script dropped");
                set_flash(
                    &session,
                    FlashKind::Error,
                    "작업 시간이 초과되어 시나리오를 저장하지 못했습니다. 다시 시도해주세요.",
                );
            }
        }
        Err(e) => {
            log::error!("Script generation failed: {e}");
            set_flash(&session, FlashKind::Error, format!("시나리오 생성 중 오류가 발생했습니다: {e}"));
        }
    }
    Ok(redirect_home())
}

/// GET /script/download: last generated script as plain text
pub async fn download_script(
    store: web::Data<WorkspaceStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let script = with_workspace(&session, &store, |ws| ws.script.clone())?
        .ok_or(AppError::NotFound)?;

    let filename = format!("{}_시나리오.txt", sanitize_filename(&script.event_name));
    Ok(attachment(
        &filename,
        "scenario.txt",
        "text/plain; charset=utf-8",
        script.text.into_bytes(),
    ))
}
