//! The page-wide scenario form.
//!
//! The metadata inputs and every item row belong to one HTML form
//! (`id="scenario-form"`), so each of its buttons (save metadata, save
//! rows, delete a row, generate) posts everything currently on screen.
//! Fields that are absent from a submission leave the workspace unchanged.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::metadata::PresenterCount;
use crate::models::program::{ItemField, MAX_DURATION_MINUTES, ProgramError};
use crate::models::workspace::Workspace;

pub const INVALID_DURATION: &str = "소요 시간은 1분에서 1440분 사이의 정수로 입력해주세요.";
pub const STALE_INDEX: &str = "해당 순서를 찾을 수 없습니다. 화면을 새로 고친 뒤 다시 시도해주세요.";
const INVALID_DATE: &str = "행사 날짜 형식이 올바르지 않습니다.";
const INVALID_PRESENTERS: &str = "사회자 수는 1명 또는 2명이어야 합니다.";

/// Parse a duration form value: a whole number of minutes within bounds.
pub fn parse_minutes(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=MAX_DURATION_MINUTES).contains(m))
}

/// User-facing message for a rejected program edit.
pub fn program_error_message(err: &ProgramError) -> &'static str {
    match err {
        ProgramError::IndexOutOfRange { .. } => STALE_INDEX,
        ProgramError::InvalidDuration(_) => INVALID_DURATION,
        ProgramError::UnknownTemplate(_) => "선택한 템플릿을 찾을 수 없습니다.",
    }
}

#[derive(Debug, Default)]
pub struct MetadataFields {
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub presenters: Option<String>,
    /// Only rendered while the education-office category is active.
    pub vip_attendees: Option<String>,
}

/// Inputs of one rendered item row (`label_{i}`, `duration_{i}`, `detail_{i}`).
#[derive(Debug, Default)]
pub struct RowFields {
    pub label: Option<String>,
    pub duration: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScenarioSubmission {
    pub csrf_token: String,
    pub metadata: MetadataFields,
    pub rows: BTreeMap<usize, RowFields>,
    /// Row whose delete button was pressed.
    pub delete: Option<usize>,
}

impl ScenarioSubmission {
    /// Collect a submission from raw form pairs. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut sub = ScenarioSubmission::default();
        for (key, value) in pairs {
            match key.as_str() {
                "csrf_token" => sub.csrf_token = value,
                "event_name" => sub.metadata.event_name = Some(value),
                "event_date" => sub.metadata.event_date = Some(value),
                "location" => sub.metadata.location = Some(value),
                "presenters" => sub.metadata.presenters = Some(value),
                "vip_attendees" => sub.metadata.vip_attendees = Some(value),
                "delete" => sub.delete = value.trim().parse().ok(),
                _ => {
                    let Some((field, index)) = key.rsplit_once('_') else {
                        continue;
                    };
                    let Ok(index) = index.parse::<usize>() else {
                        continue;
                    };
                    let row = sub.rows.entry(index).or_default();
                    match field {
                        "label" => row.label = Some(value),
                        "duration" => row.duration = Some(value),
                        "detail" => row.detail = Some(value),
                        _ => {}
                    }
                }
            }
        }
        sub
    }

    /// Apply every submitted field to `ws`: metadata first, then row edits,
    /// then the requested deletion. Rejected fields keep their old value and
    /// each distinct problem is reported once.
    pub fn apply(&self, ws: &mut Workspace) -> Vec<&'static str> {
        let mut errors = Vec::new();
        let mut report = |msg: &'static str| {
            if !errors.contains(&msg) {
                errors.push(msg);
            }
        };

        let fields = &self.metadata;
        let meta = &mut ws.metadata;
        if let Some(name) = &fields.event_name {
            meta.name = name.trim().to_string();
        }
        if let Some(date) = &fields.event_date {
            match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
                Ok(date) => meta.date = date,
                Err(_) => report(INVALID_DATE),
            }
        }
        if let Some(location) = &fields.location {
            meta.location = location.trim().to_string();
        }
        if let Some(presenters) = &fields.presenters {
            match PresenterCount::parse(presenters) {
                Some(p) => meta.presenters = p,
                None => report(INVALID_PRESENTERS),
            }
        }
        if let Some(vip) = &fields.vip_attendees {
            meta.vip_attendees = vip.trim_end().to_string();
        }

        for (&index, row) in &self.rows {
            let mut edits = Vec::new();
            if let Some(label) = &row.label {
                edits.push(ItemField::Label(label.trim().to_string()));
            }
            if let Some(duration) = &row.duration {
                match parse_minutes(duration) {
                    Some(minutes) => edits.push(ItemField::Duration(minutes)),
                    None => report(INVALID_DURATION),
                }
            }
            if let Some(detail) = &row.detail {
                edits.push(ItemField::Detail(detail.trim().to_string()));
            }
            for edit in edits {
                if let Err(e) = ws.program.edit_item(index, edit) {
                    log::warn!("Row edit rejected: {e}");
                    report(program_error_message(&e));
                    break;
                }
            }
        }

        if let Some(index) = self.delete {
            match ws.program.remove_item(index) {
                Ok(removed) => log::debug!("Removed item {index} '{}'", removed.label),
                Err(e) => {
                    log::warn!("Row delete rejected: {e}");
                    report(program_error_message(&e));
                }
            }
        }

        errors
    }
}
