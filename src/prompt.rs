//! Prompt assembly for script generation.
//!
//! Everything here is deterministic string building; the caller enforces the
//! generation gates (non-empty event name and program) before calling in.

use crate::models::metadata::{EventMetadata, PresenterCount};
use crate::models::program::EventItem;
use crate::models::template::EventCategory;

const BASE_INSTRUCTIONS: [&str; 4] = [
    "각 순서별 정확한 사회자 멘트",
    "시간 배분",
    "특이사항 및 주의사항",
    "청중 동작 안내 (기립, 착석 등)",
];

const VIP_INSTRUCTION: &str = "VIP 참석자 소개 및 예우 사항";

const TWO_PRESENTER_INSTRUCTION: &str = "사회자 2명이 번갈아가며 진행하는 형식으로 작성해주세요.";

/// System message sent alongside the prompt.
pub fn system_instruction(category: EventCategory) -> String {
    format!(
        "당신은 전문적인 {} 시나리오 작성자입니다. 행사의 특성과 분위기를 고려하여 자연스럽고 품격 있는 시나리오를 작성해주세요.",
        category.label()
    )
}

/// Required-content instructions, numbered from 1.
pub fn scenario_instructions(category: EventCategory) -> Vec<String> {
    let mut lines: Vec<&str> = BASE_INSTRUCTIONS.to_vec();
    if category.has_vip_attendees() {
        lines.push(VIP_INSTRUCTION);
    }
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect()
}

/// Alternating-presenter sentence; empty for a single presenter.
pub fn presenter_instruction(presenters: PresenterCount) -> &'static str {
    match presenters {
        PresenterCount::One => "",
        PresenterCount::Two => TWO_PRESENTER_INSTRUCTION,
    }
}

/// `"{n}. {label} ({minutes}분) - {detail}"`, one line per item.
pub fn render_items(items: &[EventItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!("{}. {} ({}분) - {}", i + 1, item.label, item.duration_minutes, item.detail)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The user prompt for the completion endpoint.
pub fn build_generation_prompt(meta: &EventMetadata, items: &[EventItem]) -> String {
    let category = meta.category.label();
    let vip_block = meta
        .effective_vip_attendees()
        .map(|vip| format!("주요 참석자:\n{vip}\n"))
        .unwrap_or_default();

    format!(
        "행사 유형: {category}\n\
         행사명: {name}\n\
         일시: {date}\n\
         장소: {location}\n\
         사회자 수: {presenters}명\n\
         {vip_block}\n\
         \n\
         행사 순서:\n\
         {items}\n\
         \n\
         위 정보를 바탕으로 {category}에 적합한 시나리오를 작성해주세요. 다음 사항을 반드시 포함해주세요:\n\
         {instructions}\n\
         \n\
         {presenter_sentence}",
        name = meta.name,
        date = meta.date.format("%Y년 %m월 %d일"),
        location = meta.location,
        presenters = meta.presenters.count(),
        items = render_items(items),
        instructions = scenario_instructions(meta.category).join("\n"),
        presenter_sentence = presenter_instruction(meta.presenters),
    )
}
