//! Prompt assembly tests: item numbering, category-dependent instructions,
//! presenter sentence, and VIP block.

mod common;

use chrono::NaiveDate;

use eventscript::models::metadata::{EventMetadata, PresenterCount};
use eventscript::models::program::EventItem;
use eventscript::models::template::EventCategory;
use eventscript::prompt::{build_generation_prompt, render_items, system_instruction};

use common::sample_items;

const INSTRUCTIONS_HEADER: &str = "다음 사항을 반드시 포함해주세요:";
const TWO_PRESENTERS: &str = "사회자 2명이 번갈아가며 진행하는 형식으로 작성해주세요.";

fn metadata(category: EventCategory, presenters: PresenterCount, vip: &str) -> EventMetadata {
    EventMetadata {
        category,
        name: "2025학년도 입학식".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        location: "본관 강당".to_string(),
        presenters,
        vip_attendees: vip.to_string(),
    }
}

/// Numbered lines directly under the instructions header.
fn instruction_lines(prompt: &str) -> Vec<&str> {
    prompt
        .lines()
        .skip_while(|l| !l.ends_with(INSTRUCTIONS_HEADER))
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect()
}

/// Everything after the instruction block's trailing blank line.
fn presenter_sentence(prompt: &str) -> &str {
    let header = prompt.find(INSTRUCTIONS_HEADER).expect("instructions header");
    let after = &prompt[header..];
    let blank = after.find("\n\n").expect("blank line after instructions");
    &after[blank + 2..]
}

#[test]
fn test_item_lines_are_numbered_in_order() {
    let rendered = render_items(&sample_items());
    assert_eq!(
        rendered,
        "1. 개회식 (10분) - 사회자 인사\n2. 기조강연 (40분) - \n3. 질의응답 (15분) - 마이크 2개 준비"
    );
}

#[test]
fn test_school_single_presenter_prompt() {
    let meta = metadata(EventCategory::School, PresenterCount::One, "교육감");
    let prompt = build_generation_prompt(&meta, &sample_items());

    let lines = instruction_lines(&prompt);
    assert_eq!(lines.len(), 4, "instructions: {lines:?}");
    assert_eq!(lines[0], "1. 각 순서별 정확한 사회자 멘트");
    assert_eq!(lines[3], "4. 청중 동작 안내 (기립, 착석 등)");
    assert_eq!(presenter_sentence(&prompt), "");

    // VIP text does not apply to school events.
    assert!(!prompt.contains("주요 참석자"));
    assert!(!prompt.contains("교육감"));
}

#[test]
fn test_office_two_presenters_with_vip_prompt() {
    let vip = "교육감\n부교육감\n행정국장";
    let meta = metadata(EventCategory::EducationOffice, PresenterCount::Two, vip);
    let prompt = build_generation_prompt(&meta, &sample_items());

    let lines = instruction_lines(&prompt);
    assert_eq!(lines.len(), 5, "instructions: {lines:?}");
    assert_eq!(lines[4], "5. VIP 참석자 소개 및 예우 사항");
    assert_eq!(presenter_sentence(&prompt), TWO_PRESENTERS);
    assert!(prompt.contains(&format!("주요 참석자:\n{vip}\n")));
}

#[test]
fn test_office_without_vip_has_no_vip_block() {
    let meta = metadata(EventCategory::EducationOffice, PresenterCount::One, "");
    let prompt = build_generation_prompt(&meta, &sample_items());
    assert!(!prompt.contains("주요 참석자"));
    assert_eq!(instruction_lines(&prompt).len(), 5);
}

#[test]
fn test_full_prompt_layout() {
    let meta = metadata(EventCategory::School, PresenterCount::Two, "");
    let items = vec![EventItem::new("개식사", 5, ""), EventItem::new("국민의례", 5, "애국가 1절")];
    let prompt = build_generation_prompt(&meta, &items);

    let expected = "행사 유형: 학교 행사\n\
                    행사명: 2025학년도 입학식\n\
                    일시: 2025년 03월 04일\n\
                    장소: 본관 강당\n\
                    사회자 수: 2명\n\
                    \n\
                    \n\
                    행사 순서:\n\
                    1. 개식사 (5분) - \n\
                    2. 국민의례 (5분) - 애국가 1절\n\
                    \n\
                    위 정보를 바탕으로 학교 행사에 적합한 시나리오를 작성해주세요. 다음 사항을 반드시 포함해주세요:\n\
                    1. 각 순서별 정확한 사회자 멘트\n\
                    2. 시간 배분\n\
                    3. 특이사항 및 주의사항\n\
                    4. 청중 동작 안내 (기립, 착석 등)\n\
                    \n\
                    사회자 2명이 번갈아가며 진행하는 형식으로 작성해주세요.";
    assert_eq!(prompt, expected);
}

#[test]
fn test_prompt_is_deterministic() {
    let meta = metadata(EventCategory::EducationOffice, PresenterCount::Two, "교육감");
    let items = sample_items();
    assert_eq!(build_generation_prompt(&meta, &items), build_generation_prompt(&meta, &items));
}

#[test]
fn test_system_instruction_names_category() {
    let school = system_instruction(EventCategory::School);
    assert!(school.starts_with("당신은 전문적인 학교 행사 시나리오 작성자입니다."));
    let office = system_instruction(EventCategory::EducationOffice);
    assert!(office.contains("교육청 행사"));
}
