use std::fmt;

/// Key of the catch-all template that starts with an empty program.
pub const MANUAL_TEMPLATE: &str = "직접 입력";

/// Top-level event classification. Selects the template set and whether
/// VIP attendee handling applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventCategory {
    #[default]
    School,
    EducationOffice,
}

impl EventCategory {
    pub const ALL: [EventCategory; 2] = [EventCategory::School, EventCategory::EducationOffice];

    /// Korean display label, also used verbatim in the generated prompt.
    pub fn label(self) -> &'static str {
        match self {
            EventCategory::School => "학교 행사",
            EventCategory::EducationOffice => "교육청 행사",
        }
    }

    /// Form value used by the category radio buttons.
    pub fn code(self) -> &'static str {
        match self {
            EventCategory::School => "school",
            EventCategory::EducationOffice => "office",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code.trim())
    }

    /// Only education-office events carry a VIP attendee list.
    pub fn has_vip_attendees(self) -> bool {
        matches!(self, EventCategory::EducationOffice)
    }

    pub fn templates(self) -> &'static [EventTemplate] {
        match self {
            EventCategory::School => SCHOOL_TEMPLATES,
            EventCategory::EducationOffice => OFFICE_TEMPLATES,
        }
    }

    /// The template selected when the category is first chosen.
    pub fn default_template(self) -> &'static EventTemplate {
        &self.templates()[0]
    }

    pub fn find_template(self, key: &str) -> Option<&'static EventTemplate> {
        self.templates().iter().find(|t| t.key == key)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named, fixed, ordered list of default item labels.
#[derive(Debug, PartialEq, Eq)]
pub struct EventTemplate {
    pub key: &'static str,
    pub items: &'static [&'static str],
}

impl EventTemplate {
    pub fn is_manual(&self) -> bool {
        self.key == MANUAL_TEMPLATE
    }
}

static SCHOOL_TEMPLATES: &[EventTemplate] = &[
    EventTemplate {
        key: "입학식",
        items: &["개식사", "국민의례", "학교장 환영사", "신입생 선서", "교가 제창", "폐식사"],
    },
    EventTemplate {
        key: "졸업식",
        items: &[
            "개식사",
            "국민의례",
            "졸업장 수여",
            "학교장 식사",
            "축사",
            "졸업생 대표 답사",
            "교가 제창",
            "폐식사",
        ],
    },
    EventTemplate {
        key: "체육대회",
        items: &["개회식", "준비운동", "트랙경기", "단체경기", "학년별 경기", "폐회식"],
    },
    EventTemplate { key: MANUAL_TEMPLATE, items: &[] },
];

static OFFICE_TEMPLATES: &[EventTemplate] = &[
    EventTemplate {
        key: "교육감 이취임식",
        items: &["개식사", "국민의례", "이임사", "이임패 증정", "취임사", "축사", "폐식사"],
    },
    EventTemplate {
        key: "교육청 학술대회",
        items: &["개회식", "기조강연", "세션발표", "토론회", "시상식", "폐회식"],
    },
    EventTemplate {
        key: "교육청 연수",
        items: &["등록", "개회식", "특강", "분임토의", "사례발표", "폐회식"],
    },
    EventTemplate { key: MANUAL_TEMPLATE, items: &[] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_ends_with_manual_entry() {
        for category in EventCategory::ALL {
            let last = category.templates().last().expect("templates");
            assert!(last.is_manual());
            assert!(last.items.is_empty());
            assert!(!category.default_template().is_manual());
        }
    }

    #[test]
    fn category_codes_round_trip() {
        for category in EventCategory::ALL {
            assert_eq!(EventCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(EventCategory::from_code("party"), None);
    }
}
