use chrono::NaiveDate;

use super::template::EventCategory;

/// Number of emcees running the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenterCount {
    #[default]
    One,
    Two,
}

impl PresenterCount {
    pub fn count(self) -> u8 {
        match self {
            PresenterCount::One => 1,
            PresenterCount::Two => 2,
        }
    }

    pub fn from_count(n: u8) -> Option<Self> {
        match n {
            1 => Some(PresenterCount::One),
            2 => Some(PresenterCount::Two),
            _ => None,
        }
    }

    /// Parse a form value ("1" or "2").
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<u8>().ok().and_then(Self::from_count)
    }
}

/// Everything about the event besides its program items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    pub category: EventCategory,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub presenters: PresenterCount,
    /// Free text, one attendee per line. Only used for education-office events.
    pub vip_attendees: String,
}

impl EventMetadata {
    pub fn new(category: EventCategory, date: NaiveDate) -> Self {
        EventMetadata {
            category,
            name: String::new(),
            date,
            location: String::new(),
            presenters: PresenterCount::One,
            vip_attendees: String::new(),
        }
    }

    /// VIP text that applies to the current category, if any.
    pub fn effective_vip_attendees(&self) -> Option<&str> {
        if self.category.has_vip_attendees() && !self.vip_attendees.is_empty() {
            Some(&self.vip_attendees)
        } else {
            None
        }
    }
}
