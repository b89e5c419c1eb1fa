use super::types::{EventItem, ItemField, MAX_DURATION_MINUTES, ProgramError};
use crate::models::template::EventTemplate;

/// The ordered list of program items plus the key of the template that
/// last initialized it.
///
/// Three sources mutate the list: template selection (wholesale reinit),
/// spreadsheet import (wholesale replace) and manual add/edit/remove.
/// Positions are plain `Vec` indices and carry no identity across edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramState {
    items: Vec<EventItem>,
    active_template_key: String,
}

impl ProgramState {
    /// A program initialized from `template`.
    pub fn from_template(template: &EventTemplate) -> Self {
        let mut state = ProgramState::default();
        state.select_template(template);
        state
    }

    pub fn items(&self) -> &[EventItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_template_key(&self) -> &str {
        &self.active_template_key
    }

    /// Reinitialize from `template` unless it is already the active one.
    /// Returns whether the items were replaced.
    pub fn select_template(&mut self, template: &EventTemplate) -> bool {
        if self.active_template_key == template.key {
            return false;
        }
        self.items = template.items.iter().map(|label| EventItem::from_template(label)).collect();
        self.active_template_key = template.key.to_string();
        true
    }

    /// Replace every item, as a validated spreadsheet import does.
    /// The active template key is left alone.
    pub fn replace_items(&mut self, items: Vec<EventItem>) {
        self.items = items;
    }

    /// Append an item. An empty label is ignored and yields `Ok(false)`.
    pub fn add_item(&mut self, item: EventItem) -> Result<bool, ProgramError> {
        if item.label.trim().is_empty() {
            return Ok(false);
        }
        check_duration(item.duration_minutes)?;
        self.items.push(item);
        Ok(true)
    }

    /// Change one field of one item in place. An empty label is ignored and
    /// yields `Ok(false)`; the previous label stays.
    pub fn edit_item(&mut self, index: usize, field: ItemField) -> Result<bool, ProgramError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ProgramError::IndexOutOfRange { index, len })?;

        match field {
            ItemField::Label(label) => {
                if label.trim().is_empty() {
                    return Ok(false);
                }
                item.label = label;
            }
            ItemField::Duration(minutes) => {
                check_duration(minutes)?;
                item.duration_minutes = minutes;
            }
            ItemField::Detail(detail) => item.detail = detail,
        }
        Ok(true)
    }

    /// Remove the item at `index`; later items shift down by one.
    pub fn remove_item(&mut self, index: usize) -> Result<EventItem, ProgramError> {
        if index >= self.items.len() {
            return Err(ProgramError::IndexOutOfRange { index, len: self.items.len() });
        }
        Ok(self.items.remove(index))
    }

    /// Sum of all item durations.
    pub fn total_minutes(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, i| total.saturating_add(u64::from(i.duration_minutes)))
    }
}

fn check_duration(minutes: u32) -> Result<(), ProgramError> {
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        Err(ProgramError::InvalidDuration(minutes))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::template::EventCategory;

    fn entrance() -> &'static EventTemplate {
        EventCategory::School.find_template("입학식").unwrap()
    }

    #[test]
    fn edit_with_invalid_duration_keeps_item() {
        let mut program = ProgramState::from_template(entrance());
        let err = program.edit_item(0, ItemField::Duration(0)).unwrap_err();
        assert_eq!(err, ProgramError::InvalidDuration(0));
        assert_eq!(program.items()[0].duration_minutes, 5);
    }

    #[test]
    fn edit_out_of_range() {
        let mut program = ProgramState::from_template(entrance());
        let err = program.edit_item(6, ItemField::Detail("x".into())).unwrap_err();
        assert_eq!(err, ProgramError::IndexOutOfRange { index: 6, len: 6 });
    }

    #[test]
    fn total_minutes_sums_durations() {
        let program = ProgramState::from_template(entrance());
        assert_eq!(program.total_minutes(), 30);
    }

    #[test]
    fn total_minutes_does_not_overflow_u32() {
        let mut program = ProgramState::default();
        program.replace_items(vec![
            EventItem::new("a", u32::MAX, ""),
            EventItem::new("b", u32::MAX, ""),
        ]);
        assert_eq!(program.total_minutes(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn duration_above_one_day_is_rejected() {
        let mut program = ProgramState::from_template(entrance());
        let too_long = MAX_DURATION_MINUTES + 1;
        assert_eq!(
            program.add_item(EventItem::new("철야", too_long, "")).unwrap_err(),
            ProgramError::InvalidDuration(too_long)
        );
        assert_eq!(
            program.edit_item(0, ItemField::Duration(too_long)).unwrap_err(),
            ProgramError::InvalidDuration(too_long)
        );
        assert!(program.add_item(EventItem::new("종일 행사", MAX_DURATION_MINUTES, "")).expect("add"));
        assert_eq!(program.items()[0].duration_minutes, 5);
    }
}
