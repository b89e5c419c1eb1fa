use askama::Template;

use super::PageContext;
use crate::models::metadata::PresenterCount;
use crate::models::program::MAX_DURATION_MINUTES;
use crate::models::template::EventCategory;
use crate::models::workspace::Workspace;

/// One radio button or select option. `selected` is precomputed so the
/// template never compares values itself.
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// An item as rendered in the editable program table.
pub struct ItemRow {
    /// 0-based; addresses the item in edit/delete form actions.
    pub index: usize,
    /// 1-based step number shown to the user.
    pub position: usize,
    pub label: String,
    pub duration_minutes: u32,
    pub detail: String,
}

pub struct ScriptView {
    pub event_name: String,
    pub text: String,
}

#[derive(Template)]
#[template(path = "scenario/index.html")]
pub struct ScenarioPageTemplate {
    pub ctx: PageContext,
    pub categories: Vec<ChoiceOption>,
    pub templates: Vec<ChoiceOption>,
    pub show_vip: bool,
    pub event_name: String,
    pub event_date: String,
    pub location: String,
    pub presenter_options: Vec<ChoiceOption>,
    pub two_presenters: bool,
    pub vip_attendees: String,
    pub items: Vec<ItemRow>,
    pub total_minutes: u64,
    pub max_duration: u32,
    pub has_items: bool,
    pub script: Option<ScriptView>,
}

impl ScenarioPageTemplate {
    pub fn from_workspace(ctx: PageContext, ws: &Workspace) -> Self {
        let category = ws.category();
        let active_key = ws.program.active_template_key();
        let meta = &ws.metadata;

        let categories = EventCategory::ALL
            .into_iter()
            .map(|c| ChoiceOption {
                value: c.code().to_string(),
                label: c.label().to_string(),
                selected: c == category,
            })
            .collect();

        let templates = category
            .templates()
            .iter()
            .map(|t| ChoiceOption {
                value: t.key.to_string(),
                label: t.key.to_string(),
                selected: t.key == active_key,
            })
            .collect();

        let presenter_options = [PresenterCount::One, PresenterCount::Two]
            .into_iter()
            .map(|p| ChoiceOption {
                value: p.count().to_string(),
                label: format!("{}명", p.count()),
                selected: p == meta.presenters,
            })
            .collect();

        let items: Vec<ItemRow> = ws
            .program
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| ItemRow {
                index,
                position: index + 1,
                label: item.label.clone(),
                duration_minutes: item.duration_minutes,
                detail: item.detail.clone(),
            })
            .collect();

        ScenarioPageTemplate {
            ctx,
            categories,
            templates,
            show_vip: category.has_vip_attendees(),
            event_name: meta.name.clone(),
            event_date: meta.date.format("%Y-%m-%d").to_string(),
            location: meta.location.clone(),
            presenter_options,
            two_presenters: meta.presenters == PresenterCount::Two,
            vip_attendees: meta.vip_attendees.clone(),
            has_items: !items.is_empty(),
            items,
            total_minutes: ws.program.total_minutes(),
            max_duration: MAX_DURATION_MINUTES,
            script: ws.script.as_ref().map(|s| ScriptView {
                event_name: s.event_name.clone(),
                text: s.text.clone(),
            }),
        }
    }
}
