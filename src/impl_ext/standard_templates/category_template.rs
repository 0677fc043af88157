use serde_json::{Map, Value};

use crate::entities::{
    CategoryBlock, LineItem, NoteFigures, NoteTemplate, ScheduleIiiMapping, TemplateGenerator,
};

/// One block per note, one line per category, totals bound to the note
/// total.
pub struct StandardCategoryTemplate;

impl StandardCategoryTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateGenerator for StandardCategoryTemplate {
    fn generate(&self, figures: &NoteFigures, mapping: &ScheduleIiiMapping) -> NoteTemplate {
        let current = &mapping.periods.current;
        let previous = &mapping.periods.previous;

        let mut metadata = Map::new();
        metadata.insert(
            "note_number".to_string(),
            Value::String(figures.note.to_string()),
        );
        metadata.insert("template".to_string(), Value::String("generated".to_string()));

        NoteTemplate {
            note: figures.note.clone(),
            title: "{{note_title}}".to_string(),
            full_title: "{{note_number}}. {{note_title}}".to_string(),
            structure: vec![CategoryBlock {
                category: "{{note_title}}".to_string(),
                subcategories: figures
                    .categories
                    .iter()
                    .map(|c| LineItem {
                        label: c.label(),
                        value: format!("{{{{{}_{}}}}}", c.name, current),
                        previous_value: Some(format!("{{{{{}_{}}}}}", c.name, previous)),
                    })
                    .collect(),
                total: Some(format!("{{{{total_{}}}}}", current)),
                previous_total: Some(format!("{{{{total_{}}}}}", previous)),
            }],
            metadata,
            notes_and_disclosures: vec![
                "Amounts are stated in {{currency_symbol}} {{amount_unit}}.".to_string(),
            ],
            markdown_content: None,
        }
    }
}
