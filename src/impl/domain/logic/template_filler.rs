use std::collections::HashMap;

use serde_json::Value;

use crate::entities::{CategoryBlock, LineItem, NoteTemplate};

use super::utils::replace_all_placeholders_in_string;

pub(crate) struct FilledNote {
    pub(crate) note: NoteTemplate,
    /// Tokens with no computed value, in order of first appearance.
    pub(crate) unknown_tokens: Vec<String>,
}

pub(crate) struct TemplateFiller<'a> {
    values: &'a HashMap<String, String>,
    generated_on: &'a str,
}

impl<'a> TemplateFiller<'a> {
    pub(crate) fn new(values: &'a HashMap<String, String>, generated_on: &'a str) -> Self {
        Self {
            values,
            generated_on,
        }
    }

    pub(crate) fn fill(&self, template: &NoteTemplate) -> FilledNote {
        let mut unknown = Vec::new();
        let mut sub = |s: &str| replace_all_placeholders_in_string(s, self.values, &mut unknown);

        let title = sub(template.title.as_str());
        let full_title = sub(template.full_title.as_str());
        let structure = template
            .structure
            .iter()
            .map(|block| CategoryBlock {
                category: sub(block.category.as_str()),
                subcategories: block
                    .subcategories
                    .iter()
                    .map(|item| LineItem {
                        label: sub(item.label.as_str()),
                        value: sub(item.value.as_str()),
                        previous_value: item.previous_value.as_deref().map(&mut sub),
                    })
                    .collect(),
                total: block.total.as_deref().map(&mut sub),
                previous_total: block.previous_total.as_deref().map(&mut sub),
            })
            .collect();
        let notes_and_disclosures = template
            .notes_and_disclosures
            .iter()
            .map(|line| sub(line.as_str()))
            .collect();
        let markdown_content = template.markdown_content.as_deref().map(&mut sub);

        let mut metadata = template.metadata.clone();
        metadata
            .entry("note_number")
            .or_insert_with(|| Value::String(template.note.to_string()));
        metadata
            .entry("generated_on")
            .or_insert_with(|| Value::String(self.generated_on.to_string()));

        FilledNote {
            note: NoteTemplate {
                note: template.note.clone(),
                title,
                full_title,
                structure,
                metadata,
                notes_and_disclosures,
                markdown_content,
            },
            unknown_tokens: unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::entities::NoteId;

    fn template() -> NoteTemplate {
        NoteTemplate {
            note: NoteId::new("11"),
            title: "{{note_title}}".into(),
            full_title: "11. {{note_title}}".into(),
            structure: vec![CategoryBlock {
                category: "Valued at cost".into(),
                subcategories: vec![
                    LineItem {
                        label: "Raw materials".into(),
                        value: "{{raw_materials_2024}}".into(),
                        previous_value: Some("{{raw_materials_2023}}".into()),
                    },
                    LineItem {
                        label: "Work in progress".into(),
                        value: "{{work_in_progress_2024}}".into(),
                        previous_value: None,
                    },
                ],
                total: Some("{{total_2024}}".into()),
                previous_total: Some("{{total_2023}}".into()),
            }],
            metadata: Map::new(),
            notes_and_disclosures: vec!["Stated in {{amount_unit}}.".into()],
            markdown_content: Some("| Raw | {{raw_materials_2024}} |".into()),
        }
    }

    #[test]
    fn fills_every_slot() {
        let values = HashMap::from([
            ("note_title".to_string(), "Inventories".to_string()),
            ("raw_materials_2024".to_string(), "3.75".to_string()),
            ("raw_materials_2023".to_string(), "1.00".to_string()),
            ("total_2024".to_string(), "3.75".to_string()),
            ("total_2023".to_string(), "1.00".to_string()),
            ("amount_unit".to_string(), "lakhs".to_string()),
        ]);
        let filled = TemplateFiller::new(&values, "2024-05-01 10:00:00").fill(&template());

        let note = filled.note;
        assert_eq!(note.title, "Inventories");
        assert_eq!(note.full_title, "11. Inventories");
        assert_eq!(note.structure[0].subcategories[0].value, "3.75");
        assert_eq!(
            note.structure[0].subcategories[0].previous_value.as_deref(),
            Some("1.00")
        );
        assert_eq!(note.structure[0].total.as_deref(), Some("3.75"));
        assert_eq!(note.notes_and_disclosures[0], "Stated in lakhs.");
        assert_eq!(note.markdown_content.as_deref(), Some("| Raw | 3.75 |"));
        assert_eq!(note.metadata["note_number"], "11");
        assert_eq!(note.metadata["generated_on"], "2024-05-01 10:00:00");

        assert_eq!(filled.unknown_tokens, vec!["work_in_progress_2024".to_string()]);
        assert_eq!(
            note.structure[0].subcategories[1].value,
            "{{work_in_progress_2024}}"
        );
    }

    #[test]
    fn keeps_existing_metadata() {
        let mut t = template();
        t.metadata
            .insert("note_number".into(), Value::String("11A".into()));
        let filled = TemplateFiller::new(&HashMap::new(), "now").fill(&t);
        assert_eq!(filled.note.metadata["note_number"], "11A");
    }
}
