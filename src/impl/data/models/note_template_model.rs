use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::entities::{CategoryBlock, LineItem, NoteId, NoteTemplate};

/// Template slots are usually strings ("{{cash_on_hand_2024}}"), but
/// hand-written templates sometimes hold literal numbers.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum SlotValueModel {
    Number(Number),
    Text(String),
}

impl From<SlotValueModel> for String {
    fn from(model: SlotValueModel) -> String {
        match model {
            SlotValueModel::Number(n) => n.to_string(),
            SlotValueModel::Text(s) => s,
        }
    }
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct LineItemModel {
    #[serde(default)]
    pub(crate) label: String,
    #[serde(default)]
    pub(crate) value: Option<SlotValueModel>,
    #[serde(default)]
    pub(crate) previous_value: Option<SlotValueModel>,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct CategoryBlockModel {
    #[serde(default)]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) subcategories: Vec<LineItemModel>,
    #[serde(default)]
    pub(crate) total: Option<SlotValueModel>,
    #[serde(default)]
    pub(crate) previous_total: Option<SlotValueModel>,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct NoteTemplateModel {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) full_title: String,
    pub(crate) structure: Vec<CategoryBlockModel>,
    #[serde(default)]
    pub(crate) metadata: Map<String, Value>,
    #[serde(default)]
    pub(crate) notes_and_disclosures: Vec<String>,
    #[serde(default)]
    pub(crate) markdown_content: Option<String>,
}

impl NoteTemplateModel {
    /// `metadata.note_number`, as a string or a number.
    pub(crate) fn declared_note_number(&self) -> Option<String> {
        match self.metadata.get("note_number")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub(crate) fn into_template(self, note: NoteId) -> NoteTemplate {
        NoteTemplate {
            note,
            title: self.title,
            full_title: self.full_title,
            structure: self
                .structure
                .into_iter()
                .map(|block| CategoryBlock {
                    category: block.category,
                    subcategories: block
                        .subcategories
                        .into_iter()
                        .map(|item| LineItem {
                            label: item.label,
                            value: item.value.map(String::from).unwrap_or_default(),
                            previous_value: item.previous_value.map(String::from),
                        })
                        .collect(),
                    total: block.total.map(String::from),
                    previous_total: block.previous_total.map(String::from),
                })
                .collect(),
            metadata: self.metadata,
            notes_and_disclosures: self.notes_and_disclosures,
            markdown_content: self.markdown_content,
        }
    }
}

/// Every accepted shape of a template document.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum NoteTemplateSourceModel {
    Single(NoteTemplateModel),
    List(Vec<NoteTemplateModel>),
    Keyed(BTreeMap<String, NoteTemplateModel>),
}

impl NoteTemplateSourceModel {
    /// Flattens into (map key, template) pairs.
    pub(crate) fn into_entries(self) -> Vec<(Option<String>, NoteTemplateModel)> {
        match self {
            NoteTemplateSourceModel::Single(t) => vec![(None, t)],
            NoteTemplateSourceModel::List(ts) => ts.into_iter().map(|t| (None, t)).collect(),
            NoteTemplateSourceModel::Keyed(ts) => {
                ts.into_iter().map(|(k, t)| (Some(k), t)).collect()
            }
        }
    }
}
