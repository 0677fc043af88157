use serde_json::{Map, Value};

use super::note_id::NoteId;

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct LineItem {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct CategoryBlock {
    pub category: String,
    pub subcategories: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_total: Option<String>,
}

/// A statutory note, before or after its placeholders have been substituted.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct NoteTemplate {
    #[serde(skip)]
    pub note: NoteId,
    pub title: String,
    pub full_title: String,
    pub structure: Vec<CategoryBlock>,
    pub metadata: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes_and_disclosures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
}
