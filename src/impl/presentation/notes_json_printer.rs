use std::collections::BTreeMap;

use fractic_server_error::{CriticalError, ServerError};

use crate::entities::{ClassifiedTrialBalance, GeneratedNotes, NoteTemplate};

pub(crate) struct NotesJsonPrinter;

impl NotesJsonPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Pretty JSON object, note number to filled note, in statement order.
    pub(crate) fn print_notes(&self, generated: &GeneratedNotes) -> Result<String, ServerError> {
        // serde_json objects are keyed by String, which would sort "10" before
        // "9"; a Vec of pairs keeps statement order in the output.
        let ordered: Vec<(&str, &NoteTemplate)> = generated
            .notes
            .iter()
            .map(|(note, template)| (note.as_str(), template))
            .collect();
        let mut out = String::from("{\n");
        for (i, (note, template)) in ordered.iter().enumerate() {
            let key = serde_json::to_string(note)
                .map_err(|e| CriticalError::with_debug("failed to serialize note number", &e))?;
            let body = serde_json::to_string_pretty(template)
                .map_err(|e| CriticalError::with_debug("failed to serialize note", &e))?;
            out.push_str(&format!("  {}: {}", key, indent(&body)));
            out.push_str(if i + 1 < ordered.len() { ",\n" } else { "\n" });
        }
        out.push('}');
        Ok(out)
    }

    pub(crate) fn print_classification(
        &self,
        classification: &ClassifiedTrialBalance,
    ) -> Result<String, ServerError> {
        serde_json::to_string_pretty(classification)
            .map_err(|e| CriticalError::with_debug("failed to serialize classification", &e))
    }

    /// Per-note figures and validation issues, for callers that post-process
    /// the notes.
    pub(crate) fn print_report(&self, generated: &GeneratedNotes) -> Result<String, ServerError> {
        let figures: BTreeMap<&str, _> = generated
            .figures
            .iter()
            .map(|(note, f)| (note.as_str(), f))
            .collect();
        serde_json::to_string_pretty(&serde_json::json!({
            "summary": generated.summary,
            "figures": figures,
            "issues": generated.issues,
        }))
        .map_err(|e| CriticalError::with_debug("failed to serialize report", &e))
    }
}

/// Indents every line but the first by two spaces, so a pretty-printed value
/// nests under its key.
fn indent(s: &str) -> String {
    s.replace('\n', "\n  ")
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value};

    use super::*;
    use crate::{
        domain::logic::test_support::test_mapping,
        entities::{MappingSummary, NoteId},
    };

    fn note(n: &str) -> NoteTemplate {
        NoteTemplate {
            note: NoteId::new(n),
            title: format!("Note {}", n),
            full_title: format!("{}. Note {}", n, n),
            structure: vec![],
            metadata: Map::new(),
            notes_and_disclosures: vec![],
            markdown_content: None,
        }
    }

    #[test]
    fn prints_notes_in_statement_order() {
        let generated = GeneratedNotes {
            notes: [note("9"), note("10")]
                .into_iter()
                .map(|n| (n.note.clone(), n))
                .collect(),
            figures: BTreeMap::new(),
            classified: vec![],
            summary: MappingSummary::default(),
            issues: vec![],
            mapping: test_mapping(),
        };
        let json = NotesJsonPrinter::new().print_notes(&generated).unwrap();

        assert!(json.find("\"9\"").unwrap() < json.find("\"10\"").unwrap());
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["10"]["full_title"], "10. Note 10");
        assert_eq!(parsed["9"]["structure"], Value::Array(vec![]));
    }
}
