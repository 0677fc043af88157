use super::{mapping::ScheduleIiiMapping, note_figures::NoteFigures, note_template::NoteTemplate};

/// Builds a template for a note that has figures but was given no template.
/// The result is filled like any user-provided template, so it should refer
/// to figures through placeholders rather than embed them.
pub trait TemplateGenerator: Send + Sync {
    fn generate(&self, figures: &NoteFigures, mapping: &ScheduleIiiMapping) -> NoteTemplate;
}
