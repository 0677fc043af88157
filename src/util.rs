use fractic_server_error::ServerError;

use crate::{
    data::datasources::mapping_config_datasource::DEFAULT_MAPPING_CONFIG,
    domain::usecases::generate_notes_usecase::{
        GenerateNotesUsecase as _, GenerateNotesUsecaseImpl,
    },
    entities::{ClassifiedTrialBalance, GeneratedNotes, TemplateGenerator},
    errors::WriteError,
    ext::standard_templates::StandardCategoryTemplate,
    presentation::{
        notes_json_printer::NotesJsonPrinter, notes_summary_printer::NotesSummaryPrinter,
    },
};

/// Pretty JSON object, note number to filled note.
pub type NotesJson = String;

/// Pretty JSON of the classified accounts and the mapping summary.
pub type ClassificationJson = String;

pub struct ScheduleIiiNotesUtil<G = StandardCategoryTemplate>
where
    G: TemplateGenerator,
{
    generate_notes_usecase: GenerateNotesUsecaseImpl<G>,
    json_printer: NotesJsonPrinter,
    summary_printer: NotesSummaryPrinter,
}

impl ScheduleIiiNotesUtil {
    pub fn new() -> Self {
        Self::build(GenerateNotesUsecaseImpl::new(false))
    }

    /// Like `new`, but validation is strict whatever the configuration says:
    /// unresolved placeholders and inconsistent totals are errors.
    pub fn strict() -> Self {
        Self::build(GenerateNotesUsecaseImpl::new(true))
    }

    /// The embedded default mapping configuration (JSON).
    pub fn default_config() -> &'static str {
        DEFAULT_MAPPING_CONFIG
    }

    pub async fn write_default_config<T>(path: T) -> Result<(), ServerError>
    where
        T: AsRef<std::path::Path>,
    {
        tokio::fs::write(path, DEFAULT_MAPPING_CONFIG)
            .await
            .map_err(|e| WriteError::with_debug(&e))
    }
}

impl<G: TemplateGenerator> ScheduleIiiNotesUtil<G> {
    /// Uses `template_generator` for notes that have figures but no template.
    pub fn with_template_generator(template_generator: G, strict: bool) -> Self {
        Self::build(GenerateNotesUsecaseImpl::with_template_generator(
            template_generator,
            strict,
        ))
    }

    fn build(generate_notes_usecase: GenerateNotesUsecaseImpl<G>) -> Self {
        Self {
            generate_notes_usecase,
            json_printer: NotesJsonPrinter::new(),
            summary_printer: NotesSummaryPrinter::new(),
        }
    }

    pub async fn from_string(
        &self,
        trial_balance: &str,
        templates: &str,
        config: Option<&str>,
    ) -> Result<(GeneratedNotes, NotesJson), ServerError> {
        let generated = self
            .generate_notes_usecase
            .from_string(trial_balance, templates, config)
            .await?;
        let json = self.json_printer.print_notes(&generated)?;
        Ok((generated, json))
    }

    pub async fn from_file<T>(
        &self,
        trial_balance: T,
        templates: T,
        config: Option<T>,
    ) -> Result<(GeneratedNotes, NotesJson), ServerError>
    where
        T: AsRef<std::path::Path> + Send,
    {
        let generated = self
            .generate_notes_usecase
            .from_file(trial_balance, templates, config)
            .await?;
        let json = self.json_printer.print_notes(&generated)?;
        Ok((generated, json))
    }

    pub async fn classify_string(
        &self,
        trial_balance: &str,
        config: Option<&str>,
    ) -> Result<(ClassifiedTrialBalance, ClassificationJson), ServerError> {
        let classification = self
            .generate_notes_usecase
            .classify_string(trial_balance, config)
            .await?;
        let json = self.json_printer.print_classification(&classification)?;
        Ok((classification, json))
    }

    pub async fn classify_file<T>(
        &self,
        trial_balance: T,
        config: Option<T>,
    ) -> Result<(ClassifiedTrialBalance, ClassificationJson), ServerError>
    where
        T: AsRef<std::path::Path> + Send,
    {
        let classification = self
            .generate_notes_usecase
            .classify_file(trial_balance, config)
            .await?;
        let json = self.json_printer.print_classification(&classification)?;
        Ok((classification, json))
    }

    /// Plain-text report: mapping statistics, unmapped accounts, each note
    /// as rows, and validation issues.
    pub fn summary(&self, generated: &GeneratedNotes) -> String {
        self.summary_printer.print_summary(generated)
    }

    /// JSON with the mapping summary, per-note figures and validation issues.
    pub fn report_json(&self, generated: &GeneratedNotes) -> Result<String, ServerError> {
        self.json_printer.print_report(generated)
    }
}
