use std::collections::BTreeMap;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::{info, warn};

use crate::{
    data::repositories::notes_repository_impl::NotesRepositoryImpl,
    domain::{
        logic::{
            account_classifier::AccountClassifier, aggregator::Aggregator,
            mapping_statistics::mapping_summary, note_validator::NoteValidator,
            placeholder_values::placeholder_values, template_filler::TemplateFiller,
        },
        repositories::notes_repository::NotesRepository,
    },
    entities::{
        ClassifiedTrialBalance, GeneratedNotes, NoteInputs, NoteTemplate, TemplateGenerator,
        ValidationIssue,
    },
    ext::standard_templates::StandardCategoryTemplate,
};

#[async_trait]
pub trait GenerateNotesUsecase: Send + Sync {
    async fn from_string(
        &self,
        trial_balance: &str,
        templates: &str,
        config: Option<&str>,
    ) -> Result<GeneratedNotes, ServerError>;

    async fn from_file<P>(
        &self,
        trial_balance: P,
        templates: P,
        config: Option<P>,
    ) -> Result<GeneratedNotes, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    async fn classify_string(
        &self,
        trial_balance: &str,
        config: Option<&str>,
    ) -> Result<ClassifiedTrialBalance, ServerError>;

    async fn classify_file<P>(
        &self,
        trial_balance: P,
        config: Option<P>,
    ) -> Result<ClassifiedTrialBalance, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct GenerateNotesUsecaseImpl<
    G = StandardCategoryTemplate,
    R1 = NotesRepositoryImpl, // Default.
> where
    G: TemplateGenerator,
    R1: NotesRepository,
{
    notes_repository: R1,
    template_generator: G,
    force_strict: bool,
}

impl<G, R1> GenerateNotesUsecaseImpl<G, R1>
where
    G: TemplateGenerator,
    R1: NotesRepository,
{
    fn generate(&self, inputs: NoteInputs) -> Result<GeneratedNotes, ServerError> {
        let NoteInputs {
            entries,
            mut mapping,
            templates,
        } = inputs;
        if self.force_strict {
            mapping.validation.strict = true;
        }
        let generated_on = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let classified = AccountClassifier::new(&mapping).classify(entries);
        let summary = mapping_summary(&classified);
        info!(
            total = summary.total_records,
            mapped = summary.mapped_records,
            unmapped = summary.unmapped_records,
            "classified trial balance"
        );

        let aggregator = Aggregator::new(&mapping);
        let mut figures = aggregator.aggregate(&classified);
        let validator = NoteValidator::new(&mapping);
        let mut issues = validator.classification_issues(&classified);

        // Templates without figures still render, at zero.
        let mut selected: BTreeMap<_, NoteTemplate> = BTreeMap::new();
        for template in templates {
            figures
                .entry(template.note.clone())
                .or_insert_with(|| aggregator.figures_for(&template.note, &[]));
            selected.insert(template.note.clone(), template);
        }
        for (note, note_figures) in &figures {
            if selected.contains_key(note) {
                continue;
            }
            if mapping.generate_missing_templates {
                info!(note = %note, "no template provided, generating one from categories");
                selected.insert(
                    note.clone(),
                    self.template_generator.generate(note_figures, &mapping),
                );
            } else {
                warn!(note = %note, "no template provided, note left out");
                issues.push(ValidationIssue::MissingTemplate { note: note.clone() });
            }
        }

        let mut notes = BTreeMap::new();
        for (note, template) in selected {
            let values = match figures.get(&note) {
                Some(note_figures) => placeholder_values(note_figures, &mapping),
                None => continue,
            };
            let filled = TemplateFiller::new(&values, &generated_on).fill(&template);
            let note_issues = validator.note_issues(&filled.note, &filled.unknown_tokens);
            for issue in &note_issues {
                warn!(note = %note, "{}", issue);
            }
            issues.extend(note_issues);
            notes.insert(note, filled.note);
        }

        validator.enforce(&issues)?;
        info!(notes = notes.len(), issues = issues.len(), "generated notes");

        Ok(GeneratedNotes {
            notes,
            figures,
            classified,
            summary,
            issues,
            mapping,
        })
    }
}

#[async_trait]
impl<G, R1> GenerateNotesUsecase for GenerateNotesUsecaseImpl<G, R1>
where
    G: TemplateGenerator,
    R1: NotesRepository,
{
    async fn from_string(
        &self,
        trial_balance: &str,
        templates: &str,
        config: Option<&str>,
    ) -> Result<GeneratedNotes, ServerError> {
        let inputs = self
            .notes_repository
            .from_string(trial_balance, templates, config)?;
        self.generate(inputs)
    }

    async fn from_file<P>(
        &self,
        trial_balance: P,
        templates: P,
        config: Option<P>,
    ) -> Result<GeneratedNotes, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let inputs = self
            .notes_repository
            .from_file(trial_balance, templates, config)
            .await?;
        self.generate(inputs)
    }

    async fn classify_string(
        &self,
        trial_balance: &str,
        config: Option<&str>,
    ) -> Result<ClassifiedTrialBalance, ServerError> {
        let mapping = self.notes_repository.mapping_from_string(config)?;
        let entries = self
            .notes_repository
            .entries_from_string(trial_balance, &mapping.periods)?;
        let classified = AccountClassifier::new(&mapping).classify(entries);
        let summary = mapping_summary(&classified);
        Ok(ClassifiedTrialBalance {
            classified,
            summary,
        })
    }

    async fn classify_file<P>(
        &self,
        trial_balance: P,
        config: Option<P>,
    ) -> Result<ClassifiedTrialBalance, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let mapping = self.notes_repository.mapping_from_file(config)?;
        let entries = self
            .notes_repository
            .entries_from_file(trial_balance, &mapping.periods)?;
        let classified = AccountClassifier::new(&mapping).classify(entries);
        let summary = mapping_summary(&classified);
        Ok(ClassifiedTrialBalance {
            classified,
            summary,
        })
    }
}

impl GenerateNotesUsecaseImpl {
    pub(crate) fn new(force_strict: bool) -> Self {
        GenerateNotesUsecaseImpl {
            notes_repository: NotesRepositoryImpl::new(),
            template_generator: StandardCategoryTemplate::new(),
            force_strict,
        }
    }
}

impl<G: TemplateGenerator> GenerateNotesUsecaseImpl<G> {
    pub(crate) fn with_template_generator(template_generator: G, force_strict: bool) -> Self {
        GenerateNotesUsecaseImpl {
            notes_repository: NotesRepositoryImpl::new(),
            template_generator,
            force_strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NoteId;

    const TRIAL_BALANCE: &str = "\
Particulars,2024,2023
Raw Material - Steel,250000,100000
Consumables,50000,20000
Cash in hand,15000,12000
Bank - HDFC,\"1,35,000\",88000
Suspense Account,999,0
";

    const TEMPLATES: &str = r#"{
        "11": {
            "title": "{{note_title}}",
            "full_title": "11. {{note_title}}",
            "structure": [{
                "category": "Valued at cost",
                "subcategories": [
                    { "label": "Raw materials", "value": "{{raw_materials_2024}}", "previous_value": "{{raw_materials_2023}}" },
                    { "label": "Consumables", "value": "{{consumables_2024}}", "previous_value": "{{consumables_2023}}" }
                ],
                "total": "{{total_2024}}",
                "previous_total": "{{total_2023}}"
            }]
        },
        "13": {
            "title": "{{note_title}}",
            "full_title": "13. {{note_title}}",
            "structure": [{
                "category": "Unsecured, considered good",
                "subcategories": [{ "label": "Debtors", "value": "{{13_total_2024}}" }],
                "total": "{{total_2024}}"
            }]
        }
    }"#;

    #[tokio::test]
    async fn generates_filled_and_missing_notes() {
        let generated = GenerateNotesUsecaseImpl::new(false)
            .from_string(TRIAL_BALANCE, TEMPLATES, None)
            .await
            .unwrap();

        let inventories = &generated.notes[&NoteId::new("11")];
        assert_eq!(inventories.title, "Inventories");
        let block = &inventories.structure[0];
        assert_eq!(block.subcategories[0].value, "2.50");
        assert_eq!(block.subcategories[0].previous_value.as_deref(), Some("1.00"));
        assert_eq!(block.subcategories[1].value, "0.50");
        assert_eq!(block.total.as_deref(), Some("3.00"));
        assert_eq!(block.previous_total.as_deref(), Some("1.20"));

        // A template with no accounts renders at zero.
        let receivables = &generated.notes[&NoteId::new("13")];
        assert_eq!(receivables.structure[0].total.as_deref(), Some("0.00"));

        // Note 12 had figures but no template.
        let cash = &generated.notes[&NoteId::new("12")];
        assert_eq!(cash.structure[0].total.as_deref(), Some("1.50"));

        assert_eq!(generated.summary.unmapped_records, 1);
        assert!(generated
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::UnmappedAccount { account_name, .. } if account_name == "Suspense Account")));
        assert!(!generated.has_blocking_issues());
    }

    #[tokio::test]
    async fn reports_missing_templates_when_generation_is_off() {
        let generated = GenerateNotesUsecaseImpl::new(false)
            .from_string(
                TRIAL_BALANCE,
                TEMPLATES,
                Some(r#"{ "generate_missing_templates": false }"#),
            )
            .await
            .unwrap();
        assert!(!generated.notes.contains_key(&NoteId::new("12")));
        assert!(generated
            .issues
            .contains(&ValidationIssue::MissingTemplate {
                note: NoteId::new("12")
            }));
    }

    #[tokio::test]
    async fn strict_mode_fails_on_unknown_placeholder() {
        let templates = r#"{ "11": { "title": "{{not_a_value}}", "structure": [] } }"#;
        let lenient = GenerateNotesUsecaseImpl::new(false)
            .from_string(TRIAL_BALANCE, templates, None)
            .await
            .unwrap();
        assert!(lenient.has_blocking_issues());
        assert_eq!(lenient.notes[&NoteId::new("11")].title, "{{not_a_value}}");

        let strict = GenerateNotesUsecaseImpl::new(true)
            .from_string(TRIAL_BALANCE, templates, None)
            .await;
        assert!(strict.is_err());
    }

    #[tokio::test]
    async fn classifies_without_templates() {
        let result = GenerateNotesUsecaseImpl::new(false)
            .classify_string(TRIAL_BALANCE, None)
            .await
            .unwrap();
        assert_eq!(result.summary.total_records, 5);
        assert_eq!(result.summary.mapped_records, 4);
        assert_eq!(result.classified[0].note, Some(NoteId::new("11")));
    }
}
