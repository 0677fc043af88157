use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::datasources::{
        mapping_config_datasource::{MappingConfigDatasource, MappingConfigDatasourceImpl},
        note_templates_datasource::{NoteTemplatesDatasource, NoteTemplatesDatasourceImpl},
        trial_balance_csv_datasource::{
            TrialBalanceCsvDatasource, TrialBalanceCsvDatasourceImpl,
        },
        trial_balance_json_datasource::{
            TrialBalanceJsonDatasource, TrialBalanceJsonDatasourceImpl,
        },
    },
    domain::repositories::notes_repository::NotesRepository,
    entities::{LedgerEntry, NoteInputs, Periods, ScheduleIiiMapping},
};

pub(crate) struct NotesRepositoryImpl<
    DS1 = MappingConfigDatasourceImpl,
    DS2 = TrialBalanceCsvDatasourceImpl,
    DS3 = TrialBalanceJsonDatasourceImpl,
    DS4 = NoteTemplatesDatasourceImpl,
> where
    DS1: MappingConfigDatasource,
    DS2: TrialBalanceCsvDatasource,
    DS3: TrialBalanceJsonDatasource,
    DS4: NoteTemplatesDatasource,
{
    config_datasource: DS1,
    csv_datasource: DS2,
    json_datasource: DS3,
    templates_datasource: DS4,
}

fn looks_like_json(s: &str) -> bool {
    matches!(s.trim_start().chars().next(), Some('[') | Some('{'))
}

#[async_trait]
impl<DS1, DS2, DS3, DS4> NotesRepository for NotesRepositoryImpl<DS1, DS2, DS3, DS4>
where
    DS1: MappingConfigDatasource + Send + Sync,
    DS2: TrialBalanceCsvDatasource + Send + Sync,
    DS3: TrialBalanceJsonDatasource + Send + Sync,
    DS4: NoteTemplatesDatasource,
{
    fn mapping_from_string(&self, config: Option<&str>) -> Result<ScheduleIiiMapping, ServerError> {
        match config {
            Some(config) => self.config_datasource.from_string(config),
            None => self.config_datasource.default_mapping(),
        }
    }

    fn mapping_from_file<P>(&self, config: Option<P>) -> Result<ScheduleIiiMapping, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        match config {
            Some(path) => {
                info!(path = %path.as_ref().display(), "loading mapping configuration");
                self.config_datasource.from_file(path)
            }
            None => self.config_datasource.default_mapping(),
        }
    }

    fn entries_from_string(
        &self,
        trial_balance: &str,
        periods: &Periods,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        if looks_like_json(trial_balance) {
            self.json_datasource.from_string(trial_balance)
        } else {
            self.csv_datasource.from_string(trial_balance, periods)
        }
    }

    fn entries_from_file<P>(
        &self,
        trial_balance: P,
        periods: &Periods,
    ) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        let is_json = trial_balance
            .as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let entries = if is_json {
            self.json_datasource.from_file(trial_balance)?
        } else {
            self.csv_datasource.from_file(trial_balance, periods)?
        };
        info!(accounts = entries.len(), "loaded trial balance");
        Ok(entries)
    }

    fn from_string(
        &self,
        trial_balance: &str,
        templates: &str,
        config: Option<&str>,
    ) -> Result<NoteInputs, ServerError> {
        let mapping = self.mapping_from_string(config)?;
        let entries = self.entries_from_string(trial_balance, &mapping.periods)?;
        let templates = self.templates_datasource.from_string(templates, &mapping)?;
        Ok(NoteInputs {
            entries,
            mapping,
            templates,
        })
    }

    async fn from_file<P>(
        &self,
        trial_balance: P,
        templates: P,
        config: Option<P>,
    ) -> Result<NoteInputs, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let mapping = self.mapping_from_file(config)?;
        let entries = self.entries_from_file(trial_balance, &mapping.periods)?;
        let templates = self
            .templates_datasource
            .from_path(templates, &mapping)
            .await?;
        info!(templates = templates.len(), "loaded note templates");
        Ok(NoteInputs {
            entries,
            mapping,
            templates,
        })
    }
}

impl NotesRepositoryImpl {
    pub(crate) fn new() -> Self {
        NotesRepositoryImpl {
            config_datasource: MappingConfigDatasourceImpl::new(),
            csv_datasource: TrialBalanceCsvDatasourceImpl::new(),
            json_datasource: TrialBalanceJsonDatasourceImpl::new(),
            templates_datasource: NoteTemplatesDatasourceImpl::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json_by_content() {
        assert!(looks_like_json("  [ {} ]"));
        assert!(looks_like_json("{\"accounts\": []}"));
        assert!(!looks_like_json("Particulars,Amount\n"));
    }

    #[test]
    fn loads_inputs_from_strings() {
        let inputs = NotesRepositoryImpl::new()
            .from_string(
                "Particulars,2024,2023\nCash in hand,1000,500\n",
                r#"{ "12": { "title": "{{note_title}}", "structure": [] } }"#,
                Some(r#"{ "formatting": { "amount_unit": "crores", "conversion_factor": 10000000 } }"#),
            )
            .unwrap();
        assert_eq!(inputs.entries.len(), 1);
        assert_eq!(inputs.entries[0].previous, Some(500.0));
        assert_eq!(inputs.templates.len(), 1);
        assert_eq!(inputs.mapping.formatting.amount_unit, "crores");
    }
}
