use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use futures::future::try_join_all;
use regex::Regex;
use tracing::{debug, info};

use crate::{
    data::models::note_template_model::{NoteTemplateModel, NoteTemplateSourceModel},
    entities::{NoteId, NoteTemplate, ScheduleIiiMapping},
    errors::{DuplicateNoteTemplate, InvalidJson, ReadError, UnknownTemplateNote},
};

static NUMBERED_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+[A-Za-z]?)\s*\.").expect("hardcoded regex should be valid")
});

#[async_trait]
pub(crate) trait NoteTemplatesDatasource: Send + Sync {
    fn from_string(
        &self,
        s: &str,
        mapping: &ScheduleIiiMapping,
    ) -> Result<Vec<NoteTemplate>, ServerError>;

    /// Reads a template file, or every `*.json` file of a directory.
    async fn from_path<P>(
        &self,
        path: P,
        mapping: &ScheduleIiiMapping,
    ) -> Result<Vec<NoteTemplate>, ServerError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct NoteTemplatesDatasourceImpl;

impl NoteTemplatesDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }

    fn parse(&self, s: &str) -> Result<Vec<(Option<String>, NoteTemplateModel)>, ServerError> {
        let source: NoteTemplateSourceModel =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug("note template", &e))?;
        Ok(source.into_entries())
    }

    async fn json_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>, ServerError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ReadError::with_debug(&e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Resolves the note number of a template: the map key, then
/// `metadata.note_number`, then a leading "N." in the full title, then the
/// title itself looked up in the note titles table.
fn resolve_note(
    key: Option<String>,
    model: &NoteTemplateModel,
    mapping: &ScheduleIiiMapping,
) -> Result<NoteId, ServerError> {
    key.filter(|k| !k.trim().is_empty())
        .or_else(|| model.declared_note_number())
        .or_else(|| {
            NUMBERED_TITLE
                .captures(&model.full_title)
                .map(|caps| caps[1].to_string())
        })
        .map(NoteId::new)
        .or_else(|| mapping.note_for_title(&model.title).cloned())
        .ok_or_else(|| UnknownTemplateNote::new(&model.title))
}

fn build_templates(
    entries: Vec<(Option<String>, NoteTemplateModel)>,
    mapping: &ScheduleIiiMapping,
) -> Result<Vec<NoteTemplate>, ServerError> {
    let mut seen = BTreeSet::new();
    entries
        .into_iter()
        .map(|(key, model)| {
            let note = resolve_note(key, &model, mapping)?;
            if !seen.insert(note.clone()) {
                return Err(DuplicateNoteTemplate::new(note.as_str()));
            }
            debug!(note = %note, title = %model.title, "loaded note template");
            Ok(model.into_template(note))
        })
        .collect()
}

#[async_trait]
impl NoteTemplatesDatasource for NoteTemplatesDatasourceImpl {
    fn from_string(
        &self,
        s: &str,
        mapping: &ScheduleIiiMapping,
    ) -> Result<Vec<NoteTemplate>, ServerError> {
        build_templates(self.parse(s)?, mapping)
    }

    async fn from_path<P>(
        &self,
        path: P,
        mapping: &ScheduleIiiMapping,
    ) -> Result<Vec<NoteTemplate>, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let path = path.as_ref();
        let is_dir = tokio::fs::metadata(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?
            .is_dir();
        if !is_dir {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ReadError::with_debug(&e))?;
            return self.from_string(&content, mapping);
        }

        let files = self.json_files_in(path).await?;
        info!(directory = %path.display(), files = files.len(), "reading note templates");
        let contents = try_join_all(files.iter().map(|file| async move {
            tokio::fs::read_to_string(file)
                .await
                .map_err(|e| ReadError::with_debug(&e))
        }))
        .await?;
        let mut entries = Vec::new();
        for content in &contents {
            entries.extend(self.parse(content)?);
        }
        build_templates(entries, mapping)
    }
}
