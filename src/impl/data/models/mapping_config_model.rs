use std::collections::{BTreeMap, HashMap};

use fractic_server_error::ServerError;
use iso_currency::Currency;
use regex::RegexBuilder;

use crate::{
    entities::{
        CategoryRule, DigitGrouping, Formatting, KeywordRule, NoteId, PatternRule, Periods,
        ScheduleIiiMapping, ValidationSettings,
    },
    errors::{InvalidFormatting, InvalidIsoCurrencyCode, InvalidMatchPattern},
};

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct CategoryModel {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) keywords: Vec<String>,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct PeriodsModel {
    pub(crate) current: String,
    pub(crate) previous: String,
}

#[derive(Debug, Clone, Copy, serde_derive::Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DigitGroupingModel {
    Standard,
    Indian,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct FormattingModel {
    pub(crate) currency: String,
    pub(crate) amount_unit: String,
    pub(crate) conversion_factor: f64,
    pub(crate) decimal_places: usize,
    #[serde(default = "default_true")]
    pub(crate) absolute_values: bool,
    #[serde(default = "default_grouping")]
    pub(crate) grouping: DigitGroupingModel,
}

#[derive(Debug, Default, serde_derive::Deserialize)]
pub(crate) struct ValidationModel {
    #[serde(default)]
    pub(crate) strict: bool,
    #[serde(default)]
    pub(crate) total_tolerance: Option<f64>,
}

/// On-disk shape of the mapping configuration. User files are deep-merged
/// over the embedded default before being parsed into this model, so only
/// the sections a user wants to change need to be present.
#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct MappingConfigModel {
    #[serde(default)]
    pub(crate) schedule_iii_mapping: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) exact_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) group_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) patterns: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub(crate) exclusions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub(crate) note_titles: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) note_categories: BTreeMap<String, Vec<CategoryModel>>,
    #[serde(default)]
    pub(crate) fallback_note: Option<String>,
    pub(crate) periods: PeriodsModel,
    pub(crate) formatting: FormattingModel,
    #[serde(default)]
    pub(crate) validation: ValidationModel,
    #[serde(default = "default_true")]
    pub(crate) generate_missing_templates: bool,
}

fn default_true() -> bool {
    true
}

fn default_grouping() -> DigitGroupingModel {
    DigitGroupingModel::Indian
}

fn lower_keyed(map: BTreeMap<String, String>) -> HashMap<String, NoteId> {
    map.into_iter()
        .map(|(k, note)| (k.trim().to_lowercase(), NoteId::new(note)))
        .collect()
}

fn lower_all(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl TryFrom<FormattingModel> for Formatting {
    type Error = ServerError;

    fn try_from(model: FormattingModel) -> Result<Self, Self::Error> {
        let currency = Currency::from_code(model.currency.trim())
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&model.currency))?;
        if !(model.conversion_factor > 0.0) {
            return Err(InvalidFormatting::new(
                "conversion_factor must be a positive number",
            ));
        }
        if model.decimal_places > 6 {
            return Err(InvalidFormatting::new(
                "decimal_places must be between 0 and 6",
            ));
        }
        Ok(Formatting {
            currency,
            amount_unit: model.amount_unit,
            conversion_factor: model.conversion_factor,
            decimal_places: model.decimal_places,
            absolute_values: model.absolute_values,
            grouping: match model.grouping {
                DigitGroupingModel::Standard => DigitGrouping::Standard,
                DigitGroupingModel::Indian => DigitGrouping::Indian,
            },
        })
    }
}

impl TryFrom<MappingConfigModel> for ScheduleIiiMapping {
    type Error = ServerError;

    fn try_from(model: MappingConfigModel) -> Result<Self, Self::Error> {
        // Period labels and category names become placeholder names
        // (`{category}_{period}`, `total_{period}`), which must not collide.
        let (current, previous) = (model.periods.current.trim(), model.periods.previous.trim());
        if current.is_empty() || previous.is_empty() || current == previous {
            return Err(InvalidFormatting::new(&format!(
                "period labels must be distinct and non-empty, got '{}' and '{}'",
                current, previous
            )));
        }
        if let Some((note, category)) = model.note_categories.iter().find_map(|(note, cs)| {
            cs.iter()
                .find(|c| c.name.trim().eq_ignore_ascii_case("total"))
                .map(|c| (note, c))
        }) {
            return Err(InvalidFormatting::new(&format!(
                "category '{}' of note {} clashes with the note total placeholder",
                category.name.trim(),
                note
            )));
        }

        let mut keywords: Vec<KeywordRule> = model
            .schedule_iii_mapping
            .into_iter()
            .map(|(keyword, note)| KeywordRule {
                keyword: keyword.trim().to_lowercase(),
                note: NoteId::new(note),
            })
            .filter(|rule| !rule.keyword.is_empty())
            .collect();
        KeywordRule::sort_by_specificity(&mut keywords);

        // Patterns are tried in note order.
        let mut pattern_sources: Vec<(NoteId, Vec<String>)> = model
            .patterns
            .into_iter()
            .map(|(note, patterns)| (NoteId::new(note), patterns))
            .collect();
        pattern_sources.sort_by(|a, b| a.0.cmp(&b.0));
        let patterns = pattern_sources
            .into_iter()
            .flat_map(|(note, patterns)| patterns.into_iter().map(move |p| (note.clone(), p)))
            .map(|(note, p)| {
                RegexBuilder::new(&p)
                    .case_insensitive(true)
                    .build()
                    .map(|pattern| PatternRule {
                        pattern,
                        note: note.clone(),
                    })
                    .map_err(|e| InvalidMatchPattern::with_debug(&p, note.as_str(), &e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScheduleIiiMapping {
            exact: lower_keyed(model.exact_mappings),
            groups: lower_keyed(model.group_mappings),
            keywords,
            patterns,
            exclusions: model
                .exclusions
                .into_iter()
                .map(|(note, words)| (NoteId::new(note), lower_all(words)))
                .collect(),
            categories: model
                .note_categories
                .into_iter()
                .map(|(note, categories)| {
                    (
                        NoteId::new(note),
                        categories
                            .into_iter()
                            .map(|c| CategoryRule {
                                name: c.name.trim().to_string(),
                                keywords: lower_all(c.keywords),
                            })
                            .collect(),
                    )
                })
                .collect(),
            note_titles: model
                .note_titles
                .into_iter()
                .map(|(note, title)| (NoteId::new(note), title))
                .collect(),
            fallback_note: model
                .fallback_note
                .filter(|n| !n.trim().is_empty())
                .map(NoteId::new),
            periods: Periods {
                current: model.periods.current.trim().to_string(),
                previous: model.periods.previous.trim().to_string(),
            },
            formatting: model.formatting.try_into()?,
            validation: ValidationSettings {
                strict: model.validation.strict,
                total_tolerance: model.validation.total_tolerance,
            },
            generate_missing_templates: model.generate_missing_templates,
        })
    }
}
