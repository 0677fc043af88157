use std::collections::BTreeMap;

use crate::entities::{
    CategoryFigure, ClassifiedEntry, NoteFigures, NoteId, Period, PeriodAmounts,
    ScheduleIiiMapping, UNCATEGORIZED,
};

pub(crate) struct Aggregator<'a> {
    mapping: &'a ScheduleIiiMapping,
}

impl<'a> Aggregator<'a> {
    pub(crate) fn new(mapping: &'a ScheduleIiiMapping) -> Self {
        Self { mapping }
    }

    /// Figures for every note that received at least one account.
    pub(crate) fn aggregate(&self, classified: &[ClassifiedEntry]) -> BTreeMap<NoteId, NoteFigures> {
        let by_note: BTreeMap<&NoteId, Vec<&ClassifiedEntry>> =
            classified
                .iter()
                .fold(BTreeMap::new(), |mut map, c| {
                    if let Some(note) = &c.note {
                        map.entry(note).or_default().push(c);
                    }
                    map
                });
        by_note
            .into_iter()
            .map(|(note, entries)| (note.clone(), self.figures_for(note, &entries)))
            .collect()
    }

    /// Figures for one note. Configured categories always appear (at zero if
    /// nothing matched them); unmatched accounts form an extra category.
    pub(crate) fn figures_for(&self, note: &NoteId, entries: &[&ClassifiedEntry]) -> NoteFigures {
        let mut categories: Vec<CategoryFigure> = self
            .mapping
            .categories_for(note)
            .iter()
            .map(|rule| CategoryFigure {
                name: rule.name.clone(),
                raw: PeriodAmounts::default(),
                presented: PeriodAmounts::default(),
                accounts: Vec::new(),
            })
            .collect();

        for c in entries {
            let name = c.category.as_deref().unwrap_or(UNCATEGORIZED);
            let index = match categories.iter().position(|f| f.name == name) {
                Some(i) => i,
                None => {
                    categories.push(CategoryFigure {
                        name: name.to_string(),
                        raw: PeriodAmounts::default(),
                        presented: PeriodAmounts::default(),
                        accounts: Vec::new(),
                    });
                    categories.len() - 1
                }
            };
            let figure = &mut categories[index];
            figure.raw.add(Period::Current, c.entry.amount(Period::Current));
            figure.raw.add(Period::Previous, c.entry.amount(Period::Previous));
            figure.accounts.push(c.entry.account_name.clone());
        }

        let formatting = &self.mapping.formatting;
        let mut total = PeriodAmounts::default();
        for figure in categories.iter_mut() {
            figure.presented = PeriodAmounts {
                current: formatting.convert(figure.raw.current),
                previous: formatting.convert(figure.raw.previous),
            };
            total.current += figure.presented.current;
            total.previous += figure.presented.previous;
        }
        total.current = formatting.round(total.current);
        total.previous = formatting.round(total.previous);

        NoteFigures {
            note: note.clone(),
            categories,
            total,
        }
    }
}
