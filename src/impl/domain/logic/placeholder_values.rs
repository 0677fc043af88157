use std::collections::HashMap;

use crate::entities::{NoteFigures, Period, ScheduleIiiMapping};

const PERIODS: [Period; 2] = [Period::Current, Period::Previous];

/// Computes the value of every placeholder a note's template may reference.
///
/// Per category `c` and period label `p`: `c_p` and `<note>_c_p`.
/// Per note: `total_p`, `<note>_total_p`, plus descriptive values
/// (`note_number`, `note_title`, `current_period`, `previous_period`,
/// `amount_unit`, `currency_symbol`).
pub(crate) fn placeholder_values(
    figures: &NoteFigures,
    mapping: &ScheduleIiiMapping,
) -> HashMap<String, String> {
    let formatting = &mapping.formatting;
    let note = figures.note.as_str();
    let mut values = HashMap::new();

    for period in PERIODS {
        let label = mapping.periods.label(period);
        for category in &figures.categories {
            let value = formatting.fixed(category.presented.get(period));
            values.insert(format!("{}_{}_{}", note, category.name, label), value.clone());
            values.insert(format!("{}_{}", category.name, label), value);
        }
        let total = formatting.fixed(figures.total.get(period));
        values.insert(format!("{}_total_{}", note, label), total.clone());
        values.insert(format!("total_{}", label), total);
    }

    values.insert("note_number".to_string(), note.to_string());
    values.insert(
        "note_title".to_string(),
        mapping.title(&figures.note).unwrap_or_default().to_string(),
    );
    values.insert(
        "current_period".to_string(),
        mapping.periods.current.clone(),
    );
    values.insert(
        "previous_period".to_string(),
        mapping.periods.previous.clone(),
    );
    values.insert(
        "amount_unit".to_string(),
        formatting.amount_unit.clone(),
    );
    values.insert(
        "currency_symbol".to_string(),
        formatting.currency.symbol().to_string(),
    );
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::{
            account_classifier::AccountClassifier,
            aggregator::Aggregator,
            test_support::{entry_with_previous, test_mapping},
        },
        entities::NoteId,
    };

    #[test]
    fn builds_scoped_and_unscoped_tokens() {
        let mapping = test_mapping();
        let classified = AccountClassifier::new(&mapping).classify(vec![entry_with_previous(
            "Raw Material - Steel",
            1_234_567.0,
            -200_000.0,
        )]);
        let figures = Aggregator::new(&mapping).aggregate(&classified);
        let values = placeholder_values(&figures[&NoteId::new("11")], &mapping);

        assert_eq!(values["raw_materials_2024"], "12.35");
        assert_eq!(values["11_raw_materials_2024"], "12.35");
        assert_eq!(values["raw_materials_2023"], "2.00");
        assert_eq!(values["consumables_2024"], "0.00");
        assert_eq!(values["total_2024"], "12.35");
        assert_eq!(values["11_total_2023"], "2.00");
        assert_eq!(values["note_title"], "Inventories");
        assert_eq!(values["amount_unit"], "lakhs");
        assert_eq!(values["currency_symbol"], "₹");
    }
}
