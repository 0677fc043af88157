use crate::entities::{ClassifiedEntry, MappingSummary};

pub(crate) fn mapping_summary(classified: &[ClassifiedEntry]) -> MappingSummary {
    let mut summary = MappingSummary {
        total_records: classified.len(),
        ..Default::default()
    };
    for c in classified {
        *summary.by_source.entry(c.matched_by.clone()).or_default() += 1;
        let Some(note) = &c.note else {
            summary.unmapped_records += 1;
            continue;
        };
        summary.mapped_records += 1;
        summary.total_mapped_amount += c.entry.current.abs();
        let share = summary.by_note.entry(note.clone()).or_default();
        share.count += 1;
        share.total_amount += c.entry.current.abs();
    }
    if summary.total_records > 0 {
        summary.success_rate =
            summary.mapped_records as f64 / summary.total_records as f64 * 100.0;
    }
    summary
}
