use num_format::{Locale, ToFormattedString as _};

use crate::{
    domain::logic::utils::parse_figure,
    entities::{DigitGrouping, Formatting},
};

fn locale(grouping: DigitGrouping) -> &'static Locale {
    match grouping {
        DigitGrouping::Standard => &Locale::en,
        // en_IN groups as 12,34,567.
        DigitGrouping::Indian => &Locale::en_IN,
    }
}

/// Format an amount (already in the presentation unit) with the currency
/// symbol, the configured number of decimal places and thousands separators.
/// Negative amounts are shown in parentheses.
///
/// Always uses '.' as decimal mark regardless of user's locale.
pub(crate) fn format_amount(amount: f64, formatting: &Formatting) -> String {
    let decimal_places = formatting.decimal_places;
    let scale = 10i64.pow(decimal_places as u32);
    // Round once on the scaled integer, so 0.999 becomes 1.00 and not 0.100.
    let scaled = (amount.abs() * scale as f64).round() as i64;
    let integer_part = (scaled / scale).to_formatted_string(locale(formatting.grouping));
    let number = if decimal_places == 0 {
        integer_part
    } else {
        format!(
            "{}.{:0decimal_places$}",
            integer_part,
            scaled % scale,
            decimal_places = decimal_places
        )
    };
    let symbol = formatting.currency.symbol();
    if amount < 0.0 && scaled != 0 {
        format!("({} {})", symbol, number)
    } else {
        format!("{} {}", symbol, number)
    }
}

/// Formats a filled-in template cell: numbers as amounts, anything else as
/// is.
pub(crate) fn format_cell(cell: &str, formatting: &Formatting) -> String {
    match parse_figure(cell) {
        Some(value) if !cell.trim().is_empty() => format_amount(value, formatting),
        _ => cell.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logic::test_support::test_mapping;

    #[test]
    fn groups_the_indian_way() {
        let formatting = test_mapping().formatting;
        assert_eq!(format_amount(1234567.891, &formatting), "₹ 12,34,567.89");
        assert_eq!(format_amount(-12.5, &formatting), "(₹ 12.50)");
        assert_eq!(format_amount(0.999, &formatting), "₹ 1.00");
        assert_eq!(format_amount(-0.001, &formatting), "₹ 0.00");
    }

    #[test]
    fn groups_the_standard_way() {
        let mut formatting = test_mapping().formatting;
        formatting.grouping = DigitGrouping::Standard;
        formatting.decimal_places = 0;
        assert_eq!(format_amount(1234567.4, &formatting), "₹ 1,234,567");
    }

    #[test]
    fn leaves_text_cells_alone() {
        let formatting = test_mapping().formatting;
        assert_eq!(format_cell("3.75", &formatting), "₹ 3.75");
        assert_eq!(format_cell("March 31, 2024", &formatting), "March 31, 2024");
        assert_eq!(format_cell("", &formatting), "");
    }
}
