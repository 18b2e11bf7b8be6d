//! Plain-language summary of a ranked aggregate.
//!
//! Paragraph shape:
//!
//! 1. opening sentence: agency, fiscal year, PSC prefix
//! 2. one sentence per top category (at most `top_n`, grand total excluded)
//! 3. closing sentence: the grand total

use crate::domain::{Agency, AggregateTable, QueryParameters};
use crate::normalize::legacy_touch_up;
use crate::report::format::format_usd;

/// Compose the summary paragraph.
///
/// The grand total is found by row kind, so tables ranked with credits (where
/// the total is not the largest value) still close with the right amount.
/// Category labels pass through the legacy touch-up, which is a no-op for
/// labels the normalizer already produced.
pub fn generate_narrative(table: &AggregateTable, params: &QueryParameters, agency: &Agency, top_n: usize) -> String {
    let mut sentences = Vec::with_capacity(top_n + 2);

    sentences.push(format!(
        "The following data represents real-time information on {} contract obligations \
         for fiscal year {} in Product Service Code (PSC) category {}.",
        agency.long_form(),
        params.fiscal_year(),
        params.category_prefix(),
    ));

    for row in table.categories().take(top_n) {
        sentences.push(format!(
            "{} obligated {} on contracts coded under PSC {}.",
            agency.short_name,
            format_usd(row.total_obligation),
            legacy_touch_up(&row.label),
        ));
    }

    sentences.push(format!(
        "In total, {} obligated {} on contracts listed under PSC category {}.",
        agency.short_name,
        format_usd(table.grand_total()),
        params.category_prefix(),
    ));

    sentences.join(" ")
}
