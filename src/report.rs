use crate::{
    compute::Totals,
    data::{money, CategoryTotals},
};
use rust_decimal::Decimal;

/// Label of the hub every flow passes through, both in the text report and in
/// the flow graph.
pub(crate) const HUB: &str = "Revenues";
pub(crate) const SAVINGS: &str = "Savings";

/// The text report: one line per category, biggest amounts first, revenues then
/// expenses separated by an empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Report {
    pub lines: Vec<String>,
    pub savings: Decimal,
}

/// What's left once expenses are paid. May be zero or negative.
pub(crate) fn savings(totals: &Totals) -> Decimal {
    totals.revenues.values().sum::<Decimal>() - totals.expenses.values().sum::<Decimal>()
}

/// Entries sorted by amount, biggest first. The sort is stable, so equal amounts
/// keep the map's (alphabetical) order.
fn by_amount(totals: &CategoryTotals) -> Vec<(&str, Decimal)> {
    let mut entries: Vec<_> = totals
        .iter()
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

impl Report {
    pub fn new(totals: &Totals) -> Self {
        let mut lines: Vec<String> = by_amount(&totals.revenues)
            .into_iter()
            .map(|(category, amount)| format!("{category} [{}] {HUB}", money(amount)))
            .collect();
        lines.push(String::new());
        lines.extend(
            by_amount(&totals.expenses)
                .into_iter()
                .map(|(category, amount)| format!("{HUB} [{}] {category}", money(amount))),
        );
        // a deficit is computed but never reported
        let savings = savings(totals);
        if savings > Decimal::ZERO {
            lines.push(format!("{HUB} [{}] {SAVINGS}", money(savings)));
        }
        Self { lines, savings }
    }
}
