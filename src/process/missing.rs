use crate::process::raw_table::{Column, Table};
use crate::process::url::NOT_AVAILABLE;
use crate::process::utils::normalize_text;

/// Stand-in for an unattributed claim.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Drop rows without a usable headline: absent, or nothing left after text
/// normalization. Returns the number of rows removed.
pub fn drop_missing_headline(table: &mut Table) -> usize {
    let before = table.len();
    table
        .records
        .retain(|r| normalize_text(r.get(Column::Headline)).is_some());
    before - table.len()
}

fn fill_blank(table: &mut Table, col: Column, default: &str) {
    table.map_column(col, |v| match v {
        None | Some("") => Some(default.to_string()),
        Some(s) => Some(s.to_string()),
    });
}

/// Default the columns that must never be null before dedup: source, link, and
/// the empty string for the remaining free-form columns.
pub fn fill_defaults(table: &mut Table) {
    fill_blank(table, Column::Source, UNKNOWN_SOURCE);
    fill_blank(table, Column::Link, NOT_AVAILABLE);
    for col in [Column::Date, Column::StatedOn, Column::Label] {
        table.map_column(col, |v| Some(v.unwrap_or_default().to_string()));
    }
}

/// Text normalization may null out a source; put the default back.
pub fn refill_defaults(table: &mut Table) {
    table.map_column(Column::Source, |v| {
        Some(v.unwrap_or(UNKNOWN_SOURCE).to_string())
    });
}
