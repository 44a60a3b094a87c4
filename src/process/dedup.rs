use std::collections::HashSet;

use crate::process::raw_table::Table;

/// Remove rows identical to an earlier row across all fields, keeping the first.
/// Returns the number of rows removed.
pub fn dedupe(table: &mut Table) -> usize {
    let before = table.len();
    let mut seen = HashSet::with_capacity(before);
    table.records.retain(|r| seen.insert(r.clone()));
    before - table.len()
}
