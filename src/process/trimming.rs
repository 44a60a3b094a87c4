use crate::process::raw_table::{Column, Table};
use crate::process::utils::normalize_text;

/// Free-text columns that go through [`normalize_text`].
pub const TEXT_COLUMNS: [Column; 3] = [Column::Headline, Column::Source, Column::StatedOn];

/// Apply text normalization to flagged columns.
pub fn apply_trimming(table: &mut Table, columns: &[Column]) {
    for &col in columns {
        table.map_column(col, normalize_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::raw_table::Record;

    #[test]
    fn only_flagged_columns_change() {
        let mut table = Table::new(vec![Record {
            headline: Some("  a   b ".into()),
            source: Some("\u{fffd}".into()),
            stated_on: Some(" 18-Jun-20 ".into()),
            label: Some("  Mostly   True ".into()),
            ..Default::default()
        }]);
        apply_trimming(&mut table, &TEXT_COLUMNS);
        let r = &table.records[0];
        assert_eq!(r.headline.as_deref(), Some("a b"));
        assert_eq!(r.source, None);
        assert_eq!(r.stated_on.as_deref(), Some("18-Jun-20"));
        assert_eq!(r.label.as_deref(), Some("  Mostly   True "));
    }
}
