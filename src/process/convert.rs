use std::collections::HashSet;

use crate::process::date_parser::parse_date;
use crate::process::label::standardize_label;
use crate::process::raw_table::{Column, Table};
use crate::process::url::{is_valid_url, rewrite_url};

/// Distinct non-null values in a column.
pub fn distinct_count(table: &Table, col: Column) -> usize {
    table.column(col).flatten().collect::<HashSet<_>>().len()
}

/// Label variants before and after standardization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCounts {
    pub before: usize,
    pub after: usize,
}

pub fn standardize_labels(table: &mut Table) -> LabelCounts {
    let before = distinct_count(table, Column::Label);
    table.map_column(Column::Label, |v| {
        Some(standardize_label(v).as_str().to_string())
    });
    LabelCounts {
        before,
        after: distinct_count(table, Column::Label),
    }
}

/// Rewrite a date column as ISO strings; returns how many cells parsed.
pub fn parse_dates(table: &mut Table, col: Column) -> usize {
    table.map_column(col, parse_date);
    table.column(col).filter(Option::is_some).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlCounts {
    pub valid: usize,
    pub invalid: usize,
}

/// Validate every link and rewrite the malformed ones to the invalid sentinel.
pub fn validate_urls(table: &mut Table) -> UrlCounts {
    let valid = table
        .column(Column::Link)
        .filter(|v| is_valid_url(*v))
        .count();
    table.map_column(Column::Link, |v| Some(rewrite_url(v)));
    UrlCounts {
        valid,
        invalid: table.len() - valid,
    }
}
