// src/dictionary.rs

use arrow::datatypes::DataType;
use serde::Serialize;
use std::collections::HashSet;

use crate::process::raw_table::{Column, Table};
use crate::process::utils::infer_arrow_dtype;

const SAMPLE_COUNT: usize = 3;
const SAMPLE_WIDTH: usize = 40;
const SAMPLE_SEPARATOR: &str = " | ";

/// Human description of an output column.
pub fn describe(column: &str) -> &'static str {
    match column {
        "News_Headline" => "The claim or statement being fact-checked",
        "Source" => "Person or entity who made the claim",
        "Stated_On" => "Date when the claim was originally stated (YYYY-MM-DD)",
        "Date" => "Date when fact-check was published (YYYY-MM-DD)",
        "Label" => "Verdict: TRUE, mostly-true, half-true, barely-true, FALSE, pants-fire",
        "Link_Of_News" => "URL to full fact-check article",
        _ => "N/A",
    }
}

/// One row of the data dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    #[serde(rename = "Column")]
    pub column: String,
    #[serde(rename = "Type")]
    pub dtype: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Nulls")]
    pub nulls: u64,
    #[serde(rename = "Unique")]
    pub unique: u64,
    #[serde(rename = "Sample")]
    pub sample: String,
}

pub const DICTIONARY_HEADERS: [&str; 6] =
    ["Column", "Type", "Description", "Nulls", "Unique", "Sample"];

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Summarise one column from its values, top to bottom.
pub fn summarize<'a, I>(name: &str, values: I) -> ColumnSummary
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut nulls = 0u64;
    let mut present: Vec<&str> = Vec::new();
    for v in values {
        match v {
            Some(s) => present.push(s),
            None => nulls += 1,
        }
    }

    let unique = present.iter().collect::<HashSet<_>>().len() as u64;
    let sample = present
        .iter()
        .take(SAMPLE_COUNT)
        .map(|s| truncate(s, SAMPLE_WIDTH))
        .collect::<Vec<_>>()
        .join(SAMPLE_SEPARATOR);
    let dtype: DataType = infer_arrow_dtype(present.iter().copied());

    ColumnSummary {
        column: name.to_string(),
        dtype: format!("{:?}", dtype),
        description: describe(name).to_string(),
        nulls,
        unique,
        sample,
    }
}

/// Build the data dictionary for a cleaned table, one row per output column.
pub fn build_dictionary(table: &Table) -> Vec<ColumnSummary> {
    Column::ALL
        .iter()
        .map(|&col| summarize(col.header(), table.column(col)))
        .collect()
}
