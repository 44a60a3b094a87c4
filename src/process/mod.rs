// src/process/mod.rs
//! Field-level rules and the table stages built on them.

pub mod convert;
pub mod date_parser;
pub mod dedup;
pub mod label;
pub mod missing;
pub mod raw_table;
pub mod schema;
pub mod trimming;
pub mod url;
pub mod utils;

pub use date_parser::parse_date;
pub use dedup::dedupe;
pub use label::{standardize_label, Verdict};
pub use raw_table::{Column, RawTable, Record, Table};
pub use url::{is_valid_url, INVALID_URL, NOT_AVAILABLE};
pub use utils::normalize_text;
