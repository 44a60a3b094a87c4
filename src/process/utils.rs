use arrow::datatypes::DataType;
use chrono::NaiveDate;

/// Collapse every whitespace run to one space and trim both ends.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a free-text cell: keep only 7-bit printable characters, collapse
/// whitespace, trim. Blank input, or input with nothing left, becomes `None`.
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let portable: String = raw
        .chars()
        .filter_map(|c| {
            if is_ascii_space(c) {
                Some(' ')
            } else if c.is_ascii_graphic() {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    let cleaned = collapse_whitespace(&portable);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// ASCII whitespace including vertical tab and the 0x1C..0x1F separators.
fn is_ascii_space(c: char) -> bool {
    matches!(c, '\t'..='\r' | ' ' | '\x1c'..='\x1f')
}

/// Infer an Arrow dtype from the non-null values of a column.
pub fn infer_arrow_dtype<'a, I>(values: I) -> DataType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = false;
    let mut all_dates = true;
    let mut all_numbers = true;

    for v in values {
        seen = true;
        all_dates &= NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok();
        all_numbers &= v.parse::<f64>().is_ok();
        if !all_dates && !all_numbers {
            return DataType::Utf8;
        }
    }

    match (seen, all_dates, all_numbers) {
        (false, _, _) => DataType::Null,
        (true, true, _) => DataType::Date32,
        (true, false, true) => DataType::Float64,
        _ => DataType::Utf8,
    }
}
