use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::process::utils::collapse_whitespace;

const SHORT_MONTH: &str = "(?i:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)";
const LONG_MONTH: &str =
    "(?i:january|february|march|april|may|june|july|august|september|october|november|december)";

/// One accepted date layout. `shape` pins field widths and month-name forms
/// (chrono's `%Y` reads "20" as year 20 and its `%B` takes "Jun"), `format`
/// does the calendar check. A two-digit year is captured as `yy` and widened
/// before parsing.
pub struct DatePattern {
    pub shape: Regex,
    pub format: &'static str,
}

impl DatePattern {
    fn new(shape: &str, format: &'static str) -> Self {
        Self {
            shape: Regex::new(shape).expect("valid date shape"),
            format,
        }
    }

    pub fn parse(&self, s: &str) -> Option<NaiveDate> {
        let caps = self.shape.captures(s)?;
        match caps.name("yy") {
            Some(yy) => {
                let year = widen_year(yy.as_str().parse().ok()?);
                let widened = format!("{}{}{}", &s[..yy.start()], year, &s[yy.end()..]);
                NaiveDate::parse_from_str(&widened, &self.format.replace("%y", "%Y")).ok()
            }
            None => NaiveDate::parse_from_str(s, self.format).ok(),
        }
    }
}

/// 00..=68 land in the 2000s, 69..=99 in the 1900s.
fn widen_year(yy: u32) -> u32 {
    if yy <= 68 {
        2000 + yy
    } else {
        1900 + yy
    }
}

/// Tried top to bottom; the first layout that parses wins. Day/month ambiguity
/// ("03/04/2020") is settled by this order alone.
pub static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
    let yy = r"(?P<yy>\d{2})";
    vec![
        DatePattern::new(&format!(r"^\d{{1,2}}-{SHORT_MONTH}-{yy}$"), "%d-%b-%y"), // 18-Jun-20
        DatePattern::new(&format!(r"^\d{{1,2}}-{SHORT_MONTH}-\d{{4}}$"), "%d-%b-%Y"), // 18-Jun-2020
        DatePattern::new(&format!(r"^{SHORT_MONTH} \d{{1,2}}, \d{{4}}$"), "%b %d, %Y"), // Jun 19, 2020
        DatePattern::new(&format!(r"^{LONG_MONTH} \d{{1,2}}, \d{{4}}$"), "%B %d, %Y"), // June 19, 2020
        DatePattern::new(r"^\d{1,2}/\d{1,2}/\d{4}$", "%m/%d/%Y"), // 06/19/2020
        DatePattern::new(&format!(r"^\d{{1,2}}/\d{{1,2}}/{yy}$"), "%m/%d/%y"), // 06/19/20
        DatePattern::new(r"^\d{4}-\d{1,2}-\d{1,2}$", "%Y-%m-%d"), // 2020-06-19
        DatePattern::new(r"^\d{1,2}-\d{1,2}-\d{4}$", "%d-%m-%Y"), // 19-06-2020
        DatePattern::new(&format!(r"^\d{{1,2}}-\d{{1,2}}-{yy}$"), "%d-%m-%y"), // 19-06-20
        DatePattern::new(r"^\d{1,2}/\d{1,2}/\d{4}$", "%d/%m/%Y"), // 19/06/2020
        DatePattern::new(&format!(r"^\d{{1,2}}/\d{{1,2}}/{yy}$"), "%d/%m/%y"), // 19/06/20
        DatePattern::new(&format!(r"^{LONG_MONTH} \d{{1,2}},\d{{4}}$"), "%B %d,%Y"), // June 19,2020
        DatePattern::new(r"^\d{4}/\d{1,2}/\d{1,2}$", "%Y/%m/%d"), // 2020/06/19
    ]
});

const NULL_MARKERS: &[&str] = &["unknown", "nan", "none"];

/// Parse a free-form date into `YYYY-MM-DD`. Anything unparseable is `None`.
pub fn parse_date(raw: Option<&str>) -> Option<String> {
    let s = collapse_whitespace(raw?);
    if s.is_empty() || NULL_MARKERS.contains(&s.to_lowercase().as_str()) {
        return None;
    }

    DATE_PATTERNS
        .iter()
        .find_map(|p| p.parse(&s))
        .map(|d| d.format("%Y-%m-%d").to_string())
}
