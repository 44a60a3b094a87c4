// src/extract.rs

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::{borrow::Cow, fs, path::Path};
use tracing::{debug, info};

use crate::error::EtlError;
use crate::process::raw_table::{RawTable, Table};
use crate::process::schema::to_table;

/// Text encodings tried, in order, until one decodes and parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

pub const ENCODING_FALLBACK: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }

    /// Strict decode; `None` when the bytes are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            TextEncoding::Windows1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

/// Cell values read as missing, besides the empty string.
pub const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn cell(raw: &str) -> Option<String> {
    if raw.is_empty() || NA_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse decoded CSV text. The first row is the header. Short rows are allowed
/// (missing trailing cells); a row wider than the header is a parse error.
pub fn parse_csv(content: &str) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .context("reading header row")?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        if record.len() > headers.len() {
            bail!(
                "record {} has {} fields, header has {}",
                idx,
                record.len(),
                headers.len()
            );
        }
        rows.push(record.iter().map(cell).collect());
    }
    Ok(RawTable { headers, rows })
}

/// Decode `bytes` with the first encoding under which it parses as CSV.
pub fn decode_table(path: &Path, bytes: &[u8]) -> Result<(TextEncoding, RawTable), EtlError> {
    let mut attempts = Vec::with_capacity(ENCODING_FALLBACK.len());
    for encoding in ENCODING_FALLBACK {
        let Some(text) = encoding.decode(bytes) else {
            debug!(encoding = encoding.name(), "decode failed");
            attempts.push(format!("{}: invalid byte sequence", encoding.name()));
            continue;
        };
        match parse_csv(&text) {
            Ok(raw) => return Ok((encoding, raw)),
            Err(e) => {
                debug!(encoding = encoding.name(), error = %e, "csv parse failed");
                attempts.push(format!("{}: {:#}", encoding.name(), e));
            }
        }
    }
    Err(EtlError::Unreadable {
        path: path.to_path_buf(),
        attempts,
    })
}

/// Read a delimited file into a [`RawTable`], falling back through encodings.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_raw_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read input file: {:?}", path))?;
    let (encoding, raw) = decode_table(path, &bytes)?;
    info!(encoding = encoding.name(), "loaded");
    info!(rows = raw.rows.len(), columns = ?raw.headers, "input shape");
    Ok(raw)
}

/// Load the input file as fact-check records. Missing required columns are fatal.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let raw = read_raw_table(path)?;
    Ok(to_table(&raw)?)
}
