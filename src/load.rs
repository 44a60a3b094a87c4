// src/load.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, StringArray, UInt64Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::NamedTempFile;
use tracing::info;

use crate::dictionary::{ColumnSummary, DICTIONARY_HEADERS};
use crate::process::raw_table::{Column, Table};

/// On-disk layout, picked from the target's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => OutputFormat::Parquet,
            _ => OutputFormat::Csv,
        }
    }
}

/// Write through a temp file in the target's directory and rename over the
/// target once complete, so a failed write never leaves a partial file.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).with_context(|| format!("creating output directory {:?}", dir))?;
    let mut tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("creating temp file in {:?}", dir))?;
    write(&mut tmp)?;
    tmp.as_file_mut().flush()?;
    tmp.persist(path)
        .with_context(|| format!("replacing {:?}", path))?;
    Ok(())
}

fn write_parquet<W: Write + Send>(out: W, batch: &RecordBatch) -> Result<()> {
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(out, batch.schema(), Some(props))
        .context("creating Arrow writer")?;
    writer.write(batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// The cleaned table as one Arrow batch of nullable Utf8 columns, in output order.
pub fn table_to_batch(table: &Table) -> Result<RecordBatch> {
    let fields: Vec<Field> = Column::ALL
        .iter()
        .map(|c| Field::new(c.header(), DataType::Utf8, true))
        .collect();
    let cols: Vec<ArrayRef> = Column::ALL
        .iter()
        .map(|&c| Arc::new(table.column(c).collect::<StringArray>()) as ArrayRef)
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), cols).map_err(Into::into)
}

fn dictionary_to_batch(dict: &[ColumnSummary]) -> Result<RecordBatch> {
    let schema = Schema::new(vec![
        Field::new(DICTIONARY_HEADERS[0], DataType::Utf8, false),
        Field::new(DICTIONARY_HEADERS[1], DataType::Utf8, false),
        Field::new(DICTIONARY_HEADERS[2], DataType::Utf8, false),
        Field::new(DICTIONARY_HEADERS[3], DataType::UInt64, false),
        Field::new(DICTIONARY_HEADERS[4], DataType::UInt64, false),
        Field::new(DICTIONARY_HEADERS[5], DataType::Utf8, false),
    ]);
    let strings = |f: fn(&ColumnSummary) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(dict.iter().map(f)))
    };
    let cols: Vec<ArrayRef> = vec![
        strings(|d| d.column.as_str()),
        strings(|d| d.dtype.as_str()),
        strings(|d| d.description.as_str()),
        Arc::new(UInt64Array::from_iter_values(dict.iter().map(|d| d.nulls))),
        Arc::new(UInt64Array::from_iter_values(dict.iter().map(|d| d.unique))),
        strings(|d| d.sample.as_str()),
    ];
    RecordBatch::try_new(Arc::new(schema), cols).map_err(Into::into)
}

/// Write the cleaned table (header row first, nulls as empty cells).
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.display(), rows = table.len()))]
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path);
    write_atomically(path, |tmp| match format {
        OutputFormat::Parquet => write_parquet(tmp.as_file_mut(), &table_to_batch(table)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(tmp.as_file_mut());
            wtr.write_record(Column::ALL.iter().map(|c| c.header()))?;
            for row in table.ordered_rows() {
                wtr.write_record(row.iter().map(|v| v.unwrap_or("")))?;
            }
            wtr.flush()?;
            Ok(())
        }
    })?;
    info!(?format, "clean data saved");
    Ok(())
}

/// Write the data dictionary, one row per output column.
#[tracing::instrument(level = "info", skip(dict, path), fields(path = %path.display()))]
pub fn write_dictionary(dict: &[ColumnSummary], path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path);
    write_atomically(path, |tmp| match format {
        OutputFormat::Parquet => write_parquet(tmp.as_file_mut(), &dictionary_to_batch(dict)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(tmp.as_file_mut());
            for summary in dict {
                wtr.serialize(summary)?;
            }
            wtr.flush()?;
            Ok(())
        }
    })?;
    info!(?format, "data dictionary saved");
    Ok(())
}
