use crate::error::EtlError;
use crate::process::raw_table::{Column, RawTable, Record, Table};

/// Position of every required column inside a file's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; 6],
}

impl ColumnIndex {
    /// Map each required column to its header position. Extra columns are ignored;
    /// any absent required column is fatal.
    pub fn resolve(headers: &[String]) -> Result<Self, EtlError> {
        let mut positions = [0usize; 6];
        let mut missing = Vec::new();

        for col in Column::ALL {
            match headers.iter().position(|h| h.trim() == col.header()) {
                Some(i) => positions[col as usize] = i,
                None => missing.push(col.header().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(EtlError::MissingColumns { missing });
        }
        Ok(Self { positions })
    }

    pub fn position(&self, col: Column) -> usize {
        self.positions[col as usize]
    }

    /// Build a record from one raw row. Short rows read as missing trailing cells.
    pub fn record(&self, row: &[Option<String>]) -> Record {
        let mut rec = Record::default();
        for col in Column::ALL {
            let value = row.get(self.position(col)).cloned().flatten();
            rec.set(col, value);
        }
        rec
    }
}

/// Resolve the header row and materialise every row as a [`Record`].
pub fn to_table(raw: &RawTable) -> Result<Table, EtlError> {
    let index = ColumnIndex::resolve(&raw.headers)?;
    Ok(Table::new(raw.rows.iter().map(|r| index.record(r)).collect()))
}
