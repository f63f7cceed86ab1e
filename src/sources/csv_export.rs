//! CSV export reader for issue-tracker dumps.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::SourceError;
use crate::models::{DESCRIPTION_COLUMN, FieldValue, ID_COLUMN, Record, TITLE_COLUMN};

/// Rows of a CSV export, loaded fully into memory.
#[derive(Debug, Clone)]
pub struct CsvSource {
    records: Vec<Record>,
}

impl CsvSource {
    /// Load every row of the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            records: parse_records(file)?,
        })
    }

    /// Build a source from already-parsed CSV text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Ok(Self {
            records: parse_records(reader)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row of the file, regardless of any start offset.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Rows from `offset` to the end; empty when `offset` is past the last row.
    pub fn rows_from(&self, offset: usize) -> &[Record] {
        self.records.get(offset..).unwrap_or(&[])
    }
}

fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, SourceError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    for required in [ID_COLUMN, TITLE_COLUMN, DESCRIPTION_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            return Err(SourceError::MissingColumn(required.to_string()));
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        records.push(to_record(index, &headers, &row?)?);
    }
    Ok(records)
}

fn to_record(
    index: usize,
    headers: &StringRecord,
    row: &StringRecord,
) -> Result<Record, SourceError> {
    // Short rows are padded with nulls; long rows cannot be mapped to columns.
    if row.len() > headers.len() {
        return Err(SourceError::ExtraFields {
            row: index,
            expected: headers.len(),
            found: row.len(),
        });
    }

    let mut title = String::new();
    let mut description = String::new();
    let mut id = None;
    let mut fields = BTreeMap::new();

    for (pos, header) in headers.iter().enumerate() {
        let cell = row.get(pos).unwrap_or("");
        match header {
            TITLE_COLUMN => title = cell.to_string(),
            DESCRIPTION_COLUMN => description = cell.to_string(),
            _ => {
                if header == ID_COLUMN {
                    id = parse_id(index, cell)?;
                }
                fields.insert(header.to_string(), FieldValue::parse(cell));
            }
        }
    }

    Ok(Record {
        index,
        id,
        title,
        description,
        fields,
    })
}

/// Integer ids, or whole-valued floats such as `42.0` from spreadsheet exports.
fn parse_id(row: usize, cell: &str) -> Result<Option<u64>, SourceError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = cell.parse::<u64>() {
        return Ok(Some(n));
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 => Ok(Some(f.trunc() as u64)),
        _ => Err(SourceError::InvalidId {
            row,
            value: cell.to_string(),
        }),
    }
}
