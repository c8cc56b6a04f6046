//! CSV loading of symptom tables and export of predictions.
//!
//! A table has one row per patient. The label and symptom count columns are
//! located by name; every other column holding boolean flags (`1`/`0`,
//! `true`/`false`, `yes`/`no`) is a symptom. Other columns are ignored, with
//! a warning when they mix flags and other values. Symptoms the rules read
//! must hold flags only. An empty cell leaves the field absent for that row.

use crate::classify::RuleSet;
use crate::error::{Result, SeverityError};
use crate::record::{Category, Record, Table};
use csv::StringRecord;
use std::io::{Read, Write};
use std::path::Path;

/// Names of the columns with a fixed role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub label: String,
    pub count: String,
    pub id: Option<String>,
    /// Symptom columns the rules read. Any non-flag value in them is an error.
    pub required: Vec<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            label: "Final Category".to_string(),
            count: "Number of Symptoms".to_string(),
            id: Some("Patient ID".to_string()),
            required: RuleSet::default().severe_symptoms,
        }
    }
}

impl ColumnMap {
    fn is_reserved(&self, header: &str) -> bool {
        header == self.label || header == self.count || self.id.as_deref() == Some(header)
    }

    fn is_required(&self, header: &str) -> bool {
        self.required.iter().any(|r| r.eq_ignore_ascii_case(header))
    }
}

pub fn load_csv<P: AsRef<Path>>(path: P, columns: &ColumnMap) -> Result<Table> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let table = read_table(file, columns)?;

    log::info!(
        "Loaded {} records with {} symptom columns from {}",
        table.len(),
        table.symptom_columns().len(),
        path.display()
    );
    Ok(table)
}

pub fn read_table<R: Read>(reader: R, columns: &ColumnMap) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let label_idx = position(&columns.label);
    let count_idx = position(&columns.count);
    let id_idx = columns.id.as_deref().and_then(position);

    if label_idx.is_none() {
        log::warn!("Label column '{}' not found", columns.label);
    }
    if count_idx.is_none() {
        log::warn!("Symptom count column '{}' not found", columns.count);
    }

    let rows = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let mut symptom_idx = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if columns.is_reserved(header) {
            continue;
        }
        if is_symptom_column(&rows, idx, header, columns.is_required(header))? {
            symptom_idx.push(idx);
        } else {
            log::debug!("Ignoring non-boolean column '{}'", header);
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (row, fields) in rows.iter().enumerate() {
        let mut builder = Record::builder();

        if let Some(value) = id_idx.and_then(|i| non_empty(fields, i)) {
            builder = builder.id(value);
        }
        if let Some(value) = label_idx.and_then(|i| non_empty(fields, i)) {
            builder = builder.label(value);
        }
        if let Some(value) = count_idx.and_then(|i| non_empty(fields, i)) {
            let count = parse_count(value).ok_or_else(|| SeverityError::InvalidValue {
                row,
                column: columns.count.clone(),
                value: value.to_string(),
            })?;
            builder = builder.symptom_count(count);
        }
        for &idx in &symptom_idx {
            if let Some(value) = non_empty(fields, idx) {
                // is_symptom_column already rejected non-boolean cells
                if let Some(present) = parse_flag(value) {
                    builder = builder.symptom(&headers[idx], present);
                }
            }
        }

        records.push(builder.build());
    }

    let symptom_columns = symptom_idx.iter().map(|&i| headers[i].to_string()).collect();
    Ok(Table::new(symptom_columns, records))
}

/// A column is a symptom when every non-empty cell is a boolean flag.
/// A required column with any other value is an error.
fn is_symptom_column(
    rows: &[StringRecord],
    idx: usize,
    header: &str,
    required: bool,
) -> Result<bool> {
    let mut saw_flag = false;
    let mut first_other: Option<(usize, &str)> = None;

    for (row, fields) in rows.iter().enumerate() {
        let Some(value) = non_empty(fields, idx) else {
            continue;
        };
        if parse_flag(value).is_some() {
            saw_flag = true;
        } else if first_other.is_none() {
            first_other = Some((row, value));
        }
    }

    match (saw_flag, first_other) {
        (_, None) => Ok(true),
        (_, Some((row, value))) if required => Err(SeverityError::InvalidValue {
            row,
            column: header.to_string(),
            value: value.to_string(),
        }),
        (true, Some((row, value))) => {
            log::warn!(
                "Column '{}' mixes flags with other values (row {}: '{}'), not treated as a symptom",
                header,
                row,
                value
            );
            Ok(false)
        }
        (false, Some(_)) => Ok(false),
    }
}

fn non_empty(fields: &StringRecord, idx: usize) -> Option<&str> {
    fields.get(idx).filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" => Some(true),
        "0" | "0.0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Non-negative integer, also accepting whole floats such as `3.0`.
fn parse_count(value: &str) -> Option<u32> {
    if let Ok(count) = value.parse::<u32>() {
        return Some(count);
    }
    let float: f64 = value.parse().ok()?;
    if float >= 0.0 && float.fract() == 0.0 && float <= u32::MAX as f64 {
        Some(float as u32)
    } else {
        None
    }
}

/// Write one `id,actual,predicted` line per record. Records without an id use their row index.
pub fn write_predictions<W: Write>(
    writer: W,
    records: &[Record],
    predictions: &[Category],
) -> Result<()> {
    if records.len() != predictions.len() {
        return Err(SeverityError::LengthMismatch {
            records: records.len(),
            predictions: predictions.len(),
        });
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["id", "actual", "predicted"])?;

    for (row, (record, predicted)) in records.iter().zip(predictions).enumerate() {
        let id = record
            .id()
            .map(|s| s.to_string())
            .unwrap_or_else(|| row.to_string());
        let actual = record.actual_label().unwrap_or("");
        wtr.write_record([id.as_str(), actual, predicted.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
