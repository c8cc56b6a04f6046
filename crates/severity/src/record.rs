//! Patient records and the severity categories they are classified into.

use crate::error::{Result, SeverityError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Severity label assigned by a physician or predicted by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Mild,
    Moderate,
    Severe,
}

impl Category {
    /// The fixed label order used for confusion matrix rows and columns.
    pub const ALL: [Category; 3] = [Category::Mild, Category::Moderate, Category::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mild => "Mild",
            Category::Moderate => "Moderate",
            Category::Severe => "Severe",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SeverityError;

    /// Labels must match exactly; `"mild"` is not `Mild`.
    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SeverityError::UnknownLabel(s.to_string()))
    }
}

/// One patient observation.
///
/// Every field is optional at the type level so that a malformed row can be
/// loaded and then rejected by whichever rule actually needs the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    id: Option<String>,
    symptoms: BTreeMap<String, bool>,
    symptom_count: Option<u32>,
    actual_label: Option<String>,
}

impl Record {
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn symptoms(&self) -> &BTreeMap<String, bool> {
        &self.symptoms
    }

    /// Presence of a named symptom. Names match case-insensitively.
    pub fn symptom(&self, name: &str) -> Result<bool> {
        if let Some(present) = self.symptoms.get(name) {
            return Ok(*present);
        }
        self.symptoms
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, present)| *present)
            .ok_or_else(|| SeverityError::missing_field(name))
    }

    pub fn symptom_count(&self) -> Result<u32> {
        self.symptom_count
            .ok_or_else(|| SeverityError::missing_field("symptom_count"))
    }

    /// Raw ground-truth label text as loaded.
    pub fn actual_label(&self) -> Result<&str> {
        self.actual_label
            .as_deref()
            .ok_or_else(|| SeverityError::missing_field("label"))
    }

    pub fn actual_category(&self) -> Result<Category> {
        self.actual_label()?.parse()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.id = Some(id.into());
        self
    }

    pub fn symptom(mut self, name: impl Into<String>, present: bool) -> Self {
        self.record.symptoms.insert(name.into(), present);
        self
    }

    pub fn symptom_count(mut self, count: u32) -> Self {
        self.record.symptom_count = Some(count);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.record.actual_label = Some(label.into());
        self
    }

    pub fn category(self, category: Category) -> Self {
        self.label(category.as_str())
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// An in-memory table of records, owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct Table {
    symptom_columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(symptom_columns: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            symptom_columns,
            records,
        }
    }

    /// Symptom column names in file order.
    pub fn symptom_columns(&self) -> &[String] {
        &self.symptom_columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
