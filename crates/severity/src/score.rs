//! Confusion matrix scoring of predicted against actual categories.

use crate::error::{Result, SeverityError};
use crate::record::{Category, Record};
use serde::Serialize;

/// Counts of (actual, predicted) pairs over an ordered label set.
///
/// Rows are actual categories and columns predicted categories, both in the
/// order of `labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<Category>,
    rows: Vec<Vec<u64>>,
}

/// Per-category precision and recall derived from a confusion matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub category: Category,
    /// Records whose actual category is this one
    pub support: u64,
    /// Records predicted as this category
    pub predicted: u64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
}

impl ConfusionMatrix {
    pub fn new(labels: &[Category]) -> Result<Self> {
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(SeverityError::Config(format!(
                    "Duplicate label in confusion matrix: {}",
                    label
                )));
            }
        }

        Ok(Self {
            labels: labels.to_vec(),
            rows: vec![vec![0; labels.len()]; labels.len()],
        })
    }

    /// Matrix over the fixed Mild, Moderate, Severe order.
    pub fn standard() -> Self {
        Self {
            labels: Category::ALL.to_vec(),
            rows: vec![vec![0; Category::ALL.len()]; Category::ALL.len()],
        }
    }

    fn index_of(&self, category: Category) -> Result<usize> {
        self.labels
            .iter()
            .position(|l| *l == category)
            .ok_or_else(|| SeverityError::UnknownLabel(category.as_str().to_string()))
    }

    pub fn increment(&mut self, actual: Category, predicted: Category) -> Result<()> {
        let row = self.index_of(actual)?;
        let col = self.index_of(predicted)?;
        self.rows[row][col] += 1;
        Ok(())
    }

    pub fn labels(&self) -> &[Category] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn get(&self, actual: Category, predicted: Category) -> Option<u64> {
        let row = self.index_of(actual).ok()?;
        let col = self.index_of(predicted).ok()?;
        Some(self.rows[row][col])
    }

    pub fn row(&self, actual: Category) -> Option<&[u64]> {
        let row = self.index_of(actual).ok()?;
        Some(&self.rows[row])
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().flatten().sum()
    }

    /// Sum of the diagonal.
    pub fn correct(&self) -> u64 {
        (0..self.labels.len()).map(|i| self.rows[i][i]).sum()
    }

    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.correct(), self.total())
    }

    fn support(&self, idx: usize) -> u64 {
        self.rows[idx].iter().sum()
    }

    fn predicted_count(&self, idx: usize) -> u64 {
        self.rows.iter().map(|row| row[idx]).sum()
    }

    /// Fraction of records actually in `category` that were predicted as it.
    pub fn recall(&self, category: Category) -> Option<f64> {
        let idx = self.index_of(category).ok()?;
        ratio(self.rows[idx][idx], self.support(idx))
    }

    /// Fraction of records predicted as `category` that actually are it.
    pub fn precision(&self, category: Category) -> Option<f64> {
        let idx = self.index_of(category).ok()?;
        ratio(self.rows[idx][idx], self.predicted_count(idx))
    }

    pub fn metrics(&self) -> Vec<ClassMetrics> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let precision = ratio(self.rows[idx][idx], self.predicted_count(idx));
                let recall = ratio(self.rows[idx][idx], self.support(idx));
                let f1 = match (precision, recall) {
                    (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
                    (Some(_), Some(_)) => Some(0.0),
                    _ => None,
                };
                ClassMetrics {
                    category: *category,
                    support: self.support(idx),
                    predicted: self.predicted_count(idx),
                    precision,
                    recall,
                    f1,
                }
            })
            .collect()
    }

    /// Element-wise addition of a matrix built over the same labels.
    pub fn merge(&mut self, other: &ConfusionMatrix) -> Result<()> {
        if self.labels != other.labels {
            return Err(SeverityError::Config(
                "Cannot merge confusion matrices with different labels".to_string(),
            ));
        }
        for (row, other_row) in self.rows.iter_mut().zip(&other.rows) {
            for (cell, other_cell) in row.iter_mut().zip(other_row) {
                *cell += other_cell;
            }
        }
        Ok(())
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Build a confusion matrix of each record's actual category against its prediction.
///
/// Labels outside `labels` are errors, never silently dropped.
pub fn score(
    records: &[Record],
    predictions: &[Category],
    labels: &[Category],
) -> Result<ConfusionMatrix> {
    if records.len() != predictions.len() {
        return Err(SeverityError::LengthMismatch {
            records: records.len(),
            predictions: predictions.len(),
        });
    }

    let mut matrix = ConfusionMatrix::new(labels)?;
    for (row, (record, predicted)) in records.iter().zip(predictions).enumerate() {
        let actual = record.actual_category().map_err(|e| e.at_row(row))?;
        matrix
            .increment(actual, *predicted)
            .map_err(|e| e.at_row(row))?;
    }

    log::debug!(
        "Scored {} records, {} correct",
        matrix.total(),
        matrix.correct()
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &str) -> Record {
        Record::builder().label(label).build()
    }

    #[test]
    fn test_score_counts_cells() {
        let records = vec![labelled("Mild"), labelled("Mild"), labelled("Severe")];
        let predictions = vec![Category::Mild, Category::Moderate, Category::Severe];

        let matrix = score(&records, &predictions, &Category::ALL).unwrap();
        assert_eq!(matrix.rows(), &[vec![1, 1, 0], vec![0, 0, 0], vec![0, 0, 1]]);
        assert_eq!(matrix.total(), 3);
        assert_eq!(matrix.correct(), 2);
    }

    #[test]
    fn test_empty_input() {
        let matrix = score(&[], &[], &Category::ALL).unwrap();
        assert_eq!(matrix.total(), 0);
        assert_eq!(matrix.accuracy(), None);
        assert_eq!(matrix, ConfusionMatrix::standard());
    }

    #[test]
    fn test_unknown_actual_label() {
        let records = vec![labelled("Mild"), labelled("Critical")];
        let predictions = vec![Category::Mild, Category::Mild];

        let err = score(&records, &predictions, &Category::ALL).unwrap_err();
        match err {
            SeverityError::Record { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(*source, SeverityError::UnknownLabel(ref l) if l == "Critical"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_label_outside_label_set() {
        let labels = [Category::Mild, Category::Moderate];
        let records = vec![labelled("Mild")];

        let err = score(&records, &[Category::Severe], &labels).unwrap_err();
        assert!(matches!(err.root(), SeverityError::UnknownLabel(l) if l == "Severe"));
    }

    #[test]
    fn test_missing_label() {
        let records = vec![Record::builder().symptom_count(1).build()];
        let err = score(&records, &[Category::Mild], &Category::ALL).unwrap_err();
        assert!(matches!(err.root(), SeverityError::MissingField { field } if field == "label"));
    }

    #[test]
    fn test_length_mismatch() {
        let records = vec![labelled("Mild")];
        let err = score(&records, &[], &Category::ALL).unwrap_err();
        assert!(matches!(
            err,
            SeverityError::LengthMismatch { records: 1, predictions: 0 }
        ));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        assert!(ConfusionMatrix::new(&[Category::Mild, Category::Mild]).is_err());
    }

    #[test]
    fn test_metrics() {
        let mut matrix = ConfusionMatrix::standard();
        for _ in 0..3 {
            matrix.increment(Category::Mild, Category::Mild).unwrap();
        }
        matrix.increment(Category::Mild, Category::Severe).unwrap();
        matrix.increment(Category::Severe, Category::Severe).unwrap();

        assert_eq!(matrix.recall(Category::Mild), Some(0.75));
        assert_eq!(matrix.precision(Category::Severe), Some(0.5));
        assert_eq!(matrix.recall(Category::Moderate), None);
        assert_eq!(matrix.accuracy(), Some(0.8));

        let metrics = matrix.metrics();
        assert_eq!(metrics.len(), 3);
        assert_eq!(metrics[0].support, 4);
        assert_eq!(metrics[2].predicted, 2);
        assert_eq!(metrics[1].f1, None);
        let f1 = metrics[0].f1.unwrap();
        assert!((f1 - 2.0 * 1.0 * 0.75 / 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_merge() {
        let mut left = ConfusionMatrix::standard();
        left.increment(Category::Mild, Category::Mild).unwrap();
        let mut right = ConfusionMatrix::standard();
        right.increment(Category::Mild, Category::Mild).unwrap();
        right.increment(Category::Severe, Category::Moderate).unwrap();

        left.merge(&right).unwrap();
        assert_eq!(left.get(Category::Mild, Category::Mild), Some(2));
        assert_eq!(left.get(Category::Severe, Category::Moderate), Some(1));
        assert_eq!(left.total(), 3);

        let other = ConfusionMatrix::new(&[Category::Mild]).unwrap();
        assert!(left.merge(&other).is_err());
    }
}
