//! Descriptive statistics used to inspect a table before choosing thresholds.

use crate::error::Result;
use crate::record::{Category, Record, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of records per actual category, every category present even when zero.
pub fn label_distribution(records: &[Record]) -> Result<BTreeMap<Category, usize>> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for (row, record) in records.iter().enumerate() {
        let category = record.actual_category().map_err(|e| e.at_row(row))?;
        *counts.entry(category).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Mean presence of each symptom within each actual category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prevalence {
    symptoms: Vec<String>,
    categories: Vec<Category>,
    /// `means[symptom][category]`, `None` when no record in the category has the symptom recorded
    means: Vec<Vec<Option<f64>>>,
}

impl Prevalence {
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, symptom: &str, category: Category) -> Option<f64> {
        let s = self.symptoms.iter().position(|name| name == symptom)?;
        let c = self.categories.iter().position(|cat| *cat == category)?;
        self.means[s][c]
    }

    /// Rows of `(symptom, means per category)` in column order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.symptoms
            .iter()
            .map(String::as_str)
            .zip(self.means.iter().map(Vec::as_slice))
    }
}

pub fn symptom_prevalence(table: &Table) -> Result<Prevalence> {
    let categories = Category::ALL.to_vec();
    let symptoms = table.symptom_columns().to_vec();

    // (present, observed) per symptom and category
    let mut tallies = vec![vec![(0u64, 0u64); categories.len()]; symptoms.len()];

    for (row, record) in table.records().iter().enumerate() {
        let category = record.actual_category().map_err(|e| e.at_row(row))?;
        // Category::ALL is in declaration order
        let c = category as usize;

        for (s, name) in symptoms.iter().enumerate() {
            if let Ok(present) = record.symptom(name) {
                let tally = &mut tallies[s][c];
                tally.1 += 1;
                if present {
                    tally.0 += 1;
                }
            }
        }
    }

    let means = tallies
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(present, observed)| {
                    (observed > 0).then(|| present as f64 / observed as f64)
                })
                .collect()
        })
        .collect();

    Ok(Prevalence {
        symptoms,
        categories,
        means,
    })
}
