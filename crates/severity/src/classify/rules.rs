//! Threshold rules for symptom severity classification.
//!
//! Two explicit rules are evaluated in a fixed order, first match wins:
//! - `mild`: few symptoms and none of the severe symptoms present
//! - `severe`: any severe symptom present, or a high symptom count
//!
//! A record matching neither is Moderate. There is no explicit moderate
//! threshold, so moving either boundary shifts records into or out of the
//! fallback.
//!
//! Thresholds can be overridden from a TOML file with a `[rules]` table.

use crate::error::{Result, SeverityError};
use crate::record::{Category, Record};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds shared by the mild and severe rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSet {
    /// Highest symptom count still considered mild (inclusive)
    pub mild_max_symptoms: u32,
    /// Symptom count above which a record is severe (exclusive)
    pub severe_above_symptoms: u32,
    /// Symptoms whose presence alone makes a record severe
    pub severe_symptoms: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            mild_max_symptoms: 2,
            severe_above_symptoms: 5,
            severe_symptoms: vec!["Spasms".to_string(), "Cramps".to_string()],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesFile {
    #[serde(default)]
    rules: RuleSet,
}

impl RuleSet {
    /// Load rules from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse rules from a TOML string. Keys left out keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: RulesFile = toml::from_str(toml_str)
            .map_err(|e| SeverityError::Config(format!("Failed to parse TOML: {}", e)))?;
        file.rules.validate()?;
        Ok(file.rules)
    }

    pub fn to_toml(&self) -> Result<String> {
        let file = RulesFile { rules: self.clone() };
        toml::to_string_pretty(&file)
            .map_err(|e| SeverityError::Config(format!("Failed to serialize rules: {}", e)))
    }

    /// Save rules to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.severe_symptoms.is_empty() {
            return Err(SeverityError::Config(
                "severe_symptoms must name at least one symptom".to_string(),
            ));
        }
        if self.severe_symptoms.iter().any(|s| s.trim().is_empty()) {
            return Err(SeverityError::Config(
                "severe_symptoms cannot contain empty names".to_string(),
            ));
        }
        Ok(())
    }

    /// True when some symptom count satisfies both the mild and severe count thresholds.
    pub fn count_ranges_overlap(&self) -> bool {
        self.mild_max_symptoms > self.severe_above_symptoms
    }
}

/// The explicit rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Mild,
    Severe,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Mild => "mild",
            Rule::Severe => "severe",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Rule::Mild => Category::Mild,
            Rule::Severe => Category::Severe,
        }
    }
}

/// Result of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub category: Category,
    /// Name of the rule that fired, or `"fallback"`
    pub rule: &'static str,
}

pub const FALLBACK_RULE: &str = "fallback";

/// Classification engine that applies the rules to records.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleSet,
    order: Vec<Rule>,
    fallback: Category,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            order: vec![Rule::Mild, Rule::Severe],
            fallback: Category::Moderate,
        }
    }
}

impl RuleEngine {
    /// Create a new rule engine with the given thresholds.
    pub fn new(rules: RuleSet) -> Result<Self> {
        rules.validate()?;
        if rules.count_ranges_overlap() {
            log::warn!(
                "mild_max_symptoms ({}) exceeds severe_above_symptoms ({}); the mild rule takes precedence",
                rules.mild_max_symptoms,
                rules.severe_above_symptoms
            );
        }
        Ok(Self {
            rules,
            ..Self::default()
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Few symptoms and no severe symptom present.
    pub fn is_mild(&self, record: &Record) -> Result<bool> {
        let count = record.symptom_count()?;
        let severe_present = self.any_severe_symptom(record)?;
        Ok(count <= self.rules.mild_max_symptoms && !severe_present)
    }

    /// Any severe symptom present, or more symptoms than the severe threshold.
    pub fn is_severe(&self, record: &Record) -> Result<bool> {
        let count = record.symptom_count()?;
        let severe_present = self.any_severe_symptom(record)?;
        Ok(severe_present || count > self.rules.severe_above_symptoms)
    }

    /// Every configured severe symptom is read so that a missing one is
    /// reported no matter what the others hold.
    fn any_severe_symptom(&self, record: &Record) -> Result<bool> {
        let mut present = false;
        for name in &self.rules.severe_symptoms {
            present |= record.symptom(name)?;
        }
        Ok(present)
    }

    fn matches(&self, rule: Rule, record: &Record) -> Result<bool> {
        match rule {
            Rule::Mild => self.is_mild(record),
            Rule::Severe => self.is_severe(record),
        }
    }

    /// Classify a record and report which rule decided it.
    pub fn classify_with_rule(&self, record: &Record) -> Result<RuleMatch> {
        for rule in &self.order {
            if self.matches(*rule, record)? {
                return Ok(RuleMatch {
                    category: rule.category(),
                    rule: rule.name(),
                });
            }
        }

        Ok(RuleMatch {
            category: self.fallback,
            rule: FALLBACK_RULE,
        })
    }

    pub fn classify(&self, record: &Record) -> Result<Category> {
        let matched = self.classify_with_rule(record)?;
        log::trace!(
            "record {} -> {} ({})",
            record.id().unwrap_or("-"),
            matched.category,
            matched.rule
        );
        Ok(matched.category)
    }

    /// Classify every record. The first malformed record aborts the batch.
    pub fn classify_batch(&self, records: &[Record]) -> Result<Vec<Category>> {
        let predictions = records
            .iter()
            .enumerate()
            .map(|(row, record)| self.classify(record).map_err(|e| e.at_row(row)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Classified {} records", predictions.len());
        Ok(predictions)
    }
}
