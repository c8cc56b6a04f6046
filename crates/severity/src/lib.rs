pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod record;
pub mod score;
pub mod summary;

pub use classify::{Rule, RuleEngine, RuleMatch, RuleSet};
pub use config::Config;
pub use dataset::{load_csv, read_table, write_predictions, ColumnMap};
pub use error::{Result, SeverityError};
pub use record::{Category, Record, RecordBuilder, Table};
pub use score::{score, ClassMetrics, ConfusionMatrix};
pub use summary::{label_distribution, symptom_prevalence, Prevalence};
