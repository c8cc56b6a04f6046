pub mod classify;
pub mod rules;
pub mod score;
pub mod summarize;
mod helpers;

use clap::{Args, Parser, Subcommand};
use severity_lib::{ColumnMap, Config, Result, RuleEngine};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "severity")]
#[command(about = "Classify symptom severity with threshold rules and score the result", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to rules file (TOML)")]
    pub rules: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    #[arg(help = "Path to the CSV table")]
    pub input: PathBuf,

    #[arg(long, default_value = "Final Category", help = "Column holding the actual category")]
    pub label_column: String,

    #[arg(long, default_value = "Number of Symptoms", help = "Column holding the symptom count")]
    pub count_column: String,

    #[arg(long, default_value = "Patient ID", help = "Column holding the record id")]
    pub id_column: String,
}

impl DataArgs {
    /// Column roles, with `required` naming the symptoms the rules will read.
    pub fn columns(&self, required: &[String]) -> ColumnMap {
        ColumnMap {
            label: self.label_column.clone(),
            count: self.count_column.clone(),
            id: Some(self.id_column.clone()),
            required: required.to_vec(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Predict a category for every record")]
    Classify {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long, short = 'o', help = "Write predictions to a CSV file")]
        output: Option<PathBuf>,
    },

    #[command(about = "Classify and compare against the actual categories")]
    Score {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long, default_value = "table", help = "Output format (table, json)")]
        format: String,

        #[arg(long, short = 'o', help = "Output file path (json only)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Show category counts and symptom prevalence")]
    Summarize {
        #[command(flatten)]
        data: DataArgs,
    },

    #[command(about = "Show the effective rules")]
    Rules {
        #[arg(long, help = "Write the effective rules to a TOML file")]
        save: Option<PathBuf>,
    },
}

pub fn init_engine(rules_path: Option<PathBuf>) -> Result<(Config, RuleEngine)> {
    let config = Config::new(rules_path)?;
    let rules = config.load_rules()?;
    let engine = RuleEngine::new(rules)?;
    Ok((config, engine))
}
