use super::helpers::{category_cell, header_table, load_table};
use super::DataArgs;
use crate::util::progress::classification_progress;
use comfy_table::Cell;
use console::style;
use severity_lib::{write_predictions, Category, Result, RuleEngine};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub fn handle_classify_command(
    engine: &RuleEngine,
    data: &DataArgs,
    output: Option<PathBuf>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let table = load_table(data, &engine.rules().severe_symptoms)?;
    let records = table.records();

    if !quiet {
        println!(
            "{} Classifying {} records from {}",
            style(">>>").cyan(),
            style(records.len()).bold(),
            data.input.display()
        );
    }

    let pb = classification_progress(records.len(), verbose, quiet);

    let mut matches = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        if let Some(pb) = &pb {
            pb.inc(1);
        }

        let matched = engine
            .classify_with_rule(record)
            .map_err(|e| e.at_row(row))?;

        if verbose {
            println!(
                "  {}: {} -> {} ({})",
                style("·").dim(),
                record.id().map(str::to_string).unwrap_or_else(|| row.to_string()),
                matched.category,
                matched.rule
            );
        }
        matches.push(matched);
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let predictions: Vec<Category> = matches.iter().map(|m| m.category).collect();

    if let Some(path) = output {
        let file = std::fs::File::create(&path)?;
        write_predictions(file, records, &predictions)?;
        if !quiet {
            println!("{} Predictions written to {}", style("✓").green(), path.display());
        }
    } else {
        let mut out = header_table(&["Record", "Actual", "Predicted", "Rule"]);
        for (row, (record, matched)) in records.iter().zip(&matches).enumerate() {
            out.add_row(vec![
                Cell::new(record.id().map(str::to_string).unwrap_or_else(|| row.to_string())),
                Cell::new(record.actual_label().unwrap_or("-")),
                category_cell(matched.category),
                Cell::new(matched.rule),
            ]);
        }
        println!("{}", out);
    }

    if !quiet {
        let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
        for category in &predictions {
            *counts.entry(*category).or_insert(0) += 1;
        }

        println!("\n{} Classification complete", style("✓").green());
        for category in Category::ALL {
            println!(
                "  {}: {}",
                category,
                style(counts.get(&category).copied().unwrap_or(0)).bold()
            );
        }
    }

    Ok(())
}
