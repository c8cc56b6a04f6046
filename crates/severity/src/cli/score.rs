use super::helpers::{category_cell, header_table, load_table, matrix_table, section, unsupported_format};
use super::DataArgs;
use crate::util::format::{format_percent, format_ratio};
use comfy_table::Cell;
use console::style;
use serde_json::json;
use severity_lib::{score, Category, ConfusionMatrix, Result, RuleEngine};
use std::path::PathBuf;

pub fn handle_score_command(
    engine: &RuleEngine,
    data: &DataArgs,
    format: &str,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let format = format.to_lowercase();
    if format != "table" && format != "json" {
        return Err(unsupported_format(&format));
    }

    let table = load_table(data, &engine.rules().severe_symptoms)?;
    let predictions = engine.classify_batch(table.records())?;
    let matrix = score(table.records(), &predictions, &Category::ALL)?;

    match format.as_str() {
        "json" => export_json(engine, &matrix, output, quiet),
        _ => {
            if let Some(path) = output {
                log::warn!("Ignoring --output {} for table format", path.display());
            }
            print_report(&matrix);
            Ok(())
        }
    }
}

fn print_report(matrix: &ConfusionMatrix) {
    println!("\n{}", style("Severity Rule Evaluation").bold().cyan());
    println!("{}\n", style("═".repeat(60)).dim());

    section("Confusion Matrix");
    println!("{}\n", matrix_table(matrix));

    section("Per-Category Metrics");
    let mut metrics_table = header_table(&["Category", "Support", "Predicted", "Precision", "Recall", "F1"]);
    for m in matrix.metrics() {
        metrics_table.add_row(vec![
            category_cell(m.category),
            Cell::new(m.support),
            Cell::new(m.predicted),
            Cell::new(format_ratio(m.precision)),
            Cell::new(format_ratio(m.recall)),
            Cell::new(format_ratio(m.f1)),
        ]);
    }
    println!("{}\n", metrics_table);

    println!(
        "  Correct: {} / {}",
        style(matrix.correct()).green(),
        matrix.total()
    );
    println!("  Accuracy: {}\n", style(format_percent(matrix.accuracy())).bold());
}

fn export_json(
    engine: &RuleEngine,
    matrix: &ConfusionMatrix,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let report = json!({
        "rules": engine.rules(),
        "confusion_matrix": matrix,
        "metrics": matrix.metrics(),
        "records": matrix.total(),
        "correct": matrix.correct(),
        "accuracy": matrix.accuracy(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
    });

    let json_str = serde_json::to_string_pretty(&report)?;

    if let Some(path) = output {
        std::fs::write(&path, json_str)?;
        if !quiet {
            println!("{} Report exported to {}", style("✓").green(), path.display());
        }
    } else {
        println!("{}", json_str);
    }

    Ok(())
}
