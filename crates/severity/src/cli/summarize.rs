use super::helpers::{category_cell, header_table, load_table, section};
use super::DataArgs;
use crate::util::format::format_ratio;
use comfy_table::Cell;
use console::style;
use severity_lib::{label_distribution, symptom_prevalence, Result};

pub fn handle_summarize_command(data: &DataArgs) -> Result<()> {
    let table = load_table(data, &[])?;

    println!("\n{}", style("Symptom Table Summary").bold().cyan());
    println!("{}\n", style("═".repeat(60)).dim());

    section("Category Distribution");
    let counts = label_distribution(table.records())?;
    let mut dist = header_table(&["Category", "Records"]);
    for (category, count) in &counts {
        dist.add_row(vec![category_cell(*category), Cell::new(count)]);
    }
    println!("{}\n", dist);

    section("Symptom Prevalence");
    let prevalence = symptom_prevalence(&table)?;
    if prevalence.symptoms().is_empty() {
        println!("{}\n", style("No symptom columns found").yellow());
        return Ok(());
    }

    let mut headers = vec!["Symptom".to_string()];
    headers.extend(prevalence.categories().iter().map(|c| c.to_string()));
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let mut prev_table = header_table(&header_refs);
    for (symptom, means) in prevalence.rows() {
        let mut cells = vec![Cell::new(symptom)];
        cells.extend(means.iter().map(|m| Cell::new(format_ratio(*m))));
        prev_table.add_row(cells);
    }
    println!("{}\n", prev_table);

    Ok(())
}
