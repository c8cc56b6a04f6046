use super::DataArgs;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table as DisplayTable};
use console::style;
use severity_lib::{load_csv, Category, ConfusionMatrix, Result, SeverityError, Table};

/// Load the table named by `data`, requiring flag values in `required` columns.
pub fn load_table(data: &DataArgs, required: &[String]) -> Result<Table> {
    let table = load_csv(&data.input, &data.columns(required))?;
    if table.is_empty() {
        log::warn!("{} contains no records", data.input.display());
    }
    Ok(table)
}

pub fn header_table(headers: &[&str]) -> DisplayTable {
    let mut table = DisplayTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn category_cell(category: Category) -> Cell {
    let color = match category {
        Category::Mild => Color::Green,
        Category::Moderate => Color::Yellow,
        Category::Severe => Color::Red,
    };
    Cell::new(category.as_str()).fg(color)
}

pub fn matrix_table(matrix: &ConfusionMatrix) -> DisplayTable {
    let mut headers = vec!["Actual \\ Predicted".to_string()];
    headers.extend(matrix.labels().iter().map(|l| l.to_string()));
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let mut table = header_table(&header_refs);
    for (actual, row) in matrix.labels().iter().zip(matrix.rows()) {
        let mut cells = vec![category_cell(*actual)];
        for (predicted, count) in matrix.labels().iter().zip(row) {
            let cell = Cell::new(count);
            cells.push(if actual == predicted { cell.fg(Color::Green) } else { cell });
        }
        table.add_row(cells);
    }
    table
}

pub fn section(title: &str) {
    println!("{}", style(title).bold());
    println!("{}", style("─".repeat(60)).dim());
}

pub fn unsupported_format(format: &str) -> SeverityError {
    SeverityError::Config(format!(
        "Unsupported output format '{}'. Use 'table' or 'json'",
        format
    ))
}
