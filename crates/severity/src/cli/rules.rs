use console::style;
use severity_lib::{Config, Result, RuleEngine};
use std::path::PathBuf;

pub fn handle_rules_command(
    config: &Config,
    engine: &RuleEngine,
    save: Option<PathBuf>,
) -> Result<()> {
    match &config.rules_path {
        Some(path) => println!("{} Rules loaded from {}", style(">>>").cyan(), path.display()),
        None => println!("{} Using built-in rules", style(">>>").cyan()),
    }

    let rules = engine.rules();
    println!();
    println!(
        "  {}: symptom count <= {} and none of [{}]",
        style("Mild").green(),
        rules.mild_max_symptoms,
        rules.severe_symptoms.join(", ")
    );
    println!(
        "  {}: any of [{}] or symptom count > {}",
        style("Severe").red(),
        rules.severe_symptoms.join(", "),
        rules.severe_above_symptoms
    );
    println!("  {}: everything else", style("Moderate").yellow());

    if rules.count_ranges_overlap() {
        println!(
            "\n{} Count thresholds overlap; mild is checked first",
            style("!").yellow()
        );
    }

    println!("\n{}", rules.to_toml()?);

    if let Some(path) = save {
        rules.save_to_file(&path)?;
        println!("{} Rules saved to {}", style("✓").green(), path.display());
    }
    Ok(())
}
