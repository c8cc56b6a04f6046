mod cli;
mod util;

use clap::Parser;
use severity_lib::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        cli::Commands::Classify { data, output } => {
            let (_, engine) = cli::init_engine(cli.rules)?;
            cli::classify::handle_classify_command(&engine, &data, output, cli.verbose, cli.quiet)
        }

        cli::Commands::Score { data, format, output } => {
            let (_, engine) = cli::init_engine(cli.rules)?;
            cli::score::handle_score_command(&engine, &data, &format, output, cli.quiet)
        }

        cli::Commands::Summarize { data } => {
            cli::summarize::handle_summarize_command(&data)
        }

        cli::Commands::Rules { save } => {
            let (config, engine) = cli::init_engine(cli.rules)?;
            cli::rules::handle_rules_command(&config, &engine, save)
        }
    }
}
