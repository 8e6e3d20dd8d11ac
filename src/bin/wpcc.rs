//! wp-cc - one-shot natural-language command runner
//!
//! Joins its trailing arguments into a single free-text command, dispatches
//! it, and renders the outcome. Exit code 1 when the command failed;
//! unrecognized input prints the usage summary and exits 0.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wpcc_core::{render, Capabilities, CliConfig, CommandResult, Dispatcher, Outcome};

#[derive(Parser)]
#[command(name = "wp-cc")]
#[command(about = "Natural-language commands for WordPress dev environments", long_about = None)]
struct Cli {
    /// Config file (JSON); defaults apply when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging (same as WPCC_LOG=debug)
    #[arg(short, long)]
    verbose: bool,

    /// The command, e.g. `wp-cc create project called my-blog on port 8080`
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("WPCC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    let dispatcher = Dispatcher::new(Capabilities::live(config));

    let input = cli.command.join(" ");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template must parse"),
    );
    spinner.set_message("Processing command...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = dispatcher.dispatch(&input).await;

    match &outcome {
        Outcome::Completed { name, result } => {
            if result.is_failure() {
                spinner.finish_with_message(format!("{} failed", name));
            } else {
                spinner.finish_with_message(format!("{} completed", name));
            }
        }
        Outcome::Unrecognized => spinner.finish_and_clear(),
    }

    render(&outcome, dispatcher.table());

    if let Outcome::Completed {
        result: CommandResult::Failure { .. },
        ..
    } = outcome
    {
        std::process::exit(1);
    }
    Ok(())
}
