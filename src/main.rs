mod cli;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, OutputFormat, ReconcileArgs, StatusArgs};
use std::io;
use std::process::ExitCode;

use awsup::{probe, Outcome, Reconciler};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error(&format!("An error occurred: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Reconcile(args) => reconcile(&args),
        Command::Status(args) => status(&args),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "awsup", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn reconcile(args: &ReconcileArgs) -> Result<ExitCode> {
    let request = args.to_request();
    let outcome = Reconciler::new().reconcile(&request);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => print_outcome(&outcome),
    }

    if outcome.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_outcome(outcome: &Outcome) {
    if outcome.is_failure() {
        ui::error(&outcome.message);
    } else if outcome.changed {
        ui::changed(&outcome.message);
    } else {
        ui::success(&outcome.message);
    }

    if let Some(path) = &outcome.download_path {
        ui::kv("downloaded", &path.display().to_string());
    }
    if let Some(path) = &outcome.extracted_path {
        ui::kv("extracted", &path.display().to_string());
    }
}

fn status(args: &StatusArgs) -> Result<ExitCode> {
    let host = probe(&args.bin_dir)?;

    match args.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "installed": host.tool_present })
            );
        }
        OutputFormat::Text => {
            if host.tool_present {
                ui::success(&format!("aws cli installed in {}", args.bin_dir.display()));
            } else {
                ui::info(&format!(
                    "aws cli not installed in {}",
                    args.bin_dir.display()
                ));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
