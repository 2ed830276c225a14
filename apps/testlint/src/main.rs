use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;
use testlint_rules::Config;

#[derive(Parser)]
#[command(name = "testlint")]
#[command(about = "Lint rules for testing-library usage in JS/TS codebases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check testing-library usage across a project
    Check(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Check(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running testing-library check (using {} threads)", num_threads);
            debug!("Config: root={:?}, entry_glob={:?}", cfg.root, cfg.entry_glob);

            let result = testlint_rules::run_check(cfg)?;
            debug!("Found {} warnings", result.warnings.len());

            let elapsed_ms = start.elapsed().as_millis();

            if result.warnings.is_empty() {
                info!("No issues detected");
                testlint_rules::print_clean_message(&mut stdout)?;
            } else {
                testlint_rules::print_warnings(&mut stdout, &result.warnings)?;
            }

            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.files_analyzed.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            if !result.warnings.is_empty() {
                // Non-zero exit to fail CI
                std::process::exit(1);
            }

            Ok(())
        }
    }
}
