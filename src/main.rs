/*!
 * Command-line interface for LLM Globber
 */

use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use llm_globber::config::{Args, Config};
use llm_globber::error::GlobberError;
use llm_globber::report::{ReportFormat, Reporter};
use llm_globber::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Create configuration
    let config = Config::from_args(args);

    init_logging(&config);

    // Validate configuration before any pipeline I/O
    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        exit(err.exit_code());
    }

    // Wire SIGINT to the cancellation token; the handler only sets a flag
    let cancel = CancellationToken::new();
    {
        let handler_token = cancel.clone();
        if let Err(err) = ctrlc::set_handler(move || handler_token.cancel()) {
            eprintln!("Warning: failed to install interrupt handler: {}", err);
        }
    }

    let progress = build_progress(&config);

    match llm_globber::run(&config, &cancel, Arc::clone(&progress)) {
        Ok(summary) => {
            progress.finish_and_clear();
            if !config.quiet {
                let reporter = Reporter::new(ReportFormat::ConsoleTable);
                reporter.print_report(&summary);
            }
        }
        Err(GlobberError::Interrupted) => {
            progress.finish_and_clear();
            eprintln!("Operation cancelled.");
            exit(GlobberError::Interrupted.exit_code());
        }
        Err(err) => {
            progress.finish_and_clear();
            eprintln!("Error: {}", err);
            exit(err.exit_code());
        }
    }
}

/// Progress bar for the serialization loop, hidden in quiet mode
fn build_progress(config: &Config) -> Arc<ProgressBar> {
    if config.quiet {
        return Arc::new(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} \
                 {pos}/{len} ({percent}%) Elapsed: {elapsed_precise}",
            )
            .unwrap(),
    );
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar.set_prefix("📄 Processing");
    Arc::new(bar)
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.quiet {
            tracing_subscriber::EnvFilter::new("error")
        } else if config.verbose {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
