//! depbot - Dependency update pull request bot
//!
//! Lists outdated dependencies with the project's package manager, groups
//! packages that block each other, commits one update per group to an
//! update branch and opens (or refreshes) a pull request for it.

use clap::Parser;
use depbot::cli::CliArgs;
use depbot::config::RunConfig;
use depbot::exec::SystemRunner;
use depbot::orchestrator::Orchestrator;
use depbot::output::{create_formatter, OutputConfig};
use depbot::remote::GitHubHost;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked from the flags
fn init_logging(args: &CliArgs) {
    let default_level = if args.quiet {
        "depbot=warn"
    } else if args.verbose {
        "depbot=debug"
    } else {
        "depbot=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = RunConfig::from_args(&args)?;

    if args.verbose {
        eprintln!("depbot v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Manifest: {}", config.manifest_relative);
        if config.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let host = GitHubHost::new(
        &config.token,
        config.owner.clone(),
        config.repo.clone(),
        config.api_url.as_deref(),
    )?;

    let orchestrator = Orchestrator::new(config, Arc::new(host), Arc::new(SystemRunner::new()))
        .with_progress(!args.quiet && !args.json);
    let outcome = orchestrator.run().await?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&outcome, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
