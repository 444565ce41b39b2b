//! identitystore-bulk - bulk user provisioning for IAM Identity Center
//!
//! Exit status: 0 when every row succeeded or skipped its group, 1 when any
//! row failed or an outcome line could not be written, 2 when nothing could
//! be processed.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use identitystore_bulk::cli::Cli;
use identitystore_bulk::utils::logging::init_logger;
use identitystore_bulk::{
    BatchExecutor, BatchLoader, BatchSummary, ExecutorOptions, IdentityStoreClient,
    OutcomeReporter,
};
use std::process::ExitCode;
use tracing::{error, info};

const EXIT_ROW_FAILURES: u8 = 1;
const EXIT_NOT_PROCESSED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging system
    if let Err(e) = init_logger(&cli.log_level, cli.log_format) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_NOT_PROCESSED);
    }

    match run(cli).await {
        Ok(run) if run.summary.has_failures() || !run.output_complete => {
            ExitCode::from(EXIT_ROW_FAILURES)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            // Display keeps the context chain readable
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_NOT_PROCESSED)
        }
    }
}

struct RunReport {
    summary: BatchSummary,
    /// False once stdout refused a line; rows keep running regardless
    output_complete: bool,
}

async fn run(cli: Cli) -> anyhow::Result<RunReport> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }

    let config = cli
        .load_config()
        .await
        .context("failed to load configuration")?;
    let client =
        IdentityStoreClient::new(&config).context("failed to create identity store client")?;

    let kind = cli.command.kind();
    let args = cli.command.args();
    let batch = BatchLoader::default()
        .load(&args.identities_file)
        .context("failed to load identities file")?;
    info!(
        "Running {} for {} rows against identity store {}",
        cli.command.kind(),
        batch.len(),
        args.identity_store_id()
    );

    let executor = BatchExecutor::new(client, args.identity_store_id())
        .with_options(ExecutorOptions::from(&config.executor));

    let mut reporter = OutcomeReporter::new(std::io::stdout(), cli.output);
    let outcomes = executor.stream(kind, batch.rows());
    futures::pin_mut!(outcomes);
    let mut output_complete = true;
    while let Some(outcome) = outcomes.next().await {
        if let Err(e) = reporter.report(&outcome) {
            if output_complete {
                error!("Failed to write outcome of row {}: {}", outcome.row_number(), e);
            }
            output_complete = false;
        }
    }

    let summary = *reporter.summary();
    if output_complete {
        if let Err(e) = reporter.finish() {
            error!("Failed to write summary: {}", e);
            output_complete = false;
        }
    }
    info!("{}", summary);

    Ok(RunReport {
        summary,
        output_complete,
    })
}
