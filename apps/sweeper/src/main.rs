//! sweeper - Age-based file retention sweeper
//!
//! One invocation performs one sweep: every configured location is walked in
//! order and its expired files are deleted or relocated. Scheduling is left to
//! an external job runner.

mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use clap::Parser;
use std::process;
use sweeper_config::Config;
use sweeper_events::{EventEmitter, EventReceiver, FailureContext, SweepReport};
use sweeper_ops::{OpsContextBuilder, OpsCtx};
use tokio::select;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    // 1. Configuration file
    let mut config = Config::load_from_file(&cli.config).await?;

    // 2. Environment overrides
    config.merge_env();
    config.validate()?;

    // The log file is only known once configuration is loaded
    logging::init_tracing(&config.log_file)?;
    info!(
        "Starting sweeper v{} with {} location(s) from {}",
        env!("CARGO_PKG_VERSION"),
        config.locations.len(),
        cli.config.display()
    );

    let (event_sender, event_receiver) = sweeper_events::channel();
    let warnings = std::mem::take(&mut config.warnings);

    let ops_ctx = OpsContextBuilder::new()
        .with_event_sender(event_sender)
        .with_config(config)
        .build()?;

    let config_path = cli.config.display().to_string();
    for warning in warnings {
        ops_ctx.emit_warning(warning, config_path.as_str());
    }

    let reports = execute_sweep_with_events(ops_ctx, event_receiver).await?;

    let actioned: u64 = reports.iter().map(SweepReport::actioned).sum();
    info!(
        "Sweep completed: {} location(s), {} file(s) actioned",
        reports.len(),
        actioned
    );
    Ok(())
}

/// Run the sweep while logging its events as they arrive
async fn execute_sweep_with_events(
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
) -> Result<Vec<SweepReport>, CliError> {
    let mut sweep_future = Box::pin(execute_sweep(ops_ctx));

    loop {
        select! {
            result = &mut sweep_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    logging::log_event_with_tracing(&event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                match event {
                    Some(event) => logging::log_event_with_tracing(&event),
                    None => { /* Channel closed: keep waiting for the sweep to finish */ }
                }
            }
        }
    }
}

/// Sweep every configured location, bracketed by operation events
async fn execute_sweep(ctx: OpsCtx) -> Result<Vec<SweepReport>, CliError> {
    ctx.emit_operation_started("sweep");

    match sweeper_ops::sweep_all(&ctx).await {
        Ok(reports) => {
            let clean = reports.iter().all(|r| r.failed == 0 && r.skipped == 0);
            ctx.emit_operation_completed("sweep", clean);
            Ok(reports)
        }
        Err(e) => {
            ctx.emit_operation_failed("sweep", FailureContext::from_error(&e));
            Err(e.into())
        }
    }
}
