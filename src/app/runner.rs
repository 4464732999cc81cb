use std::path::Path;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use barrage::args::{OutputFormat, TesterArgs};
use barrage::error::AppResult;
use barrage::http::{HttpTransport, build_client};
use barrage::metrics::{ResultSink, summarize};
use barrage::report::{RunReport, render, write_report};
use barrage::scheduler::{Scheduler, TestConfig};
use barrage::shutdown::shutdown_channel;

use crate::system::shutdown_handlers::setup_signal_shutdown_handler;

use super::summary::{print_rendered, print_run_header};

/// Runs one load test and emits its report. An interrupted run still reports
/// what completed and returns `Ok`.
pub(crate) async fn run_load_test(args: TesterArgs) -> AppResult<()> {
    let config = TestConfig::from_args(&args)?;
    let client = build_client(&config)?;
    let transport = Arc::new(HttpTransport::new(client, config.url.clone()));
    let sink = Arc::new(ResultSink::new(args.progress_every));

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    if args.output_format == OutputFormat::Text {
        print_run_header(&config);
    }
    let started_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let scheduler = Scheduler::new(config, transport, Arc::clone(&sink))
        .with_interrupt_grace(args.interrupt_grace);
    let stats = scheduler.run(&shutdown_tx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }

    let snapshot = sink.snapshot();
    let summary = summarize(&snapshot, stats.elapsed);
    let run_config = scheduler.config();
    let report = RunReport {
        started_at,
        url: run_config.url.to_string(),
        strategy: run_config.strategy,
        concurrency: run_config.concurrency.get(),
        requested: run_config.total_requests,
        admitted: stats.admitted,
        abandoned: stats.abandoned,
        interrupted: stats.interrupted,
        summary,
    };

    let rendered = render(&report, args.output_format)?;
    print_rendered(&rendered);
    if let Some(path) = args.output.as_deref() {
        write_report(Path::new(path), &rendered)?;
        info!("Report written to {}", path);
    }
    if stats.interrupted {
        warn!("Run was interrupted; the report covers completed requests only");
    }
    Ok(())
}
