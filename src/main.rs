//! Taskbench - Application Entry Point
//!
//! Grades a task-system binary against the reference binary.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskbench::{
    HarnessConfig,
    benchmark::{Session, SystemRunner, WorkloadCatalog, report},
    cli::{self, Cli},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = args.apply(HarnessConfig::from_env()?)?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = WorkloadCatalog::default();

    if args.list {
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let detected = cli::detected_parallelism();
    let max_threads = args.max_threads(detected)?;

    tracing::info!(
        student = %config.binaries.student.display(),
        reference = %config.binaries.reference.display(),
        "Loaded configuration"
    );

    let plan = catalog.plan(args.test_names.as_deref(), max_threads, args.run_async);
    print!("{}", report::render_banner(plan.len(), detected, max_threads));

    let session = Session::new(SystemRunner::new(config.benchmark.trial_timeout), &config);
    let session_report = session.run(plan).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session_report)?);
    }

    // Failures are reported in the text output, never through the exit code
    Ok(())
}
