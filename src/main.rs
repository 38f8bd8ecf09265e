use std::process;

use anyhow::Context;
use goose::prelude::*;

use ocis_loadtest::models::config::{self, Thresholds};
use ocis_loadtest::models::summary::RunSummary;
use ocis_loadtest::report::{self, JsonReport, Verdict};
use ocis_loadtest::scenario::{self, announce_run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let thresholds = Thresholds::from_env();
    tracing::info!(
        max_failure_rate_pct = thresholds.max_failure_rate_pct,
        max_avg_response_ms = thresholds.max_avg_response_ms,
        "pass/fail limits"
    );

    let metrics = GooseAttack::initialize()?
        .register_scenario(scenario::ocis_user()?)
        .test_start(transaction!(announce_run))
        .execute()
        .await?;

    let summary = RunSummary::from_goose(&metrics);
    let verdict = Verdict::evaluate(&summary, &thresholds);
    println!("{}", report::render(&summary, &verdict, &thresholds));

    if let Some(path) = config::report_json_path() {
        report::write_json(&path, &JsonReport::new(&summary, &thresholds, &verdict))
            .with_context(|| format!("JSON report at {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote JSON report");
    }

    process::exit(verdict.exit_code());
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
