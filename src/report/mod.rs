use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use serde::Serialize;

use crate::models::config::Thresholds;
use crate::models::summary::RunSummary;

const RULE: &str = "============================================================";

/// Outcome of the three pass/fail criteria, computed once from the final
/// aggregates. The exit code is derived from this value by the caller; the
/// reporter itself never touches process state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Verdict {
    pub failure_rate_pct: f64,
    pub failure_rate_ok: bool,
    pub response_time_ok: bool,
    pub saw_traffic: bool,
}

impl Verdict {
    pub fn evaluate(summary: &RunSummary, thresholds: &Thresholds) -> Self {
        let failure_rate_pct = summary.failure_rate();
        Verdict {
            failure_rate_pct,
            failure_rate_ok: failure_rate_pct <= thresholds.max_failure_rate_pct,
            response_time_ok: summary.avg_response_time_ms <= thresholds.max_avg_response_ms,
            saw_traffic: summary.total_requests > 0,
        }
    }

    pub fn passed(&self) -> bool {
        self.failure_rate_ok && self.response_time_ok && self.saw_traffic
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

pub fn render_banner(host: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", "Starting OCIS Load Test".bold());
    let _ = writeln!(out, "Target: {}", host.bold());
    let _ = write!(out, "{RULE}");
    out
}

/// Human-readable end-of-run report: the aggregate numbers, one line per
/// criterion, and the overall verdict.
pub fn render(summary: &RunSummary, verdict: &Verdict, thresholds: &Thresholds) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", "Load Test Summary".bold());
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Completed            : {}",
        Local::now().format("%Y/%m/%d %H:%M:%S")
    );
    let _ = writeln!(out, "Total requests       : {}", summary.total_requests);
    let _ = writeln!(out, "Failed requests      : {}", summary.failed_requests);
    let _ = writeln!(out, "Success rate         : {:.2}%", summary.success_rate());
    let _ = writeln!(
        out,
        "Average response time: {:.2}ms",
        summary.avg_response_time_ms
    );
    let _ = writeln!(
        out,
        "Max response time    : {:.2}ms",
        summary.max_response_time_ms
    );
    let _ = writeln!(out, "Requests/sec         : {:.2}", summary.requests_per_sec);

    if !summary.per_probe.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Per-probe breakdown".bold());
        for probe in &summary.per_probe {
            let _ = writeln!(
                out,
                "• {}: {} requests, {} failed",
                probe.name, probe.requests, probe.failures
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", "Test Criteria Validation".bold());
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{}",
        criterion_line(
            verdict.failure_rate_ok,
            &format!(
                "failure rate {:.2}% (threshold {:.2}%)",
                verdict.failure_rate_pct, thresholds.max_failure_rate_pct
            ),
        )
    );
    let _ = writeln!(
        out,
        "{}",
        criterion_line(
            verdict.response_time_ok,
            &format!(
                "average response time {:.2}ms (threshold {:.0}ms)",
                summary.avg_response_time_ms, thresholds.max_avg_response_ms
            ),
        )
    );
    let _ = writeln!(
        out,
        "{}",
        criterion_line(
            verdict.saw_traffic,
            &format!("{} requests completed", summary.total_requests),
        )
    );
    let _ = writeln!(out, "{RULE}");

    if verdict.passed() {
        let _ = write!(
            out,
            "\n{}",
            "✅ Load test PASSED - all criteria met".green().bold()
        );
    } else {
        let _ = write!(
            out,
            "\n{}",
            "❌ Load test FAILED - performance criteria not met"
                .red()
                .bold()
        );
    }
    out
}

fn criterion_line(ok: bool, detail: &str) -> String {
    if ok {
        format!("✅ {}: {detail}", "PASSED".green().bold())
    } else {
        format!("❌ {}: {detail}", "FAILED".red().bold())
    }
}

/// Machine-readable copy of the verdict, written next to CI artifacts.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub passed: bool,
    pub exit_code: i32,
    pub summary: &'a RunSummary,
    pub thresholds: &'a Thresholds,
    pub verdict: &'a Verdict,
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &'a RunSummary, thresholds: &'a Thresholds, verdict: &'a Verdict) -> Self {
        JsonReport {
            generated_at: Local::now().to_rfc3339(),
            passed: verdict.passed(),
            exit_code: verdict.exit_code(),
            summary,
            thresholds,
            verdict,
        }
    }
}

pub fn write_json(path: &Path, report: &JsonReport<'_>) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
