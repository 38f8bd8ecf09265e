use goose::metrics::GooseMetrics;
use serde::Serialize;

/// Read model over the harness's aggregate counters, folded once after all
/// virtual users have stopped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total_requests: u64,
    pub failed_requests: u64,
    pub avg_response_time_ms: f64,
    pub max_response_time_ms: f64,
    pub requests_per_sec: f64,
    pub per_probe: Vec<ProbeStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeStats {
    pub name: String,
    pub requests: u64,
    pub failures: u64,
}

impl RunSummary {
    /// Percentage of failed requests. The denominator is floored at 1 so an
    /// empty run reports 0% instead of dividing by zero.
    pub fn failure_rate(&self) -> f64 {
        self.failed_requests as f64 / self.total_requests.max(1) as f64 * 100.0
    }

    pub fn success_rate(&self) -> f64 {
        (self.total_requests - self.failed_requests) as f64 / self.total_requests.max(1) as f64
            * 100.0
    }

    pub fn from_goose(metrics: &GooseMetrics) -> Self {
        let mut summary = RunSummary::default();
        let mut total_time: usize = 0;
        let mut timed: usize = 0;

        for (key, aggregate) in &metrics.requests {
            let requests = (aggregate.success_count + aggregate.fail_count) as u64;
            let failures = aggregate.fail_count as u64;
            summary.total_requests += requests;
            summary.failed_requests += failures;
            total_time += aggregate.raw_data.total_time;
            timed += aggregate.raw_data.counter;
            summary.max_response_time_ms = summary
                .max_response_time_ms
                .max(aggregate.raw_data.maximum_time as f64);

            // keys look like "GET Homepage"; keep just the probe name
            let name = key.split_once(' ').map_or(key.as_str(), |(_, n)| n);
            summary.per_probe.push(ProbeStats {
                name: name.to_string(),
                requests,
                failures,
            });
        }

        if timed > 0 {
            summary.avg_response_time_ms = total_time as f64 / timed as f64;
        }
        summary.requests_per_sec =
            summary.total_requests as f64 / metrics.duration.max(1) as f64;
        summary.per_probe.sort_by(|a, b| a.name.cmp(&b.name));
        summary
    }
}
