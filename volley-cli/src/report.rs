use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Duration;
use volley_core::{LatencyStats, RunConfig, RunStatistics};

/// Human-readable results block, printed to stdout once a run finishes.
pub struct Report<'a> {
    config: &'a RunConfig,
    stats: &'a RunStatistics,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a RunConfig, stats: &'a RunStatistics) -> Self {
        Self { config, stats }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{rule}")?;
        writeln!(f, " BENCHMARK RESULTS")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Target URL:          {}", self.config.url)?;
        writeln!(f, "Total requests:      {}", self.stats.total)?;
        writeln!(f, "Successful:          {}", self.stats.successful)?;
        writeln!(f, "Failed:              {}", self.stats.failed)?;
        writeln!(
            f,
            "Total time:          {:.2} seconds",
            self.stats.wall_time.as_secs_f64()
        )?;
        writeln!(
            f,
            "Requests/second:     {:.2}",
            self.stats.requests_per_second
        )?;
        writeln!(f)?;

        match &self.stats.latency {
            Some(latency) => {
                writeln!(f, "Response times (milliseconds):")?;
                writeln!(f, "  average:     {:.2}", millis(latency.avg))?;
                writeln!(f, "  minimum:     {:.2}", millis(latency.min))?;
                writeln!(f, "  maximum:     {:.2}", millis(latency.max))?;
                writeln!(f, "  p50:         {:.2}", millis(latency.p50))?;
                writeln!(f, "  p95:         {:.2}", millis(latency.p95))?;
                writeln!(f, "  p99:         {:.2}", millis(latency.p99))?;
                writeln!(f)?;
                writeln!(
                    f,
                    "Performance rating: {}",
                    rating(self.stats.requests_per_second)
                )?;
            }
            None => {
                writeln!(f, "No outcomes were recorded.")?;
            }
        }
        write!(f, "{rule}")
    }
}

/// Coarse throughput verdict on successful requests per second.
fn rating(requests_per_second: f64) -> &'static str {
    if requests_per_second > 10_000.0 {
        "EXCELLENT"
    } else if requests_per_second > 5_000.0 {
        "VERY GOOD"
    } else if requests_per_second > 1_000.0 {
        "GOOD"
    } else if requests_per_second > 500.0 {
        "FAIR"
    } else {
        "NEEDS IMPROVEMENT"
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    total_requests: u64,
    successful: u64,
    failed: u64,
    total_time_secs: f64,
    requests_per_second: f64,
    rating: &'static str,
    latency_ms: Option<JsonLatency>,
}

#[derive(Debug, Serialize)]
struct JsonLatency {
    avg: f64,
    min: f64,
    max: f64,
    p50: f64,
    p95: f64,
    p99: f64,
}

impl From<LatencyStats> for JsonLatency {
    fn from(latency: LatencyStats) -> Self {
        Self {
            avg: millis(latency.avg),
            min: millis(latency.min),
            max: millis(latency.max),
            p50: millis(latency.p50),
            p95: millis(latency.p95),
            p99: millis(latency.p99),
        }
    }
}

/// Writes the machine-readable twin of the console report.
pub fn write_json(path: &Path, config: &RunConfig, stats: &RunStatistics) -> io::Result<()> {
    let report = JsonReport {
        url: &config.url,
        total_requests: stats.total,
        successful: stats.successful,
        failed: stats.failed,
        total_time_secs: stats.wall_time.as_secs_f64(),
        requests_per_second: stats.requests_per_second,
        rating: rating(stats.requests_per_second),
        latency_ms: stats.latency.map(JsonLatency::from),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use volley_core::RequestOutcome;

    fn sample_stats() -> RunStatistics {
        let outcomes: Vec<RequestOutcome> = (1..=100)
            .map(|ms| RequestOutcome::ok(Duration::from_millis(ms)))
            .collect();
        RunStatistics::compute(&outcomes, Duration::from_secs(2))
    }

    #[test]
    fn rating_thresholds_are_strict() {
        assert_eq!(rating(10_000.5), "EXCELLENT");
        assert_eq!(rating(10_000.0), "VERY GOOD");
        assert_eq!(rating(5_000.5), "VERY GOOD");
        assert_eq!(rating(5_000.0), "GOOD");
        assert_eq!(rating(1_000.5), "GOOD");
        assert_eq!(rating(501.0), "FAIR");
        assert_eq!(rating(500.0), "NEEDS IMPROVEMENT");
        assert_eq!(rating(0.0), "NEEDS IMPROVEMENT");
    }

    #[test]
    fn report_shows_counts_latency_and_rating() {
        let config = RunConfig::new("http://localhost:8000/ping");
        let stats = sample_stats();
        let rendered = Report::new(&config, &stats).to_string();

        assert!(rendered.contains("Target URL:          http://localhost:8000/ping"));
        assert!(rendered.contains("Total requests:      100"));
        assert!(rendered.contains("Successful:          100"));
        assert!(rendered.contains("Response times (milliseconds):"));
        assert!(rendered.contains("p95:"));
        assert!(rendered.contains("Performance rating: NEEDS IMPROVEMENT"));
    }

    #[test]
    fn empty_run_renders_without_latency_block() {
        let config = RunConfig::new("http://localhost:8000/ping");
        let stats = RunStatistics::empty();
        let rendered = Report::new(&config, &stats).to_string();

        assert!(rendered.contains("No outcomes were recorded."));
        assert!(!rendered.contains("Performance rating"));
    }

    #[test]
    fn json_report_round_trips_through_a_file() {
        let config = RunConfig::new("http://localhost:8000/ping");
        let stats = sample_stats();

        let path = std::env::temp_dir().join(format!("volley-report-{}.json", std::process::id()));
        write_json(&path, &config, &stats).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["url"], "http://localhost:8000/ping");
        assert_eq!(value["total_requests"], 100);
        assert_eq!(value["successful"], 100);
        assert_eq!(value["failed"], 0);
        assert_eq!(value["rating"], "NEEDS IMPROVEMENT");
        assert!(value["latency_ms"]["p95"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn json_report_keeps_latency_null_for_an_empty_run() {
        let config = RunConfig::new("http://localhost:8000/ping");
        let stats = RunStatistics::empty();

        let path =
            std::env::temp_dir().join(format!("volley-empty-report-{}.json", std::process::id()));
        write_json(&path, &config, &stats).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["latency_ms"].is_null());
        assert_eq!(value["requests_per_second"], 0.0);
    }
}
