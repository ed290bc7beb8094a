mod report;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use volley::prelude::*;
use volley_core::{
    DEFAULT_CONCURRENCY, DEFAULT_POOL_SIZE, DEFAULT_TARGET_URL, DEFAULT_TOTAL_REQUESTS,
};

/// Flood an HTTP endpoint with a fixed budget of GET requests and report
/// latency percentiles and throughput.
#[derive(Parser, Debug)]
#[command(name = "volley", version, about)]
struct Cli {
    /// Target URL to benchmark.
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// Total number of requests to issue.
    #[arg(long, default_value_t = DEFAULT_TOTAL_REQUESTS)]
    requests: u64,

    /// Maximum number of requests in flight at once.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Idle connections kept per host by the shared client.
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Per-request budget, from dispatch through full body read.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "5s")]
    request_timeout: Duration,

    /// Independent workers to split the request budget across.
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Skip the warmup phase.
    #[arg(long)]
    no_warmup: bool,

    /// Suppress periodic progress lines.
    #[arg(long)]
    no_progress: bool,

    /// Also write the final statistics to this path as JSON.
    #[arg(long, value_name = "PATH")]
    output_json: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = try_main(Cli::parse()).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn try_main(cli: Cli) -> anyhow::Result<()> {
    let config = RunConfig::new(&cli.url)
        .requests(cli.requests)
        .concurrency(cli.concurrency)
        .pool_size(cli.pool_size)
        .request_timeout(cli.request_timeout)
        .progress(!cli.no_progress);

    info!(
        url = %config.url,
        requests = config.total_requests,
        concurrency = config.max_concurrency,
        pool_size = config.pool_size,
        workers = cli.workers,
        warmup = !cli.no_warmup,
        "volley starting"
    );

    let stats = tokio::select! {
        stats = drive(&config, cli.workers, !cli.no_warmup) => stats?,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("benchmark interrupted by user")
        }
    };

    println!("{}", report::Report::new(&config, &stats));

    if let Some(path) = &cli.output_json {
        report::write_json(path, &config, &stats)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON report");
    }

    Ok(())
}

/// Preflight, optional warmup, then the timed run. Warmup happens once,
/// up front, even when the budget is split across a fleet.
async fn drive(config: &RunConfig, workers: usize, warmup: bool) -> anyhow::Result<RunStatistics> {
    let runner = Runner::new(config.clone())?;
    runner.preflight().await?;
    info!("target is responding");

    if warmup {
        runner.warmup().await?;
    }

    let stats = if workers > 1 {
        run_fleet(config, workers).await?
    } else {
        runner.run().await
    };
    Ok(stats)
}
