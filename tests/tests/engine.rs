mod utils;
use utils::*;

use std::time::Duration;
use volley::prelude::*;

#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn a_thousand_requests_at_fifty_concurrent_all_succeed() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(ping_url(addr))
        .requests(1_000)
        .concurrency(50)
        .batch_size(100)
        .progress(false);

    let runner = Runner::new(config).expect("runner");
    runner.preflight().await.expect("preflight");
    let stats = runner.run().await;

    assert_eq!(stats.total, 1_000);
    assert_eq!(stats.successful, 1_000);
    assert_eq!(stats.failed, 0);
    assert!(stats.requests_per_second > 0.0);
    assert!(stats.wall_time > Duration::ZERO);

    let latency = stats.latency.expect("latency populated");
    assert!(latency.min <= latency.p50);
    assert!(latency.p50 <= latency.p95);
    assert!(latency.p95 <= latency.p99);
    assert!(latency.p99 <= latency.max);
}

#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn the_full_pipeline_runs_preflight_warmup_and_measure() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(ping_url(addr))
        .requests(300)
        .concurrency(30)
        .progress(false);

    let runner = Runner::new(config).expect("runner");
    let stats = runner.run_to_completion(true).await.expect("pipeline");

    assert_eq!(stats.total, 300);
    assert_eq!(stats.successful, 300);
}

#[tokio::test(flavor = "multi_thread")]
async fn the_target_speaks_pong() {
    init();
    let addr = spawn_target().await;

    let body: serde_json::Value = reqwest::get(ping_url(addr))
        .await
        .expect("get /ping")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["message"], "pong");
    assert_eq!(body["success"], true);
    assert!(body["timestamp"].is_string());
}
