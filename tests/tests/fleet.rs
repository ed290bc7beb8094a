mod utils;
use utils::*;

use std::time::Duration;
use volley::prelude::*;

#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn four_workers_cover_the_full_budget() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(ping_url(addr))
        .requests(1_000)
        .concurrency(40)
        .progress(false);

    let stats = run_fleet(&config, 4).await.expect("fleet");

    assert_eq!(stats.total, 1_000);
    assert_eq!(stats.successful, 1_000);
    assert_eq!(stats.failed, 0);
    assert!(stats.requests_per_second > 0.0);
    assert!(stats.wall_time > Duration::ZERO);
    assert!(stats.latency.is_some());
}

#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn a_budget_that_does_not_divide_evenly_is_still_fully_spent() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(ping_url(addr))
        .requests(103)
        .concurrency(10)
        .progress(false);

    let stats = run_fleet(&config, 4).await.expect("fleet");
    assert_eq!(stats.total, 103);
    assert_eq!(stats.successful, 103);
}
