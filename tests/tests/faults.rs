mod utils;
use utils::*;

use std::time::Duration;
use volley::prelude::*;

#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn a_wall_of_500s_completes_the_whole_budget() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(format!("http://{addr}/status/500"))
        .requests(100)
        .concurrency(10)
        .progress(false);

    let runner = Runner::new(config).expect("runner");
    let stats = runner.run().await;

    assert_eq!(stats.total, 100);
    assert_eq!(stats.successful, 0);
    assert_eq!(stats.failed, 100);
    // Failed requests are timed like any other outcome.
    assert!(stats.latency.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn preflight_rejects_a_target_that_answers_but_errors() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(format!("http://{addr}/status/503")).progress(false);
    let runner = Runner::new(config).expect("runner");

    match runner.preflight().await {
        Err(RunError::Preflight { status, .. }) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected a preflight refusal, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn slow_responses_become_timed_failures() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(format!("http://{addr}/delay/ms/400"))
        .requests(10)
        .concurrency(5)
        .request_timeout(Duration::from_millis(50))
        .progress(false);

    let runner = Runner::new(config).expect("runner");
    let stats = runner.run().await;

    assert_eq!(stats.total, 10);
    assert_eq!(stats.successful, 0);
    assert_eq!(stats.failed, 10);
    // Each failure is billed the time spent waiting for the timeout.
    assert!(stats.latency.expect("latency populated").min >= Duration::from_millis(50));
}
