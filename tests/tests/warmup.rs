mod utils;
use utils::*;

use volley::prelude::*;

// Kept alone in this binary so the target's served-request counter only
// sees this test's traffic.
#[tokio::test(flavor = "multi_thread")]
#[ntest::timeout(60000)]
async fn warmup_traffic_reaches_the_target_but_is_not_measured() {
    init();
    let addr = spawn_target().await;

    let config = RunConfig::new(ping_url(addr))
        .requests(200)
        .concurrency(20)
        .progress(false);

    let runner = Runner::new(config).expect("runner");
    runner.preflight().await.expect("preflight");
    runner.warmup().await.expect("warmup");
    let stats = runner.run().await;

    // Only the measured budget shows up in the statistics.
    assert_eq!(stats.total, 200);
    assert_eq!(stats.successful, 200);

    // But the target saw more: 1 preflight + 20 warmup (a tenth of the
    // run) + 200 measured.
    assert!(mock_service::served() >= 221);
}
