use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use serde_json::json;

use crate::hook::{AlertCountsPoller, Poller};

use super::*;

const WAIT: Duration = Duration::from_secs(5);

/// Expect the first poll to run immediately and publish the counters
#[tokio::test]
async fn publishes_alert_counts() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_json_endpoint("GET", &farm_path("alerts/unread-count"), 200, json!({"count": 3}), 1)
        .with_record_endpoint("GET", &farm_path("alerts/summary"), factory::mock_alert_summary(5, 3), 1)
        .build()
        .await;

    let poller = AlertCountsPoller::alert_counts(
        client_for(&test)?,
        Some(TEST_FARM_ID),
        Duration::from_secs(3600),
    );
    let mut counts = poller.subscribe();

    tokio::time::timeout(WAIT, counts.changed())
        .await
        .expect("poll timed out")
        .expect("poller stopped");

    let latest = poller.latest().unwrap();
    assert_eq!(latest.unread, 3);
    assert_eq!(latest.summary.total, 5);

    poller.shutdown().await;
    test.assert_mocks();

    Ok(())
}

/// Expect failures to be swallowed while polling continues
#[tokio::test]
async fn swallows_failures() -> Result<(), Error> {
    let mut test = TestBuilder::new().build().await;
    let failing = test
        .server()
        .mock("GET", "/api/v1/farms/farm-0001/alerts/unread-count")
        .with_status(500)
        .expect_at_least(2)
        .create_async()
        .await;

    let poller = AlertCountsPoller::alert_counts(
        client_for(&test)?,
        Some(TEST_FARM_ID),
        Duration::from_millis(20),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(poller.is_running());
    assert!(poller.latest().is_none());

    poller.shutdown().await;
    failing.assert_async().await;

    Ok(())
}

/// Expect no polling when no farm is selected
#[tokio::test]
async fn idle_without_farm() -> Result<(), Error> {
    let test = TestBuilder::new()
        .with_json_endpoint("GET", &farm_path("alerts/unread-count"), 200, json!({"count": 1}), 0)
        .build()
        .await;

    let poller = AlertCountsPoller::alert_counts(client_for(&test)?, None, Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!poller.is_running());
    assert!(poller.latest().is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect stop to end the polling task
#[tokio::test]
async fn stop_ends_polling() {
    let calls = Arc::new(AtomicU64::new(0));
    let counter = calls.clone();

    let poller = Poller::start("counter", Duration::from_millis(10), move || {
        let counter = counter.clone();
        async move { Ok::<_, Error>(counter.fetch_add(1, Ordering::SeqCst) + 1) }
    });
    let mut values = poller.subscribe();

    tokio::time::timeout(WAIT, values.wait_for(|value| value.is_some_and(|n| n >= 2)))
        .await
        .expect("poll timed out")
        .expect("poller stopped");

    poller.stop();
    assert!(!poller.is_running());

    tokio::time::sleep(Duration::from_millis(30)).await;
    let after_stop = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_stop);
}
