// Shared helpers for integration tests
//
// Each test binary compiles this module separately, so not every helper is
// used everywhere.
#![allow(dead_code)]

use crate::test_server::TestServer;
use landing_harness::{HarnessConfig, Session, Suite, Summary, catalog};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once per binary. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Configuration pointing at a local test server.
pub fn config(base_url: &str) -> HarnessConfig {
    HarnessConfig::builder()
        .base_url(base_url)
        .default_timeout(Duration::from_secs(10))
        .poll_interval(Duration::from_millis(50))
        .jobs(2)
        .build()
        .expect("Test configuration should be valid")
}

/// Launches a browser session. Panics when no Playwright driver or browser
/// is installed.
pub async fn launch(config: &HarnessConfig) -> Session {
    Session::launch(config)
        .await
        .expect("Failed to launch browser")
}

/// Runs every scenario of `suite` against the fixture page and fails the
/// test with the full report when any scenario fails.
pub async fn run_suite(suite: Suite) {
    init_tracing();
    let server = TestServer::start().await;
    let config = config(&server.url());

    let session = launch(&config).await;

    let cases: Vec<_> = catalog()
        .into_iter()
        .filter(|case| case.suite() == suite)
        .collect();
    assert!(!cases.is_empty(), "suite {} has no scenarios", suite);

    let summary = Summary::new(session.run_catalog(&cases).await);
    tracing::info!("{}", summary);

    session.close().await.expect("Failed to close session");
    server.shutdown();

    assert_eq!(summary.total(), cases.len());
    assert!(summary.is_success(), "{}", summary);
}
