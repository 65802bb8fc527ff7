// Integration tests for fallback resolution and state diffs in a real browser
//
// Tests cover:
// - Falling back from class names to icons and labels
// - Skipping hidden matches and waiting for late elements
// - Timeout diagnostics listing every candidate
// - Style snapshots changing after a click
// - Viewport profiles applied to the page
//
// Ignored by default; run with `cargo test -- --ignored` once a Playwright
// browser is installed.

mod test_server;

use landing_harness::snapshot::{Probe, capture, expect_changed, wait_for_change};
use landing_harness::{Error, Resolver, Surface, TargetDescriptor, Strategy, ViewportProfile, landing};
use std::time::Duration;
use test_server::TestServer;

mod common;

#[tokio::test]
#[ignore = "needs an installed Playwright browser; run with --ignored"]
async fn test_fallback_resolution_and_style_diff() {
    common::init_tracing();
    let server = TestServer::start().await;
    let config = common::config(&server.url());
    let session = common::launch(&config).await;
    let page = session.new_surface().await.expect("Failed to create page");

    page.goto(&format!("{}/fallback.html", server.url()))
        .await
        .expect("Failed to navigate");

    let resolver = Resolver::new(&page, &config);

    // No carousel-next class on this page: the chevron icon wins
    let next = resolver
        .resolve(&landing::next_slide())
        .await
        .expect("Next control should resolve by icon");
    assert_eq!(next.strategy().kind(), "icon");

    // Previous is only labelled
    let previous = resolver
        .resolve(&landing::previous_slide())
        .await
        .expect("Previous control should resolve by label");
    assert_eq!(previous.strategy().kind(), "aria-label");

    let track = resolver
        .resolve(&landing::carousel_content())
        .await
        .expect("Track should resolve");
    let before = capture(&page, &track, &Probe::Style)
        .await
        .expect("Failed to capture style");
    assert!(before.contains("translate3d(0px"));

    page.click(&next).await.expect("Failed to click next");
    let after = wait_for_change(
        &page,
        &track,
        &before,
        config.default_timeout(),
        config.poll_interval(),
    )
    .await
    .expect("Style should change after next");
    expect_changed(&before, &after).expect("Snapshots should differ");

    page.close().await.expect("Failed to close page");
    session.close().await.expect("Failed to close session");
    server.shutdown();
}

#[tokio::test]
#[ignore = "needs an installed Playwright browser; run with --ignored"]
async fn test_hidden_and_delayed_candidates() {
    common::init_tracing();
    let server = TestServer::start().await;
    let config = common::config(&server.url());
    let session = common::launch(&config).await;
    let page = session.new_surface().await.expect("Failed to create page");

    page.goto(&format!("{}/delayed.html", server.url()))
        .await
        .expect("Failed to navigate");

    // The class match is hidden; the labelled button shows up later
    let next = Resolver::new(&page, &config)
        .resolve(&landing::next_slide())
        .await
        .expect("Delayed control should resolve");
    assert_eq!(next.strategy().kind(), "aria-label");
    assert_eq!(next.index(), 0);

    page.close().await.expect("Failed to close page");
    session.close().await.expect("Failed to close session");
    server.shutdown();
}

#[tokio::test]
#[ignore = "needs an installed Playwright browser; run with --ignored"]
async fn test_timeout_lists_candidates() {
    common::init_tracing();
    let server = TestServer::start().await;
    let config = common::config(&server.url());
    let session = common::launch(&config).await;
    let page = session.new_surface().await.expect("Failed to create page");

    page.goto(&format!("{}/fallback.html", server.url()))
        .await
        .expect("Failed to navigate");

    let missing = TargetDescriptor::builder("checkout")
        .candidate(Strategy::id("checkout"))
        .candidate(Strategy::text("button", "Buy now"))
        .timeout(Duration::from_millis(500))
        .build()
        .expect("Valid descriptor");

    let err = Resolver::new(&page, &config)
        .resolve(&missing)
        .await
        .expect_err("Nothing should match");

    match &err {
        Error::ResolutionTimeout {
            candidates,
            elapsed,
            ..
        } => {
            assert_eq!(
                candidates,
                &vec!["#checkout".to_string(), r#"button:has-text("Buy now")"#.to_string()]
            );
            assert!(*elapsed >= Duration::from_millis(500));
        }
        other => panic!("Expected ResolutionTimeout, got {:?}", other),
    }
    assert!(err.to_string().contains("[2] button:has-text"));

    page.close().await.expect("Failed to close page");
    session.close().await.expect("Failed to close session");
    server.shutdown();
}

#[tokio::test]
#[ignore = "needs an installed Playwright browser; run with --ignored"]
async fn test_viewport_profiles_apply() {
    common::init_tracing();
    let server = TestServer::start().await;
    let config = common::config(&server.url());
    let session = common::launch(&config).await;
    let page = session.new_surface().await.expect("Failed to create page");

    page.goto(&config.entry_url()).await.expect("Failed to navigate");

    for profile in ViewportProfile::ALL {
        page.set_viewport(profile.size())
            .await
            .expect("Failed to set viewport");
        let width = page
            .evaluate("window.innerWidth")
            .await
            .expect("Failed to read width");
        assert_eq!(width.as_u64(), Some(u64::from(profile.size().width)));
    }

    page.close().await.expect("Failed to close page");
    session.close().await.expect("Failed to close session");
    server.shutdown();
}
