// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use pricetrack::domain::models::scrape_outcome::ScrapeOutcome;
use pricetrack::domain::models::vendor_url_task::VendorUrlTask;
use pricetrack::engines::traits::EngineError;

use super::helpers::{
    product_page, vendor, worker, FakeRenderer, FakeSite, PageEvent, NAVIGATION_TIMEOUT,
};

const URL: &str = "https://shop.example/p/1";

fn renderer_with(site: FakeSite) -> Arc<FakeRenderer> {
    Arc::new(FakeRenderer::new([(URL.to_string(), site)]))
}

fn task() -> VendorUrlTask {
    VendorUrlTask::new(URL, 1, 42)
}

#[tokio::test]
async fn test_success_releases_context() {
    let renderer = renderer_with(FakeSite::html(product_page("129.00", "https://schema.org/InStock")));
    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    match outcome {
        ScrapeOutcome::Success(result) => {
            assert_eq!(result.price, 129.0);
            assert!(result.availability);
        }
        other => panic!("expected success, got {}", other),
    }
    assert_eq!(renderer.opened(), 1);
    assert_eq!(renderer.released(), 1);
    assert!(!renderer.user_agents()[0].is_empty());
}

#[tokio::test]
async fn test_blocked_page_is_not_extracted() {
    let mut site = FakeSite::blocked();
    // A price is present, but the interstitial wins
    site.html = product_page("1.00", "InStock");
    let renderer = renderer_with(site);

    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(outcome, ScrapeOutcome::Blocked));
    assert_eq!(renderer.released(), 1);
}

#[tokio::test]
async fn test_page_without_price_is_not_found() {
    let renderer = renderer_with(FakeSite::html(
        "<html><body><h1>Espresso machine</h1><p>Great coffee.</p></body></html>",
    ));
    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(outcome, ScrapeOutcome::NotFound));
    assert_eq!(renderer.released(), 1);
}

#[tokio::test]
async fn test_navigation_failure_becomes_error_and_releases() {
    let renderer = renderer_with(FakeSite::navigation_failure());
    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(
        outcome,
        ScrapeOutcome::Error(EngineError::Navigation(_))
    ));
    assert_eq!(renderer.released(), 1);
    assert_eq!(
        renderer.events().last().map(|(_, e)| e.clone()),
        Some(PageEvent::Released(URL.to_string()))
    );
}

#[tokio::test(start_paused = true)]
async fn test_slow_page_times_out() {
    let renderer = renderer_with(
        FakeSite::html(product_page("5", "InStock")).with_latency(Duration::from_secs(120)),
    );
    let started = Instant::now();
    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(outcome, ScrapeOutcome::Error(EngineError::Timeout(45))));
    // Cut off by the worker at 45s, well before the page would have loaded
    let elapsed = started.elapsed();
    assert!(elapsed >= NAVIGATION_TIMEOUT && elapsed < Duration::from_secs(46));
    assert_eq!(renderer.released(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_page_within_navigation_bound_loads() {
    let renderer = renderer_with(
        FakeSite::html(product_page("5", "InStock")).with_latency(Duration::from_secs(40)),
    );
    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(outcome, ScrapeOutcome::Success(_)));
    assert_eq!(renderer.released(), 1);
}

#[tokio::test]
async fn test_panicking_navigation_still_releases_context() {
    let mut site = FakeSite::html(product_page("5", "InStock"));
    site.panic_on_navigate = true;
    let renderer = renderer_with(site);
    let worker = worker(renderer.clone());

    let handle = tokio::spawn(async move { worker.scrape(&task(), &vendor(1, "Shop")).await });

    assert!(handle.await.unwrap_err().is_panic());
    assert_eq!(renderer.opened(), 1);
    assert_eq!(renderer.released(), 1);
}

#[tokio::test]
async fn test_dom_failure_becomes_error() {
    let mut site = FakeSite::html(product_page("5", "InStock"));
    site.fail_dom = true;
    let renderer = renderer_with(site);

    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(outcome, ScrapeOutcome::Error(EngineError::Dom(_))));
    assert_eq!(renderer.released(), 1);
}

#[tokio::test]
async fn test_context_failure_has_nothing_to_release() {
    let renderer = Arc::new(FakeRenderer::failing_contexts());
    let outcome = worker(renderer.clone()).scrape(&task(), &vendor(1, "Shop")).await;

    assert!(matches!(outcome, ScrapeOutcome::Error(EngineError::Context(_))));
    assert_eq!(renderer.opened(), 0);
    assert_eq!(renderer.released(), 0);
}
