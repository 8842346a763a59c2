//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small site to the real HTTP fetcher
//! and check the full crawl cycle end-to-end: raw table, top table, report
//! and terminal status.

use std::path::Path;
use tempfile::TempDir;
use term_ripple::config::{validate, CrawlConfig, CrawlSettings};
use term_ripple::crawler::{Crawler, HttpFetcher};
use term_ripple::{CrawlResult, RippleError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing both tables into `dir`
fn create_test_config(
    seed: &str,
    dir: &Path,
    max_depth: i64,
    max_visited: i64,
    top_count: i64,
) -> CrawlConfig {
    let mut settings = CrawlSettings::default();
    settings.crawl.seed = Some(seed.to_string());
    settings.crawl.terms = vec!["rust".to_string(), "crab".to_string()];
    settings.crawl.max_depth = max_depth;
    settings.crawl.max_visited = max_visited;
    settings.fetch.timeout_ms = 5_000;
    settings.output.top_count = top_count;
    settings.output.raw_path = dir.join("Out.csv").display().to_string();
    settings.output.top_path = dir.join("OutTop.csv").display().to_string();
    validate(&settings).expect("test configuration should be valid")
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

/// Serves a three-level site:
///
/// ```text
/// /        -> /a, /b, /doc.pdf, /missing
/// /a       -> /c
/// /b       -> /a
/// /c       -> (none)
/// ```
async fn start_site() -> MockServer {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r##"<html><head><title>Home</title></head><body>
            <p>Rust and more Rust.</p>
            <script>var rust = "rust rust";</script>
            <a href="/a">A</a>
            <a href="{}/b">B</a>
            <a href="/doc.pdf">PDF</a>
            <a href="/missing">Missing</a>
            <a href="#top">Top</a>
            </body></html>"##,
            base_url
        ),
    )
    .await;

    mount_page(
        &server,
        "/a",
        r#"<html><body><p>A crab wrote this. CRAB!</p><a href="/c#intro">C</a></body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        &server,
        "/b",
        r#"<html><body><p>rust crab rust crab rust</p><a href="/a">A again</a></body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        &server,
        "/c",
        "<html><body><p>Nothing to see.</p></body></html>".to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    server
}

fn read_table(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("table should exist")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_full_crawl_writes_both_tables() {
    let server = start_site().await;
    let seed = format!("{}/", server.uri());
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&seed, dir.path(), 8, 100, 3);

    let fetcher = HttpFetcher::new().expect("Failed to build fetcher");
    let crawler = Crawler::new(config, fetcher)
        .await
        .expect("Failed to construct crawler");
    let mut report: Vec<u8> = Vec::new();
    let outcome = crawler.run(&mut report).await.expect("Crawl failed");

    assert_eq!(outcome.result, CrawlResult::NoMorePages);
    assert_eq!(outcome.result.exit_code(), 0);
    assert_eq!(outcome.statistics.pages_visited, 4);
    assert_eq!(outcome.statistics.fetch_failures, 2);

    let base = server.uri();
    let raw = read_table(&dir.path().join("Out.csv"));
    assert_eq!(
        raw,
        vec![
            "URL,rust,crab".to_string(),
            format!("{}/,2,0", base),
            format!("{}/a,0,2", base),
            format!("{}/b,3,2", base),
            format!("{}/c,0,0", base),
        ]
    );

    let top = read_table(&dir.path().join("OutTop.csv"));
    assert_eq!(
        top,
        vec![
            "URL,rust,crab".to_string(),
            format!("{}/b,3,2", base),
            format!("{}/,2,0", base),
            format!("{}/a,0,2", base),
        ]
    );

    let echoed = String::from_utf8(report).expect("report should be UTF-8");
    assert_eq!(echoed.lines().collect::<Vec<_>>(), top[1..].to_vec());
}

#[tokio::test]
async fn test_depth_limit_stops_after_first_level() {
    let server = start_site().await;
    let seed = format!("{}/", server.uri());
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&seed, dir.path(), 2, 100, 0);

    let crawler = Crawler::new(config, HttpFetcher::new().unwrap())
        .await
        .unwrap();
    let outcome = crawler.run(&mut std::io::sink()).await.unwrap();

    assert_eq!(outcome.result, CrawlResult::DepthLimitReached);
    assert_eq!(outcome.result.exit_code(), 1);

    let raw = read_table(&dir.path().join("Out.csv"));
    assert_eq!(raw.len(), 4, "header, seed, /a and /b: {:?}", raw);
    assert!(raw.iter().all(|line| !line.contains("/c,")));
}

#[tokio::test]
async fn test_depth_one_fetches_only_seed() {
    let server = start_site().await;
    let seed = format!("{}/", server.uri());
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&seed, dir.path(), 1, 100, 1);

    let crawler = Crawler::new(config, HttpFetcher::new().unwrap())
        .await
        .unwrap();
    let outcome = crawler.run(&mut std::io::sink()).await.unwrap();

    assert_eq!(outcome.result, CrawlResult::DepthLimitReached);
    assert_eq!(read_table(&dir.path().join("Out.csv")).len(), 2);
    assert_eq!(outcome.top.len(), 1);
}

#[tokio::test]
async fn test_visit_limit() {
    let server = start_site().await;
    let seed = format!("{}/", server.uri());
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&seed, dir.path(), 8, 2, 2);

    let crawler = Crawler::new(config, HttpFetcher::new().unwrap())
        .await
        .unwrap();
    let outcome = crawler.run(&mut std::io::sink()).await.unwrap();

    assert_eq!(outcome.result, CrawlResult::VisitLimitReached);
    assert_eq!(outcome.result.exit_code(), 2);
    assert_eq!(outcome.statistics.pages_visited, 2);

    let raw = read_table(&dir.path().join("Out.csv"));
    assert_eq!(raw.len(), 3);
}

#[tokio::test]
async fn test_unreachable_seed_is_construction_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&seed, dir.path(), 8, 100, 0);

    match Crawler::new(config, HttpFetcher::new().unwrap()).await {
        Err(e) => {
            assert!(matches!(e, RippleError::SeedUnreachable { .. }));
            assert!(e.is_construction());
        }
        Ok(_) => panic!("seed returning 500 should fail construction"),
    }

    assert!(!dir.path().join("Out.csv").exists());
    assert!(!dir.path().join("OutTop.csv").exists());
}

#[tokio::test]
async fn test_pages_are_fetched_once() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<a href="/loop">1</a><a href="{}/loop">2</a><a href="/loop#x">3</a>"#,
                base_url
            ),
            "text/html",
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/">home</a>"#, "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", base_url);
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&seed, dir.path(), 0, 100, 2);

    let crawler = Crawler::new(config, HttpFetcher::new().unwrap())
        .await
        .unwrap();
    let outcome = crawler.run(&mut std::io::sink()).await.unwrap();

    assert_eq!(outcome.result, CrawlResult::NoMorePages);
    assert_eq!(outcome.statistics.pages_visited, 2);
    server.verify().await;
}

#[tokio::test]
async fn test_same_directory_links_join_without_slash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dir/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<p>rust</p><a href="other.html">next</a>"#, "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dirother.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>crab</p>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dir/other.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>crab</p>", "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/dir/index.html", server.uri());
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&seed, dir.path(), 8, 100, 0);

    let crawler = Crawler::new(config, HttpFetcher::new().unwrap())
        .await
        .unwrap();
    let outcome = crawler.run(&mut std::io::sink()).await.unwrap();

    assert_eq!(outcome.result, CrawlResult::NoMorePages);
    let raw = read_table(&dir.path().join("Out.csv"));
    assert_eq!(
        raw,
        vec![
            "URL,rust,crab".to_string(),
            format!("{},1,0", seed),
            format!("{}/dirother.html,0,1", server.uri()),
        ]
    );
    server.verify().await;
}
