//! Integration tests for the scraper
//!
//! These tests use wiremock to serve quote pages and run the full
//! fetch -> extract -> collect -> export pipeline end-to-end.

use quote_scraper::config::{CrawlerConfig, OutputConfig, RunConfig};
use quote_scraper::{export_csv, run_scrape, PageState};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, max_pages: u32, output_path: &str) -> RunConfig {
    RunConfig {
        crawler: CrawlerConfig {
            max_pages,
            concurrency: 5,
            per_request_retries: 3,
            base_url: base_url.to_string(),
            retry_backoff_ms: 10, // Very short for testing
            post_fetch_delay_ms: 0, // No pause between pages
            request_timeout_secs: 1,
            connect_timeout_secs: 1,
            channel_capacity: 8,
        },
        output: OutputConfig {
            output_path: output_path.to_string(),
        },
    }
}

/// Renders a page laid out like the real quotes site
fn quote_page(quotes: &[(&str, &str)], has_next: bool) -> String {
    let mut html = String::from(r#"<html><head><title>Quotes to Scrape</title></head><body><div class="col-md-8">"#);
    for (text, author) in quotes {
        html.push_str(&format!(
            r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
                <span class="text" itemprop="text">{}</span>
                <span>by <small class="author" itemprop="author">{}</small>
                <a href="/author/x">(about)</a></span>
                <div class="tags">Tags: <a class="tag" href="/tag/life/">life</a></div>
            </div>"#,
            text, author
        ));
    }
    html.push_str(r#"<nav><ul class="pager">"#);
    if has_next {
        html.push_str(r#"<li class="next"><a href="/page/2/">Next <span aria-hidden="true">&rarr;</span></a></li>"#);
    }
    html.push_str("</ul></nav></div></body></html>");
    html
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/page/{}/", page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, page_path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter(|r| r.url.path() == page_path)
        .count()
}

fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open CSV");
    reader
        .records()
        .map(|r| r.expect("valid CSV row").iter().map(String::from).collect())
        .collect()
}

#[tokio::test]
async fn test_single_page_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        1,
        quote_page(&[("“A”", "X"), ("“B”", "Y")], true),
    )
    .await;

    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("quotes.csv");
    let config = create_test_config(&mock_server.uri(), 1, output.to_str().unwrap());

    let outcome = run_scrape(&config).await.expect("Scrape failed");
    export_csv(&output, &outcome.quotes).expect("Export failed");

    assert_eq!(outcome.quotes.len(), 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Quote,Author\n“A”,X\n“B”,Y\n"
    );
    assert!(outcome.report.more_pages_available());
}

#[tokio::test]
async fn test_failed_page_does_not_abort_run() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, quote_page(&[("one", "A")], true)).await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // BadStatus is never retried
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 3, quote_page(&[("three", "C")], false)).await;

    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("quotes.csv");
    let config = create_test_config(&mock_server.uri(), 3, output.to_str().unwrap());

    let outcome = run_scrape(&config).await.expect("Scrape failed");
    export_csv(&output, &outcome.quotes).expect("Export failed");

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Quote", "Author"]);

    let mut texts: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    texts.sort_unstable();
    assert_eq!(texts, vec!["one", "three"]);

    assert_eq!(outcome.report.outcomes[1].state, PageState::BadStatus);
    assert_eq!(outcome.statistics.pages_failed(), 1);
}

#[tokio::test]
async fn test_transport_failure_then_success_is_retried() {
    let mock_server = MockServer::start().await;

    // First GET outlives the 1s request timeout
    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 1, quote_page(&[("a", "A"), ("b", "B")], true)).await;
    mount_page(&mock_server, 2, quote_page(&[("c", "C")], false)).await;

    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("quotes.csv");
    let config = create_test_config(&mock_server.uri(), 2, output.to_str().unwrap());

    let outcome = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(requests_to(&mock_server, "/page/1/").await, 2);
    assert_eq!(requests_to(&mock_server, "/page/2/").await, 1);
    assert_eq!(outcome.report.outcomes[0].quotes, 2);
    assert_eq!(outcome.quotes.len(), 3);
}

#[tokio::test]
async fn test_retry_bound_on_persistent_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("quotes.csv");
    let config = create_test_config(&mock_server.uri(), 1, output.to_str().unwrap());

    let outcome = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(requests_to(&mock_server, "/page/1/").await, 3);
    assert!(outcome.quotes.is_empty());
    assert_eq!(outcome.report.outcomes[0].state, PageState::Unreachable);
}

#[tokio::test]
async fn test_every_quote_of_every_page_is_exported() {
    let mock_server = MockServer::start().await;
    for page in 1..=4 {
        let texts: Vec<String> = (0..3).map(|i| format!("page {} quote {}", page, i)).collect();
        let quotes: Vec<(&str, &str)> = texts.iter().map(|t| (t.as_str(), "Author")).collect();
        mount_page(&mock_server, page, quote_page(&quotes, page < 4)).await;
    }

    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("quotes.csv");
    let config = create_test_config(&mock_server.uri(), 4, output.to_str().unwrap());

    let outcome = run_scrape(&config).await.expect("Scrape failed");
    export_csv(&output, &outcome.quotes).expect("Export failed");

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 4 * 3 + 1);
    assert!(!outcome.report.more_pages_available());

    // Within each page the rows keep document order
    for page in 1..=4 {
        let prefix = format!("page {} ", page);
        let order: Vec<&str> = rows
            .iter()
            .map(|r| r[0].as_str())
            .filter(|t| t.starts_with(&prefix))
            .collect();
        let expected: Vec<String> = (0..3).map(|i| format!("page {} quote {}", page, i)).collect();
        assert_eq!(order, expected);
    }
}

#[tokio::test]
async fn test_quotes_needing_escaping_round_trip() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        1,
        quote_page(&[("He said &quot;Hi, there&quot;", "Some, One")], false),
    )
    .await;

    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("quotes.csv");
    let config = create_test_config(&mock_server.uri(), 1, output.to_str().unwrap());

    let outcome = run_scrape(&config).await.expect("Scrape failed");
    export_csv(&output, &outcome.quotes).expect("Export failed");

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains(r#""He said ""Hi, there""","Some, One""#));

    let rows = read_rows(&output);
    assert_eq!(rows[1][0], r#"He said "Hi, there""#);
    assert_eq!(rows[1][1], "Some, One");
}
