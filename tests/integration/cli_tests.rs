//! Binary-level tests: flags, exit codes, and the stdout summary line

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens here, so every page fails fast at the transport layer
const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

fn scraper() -> Command {
    Command::cargo_bin("quote-scraper").unwrap()
}

#[test]
fn test_failed_pages_still_export_header_and_exit_zero() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("quotes.csv");
    let output_str = output.to_str().unwrap();

    scraper()
        .args(["--pages", "2", "--retries", "1"])
        .args(["--base-url", UNREACHABLE_BASE_URL])
        .args(["--output", output_str])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "Scraped 0 quotes and saved to {}\n",
            output_str
        )))
        .stderr(predicate::str::is_empty());

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Quote,Author\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_output_exits_non_zero() {
    scraper()
        .args(["--retries", "1", "--base-url", UNREACHABLE_BASE_URL])
        .args(["--output", "/dev/full"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_output_directory_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no-such-dir").join("quotes.csv");

    scraper()
        .args(["--retries", "1", "--base-url", UNREACHABLE_BASE_URL])
        .args(["--output", output.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Scraped").not());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("quotes.csv");

    scraper()
        .args(["--verbose", "--retries", "1"])
        .args(["--base-url", UNREACHABLE_BASE_URL])
        .args(["--output", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Scraped 0 quotes"))
        .stderr(predicate::str::contains("Error scraping page 1"));
}

#[test]
fn test_invalid_flags_are_rejected() {
    scraper().args(["--concurrency", "0"]).assert().failure();
    scraper().args(["--pages", "0"]).assert().failure();
    scraper().args(["--base-url", "not a url"]).assert().failure();
}

#[test]
fn test_config_file_supplies_settings() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("from-config.csv");

    let mut config = NamedTempFile::new().unwrap();
    write!(
        config,
        r#"
[crawler]
max-pages = 2
per-request-retries = 1
base-url = "{}"

[output]
output-path = "{}"
"#,
        UNREACHABLE_BASE_URL,
        output.display()
    )
    .unwrap();
    config.flush().unwrap();

    scraper()
        .args(["--config", config.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("from-config.csv"));

    assert!(output.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scrape_live_mock_site() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <div class="quote"><span class="text">“A”</span><small class="author">X</small></div>
                <div class="quote"><span class="text">“B”</span><small class="author">Y</small></div>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("quotes.csv");
    let output_str = output.to_str().unwrap().to_string();
    let base_url = mock_server.uri();

    let assert = tokio::task::spawn_blocking(move || {
        scraper()
            .args(["--pages", "1", "--base-url", base_url.as_str()])
            .args(["--output", output_str.as_str()])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Scraped 2 quotes"));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Quote,Author\n“A”,X\n“B”,Y\n"
    );
}
