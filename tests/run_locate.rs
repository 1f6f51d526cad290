//! Integration tests for run_locate
//!
//! These tests run the whole batch driver against a mock provider. Inputs are
//! IP literals so no DNS query leaves the machine.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use sqlx::{Row, SqlitePool};
use tempfile::{NamedTempFile, TempDir};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain_location::{run_locate, run_locate_with, Config, LogFormat, LogLevel, StorageKind};

/// Helper function to write input lines to a temporary file (sync I/O)
fn write_lines_to_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write line");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// Helper function to create a basic Config for testing
fn create_test_config(input_file: PathBuf, provider_url: String) -> Config {
    Config {
        file: input_file,
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        max_concurrency: 4,
        dns_timeout_seconds: 2,
        fetch_timeout_seconds: 2,
        provider_url,
        user_agent: "domain_location_test/1.0".to_string(),
        ..Default::default()
    }
}

fn location_body(ip: &str, country_code: &str) -> String {
    serde_json::json!({
        "ipVersion": 4,
        "ipAddress": ip,
        "latitude": 52.37,
        "longitude": 4.89,
        "countryName": "Netherlands",
        "countryCode": country_code,
        "timeZone": "+01:00",
        "zipCode": "1012",
        "cityName": "Amsterdam",
        "regionName": "North Holland",
        "continent": "Europe",
        "continentCode": "EU"
    })
    .to_string()
}

/// Provider answering for 192.0.2.1 and 192.0.2.2, failing for 192.0.2.3.
async fn start_provider() -> MockServer {
    let server = MockServer::start().await;
    for ip in ["192.0.2.1", "192.0.2.2"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/json/{ip}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(location_body(ip, "NL")))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/json/192.0.2.3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_run_locate_writes_sqlite_rows() {
    let server = start_provider().await;
    let input = write_lines_to_file(&[
        "# provider fixtures",
        "192.0.2.1",
        "",
        "http://192.0.2.2/index.html",
        "192.0.2.3",
        "ftp://192.0.2.1",
    ]);
    let db_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = db_dir.path().join("locations.db");

    let config = Config {
        storage: StorageKind::Sqlite,
        db_path: db_path.clone(),
        ..create_test_config(input.path().to_path_buf(), server.uri())
    };

    let report = run_locate(config).await.expect("run_locate should succeed");

    assert_eq!(report.total_domains, 3);
    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 1);
    assert!(report.run_id.starts_with("run_"));

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to open result database");
    let rows = sqlx::query(
        "SELECT url, ipAddress, countryCode, run_id FROM domain_location ORDER BY url",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to read domain_location rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get::<String, _>("url"), "192.0.2.1");
    assert_eq!(rows[0].get::<String, _>("ipAddress"), "192.0.2.1");
    assert_eq!(rows[1].get::<String, _>("url"), "192.0.2.2");
    assert_eq!(rows[1].get::<String, _>("countryCode"), "NL");
    for row in &rows {
        assert_eq!(row.get::<String, _>("run_id"), report.run_id);
    }

    let descriptions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM store_fields WHERE collection = 'domain_location'")
            .fetch_one(&pool)
            .await
            .expect("Failed to count field descriptions");
    assert_eq!(descriptions, 13);
}

#[tokio::test]
async fn test_run_locate_writes_jsonl_records() {
    let server = start_provider().await;
    let input = write_lines_to_file(&["192.0.2.1", "192.0.2.2"]);
    let out_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        storage: StorageKind::Jsonl,
        output_dir: out_dir.path().to_path_buf(),
        ..create_test_config(input.path().to_path_buf(), server.uri())
    };

    let report = run_locate(config).await.expect("run_locate should succeed");
    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 0);

    let contents = std::fs::read_to_string(out_dir.path().join("domain_location.jsonl"))
        .expect("data file should exist");
    let mut urls: Vec<String> = contents
        .lines()
        .map(|line| {
            let record: serde_json::Value =
                serde_json::from_str(line).expect("each line should be JSON");
            assert_eq!(record["cityName"], "Amsterdam");
            record["url"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    urls.sort();
    assert_eq!(urls, vec!["192.0.2.1", "192.0.2.2"]);

    assert!(out_dir.path().join("domain_location.schema.json").exists());
}

#[tokio::test]
async fn test_run_locate_empty_input() {
    let server = MockServer::start().await;
    let input = write_lines_to_file(&["# nothing to do", "   "]);
    let out_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        storage: StorageKind::Jsonl,
        output_dir: out_dir.path().to_path_buf(),
        ..create_test_config(input.path().to_path_buf(), server.uri())
    };

    let report = run_locate(config).await.expect("run_locate should succeed");
    assert_eq!(report.total_domains, 0);
    assert_eq!(report.successful, 0);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn test_run_locate_missing_input_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        dir.path().join("does_not_exist.txt"),
        "http://127.0.0.1:1".to_string(),
    );

    let err = run_locate(config)
        .await
        .expect_err("missing input file should fail the run");
    assert!(format!("{err:#}").contains("Failed to open input file"));
}

#[tokio::test]
async fn test_run_locate_directory_input_fails() {
    let input_dir = TempDir::new().expect("Failed to create temp dir");
    let out_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        storage: StorageKind::Jsonl,
        output_dir: out_dir.path().to_path_buf(),
        ..create_test_config(input_dir.path().to_path_buf(), "http://127.0.0.1:1".to_string())
    };

    let outcome = tokio::time::timeout(Duration::from_secs(5), run_locate(config))
        .await
        .expect("run_locate should return for a directory input");
    let err = outcome.expect_err("reading a directory should fail the run");
    assert!(format!("{err:#}").contains("Failed to read input"));
}

#[tokio::test]
async fn test_run_locate_with_stops_on_cancel_while_input_pending() {
    let server = start_provider().await;
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        storage: StorageKind::Jsonl,
        output_dir: out_dir.path().to_path_buf(),
        ..create_test_config(PathBuf::from("-"), server.uri())
    };

    // The writer stays open, so the reader never sees EOF
    let (mut writer, reader) = tokio::io::duplex(1024);
    writer
        .write_all(b"192.0.2.1\n")
        .await
        .expect("Failed to write input line");

    let cancel = CancellationToken::new();
    let run = tokio::spawn(run_locate_with(config, reader, cancel.clone()));

    for _ in 0..50 {
        let requests = server.received_requests().await.unwrap_or_default();
        if !requests.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    cancel.cancel();

    let report = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run should stop once cancelled")
        .expect("run task should not panic")
        .expect("cancelled run still reports");

    assert_eq!(report.total_domains, 1);
    assert_eq!(report.successful + report.failed, 1);
    drop(writer);
}
