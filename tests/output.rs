mod common;

use cert_checker::models::HostCheckResult;
use cert_checker::output::{summary_table, to_csv, to_json, CSV_HEADER};
use cert_checker::runner::{CheckSettings, HostChecker};
use cert_checker::utils::FetchError;
use chrono::{TimeZone, Utc};
use common::{leaf_params, Pki};
use rcgen::date_time_ymd;
use std::time::Duration;

fn checked_result() -> HostCheckResult {
    let mut params = leaf_params("www.example.com", &["www.example.com"]);
    params.not_before = date_time_ymd(2025, 1, 1);
    params.not_after = date_time_ymd(2025, 12, 31);
    let pki = Pki::with_leaf(params);

    let checker = HostChecker::new(CheckSettings::default()).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    checker.evaluate(
        "web, primary",
        "www.example.com",
        443,
        30,
        vec![pki.leaf.parsed(), pki.intermediate.parsed()],
        now,
    )
}

fn failed_result() -> HostCheckResult {
    HostCheckResult::failed(
        "api",
        "api.example.com",
        8443,
        &FetchError::Timeout {
            timeout: Duration::from_secs(5),
        },
    )
}

#[test]
fn test_json_includes_certificate_for_checked_hosts() {
    let json = to_json(&[checked_result(), failed_result()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = value.as_array().unwrap();

    let ok = &entries[0];
    assert_eq!(ok["host_name"], "web, primary");
    assert_eq!(ok["status"], "valid");
    assert_eq!(ok["hostname_valid"], true);
    assert!(ok.get("error").is_none());
    let cert = &ok["certificate"];
    assert_eq!(cert["subject_cn"], "www.example.com");
    assert_eq!(cert["issuer_cn"], "Test Intermediate CA");
    assert_eq!(cert["not_after"], "2025-12-31T00:00:00+00:00");
    assert_eq!(cert["days_remaining"], 213);
    assert_eq!(cert["is_expired"], false);
    assert_eq!(cert["fingerprint"].as_str().unwrap().split(':').count(), 32);

    let failed = &entries[1];
    assert_eq!(failed["status"], "error");
    assert_eq!(failed["port"], 8443);
    assert_eq!(failed["error"], "Connection timeout after 5s");
    assert!(failed.get("certificate").is_none());
    assert!(failed.get("hostname_valid").is_none());
}

#[test]
fn test_csv_rows_have_fixed_columns() {
    let csv = to_csv(&[checked_result(), failed_result()]);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
        lines[1],
        "\"web, primary\",www.example.com,443,valid,www.example.com,Test Intermediate CA,2025-12-31,213,"
    );
    assert_eq!(
        lines[2],
        "api,api.example.com,8443,error,,,,,Connection timeout after 5s"
    );
    assert_eq!(lines[2].split(',').count(), CSV_HEADER.split(',').count());
}

#[test]
fn test_csv_of_empty_batch_is_header_only() {
    assert_eq!(to_csv(&[]), CSV_HEADER);
}

#[test]
fn test_summary_table_has_row_per_host() {
    let table = summary_table(&[checked_result(), failed_result()]);
    assert_eq!(table.row_iter().count(), 2);

    let rendered = table.to_string();
    assert!(rendered.contains("213"));
}
