//! CSV output formatter

use crate::models::HostCheckResult;

/// Header row of the CSV export
pub const CSV_HEADER: &str = "Host,FQDN,Port,Status,Subject,Issuer,Expiry,Days Remaining,Error";

/// Render results as CSV, one row per host
pub fn to_csv(results: &[HostCheckResult]) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];

    for result in results {
        let mut row = vec![
            escape(&result.host_name),
            escape(&result.fqdn),
            result.port.to_string(),
            result.status.to_string(),
        ];

        if let Some(error) = &result.error {
            row.extend([String::new(), String::new(), String::new(), String::new()]);
            row.push(escape(error));
        } else if let (Some(cert), Some(expiration)) = (&result.certificate, &result.expiration) {
            row.push(escape(cert.common_name().unwrap_or_default()));
            row.push(escape(cert.issuer_common_name().unwrap_or_default()));
            row.push(expiration.not_after.format("%Y-%m-%d").to_string());
            row.push(expiration.days_remaining.to_string());
            row.push(String::new());
        }

        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
