//! Table rendering using comfy-table

use crate::models::{CertificateStatus, HostCheckResult};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, ContentArrangement, Table};

/// Build the batch summary table
pub fn summary_table(results: &[HostCheckResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    // Constrain table width to terminal width minus indent
    let (_, cols) = console::Term::stdout().size();
    table.set_width(cols.saturating_sub(4));
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers = ["Host", "FQDN:Port", "Status", "Expiry", "Days Left"];
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for result in results {
        let color = status_color(result.status);
        let status_cell =
            Cell::new(format!("{} {}", result.status.icon(), title_case(result.status)))
                .fg(color);

        let (expiry, days) = match &result.expiration {
            Some(exp) if !result.is_error() => (
                exp.not_after.format("%Y-%m-%d").to_string(),
                Cell::new(exp.days_remaining).fg(days_color(exp.is_expired, exp.is_warning)),
            ),
            _ => ("-".to_string(), Cell::new("-")),
        };

        table.add_row(vec![
            Cell::new(&result.host_name).fg(Color::Cyan),
            Cell::new(format!("{}:{}", result.fqdn, result.port)),
            status_cell,
            Cell::new(expiry),
            days,
        ]);
    }

    table
}

/// Print the batch summary table, indented
pub fn print_summary_table(results: &[HostCheckResult]) {
    for line in summary_table(results).to_string().lines() {
        println!("    {}", line);
    }
}

fn status_color(status: CertificateStatus) -> Color {
    match status {
        CertificateStatus::Valid => Color::Green,
        CertificateStatus::Warning => Color::Yellow,
        CertificateStatus::Expired | CertificateStatus::Error => Color::Red,
    }
}

fn days_color(is_expired: bool, is_warning: bool) -> Color {
    if is_expired {
        Color::Red
    } else if is_warning {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn title_case(status: CertificateStatus) -> &'static str {
    match status {
        CertificateStatus::Valid => "Valid",
        CertificateStatus::Warning => "Warning",
        CertificateStatus::Expired => "Expired",
        CertificateStatus::Error => "Error",
    }
}
