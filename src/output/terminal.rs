//! Rich terminal output formatting

use crate::models::{
    AuditLevel, Certificate, CertificateStatus, HostCheckResult, ValidationResult,
    ValidationStatus,
};
use crate::utils::progress::{print_fail, print_info, print_pass, print_warning};
use console::{style, Style};

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

fn status_style(status: CertificateStatus) -> Style {
    match status {
        CertificateStatus::Valid => Style::new().green().bold(),
        CertificateStatus::Warning => Style::new().yellow().bold(),
        CertificateStatus::Expired => Style::new().red().bold(),
        CertificateStatus::Error => Style::new().red(),
    }
}

/// Print a single host check result
pub fn print_host_result(result: &HostCheckResult, verbose: bool) {
    let title_style = status_style(result.status);
    println!(
        "{} {} ({}:{})",
        title_style.apply_to(result.status.icon()),
        style(&result.host_name).bold(),
        result.fqdn,
        result.port
    );

    if let Some(error) = &result.error {
        println!("    {} {}", style("Error:").red().bold(), error);
        return;
    }

    let (Some(cert), Some(expiration)) = (&result.certificate, &result.expiration) else {
        return;
    };

    println!(
        "    {} {}",
        style("Subject:").bold(),
        cert.common_name().unwrap_or("Unknown")
    );
    println!(
        "    {} {}",
        style("Issuer:").bold(),
        cert.issuer_common_name().unwrap_or("Unknown")
    );
    println!(
        "    {} {}",
        style("Valid Until:").bold(),
        expiration.not_after.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let days_text = if expiration.is_expired {
        style(format!("{} days ago", expiration.days_remaining.abs())).red()
    } else if expiration.is_warning {
        style(format!("{} days", expiration.days_remaining)).yellow()
    } else {
        style(format!("{} days", expiration.days_remaining)).green()
    };
    println!("    {} {}", style("Days Remaining:").bold(), days_text);

    if let Some(valid) = result.hostname_valid {
        let hostname = if valid {
            style("✓ Valid").green()
        } else {
            style("✗ Invalid").red()
        };
        println!("    {} {}", style("Hostname:").bold(), hostname);
    }

    if let Some(validation) = &result.chain_validation {
        println!(
            "    {} {}",
            style("Chain:").bold(),
            format_validation_status(validation.status)
        );
    }

    if verbose {
        if !cert.san_dns.is_empty() {
            println!("    {} {}", style("SAN:").bold(), cert.san_dns.join(", "));
        }
        println!("    {} {}", style("Fingerprint:").bold(), cert.fingerprint());
    }
}

/// Print certificate details
pub fn print_certificate(cert: &Certificate, verbose: bool) {
    print_header("Certificate Details");

    let field = |name: &str, value: String| {
        println!("  {:<22} {}", style(name).bold(), value);
    };

    field(
        "Subject:",
        cert.common_name()
            .map(str::to_string)
            .unwrap_or_else(|| cert.subject.to_string()),
    );
    field(
        "Issuer:",
        cert.issuer_common_name()
            .map(str::to_string)
            .unwrap_or_else(|| cert.issuer.to_string()),
    );
    field(
        "Not Before:",
        cert.not_before.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    field(
        "Not After:",
        cert.not_after.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    field("Serial Number:", cert.serial.clone());
    field("Signature Algorithm:", cert.signature_algorithm.to_string());

    let key = &cert.public_key;
    let key_info = if key.size_bits > 0 {
        format!("{} ({} bits)", key.algorithm, key.size_bits)
    } else {
        key.algorithm.to_string()
    };
    field("Public Key:", key_info);

    if !cert.san_dns.is_empty() {
        println!();
        println!(
            "{}",
            style(format!("Subject Alternative Names ({}):", cert.san_dns.len())).bold()
        );
        for san in &cert.san_dns {
            println!("  {} {}", style("•").cyan(), san);
        }
    }

    if verbose {
        println!();
        field("Version:", format!("v{}", cert.version));
        field("Self-Signed:", yes_no(cert.is_self_signed()));
        field("Is CA:", yes_no(cert.is_ca()));
        if let Some(ku) = cert.key_usage {
            field("Key Usage:", ku.names().join(", "));
        }
        if !cert.extended_key_usage.is_empty() {
            field("Extended Key Usage:", cert.extended_key_usage.join(", "));
        }
        field("SHA-256 Fingerprint:", cert.fingerprint());
    }
}

/// Print a chain as a leaf-to-root tree
pub fn print_chain(chain: &[Certificate]) {
    print_header("Certificate Chain");

    let last = chain.len().saturating_sub(1);
    for (i, cert) in chain.iter().enumerate() {
        let level = if i == 0 {
            "Leaf".to_string()
        } else if i < last {
            format!("Intermediate {}", i)
        } else {
            "Root".to_string()
        };

        println!(
            "  {} {}",
            style(format!("{}:", level)).bold(),
            cert.common_name().unwrap_or("Unknown")
        );
        println!(
            "    {} Issued by: {}",
            style("└").dim(),
            cert.issuer_common_name().unwrap_or("Unknown")
        );
        println!(
            "    {} Valid until: {}",
            style("└").dim(),
            cert.not_after.format("%Y-%m-%d")
        );
    }
}

/// Print a validation verdict and its audit trail
pub fn print_validation(result: &ValidationResult, show_warnings: bool) {
    print_header("Validation");

    for entry in &result.entries {
        let line = entry.to_string();
        match entry.level {
            AuditLevel::Info => print_pass(&line),
            AuditLevel::Warning if show_warnings => print_warning(&line),
            AuditLevel::Warning => {}
            AuditLevel::Failure => print_fail(&line),
        }
    }

    println!();
    println!(
        "  {} {}",
        style("Result:").bold(),
        format_validation_status(result.status)
    );
}

fn format_validation_status(status: ValidationStatus) -> String {
    match status {
        ValidationStatus::Valid => style("✓ Valid").green().bold().to_string(),
        ValidationStatus::Warning => style("⚠ Warning").yellow().bold().to_string(),
        ValidationStatus::Invalid => style("✗ Invalid").red().bold().to_string(),
    }
}

/// Print batch check summary
pub fn print_batch_summary(results: &[HostCheckResult]) {
    let count = |status: CertificateStatus| results.iter().filter(|r| r.status == status).count();

    print_header("Summary");
    println!("  Total hosts checked: {}", style(results.len()).bold());
    println!("  Valid: {}", style(count(CertificateStatus::Valid)).green());
    println!(
        "  Expiring soon: {}",
        style(count(CertificateStatus::Warning)).yellow()
    );
    println!("  Expired: {}", style(count(CertificateStatus::Expired)).red());
    println!("  Errors: {}", style(count(CertificateStatus::Error)).red());
}

/// Print success message
pub fn print_success(message: &str) {
    print_pass(message);
}

/// Print error message
pub fn print_error(message: &str) {
    print_fail(message);
}

/// Print a note
pub fn print_note(message: &str) {
    print_info(message);
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}
