//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cert-checker")]
#[command(version)]
#[command(about = "Check TLS endpoint certificates and validate certificate chains", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check certificates of configured or ad-hoc hosts
    Check(CheckArgs),

    /// Validate a certificate chain from files
    Validate(ValidateArgs),

    /// Show certificate details from files
    Inspect(InspectArgs),
}

/// Output format for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file with [[hosts]] entries
    #[arg(short, long, value_name = "FILE", conflicts_with = "host")]
    pub config: Option<PathBuf>,

    /// Check a single host instead of a configuration file
    #[arg(long, value_name = "FQDN")]
    pub host: Option<String>,

    /// Port for --host (default: settings.default_port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Connection timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Days before expiry that count as a warning
    #[arg(short, long)]
    pub warning_days: Option<u32>,

    /// Maximum number of hosts checked concurrently
    #[arg(long)]
    pub parallel: Option<usize>,

    /// Validate the presented chain
    #[arg(long)]
    pub verify_chain: bool,

    /// PEM bundle of trust anchors (overrides stores.truststore)
    #[arg(long, value_name = "FILE")]
    pub truststore: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,

    /// Output results as CSV
    #[arg(long)]
    pub csv: bool,

    /// Show SANs and fingerprints
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        }
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Leaf certificate (PEM or DER); extra certificates in the file follow it
    #[arg(long, value_name = "FILE")]
    pub cert: PathBuf,

    /// Intermediate or root certificates, in chain order
    #[arg(long, value_name = "FILE")]
    pub chain: Vec<PathBuf>,

    /// PEM bundle of trust anchors
    #[arg(long, value_name = "FILE")]
    pub truststore: Option<PathBuf>,

    /// Print the full chain
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Certificate files (PEM or DER)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Show extensions and fingerprints
    #[arg(short, long)]
    pub verbose: bool,
}
