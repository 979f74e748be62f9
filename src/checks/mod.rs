//! Check modules for cert-checker
//!
//! This module contains the trust decision engine: expiration, hostname,
//! signature and chain checks, the TLS chain fetcher, and the severity
//! decisions that combine their verdicts.

pub mod chain;
pub mod expiration;
pub mod hostname;
pub mod severity;
pub mod signature;
pub mod ssl;

pub use chain::{ChainValidator, TrustStore};
pub use severity::{decide_chain_status, decide_host_status, ChainVerdicts, HostVerdicts};
pub use ssl::TlsChainFetcher;
