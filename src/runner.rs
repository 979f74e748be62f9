//! Check orchestration engine
//!
//! Composes the fetcher and the individual checks into one result per host,
//! and runs batches of hosts with bounded parallelism. Every failure during a
//! host check is captured in that host's result; nothing escapes the batch.

use crate::checks::{
    decide_host_status, expiration, hostname, ChainValidator, HostVerdicts, TlsChainFetcher,
};
use crate::config::{HostConfig, Settings};
use crate::models::{Certificate, CertificateStatus, HostCheckResult};
use crate::utils::{FetchError, ToolkitError};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// Inputs for a check run
#[derive(Debug, Clone)]
pub struct CheckSettings {
    /// Default per-host deadline on resolve, connect and handshake
    pub timeout: Duration,
    /// Maximum number of hosts checked concurrently
    pub parallel: usize,
    /// When set, presented chains are validated and a failure forces ERROR
    pub validator: Option<ChainValidator>,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            parallel: 8,
            validator: None,
        }
    }
}

impl From<&Settings> for CheckSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            timeout: settings.timeout(),
            parallel: settings.parallel,
            validator: None,
        }
    }
}

impl CheckSettings {
    pub fn with_validator(mut self, validator: ChainValidator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Events emitted while a batch runs
#[derive(Debug, Clone)]
pub enum CheckEvent {
    HostStarted {
        index: usize,
        host_name: String,
    },
    HostCompleted {
        index: usize,
        host_name: String,
        status: CertificateStatus,
    },
}

/// Runs host checks
#[derive(Debug, Clone)]
pub struct HostChecker {
    fetcher: TlsChainFetcher,
    settings: CheckSettings,
}

impl HostChecker {
    pub fn new(settings: CheckSettings) -> Result<Self, ToolkitError> {
        Ok(Self {
            fetcher: TlsChainFetcher::new()?,
            settings,
        })
    }

    pub fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// Check one endpoint.
    ///
    /// `host_name` defaults to `fqdn` and `timeout` to the configured one.
    pub async fn check_host(
        &self,
        fqdn: &str,
        port: u16,
        warning_days: u32,
        host_name: Option<&str>,
        timeout: Option<Duration>,
    ) -> HostCheckResult {
        let host_name = host_name.unwrap_or(fqdn);
        let timeout = timeout.unwrap_or(self.settings.timeout);

        match self.fetcher.fetch(fqdn, port, timeout).await {
            Ok(chain) => self.evaluate(host_name, fqdn, port, warning_days, chain, Utc::now()),
            Err(e) => {
                tracing::warn!(host = host_name, fqdn, port, "check failed: {}", e);
                HostCheckResult::failed(host_name, fqdn, port, &e)
            }
        }
    }

    /// Check a configured host
    pub async fn check_host_config(&self, host: &HostConfig) -> HostCheckResult {
        self.check_host(
            &host.fqdn,
            host.port,
            host.warning_days,
            Some(&host.name),
            None,
        )
        .await
    }

    /// Analyze a retrieved chain at `now`
    pub fn evaluate(
        &self,
        host_name: &str,
        fqdn: &str,
        port: u16,
        warning_days: u32,
        chain: Vec<Certificate>,
        now: DateTime<Utc>,
    ) -> HostCheckResult {
        let Some(leaf) = chain.first() else {
            return HostCheckResult::failed(host_name, fqdn, port, &FetchError::NoCertificate);
        };

        let expiration = expiration::analyze(leaf, warning_days, now);
        let hostname_valid = hostname::matches(leaf, fqdn);
        let chain_validation = self
            .settings
            .validator
            .as_ref()
            .map(|validator| validator.validate_chain(&chain, true));

        let status = decide_host_status(&HostVerdicts {
            hostname_ok: hostname_valid,
            chain_ok: chain_validation.as_ref().map(|v| v.is_valid),
            expiration: expiration.status,
        });

        tracing::debug!(
            host = host_name,
            %status,
            days_remaining = expiration.days_remaining,
            hostname_valid,
            "host evaluated"
        );

        HostCheckResult::checked(
            host_name,
            fqdn,
            port,
            status,
            chain,
            expiration,
            hostname_valid,
            chain_validation,
        )
    }

    /// Check every enabled host, returning results in input order
    pub async fn check_all_hosts(&self, hosts: &[HostConfig]) -> Vec<HostCheckResult> {
        self.check_all_hosts_with_events(hosts, &|_| {}).await
    }

    /// Check every enabled host, reporting progress through `on_event`.
    ///
    /// Each host runs in its own task; a task that panics yields an ERROR
    /// result for that host only.
    pub async fn check_all_hosts_with_events(
        &self,
        hosts: &[HostConfig],
        on_event: &dyn Fn(CheckEvent),
    ) -> Vec<HostCheckResult> {
        let enabled: Vec<HostConfig> = hosts.iter().filter(|h| h.enabled).cloned().collect();
        let parallel = self.settings.parallel.max(1);

        tracing::debug!(hosts = enabled.len(), parallel, "starting batch");

        let mut results: Vec<(usize, HostCheckResult)> = stream::iter(enabled.into_iter().enumerate())
            .map(|(index, host)| {
                on_event(CheckEvent::HostStarted {
                    index,
                    host_name: host.name.clone(),
                });

                let checker = self.clone();
                async move {
                    let (name, fqdn, port) = (host.name.clone(), host.fqdn.clone(), host.port);
                    let handle =
                        tokio::spawn(async move { checker.check_host_config(&host).await });

                    let result = match handle.await {
                        Ok(result) => result,
                        Err(e) => {
                            tracing::warn!(host = %name, "check task failed: {}", e);
                            HostCheckResult::failed(
                                name,
                                fqdn,
                                port,
                                &FetchError::unexpected(e.to_string()),
                            )
                        }
                    };
                    (index, result)
                }
            })
            .buffer_unordered(parallel)
            .inspect(|(index, result)| {
                on_event(CheckEvent::HostCompleted {
                    index: *index,
                    host_name: result.host_name.clone(),
                    status: result.status,
                })
            })
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}
