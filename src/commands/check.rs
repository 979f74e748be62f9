//! Check command implementation

use crate::checks::{ChainValidator, TrustStore};
use crate::cli::{CheckArgs, OutputFormat};
use crate::config::{load_config, HostConfig};
use crate::output::{self, print_host_result};
use crate::runner::{CheckEvent, CheckSettings, HostChecker};
use crate::utils::progress::{create_spinner, ProgressTracker};
use anyhow::{bail, Context, Result};
use std::sync::Arc;

/// Run the check command
pub async fn run_check(args: CheckArgs) -> Result<i32> {
    let config = load_config(args.config.as_deref()).context("Error loading config")?;
    let mut settings = config.settings.clone();

    if let Some(timeout) = args.timeout {
        if !(1..=300).contains(&timeout) {
            bail!("--timeout must be between 1 and 300 seconds");
        }
        settings.timeout = timeout;
    }
    if let Some(parallel) = args.parallel {
        settings.parallel = parallel.max(1);
    }
    settings.verify_chain |= args.verify_chain;

    let hosts: Vec<HostConfig> = match &args.host {
        Some(fqdn) => {
            let port = args.port.unwrap_or(settings.default_port);
            let mut host = HostConfig::new(fqdn.clone(), fqdn.clone(), port);
            if let Some(days) = args.warning_days {
                host = host.with_warning_days(days);
            }
            vec![host]
        }
        None => config
            .enabled_hosts()
            .into_iter()
            .map(|host| match args.warning_days {
                Some(days) => host.with_warning_days(days),
                None => host,
            })
            .collect(),
    };

    if hosts.is_empty() {
        bail!("Either --config or --host must be provided");
    }

    let mut check_settings = CheckSettings::from(&settings);
    if settings.verify_chain {
        let truststore_path = args.truststore.as_ref().or(config.stores.truststore.as_ref());
        let truststore = match truststore_path {
            Some(path) => Some(Arc::new(TrustStore::from_pem_file(path)?)),
            None => None,
        };
        check_settings = check_settings.with_validator(ChainValidator::new(truststore));
    }

    let checker = HostChecker::new(check_settings)?;
    let format = args.output_format();

    let results = if let [host] = hosts.as_slice() {
        let spinner = (format == OutputFormat::Table)
            .then(|| create_spinner(&format!("Checking {}:{}...", host.fqdn, host.port)));
        let result = checker.check_host_config(host).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        vec![result]
    } else if format == OutputFormat::Table {
        let progress = ProgressTracker::new(hosts.len() as u64);
        let on_event = |event: CheckEvent| match event {
            CheckEvent::HostStarted { host_name, .. } => progress.host_started(&host_name),
            CheckEvent::HostCompleted {
                host_name, status, ..
            } => progress.host_completed(&host_name, status),
        };
        let results = checker.check_all_hosts_with_events(&hosts, &on_event).await;
        progress.finish_and_clear();
        results
    } else {
        checker.check_all_hosts(&hosts).await
    };

    match format {
        OutputFormat::Json => output::print_json(&results)?,
        OutputFormat::Csv => println!("{}", output::to_csv(&results)),
        OutputFormat::Table => {
            if let [result] = results.as_slice() {
                print_host_result(result, args.verbose);
                if args.verbose {
                    if let Some(validation) = &result.chain_validation {
                        output::print_validation(validation, settings.show_warnings);
                    }
                }
            } else {
                output::print_summary_table(&results);
                output::print_batch_summary(&results);

                if args.verbose {
                    println!();
                    for result in &results {
                        print_host_result(result, true);
                    }
                }
            }
        }
    }

    Ok(0)
}
