//! Validate command implementation

use crate::cert_ops::read_certificates;
use crate::checks::{ChainValidator, TrustStore};
use crate::cli::ValidateArgs;
use crate::output::{
    print_certificate, print_chain, print_error, print_note, print_success, print_validation,
};
use anyhow::Result;
use std::sync::Arc;

/// Run the validate command; exits non-zero when the chain is invalid
pub fn run_validate(args: ValidateArgs) -> Result<i32> {
    let mut chain = read_certificates(&args.cert)?;
    for path in &args.chain {
        chain.extend(read_certificates(path)?);
    }

    let truststore = match &args.truststore {
        Some(path) => Some(Arc::new(TrustStore::from_pem_file(path)?)),
        None => None,
    };
    let use_truststore = truststore.is_some();

    let validator = ChainValidator::new(truststore);
    let result = validator.validate_chain(&chain, use_truststore);

    if !use_truststore {
        print_note("No truststore given, trust anchor not checked");
    }
    if result.is_valid {
        print_success("Certificate chain is valid");
    } else {
        print_error("Certificate chain is INVALID");
    }

    if args.verbose || !result.is_valid {
        print_validation(&result, true);
    }

    if args.verbose {
        if let Some(leaf) = chain.first() {
            print_certificate(leaf, true);
        }
        if chain.len() > 1 {
            print_chain(&chain);
        }
    }

    Ok(if result.is_valid { 0 } else { 1 })
}
