//! Inspect command implementation

use crate::cert_ops::read_certificates;
use crate::checks::ChainValidator;
use crate::cli::InspectArgs;
use crate::output::{print_certificate, print_header, print_validation};
use anyhow::Result;

/// Print every certificate in the given files with its standalone verdict
pub fn run_inspect(args: InspectArgs) -> Result<i32> {
    let validator = ChainValidator::default();
    let mut all_valid = true;

    for path in &args.files {
        let certs = read_certificates(path)?;
        print_header(&path.display().to_string());

        for cert in &certs {
            print_certificate(cert, args.verbose);

            let result = validator.validate_single(cert);
            all_valid &= result.is_valid;
            print_validation(&result, true);
        }
    }

    Ok(if all_valid { 0 } else { 1 })
}
