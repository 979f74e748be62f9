//! Output formatting module
//!
//! Provides various output formats:
//! - Rich terminal output with colors and tables
//! - JSON export
//! - CSV export

pub mod csv;
pub mod json;
pub mod tables;
pub mod terminal;

pub use self::csv::{to_csv, CSV_HEADER};
pub use json::{print_json, to_json, JsonHostResult};
pub use tables::{print_summary_table, summary_table};
pub use terminal::{
    print_batch_summary, print_certificate, print_chain, print_error, print_header,
    print_host_result, print_note, print_success, print_validation,
};
