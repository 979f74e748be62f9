//! Command implementations for cert-checker

pub mod check;
pub mod inspect;
pub mod validate;

pub use check::run_check;
pub use inspect::run_inspect;
pub use validate::run_validate;
