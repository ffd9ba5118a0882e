//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod clear;
pub mod run;
pub mod status;
pub mod validate;

pub use clear::run_clear;
pub use run::run_checks;
pub use status::run_status;
pub use validate::run_validate;
