//! Subcommand implementations.
//!
//! Each module owns its clap arguments and a `run` handler that drives one
//! tool service. Handlers print results to stdout and return rejected
//! input as a [`utiliverse_core::ServiceError`] for `main` to report.

pub mod age;
pub mod bmi;
pub mod cache;
pub mod catalog;
pub mod convert;
pub mod qr;

use utiliverse_core::Notice;

/// Prints a transient notice; degraded actions go to stderr.
pub fn print_notice(notice: Notice) {
    if notice.is_failure() {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
}
