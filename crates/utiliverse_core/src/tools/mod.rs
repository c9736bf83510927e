//! Pure tool computations.
//!
//! # Responsibility
//! - Hold the formulas and encoders behind every tool page.
//! - Stay free of storage; remembered inputs live in [`crate::service`].

pub mod age;
pub mod bmi;
pub mod debounce;
pub mod platform;
pub mod qr;
pub mod units;
