#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for the filtering operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// integral (prefix-sum) tables and region statistics.
pub mod integral;

/// module containing parallization utilities.
pub mod parallel;

pub use crate::error::FilterError;
