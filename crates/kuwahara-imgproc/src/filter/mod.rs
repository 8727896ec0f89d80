//! Filter operations
//!
//! This module provides the Kuwahara-style edge-preserving filter and the
//! building blocks it is made of.

/// Candidate windows evaluated around each pixel.
mod window;
pub use window::*;

/// Window selection and the filter itself.
mod kuwahara;
pub use kuwahara::*;
