//! Error types and result aliases for gprettier.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//!
//! The reindenting core itself never fails; every error in this crate comes
//! from the I/O layer (read, write, UTF-8 decoding) and propagates unchanged
//! to the process boundary.

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
