//! # cgraph Common
//!
//! Shared types, errors, utilities, and logging for the cgraph charting engine.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: the error taxonomy every public operation reports through,
//! the newtypes naming content keys and axes, and the logging bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
