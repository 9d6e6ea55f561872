//! # cgraph Config
//!
//! Consumer configuration for the cgraph charting engine.
//!
//! Consumer input is deserialized into the `*Input` schema types, validated,
//! and deep-cloned into the runtime [`GraphConfig`] that a graph instance owns
//! and mutates for the rest of its lifetime. Content (data series)
//! configuration goes through the same validate-then-clone path.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod content;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use content::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
