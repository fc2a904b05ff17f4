//! Configuration loader and schema types.
//!
//! This module exposes the settings every command receives and helpers to
//! load them from disk.

mod load;
mod schema;

pub use schema::*;
