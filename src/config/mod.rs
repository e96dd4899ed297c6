//! Configuration module for spritegrid
//!
//! Provides types and parsing for `sgrid.toml` editor configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
