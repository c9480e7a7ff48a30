//! Shared utilities for the rollup crates.
//!
//! This crate provides the Polars `AnyValue` helpers used by the engine, the
//! CSV loader and the CLI: null testing and display formatting.

pub mod polars;

pub use polars::{any_to_string, is_null_value};
