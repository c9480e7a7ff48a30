//! CLI library components for the rollup tool.

pub mod cli;
pub mod commands;
pub mod logging;
