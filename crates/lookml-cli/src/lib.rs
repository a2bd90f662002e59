//! CLI library components for the LookML view generator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
