//! CLI library components for mapvis.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
