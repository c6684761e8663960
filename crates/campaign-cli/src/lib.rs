//! CLI library components for the campaign mapping tool.

pub mod cli;
pub mod commands;
pub mod inputs;
pub mod logging;
pub mod summary;
