//! CLI library components for the CIN validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
