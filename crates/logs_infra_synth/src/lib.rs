//! Command-line app that synthesizes the log catalog stack template.
//!
//! Owns configuration loading, logging setup and file output. All descriptor
//! construction lives in `logs_infra_core`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
