use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use logs_infra_core::StackConfig;
use tracing::debug;

use crate::cli::ConfigArgs;

pub fn load_config_file(path: &Path) -> Result<StackConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("malformed config file '{}'", path.display()))
}

/// Defaults, then the config file, then flags/env overrides.
pub fn resolve_config(args: &ConfigArgs) -> Result<StackConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => StackConfig::default(),
    };

    if let Some(stack_id) = &args.stack_id {
        config.stack_id = stack_id.trim().to_string();
    }
    if let Some(environment) = &args.environment {
        config.environment = environment.trim().to_string();
    }
    if let Some(retention_days) = args.retention_days {
        config.retention_days = retention_days;
    }
    if let Some(account_id) = &args.account_id {
        let account_id = account_id.trim();
        config.account_id = (!account_id.is_empty()).then(|| account_id.to_string());
    }

    debug!(?config, "resolved stack config");
    Ok(config)
}
