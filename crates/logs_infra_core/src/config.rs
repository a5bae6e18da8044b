use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

pub const DEFAULT_STACK_ID: &str = "CdkS3GlueStack";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_RETENTION_DAYS: i64 = 60;
pub const MAX_ENVIRONMENT_LEN: usize = 40;
const ACCOUNT_ID_LEN: usize = 12;

/// Inputs for one descriptor set.
///
/// `account_id` left unset means the catalog belongs to whatever account the
/// provisioning engine deploys into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StackConfig {
    pub stack_id: String,
    pub environment: String,
    pub retention_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_id: DEFAULT_STACK_ID.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            retention_days: DEFAULT_RETENTION_DAYS,
            account_id: None,
        }
    }
}

impl StackConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_stack_id(&self.stack_id)?;
        validate_environment(&self.environment)?;
        validate_retention_days(self.retention_days)?;
        if let Some(account_id) = &self.account_id {
            validate_account_id(account_id)?;
        }
        Ok(())
    }
}

pub fn validate_retention_days(retention_days: i64) -> Result<u32, ConfigurationError> {
    if retention_days <= 0 {
        return Err(ConfigurationError::NonPositiveRetention(retention_days));
    }
    u32::try_from(retention_days)
        .map_err(|_| ConfigurationError::RetentionOutOfRange(retention_days))
}

/// Environment labels end up inside bucket and database names, so they are
/// restricted to lowercase alphanumerics and inner hyphens.
pub fn validate_environment(label: &str) -> Result<(), ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::InvalidEnvironment {
        label: label.to_string(),
        reason: reason.to_string(),
    };

    if label.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if label.len() > MAX_ENVIRONMENT_LEN {
        return Err(invalid("must be at most 40 characters"));
    }
    if !label
        .bytes()
        .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-')
    {
        return Err(invalid(
            "may only contain lowercase letters, digits and hyphens",
        ));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(())
}

pub fn validate_account_id(account_id: &str) -> Result<(), ConfigurationError> {
    if account_id.len() != ACCOUNT_ID_LEN || !account_id.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err(ConfigurationError::InvalidAccountId(account_id.to_string()));
    }
    Ok(())
}

pub fn validate_stack_id(stack_id: &str) -> Result<(), ConfigurationError> {
    let starts_with_letter = stack_id
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic());
    let allowed = stack_id
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    if !starts_with_letter || !allowed {
        return Err(ConfigurationError::InvalidStackId(stack_id.to_string()));
    }
    Ok(())
}
