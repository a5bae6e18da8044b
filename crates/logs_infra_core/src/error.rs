//! Validation errors raised while building descriptors.

use thiserror::Error;

/// Raised before any descriptor reaches the provisioning engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("retention_days must be a positive integer, got {0}")]
    NonPositiveRetention(i64),

    #[error("retention_days {0} exceeds the maximum of {} days", u32::MAX)]
    RetentionOutOfRange(i64),

    #[error("invalid environment label '{label}': {reason}")]
    InvalidEnvironment { label: String, reason: String },

    #[error("invalid account id '{0}': expected 12 digits")]
    InvalidAccountId(String),

    #[error("invalid stack id '{0}'")]
    InvalidStackId(String),

    #[error("invalid bucket name '{name}': {reason}")]
    InvalidBucketName { name: String, reason: String },

    #[error("table schema must declare at least one column")]
    NoColumns,

    #[error("column name must not be empty")]
    EmptyColumnName,

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("invalid partition key '{name}': {reason}")]
    InvalidPartitionKey { name: String, reason: String },

    #[error("duplicate partition key '{0}'")]
    DuplicatePartitionKey(String),

    #[error("partition key '{0}' shadows a column of the same name")]
    PartitionKeyShadowsColumn(String),

    #[error("projection range for '{key}' is empty: min {min} must be below max {max}")]
    EmptyProjectionRange { key: String, min: i64, max: i64 },

    #[error("location template '{template}' does not match partition keys: {reason}")]
    LocationTemplateMismatch { template: String, reason: String },
}

impl ConfigurationError {
    pub(crate) fn template_mismatch(template: &str, reason: impl Into<String>) -> Self {
        Self::LocationTemplateMismatch {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}
