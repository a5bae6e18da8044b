use serde::Serialize;
use tracing::debug;

use crate::config::{validate_environment, validate_retention_days};
use crate::error::ConfigurationError;

pub const BUCKET_NAME_SUFFIX: &str = "cdk-example";
pub const MIN_BUCKET_NAME_LEN: usize = 3;
pub const MAX_BUCKET_NAME_LEN: usize = 63;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BucketEncryption {
    /// Server-side encryption with keys the storage service manages.
    S3Managed,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BlockPublicAccess {
    BlockAll,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Kept when the stack is deleted or the resource replaced.
    Retain,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LifecycleRule {
    pub id: String,
    pub expiration_days: u32,
}

impl LifecycleRule {
    pub fn expire_after_days(expiration_days: u32) -> Self {
        Self {
            id: format!("DeleteLogsAfter{expiration_days}Days"),
            expiration_days,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StorageContainerSpec {
    pub bucket_name: String,
    pub versioned: bool,
    pub encryption: BucketEncryption,
    pub lifecycle_rules: Vec<LifecycleRule>,
    pub block_public_access: BlockPublicAccess,
    pub removal_policy: RemovalPolicy,
}

pub fn bucket_name(environment: &str) -> String {
    format!("{environment}-logs-{BUCKET_NAME_SUFFIX}")
}

pub fn build_storage_container(
    environment: &str,
    retention_days: i64,
) -> Result<StorageContainerSpec, ConfigurationError> {
    let expiration_days = validate_retention_days(retention_days)?;
    validate_environment(environment)?;

    let bucket_name = bucket_name(environment);
    validate_bucket_name(&bucket_name)?;

    debug!(%bucket_name, expiration_days, "built storage container spec");
    Ok(StorageContainerSpec {
        bucket_name,
        versioned: true,
        encryption: BucketEncryption::S3Managed,
        lifecycle_rules: vec![LifecycleRule::expire_after_days(expiration_days)],
        block_public_access: BlockPublicAccess::BlockAll,
        removal_policy: RemovalPolicy::Retain,
    })
}

pub fn validate_bucket_name(name: &str) -> Result<(), ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::InvalidBucketName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&name.len()) {
        return Err(invalid("length must be between 3 and 63 characters"));
    }
    if !name.bytes().all(|byte| {
        byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' || byte == b'.'
    }) {
        return Err(invalid(
            "may only contain lowercase letters, digits, dots and hyphens",
        ));
    }
    let bytes = name.as_bytes();
    let alnum = |byte: u8| byte.is_ascii_lowercase() || byte.is_ascii_digit();
    if !alnum(bytes[0]) || !alnum(bytes[bytes.len() - 1]) {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(())
}
