//! Column and partition layout of the access-log table.
//!
//! [`LogTableSchema`] is the only place the layout is declared. Column
//! descriptors, partition key descriptors, projection rules and the storage
//! location template are all derived from it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::projection::{PartitionProjectionRule, ProjectionRange};

/// CloudFront standard access log fields, in file order.
pub const CLOUDFRONT_ACCESS_LOG_FIELDS: [&str; 36] = [
    "timestamp",
    "DistributionId",
    "date",
    "time",
    "x_edge_location",
    "sc_bytes",
    "c_ip",
    "cs_method",
    "cs_Host",
    "cs_uri_stem",
    "sc_status",
    "cs_Referer",
    "cs_User_Agent",
    "cs_uri_query",
    "cs_Cookie",
    "x_edge_result_type",
    "x_edge_request_id",
    "x_host_header",
    "cs_protocol",
    "cs_bytes",
    "time_taken",
    "x_forwarded_for",
    "ssl_protocol",
    "ssl_cipher",
    "x_edge_response_result_type",
    "cs_protocol_version",
    "fle_status",
    "fle_encrypted_fields",
    "c_port",
    "time_to_first_byte",
    "x_edge_detailed_result_type",
    "sc_content_type",
    "sc_content_len",
    "sc_range_start",
    "sc_range_end",
    "timestamp_ms",
];

/// Characters that would break a `key=${key}/` path segment.
const RESERVED_KEY_CHARS: [char; 5] = ['/', '=', '$', '{', '}'];

/// Hourly partitions with the ranges the query engine projects over.
pub const HOURLY_PARTITIONS: [(&str, i64, i64); 4] = [
    ("year", 2020, 2030),
    ("month", 1, 12),
    ("day", 1, 31),
    ("hour", 0, 23),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Integer,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::String)
    }
}

/// An integer partition key together with its projection range.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PartitionKey {
    pub name: String,
    pub range: ProjectionRange,
}

impl PartitionKey {
    pub fn integer(name: impl Into<String>, min: i64, max: i64) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let range = ProjectionRange::new(&name, min, max)?;
        Ok(Self { name, range })
    }

    pub fn descriptor(&self) -> ColumnDescriptor {
        ColumnDescriptor::new(self.name.clone(), ColumnType::Integer)
    }

    pub fn projection_rule(&self) -> PartitionProjectionRule {
        PartitionProjectionRule::integer_range(self.name.clone(), self.range)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LogTableSchema {
    columns: Vec<ColumnDescriptor>,
    partition_keys: Vec<PartitionKey>,
}

impl LogTableSchema {
    /// Checks that column names are unique, partition key names are unique,
    /// and no partition key reuses a column name. Names compare
    /// case-insensitively because catalog engines fold identifiers.
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        partition_keys: Vec<PartitionKey>,
    ) -> Result<Self, ConfigurationError> {
        if columns.is_empty() {
            return Err(ConfigurationError::NoColumns);
        }

        let mut column_names = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.name.trim().is_empty() {
                return Err(ConfigurationError::EmptyColumnName);
            }
            if !column_names.insert(column.name.to_ascii_lowercase()) {
                return Err(ConfigurationError::DuplicateColumn(column.name.clone()));
            }
        }

        let mut key_names = HashSet::with_capacity(partition_keys.len());
        for key in &partition_keys {
            if key.name.trim().is_empty() {
                return Err(ConfigurationError::EmptyColumnName);
            }
            validate_partition_key_name(&key.name)?;
            let folded = key.name.to_ascii_lowercase();
            if column_names.contains(&folded) {
                return Err(ConfigurationError::PartitionKeyShadowsColumn(
                    key.name.clone(),
                ));
            }
            if !key_names.insert(folded) {
                return Err(ConfigurationError::DuplicatePartitionKey(key.name.clone()));
            }
        }

        Ok(Self {
            columns,
            partition_keys,
        })
    }

    /// CloudFront access logs partitioned by year/month/day/hour.
    pub fn cloudfront_access_logs() -> Result<Self, ConfigurationError> {
        let columns = CLOUDFRONT_ACCESS_LOG_FIELDS
            .iter()
            .map(|name| ColumnDescriptor::string(*name))
            .collect();
        let partition_keys = HOURLY_PARTITIONS
            .iter()
            .map(|(name, min, max)| PartitionKey::integer(*name, *min, *max))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns, partition_keys)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn partition_keys(&self) -> &[PartitionKey] {
        &self.partition_keys
    }

    pub fn partition_key_names(&self) -> Vec<&str> {
        self.partition_keys
            .iter()
            .map(|key| key.name.as_str())
            .collect()
    }

    pub fn partition_descriptors(&self) -> Vec<ColumnDescriptor> {
        self.partition_keys
            .iter()
            .map(PartitionKey::descriptor)
            .collect()
    }

    pub fn projection_rules(&self) -> Vec<PartitionProjectionRule> {
        self.partition_keys
            .iter()
            .map(PartitionKey::projection_rule)
            .collect()
    }
}

/// Partition key names become path segments and placeholders in the
/// location template.
pub fn validate_partition_key_name(name: &str) -> Result<(), ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidPartitionKey {
        name: name.to_string(),
        reason,
    };

    if let Some(reserved) = name.chars().find(|ch| RESERVED_KEY_CHARS.contains(ch)) {
        return Err(invalid(format!("must not contain '{reserved}'")));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace".to_string()));
    }
    Ok(())
}
