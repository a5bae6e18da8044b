use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

pub const PROJECTION_ENABLED_KEY: &str = "projection.enabled";
pub const LOCATION_TEMPLATE_KEY: &str = "storage.location.template";
pub const EXTERNAL_KEY: &str = "EXTERNAL";

/// Inclusive integer interval a query engine enumerates for one partition key.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProjectionRange {
    min: i64,
    max: i64,
}

impl ProjectionRange {
    pub fn new(key: &str, min: i64, max: i64) -> Result<Self, ConfigurationError> {
        if min >= max {
            return Err(ConfigurationError::EmptyProjectionRange {
                key: key.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Value of the `projection.<key>.range` table parameter.
    pub fn as_parameter(&self) -> String {
        format!("{},{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionType {
    Integer,
}

impl ProjectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PartitionProjectionRule {
    pub key: String,
    pub projection_type: ProjectionType,
    pub range: ProjectionRange,
}

impl PartitionProjectionRule {
    pub fn integer(key: impl Into<String>, min: i64, max: i64) -> Result<Self, ConfigurationError> {
        let key = key.into();
        let range = ProjectionRange::new(&key, min, max)?;
        Ok(Self::integer_range(key, range))
    }

    /// Integer rule over a range that was already checked.
    pub fn integer_range(key: impl Into<String>, range: ProjectionRange) -> Self {
        Self {
            key: key.into(),
            projection_type: ProjectionType::Integer,
            range,
        }
    }

    pub fn type_parameter_key(&self) -> String {
        format!("projection.{}.type", self.key)
    }

    pub fn range_parameter_key(&self) -> String {
        format!("projection.{}.range", self.key)
    }
}

/// Table parameters that turn on partition projection for an external table.
pub fn projection_parameters(
    rules: &[PartitionProjectionRule],
    location_template: &str,
) -> BTreeMap<String, String> {
    let mut parameters = BTreeMap::from([
        (EXTERNAL_KEY.to_string(), "TRUE".to_string()),
        (PROJECTION_ENABLED_KEY.to_string(), "true".to_string()),
        (
            LOCATION_TEMPLATE_KEY.to_string(),
            location_template.to_string(),
        ),
    ]);
    for rule in rules {
        parameters.insert(
            rule.type_parameter_key(),
            rule.projection_type.as_str().to_string(),
        );
        parameters.insert(rule.range_parameter_key(), rule.range.as_parameter());
    }
    parameters
}
