use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::config::{validate_account_id, validate_environment};
use crate::container::StorageContainerSpec;
use crate::error::ConfigurationError;
use crate::location::{base_location, location_template, validate_location_template};
use crate::projection::{projection_parameters, PartitionProjectionRule};
use crate::schema::{ColumnDescriptor, LogTableSchema};

pub const ACCESS_LOGS_TABLE_NAME: &str = "access_logs";
pub const EXTERNAL_TABLE_TYPE: &str = "EXTERNAL_TABLE";
pub const PARQUET_INPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.parquet.MapredParquetInputFormat";
pub const PARQUET_OUTPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.parquet.MapredParquetOutputFormat";
pub const PARQUET_SERDE_LIBRARY: &str =
    "org.apache.hadoop.hive.ql.io.parquet.serde.ParquetHiveSerDe";

/// Logical id the provisioning template uses for the database resource.
pub const DATABASE_LOGICAL_ID: &str = "GlueDatabase";

/// Owner of the catalog. `CurrentAccount` is resolved by the provisioning
/// engine at deploy time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum CatalogId {
    Account(String),
    CurrentAccount,
}

impl CatalogId {
    pub fn from_account(account_id: Option<&str>) -> Result<Self, ConfigurationError> {
        match account_id {
            Some(account_id) => {
                validate_account_id(account_id)?;
                Ok(Self::Account(account_id.to_string()))
            }
            None => Ok(Self::CurrentAccount),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogDatabaseSpec {
    pub catalog_id: CatalogId,
    pub name: String,
}

impl CatalogDatabaseSpec {
    pub fn reference(&self) -> DatabaseRef {
        DatabaseRef {
            logical_id: DATABASE_LOGICAL_ID.to_string(),
            name: self.name.clone(),
        }
    }
}

/// Points a table at the database it is registered in.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatabaseRef {
    pub logical_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SerdeInfo {
    pub serialization_library: String,
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StorageDescriptor {
    pub columns: Vec<ColumnDescriptor>,
    pub location: String,
    pub input_format: String,
    pub output_format: String,
    pub serde_info: SerdeInfo,
}

impl StorageDescriptor {
    pub fn parquet(columns: Vec<ColumnDescriptor>, location: String) -> Self {
        Self {
            columns,
            location,
            input_format: PARQUET_INPUT_FORMAT.to_string(),
            output_format: PARQUET_OUTPUT_FORMAT.to_string(),
            serde_info: SerdeInfo {
                serialization_library: PARQUET_SERDE_LIBRARY.to_string(),
                parameters: BTreeMap::from([(
                    "serialization.format".to_string(),
                    "1".to_string(),
                )]),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogTableSpec {
    pub catalog_id: CatalogId,
    pub database: DatabaseRef,
    pub name: String,
    pub table_type: String,
    pub storage: StorageDescriptor,
    pub partition_keys: Vec<ColumnDescriptor>,
    pub projection_rules: Vec<PartitionProjectionRule>,
    pub location_template: String,
    pub parameters: BTreeMap<String, String>,
}

pub fn database_name(environment: &str) -> String {
    format!("{environment}-logs")
}

pub fn build_catalog_database(
    catalog_id: CatalogId,
    environment: &str,
) -> Result<CatalogDatabaseSpec, ConfigurationError> {
    validate_environment(environment)?;
    let name = database_name(environment);
    debug!(database = %name, "built catalog database spec");
    Ok(CatalogDatabaseSpec { catalog_id, name })
}

/// Builds the table with a location template derived from the schema.
pub fn build_catalog_table(
    database: &CatalogDatabaseSpec,
    container: &StorageContainerSpec,
    schema: &LogTableSchema,
) -> Result<CatalogTableSpec, ConfigurationError> {
    let base = base_location(&container.bucket_name);
    let template = location_template(&base, &schema.partition_key_names());
    build_catalog_table_with_template(database, container, schema, template)
}

/// Builds the table around a caller-supplied location template, which must
/// match the schema's partition keys.
pub fn build_catalog_table_with_template(
    database: &CatalogDatabaseSpec,
    container: &StorageContainerSpec,
    schema: &LogTableSchema,
    location_template: String,
) -> Result<CatalogTableSpec, ConfigurationError> {
    let location = base_location(&container.bucket_name);
    validate_location_template(&location_template, &location, &schema.partition_key_names())?;

    let projection_rules = schema.projection_rules();
    let parameters = projection_parameters(&projection_rules, &location_template);

    debug!(
        table = ACCESS_LOGS_TABLE_NAME,
        database = %database.name,
        %location_template,
        "built catalog table spec"
    );
    Ok(CatalogTableSpec {
        catalog_id: database.catalog_id.clone(),
        database: database.reference(),
        name: ACCESS_LOGS_TABLE_NAME.to_string(),
        table_type: EXTERNAL_TABLE_TYPE.to_string(),
        storage: StorageDescriptor::parquet(schema.columns().to_vec(), location),
        partition_keys: schema.partition_descriptors(),
        projection_rules,
        location_template,
        parameters,
    })
}
