use serde::Serialize;
use tracing::info;

use crate::catalog::{
    build_catalog_database, build_catalog_table, CatalogDatabaseSpec, CatalogId, CatalogTableSpec,
};
use crate::config::StackConfig;
use crate::container::{build_storage_container, StorageContainerSpec};
use crate::error::ConfigurationError;
use crate::schema::LogTableSchema;

/// Everything one stack declares, ready to hand to a provisioning engine.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DescriptorSet {
    pub stack_id: String,
    pub container: StorageContainerSpec,
    pub database: CatalogDatabaseSpec,
    pub table: CatalogTableSpec,
}

pub fn build_descriptor_set(config: &StackConfig) -> Result<DescriptorSet, ConfigurationError> {
    let schema = LogTableSchema::cloudfront_access_logs()?;
    build_descriptor_set_with_schema(config, &schema)
}

pub fn build_descriptor_set_with_schema(
    config: &StackConfig,
    schema: &LogTableSchema,
) -> Result<DescriptorSet, ConfigurationError> {
    config.validate()?;

    let container = build_storage_container(&config.environment, config.retention_days)?;
    let catalog_id = CatalogId::from_account(config.account_id.as_deref())?;
    let database = build_catalog_database(catalog_id, &config.environment)?;
    let table = build_catalog_table(&database, &container, schema)?;

    info!(
        stack_id = %config.stack_id,
        bucket = %container.bucket_name,
        database = %database.name,
        columns = table.storage.columns.len(),
        partition_keys = table.partition_keys.len(),
        "assembled descriptor set"
    );
    Ok(DescriptorSet {
        stack_id: config.stack_id.clone(),
        container,
        database,
        table,
    })
}
