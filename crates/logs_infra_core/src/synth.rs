//! Renders a [`DescriptorSet`] into a CloudFormation-shaped template.

use serde::Serialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

use crate::catalog::{CatalogDatabaseSpec, CatalogId, CatalogTableSpec, DATABASE_LOGICAL_ID};
use crate::container::{BlockPublicAccess, BucketEncryption, RemovalPolicy, StorageContainerSpec};
use crate::schema::ColumnDescriptor;
use crate::stack::DescriptorSet;

pub const BUCKET_LOGICAL_ID: &str = "LogBucket";
pub const TABLE_LOGICAL_ID: &str = "GlueTable";
pub const TEMPLATE_DESCRIPTION: &str =
    "Versioned log bucket with a partition-projected access log catalog table";

pub fn template_file_name(stack_id: &str) -> String {
    format!("{stack_id}.template.json")
}

pub fn stable_descriptor_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of descriptor value should not fail")
}

/// Identical descriptor sets always produce the same fingerprint.
pub fn descriptor_fingerprint(set: &DescriptorSet) -> String {
    let mut hasher = Sha256::new();
    hasher.update(stable_descriptor_json(set));
    format!("{:x}", hasher.finalize())
}

pub fn render_template(set: &DescriptorSet) -> Value {
    let mut resources = Map::new();
    resources.insert(
        BUCKET_LOGICAL_ID.to_string(),
        render_bucket(&set.container),
    );
    resources.insert(
        DATABASE_LOGICAL_ID.to_string(),
        render_database(&set.database),
    );
    resources.insert(TABLE_LOGICAL_ID.to_string(), render_table(&set.table));

    json!({
        "Description": TEMPLATE_DESCRIPTION,
        "Metadata": {
            "StackId": set.stack_id,
            "DescriptorFingerprint": descriptor_fingerprint(set),
        },
        "Resources": resources,
    })
}

fn render_catalog_id(catalog_id: &CatalogId) -> Value {
    match catalog_id {
        CatalogId::Account(account_id) => Value::from(account_id.as_str()),
        CatalogId::CurrentAccount => json!({ "Ref": "AWS::AccountId" }),
    }
}

fn render_bucket(container: &StorageContainerSpec) -> Value {
    let sse_algorithm = match container.encryption {
        BucketEncryption::S3Managed => "AES256",
    };
    let block_all = match container.block_public_access {
        BlockPublicAccess::BlockAll => true,
    };
    let removal_policy = match container.removal_policy {
        RemovalPolicy::Retain => "Retain",
    };
    let rules: Vec<Value> = container
        .lifecycle_rules
        .iter()
        .map(|rule| {
            json!({
                "Id": rule.id,
                "ExpirationInDays": rule.expiration_days,
                "Status": "Enabled",
            })
        })
        .collect();

    let mut properties = json!({
        "BucketName": container.bucket_name,
        "BucketEncryption": {
            "ServerSideEncryptionConfiguration": [
                { "ServerSideEncryptionByDefault": { "SSEAlgorithm": sse_algorithm } }
            ]
        },
        "LifecycleConfiguration": { "Rules": rules },
        "PublicAccessBlockConfiguration": {
            "BlockPublicAcls": block_all,
            "BlockPublicPolicy": block_all,
            "IgnorePublicAcls": block_all,
            "RestrictPublicBuckets": block_all,
        },
    });
    if container.versioned {
        properties["VersioningConfiguration"] = json!({ "Status": "Enabled" });
    }

    json!({
        "Type": "AWS::S3::Bucket",
        "Properties": properties,
        "UpdateReplacePolicy": removal_policy,
        "DeletionPolicy": removal_policy,
    })
}

fn render_database(database: &CatalogDatabaseSpec) -> Value {
    json!({
        "Type": "AWS::Glue::Database",
        "Properties": {
            "CatalogId": render_catalog_id(&database.catalog_id),
            "DatabaseInput": { "Name": database.name },
        },
    })
}

fn render_columns(columns: &[ColumnDescriptor]) -> Vec<Value> {
    columns
        .iter()
        .map(|column| json!({ "Name": column.name, "Type": column.column_type.as_str() }))
        .collect()
}

fn render_table(table: &CatalogTableSpec) -> Value {
    let storage = &table.storage;
    json!({
        "Type": "AWS::Glue::Table",
        "Properties": {
            "CatalogId": render_catalog_id(&table.catalog_id),
            "DatabaseName": { "Ref": table.database.logical_id },
            "TableInput": {
                "Name": table.name,
                "TableType": table.table_type,
                "StorageDescriptor": {
                    "Columns": render_columns(&storage.columns),
                    "Location": storage.location,
                    "InputFormat": storage.input_format,
                    "OutputFormat": storage.output_format,
                    "SerdeInfo": {
                        "SerializationLibrary": storage.serde_info.serialization_library,
                        "Parameters": storage.serde_info.parameters,
                    },
                },
                "PartitionKeys": render_columns(&table.partition_keys),
                "Parameters": table.parameters,
            },
        },
    })
}
