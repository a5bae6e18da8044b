use logs_infra_core::catalog::{build_catalog_database, build_catalog_table, CatalogId};
use logs_infra_core::container::build_storage_container;
use logs_infra_core::schema::{ColumnDescriptor, LogTableSchema, PartitionKey, HOURLY_PARTITIONS};
use logs_infra_core::synth::descriptor_fingerprint;
use logs_infra_core::{build_descriptor_set, ConfigurationError, StackConfig};

fn config_for(environment: &str) -> StackConfig {
    StackConfig {
        environment: environment.to_string(),
        ..Default::default()
    }
}

fn hourly_keys() -> Vec<PartitionKey> {
    HOURLY_PARTITIONS
        .iter()
        .map(|(name, min, max)| PartitionKey::integer(*name, *min, *max).expect("valid key"))
        .collect()
}

#[test]
fn development_scenario_names_every_resource() {
    let set = build_descriptor_set(&config_for("development")).expect("set should build");

    assert_eq!(set.container.bucket_name, "development-logs-cdk-example");
    assert_eq!(set.database.name, "development-logs");
    assert_eq!(
        set.table.storage.location,
        "s3://development-logs-cdk-example/"
    );
    assert_eq!(
        set.table.location_template,
        "s3://development-logs-cdk-example/year=${year}/month=${month}/day=${day}/hour=${hour}/"
    );
}

#[test]
fn names_follow_any_valid_environment_label() {
    for environment in ["development", "staging", "production", "qa-2", "x", "eu-west-1"] {
        let set = build_descriptor_set(&config_for(environment)).expect("set should build");
        assert_eq!(
            set.container.bucket_name,
            format!("{environment}-logs-cdk-example")
        );
        assert_eq!(set.database.name, format!("{environment}-logs"));
        assert_eq!(
            set.table.location_template,
            format!(
                "s3://{environment}-logs-cdk-example/year=${{year}}/month=${{month}}/day=${{day}}/hour=${{hour}}/"
            )
        );
    }
}

#[test]
fn zero_retention_fails_with_configuration_error() {
    let config = StackConfig {
        retention_days: 0,
        ..Default::default()
    };
    let error = build_descriptor_set(&config).expect_err("retention 0 should fail");
    assert_eq!(error, ConfigurationError::NonPositiveRetention(0));
    assert_eq!(
        error.to_string(),
        "retention_days must be a positive integer, got 0"
    );
}

#[test]
fn retention_flows_into_lifecycle_rule() {
    let config = StackConfig {
        retention_days: 7,
        ..Default::default()
    };
    let set = build_descriptor_set(&config).expect("set should build");
    assert_eq!(set.container.lifecycle_rules.len(), 1);
    assert_eq!(set.container.lifecycle_rules[0].expiration_days, 7);
    assert_eq!(set.container.lifecycle_rules[0].id, "DeleteLogsAfter7Days");
}

#[test]
fn building_twice_yields_identical_sets() {
    let config = StackConfig {
        account_id: Some("123456789012".to_string()),
        ..Default::default()
    };
    let first = build_descriptor_set(&config).expect("set should build");
    let second = build_descriptor_set(&config).expect("set should build");

    assert_eq!(first, second);
    assert_eq!(descriptor_fingerprint(&first), descriptor_fingerprint(&second));
}

#[test]
fn unique_columns_never_raise_duplicate_errors() {
    for count in 1..=40 {
        let columns: Vec<ColumnDescriptor> = (0..count)
            .map(|index| ColumnDescriptor::string(format!("field_{index}")))
            .collect();
        let result = LogTableSchema::new(columns, hourly_keys());
        assert!(result.is_ok(), "{count} unique columns should pass");
    }
}

#[test]
fn introducing_a_duplicate_column_raises() {
    let mut columns: Vec<ColumnDescriptor> = (0..5)
        .map(|index| ColumnDescriptor::string(format!("field_{index}")))
        .collect();
    columns.push(ColumnDescriptor::string("field_2"));

    let error = LogTableSchema::new(columns, hourly_keys()).expect_err("duplicate should fail");
    assert_eq!(
        error,
        ConfigurationError::DuplicateColumn("field_2".to_string())
    );
}

#[test]
fn hourly_projection_ranges_are_valid_and_inverted_ones_fail() {
    for (name, min, max) in HOURLY_PARTITIONS {
        PartitionKey::integer(name, min, max).expect("reference range should pass");
        let error = PartitionKey::integer(name, max, min).expect_err("inverted range should fail");
        assert_eq!(
            error,
            ConfigurationError::EmptyProjectionRange {
                key: name.to_string(),
                min: max,
                max: min,
            }
        );
        PartitionKey::integer(name, min, min).expect_err("single-point range should fail");
    }
}

#[test]
fn table_parameters_enable_projection_for_each_key() {
    let container = build_storage_container("development", 60).expect("container");
    let database = build_catalog_database(CatalogId::CurrentAccount, "development").expect("db");
    let schema = LogTableSchema::cloudfront_access_logs().expect("schema");
    let table = build_catalog_table(&database, &container, &schema).expect("table");

    let expected = [
        ("EXTERNAL", "TRUE"),
        ("projection.enabled", "true"),
        ("projection.year.type", "integer"),
        ("projection.year.range", "2020,2030"),
        ("projection.month.type", "integer"),
        ("projection.month.range", "1,12"),
        ("projection.day.type", "integer"),
        ("projection.day.range", "1,31"),
        ("projection.hour.type", "integer"),
        ("projection.hour.range", "0,23"),
        (
            "storage.location.template",
            "s3://development-logs-cdk-example/year=${year}/month=${month}/day=${day}/hour=${hour}/",
        ),
    ];
    assert_eq!(table.parameters.len(), expected.len());
    for (key, value) in expected {
        assert_eq!(table.parameters[key], value, "parameter {key}");
    }
}

#[test]
fn invalid_account_and_stack_ids_are_rejected() {
    let bad_account = StackConfig {
        account_id: Some("12345".to_string()),
        ..Default::default()
    };
    assert_eq!(
        build_descriptor_set(&bad_account),
        Err(ConfigurationError::InvalidAccountId("12345".to_string()))
    );

    let bad_stack = StackConfig {
        stack_id: "9lives".to_string(),
        ..Default::default()
    };
    assert_eq!(
        build_descriptor_set(&bad_stack),
        Err(ConfigurationError::InvalidStackId("9lives".to_string()))
    );
}
