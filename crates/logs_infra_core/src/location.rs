use crate::error::ConfigurationError;

pub fn base_location(bucket_name: &str) -> String {
    format!("s3://{bucket_name}/")
}

pub fn placeholder(key: &str) -> String {
    format!("${{{key}}}")
}

/// One hive-style path segment, e.g. `year=${year}/`.
pub fn partition_segment(key: &str) -> String {
    format!("{key}={}/", placeholder(key))
}

pub fn location_template<S: AsRef<str>>(base: &str, keys: &[S]) -> String {
    let mut template = String::from(base);
    for key in keys {
        template.push_str(&partition_segment(key.as_ref()));
    }
    template
}

/// Checks that `template` is `base` followed by exactly one segment per
/// partition key, in declared order, with each placeholder used once.
pub fn validate_location_template<S: AsRef<str>>(
    template: &str,
    base: &str,
    keys: &[S],
) -> Result<(), ConfigurationError> {
    let Some(remainder) = template.strip_prefix(base) else {
        return Err(ConfigurationError::template_mismatch(
            template,
            format!("must start with base location '{base}'"),
        ));
    };

    for key in keys {
        let key = key.as_ref();
        let occurrences = template.matches(&placeholder(key)).count();
        if occurrences != 1 {
            return Err(ConfigurationError::template_mismatch(
                template,
                format!("placeholder for '{key}' appears {occurrences} times"),
            ));
        }
    }

    let placeholder_count = template.matches("${").count();
    if placeholder_count != keys.len() {
        return Err(ConfigurationError::template_mismatch(
            template,
            format!(
                "found {placeholder_count} placeholders for {} partition keys",
                keys.len()
            ),
        ));
    }

    if !remainder.is_empty() && !remainder.ends_with('/') {
        return Err(ConfigurationError::template_mismatch(
            template,
            "must end with '/'",
        ));
    }

    let segments: Vec<&str> = remainder.split_terminator('/').collect();
    if segments.len() != keys.len() {
        return Err(ConfigurationError::template_mismatch(
            template,
            format!(
                "expected {} path segments after the base location, found {}",
                keys.len(),
                segments.len()
            ),
        ));
    }

    for (position, (segment, key)) in segments.iter().zip(keys).enumerate() {
        let key = key.as_ref();
        let expected = partition_segment(key);
        if expected.trim_end_matches('/') != *segment {
            return Err(ConfigurationError::template_mismatch(
                template,
                format!(
                    "segment {position} is '{segment}', expected '{key}={}'",
                    placeholder(key)
                ),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURLY: [&str; 4] = ["year", "month", "day", "hour"];

    #[test]
    fn builds_hourly_template_in_key_order() {
        let template = location_template(&base_location("development-logs-cdk-example"), &HOURLY);
        assert_eq!(
            template,
            "s3://development-logs-cdk-example/year=${year}/month=${month}/day=${day}/hour=${hour}/"
        );
    }

    #[test]
    fn template_without_keys_is_base_location() {
        let keys: [&str; 0] = [];
        assert_eq!(location_template("s3://b/", &keys), "s3://b/");
        validate_location_template("s3://b/", "s3://b/", &keys).expect("empty key list passes");
    }

    #[test]
    fn generated_template_validates() {
        let base = base_location("logs");
        let template = location_template(&base, &HOURLY);
        validate_location_template(&template, &base, &HOURLY).expect("template should pass");
    }

    #[test]
    fn rejects_reordered_segments() {
        let error = validate_location_template(
            "s3://logs/month=${month}/year=${year}/day=${day}/hour=${hour}/",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("reordered template should fail");
        assert!(error.to_string().contains("segment 0 is 'month=${month}'"));
    }

    #[test]
    fn rejects_missing_and_repeated_placeholders() {
        let missing = validate_location_template(
            "s3://logs/year=${year}/month=${month}/day=${day}/",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("missing hour should fail");
        assert!(missing.to_string().contains("'hour' appears 0 times"));

        let repeated = validate_location_template(
            "s3://logs/year=${year}/month=${month}/day=${day}/hour=${hour}/${hour}/",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("repeated hour should fail");
        assert!(repeated.to_string().contains("'hour' appears 2 times"));
    }

    #[test]
    fn rejects_unknown_placeholder_and_foreign_base() {
        let unknown = validate_location_template(
            "s3://logs/year=${year}/month=${month}/day=${day}/hour=${hour}/minute=${minute}/",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("extra placeholder should fail");
        assert!(unknown.to_string().contains("found 5 placeholders"));

        let foreign = validate_location_template(
            "s3://other/year=${year}/month=${month}/day=${day}/hour=${hour}/",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("wrong base should fail");
        assert!(foreign.to_string().contains("must start with base location"));
    }

    #[test]
    fn rejects_missing_trailing_slash() {
        let error = validate_location_template(
            "s3://logs/year=${year}/month=${month}/day=${day}/hour=${hour}",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("missing trailing slash should fail");
        assert!(error.to_string().contains("must end with '/'"));
    }

    #[test]
    fn rejects_segment_with_mismatched_name() {
        let error = validate_location_template(
            "s3://logs/yr=${year}/month=${month}/day=${day}/hour=${hour}/",
            "s3://logs/",
            &HOURLY,
        )
        .expect_err("renamed segment should fail");
        assert!(error.to_string().contains("segment 0 is 'yr=${year}'"));
    }
}
