use serde_json::Value;

use crate::calendar::types::JobDescriptor;
use crate::error::AppError;

/// Parse a job list as returned by the gateway or the CLI
///
/// Accepts a bare array, `{"jobs": [...]}` or `{"crons": [...]}`. An object
/// without either key is an empty list. Individual records that don't
/// deserialize are skipped so one bad job can't blank the dashboard.
pub fn parse_jobs_payload(text: &str) -> Result<Vec<JobDescriptor>, AppError> {
    let value: Value = serde_json::from_str(text)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("jobs").or_else(|| map.remove("crons")) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(AppError::parse_error(format!(
                    "Expected a job array, got {}",
                    value_kind(&other)
                )))
            }
        },
        other => {
            return Err(AppError::parse_error(format!(
                "Expected a job list, got {}",
                value_kind(&other)
            )))
        }
    };

    let mut jobs = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<JobDescriptor>(item) {
            Ok(job) => jobs.push(job),
            Err(e) => tracing::warn!(index, "Skipping malformed job record: {}", e),
        }
    }
    Ok(jobs)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_gateway_shape() {
        let jobs = parse_jobs_payload(
            r#"{"jobs":[{"id":"1","name":"Publicar tweet","enabled":true,"schedule":{"kind":"cron","expr":"0 9 * * *","tz":"Europe/Madrid"}}]}"#,
        )
        .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].schedule.expression, "0 9 * * *");
    }

    #[test]
    fn test_cli_shape() {
        let jobs =
            parse_jobs_payload(r#"{"crons":[{"id":"a","name":"x","enabled":false}]}"#).unwrap();
        assert_eq!(jobs.len(), 1);
        assert!(!jobs[0].enabled);
    }

    #[test]
    fn test_bare_array() {
        let jobs = parse_jobs_payload(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_missing_list_is_empty() {
        assert!(parse_jobs_payload("{}").unwrap().is_empty());
        assert!(parse_jobs_payload(r#"{"jobs":null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_records_skipped() {
        let jobs = parse_jobs_payload(r#"[{"id":"ok"},{"name":"no id"},42]"#).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "ok");
    }

    #[test]
    fn test_null_fields_keep_the_record() {
        let jobs = parse_jobs_payload(
            r#"[{"id":"a","name":null,"enabled":true,"schedule":{"expr":"0 9 * * *"}},{"id":"b","enabled":null}]"#,
        )
        .unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].name, "");
        assert!(jobs[0].enabled);
        assert!(!jobs[1].enabled);
    }

    #[test]
    fn test_wrong_shapes_are_parse_errors() {
        assert_eq!(parse_jobs_payload("not json").unwrap_err().code, ErrorCode::ParseError);
        assert_eq!(parse_jobs_payload("\"text\"").unwrap_err().code, ErrorCode::ParseError);
        assert_eq!(
            parse_jobs_payload(r#"{"jobs":{"id":"1"}}"#).unwrap_err().code,
            ErrorCode::ParseError
        );
    }
}
