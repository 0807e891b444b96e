// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Tolerant readers for backend payloads. A field of the wrong shape reads
//! as its empty value instead of failing the whole payload.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |current, key| current.get(*key))
}

/// Non-array values read as an empty list; elements that do not decode are
/// skipped.
pub fn list<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Strings pass through, numbers and booleans are rendered, blanks are `None`.
pub fn text(value: Option<&Value>) -> Option<String> {
    let rendered = match value? {
        Value::String(raw) => raw.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    if rendered.trim().is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Integral view of a JSON number or numeric string, rounded half away
/// from zero.
pub fn number(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(round_f64)),
        Value::String(raw) => raw.trim().parse::<f64>().ok().and_then(round_f64),
        _ => None,
    }
}

pub fn decimal(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|parsed| parsed.is_finite())
}

pub fn flag(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

fn round_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Some(value.round() as i64)
    } else {
        None
    }
}

pub fn de_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(list(Some(&value)))
}

pub fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(Some(&value)).unwrap_or(0))
}

pub fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(Some(&value)))
}

pub fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal(Some(&value)).unwrap_or(0.0))
}

pub fn de_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flag(Some(&value)))
}

pub fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(Some(&value)).unwrap_or_default())
}

pub fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(Some(&value)))
}

#[cfg(test)]
mod tests {
    use super::{decimal, flag, list, number, path, text};
    use serde_json::json;

    #[test]
    fn list_treats_non_arrays_as_empty() {
        let value = json!({"items": "nope", "other": null});
        assert!(list::<String>(value.get("items")).is_empty());
        assert!(list::<String>(value.get("other")).is_empty());
        assert!(list::<String>(value.get("missing")).is_empty());
    }

    #[test]
    fn list_skips_elements_of_the_wrong_shape() {
        let value = json!(["a", 1, "b", null]);
        assert_eq!(list::<String>(Some(&value)), vec!["a", "b"]);
    }

    #[test]
    fn number_accepts_floats_and_numeric_strings() {
        assert_eq!(number(Some(&json!(42))), Some(42));
        assert_eq!(number(Some(&json!(41.6))), Some(42));
        assert_eq!(number(Some(&json!(" 7 "))), Some(7));
        assert_eq!(number(Some(&json!("seven"))), None);
        assert_eq!(number(Some(&json!(null))), None);
        assert_eq!(decimal(Some(&json!("12.5"))), Some(12.5));
    }

    #[test]
    fn text_drops_blanks_and_structures() {
        assert_eq!(text(Some(&json!("WAITING"))), Some("WAITING".to_owned()));
        assert_eq!(text(Some(&json!("   "))), None);
        assert_eq!(text(Some(&json!({"a": 1}))), None);
        assert_eq!(text(Some(&json!(12))), Some("12".to_owned()));
    }

    #[test]
    fn path_walks_nested_objects() {
        let value = json!({"CronJobDetail": {"Name": "Nightly sync"}});
        assert_eq!(
            path(&value, &["CronJobDetail", "Name"]),
            Some(&json!("Nightly sync"))
        );
        assert_eq!(path(&value, &["CronJobDetail", "Missing"]), None);
        assert_eq!(path(&json!("flat"), &["CronJobDetail", "Name"]), None);
    }

    #[test]
    fn flag_only_accepts_true() {
        assert!(flag(Some(&json!(true))));
        assert!(!flag(Some(&json!("true"))));
        assert!(!flag(None));
    }
}
