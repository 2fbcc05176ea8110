use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One raw field of a data row.
///
/// JSON `null` maps to `Null`, numbers to `Number`, RFC 3339 strings to
/// `Date` and any other string to `Text`. A key missing from the row is the
/// "absent" case and is modelled by `DataPoint::get` returning `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    /// Returns the value only when it is a finite number.
    #[must_use]
    pub fn as_finite_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    /// Display text used for category labels.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(value) => value.to_string(),
            Self::Date(time) => {
                if time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0 {
                    time.format("%Y-%m-%d").to_string()
                } else {
                    time.to_rfc3339_opts(SecondsFormat::Secs, true)
                }
            }
            Self::Text(text) => text.clone(),
        }
    }

    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(text) => match DateTime::parse_from_rfc3339(&text) {
                Ok(time) => Self::Date(time.with_timezone(&Utc)),
                Err(_) => Self::Text(text),
            },
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Decimals that cannot be represented as `f64` become `Null`.
impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        value.to_f64().map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Open, ordered mapping from field name to raw value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint {
    fields: IndexMap<String, FieldValue>,
}

impl DataPoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Numeric value of `key`, coerced to `0` when absent or not a finite number.
    #[must_use]
    pub fn numeric(&self, key: &str) -> f64 {
        coerce_numeric(self.get(key))
    }

    /// Label text of `key`; absent fields produce an empty label.
    #[must_use]
    pub fn label(&self, key: &str) -> String {
        self.get(key).map(FieldValue::label).unwrap_or_default()
    }

    /// Converts one JSON row. Non-object rows become empty points.
    #[must_use]
    pub fn from_json_value(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(object) = value else {
            return Self::default();
        };
        Self {
            fields: object
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_json(value)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for DataPoint {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Coercion rule shared by the domain and bar heights.
#[must_use]
pub fn coerce_numeric(value: Option<&FieldValue>) -> f64 {
    value.and_then(FieldValue::as_finite_number).unwrap_or(0.0)
}

/// Parses a JSON array of rows.
pub fn data_points_from_json_str(input: &str) -> ChartResult<Vec<DataPoint>> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse data: {e}")))?;
    let serde_json::Value::Array(rows) = value else {
        return Err(ChartError::InvalidData(
            "data must be a JSON array of rows".to_owned(),
        ));
    };
    Ok(rows.into_iter().map(DataPoint::from_json_value).collect())
}
