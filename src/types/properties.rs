use super::{DateValue, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A bare value for the simplified update path, and what a property's default-value
/// accessor reads back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Converts JSON primitives. Objects and arrays are structured payloads, not scalars.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Text form of a non-null scalar. Whole numbers print without a fraction.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }

    /// Short name of the scalar's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "text",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

/// Computed formula result, tagged by its own `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaResult {
    String {
        #[serde(default)]
        string: Option<String>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Boolean {
        #[serde(default)]
        boolean: Option<bool>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
}

impl FormulaResult {
    pub fn as_scalar(&self) -> Scalar {
        match self {
            FormulaResult::String { string } => string.clone().into(),
            FormulaResult::Number { number } => (*number).into(),
            FormulaResult::Boolean { boolean } => (*boolean).into(),
            FormulaResult::Date { date } => date.as_ref().and_then(|d| d.start.clone()).into(),
        }
    }
}

/// Rollup aggregation result, tagged by its own `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupResult {
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    /// Each element is itself a `{type, <type>: ...}` property value.
    Array {
        #[serde(default)]
        array: Vec<Value>,
    },
    String {
        #[serde(default)]
        string: Option<String>,
    },
    Boolean {
        #[serde(default)]
        boolean: Option<bool>,
    },
    Unsupported {
        #[serde(default)]
        unsupported: Value,
    },
    Incomplete {
        #[serde(default)]
        incomplete: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupValue {
    #[serde(flatten)]
    pub result: RollupResult,
    #[serde(default)]
    pub function: Option<String>,
}

impl RollupValue {
    pub fn as_scalar(&self) -> Scalar {
        match &self.result {
            RollupResult::Number { number } => (*number).into(),
            RollupResult::Date { date } => date.as_ref().and_then(|d| d.start.clone()).into(),
            RollupResult::String { string } => string.clone().into(),
            RollupResult::Boolean { boolean } => (*boolean).into(),
            RollupResult::Array { .. }
            | RollupResult::Unsupported { .. }
            | RollupResult::Incomplete { .. } => Scalar::Null,
        }
    }
}

/// Auto-incrementing ID, e.g. `TASK-42`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UniqueIdData {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl fmt::Display for UniqueIdData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, self.number) {
            (Some(prefix), Some(number)) => write!(f, "{}-{}", prefix, number),
            (None, Some(number)) => write!(f, "{}", number),
            (_, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VerificationData {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub verified_by: Option<User>,
    #[serde(default)]
    pub date: Option<DateValue>,
}

/// One related page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationRef {
    #[serde(default)]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_from_json_rejects_structures() {
        assert_eq!(Scalar::from_json(&json!("x")), Some(Scalar::Text("x".into())));
        assert_eq!(Scalar::from_json(&json!(3)), Some(Scalar::Number(3.0)));
        assert_eq!(Scalar::from_json(&json!(null)), Some(Scalar::Null));
        assert_eq!(Scalar::from_json(&json!({"a": 1})), None);
        assert_eq!(Scalar::from_json(&json!([1])), None);
    }

    #[test]
    fn rollup_keeps_function_next_to_result() {
        let wire = json!({"type": "number", "number": 12.5, "function": "sum"});
        let rollup: RollupValue = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(rollup.function.as_deref(), Some("sum"));
        assert_eq!(rollup.as_scalar(), Scalar::Number(12.5));
        assert_eq!(serde_json::to_value(&rollup).unwrap(), wire);
    }

    #[test]
    fn formula_date_exposes_start() {
        let formula: FormulaResult = serde_json::from_value(json!({
            "type": "date",
            "date": {"start": "2024-01-02", "end": null, "time_zone": null}
        }))
        .unwrap();
        assert_eq!(formula.as_scalar(), Scalar::Text("2024-01-02".into()));
    }

    #[test]
    fn unique_id_display() {
        let id = UniqueIdData {
            number: Some(42),
            prefix: Some("TASK".to_string()),
        };
        assert_eq!(id.to_string(), "TASK-42");
    }
}
