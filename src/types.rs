use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// A single cell or bind parameter.
///
/// Bind parameters, fetched cells and the row data handed to the write builder all use
/// this one enum:
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let params: Vec<RowValues> =
///     vec![1_i64.into(), "alice".into(), true.into(), None::<i64>.into()];
/// assert!(params[3].is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Null,
    /// Bound as its serialized text.
    JSON(JsonValue),
    Blob(Vec<u8>),
}

impl RowValues {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce a scalar into an integer the way a loosely typed driver would.
    ///
    /// Integers pass through, floats truncate, booleans map to 0/1 and numeric text is
    /// parsed. Anything else (NULL, blobs, JSON, timestamps, non-numeric text) is `None`.
    #[must_use]
    pub fn coerce_int(&self) -> Option<i64> {
        if let Some(i) = self.as_int() {
            return Some(i);
        }
        match self {
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<JsonValue> for RowValues {
    fn from(value: JsonValue) -> Self {
        Self::JSON(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
