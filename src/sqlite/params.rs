use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::types::RowValues;

/// Map a [`RowValues`] onto `SQLite`'s storage classes.
///
/// Booleans become 0/1, timestamps `YYYY-MM-DD HH:MM:SS[.fff]` text and JSON its
/// serialized text.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Null => Value::Null,
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Timestamp(ts) => Value::Text(ts.format("%F %T%.f").to_string()),
        RowValues::JSON(json) => Value::Text(json.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Owned positional parameters for one rusqlite statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<Value>);

impl Params {
    #[must_use]
    pub fn convert(params: &[RowValues]) -> Self {
        Self(params.iter().map(row_value_to_sqlite_value).collect())
    }

    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }

    /// Borrowed view accepted by `Statement::execute`.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn ToSql> {
        self.0.iter().map(|v| v as &dyn ToSql).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_variant() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .expect("valid timestamp");
        let params = Params::convert(&[
            RowValues::Bool(true),
            RowValues::Null,
            RowValues::Timestamp(ts),
            RowValues::JSON(serde_json::json!({"k": 1})),
        ]);
        assert_eq!(
            params.as_values(),
            &[
                Value::Integer(1),
                Value::Null,
                Value::Text("2024-03-09 08:30:00".into()),
                Value::Text(r#"{"k":1}"#.into()),
            ]
        );
        assert_eq!(params.as_refs().len(), 4);
    }
}
