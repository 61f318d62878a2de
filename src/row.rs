use crate::types::RowValues;

/// An ordered mapping of column name to value.
///
/// Column order is insertion order and drives placeholder order in the write builder.
/// Inserting a column that already exists replaces its value in place, so names stay
/// unique:
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let row = Row::new().with("a", 1).with("b", "x").with("a", 2);
/// assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(row.get("a"), Some(&RowValues::Int(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, RowValues)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set `column` to `value`, returning the previous value if the column existed.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        value: impl Into<RowValues>,
    ) -> Option<RowValues> {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((column, value));
                None
            }
        }
    }

    /// Builder-style [`Row::insert`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.insert(column, value);
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &RowValues> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<RowValues>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl IntoIterator for Row {
    type Item = (String, RowValues);
    type IntoIter = std::vec::IntoIter<(String, RowValues)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_a_column_keeps_its_position() {
        let mut row = Row::new().with("a", 1).with("b", 2);
        let previous = row.insert("a", 3);
        assert_eq!(previous, Some(RowValues::Int(1)));
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![("a", &RowValues::Int(3)), ("b", &RowValues::Int(2))]
        );
    }

    #[test]
    fn collects_from_pairs() {
        let row: Row = vec![("id", RowValues::Int(7)), ("name", RowValues::Null)]
            .into_iter()
            .collect();
        assert_eq!(row.len(), 2);
        assert!(row.get("name").is_some_and(RowValues::is_null));
        assert!(row.get("missing").is_none());
    }
}
