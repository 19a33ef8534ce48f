//! Records and their column schemas.
//!
//! A [`Schema`] is the ordered list of column names of one result set. Every
//! [`Record`] of that result set shares the same schema through an [`Arc`],
//! so per-row cost is the value vector alone. Column lookup is exact and
//! case-sensitive throughout the pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors from constructing a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The value count does not match the schema's column count.
    #[error("record has {actual} values for a schema of {expected} columns")]
    ArityMismatch {
        /// Column count of the schema.
        expected: usize,
        /// Value count supplied.
        actual: usize,
    },
}

/// The ordered column names of one result set.
///
/// Column order is significant: it is the order parameters are derived in by
/// the binding handler and the order values are laid out in each [`Record`].
/// Duplicate names are representable (a query may project the same column
/// twice); [`Schema::position`] resolves to the first occurrence, and layers
/// that cannot tolerate duplicates reject them at their own boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Create a schema from column names, preserving order.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The column names, in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of `column` (exact, case-sensitive; first occurrence).
    #[must_use]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Whether `column` is present (exact, case-sensitive).
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One row flowing through the pipeline.
///
/// A record pairs a shared [`Schema`] with a same-length vector of JSON
/// values. Handlers receive records by value and return a record; nothing in
/// the pipeline mutates a record in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Record {
    /// Create a record over `schema`, checking that `values` matches its
    /// column count.
    pub fn new(schema: Arc<Schema>, values: Vec<Value>) -> Result<Self, RecordError> {
        if values.len() != schema.len() {
            return Err(RecordError::ArityMismatch {
                expected: schema.len(),
                actual: values.len(),
            });
        }
        Ok(Self { schema, values })
    }

    /// Build a record and a matching single-use schema from column/value
    /// pairs. Convenient for tests and hand-rolled sources.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(c, v)| (c.into(), v))
            .unzip();
        Self {
            schema: Arc::new(Schema::new(columns)),
            values,
        }
    }

    /// The schema this record conforms to.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The shared schema handle, for building sibling rows cheaply.
    #[must_use]
    pub fn schema_handle(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// Value of `column` (exact, case-sensitive), if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.schema.position(column).map(|i| &self.values[i])
    }

    /// Value at `index` in schema order, if in range.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All values, in schema order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the record, yielding its values in schema order.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of values (equals the schema's column count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn orders_schema() -> Arc<Schema> {
        Arc::new(Schema::new(["id", "name", "amount"]))
    }

    #[test]
    fn schema_positions_are_ordered_and_case_sensitive() {
        let schema = orders_schema();
        assert_eq!(schema.position("id"), Some(0));
        assert_eq!(schema.position("amount"), Some(2));
        assert_eq!(schema.position("Amount"), None);
        assert!(schema.contains("name"));
        assert!(!schema.contains("missing"));
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn schema_duplicate_resolves_to_first() {
        let schema = Schema::new(["a", "b", "a"]);
        assert_eq!(schema.position("a"), Some(0));
    }

    #[test]
    fn record_construction_checks_arity() {
        let schema = orders_schema();
        let record = Record::new(Arc::clone(&schema), vec![json!(7), json!("x")]);
        assert_eq!(
            record.unwrap_err(),
            RecordError::ArityMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn record_named_access() {
        let schema = orders_schema();
        let record =
            Record::new(schema, vec![json!(7), json!("x"), json!(12.5)]).unwrap();
        assert_eq!(record.get("id"), Some(&json!(7)));
        assert_eq!(record.get("name"), Some(&json!("x")));
        assert_eq!(record.get("amount"), Some(&json!(12.5)));
        assert_eq!(record.get("ID"), None);
        assert_eq!(record.value_at(1), Some(&json!("x")));
        assert_eq!(record.value_at(9), None);
    }

    #[test]
    fn records_share_one_schema() {
        let schema = orders_schema();
        let a = Record::new(Arc::clone(&schema), vec![json!(1), json!("a"), json!(1.0)]).unwrap();
        let b = Record::new(a.schema_handle(), vec![json!(2), json!("b"), json!(2.0)]).unwrap();
        assert!(Arc::ptr_eq(&a.schema_handle(), &b.schema_handle()));
        assert_eq!(b.get("id"), Some(&json!(2)));
    }

    #[test]
    fn from_pairs_builds_matching_schema() {
        let record = Record::from_pairs([("id", json!(7)), ("name", json!("x"))]);
        assert_eq!(record.schema().columns(), ["id", "name"]);
        assert_eq!(record.get("name"), Some(&json!("x")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn into_values_preserves_order() {
        let record = Record::from_pairs([("a", json!(1)), ("b", json!(2))]);
        assert_eq!(record.into_values(), vec![json!(1), json!(2)]);
    }
}
