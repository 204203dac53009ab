//! Record filtering for table scans.

use serde_json::{Map, Value};

/// A search filter built from a template record.
///
/// Templates use the record type itself as the query language: every field
/// left at its default value is a wildcard, every populated field must match
/// the stored record exactly. A template with no populated fields collapses
/// to [`Filter::Everything`].
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every record in the table.
    Everything,
    /// Matches records whose fields equal the template's populated fields.
    Template(Value),
}

impl Filter {
    /// Builds a filter from a template record, pruning default-valued and
    /// null fields against `defaults`, the serialized `Default` instance of
    /// the record type.
    pub fn from_template(template: Value, defaults: &Value) -> Self {
        match template {
            Value::Object(fields) => {
                let default_fields = defaults.as_object();
                let populated: Map<String, Value> = fields
                    .into_iter()
                    .filter(|(field, value)| {
                        !value.is_null()
                            && !default_fields
                                .and_then(|d| d.get(field))
                                .is_some_and(|d| d == value)
                    })
                    .collect();
                if populated.is_empty() {
                    Filter::Everything
                } else {
                    Filter::Template(Value::Object(populated))
                }
            }
            other => Filter::Template(other),
        }
    }

    /// Returns true when `record` satisfies the filter.
    ///
    /// Field comparison is deep JSON equality, so nested objects and arrays
    /// must match in full.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Filter::Everything => true,
            Filter::Template(template) => match (template, record) {
                (Value::Object(want), Value::Object(have)) => want
                    .iter()
                    .all(|(field, value)| have.get(field) == Some(value)),
                (want, have) => want == have,
            },
        }
    }
}
