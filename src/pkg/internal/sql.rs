use std::collections::HashMap;

use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use crate::prelude::{JobliteError, Result};

/// Parameter value for dynamically assembled statements, carried until bind
/// time so heterogeneous lists keep their order.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// SET clause fragment of a selective UPDATE plus its values in binding order.
#[derive(Debug, PartialEq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

/// Builds the SET clause of a selective UPDATE from the fields present in
/// `data`. Column names come from `renames` when a field's database spelling
/// differs from its logical name, falling back to the field name itself;
/// either way the column is double quoted. Placeholders are 1-based and line
/// up with `values`. Resolved names are not checked against the schema, the
/// store rejects unknown columns on execution.
pub fn sql_for_partial_update(
    data: Vec<(&str, SqlValue)>,
    renames: &HashMap<&str, &str>,
) -> Result<PartialUpdate> {
    if data.is_empty() {
        return Err(JobliteError::InvalidRequest("no data to update".into()));
    }
    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.into_iter().enumerate() {
        let col = renames.get(field).copied().unwrap_or(field);
        cols.push(format!("\"{}\"=${}", col, idx + 1));
        values.push(value);
    }
    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

/// Binds `values` onto `query` in order.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Float(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
        };
    }
    query
}
