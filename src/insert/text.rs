//! Literal-text INSERT rendering.

use super::{columns_csv, default_values_insert};
use crate::value::{Record, SqlValue};

/// Render `record` as `INSERT INTO <table> (<cols>) VALUES (<values>);`
pub fn insert_text(record: &Record, table: &str) -> String {
    if record.is_empty() {
        return format!("{};", default_values_insert(table));
    }

    let values: Vec<String> = record.values().map(render_literal).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        columns_csv(record),
        values.join(",")
    )
}

/// Render one value as a SQL literal
pub fn render_literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        SqlValue::Int(n) => n.to_string(),
        SqlValue::Float(n) if n.is_finite() => n.to_string(),
        SqlValue::Float(_) => "NULL".to_string(),
        SqlValue::Text(s) => quote_literal(s),
    }
}

/// Single-quote a string, doubling embedded quotes
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
