//! INSERT statement rendering.
//!
//! Two forms are produced from the same ordered `Record`:
//! - literal text with values inlined (`insert_text`), used for seed files
//! - a parameterized query with `$n` placeholders and a bound value list
//!   (`insert_query`), for drivers that take positional parameters
//!
//! Both forms read columns and values from the record's iteration order, so
//! the column list always lines up with the value list.

mod params;
mod text;

pub use params::{insert_query, strip_empty_fields, InsertQuery, QueryOptions};
pub use text::{insert_text, quote_literal, render_literal};

use crate::value::Record;

/// Comma separated column list, in record order
fn columns_csv(record: &Record) -> String {
    record.columns().collect::<Vec<_>>().join(",")
}

/// Statement for a record with no columns
fn default_values_insert(table: &str) -> String {
    format!("INSERT INTO {} DEFAULT VALUES", table)
}
