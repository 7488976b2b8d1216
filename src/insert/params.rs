//! Parameterized INSERT rendering with positional placeholders.

use super::{columns_csv, default_values_insert};
use crate::value::{Record, SqlValue};
use serde::Serialize;

/// Options for `insert_query`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Append `RETURNING *` so the driver hands back the inserted row
    pub return_record: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            return_record: true,
        }
    }
}

/// SQL text with `$1..$n` placeholders and the values bound to them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertQuery {
    pub text: String,
    pub values: Vec<SqlValue>,
}

/// Remove empty fields and coerce numeric text to numbers.
///
/// - booleans, numbers and non-numeric text are kept as they are
/// - text that parses as a nonzero number becomes that number
/// - text that trims to `"0"` becomes the number 0
/// - the empty string and NULL are removed
pub fn strip_empty_fields(record: &mut Record) {
    record.retain_mut(|_, value| match value {
        SqlValue::Null => false,
        SqlValue::Bool(_) | SqlValue::Int(_) | SqlValue::Float(_) => true,
        SqlValue::Text(s) => {
            let keep = !s.is_empty();
            let coerced = parse_nonzero_number(s)
                .or_else(|| (s.trim() == "0").then_some(SqlValue::Int(0)));
            match coerced {
                Some(number) => {
                    *value = number;
                    true
                }
                None => keep,
            }
        }
    });
}

/// Build a parameterized INSERT from `record` after stripping empty fields
pub fn insert_query(mut record: Record, table: &str, options: QueryOptions) -> InsertQuery {
    strip_empty_fields(&mut record);

    let returning = if options.return_record {
        " RETURNING *"
    } else {
        ""
    };

    if record.is_empty() {
        return InsertQuery {
            text: format!("{}{};", default_values_insert(table), returning),
            values: Vec::new(),
        };
    }

    let placeholders: Vec<String> = (1..=record.len()).map(|i| format!("${}", i)).collect();
    let text = format!(
        "INSERT INTO {} ({}) VALUES ({}){};",
        table,
        columns_csv(&record),
        placeholders.join(","),
        returning
    );

    InsertQuery {
        text,
        values: record.into_values(),
    }
}

/// Parse trimmed text as a finite, nonzero number
fn parse_nonzero_number(s: &str) -> Option<SqlValue> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return (n != 0).then_some(SqlValue::Int(n));
    }

    let n = trimmed.parse::<f64>().ok()?;
    if !n.is_finite() || n == 0.0 {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(SqlValue::Int(n as i64))
    } else {
        Some(SqlValue::Float(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nonzero_number() {
        assert_eq!(parse_nonzero_number(" 42 "), Some(SqlValue::Int(42)));
        assert_eq!(parse_nonzero_number("-1.5"), Some(SqlValue::Float(-1.5)));
        assert_eq!(parse_nonzero_number("1e3"), Some(SqlValue::Int(1000)));
        assert_eq!(parse_nonzero_number("0"), None);
        assert_eq!(parse_nonzero_number("0.0"), None);
        assert_eq!(parse_nonzero_number("inf"), None);
        assert_eq!(parse_nonzero_number("abc"), None);
        assert_eq!(parse_nonzero_number("   "), None);
    }
}
