//! Insert command CLI handler.

use crate::insert::{insert_query, insert_text, QueryOptions};
use crate::value::Record;
use anyhow::Context;
use std::io::Read;

pub fn run(
    table: String,
    record: Option<String>,
    params: bool,
    no_returning: bool,
) -> anyhow::Result<()> {
    if table.trim().is_empty() {
        anyhow::bail!("--table cannot be empty");
    }

    let input = match record {
        Some(json) => json,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read record from stdin")?;
            buf
        }
    };

    let record: Record =
        serde_json::from_str(&input).context("Record must be a JSON object of scalar values")?;

    if params {
        let options = QueryOptions {
            return_record: !no_returning,
        };
        let query = insert_query(record, &table, options);
        println!("{}", serde_json::to_string_pretty(&query)?);
    } else {
        println!("{}", insert_text(&record, &table));
    }

    Ok(())
}
