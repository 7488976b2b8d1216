//! Validate command CLI handler.

use crate::plan::SeedPlan;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ValidateJsonOutput {
    valid: bool,
    tables: usize,
    records: u64,
    warnings: Vec<String>,
}

pub fn run(plan_path: PathBuf, strict: bool, json: bool) -> anyhow::Result<()> {
    let plan = SeedPlan::load(&plan_path)?;
    let warnings = plan.validate()?;

    let warning_count = warnings.len();
    let valid = !(strict && warning_count > 0);

    if json {
        let output = ValidateJsonOutput {
            valid,
            tables: plan.tables.len(),
            records: plan.total_records(),
            warnings,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
        eprintln!(
            "Plan {}: {} tables, {} records",
            plan_path.display(),
            plan.tables.len(),
            plan.total_records()
        );
    }

    if !valid {
        anyhow::bail!(
            "Validation failed: {} warning(s) in strict mode",
            warning_count
        );
    }

    Ok(())
}
