//! Generate command CLI handler.

use super::parse_list;
use crate::plan::SeedPlan;
use crate::writer::{self, SeedOptions, SeedStats};
use std::path::PathBuf;
use std::time::Instant;

#[allow(clippy::too_many_arguments)]
pub fn run(
    plan_path: PathBuf,
    output: Option<PathBuf>,
    seed: Option<u64>,
    corpus_dir: Option<PathBuf>,
    tables: Option<String>,
    dry_run: bool,
    progress: bool,
    verbose: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut plan = SeedPlan::load(&plan_path)?;

    if let Some(ref tables) = tables {
        plan.retain_tables(&parse_list(tables))?;
    }

    let mut options = SeedOptions::merged(&plan, output, seed, corpus_dir);
    options.dry_run = dry_run;
    options.progress = progress && !json;

    if verbose && !json {
        eprintln!(
            "Seeding {} tables ({} records) from {}",
            plan.tables.len(),
            plan.total_records(),
            plan_path.display()
        );
        match options.corpus_dir {
            Some(ref dir) => eprintln!("Corpus directory: {}", dir.display()),
            None => eprintln!("Corpus: bundled"),
        }
    }

    let start_time = Instant::now();
    let stats = writer::run_plan(&plan, &options)?;
    let elapsed = start_time.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_stats(&stats, &options, verbose, elapsed.as_secs_f64());
    Ok(())
}

fn print_stats(stats: &SeedStats, options: &SeedOptions, verbose: bool, secs: f64) {
    if !stats.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &stats.warnings {
            eprintln!("  - {}", warning);
        }
        eprintln!();
    }

    if verbose {
        for table in &stats.table_stats {
            match table.path {
                Some(ref path) => eprintln!(
                    "  {} -> {} ({} records, {} bytes)",
                    table.name,
                    path.display(),
                    table.records,
                    table.bytes
                ),
                None => eprintln!("  {} ({} records)", table.name, table.records),
            }
        }
    }

    if stats.dry_run {
        eprintln!(
            "Dry run: {} tables, {} records (seed {})",
            stats.tables_written, stats.records_written, stats.seed
        );
    } else {
        eprintln!(
            "Wrote {} tables, {} records to {} in {:.2}s (seed {})",
            stats.tables_written,
            stats.records_written,
            options.output_dir.display(),
            secs,
            stats.seed
        );
    }
}
