//! Preview command CLI handler.

use crate::generator::SeedGenerator;
use crate::lexicon::Corpora;
use crate::plan::SeedPlan;
use std::path::PathBuf;

pub fn run(
    plan_path: PathBuf,
    table: Option<String>,
    count: usize,
    seed: Option<u64>,
    corpus_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut plan = SeedPlan::load(&plan_path)?;
    if let Some(table) = table {
        plan.retain_tables(&[table])?;
    }

    for warning in plan.validate()? {
        eprintln!("warning: {}", warning);
    }

    let corpus_dir = corpus_dir.or_else(|| plan.corpus_dir.clone());
    let corpora = Corpora::resolve(corpus_dir.as_deref())?;
    let mut gen = SeedGenerator::from_seed(&corpora, seed.or(plan.seed));

    for (i, table) in plan.tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let shown = count.min(table.records);
        println!("-- {} ({} of {} records)", table.name, shown, table.records);
        for _ in 0..shown {
            println!("{}", gen.seed_record(&table.columns, &table.name));
        }
    }

    Ok(())
}
