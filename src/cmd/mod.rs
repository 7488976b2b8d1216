mod generate;
mod insert;
mod preview;
mod validate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-seeder")]
#[command(version)]
#[command(about = "Generate synthetic SQL seed files from column specifications", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one <table>.sql seed file per table in a plan
    Generate {
        /// Seed plan file (.yaml, .yml or .json)
        plan: PathBuf,

        /// Output directory for seed files (overrides the plan)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducibility (overrides the plan)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory containing `names` and `words` corpora (overrides the plan)
        #[arg(long)]
        corpus_dir: Option<PathBuf>,

        /// Only generate specific tables (comma-separated)
        #[arg(short, long)]
        tables: Option<String>,

        /// Generate without writing files (dry run)
        #[arg(long)]
        dry_run: bool,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print sample INSERT statements for a plan to stdout
    Preview {
        /// Seed plan file (.yaml, .yml or .json)
        plan: PathBuf,

        /// Only preview this table
        #[arg(short, long)]
        table: Option<String>,

        /// Statements per table
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Random seed for reproducibility (overrides the plan)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory containing `names` and `words` corpora (overrides the plan)
        #[arg(long)]
        corpus_dir: Option<PathBuf>,
    },

    /// Render a JSON object as an INSERT statement
    Insert {
        /// Table to insert into
        #[arg(short, long)]
        table: String,

        /// JSON object of column values (read from stdin if omitted)
        #[arg(short, long)]
        record: Option<String>,

        /// Emit a parameterized {"text", "values"} query instead of literal SQL
        #[arg(long)]
        params: bool,

        /// Omit RETURNING * from the parameterized query
        #[arg(long, requires = "params")]
        no_returning: bool,
    },

    /// Check a seed plan without generating anything
    Validate {
        /// Seed plan file (.yaml, .yml or .json)
        plan: PathBuf,

        /// Treat warnings as errors (non-zero exit on any warning)
        #[arg(long)]
        strict: bool,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            plan,
            output,
            seed,
            corpus_dir,
            tables,
            dry_run,
            progress,
            verbose,
            json,
        } => generate::run(
            plan, output, seed, corpus_dir, tables, dry_run, progress, verbose, json,
        ),
        Commands::Preview {
            plan,
            table,
            count,
            seed,
            corpus_dir,
        } => preview::run(plan, table, count, seed, corpus_dir),
        Commands::Insert {
            table,
            record,
            params,
            no_returning,
        } => insert::run(table, record, params, no_returning),
        Commands::Validate { plan, strict, json } => validate::run(plan, strict, json),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sql-seeder", &mut io::stdout());
            Ok(())
        }
    }
}

/// Split a comma separated list, dropping blanks
pub(crate) fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
