//! Seed file output.
//!
//! `SeedWriter` buffers statements for one `<table>.sql` file,
//! `write_seed_file` fills it from a generator and `run_plan` drives a
//! whole plan.

use crate::generator::SeedGenerator;
use crate::lexicon::Corpora;
use crate::plan::{check_table_name, SeedPlan, TableSeed};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;
pub const STMT_BUFFER_COUNT: usize = 100;

/// Line-oriented statement writer
pub struct SeedWriter<W: Write = BufWriter<File>> {
    writer: W,
    write_count: usize,
    max_stmt_buffer: usize,
    statements: u64,
    bytes: u64,
}

impl SeedWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::with_capacity(WRITER_BUFFER_SIZE, file)))
    }
}

impl<W: Write> SeedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            write_count: 0,
            max_stmt_buffer: STMT_BUFFER_COUNT,
            statements: 0,
            bytes: 0,
        }
    }

    /// Write a CREATE statement, adding the terminating `;` if it is missing.
    ///
    /// Not counted as a statement.
    pub fn write_create(&mut self, stmt: &str) -> io::Result<()> {
        let stmt = stmt.trim_end();
        self.write_raw(stmt.as_bytes())?;
        if !stmt.ends_with(';') {
            self.write_raw(b";")?;
        }
        self.write_raw(b"\n")
    }

    /// Write one statement followed by a newline
    pub fn write_statement(&mut self, stmt: &str) -> io::Result<()> {
        self.write_raw(stmt.as_bytes())?;
        self.write_raw(b"\n")?;
        self.statements += 1;

        self.write_count += 1;
        if self.write_count >= self.max_stmt_buffer {
            self.write_count = 0;
            self.writer.flush()?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.write_count = 0;
        self.writer.flush()
    }

    /// Statements written so far, excluding the CREATE statement
    pub fn statements(&self) -> u64 {
        self.statements
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_raw(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)?;
        self.bytes += buf.len() as u64;
        Ok(())
    }
}

/// Per-table output statistics
#[derive(Debug, Clone, Serialize)]
pub struct TableSeedStats {
    pub name: String,
    pub records: u64,
    pub bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Statistics for a whole plan run
#[derive(Debug, Default, Serialize)]
pub struct SeedStats {
    pub tables_written: usize,
    pub records_written: u64,
    pub bytes_written: u64,
    pub dry_run: bool,
    pub seed: u64,
    pub table_stats: Vec<TableSeedStats>,
    pub warnings: Vec<String>,
}

/// Generate `table.records` statements for one table into `writer`.
///
/// `on_record` is called after each statement.
pub fn write_seed<R, W, F>(
    gen: &mut SeedGenerator<R>,
    table: &TableSeed,
    writer: &mut SeedWriter<W>,
    mut on_record: F,
) -> io::Result<()>
where
    R: Rng,
    W: Write,
    F: FnMut(),
{
    if let Some(ref create) = table.create {
        writer.write_create(create)?;
    }
    for _ in 0..table.records {
        let stmt = gen.seed_record(&table.columns, &table.name);
        writer.write_statement(&stmt)?;
        on_record();
    }
    writer.flush()
}

/// Write `<dir>/<table>.sql`, creating `dir` if needed
pub fn write_seed_file<R: Rng>(
    gen: &mut SeedGenerator<R>,
    table: &TableSeed,
    dir: &Path,
) -> anyhow::Result<TableSeedStats> {
    write_seed_file_with_progress(gen, table, dir, || {})
}

fn write_seed_file_with_progress<R, F>(
    gen: &mut SeedGenerator<R>,
    table: &TableSeed,
    dir: &Path,
    on_record: F,
) -> anyhow::Result<TableSeedStats>
where
    R: Rng,
    F: FnMut(),
{
    check_table_name(&table.name)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;

    let path = seed_file_path(dir, &table.name);
    let mut writer = SeedWriter::create(&path)
        .with_context(|| format!("Cannot create seed file: {}", path.display()))?;
    write_seed(gen, table, &mut writer, on_record)
        .with_context(|| format!("Failed writing seed file: {}", path.display()))?;

    Ok(TableSeedStats {
        name: table.name.clone(),
        records: writer.statements(),
        bytes: writer.bytes(),
        path: Some(path),
    })
}

/// Path of the seed file for `table` inside `dir`
pub fn seed_file_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{}.sql", table))
}

/// Runtime options for `run_plan`
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub corpus_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub progress: bool,
}

impl SeedOptions {
    /// Options from a plan's own settings, with CLI values taking precedence
    pub fn merged(
        plan: &SeedPlan,
        output_dir: Option<PathBuf>,
        seed: Option<u64>,
        corpus_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            output_dir: output_dir
                .or_else(|| plan.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            seed: seed.or(plan.seed),
            corpus_dir: corpus_dir.or_else(|| plan.corpus_dir.clone()),
            dry_run: false,
            progress: false,
        }
    }
}

/// Validate `plan` and write one seed file per table.
///
/// All tables share one generator, so the name cursor carries over from
/// one table to the next. Any failure aborts the run.
pub fn run_plan(plan: &SeedPlan, options: &SeedOptions) -> anyhow::Result<SeedStats> {
    let warnings = plan.validate()?;
    let corpora = Corpora::resolve(options.corpus_dir.as_deref())?;

    let seed = options.seed.unwrap_or_else(rand::random);
    let mut gen = SeedGenerator::from_seed(&corpora, Some(seed));

    let progress_bar = if options.progress {
        let pb = ProgressBar::new(plan.total_records());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut stats = SeedStats {
        dry_run: options.dry_run,
        seed,
        warnings,
        ..Default::default()
    };

    for table in &plan.tables {
        if let Some(ref pb) = progress_bar {
            pb.set_message(table.name.clone());
        }
        let tick = || {
            if let Some(ref pb) = progress_bar {
                pb.inc(1);
            }
        };

        let table_stats = if options.dry_run {
            let mut writer = SeedWriter::new(io::sink());
            write_seed(&mut gen, table, &mut writer, tick)?;
            TableSeedStats {
                name: table.name.clone(),
                records: writer.statements(),
                bytes: writer.bytes(),
                path: None,
            }
        } else {
            write_seed_file_with_progress(&mut gen, table, &options.output_dir, tick)?
        };

        stats.tables_written += 1;
        stats.records_written += table_stats.records;
        stats.bytes_written += table_stats.bytes;
        stats.table_stats.push(table_stats);
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }

    Ok(stats)
}
