//! Seed plan configuration.
//!
//! A plan lists the tables to seed, each with its column specification,
//! record count and optional CREATE TABLE statement. Plans are written in
//! YAML or JSON:
//!
//! ```yaml
//! seed: 42
//! output_dir: seeds
//! tables:
//!   - name: users
//!     records: 2000
//!     columns:
//!       name: { type: name, length: 30 }
//! ```

use crate::columns::{ColumnSpec, ColumnType};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Records written per table when a plan does not say
pub const DEFAULT_RECORD_COUNT: usize = 200;

fn default_record_count() -> usize {
    DEFAULT_RECORD_COUNT
}

/// One table to seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSeed {
    /// Table name, also the output file stem (`<name>.sql`)
    pub name: String,

    /// Number of INSERT statements to generate
    #[serde(default = "default_record_count")]
    pub records: usize,

    /// CREATE TABLE statement written before the inserts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<String>,

    pub columns: ColumnSpec,
}

impl TableSeed {
    pub fn new(name: impl Into<String>, columns: ColumnSpec, records: usize) -> Self {
        Self {
            name: name.into(),
            records,
            create: None,
            columns,
        }
    }

    pub fn with_create(mut self, create: impl Into<String>) -> Self {
        self.create = Some(create.into());
        self
    }
}

/// A set of tables to seed plus run-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedPlan {
    /// Random seed for reproducible output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Directory holding `names` and `words` corpora (bundled when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_dir: Option<PathBuf>,

    /// Directory seed files are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub tables: Vec<TableSeed>,
}

impl SeedPlan {
    /// Load a plan file; `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// A relative `corpus_dir` is resolved against the plan file's directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read plan file: {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let mut plan = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
        .with_context(|| format!("Invalid plan file: {}", path.display()))?;

        if let (Some(dir), Some(base)) = (plan.corpus_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }

        Ok(plan)
    }

    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml_ng::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn table(&self, name: &str) -> Option<&TableSeed> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Keep only the named tables; unknown names are an error
    pub fn retain_tables(&mut self, names: &[String]) -> anyhow::Result<()> {
        for name in names {
            if self.table(name).is_none() {
                anyhow::bail!("Table '{}' is not in the plan", name);
            }
        }
        self.tables.retain(|t| names.contains(&t.name));
        Ok(())
    }

    /// Total INSERT statements the plan produces
    pub fn total_records(&self) -> u64 {
        self.tables.iter().map(|t| t.records as u64).sum()
    }

    /// Check the plan, returning warnings for things that generate but
    /// probably are not what the author meant.
    pub fn validate(&self) -> anyhow::Result<Vec<String>> {
        if self.tables.is_empty() {
            anyhow::bail!("Plan contains no tables");
        }

        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for table in &self.tables {
            check_table_name(&table.name)?;
            if !seen.insert(table.name.as_str()) {
                anyhow::bail!("Duplicate table '{}' in plan", table.name);
            }
            if table.columns.is_empty() {
                anyhow::bail!("Table '{}' has no columns", table.name);
            }
            if table.records == 0 {
                warnings.push(format!("Table '{}' generates no records", table.name));
            }

            for (column, descriptor) in table.columns.iter() {
                descriptor
                    .validate()
                    .with_context(|| format!("Invalid column {}.{}", table.name, column))?;

                match descriptor.kind() {
                    ColumnType::Unknown => warnings.push(format!(
                        "Column {}.{} has unknown type '{}' and will be NULL (known: {})",
                        table.name,
                        column,
                        descriptor.tag,
                        ColumnType::known_tags().collect::<Vec<_>>().join(", ")
                    )),
                    ColumnType::Date => warnings.push(format!(
                        "Column {}.{} has type 'date', which is not generated and is left out of inserts",
                        table.name, column
                    )),
                    _ => {}
                }
            }
        }

        Ok(warnings)
    }
}

/// Reject table names that cannot be used as a `<name>.sql` file stem.
///
/// The name must be one normal path component with no separators, so the
/// seed file always lands directly inside the output directory.
pub fn check_table_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Table name cannot be empty");
    }
    if name.contains(['/', '\\']) || name.contains("..") || name.contains('\0') {
        anyhow::bail!(
            "Table name '{}' cannot contain path separators or '..'",
            name
        );
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => anyhow::bail!("Table name '{}' is not a valid file name", name),
    }
}
