//! Seed record generation.
//!
//! A `SeedGenerator` turns a `ColumnSpec` into one randomized `Record` per
//! call and renders it as a literal INSERT statement.

use crate::columns::{
    ColumnSpec, ColumnType, TypeDescriptor, DEFAULT_VARCHAR_LENGTH, DEFAULT_WORD_COUNT,
};
use crate::insert::insert_text;
use crate::lexicon::{Corpora, LexiconProvider};
use crate::value::{Record, SqlValue};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

/// Characters used for `varchar` values
const VARCHAR_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates randomized records for a column specification
pub struct SeedGenerator<R: Rng = StdRng> {
    lexicon: LexiconProvider,
    rng: R,
}

impl SeedGenerator<StdRng> {
    /// Generator over `corpora`, seeded from `seed` or from system entropy
    pub fn from_seed(corpora: &Corpora, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self::new(corpora.provider(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SeedGenerator<R> {
    pub fn new(lexicon: LexiconProvider, rng: R) -> Self {
        Self { lexicon, rng }
    }

    /// Generate a value for one column.
    ///
    /// Returns `None` for `date` columns, which are left out of the record,
    /// and `Some(SqlValue::Null)` for unrecognized tags.
    pub fn generate_value(&mut self, descriptor: &TypeDescriptor) -> Option<SqlValue> {
        let value = match descriptor.kind() {
            ColumnType::Name => self.name(),
            ColumnType::Words => self.words(descriptor),
            ColumnType::Varchar => self.varchar(descriptor),
            ColumnType::Boolean => self.boolean(),
            ColumnType::Integer => self.integer(descriptor),
            ColumnType::Float => self.float(descriptor),
            ColumnType::Date => return None,
            ColumnType::Unknown => SqlValue::Null,
        };
        Some(value)
    }

    /// Generate one record with a value for every generated column
    pub fn generate_record(&mut self, columns: &ColumnSpec) -> Record {
        let mut record = Record::new();
        for (name, descriptor) in columns.iter() {
            if let Some(value) = self.generate_value(descriptor) {
                record.insert(name, value);
            }
        }
        record
    }

    /// Generate one record and render it as a single INSERT statement
    pub fn seed_record(&mut self, columns: &ColumnSpec, table: &str) -> String {
        let record = self.generate_record(columns);
        insert_text(&record, table)
    }

    fn name(&mut self) -> SqlValue {
        SqlValue::Text(self.lexicon.next_name().to_string())
    }

    fn words(&mut self, descriptor: &TypeDescriptor) -> SqlValue {
        let n = descriptor.length_or(DEFAULT_WORD_COUNT);
        SqlValue::Text(self.lexicon.random_words(n, &mut self.rng))
    }

    fn varchar(&mut self, descriptor: &TypeDescriptor) -> SqlValue {
        let len = descriptor.length_or(DEFAULT_VARCHAR_LENGTH);
        let s: String = (0..len)
            .map(|_| VARCHAR_CHARSET[self.rng.random_range(0..VARCHAR_CHARSET.len())] as char)
            .collect();
        SqlValue::Text(s)
    }

    fn boolean(&mut self) -> SqlValue {
        SqlValue::Bool(self.rng.random_bool(0.5))
    }

    fn integer(&mut self, descriptor: &TypeDescriptor) -> SqlValue {
        let bound = descriptor.max_or_default().floor() as i64;
        let (lo, hi) = if bound < 0 { (bound, 0) } else { (0, bound) };
        SqlValue::Int(self.rng.random_range(lo..=hi))
    }

    fn float(&mut self, descriptor: &TypeDescriptor) -> SqlValue {
        let max = descriptor.max_or_default();
        SqlValue::Float(self.rng.random::<f64>() * max)
    }
}
