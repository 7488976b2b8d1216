//! Synthetic SQL seed data.
//!
//! Build a `ColumnSpec` (or load a `SeedPlan`), then let a `SeedGenerator`
//! produce one INSERT statement per record:
//!
//! ```rust
//! use sql_seeder::columns::{ColumnSpec, TypeDescriptor};
//! use sql_seeder::generator::SeedGenerator;
//! use sql_seeder::lexicon::Corpora;
//!
//! let columns = ColumnSpec::new()
//!     .column("title", TypeDescriptor::new("words").with_length(5))
//!     .column("user_id", TypeDescriptor::new("integer").with_max(100.0));
//!
//! let mut gen = SeedGenerator::from_seed(&Corpora::bundled(), Some(42));
//! let stmt = gen.seed_record(&columns, "quizzes");
//! assert!(stmt.starts_with("INSERT INTO quizzes (title,user_id) VALUES ("));
//! ```

pub mod columns;
pub mod generator;
pub mod insert;
pub mod lexicon;
pub mod plan;
pub mod value;
pub mod writer;
