//! Word and name corpora for text-like columns.
//!
//! A `Lexicon` is an immutable list of tokens loaded once from a
//! newline-delimited resource. `Corpora` pairs the names and words lexicons,
//! and a `LexiconProvider` serves tokens from them to one generation pipeline:
//! names in round-robin order, words sampled uniformly at random.

use anyhow::Context;
use once_cell::sync::Lazy;
use rand::{Rng, RngExt};
use std::path::Path;
use std::sync::Arc;

/// File name of the names corpus inside a corpus directory
pub const NAMES_FILE: &str = "names";
/// File name of the words corpus inside a corpus directory
pub const WORDS_FILE: &str = "words";

static BUNDLED_NAMES: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(
        Lexicon::parse(NAMES_FILE, include_str!("../../data/names"))
            .expect("bundled names corpus is not empty"),
    )
});

static BUNDLED_WORDS: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(
        Lexicon::parse(WORDS_FILE, include_str!("../../data/words"))
            .expect("bundled words corpus is not empty"),
    )
});

/// An ordered, non-empty list of tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<String>,
}

impl Lexicon {
    /// Parse newline-delimited text into a lexicon.
    ///
    /// Lines are trimmed and blank lines (including the one left by a
    /// trailing newline) are dropped. `label` only appears in the error.
    pub fn parse(label: &str, text: &str) -> anyhow::Result<Self> {
        let entries: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if entries.is_empty() {
            anyhow::bail!("Corpus '{}' contains no entries", label);
        }

        Ok(Self { entries })
    }

    /// Read and parse a corpus file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read corpus file: {}", path.display()))?;
        Self::parse(&path.display().to_string(), &text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|e| e == token)
    }

    /// Pick one entry uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.entries[rng.random_range(0..self.entries.len())]
    }
}

/// The names and words corpora, loaded once and shared between providers
#[derive(Debug, Clone)]
pub struct Corpora {
    pub names: Arc<Lexicon>,
    pub words: Arc<Lexicon>,
}

impl Corpora {
    /// The corpora compiled into the binary
    pub fn bundled() -> Self {
        Self {
            names: Arc::clone(&BUNDLED_NAMES),
            words: Arc::clone(&BUNDLED_WORDS),
        }
    }

    /// Load `names` and `words` from a directory.
    ///
    /// Either file missing or empty fails the whole load.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let names = Lexicon::load(&dir.join(NAMES_FILE))?;
        let words = Lexicon::load(&dir.join(WORDS_FILE))?;
        Ok(Self {
            names: Arc::new(names),
            words: Arc::new(words),
        })
    }

    /// Load from `dir` if given, otherwise use the bundled corpora
    pub fn resolve(dir: Option<&Path>) -> anyhow::Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::bundled()),
        }
    }

    /// Create a provider with its own name cursor
    pub fn provider(&self) -> LexiconProvider {
        LexiconProvider::new(self.clone())
    }
}

/// Serves tokens from a pair of corpora.
///
/// Each provider owns its round-robin cursor over the names corpus, so
/// independent pipelines never observe each other's position.
#[derive(Debug, Clone)]
pub struct LexiconProvider {
    corpora: Corpora,
    name_cursor: usize,
}

impl LexiconProvider {
    pub fn new(corpora: Corpora) -> Self {
        Self {
            corpora,
            name_cursor: 0,
        }
    }

    /// Next name in cyclic order, starting from the first entry
    pub fn next_name(&mut self) -> &str {
        let names = &self.corpora.names;
        let index = self.name_cursor;
        self.name_cursor = (self.name_cursor + 1) % names.len();
        &names.entries[index]
    }

    /// `n` words sampled with replacement, joined by single spaces
    pub fn random_words<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> String {
        let words = &self.corpora.words;
        let mut out = String::new();
        for i in 0..n {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(words.pick(rng));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_blank_lines_and_carriage_returns() {
        let lexicon = Lexicon::parse("t", "alpha\r\n\n  beta  \ngamma\n").unwrap();
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.get(0), Some("alpha"));
        assert_eq!(lexicon.get(1), Some("beta"));
        assert_eq!(lexicon.get(2), Some("gamma"));
    }

    #[test]
    fn test_parse_empty_is_error() {
        let err = Lexicon::parse("names", "\n\n   \n").unwrap_err();
        assert!(err.to_string().contains("names"));
    }

    #[test]
    fn test_bundled_corpora_are_loaded_once() {
        let a = Corpora::bundled();
        let b = Corpora::bundled();
        assert!(Arc::ptr_eq(&a.names, &b.names));
        assert!(Arc::ptr_eq(&a.words, &b.words));
        assert!(!a.names.is_empty());
        assert!(!a.words.is_empty());
    }
}
