//! Unit tests for the lexicon module.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sql_seeder::lexicon::{Corpora, Lexicon, LexiconProvider};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn corpora(names: &str, words: &str) -> Corpora {
    Corpora {
        names: Arc::new(Lexicon::parse("names", names).unwrap()),
        words: Arc::new(Lexicon::parse("words", words).unwrap()),
    }
}

#[test]
fn test_next_name_starts_at_first_entry() {
    let mut provider = corpora("Ann\nBen\nCid\n", "x").provider();
    assert_eq!(provider.next_name(), "Ann");
    assert_eq!(provider.next_name(), "Ben");
    assert_eq!(provider.next_name(), "Cid");
}

#[test]
fn test_next_name_wraps_around() {
    let corpora = corpora("Ann\nBen\nCid\n", "x");
    let len = corpora.names.len();
    let mut provider = corpora.provider();

    let first_pass: Vec<String> = (0..len).map(|_| provider.next_name().to_string()).collect();
    let wrapped = provider.next_name().to_string();

    assert_eq!(wrapped, first_pass[0]);
    assert!(first_pass.contains(&wrapped));
}

#[test]
fn test_next_name_stays_in_bounds_over_many_calls() {
    let corpora = Corpora::bundled();
    let mut provider = corpora.provider();
    for _ in 0..(corpora.names.len() * 3 + 7) {
        let name = provider.next_name().to_string();
        assert!(corpora.names.contains(&name));
    }
}

#[test]
fn test_providers_have_independent_cursors() {
    let corpora = corpora("Ann\nBen\nCid\n", "x");
    let mut a = corpora.provider();
    let mut b = corpora.provider();

    assert_eq!(a.next_name(), "Ann");
    assert_eq!(a.next_name(), "Ben");
    assert_eq!(b.next_name(), "Ann");
}

#[test]
fn test_random_words_returns_exact_count_from_corpus() {
    let corpora = Corpora::bundled();
    let provider = LexiconProvider::new(corpora.clone());
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let words = provider.random_words(3, &mut rng);
        let tokens: Vec<&str> = words.split(' ').collect();
        assert_eq!(tokens.len(), 3);
        for token in tokens {
            assert!(corpora.words.contains(token), "unexpected token {:?}", token);
        }
    }
}

#[test]
fn test_random_words_reaches_last_entry_and_never_empty() {
    let provider = corpora("Ann", "first\nlast\n").provider();
    let mut rng = StdRng::seed_from_u64(1);

    let mut saw_last = false;
    for _ in 0..500 {
        let word = provider.random_words(1, &mut rng);
        assert!(word == "first" || word == "last", "got {:?}", word);
        saw_last |= word == "last";
    }
    assert!(saw_last);
}

#[test]
fn test_random_words_zero_is_empty() {
    let provider = Corpora::bundled().provider();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(provider.random_words(0, &mut rng), "");
}

#[test]
fn test_corpora_load_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("names"), "Zed\nYan\n").unwrap();
    fs::write(temp_dir.path().join("words"), "one\ntwo\nthree\n").unwrap();

    let corpora = Corpora::load(temp_dir.path()).unwrap();
    assert_eq!(corpora.names.len(), 2);
    assert_eq!(corpora.words.len(), 3);
    assert_eq!(corpora.provider().next_name(), "Zed");
}

#[test]
fn test_corpora_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("names"), "Zed\n").unwrap();

    let err = Corpora::load(temp_dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("words"));
}

#[test]
fn test_corpora_load_empty_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("names"), "\n\n").unwrap();
    fs::write(temp_dir.path().join("words"), "one\n").unwrap();

    assert!(Corpora::load(temp_dir.path()).is_err());
}

#[test]
fn test_resolve_without_directory_uses_bundled() {
    let resolved = Corpora::resolve(None).unwrap();
    let bundled = Corpora::bundled();
    assert!(Arc::ptr_eq(&resolved.names, &bundled.names));
}
