//! Phrase generation.
//!
//! Every phrase is `prefix ∥ middle ∥ suffix`, with each component drawn
//! independently and uniformly from its pool. The RNG is seeded from OS
//! entropy on every [`generate`] call.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::words::{Category, WordSource, WordType};

/// A freshly composed phrase, not yet saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPhrase {
    pub phrase: String,
    pub prefix: String,
    pub suffix: String,
}

/// Pins for the first and last component. A pinned component replaces the
/// random draw for every phrase.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// The three word pools for one category.
#[derive(Debug, Clone, Default)]
pub struct WordPools {
    pub prefixes: Vec<String>,
    pub middles: Vec<String>,
    pub suffixes: Vec<String>,
}

impl WordPools {
    /// Load the pools for `category` from an open word source.
    pub fn load(source: &WordSource, category: Category) -> Result<Self> {
        let pools = Self {
            prefixes: source.list(WordType::Prefix, category)?,
            middles: source.list(WordType::Middle, category)?,
            suffixes: source.list(WordType::Suffix, category)?,
        };
        tracing::debug!(
            prefixes = pools.prefixes.len(),
            middles = pools.middles.len(),
            suffixes = pools.suffixes.len(),
            "word pools loaded"
        );
        Ok(pools)
    }
}

/// Draws phrases from word pools loaded once, with an RNG seeded from OS
/// entropy.
pub struct Generator {
    pools: WordPools,
    rng: StdRng,
    origin: PathBuf,
}

impl Generator {
    /// Load the `general` pools from `source` and seed a fresh RNG.
    pub fn from_source(source: &WordSource) -> Result<Self> {
        Ok(Self {
            pools: WordPools::load(source, Category::General)?,
            rng: StdRng::from_entropy(),
            origin: source.path().to_path_buf(),
        })
    }

    /// Compose `n` phrases. An empty pool surfaces as [`Error::WordDbMissing`].
    pub fn generate(&mut self, n: i64, options: &GenerateOptions) -> Result<Vec<GeneratedPhrase>> {
        compose(n, &self.pools, options, &mut self.rng).map_err(|EmptyPool(word_type)| {
            tracing::warn!(%word_type, "word pool is empty");
            Error::word_db_missing(&self.origin)
        })
    }
}

/// Generate `n` phrases from the `general` category of `source`.
///
/// `n <= 0` yields an empty list without touching the word source.
pub fn generate(
    n: i64,
    source: &WordSource,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedPhrase>> {
    if n <= 0 {
        return Ok(Vec::new());
    }
    Generator::from_source(source)?.generate(n, options)
}

/// Pool that had nothing to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPool(pub WordType);

/// Compose `n` phrases from `pools` using `rng`.
pub fn compose<R: Rng + ?Sized>(
    n: i64,
    pools: &WordPools,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<GeneratedPhrase>, EmptyPool> {
    if n <= 0 {
        return Ok(Vec::new());
    }
    if options.prefix.is_none() && pools.prefixes.is_empty() {
        return Err(EmptyPool(WordType::Prefix));
    }
    if pools.middles.is_empty() {
        return Err(EmptyPool(WordType::Middle));
    }
    if options.suffix.is_none() && pools.suffixes.is_empty() {
        return Err(EmptyPool(WordType::Suffix));
    }

    let mut phrases = Vec::with_capacity(usize::try_from(n.min(1024)).unwrap_or_default());
    for _ in 0..n {
        let prefix = pick(options.prefix.as_deref(), &pools.prefixes, rng);
        let middle = pick(None, &pools.middles, rng);
        let suffix = pick(options.suffix.as_deref(), &pools.suffixes, rng);
        phrases.push(GeneratedPhrase {
            phrase: format!("{prefix}{middle}{suffix}"),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        });
    }
    Ok(phrases)
}

fn pick<'a, R: Rng + ?Sized>(pinned: Option<&'a str>, pool: &'a [String], rng: &mut R) -> &'a str {
    match pinned {
        Some(word) => word,
        // Callers check for empty pools before drawing.
        None => pool.choose(rng).map(String::as_str).unwrap_or_default(),
    }
}
