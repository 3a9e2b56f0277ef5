//! Core types for rapid_textviz
//!
//! This module defines the fundamental data structures shared by the
//! frequency and graph builders: string interning, n-gram ranges, fixed
//! vocabularies, ranked term lists, and per-builder configuration.

use crate::errors::{Result, TextVizError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// String Interning
// ============================================================================

/// A pool for string interning that remembers insertion order.
///
/// Each unique string is stored once and receives the next sequential ID, so
/// iterating IDs `0..len` replays first-occurrence order. The term counter
/// relies on this to break ranking ties deterministically.
#[derive(Debug, Default, Clone)]
pub struct StringPool {
    /// Maps strings to their interned IDs
    string_to_id: FxHashMap<Arc<str>, u32>,
    /// Maps IDs back to strings
    id_to_string: Vec<Arc<str>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a string pool with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            string_to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            id_to_string: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.string_to_id.get(s) {
            return id;
        }

        let id = self.id_to_string.len() as u32;
        let arc: Arc<str> = s.into();
        self.string_to_id.insert(arc.clone(), id);
        self.id_to_string.push(arc);
        id
    }

    /// Look up the ID of an already interned string
    pub fn get_id(&self, s: &str) -> Option<u32> {
        self.string_to_id.get(s).copied()
    }

    /// Get a string by its ID
    pub fn get(&self, id: u32) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_ref())
    }

    /// Iterate strings in ID (insertion) order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.id_to_string.iter().map(|s| s.as_ref())
    }

    /// Get the number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }
}

// ============================================================================
// N-gram Range
// ============================================================================

/// Inclusive range of n-gram lengths, `1 <= min_n <= max_n`.
///
/// Serialized as a two-element array (`[1, 2]`); deserialization enforces
/// the same invariant as [`NgramRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct NgramRange {
    min_n: usize,
    max_n: usize,
}

impl NgramRange {
    /// Create a validated range
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 {
            return Err(TextVizError::invalid_config("ngram min_n must be >= 1"));
        }
        if min_n > max_n {
            return Err(TextVizError::invalid_config(format!(
                "ngram min_n ({}) must be <= max_n ({})",
                min_n, max_n
            )));
        }
        Ok(Self { min_n, max_n })
    }

    /// Single words only
    pub const fn unigrams() -> Self {
        Self { min_n: 1, max_n: 1 }
    }

    /// Exactly three words, as used by the phrase net
    pub const fn trigrams() -> Self {
        Self { min_n: 3, max_n: 3 }
    }

    pub fn min_n(&self) -> usize {
        self.min_n
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        Self::unigrams()
    }
}

impl TryFrom<(usize, usize)> for NgramRange {
    type Error = TextVizError;

    fn try_from((min_n, max_n): (usize, usize)) -> Result<Self> {
        Self::new(min_n, max_n)
    }
}

impl From<NgramRange> for (usize, usize) {
    fn from(range: NgramRange) -> Self {
        (range.min_n, range.max_n)
    }
}

// ============================================================================
// Fixed Vocabulary
// ============================================================================

/// A caller-fixed vocabulary: each term maps to a unique index and the
/// indices cover `0..len` without gaps.
///
/// Serialized as the ordered term list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    /// Terms in index order
    terms: Vec<String>,
    index: FxHashMap<String, u32>,
}

impl Vocabulary {
    /// Build from an ordered term list; indices follow list order.
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        let mut index = FxHashMap::with_capacity_and_hasher(terms.len(), Default::default());
        for (i, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), i as u32).is_some() {
                return Err(TextVizError::invalid_vocabulary(format!(
                    "duplicate term '{}' in vocabulary",
                    term
                )));
            }
        }
        Self::non_empty(Self { terms, index })
    }

    /// Build from a term → index mapping.
    pub fn from_mapping<I, S>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let pairs: Vec<(String, usize)> = mapping
            .into_iter()
            .map(|(term, idx)| (term.into(), idx))
            .collect();

        let size = pairs.len();
        let mut slots: Vec<Option<String>> = vec![None; size];
        for (term, idx) in pairs {
            let slot = slots.get_mut(idx).ok_or_else(|| {
                TextVizError::invalid_vocabulary(format!(
                    "index {} for term '{}' leaves a gap in a vocabulary of size {}",
                    idx, term, size
                ))
            })?;
            if let Some(existing) = slot {
                return Err(TextVizError::invalid_vocabulary(format!(
                    "terms '{}' and '{}' share index {}",
                    existing, term, idx
                )));
            }
            *slot = Some(term);
        }

        // Every slot is filled: n pairs into n distinct in-range slots.
        let terms: Vec<String> = slots.into_iter().flatten().collect();
        Self::from_terms(terms)
    }

    fn non_empty(vocab: Self) -> Result<Self> {
        if vocab.terms.is_empty() {
            return Err(TextVizError::empty_vocabulary(
                "fixed vocabulary contains no terms",
            ));
        }
        Ok(vocab)
    }

    /// Index of a term, if present
    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    /// Term at an index
    pub fn term(&self, index: u32) -> Option<&str> {
        self.terms.get(index as usize).map(String::as_str)
    }

    /// Terms in index order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = TextVizError;

    fn try_from(terms: Vec<String>) -> Result<Self> {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.terms
    }
}

// ============================================================================
// Ranked Terms
// ============================================================================

/// A term (space-joined n-gram) with its total count across a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

impl TermCount {
    pub fn new(term: impl Into<String>, count: usize) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

/// The top-K terms of a collection, sorted by count descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTerms {
    /// Ranked terms, at most `requested` of them
    pub terms: Vec<TermCount>,
    /// The K that was asked for
    pub requested: usize,
    /// Distinct terms in the counted vocabulary
    pub available: usize,
}

impl RankedTerms {
    /// True when the vocabulary held fewer than `requested` terms
    pub fn is_truncated(&self) -> bool {
        self.terms.len() < self.requested
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermCount> {
        self.terms.iter()
    }

    /// Terms alone, in rank order
    pub fn labels(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.term.as_str()).collect()
    }
}

// ============================================================================
// Edge Policies
// ============================================================================

/// What numeric weight a phrase-net edge carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// The trigram's raw occurrence count
    #[default]
    Count,
    /// Constant 1.0 per edge
    Unit,
}

/// How a second edge between the same ordered word pair is merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMerge {
    /// Last write wins; the edge keeps its original position
    #[default]
    Overwrite,
    /// Weights are summed
    Accumulate,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for frequency ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Number of terms to return (K)
    pub top_k: usize,
    /// N-gram lengths to count
    pub ngram_range: NgramRange,
    /// Tokens removed before n-gram construction (already lowercased)
    pub stopwords: Option<Vec<String>>,
    /// Also remove the built-in English stopword list
    pub english_stopwords: bool,
    /// Count only these terms, tie-breaking by their index
    pub vocabulary: Option<Vocabulary>,
    /// Fail instead of truncating when fewer than `top_k` terms exist
    pub strict: bool,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            top_k: 20,
            ngram_range: NgramRange::default(),
            stopwords: None,
            english_stopwords: false,
            vocabulary: None,
            strict: false,
        }
    }
}

impl FrequencyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(TextVizError::invalid_config("top_k must be > 0"));
        }
        Ok(())
    }

    /// Builder method: set K
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Builder method: set n-gram range
    pub fn with_ngram_range(mut self, range: NgramRange) -> Self {
        self.ngram_range = range;
        self
    }

    /// Builder method: set stopwords
    pub fn with_stopwords<I, S>(mut self, stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = Some(stopwords.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method: add the built-in English stopwords
    pub fn with_english_stopwords(mut self, english: bool) -> Self {
        self.english_stopwords = english;
        self
    }

    /// Builder method: fix the vocabulary
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Builder method: fail on fewer than K terms
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Configuration for the connector-gated phrase net
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseNetConfig {
    /// Connector words or phrases, e.g. "is", "and", "is a"
    pub connectors: Vec<String>,
    /// Maximum number of edges to add (K)
    pub number_of_pairs: usize,
    /// Edge weight semantics
    pub edge_weighting: EdgeWeighting,
    /// Repeated ordered pair policy
    pub edge_merge: EdgeMerge,
    /// Fail with `NoMatchingTrigrams` instead of returning an empty graph
    pub require_edges: bool,
}

impl Default for PhraseNetConfig {
    fn default() -> Self {
        Self {
            connectors: Vec::new(),
            number_of_pairs: 20,
            edge_weighting: EdgeWeighting::default(),
            edge_merge: EdgeMerge::default(),
            require_edges: false,
        }
    }
}

impl PhraseNetConfig {
    /// Create a config for the given connectors
    pub fn new<I, S>(connectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            connectors: connectors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.connectors.is_empty() {
            return Err(TextVizError::invalid_config(
                "at least one connector is required",
            ));
        }
        if self.connectors.iter().any(|c| c.trim().is_empty()) {
            return Err(TextVizError::invalid_config("connectors must not be blank"));
        }
        if self.number_of_pairs == 0 {
            return Err(TextVizError::invalid_config("number_of_pairs must be > 0"));
        }
        Ok(())
    }

    /// Builder method: set K
    pub fn with_number_of_pairs(mut self, number_of_pairs: usize) -> Self {
        self.number_of_pairs = number_of_pairs;
        self
    }

    /// Builder method: set edge weighting
    pub fn with_edge_weighting(mut self, weighting: EdgeWeighting) -> Self {
        self.edge_weighting = weighting;
        self
    }

    /// Builder method: set edge merge policy
    pub fn with_edge_merge(mut self, merge: EdgeMerge) -> Self {
        self.edge_merge = merge;
        self
    }

    /// Builder method: treat an edgeless result as an error
    pub fn with_require_edges(mut self, require: bool) -> Self {
        self.require_edges = require;
        self
    }
}

/// Configuration for the bigram graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigramConfig {
    /// Words dropped before pairing (matched after lowercasing)
    pub stopwords: Option<Vec<String>>,
    /// Number of most common bigrams kept as edges
    pub total_bigrams: usize,
}

impl Default for BigramConfig {
    fn default() -> Self {
        Self {
            stopwords: None,
            total_bigrams: 15,
        }
    }
}

impl BigramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_bigrams == 0 {
            return Err(TextVizError::invalid_config("total_bigrams must be > 0"));
        }
        Ok(())
    }

    pub fn with_total_bigrams(mut self, total: usize) -> Self {
        self.total_bigrams = total;
        self
    }

    pub fn with_stopwords<I, S>(mut self, stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = Some(stopwords.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for word correlation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Fold documents and target words to lowercase before matching
    pub ignore_case: bool,
}

impl CorrelationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

/// Configuration for word-cloud weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Words to drop; `None` uses the built-in English list
    pub stopwords: Option<Vec<String>>,
    /// Maximum number of words in the cloud
    pub max_words: usize,
    /// Fold "xs" into "x" when both occur
    pub collapse_plurals: bool,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            stopwords: None,
            max_words: 100,
            collapse_plurals: true,
        }
    }
}

impl CloudConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(TextVizError::invalid_config("max_words must be > 0"));
        }
        Ok(())
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn with_stopwords<I, S>(mut self, stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = Some(stopwords.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_collapse_plurals(mut self, collapse: bool) -> Self {
        self.collapse_plurals = collapse;
        self
    }
}
