//! Ranked frequency tables
//!
//! Counts n-grams across a collection, sorts them by count descending
//! (ties keep enumeration order) and keeps the top K.

use crate::errors::{Result, TextVizError};
use crate::nlp::counter::TermCounter;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::{FrequencyConfig, NgramRange, RankedTerms, Vocabulary};

/// Frequency ranker configured by a [`FrequencyConfig`]
#[derive(Debug, Clone, Default)]
pub struct FrequencyRanker {
    config: FrequencyConfig,
}

impl FrequencyRanker {
    /// Create a ranker with the default config (top 20 unigrams)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: FrequencyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrequencyConfig {
        &self.config
    }

    /// Rank the terms of a document collection
    pub fn rank<S: AsRef<str>>(&self, documents: &[S]) -> Result<RankedTerms> {
        trace_stage!("rank_terms");
        self.config.validate()?;

        let counter = TermCounter::from_config(&self.config);
        rank_with(&counter, documents, self.config.top_k, self.config.strict)
    }
}

/// Rank the top `k` terms of `documents`.
///
/// Returns all available terms, flagged through
/// [`RankedTerms::is_truncated`], when the vocabulary holds fewer than `k`.
pub fn rank_terms<S: AsRef<str>>(
    documents: &[S],
    k: usize,
    stopwords: Option<&StopwordFilter>,
    ngram_range: NgramRange,
    vocabulary: Option<&Vocabulary>,
) -> Result<RankedTerms> {
    if k == 0 {
        return Err(TextVizError::invalid_config("k must be > 0"));
    }

    let mut counter = TermCounter::new(ngram_range);
    if let Some(filter) = stopwords {
        counter = counter.with_stopwords(filter.clone());
    }
    if let Some(vocab) = vocabulary {
        counter = counter.with_vocabulary(vocab.clone());
    }

    rank_with(&counter, documents, k, false)
}

fn rank_with<S: AsRef<str>>(
    counter: &TermCounter,
    documents: &[S],
    requested: usize,
    strict: bool,
) -> Result<RankedTerms> {
    let frequencies = counter.count(documents)?;
    let available = frequencies.len();

    if available < requested && strict {
        return Err(TextVizError::insufficient_terms(requested, available));
    }

    let mut terms = frequencies.ranked();
    terms.truncate(requested);

    if terms.len() < requested {
        trace_event!(requested, available, "fewer terms than requested");
    }

    Ok(RankedTerms {
        terms,
        requested,
        available,
    })
}
