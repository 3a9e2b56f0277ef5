//! N-gram extraction and counting
//!
//! [`TermCounter`] turns a document collection into a [`TermFrequencies`]
//! table. Enumeration order matters: it is the tie-breaker for every
//! ranking built on top of the table.
//!
//! - With a fixed [`Vocabulary`], enumeration follows vocabulary index order
//!   and every vocabulary term is present (zero counts included).
//! - Otherwise terms are discovered from the data and enumerated in first
//!   occurrence order across the whole collection scan.

use super::stopwords::{StopwordFilter, ENGLISH_STOPWORDS};
use super::tokenizer::Tokenizer;
use crate::errors::{Result, TextVizError};
use crate::types::{FrequencyConfig, NgramRange, StringPool, TermCount, Vocabulary};

/// Term → total count across a collection, in enumeration order
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    terms: StringPool,
    counts: Vec<usize>,
}

impl TermFrequencies {
    /// Count of a term, if it is in the table
    pub fn get(&self, term: &str) -> Option<usize> {
        self.terms
            .get_id(term)
            .and_then(|id| self.counts.get(id as usize).copied())
    }

    /// Iterate `(term, count)` in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.terms.iter().zip(self.counts.iter().copied())
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All terms sorted by count descending.
    ///
    /// The sort is stable, so equal counts keep enumeration order.
    pub fn ranked(&self) -> Vec<TermCount> {
        let mut entries: Vec<TermCount> = self
            .iter()
            .map(|(term, count)| TermCount::new(term, count))
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Word n-gram counter with stopword removal and an optional fixed vocabulary
#[derive(Debug, Clone, Default)]
pub struct TermCounter {
    tokenizer: Tokenizer,
    ngram_range: NgramRange,
    stopwords: Option<StopwordFilter>,
    vocabulary: Option<Vocabulary>,
}

impl TermCounter {
    /// Create a counter for the given n-gram range
    pub fn new(ngram_range: NgramRange) -> Self {
        Self {
            ngram_range,
            ..Self::default()
        }
    }

    /// Create a counter from a frequency config
    pub fn from_config(config: &FrequencyConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            ngram_range: config.ngram_range,
            stopwords: config_stopwords(config),
            vocabulary: config.vocabulary.clone(),
        }
    }

    /// Use a custom tokenizer, e.g. one that preserves case
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Remove these tokens before n-gram construction
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Count only the terms of this vocabulary
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn ngram_range(&self) -> NgramRange {
        self.ngram_range
    }

    /// All n-grams of one document.
    ///
    /// Stopwords are dropped before windowing, so an n-gram may join words
    /// that were separated by a stopword in the raw text. For each `n` from
    /// `min_n` to `max_n`, windows are emitted left to right.
    pub fn ngrams(&self, document: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(document);
        let content: Vec<&str> = match &self.stopwords {
            Some(filter) => filter.retain_content(&tokens),
            None => tokens.iter().map(String::as_str).collect(),
        };

        let mut grams = Vec::new();
        for n in self.ngram_range.min_n()..=self.ngram_range.max_n() {
            if n > content.len() {
                break;
            }
            grams.extend(content.windows(n).map(|w| w.join(" ")));
        }
        grams
    }

    /// Count every n-gram across the collection.
    ///
    /// Fails with [`TextVizError::EmptyVocabulary`] when nothing was counted.
    pub fn count<S: AsRef<str>>(&self, documents: &[S]) -> Result<TermFrequencies> {
        trace_stage!("count_terms");

        if documents.is_empty() {
            return Err(TextVizError::empty_vocabulary("document collection is empty"));
        }

        let frequencies = match &self.vocabulary {
            Some(vocab) => self.count_fixed(documents, vocab)?,
            None => self.count_discovered(documents)?,
        };

        trace_event!(
            documents = documents.len(),
            terms = frequencies.len(),
            total = frequencies.total(),
            "counted terms"
        );
        Ok(frequencies)
    }

    fn count_discovered<S: AsRef<str>>(&self, documents: &[S]) -> Result<TermFrequencies> {
        let mut terms = StringPool::new();
        let mut counts: Vec<usize> = Vec::new();

        for doc in documents {
            for gram in self.ngrams(doc.as_ref()) {
                let id = terms.intern(&gram) as usize;
                if id == counts.len() {
                    counts.push(0);
                }
                counts[id] += 1;
            }
        }

        if counts.is_empty() {
            return Err(TextVizError::empty_vocabulary(
                "no terms remain after tokenization; documents may only contain stopwords",
            ));
        }
        Ok(TermFrequencies { terms, counts })
    }

    fn count_fixed<S: AsRef<str>>(
        &self,
        documents: &[S],
        vocab: &Vocabulary,
    ) -> Result<TermFrequencies> {
        // vocabulary index -> slot in the table; stopword terms get no slot
        let mut terms = StringPool::with_capacity(vocab.len());
        let slots: Vec<Option<usize>> = vocab
            .terms()
            .iter()
            .map(|term| (!self.holds_stopword(term)).then(|| terms.intern(term) as usize))
            .collect();
        let mut counts = vec![0usize; terms.len()];

        for doc in documents {
            for gram in self.ngrams(doc.as_ref()) {
                if let Some(slot) = vocab.index_of(&gram).and_then(|idx| slots[idx as usize]) {
                    counts[slot] += 1;
                }
            }
        }

        if counts.iter().all(|&c| c == 0) {
            return Err(TextVizError::empty_vocabulary(
                "no vocabulary term occurs in the documents",
            ));
        }
        Ok(TermFrequencies { terms, counts })
    }

    /// True when any word of `term` is a stopword
    fn holds_stopword(&self, term: &str) -> bool {
        self.stopwords
            .as_ref()
            .is_some_and(|filter| term.split(' ').any(|word| filter.is_stopword(word)))
    }
}

/// The stopword filter a frequency config asks for, if any
fn config_stopwords(config: &FrequencyConfig) -> Option<StopwordFilter> {
    let given = config.stopwords.as_deref();
    if !config.english_stopwords {
        return StopwordFilter::from_option(given);
    }
    let english = ENGLISH_STOPWORDS.iter().map(|w| w.to_string());
    Some(StopwordFilter::new(english.chain(given.unwrap_or_default().iter().cloned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min_n: usize, max_n: usize) -> NgramRange {
        NgramRange::new(min_n, max_n).unwrap()
    }

    #[test]
    fn test_unigram_counts() {
        let docs = ["the cat sat", "the cat ran", "a cat sat"];
        let freqs = TermCounter::new(range(1, 1)).count(&docs).unwrap();

        assert_eq!(freqs.get("cat"), Some(3));
        assert_eq!(freqs.get("the"), Some(2));
        assert_eq!(freqs.get("sat"), Some(2));
        assert_eq!(freqs.get("ran"), Some(1));
        // "a" is a single character and never a token
        assert_eq!(freqs.get("a"), None);
        assert_eq!(freqs.total(), 8);
    }

    #[test]
    fn test_first_occurrence_enumeration() {
        let docs = ["the cat sat", "the cat ran"];
        let freqs = TermCounter::new(range(1, 1)).count(&docs).unwrap();
        let order: Vec<&str> = freqs.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["the", "cat", "sat", "ran"]);
    }

    #[test]
    fn test_ngram_order_shorter_first() {
        let counter = TermCounter::new(range(1, 2));
        assert_eq!(
            counter.ngrams("big red dog"),
            vec!["big", "red", "dog", "big red", "red dog"]
        );
    }

    #[test]
    fn test_ngrams_longer_than_document() {
        let counter = TermCounter::new(range(2, 4));
        assert_eq!(counter.ngrams("big red"), vec!["big red"]);
        assert!(counter.ngrams("solo").is_empty());
    }

    #[test]
    fn test_stopwords_removed_before_windowing() {
        let counter = TermCounter::new(range(2, 2)).with_stopwords(StopwordFilter::new(["the"]));
        assert_eq!(counter.ngrams("cat the dog"), vec!["cat dog"]);
    }

    #[test]
    fn test_fixed_vocabulary_order_and_zero_counts() {
        let vocab = Vocabulary::from_terms(["dog", "cat", "bird"]).unwrap();
        let counter = TermCounter::new(range(1, 1)).with_vocabulary(vocab);
        let freqs = counter.count(&["cat cat dog", "fish"]).unwrap();

        let entries: Vec<(&str, usize)> = freqs.iter().collect();
        assert_eq!(entries, vec![("dog", 1), ("cat", 2), ("bird", 0)]);
        assert_eq!(freqs.get("fish"), None);
    }

    #[test]
    fn test_fixed_vocabulary_without_matches() {
        let vocab = Vocabulary::from_mapping([("ab", 0), ("bc", 1)]).unwrap();
        let counter = TermCounter::new(range(1, 1)).with_vocabulary(vocab);
        let err = counter.count(&["cd de ef"]).unwrap_err();
        assert!(err.is_empty_vocabulary());
    }

    #[test]
    fn test_only_stopwords_is_empty_vocabulary() {
        let counter = TermCounter::new(range(1, 1)).with_stopwords(StopwordFilter::new(["the"]));
        assert!(counter.count(&["the the"]).unwrap_err().is_empty_vocabulary());
    }

    #[test]
    fn test_empty_collection() {
        let docs: [&str; 0] = [];
        let err = TermCounter::new(range(1, 1)).count(&docs).unwrap_err();
        assert!(err.is_empty_vocabulary());
    }

    #[test]
    fn test_ranked_is_stable() {
        let freqs = TermCounter::new(range(1, 1))
            .count(&["the cat sat", "the cat ran", "a cat sat"])
            .unwrap();
        let ranked = freqs.ranked();
        assert_eq!(ranked[0], TermCount::new("cat", 3));
        assert_eq!(ranked[1], TermCount::new("the", 2));
        assert_eq!(ranked[2], TermCount::new("sat", 2));
        assert_eq!(ranked[3], TermCount::new("ran", 1));
    }

    #[test]
    fn test_from_config() {
        let cfg = FrequencyConfig::default()
            .with_ngram_range(range(1, 2))
            .with_stopwords(["is"]);
        let counter = TermCounter::from_config(&cfg);
        assert_eq!(counter.ngrams("sky is blue"), vec!["sky", "blue", "sky blue"]);
    }

    #[test]
    fn test_from_config_english_stopwords() {
        let cfg = FrequencyConfig::default()
            .with_english_stopwords(true)
            .with_stopwords(["sky"]);
        let counter = TermCounter::from_config(&cfg);
        assert_eq!(counter.ngrams("the sky is very blue"), vec!["blue"]);
    }

    #[test]
    fn test_fixed_vocabulary_drops_stopword_terms() {
        let vocab = Vocabulary::from_terms(["the", "cat", "the cat", "sat"]).unwrap();
        let counter = TermCounter::new(range(1, 2))
            .with_stopwords(StopwordFilter::new(["the"]))
            .with_vocabulary(vocab);
        let freqs = counter.count(&["the cat sat"]).unwrap();

        let entries: Vec<(&str, usize)> = freqs.iter().collect();
        assert_eq!(entries, vec![("cat", 1), ("sat", 1)]);
        assert_eq!(freqs.get("the"), None);
    }

    #[test]
    fn test_case_preserving_tokenizer() {
        let counter = TermCounter::new(range(1, 1))
            .with_tokenizer(Tokenizer::new().with_preserve_case(true));
        let freqs = counter.count(&["Cat cat"]).unwrap();
        assert_eq!(freqs.get("Cat"), Some(1));
        assert_eq!(freqs.get("cat"), Some(1));
    }
}
