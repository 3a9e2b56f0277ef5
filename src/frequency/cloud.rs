//! Word-cloud weights and Venn-style vocabulary comparison
//!
//! The cloud tokenizer is looser than the n-gram analyzer: it keeps
//! apostrophes inside words, strips a trailing possessive `'s`, drops
//! numbers, and can fold plurals into their singular form.

use crate::errors::{Result, TextVizError};
use crate::nlp::stopwords::StopwordFilter;
use crate::types::CloudConfig;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const CLOUD_PATTERN: &str = r"\w[\w']+";

fn cloud_regex() -> &'static Regex {
    static CLOUD_RE: OnceLock<Regex> = OnceLock::new();
    CLOUD_RE.get_or_init(|| Regex::new(CLOUD_PATTERN).expect("CLOUD_PATTERN is a valid regex"))
}

/// A word sized for a cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudWord {
    pub word: String,
    pub count: usize,
    /// `count / max_count` within the cloud, in `(0, 1]`
    pub weight: f64,
}

/// Vocabulary comparison of two corpora
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VennTerms {
    pub left_only: Vec<CloudWord>,
    /// Counts are summed over both sides
    pub shared: Vec<CloudWord>,
    pub right_only: Vec<CloudWord>,
}

/// Compute cloud weights for a document collection (joined with spaces).
pub fn word_cloud<S: AsRef<str>>(documents: &[S], config: &CloudConfig) -> Result<Vec<CloudWord>> {
    trace_stage!("word_cloud");
    config.validate()?;

    let counts = cloud_counts(documents, config);
    if counts.is_empty() {
        return Err(TextVizError::empty_vocabulary(
            "a word cloud needs at least one word",
        ));
    }
    Ok(top_weighted(counts, config.max_words))
}

/// Split two corpora into left-only, shared, and right-only clouds.
///
/// Each region is capped at `max_words` and weighted against its own
/// largest count.
pub fn compare_clouds<L, R>(left: &[L], right: &[R], config: &CloudConfig) -> Result<VennTerms>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    trace_stage!("compare_clouds");
    config.validate()?;

    let left_counts = cloud_counts(left, config);
    let right_counts = cloud_counts(right, config);
    if left_counts.is_empty() && right_counts.is_empty() {
        return Err(TextVizError::empty_vocabulary(
            "neither corpus contains a cloud word",
        ));
    }

    let right_index: FxHashMap<&str, usize> = right_counts
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();
    let left_index: FxHashMap<&str, usize> = left_counts
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();

    let mut left_only = Vec::new();
    let mut shared = Vec::new();
    for (word, count) in &left_counts {
        match right_index.get(word.as_str()) {
            Some(other) => shared.push((word.clone(), count + other)),
            None => left_only.push((word.clone(), *count)),
        }
    }
    let right_only: Vec<(String, usize)> = right_counts
        .iter()
        .filter(|(word, _)| !left_index.contains_key(word.as_str()))
        .cloned()
        .collect();

    Ok(VennTerms {
        left_only: top_weighted(left_only, config.max_words),
        shared: top_weighted(shared, config.max_words),
        right_only: top_weighted(right_only, config.max_words),
    })
}

/// Word counts in first-occurrence order
fn cloud_counts<S: AsRef<str>>(documents: &[S], config: &CloudConfig) -> Vec<(String, usize)> {
    let stopwords = match &config.stopwords {
        Some(words) => StopwordFilter::new(words.iter().map(|w| w.to_lowercase())),
        None => StopwordFilter::english(),
    };

    let text = documents
        .iter()
        .map(|d| d.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for m in cloud_regex().find_iter(&text) {
        let word = m.as_str();
        let word = word.strip_suffix("'s").unwrap_or(word);
        if word.is_empty() || word.chars().all(char::is_numeric) || stopwords.is_stopword(word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.to_string(), counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    if config.collapse_plurals {
        collapse_plurals(counts, &index)
    } else {
        counts
    }
}

fn collapse_plurals(
    mut counts: Vec<(String, usize)>,
    index: &FxHashMap<String, usize>,
) -> Vec<(String, usize)> {
    let mut folded = vec![false; counts.len()];
    for i in 0..counts.len() {
        let word = &counts[i].0;
        if !word.ends_with('s') || word.ends_with("ss") {
            continue;
        }
        let singular = &word[..word.len() - 1];
        if let Some(&j) = index.get(singular) {
            let plural_count = counts[i].1;
            counts[j].1 += plural_count;
            folded[i] = true;
        }
    }
    counts
        .into_iter()
        .zip(folded)
        .filter_map(|(entry, gone)| (!gone).then_some(entry))
        .collect()
}

fn top_weighted(mut counts: Vec<(String, usize)>, max_words: usize) -> Vec<CloudWord> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(max_words);
    let max = counts.first().map_or(1, |(_, c)| *c).max(1) as f64;
    counts
        .into_iter()
        .map(|(word, count)| CloudWord {
            word,
            count,
            weight: count as f64 / max,
        })
        .collect()
}
