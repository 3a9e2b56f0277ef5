//! Word correlation: how often target words share a document
//!
//! Each target becomes a binary vector over documents (present / absent)
//! and every pair of vectors gets a Pearson (phi) coefficient. Targets are
//! tokenized like documents, so multi-word targets match as n-grams.
//! Matching is case-sensitive unless [`CorrelationConfig::ignore_case`] is
//! set.

use crate::errors::{Result, TextVizError};
use crate::nlp::counter::TermCounter;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{CorrelationConfig, NgramRange};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Symmetric correlation matrix over target words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub words: Vec<String>,
    /// `values[i][j]`; `None` where a word never varies across documents
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient between two target words
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.words.iter().position(|w| w == a)?;
        let j = self.words.iter().position(|w| w == b)?;
        self.values[i][j]
    }
}

/// Correlate document-level presence of `words` across `documents`,
/// matching case-sensitively
pub fn word_correlations<S, W>(documents: &[S], words: &[W]) -> Result<CorrelationMatrix>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    word_correlations_with_config(documents, words, &CorrelationConfig::default())
}

/// Correlate document-level presence of `words` under `config`
pub fn word_correlations_with_config<S, W>(
    documents: &[S],
    words: &[W],
    config: &CorrelationConfig,
) -> Result<CorrelationMatrix>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    trace_stage!("word_correlations");
    if words.is_empty() {
        return Err(TextVizError::invalid_config("at least one word is required"));
    }
    if documents.is_empty() {
        return Err(TextVizError::empty_vocabulary("document collection is empty"));
    }

    let tokenizer = Tokenizer::new().with_preserve_case(!config.ignore_case);
    let keys: Vec<String> = words
        .iter()
        .map(|w| tokenizer.tokenize(w.as_ref()).join(" "))
        .collect();
    let lengths = keys.iter().map(|k| k.split(' ').count().max(1));
    let min_n = lengths.clone().min().unwrap_or(1);
    let max_n = lengths.max().unwrap_or(1);
    let counter = TermCounter::new(NgramRange::new(min_n, max_n)?).with_tokenizer(tokenizer);

    let presence: Vec<Vec<bool>> = {
        let grams: Vec<FxHashSet<String>> = documents
            .iter()
            .map(|doc| counter.ngrams(doc.as_ref()).into_iter().collect())
            .collect();
        keys.iter()
            .map(|key| grams.iter().map(|g| g.contains(key)).collect())
            .collect()
    };

    let values = presence
        .iter()
        .map(|a| presence.iter().map(|b| pearson(a, b)).collect())
        .collect();

    Ok(CorrelationMatrix {
        words: words.iter().map(|w| w.as_ref().to_string()).collect(),
        values,
    })
}

fn pearson(a: &[bool], b: &[bool]) -> Option<f64> {
    let n = a.len() as f64;
    let xs = a.iter().map(|&v| if v { 1.0 } else { 0.0 });
    let ys = b.iter().map(|&v| if v { 1.0 } else { 0.0 });
    let mean_x = xs.clone().sum::<f64>() / n;
    let mean_y = ys.clone().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}
