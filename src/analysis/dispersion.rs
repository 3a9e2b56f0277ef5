//! Lexical dispersion: where target words occur along a corpus
//!
//! Documents are split on whitespace and walked as one continuous word
//! stream. Matching is exact and case-sensitive.
//!
//! Targets that never occur are not an error: the result simply has no
//! points for them, and a corpus without any target has an empty `points`
//! list. Callers that need at least one hit can check
//! [`Dispersion::is_empty`].

use crate::errors::{Result, TextVizError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One occurrence of a target word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispersionPoint {
    /// Word offset from the start of the first document
    pub offset: usize,
    pub target: String,
    /// Index of the document containing the occurrence
    pub document: usize,
}

/// Occurrences of every target, in stream order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dispersion {
    pub targets: Vec<String>,
    pub points: Vec<DispersionPoint>,
    /// Length of the word stream
    pub total_words: usize,
}

impl Dispersion {
    /// True when no target occurs anywhere
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Offsets of a single target
    pub fn offsets_of(&self, target: &str) -> Vec<usize> {
        self.points
            .iter()
            .filter(|p| p.target == target)
            .map(|p| p.offset)
            .collect()
    }
}

/// Locate every occurrence of `targets` in `documents`
pub fn lexical_dispersion<S, T>(documents: &[S], targets: &[T]) -> Result<Dispersion>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    trace_stage!("lexical_dispersion");
    if targets.is_empty() {
        return Err(TextVizError::invalid_config(
            "at least one target word is required",
        ));
    }

    let wanted: FxHashSet<&str> = targets.iter().map(|t| t.as_ref()).collect();
    let mut points = Vec::new();
    let mut offset = 0;

    for (document, text) in documents.iter().enumerate() {
        for word in text.as_ref().split_whitespace() {
            if wanted.contains(word) {
                points.push(DispersionPoint {
                    offset,
                    target: word.to_string(),
                    document,
                });
            }
            offset += 1;
        }
    }

    Ok(Dispersion {
        targets: targets.iter().map(|t| t.as_ref().to_string()).collect(),
        points,
        total_words: offset,
    })
}
