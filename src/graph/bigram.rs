//! Bigram graphs: the most common adjacent word pairs as directed edges
//!
//! Unlike the n-gram analyzer, words here are whatever sits between single
//! spaces, so punctuation stays attached ("cat." and "cat" differ). All
//! documents are joined with a space before pairing, which lets a bigram
//! span the boundary between two documents.

use super::builder::{GraphBuilder, WordGraph};
use crate::errors::Result;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::BigramConfig;
use rustc_hash::FxHashMap;

/// Bigram graph builder configured by a [`BigramConfig`]
#[derive(Debug, Clone, Default)]
pub struct BigramGraphBuilder {
    config: BigramConfig,
}

impl BigramGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BigramConfig) -> Self {
        Self { config }
    }

    /// Build the graph; an input without bigrams yields an empty graph
    pub fn build<S: AsRef<str>>(&self, documents: &[S]) -> Result<WordGraph> {
        trace_stage!("bigram_graph");
        self.config.validate()?;

        let stopwords = StopwordFilter::from_option(self.config.stopwords.as_deref());
        let cleaned: Vec<String> = documents
            .iter()
            .map(|doc| {
                let lower = doc.as_ref().to_lowercase();
                match &stopwords {
                    Some(filter) => lower
                        .split(' ')
                        .filter(|w| !filter.is_stopword(w))
                        .collect::<Vec<_>>()
                        .join(" "),
                    None => lower,
                }
            })
            .collect();
        let text = cleaned.join(" ");

        let mut counts: Vec<((&str, &str), usize)> = Vec::new();
        let mut index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
        let words: Vec<&str> = text.split(' ').collect();
        for pair in words.windows(2) {
            let key = (pair[0], pair[1]);
            if key.0.is_empty() || key.1.is_empty() {
                continue;
            }
            match index.get(&key) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push((key, 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.config.total_bigrams);

        let mut builder = GraphBuilder::with_capacity(counts.len() * 2);
        for ((left, right), count) in &counts {
            let from = builder.get_or_create_node(left);
            let to = builder.get_or_create_node(right);
            builder.set_edge(from, to, *count as f64);
        }

        trace_event!(bigrams = index.len(), kept = counts.len(), "bigram graph built");
        Ok(builder.build())
    }
}

/// Build a graph of the `total_bigrams` most common bigrams
pub fn build_bigram_graph<S: AsRef<str>>(
    documents: &[S],
    stopwords: Option<&[String]>,
    total_bigrams: usize,
) -> Result<WordGraph> {
    let config = BigramConfig {
        stopwords: stopwords.map(<[String]>::to_vec),
        total_bigrams,
    };
    BigramGraphBuilder::with_config(config).build(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TextVizError;

    #[test]
    fn test_most_common_bigrams() {
        let docs = ["new york city", "new york state", "big city"];
        let graph = build_bigram_graph(&docs, None, 2).unwrap();

        assert_eq!(graph.edge_pairs(), vec![("new", "york"), ("york", "city")]);
        assert_eq!(graph.edge_weight("new", "york"), Some(2.0));
    }

    #[test]
    fn test_bigrams_span_documents() {
        let graph = build_bigram_graph(&["alpha", "beta"], None, 5).unwrap();
        assert_eq!(graph.edge_pairs(), vec![("alpha", "beta")]);
    }

    #[test]
    fn test_lowercase_and_stopwords() {
        let stop = vec!["the".to_string()];
        let graph = build_bigram_graph(&["The Cat the hat"], Some(&stop), 5).unwrap();
        assert_eq!(graph.edge_pairs(), vec![("cat", "hat")]);
    }

    #[test]
    fn test_empty_words_skipped() {
        let graph = build_bigram_graph(&["red  blue"], None, 5).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let graph = build_bigram_graph(&["good dog. good dog"], None, 5).unwrap();
        assert_eq!(graph.edge_weight("good", "dog."), Some(1.0));
        assert_eq!(graph.edge_weight("good", "dog"), Some(1.0));
    }

    #[test]
    fn test_zero_total_rejected() {
        let err = build_bigram_graph(&["a b"], None, 0).unwrap_err();
        assert!(matches!(err, TextVizError::InvalidConfig { .. }));
    }
}
