//! A labeled document collection
//!
//! [`Corpus`] bundles texts with optional per-document labels and exposes
//! every builder in the crate as a method. Label selection narrows a corpus
//! before any of them runs.

use crate::analysis::{
    lexical_dispersion, word_correlations_with_config, CorrelationMatrix, Dispersion,
};
use crate::errors::{Result, TextVizError};
use crate::frequency::{compare_clouds, word_cloud, CloudWord, FrequencyRanker, VennTerms};
use crate::graph::{BigramGraphBuilder, PhraseNetBuilder, WordGraph};
use crate::types::{
    BigramConfig, CloudConfig, CorrelationConfig, FrequencyConfig, PhraseNetConfig, RankedTerms,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Which labels to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSelector {
    One(String),
    Many(Vec<String>),
}

impl LabelSelector {
    fn labels(&self) -> Result<FxHashSet<&str>> {
        let labels: FxHashSet<&str> = match self {
            LabelSelector::One(label) => std::iter::once(label.as_str()).collect(),
            LabelSelector::Many(labels) => labels.iter().map(String::as_str).collect(),
        };
        if labels.is_empty() {
            return Err(TextVizError::invalid_label_selector(
                "selector names no labels",
            ));
        }
        Ok(labels)
    }
}

impl From<&str> for LabelSelector {
    fn from(label: &str) -> Self {
        LabelSelector::One(label.to_string())
    }
}

impl From<Vec<&str>> for LabelSelector {
    fn from(labels: Vec<&str>) -> Self {
        LabelSelector::Many(labels.into_iter().map(str::to_string).collect())
    }
}

/// Texts with optional parallel labels
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corpus {
    texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

impl Corpus {
    /// An unlabeled corpus
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            labels: None,
        }
    }

    /// A labeled corpus; every text needs exactly one label
    pub fn with_labels<I, S, L, T>(texts: I, labels: L) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if texts.len() != labels.len() {
            return Err(TextVizError::label_mismatch(texts.len(), labels.len()));
        }
        Ok(Self {
            texts,
            labels: Some(labels),
        })
    }

    /// Parse a corpus from JSON, re-checking the label invariant
    pub fn from_json(json: &str) -> Result<Self> {
        let corpus: Self = serde_json::from_str(json)?;
        if let Some(labels) = &corpus.labels {
            if labels.len() != corpus.texts.len() {
                return Err(TextVizError::label_mismatch(corpus.texts.len(), labels.len()));
            }
        }
        Ok(corpus)
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Keep only documents whose label is selected
    pub fn select(&self, selector: &LabelSelector) -> Result<Corpus> {
        let Some(labels) = &self.labels else {
            return Err(TextVizError::invalid_label_selector(
                "corpus has no labels to select from",
            ));
        };
        let wanted = selector.labels()?;

        let (texts, kept): (Vec<String>, Vec<String>) = self
            .texts
            .iter()
            .zip(labels)
            .filter(|(_, label)| wanted.contains(label.as_str()))
            .map(|(text, label)| (text.clone(), label.clone()))
            .unzip();

        trace_event!(kept = texts.len(), of = self.texts.len(), "label selection");
        Ok(Corpus {
            texts,
            labels: Some(kept),
        })
    }

    /// Ranked n-gram frequencies
    pub fn frequency(&self, config: &FrequencyConfig) -> Result<RankedTerms> {
        FrequencyRanker::with_config(config.clone()).rank(&self.texts)
    }

    /// Connector-gated phrase net
    pub fn phrase_net(&self, config: &PhraseNetConfig) -> Result<WordGraph> {
        PhraseNetBuilder::with_config(config.clone()).build(&self.texts)
    }

    /// Most common bigrams as a graph
    pub fn bigram_graph(&self, config: &BigramConfig) -> Result<WordGraph> {
        BigramGraphBuilder::with_config(config.clone()).build(&self.texts)
    }

    /// Word-cloud weights of all texts
    pub fn word_cloud(&self, config: &CloudConfig) -> Result<Vec<CloudWord>> {
        word_cloud(&self.texts, config)
    }

    /// Venn comparison of two label selections
    pub fn compare(
        &self,
        left: &LabelSelector,
        right: &LabelSelector,
        config: &CloudConfig,
    ) -> Result<VennTerms> {
        let left = self.select(left)?;
        let right = self.select(right)?;
        compare_clouds(&left.texts, &right.texts, config)
    }

    /// Where target words occur
    pub fn dispersion<T: AsRef<str>>(&self, targets: &[T]) -> Result<Dispersion> {
        lexical_dispersion(&self.texts, targets)
    }

    /// Document-level correlation of words
    pub fn correlations<W: AsRef<str>>(
        &self,
        words: &[W],
        config: &CorrelationConfig,
    ) -> Result<CorrelationMatrix> {
        word_correlations_with_config(&self.texts, words, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled() -> Corpus {
        Corpus::with_labels(
            ["dogs are loyal", "cats are proud", "dogs are loud"],
            ["dog", "cat", "dog"],
        )
        .unwrap()
    }

    #[test]
    fn test_label_mismatch() {
        let err = Corpus::with_labels(["a", "b"], ["x"]).unwrap_err();
        assert_eq!(err, TextVizError::label_mismatch(2, 1));
    }

    #[test]
    fn test_select_single_label() {
        let dogs = labeled().select(&"dog".into()).unwrap();
        assert_eq!(dogs.texts(), &["dogs are loyal", "dogs are loud"]);
        assert_eq!(dogs.labels().unwrap(), &["dog", "dog"]);
    }

    #[test]
    fn test_select_many_labels() {
        let all = labeled().select(&vec!["dog", "cat"].into()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_invalid_selectors() {
        let empty = LabelSelector::Many(Vec::new());
        assert!(matches!(
            labeled().select(&empty),
            Err(TextVizError::InvalidLabelSelector { .. })
        ));

        let unlabeled = Corpus::new(["x y"]);
        assert!(matches!(
            unlabeled.select(&"x".into()),
            Err(TextVizError::InvalidLabelSelector { .. })
        ));
    }

    #[test]
    fn test_selector_serde_untagged() {
        let one: LabelSelector = serde_json::from_str(r#""dog""#).unwrap();
        assert_eq!(one, LabelSelector::One("dog".into()));
        let many: LabelSelector = serde_json::from_str(r#"["dog", "cat"]"#).unwrap();
        assert_eq!(many, LabelSelector::from(vec!["dog", "cat"]));
    }

    #[test]
    fn test_from_json_checks_labels() {
        let ok = Corpus::from_json(r#"{"texts": ["a b"], "labels": ["x"]}"#).unwrap();
        assert_eq!(ok.len(), 1);
        let bad = Corpus::from_json(r#"{"texts": ["a b"], "labels": []}"#);
        assert!(matches!(bad, Err(TextVizError::LabelMismatch { .. })));
    }

    #[test]
    fn test_frequency_on_selection() {
        let dogs = labeled().select(&"dog".into()).unwrap();
        let ranked = dogs.frequency(&FrequencyConfig::default().with_top_k(2)).unwrap();
        assert_eq!(ranked.labels(), vec!["dogs", "are"]);
    }

    #[test]
    fn test_phrase_net_on_corpus() {
        let graph = labeled().phrase_net(&PhraseNetConfig::new(["are"])).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.contains_node("proud"));
    }

    #[test]
    fn test_compare_labels() {
        let venn = labeled()
            .compare(&"dog".into(), &"cat".into(), &CloudConfig::default())
            .unwrap();
        let shared: Vec<&str> = venn.shared.iter().map(|w| w.word.as_str()).collect();
        assert!(shared.is_empty());
        assert_eq!(venn.right_only.len(), 2);
    }
}
