//! Phrase nets: word graphs gated by connector terms
//!
//! A phrase net links the first and third word of every frequent trigram
//! whose middle is a connector ("dogs *are* animals" gives
//! `dogs -> animals`). Multi-word connectors are glued with underscores in
//! both the connector list and the documents so they survive tokenization
//! as a single token.
//!
//! The builder never mutates caller data: documents are rewritten into a
//! private copy, which [`PhraseNetBuilder::build_with_corpus`] can hand back.

use super::builder::{GraphBuilder, WordGraph};
use crate::errors::{Result, TextVizError};
use crate::nlp::counter::TermCounter;
use crate::types::{EdgeWeighting, NgramRange, PhraseNetConfig, TermCount};

/// Connectors normalized for trigram matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSet {
    /// `(original phrase, underscored phrase)` for connectors containing spaces
    rewrites: Vec<(String, String)>,
    /// Connectors wrapped in single spaces, e.g. `" is_a "`
    patterns: Vec<String>,
}

impl ConnectorSet {
    /// Normalize a connector list
    pub fn new<S: AsRef<str>>(connectors: &[S]) -> Self {
        let mut rewrites = Vec::new();
        let mut patterns = Vec::with_capacity(connectors.len());

        for connector in connectors {
            let connector = connector.as_ref();
            let joined = if connector.contains(' ') {
                let joined = connector.replace(' ', "_");
                rewrites.push((connector.to_string(), joined.clone()));
                joined
            } else {
                connector.to_string()
            };
            patterns.push(format!(" {} ", joined));
        }

        Self { rewrites, patterns }
    }

    /// Glue every multi-word connector in `document`.
    ///
    /// This is a literal, case-sensitive substring replacement, so a phrase
    /// can also match across word boundaries ("is a" inside "this apple").
    pub fn rewrite(&self, document: &str) -> String {
        let mut text = document.to_string();
        for (phrase, joined) in &self.rewrites {
            if text.contains(phrase.as_str()) {
                text = text.replace(phrase.as_str(), joined);
            }
        }
        text
    }

    /// True when the trigram contains at least one wrapped connector
    pub fn matches(&self, trigram: &str) -> bool {
        self.patterns.iter().any(|p| trigram.contains(p.as_str()))
    }

    /// Wrapped connector patterns, in connector order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Phrase net builder configured by a [`PhraseNetConfig`]
#[derive(Debug, Clone)]
pub struct PhraseNetBuilder {
    config: PhraseNetConfig,
}

impl PhraseNetBuilder {
    /// Create a builder for these connectors with default settings
    pub fn new<I, S>(connectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            config: PhraseNetConfig::new(connectors),
        }
    }

    /// Create with custom config
    pub fn with_config(config: PhraseNetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhraseNetConfig {
        &self.config
    }

    /// Build the phrase net of a document collection
    pub fn build<S: AsRef<str>>(&self, documents: &[S]) -> Result<WordGraph> {
        self.build_with_corpus(documents).map(|(graph, _)| graph)
    }

    /// Build the phrase net and also return the rewritten documents
    pub fn build_with_corpus<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<(WordGraph, Vec<String>)> {
        trace_stage!("phrase_net");
        self.config.validate()?;

        let connectors = ConnectorSet::new(&self.config.connectors);
        let rewritten: Vec<String> = documents
            .iter()
            .map(|doc| connectors.rewrite(doc.as_ref()))
            .collect();

        let trigrams = ranked_trigrams(&rewritten)?;
        let graph = self.select_edges(&connectors, &trigrams);

        trace_event!(
            trigrams = trigrams.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "phrase net built"
        );

        if graph.is_empty() && self.config.require_edges {
            return Err(TextVizError::no_matching_trigrams(format!(
                "no trigram contains any of {:?}",
                self.config.connectors
            )));
        }
        Ok((graph, rewritten))
    }

    fn select_edges(&self, connectors: &ConnectorSet, trigrams: &[TermCount]) -> WordGraph {
        let mut builder = GraphBuilder::new();
        let mut added = 0;

        for trigram in trigrams {
            if added >= self.config.number_of_pairs {
                break;
            }
            if !connectors.matches(&trigram.term) {
                continue;
            }

            let mut words = trigram.term.split(' ');
            let (Some(left), Some(_), Some(right)) = (words.next(), words.next(), words.next())
            else {
                continue;
            };

            let weight = match self.config.edge_weighting {
                EdgeWeighting::Count => trigram.count as f64,
                EdgeWeighting::Unit => 1.0,
            };
            let from = builder.get_or_create_node(left);
            let to = builder.get_or_create_node(right);
            builder.add_edge(from, to, weight, self.config.edge_merge);
            added += 1;
        }

        builder.build()
    }
}

/// All trigrams of the collection, most frequent first.
///
/// A collection without a single trigram yields an empty list rather than
/// an error; the caller decides what an edgeless result means.
fn ranked_trigrams(documents: &[String]) -> Result<Vec<TermCount>> {
    match TermCounter::new(NgramRange::trigrams()).count(documents) {
        Ok(frequencies) => Ok(frequencies.ranked()),
        Err(err) if err.is_empty_vocabulary() => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

/// Build a phrase net with at most `k` edges weighted by trigram count.
pub fn build_connector_graph<S, C>(documents: &[S], connectors: &[C], k: usize) -> Result<WordGraph>
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    let config = PhraseNetConfig::new(connectors.iter().map(|c| c.as_ref().to_string()))
        .with_number_of_pairs(k);
    PhraseNetBuilder::with_config(config).build(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EdgeMerge;

    #[test]
    fn test_connector_graph_example() {
        let docs = ["dogs are animals", "cats are animals"];
        let graph = build_connector_graph(&docs, &["are"], 5).unwrap();

        assert_eq!(
            graph.edge_pairs(),
            vec![("dogs", "animals"), ("cats", "animals")]
        );
        assert_eq!(graph.nodes(), &["dogs", "animals", "cats"]);
    }

    #[test]
    fn test_connector_set_normalization() {
        let set = ConnectorSet::new(&["is a", "and"]);
        assert_eq!(set.patterns(), &[" is_a ", " and "]);
        assert_eq!(set.rewrite("a dog is a pet"), "a dog is_a pet");
        assert!(set.matches("dog is_a pet"));
        assert!(!set.matches("dog is pet"));
    }

    #[test]
    fn test_rewrite_is_literal_substring() {
        let set = ConnectorSet::new(&["is a"]);
        assert_eq!(set.rewrite("this apple"), "this_apple");
        assert_eq!(set.rewrite("Is a"), "Is a");
    }

    #[test]
    fn test_multi_word_connector_edges() {
        let docs = ["a dog is a pet", "the cat is a hunter"];
        let (graph, rewritten) = PhraseNetBuilder::new(["is a"])
            .build_with_corpus(&docs)
            .unwrap();

        assert_eq!(rewritten, vec!["a dog is_a pet", "the cat is_a hunter"]);
        assert_eq!(graph.edge_pairs(), vec![("dog", "pet"), ("cat", "hunter")]);
        // caller data untouched
        assert_eq!(docs[0], "a dog is a pet");
    }

    #[test]
    fn test_edge_cap() {
        let docs = ["aa and bb", "cc and dd", "ee and ff"];
        let graph = build_connector_graph(&docs, &["and"], 2).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_pairs(), vec![("aa", "bb"), ("cc", "dd")]);
    }

    #[test]
    fn test_trigram_matching_several_connectors_counts_once() {
        let docs = ["aa and bb", "cc and dd", "ee and ff"];
        let graph = build_connector_graph(&docs, &["and", "and"], 2).unwrap();
        assert_eq!(graph.edge_pairs(), vec![("aa", "bb"), ("cc", "dd")]);
    }

    #[test]
    fn test_frequent_trigrams_first() {
        let docs = ["xx or yy", "pp or qq", "pp or qq"];
        let graph = build_connector_graph(&docs, &["or"], 1).unwrap();
        assert_eq!(graph.edge_pairs(), vec![("pp", "qq")]);
        assert_eq!(graph.edge_weight("pp", "qq"), Some(2.0));
    }

    #[test]
    fn test_unit_weighting() {
        let cfg = PhraseNetConfig::new(["or"]).with_edge_weighting(EdgeWeighting::Unit);
        let graph = PhraseNetBuilder::with_config(cfg)
            .build(&["pp or qq", "pp or qq"])
            .unwrap();
        assert_eq!(graph.edge_weight("pp", "qq"), Some(1.0));
    }

    #[test]
    fn test_repeated_pair_overwrites_by_default() {
        // Two distinct trigrams produce the same ordered pair.
        let docs = ["sun and moon", "sun and moon", "sun or moon"];
        let graph = build_connector_graph(&docs, &["and", "or"], 5).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("sun", "moon"), Some(1.0));
    }

    #[test]
    fn test_repeated_pair_accumulates_when_configured() {
        let docs = ["sun and moon", "sun and moon", "sun or moon"];
        let cfg = PhraseNetConfig::new(["and", "or"]).with_edge_merge(EdgeMerge::Accumulate);
        let graph = PhraseNetBuilder::with_config(cfg).build(&docs).unwrap();
        assert_eq!(graph.edge_weight("sun", "moon"), Some(3.0));
    }

    #[test]
    fn test_no_connector_occurrence_is_empty_graph() {
        let graph = build_connector_graph(&["red green blue"], &["and"], 3).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_require_edges() {
        let cfg = PhraseNetConfig::new(["and"]).with_require_edges(true);
        let err = PhraseNetBuilder::with_config(cfg)
            .build(&["red green blue"])
            .unwrap_err();
        assert!(matches!(err, TextVizError::NoMatchingTrigrams { .. }));
    }

    #[test]
    fn test_too_short_for_trigrams() {
        let graph = build_connector_graph(&["hi there"], &["and"], 3).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_empty_connectors_rejected() {
        let none: [&str; 0] = [];
        let err = build_connector_graph(&["dogs are animals"], &none, 3).unwrap_err();
        assert!(matches!(err, TextVizError::InvalidConfig { .. }));
    }
}
