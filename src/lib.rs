//! # rapid_textviz
//!
//! Corpus-to-n-gram pipelines for text visualization.
//!
//! This library turns collections of raw documents into ranked n-gram
//! frequency tables and directed word graphs, and hands those values to
//! pluggable rendering adapters.
//!
//! ## Features
//!
//! - **Frequency ranking**: top-K unigrams or n-grams with stopword removal
//!   and optional fixed vocabularies
//! - **Phrase nets**: word graphs gated by connector terms such as "is a"
//! - **Corpus helpers**: bigram graphs, word clouds, lexical dispersion,
//!   word correlation, and label selection
//! - **Renderers**: Plotly figure JSON and Graphviz DOT
//!
//! ## Example
//!
//! ```
//! use rapid_textviz::{build_connector_graph, rank_terms, NgramRange};
//!
//! let docs = ["the cat sat", "the cat ran", "cat"];
//! let ranked = rank_terms(&docs, 2, None, NgramRange::unigrams(), None).unwrap();
//! assert_eq!(ranked.labels(), vec!["cat", "the"]);
//!
//! let graph = build_connector_graph(&["dogs are animals"], &["are"], 5).unwrap();
//! assert_eq!(graph.edge_pairs(), vec![("dogs", "animals")]);
//! ```

#[macro_use]
mod macros;

pub mod analysis;
pub mod corpus;
pub mod errors;
pub mod frequency;
pub mod graph;
pub mod nlp;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TextVizError};
pub use types::{
    BigramConfig, CloudConfig, CorrelationConfig, EdgeMerge, EdgeWeighting, FrequencyConfig,
    NgramRange, PhraseNetConfig, RankedTerms, StringPool, TermCount, Vocabulary,
};

// Re-export main functionality
pub use analysis::{
    lexical_dispersion, word_correlations, word_correlations_with_config, CorrelationMatrix,
    Dispersion, DispersionPoint,
};
pub use corpus::{Corpus, LabelSelector};
pub use frequency::{compare_clouds, rank_terms, word_cloud, CloudWord, FrequencyRanker, VennTerms};
pub use graph::{
    build_bigram_graph, build_connector_graph, BigramGraphBuilder, ConnectorSet, Edge,
    GraphBuilder, PhraseNetBuilder, WordGraph,
};
pub use nlp::{StopwordFilter, TermCounter, TermFrequencies, Tokenizer};
pub use render::{circular_layout, DotRenderer, PlotlyRenderer, RenderBackend, Renderer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
