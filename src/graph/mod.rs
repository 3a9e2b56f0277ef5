//! Word graphs: the directed builder, phrase nets, and bigram graphs

pub mod bigram;
pub mod builder;
pub mod phrase_net;

pub use bigram::{build_bigram_graph, BigramGraphBuilder};
pub use builder::{Edge, GraphBuilder, WordGraph};
pub use phrase_net::{build_connector_graph, ConnectorSet, PhraseNetBuilder};
