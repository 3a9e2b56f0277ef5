//! Directed graph builder with ordered edges
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) node and edge lookups during construction, while keeping
//! nodes and edges in insertion order for the finished [`WordGraph`].

use crate::types::EdgeMerge;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The word for this node
    pub word: String,
    /// Outgoing adjacency: target node ID -> index into the edge list
    pub out_edges: FxHashMap<u32, usize>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            out_edges: FxHashMap::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BuilderEdge {
    from: u32,
    to: u32,
    weight: f64,
}

/// A mutable directed graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps word -> node ID
    word_to_id: FxHashMap<String, u32>,
    /// Node storage, in first-insertion order
    nodes: Vec<BuilderNode>,
    /// Edge storage, in first-insertion order
    edges: Vec<BuilderEdge>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            word_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::new(),
        }
    }

    /// Get or create a node for the given word, returning its ID
    pub fn get_or_create_node(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.word_to_id.get(word) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.word_to_id.insert(word.to_string(), id);
        self.nodes.push(BuilderNode::new(word));
        id
    }

    /// Set the weight of the edge `from -> to`.
    ///
    /// If the edge exists its weight is replaced (last write wins) and it
    /// keeps its original position in the edge order.
    pub fn set_edge(&mut self, from: u32, to: u32, weight: f64) {
        self.upsert_edge(from, to, |w| *w = weight, weight);
    }

    /// Add `weight` to the edge `from -> to`, creating it if needed
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        self.upsert_edge(from, to, |w| *w += weight, weight);
    }

    /// Add an edge under the given merge policy
    pub fn add_edge(&mut self, from: u32, to: u32, weight: f64, merge: EdgeMerge) {
        match merge {
            EdgeMerge::Overwrite => self.set_edge(from, to, weight),
            EdgeMerge::Accumulate => self.increment_edge(from, to, weight),
        }
    }

    fn upsert_edge(&mut self, from: u32, to: u32, update: impl FnOnce(&mut f64), initial: f64) {
        if (to as usize) >= self.nodes.len() {
            return;
        }
        let Some(node) = self.nodes.get_mut(from as usize) else {
            return;
        };

        match node.out_edges.get(&to) {
            Some(&idx) => update(&mut self.edges[idx].weight),
            None => {
                node.out_edges.insert(to, self.edges.len());
                self.edges.push(BuilderEdge {
                    from,
                    to,
                    weight: initial,
                });
            }
        }
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of distinct directed edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by word
    pub fn get_node_id(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// Get the word for a node ID
    pub fn get_word(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.word.as_str())
    }

    /// Weight of the edge `from -> to`, if present
    pub fn edge_weight(&self, from: u32, to: u32) -> Option<f64> {
        self.nodes
            .get(from as usize)
            .and_then(|n| n.out_edges.get(&to))
            .map(|&idx| self.edges[idx].weight)
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freeze into an immutable [`WordGraph`]
    pub fn build(self) -> WordGraph {
        let words: Vec<String> = self.nodes.into_iter().map(|n| n.word).collect();
        let edges = self
            .edges
            .iter()
            .map(|e| Edge {
                source: words[e.from as usize].clone(),
                target: words[e.to as usize].clone(),
                weight: e.weight,
            })
            .collect();
        WordGraph {
            nodes: words,
            edges,
        }
    }
}

/// A directed weighted edge between two words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    /// `(source, target)` as string slices
    pub fn pair(&self) -> (&str, &str) {
        (self.source.as_str(), self.target.as_str())
    }
}

/// An immutable directed word graph.
///
/// Nodes are exactly the words that appear on some edge, in the order they
/// were first touched; edges are in the order they were first added.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WordGraph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
}

impl WordGraph {
    /// An edgeless, nodeless graph
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, word: &str) -> bool {
        self.nodes.iter().any(|n| n == word)
    }

    /// Weight of the edge `source -> target`, if present
    pub fn edge_weight(&self, source: &str, target: &str) -> Option<f64> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
            .map(|e| e.weight)
    }

    /// Edge endpoints in edge order
    pub fn edge_pairs(&self) -> Vec<(&str, &str)> {
        self.edges.iter().map(Edge::pair).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("dogs");
        let id_b = builder.get_or_create_node("animals");
        let id_c = builder.get_or_create_node("dogs"); // duplicate

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.get_word(id_b), Some("animals"));
    }

    #[test]
    fn test_edges_are_directed() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");

        builder.set_edge(a, b, 1.0);

        assert_eq!(builder.edge_weight(a, b), Some(1.0));
        assert_eq!(builder.edge_weight(b, a), None);
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_set_edge_overwrites() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");

        builder.set_edge(a, b, 3.0);
        builder.set_edge(a, b, 1.0);

        assert_eq!(builder.edge_weight(a, b), Some(1.0));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_increment_edge_accumulates() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");

        builder.increment_edge(a, b, 2.0);
        builder.increment_edge(a, b, 3.0);

        assert_eq!(builder.edge_weight(a, b), Some(5.0));
    }

    #[test]
    fn test_add_edge_policy() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");

        builder.add_edge(a, b, 2.0, EdgeMerge::Accumulate);
        builder.add_edge(a, b, 2.0, EdgeMerge::Accumulate);
        assert_eq!(builder.edge_weight(a, b), Some(4.0));

        builder.add_edge(a, b, 1.0, EdgeMerge::Overwrite);
        assert_eq!(builder.edge_weight(a, b), Some(1.0));
    }

    #[test]
    fn test_self_loops_allowed() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("very");
        builder.set_edge(a, a, 1.0);
        assert_eq!(builder.edge_weight(a, a), Some(1.0));
    }

    #[test]
    fn test_unknown_node_ignored() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        builder.set_edge(a, 7, 1.0);
        builder.set_edge(7, a, 1.0);
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_build_preserves_order() {
        let mut builder = GraphBuilder::new();
        let c = builder.get_or_create_node("cats");
        let a = builder.get_or_create_node("animals");
        let d = builder.get_or_create_node("dogs");

        builder.set_edge(d, a, 1.0);
        builder.set_edge(c, a, 1.0);
        builder.set_edge(d, a, 5.0); // keeps first position

        let graph = builder.build();
        assert_eq!(graph.nodes(), &["cats", "animals", "dogs"]);
        assert_eq!(graph.edge_pairs(), vec![("dogs", "animals"), ("cats", "animals")]);
        assert_eq!(graph.edge_weight("dogs", "animals"), Some(5.0));
        assert!(graph.contains_node("cats"));
        assert!(!graph.contains_node("birds"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphBuilder::new().build();
        assert!(graph.is_empty());
        assert_eq!(graph, WordGraph::empty());
    }
}
