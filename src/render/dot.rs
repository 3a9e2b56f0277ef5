//! Graphviz DOT source

use super::Renderer;
use crate::errors::Result;
use crate::graph::WordGraph;
use crate::types::RankedTerms;
use std::fmt::Write;

/// DOT adapter
#[derive(Debug, Clone, Default)]
pub struct DotRenderer {
    /// Label edges with their weight
    pub show_weights: bool,
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_weights(mut self, show: bool) -> Self {
        self.show_weights = show;
        self
    }
}

fn quote(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 2);
    out.push('"');
    for c in label.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Renderer for DotRenderer {
    type Output = String;

    /// Terms become a chain of record-shaped nodes, one per rank
    fn render_terms(&self, terms: &RankedTerms) -> Result<String> {
        let mut out = String::from("digraph frequencies {\n  rankdir=LR;\n  node [shape=box];\n");
        for (rank, term) in terms.iter().enumerate() {
            let label = format!("{} ({})", term.term, term.count);
            // writing into a String cannot fail
            let _ = writeln!(out, "  t{} [label={}];", rank, quote(&label));
        }
        for rank in 1..terms.len() {
            let _ = writeln!(out, "  t{} -> t{} [style=invis];", rank - 1, rank);
        }
        out.push_str("}\n");
        Ok(out)
    }

    fn render_graph(&self, graph: &WordGraph) -> Result<String> {
        let mut out = String::from("digraph phrase_net {\n  node [shape=plaintext];\n");
        for node in graph.nodes() {
            let _ = writeln!(out, "  {};", quote(node));
        }
        for edge in graph.edges() {
            let _ = write!(out, "  {} -> {}", quote(&edge.source), quote(&edge.target));
            if self.show_weights {
                let _ = write!(out, " [label={}]", quote(&edge.weight.to_string()));
            }
            out.push_str(";\n");
        }
        out.push_str("}\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_connector_graph;
    use crate::types::TermCount;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_graph_output() {
        let graph =
            build_connector_graph(&["dogs are animals", "cats are animals"], &["are"], 5).unwrap();
        let dot = DotRenderer::new().with_show_weights(true).render_graph(&graph).unwrap();

        assert!(dot.starts_with("digraph phrase_net {"));
        assert!(dot.contains("  \"dogs\" -> \"animals\" [label=\"1\"];\n"));
        assert!(dot.contains("  \"cats\" -> \"animals\" [label=\"1\"];\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_terms_output() {
        let terms = RankedTerms {
            terms: vec![TermCount::new("cat", 3), TermCount::new("the", 2)],
            requested: 2,
            available: 2,
        };
        let dot = DotRenderer::new().render_terms(&terms).unwrap();
        assert!(dot.contains("t0 [label=\"cat (3)\"];"));
        assert!(dot.contains("t0 -> t1 [style=invis];"));
    }
}
