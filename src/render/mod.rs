//! Rendering adapters
//!
//! Builders produce backend-agnostic values ([`RankedTerms`], [`WordGraph`]);
//! a [`Renderer`] turns them into something a plotting tool can consume.
//! Backends are picked explicitly through [`RenderBackend`].

pub mod dot;
pub mod plotly;

pub use dot::DotRenderer;
pub use plotly::PlotlyRenderer;

use crate::errors::Result;
use crate::graph::WordGraph;
use crate::types::RankedTerms;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A presentation backend for ranked terms and word graphs
pub trait Renderer {
    /// What the backend emits
    type Output;

    /// Render a ranked term list as a bar chart
    fn render_terms(&self, terms: &RankedTerms) -> Result<Self::Output>;

    /// Render a word graph as a network drawing
    fn render_graph(&self, graph: &WordGraph) -> Result<Self::Output>;
}

/// Explicit backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderBackend {
    /// Plotly figure JSON
    #[default]
    Plotly,
    /// Graphviz DOT source
    Dot,
}

impl RenderBackend {
    /// Render ranked terms to a string with default backend settings
    pub fn render_terms(self, terms: &RankedTerms) -> Result<String> {
        match self {
            RenderBackend::Plotly => {
                let figure = PlotlyRenderer::new().render_terms(terms)?;
                Ok(serde_json::to_string(&figure)?)
            }
            RenderBackend::Dot => DotRenderer::new().render_terms(terms),
        }
    }

    /// Render a word graph to a string with default backend settings
    pub fn render_graph(self, graph: &WordGraph) -> Result<String> {
        match self {
            RenderBackend::Plotly => {
                let figure = PlotlyRenderer::new().render_graph(graph)?;
                Ok(serde_json::to_string(&figure)?)
            }
            RenderBackend::Dot => DotRenderer::new().render_graph(graph),
        }
    }
}

/// Node positions evenly spaced on the unit circle, in node order.
///
/// A single node sits at the origin.
pub fn circular_layout(graph: &WordGraph) -> Vec<(String, f64, f64)> {
    let n = graph.node_count();
    if n == 1 {
        return vec![(graph.nodes()[0].clone(), 0.0, 0.0)];
    }

    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let theta = TAU * i as f64 / n as f64;
            (word.clone(), theta.cos(), theta.sin())
        })
        .collect()
}
