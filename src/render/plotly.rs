//! Plotly figure JSON
//!
//! Figures are plain `{"data": [...], "layout": {...}}` objects, ready to be
//! handed to `Plotly.newPlot` or any binding that accepts figure dicts.

use super::{circular_layout, Renderer};
use crate::errors::{Result, TextVizError};
use crate::graph::WordGraph;
use crate::types::RankedTerms;
use rustc_hash::FxHashMap;
use serde_json::{json, Value};

/// Plotly adapter
#[derive(Debug, Clone, PartialEq)]
pub struct PlotlyRenderer {
    /// Line width per unit of edge weight
    pub edge_width_scale: f64,
    /// Network figure title
    pub graph_title: String,
    /// Node label font size
    pub font_size: u32,
}

impl Default for PlotlyRenderer {
    fn default() -> Self {
        Self {
            edge_width_scale: 10.0,
            graph_title: "Entity coocurrence graph".to_string(),
            font_size: 20,
        }
    }
}

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_width_scale(mut self, scale: f64) -> Self {
        self.edge_width_scale = scale;
        self
    }

    pub fn with_graph_title(mut self, title: impl Into<String>) -> Self {
        self.graph_title = title.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.edge_width_scale.is_finite() || self.edge_width_scale <= 0.0 {
            return Err(TextVizError::render(format!(
                "edge_width_scale must be positive and finite, got {}",
                self.edge_width_scale
            )));
        }
        Ok(())
    }

    fn edge_trace(&self, from: (f64, f64), to: (f64, f64), weight: f64) -> Result<Value> {
        let width = weight * self.edge_width_scale;
        if !width.is_finite() {
            return Err(TextVizError::render(format!("edge weight {} is not finite", weight)));
        }
        Ok(json!({
            "type": "scatter",
            "mode": "lines",
            "x": [from.0, to.0, null],
            "y": [from.1, to.1, null],
            "line": {"width": width, "color": "#888"},
            "hoverinfo": "none",
        }))
    }
}

impl Renderer for PlotlyRenderer {
    type Output = Value;

    fn render_terms(&self, terms: &RankedTerms) -> Result<Value> {
        let x: Vec<&str> = terms.labels();
        let y: Vec<usize> = terms.iter().map(|t| t.count).collect();
        Ok(json!({
            "data": [{
                "type": "bar",
                "x": x,
                "y": y,
                "name": "Frequency Plot",
                "orientation": "v",
            }],
            "layout": {
                "title": {"text": "Frequencies"},
                "xaxis": {"title": {"text": "tokens"}},
                "yaxis": {"title": {"text": "quantity"}},
            },
        }))
    }

    fn render_graph(&self, graph: &WordGraph) -> Result<Value> {
        self.validate()?;
        let layout = circular_layout(graph);
        let positions: FxHashMap<&str, (f64, f64)> = layout
            .iter()
            .map(|(word, x, y)| (word.as_str(), (*x, *y)))
            .collect();

        let mut data = Vec::with_capacity(graph.edge_count() + 1);
        for edge in graph.edges() {
            let (Some(&from), Some(&to)) = (
                positions.get(edge.source.as_str()),
                positions.get(edge.target.as_str()),
            ) else {
                return Err(TextVizError::render(format!(
                    "edge {} -> {} references an unknown node",
                    edge.source, edge.target
                )));
            };
            data.push(self.edge_trace(from, to, edge.weight)?);
        }

        data.push(json!({
            "type": "scatter",
            "mode": "text",
            "x": layout.iter().map(|(_, x, _)| *x).collect::<Vec<_>>(),
            "y": layout.iter().map(|(_, _, y)| *y).collect::<Vec<_>>(),
            "text": graph.nodes(),
            "textfont": {"size": self.font_size, "color": "black"},
            "hoverinfo": "text",
        }));

        let axis = json!({"showgrid": false, "zeroline": false, "showticklabels": false});
        Ok(json!({
            "data": data,
            "layout": {
                "title": {"text": self.graph_title, "font": {"size": 16}},
                "showlegend": false,
                "hovermode": "closest",
                "margin": {"b": 20, "l": 5, "r": 5, "t": 40},
                "paper_bgcolor": "white",
                "plot_bgcolor": "white",
                "xaxis": axis.clone(),
                "yaxis": axis,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_connector_graph;
    use crate::types::TermCount;

    #[test]
    fn test_bar_chart() {
        let terms = RankedTerms {
            terms: vec![TermCount::new("cat", 3), TermCount::new("the", 2)],
            requested: 2,
            available: 4,
        };
        let fig = PlotlyRenderer::new().render_terms(&terms).unwrap();
        assert_eq!(fig["data"][0]["type"], "bar");
        assert_eq!(fig["data"][0]["x"], json!(["cat", "the"]));
        assert_eq!(fig["data"][0]["y"], json!([3, 2]));
        assert_eq!(fig["layout"]["title"]["text"], "Frequencies");
    }

    #[test]
    fn test_network_scales_edge_width() {
        let docs = ["pp or qq", "pp or qq"];
        let graph = build_connector_graph(&docs, &["or"], 5).unwrap();
        let fig = PlotlyRenderer::new().render_graph(&graph).unwrap();

        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["line"]["width"], json!(20.0));
        assert_eq!(data[0]["x"][2], Value::Null);
        assert_eq!(data[1]["text"], json!(["pp", "qq"]));
    }

    #[test]
    fn test_custom_scale() {
        let graph = build_connector_graph(&["pp or qq"], &["or"], 5).unwrap();
        let fig = PlotlyRenderer::new()
            .with_edge_width_scale(1.5)
            .render_graph(&graph)
            .unwrap();
        assert_eq!(fig["data"][0]["line"]["width"], json!(1.5));
    }

    #[test]
    fn test_empty_graph_has_only_node_trace() {
        let fig = PlotlyRenderer::new().render_graph(&WordGraph::empty()).unwrap();
        assert_eq!(fig["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_scale() {
        let err = PlotlyRenderer::new()
            .with_edge_width_scale(0.0)
            .render_graph(&WordGraph::empty())
            .unwrap_err();
        assert!(matches!(err, TextVizError::Render { .. }));
    }
}
