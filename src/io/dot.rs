//! Graphviz rendering of extracted subgraphs

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use thiserror::Error;

use crate::configuration::CONFIGURATION;
use crate::reaction_network::subgraph::{GraphNode, Subgraph};

/// The only diagram type currently supported
pub const SKELETON: &str = "skeleton";

/// Render a subgraph as a Graphviz description
///
/// Species nodes are filled, reaction nodes are boxed, and every
/// connection is drawn without an arrowhead since the underlying relation
/// is undirected. An unsupported `diagram_type` is a configuration error,
/// not a degraded render.
pub fn render_dot(
    subgraph: &Subgraph,
    diagram_type: &str,
    size: &str,
) -> Result<String, DotError> {
    if diagram_type != SKELETON {
        return Err(DotError::UnsupportedDiagramType(diagram_type.to_string()));
    }
    let mut out = String::new();
    out.push_str("digraph G {\n");
    out.push_str(&format!("size = \"{}\"; \n", size));

    let mut nodes: IndexSet<&GraphNode> = IndexSet::new();
    for (from, to) in &subgraph.edges {
        nodes.insert(from);
        nodes.insert(to);
    }
    for node in &nodes {
        match node {
            GraphNode::Reaction(key) => {
                out.push_str(&format!("\"{}\" [shape=box]; \n", key));
            }
            GraphNode::Species(name) => {
                out.push_str(&format!("\"{}\" [style=filled]; \n", name));
            }
        }
    }
    for (from, to) in &subgraph.edges {
        out.push_str(&format!(
            "\"{}\" -> \"{}\" [arrowhead=none]; \n",
            from.name(),
            to.name()
        ));
    }
    out.push_str("}\n");
    Ok(out)
}

/// Render a subgraph with the configured default size hint and write it to
/// a file
pub fn write_dot<P: AsRef<Path>>(
    path: P,
    subgraph: &Subgraph,
    diagram_type: &str,
) -> Result<(), DotError> {
    let size = CONFIGURATION.read().unwrap().diagram_size.clone();
    let rendered = render_dot(subgraph, diagram_type, &size)?;
    fs::write(path, rendered)?;
    Ok(())
}

/// Enum representing possible diagram emission errors
#[derive(Debug, Error)]
pub enum DotError {
    #[error("incorrect graph type `{0}`")]
    UnsupportedDiagramType(String),
    #[error("unable to write diagram file")]
    UnableToWrite(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction_network::graph::ReactionGraph;
    use crate::reaction_network::reaction::Reaction;

    fn sample_subgraph() -> Subgraph {
        let mut graph = ReactionGraph::new_empty();
        let mut r = Reaction::new("H+O2=HO2");
        r.add_reactant("H", -1.0);
        r.add_reactant("O2", -1.0);
        r.add_reactant("HO2", 1.0);
        graph.add_reaction(r);
        graph.skeleton()
    }

    #[test]
    fn skeleton_render_shape() {
        let rendered = render_dot(&sample_subgraph(), SKELETON, "80,80").unwrap();
        assert!(rendered.starts_with("digraph G {\n"));
        assert!(rendered.ends_with("}\n"));
        assert!(rendered.contains("size = \"80,80\"; \n"));
        assert!(rendered.contains("\"H+O2=HO2\" [shape=box]; \n"));
        assert!(rendered.contains("\"H\" [style=filled]; \n"));
        assert!(rendered.contains("\"H+O2=HO2\" -> \"H\" [arrowhead=none]; \n"));
    }

    #[test]
    fn each_node_is_styled_once() {
        let rendered = render_dot(&sample_subgraph(), SKELETON, "80,80").unwrap();
        let boxed = rendered.matches("[shape=box]").count();
        assert_eq!(boxed, 1);
        let filled = rendered.matches("[style=filled]").count();
        assert_eq!(filled, 3);
    }

    #[test]
    fn unsupported_type_is_fatal() {
        let err = render_dot(&sample_subgraph(), "heatmap", "80,80").unwrap_err();
        assert!(matches!(err, DotError::UnsupportedDiagramType(t) if t == "heatmap"));
    }

    #[test]
    fn empty_subgraph_renders_header_only() {
        let rendered = render_dot(&Subgraph::default(), SKELETON, "40,40").unwrap();
        assert_eq!(rendered, "digraph G {\nsize = \"40,40\"; \n}\n");
    }
}
