//! Bounded breadth-first extraction of a local subgraph around a seed
//! species, used to keep diagrams legible

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::configuration::CONFIGURATION;
use crate::reaction_network::graph::ReactionGraph;

/// A node of the bipartite graph, viewed uniformly during traversal
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphNode {
    Species(String),
    Reaction(String),
}

impl GraphNode {
    /// The species name or reaction key behind this node
    pub fn name(&self) -> &str {
        match self {
            GraphNode::Species(name) => name,
            GraphNode::Reaction(key) => key,
        }
    }
}

/// A visualization-ready edge list extracted from a [`ReactionGraph`]
///
/// Edges are oriented from the node discovered earlier to the node
/// discovered later; the connection itself is undirected.
#[derive(Clone, Debug, Default)]
pub struct Subgraph {
    pub edges: Vec<(GraphNode, GraphNode)>,
}

impl Subgraph {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl ReactionGraph {
    /// Extract the neighborhood of a seed species within the configured
    /// default hop bound
    pub fn neighborhood(&self, seed: &str) -> Subgraph {
        let max_depth = CONFIGURATION.read().unwrap().max_depth;
        self.neighborhood_within(seed, max_depth)
    }

    /// Extract the neighborhood of a seed species within `max_depth` hops
    ///
    /// Breadth-first search treating species and reaction nodes uniformly;
    /// coefficient sign and magnitude are ignored for traversal. A node is
    /// expanded only while its distance from the seed is below `max_depth`,
    /// and each edge is emitted exactly once, when its far endpoint is
    /// first discovered, so no edge is re-emitted from the opposite
    /// direction. A seed not present in the graph yields an empty edge set.
    pub fn neighborhood_within(&self, seed: &str, max_depth: usize) -> Subgraph {
        if !self.contains_species(seed) {
            return Subgraph::default();
        }
        let mut distance: IndexMap<GraphNode, usize> = IndexMap::new();
        let mut queue: VecDeque<GraphNode> = VecDeque::new();
        let seed_node = GraphNode::Species(seed.to_string());
        distance.insert(seed_node.clone(), 0);
        queue.push_back(seed_node);

        let mut edges = Vec::new();
        while let Some(node) = queue.pop_front() {
            let d = distance[&node];
            if d >= max_depth {
                continue;
            }
            for neighbor in self.neighbors(&node) {
                if !distance.contains_key(&neighbor) {
                    distance.insert(neighbor.clone(), d + 1);
                    edges.push((node.clone(), neighbor.clone()));
                    queue.push_back(neighbor);
                }
            }
        }
        Subgraph { edges }
    }

    /// The whole graph as an edge list, one edge per species-reaction
    /// relation, oriented reaction -> species
    pub fn skeleton(&self) -> Subgraph {
        let mut edges = Vec::new();
        for reaction in self.reactions() {
            for name in reaction.reactants().keys() {
                edges.push((
                    GraphNode::Reaction(reaction.key().to_string()),
                    GraphNode::Species(name.clone()),
                ));
            }
        }
        Subgraph { edges }
    }

    fn neighbors(&self, node: &GraphNode) -> Vec<GraphNode> {
        match node {
            GraphNode::Species(name) => self
                .adjacency_row(name)
                .map(|row| row.keys().map(|k| GraphNode::Reaction(k.clone())).collect())
                .unwrap_or_default(),
            GraphNode::Reaction(key) => self
                .get_reaction(key)
                .map(|r| {
                    r.reactants()
                        .keys()
                        .map(|n| GraphNode::Species(n.clone()))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
