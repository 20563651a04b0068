//! Module providing the ReactionGraph struct and the entities it owns.

pub mod graph;
pub mod reaction;
pub mod species;
pub mod subgraph;
