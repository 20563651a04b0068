//! Core rust implementation of dsrgraph, a crate for building bipartite
//! species-reaction graphs from fixed-format combustion mechanism reports.
#![allow(unused)]

pub mod configuration;
pub mod io;
pub mod reaction_network;
