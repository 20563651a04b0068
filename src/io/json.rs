//! Module providing JSON IO for reaction graphs

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reaction_network::graph::ReactionGraph;
use crate::reaction_network::reaction::{RateError, Reaction};
use crate::reaction_network::species::Species;

// region JSON network
/// Represents a JSON serialized reaction network, used for reading and
/// writing graphs in json format
#[derive(Serialize, Deserialize)]
struct JsonNetwork {
    species: Vec<JsonSpecies>,
    reactions: Vec<JsonReaction>,
}

#[derive(Serialize, Deserialize)]
struct JsonSpecies {
    name: String,
    notes: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    key: String,
    reactants: IndexMap<String, f64>,
    #[serde(default)]
    forward_rate: f64,
    #[serde(default)]
    reverse_rate: f64,
}
// endregion JSON network

// region Conversions
impl From<&Species> for JsonSpecies {
    fn from(s: &Species) -> Self {
        Self {
            name: s.name.clone(),
            notes: s.notes.clone(),
        }
    }
}

impl From<&Reaction> for JsonReaction {
    fn from(r: &Reaction) -> Self {
        Self {
            key: r.key().to_string(),
            reactants: r.reactants().clone(),
            forward_rate: r.forward_rate(),
            reverse_rate: r.reverse_rate(),
        }
    }
}

impl ReactionGraph {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ReactionGraph, JsonError> {
        let network_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_network = serde_json::from_str::<JsonNetwork>(&network_str)?;
        ReactionGraph::from_json(json_network)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let json_network = self.to_json();
        let network_string = serde_json::to_string(&json_network)?;
        fs::write(path, network_string)?;
        Ok(())
    }

    /// Build a graph from its JSON form
    ///
    /// Reactions go through [`ReactionGraph::add_reaction`], so loaded
    /// graphs keep the same guarantees as parsed ones: absent reactant
    /// species are auto-created and colliding keys are renamed.
    fn from_json(json_network: JsonNetwork) -> Result<Self, JsonError> {
        let mut graph = ReactionGraph::new_empty();
        for s in json_network.species {
            let mut species = Species::new(s.name);
            species.notes = s.notes;
            graph.add_species(species);
        }
        for r in json_network.reactions {
            let mut reaction = Reaction::new(r.key);
            for (name, nu) in r.reactants {
                reaction.add_reactant(name, nu);
            }
            reaction.set_forward_rate(r.forward_rate)?;
            reaction.set_reverse_rate(r.reverse_rate)?;
            graph.add_reaction(reaction);
        }
        Ok(graph)
    }

    fn to_json(&self) -> JsonNetwork {
        JsonNetwork {
            species: self.species().map(JsonSpecies::from).collect(),
            reactions: self.reactions().map(JsonReaction::from).collect(),
        }
    }
}
// endregion Conversions

/// Enum representing possible JSON IO errors
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Invalid rate in serialized reaction")]
    InvalidRate(#[from] RateError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
