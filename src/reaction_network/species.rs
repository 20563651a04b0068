//! This module provides the Species struct representing a chemical species

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use derive_builder::Builder;

/// Represents a distinct chemical species
///
/// Identity and ordering are by `name` alone. Which reactions a species
/// participates in is a derived view held by the owning graph's adjacency
/// map, never stored on the species itself.
#[derive(Builder, Debug, Clone)]
pub struct Species {
    /// Used to identify the species (must be unique within a graph)
    pub name: String,
    /// Notes about the species
    #[builder(default = "None")]
    pub notes: Option<String>,
}

impl Species {
    /// Create a species with a name and no notes
    pub fn new(name: impl Into<String>) -> Species {
        Species {
            name: name.into(),
            notes: None,
        }
    }
}

impl PartialEq for Species {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Species {}

impl Hash for Species {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state); // Hash by name
    }
}

impl PartialOrd for Species {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Species {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
