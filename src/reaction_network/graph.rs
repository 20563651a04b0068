//! This module provides the ReactionGraph struct, a bipartite
//! species-reaction graph weighted by net stoichiometric coefficient

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::warn;

use crate::configuration::CONFIGURATION;
use crate::reaction_network::reaction::Reaction;
use crate::reaction_network::species::Species;

/// Suffix appended to a reaction key when a mechanism lists the same
/// equation more than once
const DUPLICATE_SUFFIX: &str = "(dup)";

/// A bipartite graph connecting species to the reactions they participate in
///
/// The graph owns every species and reaction reachable from it. The
/// adjacency map mirrors each reaction's reactant coefficients per species
/// for fast lookup; it is maintained by the add/remove operations and is
/// never mutated independently.
#[derive(Clone, Debug, Default)]
pub struct ReactionGraph {
    /// Map of species names to Species objects
    species: IndexMap<String, Species>,
    /// Map of reaction keys to Reaction objects
    reactions: IndexMap<String, Reaction>,
    /// Species name -> reaction key -> net coefficient
    adjacency: IndexMap<String, IndexMap<String, f64>>,
    /// Number of species-reaction relations
    edge_count: usize,
}

impl ReactionGraph {
    pub fn new_empty() -> Self {
        ReactionGraph {
            species: IndexMap::new(),
            reactions: IndexMap::new(),
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Check existence of a species by name
    pub fn contains_species(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    /// Check existence of a reaction by key
    pub fn contains_reaction(&self, key: &str) -> bool {
        self.reactions.contains_key(key)
    }

    /// Add a species to the graph
    ///
    /// A species whose name is already registered is ignored with a
    /// warning; the original is kept.
    pub fn add_species(&mut self, species: Species) {
        if self.contains_species(&species.name) {
            warn!("duplicate species {}", species.name);
            return;
        }
        self.adjacency.insert(species.name.clone(), IndexMap::new());
        self.species.insert(species.name.clone(), species);
    }

    /// Add a reaction to the graph
    ///
    /// Any reactant species not yet registered is created on the fly. If
    /// the key is already taken and duplicates are tolerated
    /// (see [`crate::configuration::Configuration`]), the incoming reaction
    /// is renamed by appending a suffix until its key is free; each append
    /// strictly lengthens the key, so the loop terminates. Otherwise the
    /// incoming reaction is dropped.
    pub fn add_reaction(&mut self, mut reaction: Reaction) {
        if self.contains_reaction(reaction.key()) {
            warn!("duplicate reaction {}", reaction.key());
            if !CONFIGURATION.read().unwrap().allow_duplicate_reactions {
                return;
            }
            while self.contains_reaction(reaction.key()) {
                let renamed = format!("{}{}", reaction.key(), DUPLICATE_SUFFIX);
                reaction.set_key(renamed);
            }
        }
        let key = reaction.key().to_string();
        let entries: Vec<(String, f64)> = reaction
            .reactants()
            .iter()
            .map(|(name, nu)| (name.clone(), *nu))
            .collect();
        self.reactions.insert(key.clone(), reaction);
        for (name, nu) in entries {
            if !self.contains_species(&name) {
                self.add_species(Species::new(name.clone()));
            }
            self.adjacency
                .entry(name)
                .or_default()
                .insert(key.clone(), nu);
            self.edge_count += 1;
        }
    }

    /// Remove a species, cascading to every reaction that references it
    pub fn remove_species(&mut self, name: &str) {
        if !self.contains_species(name) {
            return;
        }
        let adjacent: Vec<String> = self
            .adjacency
            .get(name)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        for key in adjacent {
            self.remove_reaction(&key);
        }
        self.adjacency.shift_remove(name);
        self.species.shift_remove(name);
    }

    /// Remove a reaction, deleting its entry from every reactant species'
    /// adjacency row
    pub fn remove_reaction(&mut self, key: &str) {
        if let Some(reaction) = self.reactions.shift_remove(key) {
            for name in reaction.reactants().keys() {
                if let Some(row) = self.adjacency.get_mut(name) {
                    if row.shift_remove(key).is_some() {
                        self.edge_count -= 1;
                    }
                }
            }
        }
    }

    /// Remove all species and reactions and reset the indices
    pub fn clear(&mut self) {
        self.species.clear();
        self.reactions.clear();
        self.adjacency.clear();
        self.edge_count = 0;
    }

    /// Return the number of species
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Return the number of reactions
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Return the number of species-reaction relations
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterate over all species
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.species.values()
    }

    /// Iterate over all reactions
    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values()
    }

    /// Look up a species by name
    pub fn get_species(&self, name: &str) -> Option<&Species> {
        self.species.get(name)
    }

    /// Look up a reaction by key
    pub fn get_reaction(&self, key: &str) -> Option<&Reaction> {
        self.reactions.get(key)
    }

    /// The name-keyed species registry, usable as the resolution dictionary
    /// for [`crate::io::mech_parse::equation::resolve_equation`]
    pub fn species_registry(&self) -> &IndexMap<String, Species> {
        &self.species
    }

    /// The reactions adjacent to a species, with their net coefficients
    pub fn adjacency_row(&self, name: &str) -> Option<&IndexMap<String, f64>> {
        self.adjacency.get(name)
    }
}

impl Display for ReactionGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} species: ", self.species_count())?;
        let names: Vec<&str> = self.species.keys().map(|n| n.as_str()).collect();
        writeln!(f, "{}", names.join(", "))?;
        writeln!(f, "{} reactions: ", self.reaction_count())?;
        for reaction in self.reactions() {
            writeln!(f, "{}", reaction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hydrogen_reaction(key: &str) -> Reaction {
        let mut r = Reaction::new(key);
        r.add_reactant("H", -1.0);
        r.add_reactant("O2", -1.0);
        r.add_reactant("HO2", 1.0);
        r
    }

    #[test]
    fn add_species_ignores_duplicate() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_species(Species::new("H2"));
        let mut annotated = Species::new("H2");
        annotated.notes = Some("later copy".to_string());
        graph.add_species(annotated);
        assert_eq!(graph.species_count(), 1);
        // The original registration wins
        assert!(graph.get_species("H2").unwrap().notes.is_none());
    }

    #[test]
    fn add_reaction_auto_creates_species() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("H+O2=HO2"));
        assert_eq!(graph.species_count(), 3);
        assert_eq!(graph.reaction_count(), 1);
        assert_eq!(graph.edge_count(), 3);
        assert_relative_eq!(graph.adjacency_row("H").unwrap()["H+O2=HO2"], -1.0);
        assert_relative_eq!(graph.adjacency_row("HO2").unwrap()["H+O2=HO2"], 1.0);
    }

    #[test]
    fn duplicate_reaction_is_renamed() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("r1"));
        graph.add_reaction(hydrogen_reaction("r1"));
        assert_eq!(graph.reaction_count(), 2);
        assert!(graph.contains_reaction("r1"));
        assert!(graph.contains_reaction("r1(dup)"));
        // The first stored reaction is untouched
        assert_eq!(graph.get_reaction("r1").unwrap().reactants().len(), 3);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn repeated_collisions_keep_lengthening_the_key() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("r1"));
        graph.add_reaction(hydrogen_reaction("r1"));
        graph.add_reaction(hydrogen_reaction("r1"));
        assert_eq!(graph.reaction_count(), 3);
        assert!(graph.contains_reaction("r1(dup)(dup)"));
    }

    #[test]
    fn remove_reaction_updates_adjacency() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("r1"));
        let mut r2 = Reaction::new("r2");
        r2.add_reactant("H", -2.0);
        r2.add_reactant("H2", 1.0);
        graph.add_reaction(r2);
        assert_eq!(graph.edge_count(), 5);

        graph.remove_reaction("r1");
        assert_eq!(graph.reaction_count(), 1);
        assert_eq!(graph.edge_count(), 2);
        // Species survive the removal of a reaction
        assert!(graph.contains_species("O2"));
        assert!(graph.adjacency_row("H").unwrap().contains_key("r2"));
        assert!(!graph.adjacency_row("H").unwrap().contains_key("r1"));
    }

    #[test]
    fn remove_species_cascades() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("r1"));
        let mut r2 = Reaction::new("r2");
        r2.add_reactant("H", -2.0);
        r2.add_reactant("H2", 1.0);
        graph.add_reaction(r2);

        graph.remove_species("H");
        // Both reactions referenced H, so both go; other species remain
        assert_eq!(graph.reaction_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_species("H"));
        assert!(graph.contains_species("O2"));
        assert!(graph.adjacency_row("O2").unwrap().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("r1"));
        graph.clear();
        assert_eq!(graph.species_count(), 0);
        assert_eq!(graph.reaction_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        // Indices are reset too: the old key is free again
        graph.add_reaction(hydrogen_reaction("r1"));
        assert!(graph.contains_reaction("r1"));
    }

    #[test]
    fn edge_count_matches_reactant_map_sizes() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("r1"));
        let mut r2 = Reaction::new("r2");
        r2.add_reactant("H2O", 1.0);
        r2.add_reactant("OH", -2.0);
        graph.add_reaction(r2);
        graph.add_reaction(hydrogen_reaction("r1")); // renamed duplicate
        graph.remove_reaction("r2");

        let expected: usize = graph.reactions().map(|r| r.reactants().len()).sum();
        assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn display_lists_species_and_reactions() {
        let mut graph = ReactionGraph::new_empty();
        graph.add_reaction(hydrogen_reaction("H+O2=HO2"));
        let printed = format!("{}", graph);
        assert!(printed.contains("3 species: "));
        assert!(printed.contains("1 reactions: "));
        assert!(printed.contains("H+O2=HO2"));
    }
}
