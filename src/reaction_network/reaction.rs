//! This module provides a struct for representing reactions

use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use indexmap::IndexMap;
use thiserror::Error;

/// Represents a reaction in a species-reaction network
///
/// The `reactants` map holds the *net* stoichiometric change of each
/// participating species: negative means consumed, positive means produced.
/// Species whose contributions cancel between the two sides of the equation
/// are never stored.
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "ReactionBuilder::validate"))]
pub struct Reaction {
    /// Used to identify the reaction; by convention the raw formula string.
    /// Only the owning graph's duplicate-rename procedure may change it.
    key: String,
    /// Net stoichiometry of the reaction, species name -> signed coefficient
    #[builder(default = "IndexMap::new()")]
    reactants: IndexMap<String, f64>,
    /// Forward rate attribute; inert, set by callers, never computed here
    #[builder(default = "0.0")]
    forward_rate: f64,
    /// Reverse rate attribute
    #[builder(default = "0.0")]
    reverse_rate: f64,
}

impl Reaction {
    /// Create a reaction with a key, no reactants and zero rates
    pub fn new(key: impl Into<String>) -> Reaction {
        Reaction {
            key: key.into(),
            reactants: IndexMap::new(),
            forward_rate: 0.0,
            reverse_rate: 0.0,
        }
    }

    /// The dedup key of this reaction
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the key during duplicate renaming
    pub(super) fn set_key(&mut self, key: String) {
        self.key = key;
    }

    /// Net stoichiometry of the reaction
    pub fn reactants(&self) -> &IndexMap<String, f64> {
        &self.reactants
    }

    /// Set the net coefficient of one species
    ///
    /// A zero coefficient removes the entry, keeping the invariant that the
    /// reactant map never stores a zero net change.
    pub fn add_reactant(&mut self, species: impl Into<String>, nu: f64) {
        let species = species.into();
        if nu == 0.0 {
            self.reactants.shift_remove(&species);
        } else {
            self.reactants.insert(species, nu);
        }
    }

    /// Return the forward rate
    pub fn forward_rate(&self) -> f64 {
        self.forward_rate
    }

    /// Return the reverse rate
    pub fn reverse_rate(&self) -> f64 {
        self.reverse_rate
    }

    /// Return the net rate, forward minus reverse
    pub fn net_rate(&self) -> f64 {
        self.forward_rate - self.reverse_rate
    }

    /// Set the forward rate, rejecting negative values
    pub fn set_forward_rate(&mut self, rate: f64) -> Result<(), RateError> {
        if rate < 0.0 {
            return Err(RateError::NegativeForwardRate(rate));
        }
        self.forward_rate = rate;
        Ok(())
    }

    /// Set the reverse rate, rejecting negative values
    pub fn set_reverse_rate(&mut self, rate: f64) -> Result<(), RateError> {
        if rate < 0.0 {
            return Err(RateError::NegativeReverseRate(rate));
        }
        self.reverse_rate = rate;
        Ok(())
    }
}

impl ReactionBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(rate) = self.forward_rate {
            if rate < 0.0 {
                return Err(format!("forward rate cannot be negative (got {})", rate));
            }
        }
        if let Some(rate) = self.reverse_rate {
            if rate < 0.0 {
                return Err(format!("reverse rate cannot be negative (got {})", rate));
            }
        }
        if let Some(ref reactants) = self.reactants {
            if reactants.values().any(|nu| *nu == 0.0) {
                return Err("reactant map must not contain zero coefficients".to_string());
            }
        }
        Ok(())
    }
}

impl Display for Reaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Errors from rate assignment
#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    #[error("forward rate cannot be negative (got {0})")]
    NegativeForwardRate(f64),
    #[error("reverse rate cannot be negative (got {0})")]
    NegativeReverseRate(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_reaction_defaults() {
        let r = Reaction::new("H+O2=HO2");
        assert_eq!(r.key(), "H+O2=HO2");
        assert!(r.reactants().is_empty());
        assert_relative_eq!(r.forward_rate(), 0.0);
        assert_relative_eq!(r.reverse_rate(), 0.0);
    }

    #[test]
    fn rates_independent_and_validated() {
        let mut r = Reaction::new("H+O2=HO2");
        r.set_forward_rate(4.65e12).unwrap();
        r.set_reverse_rate(2.0).unwrap();
        assert_relative_eq!(r.forward_rate(), 4.65e12);
        assert_relative_eq!(r.reverse_rate(), 2.0);
        assert_relative_eq!(r.net_rate(), 4.65e12 - 2.0);

        assert_eq!(
            r.set_forward_rate(-1.0),
            Err(RateError::NegativeForwardRate(-1.0))
        );
        assert_eq!(
            r.set_reverse_rate(-0.5),
            Err(RateError::NegativeReverseRate(-0.5))
        );
        // Failed assignments leave the previous values in place
        assert_relative_eq!(r.forward_rate(), 4.65e12);
        assert_relative_eq!(r.reverse_rate(), 2.0);
    }

    #[test]
    fn zero_coefficient_removes_entry() {
        let mut r = Reaction::new("H+O2=HO2");
        r.add_reactant("H", -1.0);
        r.add_reactant("O2", -1.0);
        r.add_reactant("HO2", 1.0);
        assert_eq!(r.reactants().len(), 3);
        r.add_reactant("O2", 0.0);
        assert_eq!(r.reactants().len(), 2);
        assert!(!r.reactants().contains_key("O2"));
    }

    #[test]
    fn builder_rejects_negative_rate() {
        let built = ReactionBuilder::default()
            .key("H+O2=HO2".to_string())
            .forward_rate(-3.0)
            .build();
        assert!(built.is_err());
    }

    #[test]
    fn builder_rejects_zero_coefficient() {
        let mut reactants = IndexMap::new();
        reactants.insert("H".to_string(), 0.0);
        let built = ReactionBuilder::default()
            .key("H=H".to_string())
            .reactants(reactants)
            .build();
        assert!(built.is_err());
    }
}
