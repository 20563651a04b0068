//! Line-oriented scanner for fixed-format mechanism reports
//!
//! The report layout follows chemical-interpreter output: a species table
//! introduced by a ` CONSIDERED` header and closed by a line of dashes,
//! then a reaction table introduced by `      REACTIONS CONSIDERED` and
//! closed by a `  NOTE:` footer. The scanner is forward-only and streams
//! every recognized species and reaction into the graph immediately.

use std::io::BufRead;

use log::debug;
use thiserror::Error;

use crate::io::mech_parse::equation::{resolve_equation, EquationError};
use crate::reaction_network::graph::ReactionGraph;
use crate::reaction_network::reaction::Reaction;
use crate::reaction_network::species::Species;

const SPECIES_BLOCK_START: &str = " CONSIDERED";
const SPECIES_BLOCK_END: &str = " ----------";
const REACTION_BLOCK_START: &str = "      REACTIONS CONSIDERED";
const REACTION_BLOCK_END: &str = "  NOTE:";
/// Whitespace-token index of the species name in a species-table row; the
/// row number column precedes it. Empty leading fields from variable-width
/// columns are not tokens, so the index holds at any indentation.
const SPECIES_NAME_TOKEN: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ScanState {
    Idle,
    SpeciesBlock,
    ReactionBlock,
}

/// Single-pass scanner turning a mechanism report into graph contents
pub struct ReportParser {
    state: ScanState,
    /// Set when a block header still has one column-caption line to skip
    skip_line: bool,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser {
    pub fn new() -> ReportParser {
        ReportParser {
            state: ScanState::Idle,
            skip_line: false,
        }
    }

    /// Consume an entire report, registering species and reactions into
    /// `graph` as they are recognized
    ///
    /// Rows in the reaction table whose tokens carry no equation separator
    /// are annotation rows and are skipped; an equation that references an
    /// undeclared species aborts the run.
    pub fn parse<R: BufRead>(
        &mut self,
        reader: R,
        graph: &mut ReactionGraph,
    ) -> Result<(), ReportError> {
        for line in reader.lines() {
            let line = line?;
            self.consume_line(&line, graph)?;
        }
        Ok(())
    }

    /// Convenience wrapper over [`ReportParser::parse`] for in-memory text
    pub fn parse_str(&mut self, text: &str, graph: &mut ReactionGraph) -> Result<(), ReportError> {
        self.parse(text.as_bytes(), graph)
    }

    fn consume_line(&mut self, line: &str, graph: &mut ReactionGraph) -> Result<(), ReportError> {
        if self.skip_line {
            self.skip_line = false;
            return Ok(());
        }
        match self.state {
            ScanState::Idle => {
                if line.starts_with(SPECIES_BLOCK_START) {
                    debug!("entering species block");
                    self.state = ScanState::SpeciesBlock;
                    self.skip_line = true;
                } else if line.starts_with(REACTION_BLOCK_START) {
                    debug!("entering reaction block");
                    self.state = ScanState::ReactionBlock;
                    self.skip_line = true;
                }
            }
            ScanState::SpeciesBlock => {
                if line.starts_with(SPECIES_BLOCK_END) {
                    self.state = ScanState::Idle;
                } else if let Some(name) = line.split_whitespace().nth(SPECIES_NAME_TOKEN) {
                    graph.add_species(Species::new(name));
                }
            }
            ScanState::ReactionBlock => {
                if line.starts_with(REACTION_BLOCK_END) {
                    self.state = ScanState::Idle;
                } else if let Some(equation) =
                    line.split_whitespace().find(|token| token.contains('='))
                {
                    let net = resolve_equation(equation, graph.species_registry())?;
                    let mut reaction = Reaction::new(equation);
                    for (name, nu) in net {
                        reaction.add_reactant(name, nu);
                    }
                    graph.add_reaction(reaction);
                }
            }
        }
        Ok(())
    }
}

/// Enum representing possible report parsing errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unable to read mechanism report: {0}")]
    Read(#[from] std::io::Error),
    #[error("unable to resolve reaction equation: {0}")]
    Equation(#[from] EquationError),
}
