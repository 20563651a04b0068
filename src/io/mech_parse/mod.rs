//! Module for parsing fixed-format mechanism reports into reaction graphs

pub mod equation;
pub mod report;

pub use equation::{resolve_equation, EquationError};
pub use report::{ReportParser, ReportError};
