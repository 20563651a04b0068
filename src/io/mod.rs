//! Module for reading mechanism reports and writing graph descriptions
pub mod dot;
pub mod json;
pub mod mech_parse;
