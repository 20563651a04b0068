//! Resolve a reaction-equation string into net stoichiometric coefficients

use indexmap::IndexMap;
use thiserror::Error;

use crate::configuration::CONFIGURATION;
use crate::reaction_network::species::Species;

/// Equation separators in priority order; `<=>` textually contains `=`,
/// so the longer tokens must be tried first
const SEPARATORS: [&str; 3] = ["<=>", "=>", "="];

/// Resolve one equation string into a map of species name to net
/// stoichiometric coefficient
///
/// Left-hand terms contribute negative, right-hand terms positive, and
/// contributions that cancel exactly are dropped. Parenthesized groups are
/// third-body/auxiliary annotations and are stripped before parsing, and
/// pseudo-species placeholder tokens are excluded.
///
/// # Parameters
/// - `equation`: the raw equation string, e.g. `"H+O2+M=HO2+M"`
/// - `species`: the registry of already-declared species; a surviving name
///     that is missing from it is a fatal error, since a mechanism report
///     declares its species before the reactions referencing them
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use dsrgraph::io::mech_parse::resolve_equation;
/// use dsrgraph::reaction_network::species::Species;
/// let mut registry = IndexMap::new();
/// for name in ["H", "O2", "HO2"] {
///     registry.insert(name.to_string(), Species::new(name));
/// }
/// let net = resolve_equation("H+O2=HO2", &registry).unwrap();
/// assert_eq!(net["HO2"], 1.0);
/// ```
pub fn resolve_equation(
    equation: &str,
    species: &IndexMap<String, Species>,
) -> Result<IndexMap<String, f64>, EquationError> {
    let stripped = strip_annotations(equation);
    let (lhs, rhs) = split_sides(&stripped)
        .ok_or_else(|| EquationError::MissingSeparator(equation.to_string()))?;
    let left = side_coefficients(lhs)?;
    let right = side_coefficients(rhs)?;
    let net = merge_sides(left, right);
    for name in net.keys() {
        if !species.contains_key(name) {
            return Err(EquationError::UnknownSpecies(name.clone()));
        }
    }
    Ok(net)
}

/// Remove parenthesized groups and their contents
///
/// Two-state scan: outside parens characters are kept, inside they are
/// discarded. A stray `(` discards everything up to the next `)` or the
/// end of the string, so malformed groups degrade safely.
fn strip_annotations(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut inside = false;
    for c in s.chars() {
        if inside {
            if c == ')' {
                inside = false;
            }
        } else if c == '(' {
            inside = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Split on the first recognized separator, longest first
fn split_sides(s: &str) -> Option<(&str, &str)> {
    for sep in SEPARATORS {
        if let Some(idx) = s.find(sep) {
            return Some((&s[..idx], &s[idx + sep.len()..]));
        }
    }
    None
}

/// Parse one side of an equation into species-coefficient pairs
///
/// Terms are split on `+`; a repeated species name sums its coefficients
/// (e.g. `H+H` and `2H` are equivalent). Pseudo-species tokens are skipped.
fn side_coefficients(side: &str) -> Result<IndexMap<String, f64>, EquationError> {
    let pseudo = CONFIGURATION.read().unwrap().pseudo_species.clone();
    let mut coefficients: IndexMap<String, f64> = IndexMap::new();
    for term in side.split('+') {
        let term = term.trim();
        if term.is_empty() {
            // Left over from a stripped annotation such as `(+M)`
            continue;
        }
        let (nu, name) = split_term(term)?;
        if pseudo.iter().any(|p| p == name) {
            continue;
        }
        *coefficients.entry(name.to_string()).or_insert(0.0) += nu;
    }
    Ok(coefficients)
}

/// Split a term into its leading numeric coefficient and the species name
///
/// The coefficient is the longest prefix of digits with at most one decimal
/// point; a term with no numeric prefix has coefficient 1.
fn split_term(term: &str) -> Result<(f64, &str), EquationError> {
    let mut end = 0;
    let mut seen_dot = false;
    for c in term.chars() {
        if c.is_ascii_digit() {
            end += 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end += 1;
        } else {
            break;
        }
    }
    if end == 0 {
        return Ok((1.0, term));
    }
    let name = &term[end..];
    if name.is_empty() {
        return Err(EquationError::MissingName(term.to_string()));
    }
    let nu = term[..end]
        .parse::<f64>()
        .map_err(|_| EquationError::BadCoefficient(term.to_string()))?;
    Ok((nu, name))
}

/// Merge the two sides into net coefficients, right minus left, dropping
/// entries that cancel exactly
fn merge_sides(left: IndexMap<String, f64>, mut right: IndexMap<String, f64>) -> IndexMap<String, f64> {
    for (name, nu) in left {
        *right.entry(name).or_insert(0.0) -= nu;
    }
    right.retain(|_, nu| *nu != 0.0);
    right
}

/// Enum representing possible equation resolution errors
#[derive(Debug, Error, PartialEq)]
pub enum EquationError {
    /// None of `<=>`, `=>`, `=` was found
    #[error("no equation separator in `{0}`")]
    MissingSeparator(String),
    /// The numeric prefix of a term did not parse as a coefficient
    #[error("malformed coefficient in term `{0}`")]
    BadCoefficient(String),
    /// A term was all coefficient and no species name
    #[error("term `{0}` has no species name")]
    MissingName(String),
    /// A resolved name is not in the species dictionary, which indicates
    /// malformed or out-of-order input
    #[error("couldn't find species `{0}` in dictionary")]
    UnknownSpecies(String),
}
