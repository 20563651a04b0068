use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Whether a reaction whose key collides with an existing one is kept
    /// under a disambiguated key (true) or dropped with a warning (false)
    pub allow_duplicate_reactions: bool,
    /// Default hop bound for neighborhood extraction
    pub max_depth: usize,
    /// Equation tokens treated as third-body/photon placeholders rather
    /// than species
    pub pseudo_species: Vec<String>,
    /// Default size hint written into diagram headers
    pub diagram_size: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            allow_duplicate_reactions: true,
            max_depth: 4,
            pseudo_species: vec!["M".to_string(), "S".to_string(), "hv".to_string()],
            diagram_size: "80,80".to_string(),
        }
    }
}
