//! Configuration types for model generation and graph generation.

use pyo3::prelude::*;

/// What the generated model minimizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    /// Minimize the weighted sum of assigned slots under a fixed memory budget.
    Latency,
    /// Minimize the peak per-slot demand under a fixed latency.
    Memory,
}

impl Objective {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "latency" => Ok(Self::Latency),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownObjective(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latency => "latency",
            Self::Memory => "memory",
        }
    }
}

/// How variables are typed in the trailing declaration sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VariableTyping {
    /// Every variable listed under `Integer`. Decision variables stay 0/1 only
    /// through the assignment equalities plus non-negativity.
    #[default]
    Integer,
    /// Decision variables listed under `Binary`, auxiliaries under `Integer`.
    Binary,
}

impl VariableTyping {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "integer" => Ok(Self::Integer),
            "binary" => Ok(Self::Binary),
            _ => Err(ConfigError::UnknownTyping(s.to_string())),
        }
    }
}

/// Errors from validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownObjective(String),
    UnknownTyping(String),
    InvalidLatency(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownObjective(s) => {
                write!(f, "Unknown objective: {} (expected \"latency\" or \"memory\")", s)
            }
            Self::UnknownTyping(s) => {
                write!(f, "Unknown variable typing: {} (expected \"integer\" or \"binary\")", s)
            }
            Self::InvalidLatency(l) => write!(f, "Maximum latency must be at least 1, got {}", l),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Formatting parameters for LP serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeConfig {
    /// Prefix written before every row inside a section.
    pub indent: String,
    pub typing: VariableTyping,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            indent: " ".to_string(),
            typing: VariableTyping::Integer,
        }
    }
}

/// Configuration for one model-generation run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ModelConfig {
    /// Number of available slots (L), at least 1
    #[pyo3(get, set)]
    pub max_latency: u32,
    /// Per-slot demand budget; None means unbounded
    #[pyo3(get, set)]
    pub max_memory: Option<u64>,
    /// Objective: "latency" or "memory"
    #[pyo3(get, set)]
    pub objective: String,
    /// Variable typing: "integer" or "binary"
    #[pyo3(get, set)]
    pub typing: String,
    /// Row indent used in the LP text
    #[pyo3(get, set)]
    pub indent: String,
    /// Verbosity level: 0=silent, 1=summary, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_latency: 1,
            max_memory: None,
            objective: "latency".to_string(),
            typing: "integer".to_string(),
            indent: " ".to_string(),
            verbosity: 0,
        }
    }
}

impl ModelConfig {
    /// Config with the given latency and memory budget, everything else default.
    pub fn with_bounds(max_latency: u32, max_memory: Option<u64>) -> Self {
        Self {
            max_latency,
            max_memory,
            ..Self::default()
        }
    }

    /// Parsed objective.
    pub fn objective(&self) -> Result<Objective, ConfigError> {
        Objective::parse(&self.objective)
    }

    /// Check every field and return the serialization settings.
    pub fn validate(&self) -> Result<(Objective, SerializeConfig), ConfigError> {
        if self.max_latency == 0 {
            return Err(ConfigError::InvalidLatency(self.max_latency));
        }
        let objective = self.objective()?;
        Ok((objective, self.serialize_config()?))
    }

    /// Formatting parameters for the serializer.
    pub fn serialize_config(&self) -> Result<SerializeConfig, ConfigError> {
        Ok(SerializeConfig {
            indent: self.indent.clone(),
            typing: VariableTyping::parse(&self.typing)?,
        })
    }
}

#[pymethods]
impl ModelConfig {
    #[new]
    #[pyo3(signature = (
        max_latency,
        max_memory=None,
        objective=None,
        typing=None,
        indent=None,
        verbosity=None
    ))]
    fn new(
        max_latency: u32,
        max_memory: Option<u64>,
        objective: Option<String>,
        typing: Option<String>,
        indent: Option<String>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            max_latency,
            max_memory,
            objective: objective.unwrap_or(defaults.objective),
            typing: typing.unwrap_or(defaults.typing),
            indent: indent.unwrap_or(defaults.indent),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ModelConfig(max_latency={}, max_memory={:?}, objective={:?}, typing={:?})",
            self.max_latency, self.max_memory, self.objective, self.typing
        )
    }
}

/// Configuration for random DAG generation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Number of candidate nodes (labelled 0..size)
    #[pyo3(get, set)]
    pub size: usize,
    /// Probability that a forward pair becomes an edge
    #[pyo3(get, set)]
    pub edge_probability: f64,
    /// Smallest edge weight (inclusive)
    #[pyo3(get, set)]
    pub min_weight: u64,
    /// Largest edge weight (inclusive)
    #[pyo3(get, set)]
    pub max_weight: u64,
    /// RNG seed; None draws from the OS
    #[pyo3(get, set)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 10,
            edge_probability: 0.5,
            min_weight: 1,
            max_weight: 10,
            seed: None,
        }
    }
}

#[pymethods]
impl GeneratorConfig {
    #[new]
    #[pyo3(signature = (
        size,
        edge_probability=None,
        min_weight=None,
        max_weight=None,
        seed=None
    ))]
    fn new(
        size: usize,
        edge_probability: Option<f64>,
        min_weight: Option<u64>,
        max_weight: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            size,
            edge_probability: edge_probability.unwrap_or(defaults.edge_probability),
            min_weight: min_weight.unwrap_or(defaults.min_weight),
            max_weight: max_weight.unwrap_or(defaults.max_weight),
            seed,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "GeneratorConfig(size={}, edge_probability={}, weights={}..={}, seed={:?})",
            self.size, self.edge_probability, self.min_weight, self.max_weight, self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.max_latency, 1);
        assert_eq!(config.max_memory, None);
        assert_eq!(config.objective().unwrap(), Objective::Latency);
        assert_eq!(config.serialize_config().unwrap(), SerializeConfig::default());
    }

    #[test]
    fn test_objective_parsing() {
        assert_eq!(Objective::parse("Memory").unwrap(), Objective::Memory);
        assert_eq!(Objective::parse("LATENCY").unwrap(), Objective::Latency);
        assert_eq!(
            Objective::parse("throughput"),
            Err(ConfigError::UnknownObjective("throughput".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_zero_latency_and_bad_typing() {
        let config = ModelConfig::with_bounds(0, None);
        assert_eq!(config.validate(), Err(ConfigError::InvalidLatency(0)));

        let config = ModelConfig {
            typing: "boolean".to_string(),
            ..ModelConfig::with_bounds(3, None)
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownTyping("boolean".to_string()))
        );
    }

    #[test]
    fn test_validate_returns_serialize_config() {
        let config = ModelConfig {
            typing: "binary".to_string(),
            indent: "\t".to_string(),
            objective: "memory".to_string(),
            ..ModelConfig::with_bounds(4, Some(10))
        };
        let (objective, ser) = config.validate().unwrap();
        assert_eq!(objective, Objective::Memory);
        assert_eq!(ser.typing, VariableTyping::Binary);
        assert_eq!(ser.indent, "\t");
    }
}
