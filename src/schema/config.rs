//! Configuration types for maze evolution parameters.

use serde::{Deserialize, Serialize};

use crate::compute::Cell;

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population and elite sizes.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Probability that any single move is replaced during breeding (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Replay settings for the best candidate.
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            mutation_rate: default_mutation_rate(),
            animation: AnimationConfig::default(),
            random_seed: None,
        }
    }
}

fn default_mutation_rate() -> f32 {
    0.1
}

/// Population and selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of candidates per generation.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Number of best candidates kept for breeding.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            elite_count: default_elite_count(),
        }
    }
}

fn default_population_size() -> usize {
    100
}
fn default_elite_count() -> usize {
    10
}

/// Replay timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Pause between replayed moves, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

fn default_frame_interval_ms() -> u64 {
    200
}

impl AnimationConfig {
    /// Frame interval as a `Duration`.
    #[inline]
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms)
    }
}

impl EvolutionConfig {
    /// Validate evolution parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.population.elite_count == 0 || self.population.elite_count > self.population.size
        {
            return Err(ConfigError::InvalidEliteCount {
                elites: self.population.elite_count,
                population: self.population.size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Which endpoint of the maze a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cell ({row}, {col}) has value {value}, expected 0 (open) or 1 (wall)")]
    InvalidTile { row: usize, col: usize, value: u8 },
    #[error("The {endpoint} cell {cell} lies outside the grid")]
    EndpointOutOfBounds { endpoint: Endpoint, cell: Cell },
    #[error("The {endpoint} cell {cell} is a wall")]
    EndpointBlocked { endpoint: Endpoint, cell: Cell },
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Elite count {elites} must be between 1 and the population size {population}")]
    InvalidEliteCount { elites: usize, population: usize },
    #[error("Mutation rate {0} must lie in [0, 1]")]
    InvalidMutationRate(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_run() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population.size, 100);
        assert_eq!(config.population.elite_count, 10);
        assert!((config.mutation_rate - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.animation.frame_interval_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EvolutionConfig =
            serde_json::from_str(r#"{ "random_seed": 7, "population": { "size": 40 } }"#).unwrap();
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.population.size, 40);
        assert_eq!(config.population.elite_count, 10);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let mut config = EvolutionConfig::default();
        config.mutation_rate = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidMutationRate(1.5))
        );

        let mut config = EvolutionConfig::default();
        config.population.elite_count = 101;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEliteCount { .. })
        ));

        let mut config = EvolutionConfig::default();
        config.population.size = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }
}
