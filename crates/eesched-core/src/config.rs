//! Simulation configuration.

use serde::{Deserialize, Serialize};

/// Holds raw scheduler config parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawSchedulerConfig {
    pub time_quantum: Option<f64>,
    pub max_frequency: Option<f64>,
    pub min_frequency: Option<f64>,
}

/// Represents scheduler configuration.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Maximum simulated-time length of a single uninterrupted dispatch.
    pub time_quantum: f64,
    /// Upper bound of the CPU frequency range.
    pub max_frequency: f64,
    /// Lower bound of the CPU frequency range.
    pub min_frequency: f64,
}

impl SchedulerConfig {
    /// Creates scheduler config with the specified parameters.
    ///
    /// Rejects invalid parameter combinations instead of clamping them.
    pub fn new(time_quantum: f64, max_frequency: f64, min_frequency: f64) -> Self {
        assert!(time_quantum > 0., "time quantum must be positive");
        assert!(min_frequency > 0., "frequency bounds must be positive");
        assert!(
            min_frequency <= max_frequency,
            "min frequency must not exceed max frequency"
        );
        Self {
            time_quantum,
            max_frequency,
            min_frequency,
        }
    }

    /// Creates scheduler config by reading parameter values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file(file_name: &str) -> Self {
        let raw: RawSchedulerConfig = serde_yaml::from_str(
            &std::fs::read_to_string(file_name).unwrap_or_else(|_| panic!("Can't read file {}", file_name)),
        )
        .unwrap_or_else(|_| panic!("Can't parse YAML from file {}", file_name));

        Self::new(
            raw.time_quantum.unwrap_or(1.),
            raw.max_frequency.unwrap_or(2.),
            raw.min_frequency.unwrap_or(0.5),
        )
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(1., 2., 0.5)
    }
}
