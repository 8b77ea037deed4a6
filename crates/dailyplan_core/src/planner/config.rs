//! Allocator tuning knobs.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hours one business day can hold across all projects.
pub const DEFAULT_DAILY_CAPACITY_HOURS: f64 = 8.0;
/// Smallest chunk worth switching context for.
pub const DEFAULT_MIN_CHUNK_HOURS: f64 = 2.0;

/// Invalid allocator configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDailyCapacity(f64),
    InvalidMinChunk(f64),
    MinChunkExceedsCapacity { min_chunk: f64, capacity: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDailyCapacity(value) => {
                write!(f, "daily capacity must be a positive number, got {value}")
            }
            Self::InvalidMinChunk(value) => {
                write!(f, "minimum chunk must be a positive number, got {value}")
            }
            Self::MinChunkExceedsCapacity {
                min_chunk,
                capacity,
            } => write!(
                f,
                "minimum chunk ({min_chunk}h) cannot exceed daily capacity ({capacity}h)"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Capacity and chunk-size policy for one allocator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    pub daily_capacity_hours: f64,
    pub min_chunk_hours: f64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            daily_capacity_hours: DEFAULT_DAILY_CAPACITY_HOURS,
            min_chunk_hours: DEFAULT_MIN_CHUNK_HOURS,
        }
    }
}

impl AllocatorConfig {
    /// # Errors
    /// - Non-finite or non-positive capacity or minimum chunk.
    /// - Minimum chunk larger than the daily capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.daily_capacity_hours.is_finite() || self.daily_capacity_hours <= 0.0 {
            return Err(ConfigError::InvalidDailyCapacity(self.daily_capacity_hours));
        }
        if !self.min_chunk_hours.is_finite() || self.min_chunk_hours <= 0.0 {
            return Err(ConfigError::InvalidMinChunk(self.min_chunk_hours));
        }
        if self.min_chunk_hours > self.daily_capacity_hours {
            return Err(ConfigError::MinChunkExceedsCapacity {
                min_chunk: self.min_chunk_hours,
                capacity: self.daily_capacity_hours,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AllocatorConfig, ConfigError};

    #[test]
    fn defaults_are_eight_hour_days_with_two_hour_chunks() {
        let config = AllocatorConfig::default();
        assert_eq!(config.daily_capacity_hours, 8.0);
        assert_eq!(config.min_chunk_hours, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_capacity = AllocatorConfig {
            daily_capacity_hours: 0.0,
            ..AllocatorConfig::default()
        };
        assert_eq!(
            zero_capacity.validate(),
            Err(ConfigError::InvalidDailyCapacity(0.0))
        );

        let nan_chunk = AllocatorConfig {
            min_chunk_hours: f64::NAN,
            ..AllocatorConfig::default()
        };
        assert!(matches!(
            nan_chunk.validate(),
            Err(ConfigError::InvalidMinChunk(_))
        ));

        let oversized_chunk = AllocatorConfig {
            daily_capacity_hours: 4.0,
            min_chunk_hours: 5.0,
        };
        let err = oversized_chunk.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AllocatorConfig =
            serde_json::from_str(r#"{ "daily_capacity_hours": 6.0 }"#).unwrap();
        assert_eq!(config.daily_capacity_hours, 6.0);
        assert_eq!(config.min_chunk_hours, 2.0);
    }
}
