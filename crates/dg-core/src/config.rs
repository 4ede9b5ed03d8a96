//! Generator configuration
//!
//! Validated once before generation starts; a bad configuration never
//! reaches the retry loop.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_RESEEDS, DEFAULT_ROOM_MIN_SIZE,
    DEFAULT_WIDTH,
};
use crate::error::ConfigError;
use crate::layout::{Region, WallPolicy};

/// Where a new seed comes from once the attempts on a stream run out
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ReseedStrategy {
    /// Fresh seed from the operating system
    #[default]
    Entropy,
    /// Next seed drawn from the exhausted stream; reproducible end to end
    Derived,
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    /// Minimum leaf dimension
    pub room_min_size: i32,
    /// Share of rooms (0 to 100) the pruner tries to remove
    pub percent_rooms_to_remove: f64,
    pub seed: u64,
    /// Attempts on one RNG stream before reseeding
    pub max_attempts: u32,
    /// Reseeds allowed before giving up; `None` retries forever
    pub max_reseeds: Option<u32>,
    pub reseed: ReseedStrategy,
    pub wall_policy: WallPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_min_size: DEFAULT_ROOM_MIN_SIZE,
            percent_rooms_to_remove: 0.0,
            seed: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_reseeds: Some(DEFAULT_MAX_RESEEDS),
            reseed: ReseedStrategy::Entropy,
            wall_policy: WallPolicy::DoorsOnly,
        }
    }
}

impl GeneratorConfig {
    /// Default settings for a `width` x `height` dungeon
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_room_min_size(mut self, min_size: i32) -> Self {
        self.room_min_size = min_size;
        self
    }

    pub fn with_prune_percent(mut self, percent: f64) -> Self {
        self.percent_rooms_to_remove = percent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_max_reseeds(mut self, reseeds: Option<u32>) -> Self {
        self.max_reseeds = reseeds;
        self
    }

    pub fn with_reseed(mut self, reseed: ReseedStrategy) -> Self {
        self.reseed = reseed;
        self
    }

    pub fn with_wall_policy(mut self, policy: WallPolicy) -> Self {
        self.wall_policy = policy;
        self
    }

    /// The full dungeon region
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Check the settings before any generation attempt
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.room_min_size <= 0 {
            return Err(ConfigError::InvalidMinRoomSize(self.room_min_size));
        }
        if self.room_min_size > self.width.min(self.height) {
            return Err(ConfigError::MinRoomSizeTooLarge {
                min_size: self.room_min_size,
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=100.0).contains(&self.percent_rooms_to_remove) {
            return Err(ConfigError::InvalidPrunePercent(
                self.percent_rooms_to_remove,
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.bounds(), Region::new(0, 0, 50, 50));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let err = GeneratorConfig::new(0, 10).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidDimensions { width: 0, height: 10 });
        assert!(GeneratorConfig::new(10, -3).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_min_size() {
        let config = GeneratorConfig::new(20, 20).with_room_min_size(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMinRoomSize(0)));

        let config = GeneratorConfig::new(20, 8).with_room_min_size(9);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinRoomSizeTooLarge {
                min_size: 9,
                width: 20,
                height: 8
            })
        );
    }

    #[test]
    fn test_rejects_prune_percent_out_of_range() {
        let config = GeneratorConfig::default().with_prune_percent(101.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPrunePercent(101.0)));
        let config = GeneratorConfig::default().with_prune_percent(-1.0);
        assert!(config.validate().is_err());
        let config = GeneratorConfig::default().with_prune_percent(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let config = GeneratorConfig::default().with_max_attempts(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroAttempts));
    }

    #[test]
    fn test_min_size_equal_to_grid_is_valid() {
        let config = GeneratorConfig::new(10, 10).with_room_min_size(6);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"width": 80, "seed": 7, "wall_policy": "open_shared_edges"}"#)
                .unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.seed, 7);
        assert_eq!(config.wall_policy, WallPolicy::OpenSharedEdges);
        assert_eq!(config.reseed, ReseedStrategy::Entropy);
    }
}
