//! Tunable constants injected into the decision policy.

use skirmish_board::spatial;
use skirmish_core::{CellCoord, FIRING_RANGE, PREDICTION_HORIZON, RALLY_POINT};
use thiserror::Error;

/// Configuration parameters required to construct the decision policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    firing_range: u32,
    prediction_horizon: u32,
    rally_point: CellCoord,
    prioritise_facing_enemies: bool,
}

impl Config {
    /// Creates a configuration with explicit range, horizon and rally point.
    ///
    /// Threat prioritisation starts disabled.
    #[must_use]
    pub const fn new(firing_range: u32, prediction_horizon: u32, rally_point: CellCoord) -> Self {
        Self {
            firing_range,
            prediction_horizon,
            rally_point,
            prioritise_facing_enemies: false,
        }
    }

    /// Returns a copy with the firing range replaced.
    #[must_use]
    pub const fn with_firing_range(mut self, firing_range: u32) -> Self {
        self.firing_range = firing_range;
        self
    }

    /// Returns a copy with the prediction horizon replaced.
    #[must_use]
    pub const fn with_prediction_horizon(mut self, prediction_horizon: u32) -> Self {
        self.prediction_horizon = prediction_horizon;
        self
    }

    /// Returns a copy with the rally point replaced.
    #[must_use]
    pub const fn with_rally_point(mut self, rally_point: CellCoord) -> Self {
        self.rally_point = rally_point;
        self
    }

    /// Returns a copy that ranks enemies pointing at the ship ahead of the rest.
    ///
    /// When enabled, every candidate not belonging to an enemy that faces the
    /// ship pays one extra point on top of its rotation cost.
    #[must_use]
    pub const fn with_prioritised_facing(mut self, enabled: bool) -> Self {
        self.prioritise_facing_enemies = enabled;
        self
    }

    /// Maximum number of cells a shot travels.
    #[must_use]
    pub const fn firing_range(&self) -> u32 {
        self.firing_range
    }

    /// Number of future turns projected per enemy.
    #[must_use]
    pub const fn prediction_horizon(&self) -> u32 {
        self.prediction_horizon
    }

    /// Cell the ship navigates to before engaging.
    #[must_use]
    pub const fn rally_point(&self) -> CellCoord {
        self.rally_point
    }

    /// Whether enemies facing the ship win ties against the rest.
    #[must_use]
    pub const fn prioritise_facing_enemies(&self) -> bool {
        self.prioritise_facing_enemies
    }

    /// Checks that the configuration describes a playable policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.firing_range == 0 {
            return Err(ConfigError::ZeroFiringRange);
        }
        if !spatial::in_bounds(self.rally_point) {
            return Err(ConfigError::RallyPointOutOfBounds {
                rally_point: self.rally_point,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(FIRING_RANGE, PREDICTION_HORIZON, RALLY_POINT)
    }
}

/// Reasons a [`Config`] is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero firing range would never allow a shot.
    #[error("firing range must be at least one cell")]
    ZeroFiringRange,
    /// The rally point lies outside the board.
    #[error("rally point {rally_point} lies outside the board")]
    RallyPointOutOfBounds {
        /// Rejected rally point.
        rally_point: CellCoord,
    },
}
