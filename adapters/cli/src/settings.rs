//! Optional TOML tuning file for the engine.
//!
//! ```toml
//! firing_range = 4
//! prediction_horizon = 5
//! rally_row = 6
//! rally_column = 6
//! prioritise_facing_enemies = false
//! ```
//!
//! Every key is optional; missing keys keep the engine defaults.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use skirmish_core::CellCoord;
use skirmish_system_policy::Config;

/// Parsed contents of an engine settings file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EngineSettings {
    firing_range: Option<u32>,
    prediction_horizon: Option<u32>,
    rally_row: Option<u32>,
    rally_column: Option<u32>,
    prioritise_facing_enemies: Option<bool>,
}

impl EngineSettings {
    /// Loads settings from the TOML file at `path`.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read engine settings at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid engine settings in {}", path.display()))
    }

    /// Parses settings from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse engine settings toml")
    }

    /// Overlays the settings on top of `config`.
    pub(crate) fn apply(&self, mut config: Config) -> Config {
        if let Some(firing_range) = self.firing_range {
            config = config.with_firing_range(firing_range);
        }
        if let Some(horizon) = self.prediction_horizon {
            config = config.with_prediction_horizon(horizon);
        }
        if self.rally_row.is_some() || self.rally_column.is_some() {
            let default = config.rally_point();
            config = config.with_rally_point(CellCoord::new(
                self.rally_row.unwrap_or(default.row()),
                self.rally_column.unwrap_or(default.column()),
            ));
        }
        if let Some(enabled) = self.prioritise_facing_enemies {
            config = config.with_prioritised_facing(enabled);
        }
        config
    }
}
