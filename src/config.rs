/// Tunable rules of the simulation.
///
/// Everything here is a plain scalar.  Pool capacities live in
/// `entities` as constants because the entity arrays are sized by them.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::entities::{GRID_COLS, GRID_ROWS};

/// Largest accepted field side, in pixels.  Keeps terminal coordinates
/// inside `u16`.
pub const MAX_SCREEN_SIDE: i32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rules: {0}")]
    Invalid(String),
}

// ── Rules ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub screen_width: i32,
    pub screen_height: i32,

    pub player_width: i32,
    pub player_height: i32,
    /// Horizontal pixels per tick while a movement intent is held.
    pub player_step: i32,

    pub alien_width: i32,
    pub alien_height: i32,
    pub alien_spacing_x: i32,
    pub alien_spacing_y: i32,
    pub formation_origin_x: i32,
    pub formation_origin_y: i32,
    /// Horizontal pixels per formation step.
    pub alien_step: i32,
    /// Vertical pixels dropped on an edge hit.
    pub alien_descent: i32,
    /// Distance from the side of the field that counts as an edge hit.
    pub edge_margin: i32,

    /// Vertical pixels per tick for an active projectile.
    pub projectile_step: i32,

    pub alien_move_interval_ms: u64,
    pub animation_interval_ms: u64,
    pub explosion_duration_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            screen_width: 128,
            screen_height: 64,
            player_width: 11,
            player_height: 7,
            player_step: 3,
            alien_width: 8,
            alien_height: 8,
            alien_spacing_x: 14,
            alien_spacing_y: 10,
            formation_origin_x: 10,
            formation_origin_y: 10,
            alien_step: 2,
            alien_descent: 4,
            edge_margin: 5,
            projectile_step: 3,
            alien_move_interval_ms: 500,
            animation_interval_ms: 500,
            explosion_duration_ms: 200,
        }
    }
}

impl Rules {
    /// Parse a (possibly partial) TOML document.  Missing keys keep their
    /// default value.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let rules: Rules = toml::from_str(contents)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_step", self.player_step),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("alien_step", self.alien_step),
            ("alien_descent", self.alien_descent),
            ("projectile_step", self.projectile_step),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ] {
            if value > MAX_SCREEN_SIDE {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most {MAX_SCREEN_SIDE}, got {value}"
                )));
            }
        }
        if self.alien_move_interval_ms == 0 || self.animation_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "timer intervals must be non-zero".to_string(),
            ));
        }
        if self.player_width > self.screen_width {
            return Err(ConfigError::Invalid(format!(
                "player ({}px) is wider than the screen ({}px)",
                self.player_width, self.screen_width
            )));
        }

        let right = self.formation_origin_x
            + (GRID_COLS as i32 - 1) * self.alien_spacing_x
            + self.alien_width;
        let bottom = self.formation_origin_y
            + (GRID_ROWS as i32 - 1) * self.alien_spacing_y
            + self.alien_height;
        if self.formation_origin_x < 0 || right > self.screen_width {
            return Err(ConfigError::Invalid(format!(
                "formation spans x {}..{} outside a {}px wide field",
                self.formation_origin_x, right, self.screen_width
            )));
        }
        if self.formation_origin_y < 0 || bottom >= self.floor_y() {
            return Err(ConfigError::Invalid(format!(
                "formation bottom {} already touches the floor at {}",
                bottom,
                self.floor_y()
            )));
        }
        Ok(())
    }

    /// Top of the floor band: an alien whose lower edge reaches this row
    /// has landed.
    pub fn floor_y(&self) -> i32 {
        self.screen_height - self.player_height
    }

    pub fn player_max_x(&self) -> i32 {
        self.screen_width - self.player_width
    }

    pub fn player_start_x(&self) -> i32 {
        self.screen_width / 2 - self.player_width / 2
    }

    /// Row a freshly fired projectile starts on, just above the player.
    pub fn muzzle_y(&self) -> i32 {
        self.screen_height - self.player_height - 2
    }
}
