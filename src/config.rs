//! Game rules and sprite sizes.
//!
//! The game shipped in a few near-identical versions that disagree on scoring,
//! bouncing coins, the fire key and what quitting does.  Each of those is a
//! flag on `Rules`; `Rules::arcade()` is the full version with screens and
//! score, `Rules::classic()` the bare early one.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "ROBOT_PAYBACK_CONFIG";

pub const DEFAULT_FIELD_WIDTH: i32 = 1080;
pub const DEFAULT_FIELD_HEIGHT: i32 = 720;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FireKey {
    #[default]
    Space,
    W,
}

impl FireKey {
    pub fn as_char(&self) -> char {
        match self {
            FireKey::Space => ' ',
            FireKey::W => 'w',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FireKey::Space => "SPACE",
            FireKey::W => "W",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Coin-on-monster hits add to the score.
    pub has_scoring: bool,
    /// Coins reflect off the field edges instead of leaving it.
    pub coin_bounces: bool,
    pub fire_key: FireKey,
    /// Quitting mid-run shows the game-over screen instead of exiting.
    pub game_over_to_screen: bool,
    /// A monster within hit range of the player ends the run.
    pub monsters_catch_player: bool,
    /// Start on the story / mechanics screens instead of straight in the run.
    pub intro_screens: bool,
    /// Spawn a pickup coin somewhere on the field every interval.
    pub free_coins: bool,
    /// Free coins drift along angle 0 instead of sitting still.
    pub free_coins_drift: bool,
}

impl Rules {
    pub fn arcade() -> Self {
        Self {
            has_scoring: true,
            coin_bounces: false,
            fire_key: FireKey::Space,
            game_over_to_screen: true,
            monsters_catch_player: true,
            intro_screens: true,
            free_coins: true,
            free_coins_drift: false,
        }
    }

    pub fn classic() -> Self {
        Self {
            has_scoring: false,
            coin_bounces: true,
            fire_key: FireKey::W,
            game_over_to_screen: false,
            monsters_catch_player: false,
            intro_screens: false,
            free_coins: false,
            free_coins_drift: true,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::arcade()
    }
}

/// Width and height of one sprite, in field pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub w: i32,
    pub h: i32,
}

impl SpriteSize {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub player: SpriteSize,
    pub monster: SpriteSize,
    pub door: SpriteSize,
    pub coin: SpriteSize,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: SpriteSize::new(40, 40),
            monster: SpriteSize::new(40, 40),
            door: SpriteSize::new(40, 40),
            coin: SpriteSize::new(20, 20),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub rules: Rules,
    pub sprites: SpriteSizes,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            rules: Rules::default(),
            sprites: SpriteSizes::default(),
        }
    }
}

impl GameConfig {
    /// Load from the file named by `ROBOT_PAYBACK_CONFIG`, or fall back to
    /// defaults when the variable is unset.  A set-but-broken file is fatal.
    pub fn load() -> Result<Self, GameError> {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                log::info!("{} not set, using built-in config", CONFIG_ENV);
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every sprite must fit inside the field, otherwise clamping and edge
    /// spawning have no valid range.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.field_width <= 0 || self.field_height <= 0 {
            return Err(GameError::Validation(format!(
                "field must be non-empty, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        let sprites = [
            ("player", self.sprites.player),
            ("monster", self.sprites.monster),
            ("door", self.sprites.door),
            ("coin", self.sprites.coin),
        ];
        for (name, size) in sprites {
            if size.w <= 0 || size.h <= 0 {
                return Err(GameError::Validation(format!(
                    "{} sprite must have a positive size, got {}x{}",
                    name, size.w, size.h
                )));
            }
            if size.w > self.field_width || size.h > self.field_height {
                return Err(GameError::Validation(format!(
                    "{} sprite {}x{} does not fit a {}x{} field",
                    name, size.w, size.h, self.field_width, self.field_height
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_arcade_on_1080_by_720() {
        let c = GameConfig::default();
        assert_eq!(c.field_width, 1080);
        assert_eq!(c.field_height, 720);
        assert_eq!(c.rules, Rules::arcade());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let c = GameConfig::from_json(r#"{ "rules": { "fire_key": "W", "coin_bounces": true } }"#)
            .unwrap();
        assert_eq!(c.rules.fire_key, FireKey::W);
        assert!(c.rules.coin_bounces);
        // untouched fields keep the arcade defaults
        assert!(c.rules.has_scoring);
        assert_eq!(c.field_width, 1080);
        assert_eq!(c.sprites.coin, SpriteSize::new(20, 20));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn oversized_sprite_fails_validation() {
        let mut c = GameConfig::default();
        c.sprites.player = SpriteSize::new(2000, 40);
        assert!(matches!(c.validate(), Err(GameError::Validation(_))));
    }

    #[test]
    fn empty_field_fails_validation() {
        let mut c = GameConfig::default();
        c.field_height = 0;
        assert!(matches!(c.validate(), Err(GameError::Validation(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }

    #[test]
    fn classic_preset_differs_where_expected() {
        let r = Rules::classic();
        assert!(!r.has_scoring);
        assert!(r.coin_bounces);
        assert_eq!(r.fire_key, FireKey::W);
        assert!(!r.game_over_to_screen);
        assert_eq!(r.fire_key.as_char(), 'w');
    }
}
