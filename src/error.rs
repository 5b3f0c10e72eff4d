//! Errors that can stop the game before or around the main loop.
//!
//! Gameplay itself never fails: everything in `compute` is total.  Only the
//! bootstrap (config / sprite sizes) and the terminal layer produce these.

#[derive(Debug)]
pub enum GameError {
    /// Terminal or file I/O failed.
    Io(std::io::Error),
    /// The config file exists but is not valid JSON for `GameConfig`.
    Config(String),
    /// The config parsed but describes an impossible field.
    Validation(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "I/O error: {}", e),
            GameError::Config(msg) => write!(f, "Config error: {}", msg),
            GameError::Validation(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}
