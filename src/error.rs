use thiserror::Error;

/// Errors raised while building or advancing a game session
#[derive(Error, Debug)]
pub enum GameError {
    #[error("missing image asset: {name}")]
    MissingAsset { name: String },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("terrain query issued against an empty tile list")]
    EmptyTerrain,

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game loop already stopped")]
    LoopStopped,

    #[error("game loop thread panicked")]
    LoopPanicked,
}

impl GameError {
    pub fn missing_asset(name: impl Into<String>) -> Self {
        GameError::MissingAsset { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
