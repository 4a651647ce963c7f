use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Please enter a subject ID")]
    EmptySubjectId,

    #[error("Start is disabled until all images are loaded")]
    StartDisabled,

    #[error("Action not allowed in phase {0}")]
    WrongPhase(&'static str),

    #[error("Unknown condition: {0:?}")]
    UnknownCondition(String),

    #[error("Unknown panel: {0:?}")]
    UnknownPanel(String),

    #[error("Catalog too short: {kind} has {available} entries, {required} trials requested")]
    CatalogTooShort {
        kind: &'static str,
        available: usize,
        required: usize,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Could not place marker {index} after {attempts} attempts")]
    MarkerPlacement { index: usize, attempts: u32 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BookError>;
