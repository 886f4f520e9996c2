use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Detector '{detector}': neutron schema has no user slot named '{slot}'")]
    MissingSlot { detector: String, slot: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Tube {index} geometry invalid: {message}")]
    TubeGeometry { index: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DetectorResult<T> = Result<T, DetectorError>;
