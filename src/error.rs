use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile already registered: {0}")]
    DuplicateProfile(String),

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("degree of spatial aggregation is undefined before any species has been observed")]
    NoAbundanceObserved,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
