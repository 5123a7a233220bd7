use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReclaimError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("User {0} is not a mannequin")]
    MannequinNotFound(String),

    #[error("Multiple mannequins ({count}) share the login {login}; supply --mannequin-id to choose one")]
    Ambiguous { login: String, count: usize },

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("File {0} does not exist")]
    ManifestMissing(String),

    #[error("Manifest {0} is empty")]
    EmptyManifest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReclaimError>;
