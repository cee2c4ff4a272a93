use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Context parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Context integrity error: {0}")]
    Integrity(String),

    #[error("Unknown scenario '{requested}'; known scenarios: {known:?}")]
    UnknownScenario {
        requested: String,
        known: Vec<String>,
    },
}
