use crate::engine::EngineError;
use carbon_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Error, Debug)]
pub enum ChatError {
    /// Malformed inbound request; rejected before any resolution or
    /// classification work begins.
    #[error("message must not be empty")]
    EmptyMessage,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
