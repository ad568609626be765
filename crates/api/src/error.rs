use crate::models::Backend;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Backend {0} is not connected")]
    Disconnected(Backend),
}

pub type AdapterResult<T> = std::result::Result<T, AdapterError>;
