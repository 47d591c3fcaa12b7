use noise_core::NoiseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    // Input does not match the fixed layout (blob length, grid shape)
    #[error("format mismatch: expected {expected}, found {found}")]
    Format { expected: usize, found: usize },

    // Decoded fine, but describes a generator the core rejects
    #[error(transparent)]
    Noise(#[from] NoiseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
