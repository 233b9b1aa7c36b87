use landfall_core::RecoveryError;

#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API returned HTTP {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Invalid data: {0}")]
    Analytics(#[from] RecoveryError),
}
