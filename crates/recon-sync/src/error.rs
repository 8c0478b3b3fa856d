use recon_cache::CacheError;
use recon_client::ClientError;
use thiserror::Error;

/// Errors raised by appliers and directory loaders.
///
/// [`crate::sync_batch`] never returns these: each one becomes the detail of
/// a failed outcome.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The service accepted the call but the body lacked what we needed.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
