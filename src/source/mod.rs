//! History Sources
//!
//! The system boundary that produces a validated [`RawPayload`]:
//!
//! - **AssetClient**: the remote asset details endpoint
//! - **FileSource**: a payload stored on disk

mod client;
mod error;
mod file;

pub use client::{AssetClient, AssetClientConfig, DEFAULT_SOURCE_URL};
pub use error::FetchError;
pub use file::FileSource;

use async_trait::async_trait;

use crate::series::RawPayload;

/// Anything that can produce the raw asset history
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetch and validate the payload
    async fn fetch(&self) -> Result<RawPayload, FetchError>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}
