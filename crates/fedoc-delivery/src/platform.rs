//! # Platform Capabilities
//!
//! Read-only probes plus the handful of runtime side effects delivery
//! strategies need: file share sheet, local download, link opening. The
//! surrounding application implements this for its runtime; tests use
//! scripted fakes.

use async_trait::async_trait;
use thiserror::Error;

/// A platform side effect failed or is unsupported.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The runtime does not support this capability.
    #[error("platform capability unsupported: {0}")]
    Unsupported(&'static str),
    /// The capability exists but the call failed.
    #[error("platform call failed: {0}")]
    Failed(String),
}

/// The runtime environment a delivery executes in.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Whether the runtime reports itself as a mobile device.
    fn is_mobile(&self) -> bool;

    /// Whether the runtime can hand files to a native share sheet.
    fn can_share_files(&self) -> bool;

    /// Hand a file plus message text to the native share sheet.
    async fn share_file(
        &self,
        filename: &str,
        bytes: &[u8],
        text: &str,
    ) -> Result<(), PlatformError>;

    /// Trigger a local file download.
    async fn download_file(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError>;

    /// Open a link (deep link, web URL, or `mailto:`).
    async fn open_link(&self, url: &str) -> Result<(), PlatformError>;
}
