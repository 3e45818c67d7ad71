//! Load failure taxonomy.

use thiserror::Error;

/// Why a fragment load failed.
///
/// Both variants are non-fatal to composition: the coordinator absorbs them
/// with a diagnostic and leaves the slot's prior content untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The transport completed, but with a non-success status.
    #[error("request for `{locator}` returned status {status}")]
    Status { locator: String, status: u16 },

    /// The transport itself could not complete (network unreachable,
    /// resource missing at a lower layer, malformed locator).
    #[error("transport failure for `{locator}`")]
    Transport {
        locator: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LoadError {
    pub(crate) fn transport(
        locator: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            locator: locator.into(),
            source: source.into(),
        }
    }

    /// The locator the failed load was for.
    pub fn locator(&self) -> &str {
        match self {
            Self::Status { locator, .. } | Self::Transport { locator, .. } => locator,
        }
    }
}
