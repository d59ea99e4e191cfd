use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenSkyError>;

#[derive(Debug, Error)]
pub enum OpenSkyError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    /// Connect, timeout or body read failure.
    #[error("OpenSky request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenSky returned HTTP {status}")]
    Status { status: u16 },

    #[error("OpenSky response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl OpenSkyError {
    /// True when OpenSky failed to give a usable answer: unreachable, an
    /// error status, or a body that is not a states document.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }

    /// Worth another attempt: transport failures, throttling and server errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status } => *status == 429 || (500..600).contains(status),
            Self::ClientBuild(_) | Self::Decode(_) => false,
        }
    }
}
