/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The underlying `reqwest` client could not be built.
    #[error("client build error: {0}")]
    Build(#[source] reqwest::Error),
    /// Every attempt failed before a response arrived.
    #[error("transport error for {url} after {attempts} attempt(s): {source}")]
    Transport {
        /// Target URL as given by the caller.
        url: String,
        /// Number of attempts made.
        attempts: usize,
        /// Error from the last attempt.
        #[source]
        source: reqwest::Error,
    },
    /// A response arrived but its body could not be read in full.
    #[error("body read error for {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Non-200 status from a raw-body POST.
    #[error("http status:{status}")]
    Status { url: String, status: u16 },
    /// The caller-supplied request body stream failed while draining.
    #[error("request body read error: {0}")]
    BodySource(#[source] std::io::Error),
}

impl HttpClientError {
    /// True when the final transport failure happened while connecting.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_connect())
    }

    /// True when the final failure was a connect, request or body-drain timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source, .. } | Self::BodyRead { source, .. } => source.is_timeout(),
            Self::BodySource(err) => err.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
