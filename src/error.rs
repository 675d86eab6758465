use thiserror::Error;

/// Failure taxonomy for the scrape-and-submit pipeline.
///
/// `Transport` and `Parse` abort the owning symbol's run; `Auth` aborts the
/// whole run (there is nothing to submit with); `Validation` is reported and
/// the loop continues with the next symbol. None of these are retried.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The network call could not complete, or the remote answered with a
    /// redirection/client/server status.
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The page contains no quote table at all. An empty table is not a
    /// parse error; only the absent structure is.
    #[error("no quote table found at {url}")]
    Parse { url: String },

    /// Login rejected, or the token field was missing from the response.
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// Zero usable rows survived assembly and filtering.
    #[error("no usable quote rows scraped for '{symbol}'")]
    Validation { symbol: String },
}

impl EtlError {
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn auth(reason: impl ToString) -> Self {
        Self::Auth {
            reason: reason.to_string(),
        }
    }
}
