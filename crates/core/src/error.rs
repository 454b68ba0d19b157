//! Unified error types for waypost.

/// Errors raised by upstream HTTP plumbing.
///
/// None of these reach a search caller: the accepted-set source converts
/// every failure into a fallback set with a diagnostic note. The trust
/// proxy is the only surface that reports one, as a 502 envelope.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured upstream URL does not parse.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(String),

    /// The upstream did not answer within the request timeout.
    #[error("upstream request timed out: {0}")]
    Timeout(String),

    /// The upstream could not be reached or the transfer failed.
    #[error("upstream request failed: {0}")]
    Network(String),
}
