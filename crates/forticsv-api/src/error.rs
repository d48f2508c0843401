use thiserror::Error;

/// Top-level error type for the `forticsv-api` crate.
///
/// Covers every failure mode of the session layer: the login handshake,
/// transport, and the `results`-envelope contract of the data endpoints.
/// The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The post-login validation probe was rejected (wrong credentials,
    /// locked account, expired trusted-host window, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API contract ────────────────────────────────────────────────
    /// A data endpoint answered with a non-2xx status.
    #[error("API request to {endpoint} failed (HTTP {status})")]
    Api { endpoint: String, status: u16 },

    /// A data endpoint answered 2xx but the body carried no `results`
    /// array. An empty array is fine; an absent one means the firewall
    /// rejected or did not understand the query.
    #[error("Firewall returned no results for {endpoint}")]
    MissingResults { endpoint: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came out of the login handshake and
    /// different credentials might resolve it.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for the fatal missing-`results` envelope violation.
    pub fn is_missing_results(&self) -> bool {
        matches!(self, Self::MissingResults { .. })
    }
}
