//! CLI error types with miette diagnostics.
//!
//! Maps session and filesystem failures into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes. The exporter's contract is binary: 0 when every requested
/// collection was written, 1 on any failure.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────

    #[error("'{value}' is not a valid item type")]
    #[diagnostic(
        code(forticsv::invalid_item),
        help("Choose one of: {valid}")
    )]
    InvalidItem { value: String, valid: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(forticsv::validation))]
    Validation { field: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Failed to log in to {host}")]
    #[diagnostic(
        code(forticsv::auth_failed),
        help(
            "Check the username, password, VDOM, and the admin port.\n\
             Firewalls with self-signed admin certificates need --insecure (-k)\n\
             or --ca-cert <PEM>."
        )
    )]
    AuthFailed {
        host: String,
        #[source]
        source: forticsv_api::Error,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(forticsv::api))]
    Api(#[from] forticsv_api::Error),

    // ── IO ───────────────────────────────────────────────────────────

    #[error("Failed to write {path}")]
    #[diagnostic(code(forticsv::write_failed))]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    ///
    /// Every failure -- invalid item type, rejected login, missing
    /// `results`, write failure -- terminates the run the same way.
    pub fn exit_code(&self) -> i32 {
        exit_code::GENERAL
    }
}
