//! Classified error output for failed invocations.

use hifi_config::ConfigError;
use hifi_core::errors::CoreError;
use hifi_db::error::DatabaseError;
use hifi_sources::SourceError;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Machine-readable description of a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    /// HTTP-style status, so scripts can branch the same way a web client would.
    pub status: u16,
}

impl ErrorBody {
    pub fn from_error(error: &anyhow::Error) -> Self {
        let (code, status) = classify(error);
        Self {
            error: format!("{error:#}"),
            code,
            status,
        }
    }
}

const fn classify_core(error: &CoreError) -> (&'static str, u16) {
    match error {
        CoreError::NotFound { .. } => ("not_found", 404),
        CoreError::Validation(_) => ("validation", 400),
        CoreError::InvalidTransition { .. } => ("invalid_transition", 409),
        CoreError::Other(_) => ("internal", 500),
    }
}

fn classify(error: &anyhow::Error) -> (&'static str, u16) {
    for cause in error.chain() {
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return classify_core(core);
        }
        if let Some(core) = cause
            .downcast_ref::<DatabaseError>()
            .and_then(DatabaseError::as_core)
        {
            return classify_core(core);
        }
        if let Some(SourceError::RateLimited { .. }) = cause.downcast_ref::<SourceError>() {
            return ("rate_limited", 429);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return ("config", 500);
        }
    }
    ("internal", 500)
}

/// Print a failure to stderr: JSON for machine formats, plain text otherwise.
pub fn report(error: &anyhow::Error, format: OutputFormat) {
    if format.is_machine() {
        let body = ErrorBody::from_error(error);
        match serde_json::to_string(&body) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("hifi error: {error:#}"),
        }
    } else {
        eprintln!("hifi error: {error:#}");
    }
}
