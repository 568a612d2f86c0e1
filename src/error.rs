//! Error taxonomy shared by the estimators and the request boundary.
//!
//! The formulas themselves never fail; everything here is raised either
//! while validating a request or while talking to an external collaborator.

/// Errors produced at the request boundary.
#[derive(thiserror::Error, Debug)]
pub enum ImpactError {
    #[error("missing required parameter: {0}")]
    MissingField(&'static str),

    #[error("invalid parameter {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unknown mitigation type: {0:?} (expected kinetic, gravity or nuclear)")]
    UnknownStrategy(String),

    #[error("upstream lookup unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("computation produced a non-finite {0}")]
    NonFiniteResult(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImpactError {
    /// Shorthand for an [`ImpactError::InvalidField`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ImpactError::MissingField(_)
                | ImpactError::InvalidField { .. }
                | ImpactError::UnknownStrategy(_)
        )
    }

    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_invalid_input() { 400 } else { 500 }
    }

    /// Message safe to show to an end user.
    ///
    /// Invalid input names the offending field; every other failure collapses
    /// to the generic `fallback` so internals never leak.
    pub fn public_message(&self, fallback: &str) -> String {
        if self.is_invalid_input() {
            self.to_string()
        } else {
            fallback.to_string()
        }
    }
}
