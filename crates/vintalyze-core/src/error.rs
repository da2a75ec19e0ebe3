//! Error types for the vintalyze-core library.

use thiserror::Error;

/// Main error type for the vintalyze library.
#[derive(Error, Debug)]
pub enum VintalyzeError {
    /// Profile extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors returned by a profile analysis.
///
/// These are the only two outcomes besides a successful record: a missing
/// mandatory field, or an internal failure while evaluating the rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The mandatory field could not be recognized in the pasted text.
    #[error("missing mandatory field: {0}")]
    MissingMandatoryField(String),

    /// A rule could not be compiled or evaluated.
    #[error("malformed input: {cause}")]
    MalformedInput { cause: String },
}

impl ExtractionError {
    /// Message suitable for display to the person who pasted the text.
    ///
    /// The cause of a [`ExtractionError::MalformedInput`] is never part of it.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingMandatoryField(_) => {
                "Impossible de trouver le nom de la boutique. Assurez-vous d'avoir copié tout le contenu de la page du profil Vinted."
            }
            Self::MalformedInput { .. } => {
                "Erreur lors de l'analyse du profil. Veuillez réessayer."
            }
        }
    }

    /// Stable machine-readable kind, used by the bindings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingMandatoryField(_) => "missing_mandatory_field",
            Self::MalformedInput { .. } => "malformed_input",
        }
    }

    pub(crate) fn malformed(cause: impl Into<String>) -> Self {
        Self::MalformedInput {
            cause: cause.into(),
        }
    }
}

impl From<regex::Error> for ExtractionError {
    fn from(err: regex::Error) -> Self {
        Self::malformed(format!("invalid rule pattern: {err}"))
    }
}

/// Result type for the vintalyze library.
pub type Result<T> = std::result::Result<T, VintalyzeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_cause() {
        let err = ExtractionError::malformed("regex parse error at offset 3");
        assert!(!err.user_message().contains("regex"));
        assert!(err.to_string().contains("regex parse error"));
    }

    #[test]
    fn test_missing_field_message_mentions_full_page() {
        let err = ExtractionError::MissingMandatoryField("shop name".to_string());
        assert!(err.user_message().contains("tout le contenu"));
        assert_eq!(err.kind(), "missing_mandatory_field");
    }
}
