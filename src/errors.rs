//! Error types for rapid_textviz
//!
//! This module defines the error types used throughout the library.
//! Every failure is detected synchronously at the point of malformed input;
//! a call either fully succeeds or fully fails.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TextVizError>;

/// Main error type for rapid_textviz
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextVizError {
    /// No terms survived tokenization and filtering
    #[error("Empty vocabulary: {message}")]
    EmptyVocabulary { message: String },

    /// Fewer distinct terms than requested (strict ranking only)
    #[error("Insufficient terms: requested {requested}, only {available} available")]
    InsufficientTerms { requested: usize, available: usize },

    /// No trigram contained any connector (strict phrase nets only)
    #[error("No matching trigrams: {message}")]
    NoMatchingTrigrams { message: String },

    /// Labels were supplied but do not line up with the texts
    #[error("Label mismatch: {texts} texts but {labels} labels")]
    LabelMismatch { texts: usize, labels: usize },

    /// Label filter argument cannot select anything
    #[error("Invalid label selector: {message}")]
    InvalidLabelSelector { message: String },

    /// A fixed vocabulary has duplicate terms, duplicate indices, or gaps
    #[error("Invalid vocabulary: {message}")]
    InvalidVocabulary { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A rendering adapter could not produce output
    #[error("Render error: {message}")]
    Render { message: String },
}

impl TextVizError {
    /// Create an empty vocabulary error
    pub fn empty_vocabulary(message: impl Into<String>) -> Self {
        Self::EmptyVocabulary {
            message: message.into(),
        }
    }

    /// Create an insufficient terms error
    pub fn insufficient_terms(requested: usize, available: usize) -> Self {
        Self::InsufficientTerms {
            requested,
            available,
        }
    }

    /// Create a no matching trigrams error
    pub fn no_matching_trigrams(message: impl Into<String>) -> Self {
        Self::NoMatchingTrigrams {
            message: message.into(),
        }
    }

    /// Create a label mismatch error
    pub fn label_mismatch(texts: usize, labels: usize) -> Self {
        Self::LabelMismatch { texts, labels }
    }

    /// Create an invalid label selector error
    pub fn invalid_label_selector(message: impl Into<String>) -> Self {
        Self::InvalidLabelSelector {
            message: message.into(),
        }
    }

    /// Create an invalid vocabulary error
    pub fn invalid_vocabulary(message: impl Into<String>) -> Self {
        Self::InvalidVocabulary {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Check if this error means "nothing to count"
    pub fn is_empty_vocabulary(&self) -> bool {
        matches!(self, Self::EmptyVocabulary { .. })
    }
}

impl From<serde_json::Error> for TextVizError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
