/*!
 * Error types for the subalign library.
 *
 * This module contains custom error types for the different stages of
 * subtitle alignment, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when an injected split delegate is consulted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The delegate could not complete its request
    #[error("Delegate request failed: {0}")]
    RequestFailed(String),

    /// The delegate answered with something that could not be parsed
    #[error("Failed to parse delegate response: {0}")]
    ParseError(String),

    /// The delegate answered with no usable lines
    #[error("Delegate returned an empty response")]
    EmptyResponse,
}

/// Errors raised while aligning translated text with sentence timing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// Split output does not reproduce the input text (whitespace-insensitive)
    #[error("Strategy '{strategy}' changed the text content")]
    FidelityMismatch {
        /// Name of the strategy that produced the output
        strategy: String,
    },

    /// Split output has the wrong number of segments
    #[error("Strategy '{strategy}' produced {actual} segments, expected {expected}")]
    CountMismatch {
        /// Name of the strategy that produced the output
        strategy: String,
        /// Required segment count
        expected: usize,
        /// Produced segment count
        actual: usize,
    },

    /// A window or synthesized segment has zero or negative duration
    #[error("Segment {index} has invalid duration {duration:.3}s")]
    InvalidDuration {
        /// Sentence index of the offending segment
        index: usize,
        /// The offending duration in seconds
        duration: f64,
    },

    /// Zero segments were requested
    #[error("Target segment count must be at least 1")]
    InvalidSegmentCount,

    /// The delegation tier failed
    #[error("Delegation failed: {0}")]
    Delegation(#[from] ProviderError),
}

/// Errors that can occur while reading SubRip content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timecode line could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The content held no complete entry
    #[error("No valid subtitle entries were found")]
    NoEntries,
}

/// Main library error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the alignment stages
    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AlignmentError {
    /// Whether the matcher may recover from this error by trying the next strategy
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidSegmentCount)
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
