//! Mesh engine error types

use std::fmt;

/// Error returned when the mesh engine refuses a set of parameters
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A numeric parameter is NaN or infinite
    NonFinite {
        /// Parameter name as passed to the engine
        parameter: &'static str,
    },
    /// A parameter would produce degenerate geometry
    Degenerate {
        /// Parameter name as passed to the engine
        parameter: &'static str,
        /// The offending value
        value: f32,
    },
    /// Text mesh requested for a string with no visible glyphs
    EmptyText,
    /// A font the engine cannot use
    InvalidFont(String),
}

impl EngineError {
    /// Name of the engine parameter that was rejected, if any
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            EngineError::NonFinite { parameter } => Some(parameter),
            EngineError::Degenerate { parameter, .. } => Some(parameter),
            EngineError::EmptyText | EngineError::InvalidFont(_) => None,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NonFinite { parameter } => {
                write!(f, "Mesh parameter '{}' is not finite", parameter)
            }
            EngineError::Degenerate { parameter, value } => {
                write!(f, "Mesh parameter '{}' = {} produces degenerate geometry", parameter, value)
            }
            EngineError::EmptyText => write!(f, "Text mesh has no visible characters"),
            EngineError::InvalidFont(msg) => write!(f, "Invalid font: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
