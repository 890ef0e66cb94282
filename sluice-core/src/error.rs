//! Error types for sluice operations.
//!
//! This module provides the error type shared across the workspace. It
//! covers codec initialization failures, lifecycle misuse, unrecoverable
//! decode errors, and I/O errors from the surrounding plumbing.

use crate::method::Method;
use std::io;
use thiserror::Error;

/// The main error type for sluice operations.
#[derive(Debug, Error)]
pub enum SluiceError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Codec state could not be initialized.
    #[error("codec initialization failed: {message}")]
    InitFailed {
        /// Description of what went wrong during initialization.
        message: String,
    },

    /// A chunk was processed while the decoder was not ready.
    #[error("decoder not ready: state is {state}")]
    NotReady {
        /// The lifecycle state the decoder was observed in.
        state: String,
    },

    /// The codec reported malformed or unrecoverable compressed data.
    #[error("{method} decode error: {message}")]
    Decode {
        /// The codec that reported the error.
        method: Method,
        /// Description from the codec backend.
        message: String,
    },
}

/// Result type alias for sluice operations.
pub type Result<T> = std::result::Result<T, SluiceError>;

impl SluiceError {
    /// Create an initialization failure error.
    pub fn init_failed(message: impl Into<String>) -> Self {
        Self::InitFailed {
            message: message.into(),
        }
    }

    /// Create a not-ready error.
    pub fn not_ready(state: impl Into<String>) -> Self {
        Self::NotReady {
            state: state.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(method: Method, message: impl Into<String>) -> Self {
        Self::Decode {
            method,
            message: message.into(),
        }
    }

    /// Whether this error is an unrecoverable decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
