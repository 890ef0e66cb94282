//! # Sluice Core
//!
//! Core components for the sluice streaming decompressor.
//!
//! This crate provides the building blocks shared by the decoder and the
//! command-line front end:
//!
//! - [`chunk`]: output chunks and window sizing
//! - [`method`]: codec selection
//! - [`traits`]: the streaming codec and chunk sink interfaces
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! Sluice is organized as a small push-driven pipeline stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Host                                                    │
//! │     delivers input chunks, receives output chunks       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Drain loop                                              │
//! │     StreamDecoder: lifecycle + bounded output windows   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec (this crate defines the seam)                     │
//! │     StreamCodec: gzip or bzip2 engine                   │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod error;
pub mod method;
pub mod traits;

// Re-exports for convenience
pub use chunk::{DEFAULT_WINDOW_SIZE, OutputChunk};
pub use error::{Result, SluiceError};
pub use method::Method;
pub use traits::{ChunkSink, StepStatus, StreamCodec};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::chunk::{DEFAULT_WINDOW_SIZE, OutputChunk};
    pub use crate::error::{Result, SluiceError};
    pub use crate::method::Method;
    pub use crate::traits::{ChunkSink, StepStatus, StreamCodec};
}
