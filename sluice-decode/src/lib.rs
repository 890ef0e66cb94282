//! # Sluice Decode
//!
//! Streaming gzip/bzip2 decompression element for sluice.
//!
//! The entry point is [`StreamDecoder`]: a push-driven decompression
//! context that accepts arbitrarily sized compressed chunks and emits
//! decompressed output in bounded windows. The host delivers chunks with
//! [`StreamDecoder::process`] and receives each output window through a
//! [`ChunkSink`](sluice_core::ChunkSink) as soon as it fills.
//!
//! ## Example
//!
//! ```rust
//! use flate2::{Compression, write::GzEncoder};
//! use sluice_core::Method;
//! use sluice_decode::decode_all;
//! use std::io::Write;
//!
//! let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
//! encoder.write_all(b"Hello, World!").unwrap();
//! let compressed = encoder.finish().unwrap();
//!
//! let decompressed = decode_all(&compressed, Method::Gzip).unwrap();
//! assert_eq!(decompressed, b"Hello, World!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
mod decoder;

pub use decoder::{DecoderConfig, DecoderState, ProcessStatus, StreamDecoder};

use sluice_core::{Method, OutputChunk, Result};

/// Decompress a whole in-memory payload at once.
///
/// Convenience wrapper over [`StreamDecoder`] for callers that are not
/// streaming: the payload is processed as a single input chunk and the
/// emitted windows are concatenated. Decoding stops at the first
/// end-of-stream; trailing bytes after it are ignored.
pub fn decode_all(data: &[u8], method: Method) -> Result<Vec<u8>> {
    let mut decoder = StreamDecoder::open(DecoderConfig::new(method))?;
    let mut output = Vec::new();
    let mut sink = |chunk: OutputChunk| -> Result<()> {
        output.extend_from_slice(chunk.data());
        Ok(())
    };
    decoder.process(data, &mut sink)?;
    Ok(output)
}
