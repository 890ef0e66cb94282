//! Core traits for streaming decompression.
//!
//! This module defines the two seams of the pipeline: [`StreamCodec`], the
//! capability interface implemented once per codec backend, and
//! [`ChunkSink`], the edge through which output chunks leave the decoder.

use crate::chunk::OutputChunk;
use crate::error::Result;
use crate::method::Method;

/// Outcome of one successful drain step.
///
/// The third low-level outcome, an unrecoverable codec error, travels
/// through the `Err` arm of [`StreamCodec::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The codec made progress, or could make no more without additional
    /// input or output space.
    Progress,
    /// The codec reached the logical end of the compressed stream.
    StreamEnd,
}

/// A stateful streaming decompressor backend.
///
/// Implementations own the native codec state for one compression format
/// and expose a single resumable step: consume some of the given input,
/// fill some of the given output window.
pub trait StreamCodec {
    /// The method this codec decodes.
    fn method(&self) -> Method;

    /// Run one drain step.
    ///
    /// # Arguments
    ///
    /// * `input` - remaining unconsumed compressed bytes for this call
    /// * `output` - the output window to fill
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output,
    /// status). Exhausted input or output space is not an error; the step
    /// reports [`StepStatus::Progress`] with whatever it could do.
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, StepStatus)>;
}

/// Receiver for decompressed output chunks.
///
/// Chunks arrive in stream order, each stamped with its logical offset.
/// Returning an error aborts the current `process` call and propagates to
/// the caller.
pub trait ChunkSink {
    /// Accept ownership of one output chunk.
    fn emit(&mut self, chunk: OutputChunk) -> Result<()>;
}

impl<F> ChunkSink for F
where
    F: FnMut(OutputChunk) -> Result<()>,
{
    fn emit(&mut self, chunk: OutputChunk) -> Result<()> {
        self(chunk)
    }
}
