//! The streaming decoder: codec lifecycle plus the drain loop.
//!
//! [`StreamDecoder`] owns codec state across many input-chunk deliveries.
//! Each [`StreamDecoder::process`] call feeds one chunk to the codec and
//! drains decompressed data in bounded windows, handing every filled window
//! to the caller's sink before the next one is produced.

use crate::codec;
use log::{debug, trace, warn};
use sluice_core::{
    ChunkSink, DEFAULT_WINDOW_SIZE, Method, OutputChunk, Result, SluiceError, StepStatus,
    StreamCodec,
};
use std::fmt;

/// Decoder configuration.
///
/// The method is fixed for the lifetime of a decoder; every other knob only
/// tunes how the same stream is drained or reported.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    method: Method,
    window_size: usize,
    multi_stream: bool,
    verbose: bool,
}

impl DecoderConfig {
    /// Create a configuration for the given method with default settings.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            window_size: DEFAULT_WINDOW_SIZE,
            multi_stream: false,
            verbose: false,
        }
    }

    /// Set the output window size in bytes.
    ///
    /// Must be non-zero; validated when the decoder is constructed.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Decode concatenated stream members instead of finishing at the first
    /// end-of-stream.
    pub fn with_multi_stream(mut self, multi_stream: bool) -> Self {
        self.multi_stream = multi_stream;
        self
    }

    /// Emit per-window debug diagnostics. Has no effect on data processing.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The configured method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The configured window size in bytes.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Whether concatenated stream members are decoded.
    pub fn multi_stream(&self) -> bool {
        self.multi_stream
    }

    /// Whether verbose diagnostics are enabled.
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new(Method::default())
    }
}

/// Lifecycle state of a [`StreamDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No codec state allocated; `reset` (or `open`) is required before
    /// processing.
    Uninitialized,
    /// Codec state is live and chunks can be processed.
    Ready,
    /// The stream ended; an explicit `reset` is required before another
    /// stream can be processed.
    Finished,
    /// The codec reported an unrecoverable error. Transient: the decoder
    /// resets itself back to `Ready` before the error is surfaced.
    Failed,
}

impl fmt::Display for DecoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecoderState::Uninitialized => "uninitialized",
            DecoderState::Ready => "ready",
            DecoderState::Finished => "finished",
            DecoderState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Terminal status of one `process` call. Neither value is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// All currently producible output was drained; the decoder stays ready
    /// for the next input chunk.
    Drained,
    /// The logical end of the compressed stream was reached within this
    /// call.
    StreamEnd,
}

/// How a drain loop ended, before lifecycle bookkeeping is applied.
enum DrainEnd {
    Drained,
    StreamEnd,
}

/// Why a drain loop aborted. Codec failures trigger recovery; sink failures
/// leave the decoder untouched.
enum DrainAbort {
    Codec(SluiceError),
    Sink(SluiceError),
}

/// Streaming decompression context.
///
/// Owns exactly one piece of codec state whenever it is `Ready` or
/// `Finished`. Re-initialization is always close-then-open, and dropping
/// the decoder releases the codec state.
pub struct StreamDecoder {
    config: DecoderConfig,
    codec: Option<Box<dyn StreamCodec>>,
    state: DecoderState,
    total_out: u64,
}

impl StreamDecoder {
    /// Create a decoder without allocating codec state.
    ///
    /// The decoder starts `Uninitialized`; call [`reset`](Self::reset)
    /// before processing, or use [`open`](Self::open) to do both at once.
    pub fn new(config: DecoderConfig) -> Result<Self> {
        if config.window_size == 0 {
            return Err(SluiceError::init_failed("window size must be non-zero"));
        }
        Ok(Self {
            config,
            codec: None,
            state: DecoderState::Uninitialized,
            total_out: 0,
        })
    }

    /// Create a decoder and open codec state, leaving it `Ready`.
    ///
    /// This is the "enter ready" lifecycle transition of the hosting
    /// pipeline. On failure no codec state is retained.
    pub fn open(config: DecoderConfig) -> Result<Self> {
        let mut decoder = Self::new(config)?;
        decoder.reset()?;
        Ok(decoder)
    }

    /// Tear down any existing codec state and open fresh state.
    ///
    /// Idempotent: resetting an `Uninitialized` decoder simply opens it.
    /// The output byte counter restarts at zero.
    pub fn reset(&mut self) -> Result<()> {
        self.close();
        self.codec = Some(codec::open(self.config.method)?);
        self.state = DecoderState::Ready;
        self.total_out = 0;
        debug!("opened {} decoder", self.config.method);
        Ok(())
    }

    /// Release codec state, leaving the decoder `Uninitialized`.
    ///
    /// Safe to call in any state, any number of times.
    pub fn close(&mut self) {
        if self.codec.take().is_some() {
            debug!("closed {} decoder", self.config.method);
        }
        self.state = DecoderState::Uninitialized;
    }

    /// The current lifecycle state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// The configured method.
    pub fn method(&self) -> Method {
        self.config.method
    }

    /// Total decompressed bytes emitted since the last open.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// The decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Process one input chunk, emitting zero or more output chunks.
    ///
    /// The whole of `input` is made available to the codec; the call drains
    /// output windows until no more output can be produced, the stream
    /// ends, or an error occurs. Every filled window goes to `sink`
    /// immediately, so peak memory stays at one window.
    ///
    /// # Errors
    ///
    /// * [`SluiceError::NotReady`] if the decoder is not `Ready`; no input
    ///   is consumed and no state changes.
    /// * [`SluiceError::Decode`] on unrecoverable compressed data. The
    ///   failing window is discarded and the decoder resets itself with
    ///   fresh codec state, so it is `Ready` for an unrelated stream when
    ///   this error is returned.
    /// * Any error returned by the sink, propagated unchanged with the
    ///   decoder left `Ready`.
    pub fn process<S>(&mut self, input: &[u8], sink: &mut S) -> Result<ProcessStatus>
    where
        S: ChunkSink + ?Sized,
    {
        let mut codec = match (self.state, self.codec.take()) {
            (DecoderState::Ready, Some(codec)) => codec,
            (state, codec) => {
                self.codec = codec;
                return Err(SluiceError::not_ready(state.to_string()));
            }
        };

        if self.config.verbose {
            debug!(
                "processing {len} byte chunk ({method}, window {window})",
                len = input.len(),
                method = self.config.method,
                window = self.config.window_size,
            );
        }

        match self.drain(&mut codec, input, sink) {
            Ok(DrainEnd::Drained) => {
                self.codec = Some(codec);
                Ok(ProcessStatus::Drained)
            }
            Ok(DrainEnd::StreamEnd) => {
                self.codec = Some(codec);
                self.state = DecoderState::Finished;
                debug!(
                    "{} stream ended after {} bytes",
                    self.config.method, self.total_out
                );
                Ok(ProcessStatus::StreamEnd)
            }
            Err(DrainAbort::Codec(err)) => {
                drop(codec);
                self.state = DecoderState::Failed;
                // Recover immediately so an unrelated stream can follow.
                if let Err(reset_err) = self.reset() {
                    warn!("recovery reset failed: {reset_err}");
                }
                Err(err)
            }
            Err(DrainAbort::Sink(err)) => {
                self.codec = Some(codec);
                Err(err)
            }
        }
    }

    /// Drain output windows for one input chunk.
    ///
    /// Performs no lifecycle bookkeeping; `process` applies state changes
    /// based on how the loop ended.
    fn drain<S>(
        &mut self,
        codec: &mut Box<dyn StreamCodec>,
        mut input: &[u8],
        sink: &mut S,
    ) -> std::result::Result<DrainEnd, DrainAbort>
    where
        S: ChunkSink + ?Sized,
    {
        loop {
            let mut window = vec![0u8; self.config.window_size];

            let (consumed, produced, status) = match codec.step(input, &mut window) {
                Ok(step) => step,
                Err(err) => return Err(DrainAbort::Codec(err)),
            };
            input = &input[consumed..];

            if produced > 0 {
                window.truncate(produced);
                let chunk = OutputChunk::new(window, self.total_out);
                self.total_out += produced as u64;
                trace!(
                    "emitting {produced} bytes at offset {offset}",
                    offset = chunk.offset(),
                );
                sink.emit(chunk).map_err(DrainAbort::Sink)?;
            }

            match status {
                StepStatus::StreamEnd => {
                    if !self.config.multi_stream {
                        return Ok(DrainEnd::StreamEnd);
                    }
                    // Member boundary: fresh codec state, continuous
                    // offsets. Stay ready for the next member.
                    *codec = codec::open(self.config.method).map_err(DrainAbort::Codec)?;
                    trace!("stream member ended, continuing at {}", self.total_out);
                    if input.is_empty() {
                        return Ok(DrainEnd::Drained);
                    }
                }
                StepStatus::Progress => {
                    // An unfilled window is the codec's signal that nothing
                    // more can be produced from the input at hand.
                    if produced < self.config.window_size {
                        return Ok(DrainEnd::Drained);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("total_out", &self.total_out)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn null_sink() -> impl FnMut(OutputChunk) -> Result<()> {
        |_chunk| Ok(())
    }

    #[test]
    fn test_new_is_uninitialized() {
        for method in Method::ALL {
            let decoder = StreamDecoder::new(DecoderConfig::new(method)).unwrap();
            assert_eq!(decoder.state(), DecoderState::Uninitialized);
            assert_eq!(decoder.total_out(), 0);
            assert_eq!(decoder.method(), method);
        }
    }

    #[test]
    fn test_open_is_ready() {
        for method in Method::ALL {
            let decoder = StreamDecoder::open(DecoderConfig::new(method)).unwrap();
            assert_eq!(decoder.state(), DecoderState::Ready);
        }
    }

    #[test]
    fn test_zero_window_size_rejected() {
        let err = StreamDecoder::new(DecoderConfig::new(Method::Gzip).with_window_size(0))
            .unwrap_err();
        assert!(matches!(err, SluiceError::InitFailed { .. }));
    }

    #[test]
    fn test_reset_is_idempotent() {
        for method in Method::ALL {
            let mut decoder = StreamDecoder::new(DecoderConfig::new(method)).unwrap();
            decoder.reset().unwrap();
            decoder.reset().unwrap();
            assert_eq!(decoder.state(), DecoderState::Ready);
            assert_eq!(decoder.total_out(), 0);
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut decoder = StreamDecoder::open(DecoderConfig::new(Method::Gzip)).unwrap();
        decoder.close();
        decoder.close();
        assert_eq!(decoder.state(), DecoderState::Uninitialized);
    }

    #[test]
    fn test_process_uninitialized_is_not_ready() {
        let mut decoder = StreamDecoder::new(DecoderConfig::new(Method::Gzip)).unwrap();
        let err = decoder.process(b"\x1f\x8b", &mut null_sink()).unwrap_err();
        assert!(matches!(err, SluiceError::NotReady { .. }));
        assert_eq!(decoder.state(), DecoderState::Uninitialized);
    }

    #[test]
    fn test_empty_chunk_is_drained() {
        let mut decoder = StreamDecoder::open(DecoderConfig::new(Method::Gzip)).unwrap();
        let mut emitted = 0usize;
        let mut sink = |_chunk: OutputChunk| -> Result<()> {
            emitted += 1;
            Ok(())
        };
        let status = decoder.process(&[], &mut sink).unwrap();
        assert_eq!(status, ProcessStatus::Drained);
        assert_eq!(emitted, 0);
        assert_eq!(decoder.state(), DecoderState::Ready);
    }

    #[test]
    fn test_config_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.method(), Method::Gzip);
        assert_eq!(config.window_size(), DEFAULT_WINDOW_SIZE);
        assert!(!config.multi_stream());
        assert!(!config.verbose());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(DecoderState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(DecoderState::Ready.to_string(), "ready");
        assert_eq!(DecoderState::Finished.to_string(), "finished");
        assert_eq!(DecoderState::Failed.to_string(), "failed");
    }
}
