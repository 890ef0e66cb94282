//! Gzip (DEFLATE in the RFC 1952 container) backend.

use flate2::{Decompress, FlushDecompress, Status};
use sluice_core::{Method, Result, SluiceError, StepStatus, StreamCodec};

/// Maximum DEFLATE window, log2 of 32 KiB.
const MAX_WINDOW_BITS: u8 = 15;

/// Streaming gzip decompressor.
///
/// The underlying inflate state is opened in gzip-wrapper mode, so the
/// container header and CRC/length trailer are consumed and verified by the
/// codec itself; callers feed raw `.gz` bytes.
pub struct GzipCodec {
    inner: Decompress,
}

impl GzipCodec {
    /// Create fresh gzip codec state.
    pub fn new() -> Self {
        Self {
            inner: Decompress::new_gzip(MAX_WINDOW_BITS),
        }
    }
}

impl Default for GzipCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCodec for GzipCodec {
    fn method(&self) -> Method {
        Method::Gzip
    }

    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, StepStatus)> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();

        let status = self
            .inner
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| SluiceError::decode(Method::Gzip, e.to_string()))?;

        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        let status = match status {
            Status::StreamEnd => StepStatus::StreamEnd,
            // BufError means no progress was possible with the space given,
            // which the drain loop observes as an unfilled window.
            Status::Ok | Status::BufError => StepStatus::Progress,
        };

        Ok((consumed, produced, status))
    }
}
