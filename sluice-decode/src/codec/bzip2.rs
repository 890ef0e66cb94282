//! Bzip2 (Burrows-Wheeler) backend.

use bzip2::{Decompress, Status};
use sluice_core::{Method, Result, SluiceError, StepStatus, StreamCodec};

/// Streaming bzip2 decompressor.
///
/// Decompression state is created with default settings: the regular
/// (non-`small`) algorithm and no verbosity.
pub struct Bzip2Codec {
    inner: Decompress,
}

impl Bzip2Codec {
    /// Create fresh bzip2 codec state.
    pub fn new() -> Self {
        Self {
            inner: Decompress::new(false),
        }
    }
}

impl Default for Bzip2Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCodec for Bzip2Codec {
    fn method(&self) -> Method {
        Method::Bzip2
    }

    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, StepStatus)> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();

        let status = self
            .inner
            .decompress(input, output)
            .map_err(|e| SluiceError::decode(Method::Bzip2, format!("{e:?}")))?;

        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        let status = match status {
            Status::StreamEnd => StepStatus::StreamEnd,
            _ => StepStatus::Progress,
        };

        Ok((consumed, produced, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bzip2::Compression;
    use bzip2::write::BzEncoder;
    use std::io::Write;

    fn bzip2(data: &[u8]) -> Vec<u8> {
        let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_single_step_whole_stream() {
        let compressed = bzip2(b"hello world");
        let mut codec = Bzip2Codec::new();
        let mut output = vec![0u8; 64];

        let (consumed, produced, status) = codec.step(&compressed, &mut output).unwrap();
        assert_eq!(consumed, compressed.len());
        assert_eq!(produced, 11);
        assert_eq!(status, StepStatus::StreamEnd);
        assert_eq!(&output[..produced], b"hello world");
    }

    #[test]
    fn test_invalid_magic_is_decode_error() {
        let mut codec = Bzip2Codec::new();
        let mut output = vec![0u8; 16];

        let err = codec.step(b"definitely not bz2", &mut output).unwrap_err();
        assert!(err.is_decode());
    }
}
