//! Codec backends.
//!
//! One [`StreamCodec`] implementation per supported method. The drain loop
//! never branches on the method; everything codec-specific lives here.

mod bzip2;
mod gzip;

pub use bzip2::Bzip2Codec;
pub use gzip::GzipCodec;

use sluice_core::{Method, Result, StreamCodec};

/// Allocate and initialize fresh codec state for the given method.
pub fn open(method: Method) -> Result<Box<dyn StreamCodec>> {
    match method {
        Method::Gzip => Ok(Box::new(GzipCodec::new())),
        Method::Bzip2 => Ok(Box::new(Bzip2Codec::new())),
    }
}
