//! Codec selection.

use std::fmt;
use std::str::FromStr;

/// Decompression method.
///
/// The method is fixed for the lifetime of one decoder; switching methods
/// means constructing a new decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// DEFLATE wrapped in the gzip container (RFC 1952).
    #[default]
    Gzip,
    /// Burrows-Wheeler compression in the bzip2 container.
    Bzip2,
}

impl Method {
    /// All supported methods.
    pub const ALL: [Method; 2] = [Method::Gzip, Method::Bzip2];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Gzip => "gzip",
            Method::Bzip2 => "bzip2",
        }
    }

    /// Conventional file extension for this method's container format.
    pub fn extension(&self) -> &'static str {
        match self {
            Method::Gzip => "gz",
            Method::Bzip2 => "bz2",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    // "zlib" and "bzlib" are accepted for compatibility with older tooling
    // that selected the codec by library name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gzip" | "gz" | "zlib" => Ok(Method::Gzip),
            "bzip2" | "bz2" | "bzlib" => Ok(Method::Bzip2),
            other => Err(format!("unknown method: {other}")),
        }
    }
}
