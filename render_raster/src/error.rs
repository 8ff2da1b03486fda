use thiserror::Error;

use std::io;

///
/// Error from rendering or exporting a set of paths
///
#[derive(Debug, Error)]
pub enum ExportError {
    /// A bitmap of the requested size can't be created (one of the dimensions is zero, or it's too large)
    #[error("cannot render an image of size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// The rendered image could not be encoded
    #[error("could not encode image: {0}")]
    Encode(String),

    /// The encoded image could not be written out
    #[error("could not write image: {0}")]
    Io(#[from] io::Error)
}
