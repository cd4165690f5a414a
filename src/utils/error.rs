use std::io;
use thiserror::Error;

/// Main error type for the BMP encoder.
#[derive(Error, Debug)]
pub enum BmpError {
    /// An I/O error occurred while writing to a file or stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The matrix dimensions cannot be represented in a BMP file.
    ///
    /// Raised for dimensions above `u32::MAX`, for a raw buffer whose length
    /// disagrees with `width * height`, and for images whose total file size
    /// does not fit the 32-bit size field.
    #[error("Invalid dimension: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// A row of the input matrix has a different length than the first row
    #[error("Row {row} has {actual} dots, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A specialized `Result` type for BMP encoding operations.
pub type Result<T> = std::result::Result<T, BmpError>;
