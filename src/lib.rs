//! # Black and White BMP Encoder
//!
//! Writes monochrome (1 bit per pixel) Windows BMP files from a rectangular
//! matrix of dots, such as a generated barcode symbol.
//!
//! This library is organized into several modules:
//! - `utils`: Error handling
//! - `image`: The dot matrix input type
//! - `encode`: Bit packing, header building and file assembly
//!
//! # Example
//!
//! ```rust
//! use bwbmp_encoder::{BwBitmap, DotMatrix};
//!
//! let matrix = DotMatrix::from_rows(&[[1u8, 0, 1], [0, 1, 0]])?;
//! let bmp = BwBitmap::new(&matrix)?;
//! assert_eq!(&bmp.as_bytes()[..2], b"BM");
//! assert_eq!(bmp.file_size(), 62 + 2 * 4);
//! # Ok::<(), bwbmp_encoder::BmpError>(())
//! ```

// Re-export commonly used types at the crate root
pub use utils::error::{BmpError, Result};

pub mod utils {
    pub mod error;
}

pub mod image {
    pub mod dot_matrix;
}

pub mod encode;

// Public API exports
pub use crate::encode::bitmap::BwBitmap;
pub use crate::encode::header::{BMP_SIGNATURE, PIXEL_DATA_OFFSET};
pub use crate::encode::packer::{bytes_per_row, pack, PackedPixelData};
pub use crate::encode::params::BmpParams;
pub use crate::image::dot_matrix::DotMatrix;
