pub mod bitmap;
pub mod header;
pub mod packer;
pub mod params;

// Re-export commonly used encoding functionality
pub use bitmap::BwBitmap;
pub use header::{build_headers, ColorTable, FileHeader, InfoHeader, RgbQuad};
pub use packer::{bytes_per_row, pack, PackedPixelData};
pub use params::BmpParams;

// Re-export error types for convenience
pub use crate::utils::error::{BmpError, Result};
