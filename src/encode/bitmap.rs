// src/encode/bitmap.rs

//! Assembles a complete 1bpp BMP file and hands it to output sinks.

use crate::encode::header::{build_headers, ColorTable, FileHeader, InfoHeader, PIXEL_DATA_OFFSET};
use crate::encode::packer::{bytes_per_row, pack};
use crate::encode::params::BmpParams;
use crate::image::dot_matrix::DotMatrix;
use crate::{BmpError, Result};
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// An encoded black and white BMP file.
///
/// The file bytes are produced once by [`BwBitmap::new`] and never change;
/// every accessor and sink reads the same buffer.
///
/// Dots set to `1` select palette entry 1 (white), dots set to `0` select
/// palette entry 0 (black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwBitmap {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    bytes: Vec<u8>,
}

impl BwBitmap {
    /// Encodes `matrix` with the default resolution.
    pub fn new(matrix: &DotMatrix) -> Result<Self> {
        Self::with_params(matrix, &BmpParams::default())
    }

    /// Encodes `matrix` using the given parameters.
    ///
    /// Dimensions are validated before any pixel is packed.
    pub fn with_params(matrix: &DotMatrix, params: &BmpParams) -> Result<Self> {
        let width = matrix.width();
        let height = matrix.height();
        let bytes_per_row = bytes_per_row(width);
        let pixel_len = bytes_per_row
            .checked_mul(height)
            .ok_or(BmpError::InvalidDimension { width, height })?;

        let (file_header, info_header, color_table) =
            build_headers(width, height, pixel_len, params)?;

        let pixels = pack(matrix);
        debug_assert_eq!(pixels.len(), pixel_len);

        let bytes = assemble(&file_header, &info_header, &color_table, pixels.as_bytes());
        debug!(
            "Assembled {}x{} BMP: {} bytes per row, {} bytes total",
            width,
            height,
            bytes_per_row,
            bytes.len()
        );

        Ok(Self {
            width: info_header.width,
            height: info_header.height,
            bytes_per_row,
            bytes,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Padded length of one scanline in bytes.
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Total file length in bytes, equal to the header's size field.
    #[inline]
    pub fn file_size(&self) -> usize {
        self.bytes.len()
    }

    /// The complete file contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The pixel data section, bottom scanline first.
    #[inline]
    pub fn pixel_data(&self) -> &[u8] {
        &self.bytes[PIXEL_DATA_OFFSET as usize..]
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the file to `path`, creating or truncating it.
    ///
    /// The file is closed on every return path. The write is not atomic: an
    /// interrupted write can leave a partial file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(&self.bytes)?;
        file.flush()?;
        debug!("Saved {} byte BMP to {}", self.bytes.len(), path.display());
        Ok(())
    }

    /// Writes the file to an already open sink.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.bytes)?;
        writer.flush()?;
        Ok(())
    }
}

impl AsRef<[u8]> for BwBitmap {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Concatenates headers, color table and pixel data into one buffer
/// allocated at its final size.
fn assemble(
    file_header: &FileHeader,
    info_header: &InfoHeader,
    color_table: &ColorTable,
    pixels: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(file_header.file_size as usize);
    out.extend_from_slice(&file_header.to_bytes());
    out.extend_from_slice(&info_header.to_bytes());
    out.extend_from_slice(&color_table.to_bytes());
    out.extend_from_slice(pixels);
    out
}
