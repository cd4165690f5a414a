// src/encode/header.rs

//! Fixed-size BMP headers for a 1 bit per pixel, two-color bitmap.
//!
//! Layout of the file prefix:
//! - `BITMAPFILEHEADER` (14 bytes)
//! - `BITMAPINFOHEADER` (40 bytes)
//! - color table, two `RGBQUAD` entries (8 bytes)
//!
//! All multi-byte fields are little-endian.

use crate::encode::params::BmpParams;
use crate::{BmpError, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use bytemuck::{Pod, Zeroable};
use log::trace;
use std::io::{self, Write};

/// "BM"
pub const BMP_SIGNATURE: [u8; 2] = [b'B', b'M'];

/// Offset from the start of the file to the pixel data.
pub const PIXEL_DATA_OFFSET: u32 =
    (FileHeader::SIZE + InfoHeader::SIZE + ColorTable::SIZE) as u32;

/// Default resolution, about 96 DPI.
pub const DEFAULT_PIXELS_PER_METER: u32 = 3780;

/// `BITMAPFILEHEADER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Size of the whole file in bytes.
    pub file_size: u32,
    /// Offset of the pixel data from the start of the file.
    pub pixel_offset: u32,
}

impl FileHeader {
    pub const SIZE: usize = 14;

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&BMP_SIGNATURE)?;
        writer.write_u32::<LittleEndian>(self.file_size)?;
        writer.write_u16::<LittleEndian>(0)?; // bfReserved1
        writer.write_u16::<LittleEndian>(0)?; // bfReserved2
        writer.write_u32::<LittleEndian>(self.pixel_offset)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        // writing into a slice of exactly SIZE bytes cannot run short
        let _ = self.write_to(&mut buf[..]);
        buf
    }
}

/// `BITMAPINFOHEADER` for an uncompressed, bottom-up 1bpp image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub width: u32,
    pub height: u32,
    /// Length of the pixel data in bytes, padding included.
    pub image_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
}

impl InfoHeader {
    pub const SIZE: usize = 40;
    pub const PLANES: u16 = 1;
    pub const BIT_COUNT: u16 = 1;
    /// BI_RGB
    pub const COMPRESSION: u32 = 0;

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(Self::SIZE as u32)?;
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u16::<LittleEndian>(Self::PLANES)?;
        writer.write_u16::<LittleEndian>(Self::BIT_COUNT)?;
        writer.write_u32::<LittleEndian>(Self::COMPRESSION)?;
        writer.write_u32::<LittleEndian>(self.image_size)?;
        writer.write_u32::<LittleEndian>(self.x_pixels_per_meter)?;
        writer.write_u32::<LittleEndian>(self.y_pixels_per_meter)?;
        // biClrUsed and biClrImportant: 0 means all 2^bitcount colors
        writer.write_u32::<LittleEndian>(0)?;
        writer.write_u32::<LittleEndian>(0)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        let _ = self.write_to(&mut buf[..]);
        buf
    }
}

/// `RGBQUAD`, stored blue first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RgbQuad {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl RgbQuad {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }
}

/// Two-entry palette: index 0 is black, index 1 is white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable([RgbQuad; 2]);

impl ColorTable {
    pub const SIZE: usize = 2 * std::mem::size_of::<RgbQuad>();

    pub fn entries(&self) -> &[RgbQuad; 2] {
        &self.0
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(bytemuck::cast_slice(&self.0[..]))
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf.copy_from_slice(bytemuck::cast_slice(&self.0[..]));
        buf
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self([RgbQuad::BLACK, RgbQuad::WHITE])
    }
}

/// Builds the headers and color table for an image of `width` x `height`
/// dots whose packed pixel data is `pixel_data_len` bytes long.
///
/// Fails with [`BmpError::InvalidDimension`] if a dimension or the total file
/// size does not fit in 32 bits.
pub fn build_headers(
    width: usize,
    height: usize,
    pixel_data_len: usize,
    params: &BmpParams,
) -> Result<(FileHeader, InfoHeader, ColorTable)> {
    let invalid = || BmpError::InvalidDimension { width, height };

    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    let image_size = u32::try_from(pixel_data_len).map_err(|_| invalid())?;
    let file_size = PIXEL_DATA_OFFSET
        .checked_add(image_size)
        .ok_or_else(invalid)?;

    let file_header = FileHeader {
        file_size,
        pixel_offset: PIXEL_DATA_OFFSET,
    };
    let info_header = InfoHeader {
        width: w,
        height: h,
        image_size,
        x_pixels_per_meter: params.x_pixels_per_meter,
        y_pixels_per_meter: params.y_pixels_per_meter,
    };
    trace!("BMP headers: {:?} {:?}", file_header, info_header);

    Ok((file_header, info_header, ColorTable::default()))
}
