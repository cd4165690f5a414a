// src/encode/packer.rs

//! Packs a [`DotMatrix`] into BMP scanlines: one bit per dot, MSB-first,
//! rows padded to 4 bytes and stored bottom-up.

use crate::image::dot_matrix::DotMatrix;
use bitvec::prelude::*;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Returns the padded length in bytes of a 1bpp scanline `width` pixels wide.
///
/// This is `ceil(width / 8)` rounded up to the next multiple of 4.
#[inline]
pub const fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(8).next_multiple_of(4)
}

/// Pixel data in the on-disk BMP layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPixelData {
    bytes_per_row: usize,
    rows: usize,
    data: Vec<u8>,
}

impl PackedPixelData {
    /// Padded scanline length in bytes.
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Number of scanlines.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scanline `i` as stored in the file; scanline 0 is the bottom image row.
    pub fn scanline(&self, i: usize) -> Option<&[u8]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.bytes_per_row;
        Some(&self.data[start..start + self.bytes_per_row])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Sets the bit of every foreground dot of `src` in the zeroed scanline `dst`.
#[inline]
fn pack_row(src: &[u8], dst: &mut [u8]) {
    let bits = dst.view_bits_mut::<Msb0>();
    for (c, &dot) in src.iter().enumerate() {
        // OR only: other bits of the same byte belong to neighbouring columns
        if dot & 1 != 0 {
            bits.set(c, true);
        }
    }
}

/// Converts a dot matrix into padded, bottom-up, MSB-first pixel data.
///
/// The buffer is allocated once at its final size and zero-filled, so padding
/// bits and padding bytes are always zero.
pub fn pack(matrix: &DotMatrix) -> PackedPixelData {
    let width = matrix.width();
    let height = matrix.height();
    let bpr = bytes_per_row(width);
    let mut data = vec![0u8; bpr * height];

    if width > 0 && height > 0 {
        // Destination scanlines run bottom-up; source rows run top-down.
        #[cfg(feature = "rayon")]
        data.par_chunks_exact_mut(bpr)
            .rev()
            .zip(matrix.as_raw().par_chunks_exact(width))
            .for_each(|(dst, src)| pack_row(src, dst));

        #[cfg(not(feature = "rayon"))]
        data.chunks_exact_mut(bpr)
            .rev()
            .zip(matrix.rows())
            .for_each(|(dst, src)| pack_row(src, dst));
    }

    PackedPixelData {
        bytes_per_row: bpr,
        rows: height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn test_bytes_per_row() {
        assert_eq!(bytes_per_row(0), 0);
        assert_eq!(bytes_per_row(1), 4);
        assert_eq!(bytes_per_row(8), 4);
        assert_eq!(bytes_per_row(32), 4);
        assert_eq!(bytes_per_row(33), 8);
        assert_eq!(bytes_per_row(64), 8);
        assert_eq!(bytes_per_row(65), 12);
        for w in 0..200 {
            let bpr = bytes_per_row(w);
            let min = (w + 7) / 8;
            assert_eq!(bpr % 4, 0);
            assert!(bpr >= min);
            assert!(bpr < min + 4);
        }
    }

    #[test]
    fn test_single_dot() -> Result<()> {
        let packed = pack(&DotMatrix::from_rows(&[[1u8]])?);
        assert_eq!(packed.as_bytes(), &[0x80, 0x00, 0x00, 0x00]);
        assert_eq!(packed.bytes_per_row(), 4);
        assert_eq!(packed.rows(), 1);
        Ok(())
    }

    #[test]
    fn test_ninth_column_is_msb_of_second_byte() -> Result<()> {
        let mut row = [0u8; 9];
        row[8] = 1;
        let packed = pack(&DotMatrix::from_rows(&[row])?);
        assert_eq!(packed.as_bytes(), &[0x00, 0x80, 0x00, 0x00]);
        Ok(())
    }

    #[test]
    fn test_adjacent_columns_are_independent() -> Result<()> {
        // Each column alone lands on its own bit, and all eight together fill the byte.
        for c in 0..8 {
            let m = DotMatrix::from_fn(8, 1, |_, col| col == c)?;
            assert_eq!(pack(&m).as_bytes()[0], 0x80 >> c);
        }
        let alternating = DotMatrix::from_rows(&[[1u8, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1]])?;
        assert_eq!(&pack(&alternating).as_bytes()[..2], &[0xAA, 0x50]);

        let full = DotMatrix::from_fn(8, 1, |_, _| true)?;
        assert_eq!(pack(&full).as_bytes(), &[0xFF, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_rows_stored_bottom_up() -> Result<()> {
        let m = DotMatrix::from_rows(&[[1u8, 0], [0, 1], [0, 0]])?;
        let packed = pack(&m);
        assert_eq!(packed.scanline(0), Some(&[0x00, 0, 0, 0][..]));
        assert_eq!(packed.scanline(1), Some(&[0x40, 0, 0, 0][..]));
        assert_eq!(packed.scanline(2), Some(&[0x80, 0, 0, 0][..]));
        assert_eq!(packed.scanline(3), None);
        Ok(())
    }

    #[test]
    fn test_high_bits_ignored() -> Result<()> {
        let m = DotMatrix::from_rows(&[[0xFEu8, 0x03, 0xFF, 0x02]])?;
        assert_eq!(pack(&m).as_bytes(), &[0x60, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_padding_stays_zero() -> Result<()> {
        let m = DotMatrix::from_fn(13, 4, |_, _| true)?;
        let packed = pack(&m);
        assert_eq!(packed.len(), 16);
        for i in 0..4 {
            assert_eq!(packed.scanline(i), Some(&[0xFF, 0xF8, 0x00, 0x00][..]));
        }
        Ok(())
    }

    #[test]
    fn test_degenerate_sizes() -> Result<()> {
        let zero = pack(&DotMatrix::default());
        assert!(zero.is_empty());

        let no_cols = pack(&DotMatrix::from_raw(0, 5, Vec::new())?);
        assert_eq!(no_cols.len(), 0);
        assert_eq!(no_cols.rows(), 5);

        let no_rows = pack(&DotMatrix::from_raw(17, 0, Vec::new())?);
        assert_eq!(no_rows.len(), 0);
        assert_eq!(no_rows.bytes_per_row(), 4);
        Ok(())
    }

    #[test]
    fn test_input_untouched() -> Result<()> {
        let m = DotMatrix::from_fn(10, 3, |r, c| r == c)?;
        let before = m.clone();
        let _ = pack(&m);
        assert_eq!(m, before);
        Ok(())
    }
}
