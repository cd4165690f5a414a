// src/image/dot_matrix.rs

//! Rectangular grids of bitonal dots, the input of the BMP encoder.

use crate::{BmpError, Result};

/// A rectangular, row-major grid of dots.
///
/// Only the low bit of each cell is significant: `0` is background and `1`
/// is foreground. Higher bits are kept as given and masked off on read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DotMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl DotMatrix {
    /// Creates a matrix from a flat row-major buffer.
    ///
    /// Fails with [`BmpError::InvalidDimension`] if `data.len()` is not
    /// `width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(BmpError::InvalidDimension { width, height })?;
        if data.len() != expected {
            return Err(BmpError::InvalidDimension { width, height });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a matrix from a slice of rows.
    ///
    /// The width is taken from the first row. Every other row must have the
    /// same length or [`BmpError::RaggedRow`] is returned.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * rows.len());

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BmpError::RaggedRow {
                    row: i,
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height: rows.len(),
            data,
        })
    }

    /// Same as [`DotMatrix::from_rows`] for `bool` cells.
    pub fn from_bools<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let rows: Vec<Vec<u8>> = rows
            .iter()
            .map(|r| r.as_ref().iter().map(|&b| b as u8).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Creates a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let len = width
            .checked_mul(height)
            .ok_or(BmpError::InvalidDimension { width, height })?;
        let mut data = Vec::with_capacity(len);
        for r in 0..height {
            for c in 0..width {
                data.push(f(r, c) as u8);
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the dot at `(row, col)` masked to its low bit, or `None` when
    /// out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col] & 1)
    }

    /// Iterates over rows from top to bottom. Cells are returned unmasked.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[u8]> + ExactSizeIterator {
        let w = self.width;
        (0..self.height).map(move |r| &self.data[r * w..(r + 1) * w])
    }

    /// The raw row-major cells.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if the matrix has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() -> Result<()> {
        let m = DotMatrix::from_rows(&[vec![1u8, 0, 1], vec![0, 1, 0]])?;
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert_eq!(m.as_raw(), &[1, 0, 1, 0, 1, 0]);
        assert_eq!(m.get(1, 1), Some(1));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        Ok(())
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = DotMatrix::from_rows(&[vec![1u8, 0, 1], vec![0, 1]]).unwrap_err();
        assert!(matches!(
            err,
            BmpError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_high_bits_masked_on_read() -> Result<()> {
        let m = DotMatrix::from_rows(&[[0xFEu8, 0x03, 0x80, 0xFF]])?;
        assert_eq!(m.get(0, 0), Some(0));
        assert_eq!(m.get(0, 1), Some(1));
        assert_eq!(m.get(0, 2), Some(0));
        assert_eq!(m.get(0, 3), Some(1));
        // stored as given
        assert_eq!(m.as_raw()[0], 0xFE);
        Ok(())
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        assert!(matches!(
            DotMatrix::from_raw(4, 2, vec![0; 7]),
            Err(BmpError::InvalidDimension {
                width: 4,
                height: 2
            })
        ));
        assert!(DotMatrix::from_raw(usize::MAX, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_degenerate_shapes() -> Result<()> {
        let empty = DotMatrix::from_rows::<Vec<u8>>(&[])?;
        assert_eq!((empty.width(), empty.height()), (0, 0));
        assert!(empty.is_empty());

        let no_cols = DotMatrix::from_rows(&[Vec::<u8>::new(), Vec::new()])?;
        assert_eq!((no_cols.width(), no_cols.height()), (0, 2));
        assert_eq!(no_cols.rows().len(), 2);
        assert!(no_cols.rows().all(|r| r.is_empty()));

        let no_rows = DotMatrix::from_raw(9, 0, Vec::new())?;
        assert_eq!((no_rows.width(), no_rows.height()), (9, 0));
        assert_eq!(no_rows.rows().count(), 0);
        Ok(())
    }

    #[test]
    fn test_from_fn_and_bools_agree() -> Result<()> {
        let a = DotMatrix::from_fn(5, 3, |r, c| (r + c) % 2 == 0)?;
        let b = DotMatrix::from_bools(&[
            [true, false, true, false, true],
            [false, true, false, true, false],
            [true, false, true, false, true],
        ])?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_rows_reverse_order() -> Result<()> {
        let m = DotMatrix::from_rows(&[[1u8, 1], [0, 1], [0, 0]])?;
        let bottom_up: Vec<&[u8]> = m.rows().rev().collect();
        assert_eq!(bottom_up, vec![&[0u8, 0][..], &[0, 1][..], &[1, 1][..]]);
        Ok(())
    }
}
