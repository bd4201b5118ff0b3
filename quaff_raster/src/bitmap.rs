// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use quaff_render::PixelSink;
use quaff_view::{ScreenPoint, ScreenRect, ScreenSize};

/// A packed one-bit framebuffer.
///
/// Rows are stored top to bottom, each padded to a whole number of bytes,
/// with the leftmost pixel in the most significant bit. A set bit is ink.
/// This is the row layout of a binary PBM image, so export is a plain copy.
///
/// Drawing clips to the bitmap: coordinates outside it are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: ScreenSize,
    row_bytes: usize,
    bits: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap of the given size with no ink.
    pub fn new(size: ScreenSize) -> Self {
        let row_bytes = usize::from(size.width).div_ceil(8);
        Self {
            size,
            row_bytes,
            bits: vec![0; row_bytes * usize::from(size.height)],
        }
    }

    /// Size in pixels.
    pub fn size(&self) -> ScreenSize {
        self.size
    }

    /// Bytes per packed row.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Packed rows.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Packed row `y`, if it exists.
    pub fn row(&self, y: u16) -> Option<&[u8]> {
        let start = usize::from(y) * self.row_bytes;
        self.bits.get(start..start + self.row_bytes)
    }

    /// Removes all ink.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Returns `true` if the pixel at (`x`, `y`) is ink. Outside pixels are not.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .is_some_and(|(byte, mask)| self.bits[byte] & mask != 0)
    }

    /// Sets the pixel at (`x`, `y`) to ink, if it lies inside the bitmap.
    pub fn set(&mut self, x: i32, y: i32) {
        if let Some((byte, mask)) = self.locate(x, y) {
            self.bits[byte] |= mask;
        }
    }

    /// Number of inked pixels.
    pub fn count_ink(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Encodes the bitmap as a binary PBM (`P4`) image.
    pub fn to_pbm(&self) -> Vec<u8> {
        let mut out = format!("P4\n{} {}\n", self.size.width, self.size.height).into_bytes();
        out.extend_from_slice(&self.bits);
        out
    }

    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let x = u16::try_from(x).ok().filter(|x| *x < self.size.width)?;
        let y = u16::try_from(y).ok().filter(|y| *y < self.size.height)?;
        let byte = usize::from(y) * self.row_bytes + usize::from(x / 8);
        Some((byte, 0x80 >> (x % 8)))
    }

    /// Clamps `rect` to the bitmap, returning pixel ranges.
    fn clip(&self, rect: ScreenRect) -> Option<(core::ops::Range<u16>, core::ops::Range<u16>)> {
        let clamp = |v: i32, max: u16| u16::try_from(v.clamp(0, i32::from(max))).unwrap_or(max);
        let xs = clamp(rect.x0, self.size.width)..clamp(rect.x1, self.size.width);
        let ys = clamp(rect.y0, self.size.height)..clamp(rect.y1, self.size.height);
        (!xs.is_empty() && !ys.is_empty()).then_some((xs, ys))
    }
}

impl PixelSink for Bitmap {
    fn fill_rect(&mut self, rect: ScreenRect) {
        let Some((xs, ys)) = self.clip(rect) else {
            return;
        };
        for y in ys {
            let row = usize::from(y) * self.row_bytes;
            for x in xs.clone() {
                self.bits[row + usize::from(x / 8)] |= 0x80 >> (x % 8);
            }
        }
    }

    fn set_pixel(&mut self, p: ScreenPoint) {
        self.set(p.x, p.y);
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.size)
            .field("row_bytes", &self.row_bytes)
            .field("ink", &self.count_ink())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use quaff_format::LeafBlock;

    use super::*;

    fn small() -> Bitmap {
        Bitmap::new(ScreenSize::new(10, 4))
    }

    #[test]
    fn rows_are_padded_to_bytes() {
        let bm = small();
        assert_eq!(bm.row_bytes(), 2);
        assert_eq!(bm.as_bytes().len(), 8);
        assert_eq!(bm.count_ink(), 0);
    }

    #[test]
    fn set_and_get_use_msb_first_order() {
        let mut bm = small();
        bm.set(0, 0);
        bm.set(9, 3);
        assert_eq!(bm.row(0), Some(&[0x80, 0x00][..]));
        assert_eq!(bm.row(3), Some(&[0x00, 0x40][..]));
        assert!(bm.get(9, 3));
        assert!(!bm.get(8, 3));
        assert_eq!(bm.row(4), None);
    }

    #[test]
    fn drawing_outside_is_ignored() {
        let mut bm = small();
        bm.set(-1, 0);
        bm.set(10, 0);
        bm.set(0, 4);
        bm.set_pixel(ScreenPoint::new(i32::MIN, i32::MAX));
        assert_eq!(bm.count_ink(), 0);
        assert!(!bm.get(-1, 0));
    }

    #[test]
    fn fill_rect_clips() {
        let mut bm = small();
        bm.fill_rect(ScreenRect::new(-5, 2, 3, 100));
        assert_eq!(bm.count_ink(), 3 * 2);
        assert!(bm.get(0, 2) && bm.get(2, 3));
        assert!(!bm.get(3, 2));

        bm.clear();
        bm.fill_rect(ScreenRect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX));
        assert_eq!(bm.count_ink(), 40);

        bm.clear();
        bm.fill_rect(ScreenRect::new(5, 1, 5, 3));
        bm.fill_rect(ScreenRect::new(20, 0, 30, 4));
        assert_eq!(bm.count_ink(), 0);
    }

    #[test]
    fn blit_draws_clear_bits_as_ink() {
        let mut bm = Bitmap::new(ScreenSize::new(16, 16));
        let mut rows = [0xFF; 8];
        rows[1] = 0b1011_1111;
        bm.blit_8x8_subset(ScreenPoint::new(4, 4), &LeafBlock::from_rows(rows), 1);
        assert_eq!(bm.count_ink(), 1);
        assert!(bm.get(5, 5));
    }

    #[test]
    fn pbm_header_and_payload() {
        let mut bm = small();
        bm.set(1, 0);
        let pbm = bm.to_pbm();
        let header = b"P4\n10 4\n";
        assert_eq!(&pbm[..header.len()], header);
        assert_eq!(pbm.len(), header.len() + 8);
        assert_eq!(pbm[header.len()], 0x40);
    }
}
