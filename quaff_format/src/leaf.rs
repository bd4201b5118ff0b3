// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 8×8 one-bit leaf bitmaps.

/// Width and height of a leaf bitmap, in pixels.
pub const LEAF_SIZE: u32 = 8;

/// An 8×8 one-bit bitmap block.
///
/// Byte `r` is row `r`, top to bottom. Within a row, bit 7 is the leftmost
/// column and bit 0 the rightmost. A **clear** bit is ink: the stored bit
/// marks background.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct LeafBlock {
    rows: [u8; 8],
}

impl LeafBlock {
    /// A leaf with every pixel inked.
    pub const SOLID: Self = Self { rows: [0x00; 8] };

    /// A leaf with no ink at all.
    pub const BLANK: Self = Self { rows: [0xFF; 8] };

    /// Wraps eight raw rows.
    #[inline]
    pub const fn from_rows(rows: [u8; 8]) -> Self {
        Self { rows }
    }

    /// Returns the raw rows.
    #[inline]
    pub const fn rows(&self) -> [u8; 8] {
        self.rows
    }

    /// Returns `true` if the pixel at (`col`, `row`) is ink.
    ///
    /// Coordinates outside `0..8` are never ink.
    #[inline]
    pub fn is_ink(&self, col: u32, row: u32) -> bool {
        if col >= LEAF_SIZE || row >= LEAF_SIZE {
            return false;
        }
        self.rows[row as usize] & (0x80 >> col) == 0
    }

    /// Number of inked pixels.
    pub fn ink_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_zeros()).sum()
    }

    /// Iterates the inked pixels sampled every `stride` rows and columns.
    ///
    /// Items are `(dx, dy)` offsets in output pixels, i.e. the sampled column
    /// and row divided by `stride`. A stride of 0 is treated as 1.
    pub fn ink_points(&self, stride: u32) -> InkPoints {
        InkPoints {
            leaf: *self,
            stride: stride.max(1),
            col: 0,
            row: 0,
        }
    }
}

/// Iterator returned by [`LeafBlock::ink_points`].
#[derive(Clone, Debug)]
pub struct InkPoints {
    leaf: LeafBlock,
    stride: u32,
    col: u32,
    row: u32,
}

impl Iterator for InkPoints {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.row < LEAF_SIZE {
            let (col, row) = (self.col, self.row);
            self.col += self.stride;
            if self.col >= LEAF_SIZE {
                self.col = 0;
                self.row += self.stride;
            }
            if self.leaf.is_ink(col, row) {
                return Some((col / self.stride, row / self.stride));
            }
        }
        None
    }
}
