// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Block addressing.

use core::fmt;

/// Size of one addressable block, in bytes.
pub const BLOCK_LEN: usize = 8;

/// Number of reserved blocks at the start of every image (the file signature).
pub const RESERVED_BLOCKS: u64 = 2;

/// Address of the root node.
pub const ROOT_ADDRESS: BlockAddress = BlockAddress(RESERVED_BLOCKS);

/// Index of an 8-byte block inside an image buffer.
///
/// Stored addresses are unsigned 32-bit values, but resolved child addresses
/// are `base + k` for `k` in `0..4`, so the handle is widened to `u64` to keep
/// that sum exact for every possible base.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockAddress(u64);

impl BlockAddress {
    /// Creates an address from a raw block index.
    #[inline]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw block index.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the address `k` blocks after this one.
    #[inline]
    pub const fn offset(self, k: u64) -> Self {
        Self(self.0 + k)
    }

    /// Returns `true` if this address collides with the reserved blocks or the root.
    ///
    /// The branch sentinels (outside, white, black) historically shared the
    /// numeric range `0..=2` with block addresses; a child resolving into that
    /// range can never be a genuine node or leaf.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 <= ROOT_ADDRESS.0
    }

    /// Byte range `[start, end)` covered by this block, if it is representable.
    pub fn byte_range(self) -> Option<(usize, usize)> {
        let start = usize::try_from(self.0).ok()?.checked_mul(BLOCK_LEN)?;
        let end = start.checked_add(BLOCK_LEN)?;
        Some((start, end))
    }
}

impl From<u32> for BlockAddress {
    #[inline]
    fn from(index: u32) -> Self {
        Self(u64::from(index))
    }
}

impl fmt::Debug for BlockAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for BlockAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {}", self.0)
    }
}

/// Assembles four bytes into an unsigned big-endian 32-bit value.
///
/// All four bytes contribute unsigned; there is no sign extension at any bit.
#[inline]
pub const fn decode_big_endian_u32(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    u32::from_be_bytes([b0, b1, b2, b3])
}
