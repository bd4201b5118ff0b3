// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node records.

use crate::address::{BlockAddress, decode_big_endian_u32};
use crate::branch::{Branches, resolve_branches};
use crate::code::{RawCode, decode_types};

/// Largest root height whose bounding box `[0, 2^height)` fits in `i32`.
pub const MAX_ROOT_HEIGHT: u8 = 30;

/// An 8-byte block interpreted as an interior quadtree node.
///
/// | Byte | Meaning |
/// |------|---------|
/// | 0    | height (root only) / dither bits (low nibble) |
/// | 1–2  | four type nibbles, quadrant 0 in the high nibble of byte 1 |
/// | 3–6  | base child address, big-endian `u32` |
/// | 7    | crop metadata, not interpreted |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRecord {
    raw: [u8; 8],
}

impl NodeRecord {
    /// Wraps a raw block.
    #[inline]
    pub const fn from_bytes(raw: [u8; 8]) -> Self {
        Self { raw }
    }

    /// Returns the raw block.
    #[inline]
    pub const fn bytes(&self) -> [u8; 8] {
        self.raw
    }

    /// Height field.
    ///
    /// Only meaningful for the root; every other node derives its height
    /// from its parent.
    #[inline]
    pub const fn height(&self) -> u8 {
        self.raw[0]
    }

    /// Four dither bits used when this node is drawn as a coarse approximation.
    ///
    /// Bits 3, 2, 1, 0 map to the top-left, top-right, bottom-right and
    /// bottom-left samples of a quadrant.
    #[inline]
    pub const fn dither(&self) -> u8 {
        self.raw[0] & 0x0F
    }

    /// The four type codes, in quadrant order.
    #[inline]
    pub fn codes(&self) -> [RawCode; 4] {
        decode_types(self.raw[1], self.raw[2])
    }

    /// Address of the first leaf or node child.
    #[inline]
    pub const fn base(&self) -> u32 {
        decode_big_endian_u32(self.raw[3], self.raw[4], self.raw[5], self.raw[6])
    }

    /// Base address as a block handle.
    #[inline]
    pub fn base_address(&self) -> BlockAddress {
        BlockAddress::from(self.base())
    }

    /// Raw crop byte.
    #[inline]
    pub const fn crop(&self) -> u8 {
        self.raw[7]
    }

    /// Resolves the four children against this node's base address.
    pub fn branches(&self) -> Branches {
        Branches::new(resolve_branches(self.codes(), self.base()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Branch;

    #[test]
    fn fields_are_read_from_their_bytes() {
        let node = NodeRecord::from_bytes([0x5B, 0x1C, 0x82, 0x00, 0x00, 0x01, 0x00, 0x3A]);
        assert_eq!(node.height(), 0x5B);
        assert_eq!(node.dither(), 0x0B);
        assert_eq!(node.base(), 256);
        assert_eq!(node.crop(), 0x3A);
        assert_eq!(
            node.codes(),
            [
                RawCode::Black,
                RawCode::LeafMarker,
                RawCode::NodeMarker,
                RawCode::Outside
            ]
        );
    }

    #[test]
    fn branches_use_the_base_address() {
        let node = NodeRecord::from_bytes([4, 0xC8, 0x01, 0x00, 0x00, 0x00, 0x10, 0]);
        let b = node.branches();
        assert_eq!(b[0], Branch::Leaf(BlockAddress::new(16)));
        assert_eq!(b[1], Branch::Node(BlockAddress::new(17)));
        assert_eq!(b[2], Branch::White);
        assert_eq!(b[3], Branch::Black);
    }

    #[test]
    fn high_base_bytes_are_not_sign_extended() {
        let node = NodeRecord::from_bytes([0, 0x88, 0x00, 0xFF, 0xFF, 0xFF, 0xF0, 0]);
        assert_eq!(node.base(), 0xFFFF_FFF0);
        assert_eq!(node.branches()[1], Branch::Node(BlockAddress::new(0xFFFF_FFF1)));
    }
}
