// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-quadrant type codes.

bitflags::bitflags! {
    /// The four bits of one quadrant's type nibble.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u8 {
        /// The child is stored in its own block.
        const EXISTS = 0b1000;
        /// The stored child is an 8×8 leaf bitmap rather than a node.
        const LEAF   = 0b0100;
        /// The quadrant lies outside the image bounds.
        const BOUNDS = 0b0010;
        /// Solid quadrant color: set is black, clear is white.
        const COLOR  = 0b0001;
    }
}

/// Decoded kind of one quadrant, before address resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawCode {
    /// Outside the image; nothing to draw.
    Outside,
    /// Solid background.
    White,
    /// Solid ink.
    Black,
    /// A dynamic child stored as a leaf bitmap.
    LeafMarker,
    /// A dynamic child stored as another node.
    NodeMarker,
}

impl RawCode {
    /// Interprets the low four bits of `nibble`.
    ///
    /// The bounds bit wins over every other bit.
    pub fn from_nibble(nibble: u8) -> Self {
        let flags = TypeFlags::from_bits_truncate(nibble);
        if flags.contains(TypeFlags::BOUNDS) {
            Self::Outside
        } else if flags.contains(TypeFlags::EXISTS | TypeFlags::LEAF) {
            Self::LeafMarker
        } else if flags.contains(TypeFlags::EXISTS) {
            Self::NodeMarker
        } else if flags.contains(TypeFlags::COLOR) {
            Self::Black
        } else {
            Self::White
        }
    }

    /// Returns `true` for leaf and node markers, which consume an address.
    #[inline]
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::LeafMarker | Self::NodeMarker)
    }
}

/// Splits the two type bytes of a node into four codes, in quadrant order.
///
/// Quadrant 0 is the high nibble of `byte1`, quadrant 1 its low nibble,
/// quadrant 2 the high nibble of `byte2` and quadrant 3 its low nibble.
pub fn decode_types(byte1: u8, byte2: u8) -> [RawCode; 4] {
    [
        RawCode::from_nibble(byte1 >> 4),
        RawCode::from_nibble(byte1 & 0x0F),
        RawCode::from_nibble(byte2 >> 4),
        RawCode::from_nibble(byte2 & 0x0F),
    ]
}
