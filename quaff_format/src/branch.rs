// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved children of a node.

use core::ops::Index;

use crate::address::BlockAddress;
use crate::code::RawCode;

/// One child of a node, with dynamic children resolved to block addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Outside the image; nothing to draw.
    Outside,
    /// Solid background; nothing to draw.
    White,
    /// Solid ink over the whole quadrant.
    Black,
    /// An 8×8 leaf bitmap stored at the address.
    Leaf(BlockAddress),
    /// Another node stored at the address.
    Node(BlockAddress),
}

impl Branch {
    /// Returns the address of a leaf or node child.
    #[inline]
    pub fn address(self) -> Option<BlockAddress> {
        match self {
            Self::Leaf(addr) | Self::Node(addr) => Some(addr),
            Self::Outside | Self::White | Self::Black => None,
        }
    }
}

/// Resolves four type codes against a node's base child address.
///
/// Quadrants are walked strictly in order 0, 1, 2, 3. Each leaf or node
/// marker takes `base + k`, where `k` counts the dynamic markers already
/// resolved in this node. Leaves and nodes share that counter, so their
/// addresses interleave in encounter order.
pub fn resolve_branches(codes: [RawCode; 4], base: u32) -> [Branch; 4] {
    let base = BlockAddress::from(base);
    let mut next = 0_u64;
    codes.map(|code| {
        let branch = match code {
            RawCode::Outside => Branch::Outside,
            RawCode::White => Branch::White,
            RawCode::Black => Branch::Black,
            RawCode::LeafMarker => Branch::Leaf(base.offset(next)),
            RawCode::NodeMarker => Branch::Node(base.offset(next)),
        };
        if code.is_dynamic() {
            next += 1;
        }
        branch
    })
}

/// The four resolved children of a node, indexed by quadrant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Branches([Branch; 4]);

impl Branches {
    /// Wraps four resolved children.
    #[inline]
    pub const fn new(branches: [Branch; 4]) -> Self {
        Self(branches)
    }

    /// Returns the child in quadrant `q`.
    #[inline]
    pub fn get(&self, q: usize) -> Option<Branch> {
        self.0.get(q).copied()
    }

    /// Iterates children in quadrant order.
    pub fn iter(&self) -> impl Iterator<Item = Branch> + '_ {
        self.0.iter().copied()
    }

    /// Returns `true` if any leaf or node child lives at `addr`.
    ///
    /// This is the membership test used to decide whether a node is still an
    /// ancestor of the block about to be visited.
    pub fn contains(&self, addr: BlockAddress) -> bool {
        self.0.iter().any(|b| b.address() == Some(addr))
    }

    /// Number of children that are nodes.
    pub fn node_count(&self) -> usize {
        self.0
            .iter()
            .filter(|b| matches!(b, Branch::Node(_)))
            .count()
    }
}

impl From<[Branch; 4]> for Branches {
    fn from(branches: [Branch; 4]) -> Self {
        Self(branches)
    }
}

impl Index<usize> for Branches {
    type Output = Branch;

    fn index(&self, q: usize) -> &Branch {
        &self.0[q]
    }
}
