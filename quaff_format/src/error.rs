// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::address::BlockAddress;

/// A condition in the image data that makes one branch of the tree unusable.
///
/// None of these abort a render pass: the offending subtree is treated as if
/// it were outside the image and the walk continues with its siblings.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorruptFormat {
    /// The block at `address` does not fit inside the image buffer.
    #[error("{address} lies beyond the end of the image ({blocks} blocks)")]
    AddressOutOfBounds {
        /// Address that was requested.
        address: BlockAddress,
        /// Number of complete blocks in the buffer.
        blocks: u64,
    },

    /// A child resolved into the reserved/sentinel range `0..=2`.
    #[error("child resolved to reserved {address}")]
    ReservedAddress {
        /// Address that was resolved.
        address: BlockAddress,
    },

    /// The root declares a height whose bounding box does not fit the coordinate type.
    #[error("root height {height} exceeds the maximum of {max}")]
    RootHeightTooLarge {
        /// Height stored in the root.
        height: u8,
        /// Largest supported height.
        max: u8,
    },

    /// A node child hangs below a node that is already at height zero.
    #[error("node at {address} would sit below height zero")]
    HeightUnderflow {
        /// Address of the child node.
        address: BlockAddress,
    },

    /// A queued child has no ancestor left that references it.
    #[error("no ancestor references {address}")]
    OrphanNode {
        /// Address of the orphaned node.
        address: BlockAddress,
    },

    /// The tree is too wide for the bounded work queue.
    #[error("work queue full ({capacity} entries) when queueing {address}")]
    WorkQueueOverflow {
        /// Address that could not be queued.
        address: BlockAddress,
        /// Configured queue capacity.
        capacity: usize,
    },

    /// The tree is deeper than the bounded ancestor stack.
    #[error("ancestor stack full ({capacity} entries) at {address}")]
    AncestorOverflow {
        /// Address of the node that could not become an ancestor.
        address: BlockAddress,
        /// Configured stack capacity.
        capacity: usize,
    },
}

impl CorruptFormat {
    /// Address of the block the condition was detected at.
    pub fn address(&self) -> Option<BlockAddress> {
        match *self {
            Self::AddressOutOfBounds { address, .. }
            | Self::ReservedAddress { address }
            | Self::HeightUnderflow { address }
            | Self::OrphanNode { address }
            | Self::WorkQueueOverflow { address, .. }
            | Self::AncestorOverflow { address, .. } => Some(address),
            Self::RootHeightTooLarge { .. } => None,
        }
    }
}
