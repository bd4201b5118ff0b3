// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only image buffers.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::address::{BLOCK_LEN, BlockAddress, ROOT_ADDRESS};
use crate::error::CorruptFormat;
use crate::leaf::LeafBlock;
use crate::node::NodeRecord;

/// Length of the signature stored in the reserved blocks.
pub const SIGNATURE_LEN: usize = 16;

const MAGIC: &[u8; 9] = b"#!quafit\n";

/// Format version declared by the file signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion(pub u16);

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:04}", self.0)
    }
}

/// An immutable, fully loaded image.
///
/// Cloning is cheap: the bytes are shared, so one buffer can serve any number
/// of render passes without copying.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    bytes: Arc<[u8]>,
}

impl ImageBuffer {
    /// Wraps raw image bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of complete blocks. A trailing partial block is not addressable.
    #[inline]
    pub fn block_count(&self) -> u64 {
        (self.bytes.len() / BLOCK_LEN) as u64
    }

    /// Reads the 8 bytes of the block at `address`.
    pub fn block(&self, address: BlockAddress) -> Result<[u8; 8], CorruptFormat> {
        let out_of_bounds = CorruptFormat::AddressOutOfBounds {
            address,
            blocks: self.block_count(),
        };
        let (start, end) = address.byte_range().ok_or(out_of_bounds)?;
        let bytes = self.bytes.get(start..end).ok_or(out_of_bounds)?;
        let mut block = [0_u8; 8];
        block.copy_from_slice(bytes);
        Ok(block)
    }

    /// Reads the root node.
    pub fn root(&self) -> Result<NodeRecord, CorruptFormat> {
        self.block(ROOT_ADDRESS).map(NodeRecord::from_bytes)
    }

    /// Reads a child node.
    ///
    /// Children can never live in the reserved blocks or at the root.
    pub fn node(&self, address: BlockAddress) -> Result<NodeRecord, CorruptFormat> {
        self.child_block(address).map(NodeRecord::from_bytes)
    }

    /// Reads a leaf bitmap.
    pub fn leaf(&self, address: BlockAddress) -> Result<LeafBlock, CorruptFormat> {
        self.child_block(address).map(LeafBlock::from_rows)
    }

    /// Parses the signature stored in the reserved blocks, if present.
    ///
    /// The converter writes `"#!quafit\n"` followed by `"#vNNNN\n"`. A missing
    /// or malformed signature does not prevent rendering.
    pub fn signature(&self) -> Option<FormatVersion> {
        let head = self.bytes.get(..SIGNATURE_LEN)?;
        let (magic, rest) = head.split_at(MAGIC.len());
        if magic != MAGIC || rest[0] != b'#' || rest[1] != b'v' || rest[6] != b'\n' {
            return None;
        }
        rest[2..6]
            .iter()
            .try_fold(0_u16, |acc, &d| {
                d.is_ascii_digit().then(|| acc * 10 + u16::from(d - b'0'))
            })
            .map(FormatVersion)
    }

    fn child_block(&self, address: BlockAddress) -> Result<[u8; 8], CorruptFormat> {
        if address.is_sentinel() {
            return Err(CorruptFormat::ReservedAddress { address });
        }
        self.block(address)
    }
}

impl From<Vec<u8>> for ImageBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("len", &self.bytes.len())
            .field("blocks", &self.block_count())
            .field("signature", &self.signature())
            .finish_non_exhaustive()
    }
}
