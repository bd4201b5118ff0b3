// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quaff Format: decoding primitives for the QUAD Fractal Format.
//!
//! A QUAD Fractal Format image is a flat sequence of 8-byte **blocks**. Each
//! block is either a [`NodeRecord`] (an interior quadtree node with four typed
//! children) or a [`LeafBlock`] (a raw 8×8 one-bit bitmap). Blocks 0 and 1 are
//! reserved for the file signature and block 2 is always the root.
//!
//! Nodes never store parent pointers and store only a single child pointer:
//! the address of the first *dynamic* child (leaf or node). Every further
//! dynamic child takes the next consecutive address, in quadrant order. See
//! [`resolve_branches`] for the exact rule.
//!
//! This crate only decodes. It has no notion of viewports or pixels; the
//! traversal that walks a tree and emits draw commands lives in
//! `quaff_render`.
//!
//! ## Minimal example
//!
//! ```rust
//! use quaff_format::{BlockAddress, Branch, ImageBuffer, RawCode, decode_types, resolve_branches};
//!
//! // Quadrant 0 is black, 1 is a node, 2 is outside, 3 is a leaf.
//! let codes = decode_types(0x18, 0x2C);
//! assert_eq!(
//!     codes,
//!     [RawCode::Black, RawCode::NodeMarker, RawCode::Outside, RawCode::LeafMarker]
//! );
//!
//! let branches = resolve_branches(codes, 10);
//! assert_eq!(branches[1], Branch::Node(BlockAddress::new(10)));
//! assert_eq!(branches[3], Branch::Leaf(BlockAddress::new(11)));
//!
//! // An image buffer that is too short for its root reports a corrupt format.
//! let image = ImageBuffer::new(vec![0_u8; 16]);
//! assert!(image.root().is_err());
//! ```
//!
//! ## Errors
//!
//! Everything that can go wrong while decoding untrusted bytes is reported as
//! a [`CorruptFormat`]. Callers walking a tree are expected to abandon only
//! the affected branch and continue.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod address;
mod branch;
mod code;
mod error;
mod image;
mod leaf;
mod node;

#[cfg(any(test, feature = "synth"))]
pub mod synth;

pub use address::{BLOCK_LEN, BlockAddress, RESERVED_BLOCKS, ROOT_ADDRESS, decode_big_endian_u32};
pub use branch::{Branch, Branches, resolve_branches};
pub use code::{RawCode, TypeFlags, decode_types};
pub use error::CorruptFormat;
pub use image::{FormatVersion, ImageBuffer, SIGNATURE_LEN};
pub use leaf::{InkPoints, LEAF_SIZE, LeafBlock};
pub use node::{MAX_ROOT_HEIGHT, NodeRecord};
