// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic images for tests and benchmarks.
//!
//! Trees are described in memory with [`Quad`] and laid out breadth-first,
//! the way the converter lays out real files: the root at block 2, and the
//! dynamic children of each node in consecutive blocks appended when that
//! node is processed.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// One quadrant of a synthetic tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Quad {
    /// Outside the image bounds.
    Outside,
    /// Solid background.
    White,
    /// Solid ink.
    Black,
    /// Raw 8×8 leaf rows (clear bits are ink).
    Leaf([u8; 8]),
    /// A nested node.
    Node(Box<SynthNode>),
}

impl Quad {
    /// A nested node with no dither bits.
    pub fn node(children: [Self; 4]) -> Self {
        Self::Node(Box::new(SynthNode::new(children)))
    }

    /// A nested node carrying dither bits.
    pub fn dithered(dither: u8, children: [Self; 4]) -> Self {
        Self::Node(Box::new(SynthNode { dither, children }))
    }

    fn nibble(&self) -> u8 {
        match self {
            Self::Outside => 0b0010,
            Self::White => 0b0000,
            Self::Black => 0b0001,
            Self::Leaf(_) => 0b1100,
            Self::Node(_) => 0b1000,
        }
    }
}

/// An interior node of a synthetic tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthNode {
    /// Low nibble written to byte 0 of non-root nodes.
    pub dither: u8,
    /// Children in quadrant order.
    pub children: [Quad; 4],
}

impl SynthNode {
    /// A node with no dither bits.
    pub fn new(children: [Quad; 4]) -> Self {
        Self {
            dither: 0,
            children,
        }
    }
}

/// Encodes a tree whose root has the given height, with file signature.
pub fn encode(height: u8, root: &SynthNode) -> Vec<u8> {
    let mut blocks: Vec<[u8; 8]> = Vec::new();
    let signature = b"#!quafit\n#v0000\n";
    let mut first = [0_u8; 8];
    let mut second = [0_u8; 8];
    first.copy_from_slice(&signature[..8]);
    second.copy_from_slice(&signature[8..]);
    blocks.push(first);
    blocks.push(second);
    blocks.push([0; 8]);

    let mut queue = VecDeque::new();
    queue.push_back((2_usize, root));
    while let Some((address, node)) = queue.pop_front() {
        let first_child = blocks.len();
        let mut dynamic = 0;
        for child in &node.children {
            match child {
                Quad::Leaf(rows) => {
                    blocks.push(*rows);
                    dynamic += 1;
                }
                Quad::Node(inner) => {
                    queue.push_back((blocks.len(), &**inner));
                    blocks.push([0; 8]);
                    dynamic += 1;
                }
                Quad::Outside | Quad::White | Quad::Black => {}
            }
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "synthetic images stay far below 2^32 blocks"
        )]
        let base = if dynamic == 0 { 0 } else { first_child as u32 };
        let [c0, c1, c2, c3] = &node.children;
        let byte0 = if address == 2 {
            height
        } else {
            node.dither & 0x0F
        };
        let b = base.to_be_bytes();
        blocks[address] = [
            byte0,
            (c0.nibble() << 4) | c1.nibble(),
            (c2.nibble() << 4) | c3.nibble(),
            b[0],
            b[1],
            b[2],
            b[3],
            0,
        ];
    }
    blocks.concat()
}

/// A complete tree of the given height in which every node subdivides.
///
/// Nodes continue down to height 4, whose four children are `leaf` bitmaps
/// (8×8 pixels each). `height` must be at least 4.
pub fn full_tree(height: u8, leaf: [u8; 8]) -> SynthNode {
    fn quad(height: u8, leaf: [u8; 8]) -> Quad {
        if height < 4 {
            Quad::Leaf(leaf)
        } else {
            Quad::dithered(0b1010, core::array::from_fn(|_| quad(height - 1, leaf)))
        }
    }
    SynthNode::new(core::array::from_fn(|_| quad(height - 1, leaf)))
}
