// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quaff Render: turns a QUAD Fractal Format image into draw commands.
//!
//! A render pass is a pure function of an [`ImageBuffer`] and a [`ViewState`]
//! that sends its output to a [`PixelSink`]:
//!
//! - The tree is walked depth-first from the root with a bounded LIFO work
//!   queue. Node boxes are derived by quadrant subdivision from a bounded
//!   stack of ancestor snapshots, since nodes store no parent pointers.
//! - Nodes whose box misses the viewport are culled with their subtree.
//! - At the [`LodPolicy`] target height the walk stops and draws each
//!   quadrant as four dither pixels.
//! - Black quadrants become filled rectangles and leaves become 8×8 blits
//!   subsampled by the zoom.
//!
//! Corrupt data abandons only the affected branch; the pass always runs to
//! completion and lists what it skipped in its [`RenderReport`].
//!
//! ## Minimal example
//!
//! ```rust
//! use quaff_format::ImageBuffer;
//! use quaff_render::{DrawCommand, RecordingSink, render};
//! use quaff_view::{QuadPoint, ScreenRect, ScreenSize, ViewState};
//!
//! // Signature blocks, then a height-1 root whose quadrant 0 is black.
//! let mut bytes = b"#!quafit\n#v0000\n".to_vec();
//! bytes.extend_from_slice(&[1, 0x10, 0x00, 0, 0, 0, 0, 0]);
//! let image = ImageBuffer::new(bytes);
//!
//! let view = ViewState::new(ScreenSize::new(240, 208), QuadPoint::new(1, 1), 1);
//! let mut sink = RecordingSink::new();
//! let report = render(&image, &view, &mut sink);
//!
//! assert!(report.is_clean());
//! assert_eq!(
//!     sink.commands(),
//!     &[DrawCommand::FillRect(ScreenRect::new(119, 103, 120, 104))]
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`ImageBuffer`]: quaff_format::ImageBuffer
//! [`ViewState`]: quaff_view::ViewState

#![no_std]

extern crate alloc;

mod command;
mod lod;
mod sink;
mod traverse;

pub use command::DrawCommand;
pub use lod::LodPolicy;
pub use sink::{PixelSink, RecordingSink};
pub use traverse::{RenderReport, Renderer, TraversalLimits, render};
