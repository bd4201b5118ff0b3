// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quaff Raster: one-bit framebuffers that render passes draw into.
//!
//! - [`Bitmap`] is a packed, clipping [`PixelSink`] with PBM export.
//! - [`FrameBuffers`] adds single or double buffered presentation on top.
//!
//! ```rust
//! use quaff_raster::{FrameBuffers, Presentation};
//! use quaff_render::PixelSink;
//! use quaff_view::{ScreenRect, ScreenSize};
//!
//! let mut frames = FrameBuffers::new(ScreenSize::new(240, 208), Presentation::Double);
//! frames.begin_frame();
//! frames.fill_rect(ScreenRect::new(-10, -10, 10, 10));
//! frames.present();
//! assert_eq!(frames.front().count_ink(), 100);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`PixelSink`]: quaff_render::PixelSink

#![no_std]

extern crate alloc;

mod bitmap;
mod frames;

pub use bitmap::Bitmap;
pub use frames::{FrameBuffers, Presentation};
