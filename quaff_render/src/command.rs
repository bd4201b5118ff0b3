// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use quaff_format::LeafBlock;
use quaff_view::{ScreenPoint, ScreenRect};

/// A draw operation produced by a render pass, in screen space.
///
/// Every command draws ink. Background is whatever the sink was cleared to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawCommand {
    /// Fill a rectangle with ink.
    FillRect(ScreenRect),
    /// Set a single pixel to ink.
    SetPixel(ScreenPoint),
    /// Draw the inked pixels of a leaf bitmap.
    Blit {
        /// Screen position of the bitmap's top-left pixel.
        origin: ScreenPoint,
        /// Bitmap to draw; clear bits are ink.
        bitmap: LeafBlock,
        /// Sampling stride. Only every `stride`-th row and column is drawn,
        /// packed together at `origin`.
        stride: u32,
    },
}
