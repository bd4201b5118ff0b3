// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::mem;

use quaff_format::LeafBlock;
use quaff_render::PixelSink;
use quaff_view::{ScreenPoint, ScreenRect, ScreenSize};

use crate::bitmap::Bitmap;

/// How finished frames reach the visible surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Draw straight into the visible buffer. Partial frames are visible
    /// while a pass runs.
    Single,
    /// Draw into a hidden back buffer and swap on [`FrameBuffers::present`].
    #[default]
    Double,
}

/// The visible frame and, with double buffering, a back buffer to draw into.
///
/// `FrameBuffers` is itself a [`PixelSink`] that draws into the current
/// target, so a render pass can be pointed straight at it.
#[derive(Clone, Debug)]
pub struct FrameBuffers {
    presentation: Presentation,
    front: Bitmap,
    back: Option<Bitmap>,
    presented: u64,
}

impl FrameBuffers {
    /// Allocates buffers of `size` for the given presentation.
    pub fn new(size: ScreenSize, presentation: Presentation) -> Self {
        let back = match presentation {
            Presentation::Single => None,
            Presentation::Double => Some(Bitmap::new(size)),
        };
        Self {
            presentation,
            front: Bitmap::new(size),
            back,
            presented: 0,
        }
    }

    /// Presentation mode.
    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Size of every buffer.
    pub fn size(&self) -> ScreenSize {
        self.front.size()
    }

    /// The visible frame.
    pub fn front(&self) -> &Bitmap {
        &self.front
    }

    /// The buffer that drawing currently goes to.
    pub fn target_mut(&mut self) -> &mut Bitmap {
        match &mut self.back {
            Some(back) => back,
            None => &mut self.front,
        }
    }

    /// Clears the target and returns it, ready for a new pass.
    pub fn begin_frame(&mut self) -> &mut Bitmap {
        let target = self.target_mut();
        target.clear();
        target
    }

    /// Makes the finished frame visible.
    ///
    /// With double buffering the buffers swap; with single buffering the
    /// frame is already visible and only the count advances.
    pub fn present(&mut self) {
        if let Some(back) = &mut self.back {
            mem::swap(&mut self.front, back);
        }
        self.presented += 1;
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl PixelSink for FrameBuffers {
    fn fill_rect(&mut self, rect: ScreenRect) {
        self.target_mut().fill_rect(rect);
    }

    fn set_pixel(&mut self, p: ScreenPoint) {
        self.target_mut().set_pixel(p);
    }

    fn blit_8x8_subset(&mut self, origin: ScreenPoint, bitmap: &LeafBlock, stride: u32) {
        self.target_mut().blit_8x8_subset(origin, bitmap, stride);
    }
}
