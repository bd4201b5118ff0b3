// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel sinks: where a render pass sends its output.

use alloc::vec::Vec;

use quaff_format::LeafBlock;
use quaff_view::{ScreenPoint, ScreenRect};

use crate::command::DrawCommand;

/// Destination for the draw commands of a render pass.
///
/// A sink owns presentation. The renderer never reads pixels back and does
/// not care whether the sink draws straight to the visible surface or into a
/// back buffer. Sinks are expected to clip: coordinates may fall anywhere in
/// `i32`.
pub trait PixelSink {
    /// Fills `rect` with ink.
    fn fill_rect(&mut self, rect: ScreenRect);

    /// Sets the pixel at `p` to ink.
    fn set_pixel(&mut self, p: ScreenPoint);

    /// Draws the inked pixels of `bitmap`, sampling every `stride`-th row and
    /// column, with the first sample at `origin`.
    ///
    /// The default implementation forwards each sampled ink pixel to
    /// [`PixelSink::set_pixel`].
    fn blit_8x8_subset(&mut self, origin: ScreenPoint, bitmap: &LeafBlock, stride: u32) {
        for (dx, dy) in bitmap.ink_points(stride) {
            self.set_pixel(origin.offset(offset(dx), offset(dy)));
        }
    }

    /// Applies a [`DrawCommand`].
    ///
    /// This is equivalent to calling the matching primitive.
    #[inline]
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::FillRect(rect) => self.fill_rect(rect),
            DrawCommand::SetPixel(p) => self.set_pixel(p),
            DrawCommand::Blit {
                origin,
                bitmap,
                stride,
            } => self.blit_8x8_subset(origin, &bitmap, stride),
        }
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn fill_rect(&mut self, rect: ScreenRect) {
        (**self).fill_rect(rect);
    }

    fn set_pixel(&mut self, p: ScreenPoint) {
        (**self).set_pixel(p);
    }

    fn blit_8x8_subset(&mut self, origin: ScreenPoint, bitmap: &LeafBlock, stride: u32) {
        (**self).blit_8x8_subset(origin, bitmap, stride);
    }
}

// Ink offsets are below 8.
fn offset(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// A sink that records commands instead of drawing them.
///
/// Intended for tests and debugging that want to assert on the exact
/// commands a pass emits. Blits are recorded as a single
/// [`DrawCommand::Blit`], not expanded into pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSink {
    commands: Vec<DrawCommand>,
}

impl RecordingSink {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in the order they were received.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recording empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Clears the recording.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replays the recording into another sink.
    pub fn replay(&self, sink: &mut impl PixelSink) {
        for &command in &self.commands {
            sink.draw(command);
        }
    }
}

impl PixelSink for RecordingSink {
    fn fill_rect(&mut self, rect: ScreenRect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn set_pixel(&mut self, p: ScreenPoint) {
        self.commands.push(DrawCommand::SetPixel(p));
    }

    fn blit_8x8_subset(&mut self, origin: ScreenPoint, bitmap: &LeafBlock, stride: u32) {
        self.commands.push(DrawCommand::Blit {
            origin,
            bitmap: *bitmap,
            stride,
        });
    }
}
