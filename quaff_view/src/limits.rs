// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Inclusive range of permitted zoom factors.
///
/// Zoom is the number of quad-space units per screen pixel, so a larger
/// zoom shows more of the image at lower detail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZoomLimits {
    min: u32,
    max: u32,
}

impl ZoomLimits {
    /// Largest zoom any limit may allow.
    pub const CEILING: u32 = 1 << 16;

    /// Creates limits, normalizing so that `1 <= min <= max <= CEILING`.
    pub const fn new(min: u32, max: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let min = if min == 0 { 1 } else { min };
        let max = if max < min { min } else { max };
        let max = if max > Self::CEILING { Self::CEILING } else { max };
        let min = if min > max { max } else { min };
        Self { min, max }
    }

    /// Smallest allowed zoom.
    #[inline]
    pub const fn min(self) -> u32 {
        self.min
    }

    /// Largest allowed zoom.
    #[inline]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Clamps `zoom` into the range.
    #[inline]
    pub const fn clamp(self, zoom: u32) -> u32 {
        if zoom < self.min {
            self.min
        } else if zoom > self.max {
            self.max
        } else {
            zoom
        }
    }
}

impl Default for ZoomLimits {
    /// Zoom 1 (one image pixel per screen pixel) through 64.
    fn default() -> Self {
        Self::new(1, 64)
    }
}
