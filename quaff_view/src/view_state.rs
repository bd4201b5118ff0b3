// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::geometry::{QuadBox, QuadPoint, ScreenPoint, ScreenRect, ScreenSize, in_view};
use crate::limits::ZoomLimits;
use crate::span::Span;

/// Pan/zoom state of a view over quad space.
///
/// `ViewState` is a small value type. A render pass takes a snapshot of it and
/// never mutates it; controls update it strictly between passes. The derived
/// viewport is rebuilt by every setter, so it is always consistent with the
/// current center, zoom and screen size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewState {
    screen: ScreenSize,
    center: QuadPoint,
    zoom: u32,
    limits: ZoomLimits,
    viewport: QuadBox,
}

impl ViewState {
    /// Creates a view of `screen` centered on `center` at `zoom`.
    ///
    /// The zoom is clamped into the default [`ZoomLimits`].
    #[must_use]
    pub fn new(screen: ScreenSize, center: QuadPoint, zoom: u32) -> Self {
        let limits = ZoomLimits::default();
        let zoom = limits.clamp(zoom);
        Self {
            screen,
            center,
            zoom,
            limits,
            viewport: refresh_viewport(center, zoom, screen),
        }
    }

    /// Replaces the zoom limits, clamping the current zoom into them.
    #[must_use]
    pub fn with_limits(mut self, limits: ZoomLimits) -> Self {
        self.limits = limits;
        self.zoom = limits.clamp(self.zoom);
        self.refresh();
        self
    }

    /// Screen size in device pixels.
    #[must_use]
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Quad-space point shown at the screen center.
    #[must_use]
    pub fn center(&self) -> QuadPoint {
        self.center
    }

    /// Quad-space units per screen pixel.
    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Current zoom limits.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Quad-space rectangle covered by the screen.
    #[must_use]
    pub fn viewport(&self) -> QuadBox {
        self.viewport
    }

    /// Sets the screen size.
    pub fn set_screen(&mut self, screen: ScreenSize) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.refresh();
    }

    /// Moves the view so that `center` is shown at the screen center.
    pub fn set_center(&mut self, center: QuadPoint) {
        if self.center == center {
            return;
        }
        self.center = center;
        self.refresh();
    }

    /// Sets the zoom, clamped into the limits. Returns `true` if it changed.
    pub fn set_zoom(&mut self, zoom: u32) -> bool {
        let zoom = self.limits.clamp(zoom);
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        self.refresh();
        true
    }

    /// Doubles the zoom, showing twice the extent. Returns `true` if it changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_mul(2))
    }

    /// Halves the zoom, showing more detail. Returns `true` if it changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom / 2)
    }

    /// Pans by a delta in screen pixels. Returns `true` if the center moved.
    ///
    /// The delta is scaled into quad space by the current zoom.
    pub fn pan_by(&mut self, dx: i32, dy: i32) -> bool {
        let zoom = i64::from(self.zoom);
        let center = QuadPoint::new(
            saturate(i64::from(self.center.x) + i64::from(dx) * zoom),
            saturate(i64::from(self.center.y) + i64::from(dy) * zoom),
        );
        if center == self.center {
            return false;
        }
        self.set_center(center);
        true
    }

    /// Maps a quad-space point to the screen. See [`screen_map`].
    #[must_use]
    pub fn screen_map(&self, p: QuadPoint) -> ScreenPoint {
        screen_map(p, self.center, self.zoom, self.screen)
    }

    /// Maps a quad-space box to the screen rectangle between its mapped corners.
    #[must_use]
    pub fn screen_rect(&self, b: &QuadBox) -> ScreenRect {
        ScreenRect::from_corners(self.screen_map(b.origin()), self.screen_map(b.max()))
    }

    /// Maps a screen pixel back to the quad-space point at its top-left corner.
    ///
    /// At zoom 1 this is the exact inverse of [`ViewState::screen_map`].
    #[must_use]
    pub fn screen_to_quad(&self, s: ScreenPoint) -> QuadPoint {
        let half = self.screen.half();
        let zoom = i64::from(self.zoom);
        QuadPoint::new(
            saturate((i64::from(s.x) - i64::from(half.x)) * zoom + i64::from(self.center.x)),
            saturate((i64::from(s.y) - i64::from(half.y)) * zoom + i64::from(self.center.y)),
        )
    }

    /// Returns `true` if `b` overlaps the viewport.
    #[must_use]
    pub fn in_view(&self, b: &QuadBox) -> bool {
        in_view(b, &self.viewport)
    }

    fn refresh(&mut self) {
        self.viewport = refresh_viewport(self.center, self.zoom, self.screen);
    }
}

impl Default for ViewState {
    /// The 240×208 screen centered on (256, 256) at zoom 1.
    fn default() -> Self {
        Self::new(ScreenSize::default(), QuadPoint::new(256, 256), 1)
    }
}

/// Derives the quad-space viewport for a center, zoom and screen size.
///
/// Each axis spans `center ± screen_dim * zoom / 2`.
#[must_use]
pub fn refresh_viewport(center: QuadPoint, zoom: u32, screen: ScreenSize) -> QuadBox {
    let zoom = i64::from(zoom);
    let half_w = i64::from(screen.width) * zoom / 2;
    let half_h = i64::from(screen.height) * zoom / 2;
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    QuadBox::new(
        Span::new(saturate(cx - half_w), saturate(cx + half_w)),
        Span::new(saturate(cy - half_h), saturate(cy + half_h)),
    )
}

/// Maps a quad-space point to screen space.
///
/// `screen = (quad - center) / zoom + screen_dim / 2` on each axis, with the
/// division flooring. A zoom of 0 is treated as 1.
#[must_use]
pub fn screen_map(p: QuadPoint, center: QuadPoint, zoom: u32, screen: ScreenSize) -> ScreenPoint {
    let zoom = i64::from(zoom.max(1));
    let half = screen.half();
    let x = (i64::from(p.x) - i64::from(center.x)).div_euclid(zoom) + i64::from(half.x);
    let y = (i64::from(p.y) - i64::from(center.y)).div_euclid(zoom) + i64::from(half.y);
    ScreenPoint::new(saturate(x), saturate(y))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the i32 range before casting"
)]
fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
