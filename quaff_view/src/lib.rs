// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quaff View: integer geometry and pan/zoom view state.
//!
//! Quad space is the integer pixel grid of the full-resolution image. The
//! screen is a small device grid. This crate provides:
//! - Half-open [`Span`]s and [`QuadBox`]es with the exact overlap rule used
//!   for culling.
//! - Quadrant subdivision ([`QuadBox::quadrants`], [`quad_chop`]) that tiles
//!   the parent box exactly.
//! - [`ViewState`]: an immutable-per-pass snapshot of center, zoom and screen
//!   size, with the derived quad-space viewport and the quad→screen mapping.
//!
//! All arithmetic is integer. Division by the zoom floors, so output is
//! pixel-exact and reproducible.
//!
//! ## Minimal example
//!
//! ```rust
//! use quaff_view::{QuadBox, QuadPoint, ScreenPoint, ScreenSize, ViewState};
//!
//! let mut view = ViewState::new(ScreenSize::new(240, 208), QuadPoint::new(256, 256), 1);
//! assert_eq!(view.screen_map(QuadPoint::new(256, 256)), ScreenPoint::new(120, 104));
//!
//! // Zooming out doubles the visible quad-space extent.
//! view.zoom_out();
//! assert_eq!(view.zoom(), 2);
//! assert_eq!(view.viewport(), QuadBox::from_bounds(16, 48, 496, 464));
//!
//! // Boxes outside the viewport are culled.
//! assert!(!view.in_view(&QuadBox::from_bounds(600, 600, 700, 700)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;
mod limits;
mod span;
mod view_state;

pub use geometry::{
    QuadBox, QuadPoint, Quadrant, Quadrants, ScreenPoint, ScreenRect, ScreenSize, in_view,
    quad_chop,
};
pub use limits::ZoomLimits;
pub use span::{Span, overlap};
pub use view_state::{ViewState, refresh_viewport, screen_map};
