// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controls applied between render passes.
//!
//! A [`Control`] is the whole vocabulary of the viewer: zoom in or out,
//! pan, or move to the next image. [`PanDrag`] turns pointer drags into pan
//! controls.
//!
//! ```
//! use kurbo::Point;
//! use quaff_viewer::{Control, PanDrag};
//!
//! assert_eq!("pan:-3,4".parse::<Control>().unwrap(), Control::Pan { dx: -3, dy: 4 });
//!
//! let mut drag = PanDrag::default();
//! drag.start(Point::new(100.0, 100.0));
//! // Dragging the image right moves the view left.
//! assert_eq!(drag.update(Point::new(102.0, 100.0)), Some(Control::Pan { dx: -2, dy: 0 }));
//! ```

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Vec2};
use thiserror::Error;

use quaff_view::{QuadPoint, ViewState};

/// One user input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Halve the zoom, showing more detail.
    ZoomIn,
    /// Double the zoom, showing more of the image.
    ZoomOut,
    /// Move the view by a delta in screen pixels.
    Pan {
        /// Horizontal delta.
        dx: i32,
        /// Vertical delta.
        dy: i32,
    },
    /// Load the next image of the catalog.
    Next,
}

impl Control {
    /// Applies a view control. Returns `true` if the view changed.
    ///
    /// [`Control::Next`] does not touch the view and always returns `false`.
    pub fn apply_to(self, view: &mut ViewState) -> bool {
        match self {
            Self::ZoomIn => view.zoom_in(),
            Self::ZoomOut => view.zoom_out(),
            Self::Pan { dx, dy } => view.pan_by(dx, dy),
            Self::Next => false,
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoomIn => f.write_str("zoom-in"),
            Self::ZoomOut => f.write_str("zoom-out"),
            Self::Pan { dx, dy } => write!(f, "pan:{dx},{dy}"),
            Self::Next => f.write_str("next"),
        }
    }
}

/// A string that is not a [`Control`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown control `{0}`, expected zoom-in, zoom-out, pan:DX,DY or next")]
pub struct ParseControlError(String);

impl FromStr for Control {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "zoom-in" => Ok(Self::ZoomIn),
            "zoom-out" => Ok(Self::ZoomOut),
            "next" => Ok(Self::Next),
            _ => s
                .strip_prefix("pan:")
                .and_then(parse_pair)
                .map(|(dx, dy)| Self::Pan { dx, dy })
                .ok_or_else(|| ParseControlError(s.to_owned())),
        }
    }
}

/// Parses `"X,Y"` into a quad-space point.
pub fn parse_point(s: &str) -> Result<QuadPoint, String> {
    parse_pair(s)
        .map(|(x, y)| QuadPoint::new(x, y))
        .ok_or_else(|| format!("expected X,Y but got `{s}`"))
}

fn parse_pair(s: &str) -> Option<(i32, i32)> {
    let (x, y) = s.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Turns pointer drag positions into whole-pixel pan controls.
///
/// The image follows the pointer, so the view pans opposite to the drag.
/// Fractions of a pixel are carried to the next update rather than dropped,
/// which keeps a slow drag moving.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PanDrag {
    last: Option<Point>,
    carry: Vec2,
}

impl PanDrag {
    /// Starts a drag at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.last = Some(pos);
        self.carry = Vec2::ZERO;
    }

    /// Moves the pointer to `pos`.
    ///
    /// Returns a pan once the accumulated movement reaches a whole pixel,
    /// and `None` otherwise or when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Control> {
        let last = self.last?;
        self.last = Some(pos);
        let total = pos - last + self.carry;
        let whole = Vec2::new(total.x.trunc(), total.y.trunc());
        self.carry = total - whole;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "whole is integral and float-to-int casts saturate"
        )]
        let (dx, dy) = ((-whole.x) as i32, (-whole.y) as i32);
        (dx != 0 || dy != 0).then_some(Control::Pan { dx, dy })
    }

    /// Ends the drag, dropping any carried fraction.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}
