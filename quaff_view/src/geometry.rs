// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points, boxes and quadrant subdivision.

use crate::span::{Span, overlap};

/// A point in quad space (full-resolution image pixels).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct QuadPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl QuadPoint {
    /// Creates a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in screen (device pixel) space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl ScreenPoint {
    /// Creates a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by (`dx`, `dy`).
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// A half-open screen rectangle `[x0, x1) × [y0, y1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScreenRect {
    /// Left edge, inclusive.
    pub x0: i32,
    /// Top edge, inclusive.
    pub y0: i32,
    /// Right edge, exclusive.
    pub x1: i32,
    /// Bottom edge, exclusive.
    pub y1: i32,
}

impl ScreenRect {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle spanning two mapped corners.
    #[inline]
    pub const fn from_corners(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Returns `true` if the rectangle covers no pixel.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(self) -> u64 {
        Span::new(self.x0, self.x1).len() as u64 * Span::new(self.y0, self.y1).len() as u64
    }
}

/// Size of the screen in device pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl ScreenSize {
    /// Creates a screen size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Screen center, used as the anchor of the quad→screen mapping.
    #[inline]
    pub const fn half(self) -> ScreenPoint {
        ScreenPoint::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

impl Default for ScreenSize {
    /// The 240×208 panel the format was designed for.
    fn default() -> Self {
        Self::new(240, 208)
    }
}

/// An axis-aligned box in quad space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct QuadBox {
    /// Horizontal extent.
    pub x: Span,
    /// Vertical extent.
    pub y: Span,
}

impl QuadBox {
    /// Creates a box from its two spans.
    #[inline]
    pub const fn new(x: Span, y: Span) -> Self {
        Self { x, y }
    }

    /// Creates a box from `[x0, x1) × [y0, y1)`.
    #[inline]
    pub const fn from_bounds(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Span::new(x0, x1), Span::new(y0, y1))
    }

    /// The root box `[0, 2^height)²` of a tree of the given height.
    ///
    /// Returns `None` if the side does not fit in `i32`.
    pub fn from_height(height: u8) -> Option<Self> {
        let side = 1_i32.checked_shl(u32::from(height)).filter(|s| *s > 0)?;
        Some(Self::from_bounds(0, 0, side, side))
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> QuadPoint {
        QuadPoint::new(self.x.start, self.y.start)
    }

    /// Bottom-right corner (exclusive).
    #[inline]
    pub const fn max(&self) -> QuadPoint {
        QuadPoint::new(self.x.end, self.y.end)
    }

    /// Returns `true` if both spans overlap the other box's spans.
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        overlap(self.x, other.x) && overlap(self.y, other.y)
    }

    /// Returns `true` if `p` lies inside the box.
    #[inline]
    pub const fn contains(&self, p: QuadPoint) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y)
    }

    /// Splits the box at its midpoints, computed once for all four quadrants.
    #[inline]
    pub const fn quadrants(&self) -> Quadrants {
        Quadrants {
            outer: *self,
            mid: QuadPoint::new(self.x.midpoint(), self.y.midpoint()),
        }
    }
}

/// One of the four quadrants of a box, clockwise from the top-left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// Low x, low y.
    TopLeft = 0,
    /// High x, low y.
    TopRight = 1,
    /// High x, high y.
    BottomRight = 2,
    /// Low x, high y.
    BottomLeft = 3,
}

impl Quadrant {
    /// All quadrants in storage order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Quadrant for a storage index `0..4`.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::TopLeft),
            1 => Some(Self::TopRight),
            2 => Some(Self::BottomRight),
            3 => Some(Self::BottomLeft),
            _ => None,
        }
    }

    /// Storage index `0..4`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A box together with its precomputed midpoints.
///
/// Every quadrant shares the same midpoints, so the four sub-boxes tile the
/// parent with no gap and no overlap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quadrants {
    outer: QuadBox,
    mid: QuadPoint,
}

impl Quadrants {
    /// The box that was split.
    #[inline]
    pub const fn outer(&self) -> QuadBox {
        self.outer
    }

    /// The shared midpoint.
    #[inline]
    pub const fn mid(&self) -> QuadPoint {
        self.mid
    }

    /// The sub-box for `quadrant`.
    pub const fn get(&self, quadrant: Quadrant) -> QuadBox {
        let QuadBox { x, y } = self.outer;
        let low_x = Span::new(x.start, self.mid.x);
        let high_x = Span::new(self.mid.x, x.end);
        let low_y = Span::new(y.start, self.mid.y);
        let high_y = Span::new(self.mid.y, y.end);
        match quadrant {
            Quadrant::TopLeft => QuadBox::new(low_x, low_y),
            Quadrant::TopRight => QuadBox::new(high_x, low_y),
            Quadrant::BottomRight => QuadBox::new(high_x, high_y),
            Quadrant::BottomLeft => QuadBox::new(low_x, high_y),
        }
    }

    /// All four sub-boxes in quadrant order.
    pub const fn all(&self) -> [QuadBox; 4] {
        [
            self.get(Quadrant::TopLeft),
            self.get(Quadrant::TopRight),
            self.get(Quadrant::BottomRight),
            self.get(Quadrant::BottomLeft),
        ]
    }
}

/// Returns the `quadrant` sub-box of `b`.
#[inline]
pub const fn quad_chop(b: &QuadBox, quadrant: Quadrant) -> QuadBox {
    b.quadrants().get(quadrant)
}

/// Returns `true` if `b` overlaps `viewport` on both axes.
#[inline]
pub const fn in_view(b: &QuadBox, viewport: &QuadBox) -> bool {
    overlap(viewport.x, b.x) && overlap(viewport.y, b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles_exactly(parent: QuadBox) {
        let parts = parent.quadrants().all();
        for x in (parent.x.start - 1)..=(parent.x.end) {
            for y in (parent.y.start - 1)..=(parent.y.end) {
                let p = QuadPoint::new(x, y);
                let hits = parts.iter().filter(|q| q.contains(p)).count();
                let expected = usize::from(parent.contains(p));
                assert_eq!(hits, expected, "{parent:?} at {p:?}");
            }
        }
    }

    #[test]
    fn quadrants_tile_power_of_two_boxes() {
        tiles_exactly(QuadBox::from_bounds(0, 0, 16, 16));
        tiles_exactly(QuadBox::from_bounds(8, 24, 16, 32));
        tiles_exactly(QuadBox::from_bounds(0, 0, 1, 1));
        tiles_exactly(QuadBox::from_bounds(0, 0, 2, 2));
    }

    #[test]
    fn quadrants_tile_odd_and_negative_boxes() {
        tiles_exactly(QuadBox::from_bounds(0, 0, 7, 5));
        tiles_exactly(QuadBox::from_bounds(-5, -3, 4, 6));
        tiles_exactly(QuadBox::from_bounds(3, 3, 4, 9));
    }

    #[test]
    fn quadrants_run_clockwise_from_top_left() {
        let b = QuadBox::from_bounds(0, 0, 8, 8);
        assert_eq!(quad_chop(&b, Quadrant::TopLeft), QuadBox::from_bounds(0, 0, 4, 4));
        assert_eq!(quad_chop(&b, Quadrant::TopRight), QuadBox::from_bounds(4, 0, 8, 4));
        assert_eq!(quad_chop(&b, Quadrant::BottomRight), QuadBox::from_bounds(4, 4, 8, 8));
        assert_eq!(quad_chop(&b, Quadrant::BottomLeft), QuadBox::from_bounds(0, 4, 4, 8));
    }

    #[test]
    fn quadrant_indices_round_trip() {
        for (i, q) in Quadrant::ALL.into_iter().enumerate() {
            assert_eq!(q.index(), i);
            assert_eq!(Quadrant::from_index(i), Some(q));
        }
        assert_eq!(Quadrant::from_index(4), None);
    }

    #[test]
    fn root_box_from_height() {
        assert_eq!(QuadBox::from_height(0), Some(QuadBox::from_bounds(0, 0, 1, 1)));
        assert_eq!(QuadBox::from_height(9), Some(QuadBox::from_bounds(0, 0, 512, 512)));
        assert!(QuadBox::from_height(30).is_some());
        assert_eq!(QuadBox::from_height(31), None);
        assert_eq!(QuadBox::from_height(200), None);
    }

    #[test]
    fn in_view_needs_both_axes() {
        let viewport = QuadBox::from_bounds(0, 0, 100, 100);
        assert!(in_view(&QuadBox::from_bounds(50, 50, 150, 150), &viewport));
        assert!(!in_view(&QuadBox::from_bounds(50, 100, 150, 150), &viewport));
        assert!(!in_view(&QuadBox::from_bounds(100, 50, 150, 150), &viewport));
        assert!(in_view(&QuadBox::from_bounds(-10, -10, 1, 1), &viewport));
    }

    #[test]
    fn screen_rect_area() {
        assert_eq!(ScreenRect::new(0, 0, 3, 4).area(), 12);
        assert_eq!(ScreenRect::new(3, 0, 3, 4).area(), 0);
        assert!(ScreenRect::new(3, 0, 3, 4).is_empty());
    }
}
