// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Half-open integer interval `[start, end)` along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Inclusive lower bound.
    pub start: i32,
    /// Exclusive upper bound.
    pub end: i32,
}

impl Span {
    /// Creates a span from its bounds.
    #[inline]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of integer points covered, zero for empty or inverted spans.
    #[inline]
    pub const fn len(self) -> u32 {
        if self.end > self.start {
            self.end.abs_diff(self.start)
        } else {
            0
        }
    }

    /// Returns `true` if no integer point is covered.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Returns `true` if `v` lies in `[start, end)`.
    #[inline]
    pub const fn contains(self, v: i32) -> bool {
        self.start <= v && v < self.end
    }

    /// Integer midpoint, truncating toward zero.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the mean of two i32 values always fits in i32"
    )]
    pub const fn midpoint(self) -> i32 {
        ((self.start as i64 + self.end as i64) / 2) as i32
    }

    /// Interval overlap test. See [`overlap`].
    #[inline]
    pub const fn overlaps(self, other: Self) -> bool {
        overlap(self, other)
    }
}

/// Returns `true` if the two spans overlap.
///
/// Touching endpoints do not overlap. The comparison is ordered by start: if
/// `a` starts first, `a` must end after `b` starts; otherwise `b` must end
/// after `a` starts.
#[inline]
pub const fn overlap(a: Span, b: Span) -> bool {
    if a.start < b.start {
        a.end > b.start
    } else {
        b.end > a.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spans_do_not_overlap() {
        assert!(!overlap(Span::new(0, 10), Span::new(10, 20)));
        assert!(!overlap(Span::new(10, 20), Span::new(0, 10)));
    }

    #[test]
    fn one_point_of_shared_interior_overlaps() {
        assert!(overlap(Span::new(0, 10), Span::new(9, 20)));
        assert!(overlap(Span::new(9, 20), Span::new(0, 10)));
    }

    #[test]
    fn containment_and_equal_starts_overlap() {
        assert!(overlap(Span::new(0, 100), Span::new(40, 60)));
        assert!(overlap(Span::new(40, 60), Span::new(0, 100)));
        assert!(overlap(Span::new(5, 6), Span::new(5, 100)));
    }

    #[test]
    fn disjoint_spans_do_not_overlap() {
        assert!(!overlap(Span::new(-20, -10), Span::new(0, 10)));
        assert!(!overlap(Span::new(30, 40), Span::new(0, 10)));
    }

    #[test]
    fn overlap_matches_interval_intersection_on_a_grid() {
        for a0 in -3..4 {
            for a1 in (a0 + 1)..5 {
                for b0 in -3..4 {
                    for b1 in (b0 + 1)..5 {
                        let a = Span::new(a0, a1);
                        let b = Span::new(b0, b1);
                        let shared = (a0..a1).any(|v| b.contains(v));
                        assert_eq!(overlap(a, b), shared, "{a:?} {b:?}");
                        assert_eq!(overlap(a, b), overlap(b, a), "{a:?} {b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn midpoint_truncates() {
        assert_eq!(Span::new(0, 5).midpoint(), 2);
        assert_eq!(Span::new(0, 1).midpoint(), 0);
        assert_eq!(Span::new(-5, 0).midpoint(), -2);
        assert_eq!(Span::new(0, 1 << 30).midpoint(), 1 << 29);
    }

    #[test]
    fn len_of_empty_and_inverted_spans_is_zero() {
        assert_eq!(Span::new(3, 3).len(), 0);
        assert_eq!(Span::new(4, 3).len(), 0);
        assert_eq!(Span::new(-2, 3).len(), 5);
        assert!(Span::new(3, 3).is_empty());
    }
}
