// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Chooses the height at which traversal stops descending for a given zoom.
///
/// At the target height every non-black quadrant is drawn as four dither
/// pixels instead of being decoded further. The policy is a staircase: it
/// starts at [`LodPolicy::base`] and rises by one each time the zoom reaches
/// the next threshold, so coarser views stop higher in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LodPolicy {
    base: u8,
    thresholds: [u32; 3],
}

impl LodPolicy {
    /// Creates a policy rising above `base` at each zoom in `thresholds`.
    ///
    /// Thresholds are sorted so that the target height never decreases as
    /// zoom grows.
    pub fn new(base: u8, mut thresholds: [u32; 3]) -> Self {
        thresholds.sort_unstable();
        Self { base, thresholds }
    }

    /// Target height at zoom 1.
    pub fn base(&self) -> u8 {
        self.base
    }

    /// Height at which a pass with the given zoom substitutes dither.
    pub fn target_height(&self, zoom: u32) -> u8 {
        let steps = self.thresholds.iter().filter(|t| zoom >= **t).count();
        self.base
            .saturating_add(u8::try_from(steps).unwrap_or(u8::MAX))
    }
}

impl Default for LodPolicy {
    /// Height 3 (one leaf) up to zoom 8, then 4, 5 and 6 at zoom 16, 32 and 64.
    fn default() -> Self {
        Self {
            base: 3,
            thresholds: [16, 32, 64],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_staircase() {
        let lod = LodPolicy::default();
        for (zoom, height) in [(1, 3), (2, 3), (4, 3), (8, 3), (16, 4), (32, 5), (64, 6)] {
            assert_eq!(lod.target_height(zoom), height, "zoom {zoom}");
        }
        assert_eq!(lod.target_height(1 << 16), 6);
    }

    #[test]
    fn target_height_is_monotonic() {
        let lod = LodPolicy::new(2, [40, 10, 20]);
        let mut last = 0;
        for zoom in 1..100 {
            let h = lod.target_height(zoom);
            assert!(h >= last, "zoom {zoom}");
            last = h;
        }
        assert_eq!(lod.target_height(9), 2);
        assert_eq!(lod.target_height(10), 3);
        assert_eq!(lod.target_height(40), 5);
    }
}
