// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The depth-first render pass.
//!
//! Nodes carry no parent pointers and child boxes are not stored, so the
//! pass reconstructs both from a bounded stack of ancestor snapshots. The
//! work queue is strictly LIFO; that is what makes the reconciliation in
//! [`Renderer::render`] correct, and it must not be reordered.

use alloc::vec::Vec;

use log::{debug, trace, warn};
use smallvec::SmallVec;

use quaff_format::{
    BlockAddress, Branch, Branches, CorruptFormat, ImageBuffer, MAX_ROOT_HEIGHT, NodeRecord,
    ROOT_ADDRESS,
};
use quaff_view::{QuadBox, Quadrant, ViewState};

use crate::lod::LodPolicy;
use crate::sink::PixelSink;

/// Bounds on the per-pass stacks.
///
/// The ancestor stack holds at most `max_depth` snapshots and the work queue
/// at most `4 * max_depth` pending visits. Exceeding either abandons the
/// offending subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TraversalLimits {
    max_depth: usize,
}

impl TraversalLimits {
    /// Ancestor depth the format was designed around.
    pub const DEFAULT_MAX_DEPTH: usize = 20;

    /// Creates limits for the given ancestor depth (at least 1).
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth: if max_depth == 0 { 1 } else { max_depth },
        }
    }

    /// Capacity of the ancestor stack.
    pub const fn max_depth(self) -> usize {
        self.max_depth
    }

    /// Capacity of the work queue.
    pub const fn work_capacity(self) -> usize {
        self.max_depth.saturating_mul(4)
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}

/// What a render pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Nodes read from the image, including culled ones.
    pub nodes_decoded: usize,
    /// Decoded nodes discarded because their box was outside the viewport.
    pub nodes_culled: usize,
    /// Primitives sent to the sink.
    pub draw_commands: usize,
    /// Subtrees abandoned because of corrupt data, in the order found.
    pub abandoned: Vec<CorruptFormat>,
}

impl RenderReport {
    /// Returns `true` if nothing was abandoned.
    pub fn is_clean(&self) -> bool {
        self.abandoned.is_empty()
    }
}

/// A pending visit. The root is the only item without a quadrant.
#[derive(Copy, Clone, Debug)]
struct WorkItem {
    address: BlockAddress,
    quadrant: Option<Quadrant>,
}

/// A node that may still be the ancestor of pending work.
#[derive(Copy, Clone, Debug)]
struct Ancestor {
    branches: Branches,
    height: u8,
    bbox: QuadBox,
}

/// Renders images, reusing its stack storage from pass to pass.
///
/// Each call to [`Renderer::render`] is a complete, synchronous pass: it
/// starts from empty stacks, runs until the work queue is exhausted, and
/// never mutates the image or the view.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    limits: TraversalLimits,
    lod: LodPolicy,
    work: SmallVec<[WorkItem; 96]>,
    ancestors: SmallVec<[Ancestor; 32]>,
}

impl Renderer {
    /// Creates a renderer with default limits and LOD policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stack bounds.
    #[must_use]
    pub fn with_limits(mut self, limits: TraversalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the level-of-detail policy.
    #[must_use]
    pub fn with_lod(mut self, lod: LodPolicy) -> Self {
        self.lod = lod;
        self
    }

    /// Current stack bounds.
    pub fn limits(&self) -> TraversalLimits {
        self.limits
    }

    /// Current level-of-detail policy.
    pub fn lod(&self) -> LodPolicy {
        self.lod
    }

    /// Runs one render pass of `image` as seen through `view` into `sink`.
    ///
    /// Corrupt data never aborts the pass. Each problem abandons only the
    /// branch it was found in and is listed in the returned report.
    pub fn render<S>(&mut self, image: &ImageBuffer, view: &ViewState, sink: &mut S) -> RenderReport
    where
        S: PixelSink + ?Sized,
    {
        let mut pass = Pass {
            image,
            view,
            sink,
            target: self.lod.target_height(view.zoom()),
            report: RenderReport::default(),
        };
        self.work.clear();
        self.ancestors.clear();
        self.work.push(WorkItem {
            address: ROOT_ADDRESS,
            quadrant: None,
        });

        while let Some(item) = self.work.pop() {
            // Drop snapshots that are no longer on the path to `item`.
            while let Some(top) = self.ancestors.last() {
                if top.branches.contains(item.address) {
                    break;
                }
                self.ancestors.pop();
            }
            match self.place(image, item) {
                Ok((node, height, bbox)) => self.visit(&mut pass, item.address, node, height, bbox),
                Err(err) => pass.abandon(err),
            }
        }

        let report = pass.report;
        debug!(
            "render pass at zoom {}: {} decoded, {} culled, {} draws, {} abandoned",
            view.zoom(),
            report.nodes_decoded,
            report.nodes_culled,
            report.draw_commands,
            report.abandoned.len()
        );
        report
    }

    /// Reads the node for `item` and works out its height and box.
    fn place(
        &self,
        image: &ImageBuffer,
        item: WorkItem,
    ) -> Result<(NodeRecord, u8, QuadBox), CorruptFormat> {
        let Some(quadrant) = item.quadrant else {
            let root = image.root()?;
            let height = root.height();
            let too_large = CorruptFormat::RootHeightTooLarge {
                height,
                max: MAX_ROOT_HEIGHT,
            };
            if height > MAX_ROOT_HEIGHT {
                return Err(too_large);
            }
            let bbox = QuadBox::from_height(height).ok_or(too_large)?;
            return Ok((root, height, bbox));
        };
        let address = item.address;
        let parent = self
            .ancestors
            .last()
            .ok_or(CorruptFormat::OrphanNode { address })?;
        let height = parent
            .height
            .checked_sub(1)
            .ok_or(CorruptFormat::HeightUnderflow { address })?;
        let node = image.node(address)?;
        Ok((node, height, parent.bbox.quadrants().get(quadrant)))
    }

    fn visit<S>(
        &mut self,
        pass: &mut Pass<'_, S>,
        address: BlockAddress,
        node: NodeRecord,
        height: u8,
        bbox: QuadBox,
    ) where
        S: PixelSink + ?Sized,
    {
        pass.report.nodes_decoded += 1;
        if !pass.view.in_view(&bbox) {
            trace!("cull {address} at height {height}");
            pass.report.nodes_culled += 1;
            return;
        }
        trace!("visit {address} at height {height}, box {bbox:?}");

        let branches = node.branches();
        let quadrants = bbox.quadrants();
        let coarse = height == pass.target;
        let mut children: SmallVec<[(BlockAddress, Quadrant); 4]> = SmallVec::new();
        for quadrant in Quadrant::ALL {
            let sub = quadrants.get(quadrant);
            match branches[quadrant.index()] {
                Branch::Black => pass.fill(&sub),
                _ if coarse => pass.dither(&sub, node.dither()),
                Branch::Leaf(leaf) => pass.blit(&sub, leaf),
                Branch::Node(child) => children.push((child, quadrant)),
                Branch::Outside | Branch::White => {}
            }
        }
        if children.is_empty() {
            return;
        }

        let depth = self.limits.max_depth();
        if self.ancestors.len() >= depth {
            pass.abandon(CorruptFormat::AncestorOverflow {
                address,
                capacity: depth,
            });
            return;
        }
        // Reversed so that children pop in quadrant order.
        let capacity = self.limits.work_capacity();
        let mut queued = 0_usize;
        for &(child, quadrant) in children.iter().rev() {
            if self.work.len() >= capacity {
                pass.abandon(CorruptFormat::WorkQueueOverflow {
                    address: child,
                    capacity,
                });
                continue;
            }
            self.work.push(WorkItem {
                address: child,
                quadrant: Some(quadrant),
            });
            queued += 1;
        }
        if queued > 0 {
            self.ancestors.push(Ancestor {
                branches,
                height,
                bbox,
            });
        }
    }
}

/// Runs a single pass with a fresh [`Renderer`] using default settings.
pub fn render<S>(image: &ImageBuffer, view: &ViewState, sink: &mut S) -> RenderReport
where
    S: PixelSink + ?Sized,
{
    Renderer::new().render(image, view, sink)
}

/// Per-pass state shared by the visit steps.
struct Pass<'a, S: ?Sized> {
    image: &'a ImageBuffer,
    view: &'a ViewState,
    sink: &'a mut S,
    target: u8,
    report: RenderReport,
}

impl<S: PixelSink + ?Sized> Pass<'_, S> {
    fn abandon(&mut self, err: CorruptFormat) {
        warn!("abandoning subtree: {err}");
        self.report.abandoned.push(err);
    }

    fn fill(&mut self, sub: &QuadBox) {
        self.sink.fill_rect(self.view.screen_rect(sub));
        self.report.draw_commands += 1;
    }

    /// Dither bits 3, 2, 1, 0 light the origins of the sub-box's quadrants
    /// 0, 1, 2, 3.
    fn dither(&mut self, sub: &QuadBox, bits: u8) {
        let corners = sub.quadrants();
        for (k, quadrant) in Quadrant::ALL.into_iter().enumerate() {
            if bits & (0b1000 >> k) != 0 {
                let p = self.view.screen_map(corners.get(quadrant).origin());
                self.sink.set_pixel(p);
                self.report.draw_commands += 1;
            }
        }
    }

    fn blit(&mut self, sub: &QuadBox, leaf: BlockAddress) {
        match self.image.leaf(leaf) {
            Ok(bitmap) => {
                let origin = self.view.screen_map(sub.origin());
                self.sink.blit_8x8_subset(origin, &bitmap, self.view.zoom());
                self.report.draw_commands += 1;
            }
            Err(err) => self.abandon(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use quaff_format::synth::{Quad, SynthNode, encode};
    use quaff_view::{QuadPoint, ScreenPoint, ScreenRect, ScreenSize};

    use super::*;
    use crate::command::DrawCommand;
    use crate::sink::RecordingSink;

    fn view(cx: i32, cy: i32, zoom: u32) -> ViewState {
        ViewState::new(ScreenSize::new(240, 208), QuadPoint::new(cx, cy), zoom)
    }

    fn run(bytes: Vec<u8>, view: &ViewState) -> (Vec<DrawCommand>, RenderReport) {
        let mut sink = RecordingSink::new();
        let report = render(&ImageBuffer::new(bytes), view, &mut sink);
        (sink.take(), report)
    }

    #[test]
    fn black_root_quadrants_fill() {
        let root = SynthNode::new([Quad::Black, Quad::White, Quad::Outside, Quad::Black]);
        let (cmds, report) = run(encode(1, &root), &view(1, 1, 1));
        assert_eq!(
            cmds,
            vec![
                DrawCommand::FillRect(ScreenRect::new(119, 103, 120, 104)),
                DrawCommand::FillRect(ScreenRect::new(119, 104, 120, 105)),
            ]
        );
        assert_eq!(report.nodes_decoded, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn empty_buffer_abandons_the_root() {
        let (cmds, report) = run(vec![0; 8], &view(0, 0, 1));
        assert!(cmds.is_empty());
        assert_eq!(
            report.abandoned,
            vec![CorruptFormat::AddressOutOfBounds {
                address: ROOT_ADDRESS,
                blocks: 1,
            }]
        );
    }

    #[test]
    fn oversized_root_height_renders_nothing() {
        let root = SynthNode::new([Quad::Black, Quad::Black, Quad::Black, Quad::Black]);
        let (cmds, report) = run(encode(31, &root), &view(0, 0, 1));
        assert!(cmds.is_empty());
        assert_eq!(
            report.abandoned,
            vec![CorruptFormat::RootHeightTooLarge { height: 31, max: 30 }]
        );
    }

    #[test]
    fn node_below_height_zero_is_abandoned() {
        // Root of height 0 cannot have node children.
        let root = SynthNode::new([
            Quad::node([Quad::Black, Quad::Black, Quad::Black, Quad::Black]),
            Quad::White,
            Quad::White,
            Quad::White,
        ]);
        let (cmds, report) = run(encode(0, &root), &view(0, 0, 1));
        assert!(cmds.is_empty());
        assert_eq!(
            report.abandoned,
            vec![CorruptFormat::HeightUnderflow {
                address: BlockAddress::new(3),
            }]
        );
    }

    #[test]
    fn ancestor_overflow_abandons_only_the_deep_branch() {
        // A chain of nodes down quadrant 0, with ink in quadrant 1 at each level.
        let mut chain = Quad::Black;
        for _ in 0..6 {
            chain = Quad::node([chain, Quad::Black, Quad::White, Quad::White]);
        }
        let Quad::Node(root) = chain else {
            unreachable!("built as a node");
        };
        let bytes = encode(8, &root);
        let mut sink = RecordingSink::new();
        let report = Renderer::new()
            .with_limits(TraversalLimits::new(2))
            .render(&ImageBuffer::new(bytes), &view(128, 128, 1), &mut sink);
        assert_eq!(report.abandoned.len(), 1);
        assert!(matches!(
            report.abandoned[0],
            CorruptFormat::AncestorOverflow { capacity: 2, .. }
        ));
        // Root, its child and grandchild each fill quadrant 1.
        assert_eq!(report.nodes_decoded, 3);
        assert_eq!(sink.commands().len(), 3);
    }

    #[test]
    fn work_queue_holds_a_full_fanout_at_depth_one() {
        let four = || Quad::node([Quad::Black, Quad::White, Quad::White, Quad::White]);
        let root = SynthNode::new([four(), four(), four(), four()]);
        let bytes = encode(4, &root);
        let mut sink = RecordingSink::new();
        // Depth 1 allows a work queue of 4: all four children fit.
        let report = Renderer::new()
            .with_limits(TraversalLimits::new(1))
            .render(&ImageBuffer::new(bytes), &view(8, 8, 1), &mut sink);
        assert!(report.is_clean(), "{:?}", report.abandoned);
        assert_eq!(report.nodes_decoded, 5);
        assert_eq!(sink.commands().len(), 4);
    }

    #[test]
    fn dither_lights_sub_quadrant_origins() {
        // The height-3 child is the LOD target at zoom 1: every non-black
        // quadrant dithers.
        let child = Quad::dithered(0b1001, [Quad::White, Quad::Outside, Quad::Black, Quad::White]);
        let root = SynthNode::new([child, Quad::White, Quad::White, Quad::White]);
        let (cmds, report) = run(encode(4, &root), &view(4, 4, 1));
        assert_eq!(report.nodes_decoded, 2);
        let px = |x, y| DrawCommand::SetPixel(ScreenPoint::new(116 + x, 100 + y));
        assert_eq!(
            cmds,
            vec![
                // Quadrant 0: box [0,4)², corners at 0 and 2.
                px(0, 0),
                px(0, 2),
                // Quadrant 1: box [4,8)×[0,4).
                px(4, 0),
                px(4, 2),
                // Quadrant 2 is black.
                DrawCommand::FillRect(ScreenRect::new(120, 104, 124, 108)),
                // Quadrant 3: box [0,4)×[4,8).
                px(0, 4),
                px(0, 6),
            ]
        );
    }

    #[test]
    fn dither_middle_bits_light_the_right_hand_corners() {
        let child = Quad::dithered(0b0110, [Quad::White, Quad::Black, Quad::Black, Quad::Black]);
        let root = SynthNode::new([child, Quad::White, Quad::White, Quad::White]);
        let (cmds, _) = run(encode(4, &root), &view(4, 4, 1));
        let px = |x, y| DrawCommand::SetPixel(ScreenPoint::new(116 + x, 100 + y));
        assert_eq!(
            cmds,
            vec![
                // Box [0,4)²: bit 2 is (xm, y0), bit 1 is (xm, ym).
                px(2, 0),
                px(2, 2),
                DrawCommand::FillRect(ScreenRect::new(120, 100, 124, 104)),
                DrawCommand::FillRect(ScreenRect::new(120, 104, 124, 108)),
                DrawCommand::FillRect(ScreenRect::new(116, 104, 120, 108)),
            ]
        );
    }
}
