// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canvas layout: node bounds, the view transform, and framing.

use crate::graph::Graph;
use crate::node::{Node, NodeId};
use egui::{Pos2, Rect, Vec2};

/// Node visual width used for bounding-rect math.
pub const NODE_WIDTH: f32 = 180.0;
/// Height of the node header row.
pub const NODE_HEADER_HEIGHT: f32 = 24.0;
/// Height of one port row.
pub const PORT_ROW_HEIGHT: f32 = 22.0;

/// Margin kept between framed nodes and the viewport edge, in screen units.
pub const FRAME_MARGIN: f32 = 16.0;

/// Smallest view scale reachable by zooming.
pub const MIN_SCALE: f32 = 0.25;
/// Largest view scale reachable by zooming.
pub const MAX_SCALE: f32 = 2.0;

/// Canvas-space bounding rectangle of a node.
///
/// The extent is derived from the same constants the renderer draws
/// with: a fixed width, a header row and one row per port.
pub fn node_rect(node: &Node) -> Rect {
    let rows = node.inputs().len().max(node.outputs().len()) as f32;
    let size = Vec2::new(NODE_WIDTH, NODE_HEADER_HEIGHT + rows * PORT_ROW_HEIGHT);
    Rect::from_min_size(Pos2::new(node.position[0], node.position[1]), size)
}

/// Scale and pan applied to the canvas.
///
/// Maps canvas space to screen space as `(canvas + pan) * scale`,
/// anchored at the viewport center, so the canvas point under the
/// center stays put across scale changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Pan offset, in canvas units
    pub pan: Vec2,
    /// Zoom level (1.0 = native size)
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// Map a canvas position to screen space.
    pub fn canvas_to_screen(&self, pos: Pos2, viewport: Rect) -> Pos2 {
        let center = viewport.center();
        Pos2::new(
            (pos.x + self.pan.x) * self.scale + center.x,
            (pos.y + self.pan.y) * self.scale + center.y,
        )
    }

    /// Map a screen position to canvas space.
    pub fn screen_to_canvas(&self, pos: Pos2, viewport: Rect) -> Pos2 {
        let center = viewport.center();
        Pos2::new(
            (pos.x - center.x) / self.scale - self.pan.x,
            (pos.y - center.y) / self.scale - self.pan.y,
        )
    }

    /// Map a screen rectangle to canvas space.
    pub fn screen_rect_to_canvas(&self, rect: Rect, viewport: Rect) -> Rect {
        Rect::from_min_max(
            self.screen_to_canvas(rect.min, viewport),
            self.screen_to_canvas(rect.max, viewport),
        )
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.pan += screen_delta / self.scale;
    }

    /// Multiply the scale by `factor`, anchored at the viewport center.
    /// Factors that would leave the [`MIN_SCALE`]..[`MAX_SCALE`] range
    /// are ignored.
    pub fn zoom_by(&mut self, factor: f32) {
        let next = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&next) {
            return;
        }
        self.scale = next;
    }

    /// Multiply the scale by `factor`, keeping the canvas point under
    /// `screen_pos` fixed. Out-of-range factors are ignored.
    pub fn zoom_at(&mut self, factor: f32, screen_pos: Pos2, viewport: Rect) {
        let next = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&next) {
            return;
        }
        let before = self.screen_to_canvas(screen_pos, viewport);
        self.scale = next;
        let after = self.screen_to_canvas(screen_pos, viewport);
        self.pan += after - before;
    }
}

impl Graph {
    /// Union of the canvas-space bounds of `nodes`. `None` for an empty
    /// set or when no id resolves.
    pub fn nodes_rect(&self, nodes: &[NodeId]) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        for id in nodes {
            let Some(node) = self.node(*id) else { continue };
            let bounds = node_rect(node);
            rect = Some(match rect {
                Some(acc) => acc.union(bounds),
                None => bounds,
            });
        }
        rect
    }

    /// Fit `nodes` inside `viewport`, shrinking the view as needed but
    /// never magnifying past native size, then recenter on the set.
    /// Framing an empty set is a no-op.
    pub fn frame_nodes(&mut self, nodes: &[NodeId], viewport: Rect) {
        let Some(nodes_rect) = self.nodes_rect(nodes) else {
            return;
        };
        let window = viewport.shrink(FRAME_MARGIN);

        let view = self.view_mut();
        let window_rect = view.screen_rect_to_canvas(window, viewport);
        let factor = (window_rect.width() / nodes_rect.width())
            .min(window_rect.height() / nodes_rect.height());
        view.scale *= factor;
        if view.scale > 1.0 {
            view.scale = 1.0;
        }

        // Viewport geometry in canvas space changes with the scale.
        let window_rect = view.screen_rect_to_canvas(window, viewport);
        view.pan += window_rect.center() - nodes_rect.center();
    }

    /// Frame every node in the graph.
    pub fn frame_all(&mut self, viewport: Rect) {
        let ids: Vec<NodeId> = self.node_ids().collect();
        self.frame_nodes(&ids, viewport);
    }

    /// Frame the selection. No-op when nothing is selected.
    pub fn frame_selected(&mut self, viewport: Rect) {
        let ids = self.selection().to_vec();
        self.frame_nodes(&ids, viewport);
    }
}
