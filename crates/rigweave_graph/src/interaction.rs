// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactive gestures: marquee selection and panning.
//!
//! Each gesture is a short-lived session bounded by press, zero or more
//! moves, and a release. Graph state is mutated incrementally and is
//! internally consistent after every move, so a render can happen
//! between any two events.

use crate::graph::{Graph, GraphError};
use crate::layout::{node_rect, ViewTransform};
use crate::node::NodeId;
use egui::{Pos2, Rect, Vec2};

/// Net effect of one selection gesture: the nodes newly selected and
/// newly deselected between press and release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionChange {
    /// Nodes absent before the gesture, present after
    pub selected: Vec<NodeId>,
    /// Nodes present before the gesture, absent after
    pub deselected: Vec<NodeId>,
}

impl SelectionChange {
    /// Diff two selections, both in selection order.
    pub fn diff(before: &[NodeId], after: &[NodeId]) -> Self {
        let selected = after
            .iter()
            .filter(|id| !before.contains(id))
            .copied()
            .collect();
        let deselected = before
            .iter()
            .filter(|id| !after.contains(id))
            .copied()
            .collect();
        Self {
            selected,
            deselected,
        }
    }

    /// Whether the gesture changed nothing.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.deselected.is_empty()
    }
}

/// An in-progress marquee (drag-rectangle) selection gesture, in canvas
/// space.
///
/// During one drag the selection only grows: a node stays selected even
/// if the rectangle later stops covering it. Releasing without having
/// dragged clears the selection instead.
#[derive(Debug)]
pub struct MarqueeSession {
    origin: Pos2,
    current: Pos2,
    dragging: bool,
    before: Vec<NodeId>,
}

impl MarqueeSession {
    /// Begin at the pressed canvas position, snapshotting the selection
    /// for the release diff.
    pub fn begin(graph: &Graph, pos: Pos2) -> Self {
        Self {
            origin: pos,
            current: pos,
            dragging: false,
            before: graph.selection().to_vec(),
        }
    }

    /// The current drag rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_two_pos(self.origin, self.current)
    }

    /// Extend the drag to `pos`, selecting every not-yet-selected node
    /// the rectangle now intersects.
    pub fn drag(&mut self, graph: &mut Graph, pos: Pos2) -> Result<(), GraphError> {
        self.current = pos;
        self.dragging = true;
        let rect = self.rect();
        let hits: Vec<NodeId> = graph
            .nodes()
            .filter(|node| !node.selected() && rect.intersects(node_rect(node)))
            .map(|node| node.id)
            .collect();
        for id in hits {
            graph.select(id, false)?;
        }
        Ok(())
    }

    /// Finish the gesture.
    ///
    /// Returns the before/after selection diff, which is what the
    /// command log records for the whole gesture rather than each
    /// intermediate select.
    pub fn release(self, graph: &mut Graph) -> SelectionChange {
        if !self.dragging {
            graph.clear_selection();
        }
        SelectionChange::diff(&self.before, graph.selection())
    }
}

/// An in-progress pan gesture, in screen space.
#[derive(Debug)]
pub struct PanSession {
    last: Pos2,
}

impl PanSession {
    /// Begin at the pressed screen position.
    pub fn begin(pos: Pos2) -> Self {
        Self { last: pos }
    }

    /// Pan the view by the movement since the previous event.
    pub fn drag(&mut self, view: &mut ViewTransform, pos: Pos2) {
        let delta: Vec2 = pos - self.last;
        self.last = pos;
        view.pan_by(delta);
    }
}
