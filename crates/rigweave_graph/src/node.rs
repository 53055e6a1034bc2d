// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph engine.

use crate::port::{Port, PortId};
use rigweave_rig::{Component, ComponentId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The graph engine's wrapper around one rig component.
///
/// Carries the component's decorated name, a canvas position, the
/// selection flag, and graph-side ports mirroring the component's
/// declared IO. The name and flag are mutated through the graph so its
/// indices stay coherent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Handle of the wrapped component in the rig
    pub component: ComponentId,
    /// Position in canvas space
    pub position: [f32; 2],
    name: String,
    selected: bool,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
}

impl Node {
    /// Wrap a rig component, mirroring its declared ports.
    pub fn from_component(component_id: ComponentId, component: &Component) -> Self {
        let inputs = component
            .inputs()
            .iter()
            .map(|input| Port::input(&input.name, input.data_type.clone()))
            .collect();
        let outputs = component
            .outputs()
            .iter()
            .map(|output| Port::output(&output.name, output.data_type.clone()))
            .collect();
        Self {
            id: NodeId::new(),
            component: component_id,
            position: component.graph_pos(),
            name: component.decorated_name(),
            selected: false,
            inputs,
            outputs,
        }
    }

    /// The node's name: the component's decorated name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the node is in the graph's selection.
    pub fn selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Input ports, in declaration order.
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    /// Output ports, in declaration order.
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    /// Input port by name.
    pub fn input(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Output port by name.
    pub fn output(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Any port by ID.
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.ports().find(|p| p.id == *port_id)
    }

    pub(crate) fn port_mut(&mut self, port_id: &PortId) -> Option<&mut Port> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .find(|p| p.id == *port_id)
    }

    /// All ports, inputs first.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
