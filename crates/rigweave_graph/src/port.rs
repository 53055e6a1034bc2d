// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use crate::connection::ConnectionId;
use rigweave_rig::PortType;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// A port on a node.
///
/// Ports reference incident connections by id only; the graph owns the
/// connection table. An input holds at most one id (the graph replaces
/// rather than accumulates), an output holds zero or more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name, unique within the owning node's direction-scoped set
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Data type tag
    pub data_type: PortType,
    connections: Vec<ConnectionId>,
}

impl Port {
    /// Create a new input port
    pub fn input(name: impl Into<String>, data_type: PortType) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Input,
            data_type,
            connections: Vec::new(),
        }
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>, data_type: PortType) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Output,
            data_type,
            connections: Vec::new(),
        }
    }

    /// Whether any connection is incident on this port.
    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    /// The single incident connection of an input port.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.connections.first().copied()
    }

    /// All incident connection ids.
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    /// Check whether this port can connect to `other`.
    pub fn can_connect(&self, other: &Port) -> bool {
        self.direction != other.direction && self.data_type.can_connect_to(&other.data_type)
    }

    pub(crate) fn register(&mut self, id: ConnectionId) {
        self.connections.push(id);
    }

    pub(crate) fn unregister(&mut self, id: ConnectionId) {
        self.connections.retain(|c| *c != id);
    }
}
