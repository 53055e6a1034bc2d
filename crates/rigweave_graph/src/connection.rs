// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed edge from one output port to one input port.
///
/// Endpoints are ids into the graph's node table; address strings are a
/// wire representation only and are resolved before a connection is
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Node owning the source (output) port
    pub source_node: NodeId,
    /// Source port ID
    pub source_port: PortId,
    /// Node owning the target (input) port
    pub target_node: NodeId,
    /// Target port ID
    pub target_port: PortId,
}

impl Connection {
    /// Create an edge between resolved endpoints.
    pub fn new(source_node: NodeId, source_port: PortId, target_node: NodeId, target_port: PortId) -> Self {
        Self {
            id: ConnectionId::new(),
            source_node,
            source_port,
            target_node,
            target_port,
        }
    }

    /// Whether the connection touches `node_id` at either end.
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source_node == node_id || self.target_node == node_id
    }

    /// Whether the connection touches `port_id` at either end.
    pub fn involves_port(&self, port_id: PortId) -> bool {
        self.source_port == port_id || self.target_port == port_id
    }
}
