// SPDX-License-Identifier: MIT OR Apache-2.0
//! Component-side port declarations and recorded connections.

use crate::component::ComponentId;
use serde::{Deserialize, Serialize};

/// Data type tag carried by a port.
///
/// Tags are opaque to the graph engine: two ports are compatible exactly
/// when their tags match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortType {
    /// Transform (translation + orientation + scale)
    Xfo,
    /// Boolean value
    Boolean,
    /// Scalar value
    Scalar,
    /// Integer value
    Integer,
    /// String value
    String,
    /// User-defined type
    Custom(String),
}

impl PortType {
    /// Check whether a value of this type can flow into `other`.
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        self == other
    }
}

/// The rig-side record of where a component input is fed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    /// Source component handle
    pub component: ComponentId,
    /// Name of the source component's output port
    pub output: String,
}

/// An input port declared by a component.
///
/// Holds at most one recorded source; recording a second source replaces
/// the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInput {
    /// Port name, unique among the component's inputs
    pub name: String,
    /// Data type tag
    pub data_type: PortType,
    connection: Option<InputSource>,
}

impl ComponentInput {
    /// Create an unconnected input.
    pub fn new(name: impl Into<String>, data_type: PortType) -> Self {
        Self {
            name: name.into(),
            data_type,
            connection: None,
        }
    }

    /// Whether a source is recorded for this input.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// The recorded source, if any.
    pub fn connection(&self) -> Option<&InputSource> {
        self.connection.as_ref()
    }

    /// Record `source` as this input's feed, replacing any prior record.
    pub fn set_connection(&mut self, source: InputSource) {
        self.connection = Some(source);
    }

    /// Clear the recorded source.
    pub fn clear_connection(&mut self) {
        self.connection = None;
    }
}

/// An output port declared by a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentOutput {
    /// Port name, unique among the component's outputs
    pub name: String,
    /// Data type tag
    pub data_type: PortType,
}

impl ComponentOutput {
    /// Create an output.
    pub fn new(name: impl Into<String>, data_type: PortType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}
