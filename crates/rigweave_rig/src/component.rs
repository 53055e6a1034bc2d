// SPDX-License-Identifier: MIT OR Apache-2.0
//! Component instances in the rig object tree.

use crate::port::{ComponentInput, ComponentOutput};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub Uuid);

impl ComponentId {
    /// Create a new random component ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Portable serialized form of one component, as stored on the clipboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    /// Registry class the component was built from
    pub class: String,
    /// Base name, without the location decoration
    pub name: String,
    /// Location tag
    pub location: String,
    /// Canvas position
    pub graph_pos: [f32; 2],
    /// Component-specific payload, opaque to the graph engine
    pub data: serde_json::Value,
}

/// A reusable rig building block with named typed ports.
///
/// Anatomy and placement logic live elsewhere; this type carries only
/// what the graph engine consumes: identity, location, canvas position,
/// port declarations, recorded input sources, and an opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    class: String,
    name: String,
    location: String,
    graph_pos: [f32; 2],
    inputs: Vec<ComponentInput>,
    outputs: Vec<ComponentOutput>,
    data: serde_json::Value,
}

impl Component {
    /// Create a component with no ports yet.
    pub fn new(class: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            location: location.into(),
            graph_pos: [0.0, 0.0],
            inputs: Vec::new(),
            outputs: Vec::new(),
            data: serde_json::Value::Null,
        }
    }

    /// Registry class this component was built from.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Base name, without the location decoration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the base name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Location tag, e.g. `L`, `R` or `M`.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Set the location tag.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Location-derived name suffix.
    pub fn name_decoration(&self) -> String {
        format!("_{}", self.location)
    }

    /// Base name plus the location decoration.
    ///
    /// This is the sole key used to address the component in
    /// `"node.port"` strings and on the clipboard.
    pub fn decorated_name(&self) -> String {
        format!("{}{}", self.name, self.name_decoration())
    }

    /// Canvas position.
    pub fn graph_pos(&self) -> [f32; 2] {
        self.graph_pos
    }

    /// Set the canvas position.
    pub fn set_graph_pos(&mut self, pos: [f32; 2]) {
        self.graph_pos = pos;
    }

    /// Declare an input port.
    pub fn add_input(&mut self, input: ComponentInput) {
        self.inputs.push(input);
    }

    /// Declare an output port.
    pub fn add_output(&mut self, output: ComponentOutput) {
        self.outputs.push(output);
    }

    /// Declared input ports, in declaration order.
    pub fn inputs(&self) -> &[ComponentInput] {
        &self.inputs
    }

    pub(crate) fn inputs_mut(&mut self) -> &mut [ComponentInput] {
        &mut self.inputs
    }

    /// Declared output ports, in declaration order.
    pub fn outputs(&self) -> &[ComponentOutput] {
        &self.outputs
    }

    /// Number of declared inputs.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Input port by declaration index.
    pub fn input_by_index(&self, index: usize) -> Option<&ComponentInput> {
        self.inputs.get(index)
    }

    /// Input port by name.
    pub fn input_by_name(&self, name: &str) -> Option<&ComponentInput> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Mutable input port by name.
    pub fn input_by_name_mut(&mut self, name: &str) -> Option<&mut ComponentInput> {
        self.inputs.iter_mut().find(|i| i.name == name)
    }

    /// Output port by name.
    pub fn output_by_name(&self, name: &str) -> Option<&ComponentOutput> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// Component-specific payload.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Replace the component-specific payload.
    pub fn set_data(&mut self, data: serde_json::Value) {
        self.data = data;
    }

    /// Serialize this component for the clipboard.
    pub fn copy_data(&self) -> ComponentData {
        ComponentData {
            class: self.class.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            graph_pos: self.graph_pos,
            data: self.data.clone(),
        }
    }

    /// Restore state from a clipboard payload.
    ///
    /// With `set_location` false the current location is kept; a mirrored
    /// paste sets the remapped location first and then restores the rest.
    pub fn paste_data(&mut self, data: &ComponentData, set_location: bool) {
        self.name = data.name.clone();
        if set_location {
            self.location = data.location.clone();
        }
        self.graph_pos = data.graph_pos;
        self.data = data.data.clone();
    }
}
