// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of component classes.

use crate::component::Component;
use crate::port::{ComponentInput, ComponentOutput, PortType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named, typed port declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDecl {
    /// Port name
    pub name: String,
    /// Data type tag
    pub data_type: PortType,
}

impl PortDecl {
    /// Create a port declaration.
    pub fn new(name: impl Into<String>, data_type: PortType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// The IO signature of a component class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Unique class identifier
    pub class: String,
    /// Declared input ports
    pub inputs: Vec<PortDecl>,
    /// Declared output ports
    pub outputs: Vec<PortDecl>,
}

/// Registry of available component classes.
///
/// Passed explicitly to the operations that instantiate components;
/// there is no process-wide registry.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    specs: IndexMap<String, ComponentSpec>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component class.
    pub fn register(&mut self, spec: ComponentSpec) {
        self.specs.insert(spec.class.clone(), spec);
    }

    /// Look a class up by name.
    pub fn get(&self, class: &str) -> Option<&ComponentSpec> {
        self.specs.get(class)
    }

    /// All registered classes.
    pub fn specs(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.specs.values()
    }

    /// Instantiate a component of `class` with its declared ports.
    pub fn create(&self, class: &str, name: &str, location: &str) -> Option<Component> {
        let spec = self.specs.get(class)?;
        let mut component = Component::new(class, name, location);
        for input in &spec.inputs {
            component.add_input(ComponentInput::new(&input.name, input.data_type.clone()));
        }
        for output in &spec.outputs {
            component.add_output(ComponentOutput::new(&output.name, output.data_type.clone()));
        }
        Some(component)
    }
}
