// SPDX-License-Identifier: MIT OR Apache-2.0
//! The rig object tree owning all components.

use crate::component::{Component, ComponentId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The rig under edit: the ordered owner table of components.
///
/// The graph engine treats this as ground truth; the visual graph is
/// always rebuilt from the connection state recorded here, never the
/// other way around.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rig {
    components: IndexMap<ComponentId, Component>,
}

impl Rig {
    /// Create an empty rig.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `component` to the rig, returning its handle.
    pub fn add_child(&mut self, component: Component) -> ComponentId {
        let id = ComponentId::new();
        self.components.insert(id, component);
        id
    }

    /// Remove a component from the rig.
    ///
    /// Any other component's input that records the removed component as
    /// its source is cleared, so no rig-side reference dangles.
    pub fn remove_child(&mut self, id: ComponentId) -> Option<Component> {
        let removed = self.components.shift_remove(&id)?;
        for component in self.components.values_mut() {
            for input in component.inputs_mut() {
                if input.connection().is_some_and(|source| source.component == id) {
                    input.clear_connection();
                }
            }
        }
        Some(removed)
    }

    /// Component by handle.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Mutable component by handle.
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(&id)
    }

    /// All components with their handles, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter().map(|(id, component)| (*id, component))
    }

    /// Number of components in the rig.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Look a component up by its decorated name.
    pub fn component_by_decorated_name(&self, name: &str) -> Option<(ComponentId, &Component)> {
        self.children().find(|(_, c)| c.decorated_name() == name)
    }
}
