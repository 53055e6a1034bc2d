// SPDX-License-Identifier: MIT OR Apache-2.0
//! Copy/paste of node subsets, with optional left/right mirroring.

use crate::graph::{parse_address, Graph, GraphError};
use crate::node::NodeId;
use crate::port::PortDirection;
use indexmap::IndexMap;
use rigweave_rig::{
    ComponentData, ComponentId, ComponentRegistry, InputSource, Rig, RigConfig,
};
use serde::{Deserialize, Serialize};

/// One copied edge, in decorated `"node.port"` address form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Source address
    pub source: String,
    /// Target address
    pub target: String,
}

/// The portable serialized form of a copied node subset.
///
/// Paste never mutates a record, so one record supports repeated and
/// cross-rig pastes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardRecord {
    /// Serialized component payloads, one per copied node
    pub components: Vec<ComponentData>,
    /// Connection descriptors for every connected input across the set
    pub connections: Vec<ConnectionRecord>,
    /// Anchor position recorded at copy time
    pub copy_pos: [f32; 2],
}

/// Paste behavior switches.
#[derive(Debug, Clone, Copy)]
pub struct PasteOptions {
    /// Remap locations through the mirror table before naming
    pub mirrored: bool,
    /// Recreate connections whose source was not part of the copy
    pub connect_to_existing: bool,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            mirrored: false,
            connect_to_existing: true,
        }
    }
}

impl Graph {
    /// Serialize `nodes` plus every connection recorded on their
    /// inputs, whether the source sits inside or outside the set.
    pub fn copy_nodes(
        &self,
        rig: &Rig,
        nodes: &[NodeId],
        pos: [f32; 2],
    ) -> Result<ClipboardRecord, GraphError> {
        let mut components = Vec::new();
        let mut connections = Vec::new();
        for &node_id in nodes {
            let node = self
                .node(node_id)
                .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
            let component = rig
                .component(node.component)
                .ok_or(GraphError::ComponentNotFound(node.component))?;
            components.push(component.copy_data());

            for input in component.inputs() {
                let Some(source) = input.connection() else {
                    continue;
                };
                let source_component = rig
                    .component(source.component)
                    .ok_or(GraphError::ComponentNotFound(source.component))?;
                connections.push(ConnectionRecord {
                    source: format!("{}.{}", source_component.decorated_name(), source.output),
                    target: format!("{}.{}", component.decorated_name(), input.name),
                });
            }
        }
        Ok(ClipboardRecord {
            components,
            connections,
            copy_pos: pos,
        })
    }

    /// Copy the current selection, in selection order.
    pub fn copy_selection(&self, rig: &Rig, pos: [f32; 2]) -> Result<ClipboardRecord, GraphError> {
        let selection = self.selection().to_vec();
        self.copy_nodes(rig, &selection, pos)
    }

    /// Reconstruct a copied subset at `pos`, selecting the new nodes.
    ///
    /// With `mirrored`, each component's location is remapped through
    /// the mirror table *before* its decorated name is computed; the
    /// original-to-new name mapping then drives all connection
    /// re-resolution. Connections whose source was outside the copied
    /// set are recreated against existing nodes when
    /// `connect_to_existing` is set, and skipped silently when the
    /// source does not exist here (cross-rig paste).
    pub fn paste(
        &mut self,
        rig: &mut Rig,
        registry: &ComponentRegistry,
        config: &RigConfig,
        record: &ClipboardRecord,
        pos: [f32; 2],
        options: PasteOptions,
    ) -> Result<Vec<NodeId>, GraphError> {
        let delta = [pos[0] - record.copy_pos[0], pos[1] - record.copy_pos[1]];
        self.clear_selection();

        // Original decorated name -> pasted decorated name, and pasted
        // decorated name -> component handle.
        let mut name_mapping: IndexMap<String, String> = IndexMap::new();
        let mut pasted: IndexMap<String, ComponentId> = IndexMap::new();
        let mut pasted_nodes = Vec::new();

        for data in &record.components {
            let mut component = registry
                .create(&data.class, &data.name, &data.location)
                .ok_or_else(|| GraphError::UnknownComponentClass(data.class.clone()))?;
            let original = format!("{}{}", data.name, component.name_decoration());

            if options.mirrored {
                component.set_location(config.mirror_location(&data.location));
                component.paste_data(data, false);
            } else {
                component.paste_data(data, true);
            }
            let renamed = component.decorated_name();
            name_mapping.insert(original, renamed.clone());

            let graph_pos = component.graph_pos();
            component.set_graph_pos([graph_pos[0] + delta[0], graph_pos[1] + delta[1]]);

            let component_id = rig.add_child(component);
            let node_id = self.add_node(rig, component_id)?;
            self.select(node_id, false)?;
            pasted.insert(renamed, component_id);
            pasted_nodes.push(node_id);
        }

        for connection in &record.connections {
            let (source_decorated, output_name) = parse_address(&connection.source)?;
            let (target_decorated, input_name) = parse_address(&connection.target)?;

            // Targets always sit inside the pasted set.
            let target_renamed = name_mapping
                .get(target_decorated)
                .ok_or_else(|| GraphError::NodeNotFound(target_decorated.to_string()))?;
            let target_component = *pasted
                .get(target_renamed)
                .ok_or_else(|| GraphError::NodeNotFound(target_renamed.clone()))?;

            // The source is either a pasted node or a pre-existing one.
            let source_component = if let Some(renamed) = name_mapping.get(source_decorated) {
                *pasted
                    .get(renamed)
                    .ok_or_else(|| GraphError::NodeNotFound(renamed.clone()))?
            } else {
                if !options.connect_to_existing {
                    continue;
                }
                // A cross-rig paste may reference nodes this rig does not have.
                match self.node_by_name(source_decorated) {
                    Some(node) => node.component,
                    None => {
                        tracing::debug!(
                            source = source_decorated,
                            "skipping connection from missing node"
                        );
                        continue;
                    }
                }
            };

            let source_name = rig
                .component(source_component)
                .ok_or(GraphError::ComponentNotFound(source_component))?
                .decorated_name();
            let target_name = rig
                .component(target_component)
                .ok_or(GraphError::ComponentNotFound(target_component))?
                .decorated_name();
            {
                let target = rig
                    .component_mut(target_component)
                    .ok_or(GraphError::ComponentNotFound(target_component))?;
                let input = target.input_by_name_mut(input_name).ok_or_else(|| {
                    GraphError::PortNotFound {
                        node: target_name.clone(),
                        direction: PortDirection::Input,
                        port: input_name.to_string(),
                    }
                })?;
                input.set_connection(InputSource {
                    component: source_component,
                    output: output_name.to_string(),
                });
            }

            self.connect(
                &format!("{source_name}.{output_name}"),
                &format!("{target_name}.{input_name}"),
            )?;
        }

        tracing::info!(
            count = pasted_nodes.len(),
            mirrored = options.mirrored,
            "pasted components"
        );
        Ok(pasted_nodes)
    }
}
