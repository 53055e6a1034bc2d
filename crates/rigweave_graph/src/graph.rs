// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes, connections and the selection.

use crate::connection::{Connection, ConnectionId};
use crate::layout::ViewTransform;
use crate::node::{Node, NodeId};
use crate::port::PortDirection;
use indexmap::IndexMap;
use rigweave_rig::{ComponentId, PortType, Rig};

/// Error raised by graph operations.
///
/// Every operation either completes with all invariants holding or
/// fails before mutating shared state.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node with the same name already exists
    #[error("a node named `{0}` already exists")]
    DuplicateName(String),

    /// Node lookup failed
    #[error("node not found: `{0}`")]
    NodeNotFound(String),

    /// Component handle not present in the rig
    #[error("component not found in rig: {0:?}")]
    ComponentNotFound(ComponentId),

    /// Port lookup failed on an existing node
    #[error("node `{node}` has no {direction} port `{port}`")]
    PortNotFound {
        /// Name of the node that was searched
        node: String,
        /// Direction the port was searched in
        direction: PortDirection,
        /// Name of the missing port
        port: String,
    },

    /// Port data types are incompatible
    #[error("cannot connect `{source_addr}` ({source_type:?}) to `{target}` ({target_type:?})")]
    TypeMismatch {
        /// Source address
        source_addr: String,
        /// Target address
        target: String,
        /// Source port type
        source_type: PortType,
        /// Target port type
        target_type: PortType,
    },

    /// Address string is not of the form `node.port`
    #[error("malformed port address `{0}`, expected `node.port`")]
    MalformedAddress(String),

    /// Node name would be unaddressable
    #[error("invalid node name `{0}`: names must be non-empty and must not contain `.`")]
    InvalidNodeName(String),

    /// Selection already contains the node
    #[error("node `{0}` is already selected")]
    AlreadySelected(String),

    /// Selection does not contain the node
    #[error("node `{0}` is not selected")]
    NotSelected(String),

    /// Component class is not in the registry
    #[error("unknown component class `{0}`")]
    UnknownComponentClass(String),
}

/// Split a `"node.port"` address into its two parts.
pub(crate) fn parse_address(address: &str) -> Result<(&str, &str), GraphError> {
    let mut parts = address.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(node), Some(port), None) if !node.is_empty() && !port.is_empty() => Ok((node, port)),
        _ => Err(GraphError::MalformedAddress(address.to_string())),
    }
}

/// The component graph for one rig-editing session.
///
/// Owns all nodes and connections; ports and the selection refer to them
/// by id only. The graph is a view of the rig's recorded connection
/// state, rebuilt wholesale by [`Graph::rebuild_from_rig`], never the
/// source of truth.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    names: IndexMap<String, NodeId>,
    connections: IndexMap<ConnectionId, Connection>,
    selection: Vec<NodeId>,
    view: ViewTransform,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------
    // Nodes

    /// Wrap a rig component in a new node keyed by its decorated name.
    pub fn add_node(&mut self, rig: &Rig, component: ComponentId) -> Result<NodeId, GraphError> {
        let component_ref = rig
            .component(component)
            .ok_or(GraphError::ComponentNotFound(component))?;
        let name = component_ref.decorated_name();
        if name.is_empty() || name.contains('.') {
            return Err(GraphError::InvalidNodeName(name));
        }
        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }

        let node = Node::from_component(component, component_ref);
        let id = node.id;
        self.names.insert(name, id);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node: detach and destroy every incident connection,
    /// remove the wrapped component from the rig, drop the node from the
    /// table, the name index and the selection.
    pub fn remove_node(&mut self, rig: &mut Rig, node: NodeId) -> Result<(), GraphError> {
        let incident: Vec<ConnectionId> = {
            let node_ref = self
                .nodes
                .get(&node)
                .ok_or_else(|| GraphError::NodeNotFound(node.to_string()))?;
            node_ref
                .ports()
                .flat_map(|port| port.connections().iter().copied())
                .collect()
        };
        for connection in incident {
            self.remove_connection(connection);
        }

        self.selection.retain(|id| *id != node);
        if let Some(removed) = self.nodes.shift_remove(&node) {
            self.names.shift_remove(removed.name());
            rig.remove_child(removed.component);
            tracing::debug!(name = removed.name(), "removed node");
        }
        Ok(())
    }

    /// Remove every selected node.
    pub fn remove_selected(&mut self, rig: &mut Rig) -> Result<(), GraphError> {
        let selected = self.selection.clone();
        for node in selected {
            self.remove_node(rig, node)?;
        }
        Ok(())
    }

    /// Rekey a node after its component was renamed.
    ///
    /// Connections and the selection hold node ids, so they stay valid
    /// across a rename.
    pub fn rename_node(&mut self, old_name: &str, new_name: &str) -> Result<(), GraphError> {
        let id = *self
            .names
            .get(old_name)
            .ok_or_else(|| GraphError::NodeNotFound(old_name.to_string()))?;
        if new_name.is_empty() || new_name.contains('.') {
            return Err(GraphError::InvalidNodeName(new_name.to_string()));
        }
        if let Some(&existing) = self.names.get(new_name) {
            if existing != id {
                return Err(GraphError::DuplicateName(new_name.to_string()));
            }
            return Ok(());
        }

        self.names.shift_remove(old_name);
        self.names.insert(new_name.to_string(), id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_name(new_name);
        }
        Ok(())
    }

    /// Node by ID.
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Mutable node by ID.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Node by name.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.names.get(name).and_then(|id| self.nodes.get(id))
    }

    /// Node ID by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node IDs.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ---------------------------------------------------------------
    // Connections

    /// Connect `source` (`"node.output"`) to `target` (`"node.input"`).
    ///
    /// Both addresses are fully resolved and validated before any state
    /// changes. An existing connection on the target input is replaced,
    /// never accumulated.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<ConnectionId, GraphError> {
        let (source_name, output_name) = parse_address(source)?;
        let (target_name, input_name) = parse_address(target)?;

        let source_id = *self
            .names
            .get(source_name)
            .ok_or_else(|| GraphError::NodeNotFound(source_name.to_string()))?;
        let target_id = *self
            .names
            .get(target_name)
            .ok_or_else(|| GraphError::NodeNotFound(target_name.to_string()))?;

        let source_node = self
            .nodes
            .get(&source_id)
            .ok_or_else(|| GraphError::NodeNotFound(source_name.to_string()))?;
        let target_node = self
            .nodes
            .get(&target_id)
            .ok_or_else(|| GraphError::NodeNotFound(target_name.to_string()))?;

        let source_port = source_node
            .output(output_name)
            .ok_or_else(|| GraphError::PortNotFound {
                node: source_name.to_string(),
                direction: PortDirection::Output,
                port: output_name.to_string(),
            })?;
        let target_port = target_node
            .input(input_name)
            .ok_or_else(|| GraphError::PortNotFound {
                node: target_name.to_string(),
                direction: PortDirection::Input,
                port: input_name.to_string(),
            })?;

        if !source_port.data_type.can_connect_to(&target_port.data_type) {
            return Err(GraphError::TypeMismatch {
                source_addr: source.to_string(),
                target: target.to_string(),
                source_type: source_port.data_type.clone(),
                target_type: target_port.data_type.clone(),
            });
        }

        let source_port_id = source_port.id;
        let target_port_id = target_port.id;
        let previous = target_port.connection();

        if let Some(previous) = previous {
            self.remove_connection(previous);
        }

        let connection = Connection::new(source_id, source_port_id, target_id, target_port_id);
        let id = connection.id;
        self.connections.insert(id, connection);
        if let Some(port) = self
            .nodes
            .get_mut(&source_id)
            .and_then(|n| n.port_mut(&source_port_id))
        {
            port.register(id);
        }
        if let Some(port) = self
            .nodes
            .get_mut(&target_id)
            .and_then(|n| n.port_mut(&target_port_id))
        {
            port.register(id);
        }
        Ok(id)
    }

    /// Remove a connection, detaching it from both ports.
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.remove_connection(connection_id)
    }

    fn remove_connection(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let connection = self.connections.shift_remove(&connection_id)?;
        if let Some(port) = self
            .nodes
            .get_mut(&connection.source_node)
            .and_then(|n| n.port_mut(&connection.source_port))
        {
            port.unregister(connection_id);
        }
        if let Some(port) = self
            .nodes
            .get_mut(&connection.target_node)
            .and_then(|n| n.port_mut(&connection.target_port))
        {
            port.unregister(connection_id);
        }
        Some(connection)
    }

    /// Connection by ID.
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// All connections.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Connections involving a node.
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.involves_node(node_id))
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // ---------------------------------------------------------------
    // Selection

    /// Add a node to the selection.
    ///
    /// With `exclusive` the current selection is cleared first.
    /// Selection membership is exactly-once: selecting an already
    /// selected node is an error, not a silent no-op.
    pub fn select(&mut self, node: NodeId, exclusive: bool) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&node) {
            return Err(GraphError::NodeNotFound(node.to_string()));
        }
        if exclusive {
            self.clear_selection();
        }
        if self.selection.contains(&node) {
            let name = self
                .nodes
                .get(&node)
                .map_or_else(|| node.to_string(), |n| n.name().to_string());
            return Err(GraphError::AlreadySelected(name));
        }
        if let Some(node_ref) = self.nodes.get_mut(&node) {
            node_ref.set_selected(true);
        }
        self.selection.push(node);
        Ok(())
    }

    /// Remove a node from the selection.
    pub fn deselect(&mut self, node: NodeId) -> Result<(), GraphError> {
        let Some(position) = self.selection.iter().position(|id| *id == node) else {
            let name = self
                .nodes
                .get(&node)
                .map_or_else(|| node.to_string(), |n| n.name().to_string());
            return Err(GraphError::NotSelected(name));
        };
        self.selection.remove(position);
        if let Some(node_ref) = self.nodes.get_mut(&node) {
            node_ref.set_selected(false);
        }
        Ok(())
    }

    /// Deselect everything. No error on an empty selection.
    pub fn clear_selection(&mut self) {
        let selection = std::mem::take(&mut self.selection);
        for id in selection {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.set_selected(false);
            }
        }
    }

    /// Selected node IDs, in selection order.
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Selected nodes, in selection order.
    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.selection.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The leftmost-x / topmost-y corner of the selection's positions,
    /// used as the anchor for copy.
    pub fn selection_anchor(&self) -> Option<[f32; 2]> {
        let mut nodes = self.selected_nodes();
        let first = nodes.next()?;
        let mut anchor = first.position;
        for node in nodes {
            anchor[0] = anchor[0].min(node.position[0]);
            anchor[1] = anchor[1].min(node.position[1]);
        }
        Some(anchor)
    }

    // ---------------------------------------------------------------
    // Whole-graph operations

    /// Destroy all connections, then all nodes, and empty the selection.
    /// The view transform is untouched.
    pub fn clear(&mut self) {
        self.connections.clear();
        self.nodes.clear();
        self.names.clear();
        self.selection.clear();
    }

    /// Discard the current contents and regenerate the graph from the
    /// rig's component list and recorded input connections.
    ///
    /// Any failure (for instance the rig carrying two components with
    /// the same decorated name) aborts and leaves the graph empty rather
    /// than half-populated.
    pub fn rebuild_from_rig(&mut self, rig: &Rig) -> Result<(), GraphError> {
        self.clear();
        if let Err(err) = self.populate_from_rig(rig) {
            self.clear();
            return Err(err);
        }
        tracing::info!(
            nodes = self.nodes.len(),
            connections = self.connections.len(),
            "rebuilt graph from rig"
        );
        Ok(())
    }

    fn populate_from_rig(&mut self, rig: &Rig) -> Result<(), GraphError> {
        for (id, _) in rig.children() {
            self.add_node(rig, id)?;
        }
        for (_, component) in rig.children() {
            for input in component.inputs() {
                let Some(source) = input.connection() else {
                    continue;
                };
                let source_component = rig
                    .component(source.component)
                    .ok_or(GraphError::ComponentNotFound(source.component))?;
                let source_address =
                    format!("{}.{}", source_component.decorated_name(), source.output);
                let target_address = format!("{}.{}", component.decorated_name(), input.name);
                self.connect(&source_address, &target_address)?;
            }
        }
        Ok(())
    }

    /// The scale and pan applied to the canvas.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Mutable view transform.
    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigweave_rig::{ComponentRegistry, ComponentSpec, PortDecl};

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register(ComponentSpec {
            class: "clavicle".into(),
            inputs: vec![PortDecl::new("spineEnd", PortType::Xfo)],
            outputs: vec![PortDecl::new("clavicleEnd", PortType::Xfo)],
        });
        registry.register(ComponentSpec {
            class: "arm".into(),
            inputs: vec![
                PortDecl::new("clavicleEnd", PortType::Xfo),
                PortDecl::new("drawDebug", PortType::Boolean),
            ],
            outputs: vec![PortDecl::new("wristEnd", PortType::Xfo)],
        });
        registry
    }

    fn add_component(
        rig: &mut Rig,
        registry: &ComponentRegistry,
        class: &str,
        name: &str,
        location: &str,
        pos: [f32; 2],
    ) -> ComponentId {
        let mut component = registry.create(class, name, location).unwrap();
        component.set_graph_pos(pos);
        rig.add_child(component)
    }

    #[test]
    fn test_add_node_rejects_duplicate_names() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let first = add_component(&mut rig, &registry, "arm", "arm", "L", [0.0, 0.0]);
        let second = add_component(&mut rig, &registry, "arm", "arm", "L", [50.0, 0.0]);

        graph.add_node(&rig, first).unwrap();
        assert!(matches!(
            graph.add_node(&rig, second),
            Err(GraphError::DuplicateName(name)) if name == "arm_L"
        ));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_node_rejects_separator_in_name() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let bad = add_component(&mut rig, &registry, "arm", "arm.upper", "L", [0.0, 0.0]);
        assert!(matches!(
            graph.add_node(&rig, bad),
            Err(GraphError::InvalidNodeName(_))
        ));
    }

    #[test]
    fn test_rename_collision_leaves_both_names() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [0.0, 0.0]);
        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        graph.add_node(&rig, arm).unwrap();
        graph.add_node(&rig, clav).unwrap();

        assert!(matches!(
            graph.rename_node("arm_L", "clavicle_L"),
            Err(GraphError::DuplicateName(_))
        ));
        assert!(graph.node_by_name("arm_L").is_some());
        assert!(graph.node_by_name("clavicle_L").is_some());

        // Renaming a node to its own name is a no-op, not a collision.
        graph.rename_node("arm_L", "arm_L").unwrap();
    }

    #[test]
    fn test_rename_keeps_connections_valid() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        graph.add_node(&rig, clav).unwrap();
        graph.add_node(&rig, arm).unwrap();

        let connection = graph
            .connect("clavicle_L.clavicleEnd", "arm_L.clavicleEnd")
            .unwrap();
        graph.rename_node("arm_L", "armUpper_L").unwrap();

        assert!(graph.connection(connection).is_some());
        let node = graph.node_by_name("armUpper_L").unwrap();
        assert!(node.input("clavicleEnd").unwrap().is_connected());
    }

    #[test]
    fn test_connect_replaces_prior_input_connection() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let left = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let right = add_component(&mut rig, &registry, "clavicle", "clavicle", "R", [0.0, 80.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        graph.add_node(&rig, left).unwrap();
        graph.add_node(&rig, right).unwrap();
        graph.add_node(&rig, arm).unwrap();

        let first = graph
            .connect("clavicle_L.clavicleEnd", "arm_L.clavicleEnd")
            .unwrap();
        let second = graph
            .connect("clavicle_R.clavicleEnd", "arm_L.clavicleEnd")
            .unwrap();

        assert_eq!(graph.connection_count(), 1);
        assert!(graph.connection(first).is_none());
        let input = graph.node_by_name("arm_L").unwrap().input("clavicleEnd").unwrap();
        assert_eq!(input.connection(), Some(second));
    }

    #[test]
    fn test_connect_resolution_errors_name_the_lookup() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [0.0, 0.0]);
        graph.add_node(&rig, arm).unwrap();

        assert!(matches!(
            graph.connect("ghost_L.out", "arm_L.clavicleEnd"),
            Err(GraphError::NodeNotFound(name)) if name == "ghost_L"
        ));
        assert!(matches!(
            graph.connect("arm_L.missing", "arm_L.clavicleEnd"),
            Err(GraphError::PortNotFound { node, port, .. }) if node == "arm_L" && port == "missing"
        ));
        assert!(matches!(
            graph.connect("arm_L.wristEnd", "arm_L.missing"),
            Err(GraphError::PortNotFound { direction: PortDirection::Input, .. })
        ));
        assert!(matches!(
            graph.connect("arm_L", "arm_L.clavicleEnd"),
            Err(GraphError::MalformedAddress(_))
        ));
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_connect_rejects_type_mismatch() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        graph.add_node(&rig, clav).unwrap();
        graph.add_node(&rig, arm).unwrap();

        assert!(matches!(
            graph.connect("clavicle_L.clavicleEnd", "arm_L.drawDebug"),
            Err(GraphError::TypeMismatch { .. })
        ));
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_remove_node_cascades_connections() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm_l = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        let arm_r = add_component(&mut rig, &registry, "arm", "arm", "R", [100.0, 80.0]);
        let clav_node = graph.add_node(&rig, clav).unwrap();
        graph.add_node(&rig, arm_l).unwrap();
        graph.add_node(&rig, arm_r).unwrap();

        graph
            .connect("clavicle_L.clavicleEnd", "arm_L.clavicleEnd")
            .unwrap();
        graph
            .connect("clavicle_L.clavicleEnd", "arm_R.clavicleEnd")
            .unwrap();
        assert_eq!(graph.connection_count(), 2);

        graph.remove_node(&mut rig, clav_node).unwrap();

        assert_eq!(graph.connection_count(), 0);
        assert!(graph.node_by_name("clavicle_L").is_none());
        assert!(rig.component(clav).is_none());
        assert!(graph.connections().all(|c| !c.involves_node(clav_node)));
        let input = graph.node_by_name("arm_L").unwrap().input("clavicleEnd").unwrap();
        assert!(!input.is_connected());

        assert!(matches!(
            graph.remove_node(&mut rig, clav_node),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_example_scenario() {
        // Graph has A (output `out`) and B (input `in`), both transforms.
        let mut registry = ComponentRegistry::new();
        registry.register(ComponentSpec {
            class: "source".into(),
            inputs: vec![],
            outputs: vec![PortDecl::new("out", PortType::Xfo)],
        });
        registry.register(ComponentSpec {
            class: "sink".into(),
            inputs: vec![PortDecl::new("in", PortType::Xfo)],
            outputs: vec![],
        });

        let mut rig = Rig::new();
        let mut graph = Graph::new();
        let a = add_component(&mut rig, &registry, "source", "A", "M", [0.0, 0.0]);
        let b = add_component(&mut rig, &registry, "sink", "B", "M", [100.0, 0.0]);
        let a_node = graph.add_node(&rig, a).unwrap();
        graph.add_node(&rig, b).unwrap();

        graph.connect("A_M.out", "B_M.in").unwrap();
        assert_eq!(graph.connection_count(), 1);

        graph.remove_node(&mut rig, a_node).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.node_by_name("B_M").is_some());
    }

    #[test]
    fn test_disconnect_detaches_both_ports() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        graph.add_node(&rig, clav).unwrap();
        graph.add_node(&rig, arm).unwrap();

        let connection = graph
            .connect("clavicle_L.clavicleEnd", "arm_L.clavicleEnd")
            .unwrap();
        assert!(graph.disconnect(connection).is_some());

        assert_eq!(graph.connection_count(), 0);
        let output = graph.node_by_name("clavicle_L").unwrap().output("clavicleEnd").unwrap();
        let input = graph.node_by_name("arm_L").unwrap().input("clavicleEnd").unwrap();
        assert!(!output.is_connected());
        assert!(!input.is_connected());
        assert!(graph.disconnect(connection).is_none());
    }

    #[test]
    fn test_remove_selected() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        let clav_node = graph.add_node(&rig, clav).unwrap();
        let arm_node = graph.add_node(&rig, arm).unwrap();

        graph.select(clav_node, false).unwrap();
        graph.select(arm_node, false).unwrap();
        graph.remove_selected(&mut rig).unwrap();

        assert_eq!(graph.node_count(), 0);
        assert!(graph.selection().is_empty());
        assert_eq!(rig.component_count(), 0);
    }

    #[test]
    fn test_selection_symmetry() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        let clav_node = graph.add_node(&rig, clav).unwrap();
        let arm_node = graph.add_node(&rig, arm).unwrap();

        graph.select(clav_node, false).unwrap();
        let before = graph.selection().to_vec();

        graph.select(arm_node, false).unwrap();
        assert!(graph.node(arm_node).unwrap().selected());
        graph.deselect(arm_node).unwrap();

        assert_eq!(graph.selection(), before);
        assert!(!graph.node(arm_node).unwrap().selected());
    }

    #[test]
    fn test_selection_membership_is_enforced() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [0.0, 0.0]);
        let node = graph.add_node(&rig, arm).unwrap();

        graph.select(node, false).unwrap();
        assert!(matches!(
            graph.select(node, false),
            Err(GraphError::AlreadySelected(_))
        ));

        graph.deselect(node).unwrap();
        assert!(matches!(
            graph.deselect(node),
            Err(GraphError::NotSelected(_))
        ));
    }

    #[test]
    fn test_exclusive_select_clears_first() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        let clav_node = graph.add_node(&rig, clav).unwrap();
        let arm_node = graph.add_node(&rig, arm).unwrap();

        graph.select(clav_node, false).unwrap();
        graph.select(arm_node, true).unwrap();

        assert_eq!(graph.selection(), [arm_node]);
        assert!(!graph.node(clav_node).unwrap().selected());
    }

    #[test]
    fn test_selection_anchor_is_leftmost_topmost() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [50.0, -20.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [-10.0, 40.0]);
        let clav_node = graph.add_node(&rig, clav).unwrap();
        let arm_node = graph.add_node(&rig, arm).unwrap();

        assert!(graph.selection_anchor().is_none());
        graph.select(clav_node, false).unwrap();
        graph.select(arm_node, false).unwrap();
        assert_eq!(graph.selection_anchor(), Some([-10.0, -20.0]));
    }

    #[test]
    fn test_rebuild_from_rig_derives_recorded_topology() {
        let registry = registry();
        let mut rig = Rig::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        rig.component_mut(arm)
            .unwrap()
            .input_by_name_mut("clavicleEnd")
            .unwrap()
            .set_connection(rigweave_rig::InputSource {
                component: clav,
                output: "clavicleEnd".into(),
            });

        let mut graph = Graph::new();
        graph.rebuild_from_rig(&rig).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 1);
        let input = graph.node_by_name("arm_L").unwrap().input("clavicleEnd").unwrap();
        assert!(input.is_connected());

        // Rebuilding again replaces the previous view wholesale.
        graph.rebuild_from_rig(&rig).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_rebuild_failure_leaves_graph_empty() {
        let registry = registry();
        let mut rig = Rig::new();
        add_component(&mut rig, &registry, "arm", "arm", "L", [0.0, 0.0]);
        add_component(&mut rig, &registry, "arm", "arm", "L", [50.0, 0.0]);

        let mut graph = Graph::new();
        assert!(matches!(
            graph.rebuild_from_rig(&rig),
            Err(GraphError::DuplicateName(_))
        ));
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.selection().is_empty());
    }

    #[test]
    fn test_clear() {
        let registry = registry();
        let mut rig = Rig::new();
        let mut graph = Graph::new();

        let clav = add_component(&mut rig, &registry, "clavicle", "clavicle", "L", [0.0, 0.0]);
        let arm = add_component(&mut rig, &registry, "arm", "arm", "L", [100.0, 0.0]);
        let clav_node = graph.add_node(&rig, clav).unwrap();
        graph.add_node(&rig, arm).unwrap();
        graph
            .connect("clavicle_L.clavicleEnd", "arm_L.clavicleEnd")
            .unwrap();
        graph.select(clav_node, false).unwrap();

        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.selection().is_empty());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("arm_L.wristEnd").unwrap(), ("arm_L", "wristEnd"));
        assert!(parse_address("arm_L").is_err());
        assert!(parse_address("arm.upper.wristEnd").is_err());
        assert!(parse_address(".wristEnd").is_err());
        assert!(parse_address("arm_L.").is_err());
    }
}
