// SPDX-License-Identifier: MIT OR Apache-2.0
//! Component graph engine for Rigweave.
//!
//! This crate manages the visual graph of a rig-editing session:
//! - Nodes wrapping rig components, with typed input/output ports
//! - Directed connections, validated and owned by the graph
//! - Selection, marquee and pan interaction sessions
//! - Framing and the canvas view transform
//! - Copy/paste with left/right mirroring
//! - A linear undo/redo command log
//!
//! ## Architecture
//!
//! The graph is always a *view* of the rig's recorded connection state:
//! it is rebuilt wholesale from the rig and delegates structural edits
//! (such as removing a component) back to it. Nodes, ports and
//! connections reference each other through ids into graph-owned
//! tables; address strings like `"arm_L.wristEnd"` are a wire and
//! clipboard representation only.

pub mod clipboard;
pub mod connection;
pub mod graph;
pub mod history;
pub mod interaction;
pub mod layout;
pub mod node;
pub mod port;

pub use clipboard::{ClipboardRecord, ConnectionRecord, PasteOptions};
pub use connection::{Connection, ConnectionId};
pub use graph::{Graph, GraphError};
pub use history::{Command, CommandLog, HistoryError, SelectionChangeCommand};
pub use interaction::{MarqueeSession, PanSession, SelectionChange};
pub use layout::ViewTransform;
pub use node::{Node, NodeId};
pub use port::{Port, PortDirection, PortId};
