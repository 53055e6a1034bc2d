// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rig object tree for Rigweave.
//!
//! This crate holds the ground truth the graph engine derives its view
//! from:
//! - Components with named, typed input/output ports
//! - Recorded input connections (which output feeds which input)
//! - The component class registry
//! - Mirror-map configuration for mirrored paste
//!
//! Component anatomy (how a neck or FK chain places its joints) is out
//! of scope here; components carry an opaque payload for that layer.

pub mod component;
pub mod config;
pub mod port;
pub mod registry;
pub mod rig;

pub use component::{Component, ComponentData, ComponentId};
pub use config::RigConfig;
pub use port::{ComponentInput, ComponentOutput, InputSource, PortType};
pub use registry::{ComponentRegistry, ComponentSpec, PortDecl};
pub use rig::Rig;
