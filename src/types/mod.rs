//! Document model produced by the parser.
//!
//! - `Document` / `Module` - the output tree
//! - `NodeId` / `NodeRef` / `NodeArena` - node identities and deferred references
//! - `NodeDefaults`, `BeamDefaults`, `Inertia`, ... - default snapshots captured by records
//! - one record struct per section kind, grouped by area

mod aero;
mod cameras;
mod defaults;
mod document;
mod engine;
mod meta;
mod node;
mod physics;
mod visuals;
mod wheels;

use serde::Serialize;

pub use aero::*;
pub use cameras::*;
pub use defaults::*;
pub use document::{Document, DocumentFlags, Module, ROOT_MODULE_NAME};
pub use engine::*;
pub use meta::*;
pub use node::{NodeArena, NodeId, NodeRange, NodeRef, NodeToken, RefFlags};
pub use physics::*;
pub use visuals::*;
pub use wheels::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}
