//! Camera definitions.

use std::rc::Rc;

use serde::Serialize;

use super::defaults::{BeamDefaults, NodeDefaults};
use super::node::NodeRef;
use super::Vec3;

/// `cameras`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    pub center_node: NodeRef,
    pub back_node: NodeRef,
    pub left_node: NodeRef,
}

/// `camerarail`, one node per line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CameraRail {
    pub nodes: Vec<NodeRef>,
}

/// `cinecam`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cinecam {
    pub position: Vec3,
    pub nodes: [NodeRef; 8],
    pub spring: f32,
    pub damping: f32,
    pub node_mass: f32,
    pub node_defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
}

impl Cinecam {
    pub const DEFAULT_SPRING: f32 = 8000.0;
    pub const DEFAULT_DAMPING: f32 = 800.0;
    pub const DEFAULT_NODE_MASS: f32 = 20.0;
}

/// `extcamera`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ExtCamera {
    #[default]
    Classic,
    Cinecam,
    Node(NodeRef),
}

/// `videocamera`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCamera {
    pub reference_node: NodeRef,
    pub left_node: NodeRef,
    pub bottom_node: NodeRef,
    pub alt_reference_node: Option<NodeRef>,
    pub alt_orientation_node: Option<NodeRef>,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub field_of_view: f32,
    pub texture_width: i32,
    pub texture_height: i32,
    pub min_clip_distance: f32,
    pub max_clip_distance: f32,
    pub camera_role: i32,
    pub camera_mode: i32,
    pub material_name: String,
    pub camera_name: Option<String>,
}
