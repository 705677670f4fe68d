//! Wheels and driveline layout.

use std::rc::Rc;

use serde::Serialize;

use super::defaults::{BeamDefaults, NodeDefaults};
use super::node::NodeRef;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WheelBraking {
    #[default]
    None,
    FootHand,
    FootHandSkidLeft,
    FootHandSkidRight,
    FootOnly,
}

impl WheelBraking {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(WheelBraking::None),
            1 => Some(WheelBraking::FootHand),
            2 => Some(WheelBraking::FootHandSkidLeft),
            3 => Some(WheelBraking::FootHandSkidRight),
            4 => Some(WheelBraking::FootOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WheelPropulsion {
    #[default]
    None,
    Forward,
    Backward,
}

impl WheelPropulsion {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(WheelPropulsion::None),
            1 => Some(WheelPropulsion::Forward),
            2 => Some(WheelPropulsion::Backward),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WheelSide {
    #[default]
    Left,
    Right,
}

/// Attributes every wheel flavour shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelBase {
    pub width: f32,
    pub num_rays: u32,
    pub nodes: [NodeRef; 2],
    pub rigidity_node: Option<NodeRef>,
    pub braking: WheelBraking,
    pub propulsion: WheelPropulsion,
    pub reference_arm_node: NodeRef,
    pub mass: f32,
    pub node_defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
}

impl WheelBase {
    /// Most rays a single wheel line may declare.
    pub const MAX_RAYS: u32 = 1000;
}

/// `wheels`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wheel {
    pub base: WheelBase,
    pub radius: f32,
    pub springiness: f32,
    pub damping: f32,
    pub face_material_name: String,
    pub band_material_name: String,
}

/// `wheels2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wheel2 {
    pub base: WheelBase,
    pub rim_radius: f32,
    pub tyre_radius: f32,
    pub rim_springiness: f32,
    pub rim_damping: f32,
    pub tyre_springiness: f32,
    pub tyre_damping: f32,
    pub face_material_name: String,
    pub band_material_name: String,
}

/// `meshwheels` / `meshwheels2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshWheel {
    pub base: WheelBase,
    pub is_meshwheel2: bool,
    pub tyre_radius: f32,
    pub rim_radius: f32,
    pub spring: f32,
    pub damping: f32,
    pub side: WheelSide,
    pub mesh_name: String,
    pub material_name: String,
}

/// `flexbodywheels`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexBodyWheel {
    pub base: WheelBase,
    pub tyre_radius: f32,
    pub rim_radius: f32,
    pub tyre_springiness: f32,
    pub tyre_damping: f32,
    pub rim_springiness: f32,
    pub rim_damping: f32,
    pub side: WheelSide,
    pub rim_mesh_name: String,
    pub tyre_mesh_name: String,
}

/// `wheeldetachers`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelDetacher {
    pub wheel_id: i32,
    pub detacher_group: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifferentialType {
    /// `o`
    Open,
    /// `l`
    Locked,
    /// `s`
    Split,
    /// `v`
    Viscous,
}

impl DifferentialType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(DifferentialType::Open),
            'l' => Some(DifferentialType::Locked),
            's' => Some(DifferentialType::Split),
            'v' => Some(DifferentialType::Viscous),
            _ => None,
        }
    }
}

/// `axles`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axle {
    /// Node pairs of wheel 1 and wheel 2.
    pub wheels: [Option<[NodeRef; 2]>; 2],
    pub options: Vec<DifferentialType>,
}

/// `interaxles`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterAxle {
    /// Zero-based axle indices.
    pub a1: i32,
    pub a2: i32,
    pub options: Vec<DifferentialType>,
}

/// `transfercase`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferCase {
    /// Zero-based axle indices; `a2` is -1 when absent.
    pub a1: i32,
    pub a2: i32,
    pub has_2wd: bool,
    pub has_2wd_lo: bool,
    pub gear_ratios: Vec<f32>,
}
