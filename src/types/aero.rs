//! Aircraft and boat propulsion, wings.

use serde::Serialize;

use super::node::NodeRef;
use super::Vec3;

/// Control surface letter of a wing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WingControl {
    /// `n`
    #[default]
    None,
    /// `a`
    RightAileron,
    /// `b`
    LeftAileron,
    /// `f`
    Flap,
    /// `e`
    Elevator,
    /// `r`
    Rudder,
    /// `S`
    RightHandStabilator,
    /// `T`
    LeftHandStabilator,
    /// `c`
    RightElevonAileron,
    /// `d`
    LeftElevonAileron,
    /// `g`
    RightFlaperon,
    /// `h`
    LeftFlaperon,
    /// `U`
    RightHandTailerons,
    /// `V`
    LeftHandTailerons,
    /// `i`
    RightRudderVator,
    /// `j`
    LeftRudderVator,
}

impl WingControl {
    pub const LEGAL_CHARS: &'static str = "nabferSTcdghUVij";

    pub fn from_char(c: char) -> Option<Self> {
        let control = match c {
            'n' => WingControl::None,
            'a' => WingControl::RightAileron,
            'b' => WingControl::LeftAileron,
            'f' => WingControl::Flap,
            'e' => WingControl::Elevator,
            'r' => WingControl::Rudder,
            'S' => WingControl::RightHandStabilator,
            'T' => WingControl::LeftHandStabilator,
            'c' => WingControl::RightElevonAileron,
            'd' => WingControl::LeftElevonAileron,
            'g' => WingControl::RightFlaperon,
            'h' => WingControl::LeftFlaperon,
            'U' => WingControl::RightHandTailerons,
            'V' => WingControl::LeftHandTailerons,
            'i' => WingControl::RightRudderVator,
            'j' => WingControl::LeftRudderVator,
            _ => return None,
        };
        Some(control)
    }
}

/// `wings`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wing {
    pub nodes: [NodeRef; 8],
    pub tex_coords: [f32; 8],
    pub control_surface: WingControl,
    pub chord_point: Option<f32>,
    pub min_deflection: Option<f32>,
    pub max_deflection: Option<f32>,
    pub airfoil: Option<String>,
    pub efficacy_coef: Option<f32>,
}

/// `airbrakes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airbrake {
    pub reference_node: NodeRef,
    pub x_axis_node: NodeRef,
    pub y_axis_node: NodeRef,
    pub additional_node: NodeRef,
    pub offset: Vec3,
    pub width: f32,
    pub height: f32,
    pub max_inclination_angle: f32,
    pub texcoord_x1: f32,
    pub texcoord_y1: f32,
    pub texcoord_x2: f32,
    pub texcoord_y2: f32,
}

/// `turboprops` / `turboprops2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turboprop2 {
    /// 1 for `turboprops`, 2 for `turboprops2`.
    pub format_version: u8,
    pub reference_node: NodeRef,
    pub axis_node: NodeRef,
    /// The first two are mandatory.
    pub blade_tip_nodes: [Option<NodeRef>; 4],
    pub couple_node: Option<NodeRef>,
    pub turbine_power_kw: f32,
    pub airfoil: String,
}

/// `pistonprops`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pistonprop {
    pub reference_node: NodeRef,
    pub axis_node: NodeRef,
    pub blade_tip_nodes: [Option<NodeRef>; 4],
    pub couple_node: Option<NodeRef>,
    pub turbine_power_kw: f32,
    pub pitch: f32,
    pub airfoil: String,
}

/// `turbojets`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turbojet {
    pub front_node: NodeRef,
    pub back_node: NodeRef,
    pub side_node: NodeRef,
    pub is_reversable: bool,
    pub dry_thrust: f32,
    pub wet_thrust: f32,
    pub front_diameter: f32,
    pub back_diameter: f32,
    pub nozzle_length: f32,
}

/// `screwprops`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screwprop {
    pub prop_node: NodeRef,
    pub back_node: NodeRef,
    pub top_node: NodeRef,
    pub power: f32,
}

/// `fusedrag`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fusedrag {
    pub front_node: NodeRef,
    pub rear_node: NodeRef,
    /// Area computed from the vehicle's bounding box.
    pub autocalc: bool,
    /// Only without `autocalc`.
    pub approximate_width: Option<f32>,
    /// Only with `autocalc`.
    pub area_coefficient: Option<f32>,
    pub airfoil_name: Option<String>,
}
