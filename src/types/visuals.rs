//! Meshes, props, lights, materials and sound emitters.

use serde::Serialize;

use super::defaults::ManagedMaterialsOptions;
use super::node::{NodeRange, NodeRef};
use super::{Rgb, Vec3};

/// Which cameras a prop or flexbody is visible from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CameraMode {
    /// `-2`
    #[default]
    Always,
    /// `-1`
    External,
    /// Index of a cinecam.
    Cinecam(u32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SpecialProp {
    #[default]
    None,
    MirrorLeft,
    MirrorRight,
    DashboardLeft,
    DashboardRight,
    AeroPropSpin,
    AeroPropBlade,
    DriverSeat,
    DriverSeat2,
    Beacon,
    RedBeacon,
    Lightbar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeaconProp {
    pub flare_material_name: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardProp {
    pub mesh_name: Option<String>,
    pub offset: Option<Vec3>,
    pub rotation_angle: f32,
}

impl DashboardProp {
    pub const DEFAULT_ROTATION_ANGLE: f32 = 160.0;
}

impl Default for DashboardProp {
    fn default() -> Self {
        Self {
            mesh_name: None,
            offset: None,
            rotation_angle: Self::DEFAULT_ROTATION_ANGLE,
        }
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct AnimationMode: u32 {
        const ROTATION_X = 1 << 0;
        const ROTATION_Y = 1 << 1;
        const ROTATION_Z = 1 << 2;
        const OFFSET_X = 1 << 3;
        const OFFSET_Y = 1 << 4;
        const OFFSET_Z = 1 << 5;
        const AUTO_ANIMATE = 1 << 6;
        const NO_FLIP = 1 << 7;
        const BOUNCE = 1 << 8;
        const EVENT_LOCK = 1 << 9;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct AnimationSource: u64 {
        const AIRSPEED = 1 << 0;
        const VERTICAL_VELOCITY = 1 << 1;
        const ALTIMETER_100K = 1 << 2;
        const ALTIMETER_10K = 1 << 3;
        const ALTIMETER_1K = 1 << 4;
        const ANGLE_OF_ATTACK = 1 << 5;
        const FLAP = 1 << 6;
        const AIR_BRAKE = 1 << 7;
        const ROLL = 1 << 8;
        const PITCH = 1 << 9;
        const BRAKES = 1 << 10;
        const ACCEL = 1 << 11;
        const CLUTCH = 1 << 12;
        const SPEEDO = 1 << 13;
        const TACHO = 1 << 14;
        const TURBO = 1 << 15;
        const PARKING = 1 << 16;
        const SHIFT_LEFT_RIGHT = 1 << 17;
        const SHIFT_BACK_FORTH = 1 << 18;
        const SEQUENTIAL_SHIFT = 1 << 19;
        const SHIFTERLIN = 1 << 20;
        const TORQUE = 1 << 21;
        const HEADING = 1 << 22;
        const DIFFLOCK = 1 << 23;
        const BOAT_RUDDER = 1 << 24;
        const BOAT_THROTTLE = 1 << 25;
        const STEERING_WHEEL = 1 << 26;
        const AILERON = 1 << 27;
        const ELEVATOR = 1 << 28;
        const AIR_RUDDER = 1 << 29;
        const PERMANENT = 1 << 30;
        const EVENT = 1 << 31;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotorSourceKind {
    AeroThrottle,
    AeroRpm,
    AeroTorque,
    AeroPitch,
    AeroStatus,
}

/// Per-engine animation source (`throttle1`, `rpm2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotorSource {
    pub source: MotorSourceKind,
    pub motor: u32,
}

/// `add_animation`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Animation {
    pub ratio: f32,
    pub lower_limit: f32,
    pub upper_limit: f32,
    pub mode: AnimationMode,
    pub source: AnimationSource,
    pub motor_sources: Vec<MotorSource>,
    /// Upper-cased input event name.
    pub event: Option<String>,
}

/// `props`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prop {
    pub reference_node: NodeRef,
    pub x_axis_node: NodeRef,
    pub y_axis_node: NodeRef,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub mesh_name: String,
    pub special: SpecialProp,
    pub beacon: Option<BeaconProp>,
    pub dashboard: Option<DashboardProp>,
    pub animations: Vec<Animation>,
    pub camera_mode: CameraMode,
}

/// `flexbodies`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flexbody {
    pub reference_node: NodeRef,
    pub x_axis_node: NodeRef,
    pub y_axis_node: NodeRef,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub mesh_name: String,
    /// Filled by `forset`.
    pub node_list_to_import: Vec<NodeRange>,
    pub camera_mode: CameraMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FlareType {
    /// `f`
    #[default]
    Headlight,
    /// `b`
    BrakeLight,
    /// `l`
    BlinkerLeft,
    /// `r`
    BlinkerRight,
    /// `R`
    ReverseLight,
    /// `u`
    User,
    /// `d`
    Dashboard,
}

impl FlareType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(FlareType::Headlight),
            'b' => Some(FlareType::BrakeLight),
            'l' => Some(FlareType::BlinkerLeft),
            'r' => Some(FlareType::BlinkerRight),
            'R' => Some(FlareType::ReverseLight),
            'u' => Some(FlareType::User),
            'd' => Some(FlareType::Dashboard),
            _ => None,
        }
    }
}

/// `flares` / `flares2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flare2 {
    pub reference_node: NodeRef,
    pub node_axis_x: NodeRef,
    pub node_axis_y: NodeRef,
    /// `flares` lines have no z offset; it stays at 1.
    pub offset: Vec3,
    pub flare_type: FlareType,
    /// Only for user flares (`u`).
    pub control_number: Option<i32>,
    /// Only for dashboard flares (`d`).
    pub dashboard_link: Option<String>,
    pub blink_delay_milis: Option<i32>,
    pub size: Option<f32>,
    pub material_name: Option<String>,
}

/// `materialflarebindings`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialFlareBinding {
    pub flare_number: i32,
    pub material_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ManagedMaterialType {
    MeshStandard,
    MeshTransparent,
    FlexmeshStandard,
    FlexmeshTransparent,
}

impl ManagedMaterialType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mesh_standard" => Some(ManagedMaterialType::MeshStandard),
            "mesh_transparent" => Some(ManagedMaterialType::MeshTransparent),
            "flexmesh_standard" => Some(ManagedMaterialType::FlexmeshStandard),
            "flexmesh_transparent" => Some(ManagedMaterialType::FlexmeshTransparent),
            _ => None,
        }
    }

    pub fn is_flexmesh(self) -> bool {
        matches!(
            self,
            ManagedMaterialType::FlexmeshStandard | ManagedMaterialType::FlexmeshTransparent
        )
    }
}

/// `managedmaterials`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagedMaterial {
    pub name: String,
    pub kind: ManagedMaterialType,
    pub options: ManagedMaterialsOptions,
    pub diffuse_map: String,
    /// Flexmesh only.
    pub damaged_diffuse_map: Option<String>,
    pub specular_map: Option<String>,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct CabOptions: u32 {
        /// `c`
        const CONTACT = 1 << 0;
        /// `b`
        const BUOYANT = 1 << 1;
        /// `p`
        const TOUGHER = 1 << 2;
        /// `u`
        const INVULNERABLE = 1 << 3;
    }
}

/// One triangle of a `cab` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cab {
    pub nodes: [NodeRef; 3],
    pub options: CabOptions,
}

/// One line of a `texcoords` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Texcoord {
    pub node: NodeRef,
    pub u: f32,
    pub v: f32,
}

/// `submesh` with its `texcoords` and `cab` lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submesh {
    pub texcoords: Vec<Texcoord>,
    pub cab_triangles: Vec<Cab>,
    pub backmesh: bool,
}

/// `exhausts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exhaust {
    pub reference_node: NodeRef,
    pub direction_node: NodeRef,
    pub particle_name: Option<String>,
}

/// `particles`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub emitter_node: NodeRef,
    pub reference_node: NodeRef,
    pub particle_system_name: String,
}

/// `soundsources`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundSource {
    pub node: NodeRef,
    pub sound_script_name: String,
}

/// Where a `soundsources2` entry is audible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundSourceMode {
    /// `-2`
    Always,
    /// `-1`
    Outside,
    Cinecam(u32),
}

/// `soundsources2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundSource2 {
    pub node: NodeRef,
    pub mode: SoundSourceMode,
    pub sound_script_name: String,
}
