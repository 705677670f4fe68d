//! Soft-body structure records: nodes, beams and everything beam-like.

use std::rc::Rc;

use serde::Serialize;

use super::defaults::{BeamDefaults, DefaultMinimass, Inertia, NodeDefaults, NodeOptions};
use super::node::{NodeId, NodeRef};
use super::Vec3;

/// `nodes` / `nodes2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec3,
    pub options: NodeOptions,
    /// Only accepted together with option `l`.
    pub load_weight_override: Option<f32>,
    pub node_defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub default_minimass: Option<Rc<DefaultMinimass>>,
    pub detacher_group: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct BeamOptions: u32 {
        const INVISIBLE = 1 << 0;
        const ROPE = 1 << 1;
        const SUPPORT = 1 << 2;
    }
}

/// `beams`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Beam {
    pub nodes: [NodeRef; 2],
    pub options: BeamOptions,
    /// Only for support beams (`s`).
    pub extension_break_limit: Option<f32>,
    pub defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct ShockOptions: u32 {
        const INVISIBLE = 1 << 0;
        const METRIC = 1 << 1;
        const ACTIVE_RIGHT = 1 << 2;
        const ACTIVE_LEFT = 1 << 3;
    }
}

/// `shocks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shock {
    pub nodes: [NodeRef; 2],
    pub spring_rate: f32,
    pub damping: f32,
    pub short_bound: f32,
    pub long_bound: f32,
    pub precompression: f32,
    pub options: ShockOptions,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct Shock2Options: u32 {
        const INVISIBLE = 1 << 0;
        const METRIC = 1 << 1;
        const ABSOLUTE_METRIC = 1 << 2;
        const SOFT_BUMP_BOUNDS = 1 << 3;
    }
}

/// `shocks2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shock2 {
    pub nodes: [NodeRef; 2],
    pub spring_in: f32,
    pub damp_in: f32,
    pub progress_factor_spring_in: f32,
    pub progress_factor_damp_in: f32,
    pub spring_out: f32,
    pub damp_out: f32,
    pub progress_factor_spring_out: f32,
    pub progress_factor_damp_out: f32,
    pub short_bound: f32,
    pub long_bound: f32,
    pub precompression: f32,
    pub options: Shock2Options,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct Shock3Options: u32 {
        const INVISIBLE = 1 << 0;
        const METRIC = 1 << 1;
        const ABSOLUTE_METRIC = 1 << 2;
    }
}

/// `shocks3`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shock3 {
    pub nodes: [NodeRef; 2],
    pub spring_in: f32,
    pub damp_in: f32,
    pub damp_in_slow: f32,
    pub split_vel_in: f32,
    pub damp_in_fast: f32,
    pub spring_out: f32,
    pub damp_out: f32,
    pub damp_out_slow: f32,
    pub split_vel_out: f32,
    pub damp_out_fast: f32,
    pub short_bound: f32,
    pub long_bound: f32,
    pub precompression: f32,
    pub options: Shock3Options,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

/// `hydros`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hydro {
    pub nodes: [NodeRef; 2],
    pub lengthening_factor: f32,
    /// Option letters, kept verbatim.
    pub options: String,
    pub inertia: Inertia,
    pub inertia_defaults: Rc<Inertia>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct CommandOptions: u32 {
        /// `i`
        const INVISIBLE = 1 << 0;
        /// `r`
        const ROPE = 1 << 1;
        /// `f`
        const NOT_FASTER = 1 << 2;
        /// `c`
        const AUTO_CENTER = 1 << 3;
        /// `p`
        const ONE_PRESS = 1 << 4;
        /// `o`
        const ONE_PRESS_CENTER = 1 << 5;
    }
}

/// `commands` / `commands2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command2 {
    /// 1 for `commands`, 2 for `commands2`.
    pub format_version: u8,
    pub nodes: [NodeRef; 2],
    pub shorten_rate: f32,
    pub lengthen_rate: f32,
    pub max_contraction: f32,
    pub max_extension: f32,
    pub contract_key: i32,
    pub extend_key: i32,
    pub options: CommandOptions,
    pub description: String,
    pub inertia: Inertia,
    pub affect_engine: f32,
    pub needs_engine: bool,
    pub plays_sound: bool,
    pub beam_defaults: Rc<BeamDefaults>,
    pub inertia_defaults: Rc<Inertia>,
    pub detacher_group: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct AnimatorFlags: u64 {
        const VISIBLE = 1 << 0;
        const INVISIBLE = 1 << 1;
        const AIRSPEED = 1 << 2;
        const VERTICAL_VELOCITY = 1 << 3;
        const ALTIMETER_100K = 1 << 4;
        const ALTIMETER_10K = 1 << 5;
        const ALTIMETER_1K = 1 << 6;
        const ANGLE_OF_ATTACK = 1 << 7;
        const FLAP = 1 << 8;
        const AIR_BRAKE = 1 << 9;
        const ROLL = 1 << 10;
        const PITCH = 1 << 11;
        const BRAKES = 1 << 12;
        const ACCEL = 1 << 13;
        const CLUTCH = 1 << 14;
        const SPEEDO = 1 << 15;
        const TACHO = 1 << 16;
        const TURBO = 1 << 17;
        const PARKING = 1 << 18;
        const SHIFT_LEFT_RIGHT = 1 << 19;
        const SHIFT_BACK_FORTH = 1 << 20;
        const SEQUENTIAL_SHIFT = 1 << 21;
        const GEAR_SELECT = 1 << 22;
        const TORQUE = 1 << 23;
        const DIFFLOCK = 1 << 24;
        const BOAT_RUDDER = 1 << 25;
        const BOAT_THROTTLE = 1 << 26;
        const SHORT_LIMIT = 1 << 27;
        const LONG_LIMIT = 1 << 28;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct AeroAnimatorFlags: u32 {
        const THROTTLE = 1 << 0;
        const RPM = 1 << 1;
        const TORQUE = 1 << 2;
        const PITCH = 1 << 3;
        const STATUS = 1 << 4;
    }
}

/// Aircraft engine binding of an animator (`throttle1`, `rpm2`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AeroAnimator {
    pub flags: AeroAnimatorFlags,
    /// Zero-based engine index.
    pub engine_idx: u32,
}

/// `animators`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animator {
    pub nodes: [NodeRef; 2],
    pub lengthening_factor: f32,
    pub flags: AnimatorFlags,
    pub short_limit: f32,
    pub long_limit: f32,
    pub aero_animator: AeroAnimator,
    pub inertia_defaults: Rc<Inertia>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

/// `rotators` / `rotators2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rotator {
    pub axis_nodes: [NodeRef; 2],
    pub base_plate_nodes: [NodeRef; 4],
    pub rotating_plate_nodes: [NodeRef; 4],
    pub rate: f32,
    pub spin_left_key: i32,
    pub spin_right_key: i32,
    /// `rotators2` only.
    pub rotating_force: Option<f32>,
    /// `rotators2` only.
    pub tolerance: Option<f32>,
    pub description: String,
    pub inertia: Inertia,
    pub inertia_defaults: Rc<Inertia>,
    pub engine_coupling: f32,
    pub needs_engine: bool,
}

/// `ropes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rope {
    pub root_node: NodeRef,
    pub end_node: NodeRef,
    pub invisible: bool,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

/// `ropables`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ropable {
    pub node: NodeRef,
    pub group: i32,
    pub has_multilock: bool,
}

/// `ties`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tie {
    pub root_node: NodeRef,
    pub max_reach_length: f32,
    pub auto_shorten_rate: f32,
    pub min_length: f32,
    pub max_length: f32,
    pub is_invisible: bool,
    pub disable_self_lock: bool,
    pub max_stress: f32,
    pub group: i32,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

impl Tie {
    pub const DEFAULT_MAX_STRESS: f32 = 100_000.0;
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct TriggerOptions: u32 {
        /// `i`
        const INVISIBLE = 1 << 0;
        /// `c`
        const COMMAND_STYLE = 1 << 1;
        /// `x`
        const START_OFF = 1 << 2;
        /// `b`
        const BLOCK_KEYS = 1 << 3;
        /// `B`
        const BLOCK_TRIGGERS = 1 << 4;
        /// `A`
        const INV_BLOCK_TRIGGERS = 1 << 5;
        /// `s`
        const SWITCH_CMD_NUM = 1 << 6;
        /// `h`
        const UNLOCK_HOOKGROUPS_KEY = 1 << 7;
        /// `H`
        const LOCK_HOOKGROUPS_KEY = 1 << 8;
        /// `t`
        const CONTINUOUS = 1 << 9;
        /// `E`
        const ENGINE_TRIGGER = 1 << 10;
    }
}

/// What a trigger does when one of its bounds is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerAction {
    CommandKeys { contraction_key: i32, extension_key: i32 },
    HookToggle { contraction_hookgroup: i32, extension_hookgroup: i32 },
    Engine { function: i32, motor_index: i32 },
}

/// `triggers`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trigger {
    pub nodes: [NodeRef; 2],
    pub contraction_trigger_limit: f32,
    pub expansion_trigger_limit: f32,
    pub options: TriggerOptions,
    pub boundary_timer: f32,
    pub action: TriggerAction,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

impl Trigger {
    pub const DEFAULT_BOUNDARY_TIMER: f32 = 1.0;
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct SlideConstraints: u32 {
        /// `Ca`
        const ATTACH_ALL = 1 << 0;
        /// `Cf`
        const ATTACH_FOREIGN = 1 << 1;
        /// `Cs`
        const ATTACH_SELF = 1 << 2;
        /// `Cn`
        const ATTACH_NONE = 1 << 3;
    }
}

/// `slidenodes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideNode {
    pub slide_node: NodeRef,
    pub rail_nodes: Vec<NodeRef>,
    pub spring_rate: Option<f32>,
    pub break_force: Option<f32>,
    pub tolerance: Option<f32>,
    pub attachment_rate: Option<f32>,
    pub railgroup_id: Option<i32>,
    pub max_attach_dist: Option<f32>,
    pub constraint_flags: SlideConstraints,
}

/// `railgroups`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailGroup {
    pub id: i32,
    pub node_list: Vec<NodeRef>,
}

/// `hooks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hook {
    pub node: NodeRef,
    pub hook_range: f32,
    pub speed_coef: f32,
    pub max_force: f32,
    pub timer: f32,
    pub hookgroup: i32,
    pub lockgroup: i32,
    pub min_range_meters: f32,
    pub self_lock: bool,
    pub auto_lock: bool,
    pub no_disable: bool,
    pub no_rope: bool,
    pub visible: bool,
}

impl Hook {
    pub fn new(node: NodeRef) -> Self {
        Self {
            node,
            hook_range: 0.4,
            speed_coef: 1.0,
            max_force: 10_000_000.0,
            timer: 5.0,
            hookgroup: -1,
            lockgroup: -1,
            min_range_meters: 0.0,
            self_lock: false,
            auto_lock: false,
            no_disable: false,
            no_rope: false,
            visible: false,
        }
    }
}

/// `lockgroups`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lockgroup {
    pub number: i32,
    pub nodes: Vec<NodeRef>,
}

/// `collisionboxes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionBox {
    pub nodes: Vec<NodeRef>,
}

/// Option letter of `minimass`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MinimassOption {
    /// `l` - skip loaded nodes
    SkipLoaded,
    /// `n` - no effect
    #[default]
    Dummy,
}

/// `minimass`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Minimass {
    pub global_min_mass_kg: f32,
    pub option: MinimassOption,
}

/// `globals`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Globals {
    pub dry_mass: f32,
    pub cargo_mass: f32,
    pub material_name: Option<String>,
}
