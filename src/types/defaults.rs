//! Default-value snapshots captured by records.
//!
//! These are plain values. The parser keeps the current link of each chain
//! behind an `Rc` and replaces it wholesale when a `set_*` directive is read,
//! so a record always sees the values that were current when it was created.

use serde::Serialize;

bitflags::bitflags! {
    /// Per-node option letters (`nodes`, `set_node_defaults`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct NodeOptions: u32 {
        /// `l` - load weight override
        const LOAD_WEIGHT = 1 << 0;
        /// `n` - mouse grab
        const MOUSE_GRAB = 1 << 1;
        /// `m` - no mouse grab
        const NO_MOUSE_GRAB = 1 << 2;
        /// `f` - no sparks
        const NO_SPARKS = 1 << 3;
        /// `x` - exhaust point
        const EXHAUST_POINT = 1 << 4;
        /// `y` - exhaust direction
        const EXHAUST_DIRECTION = 1 << 5;
        /// `c` - no ground contact
        const NO_GROUND_CONTACT = 1 << 6;
        /// `h` - hook point
        const HOOK_POINT = 1 << 7;
        /// `e` - terrain edit point
        const TERRAIN_EDIT_POINT = 1 << 8;
        /// `b` - extra buoyancy
        const EXTRA_BUOYANCY = 1 << 9;
        /// `p` - no particles
        const NO_PARTICLES = 1 << 10;
        /// `L` - log
        const LOG = 1 << 11;
    }
}

/// Defaults applied to nodes (`set_node_defaults`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDefaults {
    pub load_weight: f32,
    pub friction: f32,
    pub volume: f32,
    pub surface: f32,
    pub options: NodeOptions,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            load_weight: 10.0,
            friction: 1.0,
            volume: 1.0,
            surface: 1.0,
            options: NodeOptions::empty(),
        }
    }
}

/// Multipliers set by `set_beam_defaults_scale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamDefaultsScale {
    pub springiness: f32,
    pub damping_constant: f32,
    pub deformation_threshold_constant: f32,
    pub breaking_threshold_constant: f32,
}

impl Default for BeamDefaultsScale {
    fn default() -> Self {
        Self {
            springiness: 1.0,
            damping_constant: 1.0,
            deformation_threshold_constant: 1.0,
            breaking_threshold_constant: 1.0,
        }
    }
}

/// Defaults applied to beam-like records (`set_beam_defaults`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamDefaults {
    pub springiness: f32,
    pub damping_constant: f32,
    pub deformation_threshold: f32,
    pub breaking_threshold: f32,
    pub visual_beam_diameter: f32,
    pub beam_material_name: String,
    pub plastic_deform_coef: f32,
    pub scale: BeamDefaultsScale,
    /// State of `enable_advanced_deformation` when these defaults were set.
    pub enable_advanced_deformation: bool,
    /// Set by a `set_beam_defaults` line rather than seeded.
    pub is_user_defined: bool,
    pub is_plastic_deform_coef_user_defined: bool,
}

impl BeamDefaults {
    pub const DEFAULT_SPRING: f32 = 9_000_000.0;
    pub const DEFAULT_DAMP: f32 = 12_000.0;
    pub const DEFAULT_DEFORM: f32 = 400_000.0;
    pub const DEFAULT_BREAK: f32 = 1_000_000.0;
    pub const DEFAULT_DIAMETER: f32 = 0.05;
    pub const DEFAULT_MATERIAL: &'static str = "tracks/beam";
}

impl Default for BeamDefaults {
    fn default() -> Self {
        Self {
            springiness: Self::DEFAULT_SPRING,
            damping_constant: Self::DEFAULT_DAMP,
            deformation_threshold: Self::DEFAULT_DEFORM,
            breaking_threshold: Self::DEFAULT_BREAK,
            visual_beam_diameter: Self::DEFAULT_DIAMETER,
            beam_material_name: Self::DEFAULT_MATERIAL.to_string(),
            plastic_deform_coef: 0.0,
            scale: BeamDefaultsScale::default(),
            enable_advanced_deformation: false,
            is_user_defined: false,
            is_plastic_deform_coef_user_defined: false,
        }
    }
}

/// Start/stop inertia of actuators (`set_inertia_defaults`, optional trailing args).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inertia {
    pub start_delay_factor: f32,
    pub stop_delay_factor: f32,
    pub start_function: String,
    pub stop_function: String,
}

/// `set_default_minimass`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultMinimass {
    pub min_mass_kg: f32,
}

/// `set_managedmaterials_options`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManagedMaterialsOptions {
    pub double_sided: bool,
}
