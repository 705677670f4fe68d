//! Engine, transmission and driving aids.

use serde::Serialize;

/// `engine`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engine {
    pub shift_down_rpm: f32,
    pub shift_up_rpm: f32,
    pub torque: f32,
    pub global_gear_ratio: f32,
    pub reverse_gear_ratio: f32,
    pub neutral_gear_ratio: f32,
    /// Forward gears, without the terminating negative value.
    pub gear_ratios: Vec<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EngineType {
    /// `t`
    #[default]
    Truck,
    /// `c`
    Car,
    /// `e`
    Electric,
}

/// `engoption`. Unset values are left to the simulation's defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engoption {
    pub inertia: f32,
    pub engine_type: EngineType,
    pub clutch_force: Option<f32>,
    pub shift_time: Option<f32>,
    pub clutch_time: Option<f32>,
    pub post_shift_time: Option<f32>,
    pub stall_rpm: Option<f32>,
    pub idle_rpm: Option<f32>,
    pub max_idle_mixture: Option<f32>,
    pub min_idle_mixture: Option<f32>,
    pub braking_torque: Option<f32>,
}

impl Engoption {
    pub const DEFAULT_INERTIA: f32 = 10.0;
}

/// `engturbo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engturbo {
    pub version: i32,
    pub tinertia_factor: f32,
    /// Clamped to 4.
    pub nturbos: i32,
    /// Turbo parameters 1 to 11, as many as were given.
    pub params: Vec<f32>,
}

impl Engturbo {
    pub const MAX_TURBOS: i32 = 4;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TorqueSample {
    pub power: f32,
    pub torque_percent: f32,
}

/// `torquecurve`. Either a predefined curve name or custom samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TorqueCurve {
    pub predefined_func_name: Option<String>,
    pub samples: Vec<TorqueSample>,
}

/// `brakes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brakes {
    pub default_braking_force: f32,
    pub parking_brake_force: Option<f32>,
}

/// Dashboard/toggle state shared by traction control and ABS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AidAttributes {
    pub no_dashboard: bool,
    pub no_toggle: bool,
    pub is_on: bool,
}

impl Default for AidAttributes {
    fn default() -> Self {
        Self {
            no_dashboard: false,
            no_toggle: false,
            is_on: true,
        }
    }
}

/// `TractionControl`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractionControl {
    pub regulation_force: f32,
    pub wheel_slip: f32,
    pub fade_speed: Option<f32>,
    pub pulse_per_sec: Option<f32>,
    pub attributes: AidAttributes,
}

/// `AntiLockBrakes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntiLockBrakes {
    pub regulation_force: f32,
    pub min_speed: i32,
    pub pulse_per_sec: Option<f32>,
    pub attributes: AidAttributes,
}

/// `cruisecontrol`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CruiseControl {
    pub min_speed: f32,
    pub autobrake: i32,
}

/// `SpeedLimiter`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedLimiter {
    pub max_speed: f32,
    pub is_enabled: bool,
}
