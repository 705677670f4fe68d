//! Engine, transmission and driving aids.

use crate::diagnostics::DiagnosticKind;
use crate::parser::keyword::Keyword;
use crate::parser::Parser;
use crate::types::{
    AidAttributes, AntiLockBrakes, Brakes, CruiseControl, Engine, EngineType, Engoption,
    Engturbo, SpeedLimiter, TorqueCurve, TorqueSample, TractionControl,
};

impl EngineType {
    fn from_char(c: char) -> Option<Self> {
        match c {
            't' => Some(EngineType::Truck),
            'c' => Some(EngineType::Car),
            'e' => Some(EngineType::Electric),
            _ => None,
        }
    }
}

/// Apply one `&` separated attribute of a `mode:` item.
///
/// Returns `false` for an attribute it does not know. Blank attributes are accepted.
fn apply_aid_attribute(attributes: &mut AidAttributes, attr: &str) -> bool {
    let attr = attr.trim().to_ascii_lowercase();
    if attr.starts_with("nodash") {
        attributes.no_dashboard = true;
    } else if attr.starts_with("notoggle") {
        attributes.no_toggle = true;
    } else if attr.starts_with("on") {
        attributes.is_on = true;
    } else if attr.starts_with("off") {
        attributes.is_on = false;
    } else {
        return attr.is_empty();
    }
    true
}

impl Parser {
    /// Trailing `mode: a & b` items of `TractionControl` and `AntiLockBrakes`.
    fn parse_aid_modes(&mut self, items: &[String]) -> AidAttributes {
        let mut attributes = AidAttributes::default();
        for item in items {
            let mut parts = item.split(':');
            let key = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            let values: Vec<&str> = parts.collect();
            if key == "mode" && values.len() == 1 {
                for attr in values[0].split('&') {
                    if !apply_aid_attribute(&mut attributes, attr) {
                        self.warn(
                            DiagnosticKind::ValueDecode,
                            format!("Ignoring invalid mode attribute '{}'", attr.trim()),
                        );
                    }
                }
            } else {
                self.error(
                    DiagnosticKind::MissingSubKey,
                    format!("Missing 'mode' key in '{}', using defaults", item),
                );
                attributes = AidAttributes::default();
            }
        }
        attributes
    }

    pub(in crate::parser) fn parse_traction_control(&mut self) {
        let tokens = self.split_after_keyword(Keyword::TractionControl, &[',']);
        if !self.check_token_count(tokens.len(), 2) {
            return;
        }

        let regulation_force = self.float_of(&tokens[0]);
        let wheel_slip = self.float_of(&tokens[1]);
        let fade_speed = tokens.get(2).map(|t| self.float_of(t));
        let pulse_per_sec = tokens.get(3).map(|t| self.float_of(t));
        let attributes = self.parse_aid_modes(tokens.get(4..).unwrap_or_default());

        let tc = TractionControl {
            regulation_force,
            wheel_slip,
            fade_speed,
            pulse_per_sec,
            attributes,
        };
        self.module_mut().tractioncontrol.push(tc);
    }

    pub(in crate::parser) fn parse_anti_lock_brakes(&mut self) {
        let tokens = self.split_after_keyword(Keyword::AntiLockBrakes, &[',']);
        if !self.check_token_count(tokens.len(), 2) {
            return;
        }

        let regulation_force = self.float_of(&tokens[0]);
        let min_speed = self.int_of(&tokens[1]);
        let pulse_per_sec = if tokens.len() > 3 {
            Some(self.float_of(&tokens[2]))
        } else {
            None
        };
        let attributes = self.parse_aid_modes(tokens.get(3..).unwrap_or_default());

        let abs = AntiLockBrakes {
            regulation_force,
            min_speed,
            pulse_per_sec,
            attributes,
        };
        self.module_mut().antilockbrakes.push(abs);
    }

    pub(in crate::parser) fn parse_cruise_control(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let cruise_control = CruiseControl {
            min_speed: self.arg_float(1),
            autobrake: self.arg_int(2),
        };
        self.module_mut().cruisecontrol.push(cruise_control);
    }

    pub(in crate::parser) fn parse_speed_limiter(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let limiter = SpeedLimiter {
            max_speed: self.arg_float(1),
            is_enabled: true,
        };
        self.module_mut().speedlimiter.push(limiter);
    }

    /// `engine`: forward gears run until the first negative ratio.
    pub(super) fn parse_engine(&mut self) {
        if !self.check_num_arguments(6) {
            return;
        }

        let mut engine = Engine {
            shift_down_rpm: self.arg_float(0),
            shift_up_rpm: self.arg_float(1),
            torque: self.arg_float(2),
            global_gear_ratio: self.arg_float(3),
            reverse_gear_ratio: self.arg_float(4),
            neutral_gear_ratio: self.arg_float(5),
            gear_ratios: Vec::new(),
        };
        for i in 6..self.num_args() {
            let ratio = self.arg_float(i);
            if ratio < 0.0 {
                break;
            }
            engine.gear_ratios.push(ratio);
        }

        if engine.gear_ratios.is_empty() {
            self.error(DiagnosticKind::Semantic, "Engine has no forward gear, ignoring line");
            return;
        }
        self.module_mut().engine.push(engine);
    }

    pub(super) fn parse_engoption(&mut self) {
        if !self.check_num_arguments(1) {
            return;
        }

        let inertia = self.arg_float(0);
        let engine_type = match self.arg_char(1) {
            None => EngineType::default(),
            Some(c) => EngineType::from_char(c).unwrap_or_else(|| {
                self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Invalid engine type '{}', using 't' (truck)", c),
                );
                EngineType::Truck
            }),
        };

        let engoption = Engoption {
            inertia,
            engine_type,
            clutch_force: self.opt_float(2),
            shift_time: self.opt_float(3),
            clutch_time: self.opt_float(4),
            post_shift_time: self.opt_float(5),
            stall_rpm: self.opt_float(6),
            idle_rpm: self.opt_float(7),
            max_idle_mixture: self.opt_float(8),
            min_idle_mixture: self.opt_float(9),
            braking_torque: self.opt_float(10),
        };
        self.module_mut().engoption.push(engoption);
    }

    pub(super) fn parse_engturbo(&mut self) {
        if !self.check_num_arguments(4) {
            return;
        }

        let mut engturbo = Engturbo {
            version: self.arg_int(0),
            tinertia_factor: self.arg_float(1),
            nturbos: self.arg_int(2),
            params: (3..self.num_args().min(14)).map(|i| self.arg_float(i)).collect(),
        };
        if engturbo.nturbos > Engturbo::MAX_TURBOS {
            self.warn(
                DiagnosticKind::Semantic,
                format!(
                    "Cannot have more than {} turbos, using {}",
                    Engturbo::MAX_TURBOS,
                    Engturbo::MAX_TURBOS
                ),
            );
            engturbo.nturbos = Engturbo::MAX_TURBOS;
        }
        self.module_mut().engturbo.push(engturbo);
    }

    /// `torquecurve`: a predefined curve name or `power, percent` samples,
    /// all collected into one entry.
    pub(super) fn parse_torquecurve(&mut self) {
        let tokens = self.split_line(&[',']);
        let sample = match tokens.as_slice() {
            [name] => {
                let name = name.clone();
                self.torquecurve_mut().predefined_func_name = Some(name);
                return;
            }
            [power, percent] => TorqueSample {
                power: self.float_of(power),
                torque_percent: self.float_of(percent),
            },
            _ => {
                self.error(DiagnosticKind::ArgumentCount, "Too many arguments, skipping line");
                return;
            }
        };
        self.torquecurve_mut().samples.push(sample);
    }

    fn torquecurve_mut(&mut self) -> &mut TorqueCurve {
        let curves = &mut self.module_mut().torquecurve;
        if curves.is_empty() {
            curves.push(TorqueCurve::default());
        }
        &mut curves[0]
    }

    pub(super) fn parse_brakes(&mut self) {
        if !self.check_num_arguments(1) {
            return;
        }

        let brakes = Brakes {
            default_braking_force: self.arg_float(0),
            parking_brake_force: self.opt_float(1),
        };
        self.module_mut().brakes.push(brakes);
    }
}
