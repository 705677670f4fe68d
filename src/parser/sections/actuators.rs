//! Driven beams: commands, animators, rotators and triggers.

use std::rc::Rc;

use crate::diagnostics::DiagnosticKind;
use crate::parser::line::split_trimmed;
use crate::parser::Parser;
use crate::types::{
    AeroAnimator, AeroAnimatorFlags, Animator, AnimatorFlags, Command2, CommandOptions, Inertia,
    Rotator, Trigger, TriggerAction, TriggerOptions,
};

fn command_option(c: char) -> Option<CommandOptions> {
    match c {
        'n' => Some(CommandOptions::empty()),
        'i' => Some(CommandOptions::INVISIBLE),
        'r' => Some(CommandOptions::ROPE),
        'f' => Some(CommandOptions::NOT_FASTER),
        'c' => Some(CommandOptions::AUTO_CENTER),
        'p' => Some(CommandOptions::ONE_PRESS),
        'o' => Some(CommandOptions::ONE_PRESS_CENTER),
        _ => None,
    }
}

/// Drop conflicting press modes. The first of `o`, `p` and `c` in `text` wins.
///
/// Returns the kept options and one message per dropped letter.
fn resolve_command_modes(mut options: CommandOptions, text: &str) -> (CommandOptions, Vec<String>) {
    let mut messages = Vec::new();
    let Some(winner) = text.chars().find(|c| matches!(c, 'o' | 'p' | 'c')) else {
        return (options, messages);
    };

    if options.contains(CommandOptions::AUTO_CENTER) && winner != 'c' {
        options.remove(CommandOptions::AUTO_CENTER);
        messages.push(
            "Command cannot be one-pressed and self centering at the same time, ignoring flag 'c'"
                .to_string(),
        );
    }

    let mut ignored = None;
    if options.contains(CommandOptions::ONE_PRESS_CENTER) && winner != 'o' {
        options.remove(CommandOptions::ONE_PRESS_CENTER);
        ignored = Some('o');
    } else if options.contains(CommandOptions::ONE_PRESS) && winner != 'p' {
        options.remove(CommandOptions::ONE_PRESS);
        ignored = Some('p');
    }

    if let Some(flag) = ignored {
        let message = if winner == 'c' {
            format!(
                "Command cannot be one-pressed and self centering at the same time, ignoring flag '{}'",
                flag
            )
        } else {
            format!("Command already has a one-pressed mode, ignoring flag '{}'", flag)
        };
        messages.push(message);
    }

    (options, messages)
}

fn animator_flag(name: &str) -> Option<AnimatorFlags> {
    let flag = match name {
        "vis" => AnimatorFlags::VISIBLE,
        "inv" => AnimatorFlags::INVISIBLE,
        "airspeed" => AnimatorFlags::AIRSPEED,
        "vvi" => AnimatorFlags::VERTICAL_VELOCITY,
        "altimeter100k" => AnimatorFlags::ALTIMETER_100K,
        "altimeter10k" => AnimatorFlags::ALTIMETER_10K,
        "altimeter1k" => AnimatorFlags::ALTIMETER_1K,
        "aoa" => AnimatorFlags::ANGLE_OF_ATTACK,
        "flap" => AnimatorFlags::FLAP,
        "airbrake" => AnimatorFlags::AIR_BRAKE,
        "roll" => AnimatorFlags::ROLL,
        "pitch" => AnimatorFlags::PITCH,
        "brakes" => AnimatorFlags::BRAKES,
        "accel" => AnimatorFlags::ACCEL,
        "clutch" => AnimatorFlags::CLUTCH,
        "speedo" => AnimatorFlags::SPEEDO,
        "tacho" => AnimatorFlags::TACHO,
        "turbo" => AnimatorFlags::TURBO,
        "parking" => AnimatorFlags::PARKING,
        "shifterman1" => AnimatorFlags::SHIFT_LEFT_RIGHT,
        "shifterman2" => AnimatorFlags::SHIFT_BACK_FORTH,
        "sequential" => AnimatorFlags::SEQUENTIAL_SHIFT,
        "shifterlin" => AnimatorFlags::GEAR_SELECT,
        "torque" => AnimatorFlags::TORQUE,
        "difflock" => AnimatorFlags::DIFFLOCK,
        "rudderboat" => AnimatorFlags::BOAT_RUDDER,
        "throttleboat" => AnimatorFlags::BOAT_THROTTLE,
        _ => return None,
    };
    Some(flag)
}

/// `throttle1`, `rpm2`, `aerotorq1`, ...: aircraft engine source and its 1-based number.
fn aero_animator_source(token: &str) -> Option<(AeroAnimatorFlags, u32)> {
    const PREFIXES: [(&str, AeroAnimatorFlags); 5] = [
        ("throttle", AeroAnimatorFlags::THROTTLE),
        ("rpm", AeroAnimatorFlags::RPM),
        ("aerotorq", AeroAnimatorFlags::TORQUE),
        ("aeropit", AeroAnimatorFlags::PITCH),
        ("aerostatus", AeroAnimatorFlags::STATUS),
    ];
    PREFIXES.iter().find_map(|(prefix, flag)| {
        let digits = token.strip_prefix(prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|number| (*flag, number))
    })
}

fn trigger_option(c: char) -> Option<TriggerOptions> {
    let option = match c {
        'i' => TriggerOptions::INVISIBLE,
        'c' => TriggerOptions::COMMAND_STYLE,
        'x' => TriggerOptions::START_OFF,
        'b' => TriggerOptions::BLOCK_KEYS,
        'B' => TriggerOptions::BLOCK_TRIGGERS,
        'A' => TriggerOptions::INV_BLOCK_TRIGGERS,
        's' => TriggerOptions::SWITCH_CMD_NUM,
        'h' => TriggerOptions::UNLOCK_HOOKGROUPS_KEY,
        'H' => TriggerOptions::LOCK_HOOKGROUPS_KEY,
        't' => TriggerOptions::CONTINUOUS,
        'E' => TriggerOptions::ENGINE_TRIGGER,
        _ => return None,
    };
    Some(option)
}

impl Parser {
    /// Trailing inertia arguments: start delay, stop delay, start function, stop function.
    pub(super) fn parse_optional_inertia(&mut self, start: usize) -> Inertia {
        Inertia {
            start_delay_factor: self.opt_float(start).unwrap_or_default(),
            stop_delay_factor: self.opt_float(start + 1).unwrap_or_default(),
            start_function: self.opt_string(start + 2).unwrap_or_default(),
            stop_function: self.opt_string(start + 3).unwrap_or_default(),
        }
    }

    pub(super) fn parse_commands(&mut self) {
        self.parse_command_line(1);
    }

    pub(super) fn parse_commands2(&mut self) {
        self.parse_command_line(2);
    }

    fn parse_command_line(&mut self, format_version: u8) {
        let min = if format_version == 2 { 8 } else { 7 };
        if !self.check_num_arguments(min) {
            return;
        }

        let nodes = [self.arg_node(0), self.arg_node(1)];
        let shorten_rate = self.arg_float(2);
        let mut pos = 3;
        let lengthen_rate = if format_version == 2 {
            pos += 1;
            self.arg_float(3)
        } else {
            shorten_rate
        };

        let mut command = Command2 {
            format_version,
            nodes,
            shorten_rate,
            lengthen_rate,
            max_contraction: self.arg_float(pos),
            max_extension: self.arg_float(pos + 1),
            contract_key: self.arg_int(pos + 2),
            extend_key: self.arg_int(pos + 3),
            options: CommandOptions::empty(),
            description: String::new(),
            inertia: Inertia::default(),
            affect_engine: 1.0,
            needs_engine: true,
            plays_sound: true,
            beam_defaults: Rc::clone(&self.defaults.beam),
            inertia_defaults: Rc::clone(&self.defaults.inertia),
            detacher_group: self.defaults.detacher_group,
        };
        pos += 4;

        if let Some(text) = self.opt_string(pos) {
            let options = self.decode_options(&text, "command", command_option);
            let (options, messages) = resolve_command_modes(options, &text);
            for message in messages {
                self.warn(DiagnosticKind::Semantic, message);
            }
            command.options = options;
        }
        pos += 1;

        if let Some(description) = self.opt_string(pos) {
            command.description = description;
        }
        pos += 1;

        command.inertia = self.parse_optional_inertia(pos);
        pos += 4;

        if let Some(affect_engine) = self.opt_float(pos) {
            command.affect_engine = affect_engine;
        }
        if pos + 1 < self.num_args() {
            command.needs_engine = self.arg_bool(pos + 1);
        }
        if pos + 2 < self.num_args() {
            command.plays_sound = self.arg_bool(pos + 2);
        }

        self.module_mut().commands2.push(command);
    }

    /// `animators`: comma separated; the fourth field holds `|` separated options.
    pub(super) fn parse_animators(&mut self) {
        let tokens = self.split_line(&[',']);
        if !self.check_token_count(tokens.len(), 4) {
            return;
        }

        let mut animator = Animator {
            nodes: [
                self.node_ref_from(&tokens[0], false),
                self.node_ref_from(&tokens[1], false),
            ],
            lengthening_factor: self.float_of(&tokens[2]),
            flags: AnimatorFlags::empty(),
            short_limit: 0.0,
            long_limit: 0.0,
            aero_animator: AeroAnimator::default(),
            inertia_defaults: Rc::clone(&self.defaults.inertia),
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };

        for option in split_trimmed(&tokens[3], &['|']) {
            if let Some((flag, number)) = aero_animator_source(option) {
                animator.aero_animator.flags |= flag;
                animator.aero_animator.engine_idx = number.saturating_sub(1);
                continue;
            }

            let limit = option
                .strip_prefix("shortlimit")
                .map(|rest| (AnimatorFlags::SHORT_LIMIT, rest))
                .or_else(|| {
                    option
                        .strip_prefix("longlimit")
                        .map(|rest| (AnimatorFlags::LONG_LIMIT, rest))
                });
            if let Some((flag, rest)) = limit {
                if let Some(value) = rest.trim_start().strip_prefix(':') {
                    let value = self.float_of(value.trim());
                    if flag == AnimatorFlags::SHORT_LIMIT {
                        animator.short_limit = value;
                    } else {
                        animator.long_limit = value;
                    }
                    animator.flags |= flag;
                } else {
                    self.warn(
                        DiagnosticKind::ValueDecode,
                        format!("Animator option '{}' has no value, ignoring", option),
                    );
                }
                continue;
            }

            match animator_flag(option) {
                Some(flag) => animator.flags |= flag,
                None => self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Ignoring invalid animator option '{}'", option),
                ),
            }
        }

        self.module_mut().animators.push(animator);
    }

    pub(super) fn parse_rotators(&mut self) {
        self.parse_rotator_line(false);
    }

    pub(super) fn parse_rotators2(&mut self) {
        self.parse_rotator_line(true);
    }

    fn parse_rotator_line(&mut self, v2: bool) {
        if !self.check_num_arguments(if v2 { 16 } else { 13 }) {
            return;
        }

        let mut rotator = Rotator {
            axis_nodes: [self.arg_node(0), self.arg_node(1)],
            base_plate_nodes: [
                self.arg_node(2),
                self.arg_node(3),
                self.arg_node(4),
                self.arg_node(5),
            ],
            rotating_plate_nodes: [
                self.arg_node(6),
                self.arg_node(7),
                self.arg_node(8),
                self.arg_node(9),
            ],
            rate: self.arg_float(10),
            spin_left_key: self.arg_int(11),
            spin_right_key: self.arg_int(12),
            rotating_force: None,
            tolerance: None,
            description: String::new(),
            inertia: Inertia::default(),
            inertia_defaults: Rc::clone(&self.defaults.inertia),
            engine_coupling: 1.0,
            needs_engine: false,
        };

        let offset = if v2 {
            rotator.rotating_force = Some(self.arg_float(13));
            rotator.tolerance = Some(self.arg_float(14));
            rotator.description = self.arg_string(15);
            3
        } else {
            0
        };

        rotator.inertia = self.parse_optional_inertia(13 + offset);
        if let Some(coupling) = self.opt_float(17 + offset) {
            rotator.engine_coupling = coupling;
        }
        if 18 + offset < self.num_args() {
            rotator.needs_engine = self.arg_bool(18 + offset);
        }

        if v2 {
            self.module_mut().rotators2.push(rotator);
        } else {
            self.module_mut().rotators.push(rotator);
        }
    }

    pub(super) fn parse_triggers(&mut self) {
        if !self.check_num_arguments(6) {
            return;
        }

        let nodes = [self.arg_node(0), self.arg_node(1)];
        let contraction_trigger_limit = self.arg_float(2);
        let expansion_trigger_limit = self.arg_float(3);
        let first = self.arg_int(4);
        let second = self.arg_int(5);

        let options = match self.opt_string(6) {
            Some(text) => self.decode_options(&text, "trigger", trigger_option),
            None => TriggerOptions::empty(),
        };
        let boundary_timer = self
            .opt_float(7)
            .filter(|timer| *timer > 0.0)
            .unwrap_or(Trigger::DEFAULT_BOUNDARY_TIMER);

        let hook_toggle = TriggerOptions::UNLOCK_HOOKGROUPS_KEY | TriggerOptions::LOCK_HOOKGROUPS_KEY;
        let action = if options.intersects(hook_toggle) {
            TriggerAction::HookToggle {
                contraction_hookgroup: first,
                extension_hookgroup: second,
            }
        } else if options.contains(TriggerOptions::ENGINE_TRIGGER) {
            TriggerAction::Engine {
                function: first,
                motor_index: second,
            }
        } else {
            TriggerAction::CommandKeys {
                contraction_key: first,
                extension_key: second,
            }
        };

        let trigger = Trigger {
            nodes,
            contraction_trigger_limit,
            expansion_trigger_limit,
            options,
            boundary_timer,
            action,
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().triggers.push(trigger);
    }
}
