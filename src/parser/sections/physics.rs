//! Nodes, beams and the passive beam-like sections.

use std::rc::Rc;

use crate::diagnostics::DiagnosticKind;
use crate::parser::importer::NodeSlot;
use crate::parser::Parser;
use crate::types::{
    Beam, BeamOptions, CollisionBox, Globals, Hook, Hydro, Lockgroup, Minimass, Node, NodeId,
    NodeOptions, RailGroup, Ropable, Rope, Shock, Shock2, Shock2Options, Shock3, Shock3Options,
    ShockOptions, SlideConstraints, SlideNode, Tie, Vec3,
};

fn node_option(c: char) -> Option<NodeOptions> {
    let option = match c {
        'l' => NodeOptions::LOAD_WEIGHT,
        'n' => NodeOptions::MOUSE_GRAB,
        'm' => NodeOptions::NO_MOUSE_GRAB,
        'f' => NodeOptions::NO_SPARKS,
        'x' => NodeOptions::EXHAUST_POINT,
        'y' => NodeOptions::EXHAUST_DIRECTION,
        'c' => NodeOptions::NO_GROUND_CONTACT,
        'h' => NodeOptions::HOOK_POINT,
        'e' => NodeOptions::TERRAIN_EDIT_POINT,
        'b' => NodeOptions::EXTRA_BUOYANCY,
        'p' => NodeOptions::NO_PARTICLES,
        'L' => NodeOptions::LOG,
        _ => return None,
    };
    Some(option)
}

fn beam_option(c: char) -> Option<BeamOptions> {
    match c {
        'v' => Some(BeamOptions::empty()),
        'i' => Some(BeamOptions::INVISIBLE),
        'r' => Some(BeamOptions::ROPE),
        's' => Some(BeamOptions::SUPPORT),
        _ => None,
    }
}

fn shock_option(c: char) -> Option<ShockOptions> {
    match c {
        'n' | 'v' => Some(ShockOptions::empty()),
        'i' => Some(ShockOptions::INVISIBLE),
        'm' => Some(ShockOptions::METRIC),
        'r' | 'R' => Some(ShockOptions::ACTIVE_RIGHT),
        'l' | 'L' => Some(ShockOptions::ACTIVE_LEFT),
        _ => None,
    }
}

fn shock2_option(c: char) -> Option<Shock2Options> {
    match c {
        'n' | 'v' => Some(Shock2Options::empty()),
        'i' => Some(Shock2Options::INVISIBLE),
        'm' => Some(Shock2Options::METRIC),
        'M' => Some(Shock2Options::ABSOLUTE_METRIC),
        's' => Some(Shock2Options::SOFT_BUMP_BOUNDS),
        _ => None,
    }
}

fn shock3_option(c: char) -> Option<Shock3Options> {
    match c {
        'n' | 'v' => Some(Shock3Options::empty()),
        'i' => Some(Shock3Options::INVISIBLE),
        'm' => Some(Shock3Options::METRIC),
        'M' => Some(Shock3Options::ABSOLUTE_METRIC),
        _ => None,
    }
}

impl Parser {
    /// Node option letters. `n` and `m` exclude each other; the later one wins.
    pub(in crate::parser) fn parse_node_options(&mut self, text: &str) -> NodeOptions {
        let mut options: NodeOptions = self.decode_options(text, "node", node_option);
        let both = NodeOptions::MOUSE_GRAB | NodeOptions::NO_MOUSE_GRAB;
        if options.contains(both) {
            let last = text.rfind(['n', 'm']).and_then(|i| text[i..].chars().next());
            if last == Some('n') {
                options.remove(NodeOptions::NO_MOUSE_GRAB);
            } else {
                options.remove(NodeOptions::MOUSE_GRAB);
            }
        }
        options
    }

    pub(super) fn parse_nodes(&mut self) {
        self.parse_node_line(false);
    }

    pub(super) fn parse_nodes2(&mut self) {
        self.parse_node_line(true);
    }

    fn parse_node_line(&mut self, named: bool) {
        if !self.check_num_arguments(4) {
            return;
        }

        let id = if named {
            let name = self.arg_string(0);
            self.importer.add_named(&name);
            self.any_named_node_defined = true;
            NodeId::Name(name)
        } else {
            let number = self.arg_uint(0);
            let slot = NodeSlot {
                module: self.current_module.clone(),
                index: self.module_mut().nodes.len(),
            };
            if let Some(expected) = self.importer.add_numbered(number, slot) {
                self.warn(
                    DiagnosticKind::Semantic,
                    format!("Node {} is out of sequence, expected {}", number, expected),
                );
            }
            NodeId::Num(number)
        };

        let position = Vec3::new(self.arg_float(1), self.arg_float(2), self.arg_float(3));
        let options = match self.opt_string(4) {
            Some(text) => self.parse_node_options(&text),
            None => NodeOptions::empty(),
        };

        let mut load_weight_override = None;
        if self.num_args() > 5 {
            if options.contains(NodeOptions::LOAD_WEIGHT) {
                load_weight_override = Some(self.arg_float(5));
            } else {
                self.warn(
                    DiagnosticKind::Semantic,
                    "Node has a load weight override, but option 'l' is not present, ignoring value",
                );
            }
        }

        let node = Node {
            id,
            position,
            options,
            load_weight_override,
            node_defaults: Rc::clone(&self.defaults.node),
            beam_defaults: Rc::clone(&self.defaults.beam),
            default_minimass: self.defaults.minimass.clone(),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().nodes.push(node);
    }

    pub(super) fn parse_beams(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let nodes = [self.arg_node(0), self.arg_node(1)];
        let options = match self.opt_string(2) {
            Some(text) => self.decode_options(&text, "beam", beam_option),
            None => BeamOptions::empty(),
        };

        let extension_break_limit = if self.num_args() > 3 && options.contains(BeamOptions::SUPPORT) {
            Some(self.arg_float(3).max(0.0))
        } else {
            None
        };

        let beam = Beam {
            nodes,
            options,
            extension_break_limit,
            defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().beams.push(beam);
    }

    pub(super) fn parse_shocks(&mut self) {
        if !self.check_num_arguments(7) {
            return;
        }

        let shock = Shock {
            nodes: [self.arg_node(0), self.arg_node(1)],
            spring_rate: self.arg_float(2),
            damping: self.arg_float(3),
            short_bound: self.arg_float(4),
            long_bound: self.arg_float(5),
            precompression: self.arg_float(6),
            options: match self.opt_string(7) {
                Some(text) => self.decode_options(&text, "shock", shock_option),
                None => ShockOptions::empty(),
            },
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().shocks.push(shock);
    }

    pub(super) fn parse_shocks2(&mut self) {
        if !self.check_num_arguments(13) {
            return;
        }

        let shock = Shock2 {
            nodes: [self.arg_node(0), self.arg_node(1)],
            spring_in: self.arg_float(2),
            damp_in: self.arg_float(3),
            progress_factor_spring_in: self.arg_float(4),
            progress_factor_damp_in: self.arg_float(5),
            spring_out: self.arg_float(6),
            damp_out: self.arg_float(7),
            progress_factor_spring_out: self.arg_float(8),
            progress_factor_damp_out: self.arg_float(9),
            short_bound: self.arg_float(10),
            long_bound: self.arg_float(11),
            precompression: self.arg_float(12),
            options: match self.opt_string(13) {
                Some(text) => self.decode_options(&text, "shock2", shock2_option),
                None => Shock2Options::empty(),
            },
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().shocks2.push(shock);
    }

    pub(super) fn parse_shocks3(&mut self) {
        if !self.check_num_arguments(15) {
            return;
        }

        let shock = Shock3 {
            nodes: [self.arg_node(0), self.arg_node(1)],
            spring_in: self.arg_float(2),
            damp_in: self.arg_float(3),
            damp_in_slow: self.arg_float(4),
            split_vel_in: self.arg_float(5),
            damp_in_fast: self.arg_float(6),
            spring_out: self.arg_float(7),
            damp_out: self.arg_float(8),
            damp_out_slow: self.arg_float(9),
            split_vel_out: self.arg_float(10),
            damp_out_fast: self.arg_float(11),
            short_bound: self.arg_float(12),
            long_bound: self.arg_float(13),
            precompression: self.arg_float(14),
            options: match self.opt_string(15) {
                Some(text) => self.decode_options(&text, "shock3", shock3_option),
                None => Shock3Options::empty(),
            },
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().shocks3.push(shock);
    }

    pub(super) fn parse_hydros(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let nodes = [self.arg_node(0), self.arg_node(1)];
        let lengthening_factor = self.arg_float(2);
        let options = self.opt_string(3).unwrap_or_default();
        let inertia = self.parse_optional_inertia(4);

        let hydro = Hydro {
            nodes,
            lengthening_factor,
            options,
            inertia,
            inertia_defaults: Rc::clone(&self.defaults.inertia),
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().hydros.push(hydro);
    }

    pub(super) fn parse_ropes(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let rope = Rope {
            root_node: self.arg_node(0),
            end_node: self.arg_node(1),
            invisible: self.num_args() > 2 && self.arg_char(2) == Some('i'),
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };
        self.module_mut().ropes.push(rope);
    }

    pub(super) fn parse_ropables(&mut self) {
        if !self.check_num_arguments(1) {
            return;
        }

        let ropable = Ropable {
            node: self.arg_node(0),
            group: self.opt_int(1).unwrap_or(-1),
            has_multilock: self.opt_int(2) == Some(1),
        };
        self.module_mut().ropables.push(ropable);
    }

    pub(super) fn parse_ties(&mut self) {
        if !self.check_num_arguments(5) {
            return;
        }

        let mut tie = Tie {
            root_node: self.arg_node(0),
            max_reach_length: self.arg_float(1),
            auto_shorten_rate: self.arg_float(2),
            min_length: self.arg_float(3),
            max_length: self.arg_float(4),
            is_invisible: false,
            disable_self_lock: false,
            max_stress: Tie::DEFAULT_MAX_STRESS,
            group: -1,
            beam_defaults: Rc::clone(&self.defaults.beam),
            detacher_group: self.defaults.detacher_group,
        };

        if let Some(options) = self.opt_string(5) {
            for c in options.chars() {
                match c {
                    'n' | 'v' => {}
                    'i' => tie.is_invisible = true,
                    's' => tie.disable_self_lock = true,
                    other => self.warn(
                        DiagnosticKind::ValueDecode,
                        format!("Ignoring invalid tie option '{}'", other),
                    ),
                }
            }
        }
        if let Some(max_stress) = self.opt_float(6) {
            tie.max_stress = max_stress;
        }
        if let Some(group) = self.opt_int(7) {
            tie.group = group;
        }

        self.module_mut().ties.push(tie);
    }

    /// `slidenodes`: a slide node, its rail nodes, then lettered attributes.
    pub(super) fn parse_slidenodes(&mut self) {
        let tokens = self.split_line(&[',', ' ']);
        if !self.check_token_count(tokens.len(), 2) {
            return;
        }

        let mut slidenode = SlideNode {
            slide_node: self.node_ref_from(&tokens[0], false),
            rail_nodes: Vec::new(),
            spring_rate: None,
            break_force: None,
            tolerance: None,
            attachment_rate: None,
            railgroup_id: None,
            max_attach_dist: None,
            constraint_flags: SlideConstraints::empty(),
        };

        let mut in_rail_node_list = true;
        for token in &tokens[1..] {
            let mut chars = token.chars();
            let Some(letter) = chars.next() else {
                continue;
            };
            let value = chars.as_str();
            match letter.to_ascii_uppercase() {
                'S' => slidenode.spring_rate = Some(self.float_of(value)),
                'B' => slidenode.break_force = Some(self.float_of(value)),
                'T' => slidenode.tolerance = Some(self.float_of(value)),
                'R' => slidenode.attachment_rate = Some(self.float_of(value)),
                'G' => slidenode.railgroup_id = Some(self.int_of(value)),
                'D' => slidenode.max_attach_dist = Some(self.float_of(value)),
                'C' => match value.chars().next() {
                    Some('a') => slidenode.constraint_flags |= SlideConstraints::ATTACH_ALL,
                    Some('f') => slidenode.constraint_flags |= SlideConstraints::ATTACH_FOREIGN,
                    Some('s') => slidenode.constraint_flags |= SlideConstraints::ATTACH_SELF,
                    Some('n') => slidenode.constraint_flags |= SlideConstraints::ATTACH_NONE,
                    _ => self.warn(
                        DiagnosticKind::ValueDecode,
                        format!("Ignoring invalid slidenode constraint '{}'", token),
                    ),
                },
                _ => {
                    if in_rail_node_list {
                        let node = self.node_ref_from(token, false);
                        slidenode.rail_nodes.push(node);
                    }
                    continue;
                }
            }
            in_rail_node_list = false;
        }

        self.module_mut().slidenodes.push(slidenode);
    }

    pub(super) fn parse_railgroups(&mut self) {
        let tokens = self.split_line(&[',']);
        if !self.check_token_count(tokens.len(), 3) {
            return;
        }

        let id = self.int_of(&tokens[0]);
        let node_list = tokens[1..]
            .iter()
            .map(|token| self.node_ref_from(token, false))
            .collect();
        self.module_mut().railgroups.push(RailGroup { id, node_list });
    }

    /// `hooks`: a node followed by named options, some taking a value.
    pub(super) fn parse_hooks(&mut self) {
        if !self.check_num_arguments(1) {
            return;
        }

        let mut hook = Hook::new(self.arg_node(0));
        let mut i = 1;
        while i < self.num_args() {
            let attr = self.arg_string(i);
            let has_value = i + 1 < self.num_args();
            match attr.as_str() {
                "hookrange" if has_value => {
                    i += 1;
                    hook.hook_range = self.arg_float(i);
                }
                "speedcoef" if has_value => {
                    i += 1;
                    hook.speed_coef = self.arg_float(i);
                }
                "maxforce" if has_value => {
                    i += 1;
                    hook.max_force = self.arg_float(i);
                }
                "timer" if has_value => {
                    i += 1;
                    hook.timer = self.arg_float(i);
                }
                "hookgroup" | "hgroup" if has_value => {
                    i += 1;
                    hook.hookgroup = self.arg_int(i);
                }
                "lockgroup" | "lgroup" if has_value => {
                    i += 1;
                    hook.lockgroup = self.arg_int(i);
                }
                "shortlimit" | "short_limit" if has_value => {
                    i += 1;
                    hook.min_range_meters = self.arg_float(i);
                }
                "selflock" | "self-lock" | "self_lock" => hook.self_lock = true,
                "autolock" | "auto-lock" | "auto_lock" => hook.auto_lock = true,
                "nodisable" | "no-disable" | "no_disable" => hook.no_disable = true,
                "norope" | "no-rope" | "no_rope" => hook.no_rope = true,
                "visible" | "vis" => hook.visible = true,
                _ => self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Ignoring invalid hook option '{}'", attr),
                ),
            }
            i += 1;
        }

        self.module_mut().hooks.push(hook);
    }

    pub(super) fn parse_lockgroups(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let number = self.arg_int(0);
        let nodes = (1..self.num_args()).map(|i| self.arg_node(i)).collect();
        self.module_mut().lockgroups.push(Lockgroup { number, nodes });
    }

    pub(super) fn parse_fixes(&mut self) {
        let node = self.arg_node(0);
        self.module_mut().fixes.push(node);
    }

    pub(super) fn parse_contacters(&mut self) {
        if !self.check_num_arguments(1) {
            return;
        }
        let node = self.arg_node(0);
        self.module_mut().contacters.push(node);
    }

    pub(super) fn parse_collisionboxes(&mut self) {
        let tokens = self.split_line(&[',']);
        let nodes = tokens
            .iter()
            .map(|token| self.node_ref_from(token, false))
            .collect();
        self.module_mut().collisionboxes.push(CollisionBox { nodes });
    }

    /// One line only; the block closes after it.
    pub(super) fn parse_minimass(&mut self) {
        if !self.check_num_arguments(1) {
            return;
        }

        let minimass = Minimass {
            global_min_mass_kg: self.arg_float(0),
            option: if self.num_args() > 1 {
                self.arg_minimass_option(1)
            } else {
                Default::default()
            },
        };
        self.module_mut().minimass.push(minimass);
    }

    pub(super) fn parse_globals(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let globals = Globals {
            dry_mass: self.arg_float(0),
            cargo_mass: self.arg_float(1),
            material_name: self.opt_string(2),
        };
        self.module_mut().globals.push(globals);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ParserConfig;
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::{parse_str, ParseOutcome};
    use crate::types::{
        BeamOptions, MinimassOption, NodeId, NodeOptions, ShockOptions, SlideConstraints,
    };
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseOutcome {
        parse_str(source, &ParserConfig::default())
    }

    const TWO_NODES: &str = "truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\n";

    #[test]
    fn test_node_fields() {
        let outcome = parse("truck\nnodes\n0, 1.5, -2, 3, lx, 25\n");
        let node = &outcome.document.root.nodes[0];

        assert_eq!(node.id, NodeId::Num(0));
        assert_eq!((node.position.x, node.position.y, node.position.z), (1.5, -2.0, 3.0));
        assert_eq!(node.options, NodeOptions::LOAD_WEIGHT | NodeOptions::EXHAUST_POINT);
        assert_eq!(node.load_weight_override, Some(25.0));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_load_weight_without_option() {
        let outcome = parse("truck\nnodes\n0, 0, 0, 0, c, 25\n");
        let node = &outcome.document.root.nodes[0];

        assert_eq!(node.load_weight_override, None);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Semantic).count(), 1);
    }

    #[test]
    fn test_mouse_grab_options_exclusive() {
        let outcome = parse("truck\nnodes\n0, 0, 0, 0, nm\n1, 0, 0, 0, mn\n");
        let nodes = &outcome.document.root.nodes;

        assert_eq!(nodes[0].options, NodeOptions::NO_MOUSE_GRAB);
        assert_eq!(nodes[1].options, NodeOptions::MOUSE_GRAB);
    }

    #[test]
    fn test_node_captures_minimass_and_detacher() {
        let src = "\
truck
set_default_minimass 5
detacher_group 2
nodes
0, 0, 0, 0
";
        let outcome = parse(src);
        let node = &outcome.document.root.nodes[0];

        assert_eq!(node.default_minimass.as_ref().map(|m| m.min_mass_kg), Some(5.0));
        assert_eq!(node.detacher_group, 2);
    }

    #[test]
    fn test_support_beam_break_limit() {
        let src = format!("{}beams\n0, 1, s, 3\n0, 1, s, -2\n0, 1, i, 3\n", TWO_NODES);
        let outcome = parse(&src);
        let beams = &outcome.document.root.beams;

        assert_eq!(beams[0].options, BeamOptions::SUPPORT);
        assert_eq!(beams[0].extension_break_limit, Some(3.0));
        assert_eq!(beams[1].extension_break_limit, Some(0.0));
        assert_eq!(beams[2].extension_break_limit, None);
    }

    #[test]
    fn test_shocks() {
        let src = format!("{}shocks\n0, 1, 100, 10, 0.8, 1.2, 1, iRx\n", TWO_NODES);
        let outcome = parse(&src);
        let shock = &outcome.document.root.shocks[0];

        assert_eq!(shock.spring_rate, 100.0);
        assert_eq!(shock.long_bound, 1.2);
        assert_eq!(shock.options, ShockOptions::INVISIBLE | ShockOptions::ACTIVE_RIGHT);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_hydro_inertia() {
        let src = format!("{}hydros\n0, 1, 0.3, sa, 0.5, 0.6, ramp\n", TWO_NODES);
        let outcome = parse(&src);
        let hydro = &outcome.document.root.hydros[0];

        assert_eq!(hydro.options, "sa");
        assert_eq!(hydro.inertia.start_delay_factor, 0.5);
        assert_eq!(hydro.inertia.stop_delay_factor, 0.6);
        assert_eq!(hydro.inertia.start_function, "ramp");
        assert_eq!(hydro.inertia.stop_function, "");
    }

    #[test]
    fn test_ties_and_ropables() {
        let src = format!(
            "{}ties\n0, 2, 0.1, 0.5, 1.5, is, 5000, 3\nropables\n1\n1, 4, 1\n",
            TWO_NODES
        );
        let outcome = parse(&src);
        let root = &outcome.document.root;

        assert!(root.ties[0].is_invisible);
        assert!(root.ties[0].disable_self_lock);
        assert_eq!(root.ties[0].max_stress, 5000.0);
        assert_eq!(root.ties[0].group, 3);
        assert_eq!(root.ropables[0].group, -1);
        assert!(!root.ropables[0].has_multilock);
        assert_eq!(root.ropables[1].group, 4);
        assert!(root.ropables[1].has_multilock);
    }

    #[test]
    fn test_slidenode_attributes() {
        let src = format!("{}slidenodes\n0, 1, 2, S9000, B1e6, G2, Cs, Cx\n", TWO_NODES);
        let outcome = parse(&src);
        let slidenode = &outcome.document.root.slidenodes[0];

        assert_eq!(slidenode.rail_nodes.len(), 2);
        assert_eq!(slidenode.spring_rate, Some(9000.0));
        assert_eq!(slidenode.break_force, Some(1_000_000.0));
        assert_eq!(slidenode.railgroup_id, Some(2));
        assert_eq!(slidenode.tolerance, None);
        assert_eq!(slidenode.constraint_flags, SlideConstraints::ATTACH_SELF);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_hook_options() {
        let src = format!("{}hooks\n0, hookrange, 2.5, hgroup, 3, selflock, nope, timer\n", TWO_NODES);
        let outcome = parse(&src);
        let hook = &outcome.document.root.hooks[0];

        assert_eq!(hook.hook_range, 2.5);
        assert_eq!(hook.hookgroup, 3);
        assert!(hook.self_lock);
        // A trailing value option without a value is reported, not read.
        assert_eq!(hook.timer, 5.0);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 2);
    }

    #[test]
    fn test_railgroups_and_lockgroups() {
        let src = format!("{}railgroups\n4, 0, 1\n4, 0\nlockgroups\n2, 0, 1\n", TWO_NODES);
        let outcome = parse(&src);
        let root = &outcome.document.root;

        assert_eq!(root.railgroups.len(), 1);
        assert_eq!(root.railgroups[0].id, 4);
        assert_eq!(root.railgroups[0].node_list.len(), 2);
        assert_eq!(root.lockgroups[0].number, 2);
        assert_eq!(root.lockgroups[0].nodes.len(), 2);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ArgumentCount).count(), 1);
    }

    #[test]
    fn test_minimass_takes_one_line() {
        let outcome = parse("truck\nminimass\n50, l\n60\n");
        let root = &outcome.document.root;

        assert_eq!(root.minimass.len(), 1);
        assert_eq!(root.minimass[0].global_min_mass_kg, 50.0);
        assert_eq!(root.minimass[0].option, MinimassOption::SkipLoaded);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 1);
    }

    #[test]
    fn test_globals_and_simple_lists() {
        let src = format!(
            "{}globals\n1200, 300, tracks/semi\nfixes\n0\ncontacters\n1\ncollisionboxes\n0, 1\n",
            TWO_NODES
        );
        let outcome = parse(&src);
        let root = &outcome.document.root;

        assert_eq!(root.globals[0].dry_mass, 1200.0);
        assert_eq!(root.globals[0].material_name.as_deref(), Some("tracks/semi"));
        assert_eq!(root.fixes.len(), 1);
        assert_eq!(root.contacters.len(), 1);
        assert_eq!(root.collisionboxes[0].nodes.len(), 2);
    }
}
