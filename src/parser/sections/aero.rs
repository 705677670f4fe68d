//! Wings, air brakes and propulsion.

use crate::parser::Parser;
use crate::types::{
    Airbrake, Fusedrag, NodeRef, Pistonprop, Screwprop, Turbojet, Turboprop2, Vec3, Wing,
    WingControl,
};

impl Parser {
    pub(super) fn parse_wings(&mut self) {
        if !self.check_num_arguments(16) {
            return;
        }

        let nodes = std::array::from_fn(|i| self.arg_node(i));
        let tex_coords = std::array::from_fn(|i| self.arg_float(8 + i));
        let wing = Wing {
            nodes,
            tex_coords,
            control_surface: if self.num_args() > 16 {
                self.arg_wing_control(16)
            } else {
                WingControl::None
            },
            chord_point: self.opt_float(17),
            min_deflection: self.opt_float(18),
            max_deflection: self.opt_float(19),
            airfoil: self.opt_string(20),
            efficacy_coef: self.opt_float(21),
        };
        self.module_mut().wings.push(wing);
    }

    pub(super) fn parse_airbrakes(&mut self) {
        if !self.check_num_arguments(14) {
            return;
        }

        let airbrake = Airbrake {
            reference_node: self.arg_node(0),
            x_axis_node: self.arg_node(1),
            y_axis_node: self.arg_node(2),
            additional_node: self.arg_node(3),
            offset: Vec3::new(self.arg_float(4), self.arg_float(5), self.arg_float(6)),
            width: self.arg_float(7),
            height: self.arg_float(8),
            max_inclination_angle: self.arg_float(9),
            texcoord_x1: self.arg_float(10),
            texcoord_y1: self.arg_float(11),
            texcoord_x2: self.arg_float(12),
            texcoord_y2: self.arg_float(13),
        };
        self.module_mut().airbrakes.push(airbrake);
    }

    pub(super) fn parse_turboprops(&mut self) {
        self.parse_turboprop_line(1);
    }

    pub(super) fn parse_turboprops2(&mut self) {
        self.parse_turboprop_line(2);
    }

    /// `turboprops2` adds a nullable couple node after the blade tips.
    fn parse_turboprop_line(&mut self, format_version: u8) {
        let offset = usize::from(format_version == 2);
        if !self.check_num_arguments(8 + offset) {
            return;
        }

        let turboprop = Turboprop2 {
            format_version,
            reference_node: self.arg_node(0),
            axis_node: self.arg_node(1),
            blade_tip_nodes: self.arg_blade_tips(),
            couple_node: if offset == 1 {
                self.arg_nullable_node(6)
            } else {
                None
            },
            turbine_power_kw: self.arg_float(6 + offset),
            airfoil: self.arg_string(7 + offset),
        };
        self.module_mut().turboprops2.push(turboprop);
    }

    /// Blade tips at args 2 to 5; the last two may be `-1`.
    fn arg_blade_tips(&mut self) -> [Option<NodeRef>; 4] {
        [
            Some(self.arg_node(2)),
            Some(self.arg_node(3)),
            self.arg_nullable_node(4),
            self.arg_nullable_node(5),
        ]
    }

    pub(super) fn parse_pistonprops(&mut self) {
        if !self.check_num_arguments(10) {
            return;
        }

        let pistonprop = Pistonprop {
            reference_node: self.arg_node(0),
            axis_node: self.arg_node(1),
            blade_tip_nodes: self.arg_blade_tips(),
            couple_node: self.arg_nullable_node(6),
            turbine_power_kw: self.arg_float(7),
            pitch: self.arg_float(8),
            airfoil: self.arg_string(9),
        };
        self.module_mut().pistonprops.push(pistonprop);
    }

    pub(super) fn parse_turbojets(&mut self) {
        if !self.check_num_arguments(9) {
            return;
        }

        let turbojet = Turbojet {
            front_node: self.arg_node(0),
            back_node: self.arg_node(1),
            side_node: self.arg_node(2),
            is_reversable: self.arg_int(3) != 0,
            dry_thrust: self.arg_float(4),
            wet_thrust: self.arg_float(5),
            front_diameter: self.arg_float(6),
            back_diameter: self.arg_float(7),
            nozzle_length: self.arg_float(8),
        };
        self.module_mut().turbojets.push(turbojet);
    }

    pub(super) fn parse_screwprops(&mut self) {
        if !self.check_num_arguments(4) {
            return;
        }

        let screwprop = Screwprop {
            prop_node: self.arg_node(0),
            back_node: self.arg_node(1),
            top_node: self.arg_node(2),
            power: self.arg_float(3),
        };
        self.module_mut().screwprops.push(screwprop);
    }

    /// `fusedrag`: either `autocalc [coef [airfoil]]` or `width [airfoil]`.
    pub(super) fn parse_fusedrag(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let front_node = self.arg_node(0);
        let rear_node = self.arg_node(1);
        let fusedrag = if self.arg(2) == "autocalc" {
            Fusedrag {
                front_node,
                rear_node,
                autocalc: true,
                approximate_width: None,
                area_coefficient: self.opt_float(3),
                airfoil_name: self.opt_string(4),
            }
        } else {
            Fusedrag {
                front_node,
                rear_node,
                autocalc: false,
                approximate_width: Some(self.arg_float(2)),
                area_coefficient: None,
                airfoil_name: self.opt_string(3),
            }
        };
        self.module_mut().fusedrag.push(fusedrag);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ParserConfig;
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::{parse_str, ParseOutcome};
    use crate::types::WingControl;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseOutcome {
        parse_str(source, &ParserConfig::default())
    }

    const NODES: &str = "truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\n2, 0, 1, 0\n3, 0, 0, 1\n";

    #[test]
    fn test_wing_optional_tail() {
        let src = format!(
            "{}wings\n0, 1, 2, 3, 0, 1, 2, 3, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, fz, 0.25, -10\n",
            NODES
        );
        let outcome = parse(&src);
        let wing = &outcome.document.root.wings[0];

        assert_eq!(wing.tex_coords[7], 0.8);
        assert_eq!(wing.control_surface, WingControl::Flap);
        assert_eq!(wing.chord_point, Some(0.25));
        assert_eq!(wing.min_deflection, Some(-10.0));
        assert_eq!(wing.max_deflection, None);
        assert_eq!(wing.airfoil, None);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_turboprops_versions() {
        let src = format!(
            "{}turboprops\n0, 1, 2, 3, -1, -1, 500, prop.afl\nturboprops2\n0, 1, 2, 3, 2, -1, 3, 700, prop.afl\n",
            NODES
        );
        let outcome = parse(&src);
        let props = &outcome.document.root.turboprops2;

        assert_eq!(props.len(), 2);
        assert_eq!(props[0].format_version, 1);
        assert!(props[0].blade_tip_nodes[2].is_none());
        assert!(props[0].couple_node.is_none());
        assert_eq!(props[0].turbine_power_kw, 500.0);
        assert_eq!(props[1].format_version, 2);
        assert!(props[1].blade_tip_nodes[2].is_some());
        assert!(props[1].couple_node.is_some());
        assert_eq!(props[1].airfoil, "prop.afl");
    }

    #[test]
    fn test_fusedrag_forms() {
        let src = format!("{}fusedrag\n0, 1, autocalc, 0.5\n0, 1, 2.5, naca.afl\n", NODES);
        let outcome = parse(&src);
        let drag = &outcome.document.root.fusedrag;

        assert!(drag[0].autocalc);
        assert_eq!(drag[0].area_coefficient, Some(0.5));
        assert_eq!(drag[0].airfoil_name, None);
        assert!(!drag[1].autocalc);
        assert_eq!(drag[1].approximate_width, Some(2.5));
        assert_eq!(drag[1].airfoil_name.as_deref(), Some("naca.afl"));
    }

    #[test]
    fn test_turbojets_and_screwprops() {
        let src = format!(
            "{}turbojets\n0, 1, 2, 1, 50, 80, 1, 0.8, 2\nscrewprops\n0, 1, 2, 9000\n",
            NODES
        );
        let outcome = parse(&src);
        let root = &outcome.document.root;

        assert!(root.turbojets[0].is_reversable);
        assert_eq!(root.turbojets[0].nozzle_length, 2.0);
        assert_eq!(root.screwprops[0].power, 9000.0);
    }
}
