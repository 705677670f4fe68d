//! Wheels and the driveline.

use std::rc::Rc;

use crate::diagnostics::DiagnosticKind;
use crate::parser::keyword::Keyword;
use crate::parser::Parser;
use crate::types::{
    Axle, DifferentialType, FlexBodyWheel, InterAxle, MeshWheel, TransferCase, Wheel, Wheel2,
    WheelBase, WheelDetacher,
};

/// One comma separated property of an `axles` line.
#[derive(Debug, PartialEq)]
enum AxleProperty<'a> {
    /// `w1(a b)` or `w2(a b)`: zero-based wheel slot and its two nodes.
    Wheel(usize, &'a str, &'a str),
    /// `d(ol)`: differential letters.
    Differential(&'a str),
}

fn parse_axle_property(token: &str) -> Option<AxleProperty<'_>> {
    let token = token.trim();
    if let Some(inner) = token.strip_prefix("d(").and_then(|t| t.strip_suffix(')')) {
        return Some(AxleProperty::Differential(inner.trim()));
    }

    let rest = token.strip_prefix('w')?;
    let (slot, rest) = match rest.as_bytes().first()? {
        b'1' => (0, &rest[1..]),
        b'2' => (1, &rest[1..]),
        _ => return None,
    };
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    let mut nodes = inner.split_whitespace();
    let first = nodes.next()?;
    let second = nodes.next()?;
    if nodes.next().is_some() {
        return None;
    }
    Some(AxleProperty::Wheel(slot, first, second))
}

impl Parser {
    /// Fields every wheel section shares: width, rays, hub nodes, rigidity node,
    /// braking, propulsion, reference arm and mass, at the given positions.
    ///
    /// `None` when the ray count is over [`WheelBase::MAX_RAYS`].
    fn parse_wheel_base(
        &mut self,
        width: usize,
        rays: usize,
        first_node: usize,
    ) -> Option<WheelBase> {
        let num_rays = self.arg_uint(rays);
        if num_rays > WheelBase::MAX_RAYS {
            self.error(
                DiagnosticKind::ValueDecode,
                format!(
                    "Wheel has {} rays, more than {} allowed, skipping line",
                    num_rays,
                    WheelBase::MAX_RAYS
                ),
            );
            return None;
        }

        let n = first_node;
        Some(WheelBase {
            width: self.arg_float(width),
            num_rays,
            nodes: [self.arg_node(n), self.arg_node(n + 1)],
            rigidity_node: self.arg_rigidity_node(n + 2),
            braking: self.arg_braking(n + 3),
            propulsion: self.arg_propulsion(n + 4),
            reference_arm_node: self.arg_node(n + 5),
            mass: self.arg_float(n + 6),
            node_defaults: Rc::clone(&self.defaults.node),
            beam_defaults: Rc::clone(&self.defaults.beam),
        })
    }

    fn add_wheel_nodes(&mut self, source: Keyword, num_rays: u32, per_ray: usize) {
        self.importer.add_generated(source, num_rays as usize * per_ray);
    }

    pub(super) fn parse_wheels(&mut self) {
        if !self.check_num_arguments(14) {
            return;
        }

        let radius = self.arg_float(0);
        let Some(base) = self.parse_wheel_base(1, 2, 3) else {
            return;
        };
        let wheel = Wheel {
            radius,
            springiness: self.arg_float(10),
            damping: self.arg_float(11),
            face_material_name: self.arg_string(12),
            band_material_name: self.arg_string(13),
            base,
        };

        self.add_wheel_nodes(Keyword::Wheels, wheel.base.num_rays, 2);
        self.module_mut().wheels.push(wheel);
    }

    pub(super) fn parse_wheels2(&mut self) {
        if !self.check_num_arguments(17) {
            return;
        }

        let rim_radius = self.arg_float(0);
        let tyre_radius = self.arg_float(1);
        let Some(base) = self.parse_wheel_base(2, 3, 4) else {
            return;
        };
        let wheel = Wheel2 {
            rim_radius,
            tyre_radius,
            rim_springiness: self.arg_float(11),
            rim_damping: self.arg_float(12),
            tyre_springiness: self.arg_float(13),
            tyre_damping: self.arg_float(14),
            face_material_name: self.arg_string(15),
            band_material_name: self.arg_string(16),
            base,
        };

        self.add_wheel_nodes(Keyword::Wheels2, wheel.base.num_rays, 4);
        self.module_mut().wheels2.push(wheel);
    }

    pub(super) fn parse_meshwheels(&mut self) {
        self.parse_meshwheel_line(Keyword::Meshwheels);
    }

    pub(super) fn parse_meshwheels2(&mut self) {
        self.parse_meshwheel_line(Keyword::Meshwheels2);
    }

    fn parse_meshwheel_line(&mut self, source: Keyword) {
        if !self.check_num_arguments(16) {
            return;
        }

        let tyre_radius = self.arg_float(0);
        let rim_radius = self.arg_float(1);
        let Some(base) = self.parse_wheel_base(2, 3, 4) else {
            return;
        };
        let wheel = MeshWheel {
            is_meshwheel2: source == Keyword::Meshwheels2,
            tyre_radius,
            rim_radius,
            spring: self.arg_float(11),
            damping: self.arg_float(12),
            side: self.arg_wheel_side(13),
            mesh_name: self.arg_string(14),
            material_name: self.arg_string(15),
            base,
        };

        self.add_wheel_nodes(source, wheel.base.num_rays, 2);
        self.module_mut().mesh_wheels.push(wheel);
    }

    pub(super) fn parse_flexbodywheels(&mut self) {
        if !self.check_num_arguments(16) {
            return;
        }

        let tyre_radius = self.arg_float(0);
        let rim_radius = self.arg_float(1);
        let Some(base) = self.parse_wheel_base(2, 3, 4) else {
            return;
        };
        let wheel = FlexBodyWheel {
            tyre_radius,
            rim_radius,
            tyre_springiness: self.arg_float(11),
            tyre_damping: self.arg_float(12),
            rim_springiness: self.arg_float(13),
            rim_damping: self.arg_float(14),
            side: self.arg_wheel_side(15),
            rim_mesh_name: self.opt_string(16).unwrap_or_default(),
            tyre_mesh_name: self.opt_string(17).unwrap_or_default(),
            base,
        };

        self.add_wheel_nodes(Keyword::Flexbodywheels, wheel.base.num_rays, 4);
        self.module_mut().flexbodywheels.push(wheel);
    }

    pub(super) fn parse_wheeldetachers(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let detacher = WheelDetacher {
            wheel_id: self.arg_int(0),
            detacher_group: self.arg_int(1),
        };
        self.module_mut().wheeldetachers.push(detacher);
    }

    fn parse_differential_types(&mut self, letters: &str) -> Vec<DifferentialType> {
        let mut types = Vec::new();
        for c in letters.chars().filter(|c| !c.is_whitespace()) {
            match DifferentialType::from_char(c) {
                Some(kind) => types.push(kind),
                None => self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Ignoring invalid differential type '{}'", c),
                ),
            }
        }
        types
    }

    /// `axles`: `w1(a b), w2(c d), d(ol)` in any order.
    pub(super) fn parse_axles(&mut self) {
        let tokens = self.split_line(&[',']);
        let mut axle = Axle {
            wheels: [None, None],
            options: Vec::new(),
        };

        for token in &tokens {
            match parse_axle_property(token) {
                Some(AxleProperty::Wheel(slot, a, b)) => {
                    let nodes = [self.node_ref_from(a, false), self.node_ref_from(b, false)];
                    axle.wheels[slot] = Some(nodes);
                }
                Some(AxleProperty::Differential(letters)) => {
                    let types = self.parse_differential_types(letters);
                    axle.options.extend(types);
                }
                None => {
                    self.error(
                        DiagnosticKind::ValueDecode,
                        format!("Invalid axle property '{}', ignoring whole line", token),
                    );
                    return;
                }
            }
        }

        self.module_mut().axles.push(axle);
    }

    /// `interaxles`: two one-based axle numbers and `d(...)`.
    pub(super) fn parse_interaxles(&mut self) {
        let tokens = self.split_line(&[',']);
        if !self.check_token_count(tokens.len(), 3) {
            return;
        }

        let a1 = self.int_of(&tokens[0]).saturating_sub(1);
        let a2 = self.int_of(&tokens[1]).saturating_sub(1);
        let options = match parse_axle_property(&tokens[2]) {
            Some(AxleProperty::Differential(letters)) => self.parse_differential_types(letters),
            _ => {
                self.error(
                    DiagnosticKind::ValueDecode,
                    format!("Invalid interaxle property '{}', ignoring whole line", tokens[2]),
                );
                return;
            }
        };

        self.module_mut().interaxles.push(InterAxle { a1, a2, options });
    }

    pub(super) fn parse_transfercase(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let transfercase = TransferCase {
            a1: self.arg_int(0).saturating_sub(1),
            a2: self.arg_int(1).saturating_sub(1),
            has_2wd: self.opt_int(2).is_some_and(|v| v != 0),
            has_2wd_lo: self.opt_int(3).is_some_and(|v| v != 0),
            gear_ratios: (4..self.num_args()).map(|i| self.arg_float(i)).collect(),
        };
        self.module_mut().transfercase.push(transfercase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::parser::{parse_str, ParseOutcome};
    use crate::types::{NodeId, WheelBraking, WheelPropulsion, WheelSide};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseOutcome {
        parse_str(source, &ParserConfig::default())
    }

    const NODES: &str = "truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\n2, 0, 1, 0\n";

    #[test]
    fn test_axle_property_forms() {
        assert_eq!(parse_axle_property("w1(0 1)"), Some(AxleProperty::Wheel(0, "0", "1")));
        assert_eq!(parse_axle_property(" w2( a b ) "), Some(AxleProperty::Wheel(1, "a", "b")));
        assert_eq!(parse_axle_property("d(lo)"), Some(AxleProperty::Differential("lo")));
        assert_eq!(parse_axle_property("w3(0 1)"), None);
        assert_eq!(parse_axle_property("w1(0)"), None);
        assert_eq!(parse_axle_property("x"), None);
    }

    #[test]
    fn test_wheels_fields_and_generated_nodes() {
        let src = format!(
            "{}wheels\n0.5, 0.3, 6, 0, 1, 9999, 1, 2, 2, 40, 800000, 4000, tracks/wheelface, tracks/wheelband\n",
            NODES
        );
        let outcome = parse(&src);
        let wheel = &outcome.document.root.wheels[0];

        assert_eq!(wheel.radius, 0.5);
        assert_eq!(wheel.base.num_rays, 6);
        assert_eq!(wheel.base.rigidity_node, None);
        assert_eq!(wheel.base.braking, WheelBraking::FootHand);
        assert_eq!(wheel.base.propulsion, WheelPropulsion::Backward);
        assert_eq!(wheel.band_material_name, "tracks/wheelband");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_meshwheels_side_and_flavour() {
        let src = format!(
            "{}meshwheels2\n0.5, 0.3, 0.2, 8, 0, 1, 2, 0, 0, 2, 30, 1e5, 800, r, rim.mesh, tyre-material\n",
            NODES
        );
        let outcome = parse(&src);
        let wheel = &outcome.document.root.mesh_wheels[0];

        assert!(wheel.is_meshwheel2);
        assert_eq!(wheel.side, WheelSide::Right);
        assert!(wheel.base.rigidity_node.is_some());
        assert_eq!(wheel.mesh_name, "rim.mesh");
    }

    #[test]
    fn test_flexbodywheels_optional_meshes() {
        let src = format!(
            "{}flexbodywheels\n0.5, 0.3, 0.2, 8, 0, 1, 9999, 0, 1, 2, 30, 1e5, 800, 2e5, 900, l\n",
            NODES
        );
        let outcome = parse(&src);
        let wheel = &outcome.document.root.flexbodywheels[0];

        assert_eq!(wheel.rim_damping, 900.0);
        assert_eq!(wheel.rim_mesh_name, "");
        assert_eq!(wheel.tyre_mesh_name, "");
    }

    #[test]
    fn test_axles() {
        let src = format!("{}axles\nw1(0 1), w2(1 2), d(lx)\nw1(0 1), bogus\n", NODES);
        let outcome = parse(&src);
        let axles = &outcome.document.root.axles;

        assert_eq!(axles.len(), 1);
        assert!(axles[0].wheels.iter().all(Option::is_some));
        assert_eq!(axles[0].options, vec![DifferentialType::Locked]);
        assert_eq!(outcome.diagnostics.warning_count(), 1);
        assert_eq!(outcome.diagnostics.error_count(), 1);
    }

    #[test]
    fn test_interaxles_and_transfercase() {
        let src = "truck\ninteraxles\n1, 2, d(vs)\n1, 2, w1(0 1)\ntransfercase\n1, 2, 1, 0, 2.5, 1.0\n";
        let outcome = parse(src);
        let root = &outcome.document.root;

        assert_eq!(root.interaxles.len(), 1);
        assert_eq!((root.interaxles[0].a1, root.interaxles[0].a2), (0, 1));
        assert_eq!(
            root.interaxles[0].options,
            vec![DifferentialType::Viscous, DifferentialType::Split]
        );
        assert!(root.transfercase[0].has_2wd);
        assert!(!root.transfercase[0].has_2wd_lo);
        assert_eq!(root.transfercase[0].gear_ratios, vec![2.5, 1.0]);
        assert_eq!(outcome.diagnostics.error_count(), 1);
    }

    #[test]
    fn test_wheel_ray_count_is_capped() {
        let src = format!(
            "{}wheels\n0.5, 0.3, 2000000000, 0, 1, 9999, 1, 1, 0, 40, 800000, 4000, face, band\nbeams\n0, 2\n",
            NODES
        );
        let outcome = parse(&src);
        let root = &outcome.document.root;

        assert!(root.wheels.is_empty());
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
        assert_eq!(outcome.diagnostics.error_count(), 1);
        assert_eq!(root.beams.len(), 1);
        assert_eq!(
            outcome.document.node_refs.resolve(root.beams[0].nodes[1]),
            &NodeId::Num(2)
        );
    }

    #[test]
    fn test_axle_numbers_at_integer_minimum() {
        let src = "truck\ninteraxles\n-2147483648, 2, d(o)\ntransfercase\n-2147483648, 2\n";
        let outcome = parse(src);
        let root = &outcome.document.root;

        assert_eq!((root.interaxles[0].a1, root.interaxles[0].a2), (i32::MIN, 1));
        assert_eq!((root.transfercase[0].a1, root.transfercase[0].a2), (i32::MIN, 1));
    }
}
