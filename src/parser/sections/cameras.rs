//! Camera sections.

use std::rc::Rc;

use crate::diagnostics::DiagnosticKind;
use crate::parser::keyword::Keyword;
use crate::parser::Parser;
use crate::types::{Camera, Cinecam, Vec3, VideoCamera};

impl Parser {
    pub(super) fn parse_cameras(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let camera = Camera {
            center_node: self.arg_node(0),
            back_node: self.arg_node(1),
            left_node: self.arg_node(2),
        };
        self.module_mut().cameras.push(camera);
    }

    /// `cinecam`: position, eight attachment nodes, then optional spring, damping and mass.
    ///
    /// Each cinecam adds one generated node to the numbering.
    pub(super) fn parse_cinecam(&mut self) {
        if !self.check_num_arguments(11) {
            return;
        }

        let cinecam = Cinecam {
            position: Vec3::new(self.arg_float(0), self.arg_float(1), self.arg_float(2)),
            nodes: std::array::from_fn(|i| self.arg_node(3 + i)),
            spring: self.opt_float(11).unwrap_or(Cinecam::DEFAULT_SPRING),
            damping: self.opt_float(12).unwrap_or(Cinecam::DEFAULT_DAMPING),
            node_mass: self
                .opt_float(13)
                .filter(|mass| *mass > 0.0)
                .unwrap_or(Cinecam::DEFAULT_NODE_MASS),
            node_defaults: Rc::clone(&self.defaults.node),
            beam_defaults: Rc::clone(&self.defaults.beam),
        };
        self.importer.add_generated(Keyword::Cinecam, 1);
        self.module_mut().cinecam.push(cinecam);
    }

    pub(super) fn parse_camerarail(&mut self) {
        let node = self.arg_node(0);
        match self.state.camera_rail_mut() {
            Some(rail) => rail.nodes.push(node),
            None => self.error(
                DiagnosticKind::Structural,
                "No camera rail is open, ignoring line",
            ),
        }
    }

    pub(super) fn parse_videocamera(&mut self) {
        if !self.check_num_arguments(19) {
            return;
        }

        let camera = VideoCamera {
            reference_node: self.arg_node(0),
            left_node: self.arg_node(1),
            bottom_node: self.arg_node(2),
            alt_reference_node: self.arg_nullable_node(3),
            alt_orientation_node: self.arg_nullable_node(4),
            offset: Vec3::new(self.arg_float(5), self.arg_float(6), self.arg_float(7)),
            rotation: Vec3::new(self.arg_float(8), self.arg_float(9), self.arg_float(10)),
            field_of_view: self.arg_float(11),
            texture_width: self.arg_int(12),
            texture_height: self.arg_int(13),
            min_clip_distance: self.arg_float(14),
            max_clip_distance: self.arg_float(15),
            camera_role: self.arg_int(16),
            camera_mode: self.arg_int(17),
            material_name: self.arg_string(18),
            camera_name: self.opt_string(19),
        };
        self.module_mut().videocameras.push(camera);
    }
}
