//! Directive dispatch and the directives that touch parser state.
//!
//! Directives are single lines starting with a keyword. They are parsed in
//! place and, apart from `submesh`, `section` and the three file metadata
//! lines, leave the open block alone.

use super::defaults::{BeamDefaultsUpdate, NodeDefaultsUpdate};
use super::keyword::Keyword;
use super::Parser;
use crate::diagnostics::DiagnosticKind;
use crate::types::{
    Author, BeamDefaultsScale, CollisionRange, ExtCamera, FileFormatVersion, Fileinfo, Guid,
    SkeletonSettings,
};

/// Handler for a directive keyword.
pub(super) fn handler(keyword: Keyword) -> Option<fn(&mut Parser)> {
    let handler: fn(&mut Parser) = match keyword {
        Keyword::AddAnimation => Parser::parse_add_animation,
        Keyword::AntiLockBrakes => Parser::parse_anti_lock_brakes,
        Keyword::Author => Parser::parse_author,
        Keyword::Backmesh => Parser::parse_backmesh,
        Keyword::Cruisecontrol => Parser::parse_cruise_control,
        Keyword::DetacherGroup => Parser::parse_detacher_group,
        Keyword::Extcamera => Parser::parse_extcamera,
        Keyword::Fileformatversion => Parser::parse_file_format_version,
        Keyword::Fileinfo => Parser::parse_fileinfo,
        Keyword::FlexbodyCameraMode => Parser::parse_flexbody_camera_mode,
        Keyword::Forset => Parser::parse_forset,
        Keyword::Guid => Parser::parse_guid,
        Keyword::PropCameraMode => Parser::parse_prop_camera_mode,
        Keyword::Section => Parser::parse_section,
        Keyword::SetBeamDefaults => Parser::parse_set_beam_defaults,
        Keyword::SetBeamDefaultsScale => Parser::parse_set_beam_defaults_scale,
        Keyword::SetCollisionRange => Parser::parse_set_collision_range,
        Keyword::SetDefaultMinimass => Parser::parse_set_default_minimass,
        Keyword::SetInertiaDefaults => Parser::parse_set_inertia_defaults,
        Keyword::SetManagedmaterialsOptions => Parser::parse_set_managed_materials_options,
        Keyword::SetNodeDefaults => Parser::parse_set_node_defaults,
        Keyword::SetSkeletonSettings => Parser::parse_set_skeleton_settings,
        Keyword::SpeedLimiter => Parser::parse_speed_limiter,
        Keyword::Submesh => Parser::parse_submesh,
        Keyword::SubmeshGroundmodel => Parser::parse_submesh_groundmodel,
        Keyword::TractionControl => Parser::parse_traction_control,
        _ => return None,
    };
    Some(handler)
}

impl Parser {
    fn parse_set_node_defaults(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let load_weight = Some(self.arg_float(1));
        let friction = self.opt_float(2);
        let volume = self.opt_float(3);
        let surface = self.opt_float(4);
        let options = self
            .opt_string(5)
            .map(|text| self.parse_node_options(&text));

        self.defaults.set_node_defaults(NodeDefaultsUpdate {
            load_weight,
            friction,
            volume,
            surface,
            options,
        });
    }

    fn parse_set_beam_defaults(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let update = BeamDefaultsUpdate {
            springiness: Some(self.arg_float(1)),
            damping_constant: self.opt_float(2),
            deformation_threshold: self.opt_float(3),
            breaking_threshold: self.opt_float(4),
            visual_beam_diameter: self.opt_float(5),
            beam_material_name: self.opt_string(6),
            plastic_deform_coef: self.opt_float(7),
        };
        let advanced = self.document.flags.enable_advanced_deformation;
        self.defaults.set_beam_defaults(update, advanced);
    }

    fn parse_set_beam_defaults_scale(&mut self) {
        if !self.check_num_arguments(5) {
            return;
        }
        let scale = BeamDefaultsScale {
            springiness: self.arg_float(1),
            damping_constant: self.arg_float(2),
            deformation_threshold_constant: self.arg_float(3),
            breaking_threshold_constant: self.arg_float(4),
        };
        self.defaults.set_beam_defaults_scale(scale);
    }

    fn parse_set_inertia_defaults(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let start_delay = self.arg_float(1);
        let stop_delay = self.opt_float(2);
        let start_function = self.opt_string(3);
        let stop_function = self.opt_string(4);
        self.defaults
            .set_inertia_defaults(start_delay, stop_delay, start_function, stop_function);
    }

    fn parse_set_default_minimass(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let min_mass = self.arg_float(1);
        self.defaults.set_default_minimass(min_mass);
    }

    fn parse_set_managed_materials_options(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let double_sided = self.arg_char(1) != Some('0');
        self.defaults.set_managed_materials_options(double_sided);
    }

    fn parse_detacher_group(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let group = if self.arg(1) == "end" {
            0
        } else {
            self.arg_int(1)
        };
        self.defaults.set_detacher_group(group);
    }

    /// `section <version> <name>`; the version is not used.
    fn parse_section(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }
        let name = self.arg_string(2);
        self.enter_module(name);
    }

    fn parse_file_format_version(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let version = self.arg_int(1);
        self.module_mut()
            .fileformatversion
            .push(FileFormatVersion { version });
        self.close_block();
    }

    fn parse_author(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let author = Author {
            author_type: self.arg_string(1),
            forum_account_id: self.opt_int(2),
            name: self.opt_string(3),
            email: self.opt_string(4),
        };
        self.module_mut().author.push(author);
        self.close_block();
    }

    fn parse_fileinfo(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let fileinfo = Fileinfo {
            unique_id: self.arg_string(1),
            category_id: self.opt_int(2),
            file_version: self.opt_int(3),
        };
        self.module_mut().fileinfo.push(fileinfo);
        self.close_block();
    }

    fn parse_guid(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let guid = self.arg_string(1);
        self.module_mut().guid.push(Guid { guid });
    }

    fn parse_set_collision_range(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let node_collision_range = self.arg_float(1);
        self.module_mut()
            .set_collision_range
            .push(CollisionRange { node_collision_range });
    }

    /// Updates the module's single entry; negative values mean default.
    fn parse_set_skeleton_settings(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let visibility = self.arg_float(1);
        let thickness = self.opt_float(2);

        let module = self.module_mut();
        if module.set_skeleton_settings.is_empty() {
            module.set_skeleton_settings.push(SkeletonSettings::default());
        }
        let Some(skeleton) = module.set_skeleton_settings.first_mut() else {
            return;
        };
        skeleton.visibility_range_meters = if visibility < 0.0 {
            SkeletonSettings::DEFAULT_VISIBILITY_RANGE
        } else {
            visibility
        };
        if let Some(thickness) = thickness {
            skeleton.beam_thickness_meters = if thickness < 0.0 {
                SkeletonSettings::DEFAULT_BEAM_THICKNESS
            } else {
                thickness
            };
        }
    }

    /// `extcamera classic|cinecam|node <node>`; updates the module's single entry.
    fn parse_extcamera(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let mode = match self.arg(1) {
            "classic" => ExtCamera::Classic,
            "cinecam" => ExtCamera::Cinecam,
            "node" if self.num_args() > 2 => ExtCamera::Node(self.arg_node(2)),
            other => {
                let other = other.to_string();
                self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Invalid extcamera mode '{}', ignoring line", other),
                );
                return;
            }
        };

        let module = self.module_mut();
        match module.extcamera.first_mut() {
            Some(current) => *current = mode,
            None => module.extcamera.push(mode),
        }
    }

    fn parse_submesh(&mut self) {
        let flushed = self.state.begin_submesh();
        self.commit(flushed);
    }

    fn parse_backmesh(&mut self) {
        match self.state.submesh_mut() {
            Some(submesh) => submesh.backmesh = true,
            None => self.error(
                DiagnosticKind::Structural,
                "'backmesh' must come after 'submesh', ignoring",
            ),
        }
    }

    fn parse_submesh_groundmodel(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }
        let name = self.arg_string(1);
        self.module_mut().submesh_groundmodel.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::handler;
    use crate::config::ParserConfig;
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::keyword::{Keyword, KeywordClass};
    use crate::parser::parse_str;
    use crate::types::{ExtCamera, NodeOptions, SkeletonSettings};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> crate::parser::ParseOutcome {
        parse_str(source, &ParserConfig::default())
    }

    #[test]
    fn test_every_directive_has_a_handler() {
        for kw in Keyword::ALL {
            let is_directive = kw.class() == KeywordClass::Directive;
            assert_eq!(handler(*kw).is_some(), is_directive, "{:?}", kw);
        }
    }

    #[test]
    fn test_metadata_directives() {
        let src = "\
truck
fileformatversion 450
author chassis 123 Alex alex@example.com
fileinfo abc-123, 7, 2
guid 0f1e2d3c-aaaa
";
        let outcome = parse(src);
        let root = &outcome.document.root;

        assert_eq!(root.fileformatversion[0].version, 450);
        assert_eq!(root.author[0].author_type, "chassis");
        assert_eq!(root.author[0].forum_account_id, Some(123));
        assert_eq!(root.author[0].name.as_deref(), Some("Alex"));
        assert_eq!(root.author[0].email.as_deref(), Some("alex@example.com"));
        assert_eq!(root.fileinfo[0].unique_id, "abc-123");
        assert_eq!(root.fileinfo[0].category_id, Some(7));
        assert_eq!(root.fileinfo[0].file_version, Some(2));
        assert_eq!(root.guid[0].guid, "0f1e2d3c-aaaa");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_set_node_defaults_options() {
        let src = "\
truck
set_node_defaults -1, 0.5, -1, -1, hq
nodes
0, 0, 0, 0
";
        let outcome = parse(src);
        let defaults = &outcome.document.root.nodes[0].node_defaults;

        assert_eq!(defaults.load_weight, 10.0);
        assert_eq!(defaults.friction, 0.5);
        assert_eq!(defaults.options, NodeOptions::HOOK_POINT);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_beam_defaults_capture_advanced_deformation() {
        let src = "\
truck
set_beam_defaults 100, 200
enable_advanced_deformation
set_beam_defaults_scale 2, 1, 1, 1
set_beam_defaults -1, -1, -1, -1, 0.1, tracks/rope, 0.3
nodes
0, 0, 0, 0
1, 1, 0, 0
beams
0, 1
";
        let outcome = parse(src);
        let defaults = &outcome.document.root.beams[0].defaults;

        assert_eq!(defaults.springiness, 100.0);
        assert_eq!(defaults.damping_constant, 200.0);
        assert_eq!(defaults.visual_beam_diameter, 0.1);
        assert_eq!(defaults.beam_material_name, "tracks/rope");
        assert_eq!(defaults.plastic_deform_coef, 0.3);
        assert_eq!(defaults.scale.springiness, 2.0);
        assert!(defaults.enable_advanced_deformation);
        assert!(defaults.is_plastic_deform_coef_user_defined);
    }

    #[test]
    fn test_detacher_group() {
        let src = "\
truck
nodes
0, 0, 0, 0
1, 1, 0, 0
detacher_group 3
beams
0, 1
detacher_group end
1, 0
";
        let outcome = parse(src);
        let beams = &outcome.document.root.beams;
        assert_eq!(beams[0].detacher_group, 3);
        assert_eq!(beams[1].detacher_group, 0);
    }

    #[test]
    fn test_skeleton_settings_single_entry() {
        let outcome = parse("truck\nset_skeleton_settings 200 0.05\nset_skeleton_settings -1\n");
        let settings = &outcome.document.root.set_skeleton_settings;

        assert_eq!(settings.len(), 1);
        assert_eq!(
            settings[0].visibility_range_meters,
            SkeletonSettings::DEFAULT_VISIBILITY_RANGE
        );
        assert_eq!(settings[0].beam_thickness_meters, 0.05);
    }

    #[test]
    fn test_extcamera_updates_single_entry() {
        let outcome = parse("truck\nextcamera cinecam\nextcamera node 4\nextcamera orbit\n");
        let root = &outcome.document.root;

        assert_eq!(root.extcamera.len(), 1);
        assert!(matches!(root.extcamera[0], ExtCamera::Node(_)));
        assert_eq!(outcome.diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_submesh_flow() {
        let src = "\
truck
nodes
0, 0, 0, 0
1, 1, 0, 0
2, 0, 1, 0
backmesh
submesh
texcoords
0, 0.5, 0.5
cab
0, 1, 2, c
backmesh
submesh
cab
0, 2, 1
";
        let outcome = parse(src);
        let submeshes = &outcome.document.root.submeshes;

        assert_eq!(submeshes.len(), 2);
        assert_eq!(submeshes[0].texcoords.len(), 1);
        assert_eq!(submeshes[0].cab_triangles.len(), 1);
        assert!(submeshes[0].backmesh);
        assert!(!submeshes[1].backmesh);
        assert_eq!(submeshes[1].cab_triangles.len(), 1);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 1);
    }

    #[test]
    fn test_fileformatversion_closes_block() {
        let outcome = parse("truck\nnodes\nfileformatversion 3\n0, 0, 0, 0\n");
        assert!(outcome.document.root.nodes.is_empty());
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 1);
    }
}
