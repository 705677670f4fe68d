//! Props, flexbodies, flares, materials and the cab mesh.

use crate::diagnostics::DiagnosticKind;
use crate::parser::keyword::Keyword;
use crate::parser::line::split_trimmed;
use crate::parser::Parser;
use crate::types::{
    Animation, AnimationMode, AnimationSource, BeaconProp, Cab, CabOptions, CameraMode,
    DashboardProp, Exhaust, FlareType, Flare2, Flexbody, ManagedMaterial, ManagedMaterialType,
    MaterialFlareBinding, MotorSource, MotorSourceKind, NodeRange, Particle, Prop, Rgb,
    SpecialProp, Texcoord, Vec3,
};

/// Special role of a prop, read from its mesh name.
fn special_prop(mesh_name: &str) -> SpecialProp {
    if mesh_name.contains("leftmirror") {
        return SpecialProp::MirrorLeft;
    }
    if mesh_name.contains("rightmirror") {
        return SpecialProp::MirrorRight;
    }
    if mesh_name.contains("dashboard-rh") {
        return SpecialProp::DashboardRight;
    }
    if mesh_name.contains("dashboard") {
        return SpecialProp::DashboardLeft;
    }

    let lower = mesh_name.to_ascii_lowercase();
    const PREFIXES: [(&str, SpecialProp); 7] = [
        ("spinprop", SpecialProp::AeroPropSpin),
        ("pale", SpecialProp::AeroPropBlade),
        ("seat2", SpecialProp::DriverSeat2),
        ("seat", SpecialProp::DriverSeat),
        ("beacon", SpecialProp::Beacon),
        ("redbeacon", SpecialProp::RedBeacon),
        ("lightb", SpecialProp::Lightbar),
    ];
    PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map_or(SpecialProp::None, |(_, special)| *special)
}

fn cab_option(c: char) -> Option<CabOptions> {
    match c {
        'n' => Some(CabOptions::empty()),
        'c' => Some(CabOptions::CONTACT),
        'b' => Some(CabOptions::BUOYANT),
        'D' => Some(CabOptions::CONTACT | CabOptions::BUOYANT),
        'p' => Some(CabOptions::TOUGHER),
        'u' => Some(CabOptions::INVULNERABLE),
        'F' => Some(CabOptions::TOUGHER | CabOptions::BUOYANT),
        'S' => Some(CabOptions::INVULNERABLE | CabOptions::BUOYANT),
        _ => None,
    }
}

/// `-2` always, `-1` external cameras only, `0..` a cinecam index.
fn camera_mode(value: i32) -> Option<CameraMode> {
    match value {
        -2 => Some(CameraMode::Always),
        -1 => Some(CameraMode::External),
        n => u32::try_from(n).ok().map(CameraMode::Cinecam),
    }
}

fn animation_mode(name: &str) -> Option<AnimationMode> {
    let mode = match name {
        "x-rotation" => AnimationMode::ROTATION_X,
        "y-rotation" => AnimationMode::ROTATION_Y,
        "z-rotation" => AnimationMode::ROTATION_Z,
        "x-offset" => AnimationMode::OFFSET_X,
        "y-offset" => AnimationMode::OFFSET_Y,
        "z-offset" => AnimationMode::OFFSET_Z,
        _ => return None,
    };
    Some(mode)
}

fn animation_source(name: &str) -> Option<AnimationSource> {
    let source = match name {
        "airspeed" => AnimationSource::AIRSPEED,
        "vvi" => AnimationSource::VERTICAL_VELOCITY,
        "altimeter100k" => AnimationSource::ALTIMETER_100K,
        "altimeter10k" => AnimationSource::ALTIMETER_10K,
        "altimeter1k" => AnimationSource::ALTIMETER_1K,
        "aoa" => AnimationSource::ANGLE_OF_ATTACK,
        "flap" => AnimationSource::FLAP,
        "airbrake" => AnimationSource::AIR_BRAKE,
        "roll" => AnimationSource::ROLL,
        "pitch" => AnimationSource::PITCH,
        "brakes" => AnimationSource::BRAKES,
        "accel" => AnimationSource::ACCEL,
        "clutch" => AnimationSource::CLUTCH,
        "speedo" => AnimationSource::SPEEDO,
        "tacho" => AnimationSource::TACHO,
        "turbo" => AnimationSource::TURBO,
        "parking" => AnimationSource::PARKING,
        "shifterman1" => AnimationSource::SHIFT_LEFT_RIGHT,
        "shifterman2" => AnimationSource::SHIFT_BACK_FORTH,
        "sequential" => AnimationSource::SEQUENTIAL_SHIFT,
        "shifterlin" => AnimationSource::SHIFTERLIN,
        "torque" => AnimationSource::TORQUE,
        "heading" => AnimationSource::HEADING,
        "difflock" => AnimationSource::DIFFLOCK,
        "rudderboat" => AnimationSource::BOAT_RUDDER,
        "throttleboat" => AnimationSource::BOAT_THROTTLE,
        "steeringwheel" => AnimationSource::STEERING_WHEEL,
        "aileron" => AnimationSource::AILERON,
        "elevator" => AnimationSource::ELEVATOR,
        "rudderair" => AnimationSource::AIR_RUDDER,
        "permanent" => AnimationSource::PERMANENT,
        "event" => AnimationSource::EVENT,
        _ => return None,
    };
    Some(source)
}

/// `throttle1`, `rpm2`, ...: per-engine source with its number.
fn motor_source(name: &str) -> Option<MotorSource> {
    const PREFIXES: [(&str, MotorSourceKind); 5] = [
        ("throttle", MotorSourceKind::AeroThrottle),
        ("rpm", MotorSourceKind::AeroRpm),
        ("aerotorq", MotorSourceKind::AeroTorque),
        ("aeropit", MotorSourceKind::AeroPitch),
        ("aerostatus", MotorSourceKind::AeroStatus),
    ];
    PREFIXES.iter().find_map(|(prefix, source)| {
        let number = name.strip_prefix(prefix)?;
        let motor = number.parse().ok()?;
        Some(MotorSource {
            source: *source,
            motor,
        })
    })
}

/// Apply one comma separated item of an `add_animation` line.
///
/// Returns a reason when (part of) the item was not understood.
fn apply_animation_item(animation: &mut Animation, item: &str) -> Option<String> {
    let parts: Vec<&str> = item.split(':').map(str::trim).collect();
    match parts.as_slice() {
        [single] => {
            let mode = match *single {
                "autoanimate" => AnimationMode::AUTO_ANIMATE,
                "noflip" => AnimationMode::NO_FLIP,
                "bounce" => AnimationMode::BOUNCE,
                "eventlock" => AnimationMode::EVENT_LOCK,
                other => return Some(format!("invalid keyword '{}'", other)),
            };
            animation.mode |= mode;
            None
        }
        ["mode", values] => {
            let mut reason = None;
            for value in split_trimmed(values, &['|']) {
                match animation_mode(value) {
                    Some(mode) => animation.mode |= mode,
                    None => reason = Some(format!("invalid mode '{}'", value)),
                }
            }
            reason
        }
        ["event", value] => {
            animation.event = Some(value.to_ascii_uppercase());
            None
        }
        ["source", values] => {
            let mut reason = None;
            for value in split_trimmed(values, &['|']) {
                if let Some(source) = animation_source(value) {
                    animation.source |= source;
                } else if let Some(motor) = motor_source(value) {
                    animation.motor_sources.push(motor);
                } else {
                    reason = Some(format!("invalid source '{}'", value));
                }
            }
            reason
        }
        [key, _] => Some(format!("invalid keyword '{}'", key)),
        _ => Some("invalid item".to_string()),
    }
}

impl Parser {
    pub(super) fn parse_props(&mut self) {
        if !self.check_num_arguments(10) {
            return;
        }

        let mesh_name = self.arg_string(9);
        let special = special_prop(&mesh_name);
        let mut prop = Prop {
            reference_node: self.arg_node(0),
            x_axis_node: self.arg_node(1),
            y_axis_node: self.arg_node(2),
            offset: Vec3::new(self.arg_float(3), self.arg_float(4), self.arg_float(5)),
            rotation: Vec3::new(self.arg_float(6), self.arg_float(7), self.arg_float(8)),
            mesh_name,
            special,
            beacon: None,
            dashboard: None,
            animations: Vec::new(),
            camera_mode: CameraMode::default(),
        };

        match special {
            SpecialProp::Beacon if self.num_args() >= 14 => {
                prop.beacon = Some(BeaconProp {
                    flare_material_name: self.arg(10).trim().to_string(),
                    color: Rgb {
                        r: self.arg_float(11),
                        g: self.arg_float(12),
                        b: self.arg_float(13),
                    },
                });
            }
            SpecialProp::DashboardLeft | SpecialProp::DashboardRight => {
                let mut dashboard = DashboardProp {
                    mesh_name: self.opt_string(10),
                    ..DashboardProp::default()
                };
                if self.num_args() > 13 {
                    dashboard.offset = Some(Vec3::new(
                        self.arg_float(11),
                        self.arg_float(12),
                        self.arg_float(13),
                    ));
                }
                if let Some(angle) = self.opt_float(14) {
                    dashboard.rotation_angle = angle;
                }
                prop.dashboard = Some(dashboard);
            }
            _ => {}
        }

        self.module_mut().props.push(prop);
    }

    /// `add_animation`: ratio, limits, then `key: value` items. Applies to the last prop.
    pub(in crate::parser) fn parse_add_animation(&mut self) {
        let tokens = self.split_after_keyword(Keyword::AddAnimation, &[',']);
        if !self.check_token_count(tokens.len(), 4) {
            return;
        }

        let mut animation = Animation {
            ratio: self.float_of(&tokens[0]),
            lower_limit: self.float_of(&tokens[1]),
            upper_limit: self.float_of(&tokens[2]),
            ..Animation::default()
        };
        for item in &tokens[3..] {
            if let Some(reason) = apply_animation_item(&mut animation, item) {
                self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Ignoring invalid token '{}' ({})", item, reason),
                );
            }
        }

        match self.module_mut().props.last_mut() {
            Some(prop) => prop.animations.push(animation),
            None => self.error(
                DiagnosticKind::Structural,
                "'add_animation' must follow a prop, ignoring",
            ),
        }
    }

    /// Camera mode argument of `prop_camera_mode` / `flexbody_camera_mode`.
    fn arg_camera_mode(&mut self) -> Option<CameraMode> {
        if !self.check_num_arguments(2) {
            return None;
        }
        let value = self.arg_int(1);
        let mode = camera_mode(value);
        if mode.is_none() {
            self.error(
                DiagnosticKind::ValueDecode,
                format!("Invalid camera mode ({}), skipping line", value),
            );
        }
        mode
    }

    pub(in crate::parser) fn parse_prop_camera_mode(&mut self) {
        let Some(mode) = self.arg_camera_mode() else {
            return;
        };
        match self.module_mut().props.last_mut() {
            Some(prop) => prop.camera_mode = mode,
            None => self.error(
                DiagnosticKind::Structural,
                "'prop_camera_mode' must follow a prop, ignoring",
            ),
        }
    }

    pub(in crate::parser) fn parse_flexbody_camera_mode(&mut self) {
        let Some(mode) = self.arg_camera_mode() else {
            return;
        };
        match self.module_mut().flexbodies.last_mut() {
            Some(flexbody) => flexbody.camera_mode = mode,
            None => self.error(
                DiagnosticKind::Structural,
                "'flexbody_camera_mode' must follow a flexbody, ignoring",
            ),
        }
    }

    pub(super) fn parse_flexbodies(&mut self) {
        if !self.check_num_arguments(10) {
            return;
        }

        let flexbody = Flexbody {
            reference_node: self.arg_node(0),
            x_axis_node: self.arg_node(1),
            y_axis_node: self.arg_node(2),
            offset: Vec3::new(self.arg_float(3), self.arg_float(4), self.arg_float(5)),
            rotation: Vec3::new(self.arg_float(6), self.arg_float(7), self.arg_float(8)),
            mesh_name: self.arg_string(9),
            node_list_to_import: Vec::new(),
            camera_mode: CameraMode::default(),
        };
        self.module_mut().flexbodies.push(flexbody);
    }

    /// `forset`: node numbers and `a-b` ranges for the last flexbody.
    ///
    /// Items are read by legacy number only.
    pub(in crate::parser) fn parse_forset(&mut self) {
        let items = self.split_after_keyword(Keyword::Forset, &[',']);
        let mut ranges = Vec::with_capacity(items.len());
        for item in &items {
            let range = match item.split_once('-') {
                Some((a, b)) => NodeRange {
                    start: self.node_ref_from(a.trim(), true),
                    end: self.node_ref_from(b.trim(), true),
                },
                None => NodeRange::single(self.node_ref_from(item, true)),
            };
            ranges.push(range);
        }

        match self.module_mut().flexbodies.last_mut() {
            Some(flexbody) => flexbody.node_list_to_import.extend(ranges),
            None => self.error(
                DiagnosticKind::Structural,
                "'forset' must follow a flexbody, ignoring",
            ),
        }
    }

    pub(super) fn parse_flares(&mut self) {
        self.parse_flare_line(false);
    }

    pub(super) fn parse_flares2(&mut self) {
        self.parse_flare_line(true);
    }

    /// `flares2` adds a z offset; `flares` keeps it at 1.
    fn parse_flare_line(&mut self, v2: bool) {
        if !self.check_num_arguments(if v2 { 6 } else { 5 }) {
            return;
        }

        let mut flare = Flare2 {
            reference_node: self.arg_node(0),
            node_axis_x: self.arg_node(1),
            node_axis_y: self.arg_node(2),
            offset: Vec3::new(self.arg_float(3), self.arg_float(4), 1.0),
            flare_type: FlareType::default(),
            control_number: None,
            dashboard_link: None,
            blink_delay_milis: None,
            size: None,
            material_name: None,
        };
        let mut pos = 5;
        if v2 {
            flare.offset.z = self.arg_float(5);
            pos += 1;
        }

        if pos < self.num_args() {
            flare.flare_type = self.arg_flare_type(pos);
            pos += 1;
        }
        // The slot after the type is consumed whatever the type.
        if pos < self.num_args() {
            match flare.flare_type {
                FlareType::User => flare.control_number = Some(self.arg_int(pos)),
                FlareType::Dashboard => flare.dashboard_link = Some(self.arg_string(pos)),
                _ => {}
            }
            pos += 1;
        }
        flare.blink_delay_milis = self.opt_int(pos);
        flare.size = self.opt_float(pos + 1);
        flare.material_name = self.opt_string(pos + 2);

        self.module_mut().flares2.push(flare);
    }

    pub(super) fn parse_material_flare_bindings(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let binding = MaterialFlareBinding {
            flare_number: self.arg_int(0),
            material_name: self.arg_string(1),
        };
        self.module_mut().materialflarebindings.push(binding);
    }

    /// `managedmaterials`: name, type and texture maps, checked against the lookup.
    pub(super) fn parse_managed_materials(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let name = self.arg_string(0);
        let type_name = self.arg_string(1);
        let Some(kind) = ManagedMaterialType::from_name(&type_name) else {
            self.warn(
                DiagnosticKind::ValueDecode,
                format!("Unknown managed material type '{}', ignoring line", type_name),
            );
            return;
        };
        if !self.check_num_arguments(3) {
            return;
        }

        let diffuse_map = self.arg_string(2);
        let (damaged_diffuse_map, specular_map) = if kind.is_flexmesh() {
            (self.arg_managed_texture(3), self.arg_managed_texture(4))
        } else {
            (None, self.arg_managed_texture(3))
        };

        if !self.lookup.texture_exists(&diffuse_map) {
            self.warn(
                DiagnosticKind::Semantic,
                format!("Missing texture file: {}, ignoring material", diffuse_map),
            );
            return;
        }
        let damaged_diffuse_map = self.existing_texture(damaged_diffuse_map);
        let specular_map = self.existing_texture(specular_map);

        let material = ManagedMaterial {
            name,
            kind,
            options: self.defaults.managed_materials,
            diffuse_map,
            damaged_diffuse_map,
            specular_map,
        };
        self.module_mut().managedmaterials.push(material);
    }

    /// Keep an optional texture only when the lookup knows it.
    fn existing_texture(&mut self, texture: Option<String>) -> Option<String> {
        let texture = texture?;
        if self.lookup.texture_exists(&texture) {
            Some(texture)
        } else {
            self.warn(
                DiagnosticKind::Semantic,
                format!("Missing texture file: {}", texture),
            );
            None
        }
    }

    pub(super) fn parse_cab(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let cab = Cab {
            nodes: [self.arg_node(0), self.arg_node(1), self.arg_node(2)],
            options: match self.opt_string(3) {
                Some(text) => self.decode_options(&text, "cab", cab_option),
                None => CabOptions::empty(),
            },
        };
        match self.state.submesh_mut() {
            Some(submesh) => submesh.cab_triangles.push(cab),
            None => self.error(
                DiagnosticKind::Structural,
                "'cab' must come after 'submesh', ignoring line",
            ),
        }
    }

    pub(super) fn parse_texcoords(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let texcoord = Texcoord {
            node: self.arg_node(0),
            u: self.arg_float(1),
            v: self.arg_float(2),
        };
        match self.state.submesh_mut() {
            Some(submesh) => submesh.texcoords.push(texcoord),
            None => self.error(
                DiagnosticKind::Structural,
                "'texcoords' must come after 'submesh', ignoring line",
            ),
        }
    }

    /// `exhausts`: the third argument is unused.
    pub(super) fn parse_exhausts(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let exhaust = Exhaust {
            reference_node: self.arg_node(0),
            direction_node: self.arg_node(1),
            particle_name: self.opt_string(3),
        };
        self.module_mut().exhausts.push(exhaust);
    }

    pub(super) fn parse_particles(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let particle = Particle {
            emitter_node: self.arg_node(0),
            reference_node: self.arg_node(1),
            particle_system_name: self.arg_string(2),
        };
        self.module_mut().particles.push(particle);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::ParserConfig;
    use crate::lookup::ResourceLookup;
    use crate::parser::{parse_str, ParseOutcome};
    use crate::types::NodeId;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseOutcome {
        parse_str(source, &ParserConfig::default())
    }

    struct KnownTextures(HashSet<&'static str>);

    impl ResourceLookup for KnownTextures {
        fn texture_exists(&self, name: &str) -> bool {
            self.0.contains(name)
        }
    }

    const NODES: &str = "truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\n2, 0, 1, 0\n";

    #[test]
    fn test_special_prop_detection() {
        assert_eq!(special_prop("leftmirror.mesh"), SpecialProp::MirrorLeft);
        assert_eq!(special_prop("my-dashboard-rh.mesh"), SpecialProp::DashboardRight);
        assert_eq!(special_prop("dashboard.mesh"), SpecialProp::DashboardLeft);
        assert_eq!(special_prop("Seat2.mesh"), SpecialProp::DriverSeat2);
        assert_eq!(special_prop("seat.mesh"), SpecialProp::DriverSeat);
        assert_eq!(special_prop("redbeacon.mesh"), SpecialProp::RedBeacon);
        assert_eq!(special_prop("lightbar.mesh"), SpecialProp::Lightbar);
        assert_eq!(special_prop("wheel.mesh"), SpecialProp::None);
    }

    #[test]
    fn test_beacon_and_dashboard_props() {
        let src = format!(
            "{}props\n0, 1, 2, 0, 0, 0, 0, 0, 0, beacon.mesh, tracks/beaconflare, 1, 0.5, 0\n\
             0, 1, 2, 0, 0, 0, 0, 0, 0, dashboard.mesh, dash.mesh\n",
            NODES
        );
        let outcome = parse(&src);
        let props = &outcome.document.root.props;

        let beacon = props[0].beacon.as_ref().map(|b| (b.flare_material_name.as_str(), b.color.g));
        assert_eq!(beacon, Some(("tracks/beaconflare", 0.5)));
        let dashboard = props[1].dashboard.as_ref();
        assert_eq!(dashboard.and_then(|d| d.mesh_name.as_deref()), Some("dash.mesh"));
        assert_eq!(dashboard.map(|d| d.rotation_angle), Some(160.0));
        assert_eq!(dashboard.and_then(|d| d.offset), None);
    }

    #[test]
    fn test_add_animation_items() {
        let mut animation = Animation::default();
        assert_eq!(apply_animation_item(&mut animation, "mode: x-rotation | y-offset"), None);
        assert_eq!(apply_animation_item(&mut animation, "source: tacho | rpm2"), None);
        assert_eq!(apply_animation_item(&mut animation, "event: truck_horn"), None);
        assert_eq!(apply_animation_item(&mut animation, "noflip"), None);
        assert!(apply_animation_item(&mut animation, "speed: 3").is_some());
        assert!(apply_animation_item(&mut animation, "source: nothing").is_some());

        assert_eq!(
            animation.mode,
            AnimationMode::ROTATION_X | AnimationMode::OFFSET_Y | AnimationMode::NO_FLIP
        );
        assert_eq!(animation.source, AnimationSource::TACHO);
        assert_eq!(
            animation.motor_sources,
            vec![MotorSource { source: MotorSourceKind::AeroRpm, motor: 2 }]
        );
        assert_eq!(animation.event.as_deref(), Some("TRUCK_HORN"));
    }

    #[test]
    fn test_add_animation_attaches_to_last_prop() {
        let src = format!(
            "{}add_animation 1, 0, 360, source: speedo\nprops\n\
             0, 1, 2, 0, 0, 0, 0, 0, 0, needle.mesh\n\
             add_animation 1, 0, 360, source: speedo, mode: z-rotation, bogus\n\
             prop_camera_mode 2\n",
            NODES
        );
        let outcome = parse(&src);
        let prop = &outcome.document.root.props[0];

        assert_eq!(prop.animations.len(), 1);
        assert_eq!(prop.animations[0].upper_limit, 360.0);
        assert_eq!(prop.camera_mode, CameraMode::Cinecam(2));
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 1);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_camera_modes() {
        assert_eq!(camera_mode(-2), Some(CameraMode::Always));
        assert_eq!(camera_mode(-1), Some(CameraMode::External));
        assert_eq!(camera_mode(0), Some(CameraMode::Cinecam(0)));
        assert_eq!(camera_mode(-3), None);
    }

    #[test]
    fn test_forset_ranges() {
        let src = format!(
            "{}flexbodies\n0, 1, 2, 0, 0, 0, 0, 0, 0, body.mesh\nforset 0-2, 1, -1\nflexbody_camera_mode -1\n",
            NODES
        );
        let outcome = parse(&src);
        let doc = &outcome.document;
        let flexbody = &doc.root.flexbodies[0];

        assert_eq!(flexbody.node_list_to_import.len(), 3);
        assert_eq!(flexbody.camera_mode, CameraMode::External);
        let first = flexbody.node_list_to_import[0];
        assert_eq!(doc.node_refs.resolve(first.start), &NodeId::Num(0));
        assert_eq!(doc.node_refs.resolve(first.end), &NodeId::Num(2));
        let open_start = flexbody.node_list_to_import[2];
        assert_eq!(doc.node_refs.resolve(open_start.start), &NodeId::Num(0));
        assert_eq!(doc.node_refs.resolve(open_start.end), &NodeId::Num(1));
    }

    #[test]
    fn test_forset_without_flexbody() {
        let outcome = parse("truck\nforset 1-4\n");
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 1);
    }

    #[test]
    fn test_flare_slots() {
        let src = format!(
            "{}flares\n0, 1, 2, 0.5, 0.5, u, 3, 100\nflares2\n0, 1, 2, 0.5, 0.5, 0.2, d, lights, -1, 2, tracks/flare\n0, 1, 2, 0.5, 0.5, 0.2, b, 9, 50\n",
            NODES
        );
        let outcome = parse(&src);
        let flares = &outcome.document.root.flares2;

        assert_eq!(flares[0].offset.z, 1.0);
        assert_eq!(flares[0].control_number, Some(3));
        assert_eq!(flares[0].blink_delay_milis, Some(100));
        assert_eq!(flares[1].offset.z, 0.2);
        assert_eq!(flares[1].dashboard_link.as_deref(), Some("lights"));
        assert_eq!(flares[1].size, Some(2.0));
        assert_eq!(flares[1].material_name.as_deref(), Some("tracks/flare"));
        assert_eq!(flares[2].flare_type, FlareType::BrakeLight);
        assert_eq!(flares[2].control_number, None);
        assert_eq!(flares[2].blink_delay_milis, Some(50));
    }

    #[test]
    fn test_managed_materials_texture_checks() {
        let lookup = KnownTextures(["body.dds", "body_spec.dds"].into_iter().collect());
        let mut parser = Parser::new(ParserConfig::default()).with_lookup(lookup);
        let src = "\
truck
set_managedmaterials_options 1
managedmaterials
body flexmesh_standard body.dds body_dmg.dds body_spec.dds
glass mesh_transparent glass.dds
chrome shiny chrome.dds
paint mesh_standard body.dds -
";
        for line in src.lines() {
            parser.process_line(line);
        }
        let outcome = parser.finish();
        let materials = &outcome.document.root.managedmaterials;

        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].kind, ManagedMaterialType::FlexmeshStandard);
        assert!(materials[0].options.double_sided);
        assert_eq!(materials[0].damaged_diffuse_map, None);
        assert_eq!(materials[0].specular_map.as_deref(), Some("body_spec.dds"));
        assert_eq!(materials[1].name, "paint");
        assert_eq!(materials[1].specular_map, None);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Semantic).count(), 2);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_cab_options_and_submesh_gate() {
        let src = format!("{}cab\n0, 1, 2, c\nsubmesh\ncab\n0, 1, 2, Dx\ntexcoords\n0, 0.5, 0.5\n", NODES);
        let outcome = parse(&src);
        let submeshes = &outcome.document.root.submeshes;

        assert_eq!(submeshes.len(), 1);
        assert_eq!(
            submeshes[0].cab_triangles[0].options,
            CabOptions::CONTACT | CabOptions::BUOYANT
        );
        assert_eq!(submeshes[0].texcoords.len(), 1);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 1);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 1);
    }

    #[test]
    fn test_exhausts_and_particles() {
        let src = format!("{}exhausts\n0, 1, 0, tracks/Smoke\nparticles\n0, 1, tracks/Dust\n", NODES);
        let outcome = parse(&src);
        let root = &outcome.document.root;

        assert_eq!(root.exhausts[0].particle_name.as_deref(), Some("tracks/Smoke"));
        assert_eq!(root.particles[0].particle_system_name, "tracks/Dust");
    }
}
