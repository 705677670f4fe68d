//! The parse result: a document with a root module and named modules.

use std::collections::BTreeMap;

use serde::Serialize;

use super::aero::*;
use super::cameras::*;
use super::engine::*;
use super::meta::*;
use super::node::{NodeArena, NodeRef};
use super::physics::*;
use super::visuals::*;
use super::wheels::*;

/// Name of the module records go to outside any `section`.
pub const ROOT_MODULE_NAME: &str = "_Root_";

/// Global switches set by argument-less directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentFlags {
    pub disable_default_sounds: bool,
    pub enable_advanced_deformation: bool,
    pub forward_commands: bool,
    pub import_commands: bool,
    pub hide_in_chooser: bool,
    pub lockgroup_default_nolock: bool,
    pub rescuer: bool,
    pub rollon: bool,
    pub slidenode_connect_instantly: bool,
}

macro_rules! module_records {
    ($($(#[$doc:meta])* $field:ident: $ty:ty,)+) => {
        /// Record collections of one module, in parse order.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct Module {
            pub name: String,
            $($(#[$doc])* pub $field: Vec<$ty>,)+
        }

        impl Module {
            /// Number of records per kind, skipping empty kinds.
            pub fn counts(&self) -> Vec<(&'static str, usize)> {
                let mut counts = Vec::new();
                $(
                    if !self.$field.is_empty() {
                        counts.push((stringify!($field), self.$field.len()));
                    }
                )+
                counts
            }
        }
    };
}

module_records! {
    nodes: Node,
    beams: Beam,
    shocks: Shock,
    shocks2: Shock2,
    shocks3: Shock3,
    hydros: Hydro,
    /// `commands` and `commands2`.
    commands2: Command2,
    animators: Animator,
    rotators: Rotator,
    rotators2: Rotator,
    ropes: Rope,
    ropables: Ropable,
    ties: Tie,
    triggers: Trigger,
    slidenodes: SlideNode,
    railgroups: RailGroup,
    hooks: Hook,
    lockgroups: Lockgroup,
    fixes: NodeRef,
    contacters: NodeRef,
    collisionboxes: CollisionBox,
    minimass: Minimass,
    globals: Globals,
    cinecam: Cinecam,
    cameras: Camera,
    camerarail: CameraRail,
    /// At most one entry; later lines update it.
    extcamera: ExtCamera,
    videocameras: VideoCamera,
    wheels: Wheel,
    wheels2: Wheel2,
    /// `meshwheels` and `meshwheels2`.
    mesh_wheels: MeshWheel,
    flexbodywheels: FlexBodyWheel,
    wheeldetachers: WheelDetacher,
    axles: Axle,
    interaxles: InterAxle,
    transfercase: TransferCase,
    engine: Engine,
    engoption: Engoption,
    engturbo: Engturbo,
    /// At most one entry; lines accumulate samples into it.
    torquecurve: TorqueCurve,
    brakes: Brakes,
    tractioncontrol: TractionControl,
    antilockbrakes: AntiLockBrakes,
    cruisecontrol: CruiseControl,
    speedlimiter: SpeedLimiter,
    wings: Wing,
    airbrakes: Airbrake,
    /// `turboprops` and `turboprops2`.
    turboprops2: Turboprop2,
    pistonprops: Pistonprop,
    turbojets: Turbojet,
    screwprops: Screwprop,
    fusedrag: Fusedrag,
    props: Prop,
    flexbodies: Flexbody,
    /// `flares` and `flares2`.
    flares2: Flare2,
    materialflarebindings: MaterialFlareBinding,
    managedmaterials: ManagedMaterial,
    submeshes: Submesh,
    submesh_groundmodel: String,
    exhausts: Exhaust,
    particles: Particle,
    soundsources: SoundSource,
    soundsources2: SoundSource2,
    guisettings: GuiSettings,
    help: Help,
    /// Verbatim lines of `description` blocks.
    description: String,
    author: Author,
    fileinfo: Fileinfo,
    fileformatversion: FileFormatVersion,
    guid: Guid,
    set_collision_range: CollisionRange,
    /// At most one entry; later lines update it.
    set_skeleton_settings: SkeletonSettings,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Total number of records.
    pub fn record_count(&self) -> usize {
        self.counts().iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

/// A parsed rig definition.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// First meaningful line of the file.
    pub name: String,
    pub flags: DocumentFlags,
    pub root: Module,
    /// Modules opened with `section`, keyed by name.
    pub modules: BTreeMap<String, Module>,
    /// Every node token referenced by the records.
    pub node_refs: NodeArena,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            name: String::new(),
            flags: DocumentFlags::default(),
            root: Module::new(ROOT_MODULE_NAME),
            modules: BTreeMap::new(),
            node_refs: NodeArena::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a module by name; [`ROOT_MODULE_NAME`] returns the root.
    pub fn module(&self, name: &str) -> Option<&Module> {
        if name == ROOT_MODULE_NAME {
            Some(&self.root)
        } else {
            self.modules.get(name)
        }
    }

    /// Root module first, then named modules by name.
    pub fn all_modules(&self) -> impl Iterator<Item = &Module> {
        std::iter::once(&self.root).chain(self.modules.values())
    }

    /// First `fileformatversion` declared anywhere in the document.
    pub fn file_format_version(&self) -> Option<i32> {
        self.all_modules()
            .flat_map(|m| m.fileformatversion.first())
            .map(|v| v.version)
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_counts_skip_empty() {
        let mut module = Module::new("alpha");
        module.description.push("line".to_string());
        module.submesh_groundmodel.push("gravel".to_string());

        assert_eq!(module.counts(), vec![("submesh_groundmodel", 1), ("description", 1)]);
        assert_eq!(module.record_count(), 2);
        assert!(!module.is_empty());
    }

    #[test]
    fn test_document_module_lookup() {
        let mut doc = Document::new();
        doc.modules.insert("alpha".to_string(), Module::new("alpha"));

        assert_eq!(doc.module(ROOT_MODULE_NAME).map(|m| m.name.as_str()), Some("_Root_"));
        assert!(doc.module("alpha").is_some());
        assert!(doc.module("beta").is_none());
        assert_eq!(doc.all_modules().count(), 2);
    }

    #[test]
    fn test_file_format_version_first_declared() {
        let mut doc = Document::new();
        assert_eq!(doc.file_format_version(), None);

        doc.root.fileformatversion.push(FileFormatVersion { version: 450 });
        assert_eq!(doc.file_format_version(), Some(450));
    }
}
