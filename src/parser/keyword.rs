//! Keyword table and line classification.
//!
//! A keyword matches when the line starts with its spelling and the spelling
//! is followed by the end of the line or an argument separator. Exact letter
//! case is tried first over the whole table, then ASCII case-insensitively.

use serde::Serialize;

use super::line::is_separator;

/// How the line classifier treats a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Sets a document flag; takes no arguments.
    Flag,
    /// Parsed in place; the open block is left alone.
    Directive,
    /// Closes the open block.
    EndBlock,
    /// Returns to the root module.
    EndSection,
    /// Obsolete; recognized and dropped.
    Ignored,
    /// Opens a block for the following data lines.
    Block,
}

macro_rules! keywords {
    ($($variant:ident => $spelling:literal, $class:ident;)+) => {
        /// Every section and directive keyword of the format.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Keyword {
            $($variant,)+
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)+];

            /// Canonical spelling as written in rig files.
            pub fn spelling(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $spelling,)+
                }
            }

            pub fn class(self) -> KeywordClass {
                match self {
                    $(Keyword::$variant => KeywordClass::$class,)+
                }
            }
        }
    };
}

keywords! {
    AddAnimation => "add_animation", Directive;
    Airbrakes => "airbrakes", Block;
    Animators => "animators", Block;
    AntiLockBrakes => "AntiLockBrakes", Directive;
    Author => "author", Directive;
    Axles => "axles", Block;
    Backmesh => "backmesh", Directive;
    Beams => "beams", Block;
    Brakes => "brakes", Block;
    Cab => "cab", Block;
    Camerarail => "camerarail", Block;
    Cameras => "cameras", Block;
    Cinecam => "cinecam", Block;
    Collisionboxes => "collisionboxes", Block;
    Commands => "commands", Block;
    Commands2 => "commands2", Block;
    Comment => "comment", Block;
    Contacters => "contacters", Block;
    Cruisecontrol => "cruisecontrol", Directive;
    Description => "description", Block;
    DetacherGroup => "detacher_group", Directive;
    DisableDefaultSounds => "disabledefaultsounds", Flag;
    EnableAdvancedDeformation => "enable_advanced_deformation", Flag;
    End => "end", EndBlock;
    EndComment => "end_comment", EndBlock;
    EndDescription => "end_description", EndBlock;
    EndSection => "end_section", EndSection;
    Engine => "engine", Block;
    Engoption => "engoption", Block;
    Engturbo => "engturbo", Block;
    Envmap => "envmap", Ignored;
    Exhausts => "exhausts", Block;
    Extcamera => "extcamera", Directive;
    Fileformatversion => "fileformatversion", Directive;
    Fileinfo => "fileinfo", Directive;
    Fixes => "fixes", Block;
    Flares => "flares", Block;
    Flares2 => "flares2", Block;
    Flexbodies => "flexbodies", Block;
    FlexbodyCameraMode => "flexbody_camera_mode", Directive;
    Flexbodywheels => "flexbodywheels", Block;
    Forset => "forset", Directive;
    ForwardCommands => "forwardcommands", Flag;
    Fusedrag => "fusedrag", Block;
    Globals => "globals", Block;
    Guid => "guid", Directive;
    Guisettings => "guisettings", Block;
    Help => "help", Block;
    HideInChooser => "hideInChooser", Flag;
    Hookgroup => "hookgroup", Ignored;
    Hooks => "hooks", Block;
    Hydros => "hydros", Block;
    ImportCommands => "importcommands", Flag;
    Interaxles => "interaxles", Block;
    Lockgroups => "lockgroups", Block;
    LockgroupDefaultNolock => "lockgroup_default_nolock", Flag;
    Managedmaterials => "managedmaterials", Block;
    Materialflarebindings => "materialflarebindings", Block;
    Meshwheels => "meshwheels", Block;
    Meshwheels2 => "meshwheels2", Block;
    Minimass => "minimass", Block;
    Nodecollision => "nodecollision", Ignored;
    Nodes => "nodes", Block;
    Nodes2 => "nodes2", Block;
    Particles => "particles", Block;
    Pistonprops => "pistonprops", Block;
    PropCameraMode => "prop_camera_mode", Directive;
    Props => "props", Block;
    Railgroups => "railgroups", Block;
    Rescuer => "rescuer", Flag;
    Rigidifiers => "rigidifiers", Ignored;
    Rollon => "rollon", Flag;
    Ropables => "ropables", Block;
    Ropes => "ropes", Block;
    Rotators => "rotators", Block;
    Rotators2 => "rotators2", Block;
    Screwprops => "screwprops", Block;
    Section => "section", Directive;
    Sectionconfig => "sectionconfig", Ignored;
    SetBeamDefaults => "set_beam_defaults", Directive;
    SetBeamDefaultsScale => "set_beam_defaults_scale", Directive;
    SetCollisionRange => "set_collision_range", Directive;
    SetDefaultMinimass => "set_default_minimass", Directive;
    SetInertiaDefaults => "set_inertia_defaults", Directive;
    SetManagedmaterialsOptions => "set_managedmaterials_options", Directive;
    SetNodeDefaults => "set_node_defaults", Directive;
    SetShadows => "set_shadows", Ignored;
    SetSkeletonSettings => "set_skeleton_settings", Directive;
    Shocks => "shocks", Block;
    Shocks2 => "shocks2", Block;
    Shocks3 => "shocks3", Block;
    SlidenodeConnectInstantly => "slidenode_connect_instantly", Flag;
    Slidenodes => "slidenodes", Block;
    SlopeBrake => "SlopeBrake", Ignored;
    Soundsources => "soundsources", Block;
    Soundsources2 => "soundsources2", Block;
    SpeedLimiter => "SpeedLimiter", Directive;
    Submesh => "submesh", Directive;
    SubmeshGroundmodel => "submesh_groundmodel", Directive;
    Texcoords => "texcoords", Block;
    Ties => "ties", Block;
    Torquecurve => "torquecurve", Block;
    TractionControl => "TractionControl", Directive;
    Transfercase => "transfercase", Block;
    Triggers => "triggers", Block;
    Turbojets => "turbojets", Block;
    Turboprops => "turboprops", Block;
    Turboprops2 => "turboprops2", Block;
    Videocamera => "videocamera", Block;
    Wheeldetachers => "wheeldetachers", Block;
    Wheels => "wheels", Block;
    Wheels2 => "wheels2", Block;
    Wings => "wings", Block;
}

impl Keyword {
    /// Blocks whose lines are free text: no tokenizing, no comment stripping.
    pub fn is_free_text(self) -> bool {
        matches!(self, Keyword::Help | Keyword::Description | Keyword::Comment)
    }
}

fn matches_at_start(line: &str, spelling: &str, ignore_case: bool) -> bool {
    let Some(head) = line.get(..spelling.len()) else {
        return false;
    };
    let same = if ignore_case {
        head.eq_ignore_ascii_case(spelling)
    } else {
        head == spelling
    };
    if !same {
        return false;
    }
    match line.as_bytes().get(spelling.len()) {
        None => true,
        Some(&next) => is_separator(next),
    }
}

/// Find the keyword a trimmed line starts with.
pub fn identify(line: &str) -> Option<Keyword> {
    // Keywords always start with an ASCII letter.
    if !line.as_bytes().first()?.is_ascii_alphabetic() {
        return None;
    }

    Keyword::ALL
        .iter()
        .copied()
        .find(|kw| matches_at_start(line, kw.spelling(), false))
        .or_else(|| {
            Keyword::ALL
                .iter()
                .copied()
                .find(|kw| matches_at_start(line, kw.spelling(), true))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_exact() {
        assert_eq!(identify("nodes"), Some(Keyword::Nodes));
        assert_eq!(identify("nodes2"), Some(Keyword::Nodes2));
        assert_eq!(identify("set_beam_defaults 1, 2"), Some(Keyword::SetBeamDefaults));
        assert_eq!(
            identify("set_beam_defaults_scale 1 1 1 1"),
            Some(Keyword::SetBeamDefaultsScale)
        );
        assert_eq!(identify("end_section"), Some(Keyword::EndSection));
        assert_eq!(identify("end"), Some(Keyword::End));
    }

    #[test]
    fn test_identify_requires_boundary() {
        assert_eq!(identify("nodes3"), None);
        assert_eq!(identify("endless"), None);
        assert_eq!(identify("beams:"), Some(Keyword::Beams));
        assert_eq!(identify("section\t1 alpha"), Some(Keyword::Section));
    }

    #[test]
    fn test_identify_case_fallback() {
        assert_eq!(identify("BEAMS"), Some(Keyword::Beams));
        assert_eq!(identify("speedlimiter 40"), Some(Keyword::SpeedLimiter));
        assert_eq!(identify("TractionControl 1, 2"), Some(Keyword::TractionControl));
    }

    #[test]
    fn test_identify_non_letter_lines() {
        assert_eq!(identify("1, 2, 3"), None);
        assert_eq!(identify("_nodes"), None);
        assert_eq!(identify(""), None);
    }

    #[test]
    fn test_spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kw in Keyword::ALL {
            assert!(seen.insert(kw.spelling().to_ascii_lowercase()), "{:?}", kw);
        }
    }

    #[test]
    fn test_classes() {
        assert_eq!(Keyword::Rescuer.class(), KeywordClass::Flag);
        assert_eq!(Keyword::Author.class(), KeywordClass::Directive);
        assert_eq!(Keyword::EndDescription.class(), KeywordClass::EndBlock);
        assert_eq!(Keyword::Envmap.class(), KeywordClass::Ignored);
        assert_eq!(Keyword::Wheels2.class(), KeywordClass::Block);
        assert!(Keyword::Help.is_free_text());
        assert!(!Keyword::Beams.is_free_text());
    }
}
