//! Data-line handlers, one per block keyword.
//!
//! Each handler reads the current line's arguments, builds a record with the
//! defaults that are current right now and appends it to the active module.
//! A line with too few arguments is skipped with a diagnostic.

mod actuators;
mod aero;
mod cameras;
mod engine;
mod misc;
mod physics;
mod visuals;
mod wheels;

use super::keyword::Keyword;
use super::Parser;

/// Handler for data lines of `block`.
///
/// `comment` and `description` never get here; the line loop consumes them.
pub(super) fn handler(block: Keyword) -> Option<fn(&mut Parser)> {
    let handler: fn(&mut Parser) = match block {
        Keyword::Nodes => Parser::parse_nodes,
        Keyword::Nodes2 => Parser::parse_nodes2,
        Keyword::Beams => Parser::parse_beams,
        Keyword::Shocks => Parser::parse_shocks,
        Keyword::Shocks2 => Parser::parse_shocks2,
        Keyword::Shocks3 => Parser::parse_shocks3,
        Keyword::Hydros => Parser::parse_hydros,
        Keyword::Ropes => Parser::parse_ropes,
        Keyword::Ropables => Parser::parse_ropables,
        Keyword::Ties => Parser::parse_ties,
        Keyword::Slidenodes => Parser::parse_slidenodes,
        Keyword::Railgroups => Parser::parse_railgroups,
        Keyword::Hooks => Parser::parse_hooks,
        Keyword::Lockgroups => Parser::parse_lockgroups,
        Keyword::Fixes => Parser::parse_fixes,
        Keyword::Contacters => Parser::parse_contacters,
        Keyword::Collisionboxes => Parser::parse_collisionboxes,
        Keyword::Minimass => Parser::parse_minimass,
        Keyword::Globals => Parser::parse_globals,

        Keyword::Commands => Parser::parse_commands,
        Keyword::Commands2 => Parser::parse_commands2,
        Keyword::Animators => Parser::parse_animators,
        Keyword::Rotators => Parser::parse_rotators,
        Keyword::Rotators2 => Parser::parse_rotators2,
        Keyword::Triggers => Parser::parse_triggers,

        Keyword::Wheels => Parser::parse_wheels,
        Keyword::Wheels2 => Parser::parse_wheels2,
        Keyword::Meshwheels => Parser::parse_meshwheels,
        Keyword::Meshwheels2 => Parser::parse_meshwheels2,
        Keyword::Flexbodywheels => Parser::parse_flexbodywheels,
        Keyword::Wheeldetachers => Parser::parse_wheeldetachers,
        Keyword::Axles => Parser::parse_axles,
        Keyword::Interaxles => Parser::parse_interaxles,
        Keyword::Transfercase => Parser::parse_transfercase,

        Keyword::Engine => Parser::parse_engine,
        Keyword::Engoption => Parser::parse_engoption,
        Keyword::Engturbo => Parser::parse_engturbo,
        Keyword::Torquecurve => Parser::parse_torquecurve,
        Keyword::Brakes => Parser::parse_brakes,

        Keyword::Wings => Parser::parse_wings,
        Keyword::Airbrakes => Parser::parse_airbrakes,
        Keyword::Turboprops => Parser::parse_turboprops,
        Keyword::Turboprops2 => Parser::parse_turboprops2,
        Keyword::Pistonprops => Parser::parse_pistonprops,
        Keyword::Turbojets => Parser::parse_turbojets,
        Keyword::Screwprops => Parser::parse_screwprops,
        Keyword::Fusedrag => Parser::parse_fusedrag,

        Keyword::Props => Parser::parse_props,
        Keyword::Flexbodies => Parser::parse_flexbodies,
        Keyword::Flares => Parser::parse_flares,
        Keyword::Flares2 => Parser::parse_flares2,
        Keyword::Materialflarebindings => Parser::parse_material_flare_bindings,
        Keyword::Managedmaterials => Parser::parse_managed_materials,
        Keyword::Texcoords => Parser::parse_texcoords,
        Keyword::Cab => Parser::parse_cab,
        Keyword::Exhausts => Parser::parse_exhausts,
        Keyword::Particles => Parser::parse_particles,

        Keyword::Cameras => Parser::parse_cameras,
        Keyword::Cinecam => Parser::parse_cinecam,
        Keyword::Camerarail => Parser::parse_camerarail,
        Keyword::Videocamera => Parser::parse_videocamera,

        Keyword::Soundsources => Parser::parse_soundsources,
        Keyword::Soundsources2 => Parser::parse_soundsources2,
        Keyword::Guisettings => Parser::parse_guisettings,
        Keyword::Help => Parser::parse_help,
        _ => return None,
    };
    Some(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::keyword::KeywordClass;

    #[test]
    fn test_every_data_block_has_a_handler() {
        for kw in Keyword::ALL {
            if kw.class() != KeywordClass::Block {
                continue;
            }
            let expected = !matches!(kw, Keyword::Comment | Keyword::Description);
            assert_eq!(handler(*kw).is_some(), expected, "{:?}", kw);
        }
    }
}
