//! Sound sources and the GUI sections.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::types::{GuiSettings, Help, SoundSource, SoundSource2, SoundSourceMode};

impl Parser {
    pub(super) fn parse_soundsources(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let source = SoundSource {
            node: self.arg_node(0),
            sound_script_name: self.arg_string(1),
        };
        self.module_mut().soundsources.push(source);
    }

    pub(super) fn parse_soundsources2(&mut self) {
        if !self.check_num_arguments(3) {
            return;
        }

        let mode = match self.arg_int(1) {
            -2 => SoundSourceMode::Always,
            -1 => SoundSourceMode::Outside,
            n => match u32::try_from(n) {
                Ok(cinecam) => SoundSourceMode::Cinecam(cinecam),
                Err(_) => {
                    self.error(
                        DiagnosticKind::ValueDecode,
                        format!("Invalid sound source mode ({}), using always", n),
                    );
                    SoundSourceMode::Always
                }
            },
        };
        let source = SoundSource2 {
            node: self.arg_node(0),
            mode,
            sound_script_name: self.arg_string(2),
        };
        self.module_mut().soundsources2.push(source);
    }

    pub(super) fn parse_guisettings(&mut self) {
        if !self.check_num_arguments(2) {
            return;
        }

        let setting = GuiSettings {
            key: self.arg_string(0),
            value: self.arg_string(1),
        };
        self.module_mut().guisettings.push(setting);
    }

    /// `help`: the whole line names the help panel material.
    pub(super) fn parse_help(&mut self) {
        let help = Help {
            material: self.line.trim().to_string(),
        };
        self.module_mut().help.push(help);
    }
}
