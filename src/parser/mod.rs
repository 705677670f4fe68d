//! Line-oriented parser for rig definition (truck) files.
//!
//! The parser is permissive: nothing inside a rig file stops it. Bad lines are
//! reported through [`Diagnostics`] and skipped or read with a fallback value,
//! and the caller always gets a best-effort [`Document`]. Only a failing
//! input stream ends parsing early.
//!
//! # Processing
//!
//! Each line is trimmed, stripped of trailing comments and sliced into
//! arguments. A line starting with a keyword sets a flag, runs a directive,
//! or opens/closes a block; any other line is a data line for the open
//! block. At the end of input staged objects are committed and the
//! sequential importer resolves node references.
//!
//! # Usage
//!
//! ```ignore
//! use rigdef::{parse_str, ParserConfig};
//!
//! let source = std::fs::read_to_string("trucks/dumper.truck")?;
//! let outcome = parse_str(&source, &ParserConfig::default());
//!
//! for diagnostic in outcome.diagnostics.iter() {
//!     println!("{}", diagnostic);
//! }
//! println!("{} nodes", outcome.document.root.nodes.len());
//! ```

mod args;
mod defaults;
mod directives;
mod importer;
pub mod keyword;
mod line;
mod sections;
mod state;

use std::io::BufRead;
use std::ops::Range;
use std::path::Path;

use tracing::debug;

use crate::config::ParserConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{Result, RigError};
use crate::lookup::ResourceLookup;
use crate::types::{Document, Module, ROOT_MODULE_NAME};

pub use args::{parse_bool, parse_float, parse_int, NumberError};
pub use defaults::DefaultsContext;
pub use importer::ImportMode;
pub use keyword::{Keyword, KeywordClass};
pub use line::{strip_comments, tokenize};

use importer::SequentialImporter;
use state::{BlockState, Flushed};

/// Result of parsing one document.
pub struct ParseOutcome {
    pub document: Document,
    pub diagnostics: Diagnostics,
    pub import_mode: ImportMode,
    /// Set when the input stream failed; `document` holds what was read before.
    pub read_error: Option<RigError>,
}

impl ParseOutcome {
    /// The whole input was read.
    pub fn is_complete(&self) -> bool {
        self.read_error.is_none()
    }
}

/// Incremental parser. Feed it lines, then call [`Parser::finish`].
pub struct Parser {
    config: ParserConfig,
    lookup: Box<dyn ResourceLookup>,
    document: Document,
    diagnostics: Diagnostics,
    defaults: DefaultsContext,
    state: BlockState,
    importer: SequentialImporter,
    /// `None` while in the root module.
    current_module: Option<String>,
    /// Current line after trimming and comment stripping.
    line: String,
    args: Vec<Range<usize>>,
    line_number: usize,
    /// Keyword reported with diagnostics.
    section: Option<&'static str>,
    any_named_node_defined: bool,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        let lookup = config.resource_lookup();
        Self {
            config,
            lookup,
            document: Document::new(),
            diagnostics: Diagnostics::new(),
            defaults: DefaultsContext::new(),
            state: BlockState::new(),
            importer: SequentialImporter::new(),
            current_module: None,
            line: String::new(),
            args: Vec::new(),
            line_number: 0,
            section: None,
            any_named_node_defined: false,
        }
    }

    /// Replace the texture lookup built from the config.
    pub fn with_lookup(mut self, lookup: impl ResourceLookup + 'static) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    /// Lines seen so far, blank and comment lines included.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Process one raw line of input.
    pub fn process_line(&mut self, raw: &str) {
        self.line_number += 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('/') {
            return;
        }
        if self.document.name.is_empty() {
            self.document.name = trimmed.to_string();
            debug!(name = %self.document.name, "document name");
            return;
        }

        let open = self.state.current();
        let keyword = keyword::identify(trimmed);

        // Comment and description blocks only listen for their own end keyword.
        match open {
            Some(Keyword::Comment) if keyword != Some(Keyword::EndComment) => return,
            Some(Keyword::Description) if keyword != Some(Keyword::EndDescription) => {
                self.section = Some(Keyword::Description.spelling());
                let text = trimmed.to_string();
                self.module_mut().description.push(text);
                return;
            }
            _ => {}
        }

        let free_text = keyword.is_none() && open.is_some_and(Keyword::is_free_text);
        let text = if self.config.comment_stripping && !free_text {
            line::strip_comments(trimmed)
        } else {
            trimmed
        };
        if text.is_empty() {
            return;
        }
        self.line.clear();
        self.line.push_str(text);
        line::tokenize(&self.line, self.config.effective_max_args(), &mut self.args);

        match keyword {
            Some(kw) => self.process_keyword(kw),
            None => self.process_data_line(),
        }
    }

    /// Commit staged objects, resolve node references and hand over the result.
    pub fn finish(self) -> ParseOutcome {
        self.finish_with(None)
    }

    fn finish_with(mut self, read_error: Option<RigError>) -> ParseOutcome {
        self.section = None;
        self.close_block();

        let import_mode = self.importer.finalize(&mut self.document, &mut self.diagnostics);

        debug!(
            lines = self.line_number,
            modules = self.document.modules.len() + 1,
            errors = self.diagnostics.error_count(),
            warnings = self.diagnostics.warning_count(),
            ?import_mode,
            "parse finished"
        );

        ParseOutcome {
            document: self.document,
            diagnostics: self.diagnostics,
            import_mode,
            read_error,
        }
    }

    fn process_keyword(&mut self, keyword: Keyword) {
        self.section = Some(keyword.spelling());
        match keyword.class() {
            KeywordClass::Flag => self.set_flag(keyword),
            KeywordClass::Directive => {
                if let Some(handler) = directives::handler(keyword) {
                    handler(self);
                }
            }
            KeywordClass::EndBlock => self.close_block(),
            KeywordClass::EndSection => self.end_module(),
            KeywordClass::Ignored => {
                debug!(line = self.line_number, keyword = keyword.spelling(), "ignoring obsolete keyword");
            }
            KeywordClass::Block => self.open_block(keyword),
        }
    }

    fn process_data_line(&mut self) {
        let Some(block) = self.state.current() else {
            self.section = None;
            debug!(line = self.line_number, "data line outside any section, ignoring");
            return;
        };
        self.section = Some(block.spelling());
        if let Some(handler) = sections::handler(block) {
            handler(self);
        }
        if let Some(flushed) = self.state.close_if(Keyword::Minimass) {
            self.commit(flushed);
        }
    }

    fn set_flag(&mut self, keyword: Keyword) {
        let flags = &mut self.document.flags;
        match keyword {
            Keyword::DisableDefaultSounds => flags.disable_default_sounds = true,
            Keyword::EnableAdvancedDeformation => flags.enable_advanced_deformation = true,
            Keyword::ForwardCommands => flags.forward_commands = true,
            Keyword::ImportCommands => flags.import_commands = true,
            Keyword::HideInChooser => flags.hide_in_chooser = true,
            Keyword::LockgroupDefaultNolock => flags.lockgroup_default_nolock = true,
            Keyword::Rescuer => flags.rescuer = true,
            Keyword::Rollon => flags.rollon = true,
            Keyword::SlidenodeConnectInstantly => flags.slidenode_connect_instantly = true,
            _ => {}
        }
    }

    fn open_block(&mut self, block: Keyword) {
        let flushed = self.state.open(block);
        self.commit(flushed);
        debug!(line = self.line_number, block = block.spelling(), "open block");
    }

    pub(super) fn close_block(&mut self) {
        let flushed = self.state.close();
        self.commit(flushed);
    }

    fn commit(&mut self, flushed: Flushed) {
        if let Some(rail) = flushed.camera_rail {
            if rail.nodes.is_empty() {
                self.warn(DiagnosticKind::Semantic, "Empty camera rail, discarding");
            } else {
                self.module_mut().camerarail.push(rail);
            }
        }
        if let Some(submesh) = flushed.submesh {
            self.module_mut().submeshes.push(submesh);
        }
    }

    /// Switch to the module called `name`, creating it on first use.
    pub(super) fn enter_module(&mut self, name: String) {
        let current = self.current_module.as_deref().unwrap_or(ROOT_MODULE_NAME);
        if current == name {
            self.error(
                DiagnosticKind::Structural,
                format!("Module '{}' is already active, ignoring", name),
            );
            return;
        }

        self.close_block();
        if name == ROOT_MODULE_NAME {
            self.current_module = None;
        } else {
            self.document
                .modules
                .entry(name.clone())
                .or_insert_with(|| Module::new(name.clone()));
            debug!(line = self.line_number, module = %name, "enter module");
            self.current_module = Some(name);
        }
    }

    fn end_module(&mut self) {
        if self.current_module.is_none() {
            self.error(
                DiagnosticKind::Structural,
                "Misplaced 'end_section' (already in root module), ignoring",
            );
            return;
        }
        self.close_block();
        self.current_module = None;
    }

    /// Module new records go to.
    pub(super) fn module_mut(&mut self) -> &mut Module {
        match &self.current_module {
            None => &mut self.document.root,
            Some(name) => self
                .document
                .modules
                .entry(name.clone())
                .or_insert_with(|| Module::new(name.clone())),
        }
    }

    pub(super) fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(kind, message).at(self.line_number, self.section));
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::error(kind, message).at(self.line_number, self.section));
    }
}

/// Parse a whole document held in memory.
pub fn parse_str(source: &str, config: &ParserConfig) -> ParseOutcome {
    let mut parser = Parser::new(config.clone());
    for line in source.lines() {
        parser.process_line(line);
    }
    parser.finish()
}

/// Parse a document from a stream.
///
/// Invalid UTF-8 is replaced, not rejected. A read error stops parsing; the
/// lines read before it are kept and the error is returned in the outcome.
pub fn parse_reader<R: BufRead>(mut reader: R, config: &ParserConfig) -> ParseOutcome {
    let mut parser = Parser::new(config.clone());
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                parser.process_line(&text);
            }
            Err(source) => {
                let line = parser.line_number() + 1;
                return parser.finish_with(Some(RigError::Read { line, source }));
            }
        }
    }
    parser.finish()
}

/// Open and parse a rig file.
pub fn parse_file(path: &Path, config: &ParserConfig) -> Result<ParseOutcome> {
    let file = std::fs::File::open(path).map_err(|e| RigError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open rig file: {}", e),
    })?;
    debug!(path = %path.display(), "parsing rig file");
    Ok(parse_reader(std::io::BufReader::new(file), config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BeamOptions, NodeId, NodeRef};
    use pretty_assertions::assert_eq;
    use std::io::{self, Read};

    fn parse(source: &str) -> ParseOutcome {
        parse_str(source, &ParserConfig::default())
    }

    fn resolved(doc: &Document, node: NodeRef) -> NodeId {
        doc.node_refs.resolve(node).clone()
    }

    #[test]
    fn test_document_name_is_first_line() {
        let outcome = parse("; leading comment\n\nMy Truck\nnodes\n");
        assert_eq!(outcome.document.name, "My Truck");
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_defaults_snapshot_isolation() {
        let src = "\
truck
set_node_defaults 20, 1, 1, 1
nodes
0, 0, 0, 0
set_node_defaults 45, 1, 1, 1
1, 1, 0, 0
";
        let outcome = parse(src);
        let nodes = &outcome.document.root.nodes;

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_defaults.load_weight, 20.0);
        assert_eq!(nodes[1].node_defaults.load_weight, 45.0);
    }

    #[test]
    fn test_argument_count_gate() {
        let short = parse("truck\nnodes\n0, 0, 0, 0\nbeams\n0\n");
        assert_eq!(short.document.root.beams.len(), 0);
        assert_eq!(short.diagnostics.len(), 1);
        assert_eq!(
            short.diagnostics.of_kind(DiagnosticKind::ArgumentCount).count(),
            1
        );

        let enough = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0, 1\n");
        assert_eq!(enough.document.root.beams.len(), 1);
        assert!(enough.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_option_chars_warn_once_each() {
        let outcome = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0, 1, iqz\n");
        let beam = &outcome.document.root.beams[0];

        assert_eq!(beam.options, BeamOptions::INVISIBLE);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::ValueDecode).count(), 2);
    }

    #[test]
    fn test_named_nodes_resolve_by_name() {
        let src = "\
truck
nodes2
a1, 0, 0, 0
a2, 1, 0, 0
beams
a1, a2
";
        let outcome = parse(src);
        let doc = &outcome.document;
        let beam = &doc.root.beams[0];

        assert_eq!(outcome.import_mode, ImportMode::Untouched);
        assert_eq!(doc.root.nodes[0].id, NodeId::Name("a1".into()));
        assert_eq!(resolved(doc, beam.nodes[0]), NodeId::Name("a1".into()));
        assert_eq!(resolved(doc, beam.nodes[1]), NodeId::Name("a2".into()));
    }

    #[test]
    fn test_wheel_nodes_follow_explicit_nodes() {
        let src = "\
truck
nodes
0, 0, 0, 0
1, 0, 1, 0
wheels
0.5, 0.2, 4, 0, 1, 9999, 1, 1, 0, 20, 400000, 500, face, band
nodes
2, 2, 0, 0
beams
2, 10
";
        let outcome = parse(src);
        let doc = &outcome.document;
        let beam = &doc.root.beams[0];

        assert_eq!(outcome.import_mode, ImportMode::Legacy);
        assert_eq!(doc.root.wheels.len(), 1);
        // 0 and 1 explicit, 2..=9 generated by the wheel, node "2" lands at 10.
        assert_eq!(resolved(doc, beam.nodes[0]), NodeId::Num(2));
        assert_eq!(resolved(doc, beam.nodes[1]), NodeId::Num(10));
        let ids: Vec<_> = doc.root.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![NodeId::Num(0), NodeId::Num(1), NodeId::Num(10)]);
        assert_eq!(
            outcome
                .diagnostics
                .iter()
                .filter(|d| d.message.contains("out of sequence"))
                .count(),
            1
        );
    }

    #[test]
    fn test_module_switching() {
        let src = "\
truck
section 1 alpha
guid one
guid two
end_section
guid three
section 1 alpha
guid four
";
        let outcome = parse(src);
        let doc = &outcome.document;

        assert_eq!(doc.root.guid.len(), 1);
        assert_eq!(doc.modules.len(), 1);
        assert_eq!(doc.module("alpha").map(|m| m.guid.len()), Some(3));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_module_switching_errors() {
        let src = "\
truck
end_section
section 1 alpha
section 1 alpha
";
        let outcome = parse(src);
        assert_eq!(outcome.diagnostics.of_kind(DiagnosticKind::Structural).count(), 2);
        assert_eq!(outcome.diagnostics.error_count(), 2);
    }

    #[test]
    fn test_comment_stripping() {
        let plain = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0 1\n");
        let semicolon = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0 1 ; comment\n");
        let slashes = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0 1 //comment\n");

        let options = |o: &ParseOutcome| o.document.root.beams[0].options;
        assert_eq!(options(&plain), options(&semicolon));
        assert_eq!(options(&plain), options(&slashes));
        assert!(semicolon.diagnostics.is_empty());
        assert!(slashes.diagnostics.is_empty());
    }

    #[test]
    fn test_comment_glued_to_options() {
        let outcome = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0, 1, i//comment\n");
        let plain = parse("truck\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0, 1, i\n");

        assert!(outcome.diagnostics.is_empty());
        assert_eq!(
            outcome.document.root.beams[0].options,
            plain.document.root.beams[0].options
        );
    }

    #[test]
    fn test_help_is_not_comment_stripped() {
        let outcome = parse("truck\nhelp\nsome/path/thing // not a comment\n");
        assert_eq!(
            outcome.document.root.help[0].material,
            "some/path/thing // not a comment"
        );
    }

    #[test]
    fn test_comment_block_is_inert() {
        let src = "\
truck
comment
beams
0, 1
end_comment
";
        let outcome = parse(src);
        assert!(outcome.document.root.beams.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_description_stored_verbatim() {
        let src = "\
truck
description
A heavy truck; six wheels
nodes are great
end_description
";
        let outcome = parse(src);
        assert_eq!(
            outcome.document.root.description,
            vec!["A heavy truck; six wheels", "nodes are great"]
        );
    }

    #[test]
    fn test_flags() {
        let outcome = parse("truck\nrescuer\nhideInChooser\nrollon\n");
        let flags = outcome.document.flags;
        assert!(flags.rescuer);
        assert!(flags.hide_in_chooser);
        assert!(flags.rollon);
        assert!(!flags.forward_commands);
    }

    #[test]
    fn test_obsolete_keywords_are_silent() {
        let outcome = parse("truck\nenvmap\nrigidifiers\nset_shadows 1\n");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_line_outside_block() {
        let outcome = parse("truck\n0, 1, 2\n");
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.document.root.nodes.is_empty());
    }

    #[test]
    fn test_diagnostic_positions() {
        let outcome = parse("truck\n\nnodes\n0, 0\n");
        let d = outcome.diagnostics.iter().next().cloned();
        insta::assert_snapshot!(
            d.map(|d| d.to_string()).unwrap_or_default(),
            @"4 (nodes): Not enough arguments (got 2, 4 needed), skipping line"
        );
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
            }
            self.served = true;
            let data = b"truck\nnodes\n0, 0, 0, 0\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn test_read_error_keeps_partial_document() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let outcome = parse_reader(reader, &ParserConfig::default());

        assert!(!outcome.is_complete());
        assert!(matches!(outcome.read_error, Some(RigError::Read { line: 4, .. })));
        assert_eq!(outcome.document.root.nodes.len(), 1);
    }

    #[test]
    fn test_reader_replaces_invalid_utf8() {
        let bytes: &[u8] = b"truck\nauthor name 12 J\xF6rg mail\n";
        let outcome = parse_reader(bytes, &ParserConfig::default());
        let author = &outcome.document.root.author[0];

        assert_eq!(author.name.as_deref(), Some("J\u{FFFD}rg"));
    }

    #[test]
    fn test_sample_fixture() {
        let source = include_str!("../../tests/fixtures/sample.truck");
        let outcome = parse(source);
        let doc = &outcome.document;
        let root = &doc.root;

        assert_eq!(doc.name, "Sample Dumper");
        assert_eq!(root.nodes.len(), 7);
        assert_eq!(root.beams.len(), 10);
        assert_eq!(root.cinecam.len(), 1);
        assert_eq!(root.wheels.len(), 1);
        assert_eq!(root.props[0].animations.len(), 1);
        assert_eq!(root.flexbodies[0].node_list_to_import.len(), 2);
        assert_eq!(root.submeshes[0].cab_triangles.len(), 1);
        assert_eq!(root.submeshes[0].texcoords.len(), 3);
        assert!(root.tractioncontrol[0].attributes.no_dashboard);
        assert_eq!(doc.module("trailer_hitch").map(|m| m.hooks.len()), Some(1));
        assert!(root.hooks.is_empty());
    }
}
