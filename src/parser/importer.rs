//! Sequential importer: reconciles legacy numbered addressing with named nodes.
//!
//! While parsing, every explicit node declaration and every batch of nodes a
//! wheel or cinecam generates is recorded in encounter order. `finalize` runs
//! once at the end of the document and rewrites the resolved identity of each
//! token in the node arena, and of each declared numbered node.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::types::{Document, FileFormatVersion, NodeId};

use super::keyword::Keyword;

/// Where a declared node is stored: its module (`None` for the root) and
/// its index in that module's `nodes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSlot {
    pub module: Option<String>,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Numbered(NodeSlot),
    Named(String),
    /// `count` consecutive nodes from one `source` line.
    Generated { source: Keyword, count: usize },
}

/// How node tokens were resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImportMode {
    /// `fileformatversion` 450 or later: tokens keep their modern reading.
    Modern,
    /// Tokens were rewritten to encounter-order indices.
    Legacy,
    /// No numbered or generated nodes; nothing to rewrite.
    Untouched,
}

#[derive(Debug, Clone, Default)]
pub struct SequentialImporter {
    /// Entries with the encounter index of their first node.
    entries: Vec<(usize, Entry)>,
    total: usize,
    names: HashSet<String>,
    legacy_needed: bool,
}

impl SequentialImporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, entry: Entry, count: usize) {
        self.entries.push((self.total, entry));
        self.total = self.total.saturating_add(count);
    }

    /// Record an explicit numbered node stored at `slot`.
    ///
    /// Returns the index it was expected to have when `number` is out of sequence.
    pub fn add_numbered(&mut self, number: u32, slot: NodeSlot) -> Option<usize> {
        let expected = self.total;
        self.push(Entry::Numbered(slot), 1);
        self.legacy_needed = true;
        (number as usize != expected).then_some(expected)
    }

    pub fn add_named(&mut self, name: &str) {
        self.push(Entry::Named(name.to_string()), 1);
        self.names.insert(name.to_string());
    }

    /// Record `count` nodes generated by a `source` line.
    pub fn add_generated(&mut self, source: Keyword, count: usize) {
        if count > 0 {
            self.push(Entry::Generated { source, count }, count);
        }
        self.legacy_needed = true;
    }

    /// Entry covering encounter index `index`.
    fn entry_at(&self, index: usize) -> Option<&Entry> {
        if index >= self.total {
            return None;
        }
        let pos = self.entries.partition_point(|(start, _)| *start <= index);
        self.entries.get(pos.checked_sub(1)?).map(|(_, entry)| entry)
    }

    /// Resolve every token of the document's node arena and renumber the
    /// declared numbered nodes to their encounter index.
    pub fn finalize(&self, document: &mut Document, diagnostics: &mut Diagnostics) -> ImportMode {
        let format_version = document.file_format_version();
        if format_version.is_some_and(|v| v >= FileFormatVersion::NAMED_NODES) {
            debug!(tokens = document.node_refs.len(), "modern node addressing");
            return ImportMode::Modern;
        }
        if !self.legacy_needed {
            debug!(tokens = document.node_refs.len(), "no numbered nodes, importer idle");
            return ImportMode::Untouched;
        }

        debug!(
            nodes = self.total,
            tokens = document.node_refs.len(),
            "rewriting legacy node references"
        );
        for token in document.node_refs.iter_mut() {
            if !token.flags.import_valid {
                continue;
            }
            if token.flags.check_named_first && self.names.contains(&token.text) {
                token.resolved = NodeId::Name(token.text.clone());
                continue;
            }
            let index = token.import_number as usize;
            token.resolved = match self.entry_at(index) {
                Some(Entry::Numbered(_) | Entry::Generated { .. }) => NodeId::Num(token.import_number),
                Some(Entry::Named(name)) => NodeId::Name(name.clone()),
                None => {
                    diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::Semantic,
                            format!(
                                "Node '{}' refers to index {}, but only {} nodes exist",
                                token.text, index, self.total
                            ),
                        )
                        .at(token.line, None),
                    );
                    NodeId::Invalid
                }
            };
        }

        for (start, entry) in &self.entries {
            let Entry::Numbered(slot) = entry else {
                continue;
            };
            let module = match &slot.module {
                None => Some(&mut document.root),
                Some(name) => document.modules.get_mut(name),
            };
            if let Some(node) = module.and_then(|m| m.nodes.get_mut(slot.index)) {
                node.id = u32::try_from(*start).map_or(NodeId::Invalid, NodeId::Num);
            }
        }
        ImportMode::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NodeToken, RefFlags};
    use pretty_assertions::assert_eq;

    fn push(doc: &mut Document, text: &str, check_named_first: bool) {
        doc.node_refs.push(NodeToken {
            text: text.to_string(),
            import_number: super::super::args::leading_int(text),
            flags: RefFlags {
                import_valid: true,
                regular_valid: true,
                check_named_first,
            },
            line: 1,
            resolved: NodeId::from_token(text),
        });
    }

    fn resolved(doc: &Document) -> Vec<NodeId> {
        doc.node_refs.iter().map(|t| t.resolved.clone()).collect()
    }

    fn root_slot(index: usize) -> NodeSlot {
        NodeSlot { module: None, index }
    }

    #[test]
    fn test_out_of_sequence_reported() {
        let mut importer = SequentialImporter::new();
        assert_eq!(importer.add_numbered(0, root_slot(0)), None);
        assert_eq!(importer.add_numbered(5, root_slot(1)), Some(1));
    }

    #[test]
    fn test_named_only_is_untouched() {
        let mut importer = SequentialImporter::new();
        importer.add_named("a1");
        let mut doc = Document::new();
        push(&mut doc, "a1", true);
        let mut diags = Diagnostics::new();

        let mode = importer.finalize(&mut doc, &mut diags);

        assert_eq!(mode, ImportMode::Untouched);
        assert_eq!(resolved(&doc), vec![NodeId::Name("a1".into())]);
    }

    #[test]
    fn test_modern_version_skips_rewrite() {
        let mut importer = SequentialImporter::new();
        importer.add_numbered(0, root_slot(0));
        let mut doc = Document::new();
        doc.root.fileformatversion.push(FileFormatVersion { version: 450 });
        push(&mut doc, "7", false);
        let mut diags = Diagnostics::new();

        let mode = importer.finalize(&mut doc, &mut diags);

        assert_eq!(mode, ImportMode::Modern);
        assert!(diags.is_empty());
        assert_eq!(resolved(&doc), vec![NodeId::Num(7)]);
    }

    #[test]
    fn test_legacy_rewrite_mixes_names_and_generated() {
        let mut importer = SequentialImporter::new();
        importer.add_numbered(0, root_slot(0));
        importer.add_named("hub");
        importer.add_generated(Keyword::Cinecam, 1);

        let mut doc = Document::new();
        push(&mut doc, "1", false);
        push(&mut doc, "2", false);
        push(&mut doc, "hub", true);
        push(&mut doc, "9", false);
        let mut diags = Diagnostics::new();

        let mode = importer.finalize(&mut doc, &mut diags);

        assert_eq!(mode, ImportMode::Legacy);
        assert_eq!(
            resolved(&doc),
            vec![
                NodeId::Name("hub".into()),
                NodeId::Num(2),
                NodeId::Name("hub".into()),
                NodeId::Invalid,
            ]
        );
        assert_eq!(diags.error_count(), 1);
    }

    #[test]
    fn test_generated_runs_are_not_expanded() {
        let mut importer = SequentialImporter::new();
        importer.add_numbered(0, root_slot(0));
        importer.add_generated(Keyword::Wheels, 4_000_000_000);
        importer.add_named("tail");

        assert_eq!(importer.entries.len(), 3);
        assert_eq!(
            importer.entry_at(3_999_999_999),
            Some(&Entry::Generated { source: Keyword::Wheels, count: 4_000_000_000 })
        );
        assert_eq!(importer.entry_at(4_000_000_001), Some(&Entry::Named("tail".into())));
        assert_eq!(importer.entry_at(4_000_000_002), None);
        assert_eq!(importer.entry_at(0), Some(&Entry::Numbered(root_slot(0))));
    }
}
