//! Node identities and deferred node references.
//!
//! Every node token read from a rig file is stored once in a [`NodeArena`]
//! and referenced from records through a small `Copy` handle, [`NodeRef`].
//! The arena keeps both readings of the token (legacy sequential number and
//! modern name) until the end of the document, when the sequential importer
//! rewrites the resolved identity of every entry in place.

use std::fmt;

use serde::Serialize;

/// Final identity of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NodeId {
    /// Numbered node (`nodes` section, or a generated node).
    Num(u32),
    /// Named node (`nodes2` section).
    Name(String),
    /// Reference that could not be resolved.
    Invalid,
}

impl NodeId {
    /// Interpret a token the modern way: all digits is a number, anything else a name.
    pub fn from_token(text: &str) -> Self {
        if text.is_empty() {
            return NodeId::Invalid;
        }
        if text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(num) = text.parse::<u32>() {
                return NodeId::Num(num);
            }
        }
        NodeId::Name(text.to_string())
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, NodeId::Invalid)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Num(n) => write!(f, "#{}", n),
            NodeId::Name(name) => write!(f, "{}", name),
            NodeId::Invalid => write!(f, "<invalid>"),
        }
    }
}

/// Handle to a token stored in the document's [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeRef(u32);

impl NodeRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which readings of a token are meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefFlags {
    /// The legacy sequential-number reading is usable.
    pub import_valid: bool,
    /// The modern (named) reading is usable.
    pub regular_valid: bool,
    /// A named node was declared before this token; legacy resolution
    /// must look the text up among named nodes before indexing.
    pub check_named_first: bool,
}

/// One node token as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeToken {
    /// Raw token text.
    pub text: String,
    /// Legacy reading: leading integer of the token, absolute value.
    pub import_number: u32,
    pub flags: RefFlags,
    /// Source line (1-indexed).
    pub line: usize,
    /// Current resolved identity. Holds the modern reading until the
    /// importer rewrites it.
    pub resolved: NodeId,
}

/// Index-based storage for every node token of a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeArena {
    tokens: Vec<NodeToken>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token and return its handle.
    pub fn push(&mut self, token: NodeToken) -> NodeRef {
        let handle = NodeRef(self.tokens.len() as u32);
        self.tokens.push(token);
        handle
    }

    /// Get the stored token.
    ///
    /// Handles are only created by [`NodeArena::push`], so lookups never miss
    /// for handles issued by the same arena.
    pub fn get(&self, node: NodeRef) -> &NodeToken {
        &self.tokens[node.index()]
    }

    /// Resolved identity of a reference.
    pub fn resolve(&self, node: NodeRef) -> &NodeId {
        &self.get(node).resolved
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeToken> {
        self.tokens.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut NodeToken> {
        self.tokens.iter_mut()
    }
}

/// Inclusive range of nodes (used by `forset`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeRange {
    pub start: NodeRef,
    pub end: NodeRef,
}

impl NodeRange {
    pub fn single(node: NodeRef) -> Self {
        Self { start: node, end: node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> NodeToken {
        NodeToken {
            text: text.to_string(),
            import_number: 0,
            flags: RefFlags::default(),
            line: 1,
            resolved: NodeId::from_token(text),
        }
    }

    #[test]
    fn test_node_id_from_token() {
        assert_eq!(NodeId::from_token("12"), NodeId::Num(12));
        assert_eq!(NodeId::from_token("a1"), NodeId::Name("a1".to_string()));
        assert_eq!(NodeId::from_token("-3"), NodeId::Name("-3".to_string()));
        assert_eq!(NodeId::from_token(""), NodeId::Invalid);
    }

    #[test]
    fn test_arena_handles_are_sequential() {
        let mut arena = NodeArena::new();
        let a = arena.push(token("a"));
        let b = arena.push(token("b"));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.resolve(b), &NodeId::Name("b".to_string()));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::Num(4).to_string(), "#4");
        assert_eq!(NodeId::Name("hub".to_string()).to_string(), "hub");
    }
}
