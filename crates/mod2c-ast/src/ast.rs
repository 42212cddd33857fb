//! The AST arena.
//!
//! Nodes live in a `Vec` arena owned by an [`Ast`] value and are addressed
//! through copyable [`NodeId`] handles. Slot 0 always holds the
//! distinguished empty node, so every empty child is the same value and all
//! empty nodes compare equal. Nodes are never removed: a tree under
//! construction only grows, and partially recovered subtrees keep empty
//! placeholders where children are missing.

use std::collections::VecDeque;

use mod2c_source::Lexeme;

use crate::nodes::NodeKind;

/// A handle to a node in an [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The handle of the distinguished empty node.
    pub const EMPTY: Self = Self(0);

    /// True if this is the empty node.
    #[must_use]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    const fn index(self) -> usize { self.0 as usize }
}

/// One node: a kind, its children in source order, and — for terminal
/// kinds — an interned lexeme.
#[derive(Debug, Clone)]
pub struct Node {
    /// The node kind
    pub kind: NodeKind,
    /// Children in source order
    pub children: Vec<NodeId>,
    /// The lexeme of a terminal node
    pub lexeme: Option<Lexeme>,
}

/// A FIFO work buffer used to accumulate children before materialising a
/// list node. Not part of the finished tree.
#[derive(Debug, Default)]
pub struct NodeQueue {
    items: VecDeque<NodeId>,
}

impl NodeQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Appends a node at the back.
    pub fn enqueue(&mut self, id: NodeId) { self.items.push_back(id); }

    /// Number of queued nodes.
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    fn drain(self) -> Vec<NodeId> { self.items.into_iter().collect() }
}

/// The AST arena.
#[derive(Debug)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Default for Ast {
    fn default() -> Self { Self::new() }
}

impl Ast {
    /// Creates an arena holding only the empty node.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node { kind: NodeKind::Empty, children: Vec::new(), lexeme: None }] }
    }

    /// The empty node.
    #[must_use]
    pub const fn empty() -> NodeId { NodeId::EMPTY }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = u32::try_from(self.nodes.len()).unwrap_or_else(|_| {
            // Node count exceeding u32 means the arena contract is broken.
            unreachable!("AST arena overflow")
        });
        self.nodes.push(node);

        NodeId(id)
    }

    /// Builds a fixed-arity node.
    pub fn node(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        self.alloc(Node { kind, children: children.to_vec(), lexeme: None })
    }

    /// Builds a list node whose children are drained from the queue.
    pub fn list_node(&mut self, kind: NodeKind, queue: NodeQueue) -> NodeId {
        self.alloc(Node { kind, children: queue.drain(), lexeme: None })
    }

    /// Builds a terminal node carrying a lexeme.
    pub fn terminal(&mut self, kind: NodeKind, lexeme: Lexeme) -> NodeId {
        self.alloc(Node { kind, children: Vec::new(), lexeme: Some(lexeme) })
    }

    /// The node behind a handle.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node { &self.nodes[id.index()] }

    /// The kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind { self.get(id).kind }

    /// The children of a node, in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] { &self.get(id).children }

    /// The `n`-th child of a node, or the empty node if out of range.
    #[must_use]
    pub fn child(&self, id: NodeId, n: usize) -> NodeId {
        self.children(id).get(n).copied().unwrap_or(NodeId::EMPTY)
    }

    /// The lexeme of a terminal node.
    #[must_use]
    pub fn lexeme(&self, id: NodeId) -> Option<&Lexeme> { self.get(id).lexeme.as_ref() }

    /// Number of nodes in the arena, including the empty node.
    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// True if the arena holds only the empty node.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.len() == 1 }

    /// Structural equality of two subtrees, possibly from different arenas.
    ///
    /// Kinds must match, terminal lexemes must have equal content, and
    /// children must match pairwise in order. All empty nodes compare equal.
    #[must_use]
    pub fn deep_eq(&self, id: NodeId, other: &Self, other_id: NodeId) -> bool {
        let a = self.get(id);
        let b = other.get(other_id);

        if a.kind != b.kind || a.lexeme != b.lexeme || a.children.len() != b.children.len() {
            return false;
        }

        a.children
            .iter()
            .zip(&b.children)
            .all(|(&left, &right)| self.deep_eq(left, other, right))
    }

    /// True if the subtree contains no empty-node placeholders.
    ///
    /// Useful in tests: a clean parse of a complete construct leaves no
    /// recovery holes, while optional children that are legitimately absent
    /// do use the empty node, so this is only meaningful for shapes that
    /// have no optional parts.
    #[must_use]
    pub fn is_complete(&self, id: NodeId) -> bool {
        !id.is_empty() && self.children(id).iter().all(|&child| self.is_complete(child))
    }
}
