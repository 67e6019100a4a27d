use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::ops::BitOr;

use crate::Node;

/// Properties a [`NodeStream`] reports to its consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Characteristics(u8);

impl Characteristics {
    /// Every element is present; there are no null slots.
    pub const NONNULL: Self = Self(1);
    /// The backing sequence cannot change once the stream exists.
    pub const IMMUTABLE: Self = Self(1 << 1);
    /// `estimate_size` is exact.
    pub const SIZED: Self = Self(1 << 2);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Single-pass stream over a fully materialized node list.
///
/// Nodes are handed out in walk order, each exactly once. The stream also
/// implements [`Iterator`], which is how filter/map/reduce pipelines are
/// built on top of it.
#[derive(Debug, Default)]
pub struct NodeStream {
    nodes: VecDeque<Node>,
}

impl NodeStream {
    pub(crate) fn new(nodes: VecDeque<Node>) -> Self {
        Self { nodes }
    }

    /// Hands the next node to `consumer` and returns `true`, or returns
    /// `false` without calling it once the stream is exhausted.
    pub fn advance<F: FnOnce(Node)>(&mut self, consumer: F) -> bool {
        match self.nodes.pop_front() {
            Some(node) => {
                consumer(node);
                true
            }
            None => false,
        }
    }

    /// Number of nodes not yet delivered.
    pub fn estimate_size(&self) -> usize {
        self.nodes.len()
    }

    /// Always `None`: the stream is consumed sequentially.
    pub fn try_split(&mut self) -> Option<NodeStream> {
        None
    }

    pub fn characteristics(&self) -> Characteristics {
        Characteristics::NONNULL | Characteristics::IMMUTABLE | Characteristics::SIZED
    }
}

impl Iterator for NodeStream {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        self.nodes.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.nodes.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for NodeStream {}

impl FusedIterator for NodeStream {}
