/// Node and Edge records for the sketch data model.
///
/// Ownership follows an arena design: the canonical [`Edge`] records live in
/// the sketch's edge store, and each [`Node`] keeps only [`EdgeId`] indices in
/// its per-neighbour link lists. Neither side holds a reference into the
/// other, so there are no ownership cycles to manage.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::label::Label;

// ---------------------------------------------------------------------------
// EdgeId
// ---------------------------------------------------------------------------

/// Stable index of an edge record in the sketch's edge store.
///
/// Ids are slab slots and are never reused: removal leaves a tombstone, so an
/// id held by a frontend stays unambiguous for the lifetime of the sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Canvas position of a node.
///
/// Opaque to the graph semantics: the core stores it per node and hands it
/// back to the presentation layer, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, in whatever unit the frontend uses.
    pub x: f64,
    /// Vertical coordinate, in whatever unit the frontend uses.
    pub y: f64,
}

impl Position {
    /// Creates a position from raw coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Multiplicity
// ---------------------------------------------------------------------------

/// Which of the up-to-3 parallel edges between a pair this edge is.
///
/// Purely a bookkeeping/rendering tag: frontends draw `First` as a straight
/// line, `Second` curved one way and `Third` curved the other, so parallel
/// edges do not overlap on screen. Graph semantics (adjacency, cycles) ignore
/// it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// The first edge between the pair (rendered straight).
    First,
    /// The second parallel edge (rendered curving right).
    Second,
    /// The third parallel edge (rendered curving left).
    Third,
}

impl Multiplicity {
    /// All slots, lowest first.
    const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Returns the lowest slot not in `taken`.
    ///
    /// `None` means all three slots are in use — this is the single source
    /// of truth for the 3-parallel-edge cap. While no edge is ever removed
    /// this is simply "slot = current edge count"; after a standalone edge
    /// removal it fills the hole the removal left.
    pub fn first_free(taken: &[Self]) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| !taken.contains(slot))
    }

    /// Returns the slot index: 0, 1, or 2.
    pub fn index(self) -> u8 {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::First => "straight",
            Self::Second => "curve-right",
            Self::Third => "curve-left",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A single edge record.
///
/// The endpoint pair is stored in creation order (`from` was selected first),
/// but the edge is undirected for all graph purposes: adjacency and cycle
/// detection treat `(from, to)` and `(to, from)` identically. A self-loop has
/// `from == to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Edge {
    /// Stable store index of this record.
    pub id: EdgeId,
    /// The endpoint selected first at creation time.
    pub from: Label,
    /// The endpoint selected second at creation time.
    pub to: Label,
    /// Parallel-edge slot within the unordered pair.
    pub multiplicity: Multiplicity,
}

impl Edge {
    /// Returns `true` when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Returns `true` when `label` is one of the endpoints.
    pub fn touches(&self, label: &Label) -> bool {
        self.from == *label || self.to == *label
    }

    /// Returns the endpoints as a lexically ordered pair.
    ///
    /// The canonical form for counting parallel edges: `(min, max)` is the
    /// same whichever endpoint was selected first.
    pub fn pair(&self) -> (&Label, &Label) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A live node: label, canvas position, and per-neighbour link lists.
///
/// `links` maps each neighbour label to the ordered list of parallel-edge
/// ids toward that neighbour (length 1-3; the key is removed when the last
/// edge to that neighbour goes away). A self-loop appears once, under the
/// node's own label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Node {
    /// Unique label of this node.
    pub label: Label,
    /// Canvas position (presentation metadata only).
    pub position: Position,
    /// Neighbour label → ordered parallel-edge ids.
    pub(crate) links: BTreeMap<Label, Vec<EdgeId>>,
}

impl Node {
    /// Creates an unlinked node.
    pub(crate) fn new(label: Label, position: Position) -> Self {
        Self {
            label,
            position,
            links: BTreeMap::new(),
        }
    }

    /// Returns the distinct neighbour labels, in lexical order.
    ///
    /// Includes the node's own label when it has a self-loop.
    pub fn neighbors(&self) -> impl Iterator<Item = &Label> {
        self.links.keys()
    }

    /// Returns the parallel-edge ids toward `neighbor`, in creation order.
    ///
    /// Empty when there is no edge to that neighbour.
    pub fn parallel_edges(&self, neighbor: &Label) -> &[EdgeId] {
        self.links.get(neighbor).map_or(&[], Vec::as_slice)
    }

    /// Returns the full neighbour → edge-id mapping.
    pub fn links(&self) -> &BTreeMap<Label, Vec<EdgeId>> {
        &self.links
    }

    /// Total number of incident edges (each self-loop counted once).
    pub fn degree(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
