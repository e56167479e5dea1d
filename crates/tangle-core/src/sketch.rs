/// The sketch document: node registry, arena edge store, and the graph
/// mutator that keeps them consistent.
///
/// # Consistency model
///
/// Every mutating operation is all-or-nothing: all preconditions are checked
/// before the first write, so a returned error means the sketch is exactly as
/// it was. Change listeners fire only after a mutation has fully completed,
/// so an observer can never see an edge that is in the store but missing from
/// an endpoint's link list, or vice versa.
///
/// # Storage shape
///
/// The [`EdgeStore`] is a slab: edge ids are slot indices and removal leaves
/// a tombstone, so an id handed to a frontend stays valid for the lifetime
/// of the sketch. Nodes hold ids, never edge references, so there are no
/// ownership cycles.
use std::collections::HashMap;
use std::fmt;

use crate::label::{Label, LabelAllocator};
use crate::notify::ChangeEvent;
use crate::structures::{Edge, EdgeId, Multiplicity, Node, Position};

/// Maximum number of parallel edges per unordered node pair (self-pairs
/// included). Encoded structurally by [`Multiplicity::first_free`].
pub const EDGE_CAP: usize = 3;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced by sketch mutations.
///
/// All variants are recoverable: the operation that produced the error
/// performed no mutation, and the sketch can keep being used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchError {
    /// `add_labeled_node` was given a label that is already live.
    DuplicateLabel {
        /// The label that is already taken.
        label: Label,
    },
    /// An operation referenced a label with no live node.
    NotFound {
        /// The label that could not be resolved.
        label: Label,
    },
    /// `disconnect` referenced an edge id that is not in the store.
    EdgeNotFound {
        /// The id that could not be resolved.
        edge: EdgeId,
    },
    /// `connect` would exceed the 3-parallel-edge cap for the pair.
    ///
    /// The pair is reported in lexical order regardless of selection order.
    EdgeCapExceeded {
        /// Lexically smaller endpoint.
        a: Label,
        /// Lexically larger endpoint (equal to `a` for a self-pair).
        b: Label,
    },
    /// `add_node` could not allocate a label: the single-letter sequence is
    /// spent.
    LabelSpaceExhausted,
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLabel { label } => {
                write!(f, "duplicate label: {label} is already a live node")
            }
            Self::NotFound { label } => write!(f, "node not found: {label}"),
            Self::EdgeNotFound { edge } => write!(f, "edge not found: {edge}"),
            Self::EdgeCapExceeded { a, b } => {
                write!(
                    f,
                    "edge cap exceeded: {a} and {b} already have {EDGE_CAP} parallel edges"
                )
            }
            Self::LabelSpaceExhausted => {
                write!(f, "label space exhausted: no free single-letter labels remain")
            }
        }
    }
}

impl std::error::Error for SketchError {}

// ---------------------------------------------------------------------------
// EdgeStore
// ---------------------------------------------------------------------------

/// Arena holding the canonical edge records.
///
/// Slots are append-only; removing an edge tombstones its slot. An [`EdgeId`]
/// therefore never changes meaning, even across arbitrary removals.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    slots: Vec<Option<Edge>>,
    live: usize,
}

impl EdgeStore {
    /// Appends a new edge record and returns its id.
    fn insert(&mut self, from: Label, to: Label, multiplicity: Multiplicity) -> EdgeId {
        let id = EdgeId(self.slots.len());
        self.slots.push(Some(Edge {
            id,
            from,
            to,
            multiplicity,
        }));
        self.live += 1;
        id
    }

    /// Tombstones the slot for `id`, returning the record if it was live.
    fn remove(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(edge)
    }

    /// Returns the live record for `id`, if any.
    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of live edges.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` when no live edges remain.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates the live edge records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

// ---------------------------------------------------------------------------
// Connected
// ---------------------------------------------------------------------------

/// Result of a successful [`Sketch::connect`].
///
/// The multiplicity is what a frontend needs to pick a rendering curvature
/// for the new edge (straight, curve right, curve left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Connected {
    /// Store id of the new edge.
    pub edge: EdgeId,
    /// Parallel-edge slot the new edge occupies.
    pub multiplicity: Multiplicity,
}

// ---------------------------------------------------------------------------
// Sketch
// ---------------------------------------------------------------------------

/// Listener invoked after each completed mutation.
type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// An in-progress multigraph sketch.
///
/// Owns the node registry (insertion-ordered), the [`EdgeStore`], the
/// [`LabelAllocator`], and any registered change listeners. Single-owner and
/// single-threaded by design: mutations and reads are serialised by the
/// borrow checker, and the cycle detector reads a stable sketch.
pub struct Sketch {
    nodes: HashMap<Label, Node>,
    /// Labels in insertion order, for deterministic [`Sketch::nodes`] iteration.
    order: Vec<Label>,
    edges: EdgeStore,
    allocator: LabelAllocator,
    listeners: Vec<Listener>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sketch")
            .field("nodes", &self.order)
            .field("edges", &self.edges.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Sketch {
    /// Creates an empty sketch with a fresh allocator.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: EdgeStore::default(),
            allocator: LabelAllocator::new(),
            listeners: Vec::new(),
        }
    }

    // -- registry -----------------------------------------------------------

    /// Adds a node at `position` with an allocator-chosen label.
    ///
    /// Labels already taken by [`Sketch::add_labeled_node`] are skipped; the
    /// allocator only ever advances.
    ///
    /// # Errors
    ///
    /// [`SketchError::LabelSpaceExhausted`] when the allocator runs past `Z`
    /// before finding a free label.
    pub fn add_node(&mut self, position: Position) -> Result<Label, SketchError> {
        let label = loop {
            let candidate = self
                .allocator
                .next_label()
                .map_err(|_| SketchError::LabelSpaceExhausted)?;
            if !self.nodes.contains_key(&candidate) {
                break candidate;
            }
        };
        self.insert_node(label.clone(), position);
        Ok(label)
    }

    /// Adds a node with an explicit label (frontend seeding).
    ///
    /// # Errors
    ///
    /// [`SketchError::DuplicateLabel`] when `label` is already live.
    pub fn add_labeled_node(&mut self, label: Label, position: Position) -> Result<(), SketchError> {
        if self.nodes.contains_key(&label) {
            return Err(SketchError::DuplicateLabel { label });
        }
        self.insert_node(label, position);
        Ok(())
    }

    fn insert_node(&mut self, label: Label, position: Position) {
        self.nodes
            .insert(label.clone(), Node::new(label.clone(), position));
        self.order.push(label.clone());
        self.emit(ChangeEvent::NodeAdded { label });
    }

    /// Returns the live node for `label`, if any.
    pub fn node(&self, label: &Label) -> Option<&Node> {
        self.nodes.get(label)
    }

    /// Iterates live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|label| self.nodes.get(label))
    }

    /// Iterates live labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.order.iter()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the sketch has no nodes (and hence no edges).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- edge store ---------------------------------------------------------

    /// Returns the live edge record for `id`, if any.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Iterates live edge records in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of parallel edges currently between `a` and `b` (`a == b`
    /// counts self-loops).
    pub fn parallel_count(&self, a: &Label, b: &Label) -> usize {
        self.nodes.get(a).map_or(0, |node| node.parallel_edges(b).len())
    }

    // -- mutator ------------------------------------------------------------

    /// Connects `a` and `b` with a new parallel edge (`a == b` makes a
    /// self-loop).
    ///
    /// The new edge takes the lowest free multiplicity slot; the returned
    /// [`Connected`] carries it so a frontend can pick a curvature.
    ///
    /// # Errors
    ///
    /// - [`SketchError::NotFound`] when either endpoint is not live (checked
    ///   `a` first). No mutation occurs.
    /// - [`SketchError::EdgeCapExceeded`] when the pair already has
    ///   [`EDGE_CAP`] edges. No mutation occurs.
    pub fn connect(&mut self, a: &Label, b: &Label) -> Result<Connected, SketchError> {
        if !self.nodes.contains_key(a) {
            return Err(SketchError::NotFound { label: a.clone() });
        }
        if !self.nodes.contains_key(b) {
            return Err(SketchError::NotFound { label: b.clone() });
        }

        let taken: Vec<Multiplicity> = self
            .nodes
            .get(a)
            .map_or(&[][..], |node| node.parallel_edges(b))
            .iter()
            .filter_map(|id| self.edges.get(*id))
            .map(|edge| edge.multiplicity)
            .collect();
        let Some(multiplicity) = Multiplicity::first_free(&taken) else {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            return Err(SketchError::EdgeCapExceeded {
                a: lo.clone(),
                b: hi.clone(),
            });
        };

        let id = self.edges.insert(a.clone(), b.clone(), multiplicity);
        if let Some(node) = self.nodes.get_mut(a) {
            node.links.entry(b.clone()).or_default().push(id);
        }
        // A self-loop is recorded once, under the node's own label.
        if a != b {
            if let Some(node) = self.nodes.get_mut(b) {
                node.links.entry(a.clone()).or_default().push(id);
            }
        }

        self.emit(ChangeEvent::EdgeAdded { edge: id });
        Ok(Connected { edge: id, multiplicity })
    }

    /// Deletes `label`, cascading over every incident edge.
    ///
    /// Each incident edge is removed from the store and from the neighbour's
    /// link list (a self-loop is handled in the same single pass). One
    /// [`ChangeEvent::NodeRemoved`] fires after all removals are complete.
    ///
    /// # Errors
    ///
    /// [`SketchError::NotFound`] when `label` is not live. No mutation occurs.
    pub fn delete_node(&mut self, label: &Label) -> Result<(), SketchError> {
        let Some(node) = self.nodes.remove(label) else {
            return Err(SketchError::NotFound {
                label: label.clone(),
            });
        };

        for (neighbor, edge_ids) in &node.links {
            for id in edge_ids {
                let _removed = self.edges.remove(*id);
            }
            if neighbor != label {
                if let Some(other) = self.nodes.get_mut(neighbor) {
                    other.links.remove(label);
                }
            }
        }

        self.order.retain(|l| l != label);
        self.emit(ChangeEvent::NodeRemoved {
            label: label.clone(),
        });
        Ok(())
    }

    /// Removes a single edge by id, keeping every invariant intact.
    ///
    /// Surviving parallel edges keep their multiplicity slots — curvature is
    /// not compacted, so a frontend's picture stays stable. The freed slot
    /// is taken by the next `connect` on the pair if it is the lowest free
    /// one.
    ///
    /// # Errors
    ///
    /// [`SketchError::EdgeNotFound`] when `id` is not a live edge. No
    /// mutation occurs.
    pub fn disconnect(&mut self, id: EdgeId) -> Result<(), SketchError> {
        let Some(edge) = self.edges.remove(id) else {
            return Err(SketchError::EdgeNotFound { edge: id });
        };

        Self::unlink(&mut self.nodes, &edge.from, &edge.to, id);
        if !edge.is_self_loop() {
            Self::unlink(&mut self.nodes, &edge.to, &edge.from, id);
        }

        self.emit(ChangeEvent::EdgeRemoved { edge: id });
        Ok(())
    }

    /// Drops `id` from `owner`'s link list toward `neighbor`, removing the
    /// key when the list empties.
    fn unlink(nodes: &mut HashMap<Label, Node>, owner: &Label, neighbor: &Label, id: EdgeId) {
        if let Some(node) = nodes.get_mut(owner) {
            if let Some(list) = node.links.get_mut(neighbor) {
                list.retain(|e| *e != id);
                if list.is_empty() {
                    node.links.remove(neighbor);
                }
            }
        }
    }

    // -- notification -------------------------------------------------------

    /// Registers a listener invoked after each completed mutation.
    ///
    /// Listeners are called in registration order, on the mutating thread,
    /// after the sketch is fully consistent.
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: ChangeEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
