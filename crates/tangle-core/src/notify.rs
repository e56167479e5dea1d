/// Change notification for presentation layers.
///
/// The core does not know how a frontend redraws; it only reports that the
/// sketch changed. Frontends register a listener with
/// [`crate::sketch::Sketch::subscribe`] and receive a [`ChangeEvent`] after
/// each completed mutation. Events fire strictly after the mutation — a
/// listener never observes a half-applied state — and a failed operation
/// emits nothing.
use std::fmt;

use serde::Serialize;

use crate::label::Label;
use crate::structures::EdgeId;

/// A completed mutation of the sketch.
///
/// Node deletion cascades over the node's edges, but emits a single
/// [`ChangeEvent::NodeRemoved`] once every removal is done; cascaded edges do
/// not produce individual [`ChangeEvent::EdgeRemoved`] events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ChangeEvent {
    /// A node was added to the registry.
    NodeAdded {
        /// Label of the new node.
        label: Label,
    },
    /// A node and all of its edges were removed.
    NodeRemoved {
        /// Label of the removed node.
        label: Label,
    },
    /// An edge was added between two live nodes.
    EdgeAdded {
        /// Store id of the new edge.
        edge: EdgeId,
    },
    /// A single edge was removed (standalone disconnect, not a cascade).
    EdgeRemoved {
        /// Store id of the removed edge.
        edge: EdgeId,
    },
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeAdded { label } => write!(f, "node {label} added"),
            Self::NodeRemoved { label } => write!(f, "node {label} removed"),
            Self::EdgeAdded { edge } => write!(f, "edge {edge} added"),
            Self::EdgeRemoved { edge } => write!(f, "edge {edge} removed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
