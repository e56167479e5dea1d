#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod cycles;
pub mod label;
pub mod notify;
pub mod sketch;
pub mod structures;

pub use cycles::{Cycle, CycleSet, find_cycles};
pub use label::{Label, LabelAllocator, LabelError};
pub use notify::ChangeEvent;
pub use sketch::{Connected, EDGE_CAP, EdgeStore, Sketch, SketchError};
pub use structures::{Edge, EdgeId, Multiplicity, Node, Position};

/// Returns the current version of the tangle-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
