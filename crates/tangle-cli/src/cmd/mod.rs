//! Subcommand implementations and the shared script executor.
pub mod cycles;
pub mod inspect;
pub mod run;

use std::io::Write;

use tangle_core::{CycleSet, Sketch};

use crate::error::CliError;
use crate::script::{Action, Step};

// ---------------------------------------------------------------------------
// Shared step executor
// ---------------------------------------------------------------------------

/// What applying one step did.
pub(crate) enum Applied {
    /// The sketch was mutated.
    Mutated,
    /// The step was a `cycles` marker; the caller decides how to report.
    CyclesRequested,
}

/// Applies one parsed step to the sketch.
///
/// # Errors
///
/// A step the core rejects (dead label, edge cap, spent allocator) becomes
/// [`CliError::OpFailed`] carrying the script line, exit code 1. The sketch
/// is untouched by the failing step.
pub(crate) fn apply_step(sketch: &mut Sketch, step: &Step) -> Result<Applied, CliError> {
    let result = match &step.action {
        Action::AddNode {
            label: Some(l),
            position,
        } => sketch.add_labeled_node(l.clone(), *position),
        Action::AddNode {
            label: None,
            position,
        } => sketch.add_node(*position).map(|_| ()),
        Action::Connect { a, b } => sketch.connect(a, b).map(|_| ()),
        Action::Delete { label } => sketch.delete_node(label),
        Action::ReportCycles => return Ok(Applied::CyclesRequested),
    };

    result.map(|()| Applied::Mutated).map_err(|e| CliError::OpFailed {
        line: step.line,
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Shared report rendering
// ---------------------------------------------------------------------------

/// Writes the cycle report in human format.
///
/// Mirrors the closed-walk notation of [`tangle_core::Cycle`]'s `Display`:
/// each line repeats the anchor, e.g. `A -> B -> C -> A`.
pub(crate) fn write_cycles_human<W: Write>(w: &mut W, cycles: &CycleSet) -> std::io::Result<()> {
    if cycles.is_empty() {
        return writeln!(w, "no cycles detected");
    }
    writeln!(w, "cycles found: {}", cycles.len())?;
    for cycle in cycles {
        writeln!(w, "  {cycle}")?;
    }
    Ok(())
}

/// Builds the JSON form of a cycle report.
pub(crate) fn cycles_to_json(cycles: &CycleSet) -> serde_json::Value {
    serde_json::json!({
        "count": cycles.len(),
        "cycles": cycles,
    })
}

/// Wraps a stdout write failure into a [`CliError`].
pub(crate) fn io_to_cli(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
