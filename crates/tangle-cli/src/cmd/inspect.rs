//! Implementation of `tangle inspect <script>`.
//!
//! Executes an editing script silently and prints summary statistics for the
//! resulting sketch:
//! - node and edge counts
//! - self-loop count
//! - parallel-edge count per unordered pair
//! - cycle count
//!
//! In `--format json` mode a single JSON object is emitted; in human mode,
//! aligned key/value lines.
//!
//! Exit codes: 0 = success, 1 = a step was rejected, 2 = parse failure.
use std::collections::BTreeMap;
use std::io::Write as _;

use tangle_core::{Sketch, find_cycles};

use crate::cli::OutputFormat;
use crate::cmd::{apply_step, io_to_cli};
use crate::error::CliError;
use crate::script::parse_script;

/// Statistics gathered from a built sketch.
pub struct InspectStats {
    /// Total number of live nodes.
    pub node_count: usize,
    /// Total number of live edges.
    pub edge_count: usize,
    /// How many of those edges are self-loops.
    pub self_loops: usize,
    /// Parallel-edge count per unordered pair, keyed `"A-B"` (lexical order).
    pub pair_counts: BTreeMap<String, usize>,
    /// Number of cycles the detector reports.
    pub cycle_count: usize,
}

impl InspectStats {
    /// Computes statistics from a sketch.
    pub fn from_sketch(sketch: &Sketch) -> Self {
        let mut pair_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut self_loops = 0usize;

        for edge in sketch.edges() {
            let (lo, hi) = edge.pair();
            *pair_counts.entry(format!("{lo}-{hi}")).or_insert(0) += 1;
            if edge.is_self_loop() {
                self_loops += 1;
            }
        }

        Self {
            node_count: sketch.node_count(),
            edge_count: sketch.edge_count(),
            self_loops,
            pair_counts,
            cycle_count: find_cycles(sketch).len(),
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError`] for parse failures, rejected steps, and stdout write
/// failures.
pub fn run(content: &str, format: &OutputFormat) -> Result<(), CliError> {
    let steps = parse_script(content)?;

    let mut sketch = Sketch::new();
    for step in &steps {
        apply_step(&mut sketch, step)?;
    }

    let stats = InspectStats::from_sketch(&sketch);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => print_json(&mut out, &stats),
    }
    .map_err(|e| io_to_cli(&e))
}

/// Writes statistics in human-readable aligned format.
fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "nodes:      {}", stats.node_count)?;
    writeln!(w, "edges:      {}", stats.edge_count)?;
    writeln!(w, "self loops: {}", stats.self_loops)?;
    if !stats.pair_counts.is_empty() {
        writeln!(w, "pairs:")?;
        for (pair, count) in &stats.pair_counts {
            writeln!(w, "  {pair}: {count}")?;
        }
    }
    writeln!(w, "cycles:     {}", stats.cycle_count)
}

/// Writes statistics as a single JSON object.
fn print_json<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    let json = serde_json::json!({
        "nodes": stats.node_count,
        "edges": stats.edge_count,
        "self_loops": stats.self_loops,
        "pairs": stats.pair_counts,
        "cycles": stats.cycle_count,
    });
    writeln!(w, "{json:#}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
