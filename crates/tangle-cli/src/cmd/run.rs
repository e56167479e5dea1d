//! Implementation of `tangle run <script>`.
//!
//! Executes an editing script against a fresh sketch. Echo lines come from
//! the core's change-notification hook — the CLI's stand-in for a redraw —
//! so what is printed is exactly what a graphical frontend would be told to
//! repaint. Inline `cycles` lines print a report of the sketch at that point
//! in the script. A final summary line closes the output.
//!
//! Exit codes: 0 = success, 1 = a step was rejected by the core, 2 = the
//! script could not be parsed.
use std::cell::RefCell;
use std::io::Write as _;
use std::rc::Rc;

use tangle_core::{ChangeEvent, Sketch, find_cycles};

use crate::cli::OutputFormat;
use crate::cmd::{Applied, apply_step, cycles_to_json, io_to_cli, write_cycles_human};
use crate::error::CliError;
use crate::script::parse_script;

/// Runs the `run` command.
///
/// # Errors
///
/// Returns [`CliError`] for parse failures (exit 2), rejected steps (exit 1),
/// and stdout write failures (exit 2).
pub fn run(content: &str, format: &OutputFormat, quiet: bool) -> Result<(), CliError> {
    let steps = parse_script(content)?;

    let mut sketch = Sketch::new();
    let events: Rc<RefCell<Vec<ChangeEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    sketch.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for step in &steps {
        match apply_step(&mut sketch, step)? {
            Applied::Mutated => {
                let drained: Vec<ChangeEvent> = events.borrow_mut().drain(..).collect();
                if quiet {
                    continue;
                }
                for event in &drained {
                    let written = match format {
                        OutputFormat::Human => {
                            writeln!(out, "{}", event_line(&sketch, event))
                        }
                        OutputFormat::Json => match serde_json::to_string(event) {
                            Ok(json) => writeln!(out, "{json}"),
                            Err(e) => {
                                return Err(CliError::IoError {
                                    source: "stdout".to_owned(),
                                    detail: e.to_string(),
                                });
                            }
                        },
                    };
                    written.map_err(|e| io_to_cli(&e))?;
                }
            }
            Applied::CyclesRequested => {
                let cycles = find_cycles(&sketch);
                match format {
                    OutputFormat::Human => {
                        write_cycles_human(&mut out, &cycles).map_err(|e| io_to_cli(&e))?;
                    }
                    OutputFormat::Json => {
                        writeln!(out, "{}", cycles_to_json(&cycles))
                            .map_err(|e| io_to_cli(&e))?;
                    }
                }
            }
        }
    }

    let summary = match format {
        OutputFormat::Human => writeln!(
            out,
            "sketch: {} nodes, {} edges",
            sketch.node_count(),
            sketch.edge_count()
        ),
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::json!({
                "nodes": sketch.node_count(),
                "edges": sketch.edge_count(),
            })
        ),
    };
    summary.map_err(|e| io_to_cli(&e))
}

/// Renders one change event for human output.
///
/// Edge additions are enriched with the endpoints and the multiplicity's
/// rendering hint, which is what a graphical frontend would use to pick a
/// curvature.
fn event_line(sketch: &Sketch, event: &ChangeEvent) -> String {
    match event {
        ChangeEvent::EdgeAdded { edge } => match sketch.edge(*edge) {
            Some(record) => format!(
                "edge {} added: {} - {} ({})",
                edge, record.from, record.to, record.multiplicity
            ),
            None => event.to_string(),
        },
        ChangeEvent::NodeAdded { .. }
        | ChangeEvent::NodeRemoved { .. }
        | ChangeEvent::EdgeRemoved { .. } => event.to_string(),
    }
}
