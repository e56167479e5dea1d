//! Line-oriented editing-script parser.
//!
//! A script is the text stand-in for the mouse: each line is one user action
//! against the sketch. Blank lines and `#` comments are ignored.
//!
//! ```text
//! # seed four nodes, close a triangle, ask for cycles
//! node A 50 50
//! node B 200 50
//! node C 350 150
//! node 100 300          # allocator picks the label (D here)
//! connect A B
//! connect B C
//! connect C A
//! cycles
//! ```
//!
//! Commands:
//! - `node X Y` — add a node at (X, Y) with an allocator-chosen label
//! - `node LABEL X Y` — add a node with an explicit label
//! - `connect A B` — add a parallel edge between A and B (`connect A A` is a
//!   self-loop)
//! - `delete A` — delete node A and every edge touching it
//! - `cycles` — report the cycles of the sketch at this point
use tangle_core::{Label, Position};

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// One parsed user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add a node; `label: None` asks the allocator to pick one.
    AddNode {
        /// Explicit label, if the script named one.
        label: Option<Label>,
        /// Canvas position of the new node.
        position: Position,
    },
    /// Add a parallel edge between two labels (equal labels make a self-loop).
    Connect {
        /// First selected endpoint.
        a: Label,
        /// Second selected endpoint.
        b: Label,
    },
    /// Delete a node and cascade over its edges.
    Delete {
        /// The label to delete.
        label: Label,
    },
    /// Report the cycles of the sketch as built so far.
    ReportCycles,
}

/// A parsed action together with its 1-based script line, for error
/// reporting when the core rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// 1-based line number in the script source.
    pub line: usize,
    /// The parsed action.
    pub action: Action,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parses a full script into steps.
///
/// # Errors
///
/// Returns [`CliError::ScriptError`] (exit code 2) naming the first
/// malformed line; nothing is executed on a parse failure.
pub fn parse_script(content: &str) -> Result<Vec<Step>, CliError> {
    let mut steps = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        // Strip a trailing comment, then surrounding whitespace.
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let mut words = text.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        let action = match keyword {
            "node" => parse_node(&args, line)?,
            "connect" => parse_connect(&args, line)?,
            "delete" => parse_delete(&args, line)?,
            "cycles" => parse_cycles(&args, line)?,
            other => {
                return Err(CliError::ScriptError {
                    line,
                    detail: format!("unknown command {other:?}"),
                });
            }
        };

        steps.push(Step { line, action });
    }

    Ok(steps)
}

/// `node X Y` or `node LABEL X Y`.
fn parse_node(args: &[&str], line: usize) -> Result<Action, CliError> {
    match args {
        [x, y] => Ok(Action::AddNode {
            label: None,
            position: Position::new(coord(x, line)?, coord(y, line)?),
        }),
        [l, x, y] => Ok(Action::AddNode {
            label: Some(label(l, line)?),
            position: Position::new(coord(x, line)?, coord(y, line)?),
        }),
        _ => Err(CliError::ScriptError {
            line,
            detail: "usage: node [LABEL] X Y".to_owned(),
        }),
    }
}

/// `connect A B`.
fn parse_connect(args: &[&str], line: usize) -> Result<Action, CliError> {
    match args {
        [a, b] => Ok(Action::Connect {
            a: label(a, line)?,
            b: label(b, line)?,
        }),
        _ => Err(CliError::ScriptError {
            line,
            detail: "usage: connect A B".to_owned(),
        }),
    }
}

/// `delete A`.
fn parse_delete(args: &[&str], line: usize) -> Result<Action, CliError> {
    match args {
        [l] => Ok(Action::Delete {
            label: label(l, line)?,
        }),
        _ => Err(CliError::ScriptError {
            line,
            detail: "usage: delete A".to_owned(),
        }),
    }
}

/// `cycles` takes no arguments.
fn parse_cycles(args: &[&str], line: usize) -> Result<Action, CliError> {
    if args.is_empty() {
        Ok(Action::ReportCycles)
    } else {
        Err(CliError::ScriptError {
            line,
            detail: "usage: cycles".to_owned(),
        })
    }
}

/// Parses a label argument, mapping the core's validation error.
fn label(s: &str, line: usize) -> Result<Label, CliError> {
    Label::try_from(s).map_err(|e| CliError::ScriptError {
        line,
        detail: e.to_string(),
    })
}

/// Parses a coordinate argument.
fn coord(s: &str, line: usize) -> Result<f64, CliError> {
    s.parse::<f64>().map_err(|_| CliError::ScriptError {
        line,
        detail: format!("invalid coordinate {s:?}"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
