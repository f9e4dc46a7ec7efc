//! Weighted edge-list reading and writing.
//!
//! Format: one edge per line, `source target weight`, whitespace separated.
//! Blank lines are skipped and `#` starts a comment.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

use super::TaskGraph;

/// Errors raised while loading a graph.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unable to read edge list: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed edge list at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Parse a weight field. Integral float literals like `3.0` are accepted.
fn parse_weight(field: &str) -> Result<u64, String> {
    if let Ok(w) = field.parse::<u64>() {
        return Ok(w);
    }
    match field.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 && w.fract() == 0.0 => {
            // `u64::MAX as f64` rounds up to 2^64, which is itself out of range
            if w < u64::MAX as f64 {
                Ok(w as u64)
            } else {
                Err(format!("weight {:?} does not fit in 64 bits", field))
            }
        }
        _ => Err(format!("weight {:?} is not a non-negative integer", field)),
    }
}

/// Parse edge-list text into a graph.
pub fn parse_edgelist(text: &str) -> Result<TaskGraph, InputError> {
    let mut graph = TaskGraph::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        let [source, target, weight] = fields.as_slice() else {
            return Err(InputError::Parse {
                line,
                reason: format!("expected `source target weight`, found {} fields", fields.len()),
            });
        };

        let weight = parse_weight(weight).map_err(|reason| InputError::Parse { line, reason })?;

        graph.add_edge(source, target, weight);
    }

    Ok(graph)
}

/// Read and parse an edge-list file.
pub fn read_edgelist<P: AsRef<Path>>(path: P) -> Result<TaskGraph, InputError> {
    let text = fs::read_to_string(path)?;
    parse_edgelist(&text)
}

/// Render a graph as edge-list text, one edge per line in edge order.
pub fn format_edgelist(graph: &TaskGraph) -> String {
    let mut out = String::new();
    for edge in graph.edges() {
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{} {} {}",
            graph.label(edge.source),
            graph.label(edge.target),
            edge.weight
        );
    }
    out
}

/// Write a graph as edge-list text.
pub fn write_edgelist<W: Write>(graph: &TaskGraph, writer: &mut W) -> io::Result<()> {
    writer.write_all(format_edgelist(graph).as_bytes())
}
