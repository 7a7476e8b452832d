//! Point-list parsing and route output.
//!
//! Input files are whitespace-separated `id x y` rows, optionally preceded
//! by a single row count on its own line. Identifiers are re-indexed to
//! dense node positions before a graph is built; the final route is written
//! back as `order,id,x,y` CSV. All validation lives here, the solver core
//! assumes well-formed input.

use crate::graph::{Graph, Point};
use crate::tour::Tour;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Load a point list from a file
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, String> {
    let file = File::open(&path)
        .map_err(|e| format!("Cannot open {}: {}", path.as_ref().display(), e))?;
    parse_points(BufReader::new(file))
}

/// Parse a point list from any buffered reader.
///
/// If the first non-blank line is a lone integer it is taken as a row count
/// and exactly that many data rows must follow; otherwise the first line is
/// already a data row and all remaining non-blank lines are read as data.
/// Malformed rows are logged and skipped (not counted toward an announced
/// count).
pub fn parse_points<R: BufRead>(reader: R) -> Result<Vec<Point>, String> {
    let mut lines = reader.lines();

    let first = loop {
        match lines.next() {
            Some(line) => {
                let line = line.map_err(|e| format!("Read error: {}", e))?;
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    break trimmed;
                }
            }
            None => return Err("File is empty".to_string()),
        }
    };

    let tokens: Vec<&str> = first.split_whitespace().collect();
    let mut points = Vec::new();

    if tokens.len() == 1 {
        // Header form: the first line announces the row count
        let count: usize = tokens[0]
            .parse()
            .map_err(|_| format!("First line is neither a count nor a data row: '{}'", first))?;

        while points.len() < count {
            let line = match lines.next() {
                Some(line) => line.map_err(|e| format!("Read error: {}", e))?,
                None => {
                    return Err(format!(
                        "Expected {} data rows but file ended after {}",
                        count,
                        points.len()
                    ))
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_row(line) {
                Ok(point) => points.push(point),
                Err(e) => warn!("Skipping malformed row: {}", e),
            }
        }
    } else {
        // Headerless form: every non-blank line is a data row
        points.push(parse_row(&first)?);
        for line in lines {
            let line = line.map_err(|e| format!("Read error: {}", e))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_row(line) {
                Ok(point) => points.push(point),
                Err(e) => warn!("Skipping malformed row: {}", e),
            }
        }
    }

    Ok(points)
}

fn parse_row(line: &str) -> Result<Point, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("expected 'id x y', got '{}'", line));
    }
    let id: usize = parts[0]
        .parse()
        .map_err(|_| format!("invalid id in '{}'", line))?;
    let x: f64 = parts[1]
        .parse()
        .map_err(|_| format!("invalid x coordinate in '{}'", line))?;
    let y: f64 = parts[2]
        .parse()
        .map_err(|_| format!("invalid y coordinate in '{}'", line))?;
    Ok(Point::new(id, x, y))
}

/// Re-index identifiers to dense node positions `0..n-1`.
///
/// Points whose IDs are already exactly `0..n-1` in file order pass through
/// unchanged. Otherwise each ID must be unique and in range `0..n`; points
/// are placed at their ID's position and assigned that position as their new
/// ID, so `Point::id` and node index coincide inside the solver.
pub fn reindex_points(points: Vec<Point>) -> Result<Vec<Point>, String> {
    let n = points.len();
    if points.iter().enumerate().all(|(i, p)| p.id == i) {
        return Ok(points);
    }

    let mut slots: Vec<Option<Point>> = vec![None; n];
    for point in points {
        if point.id >= n {
            return Err(format!("ID {} out of range 0..{}", point.id, n));
        }
        if slots[point.id].is_some() {
            return Err(format!("Duplicate ID {}", point.id));
        }
        slots[point.id] = Some(point);
    }

    Ok(slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            let p = slot.unwrap();
            Point::new(i, p.x, p.y)
        })
        .collect())
}

/// Write the final route as `order,id,x,y` CSV
pub fn write_route_csv<W: Write>(writer: W, graph: &Graph, tour: &Tour) -> Result<(), String> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["order", "id", "x", "y"])
        .map_err(|e| format!("CSV write error: {}", e))?;

    for (order, &idx) in tour.route().iter().enumerate() {
        let point = graph.point(idx);
        csv.write_record([
            order.to_string(),
            point.id.to_string(),
            point.x.to_string(),
            point.y.to_string(),
        ])
        .map_err(|e| format!("CSV write error: {}", e))?;
    }

    csv.flush().map_err(|e| format!("CSV write error: {}", e))
}
