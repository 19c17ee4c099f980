//! Reading and writing the two-column point file.
//!
//! Each line holds one point: a number, an optional `,` or `;` separator,
//! and a second number. Whitespace around fields is ignored, and so is
//! anything after the second number. Blank lines and lines that do not start
//! with two numbers are skipped without failing the load.
//!
//! Files are written back in the same format, one `x,y` line per point.
//!
//! # Example
//! ```
//! # use fitview::io::{parse_points, write_points};
//! let points = parse_points::<f64>("1,2\n\n3;4.5\nnot a point\n-1 7 trailing\n");
//! assert_eq!(points.size(), 3);
//!
//! let mut out = Vec::new();
//! write_points(&mut out, points.as_slice()).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "1,2\n3,4.5\n-1,7\n");
//! ```
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    points::PointSet,
    value::{Point, Value},
};

const SEPARATORS: [char; 2] = [',', ';'];

fn is_field_end(c: char) -> bool {
    SEPARATORS.contains(&c) || c.is_whitespace()
}

/// Splits off the leading field, up to a separator or whitespace
fn next_field(s: &str) -> (&str, &str) {
    match s.find(is_field_end) {
        Some(end) => s.split_at(end),
        None => (s, ""),
    }
}

/// Parses one line of the point file.
///
/// Returns `None` for blank lines and for lines that do not begin with two
/// numeric fields. `nan` and `inf` are accepted as numbers.
pub fn parse_line<T: Value>(line: &str) -> Option<Point<T>> {
    let (first, rest) = next_field(line.trim());
    let x = first.parse::<T>().ok()?;

    let rest = rest.trim_start();
    let rest = rest.strip_prefix(SEPARATORS).unwrap_or(rest).trim_start();
    let (second, _) = next_field(rest);
    let y = second.parse::<T>().ok()?;

    Some(Point::new(x, y))
}

/// Parses every line of `text`, skipping the ones that are not points
pub fn parse_points<T: Value>(text: &str) -> PointSet<T> {
    text.lines().filter_map(parse_accepted::<T>).collect()
}

/// Reads points from a buffered reader, skipping the lines that are not points.
///
/// Lines are decoded lossily, so a line with invalid UTF-8 is skipped like
/// any other unparseable line instead of failing the whole read.
///
/// # Errors
/// Returns an error if the underlying reader fails.
pub fn read_points<T: Value>(reader: impl BufRead) -> Result<PointSet<T>> {
    let mut points = PointSet::new();
    for line in reader.split(b'\n') {
        let line = line?;
        if let Some(point) = parse_accepted(&String::from_utf8_lossy(&line)) {
            points.add(point);
        }
    }

    Ok(points)
}

fn parse_accepted<T: Value>(line: &str) -> Option<Point<T>> {
    let point = parse_line(line);
    if point.is_none() && !line.trim().is_empty() {
        log::trace!("Skipping unparseable line `{line}`");
    }
    point
}

/// Loads the point file at `path`.
///
/// # Errors
/// Returns [`Error::FileUnavailable`] if the file cannot be opened, or
/// [`Error::Io`] if reading fails part way.
pub fn load_points<T: Value>(path: impl AsRef<Path>) -> Result<PointSet<T>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let points = read_points(BufReader::new(file))?;
    log::info!("Loaded {} points from {}", points.size(), path.display());
    Ok(points)
}

/// Writes one `x,y` line per point.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_points<T: Value>(mut writer: impl Write, points: &[Point<T>]) -> Result<()> {
    for point in points {
        writeln!(writer, "{point}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Saves the points to `path`, replacing any existing contents.
///
/// # Errors
/// Returns [`Error::FileUnavailable`] if the file cannot be created, or
/// [`Error::Io`] if writing fails.
pub fn save_points<T: Value>(path: impl AsRef<Path>, points: &[Point<T>]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    write_points(BufWriter::new(file), points)?;
    log::info!("Saved {} points to {}", points.len(), path.display());
    Ok(())
}
