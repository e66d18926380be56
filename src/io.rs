//! Text input and output of points and centroids.
//!
//! Input: one point per line, coordinates separated by commas (`1.5,-2,3e-1`). Surrounding
//! whitespace is ignored, blank lines are skipped. The first point determines the dimensionality.
//!
//! Output: one centroid per line, every coordinate with exactly four decimals, separated by commas.

use crate::{memory::*, Centroids, Error, PointStore, Result};
use std::io::{BufRead, Write};

/// Amount of decimals written per coordinate.
pub const OUTPUT_PRECISION: usize = 4;

/// Parse all points of `reader`.
///
/// ## Errors
/// - [`Error::Parse`] for a token that is not a number (line numbers are 1-based)
/// - [`Error::EmptyInput`], [`Error::DimensionMismatch`], [`Error::NonFiniteCoordinate`] as
///   returned by [`PointStore::from_rows`]
/// - [`Error::Io`] when reading fails
pub fn read_points<T: Primitive, R: BufRead>(reader: R) -> Result<PointStore<T>> {
    let mut rows: Vec<Vec<T>> = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rows.push(parse_line(line, line_idx + 1)?);
    }
    log::debug!("read {} points", rows.len());
    PointStore::from_rows(rows)
}

fn parse_line<T: Primitive>(line: &str, line_nr: usize) -> Result<Vec<T>> {
    line.split(',')
        .map(str::trim)
        .map(|token| token.parse::<T>().map_err(|_| Error::Parse { line: line_nr, token: token.to_string() }))
        .collect()
}

/// Format a single centroid: `{:.4}` per coordinate, comma separated, no trailing comma.
pub fn format_centroid<T: Primitive>(centroid: &[T]) -> String {
    centroid.iter()
        .map(|c| format!("{:.*}", OUTPUT_PRECISION, c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write all centroids, one per line, in index order.
pub fn write_centroids<T: Primitive, W: Write>(mut writer: W, centroids: &Centroids<T>) -> Result<()> {
    for centroid in centroids {
        writeln!(writer, "{}", format_centroid(centroid))?;
    }
    writer.flush()?;
    Ok(())
}
