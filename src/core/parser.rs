//! Record parser for whitespace-delimited numeric text
//!
//! One record per line. Blank lines are skipped and `#` starts a comment
//! that runs to end of line. A line with the wrong number of fields or a
//! token that is not a float fails the whole source.

use tracing::trace;

use super::records::{Dimension, NodeBox, PointSet, Rank};
use crate::error::{Result, VisError};

/// Field layout of a node file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeLayout {
    /// `center.. size`, owner implied by the file
    PerRank(Dimension),
    /// `center.. size rank`
    Global(Dimension),
}

impl NodeLayout {
    pub fn dimension(self) -> Dimension {
        match self {
            NodeLayout::PerRank(dim) | NodeLayout::Global(dim) => dim,
        }
    }

    /// Number of fields per record
    pub fn fields(self) -> usize {
        match self {
            NodeLayout::PerRank(dim) => dim.axes() + 1,
            NodeLayout::Global(dim) => dim.axes() + 2,
        }
    }
}

/// Parse a points file owned by `rank`
pub fn parse_points(text: &str, rank: Rank, dimension: Dimension, origin: &str) -> Result<PointSet> {
    let mut points = Vec::new();
    for_each_record(text, dimension.axes(), origin, |_, fields| {
        points.push(dimension.point(fields));
        Ok(())
    })?;

    trace!(origin, rank, count = points.len(), "Parsed point records");
    Ok(PointSet::new(rank, dimension, points))
}

/// Parse a node file. Records from a global layout carry their rank.
pub fn parse_nodes(text: &str, layout: NodeLayout, origin: &str) -> Result<Vec<NodeBox>> {
    let dimension = layout.dimension();
    let axes = dimension.axes();
    let mut nodes = Vec::new();

    for_each_record(text, layout.fields(), origin, |line, fields| {
        let node = NodeBox::new(dimension.point(fields), fields[axes]);
        let node = match layout {
            NodeLayout::PerRank(_) => node,
            NodeLayout::Global(_) => node.with_rank(parse_rank(fields[axes + 1], origin, line)?),
        };
        nodes.push(node);
        Ok(())
    })?;

    trace!(origin, ?layout, count = nodes.len(), "Parsed node records");
    Ok(nodes)
}

/// Ranks are written as integers but may come back as `1.000000`.
fn parse_rank(value: f64, origin: &str, line: usize) -> Result<Rank> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(VisError::malformed(
            origin,
            line,
            format!("rank field `{value}` is not a non-negative integer"),
        ));
    }
    // `usize::MAX as f64` rounds up on 64-bit targets, so `>=` is exact
    if value >= usize::MAX as f64 {
        return Err(VisError::malformed(
            origin,
            line,
            format!("rank field `{value}` is too large"),
        ));
    }
    Ok(value as Rank)
}

/// Visit every record of `text` as a slice of exactly `width` floats.
/// Line numbers passed to `visit` are 1-based.
fn for_each_record<F>(text: &str, width: usize, origin: &str, mut visit: F) -> Result<()>
where
    F: FnMut(usize, &[f64]) -> Result<()>,
{
    let mut fields = Vec::with_capacity(width);

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default();

        fields.clear();
        for token in content.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                VisError::malformed(origin, line, format!("`{token}` is not a number"))
            })?;
            fields.push(value);
        }

        if fields.is_empty() {
            continue;
        }
        if fields.len() != width {
            return Err(VisError::malformed(
                origin,
                line,
                format!("expected {width} fields, found {}", fields.len()),
            ));
        }

        visit(line, &fields)?;
    }

    Ok(())
}
