//! Input file conventions and loaders
//!
//! Points are always per-rank. Nodes come either per-rank (owner implied by
//! the file) or from one global file whose records carry their owner; both
//! are resolved to `(rank, node)` pairs here so nothing downstream branches
//! on the format.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::parser::{parse_nodes, parse_points, NodeLayout};
use super::records::{Dimension, NodeBox, PointSet, Rank};
use crate::error::{Result, VisError};

pub fn points_path(dir: &Path, rank: Rank) -> PathBuf {
    dir.join(format!("points_data_rank_{rank}.txt"))
}

pub fn rank_nodes_path(dir: &Path, rank: Rank, dimension: Dimension) -> PathBuf {
    dir.join(format!("{}_data_rank_{rank}.txt", tree_name(dimension)))
}

pub fn global_nodes_path(dir: &Path, dimension: Dimension) -> PathBuf {
    dir.join(format!("{}_data_global.txt", tree_name(dimension)))
}

fn tree_name(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Two => "quadtree",
        Dimension::Three => "octree",
    }
}

/// Node records of one input, tagged by how their owner is known
#[derive(Clone, Debug, PartialEq)]
pub enum NodeSource {
    PerRank { rank: Rank, nodes: Vec<NodeBox> },
    Global { nodes: Vec<NodeBox> },
}

impl NodeSource {
    pub fn len(&self) -> usize {
        match self {
            NodeSource::PerRank { nodes, .. } | NodeSource::Global { nodes } => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pair every node with its owning rank
    pub fn resolve(&self) -> Result<Vec<(Rank, NodeBox)>> {
        match self {
            NodeSource::PerRank { rank, nodes } => {
                Ok(nodes.iter().map(|node| (*rank, *node)).collect())
            }
            NodeSource::Global { nodes } => nodes
                .iter()
                .enumerate()
                .map(|(idx, node)| {
                    node.rank.map(|rank| (rank, *node)).ok_or_else(|| {
                        VisError::malformed("global node source", idx + 1, "record has no rank field")
                    })
                })
                .collect(),
        }
    }
}

/// Read a whole input file; a file that does not exist is `MissingSource`.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => VisError::MissingSource(path.to_path_buf()),
        _ => VisError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub fn load_point_set(path: &Path, rank: Rank, dimension: Dimension) -> Result<PointSet> {
    let text = read_source(path)?;
    let set = parse_points(&text, rank, dimension, &path.display().to_string())?;
    debug!(path = %path.display(), rank, points = set.len(), "Loaded point set");
    Ok(set)
}

pub fn load_rank_nodes(path: &Path, rank: Rank, dimension: Dimension) -> Result<NodeSource> {
    let text = read_source(path)?;
    let nodes = parse_nodes(&text, NodeLayout::PerRank(dimension), &path.display().to_string())?;
    debug!(path = %path.display(), rank, nodes = nodes.len(), "Loaded per-rank nodes");
    Ok(NodeSource::PerRank { rank, nodes })
}

pub fn load_global_nodes(path: &Path, dimension: Dimension) -> Result<NodeSource> {
    let text = read_source(path)?;
    let nodes = parse_nodes(&text, NodeLayout::Global(dimension), &path.display().to_string())?;
    debug!(path = %path.display(), nodes = nodes.len(), "Loaded global nodes");
    Ok(NodeSource::Global { nodes })
}

/// Downgrade `MissingSource` to `None` with a notice. Every other error
/// passes through.
pub fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(VisError::MissingSource(path)) => {
            warn!(path = %path.display(), "Data file not found, skipping");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
