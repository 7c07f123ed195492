//! The fixed rendering scenarios and the one-shot run
//!
//! - `octree`: per-rank points and per-rank octree nodes; a rank is skipped
//!   unless both of its files exist
//! - `octree-global`: per-rank points, one global octree node file
//! - `quadtree-global`: per-rank 2D points, one global quadtree node file
//!
//! Missing files are skipped with a warning. The figure is always saved,
//! even when nothing was found.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::canvas::RasterCanvas;
use crate::config::RenderConfig;
use crate::core::source::{
    global_nodes_path, load_global_nodes, load_point_set, load_rank_nodes, optional, points_path,
    rank_nodes_path,
};
use crate::core::{Dimension, NodeSource, PointSet, Rank, Scene, SceneBuilder};
use crate::error::{Result, VisError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Octree,
    OctreeGlobal,
    QuadtreeGlobal,
}

impl Scenario {
    pub const ALL: &'static [Scenario] = &[
        Scenario::Octree,
        Scenario::OctreeGlobal,
        Scenario::QuadtreeGlobal,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Octree => "octree",
            Scenario::OctreeGlobal => "octree-global",
            Scenario::QuadtreeGlobal => "quadtree-global",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Scenario::Octree | Scenario::OctreeGlobal => Dimension::Three,
            Scenario::QuadtreeGlobal => Dimension::Two,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::Octree => "Parallel Octree Construction",
            Scenario::OctreeGlobal => "Parallel Octree Construction - Global Tree",
            Scenario::QuadtreeGlobal => "Parallel Quadtree Construction - Global Tree",
        }
    }

    pub fn output_file(self) -> &'static str {
        match self {
            Scenario::Octree => "octree_visualization.png",
            Scenario::OctreeGlobal => "octree_visualization_global.png",
            Scenario::QuadtreeGlobal => "quadtree_visualization_global.png",
        }
    }

    fn uses_global_nodes(self) -> bool {
        !matches!(self, Scenario::Octree)
    }

    /// Read every input this scenario knows about
    pub fn load(self, config: &RenderConfig) -> Result<SceneInputs> {
        let dir = config.input_dir.as_path();
        let dimension = self.dimension();
        let mut inputs = SceneInputs::default();

        for rank in 0..config.rank_count {
            let points_file = points_path(dir, rank);

            if self.uses_global_nodes() {
                // `optional` reports the missing file
                match optional(load_point_set(&points_file, rank, dimension))? {
                    Some(set) => inputs.point_sets.push(set),
                    None => inputs.skipped_ranks.push(rank),
                }
                continue;
            }

            // a rank is all or nothing: nothing of it is parsed unless both files exist
            let nodes_file = rank_nodes_path(dir, rank, dimension);
            let missing: Vec<&Path> = [points_file.as_path(), nodes_file.as_path()]
                .into_iter()
                .filter(|path| !path.is_file())
                .collect();
            if !missing.is_empty() {
                warn!(rank, ?missing, "Data files for rank not found, skipping rank");
                inputs.skipped_ranks.push(rank);
                continue;
            }

            let points = optional(load_point_set(&points_file, rank, dimension))?;
            let nodes = optional(load_rank_nodes(&nodes_file, rank, dimension))?;
            match (points, nodes) {
                (Some(set), Some(nodes)) => {
                    inputs.point_sets.push(set);
                    inputs.node_sources.push(nodes);
                }
                // removed between the existence check and the read
                _ => inputs.skipped_ranks.push(rank),
            }
        }

        if self.uses_global_nodes() {
            if let Some(nodes) =
                optional(load_global_nodes(&global_nodes_path(dir, dimension), dimension))?
            {
                inputs.node_sources.push(nodes);
            }
        }

        Ok(inputs)
    }

    /// Load and compose, without rendering
    pub fn build_scene(self, config: &RenderConfig) -> Result<Scene> {
        let palette = config.palette()?;
        let inputs = self.load(config)?;
        SceneBuilder::new(&palette, self.dimension())
            .title(self.title())
            .extend_nodes(inputs.node_sources)
            .extend_points(inputs.point_sets)
            .build()
    }

    /// Build the scene, render it and save the figure
    pub fn run(self, config: &RenderConfig) -> Result<RunReport> {
        info!(scenario = %self, input_dir = %config.input_dir.display(), "Rendering");

        let scene = self.build_scene(config)?;
        let view = config.view(self.dimension());
        let mut canvas = RasterCanvas::new(config.width, config.height, view, &scene.bounds());
        scene.render(&mut canvas, &config.style());

        let output = config.output_dir.join(self.output_file());
        canvas.save(&output)?;

        info!(
            scenario = %self,
            boxes = scene.boxes().len(),
            point_sets = scene.point_sets().len(),
            output = %output.display(),
            "Rendered"
        );
        Ok(RunReport { output, scene })
    }
}

/// Resolve scenario names; no names selects the default `octree`.
pub fn select<I, S>(names: I) -> Result<Vec<Scenario>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selected = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        let scenario = Scenario::from_name(name).ok_or_else(|| {
            let known: Vec<_> = Scenario::ALL.iter().map(|s| s.name()).collect();
            VisError::Config(format!("unknown scenario `{name}` (expected one of {})", known.join(", ")))
        })?;
        if !selected.contains(&scenario) {
            selected.push(scenario);
        }
    }
    if selected.is_empty() {
        selected.push(Scenario::Octree);
    }
    Ok(selected)
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything loaded for one scenario
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneInputs {
    pub point_sets: Vec<PointSet>,
    pub node_sources: Vec<NodeSource>,
    /// Ranks with no points contribution
    pub skipped_ranks: Vec<Rank>,
}

/// Outcome of a successful run
#[derive(Clone, Debug)]
pub struct RunReport {
    pub output: PathBuf,
    pub scene: Scene,
}
