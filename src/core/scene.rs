//! Scene composition: rank-owned node boxes and point sets resolved against
//! a palette, drawn boxes-first so points sit on top of the structure.

use std::collections::BTreeSet;

use nalgebra::Point3;
use tracing::debug;

use super::geometry::{BoxGeometry, Bounds};
use super::palette::{Color, Palette};
use super::records::{Dimension, PointSet, Rank};
use super::source::NodeSource;
use crate::canvas::{Canvas, CommandList, LineStyle, Marker, Stroke};
use crate::error::Result;

/// Stroke and marker sizes shared by every rank
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStyle {
    pub box_line: LineStyle,
    /// Pixels
    pub line_width: f32,
    /// Pixels
    pub marker_radius: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            box_line: LineStyle::Dotted,
            line_width: 1.0,
            marker_radius: 2.5,
        }
    }
}

/// Node box with its owner and resolved color
#[derive(Clone, Debug, PartialEq)]
pub struct RankedBox {
    pub rank: Rank,
    pub color: Color,
    pub geometry: BoxGeometry,
}

/// Point set with its resolved color
#[derive(Clone, Debug, PartialEq)]
pub struct RankedPoints {
    pub rank: Rank,
    pub color: Color,
    pub points: Vec<Point3<f64>>,
}

/// Everything one figure shows
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    title: String,
    dimension: Dimension,
    boxes: Vec<RankedBox>,
    point_sets: Vec<RankedPoints>,
}

impl Scene {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn boxes(&self) -> &[RankedBox] {
        &self.boxes
    }

    pub fn point_sets(&self) -> &[RankedPoints] {
        &self.point_sets
    }

    /// Ranks that contributed at least one point set
    pub fn point_ranks(&self) -> BTreeSet<Rank> {
        self.point_sets.iter().map(|set| set.rank).collect()
    }

    /// Ranks that own at least one box
    pub fn box_ranks(&self) -> BTreeSet<Rank> {
        self.boxes.iter().map(|b| b.rank).collect()
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for ranked in &self.boxes {
            bounds.include_box(&ranked.geometry);
        }
        for point in self.point_sets.iter().flat_map(|set| &set.points) {
            bounds.include(point);
        }
        bounds
    }

    /// Issue draw commands: every box edge first, then one marker batch per
    /// point set.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &SceneStyle) {
        for ranked in &self.boxes {
            let stroke = Stroke {
                color: ranked.color,
                width: style.line_width,
                style: style.box_line,
            };
            for edge in ranked.geometry.edges() {
                canvas.line(&edge.from, &edge.to, &stroke);
            }
        }

        for set in &self.point_sets {
            let marker = Marker {
                color: set.color,
                radius: style.marker_radius,
            };
            canvas.markers(&set.points, &marker);
        }
    }

    /// Render into a fresh command list
    pub fn record(&self, style: &SceneStyle) -> CommandList {
        let mut list = CommandList::new();
        self.render(&mut list, style);
        list
    }
}

/// Collects node sources and point sets, then resolves them against the
/// palette in [`SceneBuilder::build`].
#[derive(Debug)]
pub struct SceneBuilder<'a> {
    palette: &'a Palette,
    dimension: Dimension,
    title: String,
    node_sources: Vec<NodeSource>,
    point_sets: Vec<PointSet>,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(palette: &'a Palette, dimension: Dimension) -> Self {
        Self {
            palette,
            dimension,
            title: String::new(),
            node_sources: Vec::new(),
            point_sets: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn nodes(mut self, source: NodeSource) -> Self {
        self.node_sources.push(source);
        self
    }

    pub fn points(mut self, set: PointSet) -> Self {
        self.point_sets.push(set);
        self
    }

    pub fn extend_nodes(mut self, sources: impl IntoIterator<Item = NodeSource>) -> Self {
        self.node_sources.extend(sources);
        self
    }

    pub fn extend_points(mut self, sets: impl IntoIterator<Item = PointSet>) -> Self {
        self.point_sets.extend(sets);
        self
    }

    /// Resolve every rank to a color and every node to box geometry.
    /// Fails on the first rank the palette does not cover.
    pub fn build(self) -> Result<Scene> {
        let mut boxes = Vec::new();
        for source in &self.node_sources {
            for (rank, node) in source.resolve()? {
                boxes.push(RankedBox {
                    rank,
                    color: self.palette.color(rank)?,
                    geometry: BoxGeometry::from_node(&node, self.dimension),
                });
            }
        }

        let mut point_sets = Vec::with_capacity(self.point_sets.len());
        for set in self.point_sets {
            point_sets.push(RankedPoints {
                rank: set.rank,
                color: self.palette.color(set.rank)?,
                points: set.points,
            });
        }

        debug!(
            dimension = ?self.dimension,
            boxes = boxes.len(),
            point_sets = point_sets.len(),
            "Scene built"
        );

        Ok(Scene {
            title: self.title,
            dimension: self.dimension,
            boxes,
            point_sets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::core::NodeBox;
    use crate::error::VisError;

    fn octree_rank(rank: Rank) -> (PointSet, NodeSource) {
        let offset = rank as f64 * 2.0;
        let points = PointSet::new(
            rank,
            Dimension::Three,
            vec![Point3::new(offset + 0.5, 0.5, 0.5), Point3::new(offset + 1.5, 1.5, 1.5)],
        );
        let nodes = NodeSource::PerRank {
            rank,
            nodes: vec![NodeBox::new(Point3::new(offset + 1.0, 1.0, 1.0), 2.0)],
        };
        (points, nodes)
    }

    #[test]
    fn test_per_rank_colors_follow_rank() {
        let palette = Palette::default();
        let mut builder = SceneBuilder::new(&palette, Dimension::Three);
        for rank in 0..4 {
            let (points, nodes) = octree_rank(rank);
            builder = builder.points(points).nodes(nodes);
        }
        let scene = builder.build().unwrap();

        assert_eq!(scene.boxes().len(), 4);
        assert_eq!(scene.point_sets().len(), 4);
        for ranked in scene.boxes() {
            assert_eq!(ranked.color, palette.color(ranked.rank).unwrap());
        }
        for set in scene.point_sets() {
            assert_eq!(set.color, palette.color(set.rank).unwrap());
        }
    }

    #[test]
    fn test_point_set_keeps_its_rank_when_a_rank_is_absent() {
        let palette = Palette::default();
        let mut builder = SceneBuilder::new(&palette, Dimension::Three);
        for rank in [0, 1, 3] {
            builder = builder.points(octree_rank(rank).0);
        }
        let scene = builder.build().unwrap();

        assert_eq!(scene.point_ranks(), BTreeSet::from([0, 1, 3]));
        let last = &scene.point_sets()[2];
        assert_eq!(last.rank, 3);
        assert_eq!(last.color, palette.color(3).unwrap());
    }

    #[test]
    fn test_global_nodes_colored_by_record_rank() {
        let palette = Palette::default();
        let source = NodeSource::Global {
            nodes: vec![
                NodeBox::new(Point3::new(0.0, 0.0, 0.0), 4.0).with_rank(1),
                NodeBox::new(Point3::new(1.0, 1.0, 0.0), 2.0).with_rank(3),
            ],
        };
        let scene = SceneBuilder::new(&palette, Dimension::Two)
            .nodes(source)
            .build()
            .unwrap();

        let first = &scene.boxes()[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.color, palette.color(1).unwrap());
        assert_eq!(first.geometry.min_corner(), Point3::new(-2.0, -2.0, 0.0));
        assert_eq!(first.geometry.max_corner(), Point3::new(2.0, 2.0, 0.0));
        assert_eq!(scene.box_ranks(), BTreeSet::from([1, 3]));
    }

    #[test]
    fn test_rank_out_of_range_fails_build() {
        let palette = Palette::default();
        let source = NodeSource::Global {
            nodes: vec![NodeBox::new(Point3::origin(), 1.0).with_rank(4)],
        };
        let err = SceneBuilder::new(&palette, Dimension::Two).nodes(source).build().unwrap_err();
        assert!(matches!(err, VisError::RankOutOfRange { rank: 4, len: 4 }));

        let points = PointSet::new(5, Dimension::Two, vec![Point3::origin()]);
        let err = SceneBuilder::new(&palette, Dimension::Two).points(points).build().unwrap_err();
        assert!(matches!(err, VisError::RankOutOfRange { rank: 5, len: 4 }));
    }

    #[test]
    fn test_boxes_are_drawn_before_points() {
        let palette = Palette::default();
        let mut builder = SceneBuilder::new(&palette, Dimension::Three);
        // interleave inputs; output order must still be boxes then points
        for rank in 0..3 {
            let (points, nodes) = octree_rank(rank);
            builder = builder.points(points).nodes(nodes);
        }
        let scene = builder.build().unwrap();
        let list = scene.record(&SceneStyle::default());

        assert_eq!(list.line_count(), 3 * 12);
        assert_eq!(list.marker_count(), 3 * 2);
        let first_marker = list
            .commands()
            .iter()
            .position(|cmd| matches!(cmd, DrawCommand::Markers { .. }))
            .unwrap();
        assert_eq!(first_marker, list.line_count());
        assert!(list.commands()[first_marker..]
            .iter()
            .all(|cmd| matches!(cmd, DrawCommand::Markers { .. })));
    }

    #[test]
    fn test_box_edges_use_dotted_stroke_in_rank_color() {
        let palette = Palette::default();
        let (_, nodes) = octree_rank(2);
        let scene = SceneBuilder::new(&palette, Dimension::Three).nodes(nodes).build().unwrap();
        let list = scene.record(&SceneStyle::default());

        for cmd in list.commands() {
            match cmd {
                DrawCommand::Line { stroke, .. } => {
                    assert_eq!(stroke.style, LineStyle::Dotted);
                    assert_eq!(stroke.color, palette.color(2).unwrap());
                }
                DrawCommand::Markers { .. } => panic!("no points were added"),
            }
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_scenes() {
        let palette = Palette::default();
        let build = || {
            let (points, nodes) = octree_rank(1);
            SceneBuilder::new(&palette, Dimension::Three)
                .title("Parallel Octree Construction")
                .points(points)
                .nodes(nodes)
                .build()
                .unwrap()
        };
        let (a, b) = (build(), build());
        assert_eq!(a, b);
        assert_eq!(a.record(&SceneStyle::default()), b.record(&SceneStyle::default()));
    }

    #[test]
    fn test_bounds_cover_boxes_and_points() {
        let palette = Palette::default();
        let scene = SceneBuilder::new(&palette, Dimension::Three)
            .nodes(NodeSource::PerRank {
                rank: 0,
                nodes: vec![NodeBox::new(Point3::origin(), 2.0)],
            })
            .points(PointSet::new(0, Dimension::Three, vec![Point3::new(3.0, 0.0, 0.0)]))
            .build()
            .unwrap();

        let bounds = scene.bounds();
        assert_eq!(bounds.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Point3::new(3.0, 1.0, 1.0));

        let empty = SceneBuilder::new(&palette, Dimension::Two).build().unwrap();
        assert!(empty.bounds().is_empty());
        assert!(empty.record(&SceneStyle::default()).is_empty());
    }
}
