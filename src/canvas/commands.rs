//! Recording canvas: keeps draw commands in issue order so they can be
//! replayed later (viewer) or compared (two renders of the same inputs).

use nalgebra::Point3;

use super::{Canvas, Marker, Stroke};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point3<f64>,
        to: Point3<f64>,
        stroke: Stroke,
    },
    Markers {
        points: Vec<Point3<f64>>,
        marker: Marker,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }

    /// Total points over all marker batches
    pub fn marker_count(&self) -> usize {
        self.commands
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Markers { points, .. } => points.len(),
                DrawCommand::Line { .. } => 0,
            })
            .sum()
    }
}

impl Canvas for CommandList {
    fn line(&mut self, from: &Point3<f64>, to: &Point3<f64>, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from: *from,
            to: *to,
            stroke: *stroke,
        });
    }

    fn markers(&mut self, points: &[Point3<f64>], marker: &Marker) {
        self.commands.push(DrawCommand::Markers {
            points: points.to_vec(),
            marker: *marker,
        });
    }
}
