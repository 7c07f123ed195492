//! Display window for a rendered scene
//!
//! Replays the scene's recorded draw commands into an `egui_plot` plot with
//! equal data aspect. Commands are projected once, when the viewer is built.

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};
use nalgebra::Point3;
use tracing::info;

use crate::canvas::{DrawCommand, LineStyle, View};
use crate::core::{Color, Dimension, Scene, SceneStyle};
use crate::error::{Result, VisError};
use crate::theme::{color32, colors, figure_visuals};

/// Draw command already projected to plot space
enum PlotItem {
    Line {
        points: [[f64; 2]; 2],
        color: Color,
        width: f32,
        style: LineStyle,
    },
    Markers {
        points: Vec<[f64; 2]>,
        color: Color,
        radius: f32,
    },
}

pub struct SceneViewer {
    title: String,
    dimension: Dimension,
    items: Vec<PlotItem>,
}

impl SceneViewer {
    pub fn new(scene: &Scene, view: View, style: &SceneStyle) -> Self {
        let project = |p: &Point3<f64>| {
            let q = view.project(p);
            [q.x, q.y]
        };

        let items = scene
            .record(style)
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Line { from, to, stroke } => PlotItem::Line {
                    points: [project(from), project(to)],
                    color: stroke.color,
                    width: stroke.width,
                    style: stroke.style,
                },
                DrawCommand::Markers { points, marker } => PlotItem::Markers {
                    points: points.iter().map(project).collect(),
                    color: marker.color,
                    radius: marker.radius,
                },
            })
            .collect();

        Self {
            title: scene.title().to_string(),
            dimension: scene.dimension(),
            items,
        }
    }
}

impl eframe::App for SceneViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.label(
                egui::RichText::new(&self.title)
                    .color(color32(colors::TEXT_PRIMARY))
                    .size(16.0),
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("scene")
                .data_aspect(1.0)
                .show_grid(false)
                .show_background(false);
            if self.dimension == Dimension::Two {
                plot = plot.x_axis_label("X").y_axis_label("Y");
            } else {
                // projected 3D coordinates carry no axis meaning
                plot = plot.show_axes([false, false]);
            }

            plot.show(ui, |plot_ui| {
                for item in &self.items {
                    match item {
                        PlotItem::Line {
                            points,
                            color,
                            width,
                            style,
                        } => {
                            let line = Line::new(PlotPoints::from(points.to_vec()))
                                .color(color32(*color))
                                .width(*width)
                                .style(plot_line_style(*style, *width));
                            plot_ui.line(line);
                        }
                        PlotItem::Markers {
                            points,
                            color,
                            radius,
                        } => {
                            plot_ui.points(
                                Points::new(PlotPoints::from(points.clone()))
                                    .color(color32(*color))
                                    .radius(*radius)
                                    .filled(true),
                            );
                        }
                    }
                }
            });
        });
    }
}

fn plot_line_style(style: LineStyle, width: f32) -> egui_plot::LineStyle {
    match style.dash_pattern(width) {
        None => egui_plot::LineStyle::Solid,
        Some((_, off)) => egui_plot::LineStyle::Dotted { spacing: off },
    }
}

/// Open a window showing `scene`; blocks until it is closed
pub fn show(scene: &Scene, view: View, style: &SceneStyle) -> Result<()> {
    let viewer = SceneViewer::new(scene, view, style);
    let title = viewer.title.clone();
    info!(title = %title, items = viewer.items.len(), "Opening viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([900.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(figure_visuals());
            Ok(Box::new(viewer))
        }),
    )
    .map_err(|err| VisError::Viewer(err.to_string()))
}
