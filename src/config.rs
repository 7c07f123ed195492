//! Run configuration
//!
//! Layered: built-in defaults, then an optional JSON file named by
//! `PARTITION_VIS_CONFIG`, then individual environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::{LineStyle, View};
use crate::core::{Dimension, Palette, SceneStyle, DEFAULT_PALETTE};
use crate::error::{Result, VisError};

pub const ENV_CONFIG: &str = "PARTITION_VIS_CONFIG";
pub const ENV_INPUT_DIR: &str = "PARTITION_VIS_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "PARTITION_VIS_OUTPUT_DIR";
pub const ENV_RANKS: &str = "PARTITION_VIS_RANKS";
pub const ENV_PALETTE: &str = "PARTITION_VIS_PALETTE";
pub const ENV_SHOW: &str = "PARTITION_VIS_SHOW";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory holding the `*_data_*.txt` inputs
    pub input_dir: PathBuf,
    /// Directory the figure is written to
    pub output_dir: PathBuf,
    /// Ranks probed for per-rank files: `0..rank_count`
    pub rank_count: usize,
    /// Color names, indexed by rank
    pub palette: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub marker_radius: f32,
    pub line_width: f32,
    /// 3D view angles in degrees
    pub elevation: f64,
    pub azimuth: f64,
    /// Open the viewer after the figure is saved
    pub show: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            rank_count: 4,
            palette: DEFAULT_PALETTE.iter().map(|name| name.to_string()).collect(),
            width: 1200,
            height: 1200,
            marker_radius: 2.5,
            line_width: 1.0,
            elevation: 30.0,
            azimuth: -60.0,
            show: false,
        }
    }
}

impl RenderConfig {
    /// Defaults, config file and overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same layering with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::from_json_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        debug!(?config, "Configuration resolved");
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| VisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
            .map_err(|err| VisError::Config(format!("{}: {err}", path.display())))
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_INPUT_DIR) {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(ranks) = lookup(ENV_RANKS) {
            self.rank_count = ranks.trim().parse().map_err(|_| {
                VisError::Config(format!("{ENV_RANKS}=`{ranks}` is not a rank count"))
            })?;
        }
        if let Some(palette) = lookup(ENV_PALETTE) {
            self.palette = palette
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(show) = lookup(ENV_SHOW) {
            self.show = parse_flag(&show)
                .ok_or_else(|| VisError::Config(format!("{ENV_SHOW}=`{show}` is not a flag")))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VisError::Config("figure width and height must be positive".into()));
        }
        // resolving the palette surfaces unknown names before any file is read
        self.palette()?;
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::from_names(&self.palette)
    }

    pub fn style(&self) -> SceneStyle {
        SceneStyle {
            box_line: LineStyle::Dotted,
            line_width: self.line_width,
            marker_radius: self.marker_radius,
        }
    }

    pub fn view(&self, dimension: Dimension) -> View {
        View::for_dimension(dimension, self.elevation, self.azimuth)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
