use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_renderer::{DebugMode, RenderSettings};

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Open box with a mirror back wall and a glowing pillar
    Room,
    /// Spheres on a ground sphere under a dim sky
    Spheres,
    /// Camera inside a closed emissive sphere
    Furnace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DebugModeArg {
    Off,
    Albedo,
    Normal,
    Depth,
}

impl From<DebugModeArg> for DebugMode {
    fn from(mode: DebugModeArg) -> Self {
        match mode {
            DebugModeArg::Off => DebugMode::Off,
            DebugModeArg::Albedo => DebugMode::Albedo,
            DebugModeArg::Normal => DebugMode::Normal,
            DebugModeArg::Depth => DebugMode::Depth,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(about = "A CPU path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "room")]
    pub scene: SceneChoice,

    /// Image width in pixels
    #[arg(long, default_value = "512")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "512")]
    pub height: u32,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum path length
    #[arg(long)]
    pub max_bounces: Option<u32>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace shading with a debug view
    #[arg(long, value_enum)]
    pub debug_mode: Option<DebugModeArg>,

    /// Sample diffuse bounces uniformly over the hemisphere
    #[arg(long)]
    pub uniform_hemisphere: bool,

    /// Render all bands on the calling thread
    #[arg(long)]
    pub single_threaded: bool,

    /// Gamma-encode the output
    #[arg(long)]
    pub gamma: bool,

    /// Number of row bands
    #[arg(long)]
    pub bands: Option<usize>,

    /// JSON file with render settings (flags override it)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Output file path (.bmp or .png)
    #[arg(short, long, default_value = "render.bmp")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Resolve the render settings: defaults, then the settings file, then
    /// any flags given on the command line.
    pub fn render_settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => RenderSettings::default(),
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_bounces) = self.max_bounces {
            settings.max_bounces = max_bounces;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(mode) = self.debug_mode {
            settings.debug_mode = mode.into();
        }
        if self.uniform_hemisphere {
            settings.cosine_hemisphere = false;
        }
        if self.single_threaded {
            settings.multithreaded = false;
        }
        if self.gamma {
            settings.gamma_correct = true;
        }
        if self.bands.is_some() {
            settings.bands = self.bands;
        }
    }
}

/// Read render settings from a JSON file; missing fields keep their defaults.
pub fn load_settings(path: &Path) -> Result<RenderSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    log::debug!("Loaded render settings from {}", path.display());
    Ok(settings)
}
