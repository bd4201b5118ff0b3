// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewer configuration.
//!
//! The viewer runs with zero configuration: every field defaults to the
//! values of the handheld device the format was made for. A TOML file may
//! override any of them. The file is looked up in this order:
//!
//! 1. a path given explicitly (the `--config` flag),
//! 2. the `$QUAFF_CONFIG` environment variable,
//! 3. none, in which case the defaults are used.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quaff_raster::Presentation;
use quaff_render::TraversalLimits;
use quaff_source::{DEFAULT_CAPACITY, DEFAULT_EXTENSIONS};
use quaff_view::{QuadPoint, ScreenSize, ViewState, ZoomLimits};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "QUAFF_CONFIG";

/// Largest `traversal.max_depth` accepted.
pub const MAX_TRAVERSAL_DEPTH: usize = 64;

/// Failure to read or accept a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for [`ViewerConfig`].
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Complete viewer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ViewerConfig {
    /// Screen geometry and presentation.
    pub display: DisplayConfig,
    /// Initial view.
    pub view: ViewConfig,
    /// Image loading.
    pub image: ImageConfig,
    /// Render pass bounds.
    pub traversal: TraversalConfig,
}

/// `[display]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DisplayConfig {
    /// Screen width in pixels.
    pub width: u16,
    /// Screen height in pixels.
    pub height: u16,
    /// Single or double buffered presentation.
    pub presentation: PresentationMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 208,
            presentation: PresentationMode::Double,
        }
    }
}

/// Presentation as spelled in the config file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// See [`Presentation::Single`].
    Single,
    /// See [`Presentation::Double`].
    #[default]
    Double,
}

impl From<PresentationMode> for Presentation {
    fn from(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::Single => Self::Single,
            PresentationMode::Double => Self::Double,
        }
    }
}

/// `[view]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ViewConfig {
    /// Initial center in quad space, as `[x, y]`.
    pub center: [i32; 2],
    /// Initial zoom, a power of two in `[1, 64]`.
    pub zoom: u32,
    /// Return to the initial center and zoom whenever a new image is loaded.
    pub reset_on_load: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: [256, 256],
            zoom: 1,
            reset_on_load: true,
        }
    }
}

/// `[image]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ImageConfig {
    /// Largest image accepted, in bytes.
    pub capacity: usize,
    /// Directory to browse when no path is given on the command line.
    pub directory: Option<PathBuf>,
    /// File extensions listed when browsing a directory.
    pub extensions: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            directory: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
        }
    }
}

/// `[traversal]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct TraversalConfig {
    /// Ancestor stack depth. The work queue holds four times as many items.
    pub max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: TraversalLimits::DEFAULT_MAX_DEPTH,
        }
    }
}

impl ViewerConfig {
    /// Loads the configuration following the lookup order in the module docs.
    ///
    /// An explicit path must exist. A path from the environment that does
    /// not exist falls back to the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            info!("loading config from {}", path.display());
            return Self::read(path);
        }
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads a configuration file, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("no config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        info!("loading config from {}", path.display());
        Self::read(path)
    }

    /// The configuration file named by `$QUAFF_CONFIG`, if set.
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV).map(PathBuf::from)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Checks that every value is in range.
    ///
    /// Call again after overriding fields by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Validation(format!(
                "display must be at least 1x1, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        let zoom = self.view.zoom;
        let limits = ZoomLimits::default();
        if zoom < limits.min() || zoom > limits.max() || !zoom.is_power_of_two() {
            return Err(ConfigError::Validation(format!(
                "view.zoom must be a power of two between {} and {}, got {zoom}",
                limits.min(),
                limits.max()
            )));
        }
        if self.image.capacity == 0 {
            return Err(ConfigError::Validation(
                "image.capacity must be greater than 0".to_owned(),
            ));
        }
        if self.image.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "image.extensions must name at least one extension".to_owned(),
            ));
        }
        let depth = self.traversal.max_depth;
        if depth == 0 || depth > MAX_TRAVERSAL_DEPTH {
            return Err(ConfigError::Validation(format!(
                "traversal.max_depth must be between 1 and {MAX_TRAVERSAL_DEPTH}, got {depth}"
            )));
        }
        Ok(())
    }

    /// Screen size.
    pub fn screen(&self) -> ScreenSize {
        ScreenSize::new(self.display.width, self.display.height)
    }

    /// The view an image opens with.
    pub fn initial_view(&self) -> ViewState {
        let [x, y] = self.view.center;
        ViewState::new(self.screen(), QuadPoint::new(x, y), self.view.zoom)
    }

    /// Render pass bounds.
    pub fn limits(&self) -> TraversalLimits {
        TraversalLimits::new(self.traversal.max_depth)
    }

    /// Framebuffer presentation.
    pub fn presentation(&self) -> Presentation {
        self.display.presentation.into()
    }
}
