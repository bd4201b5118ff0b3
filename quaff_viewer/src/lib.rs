// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quaff Viewer: the shell around the Quaff render engine.
//!
//! The viewer loads an image (or a directory of them), renders it into
//! one-bit framebuffers, and applies [`Control`]s between passes. It is
//! headless: the `quaff` binary exports the visible frame as a PBM file.
//!
//! ```no_run
//! use std::path::Path;
//! use quaff_viewer::{Control, Viewer, ViewerConfig};
//!
//! let config = ViewerConfig::load(None)?;
//! let mut viewer = Viewer::open(Path::new("maps/"), config)?;
//! viewer.render();
//! if viewer.apply(Control::ZoomOut)? {
//!     viewer.render();
//! }
//! std::fs::write("frame.pbm", viewer.frame().to_pbm())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod input;
mod viewer;

pub use config::{
    CONFIG_ENV, ConfigError, DisplayConfig, ImageConfig, MAX_TRAVERSAL_DEPTH, PresentationMode,
    TraversalConfig, ViewConfig, ViewerConfig,
};
pub use error::ViewerError;
pub use input::{Control, PanDrag, ParseControlError, parse_point};
pub use viewer::Viewer;
