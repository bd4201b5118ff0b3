// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};

use kurbo::Point;
use log::{debug, info};

use quaff_format::ImageBuffer;
use quaff_raster::{Bitmap, FrameBuffers};
use quaff_render::{RenderReport, Renderer};
use quaff_source::{ImageCatalog, load_path};
use quaff_view::ViewState;

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::input::{Control, PanDrag};

/// The load, render and present loop.
///
/// A viewer owns one image, the view onto it, and the framebuffers. Controls
/// are applied strictly between passes and every pass runs to completion
/// before the next control is looked at.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    view: ViewState,
    renderer: Renderer,
    frames: FrameBuffers,
    catalog: Option<ImageCatalog>,
    source: Option<PathBuf>,
    image: ImageBuffer,
    drag: PanDrag,
}

impl Viewer {
    /// Creates a viewer showing an image that is already in memory.
    pub fn new(image: ImageBuffer, config: ViewerConfig) -> Self {
        Self {
            view: config.initial_view(),
            renderer: Renderer::new().with_limits(config.limits()),
            frames: FrameBuffers::new(config.screen(), config.presentation()),
            catalog: None,
            source: None,
            image,
            config,
            drag: PanDrag::default(),
        }
    }

    /// Opens an image file, or a directory as a catalog showing its first image.
    pub fn open(path: &Path, config: ViewerConfig) -> Result<Self, ViewerError> {
        let (catalog, first) = if path.is_dir() {
            let catalog = ImageCatalog::scan(path, config.image.extensions.as_slice())?;
            let first = catalog.current().to_path_buf();
            (Some(catalog), first)
        } else {
            (None, path.to_path_buf())
        };
        let image = load_path(&first, config.image.capacity)?;
        let mut viewer = Self::new(image, config);
        viewer.catalog = catalog;
        viewer.source = Some(first);
        Ok(viewer)
    }

    /// Active configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Current view.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Image being shown.
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// File the image was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The catalog being browsed, if a directory was opened.
    pub fn catalog(&self) -> Option<&ImageCatalog> {
        self.catalog.as_ref()
    }

    /// The last presented frame.
    pub fn frame(&self) -> &Bitmap {
        self.frames.front()
    }

    /// Applies one control. Returns `true` if a new pass is needed.
    pub fn apply(&mut self, control: Control) -> Result<bool, ViewerError> {
        let changed = match control {
            Control::Next => {
                self.next_image()?;
                true
            }
            _ => control.apply_to(&mut self.view),
        };
        debug!("{control}: changed={changed}");
        Ok(changed)
    }

    /// Starts a pointer drag at `pos`, in screen pixels.
    pub fn begin_drag(&mut self, pos: Point) {
        self.drag.start(pos);
    }

    /// Moves an active drag to `pos`, panning the view so the image follows
    /// the pointer. Returns `true` if a new pass is needed.
    pub fn drag_to(&mut self, pos: Point) -> Result<bool, ViewerError> {
        match self.drag.update(pos) {
            Some(control) => self.apply(control),
            None => Ok(false),
        }
    }

    /// Ends the active drag.
    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    /// Loads the next image of the catalog, wrapping after the last.
    ///
    /// If the next image fails to load, nothing changes: the current image,
    /// its source and the catalog position all stay as they were.
    pub fn next_image(&mut self) -> Result<(), ViewerError> {
        let catalog = self.catalog.as_ref().ok_or(ViewerError::NoCatalog)?;
        let path = catalog.peek_next().to_path_buf();
        let image = load_path(&path, self.config.image.capacity)?;
        if let Some(catalog) = self.catalog.as_mut() {
            catalog.advance();
        }
        self.replace_image(image);
        self.source = Some(path);
        Ok(())
    }

    /// Swaps in a new image, resetting the view if configured to.
    pub fn replace_image(&mut self, image: ImageBuffer) {
        self.image = image;
        if self.config.view.reset_on_load {
            self.view = self.config.initial_view();
        }
    }

    /// Runs one render pass and presents the frame.
    pub fn render(&mut self) -> RenderReport {
        self.frames.begin_frame();
        let report = self
            .renderer
            .render(&self.image, &self.view, &mut self.frames);
        self.frames.present();
        if !report.is_clean() {
            info!(
                "frame {} abandoned {} corrupt subtrees",
                self.frames.presented(),
                report.abandoned.len()
            );
        }
        report
    }
}
