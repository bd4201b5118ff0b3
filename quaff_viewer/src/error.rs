// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use quaff_source::{CatalogError, LoadError};

use crate::config::ConfigError;

/// Failure in the viewer shell.
///
/// Render passes never fail; only configuration and image loading do.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An image could not be loaded.
    #[error("cannot load image: {0}")]
    Load(#[from] LoadError),

    /// A directory could not be listed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Asked for the next image, but a single file was opened.
    #[error("no image catalog: open a directory to browse images")]
    NoCatalog,
}
