// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

/// File extensions the converter writes.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["wrhi", "wri"];

/// Failure to list a catalog directory.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Listing the directory failed.
    #[error("cannot read image directory: {0}")]
    Io(#[from] io::Error),

    /// The directory holds no images with a known extension.
    #[error("no images found in {}", dir.display())]
    Empty {
        /// Directory that was scanned.
        dir: PathBuf,
    },
}

/// The images in one directory, with a cursor that wraps around.
///
/// Entries are sorted by file name so the order is stable between runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCatalog {
    dir: PathBuf,
    entries: Vec<PathBuf>,
    current: usize,
}

impl ImageCatalog {
    /// Lists the files in `dir` whose extension is one of `extensions`.
    ///
    /// Extensions are matched without a leading dot and ignoring ASCII case.
    pub fn scan<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            // Follows symlinks, so linked images are listed too.
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    continue;
                }
            }
            let known = path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|want| want.as_ref().eq_ignore_ascii_case(ext))
            });
            if known {
                entries.push(path);
            } else {
                debug!("skipping {}", path.display());
            }
        }
        if entries.is_empty() {
            return Err(CatalogError::Empty {
                dir: dir.to_path_buf(),
            });
        }
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        info!("found {} images in {}", entries.len(), dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            current: 0,
        })
    }

    /// Directory that was scanned.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All images, in catalog order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Number of images. A catalog is never empty.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; see [`ImageCatalog::scan`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current image.
    pub fn position(&self) -> usize {
        self.current
    }

    /// The current image.
    pub fn current(&self) -> &Path {
        &self.entries[self.current]
    }

    /// The image [`ImageCatalog::advance`] would move to, without moving.
    pub fn peek_next(&self) -> &Path {
        &self.entries[self.next_position()]
    }

    /// Moves to the next image, wrapping to the first after the last.
    pub fn advance(&mut self) -> &Path {
        self.current = self.next_position();
        info!(
            "image {}/{}: {}",
            self.current + 1,
            self.entries.len(),
            self.entries[self.current].display()
        );
        &self.entries[self.current]
    }

    fn next_position(&self) -> usize {
        (self.current + 1) % self.entries.len()
    }
}
