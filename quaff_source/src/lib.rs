// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quaff Source: getting QUAD Fractal Format images into memory.
//!
//! Images are read whole, up to a fixed capacity, before any render pass
//! runs. A source that would overflow the buffer is rejected outright rather
//! than truncated. [`ImageCatalog`] lists the images in a directory and steps
//! through them, wrapping at the end.
//!
//! ```rust
//! use quaff_source::{LoadError, load_image};
//!
//! let bytes: &[u8] = b"#!quafit\n#v0000\n\x01\x10\x00\x00\x00\x00\x00\x00";
//! let image = load_image(bytes, 1024)?;
//! assert_eq!(image.block_count(), 3);
//!
//! assert!(matches!(
//!     load_image(bytes, 8),
//!     Err(LoadError::CapacityExceeded { capacity: 8 })
//! ));
//! # Ok::<(), LoadError>(())
//! ```

mod catalog;
mod load;

pub use catalog::{CatalogError, DEFAULT_EXTENSIONS, ImageCatalog};
pub use load::{DEFAULT_CAPACITY, LoadError, load_image, load_path};
