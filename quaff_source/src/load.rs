// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::{info, warn};
use quaff_format::ImageBuffer;
use thiserror::Error;

/// Largest image the device could hold in memory, in bytes.
pub const DEFAULT_CAPACITY: usize = 2_000_000;

/// Failure to bring an image into memory.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source holds more bytes than the buffer may.
    #[error("image is larger than the {capacity} byte buffer")]
    CapacityExceeded {
        /// Configured buffer capacity.
        capacity: usize,
    },

    /// Reading the source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads `reader` to the end into an image buffer of at most `capacity` bytes.
///
/// Short reads are continued and interrupted reads retried until end of
/// input. A source longer than `capacity` is an error: no truncated image is
/// ever returned.
pub fn load_image<R: Read>(reader: R, capacity: usize) -> Result<ImageBuffer, LoadError> {
    // One byte past the limit is enough to tell "exactly full" from "too big".
    let limit = u64::try_from(capacity).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    reader.take(limit).read_to_end(&mut bytes)?;
    if bytes.len() > capacity {
        return Err(LoadError::CapacityExceeded { capacity });
    }
    Ok(ImageBuffer::new(bytes))
}

/// Opens and loads the image file at `path`.
pub fn load_path(path: &Path, capacity: usize) -> Result<ImageBuffer, LoadError> {
    let file = File::open(path)?;
    let image = load_image(file, capacity)?;
    match image.signature() {
        Some(version) => info!(
            "loaded {} ({} bytes, format {version})",
            path.display(),
            image.len()
        ),
        None => warn!(
            "loaded {} ({} bytes) without a quafit signature",
            path.display(),
            image.len()
        ),
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields at most `chunk` bytes per call and interrupts every other call.
    struct Stutter<'a> {
        data: &'a [u8],
        chunk: usize,
        interrupt: bool,
    }

    impl Read for Stutter<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn short_and_interrupted_reads_are_continued() {
        let data: Vec<u8> = (0..=255).collect();
        let reader = Stutter {
            data: &data,
            chunk: 7,
            interrupt: false,
        };
        let image = load_image(reader, 1024).unwrap();
        assert_eq!(image.as_bytes(), &data[..]);
    }

    #[test]
    fn exactly_full_is_accepted() {
        let image = load_image(&[1_u8; 16][..], 16).unwrap();
        assert_eq!(image.len(), 16);
    }

    #[test]
    fn one_byte_over_is_rejected() {
        let err = load_image(&[1_u8; 17][..], 16).unwrap_err();
        assert!(matches!(err, LoadError::CapacityExceeded { capacity: 16 }));
    }

    #[test]
    fn read_errors_surface() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device unplugged"))
            }
        }
        let err = load_image(Broken, 16).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert_eq!(err.to_string(), "device unplugged");
    }
}
