//! Persistent storage for finished volumes.
//!
//! The on-disk format is the raw voxel bytes with no header, so a file is
//! only valid for the grid dimensions it was written with. Loading checks
//! the length and nothing else.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CacheError;
use mandelheat_core::{ByteVolume, GridDims};

/// Storage backend for a computed [`ByteVolume`].
pub trait VolumeCache {
    /// Load a volume of `dims`. Any error means the cache is unusable and
    /// the volume has to be computed.
    fn load(&self, dims: GridDims) -> Result<ByteVolume, CacheError>;

    fn store(&self, volume: &ByteVolume) -> Result<(), CacheError>;
}

/// Flat binary dump of the voxel bytes at a fixed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl VolumeCache for FileCache {
    fn load(&self, dims: GridDims) -> Result<ByteVolume, CacheError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let actual = bytes.len() as u64;
        ByteVolume::from_bytes(dims, bytes).map_err(|_| CacheError::SizeMismatch {
            path: self.path.clone(),
            expected: dims.voxel_count() as u64,
            actual,
        })
    }

    fn store(&self, volume: &ByteVolume) -> Result<(), CacheError> {
        fs::write(&self.path, volume.as_bytes()).map_err(|e| self.io_error(e))?;
        log::info!(
            "Wrote {} bytes to {}",
            volume.as_bytes().len(),
            self.path.display()
        );
        Ok(())
    }
}
