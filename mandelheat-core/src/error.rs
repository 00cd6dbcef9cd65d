//! Data model error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("volume data has {actual} elements, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
