//! Errors raised by the wrapper itself
//!
//! Only failures this crate detects are represented here. Everything else the
//! native layer reports (bad enums, unsupported platform features, calls on
//! destroyed handles) goes to its global error callback and never reaches the
//! caller as a `Result`.

use crate::config::ConfigError;
use thiserror::Error;

/// Wrapper errors
#[derive(Error, Debug)]
pub enum FacadeError {
    /// The native library could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// A native creation call returned a null handle
    #[error("Failed to create the GLFW {0}")]
    CreationFailed(&'static str),

    /// Pixel data does not match the stated dimensions
    #[error("Invalid image: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    InvalidImage {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
        /// Byte count implied by the dimensions
        expected: usize,
        /// Byte count supplied
        actual: usize,
    },

    /// An image file could not be decoded
    #[error("Image load failed: {0}")]
    ImageLoad(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for wrapper operations
pub type FacadeResult<T> = Result<T, FacadeError>;
