//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use pcd8544::{Builder, Dimensions, BuilderError};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions (rows must be a multiple of 8)
//! let result = Dimensions::new(84, 42);
//! assert!(result.is_err());
//! ```

use core::fmt::Debug;

/// Maximum column (X) address supported by the PCD8544 controller
///
/// The controller drives 84 segment outputs; X addresses run 0..=83.
pub const MAX_COLUMNS: u8 = 84;

/// Maximum pixel rows supported by the PCD8544 controller
///
/// The controller drives 48 commons, grouped into 6 row groups of 8 rows.
pub const MAX_ROWS: u8 = 48;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface and backlight error types so error handling
/// code can match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<IfaceErr, PwmErr> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the
    /// [`DisplayInterface`](crate::interface::DisplayInterface) implementation.
    Interface(IfaceErr),
    /// Backlight PWM error
    ///
    /// Wraps the error from the backlight pin's
    /// [`SetDutyCycle`](embedded_hal::pwm::SetDutyCycle) implementation.
    Backlight(PwmErr),
    /// Coordinates outside the addressable range
    ///
    /// Raised before any device I/O or buffer mutation takes place.
    /// Cursor positioning reports raw device coordinates; rendering
    /// operations report cell coordinates.
    OutOfBounds {
        /// Column (or column cell) requested
        column: u8,
        /// Row group (or row cell) requested
        row_group: u8,
    },
    /// Bitmap or frame buffer length does not match the display size
    ///
    /// Merge/erase content and the owned frame buffer must be exactly
    /// `dimensions.buffer_size()` bytes.
    BufferSizeMismatch {
        /// Required length in bytes
        expected: usize,
        /// Provided length in bytes
        provided: usize,
    },
    /// Character has no glyph in the font table
    ///
    /// The built-in font covers printable ASCII (0x20..=0x7F). Characters
    /// outside that range are rejected before anything is written.
    UnsupportedChar(char),
}

impl<IfaceErr: Debug, PwmErr: Debug> core::fmt::Display for Error<IfaceErr, PwmErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::Backlight(e) => write!(f, "Backlight error: {e:?}"),
            Self::OutOfBounds { column, row_group } => {
                write!(f, "Out of bounds: column={column}, row_group={row_group}")
            }
            Self::BufferSizeMismatch { expected, provided } => {
                write!(
                    f,
                    "Buffer size mismatch: expected {expected} bytes, provided {provided}"
                )
            }
            Self::UnsupportedChar(c) => write!(f, "No glyph for character {c:?}"),
        }
    }
}

impl<IfaceErr: Debug, PwmErr: Debug> core::error::Error for Error<IfaceErr, PwmErr> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of columns (width) requested
        cols: u8,
        /// Number of pixel rows (height) requested
        rows: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { cols, rows } => write!(
                f,
                "Invalid dimensions {cols}x{rows} (max {MAX_COLUMNS}x{MAX_ROWS}, rows must be multiple of 8)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
