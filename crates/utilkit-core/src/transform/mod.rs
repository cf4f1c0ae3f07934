//! Geometric bitmap transforms.
//!
//! Every operation returns a new bitmap and leaves its input untouched.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Rotation angles are in degrees, positive = clockwise
//! - Regions are in pixels with exclusive right/bottom edges
//!
//! # Operations
//!
//! - [`apply_matrix`]: resample through an arbitrary affine [`Matrix`]
//! - [`scale_to_fit`]: uniform cover scale toward a target size
//! - [`flip`]: mirror and/or scale by integer factors
//! - [`rotate`]: rotate onto a canvas large enough for the whole image
//! - [`crop`]: copy a rectangle
//! - [`create_circle_image`]: anti-aliased circular avatar

mod circle;
mod crop;
mod flip;
mod matrix;
mod rotation;
mod scale;

use thiserror::Error;

pub use circle::create_circle_image;
pub use crop::crop;
pub use flip::flip;
pub use matrix::{apply_matrix, mapped_dimensions, Matrix};
pub use rotation::{compute_rotated_bounds, rotate};
pub use scale::{cover_scale, scale_to_fit};

/// Error types for transform operations.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// An argument is outside the domain of the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The output canvas could not be allocated.
    #[error("Cannot allocate a {width}x{height} bitmap")]
    AllocationFailed { width: u32, height: u32 },
}
