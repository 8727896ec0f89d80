use kuwahara_image::ImageError;

use crate::{integral::Rect, parallel::ParallelError};

/// Errors raised while building integral tables or filtering an image.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The neighborhood size is not an odd integer in the supported range.
    #[error("neighborhood size must be an odd integer between 3 and 15, got {0}")]
    InvalidNeighborhoodSize(usize),

    /// The sum-of-squares table would not fit in a 64-bit accumulator.
    #[error("integral table overflow for an image of {0} pixels")]
    IntegralOverflow(usize),

    /// A window with no pixels was requested.
    #[error("empty window {0:?}")]
    EmptyWindow(Rect),

    /// A window extends past the image bounds.
    #[error("window {0:?} is out of bounds for image {1}x{2}")]
    WindowOutOfBounds(Rect, usize, usize),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
