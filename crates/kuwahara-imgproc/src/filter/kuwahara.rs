use kuwahara_image::{Image, ImageError};

use crate::{
    error::FilterError,
    integral::{IntegralImage, RegionStats},
    parallel::{self, ExecutionStrategy},
};

use super::Window;

/// Side length of the square neighborhood used by the filter.
///
/// Always an odd integer between [`NeighborhoodSize::MIN`] and
/// [`NeighborhoodSize::MAX`].
///
/// # Example
///
/// ```
/// use kuwahara_imgproc::filter::NeighborhoodSize;
///
/// let size = NeighborhoodSize::new(7).unwrap();
/// assert_eq!(size.get(), 7);
/// assert_eq!(size.half(), 3);
///
/// assert!(NeighborhoodSize::new(8).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborhoodSize(usize);

impl NeighborhoodSize {
    /// Smallest supported neighborhood.
    pub const MIN: usize = 3;
    /// Largest supported neighborhood.
    pub const MAX: usize = 15;

    /// Validate a neighborhood size.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidNeighborhoodSize`] if `size` is even or outside
    /// `MIN..=MAX`.
    pub fn new(size: usize) -> Result<Self, FilterError> {
        if !(Self::MIN..=Self::MAX).contains(&size) || size % 2 == 0 {
            return Err(FilterError::InvalidNeighborhoodSize(size));
        }
        Ok(Self(size))
    }

    /// The side length.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Half the side length, rounded down.
    pub fn half(&self) -> usize {
        self.0 / 2
    }
}

impl TryFrom<usize> for NeighborhoodSize {
    type Error = FilterError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

/// The winning window for a pixel and its statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// The most homogeneous window.
    pub window: Window,
    /// Statistics of that window.
    pub stats: RegionStats,
}

/// Pick the window with the lowest variance around `(y, x)`.
///
/// Windows are scanned in [`Window::ALL`] order and a later window only wins if
/// its variance is strictly lower, so ties keep the lower selection index.
///
/// # Arguments
///
/// * `integral` - The integral tables of the source image.
/// * `y` - The row of the pixel.
/// * `x` - The column of the pixel.
/// * `neighborhood` - The neighborhood size.
///
/// # Errors
///
/// Fails if `(y, x)` is outside the image the tables were built from.
pub fn select_window(
    integral: &IntegralImage,
    y: usize,
    x: usize,
    neighborhood: NeighborhoodSize,
) -> Result<Selection, FilterError> {
    let size = integral.size();
    let half = neighborhood.half();

    if y >= size.height || x >= size.width {
        return Err(ImageError::PixelIndexOutOfBounds(x, y, size.width, size.height).into());
    }

    let mut best = Selection {
        window: Window::Full,
        stats: integral.region_stats(&Window::Full.rect(y, x, half, size))?,
    };

    for window in &Window::ALL[1..] {
        let stats = integral.region_stats(&window.rect(y, x, half, size))?;
        if stats.variance < best.stats.variance {
            best = Selection {
                window: *window,
                stats,
            };
        }
    }

    Ok(best)
}

/// Apply the Kuwahara-style edge-preserving filter to a grayscale image.
///
/// Runs with the default [`ExecutionStrategy`]. See [`kuwahara_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `neighborhood` - The neighborhood size.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use kuwahara_image::Image;
/// use kuwahara_imgproc::filter::{kuwahara, NeighborhoodSize};
///
/// let src = Image::<u8, 1>::from_size_val([8, 6].into(), 42).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// kuwahara(&src, &mut dst, NeighborhoodSize::new(5).unwrap()).unwrap();
///
/// assert!(dst.as_slice().iter().all(|&v| v == 42));
/// ```
pub fn kuwahara(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    neighborhood: NeighborhoodSize,
) -> Result<(), FilterError> {
    kuwahara_with_strategy(src, dst, neighborhood, ExecutionStrategy::default())
}

/// Apply the Kuwahara-style edge-preserving filter with an explicit execution strategy.
///
/// For every pixel the four candidate windows of [`Window::ALL`] are evaluated
/// on the integral tables of `src`, the one with the lowest variance is kept
/// and its [`Window::source_pixel`] is copied into `dst`. Every pixel of `dst`
/// is written exactly once and the output does not depend on the strategy.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `neighborhood` - The neighborhood size.
/// * `strategy` - How to spread the rows across threads.
pub fn kuwahara_with_strategy(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    neighborhood: NeighborhoodSize,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        )
        .into());
    }

    if src.width() == 0 || src.height() == 0 {
        return Ok(());
    }

    let start = std::time::Instant::now();

    // the tables must be complete before any output row is written
    let integral = IntegralImage::new(src)?;
    log::debug!(
        "built integral tables for {} in {:?}",
        src.size(),
        start.elapsed()
    );

    let half = neighborhood.half();
    let cols = src.cols();
    let src_data = src.as_slice();

    parallel::execute_rows(strategy, dst.as_slice_mut(), cols, |y, dst_row| {
        for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
            let selection = select_window(&integral, y, x, neighborhood)?;
            let (sy, sx) = selection.window.source_pixel(y, x, half);
            *dst_pixel = src_data[sy * cols + sx];
        }
        Ok::<(), FilterError>(())
    })?;

    log::debug!(
        "kuwahara filter (n = {}, {:?}) on {} took {:?}",
        neighborhood.get(),
        strategy,
        src.size(),
        start.elapsed()
    );

    Ok(())
}
