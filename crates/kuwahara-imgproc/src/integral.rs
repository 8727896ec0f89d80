// reference: https://en.wikipedia.org/wiki/Summed-area_table
use kuwahara_image::{Image, ImageSize};

use crate::error::FilterError;

/// An axis-aligned rectangle with inclusive bounds, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// First row.
    pub y0: usize,
    /// Last row (inclusive).
    pub y1: usize,
    /// First column.
    pub x0: usize,
    /// Last column (inclusive).
    pub x1: usize,
}

impl Rect {
    /// Number of rows covered, zero if the bounds are inverted.
    pub fn height(&self) -> usize {
        self.y1.checked_sub(self.y0).map_or(0, |d| d.saturating_add(1))
    }

    /// Number of columns covered, zero if the bounds are inverted.
    pub fn width(&self) -> usize {
        self.x1.checked_sub(self.x0).map_or(0, |d| d.saturating_add(1))
    }

    /// Number of pixels covered, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.height().saturating_mul(self.width())
    }
}

/// Mean and population variance of the intensities inside a [`Rect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStats {
    /// Number of pixels in the region.
    pub area: usize,
    /// Mean intensity.
    pub mean: f64,
    /// Population variance, `E[X²] - E[X]²`. Never negative.
    pub variance: f64,
}

/// Summed-area tables of a grayscale image and of its squared intensities.
///
/// Both tables have shape (H + 1, W + 1); row 0 and column 0 are zero so that
/// cell `(r + 1, c + 1)` holds the total over every pixel with row <= r and
/// column <= c.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    size: ImageSize,
    sum: Vec<u64>,
    sq_sum: Vec<u64>,
}

impl IntegralImage {
    /// Build the sum and sum-of-squares tables of `src` in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::IntegralOverflow`] if the squared table of an image
    /// this size could exceed `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use kuwahara_image::Image;
    /// use kuwahara_imgproc::integral::{IntegralImage, Rect};
    ///
    /// let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4]).unwrap();
    /// let integral = IntegralImage::new(&image).unwrap();
    ///
    /// let all = Rect { y0: 0, y1: 1, x0: 0, x1: 1 };
    /// assert_eq!(integral.sum(&all), Ok(10));
    /// assert_eq!(integral.sq_sum(&all), Ok(30));
    /// ```
    pub fn new(src: &Image<u8, 1>) -> Result<Self, FilterError> {
        let size = src.size();
        check_capacity(size.num_pixels())?;

        let stride = size.width + 1;
        let mut sum = vec![0u64; stride * (size.height + 1)];
        let mut sq_sum = vec![0u64; stride * (size.height + 1)];

        for (r, src_row) in src.as_slice().chunks_exact(size.width.max(1)).enumerate() {
            let above = r * stride;
            let here = (r + 1) * stride;
            for (c, &val) in src_row.iter().enumerate() {
                let val = val as u64;
                // own value + above + left - diagonal
                sum[here + c + 1] = val + sum[above + c + 1] + sum[here + c] - sum[above + c];
                sq_sum[here + c + 1] =
                    val * val + sq_sum[above + c + 1] + sq_sum[here + c] - sq_sum[above + c];
            }
        }

        Ok(Self { size, sum, sq_sum })
    }

    /// Size of the image the tables were built from.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Sum of the intensities inside `rect`.
    ///
    /// # Errors
    ///
    /// Same as [`IntegralImage::region_stats`].
    pub fn sum(&self, rect: &Rect) -> Result<u64, FilterError> {
        self.check_rect(rect)?;
        Ok(self.corner_lookup(&self.sum, rect))
    }

    /// Sum of the squared intensities inside `rect`.
    ///
    /// # Errors
    ///
    /// Same as [`IntegralImage::region_stats`].
    pub fn sq_sum(&self, rect: &Rect) -> Result<u64, FilterError> {
        self.check_rect(rect)?;
        Ok(self.corner_lookup(&self.sq_sum, rect))
    }

    /// Mean and variance of the intensities inside `rect` in O(1).
    ///
    /// The variance uses the integer form `(n·ΣX² - (ΣX)²) / n²`, which is exact
    /// and avoids the cancellation of `ΣX²/n - mean²` on flat bright regions.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyWindow`] for inverted bounds and
    /// [`FilterError::WindowOutOfBounds`] for a rectangle leaving the image.
    pub fn region_stats(&self, rect: &Rect) -> Result<RegionStats, FilterError> {
        self.check_rect(rect)?;

        let area = rect.area();
        let sum = self.corner_lookup(&self.sum, rect);
        let sq_sum = self.corner_lookup(&self.sq_sum, rect);

        // n·ΣX² >= (ΣX)² by Cauchy-Schwarz, so this never underflows
        let n = area as u128;
        let spread = n * sq_sum as u128 - (sum as u128) * (sum as u128);

        let area_f = area as f64;
        Ok(RegionStats {
            area,
            mean: sum as f64 / area_f,
            variance: spread as f64 / (area_f * area_f),
        })
    }

    // bounds first, so the area below is at most H·W
    fn check_rect(&self, rect: &Rect) -> Result<(), FilterError> {
        if rect.y1 >= self.size.height || rect.x1 >= self.size.width {
            return Err(FilterError::WindowOutOfBounds(
                *rect,
                self.size.width,
                self.size.height,
            ));
        }

        if rect.area() == 0 {
            return Err(FilterError::EmptyWindow(*rect));
        }

        Ok(())
    }

    fn corner_lookup(&self, table: &[u64], rect: &Rect) -> u64 {
        let stride = self.size.width + 1;
        let top = rect.y0 * stride;
        let bottom = (rect.y1 + 1) * stride;
        let (left, right) = (rect.x0, rect.x1 + 1);

        // region = br - tr - bl + tl, reordered to stay unsigned
        (table[bottom + right] + table[top + left]) - (table[top + right] + table[bottom + left])
    }
}

/// Fails if the squared table of `num_pixels` pixels could exceed `u64`.
fn check_capacity(num_pixels: usize) -> Result<(), FilterError> {
    // worst case is every pixel at 255
    (num_pixels as u64)
        .checked_mul(255 * 255)
        .map(|_| ())
        .ok_or(FilterError::IntegralOverflow(num_pixels))
}
