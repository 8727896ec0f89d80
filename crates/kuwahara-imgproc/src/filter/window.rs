use kuwahara_image::ImageSize;

use crate::integral::Rect;

/// One of the four candidate windows evaluated around a pixel.
///
/// The set is not a symmetric quadrant split: the reference window is the full
/// neighborhood and there is no upper-left half-window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Window {
    /// The full `(2·half + 1)²` square centered on the pixel (selection 0).
    Full,
    /// Rows `[y - half, y]`, columns `[x, x + half]` (selection 1).
    UpperRight,
    /// Rows `[y, y + half]`, columns `[x - half, x]` (selection 2).
    LowerLeft,
    /// Rows `[y, y + half]`, columns `[x, x + half]` (selection 3).
    LowerRight,
}

impl Window {
    /// All windows in selection order. Ties go to the earlier entry.
    pub const ALL: [Window; 4] = [
        Window::Full,
        Window::UpperRight,
        Window::LowerLeft,
        Window::LowerRight,
    ];

    /// The selection index of the window, 0 to 3.
    pub fn index(self) -> usize {
        match self {
            Window::Full => 0,
            Window::UpperRight => 1,
            Window::LowerLeft => 2,
            Window::LowerRight => 3,
        }
    }

    // (up, down, left, right): whether the window reaches `half` pixels that way
    fn reach(self) -> (bool, bool, bool, bool) {
        match self {
            Window::Full => (true, true, true, true),
            Window::UpperRight => (true, false, false, true),
            Window::LowerLeft => (false, true, true, false),
            Window::LowerRight => (false, true, false, true),
        }
    }

    /// Bounds of the window anchored at `(y, x)`, clipped to the image.
    ///
    /// PRECONDITION: `(y, x)` is inside an image of the given `size`.
    ///
    /// # Example
    ///
    /// ```
    /// use kuwahara_imgproc::filter::Window;
    /// use kuwahara_imgproc::integral::Rect;
    ///
    /// let rect = Window::UpperRight.rect(0, 3, 2, [5, 5].into());
    /// assert_eq!(rect, Rect { y0: 0, y1: 0, x0: 3, x1: 4 });
    /// ```
    pub fn rect(self, y: usize, x: usize, half: usize, size: ImageSize) -> Rect {
        let (up, down, left, right) = self.reach();
        let extent = |on: bool| if on { half } else { 0 };

        Rect {
            y0: y.saturating_sub(extent(up)),
            y1: (y + extent(down)).min(size.height.saturating_sub(1)),
            x0: x.saturating_sub(extent(left)),
            x1: (x + extent(right)).min(size.width.saturating_sub(1)),
        }
    }

    /// The `(y, x)` source pixel copied to the output when this window wins.
    ///
    /// The offsets are `(-half, -half)`, `(-half, 0)`, `(0, -half)` and `(0, 0)`
    /// for selections 0 to 3, clamped at the top and left borders. This is
    /// always the top-left corner of [`Window::rect`], so it is inside the image.
    pub fn source_pixel(self, y: usize, x: usize, half: usize) -> (usize, usize) {
        let (up, _, left, _) = self.reach();
        let extent = |on: bool| if on { half } else { 0 };

        (y.saturating_sub(extent(up)), x.saturating_sub(extent(left)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_order() {
        let indices = Window::ALL.map(Window::index);
        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn window_rects_interior() {
        let size = [9, 9].into();
        let (y, x, half) = (4, 4, 2);

        assert_eq!(
            Window::Full.rect(y, x, half, size),
            Rect {
                y0: 2,
                y1: 6,
                x0: 2,
                x1: 6
            }
        );
        assert_eq!(
            Window::UpperRight.rect(y, x, half, size),
            Rect {
                y0: 2,
                y1: 4,
                x0: 4,
                x1: 6
            }
        );
        assert_eq!(
            Window::LowerLeft.rect(y, x, half, size),
            Rect {
                y0: 4,
                y1: 6,
                x0: 2,
                x1: 4
            }
        );
        assert_eq!(
            Window::LowerRight.rect(y, x, half, size),
            Rect {
                y0: 4,
                y1: 6,
                x0: 4,
                x1: 6
            }
        );
    }

    #[test]
    fn window_rects_clipped() {
        let size = [4, 3].into();

        assert_eq!(
            Window::Full.rect(0, 0, 7, size),
            Rect {
                y0: 0,
                y1: 2,
                x0: 0,
                x1: 3
            }
        );
        assert_eq!(
            Window::LowerRight.rect(2, 3, 7, size),
            Rect {
                y0: 2,
                y1: 2,
                x0: 3,
                x1: 3
            }
        );
    }

    #[test]
    fn source_pixel_offsets() {
        let (y, x, half) = (5, 6, 2);
        assert_eq!(Window::Full.source_pixel(y, x, half), (3, 4));
        assert_eq!(Window::UpperRight.source_pixel(y, x, half), (3, 6));
        assert_eq!(Window::LowerLeft.source_pixel(y, x, half), (5, 4));
        assert_eq!(Window::LowerRight.source_pixel(y, x, half), (5, 6));
    }

    #[test]
    fn source_pixel_is_clipped_top_left() {
        let size: ImageSize = [6, 5].into();
        for half in 1..=7 {
            for y in 0..size.height {
                for x in 0..size.width {
                    for window in Window::ALL {
                        let rect = window.rect(y, x, half, size);
                        assert!(rect.area() > 0);
                        assert!(rect.y1 < size.height && rect.x1 < size.width);
                        assert_eq!(window.source_pixel(y, x, half), (rect.y0, rect.x0));
                    }
                }
            }
        }
    }
}
