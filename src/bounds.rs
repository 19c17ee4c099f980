//! Padded data-space extents of a point set.
//!
//! [`Bounds`] is derived state: it is recomputed from the points whenever
//! they change and cannot be set independently. After padding, the
//! rectangle always has positive width and height, even for an empty or
//! single-point set.
use std::ops::RangeInclusive;

use crate::value::{CoordExt, Point, Value};

/// Additive margin applied to every side of the raw extrema
pub const DEFAULT_PADDING: f64 = 1.0;

/// Range used along an axis that has no finite coordinates
pub const DEFAULT_RANGE: RangeInclusive<f64> = -1.0..=1.0;

/// Axis-aligned data-space rectangle enclosing a point set.
///
/// Invariant: `min_x < max_x` and `min_y < max_y`.
///
/// # Example
/// ```
/// # use fitview::{bounds::Bounds, value::Point};
/// let bounds = Bounds::from_points(&[Point::new(1.0, 2.0), Point::new(3.0, 5.0)]);
/// assert_eq!((bounds.min_x(), bounds.max_x()), (0.0, 4.0));
/// assert_eq!((bounds.min_y(), bounds.max_y()), (1.0, 6.0));
///
/// let empty = Bounds::<f64>::from_points(&[]);
/// assert_eq!((empty.min_x(), empty.max_x()), (-1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T: Value = f64> {
    min_x: T,
    max_x: T,
    min_y: T,
    max_y: T,
}

impl<T: Value> Default for Bounds<T> {
    fn default() -> Self {
        let (lo, hi) = (T::narrow(*DEFAULT_RANGE.start()), T::narrow(*DEFAULT_RANGE.end()));
        Self {
            min_x: lo,
            max_x: hi,
            min_y: lo,
            max_y: hi,
        }
    }
}

impl<T: Value> Bounds<T> {
    /// Recomputes the bounds of `points` with [`DEFAULT_PADDING`]
    pub fn from_points(points: &[Point<T>]) -> Self {
        Self::with_padding(points, DEFAULT_PADDING)
    }

    /// Recomputes the bounds of `points` with a custom padding.
    ///
    /// Non-finite coordinates are skipped by the extrema scan. An axis with no
    /// finite coordinates falls back to [`DEFAULT_RANGE`] without padding.
    /// A padding that is not a positive finite number is replaced with
    /// [`DEFAULT_PADDING`].
    pub fn with_padding(points: &[Point<T>], padding: f64) -> Self {
        let padding = if padding.is_finite() && padding > 0.0 {
            padding
        } else {
            DEFAULT_PADDING
        };

        let pad = |range: Option<std::ops::Range<T>>| match range {
            Some(r) => {
                let lo = T::narrow(r.start.widen() - padding);
                let hi = T::narrow(r.end.widen() + padding);
                separate(lo, hi)
            }
            None => (T::narrow(*DEFAULT_RANGE.start()), T::narrow(*DEFAULT_RANGE.end())),
        };

        let (min_x, max_x) = pad(points.x_range());
        let (min_y, max_y) = pad(points.y_range());
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Left edge
    pub fn min_x(&self) -> T {
        self.min_x
    }

    /// Right edge
    pub fn max_x(&self) -> T {
        self.max_x
    }

    /// Bottom edge
    pub fn min_y(&self) -> T {
        self.min_y
    }

    /// Top edge
    pub fn max_y(&self) -> T {
        self.max_y
    }

    /// Horizontal extent, always positive
    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    /// Vertical extent, always positive
    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }

    /// True if the point lies inside the rectangle, edges included
    pub fn contains(&self, point: &Point<T>) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Evenly spaced x values across `[min_x, max_x]`, both ends included.
    ///
    /// Yields `segments + 1` values; zero segments yields only `min_x`.
    #[allow(clippy::cast_precision_loss)]
    pub fn x_samples(&self, segments: usize) -> impl Iterator<Item = T> {
        let (start, end) = (self.min_x.widen(), self.max_x.widen());
        let step = if segments == 0 {
            0.0
        } else {
            (end - start) / segments as f64
        };

        (0..=segments).map(move |i| {
            if i == segments && segments > 0 {
                T::narrow(end)
            } else {
                T::narrow(start + step * i as f64)
            }
        })
    }
}

/// Steps `lo` and `hi` apart when the padding was lost to rounding.
///
/// At large magnitudes `v - padding` and `v + padding` round back to `v`, so
/// the step is scaled to the spacing of representable values near the range.
fn separate<T: Value>(lo: T, hi: T) -> (T, T) {
    if lo < hi {
        return (lo, hi);
    }

    let step = lo.abs().max(hi.abs()) * T::epsilon() * T::narrow(RELATIVE_SPREAD);
    let lo = (lo - step).max(T::min_value());
    let hi = (hi + step).min(T::max_value());
    (lo, hi)
}

/// Multiple of the relative machine epsilon used by [`separate`]
const RELATIVE_SPREAD: f64 = 4.0;
