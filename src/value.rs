//! Numeric types and point utilities.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types points can be stored in, and the [`Point`] type itself.
//!
//! Storage precision is up to the caller (`f32` or `f64`), but every sum the
//! fitter accumulates and every pixel the mapper computes goes through
//! [`Value::widen`] first, so lower storage precision never leaks into the
//! arithmetic.
//!
//! # Traits
//!
//! - [`Value`]: Extends `Float` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - `widen` / `narrow` for moving between storage precision and `f64`.
//! - [`CoordExt`]: x/y accessors and finite ranges over point slices.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step.
//!
//! # Example
//!
//! ```rust
//! use fitview::value::{Point, SteppedValues, Value};
//!
//! let p = Point::new(1.5f32, -2.0);
//! assert_eq!(p.x.widen(), 1.5);
//!
//! let xs: Vec<f64> = SteppedValues::new(0.0..=1.0, 0.25).collect();
//! assert_eq!(xs.len(), 5);
//! ```
use std::ops::{Range, RangeInclusive};

use crate::error::Error;

/// Numeric type for point coordinates and coefficients
pub trait Value:
    num_traits::Float
    + Default
    + std::fmt::Debug
    + std::fmt::Display
    + std::fmt::LowerExp
    + std::str::FromStr
    + Send
    + Sync
    + 'static
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts the value to `f64` for accumulation.
    ///
    /// Values that cannot be represented become NaN.
    #[must_use]
    fn widen(self) -> f64 {
        num_traits::cast(self).unwrap_or(f64::NAN)
    }

    /// Converts an `f64` back to storage precision.
    ///
    /// Values that cannot be represented become NaN.
    #[must_use]
    fn narrow(n: f64) -> Self {
        num_traits::cast(n).unwrap_or_else(Self::nan)
    }
}

impl<T> Value for T where
    T: num_traits::Float
        + Default
        + std::fmt::Debug
        + std::fmt::Display
        + std::fmt::LowerExp
        + std::str::FromStr
        + Send
        + Sync
        + 'static
{
}

/// A single data-space point.
///
/// No validation is performed on the coordinates: NaN and infinities are
/// legal and propagate through fitting.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point<T: Value = f64> {
    /// Horizontal data coordinate
    pub x: T,

    /// Vertical data coordinate
    pub y: T,
}

impl<T: Value> Point<T> {
    /// Creates a new point
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns both coordinates widened to `f64`
    #[must_use]
    pub fn widen(&self) -> (f64, f64) {
        (self.x.widen(), self.y.widen())
    }

    /// True if both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<T: Value> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Value> From<Point<T>> for (T, T) {
    fn from(p: Point<T>) -> Self {
        (p.x, p.y)
    }
}

/// Writes the point in the persisted `x,y` line format.
impl<T: Value> std::fmt::Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }

    /// Creates a new iterator over stepped values in a range with a step of 1.0
    pub fn new_unit(range: RangeInclusive<T>) -> Self {
        Self::new(range, T::one())
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= T::zero() || self.step.is_nan() {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index = self.index + T::one();
            Some(value)
        } else {
            None
        }
    }
}

/// Extension trait for accessing the `x` and `y` coordinates of a point collection.
///
/// # Examples
///
/// ```
/// # use fitview::value::{CoordExt, Point};
/// let data = vec![Point::new(1.5, -2.0), Point::new(2.0, 3.0), Point::new(0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// assert_eq!(data.x_range(), Some(0.0..2.0));
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the range spanned by the finite x-coordinates.
    ///
    /// `None` if there are no finite x-coordinates.
    fn x_range(&self) -> Option<Range<T>> {
        finite_range(self.x_iter())
    }

    /// Returns the range spanned by the finite y-coordinates.
    ///
    /// `None` if there are no finite y-coordinates.
    fn y_range(&self) -> Option<Range<T>> {
        finite_range(self.y_iter())
    }
}

impl<T: Value> CoordExt<T> for [Point<T>] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.y)
    }
}

impl<T: Value> CoordExt<T> for Vec<Point<T>> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.y)
    }
}

fn finite_range<T: Value>(values: impl Iterator<Item = T>) -> Option<Range<T>> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(T, T)>, v| {
            Some(match acc {
                Some((min, max)) => (min.min(v), max.max(v)),
                None => (v, v),
            })
        })
        .map(|(start, end)| start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = SteppedValues::new(0.0..=1.0, 0.1);
        let values: Vec<_> = range.collect();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_value_range_rejects_bad_step() {
        assert_eq!(SteppedValues::new(0.0..=1.0, 0.0).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, -1.0).count(), 0);
        assert_eq!(SteppedValues::new_unit(1.0..=3.0).count(), 3);
    }

    #[test]
    fn test_widen_narrow() {
        assert_eq!(1.25f32.widen(), 1.25f64);
        assert_eq!(f32::narrow(2.5), 2.5f32);
        assert!(f32::narrow(f64::NAN).is_nan());
        assert!(f64::NAN.widen().is_nan());
        assert_eq!(f32::try_cast(3usize).unwrap(), 3.0);
    }

    #[test]
    fn test_point_display_and_conversion() {
        let p = Point::from((1.0, 2.5));
        assert_eq!(p.to_string(), "1,2.5");
        let (x, y): (f64, f64) = p.into();
        assert_eq!((x, y), (1.0, 2.5));
        assert!(p.is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_ranges_skip_non_finite() {
        let data = vec![
            Point::new(f64::NAN, 1.0),
            Point::new(-3.0, f64::INFINITY),
            Point::new(4.0, -2.0),
        ];
        assert_eq!(data.x_range(), Some(-3.0..4.0));
        assert_eq!(data.y_range(), Some(-2.0..1.0));

        let empty: Vec<Point<f64>> = Vec::new();
        assert_eq!(empty.x_range(), None);
        assert_eq!(empty.as_slice().y_range(), None);
    }
}
