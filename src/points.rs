//! The editable point set.
//!
//! [`PointSet`] is an ordered collection of [`Point`]s. Order carries no
//! meaning for fitting; it only keeps iteration and removal-by-index stable.
use crate::{
    error::{Error, Result},
    value::{CoordExt, Point, Value},
};

/// Ordered, exclusively owned collection of data points.
///
/// Duplicate coordinates are legal, and coordinates are never validated.
///
/// # Example
/// ```
/// # use fitview::{PointSet, value::Point};
/// let mut points = PointSet::new();
/// points.add(Point::new(1.0, 2.0));
/// points.add(Point::new(3.0, 4.0));
///
/// assert_eq!(points.size(), 2);
/// assert!(points.remove_at(5).is_err());
/// assert_eq!(points.size(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet<T: Value = f64> {
    points: Vec<Point<T>>,
}

impl<T: Value> PointSet<T> {
    /// Creates an empty point set
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a point set from existing points, keeping their order
    pub fn from_points(points: impl Into<Vec<Point<T>>>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Appends a point. Always succeeds.
    pub fn add(&mut self, point: Point<T>) {
        self.points.push(point);
    }

    /// Removes the point at `index`, returning it.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a current index.
    /// The set is left untouched in that case.
    pub fn remove_at(&mut self, index: usize) -> Result<Point<T>> {
        if index >= self.points.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }

        Ok(self.points.remove(index))
    }

    /// Number of points in the set
    #[must_use]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// True if the set holds no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point at `index`, if any
    #[must_use]
    pub fn at(&self, index: usize) -> Option<Point<T>> {
        self.points.get(index).copied()
    }

    /// Returns the most recently added point, if any
    #[must_use]
    pub fn last(&self) -> Option<Point<T>> {
        self.points.last().copied()
    }

    /// Iterates over the points in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Point<T>> {
        self.points.iter()
    }

    /// Borrow the points as a slice for fitting
    #[must_use]
    pub fn as_slice(&self) -> &[Point<T>] {
        &self.points
    }

    /// Removes every point
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<T: Value> FromIterator<Point<T>> for PointSet<T> {
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<T: Value> FromIterator<(T, T)> for PointSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        iter.into_iter().map(Point::from).collect()
    }
}

impl<'a, T: Value> IntoIterator for &'a PointSet<T> {
    type Item = &'a Point<T>;
    type IntoIter = std::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T: Value> AsRef<[Point<T>]> for PointSet<T> {
    fn as_ref(&self) -> &[Point<T>] {
        &self.points
    }
}

impl<T: Value> CoordExt<T> for PointSet<T> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.points.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.points.iter().map(|p| p.y)
    }
}
