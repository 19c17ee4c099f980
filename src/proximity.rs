//! Nearest-point lookup in viewport space.
//!
//! Used to resolve a click into the point it should remove. Distances are
//! measured in pixels after mapping, so the hit radius is the same however
//! the data is scaled.
use crate::{
    mapper::{CoordinateMapper, ScreenPoint},
    value::{Point, Value},
};

/// Clicks farther than this many pixels from every point remove nothing
pub const DEFAULT_REMOVAL_THRESHOLD: f64 = 10.0;

/// Finds the point nearest to `query` in viewport space.
///
/// Returns the index of the closest point if its distance is strictly less
/// than `threshold` pixels, and `None` otherwise. When several points are
/// exactly equally close, the first in slice order wins. Points whose
/// distance is NaN never match.
///
/// # Example
/// ```
/// # use fitview::{bounds::Bounds, mapper::*, proximity::find_nearest, value::Point};
/// let points = [Point::new(1.0, 1.0), Point::new(5.0, 4.5)];
/// let mapper = CoordinateMapper::new(&Bounds::from_points(&points), Viewport::default(), Margins::default());
///
/// let click = mapper.to_viewport(points[1]).offset(3.0, -4.0);
/// assert_eq!(find_nearest(click, &points, &mapper, 10.0), Some(1));
/// assert_eq!(find_nearest(click, &points, &mapper, 4.0), None);
/// ```
pub fn find_nearest<T: Value>(
    query: ScreenPoint,
    points: &[Point<T>],
    mapper: &CoordinateMapper,
    threshold: f64,
) -> Option<usize> {
    let mut nearest: Option<(usize, f64)> = None;
    for (index, point) in points.iter().enumerate() {
        let distance = mapper.to_viewport(*point).distance(&query);
        if distance.is_nan() {
            continue;
        }

        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }

    nearest
        .filter(|&(_, distance)| distance < threshold)
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::Bounds, mapper::Margins, mapper::Viewport};

    fn setup(points: &[Point]) -> CoordinateMapper {
        CoordinateMapper::new(&Bounds::from_points(points), Viewport::default(), Margins::default())
    }

    #[test]
    fn test_none_when_all_far() {
        let points = [Point::new(1.0, 1.0), Point::new(5.0, 4.5)];
        let mapper = setup(&points);
        let query = ScreenPoint::new(400.0, 20.0);
        assert_eq!(find_nearest(query, &points, &mapper, DEFAULT_REMOVAL_THRESHOLD), None);
    }

    #[test]
    fn test_single_hit() {
        let points = [Point::new(1.0, 1.0), Point::new(3.0, 2.0), Point::new(5.0, 4.5)];
        let mapper = setup(&points);
        let query = mapper.to_viewport(points[1]).offset(2.0, 2.0);
        assert_eq!(find_nearest(query, &points, &mapper, DEFAULT_REMOVAL_THRESHOLD), Some(1));
    }

    #[test]
    fn test_closer_of_two_wins() {
        let points = [Point::new(1.0, 1.0), Point::new(1.05, 1.0), Point::new(5.0, 4.5)];
        let mapper = setup(&points);
        let a = mapper.to_viewport(points[0]);
        let b = mapper.to_viewport(points[1]);
        assert!(a.distance(&b) < DEFAULT_REMOVAL_THRESHOLD);

        let near_b = b.offset(1.0, 0.0);
        assert_eq!(find_nearest(near_b, &points, &mapper, DEFAULT_REMOVAL_THRESHOLD), Some(1));
        let near_a = a.offset(-1.0, 0.0);
        assert_eq!(find_nearest(near_a, &points, &mapper, DEFAULT_REMOVAL_THRESHOLD), Some(0));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let points = [Point::new(2.0, 2.0), Point::new(4.0, 3.0), Point::new(2.0, 2.0)];
        let mapper = setup(&points);
        let query = mapper.to_viewport(points[0]);
        assert_eq!(find_nearest(query, &points, &mapper, DEFAULT_REMOVAL_THRESHOLD), Some(0));
    }

    #[test]
    fn test_threshold_is_strict() {
        // Spans of 4 data units keep every pixel coordinate exact
        let points = [Point::new(2.0, 2.0), Point::new(4.0, 4.0)];
        let mapper = setup(&points);
        let query = mapper.to_viewport(points[0]).offset(6.0, 8.0);
        assert_eq!(find_nearest(query, &points, &mapper, 10.0), None);
        assert_eq!(find_nearest(query, &points, &mapper, 10.5), Some(0));
    }

    #[test]
    fn test_nan_points_never_match() {
        let points = [Point::new(f64::NAN, 2.0), Point::new(4.0, 3.0)];
        let mapper = setup(&points);
        let query = mapper.to_viewport(Point::new(4.0, 3.0));
        assert_eq!(find_nearest(query, &points, &mapper, 10.0), Some(1));

        let far = ScreenPoint::new(0.0, 0.0);
        assert_eq!(find_nearest(far, &points[..1], &mapper, f64::INFINITY), None);
    }

    #[test]
    fn test_empty_set() {
        let mapper = setup(&[]);
        assert_eq!(find_nearest::<f64>(ScreenPoint::default(), &[], &mapper, 10.0), None);
    }
}
