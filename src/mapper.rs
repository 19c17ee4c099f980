//! Affine mapping between data space and viewport pixels.
//!
//! A [`CoordinateMapper`] is a pure function of the current [`Bounds`], the
//! [`Viewport`] size, and the fixed [`Margins`] that reserve room for labels
//! and the caption band. It is rebuilt whenever one of those changes.
//!
//! The vertical axis is inverted: increasing data `y` maps to decreasing
//! screen `y`, since screen rows grow downwards.
//!
//! <div class="warning">
//!
//! **Technical Details**
//!
//! ```math
//! sx = left + (x - min_x) / (max_x - min_x) · plot_width
//! sy = height - bottom - (y - min_y) / (max_y - min_y) · plot_height
//! ```
//! where `plot_width = max(width - left - right, 1)` and
//! `plot_height = max(height - top - bottom, 1)`. The inverse solves the same
//! equations for `x` and `y`.
//! </div>
//!
//! # Example
//! ```
//! # use fitview::{bounds::Bounds, mapper::{CoordinateMapper, Margins, Viewport}, value::Point};
//! let bounds = Bounds::from_points(&[Point::new(1.0, 1.0), Point::new(5.0, 4.5)]);
//! let mapper = CoordinateMapper::new(&bounds, Viewport::new(800.0, 600.0), Margins::default());
//!
//! let screen = mapper.to_viewport(Point::new(3.0, 2.0));
//! let back: Point = mapper.to_data(screen);
//! assert!((back.x - 3.0).abs() < 1e-9 && (back.y - 2.0).abs() < 1e-9);
//! ```
use crate::{
    bounds::Bounds,
    value::{Point, Value},
};

/// Size of the rendering surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels
    pub width: f64,

    /// Height in pixels
    pub height: f64,
}

impl Viewport {
    /// Creates a new viewport size
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A position in viewport pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Pixels from the left edge
    pub x: f64,

    /// Pixels from the top edge
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a new screen point
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels
    #[must_use]
    pub fn distance(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point moved by `(dx, dy)` pixels
    #[must_use]
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Screen-space borders kept free of plotted data
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left border in pixels
    pub left: f64,

    /// Right border in pixels
    pub right: f64,

    /// Top border in pixels, including the caption band
    pub top: f64,

    /// Bottom border in pixels
    pub bottom: f64,
}

impl Default for Margins {
    /// 50 px on every side plus a 120 px caption band at the top.
    fn default() -> Self {
        Self {
            left: 50.0,
            right: 50.0,
            top: 170.0,
            bottom: 50.0,
        }
    }
}

/// The inner rectangle the data is mapped onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    /// Left edge in pixels
    pub left: f64,

    /// Top edge in pixels
    pub top: f64,

    /// Width in pixels, at least 1
    pub width: f64,

    /// Height in pixels, at least 1
    pub height: f64,
}

impl PlotArea {
    /// Right edge in pixels
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge in pixels
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True if the screen point lies inside the area, edges included
    #[must_use]
    pub fn contains(&self, p: ScreenPoint) -> bool {
        (self.left..=self.right()).contains(&p.x) && (self.top..=self.bottom()).contains(&p.y)
    }
}

/// One axis of the map: data `[min, min + span]` onto `extent` pixels from `origin`.
///
/// An inverted axis runs from `origin` towards smaller pixel values.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisMap {
    min: f64,
    span: f64,
    origin: f64,
    extent: f64,
    inverted: bool,
}

impl AxisMap {
    fn new(min: f64, max: f64, origin: f64, extent: f64, inverted: bool) -> Self {
        Self {
            min,
            span: max - min,
            origin,
            extent: extent.max(1.0),
            inverted,
        }
    }

    fn to_px(self, v: f64) -> f64 {
        let offset = (v - self.min) / self.span * self.extent;
        if self.inverted {
            self.origin - offset
        } else {
            self.origin + offset
        }
    }

    fn at_px(self, px: f64) -> f64 {
        let offset = if self.inverted {
            self.origin - px
        } else {
            px - self.origin
        };
        self.min + offset / self.extent * self.span
    }
}

/// Bidirectional data ↔ viewport transform.
///
/// `to_data(to_viewport(p)) ≈ p` and `to_viewport(to_data(q)) ≈ q`, up to
/// floating-point rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    x: AxisMap,
    y: AxisMap,
    viewport: Viewport,
    margins: Margins,
}

impl CoordinateMapper {
    /// Builds the map for the given bounds, viewport, and margins.
    ///
    /// Plot extents smaller than one pixel (tiny or zero-sized viewports)
    /// are clamped to one pixel so the map stays invertible.
    pub fn new<T: Value>(bounds: &Bounds<T>, viewport: Viewport, margins: Margins) -> Self {
        let x = AxisMap::new(
            bounds.min_x().widen(),
            bounds.max_x().widen(),
            margins.left,
            viewport.width - margins.left - margins.right,
            false,
        );
        let y = AxisMap::new(
            bounds.min_y().widen(),
            bounds.max_y().widen(),
            viewport.height - margins.bottom,
            viewport.height - margins.top - margins.bottom,
            true,
        );

        Self {
            x,
            y,
            viewport,
            margins,
        }
    }

    /// Maps a data-space point to viewport pixels
    pub fn to_viewport<T: Value>(&self, point: Point<T>) -> ScreenPoint {
        let (x, y) = point.widen();
        ScreenPoint::new(self.x.to_px(x), self.y.to_px(y))
    }

    /// Maps viewport pixels back to a data-space point
    pub fn to_data<T: Value>(&self, screen: ScreenPoint) -> Point<T> {
        Point::new(
            T::narrow(self.x.at_px(screen.x)),
            T::narrow(self.y.at_px(screen.y)),
        )
    }

    /// The viewport this map was built for
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The margins this map was built with
    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// The rectangle that `Bounds` maps onto
    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: self.x.origin,
            top: self.y.origin - self.y.extent,
            width: self.x.extent,
            height: self.y.extent,
        }
    }

    /// Axis lines and label anchors for `bounds` under this map
    pub fn axes<T: Value>(&self, bounds: &Bounds<T>) -> Axes {
        Axes::new(self, bounds)
    }
}

/// Offset of the `X` label from the right end of the x axis
pub const X_LABEL_OFFSET: (f64, f64) = (-20.0, 5.0);

/// Offset of the `Y` label from the top end of the y axis
pub const Y_LABEL_OFFSET: (f64, f64) = (5.0, 0.0);

/// Viewport geometry of the data axes.
///
/// The x axis is the line `y = 0` across `[min_x, max_x]`; the y axis is the
/// line `x = 0` across `[min_y, max_y]`. Either may fall outside the plot
/// area when the data does not straddle zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    /// Start and end of the x axis
    pub x_axis: (ScreenPoint, ScreenPoint),

    /// Start and end of the y axis
    pub y_axis: (ScreenPoint, ScreenPoint),

    /// Anchor for the `X` label
    pub x_label: ScreenPoint,

    /// Anchor for the `Y` label
    pub y_label: ScreenPoint,
}

impl Axes {
    /// Computes the axes of `bounds` under `mapper`
    pub fn new<T: Value>(mapper: &CoordinateMapper, bounds: &Bounds<T>) -> Self {
        let x_axis = (
            mapper.to_viewport(Point::new(bounds.min_x(), T::zero())),
            mapper.to_viewport(Point::new(bounds.max_x(), T::zero())),
        );
        let y_axis = (
            mapper.to_viewport(Point::new(T::zero(), bounds.min_y())),
            mapper.to_viewport(Point::new(T::zero(), bounds.max_y())),
        );

        Self {
            x_axis,
            y_axis,
            x_label: x_axis.1.offset(X_LABEL_OFFSET.0, X_LABEL_OFFSET.1),
            y_label: y_axis.1.offset(Y_LABEL_OFFSET.0, Y_LABEL_OFFSET.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_close, value::SteppedValues};

    fn demo_bounds() -> Bounds {
        Bounds::from_points(&[Point::new(1.0, 1.0), Point::new(5.0, 4.5)])
    }

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(&demo_bounds(), Viewport::default(), Margins::default())
    }

    #[test]
    fn test_corners_map_to_plot_area() {
        let m = mapper();
        let bounds = demo_bounds();

        let bottom_left = m.to_viewport(Point::new(bounds.min_x(), bounds.min_y()));
        assert_close!(bottom_left.x, 50.0);
        assert_close!(bottom_left.y, 550.0);

        let top_right = m.to_viewport(Point::new(bounds.max_x(), bounds.max_y()));
        assert_close!(top_right.x, 750.0);
        assert_close!(top_right.y, 170.0);

        let area = m.plot_area();
        assert_eq!(
            (area.left, area.top, area.right(), area.bottom()),
            (50.0, 170.0, 750.0, 550.0)
        );
    }

    #[test]
    fn test_vertical_axis_inverted() {
        let m = mapper();
        let low = m.to_viewport(Point::new(2.0, 1.0));
        let high = m.to_viewport(Point::new(2.0, 3.0));
        assert!(high.y < low.y);
        assert_eq!(high.x, low.x);
    }

    #[test]
    fn test_round_trip_data() {
        let m = mapper();
        let bounds = demo_bounds();
        for x in SteppedValues::new(bounds.min_x()..=bounds.max_x(), 0.37) {
            for y in SteppedValues::new(bounds.min_y()..=bounds.max_y(), 0.41) {
                let p: Point = m.to_data(m.to_viewport(Point::new(x, y)));
                assert_close!(p.x, x, tol = 1e-12);
                assert_close!(p.y, y, tol = 1e-12);
            }
        }
    }

    #[test]
    fn test_round_trip_screen() {
        let m = mapper();
        for sx in SteppedValues::new(0.0..=800.0, 13.0) {
            for sy in SteppedValues::new(0.0..=600.0, 17.0) {
                let q = ScreenPoint::new(sx, sy);
                let back = m.to_viewport(m.to_data::<f64>(q));
                assert_close!(back.x, sx, tol = 1e-9);
                assert_close!(back.y, sy, tol = 1e-9);
            }
        }
    }

    #[test]
    fn test_round_trip_f32_storage() {
        let bounds = Bounds::from_points(&[Point::new(1.0f32, 1.0), Point::new(5.0, 4.5)]);
        let m = CoordinateMapper::new(&bounds, Viewport::default(), Margins::default());
        let p = Point::new(2.5f32, 3.25);
        let back: Point<f32> = m.to_data(m.to_viewport(p));
        assert_close!(back.x, 2.5f32, tol = 1e-6);
        assert_close!(back.y, 3.25f32, tol = 1e-6);
    }

    #[test]
    fn test_degenerate_viewport_clamped() {
        let m = CoordinateMapper::new(&demo_bounds(), Viewport::new(0.0, 0.0), Margins::default());
        let area = m.plot_area();
        assert_eq!((area.width, area.height), (1.0, 1.0));

        let p = Point::new(3.0, 2.0);
        let back: Point = m.to_data(m.to_viewport(p));
        assert_close!(back.x, 3.0, tol = 1e-9);
        assert_close!(back.y, 2.0, tol = 1e-9);
    }

    #[test]
    fn test_axes_geometry() {
        let bounds = demo_bounds();
        let m = mapper();
        let axes = m.axes(&bounds);

        // y = 0 is the bottom edge of the demo bounds
        assert_close!(axes.x_axis.0.y, 550.0);
        assert_close!(axes.x_axis.1.x, 750.0);
        assert_close!(axes.x_label.x, 730.0);
        assert_close!(axes.x_label.y, 555.0);

        // x = 0 is the left edge
        assert_close!(axes.y_axis.0.x, 50.0);
        assert_close!(axes.y_axis.1.y, 170.0);
        assert_close!(axes.y_label.x, 55.0);
    }

    #[test]
    fn test_distance() {
        let a = ScreenPoint::new(0.0, 0.0);
        assert_eq!(a.distance(&ScreenPoint::new(3.0, 4.0)), 5.0);
        assert!(a.distance(&ScreenPoint::new(f64::NAN, 0.0)).is_nan());
    }

    #[test]
    fn test_plot_area_contains() {
        let area = mapper().plot_area();
        assert!(area.contains(ScreenPoint::new(400.0, 300.0)));
        assert!(!area.contains(ScreenPoint::new(400.0, 100.0)));
    }
}
