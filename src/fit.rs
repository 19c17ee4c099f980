//! Least-squares fitting for lines and parabolas.
//!
//! Both fitters are pure functions of a point snapshot and never fail:
//! when the data cannot determine a curve they fall back to zero
//! coefficients, which renders as a flat line at `y = 0`.
//!
//! - [`fit_linear`]: slope and intercept from the covariance of x and y about their means.
//! - [`fit_quadratic`]: `y = ax² + bx + c` from the 3x3 normal equations, solved with Cramer's rule.
//!
//! All sums are accumulated in `f64`, whatever the storage precision of the
//! points, and only the final coefficients are narrowed back.
use nalgebra::{Matrix3, Vector3};

use crate::value::{Point, Value};

/// Minimum number of points a degree-2 fit needs to be determined
pub const MIN_QUADRATIC_POINTS: usize = 3;

/// Normal-equation determinants smaller than this (in absolute value) are treated as singular
pub const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Coefficients of `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct LinearCoeffs<T: Value = f64> {
    /// Rate of change of y with x
    pub slope: T,

    /// Value of y at x = 0
    pub intercept: T,
}

impl<T: Value> LinearCoeffs<T> {
    /// Creates a new set of linear coefficients
    pub fn new(slope: T, intercept: T) -> Self {
        Self { slope, intercept }
    }

    /// Evaluates the line at `x`
    pub fn y(&self, x: T) -> T {
        self.slope * x + self.intercept
    }

    /// Coefficients in ascending order of power: `[intercept, slope]`
    pub fn coefficients(&self) -> [T; 2] {
        [self.intercept, self.slope]
    }
}

/// Coefficients of `y = a·x² + b·x + c`
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct QuadraticCoeffs<T: Value = f64> {
    /// Coefficient of x²
    pub a: T,

    /// Coefficient of x
    pub b: T,

    /// Constant term
    pub c: T,
}

impl<T: Value> QuadraticCoeffs<T> {
    /// Creates a new set of quadratic coefficients
    pub fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }

    /// Evaluates the parabola at `x`
    pub fn y(&self, x: T) -> T {
        self.a * x * x + self.b * x + self.c
    }

    /// Coefficients in ascending order of power: `[c, b, a]`
    pub fn coefficients(&self) -> [T; 3] {
        [self.c, self.b, self.a]
    }
}

/// Fits a straight line through `points` by ordinary least squares.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// slope     = Σ (x_i - x̄)(y_i - ȳ) / Σ (x_i - x̄)²
/// intercept = ȳ - slope · x̄
/// ```
/// </div>
///
/// # Degenerate input
/// - No points: returns `{0, 0}`.
/// - All x identical (zero variance): the slope is set to `0`, giving the
///   horizontal line `y = ȳ`. This is a deliberate policy, not a failure.
///
/// NaN or infinite coordinates are not filtered and propagate into the result.
///
/// # Example
/// ```
/// # use fitview::{fit::fit_linear, value::Point};
/// let data = [Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)];
/// let line = fit_linear(&data);
/// assert_eq!((line.slope, line.intercept), (2.0, 1.0));
/// ```
pub fn fit_linear<T: Value>(points: &[Point<T>]) -> LinearCoeffs<T> {
    if points.is_empty() {
        return LinearCoeffs::default();
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points.iter().fold((0.0, 0.0), |(sx, sy), p| {
        let (x, y) = p.widen();
        (sx + x, sy + y)
    });
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for p in points {
        let (x, y) = p.widen();
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        denominator += dx * dx;
    }

    #[allow(clippy::float_cmp)]
    let slope = if denominator == 0.0 {
        log::debug!("x variance is zero across {n} points; using a horizontal line");
        0.0
    } else {
        numerator / denominator
    };
    let intercept = mean_y - slope * mean_x;

    LinearCoeffs::new(T::narrow(slope), T::narrow(intercept))
}

/// Fits a parabola through `points` by least squares.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// The normal equations are built from power sums and solved with Cramer's rule:
/// ```math
/// [ n    Σx   Σx² ] [c]   [Σy  ]
/// [ Σx   Σx²  Σx³ ] [b] = [Σxy ]
/// [ Σx²  Σx³  Σx⁴ ] [a]   [Σx²y]
/// ```
/// </div>
///
/// # Degenerate input
/// - Fewer than [`MIN_QUADRATIC_POINTS`] points: the system is underdetermined,
///   `{0, 0, 0}` is returned without attempting a fit.
/// - `|det| <` [`SINGULAR_DETERMINANT`]: the x values do not span the quadratic
///   basis (for instance all x identical), `{0, 0, 0}` is returned.
///
/// # Example
/// ```
/// # use fitview::{fit::fit_quadratic, value::Point};
/// let data: [Point<f64>; 3] = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)];
/// let parabola = fit_quadratic(&data);
/// assert!((parabola.a - 1.0).abs() < 1e-9);
/// ```
pub fn fit_quadratic<T: Value>(points: &[Point<T>]) -> QuadraticCoeffs<T> {
    if points.len() < MIN_QUADRATIC_POINTS {
        log::debug!(
            "{} points cannot determine a parabola; using zero coefficients",
            points.len()
        );
        return QuadraticCoeffs::default();
    }

    let sums = PowerSums::from_points(points);
    let (matrix, rhs) = sums.normal_equations();

    let det = matrix.determinant();
    // A NaN determinant counts as singular
    if !(det.abs() >= SINGULAR_DETERMINANT) {
        log::debug!("Normal equations are singular (det = {det:e}); using zero coefficients");
        return QuadraticCoeffs::default();
    }

    // Cramer's rule: replace column i with the right hand side
    let solve = |column: usize| {
        let mut replaced = matrix;
        replaced.set_column(column, &rhs);
        replaced.determinant() / det
    };

    let c = solve(0);
    let b = solve(1);
    let a = solve(2);

    QuadraticCoeffs::new(T::narrow(a), T::narrow(b), T::narrow(c))
}

/// Power and cross sums feeding the quadratic normal equations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PowerSums {
    n: f64,
    x: f64,
    x2: f64,
    x3: f64,
    x4: f64,
    y: f64,
    xy: f64,
    x2y: f64,
}

impl PowerSums {
    fn from_points<T: Value>(points: &[Point<T>]) -> Self {
        let mut sums = Self::default();
        for p in points {
            let (x, y) = p.widen();
            let x2 = x * x;

            sums.n += 1.0;
            sums.x += x;
            sums.x2 += x2;
            sums.x3 += x2 * x;
            sums.x4 += x2 * x2;
            sums.y += y;
            sums.xy += x * y;
            sums.x2y += x2 * y;
        }
        sums
    }

    fn normal_equations(&self) -> (Matrix3<f64>, Vector3<f64>) {
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            self.n,  self.x,  self.x2,
            self.x,  self.x2, self.x3,
            self.x2, self.x3, self.x4,
        );
        let rhs = Vector3::new(self.y, self.xy, self.x2y);
        (matrix, rhs)
    }
}
