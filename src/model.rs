//! The active regression curve.
//!
//! A [`RegressionModel`] is a tagged union over [`FitKind`] holding the
//! matching coefficients. It is never updated incrementally: every change to
//! the points or to the kind rebuilds it from a full scan through
//! [`crate::fit`].
//!
//! # Example
//! ```
//! # use fitview::{FitKind, RegressionModel, value::Point};
//! let points: [Point<f64>; 3] = [Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)];
//! let model = RegressionModel::fit(&points, FitKind::Linear);
//!
//! assert_eq!(model.to_string(), "y(x) = 2.00x + 1.00");
//! assert!((model.evaluate(3.0) - 7.0).abs() < 1e-12);
//! ```
use std::str::FromStr;

use crate::{
    display,
    error::Error,
    fit::{fit_linear, fit_quadratic, LinearCoeffs, QuadraticCoeffs},
    statistics,
    value::{Point, Value},
};

/// Which curve is fitted through the points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitKind {
    /// Ordinary least-squares line
    #[default]
    Linear,

    /// Least-squares parabola
    Quadratic,
}

impl FitKind {
    /// Caption shown next to the curve
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FitKind::Linear => "Linear",
            FitKind::Quadratic => "Polynomial (2nd degree)",
        }
    }

    /// Highest power of x in the fitted curve
    #[must_use]
    pub fn degree(&self) -> usize {
        match self {
            FitKind::Linear => 1,
            FitKind::Quadratic => 2,
        }
    }
}

impl std::fmt::Display for FitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "l" | "1" => Ok(FitKind::Linear),
            "quadratic" | "poly2" | "p" | "2" => Ok(FitKind::Quadratic),
            other => Err(Error::Parse(format!("unknown fit kind `{other}`"))),
        }
    }
}

/// Fitted curve tagged with the kind that produced it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RegressionModel<T: Value = f64> {
    /// `y = slope·x + intercept`
    Linear(LinearCoeffs<T>),

    /// `y = a·x² + b·x + c`
    Quadratic(QuadraticCoeffs<T>),
}

impl<T: Value> Default for RegressionModel<T> {
    fn default() -> Self {
        Self::Linear(LinearCoeffs::default())
    }
}

impl<T: Value> RegressionModel<T> {
    /// Fits a new model of the given kind through `points`.
    ///
    /// Degenerate inputs produce all-zero coefficients, never an error.
    pub fn fit(points: &[Point<T>], kind: FitKind) -> Self {
        match kind {
            FitKind::Linear => Self::Linear(fit_linear(points)),
            FitKind::Quadratic => Self::Quadratic(fit_quadratic(points)),
        }
    }

    /// Recomputes the coefficients from `points`, switching to `kind`.
    pub fn rebuild(&mut self, points: &[Point<T>], kind: FitKind) {
        *self = Self::fit(points, kind);
    }

    /// Changes the active kind and refits from `points`.
    pub fn switch_kind(&mut self, kind: FitKind, points: &[Point<T>]) {
        self.rebuild(points, kind);
    }

    /// The kind of curve this model holds
    #[must_use]
    pub fn kind(&self) -> FitKind {
        match self {
            Self::Linear(_) => FitKind::Linear,
            Self::Quadratic(_) => FitKind::Quadratic,
        }
    }

    /// Evaluates the curve at `x`
    pub fn evaluate(&self, x: T) -> T {
        match self {
            Self::Linear(c) => c.y(x),
            Self::Quadratic(c) => c.y(x),
        }
    }

    /// Observed minus predicted y at the point's x
    pub fn residual(&self, point: &Point<T>) -> T {
        point.y - self.evaluate(point.x)
    }

    /// True if the point lies strictly farther than `threshold` from the curve vertically.
    ///
    /// A NaN residual is never far.
    pub fn is_far(&self, point: &Point<T>, threshold: T) -> bool {
        self.residual(point).abs() > threshold
    }

    /// Coefficients in ascending power order (`[intercept, slope]` or `[c, b, a]`)
    #[must_use]
    pub fn coefficients(&self) -> Vec<T> {
        match self {
            Self::Linear(c) => c.coefficients().to_vec(),
            Self::Quadratic(c) => c.coefficients().to_vec(),
        }
    }

    /// Summary of the model and how well it fits `points`.
    ///
    /// Statistics are computed over every point; non-finite points make them NaN.
    pub fn properties(&self, points: &[Point<T>]) -> FitProperties {
        let y = points.iter().map(|p| p.y);
        let y_fit = points.iter().map(|p| self.evaluate(p.x));

        FitProperties {
            kind: self.kind(),
            equation: self.to_string(),
            coefficients: self.coefficients().into_iter().map(Value::widen).collect(),
            data_points: points.len(),
            mean_squared_error: statistics::mean_squared_error(y.clone(), y_fit.clone()),
            r_squared: statistics::r_squared(y, y_fit),
        }
    }
}

impl<T: Value> std::fmt::Display for RegressionModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::format_polynomial(f, &self.coefficients())
    }
}

/// Serializable summary of a fit, as printed by the CLI's `json` mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FitProperties {
    /// Kind of curve
    pub kind: FitKind,

    /// Human-readable equation
    pub equation: String,

    /// Coefficients in ascending power order
    pub coefficients: Vec<f64>,

    /// Number of points the model was evaluated against
    pub data_points: usize,

    /// Mean squared residual (NaN with no points)
    pub mean_squared_error: f64,

    /// Coefficient of determination
    pub r_squared: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    fn demo() -> Vec<Point> {
        vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 1.3),
            Point::new(4.0, 3.0),
            Point::new(5.0, 4.5),
        ]
    }

    #[test]
    fn test_fit_kind_parse() {
        assert_eq!("linear".parse::<FitKind>().unwrap(), FitKind::Linear);
        assert_eq!(" L ".parse::<FitKind>().unwrap(), FitKind::Linear);
        assert_eq!("Quadratic".parse::<FitKind>().unwrap(), FitKind::Quadratic);
        assert_eq!("poly2".parse::<FitKind>().unwrap(), FitKind::Quadratic);
        assert_eq!("2".parse::<FitKind>().unwrap(), FitKind::Quadratic);
        assert!(matches!("cubic".parse::<FitKind>(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_fit_kind_labels() {
        assert_eq!(FitKind::default(), FitKind::Linear);
        assert_eq!(FitKind::Linear.label(), "Linear");
        assert_eq!(FitKind::Quadratic.to_string(), "Polynomial (2nd degree)");
        assert_eq!(FitKind::Quadratic.degree(), 2);
    }

    #[test]
    fn test_fit_kind_serde() {
        let json = serde_json::to_string(&FitKind::Quadratic).unwrap();
        assert_eq!(json, "\"quadratic\"");
        let kind: FitKind = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(kind, FitKind::Linear);
    }

    #[test]
    fn test_fit_dispatches_on_kind() {
        let points = demo();
        let linear = RegressionModel::fit(&points, FitKind::Linear);
        assert_eq!(linear.kind(), FitKind::Linear);
        assert_eq!(linear, RegressionModel::Linear(fit_linear(&points)));

        let quadratic = RegressionModel::fit(&points, FitKind::Quadratic);
        assert_eq!(quadratic, RegressionModel::Quadratic(fit_quadratic(&points)));
    }

    #[test]
    fn test_switch_kind_refits() {
        let points = demo();
        let mut model = RegressionModel::default();
        assert_eq!(model.evaluate(10.0), 0.0);

        model.switch_kind(FitKind::Quadratic, &points);
        assert_eq!(model.kind(), FitKind::Quadratic);
        let c = fit_quadratic(&points);
        assert_close!(model.evaluate(6.0), c.a * 36.0 + c.b * 6.0 + c.c);
        assert_close!(model.evaluate(6.0), 6.46, tol = 1e-9);

        model.rebuild(&points[..2], FitKind::Quadratic);
        assert_eq!(model.coefficients(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_residual_and_far_flag() {
        let points = [Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)];
        let model = RegressionModel::fit(&points, FitKind::Linear);

        assert!(!model.is_far(&Point::new(1.0, 3.4), 0.5));
        assert!(!model.is_far(&Point::new(1.0, 3.5), 0.5));
        assert!(model.is_far(&Point::new(1.0, 2.4), 0.5));
        assert!(!model.is_far(&Point::new(1.0, f64::NAN), 0.5));
        assert_close!(model.residual(&Point::new(1.0, 4.0)), 1.0);
    }

    #[test]
    fn test_display() {
        let model = RegressionModel::fit(&demo(), FitKind::Quadratic);
        assert_eq!(model.to_string(), "y(x) = 0.24x² - 0.66x + 1.66");

        let empty: RegressionModel = RegressionModel::fit(&[], FitKind::Linear);
        assert_eq!(empty.to_string(), "y(x) = 0");
    }

    #[test]
    fn test_properties() {
        let points = [Point::new(0.0f32, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)];
        let model = RegressionModel::fit(&points, FitKind::Linear);
        let props = model.properties(&points);

        assert_eq!(props.kind, FitKind::Linear);
        assert_eq!(props.data_points, 3);
        assert_eq!(props.equation, "y(x) = 2.00x + 1.00");
        assert_close!(props.coefficients[1], 2.0, tol = 1e-6);
        assert_close!(props.mean_squared_error, 0.0, tol = 1e-9);
        assert_close!(props.r_squared, 1.0, tol = 1e-9);

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["kind"], "linear");
    }
}
