//! Goodness-of-fit measures for the active regression curve.
//!
//! These feed [`crate::model::FitProperties`].
//!
//! # Error Metrics
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values. Lower is better.
//!
//! # Model Fit
//! - [`r_squared`]: Proportion of variance explained by the model. Higher is better (0 to 1 for least-squares fits).
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//!
//! All functions accumulate in `f64`.
//!
//! # Examples
//!
//! ```rust
//! use fitview::statistics::{r_squared, mean_squared_error};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! let mse = mean_squared_error(y.into_iter(), y_fit.into_iter());
//! assert!(r2 > 0.9 && mse < 0.01);
//! ```
use crate::value::Value;

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// # Returns
/// The arithmetic mean of all elements in `data`.
/// - Returns NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = fitview::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> f64 {
    let (sum, count) = data.fold((0.0, 0.0), |(sum, count), v| (sum + v.widen(), count + 1.0));
    sum / count
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MSE = Σ (y_i - y_fit_i)² / N
/// ```
/// </div>
///
/// # Returns
/// The mean squared error, or NaN if there are no values.
///
/// # Example
/// ```
/// # use fitview::statistics::mean_squared_error;
/// let y = vec![-1.0, -2.0];
/// let y_fit = vec![1.0, 2.0];
/// assert_eq!(mean_squared_error(y.into_iter(), y_fit.into_iter()), 10.0);
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> f64 {
    let mut total = 0.0;
    let mut n = 0.0;
    for (y, y_fit) in y.zip(y_fit) {
        let r = y.widen() - y_fit.widen();
        total += r * r;
        n += 1.0;
    }
    total / n
}

/// Calculate the R-squared value for a set of data.
///
/// - `0` means the model explains none of the variation.
/// - `1` means the model explains all the variation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// If `SS_tot` is zero (every observed value identical) the result is `1`
/// when the residuals are zero too, and `0` otherwise.
/// </div>
///
/// # Example
/// ```rust
/// # use fitview::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let r2 = r_squared(y.clone().into_iter(), y.into_iter());
/// assert_eq!(r2, 1.0);
/// ```
#[allow(clippy::float_cmp)]
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> f64 {
    let pairs: Vec<(f64, f64)> = y.zip(y_fit).map(|(y, f)| (y.widen(), f.widen())).collect();
    let y_mean = mean(pairs.iter().map(|&(y, _)| y));

    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;
    for (y, y_fit) in pairs {
        ss_total += (y - y_mean).powi(2);
        ss_residual += (y - y_fit).powi(2);
    }

    if ss_total == 0.0 {
        return if ss_residual == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_residual / ss_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn test_mean() {
        assert_eq!(mean(vec![1.0, 2.0, 3.0].into_iter()), 2.0);
        assert_eq!(mean(vec![1.5f32, 2.5].into_iter()), 2.0);
        assert!(mean(Vec::<f64>::new().into_iter()).is_nan());
    }

    #[test]
    fn test_mse() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        let mse1 = mean_squared_error(y.clone().into_iter(), y_fit.clone().into_iter());
        let mse2 = mean_squared_error(y_fit.into_iter(), y.into_iter());
        assert_eq!(mse1, mse2);
        assert_close!(mse1, 2.0 / 3.0);
    }

    #[test]
    fn test_mse_empty_input_returns_nan() {
        let mse = mean_squared_error(Vec::<f64>::new().into_iter(), Vec::new().into_iter());
        assert!(mse.is_nan());
    }

    #[test]
    fn test_r_squared() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![1.1, 1.9, 3.05];
        let r2 = r_squared(y.into_iter(), y_fit.into_iter());
        assert_close!(r2, 1.0 - 0.0225 / 2.0);
    }

    #[test]
    fn test_r_squared_constant_data() {
        let y = vec![2.0, 2.0, 2.0];
        assert_eq!(r_squared(y.clone().into_iter(), y.clone().into_iter()), 1.0);
        assert_eq!(r_squared(y.into_iter(), vec![0.0, 0.0, 0.0].into_iter()), 0.0);
    }
}
