//! Utilities for displaying fitted curves as equations
//!
//! This module turns coefficient slices into human-readable strings such as
//! `y(x) = 0.24x² - 0.66x + 1.66`.
//!
//! # Key Concepts
//! - **[`Term`]**: Represents a single polynomial term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Helpers
//! - [`format_polynomial`]: Renders ascending-power coefficients as `"y(x) = ..."`.
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Formats `x` raised to a power with a superscript exponent.
use crate::value::Value;

pub mod unicode;

/// Default precision for coefficients in equation strings
pub const DEFAULT_PRECISION: usize = 2;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e3;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Represents the sign of a polynomial term.
///
/// Used when formatting equations to determine how a term
/// should be connected to the rest of the expression (`+` or `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use fitview::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef < T::zero() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single term of an equation for display purposes.
///
/// A `Term` combines the **sign** and the **formatted body** of a
/// component (e.g., `"2.00x²"`, `"3.14"`, `"x"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term, without its sign.
    pub body: String,
}

impl Term {
    /// Creates a new term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Formats the monomial `coef·x^degree`.
    ///
    /// Returns `None` when the coefficient is zero and the term should be skipped.
    pub fn monomial<T: Value>(degree: i32, coef: T) -> Option<Self> {
        let sign = Sign::from_coef(coef);
        let coef = format_coefficient(coef, degree, DEFAULT_PRECISION)?;
        let var = format_variable("x", degree);
        Some(Self::new(sign, format!("{coef}{var}")))
    }
}

/// Writes a full equation into the provided buffer.
///
/// `coefficients[i]` is the coefficient of `x^i`. Terms are written from the
/// highest power down, zero coefficients are skipped, and the first term is
/// written without a leading `+`. An all-zero (or empty) slice renders as
/// `y(x) = 0`.
///
/// NaN coefficients are written as `NaN` so a broken fit stays visible.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
///
/// # Example
/// ```
/// # use fitview::display::format_polynomial;
/// let mut s = String::new();
/// format_polynomial(&mut s, &[1.0, 2.0]).unwrap();
/// assert_eq!(s, "y(x) = 2.00x + 1.00");
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn format_polynomial<T: Value, B: std::fmt::Write>(
    buffer: &mut B,
    coefficients: &[T],
) -> std::fmt::Result {
    let mut terms = coefficients
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(degree, &coef)| Term::monomial(degree as i32, coef));

    write!(buffer, "y(x) = ")?;
    let Some(first) = terms.next() else {
        return write!(buffer, "0");
    };

    // No leading '+' on the first term
    if first.sign == Sign::Negative {
        write!(buffer, "{}", first.sign.char())?;
    }
    write!(buffer, "{}", first.body)?;

    for term in terms {
        write!(buffer, " {} {}", term.sign.char(), term.body)?;
    }

    Ok(())
}

/// Formats a numeric coefficient for display in an equation term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string for a unit coefficient on a non-constant term (`x`, not `1.00x`).
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e3`.
/// - Formats in scientific notation otherwise.
///
/// The sign is not included; see [`Sign::from_coef`].
///
/// # Example
/// ```
/// # use fitview::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    if coef.is_nan() {
        return Some("NaN".to_string());
    }

    let abs = coef.abs();
    if abs <= T::epsilon() {
        return None;
    }

    if (abs - T::one()).abs() <= T::epsilon() && degree != 0 {
        return Some(String::new());
    }

    Some(unicode::float(abs, default_fixed_range(), precision))
}

/// Formats `base` raised to `exp` for display.
///
/// # Behavior
/// - If `exp == 0`, returns an empty string (`""`).
/// - If `exp == 1`, returns the base string unchanged.
/// - Otherwise, appends the Unicode superscript version of `exp` to `base`.
///
/// # Examples
/// ```
/// # use fitview::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 2), "x²");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}{}", unicode::superscript(&exp.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(coefficients: &[f64]) -> String {
        let mut buf = String::new();
        format_polynomial(&mut buf, coefficients).unwrap();
        buf
    }

    #[test]
    fn test_sign_from_coef() {
        assert_eq!(Sign::from_coef(1.0), Sign::Positive);
        assert_eq!(Sign::from_coef(-1.0), Sign::Negative);
        assert_eq!(Sign::from_coef(0.0), Sign::Positive);
        assert_eq!(Sign::Negative.char(), '-');
    }

    #[test]
    fn test_format_coefficient_decimal() {
        assert_eq!(format_coefficient(2.5, 1, 2), Some("2.50".to_string()));
        assert_eq!(format_coefficient(-2.5, 1, 2), Some("2.50".to_string()));
        assert_eq!(format_coefficient(0.5, 1, 2), Some("0.50".to_string()));
    }

    #[test]
    fn test_format_coefficient_unit() {
        assert_eq!(format_coefficient(1.0, 1, 2), Some(String::new()));
        assert_eq!(format_coefficient(-1.0, 2, 2), Some(String::new()));
        assert_eq!(format_coefficient(1.0, 0, 2), Some("1.00".to_string()));
    }

    #[test]
    fn test_format_coefficient_zero() {
        assert_eq!(format_coefficient(0.0, 1, 2), None);
        assert_eq!(format_coefficient(1e-20, 1, 2), None);
    }

    #[test]
    fn test_format_coefficient_scientific() {
        assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
        assert_eq!(format_coefficient(1e-5f32, 2, 2), Some("1.00e-5".to_string()));
    }

    #[test]
    fn test_format_variable() {
        assert_eq!(format_variable("x", 0), "");
        assert_eq!(format_variable("x", 1), "x");
        assert_eq!(format_variable("x", 2), "x²");
        assert_eq!(format_variable("x", -2), "x⁻²");
    }

    #[test]
    fn test_format_polynomial_line() {
        assert_eq!(render(&[1.0, 2.0]), "y(x) = 2.00x + 1.00");
        assert_eq!(render(&[-1.0, 2.0]), "y(x) = 2.00x - 1.00");
        assert_eq!(render(&[3.0, -1.0]), "y(x) = -x + 3.00");
    }

    #[test]
    fn test_format_polynomial_quadratic() {
        assert_eq!(render(&[1.66, -0.657, 0.243]), "y(x) = 0.24x² - 0.66x + 1.66");
        assert_eq!(render(&[0.0, 0.0, 1.0]), "y(x) = x²");
    }

    #[test]
    fn test_format_polynomial_all_zero() {
        assert_eq!(render(&[0.0, 0.0, 0.0]), "y(x) = 0");
        assert_eq!(render(&[]), "y(x) = 0");
    }

    #[test]
    fn test_format_polynomial_nan() {
        assert_eq!(render(&[f64::NAN, 1.0]), "y(x) = x + NaN");
    }
}
