//! Session settings, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! fit_kind = "quadratic"
//! removal_threshold = 15.0
//!
//! [viewport]
//! width = 1024.0
//! height = 768.0
//! ```
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    bounds::DEFAULT_PADDING,
    error::{Error, Result},
    mapper::{Margins, Viewport},
    model::FitKind,
    proximity::DEFAULT_REMOVAL_THRESHOLD,
};

/// Residuals larger than this mark a point as far from the curve
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f64 = 0.5;

/// Number of straight segments the curve is drawn with
pub const DEFAULT_CURVE_SEGMENTS: usize = 200;

/// Tunables for a [`crate::Session`]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Data-space padding around the point extrema
    pub padding: f64,

    /// Screen borders kept free of data
    pub margins: Margins,

    /// Initial viewport size
    pub viewport: Viewport,

    /// Hit radius in pixels for point removal
    pub removal_threshold: f64,

    /// Residual above which a point is flagged as far
    pub highlight_threshold: f64,

    /// Segments used to sample the curve for drawing
    pub curve_segments: usize,

    /// Curve kind fitted at startup
    pub fit_kind: FitKind,

    /// File the points are loaded from
    pub data_path: PathBuf,

    /// File the points are saved to
    pub save_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            margins: Margins::default(),
            viewport: Viewport::default(),
            removal_threshold: DEFAULT_REMOVAL_THRESHOLD,
            highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            fit_kind: FitKind::default(),
            data_path: PathBuf::from("data.csv"),
            save_path: PathBuf::from("data_updated.csv"),
        }
    }
}

impl SessionConfig {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns [`Error::FileUnavailable`] if the file cannot be opened,
    /// [`Error::Io`] if it cannot be read, or [`Error::Config`] if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut s = String::new();
        BufReader::new(file).read_to_string(&mut s)?;
        Self::from_toml_str(&s)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the text is not a valid config.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.viewport, Viewport::new(800.0, 600.0));
        assert_eq!(config.margins.top, 170.0);
        assert_eq!(config.curve_segments, 200);
    }

    #[test]
    fn test_partial_config() {
        let config = SessionConfig::from_toml_str(
            r#"
            fit_kind = "quadratic"
            removal_threshold = 15.0
            save_path = "out.csv"

            [margins]
            top = 50.0
            "#,
        )
        .unwrap();

        assert_eq!(config.fit_kind, FitKind::Quadratic);
        assert_eq!(config.removal_threshold, 15.0);
        assert_eq!(config.save_path, PathBuf::from("out.csv"));
        assert_eq!(config.margins.top, 50.0);
        assert_eq!(config.margins.left, 50.0);
        assert_eq!(config.highlight_threshold, DEFAULT_HIGHLIGHT_THRESHOLD);
    }

    #[test]
    fn test_invalid_config() {
        let err = SessionConfig::from_toml_str("fit_kind = \"cubic\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = SessionConfig::from_toml_str("padding = [1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitview.toml");
        let text = "curve_segments = 50\n[viewport]\nwidth = 400.0\nheight = 300.0\n";
        std::fs::write(&path, text).unwrap();

        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.curve_segments, 50);
        assert_eq!(config.viewport, Viewport::new(400.0, 300.0));

        assert!(matches!(
            SessionConfig::load(dir.path().join("missing.toml")),
            Err(Error::FileUnavailable { .. })
        ));
    }
}
