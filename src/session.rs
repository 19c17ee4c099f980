//! Event dispatch over a single editing session.
//!
//! A [`Session`] owns everything the editor works on: the [`PointSet`], the
//! [`RegressionModel`] (whose variant is the active [`FitKind`]), the padded
//! [`Bounds`], the current [`Viewport`] and the [`CoordinateMapper`] built
//! from them.
//!
//! Events are handled one at a time and to completion. Every mutation runs
//! the same recomputation cascade before returning:
//!
//! 1. [`Bounds`] from the points
//! 2. [`RegressionModel`] from the points and kind
//! 3. [`CoordinateMapper`] and [`Axes`] from the bounds and viewport
//!
//! so that whatever a renderer reads back afterwards is consistent.
//!
//! # Example
//! ```
//! # use fitview::{FitKind, Session, session::{Event, Prediction, Response}, config::SessionConfig};
//! let mut session: Session = Session::new(Session::demo_points(), SessionConfig::default());
//!
//! session.handle(Event::FitKindChanged(FitKind::Quadratic));
//! let response = session.handle(Event::PredictionQueried("6".into()));
//! let Response::Prediction(Prediction::Value { y, .. }) = response else {
//!     panic!("expected a prediction");
//! };
//! assert!((y - 6.46).abs() < 1e-9);
//! ```
use std::path::PathBuf;

use crate::{
    bounds::Bounds,
    config::SessionConfig,
    error::Result,
    io,
    mapper::{Axes, CoordinateMapper, ScreenPoint, Viewport},
    model::{FitKind, RegressionModel},
    points::PointSet,
    proximity::find_nearest,
    value::{Point, Value},
};

/// Offset of the cursor readout from the cursor, in pixels
pub const CURSOR_READOUT_OFFSET: (f64, f64) = (10.0, 10.0);

/// Points seeded when no data could be loaded
pub const DEMO_POINTS: [(f64, f64); 5] =
    [(1.0, 1.0), (2.0, 2.0), (3.0, 1.3), (4.0, 3.0), (5.0, 4.5)];

/// Discrete input delivered by a frontend
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Add a point under the given viewport position
    PointAdded(ScreenPoint),

    /// Remove the point nearest to the given viewport position, if close enough
    PointRemovalRequested(ScreenPoint),

    /// Switch the fitted curve
    FitKindChanged(FitKind),

    /// The rendering surface changed size
    ViewportResized(Viewport),

    /// Evaluate the curve at a typed x value
    PredictionQueried(String),

    /// Write the points to a file
    SaveRequested(PathBuf),
}

/// What a frontend should do after an event
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T: Value = f64> {
    /// State changed and the frame should be redrawn
    Redraw,

    /// Nothing changed
    Unchanged,

    /// Result of a prediction query
    Prediction(Prediction<T>),

    /// The points were written out
    Saved {
        /// Destination file
        path: PathBuf,

        /// Number of points written
        points: usize,
    },

    /// The points could not be written; the message says why
    SaveFailed(String),
}

/// Outcome of evaluating the curve at user input
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction<T: Value = f64> {
    /// The input parsed and the curve was evaluated
    Value {
        /// Parsed input
        x: T,

        /// Curve value at `x`
        y: T,
    },

    /// The input was not a number
    Invalid {
        /// The rejected input, as typed
        input: String,
    },
}

impl<T: Value> std::fmt::Display for Prediction<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prediction::Value { y, .. } => write!(f, "Prediction: Y = {y:.6}"),
            Prediction::Invalid { .. } => write!(f, "Prediction: invalid X"),
        }
    }
}

/// Data-space position under the cursor, and where to draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorReadout<T: Value = f64> {
    /// Cursor position in data space
    pub position: Point<T>,

    /// Where the readout text goes in the viewport
    pub anchor: ScreenPoint,
}

impl<T: Value> std::fmt::Display for CursorReadout<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X={:.2}, Y={:.2}", self.position.x, self.position.y)
    }
}

/// Editable point set with its fitted curve and screen mapping.
#[derive(Debug, Clone)]
pub struct Session<T: Value = f64> {
    points: PointSet<T>,
    model: RegressionModel<T>,
    bounds: Bounds<T>,
    viewport: Viewport,
    mapper: CoordinateMapper,
    axes: Axes,
    config: SessionConfig,
}

impl<T: Value> Session<T> {
    /// Starts a session over `points`, using the kind and viewport from `config`
    pub fn new(points: PointSet<T>, config: SessionConfig) -> Self {
        let bounds = Bounds::with_padding(points.as_slice(), config.padding);
        let model = RegressionModel::fit(points.as_slice(), config.fit_kind);
        let mapper = CoordinateMapper::new(&bounds, config.viewport, config.margins);
        let axes = mapper.axes(&bounds);

        Self {
            points,
            model,
            bounds,
            viewport: config.viewport,
            mapper,
            axes,
            config,
        }
    }

    /// Starts a session from the point file at `path`.
    ///
    /// If the file cannot be read, or holds no points, the session is seeded
    /// with [`DEMO_POINTS`] instead.
    pub fn load_or_demo(path: impl AsRef<std::path::Path>, config: SessionConfig) -> Self {
        let path = path.as_ref();
        let points = match io::load_points(path) {
            Ok(points) if !points.is_empty() => points,
            Ok(_) => {
                log::warn!("No points in {}, using demo data", path.display());
                Self::demo_points()
            }
            Err(e) => {
                log::warn!("{e}, using demo data");
                Self::demo_points()
            }
        };

        Self::new(points, config)
    }

    /// The fallback data set
    #[must_use]
    pub fn demo_points() -> PointSet<T> {
        DEMO_POINTS
            .iter()
            .map(|&(x, y)| Point::new(T::narrow(x), T::narrow(y)))
            .collect()
    }

    /// Applies one event and reports what the frontend should do next
    pub fn handle(&mut self, event: Event) -> Response<T> {
        match event {
            Event::PointAdded(screen) => {
                self.add_point_at(screen);
                Response::Redraw
            }

            Event::PointRemovalRequested(screen) => match self.remove_nearest(screen) {
                Some(_) => Response::Redraw,
                None => Response::Unchanged,
            },

            Event::FitKindChanged(kind) => {
                if self.set_fit_kind(kind) {
                    Response::Redraw
                } else {
                    Response::Unchanged
                }
            }

            Event::ViewportResized(viewport) => {
                self.resize(viewport);
                Response::Redraw
            }

            Event::PredictionQueried(input) => Response::Prediction(self.predict(&input)),

            Event::SaveRequested(path) => match self.save(&path) {
                Ok(points) => Response::Saved { path, points },
                Err(e) => {
                    log::warn!("{e}");
                    Response::SaveFailed(e.to_string())
                }
            },
        }
    }

    /// Adds the data-space point under a viewport position, returning it
    pub fn add_point_at(&mut self, screen: ScreenPoint) -> Point<T> {
        let point = self.mapper.to_data(screen);
        self.add_point(point);
        point
    }

    /// Adds a data-space point
    pub fn add_point(&mut self, point: Point<T>) {
        self.points.add(point);
        self.recompute();
    }

    /// Removes the point nearest to a viewport position.
    ///
    /// Nothing is removed unless a point lies strictly within the configured
    /// removal threshold.
    pub fn remove_nearest(&mut self, screen: ScreenPoint) -> Option<Point<T>> {
        let Some(index) = find_nearest(
            screen,
            self.points.as_slice(),
            &self.mapper,
            self.config.removal_threshold,
        ) else {
            log::debug!(
                "No point within {}px of ({}, {})",
                self.config.removal_threshold,
                screen.x,
                screen.y
            );
            return None;
        };

        self.remove_at(index).ok()
    }

    /// Removes the point at `index`.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::IndexOutOfRange`] for an invalid index;
    /// the session is unchanged in that case.
    pub fn remove_at(&mut self, index: usize) -> Result<Point<T>> {
        let point = self.points.remove_at(index)?;
        self.recompute();
        Ok(point)
    }

    /// Switches the fitted curve. Returns false if `kind` was already active.
    pub fn set_fit_kind(&mut self, kind: FitKind) -> bool {
        if self.model.kind() == kind {
            return false;
        }

        self.model.switch_kind(kind, self.points.as_slice());
        true
    }

    /// Changes the viewport size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.remap();
    }

    /// Evaluates the curve at typed input.
    ///
    /// Surrounding whitespace is ignored; anything else that is not a number
    /// gives [`Prediction::Invalid`].
    pub fn predict(&self, input: &str) -> Prediction<T> {
        match input.trim().parse::<T>() {
            Ok(x) => Prediction::Value {
                x,
                y: self.model.evaluate(x),
            },
            Err(_) => Prediction::Invalid {
                input: input.to_string(),
            },
        }
    }

    /// Writes the points to `path`, returning how many were written.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written. The session is unchanged.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<usize> {
        io::save_points(path, self.points.as_slice())?;
        Ok(self.points.size())
    }

    /// Writes the points to the configured save path
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_default(&self) -> Result<usize> {
        self.save(&self.config.save_path)
    }

    fn recompute(&mut self) {
        self.bounds = Bounds::with_padding(self.points.as_slice(), self.config.padding);
        self.model.rebuild(self.points.as_slice(), self.model.kind());
        self.remap();
    }

    fn remap(&mut self) {
        self.mapper = CoordinateMapper::new(&self.bounds, self.viewport, self.config.margins);
        self.axes = self.mapper.axes(&self.bounds);
    }

    /// The current points
    pub fn points(&self) -> &PointSet<T> {
        &self.points
    }

    /// The active curve kind
    pub fn fit_kind(&self) -> FitKind {
        self.model.kind()
    }

    /// The fitted curve
    pub fn model(&self) -> &RegressionModel<T> {
        &self.model
    }

    /// Padded extents of the points
    pub fn bounds(&self) -> &Bounds<T> {
        &self.bounds
    }

    /// The current data to viewport map
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// The current viewport size
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Axis geometry under the current map
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Settings this session was started with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Samples of the curve across the bounds, for drawing as a polyline.
    ///
    /// Empty when there are no points.
    pub fn curve(&self) -> Vec<Point<T>> {
        if self.points.is_empty() {
            return Vec::new();
        }

        self.bounds
            .x_samples(self.config.curve_segments)
            .map(|x| Point::new(x, self.model.evaluate(x)))
            .collect()
    }

    /// Every point with a flag set if it lies farther than the highlight threshold from the curve
    pub fn highlighted(&self) -> impl Iterator<Item = (Point<T>, bool)> + '_ {
        let threshold = T::narrow(self.config.highlight_threshold);
        self.points.iter().map(move |p| (*p, self.model.is_far(p, threshold)))
    }

    /// Data-space readout for a cursor at `screen`
    pub fn cursor_readout(&self, screen: ScreenPoint) -> CursorReadout<T> {
        CursorReadout {
            position: self.mapper.to_data(screen),
            anchor: screen.offset(CURSOR_READOUT_OFFSET.0, CURSOR_READOUT_OFFSET.1),
        }
    }
}
