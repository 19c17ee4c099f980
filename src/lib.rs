//! # Fitview
//! ## Drag points around, watch the line follow
//!
//! Fitview is the engine behind a small interactive regression editor: the user
//! clicks points onto a plot, removes them again, and sees the least-squares
//! line or parabola through them update as they go, along with a prediction
//! for any `x` they type in.
//!
//! This crate is everything except the window. It provides:
//! - An editable [`PointSet`]
//! - Least-squares fitting of a line or a parabola ([`fit`]), wrapped in a [`RegressionModel`]
//! - Padded data [`bounds`] and a [`mapper`] between data space and viewport pixels
//! - A nearest-point lookup in pixels for removal ([`proximity`])
//! - A [`Session`] that owns all of the above and turns frontend events into state changes
//! - Reading and writing the two-column point file ([`io`])
//!
//! ```rust
//! use fitview::{FitKind, Session, config::SessionConfig, mapper::ScreenPoint, session::Event};
//!
//! let mut session: Session = Session::new(Session::demo_points(), SessionConfig::default());
//!
//! // A click in the middle of the plot adds a point there
//! session.handle(Event::PointAdded(ScreenPoint::new(400.0, 300.0)));
//! session.handle(Event::FitKindChanged(FitKind::Quadratic));
//!
//! println!("{}", session.model());
//! println!("{}", session.predict("6"));
//! ```
//!
//! # Core Concepts
//! - A [`PointSet`] is the data being edited. Order does not matter to the fit.
//! - A [`RegressionModel`] is the curve through the points, either [`FitKind::Linear`] or [`FitKind::Quadratic`].
//!     - It is rebuilt from scratch whenever the points or the kind change.
//!     - Inputs that cannot determine a curve give all-zero coefficients, never an error.
//! - [`bounds::Bounds`] is the padded rectangle around the points, and always has a positive size.
//! - A [`mapper::CoordinateMapper`] converts between that rectangle and the viewport, with `y` pointing up in data space and down on screen.
//!
//! # Implementation Details
//!
//! Points can be stored as `f32` or `f64` (see [`value::Value`]), but all fitting sums and pixel arithmetic are done in `f64`.
//! The quadratic fit solves its 3x3 normal equations with `nalgebra`.
//!
//! Logging goes through the `log` facade; install any logger to see it.
//!
//! # Testing utilities
//!
//! Tolerance-based assertions for floating point results are in [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]


#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plotting;

#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub use plotters;

pub mod bounds;
pub mod config;
pub mod display;
pub mod error;
pub mod fit;
pub mod io;
pub mod mapper;
pub mod model;
pub mod points;
pub mod proximity;
pub mod session;
pub mod statistics;
pub mod value;

pub use model::{FitKind, FitProperties, RegressionModel};
pub use points::PointSet;
pub use session::Session;

pub use nalgebra;
