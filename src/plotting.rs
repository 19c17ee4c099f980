//! SVG snapshots of a session frame
//!
//! Draws what an interactive frontend would show for the current state of a
//! [`Session`]: background, axes, the fitted curve, and the points. Points
//! farther from the curve than the highlight threshold get their own colour.
//!
//! Every position comes from the session's [`crate::mapper::CoordinateMapper`],
//! so a snapshot lines up pixel-for-pixel with the live view. No text is
//! drawn.
//!
//! The crate root re-exports [`plotters`] under the same feature, for drawing
//! extra layers onto the same backend.
//!
//! ```rust
//! # use fitview::{Session, config::SessionConfig, plotting::render_svg_string};
//! let session: Session = Session::new(Session::demo_points(), SessionConfig::default());
//! let svg = render_svg_string(&session).unwrap();
//! assert!(svg.contains("<svg"));
//! ```
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
use std::path::Path;

use plotters::{coord::Shift, prelude::*};

use crate::{
    mapper::ScreenPoint,
    value::Value,
    Session,
};

/// Frame background
pub const BACKGROUND: RGBColor = RGBColor(30, 30, 60);

/// Axis lines
pub const AXIS_COLOR: RGBColor = WHITE;

/// Fitted curve
pub const CURVE_COLOR: RGBColor = GREEN;

/// Points close to the curve
pub const POINT_COLOR: RGBColor = RED;

/// Points farther than the highlight threshold from the curve
pub const FAR_POINT_COLOR: RGBColor = RGBColor(255, 200, 0);

/// Radius of a drawn point in pixels
pub const POINT_RADIUS: i32 = 3;

/// Renders the session to an SVG file at `path`, sized to its viewport.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn render_svg<T: Value>(session: &Session<T>, path: impl AsRef<Path>) -> Result<(), Error> {
    let root = SVGBackend::new(path.as_ref(), frame_size(session)).into_drawing_area();
    draw_frame(&root, session)?;
    root.present()?;
    log::info!("Rendered frame to {}", path.as_ref().display());
    Ok(())
}

/// Renders the session to an SVG document in memory.
///
/// # Errors
/// Returns an error if drawing fails.
pub fn render_svg_string<T: Value>(session: &Session<T>) -> Result<String, Error> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, frame_size(session)).into_drawing_area();
        draw_frame(&root, session)?;
        root.present()?;
    }
    Ok(buffer)
}

/// Draws one frame of the session onto any plotters drawing area.
///
/// The area is expected to be in viewport pixels, origin at the top-left.
///
/// # Errors
/// Returns an error if the backend fails to draw.
pub fn draw_frame<DB: DrawingBackend, T: Value>(
    root: &DrawingArea<DB, Shift>,
    session: &Session<T>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&BACKGROUND)?;

    let axes = session.axes();
    for (start, end) in [axes.x_axis, axes.y_axis] {
        if let (Some(start), Some(end)) = (pixel(start), pixel(end)) {
            root.draw(&PathElement::new(vec![start, end], AXIS_COLOR.stroke_width(1)))?;
        }
    }

    // A NaN sample breaks the curve into separate runs
    let mapper = session.mapper();
    let mut run = Vec::new();
    for sample in session.curve() {
        match pixel(mapper.to_viewport(sample)) {
            Some(px) => run.push(px),
            None => flush_run(root, &mut run)?,
        }
    }
    flush_run(root, &mut run)?;

    for (point, far) in session.highlighted() {
        let Some(center) = pixel(mapper.to_viewport::<T>(point)) else {
            continue;
        };

        let color = if far { FAR_POINT_COLOR } else { POINT_COLOR };
        root.draw(&Circle::new(center, POINT_RADIUS, color.filled()))?;
    }

    Ok(())
}

fn flush_run<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    run: &mut Vec<(i32, i32)>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if run.len() > 1 {
        root.draw(&PathElement::new(std::mem::take(run), CURVE_COLOR.stroke_width(2)))?;
    }
    run.clear();
    Ok(())
}

/// Rounds a screen point to backend pixels, or `None` if it is not finite
fn pixel(p: ScreenPoint) -> Option<(i32, i32)> {
    let limit = f64::from(i32::MAX);
    if !(p.x.is_finite() && p.y.is_finite()) {
        return None;
    }

    Some((
        p.x.round().clamp(-limit, limit) as i32,
        p.y.round().clamp(-limit, limit) as i32,
    ))
}

fn frame_size<T: Value>(session: &Session<T>) -> (u32, u32) {
    let viewport = session.viewport();
    let side = |v: f64| {
        if v.is_finite() {
            v.round().clamp(1.0, f64::from(u32::MAX)) as u32
        } else {
            1
        }
    };
    (side(viewport.width), side(viewport.height))
}

/// Error occurring during rendering
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error drawing the frame
    #[error("Error drawing frame: {0}")]
    Draw(#[from] DrawingAreaErrorKind<std::io::Error>),
}
