//! Segment fitting: boundary contours into line/Bezier path segments.
//!
//! Each contour is deduplicated, reduced with RDP within the configured
//! tolerance, and emitted either as straight line segments or — when
//! curve smoothing is enabled — as quadratic Beziers through segment
//! midpoints with the original vertices as control points. Corners are
//! thereby rounded within the fitting tolerance while the path stays
//! closed and deterministic.

use serde::{Deserialize, Serialize};

use crate::simplify::simplify;
use crate::types::{Contour, Point, TraceOptions};

/// One drawing command of a fitted path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Start a new subpath at the given point.
    MoveTo(Point),
    /// Straight line to the given point.
    LineTo(Point),
    /// Quadratic Bezier with one control point.
    QuadTo {
        /// Control point (the original corner vertex).
        control: Point,
        /// Curve endpoint.
        end: Point,
    },
    /// Close the current subpath.
    Close,
}

/// Fit a single contour into a closed segment list.
///
/// Returns an empty vector for contours that cannot enclose any area
/// after duplicate removal (fewer than 3 distinct points); such contours
/// are dropped rather than emitted as degenerate paths.
#[must_use]
pub fn fit_contour(contour: &Contour, options: &TraceOptions) -> Vec<Segment> {
    let deduped = dedupe_closed(contour.points());
    if deduped.len() < 3 {
        return Vec::new();
    }

    let reduced = simplify(&deduped, options.curve_tolerance);
    if reduced.len() < 3 {
        // Over-aggressive tolerance can collapse a contour; fall back to
        // the deduplicated points so the region still renders.
        return emit(&deduped, options.use_curves);
    }

    emit(&reduced, options.use_curves)
}

/// Fit every contour, skipping ones that collapse to nothing.
#[must_use]
pub fn fit_contours(contours: &[Contour], options: &TraceOptions) -> Vec<Vec<Segment>> {
    contours
        .iter()
        .map(|c| fit_contour(c, options))
        .filter(|segments| !segments.is_empty())
        .collect()
}

/// Remove consecutive duplicate points, including a trailing duplicate
/// of the first point (the contour is implicitly closed).
fn dedupe_closed(points: &[Point]) -> Vec<Point> {
    let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if deduped.last() != Some(&p) {
            deduped.push(p);
        }
    }
    if deduped.len() > 1 && deduped.last() == deduped.first() {
        deduped.pop();
    }
    deduped
}

/// Emit a closed path over the given vertices.
fn emit(points: &[Point], use_curves: bool) -> Vec<Segment> {
    if use_curves {
        emit_curves(points)
    } else {
        emit_lines(points)
    }
}

/// Straight-line closed path: `M p0, L p1.., Z`.
fn emit_lines(points: &[Point]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(points.len() + 1);
    segments.push(Segment::MoveTo(points[0]));
    for &p in &points[1..] {
        segments.push(Segment::LineTo(p));
    }
    segments.push(Segment::Close);
    segments
}

/// Midpoint-smoothed closed path.
///
/// Starts at the midpoint of the closing edge, then emits one quadratic
/// per vertex: the vertex is the control point and the midpoint of the
/// following edge is the endpoint. Every vertex contributes exactly one
/// curve, so the path is closed and order-stable.
fn emit_curves(points: &[Point]) -> Vec<Segment> {
    let n = points.len();
    let mut segments = Vec::with_capacity(n + 2);

    let start = points[n - 1].midpoint(points[0]);
    segments.push(Segment::MoveTo(start));

    for i in 0..n {
        let control = points[i];
        let end = points[i].midpoint(points[(i + 1) % n]);
        segments.push(Segment::QuadTo { control, end });
    }

    segments.push(Segment::Close);
    segments
}
