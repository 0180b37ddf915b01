// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, CubicBez, ParamCurve, PathSeg, Point, QuadBez, Rect};

/// Magnitude below which a denominator is considered zero.
pub const EPSILON: f64 = 1e-9;

fn axis(p: Point, x: bool) -> f64 {
    if x { p.x } else { p.y }
}

/// Bounds of the quadratic Bezier `p1`, `c`, `p2`.
#[must_use]
pub fn quad_bounds(p1: Point, c: Point, p2: Point) -> Rect {
    let curve = QuadBez::new(p1, c, p2);
    let mut bounds = Rect::from_points(p1, p2);
    for x in [true, false] {
        let (a, b, d) = (axis(p1, x), axis(c, x), axis(p2, x));
        let denom = a - 2.0 * b + d;
        if denom.abs() < EPSILON {
            continue;
        }
        let t = (a - b) / denom;
        if t > 0.0 && t < 1.0 {
            bounds = bounds.union_pt(curve.eval(t));
        }
    }
    bounds
}

fn strictly_monotonic(a: f64, b: f64, c: f64, d: f64) -> bool {
    (a < b && b < c && c < d) || (a > b && b > c && c > d)
}

/// Bounds of the cubic Bezier `p1`, `c1`, `c2`, `p2`.
///
/// An axis whose four coordinates are strictly monotonic cannot have an
/// interior extremum and contributes only its end points.
#[must_use]
pub fn cubic_bounds(p1: Point, c1: Point, c2: Point, p2: Point) -> Rect {
    let curve = CubicBez::new(p1, c1, c2, p2);
    let mut bounds = Rect::from_points(p1, p2);
    for x in [true, false] {
        let (a, b, c, d) = (axis(p1, x), axis(c1, x), axis(c2, x), axis(p2, x));
        if strictly_monotonic(a, b, c, d) {
            continue;
        }
        // B'(t) / 3 = qa t^2 + qb t + qc
        let qa = -a + 3.0 * b - 3.0 * c + d;
        let qb = 2.0 * (a - 2.0 * b + c);
        let qc = b - a;
        let mut roots = [f64::NAN; 2];
        if qa.abs() < EPSILON {
            if qb.abs() >= EPSILON {
                roots[0] = -qc / qb;
            }
        } else {
            let disc = qb * qb - 4.0 * qa * qc;
            if disc >= 0.0 {
                let s = disc.sqrt();
                roots = [(-qb + s) / (2.0 * qa), (-qb - s) / (2.0 * qa)];
            }
        }
        for t in roots {
            // NaN fails both comparisons.
            if t > 0.0 && t < 1.0 {
                bounds = bounds.union_pt(curve.eval(t));
            }
        }
    }
    bounds
}

/// Union of the bounds of every segment of `path`; `None` if it has none.
#[must_use]
pub fn path_bounds(path: &BezPath) -> Option<Rect> {
    path.segments()
        .map(|seg| match seg {
            PathSeg::Line(l) => Rect::from_points(l.p0, l.p1),
            PathSeg::Quad(q) => quad_bounds(q.p0, q.p1, q.p2),
            PathSeg::Cubic(c) => cubic_bounds(c.p0, c.p1, c.p2, c.p3),
        })
        .reduce(|a, b| a.union(b))
}
