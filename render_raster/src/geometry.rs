//!
//! Converts the canvas arc operations into cubic bezier curves
//!

use smallvec::*;

use std::f32::consts::PI;

/// A point in authoring coordinates
pub type Point = (f32, f32);

const TAU: f32 = 2.0 * PI;

///
/// A cubic bezier section: two control points and an end point (the start point is where the previous section ended)
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CubicSection {
    pub cp1:    Point,
    pub cp2:    Point,
    pub end:    Point
}

///
/// An arc around a (possibly rotated) ellipse
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EllipseArc {
    pub center:         Point,
    pub radius_x:       f32,
    pub radius_y:       f32,
    pub rotation:       f32,
    pub start_angle:    f32,

    /// Angle swept by the arc: positive values go clockwise on screen (increasing angle), negative values anticlockwise
    pub sweep:          f32
}

///
/// How an `arcTo` operation extends the current path
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ArcToGeometry {
    /// The arc degenerates to a straight line to a point
    Line(Point),

    /// A straight line to the first tangent point followed by an arc
    Arc(EllipseArc)
}

///
/// The angle swept by a canvas arc between two angles
///
/// A difference of a whole turn or more in the requested direction draws the whole ellipse. Otherwise the
/// arc goes from the start angle to the end angle in the requested direction, covering less than a turn.
///
pub fn arc_sweep(start_angle: f32, end_angle: f32, anticlockwise: bool) -> f32 {
    if !anticlockwise {
        if end_angle - start_angle >= TAU {
            TAU
        } else {
            (end_angle - start_angle).rem_euclid(TAU)
        }
    } else {
        if start_angle - end_angle >= TAU {
            -TAU
        } else {
            -(start_angle - end_angle).rem_euclid(TAU)
        }
    }
}

impl EllipseArc {
    ///
    /// Creates the arc described by the parameters of a canvas `ellipse()` call
    ///
    pub fn new(center: Point, radius_x: f32, radius_y: f32, rotation: f32, start_angle: f32, end_angle: f32, anticlockwise: bool) -> EllipseArc {
        EllipseArc {
            center:         center,
            radius_x:       radius_x,
            radius_y:       radius_y,
            rotation:       rotation,
            start_angle:    start_angle,
            sweep:          arc_sweep(start_angle, end_angle, anticlockwise)
        }
    }

    ///
    /// Creates the arc described by the parameters of a canvas `arc()` call
    ///
    pub fn circle(center: Point, radius: f32, start_angle: f32, end_angle: f32, anticlockwise: bool) -> EllipseArc {
        Self::new(center, radius, radius, 0.0, start_angle, end_angle, anticlockwise)
    }

    ///
    /// Rotates a vector relative to the unrotated ellipse into place
    ///
    #[inline]
    fn rotate(&self, (x, y): Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        (x*cos - y*sin, x*sin + y*cos)
    }

    ///
    /// The point on the ellipse at a particular angle
    ///
    pub fn point_at(&self, angle: f32) -> Point {
        let (sin, cos)  = angle.sin_cos();
        let (x, y)      = self.rotate((self.radius_x * cos, self.radius_y * sin));

        (self.center.0 + x, self.center.1 + y)
    }

    ///
    /// The derivative of the ellipse at a particular angle
    ///
    fn tangent_at(&self, angle: f32) -> Point {
        let (sin, cos) = angle.sin_cos();
        self.rotate((-self.radius_x * sin, self.radius_y * cos))
    }

    #[inline] pub fn start_point(&self) -> Point { self.point_at(self.start_angle) }
    #[inline] pub fn end_point(&self) -> Point { self.point_at(self.start_angle + self.sweep) }

    ///
    /// Approximates this arc with cubic bezier sections, each covering at most a quarter turn
    ///
    pub fn to_cubics(&self) -> SmallVec<[CubicSection; 4]> {
        if self.sweep == 0.0 || !self.sweep.is_finite() {
            return smallvec![];
        }

        let num_sections    = (self.sweep.abs() / (PI / 2.0) - 1e-4).ceil().max(1.0) as usize;
        let step            = self.sweep / (num_sections as f32);
        let handle_length   = 4.0 / 3.0 * (step / 4.0).tan();

        (0..num_sections)
            .map(|idx| {
                let from        = self.start_angle + step * (idx as f32);
                let to          = from + step;

                let start       = self.point_at(from);
                let end         = self.point_at(to);
                let start_tan   = self.tangent_at(from);
                let end_tan     = self.tangent_at(to);

                CubicSection {
                    cp1:    (start.0 + start_tan.0 * handle_length, start.1 + start_tan.1 * handle_length),
                    cp2:    (end.0 - end_tan.0 * handle_length, end.1 - end_tan.1 * handle_length),
                    end:    end
                }
            })
            .collect()
    }
}

///
/// Works out the arc drawn by a canvas `arcTo()` from the current point `p0`
///
/// The arc has the specified radius and touches both the line from `p0` to `p1` and the line from
/// `p1` to `p2`. If the points are coincident or in a straight line, or the radius is 0, the result
/// is a line to `p1`.
///
pub fn arc_to_geometry(p0: Point, p1: Point, p2: Point, radius: f32) -> ArcToGeometry {
    let v1      = (p0.0 - p1.0, p0.1 - p1.1);
    let v2      = (p2.0 - p1.0, p2.1 - p1.1);
    let len1    = (v1.0*v1.0 + v1.1*v1.1).sqrt();
    let len2    = (v2.0*v2.0 + v2.1*v2.1).sqrt();

    if radius == 0.0 || len1 == 0.0 || len2 == 0.0 {
        return ArcToGeometry::Line(p1);
    }

    let u1      = (v1.0 / len1, v1.1 / len1);
    let u2      = (v2.0 / len2, v2.1 / len2);
    let cross   = u1.0*u2.1 - u1.1*u2.0;

    if cross.abs() < 1e-6 {
        return ArcToGeometry::Line(p1);
    }

    // Angle between the two lines where they meet at p1
    let cos_angle   = (u1.0*u2.0 + u1.1*u2.1).max(-1.0).min(1.0);
    let half_angle  = cos_angle.acos() / 2.0;

    let tangent_distance    = radius / half_angle.tan();
    let center_distance     = radius / half_angle.sin();

    let bisector        = (u1.0 + u2.0, u1.1 + u2.1);
    let bisector_len    = (bisector.0*bisector.0 + bisector.1*bisector.1).sqrt();
    let bisector        = (bisector.0 / bisector_len, bisector.1 / bisector_len);

    let center  = (p1.0 + bisector.0 * center_distance, p1.1 + bisector.1 * center_distance);
    let t1      = (p1.0 + u1.0 * tangent_distance, p1.1 + u1.1 * tangent_distance);
    let t2      = (p1.0 + u2.0 * tangent_distance, p1.1 + u2.1 * tangent_distance);

    let start_angle = (t1.1 - center.1).atan2(t1.0 - center.0);
    let end_angle   = (t2.1 - center.1).atan2(t2.0 - center.0);

    // The arc between the tangent points is always the short way round
    let mut sweep = (end_angle - start_angle).rem_euclid(TAU);
    if sweep > PI {
        sweep -= TAU;
    }

    ArcToGeometry::Arc(EllipseArc {
        center:         center,
        radius_x:       radius,
        radius_y:       radius,
        rotation:       0.0,
        start_angle:    start_angle,
        sweep:          sweep
    })
}
