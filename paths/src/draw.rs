//!
//! Operations that can be replayed against a drawing surface
//!

use crate::color::*;

///
/// A drawing operation, with one case for each instruction in the standard catalog
///
/// Coordinates are in the editor's authoring space and angles are in radians (the conversion from
/// the stored degrees has already been applied).
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum PathOp {
    /// Begins a new subpath at a point
    MoveTo(f32, f32),

    /// Line from the current point
    LineTo(f32, f32),

    /// Circular arc: centre, radius, start angle, end angle, anticlockwise
    Arc { x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, anticlockwise: bool },

    /// Arc tangent to the lines from the current point to (x1, y1) and from (x1, y1) to (x2, y2)
    ArcTo { x1: f32, y1: f32, x2: f32, y2: f32, radius: f32 },

    /// Cubic bezier curve: two control points then the end point
    BezierCurveTo((f32, f32), (f32, f32), (f32, f32)),

    /// Quadratic curve: a control point then the end point
    QuadraticCurveTo((f32, f32), (f32, f32)),

    /// Closed rectangular subpath: x, y, width, height
    Rect(f32, f32, f32, f32),

    /// Elliptical arc
    Ellipse { x: f32, y: f32, radius_x: f32, radius_y: f32, rotation: f32, start_angle: f32, end_angle: f32, anticlockwise: bool },

    /// Closes the current subpath
    ClosePath,

    /// Fills the current path with a colour
    Fill(Color),

    /// Strokes the current path with a colour and a line width
    Stroke(Color, f32)
}

///
/// Instructions sent to a drawing surface while a path is replayed
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Draw {
    /// Saves the drawing state (line width, colours) so the path cannot affect the paths after it
    PushState,

    /// Restores the state saved by the last `PushState`
    PopState,

    /// Discards the current path
    NewPath,

    /// Performs an operation from a path
    Path(PathOp)
}

impl From<PathOp> for Draw {
    #[inline]
    fn from(op: PathOp) -> Draw {
        Draw::Path(op)
    }
}
