use crate::draw::*;
use crate::color::*;
use crate::path::*;

///
/// A drawing surface provides the primitive operations that paths are replayed against
///
/// The methods follow the semantics of an HTML canvas 2D context: coordinates are in authoring space,
/// angles are in radians and `fill`/`stroke` render the whole of the current path.
///
pub trait DrawingSurface {
    fn push_state(&mut self);
    fn pop_state(&mut self);
    fn new_path(&mut self);

    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, anticlockwise: bool);
    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32);
    fn bezier_curve_to(&mut self, cp1_x: f32, cp1_y: f32, cp2_x: f32, cp2_y: f32, x: f32, y: f32);
    fn quadratic_curve_to(&mut self, cp_x: f32, cp_y: f32, x: f32, y: f32);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn ellipse(&mut self, x: f32, y: f32, radius_x: f32, radius_y: f32, rotation: f32, start_angle: f32, end_angle: f32, anticlockwise: bool);
    fn close_path(&mut self);
    fn fill(&mut self, color: Color);
    fn stroke(&mut self, color: Color, line_width: f32);

    ///
    /// Performs a single path operation on this surface
    ///
    fn draw(&mut self, op: PathOp) {
        use self::PathOp::*;

        match op {
            MoveTo(x, y)                                                    => self.move_to(x, y),
            LineTo(x, y)                                                    => self.line_to(x, y),
            Arc { x, y, radius, start_angle, end_angle, anticlockwise }     => self.arc(x, y, radius, start_angle, end_angle, anticlockwise),
            ArcTo { x1, y1, x2, y2, radius }                                => self.arc_to(x1, y1, x2, y2, radius),
            BezierCurveTo((cp1_x, cp1_y), (cp2_x, cp2_y), (x, y))           => self.bezier_curve_to(cp1_x, cp1_y, cp2_x, cp2_y, x, y),
            QuadraticCurveTo((cp_x, cp_y), (x, y))                          => self.quadratic_curve_to(cp_x, cp_y, x, y),
            Rect(x, y, width, height)                                       => self.rect(x, y, width, height),
            ClosePath                                                       => self.close_path(),
            Fill(color)                                                     => self.fill(color),
            Stroke(color, line_width)                                       => self.stroke(color, line_width),

            Ellipse { x, y, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise }
                => self.ellipse(x, y, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise)
        }
    }
}

///
/// A vector of `Draw` instructions records everything that is replayed against it
///
impl DrawingSurface for Vec<Draw> {
    #[inline] fn push_state(&mut self)                                                  { self.push(Draw::PushState); }
    #[inline] fn pop_state(&mut self)                                                   { self.push(Draw::PopState); }
    #[inline] fn new_path(&mut self)                                                    { self.push(Draw::NewPath); }
    #[inline] fn move_to(&mut self, x: f32, y: f32)                                     { self.push(Draw::Path(PathOp::MoveTo(x, y))); }
    #[inline] fn line_to(&mut self, x: f32, y: f32)                                     { self.push(Draw::Path(PathOp::LineTo(x, y))); }
    #[inline] fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32)     { self.push(Draw::Path(PathOp::ArcTo { x1, y1, x2, y2, radius })); }
    #[inline] fn quadratic_curve_to(&mut self, cp_x: f32, cp_y: f32, x: f32, y: f32)    { self.push(Draw::Path(PathOp::QuadraticCurveTo((cp_x, cp_y), (x, y)))); }
    #[inline] fn rect(&mut self, x: f32, y: f32, width: f32, height: f32)               { self.push(Draw::Path(PathOp::Rect(x, y, width, height))); }
    #[inline] fn close_path(&mut self)                                                  { self.push(Draw::Path(PathOp::ClosePath)); }
    #[inline] fn fill(&mut self, color: Color)                                          { self.push(Draw::Path(PathOp::Fill(color))); }
    #[inline] fn stroke(&mut self, color: Color, line_width: f32)                       { self.push(Draw::Path(PathOp::Stroke(color, line_width))); }

    #[inline]
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, anticlockwise: bool) {
        self.push(Draw::Path(PathOp::Arc { x, y, radius, start_angle, end_angle, anticlockwise }));
    }

    #[inline]
    fn bezier_curve_to(&mut self, cp1_x: f32, cp1_y: f32, cp2_x: f32, cp2_y: f32, x: f32, y: f32) {
        self.push(Draw::Path(PathOp::BezierCurveTo((cp1_x, cp1_y), (cp2_x, cp2_y), (x, y))));
    }

    #[inline]
    fn ellipse(&mut self, x: f32, y: f32, radius_x: f32, radius_y: f32, rotation: f32, start_angle: f32, end_angle: f32, anticlockwise: bool) {
        self.push(Draw::Path(PathOp::Ellipse { x, y, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise }));
    }
}

///
/// Replays the instructions of a path against a drawing surface, in order
///
/// The path is drawn inside its own saved state and starts with an empty current path, so nothing
/// it does carries over into the next path. Instructions without a drawing operation are skipped.
///
pub fn replay<TSurface>(path: &Path, surface: &mut TSurface)
where
    TSurface: DrawingSurface + ?Sized,
{
    trace!("Replaying path {} ({} instructions)", path.id(), path.len());

    surface.push_state();
    surface.new_path();

    for instruction in path.instructions() {
        if let Some(op) = instruction.to_path_op() {
            surface.draw(op);
        }
    }

    surface.pop_state();
}
