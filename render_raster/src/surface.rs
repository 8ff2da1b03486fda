use crate::error::*;
use crate::geometry::*;

use flot_paths::{Color, DrawingSurface, ViewTransform};

use tiny_skia::{Pixmap, PathBuilder, Paint, Stroke, FillRule, Transform};

///
/// A section of the current path, in authoring coordinates
///
#[derive(Clone, Copy, PartialEq, Debug)]
enum PathSection {
    Move(Point),
    Line(Point),
    Quad(Point, Point),
    Cubic(Point, Point, Point),
    Close
}

///
/// A drawing surface that rasterizes paths into a pixmap
///
/// The current path is kept in authoring coordinates and converted to pixels with the view transform
/// whenever it's filled or stroked, so line widths scale along with the drawing.
///
pub struct PixmapSurface {
    /// Where the rendered pixels go
    pixmap: Pixmap,

    /// Maps authoring coordinates to pixels
    transform: Transform,

    /// The sections of the current path
    path: Vec<PathSection>,

    /// The end of the last section of the current path, if there is one
    current_point: Option<Point>,

    /// Where the current subpath started (closing a subpath returns here)
    subpath_start: Option<Point>,

    /// Width used for strokes with no usable width of their own
    line_width: f32,

    /// Line widths saved by `push_state()`
    state_stack: Vec<f32>
}

impl PixmapSurface {
    ///
    /// Creates a transparent surface of the specified size in pixels
    ///
    pub fn new(width: u32, height: u32, view: ViewTransform) -> Result<PixmapSurface, ExportError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(ExportError::InvalidSize { width, height })?;

        Ok(PixmapSurface {
            pixmap:         pixmap,
            transform:      Transform::from_row(view.scale, 0.0, 0.0, view.scale, view.offset.0, view.offset.1),
            path:           vec![],
            current_point:  None,
            subpath_start:  None,
            line_width:     1.0,
            state_stack:    vec![]
        })
    }

    /// The pixels rendered so far
    #[inline] pub fn pixmap(&self) -> &Pixmap { &self.pixmap }

    /// Finishes rendering, returning the pixels
    #[inline] pub fn into_pixmap(self) -> Pixmap { self.pixmap }

    ///
    /// Starts a subpath at a point if there isn't one already (curves and lines that start with no current point behave like a move)
    ///
    fn ensure_subpath(&mut self, point: Point) {
        if self.current_point.is_none() {
            self.move_to(point.0, point.1);
        }
    }

    ///
    /// Adds an arc to the current path, joining it to the current point with a straight line
    ///
    fn add_arc(&mut self, arc: EllipseArc) {
        let (start_x, start_y) = arc.start_point();

        if self.current_point.is_some() {
            self.line_to(start_x, start_y);
        } else {
            self.move_to(start_x, start_y);
        }

        for section in arc.to_cubics() {
            self.path.push(PathSection::Cubic(section.cp1, section.cp2, section.end));
            self.current_point = Some(section.end);
        }
    }

    ///
    /// Converts the current path to a tiny-skia path (`None` if there's nothing to draw)
    ///
    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();

        for section in self.path.iter() {
            match section {
                PathSection::Move((x, y))                           => builder.move_to(*x, *y),
                PathSection::Line((x, y))                           => builder.line_to(*x, *y),
                PathSection::Quad((x1, y1), (x, y))                 => builder.quad_to(*x1, *y1, *x, *y),
                PathSection::Cubic((x1, y1), (x2, y2), (x, y))      => builder.cubic_to(*x1, *y1, *x2, *y2, *x, *y),
                PathSection::Close                                  => builder.close()
            }
        }

        builder.finish()
    }

    fn paint_for(color: Color) -> Paint<'static> {
        let (r, g, b, a)    = color.to_rgba_u8();
        let mut paint       = Paint::default();

        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        paint
    }
}

impl DrawingSurface for PixmapSurface {
    fn push_state(&mut self) {
        self.state_stack.push(self.line_width);
    }

    fn pop_state(&mut self) {
        if let Some(line_width) = self.state_stack.pop() {
            self.line_width = line_width;
        }
    }

    fn new_path(&mut self) {
        self.path.clear();
        self.current_point  = None;
        self.subpath_start  = None;
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(PathSection::Move((x, y)));
        self.current_point  = Some((x, y));
        self.subpath_start  = Some((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        if self.current_point.is_none() {
            self.move_to(x, y);
        } else {
            self.path.push(PathSection::Line((x, y)));
            self.current_point = Some((x, y));
        }
    }

    fn quadratic_curve_to(&mut self, cp_x: f32, cp_y: f32, x: f32, y: f32) {
        self.ensure_subpath((cp_x, cp_y));

        self.path.push(PathSection::Quad((cp_x, cp_y), (x, y)));
        self.current_point = Some((x, y));
    }

    fn bezier_curve_to(&mut self, cp1_x: f32, cp1_y: f32, cp2_x: f32, cp2_y: f32, x: f32, y: f32) {
        self.ensure_subpath((cp1_x, cp1_y));

        self.path.push(PathSection::Cubic((cp1_x, cp1_y), (cp2_x, cp2_y), (x, y)));
        self.current_point = Some((x, y));
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, anticlockwise: bool) {
        if radius < 0.0 {
            debug!("Ignoring arc with negative radius {}", radius);
            return;
        }

        self.add_arc(EllipseArc::circle((x, y), radius, start_angle, end_angle, anticlockwise));
    }

    fn ellipse(&mut self, x: f32, y: f32, radius_x: f32, radius_y: f32, rotation: f32, start_angle: f32, end_angle: f32, anticlockwise: bool) {
        if radius_x < 0.0 || radius_y < 0.0 {
            debug!("Ignoring ellipse with negative radius ({}, {})", radius_x, radius_y);
            return;
        }

        self.add_arc(EllipseArc::new((x, y), radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise));
    }

    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        if radius < 0.0 {
            debug!("Ignoring arcTo with negative radius {}", radius);
            return;
        }

        let start = match self.current_point {
            Some(point) => point,
            None        => { self.move_to(x1, y1); return; }
        };

        match arc_to_geometry(start, (x1, y1), (x2, y2), radius) {
            ArcToGeometry::Line((x, y)) => self.line_to(x, y),
            ArcToGeometry::Arc(arc)     => self.add_arc(arc)
        }
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    fn close_path(&mut self) {
        if self.current_point.is_some() {
            self.path.push(PathSection::Close);
            self.current_point = self.subpath_start;
        }
    }

    fn fill(&mut self, color: Color) {
        if let Some(path) = self.build_path() {
            let paint = Self::paint_for(color);
            self.pixmap.fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }

    fn stroke(&mut self, color: Color, line_width: f32) {
        if line_width.is_finite() && line_width > 0.0 {
            self.line_width = line_width;
        } else {
            debug!("Ignoring unusable line width {}", line_width);
        }

        if let Some(path) = self.build_path() {
            let paint   = Self::paint_for(color);
            let stroke  = Stroke { width: self.line_width, ..Stroke::default() };

            self.pixmap.stroke_path(&path, &paint, &stroke, self.transform, None);
        }
    }
}
