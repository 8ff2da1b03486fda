use crate::arg::*;
use crate::draw::*;
use crate::color::*;
use crate::catalog::*;

use itertools::*;
use smallvec::*;
use thiserror::Error;

use std::fmt;
use std::sync::*;

///
/// A drawing instruction: a catalog definition plus the values of its arguments
///
#[derive(Clone, Debug)]
pub struct Instruction {
    def:    Arc<InstructionDef>,
    values: SmallVec<[ArgValue; 8]>
}

///
/// Why a write to an instruction argument was not applied
///
#[derive(Clone, PartialEq, Debug, Error)]
pub enum RejectReason {
    /// There is no argument at the specified index
    #[error("argument {index} is out of range (instruction has {len} arguments)")]
    IndexOutOfRange { index: usize, len: usize },

    /// There is no argument with the specified name
    #[error("no argument named '{0}'")]
    UnknownArgument(String),

    /// The value is not valid for the argument's kind
    #[error("argument {index} requires a {expected} value")]
    InvalidValue { index: usize, expected: ArgKind }
}

///
/// Outcome of writing an argument value
///
/// Rejected writes leave the instruction unchanged, so it always holds the last value that was valid.
///
#[derive(Clone, PartialEq, Debug)]
pub enum ArgWrite {
    Applied,
    Rejected(RejectReason)
}

impl ArgWrite {
    /// True if the value was stored
    #[inline] pub fn is_applied(&self) -> bool { matches!(self, ArgWrite::Applied) }
}

impl Instruction {
    ///
    /// Creates an instruction from a definition, with every argument set to its default value
    ///
    pub fn new(def: Arc<InstructionDef>) -> Instruction {
        let values = def.args().iter()
            .map(|arg| arg.default_value().clone())
            .collect();

        Instruction {
            def:    def,
            values: values
        }
    }

    /// The catalog definition of this instruction
    #[inline] pub fn def(&self) -> &Arc<InstructionDef> { &self.def }

    /// The name of this instruction
    #[inline] pub fn name(&self) -> &str { self.def.name() }

    /// The identifier that this instruction is persisted as
    #[inline] pub fn id(&self) -> InstructionId { self.def.id() }

    /// The raw values of the arguments of this instruction
    #[inline] pub fn values(&self) -> &[ArgValue] { &self.values }

    ///
    /// Retrieves the raw value of the argument with the specified name
    ///
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.def.arg_index(name)
            .and_then(|idx| self.values.get(idx))
    }

    ///
    /// Stores a value in the argument at the specified index, if it is valid for that argument
    ///
    pub fn set_at(&mut self, index: usize, value: ArgValue) -> ArgWrite {
        let arg = match self.def.args().get(index) {
            Some(arg)   => arg,
            None        => return self.reject(RejectReason::IndexOutOfRange { index: index, len: self.values.len() })
        };

        if !arg.validate(&value) {
            let expected = arg.kind();
            return self.reject(RejectReason::InvalidValue { index: index, expected: expected });
        }

        self.values[index] = value;
        ArgWrite::Applied
    }

    ///
    /// Stores a value in the argument with the specified name, if it is valid for that argument
    ///
    pub fn set(&mut self, name: &str, value: ArgValue) -> ArgWrite {
        match self.def.arg_index(name) {
            Some(index) => self.set_at(index, value),
            None        => self.reject(RejectReason::UnknownArgument(name.to_string()))
        }
    }

    fn reject(&self, reason: RejectReason) -> ArgWrite {
        debug!("Ignoring write to {}: {}", self.def.name(), reason);
        ArgWrite::Rejected(reason)
    }

    ///
    /// The values of the arguments after each argument's conversion has been applied (eg, angles in radians)
    ///
    pub fn converted_args(&self) -> Vec<ArgValue> {
        self.def.args().iter()
            .zip(self.values.iter())
            .map(|(arg, value)| arg.convert(value))
            .collect()
    }

    ///
    /// Creates the drawing operation for this instruction, or `None` if its definition is not one the renderer knows
    ///
    /// Numeric arguments are stored as `f64` but drawn as `f32`: values outside the `f32` range are clamped to
    /// `f32::MIN` or `f32::MAX` so that no coordinate reaches the surface as an infinity.
    ///
    pub fn to_path_op(&self) -> Option<PathOp> {
        let kind    = self.def.kind()?;
        let args    = self.converted_args();

        let num     = |idx: usize| args.get(idx).and_then(ArgValue::as_number).unwrap_or(0.0).max(f32::MIN as f64).min(f32::MAX as f64) as f32;
        let flag    = |idx: usize| args.get(idx).and_then(ArgValue::as_bool).unwrap_or(false);
        let color   = |idx: usize| args.get(idx).and_then(ArgValue::as_str).and_then(Color::from_hex).unwrap_or_default();

        let op = match kind {
            InstructionKind::MoveTo              => PathOp::MoveTo(num(0), num(1)),
            InstructionKind::LineTo              => PathOp::LineTo(num(0), num(1)),
            InstructionKind::Arc                 => PathOp::Arc { x: num(0), y: num(1), radius: num(2), start_angle: num(3), end_angle: num(4), anticlockwise: flag(5) },
            InstructionKind::ArcTo               => PathOp::ArcTo { x1: num(0), y1: num(1), x2: num(2), y2: num(3), radius: num(4) },
            InstructionKind::BezierCurveTo       => PathOp::BezierCurveTo((num(0), num(1)), (num(2), num(3)), (num(4), num(5))),
            InstructionKind::QuadraticCurveTo    => PathOp::QuadraticCurveTo((num(0), num(1)), (num(2), num(3))),
            InstructionKind::Rect                => PathOp::Rect(num(0), num(1), num(2), num(3)),
            InstructionKind::ClosePath           => PathOp::ClosePath,
            InstructionKind::Fill                => PathOp::Fill(color(0)),
            InstructionKind::Stroke              => PathOp::Stroke(color(0), num(1)),

            InstructionKind::Ellipse             => PathOp::Ellipse {
                x:              num(0),
                y:              num(1),
                radius_x:       num(2),
                radius_y:       num(3),
                rotation:       num(4),
                start_angle:    num(5),
                end_angle:      num(6),
                anticlockwise:  flag(7)
            }
        };

        Some(op)
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Instruction) -> bool {
        self.def.id() == other.def.id()
            && self.def.name() == other.def.name()
            && self.values == other.values
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.def.name(), self.values.iter().join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::f64::consts::PI;

    fn catalog() -> InstructionCatalog {
        InstructionCatalog::standard()
    }

    #[test]
    fn new_instruction_has_defaults() {
        let arc = catalog().create_instruction("arc").unwrap();

        assert!(arc.values() == &[
            ArgValue::Number(0.0), ArgValue::Number(0.0), ArgValue::Number(0.0),
            ArgValue::Number(0.0), ArgValue::Number(0.0), ArgValue::Boolean(false)
        ]);
    }

    #[test]
    fn set_valid_value() {
        let mut move_to = catalog().create_instruction("moveTo").unwrap();

        assert!(move_to.set_at(1, 42.into()) == ArgWrite::Applied);
        assert!(move_to.values() == &[ArgValue::Number(0.0), ArgValue::Number(42.0)]);
    }

    #[test]
    fn invalid_value_keeps_last_good_value() {
        let mut fill = catalog().create_instruction("fill").unwrap();

        assert!(fill.set_at(0, "#00ff00".into()).is_applied());
        assert!(fill.set_at(0, "green".into()) == ArgWrite::Rejected(RejectReason::InvalidValue { index: 0, expected: ArgKind::Color }));
        assert!(fill.values() == &[ArgValue::Text("#00ff00".to_string())]);
    }

    #[test]
    fn out_of_range_index_is_noop() {
        let mut line_to = catalog().create_instruction("lineTo").unwrap();
        let before      = line_to.clone();

        assert!(line_to.set_at(2, 1.into()) == ArgWrite::Rejected(RejectReason::IndexOutOfRange { index: 2, len: 2 }));
        assert!(line_to == before);
    }

    #[test]
    fn set_by_name() {
        let mut stroke = catalog().create_instruction("stroke").unwrap();

        assert!(stroke.set("lineWidth", 4.into()).is_applied());
        assert!(stroke.get("lineWidth") == Some(&ArgValue::Number(4.0)));
    }

    #[test]
    fn unknown_name_is_noop() {
        let mut stroke  = catalog().create_instruction("stroke").unwrap();
        let before      = stroke.clone();

        assert!(stroke.set("width", 4.into()) == ArgWrite::Rejected(RejectReason::UnknownArgument("width".to_string())));
        assert!(stroke == before);
    }

    #[test]
    fn converted_args_are_pure() {
        let mut arc = catalog().create_instruction("arc").unwrap();
        arc.set("endAngle", 90.into());

        let first   = arc.converted_args();
        let second  = arc.converted_args();

        assert!(first == second);
        assert!(arc.get("endAngle") == Some(&ArgValue::Number(90.0)));
    }

    #[test]
    fn conversion_follows_mutation() {
        let mut arc = catalog().create_instruction("arc").unwrap();

        arc.set("startAngle", 180.into());
        let converted = arc.converted_args()[3].as_number().unwrap();
        assert!((converted - PI).abs() < 1e-12);

        arc.set("startAngle", 90.into());
        let converted = arc.converted_args()[3].as_number().unwrap();
        assert!((converted - PI/2.0).abs() < 1e-12);
    }

    #[test]
    fn ellipse_converts_all_angles() {
        let mut ellipse = catalog().create_instruction("ellipse").unwrap();
        ellipse.set("rotation", 180.into());
        ellipse.set("startAngle", 180.into());
        ellipse.set("endAngle", 360.into());
        ellipse.set("radiusX", 180.into());

        let converted = ellipse.converted_args();
        assert!(converted[2] == ArgValue::Number(180.0));
        assert!((converted[4].as_number().unwrap() - PI).abs() < 1e-12);
        assert!((converted[5].as_number().unwrap() - PI).abs() < 1e-12);
        assert!((converted[6].as_number().unwrap() - 2.0*PI).abs() < 1e-12);
    }

    #[test]
    fn fill_becomes_path_op() {
        let mut fill = catalog().create_instruction("fill").unwrap();
        fill.set("color", "#ff0000".into());

        assert!(fill.to_path_op() == Some(PathOp::Fill(Color::Rgba(1.0, 0.0, 0.0, 1.0))));
    }

    #[test]
    fn arc_becomes_path_op_in_radians() {
        let mut arc = catalog().create_instruction("arc").unwrap();
        arc.set("radius", 5.into());
        arc.set("endAngle", 180.into());
        arc.set("anticlockwise", true.into());

        match arc.to_path_op() {
            Some(PathOp::Arc { radius, start_angle, end_angle, anticlockwise, .. }) => {
                assert!(radius == 5.0);
                assert!(start_angle == 0.0);
                assert!((end_angle - std::f32::consts::PI).abs() < 1e-6);
                assert!(anticlockwise);
            }

            other => panic!("Unexpected op {:?}", other)
        }
    }

    #[test]
    fn display_instruction() {
        let mut move_to = catalog().create_instruction("moveTo").unwrap();
        move_to.set("x", 10.into());
        move_to.set("y", 2.5.into());

        assert!(move_to.to_string() == "moveTo(10, 2.5)");
    }

    #[test]
    fn huge_coordinates_are_clamped_to_f32() {
        let mut move_to = catalog().create_instruction("moveTo").unwrap();
        assert!(move_to.set("x", 1e300.into()).is_applied());
        assert!(move_to.set("y", (-1e300).into()).is_applied());

        assert!(move_to.get("x") == Some(&ArgValue::Number(1e300)));
        assert!(move_to.to_path_op() == Some(PathOp::MoveTo(f32::MAX, f32::MIN)));
    }

    #[test]
    fn huge_line_width_stays_finite() {
        let mut stroke = catalog().create_instruction("stroke").unwrap();
        stroke.set("lineWidth", 1e40.into());

        match stroke.to_path_op() {
            Some(PathOp::Stroke(_, width))  => assert!(width.is_finite() && width == f32::MAX),
            other                           => panic!("Unexpected op {:?}", other)
        }
    }

    #[test]
    fn rejected_write_explains_itself() {
        let mut move_to = catalog().create_instruction("moveTo").unwrap();

        match move_to.set("z", 1.into()) {
            ArgWrite::Rejected(reason)  => assert!(reason.to_string() == "no argument named 'z'"),
            other                       => panic!("Unexpected result {:?}", other)
        }

        let reason: &dyn std::error::Error = &RejectReason::InvalidValue { index: 0, expected: ArgKind::Number };
        assert!(reason.to_string() == "argument 0 requires a number value");
    }
}
