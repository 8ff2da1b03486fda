use crate::arg::*;
use crate::instruction::*;

use std::collections::{HashMap};
use std::fmt;
use std::sync::*;

///
/// Identifier of an instruction definition
///
/// Identifiers are assigned in registration order starting at 0. They are the only thing about an
/// instruction that is persisted, so the registration order of a catalog must never change.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstructionId(pub u32);

///
/// The drawing operations that the standard catalog knows how to render
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    MoveTo,
    LineTo,
    Arc,
    ArcTo,
    BezierCurveTo,
    QuadraticCurveTo,
    Rect,
    Ellipse,
    ClosePath,
    Fill,
    Stroke
}

///
/// The catalog's description of an instruction: its name, identifier and argument schema
///
#[derive(Clone, Debug)]
pub struct InstructionDef {
    id:     InstructionId,
    name:   String,
    kind:   Option<InstructionKind>,
    args:   Vec<ArgSpec>
}

///
/// Builds an instruction catalog, assigning identifiers in registration order
///
pub struct CatalogBuilder {
    definitions: Vec<InstructionDef>
}

///
/// The immutable set of instructions known to the editor
///
/// A catalog is built once at startup and shared (usually as an `Arc<InstructionCatalog>`) by
/// everything that needs to create, validate or decode instructions.
///
#[derive(Debug)]
pub struct InstructionCatalog {
    definitions:    Vec<Arc<InstructionDef>>,
    by_name:        HashMap<String, InstructionId>
}

impl InstructionKind {
    /// Every kind, in the order the standard catalog registers them
    pub const ALL: [InstructionKind; 11] = [
        InstructionKind::MoveTo,
        InstructionKind::LineTo,
        InstructionKind::Arc,
        InstructionKind::ArcTo,
        InstructionKind::BezierCurveTo,
        InstructionKind::QuadraticCurveTo,
        InstructionKind::Rect,
        InstructionKind::Ellipse,
        InstructionKind::ClosePath,
        InstructionKind::Fill,
        InstructionKind::Stroke
    ];

    ///
    /// The name used for this kind of instruction in the catalog
    ///
    pub fn name(&self) -> &'static str {
        match self {
            InstructionKind::MoveTo              => "moveTo",
            InstructionKind::LineTo              => "lineTo",
            InstructionKind::Arc                 => "arc",
            InstructionKind::ArcTo               => "arcTo",
            InstructionKind::BezierCurveTo       => "bezierCurveTo",
            InstructionKind::QuadraticCurveTo    => "quadraticCurveTo",
            InstructionKind::Rect                => "rect",
            InstructionKind::Ellipse             => "ellipse",
            InstructionKind::ClosePath           => "closePath",
            InstructionKind::Fill                => "fill",
            InstructionKind::Stroke              => "stroke"
        }
    }

    ///
    /// Finds the kind with the specified catalog name
    ///
    pub fn from_name(name: &str) -> Option<InstructionKind> {
        Self::ALL.iter()
            .find(|kind| kind.name() == name)
            .copied()
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl InstructionDef {
    fn new(id: InstructionId, name: &str) -> InstructionDef {
        InstructionDef {
            id:     id,
            name:   name.to_string(),
            kind:   InstructionKind::from_name(name),
            args:   vec![]
        }
    }

    ///
    /// Appends an argument to this definition
    ///
    pub fn add_arg(&mut self, arg: ArgSpec) -> &mut InstructionDef {
        self.args.push(arg);
        self
    }

    /// The identifier assigned to this definition when it was registered
    #[inline] pub fn id(&self) -> InstructionId { self.id }

    /// The name of this instruction
    #[inline] pub fn name(&self) -> &str { &self.name }

    /// The drawing operation this instruction corresponds to, if it's one the renderer knows about
    #[inline] pub fn kind(&self) -> Option<InstructionKind> { self.kind }

    /// The arguments of this instruction, in order
    #[inline] pub fn args(&self) -> &[ArgSpec] { &self.args }

    ///
    /// Finds the index of the argument with the specified name
    ///
    pub fn arg_index(&self, name: &str) -> Option<usize> {
        self.args.iter().position(|arg| arg.name() == name)
    }

    ///
    /// True if a value is valid for the argument at the specified index (out of range indexes are never valid)
    ///
    pub fn validate_arg(&self, index: usize, value: &ArgValue) -> bool {
        self.args.get(index)
            .map(|arg| arg.validate(value))
            .unwrap_or(false)
    }
}

impl CatalogBuilder {
    ///
    /// Creates a builder with no instructions registered
    ///
    pub fn new() -> CatalogBuilder {
        CatalogBuilder {
            definitions: vec![]
        }
    }

    ///
    /// Registers a new instruction, assigning it the next identifier, and returns its definition so
    /// that arguments can be added to it
    ///
    /// # Panics
    ///
    /// Registering the same name twice is a configuration error and panics.
    ///
    pub fn register(&mut self, name: &str) -> &mut InstructionDef {
        if self.definitions.iter().any(|def| def.name() == name) {
            panic!("Instruction '{}' is registered more than once", name);
        }

        let idx = self.definitions.len();
        self.definitions.push(InstructionDef::new(InstructionId(idx as u32), name));

        &mut self.definitions[idx]
    }

    ///
    /// Finishes building the catalog
    ///
    pub fn build(self) -> InstructionCatalog {
        let by_name = self.definitions.iter()
            .map(|def| (def.name().to_string(), def.id()))
            .collect();

        InstructionCatalog {
            definitions:    self.definitions.into_iter().map(Arc::new).collect(),
            by_name:        by_name
        }
    }
}

impl Default for CatalogBuilder {
    fn default() -> CatalogBuilder {
        CatalogBuilder::new()
    }
}

impl InstructionCatalog {
    ///
    /// Creates a builder for a new catalog
    ///
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    ///
    /// Creates the catalog of drawing instructions supported by the editor
    ///
    /// Identifiers 0 to 10 are assigned in the order `moveTo`, `lineTo`, `arc`, `arcTo`, `bezierCurveTo`,
    /// `quadraticCurveTo`, `rect`, `ellipse`, `closePath`, `fill`, `stroke`. Angles are stored in degrees
    /// and converted to radians for rendering.
    ///
    pub fn standard() -> InstructionCatalog {
        let mut builder = CatalogBuilder::new();
        let angle       = |name: &str| ArgSpec::number(name).with_conversion(degrees_to_radians);

        builder.register("moveTo")
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"));

        builder.register("lineTo")
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"));

        builder.register("arc")
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"))
            .add_arg(ArgSpec::number("radius"))
            .add_arg(angle("startAngle"))
            .add_arg(angle("endAngle"))
            .add_arg(ArgSpec::boolean("anticlockwise"));

        builder.register("arcTo")
            .add_arg(ArgSpec::number("x1"))
            .add_arg(ArgSpec::number("y1"))
            .add_arg(ArgSpec::number("x2"))
            .add_arg(ArgSpec::number("y2"))
            .add_arg(ArgSpec::number("radius"));

        builder.register("bezierCurveTo")
            .add_arg(ArgSpec::number("cp1x"))
            .add_arg(ArgSpec::number("cp1y"))
            .add_arg(ArgSpec::number("cp2x"))
            .add_arg(ArgSpec::number("cp2y"))
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"));

        builder.register("quadraticCurveTo")
            .add_arg(ArgSpec::number("cpx"))
            .add_arg(ArgSpec::number("cpy"))
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"));

        builder.register("rect")
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"))
            .add_arg(ArgSpec::number("width"))
            .add_arg(ArgSpec::number("height"));

        builder.register("ellipse")
            .add_arg(ArgSpec::number("x"))
            .add_arg(ArgSpec::number("y"))
            .add_arg(ArgSpec::number("radiusX"))
            .add_arg(ArgSpec::number("radiusY"))
            .add_arg(angle("rotation"))
            .add_arg(angle("startAngle"))
            .add_arg(angle("endAngle"))
            .add_arg(ArgSpec::boolean("anticlockwise"));

        builder.register("closePath");

        builder.register("fill")
            .add_arg(ArgSpec::color("color"));

        builder.register("stroke")
            .add_arg(ArgSpec::color("color"))
            .add_arg(ArgSpec::number("lineWidth"));

        builder.build()
    }

    ///
    /// Retrieves the definition with the specified identifier
    ///
    #[inline]
    pub fn get_by_id(&self, id: InstructionId) -> Option<&Arc<InstructionDef>> {
        // Identifiers are dense and assigned in order, so they index the definitions directly
        self.definitions.get(id.0 as usize)
    }

    ///
    /// Retrieves the definition with the specified name
    ///
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<InstructionDef>> {
        self.by_name.get(name)
            .and_then(|id| self.get_by_id(*id))
    }

    ///
    /// Iterates over the definitions in this catalog in registration order
    ///
    pub fn iter(&self) -> impl Iterator<Item=&Arc<InstructionDef>> {
        self.definitions.iter()
    }

    /// The number of instructions in this catalog
    #[inline] pub fn len(&self) -> usize { self.definitions.len() }

    /// True if there are no instructions in this catalog
    #[inline] pub fn is_empty(&self) -> bool { self.definitions.is_empty() }

    ///
    /// True if a value is valid for an argument of an instruction (false if the instruction or argument does not exist)
    ///
    pub fn validate_arg(&self, id: InstructionId, index: usize, value: &ArgValue) -> bool {
        self.get_by_id(id)
            .map(|def| def.validate_arg(index, value))
            .unwrap_or(false)
    }

    ///
    /// Creates a new instruction with default arguments from the definition with the specified name
    ///
    pub fn create_instruction(&self, name: &str) -> Option<Instruction> {
        self.get_by_name(name)
            .map(|def| Instruction::new(Arc::clone(def)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn standard_catalog_ids() {
        let catalog = InstructionCatalog::standard();
        let names   = catalog.iter().map(|def| (def.id().0, def.name().to_string())).collect::<Vec<_>>();

        assert!(names == vec![
            (0, "moveTo".to_string()),
            (1, "lineTo".to_string()),
            (2, "arc".to_string()),
            (3, "arcTo".to_string()),
            (4, "bezierCurveTo".to_string()),
            (5, "quadraticCurveTo".to_string()),
            (6, "rect".to_string()),
            (7, "ellipse".to_string()),
            (8, "closePath".to_string()),
            (9, "fill".to_string()),
            (10, "stroke".to_string()),
        ]);
    }

    #[test]
    fn standard_catalog_kinds() {
        let catalog = InstructionCatalog::standard();
        let kinds   = catalog.iter().map(|def| def.kind()).collect::<Vec<_>>();

        assert!(kinds == InstructionKind::ALL.iter().map(|kind| Some(*kind)).collect::<Vec<_>>());
    }

    #[test]
    fn argument_counts() {
        let catalog = InstructionCatalog::standard();
        let counts  = catalog.iter().map(|def| def.args().len()).collect::<Vec<_>>();

        assert!(counts == vec![2, 2, 6, 5, 6, 4, 4, 8, 0, 1, 2]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = InstructionCatalog::standard();

        assert!(catalog.get_by_id(InstructionId(11)).is_none());
        assert!(catalog.get_by_id(InstructionId(u32::MAX)).is_none());
    }

    #[test]
    fn lookup_by_name() {
        let catalog = InstructionCatalog::standard();

        assert!(catalog.get_by_name("ellipse").map(|def| def.id()) == Some(InstructionId(7)));
        assert!(catalog.get_by_name("globalAlpha").is_none());
    }

    #[test]
    fn validate_dispatches_to_kind() {
        let catalog = InstructionCatalog::standard();
        let stroke  = InstructionId(10);

        assert!(catalog.validate_arg(stroke, 0, &"#abcdef".into()));
        assert!(!catalog.validate_arg(stroke, 0, &ArgValue::Number(1.0)));
        assert!(catalog.validate_arg(stroke, 1, &ArgValue::Number(1.0)));
        assert!(!catalog.validate_arg(stroke, 2, &ArgValue::Number(1.0)));
        assert!(!catalog.validate_arg(InstructionId(42), 0, &ArgValue::Number(1.0)));
    }

    #[test]
    fn custom_instructions_have_no_kind() {
        let mut builder = InstructionCatalog::builder();
        builder.register("moveTo").add_arg(ArgSpec::number("x")).add_arg(ArgSpec::number("y"));
        builder.register("variable").add_arg(ArgSpec::number("value"));
        let catalog = builder.build();

        assert!(catalog.get_by_name("moveTo").and_then(|def| def.kind()) == Some(InstructionKind::MoveTo));
        assert!(catalog.get_by_name("variable").map(|def| def.kind()) == Some(None));
        assert!(catalog.get_by_name("variable").map(|def| def.id()) == Some(InstructionId(1)));
    }

    #[test]
    #[should_panic]
    fn duplicate_names_are_rejected() {
        let mut builder = InstructionCatalog::builder();
        builder.register("fill");
        builder.register("fill");
    }
}
