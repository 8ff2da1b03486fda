use serde::{Serialize, Serializer};

use std::fmt;

/// Largest integer that survives a round trip through an f64 (and a JSON number) unchanged
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

///
/// A raw argument value, as stored in an instruction or in the flat encoding of a path
///
/// `Null` is never produced by the editor itself: it stands in for a value that was missing or
/// unreadable in persisted data, and it never satisfies a validator.
///
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    Null
}

///
/// The semantic type of an argument
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ArgKind {
    /// Any finite number
    Number,

    /// `true` or `false`
    Boolean,

    /// A colour stored as a `#RRGGBB` string
    Color
}

///
/// Converts a raw stored value into the value used for rendering
///
pub type ArgConversion = fn(&ArgValue) -> ArgValue;

///
/// Definition of a single argument of an instruction: its name, type, default value and the
/// conversion applied when producing values for rendering
///
#[derive(Clone)]
pub struct ArgSpec {
    name:       String,
    kind:       ArgKind,
    default:    ArgValue,
    conversion: ArgConversion
}

impl ArgValue {
    ///
    /// Returns the number stored in this value, if it is a number
    ///
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Number(num)   => Some(*num),
            _                       => None
        }
    }

    ///
    /// Returns the boolean stored in this value, if it is a boolean
    ///
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Boolean(val)  => Some(*val),
            _                       => None
        }
    }

    ///
    /// Returns the text stored in this value, if it is a string
    ///
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Text(text)    => Some(text),
            _                       => None
        }
    }
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArgValue::Boolean(val)  => serializer.serialize_bool(*val),
            ArgValue::Text(text)    => serializer.serialize_str(text),
            ArgValue::Null          => serializer.serialize_unit(),

            // Whole numbers are written as integers so ids and coordinates stay compact in the stored data
            ArgValue::Number(num)   => {
                if num.fract() == 0.0 && num.abs() <= MAX_EXACT_INTEGER {
                    serializer.serialize_i64(*num as i64)
                } else {
                    serializer.serialize_f64(*num)
                }
            }
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgValue::Boolean(val)  => write!(f, "{}", val),
            ArgValue::Number(num)   => write!(f, "{}", num),
            ArgValue::Text(text)    => write!(f, "{:?}", text),
            ArgValue::Null          => write!(f, "null")
        }
    }
}

impl From<f64> for ArgValue {
    #[inline] fn from(num: f64) -> ArgValue { ArgValue::Number(num) }
}

impl From<f32> for ArgValue {
    #[inline] fn from(num: f32) -> ArgValue { ArgValue::Number(num as f64) }
}

impl From<i32> for ArgValue {
    #[inline] fn from(num: i32) -> ArgValue { ArgValue::Number(num as f64) }
}

impl From<u32> for ArgValue {
    #[inline] fn from(num: u32) -> ArgValue { ArgValue::Number(num as f64) }
}

impl From<bool> for ArgValue {
    #[inline] fn from(val: bool) -> ArgValue { ArgValue::Boolean(val) }
}

impl<'a> From<&'a str> for ArgValue {
    #[inline] fn from(text: &'a str) -> ArgValue { ArgValue::Text(text.to_string()) }
}

impl From<String> for ArgValue {
    #[inline] fn from(text: String) -> ArgValue { ArgValue::Text(text) }
}

///
/// True if a string is a colour of the form `#RRGGBB`
///
pub fn is_hex_color(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 7
        && bytes[0] == b'#'
        && bytes[1..].iter().all(|byte| byte.is_ascii_hexdigit())
}

impl ArgKind {
    ///
    /// Returns true if a value is acceptable for an argument of this kind
    ///
    pub fn validate(&self, value: &ArgValue) -> bool {
        match (self, value) {
            (ArgKind::Number, ArgValue::Number(num))    => num.is_finite(),
            (ArgKind::Boolean, ArgValue::Boolean(_))    => true,
            (ArgKind::Color, ArgValue::Text(text))      => is_hex_color(text),
            _                                           => false
        }
    }

    ///
    /// The default value for an argument of this kind when no explicit default is supplied
    ///
    pub fn zero_value(&self) -> ArgValue {
        match self {
            ArgKind::Number     => ArgValue::Number(0.0),
            ArgKind::Boolean    => ArgValue::Boolean(false),
            ArgKind::Color      => ArgValue::Text("#000000".to_string())
        }
    }

    ///
    /// Name of this kind as shown in error messages
    ///
    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Number     => "number",
            ArgKind::Boolean    => "boolean",
            ArgKind::Color      => "color"
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// The identity conversion
///
fn unconverted(value: &ArgValue) -> ArgValue {
    value.clone()
}

///
/// Converts an angle stored in degrees to radians (non-numeric values are passed through)
///
pub fn degrees_to_radians(value: &ArgValue) -> ArgValue {
    match value {
        ArgValue::Number(degrees)   => ArgValue::Number(degrees.to_radians()),
        other                       => other.clone()
    }
}

impl ArgSpec {
    ///
    /// Creates an argument of the specified kind, defaulting to that kind's zero value
    ///
    pub fn new(name: &str, kind: ArgKind) -> ArgSpec {
        ArgSpec {
            name:       name.to_string(),
            kind:       kind,
            default:    kind.zero_value(),
            conversion: unconverted
        }
    }

    #[inline] pub fn number(name: &str) -> ArgSpec  { Self::new(name, ArgKind::Number) }
    #[inline] pub fn boolean(name: &str) -> ArgSpec { Self::new(name, ArgKind::Boolean) }
    #[inline] pub fn color(name: &str) -> ArgSpec   { Self::new(name, ArgKind::Color) }

    ///
    /// Sets the default value for this argument
    ///
    /// A default that does not satisfy the argument's kind is ignored and the zero value is kept,
    /// so a default can always be written back into an instruction.
    ///
    pub fn with_default<TValue: Into<ArgValue>>(mut self, default: TValue) -> ArgSpec {
        let default = default.into();

        if self.kind.validate(&default) {
            self.default = default;
        } else {
            warn!("Ignoring default value {} for {} argument '{}'", default, self.kind, self.name);
        }

        self
    }

    ///
    /// Sets the conversion applied to this argument's value before rendering
    ///
    pub fn with_conversion(mut self, conversion: ArgConversion) -> ArgSpec {
        self.conversion = conversion;
        self
    }

    /// The name of this argument
    #[inline] pub fn name(&self) -> &str { &self.name }

    /// The semantic type of this argument
    #[inline] pub fn kind(&self) -> ArgKind { self.kind }

    /// The value an instruction starts with, and the value substituted for invalid decoded data
    #[inline] pub fn default_value(&self) -> &ArgValue { &self.default }

    ///
    /// True if a value may be stored in this argument
    ///
    #[inline]
    pub fn validate(&self, value: &ArgValue) -> bool {
        self.kind.validate(value)
    }

    ///
    /// Converts a stored value to the value used while rendering
    ///
    #[inline]
    pub fn convert(&self, value: &ArgValue) -> ArgValue {
        (self.conversion)(value)
    }
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ArgSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::f64::consts::PI;

    #[test]
    fn numbers_must_be_finite() {
        assert!(ArgKind::Number.validate(&ArgValue::Number(12.5)));
        assert!(!ArgKind::Number.validate(&ArgValue::Number(f64::NAN)));
        assert!(!ArgKind::Number.validate(&ArgValue::Number(f64::INFINITY)));
        assert!(!ArgKind::Number.validate(&ArgValue::Boolean(true)));
    }

    #[test]
    fn colors_are_six_hex_digits() {
        assert!(ArgKind::Color.validate(&"#ff00AA".into()));
        assert!(!ArgKind::Color.validate(&"#ff00A".into()));
        assert!(!ArgKind::Color.validate(&"ff00AAA".into()));
        assert!(!ArgKind::Color.validate(&"#gg0000".into()));
        assert!(!ArgKind::Color.validate(&"red".into()));
        assert!(!ArgKind::Color.validate(&ArgValue::Number(0.0)));
    }

    #[test]
    fn null_never_validates() {
        assert!(!ArgKind::Number.validate(&ArgValue::Null));
        assert!(!ArgKind::Boolean.validate(&ArgValue::Null));
        assert!(!ArgKind::Color.validate(&ArgValue::Null));
    }

    #[test]
    fn zero_values_match_kind() {
        assert!(ArgSpec::number("x").default_value() == &ArgValue::Number(0.0));
        assert!(ArgSpec::boolean("anticlockwise").default_value() == &ArgValue::Boolean(false));
        assert!(ArgSpec::color("color").default_value() == &ArgValue::Text("#000000".to_string()));
    }

    #[test]
    fn invalid_default_is_ignored() {
        let spec = ArgSpec::color("color").with_default(12);
        assert!(spec.default_value() == &ArgValue::Text("#000000".to_string()));

        let spec = ArgSpec::color("color").with_default("#123456");
        assert!(spec.default_value() == &ArgValue::Text("#123456".to_string()));
    }

    #[test]
    fn conversion_is_identity_by_default() {
        let spec = ArgSpec::number("x");
        assert!(spec.convert(&ArgValue::Number(180.0)) == ArgValue::Number(180.0));
    }

    #[test]
    fn degrees_convert_to_radians() {
        let spec        = ArgSpec::number("startAngle").with_conversion(degrees_to_radians);
        let converted   = spec.convert(&ArgValue::Number(180.0)).as_number().unwrap();

        assert!((converted - PI).abs() < 1e-12);
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        let values  = vec![ArgValue::Number(0.0), ArgValue::Number(2.5), ArgValue::Boolean(true), ArgValue::Text("#ff0000".to_string()), ArgValue::Null];
        let json    = serde_json::to_string(&values).unwrap();

        assert!(json == "[0,2.5,true,\"#ff0000\",null]");
    }

    #[test]
    fn deserialize_mixed_values() {
        let values: Vec<ArgValue> = serde_json::from_str("[3, -1.5, false, \"#00ff00\", null]").unwrap();

        assert!(values == vec![ArgValue::Number(3.0), ArgValue::Number(-1.5), ArgValue::Boolean(false), ArgValue::Text("#00ff00".to_string()), ArgValue::Null]);
    }
}
