//! Declared structural types of record fields.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::schema::{ApiObject, TypeRef};
use crate::value::{EnumValue, Value};

/// Primitive kinds a [`Shape::Scalar`] may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
    /// Raw JSON, kept untouched for deliberately untyped sub-documents.
    Any,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Any => "any",
        }
    }
}

/// The structural type of a field.
#[derive(Debug, Clone)]
pub enum Shape {
    Scalar(ScalarKind),
    Optional(Box<Shape>),
    List(Box<Shape>),
    Mapping(Box<Shape>, Box<Shape>),
    Nested(TypeRef),
    Enum(&'static EnumType),
    DateTime,
    /// Non-null alternatives of a union. Only the single-alternative form
    /// decodes; anything broader is rejected.
    Union(Vec<Shape>),
}

impl Shape {
    pub fn bool() -> Self {
        Shape::Scalar(ScalarKind::Bool)
    }

    pub fn int() -> Self {
        Shape::Scalar(ScalarKind::Int)
    }

    pub fn float() -> Self {
        Shape::Scalar(ScalarKind::Float)
    }

    pub fn string() -> Self {
        Shape::Scalar(ScalarKind::String)
    }

    pub fn any() -> Self {
        Shape::Scalar(ScalarKind::Any)
    }

    pub fn date_time() -> Self {
        Shape::DateTime
    }

    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn list(inner: Shape) -> Self {
        Shape::List(Box::new(inner))
    }

    pub fn mapping(key: Shape, value: Shape) -> Self {
        Shape::Mapping(Box::new(key), Box::new(value))
    }

    pub fn nested<T: ApiObject>() -> Self {
        Shape::Nested(TypeRef::of::<T>())
    }

    pub fn enumeration<E: WireEnum>() -> Self {
        Shape::Enum(E::enum_type())
    }

    pub fn union(alternatives: Vec<Shape>) -> Self {
        Shape::Union(alternatives)
    }

    /// Strip any optional wrappers.
    pub fn unwrap_optional(&self) -> &Shape {
        match self {
            Shape::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(kind) => f.write_str(kind.name()),
            Shape::Optional(inner) => write!(f, "optional<{inner}>"),
            Shape::List(inner) => write!(f, "list<{inner}>"),
            Shape::Mapping(key, value) => write!(f, "mapping<{key}, {value}>"),
            Shape::Nested(ty) => write!(f, "object<{}>", ty.name()),
            Shape::Enum(ty) => write!(f, "enum<{}>", ty.name),
            Shape::DateTime => f.write_str("datetime"),
            Shape::Union(alternatives) => {
                f.write_str("union<")?;
                for (idx, alternative) in alternatives.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Primitive value an enumeration variant carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireScalar {
    Int(i64),
    Str(&'static str),
}

impl WireScalar {
    pub fn to_json(self) -> JsonValue {
        match self {
            WireScalar::Int(n) => JsonValue::from(n),
            WireScalar::Str(s) => JsonValue::from(s),
        }
    }

    fn matches(self, raw: &JsonValue) -> bool {
        match (self, raw) {
            (WireScalar::Int(n), JsonValue::Number(num)) => num.as_i64() == Some(n),
            (WireScalar::Str(s), JsonValue::String(value)) => value == s,
            _ => false,
        }
    }
}

impl fmt::Display for WireScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireScalar::Int(n) => write!(f, "{n}"),
            WireScalar::Str(s) => f.write_str(s),
        }
    }
}

/// One variant of an [`EnumType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    pub label: &'static str,
    pub wire: WireScalar,
}

/// Static description of a wire enumeration.
///
/// Declared as a `static` (usually through [`wire_enum!`](crate::wire_enum)),
/// so the variant table is fixed at compile time.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumType {
    pub name: &'static str,
    pub variants: &'static [EnumVariant],
}

impl EnumType {
    /// Variant whose wire value equals `raw`.
    pub fn variant_for(&self, raw: &JsonValue) -> Option<&'static EnumVariant> {
        self.variants.iter().find(|variant| variant.wire.matches(raw))
    }

    pub fn variant_by_label(&self, label: &str) -> Option<&'static EnumVariant> {
        self.variants.iter().find(|variant| variant.label == label)
    }

    /// True when every variant carries an integer on the wire.
    pub fn is_numeric(&self) -> bool {
        self.variants
            .iter()
            .all(|variant| matches!(variant.wire, WireScalar::Int(_)))
    }
}

/// Rust enumerations that map onto an [`EnumType`].
pub trait WireEnum: Sized + Copy + 'static {
    fn enum_type() -> &'static EnumType;

    fn from_label(label: &str) -> Option<Self>;

    fn label(self) -> &'static str;

    /// Primitive value sent on the wire for this variant.
    fn wire_value(self) -> Option<WireScalar> {
        Self::enum_type()
            .variant_by_label(self.label())
            .map(|variant| variant.wire)
    }

    fn to_value(self) -> Value {
        let enum_type = Self::enum_type();
        enum_type
            .variant_by_label(self.label())
            .map(|variant| Value::Enum(EnumValue::new(enum_type, variant)))
            .unwrap_or(Value::Null)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(ev) if std::ptr::eq(ev.enum_type(), Self::enum_type()) => {
                Self::from_label(ev.label())
            }
            _ => None,
        }
    }
}
