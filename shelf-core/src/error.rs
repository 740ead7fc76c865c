use thiserror::Error;

/// Errors raised while mapping between wire payloads and records.
///
/// Every variant that originates in a payload carries the path of the
/// offending value (for example `libraries[2].folders[0].fullPath`) so that
/// drift between this client and the server's API version can be traced to
/// a single field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// The runtime JSON type cannot satisfy the declared shape.
    #[error("malformed value at {path}: expected {expected}, found {found}")]
    MalformedShape {
        path: String,
        expected: String,
        found: String,
    },

    /// A union with more than one non-null alternative was requested.
    #[error(
        "unsupported union at {path}: {alternatives} non-null alternatives (only the optional form is supported)"
    )]
    UnsupportedUnionShape { path: String, alternatives: usize },

    /// An enumeration received a value none of its variants carry.
    #[error("unknown {enum_name} variant at {path}: {value}")]
    UnknownVariant {
        path: String,
        enum_name: &'static str,
        value: String,
    },

    /// A timestamp was out of range or could not be parsed.
    #[error("invalid timestamp at {path}: {value}")]
    InvalidDateTime { path: String, value: String },

    /// A record was asked to hold a field its type never declared.
    #[error("{type_name} has no field named '{field}'")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// Top-level decode input was not a JSON object.
    #[error("expected a JSON object for {type_name}, found {found}")]
    NotAnObject {
        type_name: &'static str,
        found: &'static str,
    },
}

impl MapperError {
    /// Path of the offending value, when the error came from a payload.
    pub fn path(&self) -> Option<&str> {
        match self {
            MapperError::MalformedShape { path, .. }
            | MapperError::UnsupportedUnionShape { path, .. }
            | MapperError::UnknownVariant { path, .. }
            | MapperError::InvalidDateTime { path, .. } => Some(path),
            MapperError::UnknownField { .. } | MapperError::NotAnObject { .. } => {
                None
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MapperError>;

/// Name of a JSON value's runtime type, used in diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(n) if n.is_f64() => "float",
        serde_json::Value::Number(_) => "integer",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
