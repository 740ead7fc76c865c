//! Domain → wire projection, the dual of [`decode`](crate::decode).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value as JsonValue};

use crate::decode::FieldPath;
use crate::error::{MapperError, Result};
use crate::schema::ApiObject;
use crate::shape::{ScalarKind, Shape};
use crate::value::{Record, Value};
use crate::WirePayload;

/// Encode a typed object into a wire payload.
///
/// With `include_nulls` unset, fields holding [`Value::Null`] are omitted.
/// Unset fields and the reject bag are never emitted.
pub fn encode<T: ApiObject>(object: &T, include_nulls: bool) -> Result<WirePayload> {
    encode_record(object.record(), include_nulls)
}

pub fn encode_record(record: &Record, include_nulls: bool) -> Result<WirePayload> {
    Encoder::new(include_nulls).record(record)
}

/// Encode a single domain value against `shape`.
pub fn encode_value(value: &Value, shape: &Shape, include_nulls: bool) -> Result<JsonValue> {
    Encoder::new(include_nulls).value(value, shape)
}

/// RFC 3339 rendering used for every timestamp sent to the server.
pub fn format_iso8601(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Integral floats go out as integers, matching JavaScript number output.
pub(crate) fn float_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        JsonValue::from(n as i64)
    } else {
        Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
    }
}

struct Encoder {
    include_nulls: bool,
    path: FieldPath,
}

impl Encoder {
    fn new(include_nulls: bool) -> Self {
        Self {
            include_nulls,
            path: FieldPath::default(),
        }
    }

    fn record(&mut self, record: &Record) -> Result<WirePayload> {
        let mut payload = WirePayload::new();

        for field in record.object_type().fields().iter() {
            let Some(value) = record.get(field.name()) else {
                continue;
            };
            if value.is_null() && !self.include_nulls {
                continue;
            }
            self.path.field(field.wire_name());
            let encoded = self.value(value, field.shape());
            self.path.pop();
            payload.insert(field.wire_name().to_owned(), encoded?);
        }

        Ok(payload)
    }

    fn value(&mut self, value: &Value, shape: &Shape) -> Result<JsonValue> {
        if value.is_null() {
            return Ok(JsonValue::Null);
        }

        match (shape, value) {
            (Shape::Optional(inner), _) => self.value(value, inner),
            (Shape::Union(alternatives), _) => match alternatives.as_slice() {
                [only] => self.value(value, only),
                _ => Err(MapperError::UnsupportedUnionShape {
                    path: self.path.to_string(),
                    alternatives: alternatives.len(),
                }),
            },
            (Shape::DateTime, Value::DateTime(instant)) => {
                Ok(JsonValue::String(format_iso8601(instant)))
            }
            (Shape::List(inner), Value::List(items)) => {
                let mut encoded = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    self.path.index(idx);
                    let item = self.value(item, inner);
                    self.path.pop();
                    encoded.push(item?);
                }
                Ok(JsonValue::Array(encoded))
            }
            (Shape::Mapping(key_shape, value_shape), Value::Map(entries)) => {
                let mut encoded = WirePayload::new();
                for (key, item) in entries {
                    let wire_key = self.key(key, key_shape)?;
                    self.path.key(&wire_key);
                    // "01" and "1" both decode to Int(1) and would collapse.
                    if encoded.contains_key(&wire_key) {
                        let err = MapperError::MalformedShape {
                            path: self.path.to_string(),
                            expected: format!("distinct keys for {shape}"),
                            found: "duplicate key".to_owned(),
                        };
                        self.path.pop();
                        return Err(err);
                    }
                    let item = self.value(item, value_shape);
                    self.path.pop();
                    encoded.insert(wire_key, item?);
                }
                Ok(JsonValue::Object(encoded))
            }
            (Shape::Nested(_), Value::Object(record)) => {
                self.record(record).map(JsonValue::Object)
            }
            (Shape::Enum(_), Value::Enum(variant)) => Ok(variant.wire().to_json()),
            (Shape::Scalar(kind), _) => self.scalar(value, *kind, shape),
            _ => Err(self.malformed(shape, value)),
        }
    }

    fn scalar(&mut self, value: &Value, kind: ScalarKind, shape: &Shape) -> Result<JsonValue> {
        match (kind, value) {
            (ScalarKind::Bool | ScalarKind::Any, Value::Bool(b)) => Ok(JsonValue::Bool(*b)),
            (ScalarKind::Int | ScalarKind::Float | ScalarKind::Any, Value::Int(n)) => {
                Ok(JsonValue::from(*n))
            }
            (ScalarKind::Float | ScalarKind::Any, Value::Float(n)) => Ok(float_to_json(*n)),
            (ScalarKind::String | ScalarKind::Any, Value::String(s)) => {
                Ok(JsonValue::String(s.clone()))
            }
            (ScalarKind::Any, Value::Raw(raw)) => Ok(raw.clone()),
            (ScalarKind::Any, Value::DateTime(instant)) => {
                Ok(JsonValue::String(format_iso8601(instant)))
            }
            (ScalarKind::Any, Value::Enum(variant)) => Ok(variant.wire().to_json()),
            (ScalarKind::Any, Value::Object(record)) => self.record(record).map(JsonValue::Object),
            (ScalarKind::Any, Value::List(items)) => items
                .iter()
                .map(|item| self.value(item, shape))
                .collect::<Result<Vec<_>>>()
                .map(JsonValue::Array),
            _ => Err(self.malformed(shape, value)),
        }
    }

    /// Wire keys must be strings; primitives are rendered in their decimal
    /// or literal form so that decoding coerces them back.
    fn key(&mut self, key: &Value, shape: &Shape) -> Result<String> {
        match self.value(key, shape)? {
            JsonValue::String(s) => Ok(s),
            JsonValue::Number(n) => Ok(n.to_string()),
            JsonValue::Bool(b) => Ok(b.to_string()),
            _ => Err(MapperError::MalformedShape {
                path: self.path.to_string(),
                expected: format!("mapping key of {shape}"),
                found: key.kind().to_owned(),
            }),
        }
    }

    fn malformed(&self, shape: &Shape, value: &Value) -> MapperError {
        MapperError::MalformedShape {
            path: self.path.to_string(),
            expected: shape.to_string(),
            found: value.kind().to_owned(),
        }
    }
}
