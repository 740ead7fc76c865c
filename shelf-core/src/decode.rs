//! Wire → domain coercion.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value as JsonValue;

use crate::error::{MapperError, Result, json_kind};
use crate::schema::{ApiObject, ObjectType};
use crate::shape::{ScalarKind, Shape};
use crate::value::{EnumValue, Record, Value};
use crate::WirePayload;

/// Decode a wire payload into a typed object.
pub fn decode<T: ApiObject>(payload: &JsonValue) -> Result<T> {
    decode_object(payload, T::object_type()).map(T::from_record)
}

/// Decode a JSON array of payloads into typed objects.
///
/// Every element must be an object; a `null` element or a payload that is
/// not an array is a [`MapperError::MalformedShape`].
pub fn decode_list<T: ApiObject>(payload: &JsonValue) -> Result<Vec<T>> {
    let mut decoder = Decoder::default();
    let JsonValue::Array(items) = payload else {
        return Err(decoder.malformed(&Shape::list(Shape::nested::<T>()), payload));
    };

    let element = Shape::nested::<T>();
    let mut decoded = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        decoder.path.index(idx);
        let record = match item {
            JsonValue::Object(map) => decoder.object(map, T::object_type()),
            other => Err(decoder.malformed(&element, other)),
        };
        decoder.path.pop();
        decoded.push(T::from_record(record?));
    }
    Ok(decoded)
}

/// Decode a wire payload into a record of `object_type`.
pub fn decode_object(
    payload: &JsonValue,
    object_type: &'static ObjectType,
) -> Result<Record> {
    let JsonValue::Object(map) = payload else {
        return Err(MapperError::NotAnObject {
            type_name: object_type.name(),
            found: json_kind(payload),
        });
    };
    Decoder::default().object(map, object_type)
}

/// Decode a single wire value against `shape`.
pub fn decode_value(raw: &JsonValue, shape: &Shape) -> Result<Value> {
    Decoder::default().value(raw, shape)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339, a numeric offset without a colon (`+0000`), an
/// offset-less date-time (read as UTC) and a bare date (UTC midnight).
pub fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Location of the value being decoded, rendered as `a.b[2].c`.
#[derive(Debug, Default)]
pub(crate) struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub(crate) fn field(&mut self, name: &str) {
        self.0.push(Segment::Field(name.to_owned()));
    }

    pub(crate) fn index(&mut self, idx: usize) {
        self.0.push(Segment::Index(idx));
    }

    pub(crate) fn key(&mut self, key: &str) {
        self.0.push(Segment::Key(key.to_owned()));
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (idx, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if idx == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(i) => write!(f, "[{i}]")?,
                Segment::Key(key) => write!(f, "[\"{key}\"]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Decoder {
    path: FieldPath,
}

impl Decoder {
    fn value(&mut self, raw: &JsonValue, shape: &Shape) -> Result<Value> {
        if raw.is_null() {
            return Ok(Value::Null);
        }

        match shape {
            Shape::Optional(inner) => self.value(raw, inner),
            Shape::Union(alternatives) => match alternatives.as_slice() {
                [only] => self.value(raw, only),
                _ => Err(MapperError::UnsupportedUnionShape {
                    path: self.path.to_string(),
                    alternatives: alternatives.len(),
                }),
            },
            Shape::DateTime => self.date_time(raw),
            Shape::List(inner) => {
                let JsonValue::Array(items) = raw else {
                    return Err(self.malformed(shape, raw));
                };
                let mut decoded = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    self.path.index(idx);
                    let value = self.value(item, inner);
                    self.path.pop();
                    decoded.push(value?);
                }
                Ok(Value::List(decoded))
            }
            Shape::Mapping(key_shape, value_shape) => {
                let JsonValue::Object(map) = raw else {
                    return Err(self.malformed(shape, raw));
                };
                let mut entries = Vec::with_capacity(map.len());
                for (key, item) in map {
                    self.path.key(key);
                    let entry = self
                        .key(key, key_shape)
                        .and_then(|k| Ok((k, self.value(item, value_shape)?)));
                    self.path.pop();
                    entries.push(entry?);
                }
                Ok(Value::Map(entries))
            }
            Shape::Nested(ty) => {
                let JsonValue::Object(map) = raw else {
                    return Err(self.malformed(shape, raw));
                };
                self.object(map, ty.get()).map(Value::Object)
            }
            Shape::Enum(enum_type) => match enum_type.variant_for(raw) {
                Some(variant) => Ok(Value::Enum(EnumValue::new(*enum_type, variant))),
                None if matches!(raw, JsonValue::String(_) | JsonValue::Number(_)) => {
                    Err(MapperError::UnknownVariant {
                        path: self.path.to_string(),
                        enum_name: enum_type.name,
                        value: raw.to_string(),
                    })
                }
                None => Err(self.malformed(shape, raw)),
            },
            Shape::Scalar(kind) => self.scalar(raw, *kind, shape),
        }
    }

    fn object(
        &mut self,
        map: &WirePayload,
        object_type: &'static ObjectType,
    ) -> Result<Record> {
        let table = object_type.fields();
        let mut record = Record::new(object_type);

        for field in table.iter() {
            let Some(raw) = map.get(field.wire_name()) else {
                continue;
            };
            self.path.field(field.wire_name());
            let value = self.value(raw, field.shape());
            self.path.pop();
            record.insert(field.name(), value?);
        }

        for (key, raw) in map {
            if table.by_wire_name(key).is_none() {
                record.reject(key.clone(), raw.clone());
            }
        }

        Ok(record)
    }

    /// Mapping keys always arrive as strings; coerce them for key shapes
    /// that expect another primitive before decoding.
    fn key(&mut self, key: &str, shape: &Shape) -> Result<Value> {
        let raw = match shape.unwrap_optional() {
            Shape::Scalar(ScalarKind::Int) => key
                .parse::<i64>()
                .map(JsonValue::from)
                .unwrap_or_else(|_| JsonValue::from(key)),
            Shape::Scalar(ScalarKind::Float) => key
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::from(key)),
            Shape::Scalar(ScalarKind::Bool) => key
                .parse::<bool>()
                .map(JsonValue::from)
                .unwrap_or_else(|_| JsonValue::from(key)),
            Shape::Enum(enum_type) if enum_type.is_numeric() => key
                .parse::<i64>()
                .map(JsonValue::from)
                .unwrap_or_else(|_| JsonValue::from(key)),
            _ => JsonValue::from(key),
        };
        self.value(&raw, shape)
    }

    fn date_time(&self, raw: &JsonValue) -> Result<Value> {
        match raw {
            JsonValue::Number(number) => {
                let Some(millis) = number.as_i64() else {
                    return Err(self.malformed(&Shape::DateTime, raw));
                };
                if millis == 0 {
                    return Ok(Value::Null);
                }
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .map(Value::DateTime)
                    .ok_or_else(|| self.invalid_date_time(raw))
            }
            JsonValue::String(text) if text.is_empty() => Ok(Value::Null),
            JsonValue::String(text) => parse_iso8601(text)
                .map(Value::DateTime)
                .ok_or_else(|| self.invalid_date_time(raw)),
            _ => Err(self.malformed(&Shape::DateTime, raw)),
        }
    }

    fn scalar(&self, raw: &JsonValue, kind: ScalarKind, shape: &Shape) -> Result<Value> {
        let value = match (kind, raw) {
            (ScalarKind::Any, _) => Some(Value::Raw(raw.clone())),
            (ScalarKind::Bool, JsonValue::Bool(b)) => Some(Value::Bool(*b)),
            (ScalarKind::Int, JsonValue::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| f as i64)
            })
            .map(Value::Int),
            (ScalarKind::Float, JsonValue::Number(n)) => n.as_f64().map(Value::Float),
            (ScalarKind::String, JsonValue::String(s)) => Some(Value::String(s.clone())),
            _ => None,
        };
        value.ok_or_else(|| self.malformed(shape, raw))
    }

    fn malformed(&self, shape: &Shape, raw: &JsonValue) -> MapperError {
        MapperError::MalformedShape {
            path: self.path.to_string(),
            expected: shape.to_string(),
            found: json_kind(raw).to_owned(),
        }
    }

    fn invalid_date_time(&self, raw: &JsonValue) -> MapperError {
        MapperError::InvalidDateTime {
            path: self.path.to_string(),
            value: raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    wire_enum! {
        enum Kind: "Kind" as str {
            Book = "book",
            Podcast = "podcast",
        }
    }

    wire_enum! {
        enum Ratio: "Ratio" as int {
            Standard = 0,
            Square = 1,
        }
    }

    api_object! {
        struct Folder {
            "id" => Shape::string(),
            "full_path" => Shape::string(),
        }
    }

    api_object! {
        struct Shelf {
            "id" => Shape::string(),
            "kind" => Shape::enumeration::<Kind>(),
            "folders" => Shape::list(Shape::nested::<Folder>()),
            "last_scan" => Shape::optional(Shape::date_time()),
            "counts" => Shape::mapping(Shape::int(), Shape::float()),
            "ratios" => Shape::mapping(Shape::enumeration::<Ratio>(), Shape::string()),
        }
    }

    fn instant(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().unwrap()
    }

    #[test]
    fn zero_millis_is_unset() {
        assert_eq!(decode_value(&json!(0), &Shape::DateTime), Ok(Value::Null));
    }

    #[test]
    fn millis_decode_to_utc_instant() {
        let value = decode_value(&json!(1_700_000_000_000_i64), &Shape::DateTime);
        assert_eq!(value, Ok(Value::DateTime(instant(1_700_000_000_000))));
    }

    #[test]
    fn iso_strings_decode_to_the_same_instant() {
        assert_eq!(decode_value(&json!(""), &Shape::DateTime), Ok(Value::Null));

        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for text in [
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:00+00:00",
            "2024-01-01T01:00:00+01:00",
            "2024-01-01T00:00:00.000+0000",
            "2024-01-01T00:00:00",
            "2024-01-01",
        ] {
            assert_eq!(
                decode_value(&json!(text), &Shape::DateTime),
                Ok(Value::DateTime(expected)),
                "{text}"
            );
        }
    }

    #[test]
    fn unparsable_timestamp_is_reported() {
        let err = decode_value(&json!("yesterday"), &Shape::DateTime).unwrap_err();
        assert!(matches!(err, MapperError::InvalidDateTime { .. }));

        let err = decode_value(&json!(true), &Shape::DateTime).unwrap_err();
        assert!(matches!(err, MapperError::MalformedShape { .. }));
    }

    #[test]
    fn null_is_uniform_across_shapes() {
        for shape in [
            Shape::string(),
            Shape::DateTime,
            Shape::list(Shape::int()),
            Shape::nested::<Folder>(),
            Shape::enumeration::<Kind>(),
            Shape::union(vec![Shape::int(), Shape::string()]),
        ] {
            assert_eq!(decode_value(&JsonValue::Null, &shape), Ok(Value::Null));
        }
    }

    #[test]
    fn list_shape_requires_an_array() {
        let err = decode_value(&json!({"a": 1}), &Shape::list(Shape::int())).unwrap_err();
        assert_eq!(
            err,
            MapperError::MalformedShape {
                path: "<root>".into(),
                expected: "list<int>".into(),
                found: "object".into(),
            }
        );
    }

    #[test]
    fn errors_carry_the_field_path() {
        let payload = json!({
            "id": "lib_1",
            "folders": [
                {"id": "f1", "fullPath": "/a"},
                {"id": "f2", "fullPath": 7},
            ],
        });
        let err = decode::<Shelf>(&payload).unwrap_err();
        assert_eq!(err.path(), Some("folders[1].fullPath"));
    }

    #[test]
    fn single_alternative_union_unwraps() {
        let shape = Shape::union(vec![Shape::int()]);
        assert_eq!(decode_value(&json!(4), &shape), Ok(Value::Int(4)));
    }

    #[test]
    fn broader_unions_fail_loudly() {
        let shape = Shape::union(vec![Shape::int(), Shape::string()]);
        let err = decode_value(&json!("4"), &shape).unwrap_err();
        assert_eq!(
            err,
            MapperError::UnsupportedUnionShape {
                path: "<root>".into(),
                alternatives: 2,
            }
        );
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let err = decode_value(&json!("music"), &Shape::enumeration::<Kind>()).unwrap_err();
        assert!(matches!(
            err,
            MapperError::UnknownVariant { enum_name: "Kind", .. }
        ));

        let value = decode_value(&json!(1), &Shape::enumeration::<Ratio>()).unwrap();
        assert_eq!(value.as_variant::<Ratio>(), Some(Ratio::Square));
    }

    #[test]
    fn mapping_keys_are_coerced_through_their_shape() {
        let payload = json!({
            "id": "lib_1",
            "counts": {"2023": 1.5, "2024": 3},
            "ratios": {"1": "square"},
        });
        let shelf = decode::<Shelf>(&payload).unwrap();
        let counts = shelf.record().get("counts").and_then(Value::as_map).unwrap();
        assert_eq!(counts[0], (Value::Int(2023), Value::Float(1.5)));
        assert_eq!(counts[1], (Value::Int(2024), Value::Float(3.0)));

        let ratios = shelf.record().get("ratios").and_then(Value::as_map).unwrap();
        assert_eq!(ratios[0].0.as_variant::<Ratio>(), Some(Ratio::Square));
    }

    #[test]
    fn unknown_keys_land_in_the_reject_bag() {
        let payload = json!({"id": "f1", "fullPath": "/a", "ino": "123"});
        let folder = decode::<Folder>(&payload).unwrap();
        assert_eq!(folder.record().rejected().get("ino"), Some(&json!("123")));
        assert_eq!(folder.record().rejected().len(), 1);
    }

    #[test]
    fn absent_keys_stay_unset() {
        let folder = decode::<Folder>(&json!({"id": "f1"})).unwrap();
        assert!(folder.record().is_set("id"));
        assert!(!folder.record().is_set("full_path"));
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = decode::<Folder>(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            MapperError::NotAnObject {
                type_name: "Folder",
                found: "array",
            }
        );
    }

    #[test]
    fn decodes_lists_of_objects() {
        let folders =
            decode_list::<Folder>(&json!([{"id": "a"}, {"id": "b"}])).unwrap();
        let ids: Vec<_> = folders.iter().filter_map(|f| f.record().str("id")).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn list_elements_are_never_dropped() {
        let err = decode_list::<Folder>(&json!([{"id": "a"}, null, {"id": "b"}]))
            .unwrap_err();
        assert_eq!(
            err,
            MapperError::MalformedShape {
                path: "[1]".into(),
                expected: "object<Folder>".into(),
                found: "null".into(),
            }
        );

        let err = decode_list::<Folder>(&json!({"id": "a"})).unwrap_err();
        assert!(matches!(err, MapperError::MalformedShape { ref found, .. } if found == "object"));
        assert!(decode_list::<Folder>(&JsonValue::Null).is_err());
    }

    #[test]
    fn integral_floats_satisfy_int_fields() {
        assert_eq!(decode_value(&json!(5.0), &Shape::int()), Ok(Value::Int(5)));
        assert!(decode_value(&json!(5.5), &Shape::int()).is_err());
    }
}
