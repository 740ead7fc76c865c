//! Coerced domain values and the records that hold them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::error::{MapperError, Result};
use crate::naming::to_field_name;
use crate::schema::{ApiObject, ObjectType};
use crate::shape::{EnumType, EnumVariant, WireEnum, WireScalar};
use crate::WirePayload;

/// A variant of a registered [`EnumType`].
#[derive(Clone, Copy)]
pub struct EnumValue {
    enum_type: &'static EnumType,
    variant: &'static EnumVariant,
}

impl EnumValue {
    pub fn new(enum_type: &'static EnumType, variant: &'static EnumVariant) -> Self {
        Self { enum_type, variant }
    }

    pub fn enum_type(&self) -> &'static EnumType {
        self.enum_type
    }

    pub fn label(&self) -> &'static str {
        self.variant.label
    }

    pub fn wire(&self) -> WireScalar {
        self.variant.wire
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.enum_type, other.enum_type) && self.variant == other.variant
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.enum_type.name, self.variant.label)
    }
}

/// A domain value produced by decoding one wire value against its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Enum(EnumValue),
    List(Vec<Value>),
    /// Decoded mapping; entries keep their wire order.
    Map(Vec<(Value, Value)>),
    Object(Record),
    Raw(JsonValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value's variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Map(_) => "mapping",
            Value::Object(_) => "object",
            Value::Raw(_) => "raw",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&JsonValue> {
        match self {
            Value::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn as_variant<E: WireEnum>(&self) -> Option<E> {
        E::from_value(self)
    }

    /// Typed view of a nested record of type `T` (or a subtype of it).
    pub fn to_object<T: ApiObject>(&self) -> Option<T> {
        self.as_record()
            .filter(|record| record.object_type().is_a(T::object_type()))
            .cloned()
            .map(T::from_record)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Object(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

/// A domain instance: the fields of one registered type plus the wire keys
/// the type does not declare.
///
/// Fields that never appeared in the payload are *unset* and are never
/// encoded; fields that arrived as `null` hold [`Value::Null`].
#[derive(Clone)]
pub struct Record {
    object_type: &'static ObjectType,
    values: BTreeMap<&'static str, Value>,
    rejected: WirePayload,
}

impl Record {
    pub fn new(object_type: &'static ObjectType) -> Self {
        Self {
            object_type,
            values: BTreeMap::new(),
            rejected: WirePayload::new(),
        }
    }

    pub fn object_type(&self) -> &'static ObjectType {
        self.object_type
    }

    pub fn type_name(&self) -> &'static str {
        self.object_type.name()
    }

    /// Value of a set field, `None` when the field is unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Assign a declared field, returning the previous value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        let field = self.object_type.fields().get(name).ok_or_else(|| {
            MapperError::UnknownField {
                type_name: self.object_type.name(),
                field: name.to_owned(),
            }
        })?;
        Ok(self.values.insert(field.name(), value.into()))
    }

    /// Unset a field so it is no longer encoded.
    pub fn clear(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Set fields in field-table order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.object_type
            .fields()
            .iter()
            .filter_map(|field| self.values.get(field.name()).map(|v| (field.name(), v)))
    }

    /// Wire keys with no declared counterpart, kept for diagnostics.
    pub fn rejected(&self) -> &WirePayload {
        &self.rejected
    }

    /// Rejected wire keys as snake_case names, in wire order.
    pub fn unmapped_fields(&self) -> Vec<String> {
        self.rejected.keys().map(|key| to_field_name(key)).collect()
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    pub(crate) fn reject(&mut self, key: String, raw: JsonValue) {
        self.rejected.insert(key, raw);
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn date_time(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(Value::as_date_time)
    }

    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn raw(&self, name: &str) -> Option<&JsonValue> {
        self.get(name).and_then(Value::as_raw)
    }

    pub fn variant<E: WireEnum>(&self, name: &str) -> Option<E> {
        self.get(name).and_then(Value::as_variant)
    }

    pub fn object<T: ApiObject>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(Value::to_object)
    }

    /// Nested records of a list field; non-object elements are skipped.
    pub fn objects<T: ApiObject>(&self, name: &str) -> Vec<T> {
        self.list(name)
            .map(|items| items.iter().filter_map(Value::to_object).collect())
            .unwrap_or_default()
    }

    /// String elements of a list field.
    pub fn strings(&self, name: &str) -> Vec<&str> {
        self.list(name)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.object_type, other.object_type)
            && self.values == other.values
            && self.rejected == other.rejected
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.object_type.name());
        for (name, value) in self.fields() {
            out.field(name, value);
        }
        if !self.rejected.is_empty() {
            out.field("rejected", &self.rejected);
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    api_object! {
        struct Bookmark {
            "library_item_id" => Shape::string(),
            "title" => Shape::string(),
            "time" => Shape::int(),
        }
    }

    #[test]
    fn set_and_clear_declared_fields() {
        let mut bookmark = Bookmark::empty();
        let record = bookmark.record_mut();

        assert_eq!(record.set("title", "Chapter 3"), Ok(None));
        assert_eq!(
            record.set("title", "Chapter 4"),
            Ok(Some(Value::from("Chapter 3")))
        );
        assert_eq!(record.str("title"), Some("Chapter 4"));

        assert_eq!(record.clear("title"), Some(Value::from("Chapter 4")));
        assert!(!record.is_set("title"));
    }

    #[test]
    fn rejects_undeclared_fields() {
        let mut bookmark = Bookmark::empty();
        let err = bookmark.record_mut().set("createdAt", 1_i64).unwrap_err();
        assert!(matches!(err, MapperError::UnknownField { type_name: "Bookmark", .. }));
    }

    #[test]
    fn iterates_fields_in_declaration_order() {
        let mut bookmark = Bookmark::empty();
        let record = bookmark.record_mut();
        record.set("time", 42_i64).unwrap();
        record.set("library_item_id", "li_1").unwrap();

        let names: Vec<_> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["library_item_id", "time"]);
    }

    #[test]
    fn names_unmapped_wire_keys() {
        let bookmark = crate::decode::decode::<Bookmark>(&serde_json::json!({
            "title": "Intro",
            "createdAt": 1,
            "hasOpenIDLink": false,
        }))
        .unwrap();
        assert_eq!(bookmark.record().unmapped_fields(), ["created_at", "has_open_idlink"]);
    }

    #[test]
    fn option_conversion_yields_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(3_i64)), Value::Int(3));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }
}
