//! Registration-time schemas for domain object types.
//!
//! Each domain type registers an [`ObjectType`] listing the fields it
//! declares and, optionally, the type it extends. The full field table,
//! inherited fields included, is resolved on first use and frozen.

use std::fmt;

use once_cell::sync::OnceCell;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::naming::to_wire_name;
use crate::shape::Shape;
use crate::value::Record;
use crate::WirePayload;

/// A declared field: its Rust-side name, its wire key and its shape.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    wire_name: String,
    shape: Shape,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            wire_name: to_wire_name(name),
            shape,
        }
    }

    /// Descriptor whose wire key does not follow the camelCase rule.
    pub fn with_wire_name(
        name: &'static str,
        wire_name: impl Into<String>,
        shape: Shape,
    ) -> Self {
        Self {
            name,
            wire_name: wire_name.into(),
            shape,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Lazily resolved reference to a registered type.
///
/// Holding a function rather than the type itself lets schemas refer to
/// each other without ordering constraints between their statics.
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> &'static ObjectType);

impl TypeRef {
    pub fn of<T: ApiObject>() -> Self {
        TypeRef(T::object_type)
    }

    pub fn get(self) -> &'static ObjectType {
        (self.0)()
    }

    pub fn name(self) -> &'static str {
        self.get().name()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name()).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.get(), other.get())
    }
}

/// Ordered, fully resolved field table of an [`ObjectType`].
#[derive(Debug)]
pub struct FieldTable {
    fields: Vec<&'static FieldDescriptor>,
}

impl FieldTable {
    pub fn get(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().copied().find(|field| field.name == name)
    }

    pub fn by_wire_name(&self, wire_name: &str) -> Option<&'static FieldDescriptor> {
        self.fields
            .iter()
            .copied()
            .find(|field| field.wire_name == wire_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Schema of a domain object type.
pub struct ObjectType {
    name: &'static str,
    parent: Option<TypeRef>,
    declared: Vec<FieldDescriptor>,
    table: OnceCell<FieldTable>,
}

impl ObjectType {
    pub fn builder(name: &'static str) -> ObjectTypeBuilder {
        ObjectTypeBuilder {
            name,
            parent: None,
            declared: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static ObjectType> {
        self.parent.map(TypeRef::get)
    }

    /// Fields declared directly on this type, excluding inherited ones.
    pub fn declared(&self) -> &[FieldDescriptor] {
        &self.declared
    }

    /// Full field table, inherited fields first.
    ///
    /// Resolved once; a redeclared field keeps its inherited position but
    /// takes the most-derived shape and wire name.
    pub fn fields(&'static self) -> &'static FieldTable {
        self.table.get_or_init(|| {
            let mut fields: Vec<&'static FieldDescriptor> = self
                .parent()
                .map(|parent| parent.fields().iter().collect())
                .unwrap_or_default();

            for field in &self.declared {
                match fields.iter_mut().find(|existing| existing.name == field.name) {
                    Some(slot) => *slot = field,
                    None => fields.push(field),
                }
            }

            FieldTable { fields }
        })
    }

    /// True when `self` is `other` or extends it.
    pub fn is_a(&'static self, other: &'static ObjectType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if std::ptr::eq(ty, other) {
                return true;
            }
            current = ty.parent();
        }
        false
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("declared", &self.declared)
            .finish()
    }
}

/// Builder for [`ObjectType`]; see [`api_object!`](crate::api_object) for the
/// usual way to declare a type.
#[derive(Debug)]
pub struct ObjectTypeBuilder {
    name: &'static str,
    parent: Option<TypeRef>,
    declared: Vec<FieldDescriptor>,
}

impl ObjectTypeBuilder {
    /// Inherit every field of `P`.
    pub fn extends<P: ApiObject>(mut self) -> Self {
        self.parent = Some(TypeRef::of::<P>());
        self
    }

    pub fn field(self, name: &'static str, shape: Shape) -> Self {
        self.descriptor(FieldDescriptor::new(name, shape))
    }

    /// Declare a field whose wire key is given explicitly.
    pub fn field_as(
        self,
        name: &'static str,
        wire_name: &'static str,
        shape: Shape,
    ) -> Self {
        self.descriptor(FieldDescriptor::with_wire_name(name, wire_name, shape))
    }

    fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        match self
            .declared
            .iter_mut()
            .find(|existing| existing.name == descriptor.name)
        {
            Some(slot) => *slot = descriptor,
            None => self.declared.push(descriptor),
        }
        self
    }

    pub fn build(self) -> ObjectType {
        ObjectType {
            name: self.name,
            parent: self.parent,
            declared: self.declared,
            table: OnceCell::new(),
        }
    }
}

/// Typed view over a [`Record`] of a registered type.
///
/// Implemented by [`api_object!`](crate::api_object); the provided methods are
/// the entry points the HTTP layer uses.
pub trait ApiObject: Sized {
    fn object_type() -> &'static ObjectType;

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    fn into_record(self) -> Record;

    /// Empty instance with no field set.
    fn empty() -> Self {
        Self::from_record(Record::new(Self::object_type()))
    }

    fn decode(payload: &JsonValue) -> Result<Self> {
        crate::decode::decode(payload)
    }

    fn encode(&self, include_nulls: bool) -> Result<WirePayload> {
        crate::encode::encode_record(self.record(), include_nulls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ScalarKind;

    api_object! {
        struct Base {
            "id" => Shape::string(),
            "added_at" => Shape::date_time(),
            "num_books" => Shape::int(),
        }
    }

    api_object! {
        struct Derived: Base {
            "num_books" => Shape::optional(Shape::float()),
            "library_id" => Shape::string(),
        }
    }

    api_object! {
        struct Bare {}
    }

    #[test]
    fn merges_ancestor_fields_base_first() {
        let names: Vec<_> = Derived::object_type()
            .fields()
            .iter()
            .map(FieldDescriptor::name)
            .collect();
        assert_eq!(names, ["id", "added_at", "num_books", "library_id"]);
    }

    #[test]
    fn derived_declaration_overrides_inherited_shape() {
        let field = Derived::object_type()
            .fields()
            .get("num_books")
            .map(FieldDescriptor::shape);
        assert!(matches!(field, Some(Shape::Optional(_))));

        let base = Base::object_type().fields().get("num_books");
        assert!(matches!(
            base.map(FieldDescriptor::shape),
            Some(Shape::Scalar(ScalarKind::Int))
        ));
    }

    #[test]
    fn computes_wire_names() {
        let table = Derived::object_type().fields();
        assert_eq!(
            table.by_wire_name("libraryId").map(FieldDescriptor::name),
            Some("library_id")
        );
        assert!(table.by_wire_name("library_id").is_none());
    }

    #[test]
    fn table_is_resolved_once() {
        let first = Derived::object_type().fields() as *const FieldTable;
        let second = Derived::object_type().fields() as *const FieldTable;
        assert_eq!(first, second);
    }

    #[test]
    fn type_without_declarations_is_valid() {
        assert!(Bare::object_type().fields().is_empty());
        assert!(Bare::object_type().parent().is_none());
    }

    #[test]
    fn tracks_ancestry() {
        assert!(Derived::object_type().is_a(Base::object_type()));
        assert!(!Base::object_type().is_a(Derived::object_type()));
    }

    #[test]
    fn explicit_wire_names_are_kept() {
        let ty = ObjectType::builder("Query")
            .field_as("collapse_series", "collapseseries", Shape::bool())
            .build();
        assert_eq!(ty.declared()[0].wire_name(), "collapseseries");
    }
}
