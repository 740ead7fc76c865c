//! # Shelf Core
//!
//! Wire mapping engine for the shelf Audiobookshelf client.
//!
//! The remote API speaks loosely typed JSON: camelCase keys, timestamps that
//! arrive either as Unix milliseconds or ISO-8601 strings, nullable fields,
//! enumerations encoded as their primitive value and deeply nested
//! collections. This crate converts between those payloads and typed
//! [`Record`]s driven by statically registered schemas.
//!
//! ## Architecture
//!
//! - [`naming`]: snake_case ↔ camelCase translation
//! - [`shape`]: the declared structural type of a field
//! - [`schema`]: per-type field tables, resolved once across the ancestry
//! - [`decode`]: wire value → domain value
//! - [`encode`]: domain value → wire value
//! - [`query`]: query-string construction
//! - [`routes`]: endpoint path templates
//!
//! ## Examples
//!
//! ```
//! use serde_json::json;
//! use shelf_core::{ApiObject, Shape, api_object};
//!
//! api_object! {
//!     /// A folder watched by a library.
//!     pub struct Folder {
//!         "id" => Shape::string(),
//!         "full_path" => Shape::string(),
//!         "added_at" => Shape::optional(Shape::date_time()),
//!     }
//! }
//!
//! let folder = Folder::decode(&json!({
//!     "id": "fol_1",
//!     "fullPath": "/audiobooks",
//!     "addedAt": 1700000000000_i64,
//! }))?;
//!
//! assert_eq!(folder.record().str("full_path"), Some("/audiobooks"));
//! let wire = folder.encode(false)?;
//! assert_eq!(wire["addedAt"], json!("2023-11-14T22:13:20Z"));
//! # Ok::<(), shelf_core::MapperError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

pub mod decode;
pub mod encode;
pub mod error;
pub mod naming;
pub mod prelude;
pub mod query;
pub mod routes;
pub mod schema;
pub mod shape;
pub mod value;

pub use decode::{decode, decode_list, decode_object, decode_value, parse_iso8601};
pub use encode::{encode, encode_record, encode_value, format_iso8601};
pub use error::{MapperError, Result};
pub use naming::{to_field_name, to_wire_name};
pub use query::{QueryParams, build_url};
pub use schema::{
    ApiObject, FieldDescriptor, FieldTable, ObjectType, ObjectTypeBuilder,
    TypeRef,
};
pub use shape::{
    EnumType, EnumVariant, ScalarKind, Shape, WireEnum, WireScalar,
};
pub use value::{EnumValue, Record, Value};

/// Untyped JSON object as exchanged with the remote API.
pub type WirePayload = serde_json::Map<String, serde_json::Value>;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;

    /// Picks the explicit wire name when one was declared.
    pub fn explicit_wire_name(
        explicit: &[&'static str],
    ) -> Option<&'static str> {
        explicit.first().copied()
    }
}
