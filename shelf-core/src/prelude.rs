//! Frequently used items for crates declaring domain types.

pub use crate::error::{MapperError, Result as MapperResult};
pub use crate::query::{QueryParams, build_url};
pub use crate::routes::{fill, v1};
pub use crate::schema::{ApiObject, ObjectType};
pub use crate::shape::{Shape, WireEnum, WireScalar};
pub use crate::value::{Record, Value};
pub use crate::{WirePayload, api_object, wire_enum};
