/// Declare a domain object type backed by a [`Record`](crate::Record).
///
/// Generates a newtype over `Record`, registers its [`ObjectType`](crate::ObjectType)
/// in a lazily initialised static and implements [`ApiObject`](crate::ApiObject).
/// Fields are listed by their snake_case name; the wire key is derived with
/// [`to_wire_name`](crate::to_wire_name) unless given with `as`.
///
/// ```
/// use shelf_core::{ApiObject, Shape, api_object};
///
/// api_object! {
///     pub struct Author {
///         "id" => Shape::string(),
///         "name" => Shape::string(),
///     }
/// }
///
/// api_object! {
///     pub struct AuthorExpanded: Author {
///         "num_books" => Shape::optional(Shape::int()),
///         "collapse_series" as "collapseseries" => Shape::bool(),
///     }
/// }
///
/// assert_eq!(AuthorExpanded::object_type().fields().len(), 4);
/// ```
#[macro_export]
macro_rules! api_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(: $parent:ty)? {
            $($field:literal $(as $wire:literal)? => $shape:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::Record);

        impl $crate::ApiObject for $name {
            fn object_type() -> &'static $crate::ObjectType {
                static OBJECT_TYPE: $crate::__private::Lazy<$crate::ObjectType> =
                    $crate::__private::Lazy::new(|| {
                        let builder = $crate::ObjectType::builder(stringify!($name))
                            $(.extends::<$parent>())?;
                        $(
                            let builder = match $crate::__private::explicit_wire_name(&[$($wire)?]) {
                                Some(wire) => builder.field_as($field, wire, $shape),
                                None => builder.field($field, $shape),
                            };
                        )*
                        builder.build()
                    });
                &OBJECT_TYPE
            }

            fn from_record(record: $crate::Record) -> Self {
                Self(record)
            }

            fn record(&self) -> &$crate::Record {
                &self.0
            }

            fn record_mut(&mut self) -> &mut $crate::Record {
                &mut self.0
            }

            fn into_record(self) -> $crate::Record {
                self.0
            }
        }

        impl From<$name> for $crate::Value {
            fn from(value: $name) -> Self {
                $crate::Value::Object(value.0)
            }
        }
    };
}

/// Declare a Rust enumeration together with its static
/// [`EnumType`](crate::EnumType).
///
/// `as str` enums carry strings on the wire, `as int` enums integers.
///
/// ```
/// use shelf_core::{WireEnum, WireScalar, wire_enum};
///
/// wire_enum! {
///     pub enum MediaType: "MediaType" as str {
///         Book = "book",
///         Podcast = "podcast",
///     }
/// }
///
/// assert_eq!(MediaType::Podcast.wire_value(), Some(WireScalar::Str("podcast")));
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $type_name:literal as str {
            $($variant:ident = $wire:literal),* $(,)?
        }
    ) => {
        $crate::wire_enum!(@define $(#[$meta])* $vis $name $type_name $crate::WireScalar::Str {
            $($variant = $wire),*
        });
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $type_name:literal as int {
            $($variant:ident = $wire:literal),* $(,)?
        }
    ) => {
        $crate::wire_enum!(@define $(#[$meta])* $vis $name $type_name $crate::WireScalar::Int {
            $($variant = $wire),*
        });
    };
    (
        @define $(#[$meta:meta])* $vis:vis $name:ident $type_name:literal $ctor:path {
            $($variant:ident = $wire:literal),*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),*
        }

        impl $crate::WireEnum for $name {
            fn enum_type() -> &'static $crate::EnumType {
                static ENUM_TYPE: $crate::EnumType = $crate::EnumType {
                    name: $type_name,
                    variants: &[
                        $($crate::EnumVariant {
                            label: stringify!($variant),
                            wire: $ctor($wire),
                        }),*
                    ],
                };
                &ENUM_TYPE
            }

            fn from_label(label: &str) -> Option<Self> {
                match label {
                    $(stringify!($variant) => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }

        impl From<$name> for $crate::Value {
            fn from(value: $name) -> Self {
                $crate::WireEnum::to_value(value)
            }
        }
    };
}
