//! The `config!` macro: declare a configuration shape and its descriptor table
//! in one place.

/// Declare a configuration struct.
///
/// Each field annotated with `#[conf(key = "...")]` takes part in
/// configuration under that key; `default = "..."` adds a textual default that
/// is coerced into the field's type. A key of `"-"` or a missing annotation
/// leaves the field out entirely: it is skipped by serde and keeps its
/// `Default` value.
///
/// The macro derives `Serialize`, `Deserialize` and `Default` and implements
/// [`Config`](crate::Config) and [`FieldType`](crate::FieldType). The calling
/// crate must depend on `serde`.
///
/// ```ignore
/// configo::config! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Http {
///         #[conf(key = "address", default = "127.0.0.1")]
///         pub address: String,
///         #[conf(key = "port", default = "80")]
///         pub port: u16,
///         #[conf(key = "tls")]
///         pub tls: Option<Tls>,
///     }
/// }
/// ```
///
/// Generic structs and tuple structs are not supported.
#[macro_export]
macro_rules! config {
    // Excluded field: `key = "-"`.
    (@field $attrs:tt $vis:tt $name:ident [$($fields:tt)*] [$($metas:tt)*]
        $(#[doc = $doc:expr])*
        #[conf(key = "-" $(, default = $default:literal)?)]
        $fvis:vis $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::config!(@field $attrs $vis $name
            [$($fields)* $(#[doc = $doc])* #[serde(skip)] $fvis $field : $ty,]
            [$($metas)*]
            $($($rest)*)?);
    };

    (@field $attrs:tt $vis:tt $name:ident [$($fields:tt)*] [$($metas:tt)*]
        $(#[doc = $doc:expr])*
        #[conf(key = $key:literal, default = $default:literal)]
        $fvis:vis $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::config!(@field $attrs $vis $name
            [$($fields)* $(#[doc = $doc])* #[serde(rename = $key)] $fvis $field : $ty,]
            [$($metas)* ($field, $ty, $key, ::core::option::Option::Some($default))]
            $($($rest)*)?);
    };

    (@field $attrs:tt $vis:tt $name:ident [$($fields:tt)*] [$($metas:tt)*]
        $(#[doc = $doc:expr])*
        #[conf(key = $key:literal)]
        $fvis:vis $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::config!(@field $attrs $vis $name
            [$($fields)* $(#[doc = $doc])* #[serde(rename = $key)] $fvis $field : $ty,]
            [$($metas)* ($field, $ty, $key, ::core::option::Option::None)]
            $($($rest)*)?);
    };

    // Untagged field: invisible to configuration.
    (@field $attrs:tt $vis:tt $name:ident [$($fields:tt)*] [$($metas:tt)*]
        $(#[doc = $doc:expr])*
        $fvis:vis $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::config!(@field $attrs $vis $name
            [$($fields)* $(#[doc = $doc])* #[serde(skip)] $fvis $field : $ty,]
            [$($metas)*]
            $($($rest)*)?);
    };

    (@field [$($attr:tt)*] [$($vis:tt)*] $name:ident [$($fields:tt)*]
        [$(($field:ident, $ty:ty, $key:expr, $default:expr))*]
    ) => {
        $($attr)*
        #[derive(::serde::Serialize, ::serde::Deserialize, ::core::default::Default)]
        #[serde(default)]
        $($vis)* struct $name {
            $($fields)*
        }

        impl $crate::FieldType for $name {
            fn kind() -> $crate::FieldKind {
                $crate::FieldKind::Nested(<$name as $crate::Config>::meta())
            }
        }

        impl $crate::Config for $name {
            fn meta() -> $crate::Meta {
                $crate::Meta {
                    name: ::core::stringify!($name),
                    fields: ::std::vec![
                        $(
                            $crate::Field {
                                name: ::core::stringify!($field),
                                key: $key,
                                default: $default,
                                kind: <$ty as $crate::FieldType>::kind(),
                            },
                        )*
                    ],
                }
            }
        }
    };

    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::config!(@field [$(#[$attr])*] [$vis] $name [] [] $($body)*);
    };
}
