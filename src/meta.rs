//! Static field descriptors for configuration shapes.
//!
//! A shape describes itself through [`Config::meta`]: one [`Field`] per
//! configurable struct field, carrying the source key, the optional textual
//! default, and a [`FieldKind`] derived from the Rust type via [`FieldType`].
//! The default extractor and the decoder walk this tree instead of inspecting
//! values at runtime.
//!
//! Shapes are normally declared with the [`config!`](crate::config) macro,
//! which generates both the struct and its descriptor table. Hand-written
//! impls are fine as long as the field keys agree with the struct's serde
//! names.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// The key sentinel that removes a field from configuration.
pub const EXCLUDE: &str = "-";

/// Descriptor table for one configuration shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    /// Rust type name, used in log output.
    pub name: &'static str,
    pub fields: Vec<Field>,
}

impl Meta {
    /// Fields that take part in configuration (key present and not `-`).
    pub fn tagged(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_excluded())
    }

    /// Look up a tagged field by source key, ignoring ASCII case.
    pub fn field_by_key(&self, key: &str) -> Option<&Field> {
        self.tagged().find(|f| f.key.eq_ignore_ascii_case(key))
    }
}

/// One configurable field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Rust field name.
    pub name: &'static str,
    /// Key used for this field in source data.
    pub key: &'static str,
    /// Literal default, coerced into `kind` by the default extractor.
    pub default: Option<&'static str>,
    pub kind: FieldKind,
}

impl Field {
    pub fn is_excluded(&self) -> bool {
        self.key.is_empty() || self.key == EXCLUDE
    }

    /// The literal default, with the `-` sentinel treated as absent.
    pub fn default_literal(&self) -> Option<&'static str> {
        self.default.filter(|d| !d.is_empty() && *d != EXCLUDE)
    }
}

/// What kind of value a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Int(IntKind),
    Str,
    Bool,
    Float,
    Seq,
    Map,
    /// Untyped value (`serde_json::Value`).
    Any,
    Nested(Meta),
    Optional(Box<FieldKind>),
}

/// Width and signedness of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntKind {
    /// Whether `v` is representable in this integer type.
    pub fn fits(self, v: i64) -> bool {
        match self {
            IntKind::I8 => i8::try_from(v).is_ok(),
            IntKind::I16 => i16::try_from(v).is_ok(),
            IntKind::I32 => i32::try_from(v).is_ok(),
            IntKind::I64 => true,
            IntKind::Isize => isize::try_from(v).is_ok(),
            IntKind::U8 => u8::try_from(v).is_ok(),
            IntKind::U16 => u16::try_from(v).is_ok(),
            IntKind::U32 => u32::try_from(v).is_ok(),
            IntKind::U64 => u64::try_from(v).is_ok(),
            IntKind::Usize => usize::try_from(v).is_ok(),
        }
    }
}

/// Maps a Rust type to its [`FieldKind`].
pub trait FieldType {
    fn kind() -> FieldKind;
}

/// A configuration shape: serde-decodable and self-describing.
pub trait Config: FieldType + Serialize + DeserializeOwned {
    fn meta() -> Meta;
}

macro_rules! int_field_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Int(IntKind::$kind)
                }
            }
        )*
    };
}

int_field_type! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl FieldType for String {
    fn kind() -> FieldKind {
        FieldKind::Str
    }
}

impl FieldType for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }
}

impl FieldType for f32 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }
}

impl FieldType for f64 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }
}

impl<T> FieldType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Seq
    }
}

impl<V, S> FieldType for HashMap<String, V, S> {
    fn kind() -> FieldKind {
        FieldKind::Map
    }
}

impl<V> FieldType for BTreeMap<String, V> {
    fn kind() -> FieldKind {
        FieldKind::Map
    }
}

impl FieldType for serde_json::Value {
    fn kind() -> FieldKind {
        FieldKind::Any
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }
}

impl<T: FieldType> FieldType for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }
}
