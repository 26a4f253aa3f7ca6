//! JSON serialization and deserialization glue for value objects.
//!
//! Serialization writes fields one by one into serde's streaming
//! [`SerializeMap`] sink in a fixed, declared order. Deserialization goes
//! through an [`ObjectDeserializer`], a per-type table that maps exact wire
//! field names to typed setters on the type's builder.

use crate::builder::{MissingRequiredProperty, ObjectBuilder};
use crate::error::{readable_type_name, OpenSearchError};
use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Field-by-field JSON serialization.
///
/// Implementors write required fields unconditionally and optional fields
/// only when present. Types that embed a shared base call the base's
/// `serialize_fields` first.
pub trait SerializeFields {
    /// Write this object's fields into an open JSON object.
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error>;
}

/// Serialize a value object as a JSON object.
pub fn serialize_object<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: SerializeFields + ?Sized,
    S: Serializer,
{
    let mut map = serializer.serialize_map(None)?;
    value.serialize_fields(&mut map)?;
    map.end()
}

/// Write `key: value` only if the value is present.
pub fn serialize_optional<M, T>(map: &mut M, key: &'static str, value: Option<&T>) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize + ?Sized,
{
    if let Some(value) = value {
        map.serialize_entry(key, value)?;
    }
    Ok(())
}

type Setter<B> = Box<dyn Fn(&mut B, serde_json::Value) -> Result<(), serde_json::Error> + Send + Sync>;
type AdditionalSetter<B> = Box<dyn Fn(&mut B, String, serde_json::Value) + Send + Sync>;

struct FieldParser<B> {
    expected: String,
    set: Setter<B>,
}

thread_local! {
    // Innermost builder failure of the current parse on this thread.
    static MISSING_PROPERTY: Cell<Option<MissingRequiredProperty>> = const { Cell::new(None) };
}

/// Parse a JSON body into `T`.
///
/// A required property missing from any object in the body is reported as
/// [`OpenSearchError::MissingRequiredProperty`]; every other failure as
/// [`OpenSearchError::Decode`].
pub(crate) fn from_json<T: DeserializeOwned>(body: &[u8]) -> crate::error::Result<T> {
    MISSING_PROPERTY.with(|slot| slot.set(None));
    serde_json::from_slice(body).map_err(|source| match MISSING_PROPERTY.with(Cell::take) {
        Some(missing) => OpenSearchError::MissingRequiredProperty(missing),
        None => OpenSearchError::decode::<T>(source),
    })
}

/// Wire-name to setter table for the builder `B`.
///
/// Built once per type (usually behind a `once_cell::sync::Lazy`) and shared
/// read-only afterwards.
pub struct ObjectDeserializer<B> {
    type_name: &'static str,
    fields: HashMap<&'static str, FieldParser<B>>,
    additional: Option<AdditionalSetter<B>>,
}

impl<B: ObjectBuilder> ObjectDeserializer<B> {
    /// Create an empty table for the named type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: HashMap::new(),
            additional: None,
        }
    }

    /// Register a field: values under `key` are decoded as `T` and handed to
    /// `setter`.
    pub fn add<T, F>(&mut self, key: &'static str, setter: F) -> &mut Self
    where
        T: DeserializeOwned + 'static,
        F: Fn(&mut B, T) + Send + Sync + 'static,
    {
        let set: Setter<B> = Box::new(move |builder, value| {
            let value = T::deserialize(value)?;
            setter(builder, value);
            Ok(())
        });
        self.fields.insert(
            key,
            FieldParser {
                expected: readable_type_name::<T>(),
                set,
            },
        );
        self
    }

    /// Collect keys with no registered field through `setter` instead of
    /// skipping them.
    pub fn add_additional<F>(&mut self, setter: F) -> &mut Self
    where
        F: Fn(&mut B, String, serde_json::Value) + Send + Sync + 'static,
    {
        self.additional = Some(Box::new(setter));
        self
    }

    /// Name of the type this table builds.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether `key` is a registered wire field.
    pub fn accepts(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Read a JSON object into a fresh builder and build it.
    pub fn deserialize<'de, D>(&self, deserializer: D) -> Result<B::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ObjectVisitor { op: self })
    }
}

struct ObjectVisitor<'a, B> {
    op: &'a ObjectDeserializer<B>,
}

impl<'de, B: ObjectBuilder> Visitor<'de> for ObjectVisitor<'_, B> {
    type Value = B::Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a JSON object for {}", self.op.type_name)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = B::default();

        while let Some(key) = map.next_key::<String>()? {
            let Some(field) = self.op.fields.get(key.as_str()) else {
                match &self.op.additional {
                    Some(additional) => {
                        let value: serde_json::Value = map.next_value()?;
                        additional(&mut builder, key, value);
                    }
                    None => {
                        trace!(type_name = self.op.type_name, key = %key, "Skipping unknown field");
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                continue;
            };

            let value: serde_json::Value = map.next_value()?;
            // null reads as "not set"
            if value.is_null() {
                continue;
            }
            (field.set)(&mut builder, value).map_err(|e| {
                de::Error::custom(format_args!(
                    "{}.{}: expected {}: {}",
                    self.op.type_name, key, field.expected, e
                ))
            })?;
        }

        builder.build().map_err(|missing| {
            let error = <A::Error as de::Error>::custom(&missing);
            MISSING_PROPERTY.with(|slot| slot.set(Some(missing)));
            error
        })
    }
}

/// Implement `Serialize` (and optionally `Deserialize`) for a value object.
///
/// The serializer delegates to [`SerializeFields`]; the deserializer
/// delegates to the given static [`ObjectDeserializer`].
macro_rules! json_object {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                $crate::codec::serialize_object(self, serializer)
            }
        }
    };
    ($ty:ty, $deserializer:ident) => {
        $crate::codec::json_object!($ty);

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                $deserializer.deserialize(deserializer)
            }
        }
    };
}

pub(crate) use json_object;
