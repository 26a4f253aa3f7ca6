//! Builder contract and required-property validation.
//!
//! Every value object in this crate is created through a builder. Builders
//! collect fields through chainable setters and are consumed by
//! [`ObjectBuilder::build`], which checks that every required property was
//! set. Because `build` takes the builder by value, a builder can only ever
//! produce one object.

use thiserror::Error;

/// A required property was missing when a value object was built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required property '{type_name}.{property}'")]
pub struct MissingRequiredProperty {
    type_name: &'static str,
    property: &'static str,
}

impl MissingRequiredProperty {
    /// Create a new missing-property error.
    pub fn new(type_name: &'static str, property: &'static str) -> Self {
        Self {
            type_name,
            property,
        }
    }

    /// Name of the value object type being built.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Wire name of the missing property.
    pub fn property(&self) -> &'static str {
        self.property
    }
}

/// A builder for an immutable value object.
///
/// `Default` yields an empty builder; the deserializer relies on it to start
/// a fresh builder for every parsed object.
pub trait ObjectBuilder: Default {
    /// The value object this builder produces.
    type Value;

    /// Validate required properties and produce the value object.
    fn build(self) -> Result<Self::Value, MissingRequiredProperty>;
}

/// Unwrap a required property or report it as missing.
pub fn require<T>(
    type_name: &'static str,
    property: &'static str,
    value: Option<T>,
) -> Result<T, MissingRequiredProperty> {
    value.ok_or(MissingRequiredProperty::new(type_name, property))
}

/// Append items to an optional list, creating it on first use.
pub(crate) fn push_all<T>(list: &mut Option<Vec<T>>, items: impl IntoIterator<Item = T>) {
    list.get_or_insert_with(Vec::new).extend(items);
}
