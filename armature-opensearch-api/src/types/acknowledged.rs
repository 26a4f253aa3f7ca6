//! The `acknowledged` flag shared by index-management responses.

use crate::builder::{require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, ObjectDeserializer, SerializeFields};
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;

/// Response carrying only the cluster's acknowledgement.
///
/// Larger responses embed this type and delegate the `acknowledged` field
/// to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcknowledgedResponse {
    acknowledged: bool,
}

impl AcknowledgedResponse {
    /// Create a new builder.
    pub fn builder() -> AcknowledgedResponseBuilder {
        AcknowledgedResponseBuilder::default()
    }

    /// Whether the cluster acknowledged the change.
    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Register the `acknowledged` field on an embedding type's table.
    pub(crate) fn setup_deserializer<B>(
        op: &mut ObjectDeserializer<B>,
        base: fn(&mut B) -> &mut AcknowledgedResponseBuilder,
    ) where
        B: ObjectBuilder + 'static,
    {
        op.add("acknowledged", move |b, v: bool| base(b).acknowledged = Some(v));
    }
}

impl SerializeFields for AcknowledgedResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry("acknowledged", &self.acknowledged)
    }
}

/// Builder for [`AcknowledgedResponse`].
#[derive(Debug, Default)]
pub struct AcknowledgedResponseBuilder {
    acknowledged: Option<bool>,
}

impl AcknowledgedResponseBuilder {
    /// Set the acknowledgement flag.
    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.acknowledged = Some(acknowledged);
        self
    }

    pub(crate) fn set_acknowledged(&mut self, acknowledged: bool) {
        self.acknowledged = Some(acknowledged);
    }

    /// Build on behalf of an embedding type, reporting missing fields
    /// against that type.
    pub(crate) fn build_for(
        self,
        type_name: &'static str,
    ) -> Result<AcknowledgedResponse, MissingRequiredProperty> {
        Ok(AcknowledgedResponse {
            acknowledged: require(type_name, "acknowledged", self.acknowledged)?,
        })
    }
}

impl ObjectBuilder for AcknowledgedResponseBuilder {
    type Value = AcknowledgedResponse;

    fn build(self) -> Result<AcknowledgedResponse, MissingRequiredProperty> {
        self.build_for("AcknowledgedResponse")
    }
}

static DESERIALIZER: Lazy<ObjectDeserializer<AcknowledgedResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<AcknowledgedResponseBuilder>::new("AcknowledgedResponse");
    AcknowledgedResponse::setup_deserializer(&mut op, |b| b);
    op
});

json_object!(AcknowledgedResponse, DESERIALIZER);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_requires_acknowledged() {
        let err = AcknowledgedResponse::builder().build().unwrap_err();
        assert_eq!(err.property(), "acknowledged");
        assert_eq!(err.type_name(), "AcknowledgedResponse");
    }

    #[test]
    fn test_json() {
        let response: AcknowledgedResponse =
            serde_json::from_value(json!({"acknowledged": false, "extra": 1})).unwrap();
        assert!(!response.acknowledged());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"acknowledged": false})
        );
    }
}
