//! Typed records with forward-compatible additional properties.
//!
//! A [`Record`] pairs a registered [`Schema`] with one optional slot per
//! declared property and an insertion-ordered bag of additional properties.
//! Decoding never fails on unknown keys: they land in the bag and are written
//! back after the declared fields, so a record survives a round trip through
//! a consumer whose schema is older than the producer's.
//!
//! # Example
//!
//! ```
//! use narrec::narrative;
//! use serde_json::json;
//!
//! let registry = narrative::registry();
//! let record = registry
//!     .deserialize("RequestNarrativeShareOutput", &json!({"ok": 1, "unexpected": "x"}))
//!     .unwrap();
//!
//! assert_eq!(record.get_int("ok"), Some(1));
//! assert!(!record.is_present("error"));
//! assert_eq!(record.to_json_string().unwrap(), r#"{"ok":1,"unexpected":"x"}"#);
//! ```

mod additional;

pub use additional::AdditionalPropertiesMut;

use indexmap::IndexMap;
use serde::de::{DeserializeSeed, Deserializer, Error as DeError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

use crate::error::RecordError;
use crate::schema::types::{json_type_name, key_path};
use crate::schema::Schema;
use crate::value::FieldValue;

/// A wire-level object of a known schema.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    /// One slot per declared property, in schema order. `None` is "not present".
    values: Vec<Option<FieldValue>>,
    additional: IndexMap<String, JsonValue>,
}

impl Record {
    /// Create an empty record: no declared field present, no additional properties.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = vec![None; schema.len()];
        Self {
            schema,
            values,
            additional: IndexMap::new(),
        }
    }

    /// The schema this record was built from
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Name of the record's schema
    pub fn schema_name(&self) -> &str {
        self.schema.name()
    }

    fn slot(&self, name: &str) -> Result<usize, RecordError> {
        self.schema
            .position(name)
            .ok_or_else(|| RecordError::UnknownProperty {
                schema: self.schema.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Value of a declared property; `None` if it is not present or not declared.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .position(name)
            .and_then(|i| self.values[i].as_ref())
    }

    /// String value of a declared property
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Integer value of a declared property
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    /// Float value of a declared property; ints widen
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_float)
    }

    /// Boolean value of a declared property
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// List value of a declared property
    pub fn get_list(&self, name: &str) -> Option<&[FieldValue]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Nested record held by a declared property
    pub fn get_record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(FieldValue::as_record)
    }

    /// The present value, or the schema's documented default.
    pub fn get_or_default(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)
            .or_else(|| self.schema.property(name).and_then(|p| p.default_value()))
    }

    /// True if the declared property is present (including an explicit null).
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a declared property.
    ///
    /// Values are checked against the declared type without coercion;
    /// `FieldValue::Null` is accepted only for optional properties.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        let index = self.slot(name)?;
        let checked = self.schema.properties()[index].accept(value.into(), name)?;
        self.values[index] = Some(checked);
        Ok(())
    }

    /// Set a declared property from its wire representation.
    pub fn set_json(&mut self, name: &str, value: &JsonValue) -> Result<(), RecordError> {
        let index = self.slot(name)?;
        let decoded = self.schema.properties()[index].decode(value, name)?;
        self.values[index] = Some(decoded);
        Ok(())
    }

    /// Return a declared property to "not present", yielding its old value.
    pub fn unset(&mut self, name: &str) -> Result<Option<FieldValue>, RecordError> {
        let index = self.slot(name)?;
        Ok(self.values[index].take())
    }

    /// Builder-style [`set`](Self::set).
    ///
    /// ```
    /// use narrec::narrative;
    ///
    /// let input = narrative::registry()
    ///     .record("RequestNarrativeShareInput")
    ///     .and_then(|r| r.with("user", "wjriehl"))
    ///     .and_then(|r| r.with("ws_id", 1234i64))
    ///     .and_then(|r| r.with("share_level", "r"))
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     input.to_json_string().unwrap(),
    ///     r#"{"ws_id":1234,"share_level":"r","user":"wjriehl"}"#
    /// );
    /// ```
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Builder-style [`set_additional_property`](Self::set_additional_property).
    pub fn with_additional(
        mut self,
        name: &str,
        value: impl Into<JsonValue>,
    ) -> Result<Self, RecordError> {
        self.set_additional_property(name, value)?;
        Ok(self)
    }

    /// Additional properties in first-seen order.
    pub fn additional_properties(&self) -> &IndexMap<String, JsonValue> {
        &self.additional
    }

    /// Live, mutable view of the additional properties. Changes are
    /// reflected in later serialization.
    pub fn additional_properties_mut(&mut self) -> AdditionalPropertiesMut<'_> {
        AdditionalPropertiesMut::new(&self.schema, &mut self.additional)
    }

    /// Insert or overwrite an additional property. Overwriting keeps the
    /// key's original position.
    pub fn set_additional_property(
        &mut self,
        name: &str,
        value: impl Into<JsonValue>,
    ) -> Result<Option<JsonValue>, RecordError> {
        self.additional_properties_mut().insert(name, value)
    }

    /// Remove an additional property, returning its value
    pub fn remove_additional_property(&mut self, name: &str) -> Option<JsonValue> {
        self.additional_properties_mut().remove(name)
    }

    /// Present declared fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .properties()
            .iter()
            .zip(&self.values)
            .filter_map(|(p, v)| v.as_ref().map(|v| (p.name(), v)))
    }

    /// Required properties that are not present.
    pub fn missing_required(&self) -> Vec<&str> {
        self.schema
            .properties()
            .iter()
            .zip(&self.values)
            .filter(|(p, v)| !p.is_optional() && v.is_none())
            .map(|(p, _)| p.name())
            .collect()
    }

    /// Wire object: declared fields in schema order (absent ones omitted),
    /// then additional properties in insertion order.
    pub fn to_wire(&self) -> JsonMap<String, JsonValue> {
        let mut wire = JsonMap::new();
        for (name, value) in self.fields() {
            wire.insert(name.to_string(), value.to_json());
        }
        for (name, value) in &self.additional {
            wire.insert(name.clone(), value.clone());
        }
        wire
    }

    /// Wire object as a `serde_json::Value`
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.to_wire())
    }

    /// Compact JSON text
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON text
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decode a wire object.
    ///
    /// Declared keys are type-checked; every other key is kept verbatim as
    /// an additional property, in the order encountered.
    pub fn from_wire(schema: Arc<Schema>, wire: &JsonValue) -> Result<Self, RecordError> {
        let object = wire.as_object().ok_or_else(|| {
            RecordError::mismatch("", format!("{} object", schema.name()), json_type_name(wire))
        })?;
        Self::decode_object(schema, object, "")
    }

    pub(crate) fn decode_object(
        schema: Arc<Schema>,
        object: &JsonMap<String, JsonValue>,
        path: &str,
    ) -> Result<Self, RecordError> {
        let mut record = Record::new(schema);
        for (key, value) in object {
            match record.schema.position(key) {
                Some(index) => {
                    let decoded = record.schema.properties()[index]
                        .decode(value, &key_path(path, key))?;
                    record.values[index] = Some(decoded);
                }
                None => {
                    record.additional.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(record)
    }

    /// Deterministic, human-readable rendering for logs.
    ///
    /// Every declared property is listed in schema order under its camelCase
    /// label (`<absent>` when not present), followed by the additional
    /// properties in insertion order. Additional values are rendered as JSON,
    /// so the string `"1"` and the number `1` stay distinguishable.
    pub fn describe(&self) -> String {
        let mut out = format!("{} [", self.schema.name());
        for (property, value) in self.schema.properties().iter().zip(&self.values) {
            out.push_str(property.label());
            out.push('=');
            match value {
                Some(v) => out.push_str(&v.to_string()),
                None => out.push_str("<absent>"),
            }
            out.push_str(", ");
        }
        out.push_str("additionalProperties={");
        for (i, (name, value)) in self.additional.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
            out.push('=');
            out.push_str(&value.to_string());
        }
        out.push_str("}]");
        out
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name()
            && self.values == other.values
            && self.additional == other.additional
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.values.iter().filter(|v| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(present + self.additional.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        for (name, value) in &self.additional {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Deserialize a [`Record`] of a given schema through serde.
///
/// ```
/// use narrec::{narrative, RecordSeed};
/// use serde::de::DeserializeSeed;
///
/// let schema = narrative::registry().schema("FindObjectReportParams").unwrap();
/// let mut de = serde_json::Deserializer::from_str(r#"{"upa":"5/2/1"}"#);
/// let record = RecordSeed::new(schema).deserialize(&mut de).unwrap();
/// assert_eq!(record.get_str("upa"), Some("5/2/1"));
/// ```
#[derive(Debug, Clone)]
pub struct RecordSeed {
    schema: Arc<Schema>,
}

impl RecordSeed {
    /// Seed decoding a record of `schema`
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }
}

impl<'de> DeserializeSeed<'de> for RecordSeed {
    type Value = Record;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Record, D::Error> {
        let wire = JsonValue::deserialize(deserializer)?;
        Record::from_wire(self.schema, &wire).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PropertyDef, SchemaRegistry, TypeExpr};
    use serde_json::json;

    fn share_output() -> Arc<Schema> {
        let mut registry = SchemaRegistry::new();
        registry
            .define(
                "RequestNarrativeShareOutput",
                vec![
                    PropertyDef::new("ok", TypeExpr::Int),
                    PropertyDef::new("error", TypeExpr::String).optional(),
                ],
            )
            .unwrap()
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = Record::new(share_output());
        assert_eq!(record.fields().count(), 0);
        assert!(record.additional_properties().is_empty());
        assert_eq!(record.to_json(), json!({}));
        assert_eq!(record.missing_required(), vec!["ok"]);
    }

    #[test]
    fn test_set_and_get() {
        let mut record = Record::new(share_output());
        record.set("ok", 0i64).unwrap();
        record.set("error", "A request has already been made").unwrap();

        assert_eq!(record.get_int("ok"), Some(0));
        assert_eq!(record.get_str("error"), Some("A request has already been made"));
        assert!(record.missing_required().is_empty());
    }

    #[test]
    fn test_set_type_mismatch() {
        let mut record = Record::new(share_output());
        let err = record.set("ok", "yes").unwrap_err();
        assert_eq!(
            err,
            RecordError::TypeMismatch {
                path: "ok".to_string(),
                expected: "int".to_string(),
                found: "string".to_string(),
            }
        );
        assert!(!record.is_present("ok"));
    }

    #[test]
    fn test_set_unknown_property() {
        let mut record = Record::new(share_output());
        assert!(matches!(
            record.set("ws_id", 1i64),
            Err(RecordError::UnknownProperty { .. })
        ));
        assert_eq!(record.get("ws_id"), None);
    }

    #[test]
    fn test_unset_returns_to_absent() {
        let mut record = Record::new(share_output()).with("ok", 1i64).unwrap();
        assert_eq!(record.unset("ok").unwrap(), Some(FieldValue::Int(1)));
        assert!(!record.is_present("ok"));
        assert_eq!(record.unset("ok").unwrap(), None);
    }

    #[test]
    fn test_explicit_null_is_kept() {
        let record = Record::from_wire(share_output(), &json!({"ok": 1, "error": null})).unwrap();
        assert!(record.is_present("error"));
        assert_eq!(record.get("error"), Some(&FieldValue::Null));
        assert_eq!(record.to_json(), json!({"ok": 1, "error": null}));
    }

    #[test]
    fn test_null_rejected_for_required() {
        let err = Record::from_wire(share_output(), &json!({"ok": null})).unwrap_err();
        assert!(matches!(err, RecordError::TypeMismatch { .. }));
    }

    #[test]
    fn test_collision_rejected() {
        let mut record = Record::new(share_output());
        let err = record.set_additional_property("ok", 1).unwrap_err();
        assert_eq!(
            err,
            RecordError::SchemaCollision {
                schema: "RequestNarrativeShareOutput".to_string(),
                name: "ok".to_string(),
            }
        );
        assert!(record.additional_properties().is_empty());
    }

    #[test]
    fn test_additional_order_is_first_insertion() {
        let mut record = Record::new(share_output());
        record.set_additional_property("b", 1).unwrap();
        record.set_additional_property("a", 2).unwrap();
        let old = record.set_additional_property("b", 3).unwrap();

        assert_eq!(old, Some(json!(1)));
        let keys: Vec<_> = record.additional_properties().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_serialization_order_ignores_assignment_order() {
        let record = Record::new(share_output())
            .with_additional("extra", "x")
            .unwrap()
            .with("error", "oops")
            .unwrap()
            .with("ok", 0i64)
            .unwrap();

        assert_eq!(
            record.to_json_string().unwrap(),
            r#"{"ok":0,"error":"oops","extra":"x"}"#
        );
    }

    #[test]
    fn test_builder_call_order_is_irrelevant() {
        let a = Record::new(share_output())
            .with("ok", 1i64)
            .unwrap()
            .with("error", "e")
            .unwrap();
        let b = Record::new(share_output())
            .with("error", "e")
            .unwrap()
            .with("ok", 1i64)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_record_must_match_schema_shape() {
        fn catalog(context_props: Vec<PropertyDef>) -> SchemaRegistry {
            let mut registry = SchemaRegistry::new();
            registry.define("LogContext", context_props).unwrap();
            registry
                .define(
                    "LogSaveParams",
                    vec![PropertyDef::new("context", TypeExpr::Named("LogContext".to_string()))],
                )
                .unwrap();
            registry
        }

        let ours = catalog(vec![PropertyDef::new("narr_ref", TypeExpr::String).optional()]);
        let twin = catalog(vec![PropertyDef::new("narr_ref", TypeExpr::String).optional()]);
        let other = catalog(vec![PropertyDef::new("narr_ref", TypeExpr::Int)]);

        let mut params = ours.record("LogSaveParams").unwrap();

        let foreign = other.record("LogContext").unwrap();
        let err = params.set("context", foreign).unwrap_err();
        assert!(matches!(err, RecordError::TypeMismatch { ref path, .. } if path == "context"));
        assert!(!params.is_present("context"));

        let same_shape = twin.record("LogContext").unwrap().with("narr_ref", "1/2").unwrap();
        params.set("context", same_shape).unwrap();
        assert_eq!(params.to_json(), json!({"context": {"narr_ref": "1/2"}}));
    }

    #[test]
    fn test_from_wire_rejects_non_object() {
        let err = Record::from_wire(share_output(), &json!([1, 2])).unwrap_err();
        match err {
            RecordError::TypeMismatch { path, found, .. } => {
                assert_eq!(path, "");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_describe() {
        let record = Record::from_wire(share_output(), &json!({"unexpected": "x", "ok": 1})).unwrap();
        assert_eq!(
            record.describe(),
            "RequestNarrativeShareOutput [ok=1, error=<absent>, additionalProperties={unexpected=\"x\"}]"
        );
        assert_eq!(record.to_string(), record.describe());
    }

    #[test]
    fn test_wire_and_serde_agree() {
        let record = Record::from_wire(share_output(), &json!({"z": [1], "ok": 1, "a": {"b": 2}})).unwrap();
        let via_serde: JsonValue = serde_json::from_str(&record.to_json_string().unwrap()).unwrap();
        assert_eq!(via_serde, record.to_json());
    }
}
