use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::error::RecordError;
use crate::schema::Schema;

/// Mutable view of a record's additional properties.
///
/// Behaves like the underlying ordered map, except that inserting a name the
/// schema declares fails with `SchemaCollision`, which keeps the declared and
/// additional namespaces disjoint.
pub struct AdditionalPropertiesMut<'a> {
    schema: &'a Schema,
    map: &'a mut IndexMap<String, JsonValue>,
}

impl<'a> AdditionalPropertiesMut<'a> {
    pub(super) fn new(schema: &'a Schema, map: &'a mut IndexMap<String, JsonValue>) -> Self {
        Self { schema, map }
    }

    /// Insert or overwrite; new keys go last, existing keys keep their position.
    pub fn insert(
        &mut self,
        name: &str,
        value: impl Into<JsonValue>,
    ) -> Result<Option<JsonValue>, RecordError> {
        if self.schema.declares(name) {
            return Err(RecordError::SchemaCollision {
                schema: self.schema.name().to_string(),
                name: name.to_string(),
            });
        }
        Ok(self.map.insert(name.to_string(), value.into()))
    }

    /// Remove a property, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<JsonValue> {
        self.map.shift_remove(name)
    }

    /// Value of an additional property
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.map.get(name)
    }

    /// Mutable value of an additional property
    pub fn get_mut(&mut self, name: &str) -> Option<&mut JsonValue> {
        self.map.get_mut(name)
    }

    /// True if the additional property is set
    pub fn contains_key(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Keep only the properties for which `keep` returns true, preserving order
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&String, &mut JsonValue) -> bool,
    {
        self.map.retain(keep);
    }

    /// Drop every additional property
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Properties in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RecordError;
    use crate::record::Record;
    use crate::schema::{PropertyDef, SchemaRegistry, TypeExpr};
    use serde_json::json;

    fn record() -> Record {
        let mut registry = SchemaRegistry::new();
        registry
            .define("FindObjectReportParams", vec![PropertyDef::new("upa", TypeExpr::String)])
            .unwrap();
        registry.record("FindObjectReportParams").unwrap()
    }

    #[test]
    fn test_live_view_mutations_are_serialized() {
        let mut record = record().with("upa", "1/2/3").unwrap();
        {
            let mut extra = record.additional_properties_mut();
            extra.insert("first", 1).unwrap();
            extra.insert("second", "two").unwrap();
            extra.insert("third", json!([3])).unwrap();
            *extra.get_mut("second").unwrap() = json!("TWO");
            extra.remove("first");
        }
        assert_eq!(
            record.to_json_string().unwrap(),
            r#"{"upa":"1/2/3","second":"TWO","third":[3]}"#
        );
    }

    #[test]
    fn test_live_view_rejects_declared_names() {
        let mut record = record();
        let mut extra = record.additional_properties_mut();
        assert!(matches!(
            extra.insert("upa", "x"),
            Err(RecordError::SchemaCollision { .. })
        ));
        assert!(extra.is_empty());
    }

    #[test]
    fn test_retain_and_clear() {
        let mut record = record()
            .with_additional("a", 1)
            .unwrap()
            .with_additional("b", 2)
            .unwrap();
        record.additional_properties_mut().retain(|k, _| k == "b");
        assert_eq!(record.additional_properties().len(), 1);
        record.additional_properties_mut().clear();
        assert!(record.additional_properties().is_empty());
    }
}
