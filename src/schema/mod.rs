//! Schemas: the fixed, ordered property lists records are built against.
//!
//! Schemas are described with [`SchemaDef`]/[`PropertyDef`] (usually loaded
//! from YAML, see [`document`]) and turned into immutable [`Schema`]s by the
//! [`SchemaRegistry`], which resolves nested record references.

pub mod document;
pub mod registry;
pub mod types;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::error::RecordError;
use crate::value::FieldValue;

pub use document::{load_document, load_documents, SchemaDocument};
pub use registry::{compute_registration_order, SchemaRegistry};
pub use types::{Constraints, FieldType, StringFormat, TypeExpr};

/// Definition of a single property, as written in a schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Documented default; reported by `Record::get_or_default`, never written to the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl PropertyDef {
    /// A required property with no doc, default or constraints
    pub fn new(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_expr,
            optional: false,
            doc: None,
            default: None,
            pattern: None,
            allowed: Vec::new(),
            format: None,
        }
    }

    /// Mark the property optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attach a doc string, carried into generated code
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Require string values to match a regular expression
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Restrict string values to a fixed set
    pub fn with_allowed<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }

    /// Require a string format; only `date-time` is understood
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Definition of a schema, as written in a schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

impl SchemaDef {
    /// A schema definition with the given properties in declaration order
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            properties,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Names of the schemas referenced by any property, in declaration order.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for property in &self.properties {
            for name in property.type_expr.referenced_schemas() {
                if !deps.contains(&name) {
                    deps.push(name);
                }
            }
        }
        deps
    }
}

/// A declared property of a registered schema.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    label: String,
    field_type: FieldType,
    optional: bool,
    doc: Option<String>,
    default: Option<FieldValue>,
    constraints: Constraints,
}

impl Property {
    pub(crate) fn new(
        name: String,
        field_type: FieldType,
        optional: bool,
        doc: Option<String>,
        constraints: Constraints,
    ) -> Self {
        let label = name.to_case(Case::Camel);
        Self {
            name,
            label,
            field_type,
            optional,
            doc,
            default: None,
            constraints,
        }
    }

    pub(crate) fn set_default(&mut self, default: FieldValue) {
        self.default = Some(default);
    }

    /// Wire name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// camelCase label used by `Record::describe`
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolved type of the property
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// True if the property may be absent or null
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Documentation from the schema definition
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Documented default, if any
    pub fn default_value(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    /// String constraints checked on every value
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Type-check a value for this property. `null` is only accepted for
    /// optional properties.
    pub fn accept(&self, value: FieldValue, path: &str) -> Result<FieldValue, RecordError> {
        if value.is_null() {
            return self.accept_null(path);
        }
        self.field_type.accept(value, &self.constraints, path)
    }

    /// Decode the wire value of this property.
    pub fn decode(&self, json: &JsonValue, path: &str) -> Result<FieldValue, RecordError> {
        if json.is_null() {
            return self.accept_null(path);
        }
        self.field_type.decode(json, &self.constraints, path)
    }

    fn accept_null(&self, path: &str) -> Result<FieldValue, RecordError> {
        match self.field_type {
            FieldType::Any => Ok(FieldValue::Any(JsonValue::Null)),
            _ if self.optional => Ok(FieldValue::Null),
            _ => Err(RecordError::mismatch(path, self.field_type.to_string(), "null")),
        }
    }
}

/// An immutable, registered schema.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    doc: Option<String>,
    properties: Vec<Property>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub(crate) fn new(name: String, doc: Option<String>, properties: Vec<Property>) -> Self {
        let index = properties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Self {
            name,
            doc,
            properties,
            index,
        }
    }

    /// Schema name, unique within a registry
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Declared properties in schema order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Declared property by wire name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.position(name).map(|i| &self.properties[i])
    }

    /// Position of a declared property in schema order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// True if `name` is a declared property
    pub fn declares(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declared property names in schema order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// True if both are the same registration, or declare the same name and
    /// the same properties (names, optionality and types) in the same order.
    pub fn same_shape(&self, other: &Schema) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.name == other.name
            && self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .zip(&other.properties)
                .all(|(a, b)| {
                    a.name == b.name
                        && a.optional == b.optional
                        && a.field_type.same_shape(&b.field_type)
                })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
