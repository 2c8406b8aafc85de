//! Schema registry and dependency-ordered registration.
//!
//! Nested record types are resolved when a schema is defined, so every
//! schema a property refers to must already be registered. Batches of
//! definitions (such as a YAML document) are registered in topological
//! order using Kahn's algorithm; reference cycles are rejected.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;

use crate::error::{RecordError, SchemaError};
use crate::record::Record;
use crate::schema::document::{self, SchemaDocument};
use crate::schema::types::{Constraints, FieldType, StringFormat, TypeExpr};
use crate::schema::{Property, PropertyDef, Schema, SchemaDef};
use crate::service::ServiceDef;

/// Registry of named schemas and service method catalogs.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Arc<Schema>>,
    pub(crate) services: IndexMap<String, ServiceDef>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema from its name and ordered property list.
    ///
    /// # Example
    /// ```
    /// use narrec::schema::{PropertyDef, SchemaRegistry, TypeExpr};
    ///
    /// let mut registry = SchemaRegistry::new();
    /// let schema = registry
    ///     .define("FindObjectReportParams", vec![PropertyDef::new("upa", TypeExpr::String)])
    ///     .unwrap();
    /// assert_eq!(schema.len(), 1);
    /// ```
    pub fn define(
        &mut self,
        name: impl Into<String>,
        properties: Vec<PropertyDef>,
    ) -> Result<Arc<Schema>, SchemaError> {
        self.define_schema(SchemaDef::new(name, properties))
    }

    /// Register a schema definition.
    pub fn define_schema(&mut self, def: SchemaDef) -> Result<Arc<Schema>, SchemaError> {
        if def.name.trim().is_empty() {
            return Err(SchemaError::EmptySchemaName);
        }
        if self.schemas.contains_key(&def.name) {
            return Err(SchemaError::DuplicateSchema { name: def.name });
        }

        let mut seen = HashSet::new();
        let mut properties = Vec::with_capacity(def.properties.len());

        for prop in &def.properties {
            if prop.name.is_empty() {
                return Err(SchemaError::EmptyPropertyName {
                    schema: def.name.clone(),
                });
            }
            if !seen.insert(prop.name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    schema: def.name.clone(),
                    name: prop.name.clone(),
                });
            }

            let field_type = self.resolve(&def.name, &prop.type_expr)?;
            let constraints = build_constraints(&def.name, prop)?;
            let mut property = Property::new(
                prop.name.clone(),
                field_type,
                prop.optional,
                prop.doc.clone(),
                constraints,
            );

            if let Some(default) = &prop.default {
                let value = property
                    .decode(default, &prop.name)
                    .map_err(|e| SchemaError::InvalidDefault {
                        schema: def.name.clone(),
                        property: prop.name.clone(),
                        reason: e.to_string(),
                    })?;
                property.set_default(value);
            }

            properties.push(property);
        }

        let schema = Arc::new(Schema::new(def.name.clone(), def.doc, properties));
        tracing::debug!(
            schema = %schema.name(),
            properties = schema.len(),
            "Registered schema"
        );
        self.schemas.insert(def.name, schema.clone());
        Ok(schema)
    }

    /// Register a batch of definitions in dependency order.
    ///
    /// Definitions may refer to each other in any order, and to schemas that
    /// are already registered. The batch is all-or-nothing: if any definition
    /// fails, the registry is left as it was.
    pub fn define_all(&mut self, defs: Vec<SchemaDef>) -> Result<Vec<Arc<Schema>>, SchemaError> {
        let mut staged = self.clone();
        let registered = staged.define_ordered(defs)?;
        *self = staged;
        Ok(registered)
    }

    fn define_ordered(&mut self, defs: Vec<SchemaDef>) -> Result<Vec<Arc<Schema>>, SchemaError> {
        let order = compute_registration_order(&defs, |name| self.contains(name))?;

        let mut slots: Vec<Option<SchemaDef>> = defs.into_iter().map(Some).collect();
        let mut registered = Vec::with_capacity(slots.len());
        for index in order {
            if let Some(def) = slots[index].take() {
                registered.push(self.define_schema(def)?);
            }
        }
        Ok(registered)
    }

    /// Load every schema and service in a parsed document.
    pub fn load_document(&mut self, doc: SchemaDocument) -> Result<(), SchemaError> {
        self.load_documents(vec![doc])
    }

    /// Load several documents as one batch so they may reference each other.
    ///
    /// Nothing is registered unless every schema and service method in the
    /// batch is valid.
    pub fn load_documents(&mut self, docs: Vec<SchemaDocument>) -> Result<(), SchemaError> {
        let mut defs = Vec::new();
        let mut services = Vec::new();
        for doc in docs {
            defs.extend(doc.schemas);
            services.extend(doc.service);
        }

        let mut staged = self.clone();
        staged.define_ordered(defs)?;
        for service in services {
            staged.register_service(service)?;
        }
        *self = staged;
        Ok(())
    }

    /// Load a schema document from a YAML string.
    pub fn load_str(&mut self, yaml: &str) -> Result<(), SchemaError> {
        self.load_document(SchemaDocument::from_yaml_str(yaml)?)
    }

    /// Load a single schema document file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SchemaError> {
        let doc = document::load_document(path.as_ref())?;
        self.load_document(doc)?;
        tracing::info!("Loaded schemas from {}", path.as_ref().display());
        Ok(())
    }

    /// Load every `.yaml`/`.yml` document in a directory as one batch.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<(), SchemaError> {
        let before = self.len();
        let docs = document::load_documents(dir.as_ref())?;
        self.load_documents(docs)?;
        tracing::info!(
            "Loaded {} schemas from {}",
            self.len() - before,
            dir.as_ref().display()
        );
        Ok(())
    }

    /// Look up a schema by name
    pub fn get(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    /// Look up a schema, failing with `UnknownSchema`.
    pub fn schema(&self, name: &str) -> Result<Arc<Schema>, RecordError> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| RecordError::UnknownSchema {
                name: name.to_string(),
            })
    }

    /// True if a schema of this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Schema names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Schemas in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.schemas.values()
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Create an empty record of the named schema.
    pub fn record(&self, name: &str) -> Result<Record, RecordError> {
        Ok(Record::new(self.schema(name)?))
    }

    /// Decode a wire object against the named schema.
    pub fn deserialize(&self, name: &str, wire: &JsonValue) -> Result<Record, RecordError> {
        Record::from_wire(self.schema(name)?, wire)
    }

    fn resolve(&self, owner: &str, expr: &TypeExpr) -> Result<FieldType, SchemaError> {
        Ok(match expr {
            TypeExpr::String => FieldType::String,
            TypeExpr::Int => FieldType::Int,
            TypeExpr::Float => FieldType::Float,
            TypeExpr::Bool => FieldType::Bool,
            TypeExpr::Any => FieldType::Any,
            TypeExpr::List(inner) => FieldType::List(Box::new(self.resolve(owner, inner)?)),
            TypeExpr::Mapping(inner) => FieldType::Mapping(Box::new(self.resolve(owner, inner)?)),
            TypeExpr::Named(target) => match self.schemas.get(target) {
                Some(schema) => FieldType::Record(schema.clone()),
                None => {
                    return Err(SchemaError::UnresolvedReference {
                        schema: owner.to_string(),
                        target: target.clone(),
                    })
                }
            },
        })
    }
}

fn build_constraints(schema: &str, prop: &PropertyDef) -> Result<Constraints, SchemaError> {
    let invalid = |reason: String| SchemaError::InvalidConstraint {
        schema: schema.to_string(),
        property: prop.name.clone(),
        reason,
    };

    let pattern = prop
        .pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|e| invalid(e.to_string()))?;

    let format = prop
        .format
        .as_deref()
        .map(|f| f.parse::<StringFormat>())
        .transpose()
        .map_err(invalid)?;

    let constraints = Constraints {
        pattern,
        allowed: prop.allowed.clone(),
        format,
    };

    if !constraints.is_empty() && !holds_strings(&prop.type_expr) {
        return Err(invalid(format!(
            "string constraints on non-string type {}",
            prop.type_expr
        )));
    }

    Ok(constraints)
}

fn holds_strings(expr: &TypeExpr) -> bool {
    match expr {
        TypeExpr::String => true,
        TypeExpr::List(inner) | TypeExpr::Mapping(inner) => holds_strings(inner),
        _ => false,
    }
}

/// Compute the order in which a batch of definitions must be registered.
///
/// Returns indexes into `defs` such that every schema comes after the
/// schemas it references. References satisfied by `is_known` (already
/// registered schemas) impose no ordering. Ties keep document order.
///
/// # Errors
/// - `DuplicateSchema` if two definitions share a name
/// - `UnresolvedReference` if a reference is neither in the batch nor known
/// - `CircularReference` if the references form a cycle (including self-references)
pub fn compute_registration_order<F>(
    defs: &[SchemaDef],
    is_known: F,
) -> Result<Vec<usize>, SchemaError>
where
    F: Fn(&str) -> bool,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (i, def) in defs.iter().enumerate() {
        if positions.insert(def.name.as_str(), i).is_some() {
            return Err(SchemaError::DuplicateSchema {
                name: def.name.clone(),
            });
        }
    }

    let mut in_degree = vec![0usize; defs.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); defs.len()];

    for (i, def) in defs.iter().enumerate() {
        for dep in def.dependencies() {
            match positions.get(dep) {
                Some(&j) => {
                    in_degree[i] += 1;
                    dependents[j].push(i);
                }
                None if is_known(dep) => {}
                None => {
                    return Err(SchemaError::UnresolvedReference {
                        schema: def.name.clone(),
                        target: dep.to_string(),
                    })
                }
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..defs.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut sorted = Vec::with_capacity(defs.len());

    while let Some(i) = queue.pop_front() {
        sorted.push(i);
        for &dependent in &dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if sorted.len() != defs.len() {
        let schemas = defs
            .iter()
            .enumerate()
            .filter(|(i, _)| !sorted.contains(i))
            .map(|(_, def)| def.name.clone())
            .collect();
        return Err(SchemaError::CircularReference { schemas });
    }

    Ok(sorted)
}
