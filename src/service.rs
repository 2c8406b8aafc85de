//! Service method catalog.
//!
//! Maps JSON-RPC method names to the schemas of their parameter and result
//! objects, so a transport layer can pick the right schema for a payload.
//! Methods can be looked up bare (`find_object_report`) or qualified with
//! the service name (`NarrativeService.find_object_report`), which is how
//! KBase JSON-RPC clients name them on the wire.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

use crate::error::{RecordError, SchemaError};
use crate::record::Record;
use crate::schema::SchemaRegistry;

/// Service definition from a schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDef {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

/// A single service method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDef {
    pub name: String,
    /// Schema of the params object
    pub params: String,
    /// Schema of the result object
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ServiceDef {
    /// An empty service catalog
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method taking `params` and returning `result`
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        params: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        self.methods.push(MethodDef {
            name: name.into(),
            params: params.into(),
            result: result.into(),
            doc: None,
        });
        self
    }

    /// Method by its unqualified name
    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

impl SchemaRegistry {
    /// Register a service catalog. Every referenced schema must already be
    /// registered; methods of a service registered twice are merged.
    ///
    /// All methods are checked before any is added, so a rejected catalog
    /// leaves the registry unchanged.
    pub fn register_service(&mut self, service: ServiceDef) -> Result<(), SchemaError> {
        let existing = self.services.get(&service.name);
        let mut seen = HashSet::new();

        for method in &service.methods {
            for schema in [&method.params, &method.result] {
                if !self.contains(schema) {
                    return Err(SchemaError::InvalidMethod {
                        method: method.name.clone(),
                        reason: format!("unknown schema {}", schema),
                    });
                }
            }

            let registered = existing.map_or(false, |s| s.method(&method.name).is_some());
            if registered || !seen.insert(method.name.as_str()) {
                return Err(SchemaError::InvalidMethod {
                    method: method.name.clone(),
                    reason: format!("already registered in {}", service.name),
                });
            }
        }

        let entry = self
            .services
            .entry(service.name.clone())
            .or_insert_with(|| ServiceDef::new(service.name.clone()));

        for method in service.methods {
            tracing::debug!(
                service = %entry.name,
                method = %method.name,
                "Registered service method"
            );
            entry.methods.push(method);
        }
        Ok(())
    }

    /// Registered services in registration order
    pub fn services(&self) -> impl Iterator<Item = &ServiceDef> {
        self.services.values()
    }

    /// Look up a method by bare or `Service.method` name.
    pub fn method(&self, name: &str) -> Result<&MethodDef, RecordError> {
        let found = match name.split_once('.') {
            Some((service, method)) => self.services.get(service).and_then(|s| s.method(method)),
            None => self.services.values().find_map(|s| s.method(name)),
        };
        found.ok_or_else(|| RecordError::UnknownMethod {
            name: name.to_string(),
        })
    }

    /// Decode the params object of a method call.
    ///
    /// KBase JSON-RPC wraps params in a one-element array; both that form and
    /// a bare object are accepted.
    pub fn decode_params(&self, method: &str, params: &JsonValue) -> Result<Record, RecordError> {
        let method = self.method(method)?;
        self.deserialize(&method.params, unwrap_positional(params))
    }

    /// Decode the result object of a method call, accepting the same
    /// one-element array wrapping as [`decode_params`](Self::decode_params).
    pub fn decode_result(&self, method: &str, result: &JsonValue) -> Result<Record, RecordError> {
        let method = self.method(method)?;
        self.deserialize(&method.result, unwrap_positional(result))
    }

    /// Method names grouped by service, in registration order.
    pub fn method_names(&self) -> IndexMap<&str, Vec<&str>> {
        self.services
            .values()
            .map(|s| {
                (
                    s.name.as_str(),
                    s.methods.iter().map(|m| m.name.as_str()).collect(),
                )
            })
            .collect()
    }
}

fn unwrap_positional(value: &JsonValue) -> &JsonValue {
    match value {
        JsonValue::Array(items) if items.len() == 1 => &items[0],
        other => other,
    }
}
