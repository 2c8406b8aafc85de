//! # narrec: forward-compatible typed records for NarrativeService
//!
//! narrec decodes and encodes the JSON data-transfer objects of the
//! NarrativeService API against runtime schemas. Each record keeps its
//! declared fields typed and in declaration order, and carries every
//! undeclared key it received in an ordered additional-properties bag, so a
//! record decoded from a newer peer re-serializes without losing data.
//!
//! ## Example: decode, inspect, re-serialize
//!
//! ```
//! use narrec::narrative;
//! use serde_json::json;
//!
//! let registry = narrative::registry();
//! let wire = json!({"ok": 1, "unexpected": "x"});
//!
//! let record = registry.deserialize("RequestNarrativeShareOutput", &wire).unwrap();
//! assert_eq!(record.get_int("ok"), Some(1));
//! assert!(record.get("error").is_none());
//! assert_eq!(record.additional_properties()["unexpected"], json!("x"));
//! assert_eq!(record.to_json(), wire);
//! ```
//!
//! ## Example: custom schemas
//!
//! ```yaml
//! schemas:
//!   - name: JobStatus
//!     properties:
//!       - { name: job_id, type: string, pattern: '^\d+/\d+$' }
//!       - { name: state, type: string, optional: true, default: queued, allowed: [queued, running, done] }
//!       - { name: context, type: LogContext, optional: true }
//! ```
//!
//! Documents like this are loaded with [`SchemaRegistry::load_str`] or
//! [`SchemaRegistry::load_dir`]; schemas may reference each other by name and
//! are registered in dependency order.

pub mod codegen;
pub mod config;
pub mod error;
pub mod narrative;
pub mod record;
pub mod schema;
pub mod serialization;
pub mod service;
pub mod value;

pub use error::{RecordError, SchemaError};
pub use record::{AdditionalPropertiesMut, Record, RecordSeed};
pub use schema::{
    FieldType, Property, PropertyDef, Schema, SchemaDef, SchemaDocument, SchemaRegistry, TypeExpr,
};
pub use service::{MethodDef, ServiceDef};
pub use value::FieldValue;
