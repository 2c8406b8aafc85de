//! Error types for record and schema operations.
//!
//! `RecordError` covers everything that can go wrong while reading, writing or
//! decoding a record against an already-registered schema. `SchemaError`
//! covers problems in schema definitions themselves.

use std::fmt;

/// Error type for record operations
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A value does not match the declared type of a property.
    ///
    /// `path` is a dotted/indexed location such as `context.narr_version`
    /// or `report_upas[2]`; it is empty for the record root.
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },
    /// An additional property name collides with a declared property.
    SchemaCollision {
        schema: String,
        name: String,
    },
    /// No schema with this name is registered.
    UnknownSchema {
        name: String,
    },
    /// A typed accessor was called with a name the schema does not declare.
    UnknownProperty {
        schema: String,
        name: String,
    },
    /// No service method with this name is registered.
    UnknownMethod {
        name: String,
    },
}

impl RecordError {
    pub(crate) fn mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        RecordError::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::TypeMismatch { path, expected, found } => {
                if path.is_empty() {
                    write!(f, "Type mismatch: expected {}, got {}", expected, found)
                } else {
                    write!(f, "Type mismatch at '{}': expected {}, got {}", path, expected, found)
                }
            }
            RecordError::SchemaCollision { schema, name } => {
                write!(
                    f,
                    "Additional property '{}' collides with a declared property of {}",
                    name, schema
                )
            }
            RecordError::UnknownSchema { name } => write!(f, "Unknown schema: {}", name),
            RecordError::UnknownProperty { schema, name } => {
                write!(f, "Schema {} declares no property '{}'", schema, name)
            }
            RecordError::UnknownMethod { name } => write!(f, "Unknown service method: {}", name),
        }
    }
}

impl std::error::Error for RecordError {}

/// Error type for schema definition and loading
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    EmptySchemaName,
    EmptyPropertyName {
        schema: String,
    },
    DuplicateSchema {
        name: String,
    },
    DuplicateProperty {
        schema: String,
        name: String,
    },
    InvalidType {
        expr: String,
        reason: String,
    },
    InvalidConstraint {
        schema: String,
        property: String,
        reason: String,
    },
    InvalidDefault {
        schema: String,
        property: String,
        reason: String,
    },
    UnresolvedReference {
        schema: String,
        target: String,
    },
    CircularReference {
        schemas: Vec<String>,
    },
    InvalidMethod {
        method: String,
        reason: String,
    },
    ParseError(String),
    IoError(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::EmptySchemaName => write!(f, "Schema name must not be empty"),
            SchemaError::EmptyPropertyName { schema } => {
                write!(f, "Schema {} has a property with an empty name", schema)
            }
            SchemaError::DuplicateSchema { name } => {
                write!(f, "Schema {} is already registered", name)
            }
            SchemaError::DuplicateProperty { schema, name } => {
                write!(f, "Schema {} declares property '{}' more than once", schema, name)
            }
            SchemaError::InvalidType { expr, reason } => {
                write!(f, "Invalid type expression '{}': {}", expr, reason)
            }
            SchemaError::InvalidConstraint { schema, property, reason } => {
                write!(f, "Invalid constraint on {}.{}: {}", schema, property, reason)
            }
            SchemaError::InvalidDefault { schema, property, reason } => {
                write!(f, "Invalid default for {}.{}: {}", schema, property, reason)
            }
            SchemaError::UnresolvedReference { schema, target } => {
                write!(f, "Schema {} references undefined schema {}", schema, target)
            }
            SchemaError::CircularReference { schemas } => {
                write!(f, "Circular schema reference involving: {:?}", schemas)
            }
            SchemaError::InvalidMethod { method, reason } => {
                write!(f, "Invalid service method '{}': {}", method, reason)
            }
            SchemaError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            SchemaError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<serde_yaml::Error> for SchemaError {
    fn from(err: serde_yaml::Error) -> Self {
        SchemaError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::IoError(err.to_string())
    }
}
