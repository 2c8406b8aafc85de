//! Type expressions and resolved field types.
//!
//! A [`TypeExpr`] is what a schema document says (`list<string>`,
//! `LogContext`, ...). A [`FieldType`] is the same thing after every named
//! record has been resolved against the registry, which is what records use
//! to type-check values.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{RecordError, SchemaError};
use crate::record::Record;
use crate::schema::Schema;
use crate::value::FieldValue;

/// Unresolved type expression as written in a schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    String,
    Int,
    Float,
    Bool,
    /// Untyped JSON (`any`, or `UnspecifiedObject` in KBase type specs)
    Any,
    List(Box<TypeExpr>),
    /// String-keyed mapping
    Mapping(Box<TypeExpr>),
    /// Reference to another schema by name
    Named(String),
}

impl TypeExpr {
    /// Parse a type expression such as `int`, `list<string>` or `mapping<LogContext>`.
    pub fn parse(expr: &str) -> Result<Self, SchemaError> {
        let trimmed = expr.trim();
        let invalid = |reason: &str| SchemaError::InvalidType {
            expr: expr.to_string(),
            reason: reason.to_string(),
        };

        match trimmed {
            "" => return Err(invalid("empty type")),
            "string" => return Ok(TypeExpr::String),
            "int" => return Ok(TypeExpr::Int),
            "float" => return Ok(TypeExpr::Float),
            "bool" => return Ok(TypeExpr::Bool),
            "any" | "UnspecifiedObject" => return Ok(TypeExpr::Any),
            _ => {}
        }

        if let Some(inner) = generic_argument(trimmed, "list") {
            return Ok(TypeExpr::List(Box::new(TypeExpr::parse(inner)?)));
        }
        if let Some(inner) = generic_argument(trimmed, "mapping") {
            return Ok(TypeExpr::Mapping(Box::new(TypeExpr::parse(inner)?)));
        }

        let mut chars = trimmed.chars();
        let starts_ok = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            return Err(invalid("not a builtin type or schema name"));
        }

        Ok(TypeExpr::Named(trimmed.to_string()))
    }

    /// Names of all schemas this expression refers to.
    pub fn referenced_schemas(&self) -> Vec<&str> {
        match self {
            TypeExpr::List(inner) | TypeExpr::Mapping(inner) => inner.referenced_schemas(),
            TypeExpr::Named(name) => vec![name.as_str()],
            _ => Vec::new(),
        }
    }
}

fn generic_argument<'a>(expr: &'a str, head: &str) -> Option<&'a str> {
    expr.strip_prefix(head)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}

impl FromStr for TypeExpr {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeExpr::parse(s)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeExpr::parse(&value)
    }
}

impl From<TypeExpr> for String {
    fn from(expr: TypeExpr) -> Self {
        expr.to_string()
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::String => write!(f, "string"),
            TypeExpr::Int => write!(f, "int"),
            TypeExpr::Float => write!(f, "float"),
            TypeExpr::Bool => write!(f, "bool"),
            TypeExpr::Any => write!(f, "any"),
            TypeExpr::List(inner) => write!(f, "list<{}>", inner),
            TypeExpr::Mapping(inner) => write!(f, "mapping<{}>", inner),
            TypeExpr::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Field type with nested records resolved to their schemas.
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    Any,
    List(Box<FieldType>),
    Mapping(Box<FieldType>),
    Record(Arc<Schema>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Int => write!(f, "int"),
            FieldType::Float => write!(f, "float"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Any => write!(f, "any"),
            FieldType::List(inner) => write!(f, "list<{}>", inner),
            FieldType::Mapping(inner) => write!(f, "mapping<{}>", inner),
            FieldType::Record(schema) => write!(f, "{}", schema.name()),
        }
    }
}

impl FieldType {
    /// Structural equality. Nested records match when their schemas are the
    /// same registration or have the same shape.
    pub fn same_shape(&self, other: &FieldType) -> bool {
        match (self, other) {
            (FieldType::String, FieldType::String)
            | (FieldType::Int, FieldType::Int)
            | (FieldType::Float, FieldType::Float)
            | (FieldType::Bool, FieldType::Bool)
            | (FieldType::Any, FieldType::Any) => true,
            (FieldType::List(a), FieldType::List(b))
            | (FieldType::Mapping(a), FieldType::Mapping(b)) => a.same_shape(b),
            (FieldType::Record(a), FieldType::Record(b)) => a.same_shape(b),
            _ => false,
        }
    }

    /// Type-check a value, returning it in canonical form.
    ///
    /// Values for `any` properties are folded into [`FieldValue::Any`]; ints are
    /// accepted where floats are declared and kept as ints. Nothing else is
    /// coerced.
    pub fn accept(
        &self,
        value: FieldValue,
        constraints: &Constraints,
        path: &str,
    ) -> Result<FieldValue, RecordError> {
        match (self, value) {
            (FieldType::String, FieldValue::String(s)) => {
                constraints.check_str(&s, path)?;
                Ok(FieldValue::String(s))
            }
            (FieldType::Int, FieldValue::Int(i)) => Ok(FieldValue::Int(i)),
            (FieldType::Float, FieldValue::Float(f)) if f.is_finite() => Ok(FieldValue::Float(f)),
            (FieldType::Float, FieldValue::Int(i)) => Ok(FieldValue::Int(i)),
            (FieldType::Bool, FieldValue::Bool(b)) => Ok(FieldValue::Bool(b)),
            (FieldType::Any, FieldValue::Any(v)) => Ok(FieldValue::Any(v)),
            (FieldType::Any, other) => Ok(FieldValue::Any(other.to_json())),
            (FieldType::List(inner), FieldValue::List(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| inner.accept(item, constraints, &index_path(path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List),
            (FieldType::Mapping(inner), FieldValue::Map(entries)) => entries
                .into_iter()
                .map(|(k, v)| {
                    let checked = inner.accept(v, constraints, &key_path(path, &k))?;
                    Ok((k, checked))
                })
                .collect::<Result<IndexMap<_, _>, RecordError>>()
                .map(FieldValue::Map),
            (FieldType::Record(schema), FieldValue::Record(record)) => {
                if record.schema().same_shape(schema) {
                    Ok(FieldValue::Record(record))
                } else {
                    Err(RecordError::mismatch(
                        path,
                        schema.name(),
                        format!("record {}", record.schema().name()),
                    ))
                }
            }
            (FieldType::Float, FieldValue::Float(_)) => {
                Err(RecordError::mismatch(path, "finite float", "non-finite float"))
            }
            (expected, other) => Err(RecordError::mismatch(
                path,
                expected.to_string(),
                other.type_name(),
            )),
        }
    }

    /// Decode a wire value into a typed value.
    pub fn decode(
        &self,
        json: &JsonValue,
        constraints: &Constraints,
        path: &str,
    ) -> Result<FieldValue, RecordError> {
        let mismatch = || RecordError::mismatch(path, self.to_string(), json_type_name(json));

        match self {
            FieldType::String => {
                let s = json.as_str().ok_or_else(mismatch)?;
                constraints.check_str(s, path)?;
                Ok(FieldValue::String(s.to_string()))
            }
            FieldType::Int => json.as_i64().map(FieldValue::Int).ok_or_else(mismatch),
            FieldType::Float => match json {
                JsonValue::Number(n) => match n.as_i64() {
                    Some(i) => Ok(FieldValue::Int(i)),
                    None => n.as_f64().map(FieldValue::Float).ok_or_else(mismatch),
                },
                _ => Err(mismatch()),
            },
            FieldType::Bool => json.as_bool().map(FieldValue::Bool).ok_or_else(mismatch),
            FieldType::Any => Ok(FieldValue::Any(json.clone())),
            FieldType::List(inner) => {
                let items = json.as_array().ok_or_else(mismatch)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| inner.decode(item, constraints, &index_path(path, i)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::List)
            }
            FieldType::Mapping(inner) => {
                let entries = json.as_object().ok_or_else(mismatch)?;
                entries
                    .iter()
                    .map(|(k, v)| {
                        let decoded = inner.decode(v, constraints, &key_path(path, k))?;
                        Ok((k.clone(), decoded))
                    })
                    .collect::<Result<IndexMap<_, _>, RecordError>>()
                    .map(FieldValue::Map)
            }
            FieldType::Record(schema) => {
                let object = json.as_object().ok_or_else(mismatch)?;
                Record::decode_object(schema.clone(), object, path).map(FieldValue::Record)
            }
        }
    }
}

/// Describe a wire value's JSON type for error messages.
pub fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(n) if n.is_f64() => "float",
        JsonValue::Number(_) => "int",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

pub(crate) fn key_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn index_path(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

/// Known string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// RFC 3339 / ISO-8601 timestamp with offset
    DateTime,
}

impl FromStr for StringFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-time" => Ok(StringFormat::DateTime),
            other => Err(format!("unknown format '{}' (supported: date-time)", other)),
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringFormat::DateTime => write!(f, "date-time"),
        }
    }
}

/// Constraints applied to every string value of a property, including
/// strings inside lists and mappings.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub pattern: Option<Regex>,
    pub allowed: Vec<String>,
    pub format: Option<StringFormat>,
}

impl Constraints {
    /// True if no constraint is set
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.allowed.is_empty() && self.format.is_none()
    }

    /// Check a string value against every constraint; errors carry `path`
    pub fn check_str(&self, s: &str, path: &str) -> Result<(), RecordError> {
        if !self.allowed.is_empty() && !self.allowed.iter().any(|a| a == s) {
            return Err(RecordError::mismatch(
                path,
                format!("one of [{}]", self.allowed.join(", ")),
                format!("\"{}\"", s),
            ));
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(s) {
                return Err(RecordError::mismatch(
                    path,
                    format!("string matching /{}/", pattern.as_str()),
                    format!("\"{}\"", s),
                ));
            }
        }

        match self.format {
            Some(StringFormat::DateTime) => {
                chrono::DateTime::parse_from_rfc3339(s).map_err(|_| {
                    RecordError::mismatch(path, "RFC 3339 date-time", format!("\"{}\"", s))
                })?;
            }
            None => {}
        }

        Ok(())
    }
}
