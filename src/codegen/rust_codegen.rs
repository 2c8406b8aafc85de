//! Rust wrapper generation from registered schemas.
//!
//! Each schema becomes a newtype over [`Record`](crate::Record) with typed
//! getters, `set_*` setters and `with_*` builders, so callers get the
//! ergonomics of the generated DTO classes while the record keeps its
//! validation and additional-property handling.

use std::io::Write;

use crate::codegen::utils::{accessor_name, escape_rust_string, to_pascal_case};
use crate::schema::{FieldType, Property, Schema, SchemaRegistry};

/// Configuration for Rust code generation
#[derive(Debug, Clone)]
pub struct RustCodegenConfig {
    /// Path the generated code uses to reach this crate (e.g. `narrec` or `crate`)
    pub crate_path: String,
    /// Emit `Display` impls delegating to `Record::describe`
    pub display_impls: bool,
}

impl Default for RustCodegenConfig {
    fn default() -> Self {
        Self {
            crate_path: "narrec".to_string(),
            display_impls: true,
        }
    }
}

/// Generate wrappers for every schema in the registry, in registration order.
///
/// # Example
///
/// ```
/// use narrec::codegen::{generate_rust_code, RustCodegenConfig};
/// use narrec::narrative;
///
/// let mut out = Vec::new();
/// generate_rust_code(&mut out, narrative::registry(), &RustCodegenConfig::default()).unwrap();
/// let code = String::from_utf8(out).unwrap();
/// assert!(code.contains("pub struct LogContext(Record);"));
/// ```
pub fn generate_rust_code<W: Write>(
    writer: &mut W,
    registry: &SchemaRegistry,
    config: &RustCodegenConfig,
) -> Result<(), std::io::Error> {
    writeln!(writer, "// Generated by narrec from schema definitions. Do not edit.")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "use {}::{{FieldValue, Record, RecordError, SchemaRegistry}};",
        config.crate_path
    )?;
    writeln!(writer)?;

    for schema in registry.iter() {
        generate_record(writer, schema, config)?;
    }

    Ok(())
}

/// Generate the wrapper module as a string.
pub fn generate_record_module(
    registry: &SchemaRegistry,
    config: &RustCodegenConfig,
) -> Result<String, std::io::Error> {
    let mut out = Vec::new();
    generate_rust_code(&mut out, registry, config)?;
    String::from_utf8(out).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

fn generate_record<W: Write>(
    writer: &mut W,
    schema: &Schema,
    config: &RustCodegenConfig,
) -> Result<(), std::io::Error> {
    let type_name = to_pascal_case(schema.name());

    if let Some(doc) = schema.doc() {
        write_doc(writer, "", doc)?;
    } else {
        writeln!(writer, "/// Wire type `{}`", schema.name())?;
    }
    writeln!(writer, "#[derive(Debug, Clone, PartialEq)]")?;
    writeln!(writer, "pub struct {}(Record);", type_name)?;
    writeln!(writer)?;

    writeln!(writer, "impl {} {{", type_name)?;
    writeln!(
        writer,
        "    pub const SCHEMA: &'static str = \"{}\";",
        escape_rust_string(schema.name())
    )?;
    writeln!(writer)?;

    writeln!(writer, "    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {{")?;
    writeln!(writer, "        registry.record(Self::SCHEMA).map(Self)")?;
    writeln!(writer, "    }}")?;
    writeln!(writer)?;

    writeln!(
        writer,
        "    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {{"
    )?;
    writeln!(writer, "        registry.deserialize(Self::SCHEMA, wire).map(Self)")?;
    writeln!(writer, "    }}")?;
    writeln!(writer)?;

    writeln!(writer, "    pub fn from_record(record: Record) -> Result<Self, RecordError> {{")?;
    writeln!(writer, "        if record.schema_name() == Self::SCHEMA {{")?;
    writeln!(writer, "            Ok(Self(record))")?;
    writeln!(writer, "        }} else {{")?;
    writeln!(writer, "            Err(RecordError::TypeMismatch {{")?;
    writeln!(writer, "                path: String::new(),")?;
    writeln!(writer, "                expected: Self::SCHEMA.to_string(),")?;
    writeln!(writer, "                found: record.schema_name().to_string(),")?;
    writeln!(writer, "            }})")?;
    writeln!(writer, "        }}")?;
    writeln!(writer, "    }}")?;
    writeln!(writer)?;

    writeln!(writer, "    pub fn record(&self) -> &Record {{")?;
    writeln!(writer, "        &self.0")?;
    writeln!(writer, "    }}")?;
    writeln!(writer)?;
    writeln!(writer, "    pub fn into_record(self) -> Record {{")?;
    writeln!(writer, "        self.0")?;
    writeln!(writer, "    }}")?;

    for property in schema.properties() {
        writeln!(writer)?;
        generate_accessors(writer, property)?;
    }

    writeln!(writer, "}}")?;
    writeln!(writer)?;

    if config.display_impls {
        writeln!(writer, "impl std::fmt::Display for {} {{", type_name)?;
        writeln!(
            writer,
            "    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{"
        )?;
        writeln!(writer, "        f.write_str(&self.0.describe())")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;
    }

    Ok(())
}

fn generate_accessors<W: Write>(writer: &mut W, property: &Property) -> Result<(), std::io::Error> {
    let method = accessor_name(property.name());
    let wire_name = escape_rust_string(property.name());
    let (return_type, getter) = getter_for(property.field_type());

    if let Some(doc) = property.doc() {
        write_doc(writer, "    ", doc)?;
    }
    if property.is_optional() {
        writeln!(writer, "    /// Optional.")?;
    }
    writeln!(writer, "    pub fn {}(&self) -> Option<{}> {{", method, return_type)?;
    writeln!(writer, "        self.0.{}(\"{}\")", getter, wire_name)?;
    writeln!(writer, "    }}")?;
    writeln!(writer)?;

    writeln!(
        writer,
        "    pub fn set_{}(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {{",
        method
    )?;
    writeln!(writer, "        self.0.set(\"{}\", value)", wire_name)?;
    writeln!(writer, "    }}")?;
    writeln!(writer)?;

    writeln!(
        writer,
        "    pub fn with_{}(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {{",
        method
    )?;
    writeln!(writer, "        self.0.set(\"{}\", value)?;", wire_name)?;
    writeln!(writer, "        Ok(self)")?;
    writeln!(writer, "    }}")?;

    Ok(())
}

/// Return type and `Record` getter for a field type.
fn getter_for(field_type: &FieldType) -> (&'static str, &'static str) {
    match field_type {
        FieldType::String => ("&str", "get_str"),
        FieldType::Int => ("i64", "get_int"),
        FieldType::Float => ("f64", "get_float"),
        FieldType::Bool => ("bool", "get_bool"),
        FieldType::List(_) => ("&[FieldValue]", "get_list"),
        FieldType::Record(_) => ("&Record", "get_record"),
        FieldType::Mapping(_) | FieldType::Any => ("&FieldValue", "get"),
    }
}

fn write_doc<W: Write>(writer: &mut W, indent: &str, doc: &str) -> Result<(), std::io::Error> {
    for line in doc.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            writeln!(writer, "{}///", indent)?;
        } else {
            writeln!(writer, "{}/// {}", indent, line)?;
        }
    }
    Ok(())
}
