//! Code generation for typed record wrappers.

pub mod rust_codegen;
pub mod utils;

use std::fs;
use std::path::Path;

use crate::schema::SchemaRegistry;

pub use rust_codegen::{generate_record_module, generate_rust_code, RustCodegenConfig};

/// Generate wrappers for a registry and write them to `path`, creating
/// parent directories if needed.
pub fn write_record_module<P: AsRef<Path>>(
    registry: &SchemaRegistry,
    config: &RustCodegenConfig,
    path: P,
) -> std::io::Result<()> {
    let path = path.as_ref();
    let code = generate_record_module(registry, config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, code)?;

    tracing::info!(
        "Wrote {} record wrappers to {}",
        registry.len(),
        path.display()
    );
    Ok(())
}
