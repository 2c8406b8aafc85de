//! YAML schema documents.
//!
//! A document holds a list of schema definitions and, optionally, the
//! method catalog of the service that exchanges them:
//!
//! ```yaml
//! schemas:
//!   - name: RequestNarrativeShareOutput
//!     properties:
//!       - name: ok
//!         type: int
//!       - name: error
//!         type: string
//!         optional: true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SchemaError;
use crate::schema::SchemaDef;
use crate::service::ServiceDef;

/// Top-level structure of a schema YAML file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub schemas: Vec<SchemaDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceDef>,
}

impl SchemaDocument {
    /// Parse a schema document from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render the document back to YAML
    pub fn to_yaml_string(&self) -> Result<String, SchemaError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Load a single schema document from a YAML file.
pub fn load_document(path: &Path) -> Result<SchemaDocument, SchemaError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SchemaError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

    SchemaDocument::from_yaml_str(&contents).map_err(|e| match e {
        SchemaError::ParseError(msg) => {
            SchemaError::ParseError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Load every `.yaml`/`.yml` document in a directory, sorted by file name.
pub fn load_documents(dir: &Path) -> Result<Vec<SchemaDocument>, SchemaError> {
    if !dir.is_dir() {
        return Err(SchemaError::IoError(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .map(|ext| ext == "yaml" || ext == "yml")
            .unwrap_or(false);
        if is_yaml && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| load_document(path)).collect()
}
