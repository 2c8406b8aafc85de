//! Built-in NarrativeService catalog.
//!
//! The wire types of the NarrativeService JSON-RPC API, loaded from an
//! embedded schema document:
//!
//! | Schema | Used by |
//! |---|---|
//! | `FindObjectReportParams` / `FindObjectReportOutput` | `find_object_report` |
//! | `RequestNarrativeShareInput` / `RequestNarrativeShareOutput` | `request_narrative_share` |
//! | `LogContext`, `LogSaveParams` | narrative log entries |

use std::sync::OnceLock;

use crate::error::SchemaError;
use crate::schema::SchemaRegistry;

/// The embedded schema document.
pub const DOCUMENT: &str = include_str!("../schemas/narrative_service.yaml");

pub const SERVICE: &str = "NarrativeService";

pub const FIND_OBJECT_REPORT_PARAMS: &str = "FindObjectReportParams";
pub const FIND_OBJECT_REPORT_OUTPUT: &str = "FindObjectReportOutput";
pub const REQUEST_NARRATIVE_SHARE_INPUT: &str = "RequestNarrativeShareInput";
pub const REQUEST_NARRATIVE_SHARE_OUTPUT: &str = "RequestNarrativeShareOutput";
pub const LOG_CONTEXT: &str = "LogContext";
pub const LOG_SAVE_PARAMS: &str = "LogSaveParams";

/// Build a fresh registry holding the NarrativeService catalog, for callers
/// that want to add their own schemas on top.
pub fn new_registry() -> Result<SchemaRegistry, SchemaError> {
    let mut registry = SchemaRegistry::new();
    registry.load_str(DOCUMENT)?;
    Ok(registry)
}

/// Shared, process-wide registry holding the NarrativeService catalog.
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| new_registry().expect("embedded NarrativeService schemas are valid"))
}
