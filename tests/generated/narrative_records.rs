// Generated by narrec from schema definitions. Do not edit.

use narrec::{FieldValue, Record, RecordError, SchemaRegistry};

/// This first version only takes a single UPA as input and attempts to find the report that made it.
#[derive(Debug, Clone, PartialEq)]
pub struct FindObjectReportParams(Record);

impl FindObjectReportParams {
    pub const SCHEMA: &'static str = "FindObjectReportParams";

    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {
        registry.record(Self::SCHEMA).map(Self)
    }

    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {
        registry.deserialize(Self::SCHEMA, wire).map(Self)
    }

    pub fn from_record(record: Record) -> Result<Self, RecordError> {
        if record.schema_name() == Self::SCHEMA {
            Ok(Self(record))
        } else {
            Err(RecordError::TypeMismatch {
                path: String::new(),
                expected: Self::SCHEMA.to_string(),
                found: record.schema_name().to_string(),
            })
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    pub fn upa(&self) -> Option<&str> {
        self.0.get_str("upa")
    }

    pub fn set_upa(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("upa", value)
    }

    pub fn with_upa(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("upa", value)?;
        Ok(self)
    }
}

impl std::fmt::Display for FindObjectReportParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.describe())
    }
}

/// Report lookup result for a single object.
#[derive(Debug, Clone, PartialEq)]
pub struct FindObjectReportOutput(Record);

impl FindObjectReportOutput {
    pub const SCHEMA: &'static str = "FindObjectReportOutput";

    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {
        registry.record(Self::SCHEMA).map(Self)
    }

    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {
        registry.deserialize(Self::SCHEMA, wire).map(Self)
    }

    pub fn from_record(record: Record) -> Result<Self, RecordError> {
        if record.schema_name() == Self::SCHEMA {
            Ok(Self(record))
        } else {
            Err(RecordError::TypeMismatch {
                path: String::new(),
                expected: Self::SCHEMA.to_string(),
                found: record.schema_name().to_string(),
            })
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    /// The UPAs for the report object. If empty list, then no report is available. But there might be more than one.
    pub fn report_upas(&self) -> Option<&[FieldValue]> {
        self.0.get_list("report_upas")
    }

    pub fn set_report_upas(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("report_upas", value)
    }

    pub fn with_report_upas(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("report_upas", value)?;
        Ok(self)
    }

    /// The UPA for the object that this report references. If the originally passed object was copied, then this will be the source of that copy that has a referencing report.
    pub fn object_upa(&self) -> Option<&str> {
        self.0.get_str("object_upa")
    }

    pub fn set_object_upa(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("object_upa", value)
    }

    pub fn with_object_upa(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("object_upa", value)?;
        Ok(self)
    }

    /// 1 if this object was copied, and the user can't see the source, so no report's available.
    /// Optional.
    pub fn copy_inaccessible(&self) -> Option<i64> {
        self.0.get_int("copy_inaccessible")
    }

    pub fn set_copy_inaccessible(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("copy_inaccessible", value)
    }

    pub fn with_copy_inaccessible(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("copy_inaccessible", value)?;
        Ok(self)
    }

    /// If an error occurred while looking up (found an unavailable copy, or the report is not accessible).
    /// Optional.
    pub fn error(&self) -> Option<&str> {
        self.0.get_str("error")
    }

    pub fn set_error(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("error", value)
    }

    pub fn with_error(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("error", value)?;
        Ok(self)
    }
}

impl std::fmt::Display for FindObjectReportOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.describe())
    }
}

/// Wire type `RequestNarrativeShareInput`
#[derive(Debug, Clone, PartialEq)]
pub struct RequestNarrativeShareInput(Record);

impl RequestNarrativeShareInput {
    pub const SCHEMA: &'static str = "RequestNarrativeShareInput";

    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {
        registry.record(Self::SCHEMA).map(Self)
    }

    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {
        registry.deserialize(Self::SCHEMA, wire).map(Self)
    }

    pub fn from_record(record: Record) -> Result<Self, RecordError> {
        if record.schema_name() == Self::SCHEMA {
            Ok(Self(record))
        } else {
            Err(RecordError::TypeMismatch {
                path: String::new(),
                expected: Self::SCHEMA.to_string(),
                found: record.schema_name().to_string(),
            })
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    /// The workspace id containing the narrative to share.
    pub fn ws_id(&self) -> Option<i64> {
        self.0.get_int("ws_id")
    }

    pub fn set_ws_id(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("ws_id", value)
    }

    pub fn with_ws_id(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("ws_id", value)?;
        Ok(self)
    }

    /// The level of sharing requested - one of "r" (read), "w" (write), "a" (admin).
    pub fn share_level(&self) -> Option<&str> {
        self.0.get_str("share_level")
    }

    pub fn set_share_level(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("share_level", value)
    }

    pub fn with_share_level(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("share_level", value)?;
        Ok(self)
    }

    /// The user to be shared with.
    pub fn user(&self) -> Option<&str> {
        self.0.get_str("user")
    }

    pub fn set_user(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("user", value)
    }

    pub fn with_user(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("user", value)?;
        Ok(self)
    }
}

impl std::fmt::Display for RequestNarrativeShareInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.describe())
    }
}

/// Wire type `RequestNarrativeShareOutput`
#[derive(Debug, Clone, PartialEq)]
pub struct RequestNarrativeShareOutput(Record);

impl RequestNarrativeShareOutput {
    pub const SCHEMA: &'static str = "RequestNarrativeShareOutput";

    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {
        registry.record(Self::SCHEMA).map(Self)
    }

    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {
        registry.deserialize(Self::SCHEMA, wire).map(Self)
    }

    pub fn from_record(record: Record) -> Result<Self, RecordError> {
        if record.schema_name() == Self::SCHEMA {
            Ok(Self(record))
        } else {
            Err(RecordError::TypeMismatch {
                path: String::new(),
                expected: Self::SCHEMA.to_string(),
                found: record.schema_name().to_string(),
            })
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    /// 0 if the request failed, 1 if the request succeeded.
    pub fn ok(&self) -> Option<i64> {
        self.0.get_int("ok")
    }

    pub fn set_ok(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("ok", value)
    }

    pub fn with_ok(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("ok", value)?;
        Ok(self)
    }

    /// If a failure happened during the request, this has a reason why. Not present if it succeeded.
    /// Optional.
    pub fn error(&self) -> Option<&str> {
        self.0.get_str("error")
    }

    pub fn set_error(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("error", value)
    }

    pub fn with_error(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("error", value)?;
        Ok(self)
    }
}

impl std::fmt::Display for RequestNarrativeShareOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.describe())
    }
}

/// Log message context. The username is inferred from the auth token.
#[derive(Debug, Clone, PartialEq)]
pub struct LogContext(Record);

impl LogContext {
    pub const SCHEMA: &'static str = "LogContext";

    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {
        registry.record(Self::SCHEMA).map(Self)
    }

    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {
        registry.deserialize(Self::SCHEMA, wire).map(Self)
    }

    pub fn from_record(record: Record) -> Result<Self, RecordError> {
        if record.schema_name() == Self::SCHEMA {
            Ok(Self(record))
        } else {
            Err(RecordError::TypeMismatch {
                path: String::new(),
                expected: Self::SCHEMA.to_string(),
                found: record.schema_name().to_string(),
            })
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    /// The Narrative reference (wsid/objid), without a version.
    /// Optional.
    pub fn narr_ref(&self) -> Option<&str> {
        self.0.get_str("narr_ref")
    }

    pub fn set_narr_ref(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("narr_ref", value)
    }

    pub fn with_narr_ref(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("narr_ref", value)?;
        Ok(self)
    }

    /// The current version of the narrative (if a save_narrative message, the new version).
    /// Optional.
    pub fn narr_version(&self) -> Option<i64> {
        self.0.get_int("narr_version")
    }

    pub fn set_narr_version(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("narr_version", value)
    }

    pub fn with_narr_version(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("narr_version", value)?;
        Ok(self)
    }

    /// Timestamp of event in ISO-8601 format.
    /// Optional.
    pub fn log_time(&self) -> Option<&str> {
        self.0.get_str("log_time")
    }

    pub fn set_log_time(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("log_time", value)
    }

    pub fn with_log_time(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("log_time", value)?;
        Ok(self)
    }

    /// Log level, should be one of INFO, ERROR or WARN.
    /// Optional.
    pub fn level(&self) -> Option<&str> {
        self.0.get_str("level")
    }

    pub fn set_level(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("level", value)
    }

    pub fn with_level(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("level", value)?;
        Ok(self)
    }
}

impl std::fmt::Display for LogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.describe())
    }
}

/// Wire type `LogSaveParams`
#[derive(Debug, Clone, PartialEq)]
pub struct LogSaveParams(Record);

impl LogSaveParams {
    pub const SCHEMA: &'static str = "LogSaveParams";

    pub fn new(registry: &SchemaRegistry) -> Result<Self, RecordError> {
        registry.record(Self::SCHEMA).map(Self)
    }

    pub fn from_wire(registry: &SchemaRegistry, wire: &serde_json::Value) -> Result<Self, RecordError> {
        registry.deserialize(Self::SCHEMA, wire).map(Self)
    }

    pub fn from_record(record: Record) -> Result<Self, RecordError> {
        if record.schema_name() == Self::SCHEMA {
            Ok(Self(record))
        } else {
            Err(RecordError::TypeMismatch {
                path: String::new(),
                expected: Self::SCHEMA.to_string(),
                found: record.schema_name().to_string(),
            })
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    pub fn context(&self) -> Option<&Record> {
        self.0.get_record("context")
    }

    pub fn set_context(&mut self, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.0.set("context", value)
    }

    pub fn with_context(mut self, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        self.0.set("context", value)?;
        Ok(self)
    }
}

impl std::fmt::Display for LogSaveParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.describe())
    }
}

