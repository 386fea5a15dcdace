//! Shared plumbing for the metadata-driven strategies.

use serde_json::Value;

use crate::error::StrategyError;

/// Root type descriptor handed to a strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    name: String,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What to do with object keys the metadata does not declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Drop them and log at debug level.
    #[default]
    Ignore,
    /// Fail with a schema mismatch.
    Reject,
}

/// A transformation between the CDM and DAML JSON shapes.
pub trait Strategy {
    /// Map `value`, interpreted as an instance of `root`, into the other shape.
    fn apply(&self, value: &Value, root: &Record) -> Result<Value, StrategyError>;
}

pub(crate) const ROOT_PATH: &str = "$";

pub(crate) fn field_path(parent: &str, field: &str) -> String {
    format!("{parent}.{field}")
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
