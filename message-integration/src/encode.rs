//! DAML JSON back to CDM JSON.

use serde_json::Value;

use crate::error::StrategyError;
use crate::metadata::Metadata;
use crate::strategy::{Record, Strategy, UnknownFields};
use crate::walk::{Direction, Walker};

/// Encodes DAML JSON API payloads as CDM documents.
///
/// `null` optionals and empty lists are left out, and numeric strings turn
/// back into JSON numbers.
pub struct Encoder<'a> {
    metadata: &'a Metadata,
    unknown_fields: UnknownFields,
}

impl<'a> Encoder<'a> {
    pub fn new(metadata: &'a Metadata) -> Self {
        Self {
            metadata,
            unknown_fields: UnknownFields::default(),
        }
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn encode(&self, value: &Value, root: &Record) -> Result<Value, StrategyError> {
        Walker {
            metadata: self.metadata,
            unknown_fields: self.unknown_fields,
            direction: Direction::Encode,
        }
        .root(value, root)
    }
}

impl Strategy for Encoder<'_> {
    fn apply(&self, value: &Value, root: &Record) -> Result<Value, StrategyError> {
        self.encode(value, root)
    }
}
