//! CDM JSON to DAML JSON.

use serde_json::Value;

use crate::error::StrategyError;
use crate::metadata::Metadata;
use crate::strategy::{Record, Strategy, UnknownFields};
use crate::walk::{Direction, Walker};

/// Decodes CDM documents into the shape accepted by the DAML JSON API.
///
/// Fields are emitted in metadata order under their DAML names. Absent
/// optional fields become `null` and absent lists become `[]`, so every
/// declared field is present in the output.
pub struct Decoder<'a> {
    metadata: &'a Metadata,
    unknown_fields: UnknownFields,
}

impl<'a> Decoder<'a> {
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

    pub fn decode(&self, value: &Value, root: &Record) -> Result<Value, StrategyError> {
        Walker {
            metadata: self.metadata,
            unknown_fields: self.unknown_fields,
            direction: Direction::Decode,
        }
        .root(value, root)
    }
}

impl Strategy for Decoder<'_> {
    fn apply(&self, value: &Value, root: &Record) -> Result<Value, StrategyError> {
        self.decode(value, root)
    }
}
