//! Metadata-guided traversal shared by the decode and encode strategies.

use log::debug;
use serde_json::{Map, Value};

use crate::builtin::{decode_builtin, encode_builtin};
use crate::error::StrategyError;
use crate::metadata::{Cardinality, FieldDef, FieldType, Metadata, RecordDef};
use crate::strategy::{field_path, index_path, type_name, Record, UnknownFields, ROOT_PATH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// CDM keys in, DAML keys out.
    Decode,
    /// DAML keys in, CDM keys out.
    Encode,
}

pub(crate) struct Walker<'a> {
    pub metadata: &'a Metadata,
    pub unknown_fields: UnknownFields,
    pub direction: Direction,
}

impl Walker<'_> {
    pub fn root(&self, value: &Value, root: &Record) -> Result<Value, StrategyError> {
        let def = self
            .metadata
            .record(root.name())
            .ok_or_else(|| StrategyError::UnknownRecord(root.name().to_string()))?;
        self.record(def, value, ROOT_PATH)
    }

    fn source_key<'f>(&self, field: &'f FieldDef) -> &'f str {
        match self.direction {
            Direction::Decode => &field.name,
            Direction::Encode => field.daml_name(),
        }
    }

    fn target_key<'f>(&self, field: &'f FieldDef) -> &'f str {
        match self.direction {
            Direction::Decode => field.daml_name(),
            Direction::Encode => &field.name,
        }
    }

    fn record(&self, def: &RecordDef, value: &Value, path: &str) -> Result<Value, StrategyError> {
        let Value::Object(input) = value else {
            return Err(StrategyError::mismatch(
                path,
                format!("expected object for record '{}', found {}", def.name, type_name(value)),
            ));
        };

        for key in input.keys() {
            if def.fields.iter().any(|f| self.source_key(f) == key.as_str()) {
                continue;
            }
            let undeclared = field_path(path, key);
            match self.unknown_fields {
                UnknownFields::Ignore => {
                    debug!("dropping {undeclared}: not declared on record '{}'", def.name)
                }
                UnknownFields::Reject => {
                    return Err(StrategyError::mismatch(
                        &undeclared,
                        format!("field is not declared on record '{}'", def.name),
                    ))
                }
            }
        }

        let mut out = Map::new();
        for field in &def.fields {
            let key = self.source_key(field);
            let child = field_path(path, key);
            if let Some(converted) = self.field(field, input.get(key), &child)? {
                out.insert(self.target_key(field).to_string(), converted);
            }
        }
        Ok(Value::Object(out))
    }

    /// `None` means the key is left out of the output.
    fn field(
        &self,
        field: &FieldDef,
        value: Option<&Value>,
        path: &str,
    ) -> Result<Option<Value>, StrategyError> {
        let present = value.filter(|v| !v.is_null());
        let decoding = self.direction == Direction::Decode;
        match (field.cardinality, present) {
            (Cardinality::One, None) => {
                Err(StrategyError::mismatch(path, "missing required field"))
            }
            (Cardinality::Optional, None) => Ok(decoding.then_some(Value::Null)),
            (Cardinality::List, None) => Ok(decoding.then(|| Value::Array(Vec::new()))),
            (Cardinality::One | Cardinality::Optional, Some(v)) => {
                self.single(&field.field_type, v, path).map(Some)
            }
            (Cardinality::List, Some(Value::Array(items))) => {
                let converted = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.single(&field.field_type, item, &index_path(path, i)))
                    .collect::<Result<Vec<_>, _>>()?;
                if converted.is_empty() && !decoding {
                    return Ok(None);
                }
                Ok(Some(Value::Array(converted)))
            }
            (Cardinality::List, Some(other)) => Err(StrategyError::mismatch(
                path,
                format!("expected array, found {}", type_name(other)),
            )),
        }
    }

    fn single(
        &self,
        field_type: &FieldType,
        value: &Value,
        path: &str,
    ) -> Result<Value, StrategyError> {
        match field_type {
            FieldType::Builtin(kind) => match self.direction {
                Direction::Decode => decode_builtin(*kind, value, path),
                Direction::Encode => encode_builtin(*kind, value, path),
            },
            FieldType::Record(name) => {
                let def = self
                    .metadata
                    .record(name)
                    .ok_or_else(|| StrategyError::UnknownRecord(name.clone()))?;
                self.record(def, value, path)
            }
            FieldType::Enum(name) => {
                let Some(constructor) = value.as_str() else {
                    return Err(StrategyError::mismatch(
                        path,
                        format!("expected enum '{name}' as string, found {}", type_name(value)),
                    ));
                };
                match self.metadata.enumeration(name) {
                    Some(def) if def.contains(constructor) => {
                        Ok(Value::String(constructor.to_string()))
                    }
                    _ => Err(StrategyError::mismatch(
                        path,
                        format!("'{constructor}' is not a value of enum '{name}'"),
                    )),
                }
            }
        }
    }
}
