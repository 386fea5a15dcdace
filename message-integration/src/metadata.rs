//! Typed description of the DAML record layout.
//!
//! A metadata document lists the record and enum types of the target schema.
//! Every field carries its CDM name, an optional DAML name, a type reference
//! and a cardinality. References are checked once at load time so that the
//! strategies can look types up without further validation.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::MetadataError;

/// Primitive DAML types understood by the strategies.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum Builtin {
    Text,
    Int,
    Decimal,
    Bool,
    Date,
    Time,
}

/// Type of a single record field.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum FieldType {
    Builtin(Builtin),
    Record(String),
    Enum(String),
}

/// How many values a field holds.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    #[default]
    One,
    Optional,
    List,
}

/// A field of a record type.
#[derive(Clone, Debug, Deserialize)]
pub struct FieldDef {
    /// Key used in CDM documents.
    pub name: String,
    /// Key used in DAML documents when it differs from `name`.
    #[serde(default)]
    pub rename: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl FieldDef {
    /// Key of this field on the DAML side.
    pub fn daml_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}

/// A named record type with ordered fields.
#[derive(Clone, Debug, Deserialize)]
pub struct RecordDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// A named enumeration and its constructors.
#[derive(Clone, Debug, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumDef {
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    records: Vec<RecordDef>,
    #[serde(default)]
    enums: Vec<EnumDef>,
}

/// Validated metadata description, indexed by type name.
#[derive(Clone, Debug)]
pub struct Metadata {
    records: HashMap<String, RecordDef>,
    enums: HashMap<String, EnumDef>,
}

impl Metadata {
    /// Build metadata from an already parsed JSON document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, MetadataError> {
        let raw: RawMetadata = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Read and validate a metadata file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let file = File::open(path.as_ref())?;
        let raw: RawMetadata = serde_json::from_reader(BufReader::new(file))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawMetadata) -> Result<Self, MetadataError> {
        let mut enums = HashMap::with_capacity(raw.enums.len());
        for def in raw.enums {
            if enums.contains_key(&def.name) {
                return Err(MetadataError::DuplicateEnum(def.name));
            }
            enums.insert(def.name.clone(), def);
        }

        let mut records = HashMap::with_capacity(raw.records.len());
        for def in raw.records {
            if records.contains_key(&def.name) {
                return Err(MetadataError::DuplicateRecord(def.name));
            }
            records.insert(def.name.clone(), def);
        }

        let metadata = Self { records, enums };
        metadata.check_fields()?;
        Ok(metadata)
    }

    fn check_fields(&self) -> Result<(), MetadataError> {
        for record in self.records.values() {
            let mut cdm_names = HashSet::new();
            let mut daml_names = HashSet::new();
            for field in &record.fields {
                if !cdm_names.insert(field.name.as_str())
                    || !daml_names.insert(field.daml_name())
                {
                    return Err(MetadataError::DuplicateField {
                        record: record.name.clone(),
                        field: field.name.clone(),
                    });
                }
                match &field.field_type {
                    FieldType::Record(target) if !self.records.contains_key(target) => {
                        return Err(MetadataError::UnknownRecord {
                            record: record.name.clone(),
                            field: field.name.clone(),
                            target: target.clone(),
                        });
                    }
                    FieldType::Enum(target) if !self.enums.contains_key(target) => {
                        return Err(MetadataError::UnknownEnum {
                            record: record.name.clone(),
                            field: field.name.clone(),
                            target: target.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn record(&self, name: &str) -> Option<&RecordDef> {
        self.records.get(name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumDef> {
        self.enums.get(name)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }
}
