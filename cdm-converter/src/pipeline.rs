//! The conversion runs behind both binaries.

use log::{debug, info};
use message_integration::{Decoder, Encoder, Metadata, Record, Strategy, UnknownFields};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::document::{load_document, write_document};
use crate::error::ConvertError;
use crate::global_key::{rewrite_global_key, KeyGenerator, MissingKeyPolicy};

pub const DEFAULT_METADATA_PATH: &str = "resources/CDM.json";
pub const DEFAULT_ROOT_RECORD: &str = "Event";

/// Settings shared by a conversion run.
#[derive(Clone, Debug)]
pub struct ConvertConfig {
    /// Metadata description of the DAML record types.
    pub metadata_path: PathBuf,
    /// Record type the top-level document is an instance of.
    pub root: String,
    pub missing_key: MissingKeyPolicy,
    pub unknown_fields: UnknownFields,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            metadata_path: PathBuf::from(DEFAULT_METADATA_PATH),
            root: DEFAULT_ROOT_RECORD.to_string(),
            missing_key: MissingKeyPolicy::default(),
            unknown_fields: UnknownFields::default(),
        }
    }
}

pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<Metadata, ConvertError> {
    let path = path.as_ref();
    let raw = load_document(path)?;
    let metadata = Metadata::from_json(raw).map_err(|source| ConvertError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "loaded {} records and {} enums from {}",
        metadata.record_count(),
        metadata.enum_count(),
        path.display()
    );
    Ok(metadata)
}

/// Apply `strategy` to `doc` as an instance of `root`.
pub fn convert_document(
    doc: &Value,
    strategy: &dyn Strategy,
    root: &Record,
) -> Result<Value, ConvertError> {
    strategy
        .apply(doc, root)
        .map_err(|source| ConvertError::Conversion {
            root: root.name().to_string(),
            source,
        })
}

/// Convert a CDM JSON file into a DAML JSON file and return the new global key.
///
/// The output is only written once every earlier step has succeeded.
pub fn convert_cdm_file<K: KeyGenerator + ?Sized>(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
    keys: &mut K,
) -> Result<String, ConvertError> {
    info!("loading CDM JSON from {}", input.display());
    let mut doc = load_document(input)?;

    let key = rewrite_global_key(&mut doc, keys, config.missing_key)?;
    info!("set meta.globalKey to {key}");
    debug!("loaded document: {doc}");

    let metadata = load_metadata(&config.metadata_path)?;
    let decoder = Decoder::new(&metadata).with_unknown_fields(config.unknown_fields);
    info!("converting to DAML JSON as record '{}'", config.root);
    let converted = convert_document(&doc, &decoder, &Record::new(config.root.as_str()))?;
    debug!("converted document: {converted}");

    info!("writing DAML JSON to {}", output.display());
    write_document(&converted, output)?;
    Ok(key)
}

/// Convert a DAML JSON file back into a CDM JSON file. Keys are left as is.
pub fn convert_daml_file(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<(), ConvertError> {
    info!("loading DAML JSON from {}", input.display());
    let doc = load_document(input)?;

    let metadata = load_metadata(&config.metadata_path)?;
    let encoder = Encoder::new(&metadata).with_unknown_fields(config.unknown_fields);
    info!("converting to CDM JSON as record '{}'", config.root);
    let converted = convert_document(&doc, &encoder, &Record::new(config.root.as_str()))?;
    debug!("converted document: {converted}");

    info!("writing CDM JSON to {}", output.display());
    write_document(&converted, output)
}
