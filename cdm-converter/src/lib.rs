//! Command-line conversion between CDM JSON events and DAML JSON API payloads.
//!
//! A run loads one document, gives CDM input a fresh `meta.globalKey`, maps
//! it through the metadata-driven strategies from `message_integration` and
//! writes the result atomically.

pub mod cli;
pub mod document;
pub mod error;
pub mod global_key;
pub mod pipeline;

pub use document::{load_document, write_document};
pub use error::ConvertError;
pub use global_key::{rewrite_global_key, KeyGenerator, MissingKeyPolicy, RandomKeys};
pub use pipeline::{
    convert_cdm_file, convert_daml_file, convert_document, load_metadata, ConvertConfig,
    DEFAULT_METADATA_PATH, DEFAULT_ROOT_RECORD,
};
