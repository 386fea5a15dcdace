//! Command-line pieces shared by the converter binaries.

use clap::{Args, ValueEnum};
use env_logger::Env;
use message_integration::UnknownFields;
use std::path::PathBuf;

use crate::global_key::MissingKeyPolicy;
use crate::pipeline::{ConvertConfig, DEFAULT_METADATA_PATH, DEFAULT_ROOT_RECORD};

/// Handling of keys the metadata does not declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UnknownFieldsArg {
    /// Drop them.
    #[default]
    Ignore,
    /// Fail the conversion.
    Reject,
}

impl From<UnknownFieldsArg> for UnknownFields {
    fn from(arg: UnknownFieldsArg) -> Self {
        match arg {
            UnknownFieldsArg::Ignore => UnknownFields::Ignore,
            UnknownFieldsArg::Reject => UnknownFields::Reject,
        }
    }
}

/// Handling of an input without `meta.globalKey`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MissingKeyArg {
    /// Fail the conversion.
    #[default]
    Fail,
    /// Create `meta` and the key.
    Insert,
}

impl From<MissingKeyArg> for MissingKeyPolicy {
    fn from(arg: MissingKeyArg) -> Self {
        match arg {
            MissingKeyArg::Fail => MissingKeyPolicy::Fail,
            MissingKeyArg::Insert => MissingKeyPolicy::Insert,
        }
    }
}

/// Options selecting and interpreting the metadata description.
#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Metadata description of the DAML record types
    #[arg(long, default_value = DEFAULT_METADATA_PATH)]
    pub metadata: PathBuf,

    /// Record type of the top-level document
    #[arg(long, default_value = DEFAULT_ROOT_RECORD)]
    pub root: String,

    /// What to do with fields the metadata does not declare
    #[arg(long, value_enum, default_value_t = UnknownFieldsArg::Ignore)]
    pub unknown_fields: UnknownFieldsArg,
}

impl MetadataArgs {
    pub fn into_config(self, missing_key: MissingKeyPolicy) -> ConvertConfig {
        ConvertConfig {
            metadata_path: self.metadata,
            root: self.root,
            missing_key,
            unknown_fields: self.unknown_fields.into(),
        }
    }
}

/// Log to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
