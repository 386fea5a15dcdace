//! Metadata-driven mapping between CDM JSON and DAML JSON.
//!
//! A [`Metadata`] description lists the DAML record and enum types. The
//! [`Decoder`] walks a CDM document against that description and produces the
//! payload expected by the DAML JSON API; the [`Encoder`] goes the other way.

pub mod builtin;
pub mod decode;
pub mod encode;
pub mod error;
pub mod metadata;
pub mod strategy;
mod walk;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{MetadataError, StrategyError};
pub use metadata::{Builtin, Cardinality, EnumDef, FieldDef, FieldType, Metadata, RecordDef};
pub use strategy::{Record, Strategy, UnknownFields};
