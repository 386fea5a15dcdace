use std::io;
use std::path::PathBuf;

use message_integration::{MetadataError, StrategyError};
use thiserror::Error;

/// Every way a conversion run can fail. None of them are recovered locally.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid metadata description in {}", .path.display())]
    Metadata { path: PathBuf, source: MetadataError },
    #[error("document does not match record '{root}'")]
    Conversion { root: String, source: StrategyError },
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("`{0}` is not an object")]
    NotAnObject(&'static str),
    #[error("failed to write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
