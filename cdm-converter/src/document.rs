//! Reading and writing JSON documents.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::Builder;

use crate::error::ConvertError;

const INDENT: &[u8] = b"    ";

/// Read and parse a whole JSON file.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value, ConvertError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            ConvertError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            ConvertError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Serialize `value` with a 4-space indent and move it into place at `path`.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it once complete, so `path` either keeps its previous contents or
/// holds the full new document. The temporary file is removed on failure.
/// An existing destination keeps its permissions.
pub fn write_document<P: AsRef<Path>>(value: &Value, path: P) -> Result<(), ConvertError> {
    let path = path.as_ref();
    let write_err = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|m| m.permissions());
    let mut tmp = temp_builder(existing.is_none())
        .tempfile_in(dir)
        .map_err(write_err)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        value
            .serialize(&mut ser)
            .map_err(|e| write_err(e.into()))?;
        writer.flush().map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Temporary files default to owner-only; a new output is instead created
/// the way `File::create` would, subject to the umask.
fn temp_builder(fresh: bool) -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    if fresh {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    #[cfg(not(unix))]
    let _ = fresh;
    builder
}
