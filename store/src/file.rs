//! Local JSON export and import.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use canvas::scene::{self, PaintingDocument, Scene};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::StoreError;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Write `scene` into `dir` as pretty JSON, stamped with the current time.
///
/// # Errors
///
/// [`StoreError::Io`] on filesystem failure.
pub fn export_scene(dir: &Path, scene: &Scene) -> Result<PathBuf, StoreError> {
    export_scene_at(dir, scene, OffsetDateTime::now_utc())
}

/// Write `scene` into `dir` as pretty JSON, stamped with `at`.
///
/// The file is named after the painting plus the millisecond timestamp. An
/// existing file is never overwritten; the millisecond suffix is bumped
/// until a free name is found.
///
/// # Errors
///
/// [`StoreError::Io`] on filesystem failure, [`StoreError::InvalidFormat`]
/// if `at` cannot be formatted.
pub fn export_scene_at(dir: &Path, scene: &Scene, at: OffsetDateTime) -> Result<PathBuf, StoreError> {
    let doc = scene::to_document_at(scene, at)?;
    let text = scene::to_json_pretty(&doc)?;
    let millis = u128::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);

    for bump in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(scene::export_filename(&scene.name, millis + u128::from(bump)));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                write_or_discard(&path, file, text.as_bytes())?;
                info!(path = %path.display(), shapes = doc.shapes.len(), "painting exported");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
    }
    Err(StoreError::Io(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free export name in {}", dir.display()),
    )))
}

/// Write `bytes` into the freshly created `path`. A partial file is removed
/// when the write fails.
fn write_or_discard<W: Write>(path: &Path, mut file: W, bytes: &[u8]) -> std::io::Result<()> {
    let Err(write_err) = file.write_all(bytes).and_then(|()| file.flush()) else {
        return Ok(());
    };
    drop(file);
    if let Err(remove_err) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %remove_err, "failed to remove partial export");
    }
    Err(write_err)
}

/// Read and validate a painting file.
///
/// # Errors
///
/// [`StoreError::NotJson`] unless the extension is `.json` (any case),
/// [`StoreError::Io`] if the file cannot be read, and
/// [`StoreError::InvalidFormat`] if its contents fail validation.
pub fn import_path(path: &Path) -> Result<PaintingDocument, StoreError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(StoreError::NotJson(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let doc = scene::from_json(&text)?;
    info!(path = %path.display(), shapes = doc.shapes.len(), "painting imported");
    Ok(doc)
}
