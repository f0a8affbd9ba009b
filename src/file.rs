//! File level compression and the archive naming convention.
//!
//! A compressed file is named `<source>.zip` unless the caller chooses a
//! destination. Decompression derives the output name by removing the `.zip`
//! suffix, which must appear exactly once in the archive's file name.
//!
//! Output is written to a temporary file next to the destination and renamed
//! into place once complete, so a failed run never leaves a partial archive
//! under the final name.

use crate::compression::{compress, decompress};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to compressed files.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Default archive path for `source`: `<source>.zip`.
pub fn archive_path_for(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// Path a decompressed archive is written to: `archive` without `.zip`.
///
/// Fails with [`Error::InvalidArchiveName`] unless the file name ends with
/// `.zip`, contains it only once and has something before it.
pub fn restored_path_for(archive: &Path) -> Result<PathBuf> {
    let invalid = || Error::InvalidArchiveName(archive.display().to_string());

    let name = archive
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;
    if name.matches(ARCHIVE_EXTENSION).count() != 1 {
        return Err(invalid());
    }
    let stem = name
        .strip_suffix(ARCHIVE_EXTENSION)
        .filter(|stem| !stem.is_empty())
        .ok_or_else(invalid)?;

    Ok(archive.with_file_name(stem))
}

/// Compress `source` into `destination`, or `<source>.zip` when `None`.
///
/// Returns the path of the written archive.
pub fn compress_file(source: &Path, destination: Option<&Path>) -> Result<PathBuf> {
    let destination = destination
        .map(Path::to_path_buf)
        .unwrap_or_else(|| archive_path_for(source));

    let data = fs::read(source)?;
    let archive = compress(&data)?;
    write_atomically(&destination, &archive)?;

    log::info!(
        "compressed {} ({} bytes) into {} ({} bytes)",
        source.display(),
        data.len(),
        destination.display(),
        archive.len()
    );
    Ok(destination)
}

/// Decompress the archive at `source` next to it, dropping the `.zip` suffix.
///
/// Returns the path of the restored file.
pub fn decompress_file(source: &Path) -> Result<PathBuf> {
    let destination = restored_path_for(source)?;

    let archive = fs::read(source)?;
    let data = decompress(&archive)?;
    write_atomically(&destination, &data)?;

    log::info!(
        "decompressed {} into {} ({} bytes)",
        source.display(),
        destination.display(),
        data.len()
    );
    Ok(destination)
}

/// Write `contents` to a sibling temporary file, then rename it over `path`.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp_name = path
        .file_name()
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file path", path.display()),
            ))
        })?
        .to_owned();
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    let tmp_path = path.with_file_name(tmp_name);

    let result = fs::write(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        log::warn!("writing {} failed: {}", path.display(), e);
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}
