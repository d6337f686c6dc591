//! # Export Adapter
//!
//! Two outputs:
//!
//! - **JSON** ([`json`]): the document as pretty-printed JSON, named
//!   `cv-data.json`. The import path is the exact inverse; decoding into the
//!   typed model is the validation.
//! - **PDF** ([`pdf`]): the rendered HTML goes through a [`Rasterizer`] to
//!   get a bitmap, which is placed on a single A4 portrait page.
//!
//! Files are written to a temporary path in the target directory and renamed
//! into place only once complete, so a failed export never leaves a partial
//! file behind.

use crate::error::{Result, VitaeError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub mod json;
pub mod pdf;
pub mod raster;

pub use raster::{CommandRasterizer, Raster, Rasterizer};

/// Writes `bytes` to `dir/file_name` through a temporary file.
pub fn write_atomically(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let target = dir.join(file_name);

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target)
        .map_err(|e| VitaeError::Export(format!("{}: {}", target.display(), e.error)))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_into_missing_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        let path = write_atomically(&out, "x.txt", b"hello").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        write_atomically(dir.path(), "x.txt", b"old").unwrap();
        let path = write_atomically(dir.path(), "x.txt", b"new").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"new");
    }
}
