//! Packs a finished working directory into the single deliverable zip,
//! preserving relative paths (including the nested Apple folder) and skipping
//! the canonical base image.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Error;

pub fn archive_name(id: &str) -> String {
    format!("favicon-{id}.zip")
}

/// True for the canonical base image persisted during normalization; it is
/// never shipped.
fn is_excluded(file_name: &str) -> bool {
    file_name.starts_with("original.")
}

pub fn pack(work_dir: &Path, zip_path: &Path) -> Result<(), Error> {
    let result = write_zip(work_dir, zip_path);
    if result.is_err() {
        let _ = fs::remove_file(zip_path);
    }
    result
}

fn write_zip(work_dir: &Path, zip_path: &Path) -> Result<(), Error> {
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    for entry in WalkDir::new(work_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_excluded(&name) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(work_dir) else {
            continue;
        };
        let arcname = rel.to_string_lossy().replace('\\', "/");

        zip.start_file(arcname, options)
            .map_err(|e| Error::Archive(e.to_string()))?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
    }

    zip.finish().map_err(|e| Error::Archive(e.to_string()))?;
    Ok(())
}
