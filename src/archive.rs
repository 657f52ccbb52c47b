//! Receipts archive
//!
//! This module zips the receipts folder into a single deliverable archive.

use crate::error::{ArchiveError, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{info, instrument};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip the contents of a folder into a single archive
///
/// Entries are stored relative to `src_dir` and added in sorted order, so
/// the archive layout is deterministic for a given folder state. An existing
/// archive at `dest` is overwritten.
#[instrument]
pub fn zip_folder(src_dir: &Path, dest: &Path) -> Result<()> {
    let file = File::create(dest).map_err(|e| ArchiveError::Create(e.to_string()))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    add_dir(&mut writer, src_dir, src_dir, options)?;

    writer
        .finish()
        .map_err(|e| ArchiveError::Create(e.to_string()))?;

    info!("Archived {} into {}", src_dir.display(), dest.display());
    Ok(())
}

fn add_dir(
    writer: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: FileOptions,
) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| ArchiveError::Append(format!("{}: {}", dir.display(), e)))?
        .collect::<io::Result<_>>()
        .map_err(|e| ArchiveError::Append(format!("{}: {}", dir.display(), e)))?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        let name = entry_name(root, &path)?;

        if path.is_dir() {
            writer
                .add_directory(name.as_str(), options)
                .map_err(|e| ArchiveError::Append(format!("{}: {}", name, e)))?;
            add_dir(writer, root, &path, options)?;
        } else {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| ArchiveError::Append(format!("{}: {}", name, e)))?;
            let mut source = File::open(&path)
                .map_err(|e| ArchiveError::Append(format!("{}: {}", name, e)))?;
            io::copy(&mut source, writer)
                .map_err(|e| ArchiveError::Append(format!("{}: {}", name, e)))?;
        }
    }

    Ok(())
}

/// Archive entry name for a path, relative to the archive root
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .map_err(|e| ArchiveError::Append(format!("{}: {}", path.display(), e)))?;
    Ok(rel.to_string_lossy().replace('\\', "/"))
}
