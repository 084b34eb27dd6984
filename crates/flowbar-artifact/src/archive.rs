use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::PackageError;

/// Read buffer used when streaming files into an archive.
pub const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Packs a directory tree into a single archive file.
///
/// Implementations write every regular file under `source_dir` with its path
/// relative to `source_dir` as the entry name. Directories are implied by the
/// entry names and never written as entries of their own.
pub trait ArchiveWriter: Send + Sync {
  fn write_archive(&self, source_dir: &Path, archive: &Path) -> Result<(), PackageError>;
}

/// Zip archive writer streaming each file through a bounded buffer.
#[derive(Debug, Clone)]
pub struct ZipArchiveWriter {
  buffer_size: usize,
}

impl ZipArchiveWriter {
  pub fn new(buffer_size: usize) -> Self {
    Self {
      buffer_size: buffer_size.max(1),
    }
  }
}

impl Default for ZipArchiveWriter {
  fn default() -> Self {
    Self::new(READ_BUFFER_SIZE)
  }
}

impl ArchiveWriter for ZipArchiveWriter {
  fn write_archive(&self, source_dir: &Path, archive: &Path) -> Result<(), PackageError> {
    let file = File::create(archive).map_err(PackageError::io(archive))?;
    let mut zip = ZipWriter::new(file);
    // Fixed timestamps keep archives identical across rebuilds.
    let options = SimpleFileOptions::default()
      .compression_method(CompressionMethod::Deflated)
      .last_modified_time(DateTime::default());

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
      let entry = entry?;
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      let name = entry_name(source_dir, path)?;
      debug!(entry = %name, path = %path.display(), "adding file");

      let source = File::open(path).map_err(PackageError::io(path))?;
      let mut reader = BufReader::with_capacity(self.buffer_size, source);
      zip.start_file(name, options)?;
      io::copy(&mut reader, &mut zip).map_err(PackageError::io(path))?;
    }

    zip.finish()?;
    Ok(())
  }
}

/// Entry name of `path` inside an archive rooted at `root`, always `/`-separated.
fn entry_name(root: &Path, path: &Path) -> Result<String, PackageError> {
  let relative = path.strip_prefix(root).map_err(|e| PackageError::Io {
    path: path.to_path_buf(),
    source: io::Error::other(e),
  })?;

  Ok(
    relative
      .components()
      .map(|component| component.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/"),
  )
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::io::Read;

  use zip::ZipArchive;

  use super::*;

  #[test]
  fn test_entry_names_are_relative_and_slash_separated() {
    let root = Path::new("/stage/app");
    let name = entry_name(root, &root.join("META-INF").join("manifest.mf")).unwrap();
    assert_eq!(name, "META-INF/manifest.mf");
  }

  #[test]
  fn test_writes_files_only() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("app");
    fs::create_dir_all(source.join("libs")).unwrap();
    fs::create_dir_all(source.join("empty")).unwrap();
    fs::write(source.join("libs").join("a.jar"), b"jar bytes").unwrap();
    fs::write(source.join("top.txt"), vec![7u8; 3 * READ_BUFFER_SIZE + 11]).unwrap();

    let archive_path = temp_dir.path().join("app.appzip");
    ZipArchiveWriter::new(64)
      .write_archive(&source, &archive_path)
      .unwrap();

    let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    assert_eq!(names, vec!["libs/a.jar", "top.txt"]);

    let mut contents = Vec::new();
    archive
      .by_name("top.txt")
      .unwrap()
      .read_to_end(&mut contents)
      .unwrap();
    assert_eq!(contents.len(), 3 * READ_BUFFER_SIZE + 11);
  }

  #[test]
  fn test_rebuilds_are_byte_identical() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("app");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("flow.msgflow"), "<flow/>").unwrap();

    let first = temp_dir.path().join("first.zip");
    let second = temp_dir.path().join("second.zip");
    let writer = ZipArchiveWriter::default();
    writer.write_archive(&source, &first).unwrap();
    writer.write_archive(&source, &second).unwrap();

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
  }
}
