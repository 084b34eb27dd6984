//! Bar packaging.
//!
//! A bar is staged on disk and zipped at two levels:
//!
//! ```text
//! {build_dir}/libs/
//! ├── Sample.bar                     <- final output
//! └── Sample/                        <- staging, removed once zipped
//!     ├── META-INF/manifest.mf
//!     ├── Sample.appzip              <- zipped from the directory below
//!     └── Sample/
//!         ├── META-INF/manifest.mf
//!         ├── META-INF/broker.xml
//!         ├── application.descriptor
//!         ├── libs/*.jar
//!         ├── src.jar
//!         └── {flow}.msgflow
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::archive::{ArchiveWriter, ZipArchiveWriter};
use crate::bar::{BarFile, LIBS_DIR};
use crate::documents::{APPLICATION_DESCRIPTOR, BarDocuments, MANIFEST};
use crate::error::PackageError;
use crate::registry::BarRegistry;

/// File extension of the inner application archive.
pub const APPLICATION_EXTENSION: &str = "appzip";

const META_INF: &str = "META-INF";
const MANIFEST_FILE: &str = "manifest.mf";
const BROKER_FILE: &str = "broker.xml";
const DESCRIPTOR_FILE: &str = "application.descriptor";
const SOURCE_ARCHIVE: &str = "src.jar";

/// Packages registered bars under a build directory.
pub struct BarAssembler<W = ZipArchiveWriter> {
  build_dir: PathBuf,
  writer: W,
}

impl BarAssembler {
  /// Create an assembler writing zip archives under `build_dir`.
  pub fn new(build_dir: impl Into<PathBuf>) -> Self {
    Self::with_writer(build_dir, ZipArchiveWriter::default())
  }
}

impl<W: ArchiveWriter> BarAssembler<W> {
  pub fn with_writer(build_dir: impl Into<PathBuf>, writer: W) -> Self {
    Self {
      build_dir: build_dir.into(),
      writer,
    }
  }

  pub fn build_dir(&self) -> &Path {
    &self.build_dir
  }

  /// Package every bar of `registry`, in registration order.
  ///
  /// Stops at the first failing bar. Bars without flows are skipped.
  pub fn assemble_all(
    &self,
    registry: BarRegistry,
    libraries: &[PathBuf],
    compiled: &Path,
  ) -> Result<Vec<PathBuf>, PackageError> {
    if registry.is_empty() {
      warn!("no bar files configured");
      return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for bar in registry.into_bars() {
      if let Some(path) = self.assemble(&bar, libraries, compiled)? {
        written.push(path);
      }
    }
    Ok(written)
  }

  /// Package one bar, returning the path of the written archive.
  ///
  /// Returns `Ok(None)` without touching the disk when the bar has no flows.
  /// Every flow is compiled before the first file is written, so configuration
  /// errors never leave anything behind. On a packaging error the staging tree
  /// and any partial archive are removed before the error is returned.
  #[instrument(name = "bar_assemble", skip_all, fields(bar = %bar.name()))]
  pub fn assemble(
    &self,
    bar: &BarFile,
    libraries: &[PathBuf],
    compiled: &Path,
  ) -> Result<Option<PathBuf>, PackageError> {
    if bar.flows().is_empty() {
      warn!("no message flows configured, skipping bar");
      return Ok(None);
    }

    let documents = BarDocuments::compile(bar)?;
    for source in libraries.iter().map(PathBuf::as_path).chain([compiled]) {
      if !source.is_file() {
        return Err(PackageError::MissingSource {
          path: source.to_path_buf(),
        });
      }
    }
    if libraries.is_empty() {
      info!("no library files supplied");
    }

    let staging = self.build_dir.join(LIBS_DIR).join(bar.name());
    let output = bar.path(&self.build_dir);
    if staging.exists() {
      debug!(path = %staging.display(), "removing stale staging directory");
      fs::remove_dir_all(&staging).map_err(PackageError::io(&staging))?;
    }

    let cleanup = scopeguard::guard((), |_| {
      warn!(path = %staging.display(), "packaging failed, removing partial output");
      remove_dir_if_exists(&staging);
      remove_file_if_exists(&output);
    });

    let app_dir = staging.join(bar.name());
    stage_outer(&staging)?;
    stage_application(&app_dir, &documents, libraries, compiled)?;

    let app_archive = staging.join(format!("{}.{APPLICATION_EXTENSION}", bar.name()));
    info!(path = %app_archive.display(), "creating application archive");
    self.writer.write_archive(&app_dir, &app_archive)?;
    fs::remove_dir_all(&app_dir).map_err(PackageError::io(&app_dir))?;

    info!(path = %output.display(), "creating bar");
    self.writer.write_archive(&staging, &output)?;
    fs::remove_dir_all(&staging).map_err(PackageError::io(&staging))?;

    scopeguard::ScopeGuard::into_inner(cleanup);
    Ok(Some(output))
  }
}

fn stage_outer(staging: &Path) -> Result<(), PackageError> {
  write_file(&staging.join(META_INF).join(MANIFEST_FILE), MANIFEST)
}

fn stage_application(
  app_dir: &Path,
  documents: &BarDocuments,
  libraries: &[PathBuf],
  compiled: &Path,
) -> Result<(), PackageError> {
  let meta_inf = app_dir.join(META_INF);
  write_file(&meta_inf.join(MANIFEST_FILE), MANIFEST)?;
  write_file(&meta_inf.join(BROKER_FILE), &documents.broker)?;
  write_file(&app_dir.join(DESCRIPTOR_FILE), APPLICATION_DESCRIPTOR)?;

  let libs_dir = app_dir.join(LIBS_DIR);
  fs::create_dir_all(&libs_dir).map_err(PackageError::io(&libs_dir))?;
  for library in libraries {
    let file_name = library
      .file_name()
      .ok_or_else(|| PackageError::MissingSource {
        path: library.clone(),
      })?;
    copy_file(library, &libs_dir.join(file_name))?;
  }

  copy_file(compiled, &app_dir.join(SOURCE_ARCHIVE))?;

  for (file_name, topology) in &documents.flows {
    write_file(&app_dir.join(file_name), topology)?;
  }
  Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), PackageError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(PackageError::io(parent))?;
  }
  debug!(path = %path.display(), "writing file");
  fs::write(path, contents).map_err(PackageError::io(path))
}

fn copy_file(source: &Path, dest: &Path) -> Result<(), PackageError> {
  debug!(source = %source.display(), dest = %dest.display(), "copying file");
  fs::copy(source, dest).map_err(PackageError::io(source))?;
  Ok(())
}

fn remove_dir_if_exists(path: &Path) {
  match fs::remove_dir_all(path) {
    Ok(()) => {}
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => warn!(path = %path.display(), error = %e, "failed to remove directory"),
  }
}

fn remove_file_if_exists(path: &Path) {
  match fs::remove_file(path) {
    Ok(()) => {}
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => warn!(path = %path.display(), error = %e, "failed to remove file"),
  }
}
