//! Flowbar Artifact
//!
//! This crate turns registered bars into deployable archives.
//!
//! A [`BarRegistry`] collects the bars of one build, merging repeated
//! registrations of the same name. The [`BarAssembler`] compiles each bar's
//! message flows, stages the resulting documents together with the library
//! files and the compiled binary, and zips the staging tree twice: the
//! application directory into an `.appzip`, then the `.appzip` and its manifest
//! into the final `.bar`.
//!
//! Archive writing sits behind the [`ArchiveWriter`] trait; [`ZipArchiveWriter`]
//! is the implementation used for real builds.

mod archive;
mod assembler;
mod bar;
mod documents;
mod error;
mod registry;

pub use archive::{ArchiveWriter, READ_BUFFER_SIZE, ZipArchiveWriter};
pub use assembler::{APPLICATION_EXTENSION, BarAssembler};
pub use bar::{BAR_EXTENSION, BarFile, LIBS_DIR, normalize_bar_name};
pub use documents::{APPLICATION_DESCRIPTOR, BarDocuments, FLOW_EXTENSION, MANIFEST};
pub use error::{ArtifactError, PackageError};
pub use registry::BarRegistry;
