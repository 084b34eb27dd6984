//! Packaging tests: build real bars in temp directories and open both archive levels.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use flowbar_artifact::{
  ArchiveWriter, BarAssembler, BarFile, BarRegistry, MANIFEST, PackageError, ZipArchiveWriter,
};
use flowbar_flow::{FlowError, MessageFlow, MqInputNode, MqOutputNode, ProcessingNode};
use zip::ZipArchive;

/// Writes real archives except for the level whose extension matches, where it
/// leaves a partial file behind and fails.
struct FailingWriter {
  extension: &'static str,
}

impl ArchiveWriter for FailingWriter {
  fn write_archive(&self, source_dir: &Path, archive: &Path) -> Result<(), PackageError> {
    if archive.extension() == Some(OsStr::new(self.extension)) {
      fs::write(archive, b"PK partial").unwrap();
      return Err(PackageError::Io {
        path: archive.to_path_buf(),
        source: std::io::Error::other("simulated failure"),
      });
    }
    ZipArchiveWriter::default().write_archive(source_dir, archive)
  }
}

struct Fixture {
  _temp_dir: tempfile::TempDir,
  build_dir: PathBuf,
  libraries: Vec<PathBuf>,
  jar: PathBuf,
}

fn fixture() -> Fixture {
  let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
  let inputs = temp_dir.path().join("inputs");
  fs::create_dir_all(&inputs).unwrap();

  let libraries = vec![inputs.join("log4j-api.jar"), inputs.join("toolkit.jar")];
  for library in &libraries {
    fs::write(library, format!("library {}", library.display())).unwrap();
  }
  let jar = inputs.join("app-1.0.jar");
  fs::write(&jar, b"compiled classes").unwrap();

  Fixture {
    build_dir: temp_dir.path().join("build"),
    _temp_dir: temp_dir,
    libraries,
    jar,
  }
}

fn order_flow() -> MessageFlow {
  let processor = ProcessingNode::new("com.x.App")
    .unwrap()
    .with_input(MqInputNode::new("MQ_INPUT", "IN").unwrap())
    .with_out(MqOutputNode::new("MQ_OUTPUT", "OUT").unwrap());
  MessageFlow::new("orderFlow")
    .unwrap()
    .with_processing_node(processor)
}

fn sample_bar() -> BarFile {
  let mut bar = BarFile::new("Sample.bar").unwrap();
  bar.add_message_flow(order_flow());
  bar
}

fn entry_names<R: Read + std::io::Seek>(archive: &ZipArchive<R>) -> BTreeSet<String> {
  archive.file_names().map(String::from).collect()
}

fn read_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Vec<u8> {
  let mut bytes = Vec::new();
  archive
    .by_name(name)
    .unwrap_or_else(|e| panic!("missing entry {name}: {e}"))
    .read_to_end(&mut bytes)
    .unwrap();
  bytes
}

fn assert_nothing_left(build_dir: &Path) {
  let libs = build_dir.join("libs");
  assert!(!libs.join("Sample").exists(), "staging directory left behind");
  assert!(!libs.join("Sample.bar").exists(), "bar left behind");
  assert!(!libs.join("Sample").join("Sample.appzip").exists());
}

#[test]
fn test_assemble_writes_nested_archives() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);

  let output = assembler
    .assemble(&sample_bar(), &fx.libraries, &fx.jar)
    .unwrap()
    .expect("bar should be written");

  assert_eq!(output, fx.build_dir.join("libs").join("Sample.bar"));
  assert!(!fx.build_dir.join("libs").join("Sample").exists());

  let mut outer = ZipArchive::new(File::open(&output).unwrap()).unwrap();
  assert_eq!(
    entry_names(&outer),
    BTreeSet::from(["META-INF/manifest.mf".to_string(), "Sample.appzip".to_string()])
  );
  assert_eq!(read_entry(&mut outer, "META-INF/manifest.mf"), MANIFEST.as_bytes());

  let inner_bytes = read_entry(&mut outer, "Sample.appzip");
  let mut inner = ZipArchive::new(Cursor::new(inner_bytes)).unwrap();
  assert_eq!(
    entry_names(&inner),
    BTreeSet::from([
      "META-INF/manifest.mf".to_string(),
      "META-INF/broker.xml".to_string(),
      "application.descriptor".to_string(),
      "libs/log4j-api.jar".to_string(),
      "libs/toolkit.jar".to_string(),
      "src.jar".to_string(),
      "orderFlow.msgflow".to_string(),
    ])
  );

  assert_eq!(read_entry(&mut inner, "src.jar"), b"compiled classes");
  assert_eq!(
    read_entry(&mut inner, "libs/toolkit.jar"),
    fs::read(&fx.libraries[1]).unwrap()
  );

  let topology = String::from_utf8(read_entry(&mut inner, "orderFlow.msgflow")).unwrap();
  assert_eq!(topology, order_flow().compile_topology().unwrap());

  let broker = String::from_utf8(read_entry(&mut inner, "META-INF/broker.xml")).unwrap();
  assert!(broker.contains("<ConfigurableProperty uri=\"startMode\"/>"));
  assert!(broker.contains("<ConfigurableProperty uri=\"javaIsolation\"/>"));
  assert!(broker.contains(&order_flow().compile_properties().unwrap()));
}

#[test]
fn test_rebuild_is_byte_identical() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);
  let bar = sample_bar();

  let output = assembler.assemble(&bar, &fx.libraries, &fx.jar).unwrap().unwrap();
  let first = fs::read(&output).unwrap();

  // Leftovers from an aborted run must not leak into the next bar.
  let stale = fx.build_dir.join("libs").join("Sample").join("stale.txt");
  fs::create_dir_all(stale.parent().unwrap()).unwrap();
  fs::write(&stale, "stale").unwrap();

  assembler.assemble(&bar, &fx.libraries, &fx.jar).unwrap();
  assert_eq!(fs::read(&output).unwrap(), first);
}

#[test]
fn test_bar_without_flows_is_skipped() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);
  let bar = BarFile::new("Sample").unwrap();

  let output = assembler.assemble(&bar, &fx.libraries, &fx.jar).unwrap();
  assert!(output.is_none());
  assert!(!fx.build_dir.exists());
}

#[test]
fn test_invalid_flow_fails_before_any_io() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);
  let mut bar = sample_bar();
  bar.add_message_flow(
    MessageFlow::new("noInput")
      .unwrap()
      .with_processing_node(ProcessingNode::new("com.x.Other").unwrap()),
  );

  let err = assembler.assemble(&bar, &fx.libraries, &fx.jar).unwrap_err();
  assert!(matches!(
    err,
    PackageError::Flow(FlowError::MissingInputNode { ref flow }) if flow == "noInput"
  ));
  assert!(!fx.build_dir.exists());
}

#[test]
fn test_missing_library_fails_before_any_io() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);
  let missing = fx.build_dir.join("nowhere.jar");
  let libraries = vec![fx.libraries[0].clone(), missing.clone()];

  let err = assembler.assemble(&sample_bar(), &libraries, &fx.jar).unwrap_err();
  assert!(matches!(err, PackageError::MissingSource { ref path } if *path == missing));
  assert!(!fx.build_dir.exists());
}

#[test]
fn test_inner_archive_failure_cleans_up() {
  let fx = fixture();
  let assembler = BarAssembler::with_writer(&fx.build_dir, FailingWriter { extension: "appzip" });

  let err = assembler
    .assemble(&sample_bar(), &fx.libraries, &fx.jar)
    .unwrap_err();
  assert!(matches!(err, PackageError::Io { .. }));
  assert_nothing_left(&fx.build_dir);
}

#[test]
fn test_outer_archive_failure_cleans_up() {
  let fx = fixture();
  let assembler = BarAssembler::with_writer(&fx.build_dir, FailingWriter { extension: "bar" });

  let err = assembler
    .assemble(&sample_bar(), &fx.libraries, &fx.jar)
    .unwrap_err();
  assert!(matches!(err, PackageError::Io { .. }));
  assert_nothing_left(&fx.build_dir);
}

#[test]
fn test_assemble_all_packages_registered_bars() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);

  let mut registry = BarRegistry::new();
  registry.register("Sample.bar").unwrap().add_message_flow(order_flow());
  registry.register("Empty").unwrap();
  let second = registry
    .register("Sample")
    .unwrap()
    .create_message_flow("auditFlow")
    .unwrap();
  second.set_processing_node(
    ProcessingNode::new("com.x.Audit")
      .unwrap()
      .with_input(MqInputNode::new("MQ_AUDIT", "AUDIT").unwrap()),
  );

  let written = assembler.assemble_all(registry, &[], &fx.jar).unwrap();
  assert_eq!(written, vec![fx.build_dir.join("libs").join("Sample.bar")]);

  let mut outer = ZipArchive::new(File::open(&written[0]).unwrap()).unwrap();
  let inner_bytes = read_entry(&mut outer, "Sample.appzip");
  let inner = ZipArchive::new(Cursor::new(inner_bytes)).unwrap();
  let names = entry_names(&inner);
  assert!(names.contains("orderFlow.msgflow"));
  assert!(names.contains("auditFlow.msgflow"));
  assert!(!names.iter().any(|name| name.starts_with("libs/")));
}

#[test]
fn test_assemble_all_with_empty_registry() {
  let fx = fixture();
  let assembler = BarAssembler::new(&fx.build_dir);
  let written = assembler
    .assemble_all(BarRegistry::new(), &fx.libraries, &fx.jar)
    .unwrap();
  assert!(written.is_empty());
}
