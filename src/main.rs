use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flowbar_artifact::{BarAssembler, BarDocuments, BarRegistry};
use flowbar_config::BuildDef;

/// flowbar - compile message flow definitions into deployable bar archives
#[derive(Parser)]
#[command(name = "flowbar")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log at debug level regardless of RUST_LOG
  #[arg(long, short, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Package every configured bar
  Build {
    /// Path to the build definition (JSON)
    definition: PathBuf,

    /// Build output root; bars are written to <build-dir>/libs
    #[arg(long, default_value = "build")]
    build_dir: PathBuf,

    /// Compiled application archive embedded as src.jar
    #[arg(long)]
    jar: PathBuf,

    /// Library file copied into the application's libs directory (repeatable)
    #[arg(long = "lib", value_name = "FILE")]
    libs: Vec<PathBuf>,
  },

  /// Print the compiled documents of each flow without packaging
  Render {
    /// Path to the build definition (JSON)
    definition: PathBuf,

    /// Only render this bar
    #[arg(long)]
    bar: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command {
    Commands::Build {
      definition,
      build_dir,
      jar,
      libs,
    } => build(definition, build_dir, jar, libs),
    Commands::Render { definition, bar } => render(definition, bar),
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn load_registry(definition: &Path) -> Result<BarRegistry> {
  let content = std::fs::read_to_string(definition)
    .with_context(|| format!("failed to read build definition: {}", definition.display()))?;

  let build_def: BuildDef = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse build definition: {}", definition.display()))?;

  BarRegistry::from_definition(build_def).context("invalid build definition")
}

fn build(definition: PathBuf, build_dir: PathBuf, jar: PathBuf, libs: Vec<PathBuf>) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { build_async(definition, build_dir, jar, libs).await })
}

/// Bars share no state once registered, so each one is packaged on its own blocking task.
async fn build_async(
  definition: PathBuf,
  build_dir: PathBuf,
  jar: PathBuf,
  libs: Vec<PathBuf>,
) -> Result<()> {
  let registry = load_registry(&definition)?;
  if registry.is_empty() {
    warn!("no bar files configured");
    return Ok(());
  }
  info!(bars = registry.len(), build_dir = %build_dir.display(), "packaging bars");

  let assembler = Arc::new(BarAssembler::new(build_dir));
  let libs = Arc::new(libs);
  let jar = Arc::new(jar);

  let mut tasks = JoinSet::new();
  for bar in registry.into_bars() {
    let assembler = Arc::clone(&assembler);
    let libs = Arc::clone(&libs);
    let jar = Arc::clone(&jar);
    tasks.spawn_blocking(move || {
      assembler
        .assemble(&bar, &libs, &jar)
        .with_context(|| format!("failed to package bar '{}'", bar.name()))
    });
  }

  let mut written = Vec::new();
  while let Some(result) = tasks.join_next().await {
    if let Some(path) = result.context("packaging task failed")?? {
      written.push(path);
    }
  }

  written.sort();
  for path in written {
    println!("{}", path.display());
  }

  Ok(())
}

fn render(definition: PathBuf, only: Option<String>) -> Result<()> {
  let registry = load_registry(&definition)?;

  let selected = match &only {
    Some(name) => vec![
      registry
        .get(name)
        .with_context(|| format!("bar '{}' not found in build definition", name))?,
    ],
    None => registry.iter().collect(),
  };

  for bar in selected {
    let documents = BarDocuments::compile(bar)
      .with_context(|| format!("failed to compile bar '{}'", bar.name()))?;

    for (file_name, topology) in &documents.flows {
      println!("==> {}/{}", bar.name(), file_name);
      print!("{}", topology);
    }
    println!("==> {}/META-INF/broker.xml", bar.name());
    print!("{}", documents.broker);
  }

  Ok(())
}
