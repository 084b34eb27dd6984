use flowbar_config::{BarDef, BuildDef};
use flowbar_flow::{MessageFlow, PropertyListing};
use tracing::debug;

use crate::bar::{BarFile, normalize_bar_name};
use crate::error::ArtifactError;

/// The bars configured for one build, keyed by normalized name.
///
/// Create one registry per build and consume it with [`BarRegistry::into_bars`]
/// once packaging starts. Registration takes `&mut self`; callers configuring
/// from several threads share the registry behind a `Mutex`.
#[derive(Debug, Default)]
pub struct BarRegistry {
  bars: Vec<BarFile>,
}

impl BarRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register every bar of a build definition.
  pub fn from_definition(def: BuildDef) -> Result<Self, ArtifactError> {
    let mut registry = Self::new();
    for bar in def.bars {
      registry.register_definition(bar)?;
    }
    Ok(registry)
  }

  /// Return the bar registered under `name`, creating it on first use.
  ///
  /// `Sample`, `Sample.bar` and `Sample.BAR` all resolve to the same bar.
  pub fn register(&mut self, name: &str) -> Result<&mut BarFile, ArtifactError> {
    let normalized = normalize_bar_name(name)?;
    let index = match self.bars.iter().position(|bar| bar.name() == normalized) {
      Some(index) => index,
      None => {
        debug!(bar = %normalized, "registering bar");
        self.bars.push(BarFile::new(&normalized)?);
        self.bars.len() - 1
      }
    };
    Ok(&mut self.bars[index])
  }

  /// Register a bar definition, appending its flows to any bar already registered
  /// under the same name.
  pub fn register_definition(&mut self, def: BarDef) -> Result<&mut BarFile, ArtifactError> {
    let flows = def
      .flows
      .into_iter()
      .map(MessageFlow::try_from)
      .collect::<Result<Vec<_>, _>>()?;

    let bar = self.register(&def.name)?;
    bar.set_listing(if def.declare_defaults {
      PropertyListing::Declared
    } else {
      PropertyListing::Overrides
    });
    for flow in flows {
      bar.add_message_flow(flow);
    }
    Ok(bar)
  }

  pub fn get(&self, name: &str) -> Option<&BarFile> {
    let normalized = normalize_bar_name(name).ok()?;
    self.bars.iter().find(|bar| bar.name() == normalized)
  }

  pub fn len(&self) -> usize {
    self.bars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bars.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &BarFile> {
    self.bars.iter()
  }

  /// Consume the registry, yielding bars in registration order.
  pub fn into_bars(self) -> Vec<BarFile> {
    self.bars
  }
}
