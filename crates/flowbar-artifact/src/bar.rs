use std::path::{Path, PathBuf};

use flowbar_flow::{FlowError, MessageFlow, PropertyListing};

use crate::error::ArtifactError;

/// File extension of the outer archive.
pub const BAR_EXTENSION: &str = "bar";

/// Directory under the build root that holds finished bars and their staging trees.
pub const LIBS_DIR: &str = "libs";

/// Strip a trailing `.bar` (any case) and reject names that end up empty.
pub fn normalize_bar_name(name: &str) -> Result<String, ArtifactError> {
  let suffix_start = name.len().saturating_sub(BAR_EXTENSION.len() + 1);
  let stripped = match name.get(suffix_start..) {
    Some(suffix) if suffix.eq_ignore_ascii_case(".bar") => &name[..suffix_start],
    _ => name,
  };

  if stripped.trim().is_empty() {
    return Err(ArtifactError::EmptyName(name.to_string()));
  }
  Ok(stripped.to_string())
}

/// A deployable bar: an ordered list of message flows packaged together.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFile {
  name: String,
  flows: Vec<MessageFlow>,
  listing: PropertyListing,
}

impl BarFile {
  pub fn new(name: &str) -> Result<Self, ArtifactError> {
    Ok(Self {
      name: normalize_bar_name(name)?,
      flows: Vec::new(),
      listing: PropertyListing::Overrides,
    })
  }

  /// Bar name without the `.bar` suffix.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn flows(&self) -> &[MessageFlow] {
    &self.flows
  }

  /// Append a flow. Flow names are not checked for collisions.
  pub fn add_message_flow(&mut self, flow: MessageFlow) {
    self.flows.push(flow);
  }

  /// Append a new, unwired flow and return it for configuration.
  pub fn create_message_flow(&mut self, name: &str) -> Result<&mut MessageFlow, FlowError> {
    self.flows.push(MessageFlow::new(name)?);
    let index = self.flows.len() - 1;
    Ok(&mut self.flows[index])
  }

  pub fn listing(&self) -> PropertyListing {
    self.listing
  }

  pub fn set_listing(&mut self, listing: PropertyListing) {
    self.listing = listing;
  }

  /// Manifest written at both archive levels.
  pub fn manifest(&self) -> &'static str {
    crate::documents::MANIFEST
  }

  /// Where the finished bar is written: `<build_dir>/libs/<name>.bar`.
  pub fn path(&self, build_dir: &Path) -> PathBuf {
    build_dir
      .join(LIBS_DIR)
      .join(format!("{}.{BAR_EXTENSION}", self.name))
  }
}
