use serde::{Deserialize, Serialize};

use crate::flow::FlowDef;

/// A deployable bar and the message flows packaged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDef {
  /// Bar name, with or without the `.bar` suffix.
  pub name: String,
  /// Also declare properties left at their runtime default, without an override.
  #[serde(default)]
  pub declare_defaults: bool,
  #[serde(default)]
  pub flows: Vec<FlowDef>,
}

/// Everything a single build invocation packages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildDef {
  #[serde(default)]
  pub bars: Vec<BarDef>,
}
