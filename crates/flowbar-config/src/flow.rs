use serde::{Deserialize, Serialize};

use crate::node::ProcessingNodeDef;
use crate::settings::FlowSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDef {
  pub name: String,
  #[serde(flatten)]
  pub settings: FlowSettings,
  /// Left optional here so that a missing processing node surfaces as a flow
  /// configuration error instead of a parse error.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub processing: Option<ProcessingNodeDef>,
}
