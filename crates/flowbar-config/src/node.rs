use serde::{Deserialize, Serialize};

use crate::settings::{MqInputSettings, MqOutputSettings, ProcessingSettings};

/// Symbolic name given to a processing node when the definition omits one.
pub const DEFAULT_PROCESSOR_NAME: &str = "processor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputNodeDef {
  MqInput(MqInputDef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputNodeDef {
  MqOutput(MqOutputDef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MqInputDef {
  pub name: String,
  pub queue_name: String,
  #[serde(flatten)]
  pub settings: MqInputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MqOutputDef {
  pub name: String,
  pub queue_name: String,
  #[serde(flatten)]
  pub settings: MqOutputSettings,
}

/// The compute node of a flow together with everything wired to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingNodeDef {
  #[serde(default = "default_processor_name")]
  pub name: String,
  /// Fully qualified implementation class.
  pub class_name: String,
  #[serde(flatten)]
  pub settings: ProcessingSettings,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub input: Option<InputNodeDef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub out: Option<OutputNodeDef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternate: Option<OutputNodeDef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub failure: Option<OutputNodeDef>,
}

fn default_processor_name() -> String {
  DEFAULT_PROCESSOR_NAME.to_string()
}
