use std::fmt;

use serde::{Deserialize, Serialize};

/// Implements `Display` using the value the integration runtime expects in overrides.
macro_rules! runtime_display {
  ($ty:ty) => {
    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }
  };
}

/// Message validation mode for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidateMaster {
  #[default]
  None,
  ContentAndValue,
  Content,
  Inherit,
}

impl ValidateMaster {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::None => "None",
      Self::ContentAndValue => "Content and Value",
      Self::Content => "Content",
      Self::Inherit => "Inherit",
    }
  }
}

/// How an MQ node reaches its queue manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MqConnection {
  #[default]
  Local,
  ClientConnectionProperties,
  Ccdt,
}

impl MqConnection {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Local => "Local queue manager",
      Self::ClientConnectionProperties => "MQ client connection properties",
      Self::Ccdt => "Client channel definition table (CCDT) file",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityProfile {
  #[default]
  None,
  DefaultPropagation,
}

impl SecurityProfile {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::None => "No Security Profile",
      Self::DefaultPropagation => "Default Propagation",
    }
  }
}

/// Action taken by the runtime when a flow exceeds its processing timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingAction {
  #[default]
  None,
  RestartServer,
}

impl ProcessingAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::None => "None",
      Self::RestartServer => "Restart the Integration Server",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
  #[default]
  Maintained,
  Manual,
  Automatic,
}

impl StartMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Maintained => "Maintained",
      Self::Manual => "Manual",
      Self::Automatic => "Automatic",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicySet {
  #[serde(rename = "WSRMDefault")]
  WsrmDefault,
  #[serde(rename = "WSS10Default")]
  Wss10Default,
}

impl PolicySet {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::WsrmDefault => "WSRMDefault",
      Self::Wss10Default => "WSS10Default",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicySetBindings {
  #[serde(rename = "WSS10Default")]
  Wss10Default,
}

impl PolicySetBindings {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Wss10Default => "WSS10Default",
    }
  }
}

runtime_display!(ValidateMaster);
runtime_display!(MqConnection);
runtime_display!(SecurityProfile);
runtime_display!(ProcessingAction);
runtime_display!(StartMode);
runtime_display!(PolicySet);
runtime_display!(PolicySetBindings);
