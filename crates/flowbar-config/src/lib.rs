//! Flowbar Config
//!
//! This crate contains the serializable build definition types for flowbar.
//! These types are plain data entry: they describe bars, message flows and
//! nodes before they are validated and turned into compilable flows.
//!
//! Definitions are loaded from JSON files by the CLI. Every tunable setting
//! defaults to the integration runtime's own default, so a definition only
//! needs to name identities (flow names, queue names, implementation classes).

mod bar;
mod enums;
mod flow;
mod node;
mod settings;

pub use bar::{BarDef, BuildDef};
pub use enums::{
  MqConnection, PolicySet, PolicySetBindings, ProcessingAction, SecurityProfile, StartMode,
  ValidateMaster,
};
pub use flow::FlowDef;
pub use node::{
  DEFAULT_PROCESSOR_NAME, InputNodeDef, MqInputDef, MqOutputDef, OutputNodeDef, ProcessingNodeDef,
};
pub use settings::{
  FlowSettings, MqClientSettings, MqInputSettings, MqOutputSettings, ProcessingSettings,
};
