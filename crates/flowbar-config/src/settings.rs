//! Tunable runtime settings.
//!
//! Every field defaults to the value the integration runtime already assumes, so a
//! default settings struct produces no property overrides at all.

use serde::{Deserialize, Serialize};

use crate::enums::{
  MqConnection, PolicySet, PolicySetBindings, ProcessingAction, SecurityProfile, StartMode,
  ValidateMaster,
};

/// Settings that live on the message flow itself rather than on any node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
  pub additional_instances: u32,
  /// Messages per second.
  pub notification_threshold: u32,
  /// Messages per second.
  pub maximum_rate: u32,
  /// Seconds.
  pub processing_timeout: u32,
  pub processing_action: ProcessingAction,
  /// Workload management policy name.
  pub policy: String,
  pub commit_count: u32,
  pub commit_interval: u32,
  pub coordinated_transaction: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub consumer_policy_set: Option<PolicySet>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub consumer_policy_set_bindings: Option<PolicySetBindings>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub provider_policy_set: Option<PolicySet>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub provider_policy_set_bindings: Option<PolicySetBindings>,
  pub security_profile_name: String,
  pub monitoring_profile_name: String,
  pub start_mode: StartMode,
  pub start_additional_instances_when_flow_starts: bool,
}

impl Default for FlowSettings {
  fn default() -> Self {
    Self {
      additional_instances: 0,
      notification_threshold: 0,
      maximum_rate: 0,
      processing_timeout: 0,
      processing_action: ProcessingAction::None,
      policy: String::new(),
      commit_count: 1,
      commit_interval: 0,
      coordinated_transaction: false,
      consumer_policy_set: None,
      consumer_policy_set_bindings: None,
      provider_policy_set: None,
      provider_policy_set_bindings: None,
      security_profile_name: String::new(),
      monitoring_profile_name: String::new(),
      start_mode: StartMode::Maintained,
      start_additional_instances_when_flow_starts: false,
    }
  }
}

/// Queue manager connection settings shared by MQ input and output nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MqClientSettings {
  pub connection: MqConnection,
  pub destination_queue_manager_name: String,
  pub queue_manager_host_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub listener_port_number: Option<u16>,
  pub channel_name: String,
  pub security_identity: String,
  pub use_ssl: bool,
  pub ssl_peer_name: String,
  pub ssl_cipher_spec: String,
  pub security_profile: SecurityProfile,
  pub policy_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqInputSettings {
  #[serde(flatten)]
  pub client: MqClientSettings,
  /// Browse messages instead of removing them from the queue.
  pub browse: bool,
  /// Negative values leave the runtime default in place.
  pub reset_browse_timeout: i32,
  /// z/OS serialization token.
  pub serialization_token: String,
  pub topic: String,
  pub validate: ValidateMaster,
  pub additional_instances: u32,
}

impl Default for MqInputSettings {
  fn default() -> Self {
    Self {
      client: MqClientSettings::default(),
      browse: false,
      reset_browse_timeout: -1,
      serialization_token: String::new(),
      topic: String::new(),
      validate: ValidateMaster::None,
      additional_instances: 0,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqOutputSettings {
  #[serde(flatten)]
  pub client: MqClientSettings,
  pub queue_manager_name: String,
  pub reply_to_queue: String,
  pub reply_to_queue_manager: String,
  pub validate: ValidateMaster,
  pub add_to_request_group: bool,
  pub request_folder: String,
  /// Seconds.
  pub request_timeout: u32,
}

impl Default for MqOutputSettings {
  fn default() -> Self {
    Self {
      client: MqClientSettings::default(),
      queue_manager_name: String::new(),
      reply_to_queue: String::new(),
      reply_to_queue_manager: String::new(),
      validate: ValidateMaster::Inherit,
      add_to_request_group: false,
      request_folder: String::new(),
      request_timeout: 0,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
  pub java_class_loader: String,
  pub validate: ValidateMaster,
}
