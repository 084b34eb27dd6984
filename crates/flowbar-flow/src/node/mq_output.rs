use flowbar_config::{MqOutputSettings, SecurityProfile, ValidateMaster};

use super::mq_client::CLIENT_RULES;
use super::{FlowNode, NodeType, require_identity};
use crate::error::FlowError;
use crate::property::{
  PropertyListing, PropertyOwner, PropertyRule, above, always, flag, non_blank, render_rules,
  unless,
};
use crate::topology::node_element;

/// Writes messages to an MQ queue.
#[derive(Debug, Clone, PartialEq)]
pub struct MqOutputNode {
  name: String,
  queue_name: String,
  pub settings: MqOutputSettings,
}

impl MqOutputNode {
  /// Create an output node writing to `queue_name`.
  ///
  /// Fails when either the node name or the queue name is empty.
  pub fn new(name: impl Into<String>, queue_name: impl Into<String>) -> Result<Self, FlowError> {
    let name = name.into();
    let queue_name = queue_name.into();
    require_identity(&name, &queue_name, |node| FlowError::EmptyQueueName { node })?;

    Ok(Self {
      name,
      queue_name,
      settings: MqOutputSettings::default(),
    })
  }

  pub fn with_settings(mut self, settings: MqOutputSettings) -> Self {
    self.settings = settings;
    self
  }

  pub fn queue_name(&self) -> &str {
    &self.queue_name
  }
}

const IDENTITY_RULES: &[PropertyRule<MqOutputNode>] = &[PropertyRule {
  name: "queueName",
  value: |n| always(&n.queue_name),
}];

const OUTPUT_RULES: &[PropertyRule<MqOutputNode>] = &[
  PropertyRule {
    name: "queueManagerName",
    value: |n| non_blank(&n.settings.queue_manager_name),
  },
  PropertyRule {
    name: "replyToQMgr",
    value: |n| non_blank(&n.settings.reply_to_queue_manager),
  },
  PropertyRule {
    name: "replyToQ",
    value: |n| non_blank(&n.settings.reply_to_queue),
  },
  PropertyRule {
    name: "validateMaster",
    value: |n| unless(n.settings.validate, ValidateMaster::Inherit),
  },
  PropertyRule {
    name: "securityProfileName",
    value: |n| unless(n.settings.client.security_profile, SecurityProfile::None),
  },
  PropertyRule {
    name: "policyUrl",
    value: |n| non_blank(&n.settings.client.policy_url),
  },
  PropertyRule {
    name: "AddRequestToGroup",
    value: |n| flag(n.settings.add_to_request_group),
  },
  PropertyRule {
    name: "GroupRequestFolderName",
    value: |n| non_blank(&n.settings.request_folder),
  },
  PropertyRule {
    name: "GroupRequestTimeout",
    value: |n| above(n.settings.request_timeout, 0),
  },
];

impl FlowNode for MqOutputNode {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_type(&self) -> NodeType {
    NodeType::MqOutput
  }

  fn compile_properties(&self, flow_name: &str, listing: PropertyListing) -> String {
    let owner = PropertyOwner::Node(&self.name);
    let mut out = String::new();
    render_rules(&mut out, flow_name, owner, self, IDENTITY_RULES, listing);
    render_rules(&mut out, flow_name, owner, &self.settings.client, CLIENT_RULES, listing);
    render_rules(&mut out, flow_name, owner, self, OUTPUT_RULES, listing);
    out
  }

  fn compile_topology(&self, ordinal: u32) -> String {
    node_element(
      self.node_type().msgnode(),
      ordinal,
      "461,311",
      &[("queueName", self.queue_name.as_str())],
      &self.name,
    )
  }
}
