use flowbar_config::{MqInputSettings, SecurityProfile, ValidateMaster};

use super::mq_client::CLIENT_RULES;
use super::{FlowNode, NodeType, require_identity};
use crate::error::FlowError;
use crate::property::{
  PropertyListing, PropertyOwner, PropertyRule, above, always, non_blank, render_rules, unless,
};
use crate::topology::node_element;

/// Reads messages from an MQ queue.
#[derive(Debug, Clone, PartialEq)]
pub struct MqInputNode {
  name: String,
  queue_name: String,
  pub settings: MqInputSettings,
}

impl MqInputNode {
  /// Create an input node reading from `queue_name`.
  ///
  /// Fails when either the node name or the queue name is empty.
  pub fn new(name: impl Into<String>, queue_name: impl Into<String>) -> Result<Self, FlowError> {
    let name = name.into();
    let queue_name = queue_name.into();
    require_identity(&name, &queue_name, |node| FlowError::EmptyQueueName { node })?;

    Ok(Self {
      name,
      queue_name,
      settings: MqInputSettings::default(),
    })
  }

  pub fn with_settings(mut self, settings: MqInputSettings) -> Self {
    self.settings = settings;
    self
  }

  pub fn queue_name(&self) -> &str {
    &self.queue_name
  }
}

const IDENTITY_RULES: &[PropertyRule<MqInputNode>] = &[PropertyRule {
  name: "queueName",
  value: |n| always(&n.queue_name),
}];

const INPUT_RULES: &[PropertyRule<MqInputNode>] = &[
  PropertyRule {
    name: "serializationToken",
    value: |n| non_blank(&n.settings.serialization_token),
  },
  PropertyRule {
    name: "topicProperty",
    value: |n| non_blank(&n.settings.topic),
  },
  PropertyRule {
    name: "resetBrowseTimeout",
    value: |n| above(n.settings.reset_browse_timeout, -1),
  },
  PropertyRule {
    name: "validateMaster",
    value: |n| unless(n.settings.validate, ValidateMaster::None),
  },
  PropertyRule {
    name: "securityProfileName",
    value: |n| unless(n.settings.client.security_profile, SecurityProfile::None),
  },
  PropertyRule {
    name: "componentLevel",
    value: |_| None,
  },
  PropertyRule {
    name: "additionalInstances",
    value: |n| above(n.settings.additional_instances, 0),
  },
  PropertyRule {
    name: "policyUrl",
    value: |n| non_blank(&n.settings.client.policy_url),
  },
];

impl FlowNode for MqInputNode {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_type(&self) -> NodeType {
    NodeType::MqInput
  }

  fn compile_properties(&self, flow_name: &str, listing: PropertyListing) -> String {
    let owner = PropertyOwner::Node(&self.name);
    let mut out = String::new();
    render_rules(&mut out, flow_name, owner, self, IDENTITY_RULES, listing);
    render_rules(&mut out, flow_name, owner, &self.settings.client, CLIENT_RULES, listing);
    render_rules(&mut out, flow_name, owner, self, INPUT_RULES, listing);
    out
  }

  fn compile_topology(&self, ordinal: u32) -> String {
    let browse = if self.settings.browse { "true" } else { "false" };
    node_element(
      self.node_type().msgnode(),
      ordinal,
      "68,216",
      &[("queueName", self.queue_name.as_str()), ("browse", browse)],
      &self.name,
    )
  }
}
