use std::collections::HashSet;

use flowbar_config::{FlowSettings, ProcessingAction, StartMode};
use quick_xml::escape::escape;

use crate::error::FlowError;
use crate::node::{FlowNode, InputNode, OutputNode, ProcessingNode};
use crate::property::{
  PropertyListing, PropertyOwner, PropertyRule, above, flag, non_blank, present, render_rules,
  unless,
};
use crate::topology::{DOCUMENT_FOOTER, Slot, connection, document_header};

/// A named message flow: one processing node and everything wired to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFlow {
  name: String,
  pub settings: FlowSettings,
  processing: Option<ProcessingNode>,
}

/// The validated wiring of a flow, borrowed for one compile pass.
#[derive(Debug, Clone, Copy)]
pub struct Wiring<'a> {
  pub input: &'a InputNode,
  pub processor: &'a ProcessingNode,
  pub out: Option<&'a OutputNode>,
  pub alternate: Option<&'a OutputNode>,
  pub failure: Option<&'a OutputNode>,
}

impl<'a> Wiring<'a> {
  /// Present nodes in slot order: input, processor, out, alternate, failure.
  pub fn slots(&self) -> Vec<(Slot, &'a dyn FlowNode)> {
    let mut slots: Vec<(Slot, &'a dyn FlowNode)> = vec![
      (Slot::Input, self.input as &dyn FlowNode),
      (Slot::Processor, self.processor as &dyn FlowNode),
    ];
    let outputs = [
      (Slot::Out, self.out),
      (Slot::Alternate, self.alternate),
      (Slot::Failure, self.failure),
    ];
    for (slot, node) in outputs {
      if let Some(node) = node {
        slots.push((slot, node as &dyn FlowNode));
      }
    }
    slots
  }

  /// Wired edges in emission order. The input always feeds the processor.
  pub fn edges(&self) -> Vec<(Slot, Slot)> {
    let mut edges = vec![(Slot::Input, Slot::Processor)];
    edges.extend(
      self
        .slots()
        .into_iter()
        .map(|(slot, _)| slot)
        .filter(|slot| matches!(slot, Slot::Out | Slot::Alternate | Slot::Failure))
        .map(|slot| (Slot::Processor, slot)),
    );
    edges
  }
}

const FLOW_RULES: &[PropertyRule<FlowSettings>] = &[
  PropertyRule {
    name: "additionalInstances",
    value: |s| above(s.additional_instances, 0),
  },
  PropertyRule {
    name: "notificationThresholdMsgsPerSec",
    value: |s| above(s.notification_threshold, 0),
  },
  PropertyRule {
    name: "maximumRateMsgsPerSec",
    value: |s| above(s.maximum_rate, 0),
  },
  PropertyRule {
    name: "processingTimeoutSec",
    value: |s| above(s.processing_timeout, 0),
  },
  PropertyRule {
    name: "processingTimeoutAction",
    value: |s| unless(s.processing_action, ProcessingAction::None),
  },
  PropertyRule {
    name: "wlmPolicy",
    value: |s| non_blank(&s.policy),
  },
  PropertyRule {
    name: "commitCount",
    value: |s| above(s.commit_count, 1),
  },
  PropertyRule {
    name: "commitInterval",
    value: |s| above(s.commit_interval, 0),
  },
  PropertyRule {
    name: "coordinatedTransaction",
    value: |s| flag(s.coordinated_transaction),
  },
  PropertyRule {
    name: "consumerPolicySet",
    value: |s| present(s.consumer_policy_set),
  },
  PropertyRule {
    name: "providerPolicySet",
    value: |s| present(s.provider_policy_set),
  },
  PropertyRule {
    name: "consumerPolicySetBindings",
    value: |s| present(s.consumer_policy_set_bindings),
  },
  PropertyRule {
    name: "providerPolicySetBindings",
    value: |s| present(s.provider_policy_set_bindings),
  },
  PropertyRule {
    name: "securityProfileName",
    value: |s| non_blank(&s.security_profile_name),
  },
  PropertyRule {
    name: "monitoringProfile",
    value: |s| non_blank(&s.monitoring_profile_name),
  },
  PropertyRule {
    name: "startMode",
    value: |s| unless(s.start_mode, StartMode::Maintained),
  },
  PropertyRule {
    name: "startInstancesWhenFlowStarts",
    value: |s| flag(s.start_additional_instances_when_flow_starts),
  },
];

impl MessageFlow {
  /// Create an unwired flow. Fails when `name` is empty.
  pub fn new(name: impl Into<String>) -> Result<Self, FlowError> {
    let name = name.into();
    if name.trim().is_empty() {
      return Err(FlowError::EmptyFlowName);
    }

    Ok(Self {
      name,
      settings: FlowSettings::default(),
      processing: None,
    })
  }

  pub fn with_settings(mut self, settings: FlowSettings) -> Self {
    self.settings = settings;
    self
  }

  pub fn with_processing_node(mut self, node: ProcessingNode) -> Self {
    self.processing = Some(node);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn set_processing_node(&mut self, node: ProcessingNode) {
    self.processing = Some(node);
  }

  pub fn processing_node(&self) -> Option<&ProcessingNode> {
    self.processing.as_ref()
  }

  pub fn processing_node_mut(&mut self) -> Option<&mut ProcessingNode> {
    self.processing.as_mut()
  }

  /// Check that the flow is complete enough to compile.
  ///
  /// A processing node and its input node are required, and node names must be
  /// unique within the flow.
  pub fn ensure_nodes(&self) -> Result<Wiring<'_>, FlowError> {
    let processor = self
      .processing
      .as_ref()
      .ok_or_else(|| FlowError::MissingProcessingNode {
        flow: self.name.clone(),
      })?;
    let input = processor
      .input
      .as_ref()
      .ok_or_else(|| FlowError::MissingInputNode {
        flow: self.name.clone(),
      })?;

    let wiring = Wiring {
      input,
      processor,
      out: processor.out.as_ref(),
      alternate: processor.alternate.as_ref(),
      failure: processor.failure.as_ref(),
    };

    let mut seen = HashSet::new();
    for (_, node) in wiring.slots() {
      if !seen.insert(node.name()) {
        return Err(FlowError::DuplicateNodeName {
          flow: self.name.clone(),
          node: node.name().to_string(),
        });
      }
    }

    Ok(wiring)
  }

  /// Compile the property override block, listing only non-default values.
  pub fn compile_properties(&self) -> Result<String, FlowError> {
    self.compile_properties_with(PropertyListing::Overrides)
  }

  /// Compile the `CompiledMessageFlow` block of the application property document.
  ///
  /// Flow-level properties come first, followed by each wired node in slot order.
  pub fn compile_properties_with(&self, listing: PropertyListing) -> Result<String, FlowError> {
    let wiring = self.ensure_nodes()?;

    let mut document = format!("<CompiledMessageFlow name=\"{}\">\n", escape(self.name.as_str()));
    render_rules(
      &mut document,
      &self.name,
      PropertyOwner::Flow,
      &self.settings,
      FLOW_RULES,
      listing,
    );
    for (_, node) in wiring.slots() {
      document.push_str(&node.compile_properties(&self.name, listing));
    }
    document.push_str("</CompiledMessageFlow>\n");

    Ok(document)
  }

  /// Compile the `.msgflow` topology document.
  ///
  /// Node ordinals come from fixed slots, so an absent optional output leaves a
  /// gap instead of renumbering the outputs after it.
  pub fn compile_topology(&self) -> Result<String, FlowError> {
    let wiring = self.ensure_nodes()?;
    let slots = wiring.slots();

    let mut namespaces: Vec<String> = Vec::new();
    for (_, node) in &slots {
      let namespace = node.namespace();
      if !namespaces.contains(&namespace) {
        namespaces.push(namespace);
      }
    }

    let mut document = document_header(&self.name, &namespaces);
    for (slot, node) in &slots {
      document.push_str(&node.compile_topology(slot.ordinal()));
      document.push('\n');
    }
    for (index, (source, target)) in wiring.edges().into_iter().enumerate() {
      document.push_str(&connection(index + 1, source, target));
      document.push('\n');
    }
    document.push_str(DOCUMENT_FOOTER);

    Ok(document)
  }
}
