use flowbar_config::{DEFAULT_PROCESSOR_NAME, ProcessingSettings, ValidateMaster};

use super::{FlowNode, InputNode, NodeType, OutputNode, require_identity};
use crate::error::FlowError;
use crate::property::{PropertyListing, PropertyOwner, PropertyRule, non_blank, render_rules, unless};
use crate::topology::node_element;

/// The Java compute node of a message flow.
///
/// The processing node owns the wiring of its flow: one input and up to three
/// outputs (primary, alternate and failure).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingNode {
  name: String,
  class_name: String,
  pub settings: ProcessingSettings,
  pub input: Option<InputNode>,
  pub out: Option<OutputNode>,
  pub alternate: Option<OutputNode>,
  pub failure: Option<OutputNode>,
}

impl ProcessingNode {
  /// Create a processing node named `processor` running `class_name`.
  pub fn new(class_name: impl Into<String>) -> Result<Self, FlowError> {
    Self::named(DEFAULT_PROCESSOR_NAME, class_name)
  }

  pub fn named(name: impl Into<String>, class_name: impl Into<String>) -> Result<Self, FlowError> {
    let name = name.into();
    let class_name = class_name.into();
    require_identity(&name, &class_name, |node| FlowError::EmptyClassName { node })?;

    Ok(Self {
      name,
      class_name,
      settings: ProcessingSettings::default(),
      input: None,
      out: None,
      alternate: None,
      failure: None,
    })
  }

  pub fn with_settings(mut self, settings: ProcessingSettings) -> Self {
    self.settings = settings;
    self
  }

  pub fn with_input(mut self, input: impl Into<InputNode>) -> Self {
    self.input = Some(input.into());
    self
  }

  pub fn with_out(mut self, out: impl Into<OutputNode>) -> Self {
    self.out = Some(out.into());
    self
  }

  pub fn with_alternate(mut self, alternate: impl Into<OutputNode>) -> Self {
    self.alternate = Some(alternate.into());
    self
  }

  pub fn with_failure(mut self, failure: impl Into<OutputNode>) -> Self {
    self.failure = Some(failure.into());
    self
  }

  /// Fully qualified implementation class.
  pub fn class_name(&self) -> &str {
    &self.class_name
  }
}

const PROCESSING_RULES: &[PropertyRule<ProcessingNode>] = &[
  PropertyRule {
    name: "javaClassLoader",
    value: |n| non_blank(&n.settings.java_class_loader),
  },
  PropertyRule {
    name: "validateMaster",
    value: |n| unless(n.settings.validate, ValidateMaster::None),
  },
];

impl FlowNode for ProcessingNode {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_type(&self) -> NodeType {
    NodeType::JavaCompute
  }

  fn compile_properties(&self, flow_name: &str, listing: PropertyListing) -> String {
    let mut out = String::new();
    render_rules(
      &mut out,
      flow_name,
      PropertyOwner::Node(&self.name),
      self,
      PROCESSING_RULES,
      listing,
    );
    out
  }

  fn compile_topology(&self, ordinal: u32) -> String {
    node_element(
      self.node_type().msgnode(),
      ordinal,
      "211,216",
      &[("javaClass", self.class_name.as_str())],
      &self.name,
    )
  }
}
