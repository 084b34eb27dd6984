//! Topology nodes.
//!
//! Every node variant implements [`FlowNode`]. New node kinds are added as new
//! variants of [`InputNode`] or [`OutputNode`] rather than through deeper
//! type hierarchies.

mod mq_client;
mod mq_input;
mod mq_output;
mod processing;

pub use mq_input::MqInputNode;
pub use mq_output::MqOutputNode;
pub use processing::ProcessingNode;

use crate::error::FlowError;
use crate::property::PropertyListing;

/// Node type discriminator, named after the runtime's message node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
  MqInput,
  MqOutput,
  JavaCompute,
}

impl NodeType {
  pub fn msgnode(&self) -> &'static str {
    match self {
      Self::MqInput => "ComIbmMQInput.msgnode",
      Self::MqOutput => "ComIbmMQOutput.msgnode",
      Self::JavaCompute => "ComIbmJavaCompute.msgnode",
    }
  }

  /// Namespace declaration the topology document header carries for this type.
  pub fn namespace(&self) -> String {
    format!("xmlns:{0}=\"{0}\"", self.msgnode())
  }
}

/// Shared contract of every node in a message flow.
pub trait FlowNode {
  /// Symbolic name, unique within the owning flow.
  fn name(&self) -> &str;

  fn node_type(&self) -> NodeType;

  fn namespace(&self) -> String {
    self.node_type().namespace()
  }

  /// Renders this node's property block, one line per listed property.
  fn compile_properties(&self, flow_name: &str, listing: PropertyListing) -> String;

  /// Renders this node's element of the topology composition.
  fn compile_topology(&self, ordinal: u32) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputNode {
  Mq(MqInputNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputNode {
  Mq(MqOutputNode),
}

impl FlowNode for InputNode {
  fn name(&self) -> &str {
    match self {
      Self::Mq(node) => node.name(),
    }
  }

  fn node_type(&self) -> NodeType {
    match self {
      Self::Mq(node) => node.node_type(),
    }
  }

  fn compile_properties(&self, flow_name: &str, listing: PropertyListing) -> String {
    match self {
      Self::Mq(node) => node.compile_properties(flow_name, listing),
    }
  }

  fn compile_topology(&self, ordinal: u32) -> String {
    match self {
      Self::Mq(node) => node.compile_topology(ordinal),
    }
  }
}

impl FlowNode for OutputNode {
  fn name(&self) -> &str {
    match self {
      Self::Mq(node) => node.name(),
    }
  }

  fn node_type(&self) -> NodeType {
    match self {
      Self::Mq(node) => node.node_type(),
    }
  }

  fn compile_properties(&self, flow_name: &str, listing: PropertyListing) -> String {
    match self {
      Self::Mq(node) => node.compile_properties(flow_name, listing),
    }
  }

  fn compile_topology(&self, ordinal: u32) -> String {
    match self {
      Self::Mq(node) => node.compile_topology(ordinal),
    }
  }
}

impl From<MqInputNode> for InputNode {
  fn from(node: MqInputNode) -> Self {
    Self::Mq(node)
  }
}

impl From<MqOutputNode> for OutputNode {
  fn from(node: MqOutputNode) -> Self {
    Self::Mq(node)
  }
}

/// Validates the identity shared by every node: a symbolic name and a primary identifier.
pub(crate) fn require_identity(
  name: &str,
  identifier: &str,
  missing: impl FnOnce(String) -> FlowError,
) -> Result<(), FlowError> {
  if name.trim().is_empty() {
    return Err(FlowError::EmptyNodeName);
  }
  if identifier.trim().is_empty() {
    return Err(missing(name.to_string()));
  }
  Ok(())
}
