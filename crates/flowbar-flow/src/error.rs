use thiserror::Error;

/// Configuration errors in a message flow or one of its nodes.
///
/// These are always raised before any document is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
  #[error("message flow name must not be empty")]
  EmptyFlowName,

  #[error("node name must not be empty")]
  EmptyNodeName,

  #[error("node '{node}' must name a queue")]
  EmptyQueueName { node: String },

  #[error("node '{node}' must name an implementation class")]
  EmptyClassName { node: String },

  #[error("message flow '{flow}' has no processing node")]
  MissingProcessingNode { flow: String },

  #[error("processing node of message flow '{flow}' has no input node")]
  MissingInputNode { flow: String },

  #[error("message flow '{flow}' has more than one node named '{node}'")]
  DuplicateNodeName { flow: String, node: String },
}
