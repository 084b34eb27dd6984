//! Conversion from build definitions into validated flow entities.

use flowbar_config::{FlowDef, InputNodeDef, OutputNodeDef, ProcessingNodeDef};

use crate::error::FlowError;
use crate::flow::MessageFlow;
use crate::node::{InputNode, MqInputNode, MqOutputNode, OutputNode, ProcessingNode};

impl TryFrom<InputNodeDef> for InputNode {
  type Error = FlowError;

  fn try_from(def: InputNodeDef) -> Result<Self, Self::Error> {
    match def {
      InputNodeDef::MqInput(def) => {
        Ok(MqInputNode::new(def.name, def.queue_name)?.with_settings(def.settings).into())
      }
    }
  }
}

impl TryFrom<OutputNodeDef> for OutputNode {
  type Error = FlowError;

  fn try_from(def: OutputNodeDef) -> Result<Self, Self::Error> {
    match def {
      OutputNodeDef::MqOutput(def) => {
        Ok(MqOutputNode::new(def.name, def.queue_name)?.with_settings(def.settings).into())
      }
    }
  }
}

impl TryFrom<ProcessingNodeDef> for ProcessingNode {
  type Error = FlowError;

  fn try_from(def: ProcessingNodeDef) -> Result<Self, Self::Error> {
    let mut node = ProcessingNode::named(def.name, def.class_name)?.with_settings(def.settings);
    node.input = def.input.map(InputNode::try_from).transpose()?;
    node.out = def.out.map(OutputNode::try_from).transpose()?;
    node.alternate = def.alternate.map(OutputNode::try_from).transpose()?;
    node.failure = def.failure.map(OutputNode::try_from).transpose()?;
    Ok(node)
  }
}

/// A missing processing node is carried over as-is and reported when the flow is compiled.
impl TryFrom<FlowDef> for MessageFlow {
  type Error = FlowError;

  fn try_from(def: FlowDef) -> Result<Self, Self::Error> {
    let mut flow = MessageFlow::new(def.name)?.with_settings(def.settings);
    if let Some(processing) = def.processing {
      flow.set_processing_node(ProcessingNode::try_from(processing)?);
    }
    Ok(flow)
  }
}
