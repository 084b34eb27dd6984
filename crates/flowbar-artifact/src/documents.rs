//! Fixed-content files and the per-bar compiled documents.

use flowbar_flow::FlowError;

use crate::bar::BarFile;

pub const MANIFEST: &str = "srcSelected=false;showSrc=true;esql21VersionSelected=false;";

pub const APPLICATION_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<ns2:appDescriptor xmlns="http://com.ibm.etools.mft.descriptor.base" xmlns:ns2="http://com.ibm.etools.mft.descriptor.app">
  <references/>
</ns2:appDescriptor>
"#;

const BROKER_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Broker>
  <CompiledApplication>
    <ConfigurableProperty uri="startMode"/>
    <ConfigurableProperty uri="javaIsolation"/>
  </CompiledApplication>
"#;

const BROKER_FOOTER: &str = "</Broker>\n";

/// File extension of a topology document.
pub const FLOW_EXTENSION: &str = "msgflow";

/// Every document of a bar, compiled in memory before anything touches the disk.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDocuments {
  /// Contents of `META-INF/broker.xml`.
  pub broker: String,
  /// `(file name, topology document)` per flow, in flow order.
  pub flows: Vec<(String, String)>,
}

impl BarDocuments {
  pub fn compile(bar: &BarFile) -> Result<Self, FlowError> {
    let mut broker = String::from(BROKER_HEADER);
    let mut flows = Vec::with_capacity(bar.flows().len());

    for flow in bar.flows() {
      broker.push_str(&flow.compile_properties_with(bar.listing())?);
      flows.push((
        format!("{}.{FLOW_EXTENSION}", flow.name()),
        flow.compile_topology()?,
      ));
    }
    broker.push_str(BROKER_FOOTER);

    Ok(Self { broker, flows })
  }
}

#[cfg(test)]
mod tests {
  use flowbar_flow::{MessageFlow, MqInputNode, ProcessingNode};

  use super::*;

  fn wired_flow(name: &str) -> MessageFlow {
    let processor = ProcessingNode::new("com.x.App")
      .unwrap()
      .with_input(MqInputNode::new("MQ_INPUT", "IN").unwrap());
    MessageFlow::new(name).unwrap().with_processing_node(processor)
  }

  #[test]
  fn test_broker_document_wraps_every_flow() {
    let mut bar = BarFile::new("Sample").unwrap();
    bar.add_message_flow(wired_flow("first"));
    bar.add_message_flow(wired_flow("second"));

    let documents = BarDocuments::compile(&bar).unwrap();
    assert!(documents.broker.starts_with(BROKER_HEADER));
    assert!(documents.broker.ends_with("</CompiledMessageFlow>\n</Broker>\n"));

    let first = documents.broker.find("<CompiledMessageFlow name=\"first\">").unwrap();
    let second = documents.broker.find("<CompiledMessageFlow name=\"second\">").unwrap();
    assert!(first < second);

    let names: Vec<&str> = documents.flows.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["first.msgflow", "second.msgflow"]);
  }

  #[test]
  fn test_any_invalid_flow_fails_the_whole_bar() {
    let mut bar = BarFile::new("Sample").unwrap();
    bar.add_message_flow(wired_flow("first"));
    bar.add_message_flow(MessageFlow::new("broken").unwrap());

    assert_eq!(
      BarDocuments::compile(&bar),
      Err(FlowError::MissingProcessingNode {
        flow: "broken".to_string()
      })
    );
  }
}
