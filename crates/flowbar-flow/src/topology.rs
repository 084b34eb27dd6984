//! Building blocks of the `.msgflow` topology document.

use std::fmt::Write;

use quick_xml::escape::escape;

/// Fixed composite ordinal of each wiring slot.
///
/// Slots keep their ordinal whether or not the optional outputs before them are
/// wired, so a failure output is always `FCMComposite_1_5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  Input,
  Processor,
  Out,
  Alternate,
  Failure,
}

impl Slot {
  pub fn ordinal(self) -> u32 {
    match self {
      Self::Input => 1,
      Self::Processor => 2,
      Self::Out => 3,
      Self::Alternate => 4,
      Self::Failure => 5,
    }
  }

  /// Terminal on the processing node that feeds this slot.
  pub fn source_terminal(self) -> &'static str {
    match self {
      Self::Alternate => "alternate",
      Self::Failure => "failure",
      _ => "out",
    }
  }
}

/// Renders one `nodes` element of the composition.
pub(crate) fn node_element(
  msgnode: &str,
  ordinal: u32,
  location: &str,
  attributes: &[(&str, &str)],
  name: &str,
) -> String {
  let mut element = format!(
    "      <nodes xmi:type=\"{msgnode}:FCMComposite_1\" xmi:id=\"FCMComposite_1_{ordinal}\" location=\"{location}\""
  );
  for (key, value) in attributes {
    let _ = write!(element, " {key}=\"{}\"", escape(*value));
  }
  let _ = write!(
    element,
    ">\n        <translation xmi:type=\"utility:ConstantString\" string=\"{}\"/>\n      </nodes>",
    escape(name)
  );
  element
}

/// Renders the connection from `source` to `target`.
pub(crate) fn connection(id: usize, source: Slot, target: Slot) -> String {
  format!(
    "      <connections xmi:type=\"eflow:FCMConnection\" xmi:id=\"FCMConnection_{id}\" sourceNode=\"FCMComposite_1_{}\" sourceTerminalName=\"OutTerminal.{}\" targetNode=\"FCMComposite_1_{}\" targetTerminalName=\"InTerminal.in\"/>",
    source.ordinal(),
    source_terminal(source, target),
    target.ordinal(),
  )
}

fn source_terminal(source: Slot, target: Slot) -> &'static str {
  match source {
    Slot::Processor => target.source_terminal(),
    _ => "out",
  }
}

/// Document prologue up to and including the opening `composition` tag.
pub(crate) fn document_header(flow: &str, namespaces: &[String]) -> String {
  let flow = escape(flow);
  let mut header = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
  let _ = writeln!(
    header,
    "<ecore:EPackage xmi:version=\"2.0\" xmlns:xmi=\"http://www.omg.org/XMI\" xmlns:ecore=\"http://www.eclipse.org/emf/2002/Ecore\" xmlns:eflow=\"http://www.ibm.com/wbi/2005/eflow\" xmlns:utility=\"http://www.ibm.com/wbi/2005/eflow_utility\" nsURI=\"{flow}.msgflow\""
  );
  for namespace in namespaces {
    let _ = writeln!(header, "    {namespace}");
  }
  let _ = writeln!(header, "    nsPrefix=\"{flow}.msgflow\">");
  header.push_str("  <eClassifiers xmi:type=\"eflow:FCMComposite\" name=\"FCMComposite_1\">\n");
  header.push_str("    <eSuperTypes href=\"http://www.ibm.com/wbi/2005/eflow#//FCMBlock\"/>\n");
  let _ = writeln!(
    header,
    "    <translation xmi:type=\"utility:TranslatableString\" key=\"{flow}\" bundleName=\"{flow}\" pluginId=\"flowAPIgenerated\"/>"
  );
  let _ = writeln!(
    header,
    "    <colorGraphic16 xmi:type=\"utility:GIFFileGraphic\" resourceName=\"platform:/plugin/flowAPIgenerated/icons/full/obj16/{flow}.gif\"/>"
  );
  let _ = writeln!(
    header,
    "    <colorGraphic32 xmi:type=\"utility:GIFFileGraphic\" resourceName=\"platform:/plugin/flowAPIgenerated/icons/full/obj30/{flow}.gif\"/>"
  );
  header.push_str("    <composition>\n");
  header
}

pub(crate) const DOCUMENT_FOOTER: &str = "    </composition>
    <propertyOrganizer>
    </propertyOrganizer>
    <stickyBoard/>
  </eClassifiers>
</ecore:EPackage>
";
