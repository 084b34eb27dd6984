//! Configurable property rendering.
//!
//! Every compile pass walks a fixed, ordered table of [`PropertyRule`]s. A rule
//! pairs the property name with an extractor that yields `Some(value)` only when
//! the current value differs from the runtime default.

use std::fmt::Display;

use quick_xml::escape::escape;

/// Where a property lives inside a message flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyOwner<'a> {
  /// A flow-level property, addressed as `flow#property`.
  Flow,
  /// A node property, addressed as `flow#node.property`.
  Node(&'a str),
}

/// Which properties a compile pass lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyListing {
  /// Only properties whose value differs from the runtime default.
  #[default]
  Overrides,
  /// Every recognized property. Those at their default are declared without an override.
  Declared,
}

/// One entry of a property table.
pub struct PropertyRule<T> {
  pub name: &'static str,
  pub value: fn(&T) -> Option<String>,
}

/// Builds the lookup key the runtime uses for a property.
pub fn property_uri(flow: &str, owner: PropertyOwner<'_>, property: &str) -> String {
  match owner {
    PropertyOwner::Flow => format!("{flow}#{property}"),
    PropertyOwner::Node(node) => format!("{flow}#{node}.{property}"),
  }
}

/// Renders a single `ConfigurableProperty` element.
///
/// Without a value the element only declares the property, leaving the runtime default.
pub fn render(flow: &str, owner: PropertyOwner<'_>, property: &str, value: Option<&str>) -> String {
  let uri = property_uri(flow, owner, property);
  match value {
    Some(value) => format!(
      "<ConfigurableProperty override=\"{}\" uri=\"{}\"/>",
      escape(value),
      escape(uri.as_str())
    ),
    None => format!("<ConfigurableProperty uri=\"{}\"/>", escape(uri.as_str())),
  }
}

/// Appends one line per listed rule to `out`, in table order.
pub fn render_rules<T>(
  out: &mut String,
  flow: &str,
  owner: PropertyOwner<'_>,
  target: &T,
  rules: &[PropertyRule<T>],
  listing: PropertyListing,
) {
  for rule in rules {
    let value = (rule.value)(target);
    if value.is_none() && listing == PropertyListing::Overrides {
      continue;
    }
    out.push_str(&render(flow, owner, rule.name, value.as_deref()));
    out.push('\n');
  }
}

pub(crate) fn always(value: &str) -> Option<String> {
  Some(value.to_string())
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
  (!value.trim().is_empty()).then(|| value.to_string())
}

pub(crate) fn above<N: PartialOrd + Display>(value: N, floor: N) -> Option<String> {
  (value > floor).then(|| value.to_string())
}

pub(crate) fn flag(value: bool) -> Option<String> {
  value.then(|| value.to_string())
}

pub(crate) fn unless<V: PartialEq + Display>(value: V, default: V) -> Option<String> {
  (value != default).then(|| value.to_string())
}

pub(crate) fn present<V: Display>(value: Option<V>) -> Option<String> {
  value.map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Sample {
    count: u32,
    label: String,
  }

  const RULES: &[PropertyRule<Sample>] = &[
    PropertyRule {
      name: "count",
      value: |s| above(s.count, 0),
    },
    PropertyRule {
      name: "label",
      value: |s| non_blank(&s.label),
    },
  ];

  #[test]
  fn test_render_flow_property_with_override() {
    let rendered = render("orderFlow", PropertyOwner::Flow, "commitCount", Some("5"));
    assert_eq!(
      rendered,
      r#"<ConfigurableProperty override="5" uri="orderFlow#commitCount"/>"#
    );
  }

  #[test]
  fn test_render_node_property_without_override() {
    let rendered = render("orderFlow", PropertyOwner::Node("MQ_IN"), "topicProperty", None);
    assert_eq!(
      rendered,
      r#"<ConfigurableProperty uri="orderFlow#MQ_IN.topicProperty"/>"#
    );
  }

  #[test]
  fn test_render_escapes_attribute_values() {
    let rendered = render("f", PropertyOwner::Flow, "wlmPolicy", Some("a&b\"c"));
    assert_eq!(
      rendered,
      r#"<ConfigurableProperty override="a&amp;b&quot;c" uri="f#wlmPolicy"/>"#
    );
  }

  #[test]
  fn test_overrides_listing_skips_defaults() {
    let sample = Sample {
      count: 0,
      label: "x".to_string(),
    };
    let mut out = String::new();
    render_rules(
      &mut out,
      "f",
      PropertyOwner::Node("n"),
      &sample,
      RULES,
      PropertyListing::Overrides,
    );
    assert_eq!(out, "<ConfigurableProperty override=\"x\" uri=\"f#n.label\"/>\n");
  }

  #[test]
  fn test_declared_listing_keeps_table_order() {
    let sample = Sample {
      count: 3,
      label: "  ".to_string(),
    };
    let mut out = String::new();
    render_rules(
      &mut out,
      "f",
      PropertyOwner::Flow,
      &sample,
      RULES,
      PropertyListing::Declared,
    );
    assert_eq!(
      out,
      "<ConfigurableProperty override=\"3\" uri=\"f#count\"/>\n<ConfigurableProperty uri=\"f#label\"/>\n"
    );
  }

  #[test]
  fn test_predicates() {
    assert_eq!(flag(false), None);
    assert_eq!(flag(true).as_deref(), Some("true"));
    assert_eq!(above(-1, -1), None);
    assert_eq!(above(0, -1).as_deref(), Some("0"));
    assert_eq!(unless("a", "a"), None);
    assert_eq!(present(Some(1414)).as_deref(), Some("1414"));
    assert_eq!(non_blank(" "), None);
  }
}
