//! # Wire Elements
//!
//! An owned XML element tree that the codec reads from and writes to. The
//! SOAP-specific attributes (`xsi:type`, `xsi:nil`, `soapenc:arrayType`) are
//! lifted into typed fields so that prefixes never leak out of this module:
//! parsing resolves them against the in-scope namespace declarations and
//! serialising assigns prefixes on the root element.

use roxmltree::{Document, Node};

use crate::error::CodecError;
use crate::qname::{QName, ns};

/// `soapenc:arrayType` value: item type and declared length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
  pub item_type: QName,
  pub len: usize,
}

/// One XML element with its SOAP encoding metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireElement {
  pub name: QName,
  pub xsi_type: Option<QName>,
  pub nil: bool,
  pub array_type: Option<ArrayType>,
  /// Remaining attributes (`id`, `href`, `soapenv:encodingStyle`, ...)
  pub attributes: Vec<(QName, String)>,
  /// Character content; only kept for elements without child elements.
  pub text: Option<String>,
  pub children: Vec<WireElement>,
}

impl WireElement {
  pub fn new(name: QName) -> Self {
    Self {
      name,
      ..Self::default()
    }
  }

  /// An unqualified element, the form used for RPC parts and bean fields
  pub fn unqualified(local: &str) -> Self {
    Self::new(QName::unqualified(local.to_string()))
  }

  /// An unqualified `xsi:nil="true"` element
  pub fn nil(local: &str) -> Self {
    Self {
      nil: true,
      ..Self::unqualified(local)
    }
  }

  pub fn with_type(mut self, xsi_type: QName) -> Self {
    self.xsi_type = Some(xsi_type);
    self
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  pub fn with_child(mut self, child: WireElement) -> Self {
    self.children.push(child);
    self
  }

  pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
    self.attributes.push((name, value.into()));
    self
  }

  /// Child elements in document order
  pub fn element_children(&self) -> impl Iterator<Item = &WireElement> {
    self.children.iter()
  }

  /// Children whose local name matches, in document order
  pub fn children_named<'s>(&'s self, local: &'s str) -> impl Iterator<Item = &'s WireElement> + 's {
    self.children.iter().filter(move |child| child.name.local() == local)
  }

  /// First child with the given local name
  pub fn child(&self, local: &str) -> Option<&WireElement> {
    self.children.iter().find(|child| child.name.local() == local)
  }

  /// Value of an attribute by local name
  pub fn attribute(&self, local: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(name, _)| name.local() == local)
      .map(|(_, value)| value.as_str())
  }

  /// Target id of an `href="#id"` reference
  pub fn href_id(&self) -> Option<&str> {
    self.attribute("href").map(|href| href.trim_start_matches('#'))
  }

  /// The `id` this element can be referenced by
  pub fn id(&self) -> Option<&str> {
    self.attribute("id")
  }

  /// Whether this element is an encoded array wrapper
  pub fn is_array(&self) -> bool {
    self.array_type.is_some()
      || self.xsi_type.as_ref().is_some_and(|xsi_type| {
        xsi_type.matches(ns::SOAP_ENC, "Array") || xsi_type.local().starts_with("ArrayOf")
      })
  }

  /// Parse an XML document and return its root element
  pub fn parse(xml: &str) -> Result<Self, CodecError> {
    let document = Document::parse(xml)?;
    Self::from_node(document.root_element())
  }

  fn from_node(node: Node<'_, '_>) -> Result<Self, CodecError> {
    let tag = node.tag_name();
    let mut element = Self::new(QName::new(
      tag.namespace().unwrap_or_default().to_string(),
      tag.name().to_string(),
    ));

    for attribute in node.attributes() {
      match (attribute.namespace(), attribute.name()) {
        (Some(ns::XSI), "type") => element.xsi_type = Some(resolve_prefixed(node, attribute.value())?),
        (Some(ns::XSI), "nil") => element.nil = matches!(attribute.value().trim(), "true" | "1"),
        (Some(ns::SOAP_ENC), "arrayType") => element.array_type = Some(parse_array_type(node, attribute.value())?),
        (namespace, local) => element.attributes.push((
          QName::new(namespace.unwrap_or_default().to_string(), local.to_string()),
          attribute.value().to_string(),
        )),
      }
    }

    let mut text = String::new();
    for child in node.children() {
      if child.is_element() {
        element.children.push(Self::from_node(child)?);
      } else if child.is_text() {
        text.push_str(child.text().unwrap_or_default());
      }
    }
    if element.children.is_empty() {
      element.text = Some(text);
    }

    Ok(element)
  }

  /// Serialise the tree. Namespaces are declared once, on this element.
  pub fn to_xml(&self) -> String {
    let mut prefixes = Prefixes::default();
    self.collect_namespaces(&mut prefixes);

    let mut out = String::new();
    self.write(&mut out, &prefixes, true);
    out
  }

  fn collect_namespaces(&self, prefixes: &mut Prefixes) {
    prefixes.register(self.name.namespace());
    if let Some(xsi_type) = &self.xsi_type {
      prefixes.register(ns::XSI);
      prefixes.register(xsi_type.namespace());
    }
    if self.nil {
      prefixes.register(ns::XSI);
    }
    if let Some(array_type) = &self.array_type {
      prefixes.register(ns::SOAP_ENC);
      prefixes.register(array_type.item_type.namespace());
    }
    for (name, _) in &self.attributes {
      prefixes.register(name.namespace());
    }
    for child in &self.children {
      child.collect_namespaces(prefixes);
    }
  }

  fn write(&self, out: &mut String, prefixes: &Prefixes, root: bool) {
    let tag = prefixes.qualify(&self.name);
    out.push('<');
    out.push_str(&tag);

    if root {
      for (namespace, prefix) in &prefixes.declared {
        push_attribute(out, &format!("xmlns:{prefix}"), namespace);
      }
    }
    if let Some(xsi_type) = &self.xsi_type {
      push_attribute(out, "xsi:type", &prefixes.qualify(xsi_type));
    }
    if self.nil {
      push_attribute(out, "xsi:nil", "true");
    }
    if let Some(array_type) = &self.array_type {
      let value = format!("{}[{}]", prefixes.qualify(&array_type.item_type), array_type.len);
      push_attribute(out, "soapenc:arrayType", &value);
    }
    for (name, value) in &self.attributes {
      push_attribute(out, &prefixes.qualify(name), value);
    }

    let text = self.text.as_deref().unwrap_or_default();
    if self.children.is_empty() && text.is_empty() {
      out.push_str("/>");
      return;
    }

    out.push('>');
    escape_into(out, text, false);
    for child in &self.children {
      child.write(out, prefixes, false);
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
  }
}

/// Namespace to prefix assignments for one serialisation
#[derive(Default)]
struct Prefixes {
  declared: Vec<(String, String)>,
}

impl Prefixes {
  fn register(&mut self, namespace: &str) {
    if namespace.is_empty() || self.prefix(namespace).is_some() {
      return;
    }
    let prefix = match namespace {
      ns::SOAP_ENV => "soapenv".to_string(),
      ns::SOAP_ENC => "soapenc".to_string(),
      ns::XSI => "xsi".to_string(),
      ns::XSD => "xsd".to_string(),
      _ => {
        let generated = self
          .declared
          .iter()
          .filter(|(_, prefix)| prefix.starts_with("ns"))
          .count();
        format!("ns{}", generated + 1)
      }
    };
    self.declared.push((namespace.to_string(), prefix));
  }

  fn prefix(&self, namespace: &str) -> Option<&str> {
    self
      .declared
      .iter()
      .find(|(declared, _)| declared == namespace)
      .map(|(_, prefix)| prefix.as_str())
  }

  fn qualify(&self, name: &QName) -> String {
    match self.prefix(name.namespace()) {
      Some(prefix) => format!("{prefix}:{}", name.local()),
      None => name.local().to_string(),
    }
  }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
  out.push(' ');
  out.push_str(name);
  out.push_str("=\"");
  escape_into(out, value, true);
  out.push('"');
}

fn escape_into(out: &mut String, value: &str, attribute: bool) {
  for ch in value.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' if attribute => out.push_str("&quot;"),
      '\'' if attribute => out.push_str("&apos;"),
      '\r' => out.push_str("&#13;"),
      '\n' if attribute => out.push_str("&#10;"),
      '\t' if attribute => out.push_str("&#9;"),
      _ => out.push(ch),
    }
  }
}

/// Whether `ch` may appear in an XML 1.0 document
pub(crate) fn is_xml_char(ch: char) -> bool {
  matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Resolve `prefix:local` against the declarations in scope at `node`.
fn resolve_prefixed(node: Node<'_, '_>, value: &str) -> Result<QName, CodecError> {
  let value = value.trim();
  let (prefix, local) = match value.split_once(':') {
    Some((prefix, local)) => (Some(prefix), local),
    None => (None, value),
  };
  let namespace = match prefix {
    Some(prefix) => node
      .lookup_namespace_uri(Some(prefix))
      .ok_or_else(|| CodecError::UnknownPrefix(prefix.to_string()))?,
    None => node.lookup_namespace_uri(None).unwrap_or_default(),
  };
  Ok(QName::new(namespace.to_string(), local.to_string()))
}

/// Parse `ns1:RemoteUser[2]`. A missing length (`T[]`) reads as zero.
fn parse_array_type(node: Node<'_, '_>, value: &str) -> Result<ArrayType, CodecError> {
  let malformed = || CodecError::Decode {
    field: "soapenc:arrayType".to_string(),
    expected: "QName[length]".to_string(),
    value: value.to_string(),
  };

  let trimmed = value.trim();
  let open = trimmed.rfind('[').ok_or_else(malformed)?;
  let dimension = trimmed[open..]
    .strip_prefix('[')
    .and_then(|rest| rest.strip_suffix(']'))
    .ok_or_else(malformed)?;
  let len = if dimension.is_empty() {
    0
  } else {
    dimension.parse::<usize>().map_err(|_| malformed())?
  };

  Ok(ArrayType {
    item_type: resolve_prefixed(node, &trimmed[..open])?,
    len,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::qname::xsd;

  const BEANS: &str = "http://beans.example.com";

  #[test]
  fn test_parse_resolves_prefixed_types() {
    let xml = r#"<user xmlns:ns1="http://beans.example.com"
                       xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                       xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                       xsi:type="ns1:RemoteUser">
        <name xsi:type="xsd:string">fred</name>
        <email xsi:nil="true"/>
      </user>"#;

    let element = WireElement::parse(xml).unwrap();
    assert_eq!(element.xsi_type, Some(QName::from_static(BEANS, "RemoteUser")));
    assert_eq!(element.children.len(), 2);
    assert_eq!(element.text, None);

    let name = element.child("name").unwrap();
    assert_eq!(name.xsi_type, Some(xsd::STRING));
    assert_eq!(name.text.as_deref(), Some("fred"));

    let email = element.child("email").unwrap();
    assert!(email.nil);
    assert_eq!(email.text.as_deref(), Some(""));
  }

  #[test]
  fn test_parse_array_type_and_references() {
    let xml = r##"<users xmlns:soapenc="http://schemas.xmlsoap.org/soap/encoding/"
                        xmlns:ns1="http://beans.example.com"
                        soapenc:arrayType="ns1:RemoteUser[2]">
        <item href="#id0"/>
        <item href="#id1"/>
      </users>"##;

    let element = WireElement::parse(xml).unwrap();
    assert!(element.is_array());
    assert_eq!(
      element.array_type,
      Some(ArrayType {
        item_type: QName::from_static(BEANS, "RemoteUser"),
        len: 2,
      })
    );
    let ids: Vec<_> = element.children_named("item").filter_map(WireElement::href_id).collect();
    assert_eq!(ids, vec!["id0", "id1"]);
  }

  #[test]
  fn test_parse_rejects_undeclared_prefix() {
    let xml = r#"<user xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="nope:RemoteUser"/>"#;
    let error = WireElement::parse(xml).unwrap_err();
    assert!(matches!(error, CodecError::UnknownPrefix(prefix) if prefix == "nope"));
  }

  #[test]
  fn test_parse_rejects_malformed_xml() {
    assert!(matches!(WireElement::parse("<open>"), Err(CodecError::Xml(_))));
  }

  #[test]
  fn test_to_xml_declares_prefixes_on_root_and_escapes() {
    let element = WireElement::unqualified("filter")
      .with_type(QName::from_static(BEANS, "RemoteFilter"))
      .with_child(
        WireElement::unqualified("xml")
          .with_type(xsd::STRING)
          .with_text("<query a=\"1\"> & more"),
      )
      .with_child(WireElement::nil("author"));

    let xml = element.to_xml();
    assert!(xml.starts_with("<filter xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\""));
    assert!(xml.contains("xmlns:ns1=\"http://beans.example.com\""));
    assert!(xml.contains("xsi:type=\"ns1:RemoteFilter\""));
    assert!(xml.contains("<xml xsi:type=\"xsd:string\">&lt;query a=\"1\"&gt; &amp; more</xml>"));
    assert!(xml.contains("<author xsi:nil=\"true\"/>"));
  }

  #[test]
  fn test_serialised_tree_parses_back_to_the_same_tree() {
    let element = WireElement::unqualified("users")
      .with_type(crate::qname::SOAP_ARRAY)
      .with_child(WireElement::unqualified("item").with_type(xsd::STRING).with_text("a & b"));
    let mut element = element;
    element.array_type = Some(ArrayType {
      item_type: xsd::STRING,
      len: 1,
    });

    let parsed = WireElement::parse(&element.to_xml()).unwrap();
    assert_eq!(parsed.array_type, element.array_type);
    assert_eq!(parsed.xsi_type, element.xsi_type);
    assert_eq!(parsed.children[0].text.as_deref(), Some("a & b"));
  }

  #[test]
  fn test_line_breaks_and_tabs_survive_serialisation() {
    let element = WireElement::unqualified("comment")
      .with_attribute(QName::unqualified("note"), "one\r\ntwo\tthree")
      .with_text("line1\r\nline2\rline3");

    let xml = element.to_xml();
    assert!(xml.contains("note=\"one&#13;&#10;two&#9;three\""));
    assert!(xml.contains(">line1&#13;\nline2&#13;line3<"));

    let parsed = WireElement::parse(&xml).unwrap();
    assert_eq!(parsed.attribute("note"), Some("one\r\ntwo\tthree"));
    assert_eq!(parsed.text.as_deref(), Some("line1\r\nline2\rline3"));
  }

  #[test]
  fn test_xml_char_ranges() {
    assert!(is_xml_char('\t'));
    assert!(is_xml_char('é'));
    assert!(is_xml_char('\u{1F600}'));
    assert!(!is_xml_char('\u{7}'));
    assert!(!is_xml_char('\u{0}'));
    assert!(!is_xml_char('\u{FFFE}'));
  }
}
