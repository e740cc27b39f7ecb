//! Minimal namespace-aware element tree
//!
//! The provider query response nests repeated records three levels deep, so
//! the deserializer wants document-style navigation rather than a flat event
//! stream. This module folds the quick-xml event stream into a small owned
//! tree; elements keep their resolved namespace URI and local name, their
//! accumulated text, and their children in document order. Attributes are
//! not kept — nothing in the protocol carries data in attributes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// One parsed XML element.
#[derive(Debug, Clone)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Resolved namespace URI, or `None` for elements without a namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Local element name (prefix stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this element has the given namespace and local name.
    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.name == name
    }

    /// Accumulated character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First child with the given namespace and local name.
    pub fn child(&self, namespace: Option<&str>, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    /// All children with the given namespace and local name, in order.
    pub fn children<'a>(
        &'a self,
        namespace: Option<&'a str>,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is(namespace, name))
    }

    /// Text of the first matching child, or `None` when the child is absent.
    pub fn child_text(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.child(namespace, name).map(Element::text)
    }
}

/// Parse a complete XML document into its root element.
///
/// # Errors
///
/// Returns the parser's message when the input is not well-formed XML.
pub fn parse(xml: &str) -> Result<Element, String> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(start))) => {
                stack.push(new_element(ns, &start));
            }
            Ok((ns, Event::Empty(start))) => {
                let element = new_element(ns, &start);
                place(element, &mut stack, &mut root)?;
            }
            Ok((_, Event::End(_))) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "closing tag without matching opening tag".to_string())?;
                place(element, &mut stack, &mut root)?;
            }
            Ok((_, Event::Text(text))) => {
                let unescaped = text.unescape().map_err(|e| e.to_string())?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&unescaped);
                }
            }
            Ok((_, Event::CData(data))) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok((_, Event::Eof)) => break,
            // Declarations, comments, processing instructions, doctypes
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document inside an open element".to_string());
    }

    root.ok_or_else(|| "document contains no root element".to_string())
}

fn new_element(ns: ResolveResult<'_>, start: &BytesStart<'_>) -> Element {
    let namespace = match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        _ => None,
    };
    Element {
        namespace,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        text: String::new(),
        children: Vec::new(),
    }
}

fn place(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err("document contains more than one root element".to_string())
    }
}
