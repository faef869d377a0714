//! Minimal namespace-aware element tree over `quick_xml::NsReader`.
//!
//! The SDN export is a flat list of entries with a handful of nested lists,
//! so a small owned tree is enough. Every element keeps the namespace it was
//! resolved to; lookups go through a [`Qualifier`] taken once from the root.

use crate::error::{Result, SanctionsError};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

/// Namespace every element lookup in a document is qualified with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifier {
    namespace: Option<String>,
}

impl Qualifier {
    pub fn unqualified() -> Self {
        Self { namespace: None }
    }

    /// The namespace declared on the document's root element, if any.
    pub fn from_root(root: &Element) -> Self {
        Self {
            namespace: root.namespace.clone(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn accepts(&self, element: &Element, local_name: &str) -> bool {
        element.name == local_name && element.namespace.as_deref() == self.namespace()
    }
}

impl Element {
    /// First direct child with the given local name.
    pub fn child(&self, qualifier: &Qualifier, local_name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| qualifier.accepts(child, local_name))
    }

    /// All direct children with the given local name, in document order.
    pub fn children<'a>(
        &'a self,
        qualifier: &'a Qualifier,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| qualifier.accepts(child, local_name))
    }

    /// Trimmed text of a direct child; `None` when missing or blank.
    pub fn child_text(&self, qualifier: &Qualifier, local_name: &str) -> Option<&str> {
        self.child(qualifier, local_name).and_then(Element::trimmed_text)
    }

    pub fn trimmed_text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Parse a whole document into its root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(true);
    reader.expand_empty_elements(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_resolved_event() {
            Ok((resolved, Event::Start(start))) => {
                if root.is_some() {
                    return Err(parse_error(position, "content after the root element"));
                }
                let namespace = match resolved {
                    ResolveResult::Bound(Namespace(uri)) => {
                        Some(String::from_utf8_lossy(uri).into_owned())
                    }
                    ResolveResult::Unbound => None,
                    ResolveResult::Unknown(prefix) => {
                        return Err(parse_error(
                            position,
                            &format!(
                                "undeclared namespace prefix '{}'",
                                String::from_utf8_lossy(&prefix)
                            ),
                        ));
                    }
                };
                let name = std::str::from_utf8(start.local_name().as_ref())
                    .map_err(|e| parse_error(position, &e.to_string()))?
                    .to_string();
                stack.push(Element {
                    namespace,
                    name,
                    text: String::new(),
                    children: Vec::new(),
                });
            }
            Ok((_, Event::End(_))) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_error(position, "closing tag without an opening tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Ok((_, Event::Text(text))) => {
                let text = text
                    .unescape()
                    .map_err(|e| parse_error(position, &e.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(parse_error(position, "text outside the root element")),
                }
            }
            Ok((_, Event::CData(data))) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok((_, Event::Eof)) => break,
            // declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(e) => return Err(parse_error(position, &e.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(SanctionsError::Parse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| SanctionsError::Parse("document has no root element".to_string()))
}

fn parse_error(position: usize, message: &str) -> SanctionsError {
    SanctionsError::Parse(format!("{} (at byte {})", message, position))
}
