//! Element tree <-> XML text.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::element::Element;
use crate::error::{MetadataError, MetadataResult};

/// Parse a document into its root element.
///
/// The prolog, comments and processing instructions are skipped and
/// whitespace-only text is dropped.
pub fn parse_xml(xml: &str) -> MetadataResult<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| MetadataError::Malformed("unbalanced closing tag".into()))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => append_text(&mut stack, &text.unescape()?)?,
            Event::CData(data) => {
                append_text(&mut stack, &String::from_utf8_lossy(&data.into_inner()))?
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(MetadataError::Malformed(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    root.ok_or_else(|| MetadataError::Malformed("document has no root element".into()))
}

fn open_element(start: &BytesStart<'_>) -> MetadataResult<Element> {
    let name = decode_name(start.name().as_ref())?;
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = decode_name(attribute.key.as_ref())?;
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn decode_name(raw: &[u8]) -> MetadataResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| MetadataError::Malformed(format!("element name is not UTF-8: {e}")))
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> MetadataResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(MetadataError::Malformed(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> MetadataResult<()> {
    match stack.last_mut() {
        Some(current) => {
            current.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None => Err(MetadataError::Malformed(
            "text outside of the root element".into(),
        )),
    }
}

/// Serialize an element tree with two-space indentation and no prolog.
pub fn render_xml(root: &Element) -> MetadataResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| MetadataError::Malformed(format!("rendered document is not UTF-8: {e}")))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> MetadataResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_leaf() {
        match &element.text {
            Some(text) => {
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
            }
            None => writer.write_event(Event::Empty(start))?,
        }
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
