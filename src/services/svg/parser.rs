// src/services/svg/parser.rs
// loads SVG markup into the typed Document tree

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::models::{Document, Group, Node, PathNode, Viewport};

/// An element whose end tag has not been seen yet.
enum OpenElement {
    Root,
    Node(Node),
}

/// Loads a document from disk. `.json` files hold a serialized Document,
/// anything else is read as SVG.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        return Document::load_json(path);
    }

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_svg(&content)
}

pub fn parse_svg(content: &str) -> Result<Document, LoadError> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut viewport: Option<Viewport> = None;
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let element = open_element(&e, &stack, &mut viewport)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = open_element(&e, &stack, &mut viewport)?;
                close_element(element, &mut stack, &mut nodes);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut nodes);
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }

    let viewport = viewport.ok_or(LoadError::MissingRoot)?;
    log::debug!(
        "Loaded SVG: viewBox {}x{}, {} top-level nodes",
        viewport.width,
        viewport.height,
        nodes.len()
    );
    Ok(Document { viewport, nodes })
}

fn open_element(
    e: &BytesStart,
    stack: &[OpenElement],
    viewport: &mut Option<Viewport>,
) -> Result<OpenElement, LoadError> {
    let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

    if stack.is_empty() {
        if tag != "svg" {
            return Err(LoadError::MissingRoot);
        }
        let view_box = get_attr(e, "viewBox").ok_or(LoadError::MissingViewBox)?;
        *viewport = Some(Viewport::parse(&view_box)?);
        return Ok(OpenElement::Root);
    }

    let node = match tag.as_str() {
        "g" => Node::Group(Group {
            fill: get_attr(e, "fill"),
            children: Vec::new(),
        }),
        "path" => Node::Path(PathNode {
            d: get_attr(e, "d"),
        }),
        _ => Node::Other { tag },
    };
    Ok(OpenElement::Node(node))
}

/// Attaches a finished element to its parent. Only the root and groups keep
/// children; anything nested deeper is dropped.
fn close_element(element: OpenElement, stack: &mut [OpenElement], nodes: &mut Vec<Node>) {
    let OpenElement::Node(node) = element else {
        return;
    };
    match stack.last_mut() {
        Some(OpenElement::Root) => nodes.push(node),
        Some(OpenElement::Node(Node::Group(group))) => group.children.push(node),
        _ => (),
    }
}

/// Helper to get an attribute value from a quick-xml BytesStart.
fn get_attr(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).ok();
        }
    }
    None
}
