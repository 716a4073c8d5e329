//! Core tagging: depth-first UUID assignment over an XML element tree
//! plus the load/save wrapper around it.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, instrument};
use uuid::Uuid;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::errors::{TagError, TagResult};

/// Attribute key carrying the element identifier.
pub const UUID_ATTR: &str = "uuid";

/// Assigns a fresh v4 UUID to every element missing a `uuid` attribute,
/// pre-order, starting at `element`. Elements that already carry the
/// attribute are left untouched. Returns the number of assignments.
pub fn assign_uuid(element: &mut Element) -> usize {
    let mut assigned = 0;
    if !element.attributes.contains_key(UUID_ATTR) {
        element
            .attributes
            .insert(UUID_ATTR.to_string(), Uuid::new_v4().to_string());
        assigned += 1;
    }
    for child in element.children.iter_mut() {
        if let XMLNode::Element(child) = child {
            assigned += assign_uuid(child);
        }
    }
    assigned
}

/// Parses the XML file at `path`, tags every element, and writes the
/// document back to the same path with an XML declaration and UTF-8
/// encoding. The write goes through a temp file in the same directory
/// followed by a rename, so a failure never leaves the original
/// half-written.
///
/// Returns the number of newly assigned identifiers (0 means the
/// document was already fully tagged).
#[instrument(level = "debug")]
pub fn tag_file(path: &Path) -> TagResult<usize> {
    let file = File::open(path)
        .map_err(|e| TagError::operation(format!("Cannot open {}", path.display()), e))?;

    let mut root = Element::parse(BufReader::new(file)).map_err(|e| TagError::MalformedDocument {
        path: path.to_path_buf(),
        source: e,
    })?;

    let assigned = assign_uuid(&mut root);
    debug!("assigned {} uuid(s) in {}", assigned, path.display());

    write_document(path, &root)?;
    Ok(assigned)
}

fn write_document(path: &Path, root: &Element) -> TagResult<()> {
    let mut buf: Vec<u8> = Vec::new();
    let config = EmitterConfig::new()
        .write_document_declaration(true)
        .autopad_comments(false);
    root.write_with_config(&mut buf, config)
        .map_err(|e| TagError::operation(format!("Cannot serialize {}", path.display()), e))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmpfile = NamedTempFile::new_in(dir)
        .map_err(|e| TagError::operation(format!("Cannot create temp file in {}", dir.display()), e))?;
    tmpfile
        .write_all(&buf)
        .map_err(|e| TagError::operation(format!("Cannot write {}", path.display()), e))?;
    tmpfile
        .persist(path)
        .map_err(|e| TagError::operation(format!("Cannot replace {}", path.display()), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn given_untagged_tree_when_assigning_then_every_element_gets_uuid() {
        let mut root = parse("<root><child/><child><leaf/></child></root>");
        let assigned = assign_uuid(&mut root);
        assert_eq!(assigned, 4);
        assert!(root.attributes.contains_key(UUID_ATTR));
        for child in &root.children {
            if let XMLNode::Element(e) = child {
                assert!(e.attributes.contains_key(UUID_ATTR));
            }
        }
    }

    #[test]
    fn given_existing_uuid_when_assigning_then_value_is_preserved() {
        let mut root = parse(r#"<root uuid="1234"><child/></root>"#);
        let assigned = assign_uuid(&mut root);
        assert_eq!(assigned, 1);
        assert_eq!(root.attributes.get(UUID_ATTR).unwrap(), "1234");
    }

    #[test]
    fn given_tagged_tree_when_assigning_again_then_nothing_changes() {
        let mut root = parse("<root><child/></root>");
        assign_uuid(&mut root);
        let before = root.clone();
        let assigned = assign_uuid(&mut root);
        assert_eq!(assigned, 0);
        assert_eq!(root, before);
    }

    #[test]
    fn given_fresh_assignments_then_uuids_are_valid_v4_and_distinct() {
        let mut root = parse("<root><a/><b/><c/></root>");
        assign_uuid(&mut root);

        let mut seen = Vec::new();
        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            let value = node.attributes.get(UUID_ATTR).unwrap();
            let parsed = Uuid::parse_str(value).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
            assert_eq!(value, &parsed.to_string(), "must be lowercase hyphenated");
            seen.push(value.clone());
            for child in &node.children {
                if let XMLNode::Element(e) = child {
                    stack.push(e);
                }
            }
        }
        assert_eq!(seen.len(), 4);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4, "generated uuids must be pairwise distinct");
    }
}
