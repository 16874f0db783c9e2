//! Streaming XMP sidecar parser.
//!
//! Reads the flat camera-raw property set out of a sidecar without
//! building a DOM. Structural RDF elements (`rdf:Description`, `rdf:Seq`,
//! `rdf:Bag`, `rdf:Alt`, `rdf:li`) are matched by their conventional
//! prefixes; the camera-raw prefix itself is discovered from the `xmlns`
//! declarations and defaults to `crs`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use rawlook_core::{PropertyMap, PropertySource};

use crate::{XmpError, XmpResult};

/// The namespace all develop properties live in.
pub const CAMERA_RAW_NS: &str = "http://ns.adobe.com/camera-raw-settings/1.0/";

const DESCRIPTION: &str = "rdf:Description";

/// A parsed develop sidecar.
///
/// Holds the flat camera-raw property set and answers the engine's
/// [`PropertySource`] queries. Properties outside the camera-raw namespace
/// are dropped during parsing.
#[derive(Debug, Clone, Default)]
pub struct Sidecar {
    props: PropertyMap,
}

/// Shape of the property currently being read.
enum Pending {
    Text,
    Array(Vec<String>),
    Localized(Vec<(String, String)>),
}

impl Sidecar {
    /// Reads a sidecar file.
    pub fn from_path(path: &Path) -> XmpResult<Self> {
        let file = File::open(path)?;
        let sidecar = Self::parse(BufReader::new(file))?;
        debug!(path = %path.display(), properties = sidecar.props.len(), "read sidecar");
        Ok(sidecar)
    }

    /// Parses a sidecar from a reader.
    pub fn parse<R: BufRead>(reader: R) -> XmpResult<Self> {
        let mut xml = Reader::from_reader(reader);
        xml.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut props = PropertyMap::new();
        let mut text = String::new();
        let mut prefix = String::from("crs");

        // Track hierarchy with a stack
        let mut stack: Vec<String> = Vec::new();
        let mut current: Option<(String, Pending)> = None;
        let mut item_lang: Option<String> = None;

        loop {
            match xml.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    discover_prefix(&e, &mut prefix);
                    match name.as_str() {
                        DESCRIPTION => {
                            // Only the outermost description carries develop
                            // settings; nested ones belong to embedded looks.
                            if !stack.iter().any(|s| s == DESCRIPTION) {
                                collect_attribute_props(&e, &prefix, &mut props);
                            }
                        }
                        "rdf:Seq" | "rdf:Bag" => {
                            if let Some((_, pending)) = current.as_mut() {
                                *pending = Pending::Array(Vec::new());
                            }
                        }
                        "rdf:Alt" => {
                            if let Some((_, pending)) = current.as_mut() {
                                *pending = Pending::Localized(Vec::new());
                            }
                        }
                        "rdf:li" => {
                            item_lang = get_attr(&e, b"xml:lang");
                        }
                        _ => {
                            if current.is_none() && in_outer_description(&stack) {
                                if let Some(local) = local_name(&name, &prefix) {
                                    current = Some((local.to_string(), Pending::Text));
                                }
                            }
                        }
                    }
                    stack.push(name);
                    text.clear();
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    discover_prefix(&e, &mut prefix);
                    if name == DESCRIPTION {
                        if !stack.iter().any(|s| s == DESCRIPTION) {
                            collect_attribute_props(&e, &prefix, &mut props);
                        }
                    } else if name == "rdf:li" {
                        match current.as_mut() {
                            Some((_, Pending::Array(items))) => items.push(String::new()),
                            Some((_, Pending::Localized(items))) => {
                                let lang =
                                    get_attr(&e, b"xml:lang").unwrap_or_else(default_lang);
                                items.push((lang, String::new()));
                            }
                            _ => {}
                        }
                    } else if current.is_none() && in_outer_description(&stack) {
                        if let Some(local) = local_name(&name, &prefix) {
                            props.insert(local, "");
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if name == "rdf:li" {
                        match current.as_mut() {
                            Some((_, Pending::Array(items))) => {
                                items.push(text.trim().to_string());
                            }
                            Some((_, Pending::Localized(items))) => {
                                let lang = item_lang.take().unwrap_or_else(default_lang);
                                items.push((lang, text.trim().to_string()));
                            }
                            _ => {}
                        }
                    } else if current
                        .as_ref()
                        .is_some_and(|(prop, _)| local_name(&name, &prefix) == Some(prop.as_str()))
                    {
                        if let Some((prop, pending)) = current.take() {
                            match pending {
                                Pending::Text => props.insert(prop, text.trim()),
                                Pending::Array(items) => props.insert_array(prop, items),
                                Pending::Localized(items) => {
                                    for (lang, value) in items {
                                        props.insert_localized(prop.as_str(), lang, value);
                                    }
                                }
                            }
                        }
                    }
                    stack.pop();
                }
                Ok(Event::Text(e)) => {
                    text.push_str(&e.decode().unwrap_or_default());
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmpError::ParseError(format!("XML error: {}", e))),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { props })
    }

    /// The parsed property set, for listing and debugging.
    pub fn properties(&self) -> &PropertyMap {
        &self.props
    }
}

impl PropertySource for Sidecar {
    fn exists(&self, key: &str) -> bool {
        self.props.exists(key)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.props.string(key)
    }

    fn localized_text(&self, key: &str, generic: &str, specific: &str) -> Option<String> {
        self.props.localized_text(key, generic, specific)
    }

    fn array_len(&self, key: &str) -> Option<usize> {
        self.props.array_len(key)
    }

    fn array_item(&self, key: &str, index: usize) -> Option<String> {
        self.props.array_item(key, index)
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

fn default_lang() -> String {
    "x-default".to_string()
}

fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
        .filter(|s| !s.is_empty())
}

/// Picks up the camera-raw prefix from `xmlns` declarations.
fn discover_prefix(e: &BytesStart, prefix: &mut String) {
    for attr in e.attributes().flatten() {
        if let Some(p) = attr.key.as_ref().strip_prefix(b"xmlns:") {
            if attr.value.as_ref() == CAMERA_RAW_NS.as_bytes() {
                *prefix = String::from_utf8_lossy(p).to_string();
            }
        }
    }
}

/// Splits `prefix:Local` into `Local` when the prefix matches.
fn local_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)?
        .strip_prefix(':')
        .filter(|s| !s.is_empty())
}

/// True when the open element stack ends directly inside the outermost
/// description.
fn in_outer_description(stack: &[String]) -> bool {
    stack.last().is_some_and(|s| s == DESCRIPTION)
        && stack.iter().filter(|s| s.as_str() == DESCRIPTION).count() == 1
}

/// Stores every camera-raw attribute of a description as a text property.
fn collect_attribute_props(e: &BytesStart, prefix: &str, props: &mut PropertyMap) {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        if let Some(local) = local_name(&key, prefix) {
            props.insert(local, String::from_utf8_lossy(&attr.value).as_ref());
        }
    }
}
