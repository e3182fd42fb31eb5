//! Khronos XML registry parser.
//!
//! This module parses `gl.xml`-style registries into the [`Registry`] model.
//! Parsing happens in two steps: a single pass over the XML events collects
//! enumerants, group listings, commands, features and extensions; then one
//! cumulative [`Version`] is built per selected `<feature>`.

use crate::error::ParseError;
use crate::types::{Command, Enumerant, Group, Parameter, Registry, TypeRef, Version};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Options controlling which parts of the registry are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// API identifiers to keep (`gl`, `gles2`, ...).
    pub apis: Vec<String>,
    /// Profile used to filter `<require>`/`<remove>` blocks (`core`, `compatibility`).
    pub profile: Option<String>,
    /// Extensions whose requirements are added to every version.
    pub extensions: Vec<String>,
}

impl ParseOptions {
    /// Creates options selecting the given APIs, no profile, no extensions.
    #[must_use]
    pub fn new<I, S>(apis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            apis: apis.into_iter().map(Into::into).collect(),
            profile: None,
            extensions: Vec::new(),
        }
    }

    /// Sets the profile.
    #[must_use]
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Adds an extension.
    #[must_use]
    pub fn extension(mut self, name: impl Into<String>) -> Self {
        self.extensions.push(name.into());
        self
    }

    fn selects_api(&self, api: &str) -> bool {
        self.apis.iter().any(|a| a == api)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(["gl"])
    }
}

/// Parses a registry from a string, selecting the given APIs.
///
/// # Arguments
/// * `xml` - Registry XML content
/// * `apis` - API identifiers to keep
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or required elements are missing.
pub fn parse_registry(xml: &str, apis: &[&str]) -> Result<Registry, ParseError> {
    parse_registry_with(xml, &ParseOptions::new(apis.iter().copied()))
}

/// Parses a registry file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<Registry, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    tracing::debug!("parsing registry {}", path.display());
    parse_registry_with(&xml, options)
}

/// Parses a registry from a string with full options.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or required elements are missing.
pub fn parse_registry_with(xml: &str, options: &ParseOptions) -> Result<Registry, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut raw = RawRegistry::default();
    let mut has_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "registry" => has_root = true,
                    "enums" if has_root => parse_enums(&mut reader, e, options, &mut raw)?,
                    "groups" if has_root => parse_groups(&mut reader, &mut raw)?,
                    "commands" if has_root => parse_commands(&mut reader, &mut raw)?,
                    "feature" if has_root => {
                        let feature = parse_feature(&mut reader, e)?;
                        raw.features.push(feature);
                    }
                    "extension" if has_root => {
                        let extension = parse_extension(&mut reader, e)?;
                        raw.extensions.push(extension);
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !has_root {
        return Err(ParseError::invalid_structure("no registry element found"));
    }

    let registry = raw.build(options);
    tracing::debug!(
        "parsed registry: {} versions, {} commands, {} enumerants",
        registry.versions.len(),
        raw.commands.len(),
        raw.enums.len()
    );
    Ok(registry)
}

/// Everything collected from the XML before versions are assembled.
#[derive(Debug, Default)]
struct RawRegistry {
    enums: Vec<EnumDecl>,
    enum_index: HashMap<String, usize>,
    legacy_groups: Vec<(String, Vec<String>)>,
    commands: Vec<Command>,
    command_index: HashMap<String, usize>,
    features: Vec<Feature>,
    extensions: Vec<Extension>,
}

#[derive(Debug)]
struct EnumDecl {
    enumerant: Enumerant,
    groups: Vec<String>,
    api_specific: bool,
}

#[derive(Debug)]
struct Feature {
    api: String,
    name: String,
    number: String,
    blocks: Vec<InterfaceBlock>,
}

#[derive(Debug)]
struct Extension {
    name: String,
    supported: Vec<String>,
    blocks: Vec<InterfaceBlock>,
}

/// A `<require>` or `<remove>` block.
#[derive(Debug, Default)]
struct InterfaceBlock {
    remove: bool,
    profile: Option<String>,
    api: Option<String>,
    enums: Vec<String>,
    commands: Vec<String>,
}

impl InterfaceBlock {
    fn applies(&self, options: &ParseOptions) -> bool {
        let profile_ok = match &self.profile {
            Some(p) => options.profile.as_deref() == Some(p.as_str()),
            None => true,
        };
        let api_ok = match &self.api {
            Some(a) => options.selects_api(a),
            None => true,
        };
        profile_ok && api_ok
    }
}

/// Required interface accumulated across features.
#[derive(Debug, Clone, Default)]
struct Requirements {
    enums: HashSet<String>,
    commands: HashSet<String>,
}

impl Requirements {
    fn apply(&mut self, block: &InterfaceBlock) {
        if block.remove {
            for name in &block.enums {
                self.enums.remove(name);
            }
            for name in &block.commands {
                self.commands.remove(name);
            }
        } else {
            self.enums.extend(block.enums.iter().cloned());
            self.commands.extend(block.commands.iter().cloned());
        }
    }
}

impl RawRegistry {
    fn add_enum(&mut self, decl: EnumDecl) {
        match self.enum_index.get(&decl.enumerant.name) {
            // An api-specific definition overrides the generic one.
            Some(&idx) => {
                if decl.api_specific || !self.enums[idx].api_specific {
                    self.enums[idx] = decl;
                }
            }
            None => {
                self.enum_index
                    .insert(decl.enumerant.name.clone(), self.enums.len());
                self.enums.push(decl);
            }
        }
    }

    fn add_command(&mut self, command: Command) {
        match self.command_index.get(&command.name) {
            Some(&idx) => self.commands[idx] = command,
            None => {
                self.command_index
                    .insert(command.name.clone(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    fn build(&self, options: &ParseOptions) -> Registry {
        let extension_blocks: Vec<&InterfaceBlock> = self
            .extensions
            .iter()
            .filter(|ext| options.extensions.contains(&ext.name))
            .filter(|ext| ext.supported.iter().any(|api| options.selects_api(api)))
            .flat_map(|ext| ext.blocks.iter())
            .filter(|block| !block.remove && block.applies(options))
            .collect();

        for wanted in &options.extensions {
            if !self.extensions.iter().any(|ext| &ext.name == wanted) {
                tracing::warn!("extension {} not found in registry", wanted);
            }
        }

        let mut required = Requirements::default();
        let mut versions = Vec::new();

        for feature in self.features.iter().filter(|f| options.selects_api(&f.api)) {
            for block in feature.blocks.iter().filter(|b| b.applies(options)) {
                required.apply(block);
            }

            let mut snapshot = required.clone();
            for block in &extension_blocks {
                snapshot.apply(block);
            }

            versions.push(self.build_version(feature, &snapshot));
        }

        Registry::new(versions)
    }

    fn build_version(&self, feature: &Feature, required: &Requirements) -> Version {
        let mut version = Version::new(&feature.api, &feature.name, &feature.number);
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        let mut seen: HashSet<(&str, &str)> = HashSet::new();

        for decl in self
            .enums
            .iter()
            .filter(|d| required.enums.contains(&d.enumerant.name))
        {
            for group in &decl.groups {
                if seen.insert((group.as_str(), decl.enumerant.name.as_str())) {
                    groups
                        .entry(group.clone())
                        .or_insert_with(|| Group::new(group.clone()))
                        .add_enum(decl.enumerant.clone());
                }
            }
        }

        for (group, members) in &self.legacy_groups {
            for member in members.iter().filter(|m| required.enums.contains(*m)) {
                let Some(&idx) = self.enum_index.get(member) else {
                    continue;
                };
                if seen.insert((group.as_str(), member.as_str())) {
                    groups
                        .entry(group.clone())
                        .or_insert_with(|| Group::new(group.clone()))
                        .add_enum(self.enums[idx].enumerant.clone());
                }
            }
        }

        version.groups = groups;
        version.commands = self
            .commands
            .iter()
            .filter(|c| required.commands.contains(&c.name))
            .cloned()
            .collect();

        let dangling = required
            .commands
            .iter()
            .filter(|name| !self.command_index.contains_key(*name))
            .count();
        if dangling > 0 {
            tracing::debug!(
                "{}: skipped {} required commands missing from the registry",
                feature.name,
                dangling
            );
        }

        version
    }
}

/// Parses an `<enums>` block.
fn parse_enums(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    options: &ParseOptions,
    raw: &mut RawRegistry,
) -> Result<(), ParseError> {
    let mut namespace = None;
    let mut block_group = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "namespace" => namespace = Some(value.to_string()),
            "group" => block_group = Some(value.to_string()),
            _ => {}
        }
    }

    let namespace = namespace.as_deref();
    let block_group = block_group.as_deref();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name == "enum"
                    && let Some(decl) = parse_enum(e, namespace, block_group, options)?
                {
                    raw.add_enum(decl);
                }
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name == "enum"
                    && let Some(decl) = parse_enum(e, namespace, block_group, options)?
                {
                    raw.add_enum(decl);
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a single `<enum>` definition. Returns `None` when its api is not selected.
fn parse_enum(
    e: &BytesStart<'_>,
    namespace: Option<&str>,
    block_group: Option<&str>,
    options: &ParseOptions,
) -> Result<Option<EnumDecl>, ParseError> {
    let mut name = None;
    let mut value = None;
    let mut api = None;
    let mut groups = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let attr_value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(attr_value.to_string()),
            "value" => value = Some(attr_value.to_string()),
            "api" => api = Some(attr_value.to_string()),
            "group" => groups = Some(split_list(attr_value, ',')),
            _ => {}
        }
    }

    if api.as_deref().is_some_and(|api| !options.selects_api(api)) {
        return Ok(None);
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("enum", "name"))?;
    let value = value.ok_or_else(|| ParseError::missing_attr("enum", "value"))?;
    let groups = match groups {
        Some(groups) => groups,
        None => block_group.into_iter().map(str::to_string).collect(),
    };
    let short_name = short_name(&name, namespace);

    Ok(Some(EnumDecl {
        enumerant: Enumerant::new(name, short_name, value),
        groups,
        api_specific: api.is_some(),
    }))
}

/// Parses the legacy `<groups>` section.
fn parse_groups(reader: &mut Reader<&[u8]>, raw: &mut RawRegistry) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name == "group" {
                    let group = parse_group(reader, e)?;
                    raw.legacy_groups.push(group);
                } else {
                    skip_to_end(reader)?;
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a legacy `<group>` listing.
fn parse_group(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<(String, Vec<String>), ParseError> {
    let name = required_attr(e, "group", "name")?;
    let mut members = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"enum" => {
                members.push(required_attr(e, "enum", "name")?);
            }
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"enum" {
                    members.push(required_attr(e, "enum", "name")?);
                }
                skip_to_end(reader)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok((name, members))
}

/// Parses the `<commands>` section.
fn parse_commands(reader: &mut Reader<&[u8]>, raw: &mut RawRegistry) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"command" {
                    let command = parse_command(reader)?;
                    raw.add_command(command);
                } else {
                    skip_to_end(reader)?;
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a `<command>` element.
fn parse_command(reader: &mut Reader<&[u8]>) -> Result<Command, ParseError> {
    let mut proto: Option<(String, TypeRef)> = None;
    let mut parameters = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "proto" => proto = Some(parse_declaration(reader, e, "proto")?),
                    "param" => {
                        let (name, type_ref) = parse_declaration(reader, e, "param")?;
                        parameters.push(Parameter::new(name, type_ref));
                    }
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let (name, return_type) =
        proto.ok_or_else(|| ParseError::missing_element("command", "proto"))?;
    let mut command = Command::new(name, return_type);
    command.parameters = parameters;

    Ok(command)
}

/// Parses a `<proto>` or `<param>` declaration into its name and type.
///
/// The type token is every piece of text and `<ptype>` content preceding
/// `<name>`, with whitespace collapsed.
fn parse_declaration(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    element: &str,
) -> Result<(String, TypeRef), ParseError> {
    let mut group = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        if key == "group" {
            group = Some(value.to_string());
        }
    }

    let mut ty = String::new();
    let mut name = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) if name.is_none() => {
                ty.push_str(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "ptype" => {
                        let text = read_text(reader)?;
                        if name.is_none() {
                            ty.push(' ');
                            ty.push_str(&text);
                            ty.push(' ');
                        }
                    }
                    "name" => name = Some(read_text(reader)?.trim().to_string()),
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let name = name.ok_or_else(|| ParseError::missing_element(element, "name"))?;
    let type_ref = TypeRef {
        ty: normalize_type(&ty),
        group,
    };

    Ok((name, type_ref))
}

/// Parses a `<feature>` element.
fn parse_feature(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<Feature, ParseError> {
    let mut api = None;
    let mut name = None;
    let mut number = String::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "api" => api = Some(value.to_string()),
            "name" => name = Some(value.to_string()),
            "number" => number = value.to_string(),
            _ => {}
        }
    }

    let api = api.ok_or_else(|| ParseError::missing_attr("feature", "api"))?;
    let name = name.ok_or_else(|| ParseError::missing_attr("feature", "name"))?;
    let blocks = parse_interface_blocks(reader)?;

    Ok(Feature {
        api,
        name,
        number,
        blocks,
    })
}

/// Parses an `<extension>` element.
fn parse_extension(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<Extension, ParseError> {
    let mut name = None;
    let mut supported = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "supported" => supported = split_list(value, '|'),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("extension", "name"))?;
    let blocks = parse_interface_blocks(reader)?;

    Ok(Extension {
        name,
        supported,
        blocks,
    })
}

/// Parses the `<require>` and `<remove>` children of a feature or extension.
fn parse_interface_blocks(reader: &mut Reader<&[u8]>) -> Result<Vec<InterfaceBlock>, ParseError> {
    let mut blocks = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "require" | "remove" => {
                        let block = parse_interface_block(reader, e, tag_name == "remove")?;
                        blocks.push(block);
                    }
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks)
}

/// Parses a single `<require>` or `<remove>` block.
fn parse_interface_block(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    remove: bool,
) -> Result<InterfaceBlock, ParseError> {
    let mut block = InterfaceBlock {
        remove,
        ..InterfaceBlock::default()
    };

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "profile" => block.profile = Some(value.to_string()),
            "api" => block.api = Some(value.to_string()),
            _ => {}
        }
    }

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => add_interface_item(&mut block, e)?,
            Ok(Event::Start(ref e)) => {
                add_interface_item(&mut block, e)?;
                skip_to_end(reader)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(block)
}

fn add_interface_item(block: &mut InterfaceBlock, e: &BytesStart<'_>) -> Result<(), ParseError> {
    match e.name().as_ref() {
        b"enum" => block.enums.push(required_attr(e, "enum", "name")?),
        b"command" => block.commands.push(required_attr(e, "command", "name")?),
        _ => {}
    }
    Ok(())
}

/// Reads the text content of the current element up to its end tag.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => text.push_str(std::str::from_utf8(t.as_ref())?),
            Ok(Event::Start(_)) => skip_to_end(reader)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == attribute.as_bytes() {
            return Ok(std::str::from_utf8(&attr.value)?.to_string());
        }
    }
    Err(ParseError::missing_attr(element, attribute))
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collapses runs of whitespace in a C type spelling.
fn normalize_type(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips the API namespace prefix from an enumerant name.
fn short_name(name: &str, namespace: Option<&str>) -> String {
    if let Some(rest) = namespace
        .and_then(|ns| name.strip_prefix(ns))
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
    {
        return rest.to_string();
    }
    match name.split_once('_') {
        Some((_, rest)) if !rest.is_empty() => rest.to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINI_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <comment>Test registry</comment>
    <types>
        <type>typedef unsigned int <name>GLenum</name>;</type>
    </types>
    <enums namespace="GL" group="SpecialNumbers" vendor="ARB">
        <enum value="0" name="GL_FALSE"/>
        <enum value="1" name="GL_TRUE"/>
        <enum value="0xFFFFFFFFFFFFFFFF" name="GL_TIMEOUT_IGNORED" group="SpecialNumbers"/>
    </enums>
    <enums namespace="GL" vendor="ARB">
        <enum value="0x00000100" name="GL_DEPTH_BUFFER_BIT" group="ClearBufferMask,AttribMask"/>
        <enum value="0x00004000" name="GL_COLOR_BUFFER_BIT" group="ClearBufferMask,AttribMask"/>
        <enum value="0x0DE1" name="GL_TEXTURE_2D" group="TextureTarget,EnableCap"/>
        <enum value="0x8B8D" name="GL_ACTIVE_PROGRAM_EXT" api="gl" group="ProgramProperty"/>
        <enum value="0x8259" name="GL_ACTIVE_PROGRAM_EXT" api="gles2" group="ProgramProperty"/>
        <enum value="0x1F02" name="GL_VERSION" group="StringName"/>
        <enum value="0x0B21" name="GL_LINE_WIDTH"/>
        <unused start="0x0DE2" end="0x0DFF"/>
    </enums>
    <groups>
        <group name="Boolean">
            <enum name="GL_FALSE"/>
            <enum name="GL_TRUE"/>
        </group>
    </groups>
    <commands namespace="GL">
        <command>
            <proto>void <name>glClear</name></proto>
            <param group="ClearBufferMask"><ptype>GLbitfield</ptype> <name>mask</name></param>
            <glx type="render" opcode="127"/>
        </command>
        <command>
            <proto group="String">const <ptype>GLubyte</ptype> *<name>glGetString</name></proto>
            <param group="StringName"><ptype>GLenum</ptype> <name>name</name></param>
        </command>
        <command>
            <proto>void <name>glBindTexture</name></proto>
            <param group="TextureTarget"><ptype>GLenum</ptype> <name>target</name></param>
            <param class="texture"><ptype>GLuint</ptype> <name>texture</name></param>
        </command>
        <command>
            <proto>void <name>glLineWidth</name></proto>
            <param><ptype>GLfloat</ptype> <name>width</name></param>
        </command>
        <command>
            <proto>void <name>glShaderSource</name></proto>
            <param class="shader"><ptype>GLuint</ptype> <name>shader</name></param>
            <param><ptype>GLsizei</ptype> <name>count</name></param>
            <param len="count">const <ptype>GLchar</ptype> *const*<name>string</name></param>
            <param len="count">const <ptype>GLint</ptype> *<name>length</name></param>
        </command>
    </commands>
    <feature api="gl" name="GL_VERSION_1_0" number="1.0">
        <require>
            <enum name="GL_FALSE"/>
            <enum name="GL_TRUE"/>
            <enum name="GL_DEPTH_BUFFER_BIT"/>
            <enum name="GL_COLOR_BUFFER_BIT"/>
            <enum name="GL_VERSION"/>
            <enum name="GL_LINE_WIDTH"/>
            <command name="glClear"/>
            <command name="glGetString"/>
            <command name="glLineWidth"/>
            <command name="glMissingEverywhere"/>
        </require>
    </feature>
    <feature api="gl" name="GL_VERSION_1_1" number="1.1">
        <require>
            <enum name="GL_TEXTURE_2D"/>
            <command name="glBindTexture"/>
        </require>
    </feature>
    <feature api="gles2" name="GL_ES_VERSION_2_0" number="2.0">
        <require>
            <command name="glClear"/>
        </require>
    </feature>
    <feature api="gl" name="GL_VERSION_3_2" number="3.2">
        <require>
            <command name="glShaderSource"/>
        </require>
        <remove profile="core">
            <command name="glLineWidth"/>
            <enum name="GL_LINE_WIDTH"/>
        </remove>
    </feature>
    <extensions>
        <extension name="GL_EXT_separate_shader_objects" supported="gl|glcore|gles2">
            <require>
                <enum name="GL_ACTIVE_PROGRAM_EXT"/>
            </require>
        </extension>
    </extensions>
</registry>"#;

    #[test]
    fn test_parse_versions_in_order() {
        let registry = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");

        let numbers: Vec<&str> = registry
            .versions
            .iter()
            .map(|v| v.number.as_str())
            .collect();
        assert_eq!(numbers, ["1.0", "1.1", "3.2"]);
        assert_eq!(registry.latest().unwrap().name, "GL_VERSION_3_2");
    }

    #[test]
    fn test_versions_are_cumulative() {
        let registry = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");

        let v10 = &registry.versions[0];
        assert!(v10.command("glClear").is_some());
        assert!(v10.command("glBindTexture").is_none());
        assert!(!v10.has_group("TextureTarget"));

        let v11 = &registry.versions[1];
        assert!(v11.command("glClear").is_some());
        assert!(v11.command("glBindTexture").is_some());
        assert!(v11.has_group("TextureTarget"));
    }

    #[test]
    fn test_commands_keep_declaration_order() {
        let registry = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");

        let names: Vec<&str> = registry
            .latest()
            .unwrap()
            .commands
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "glClear",
                "glGetString",
                "glBindTexture",
                "glLineWidth",
                "glShaderSource"
            ]
        );
    }

    #[test]
    fn test_remove_applies_only_to_matching_profile() {
        let compat = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");
        assert!(compat.latest().unwrap().command("glLineWidth").is_some());

        let options = ParseOptions::new(["gl"]).profile("core");
        let core = parse_registry_with(MINI_REGISTRY, &options).expect("Failed to parse registry");
        let latest = core.latest().unwrap();
        assert!(latest.command("glLineWidth").is_none());
        assert!(latest.command("glShaderSource").is_some());
    }

    #[test]
    fn test_api_filter() {
        let registry = parse_registry(MINI_REGISTRY, &["gles2"]).expect("Failed to parse registry");

        assert_eq!(registry.versions.len(), 1);
        let version = registry.latest().unwrap();
        assert_eq!(version.api, "gles2");
        assert_eq!(version.commands.len(), 1);
        assert_eq!(version.commands[0].name, "glClear");
    }

    #[test]
    fn test_type_tokens() {
        let registry = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");
        let version = registry.latest().unwrap();

        let get_string = version.command("glGetString").unwrap();
        assert_eq!(get_string.return_type.ty, "const GLubyte *");
        assert_eq!(get_string.return_type.group.as_deref(), Some("String"));
        assert_eq!(get_string.parameters[0].type_ref.ty, "GLenum");
        assert_eq!(
            get_string.parameters[0].type_ref.group.as_deref(),
            Some("StringName")
        );

        let clear = version.command("glClear").unwrap();
        assert_eq!(clear.return_type.ty, "void");
        assert_eq!(clear.parameters[0].name, "mask");
        assert_eq!(clear.parameters[0].type_ref.ty, "GLbitfield");

        let shader_source = version.command("glShaderSource").unwrap();
        let types: Vec<&str> = shader_source
            .parameters
            .iter()
            .map(|p| p.type_ref.ty.as_str())
            .collect();
        assert_eq!(
            types,
            ["GLuint", "GLsizei", "const GLchar *const*", "const GLint *"]
        );
    }

    #[test]
    fn test_groups_from_attributes_and_legacy_listing() {
        let registry = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");
        let version = registry.latest().unwrap();

        let mask = version.group("ClearBufferMask").unwrap();
        let names: Vec<&str> = mask.enums.iter().map(|e| e.short_name.as_str()).collect();
        assert_eq!(names, ["DEPTH_BUFFER_BIT", "COLOR_BUFFER_BIT"]);

        let boolean = version.group("Boolean").unwrap();
        assert_eq!(boolean.enums.len(), 2);
        assert_eq!(boolean.enums[0].short_name, "FALSE");
        assert_eq!(boolean.enums[1].value, "1");

        // inherited from the <enums group> attribute
        let special = version.group("SpecialNumbers").unwrap();
        assert_eq!(special.enums.len(), 2);
    }

    #[test]
    fn test_ungrouped_enum_is_not_in_any_group() {
        let registry = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");
        let version = registry.latest().unwrap();

        assert!(
            version
                .groups
                .values()
                .all(|g| g.enums.iter().all(|e| e.name != "GL_LINE_WIDTH"))
        );
    }

    #[test]
    fn test_extension_adds_to_every_version() {
        let without = parse_registry(MINI_REGISTRY, &["gl"]).expect("Failed to parse registry");
        assert!(!without.latest().unwrap().has_group("ProgramProperty"));

        let options = ParseOptions::new(["gl"]).extension("GL_EXT_separate_shader_objects");
        let registry =
            parse_registry_with(MINI_REGISTRY, &options).expect("Failed to parse registry");
        for version in &registry.versions {
            let group = version.group("ProgramProperty").unwrap();
            assert_eq!(group.enums[0].value, "0x8B8D");
        }
    }

    #[test]
    fn test_api_specific_enum_value() {
        let options = ParseOptions::new(["gles2"]).extension("GL_EXT_separate_shader_objects");
        let registry =
            parse_registry_with(MINI_REGISTRY, &options).expect("Failed to parse registry");
        let group = registry.latest().unwrap().group("ProgramProperty").unwrap();
        assert_eq!(group.enums.len(), 1);
        assert_eq!(group.enums[0].value, "0x8259");
    }

    #[test]
    fn test_enum_elements_with_and_without_body() {
        let xml = r#"<registry>
    <enums namespace="GL" group="Boolean">
        <enum value="0" name="GL_FALSE"></enum>
        <enum value="1" name="GL_TRUE"/>
        <enum value="2" name="GL_MAYBE" api="gles2"/>
    </enums>
    <feature api="gl" name="GL_VERSION_1_0" number="1.0">
        <require>
            <enum name="GL_FALSE"/>
            <enum name="GL_TRUE"/>
            <enum name="GL_MAYBE"/>
        </require>
    </feature>
</registry>"#;
        let registry = parse_registry(xml, &["gl"]).expect("Failed to parse registry");
        let boolean = registry.latest().unwrap().group("Boolean").unwrap();
        let names: Vec<&str> = boolean.enums.iter().map(|e| e.short_name.as_str()).collect();
        assert_eq!(names, ["FALSE", "TRUE"]);
    }

    #[test]
    fn test_missing_root() {
        let result = parse_registry("<notaregistry/>", &["gl"]);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_feature_without_api() {
        let xml = r#"<registry><feature name="GL_VERSION_1_0" number="1.0"></feature></registry>"#;
        let result = parse_registry(xml, &["gl"]);
        assert!(matches!(result, Err(ParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_command_without_name() {
        let xml =
            r#"<registry><commands><command><proto>void</proto></command></commands></registry>"#;
        let result = parse_registry(xml, &["gl"]);
        assert!(matches!(result, Err(ParseError::MissingElement { .. })));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("gl.xml");
        std::fs::write(&path, MINI_REGISTRY).expect("Failed to write registry");

        let registry = parse_file(&path, &ParseOptions::default()).expect("Failed to parse file");
        assert_eq!(registry.versions.len(), 3);
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file(Path::new("/nonexistent/gl.xml"), &ParseOptions::default());
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("GL_TEXTURE_2D", Some("GL")), "TEXTURE_2D");
        assert_eq!(short_name("GL_2D", Some("GL")), "2D");
        assert_eq!(short_name("EGL_NONE", None), "NONE");
        assert_eq!(short_name("PLAIN", Some("GL")), "PLAIN");
    }

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("  const  GLubyte  *"), "const GLubyte *");
        assert_eq!(normalize_type(" GLenum  "), "GLenum");
        assert_eq!(normalize_type("void **"), "void **");
    }
}
