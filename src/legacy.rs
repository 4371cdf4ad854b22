//! Extraction of the project model from legacy MSBuild project files.

use crate::errors::{ProjupError, Result};
use crate::types::{ProjectDependency, ProjectModel, ProjectReference};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// File name of the legacy package list kept next to the project file.
pub const PACKAGES_CONFIG: &str = "packages.config";

/// A project file together with what was extracted from it.
#[derive(Debug, Clone)]
pub struct LegacyProject {
    /// The root `Project` element carried an `Sdk` attribute, meaning the
    /// file is already in the new format.
    pub sdk_style: bool,
    pub model: ProjectModel,
}

impl LegacyProject {
    /// Parse a project file and its sibling `packages.config` (when one
    /// exists) into a project model.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut project = Self::parse(&content)?;

        if let Some(dir) = path.parent() {
            let packages = dir.join(PACKAGES_CONFIG);
            if packages.exists() {
                let content = std::fs::read_to_string(&packages)?;
                project.model.project_dependencies = parse_packages_config(&content)?;
            }
        }

        Ok(project)
    }

    /// Parse project XML: project references in document order, the
    /// executable output type, and Sdk-attribute detection on the root.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut saw_root = false;
        let mut sdk_style = false;
        let mut model = ProjectModel::default();
        let mut current_tag: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) => {
                    handle_element(e, &mut saw_root, &mut sdk_style, &mut model)?;
                }
                Ok(Event::Start(ref e)) => {
                    handle_element(e, &mut saw_root, &mut sdk_style, &mut model)?;
                    current_tag = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                Ok(Event::End(_)) => {
                    current_tag = None;
                }
                Ok(Event::Text(ref t)) => {
                    if current_tag.as_deref() == Some("OutputType") {
                        let decoded = t.decode().map_err(|e| {
                            ProjupError::InvalidProject(format!("invalid text node: {}", e))
                        })?;
                        let value = quick_xml::escape::unescape(&decoded).map_err(|e| {
                            ProjupError::InvalidProject(format!("invalid text node: {}", e))
                        })?;
                        if value.as_ref() == "Exe" || value.as_ref() == "WinExe" {
                            model.is_executable = true;
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ProjupError::InvalidProject(format!(
                        "error parsing project XML: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        if !saw_root {
            return Err(ProjupError::InvalidProject(
                "no root Project element".to_string(),
            ));
        }

        Ok(LegacyProject { sdk_style, model })
    }
}

fn handle_element(
    e: &BytesStart,
    saw_root: &mut bool,
    sdk_style: &mut bool,
    model: &mut ProjectModel,
) -> Result<()> {
    match e.name().as_ref() {
        // only the first Project element is the root; old-style project
        // references nest a <Project> child holding a GUID
        b"Project" if !*saw_root => {
            *saw_root = true;
            *sdk_style = get_attr(e, b"Sdk")?.is_some();
        }
        b"ProjectReference" => {
            if let Some(include) = get_attr(e, b"Include")? {
                model.project_references.push(ProjectReference {
                    relative_path: include,
                });
            }
        }
        _ => {}
    }
    Ok(())
}

/// Parse the legacy package list: `<package id="..." version="..."/>`
/// entries in document order. Version strings are carried verbatim.
pub fn parse_packages_config(xml: &str) -> Result<Vec<ProjectDependency>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut dependencies = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"package" {
                    dependencies.push(ProjectDependency {
                        package_id: require_attr(e, b"id")?,
                        version: require_attr(e, b"version")?,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ProjupError::InvalidProject(format!(
                    "error parsing {}: {}",
                    PACKAGES_CONFIG, e
                )));
            }
            _ => {}
        }
    }
    Ok(dependencies)
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr =
            attr.map_err(|e| ProjupError::InvalidProject(format!("invalid attribute: {}", e)))?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(|e| {
                ProjupError::InvalidProject(format!("invalid attribute value: {}", e))
            })?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn require_attr(e: &BytesStart, name: &[u8]) -> Result<String> {
    get_attr(e, name)?.ok_or_else(|| {
        ProjupError::InvalidProject(format!(
            "missing required attribute: {}",
            String::from_utf8_lossy(name)
        ))
    })
}
