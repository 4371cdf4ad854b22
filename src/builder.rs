//! Assembles an SDK-style manifest document from a project model and an
//! upgrade configuration.

use crate::config::UpgradeConfig;
use crate::document::{Document, Element};
use crate::errors::{ProjupError, Result};
use crate::types::ProjectModel;

/// Sdk attribute stamped on the manifest root.
pub const SDK_NAME: &str = "Microsoft.NET.Sdk";

/// The one configuration key the property group cannot do without.
pub const REQUIRED_PROPERTY_KEY: &str = "targetFramework";

/// Optional configuration keys, queried in this order after the required
/// key. Keys without a configured value are skipped.
const OPTIONAL_PROPERTY_KEYS: &[&str] = &[
    "copyright",
    "company",
    "authors",
    "description",
    "packageLicenseUrl",
    "packageProjectUrl",
    "packageIconUrl",
    "repositoryUrl",
    "repositoryType",
    "packageTags",
    "packageReleaseNotes",
    "packageId",
    "version",
    "product",
];

/// Builds the manifest document section by section.
///
/// Each `generate_*` call appends its section to the root, so the root's
/// child order is the call order. The calls return the builder for
/// chaining; invoking the same generator twice duplicates its section, so
/// callers invoke each at most once per build.
#[derive(Debug)]
pub struct ManifestBuilder<'a> {
    model: &'a ProjectModel,
    config: &'a UpgradeConfig,
    document: Document,
}

impl<'a> ManifestBuilder<'a> {
    /// Start an empty manifest: a lone `Project` root carrying the Sdk
    /// attribute. Nothing is validated here.
    pub fn new(model: &'a ProjectModel, config: &'a UpgradeConfig) -> Self {
        let mut document = Document::new("Project");
        document.root_mut().set_attribute("Sdk", SDK_NAME);
        ManifestBuilder {
            model,
            config,
            document,
        }
    }

    /// Append an `ItemGroup` holding one `ProjectReference` per model
    /// entry, in model order. A model without project references leaves
    /// the document untouched.
    pub fn generate_project_reference_section(&mut self) -> &mut Self {
        if self.model.project_references.is_empty() {
            return self;
        }

        let mut item_group = Element::new("ItemGroup");
        for reference in &self.model.project_references {
            let mut entry = Element::new("ProjectReference");
            entry.set_attribute("Include", reference.relative_path.as_str());
            item_group.append_child(entry);
        }
        self.document.root_mut().append_child(item_group);

        self
    }

    /// Append an `ItemGroup` holding one `PackageReference` per dependency,
    /// in model order, id and version copied verbatim. A model without
    /// dependencies leaves the document untouched.
    pub fn generate_dependencies_section(&mut self) -> &mut Self {
        if self.model.project_dependencies.is_empty() {
            return self;
        }

        let mut item_group = Element::new("ItemGroup");
        for dependency in &self.model.project_dependencies {
            let mut entry = Element::new("PackageReference");
            entry.set_attribute("Include", dependency.package_id.as_str());
            entry.set_attribute("Version", dependency.version.as_str());
            item_group.append_child(entry);
        }
        self.document.root_mut().append_child(item_group);

        self
    }

    /// Append the always-present `PropertyGroup`: the fixed configuration
    /// keys in order, then the executable output marker.
    ///
    /// Fails with [`ProjupError::RequiredConfigMissing`] when
    /// `targetFramework` has no configured value. The failure is not
    /// transactional: the group (and anything appended before the failing
    /// key) stays in the tree, and keys after the failure point are never
    /// queried.
    pub fn generate_common_section(&mut self) -> Result<&mut Self> {
        let group = self
            .document
            .root_mut()
            .append_child(Element::new("PropertyGroup"));

        append_property_from_config(group, self.config, REQUIRED_PROPERTY_KEY, true)?;
        for key in OPTIONAL_PROPERTY_KEYS {
            append_property_from_config(group, self.config, key, false)?;
        }

        if self.model.is_executable {
            let mut output_type = Element::new("OutputType");
            output_type.set_text("Exe");
            group.append_child(output_type);
        }

        Ok(self)
    }

    /// The completed manifest. Pure accessor: callable any number of
    /// times, always the same tree.
    pub fn build(&self) -> &Document {
        &self.document
    }
}

/// Query one configuration key and append a leaf element for it, the tag
/// being the key with its first letter upper-cased. An absent optional key
/// is skipped; an absent required key is a hard error. An empty string
/// counts as present.
fn append_property_from_config(
    group: &mut Element,
    config: &UpgradeConfig,
    key: &str,
    required: bool,
) -> Result<()> {
    match config.get(key) {
        Some(value) => {
            let mut property = Element::new(capitalize_first(key));
            property.set_text(value);
            group.append_child(property);
        }
        None if required => return Err(ProjupError::RequiredConfigMissing(key.to_string())),
        None => {}
    }
    Ok(())
}

/// Upper-case the first character, leaving the rest of the key unchanged.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
