use serde::{Deserialize, Serialize};

/// A reference to another project in the same solution, by relative path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectReference {
    pub relative_path: String,
}

/// One package dependency. Version specifiers are carried verbatim, no
/// normalization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectDependency {
    pub package_id: String,
    pub version: String,
}

/// Everything the manifest builder reads from a legacy project.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectModel {
    pub project_references: Vec<ProjectReference>,
    pub project_dependencies: Vec<ProjectDependency>,
    pub is_executable: bool,
}
