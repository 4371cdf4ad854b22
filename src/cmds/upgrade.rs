use crate::builder::ManifestBuilder;
use crate::config::UpgradeConfig;
use crate::errors::{ProjupError, Result};
use crate::legacy::LegacyProject;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Arguments for the upgrade command
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Project file or directory to search for legacy projects
    #[arg(default_value = ".")]
    pub path: String,

    /// Metadata config file (default: projup.json next to the target)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override a config value (key=value, repeatable)
    #[arg(short, long)]
    pub set: Vec<String>,

    /// Print the generated manifests instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Don't keep a .bak copy of the legacy project file
    #[arg(long)]
    pub no_backup: bool,
}

/// Run the upgrade command
pub fn run(args: UpgradeArgs) -> Result<()> {
    let target = Path::new(&args.path);
    let config = load_config(target, args.config.as_deref(), &args.set)?;

    let projects = discover_projects(target)?;
    if projects.is_empty() {
        println!(
            "{} No project files found under {}",
            "!".yellow(),
            target.display()
        );
        return Ok(());
    }

    let mut upgraded = 0usize;
    let mut skipped = 0usize;

    for project_path in &projects {
        let project = LegacyProject::from_file(project_path)?;
        if project.sdk_style {
            println!(
                "{} {} is already SDK-style, skipping",
                "!".yellow(),
                project_path.display()
            );
            skipped += 1;
            continue;
        }

        println!("{} Upgrading {}", "→".cyan(), project_path.display().to_string().bold());

        let mut builder = ManifestBuilder::new(&project.model, &config);
        builder
            .generate_project_reference_section()
            .generate_dependencies_section()
            .generate_common_section()?;
        let document = builder.build();

        if args.dry_run {
            println!("{}", document.to_xml_string()?);
        } else {
            if !args.no_backup {
                let backup = backup_path(project_path);
                fs::copy(project_path, &backup)?;
                println!(
                    "  {} Saved legacy project to {}",
                    "•".dimmed(),
                    backup.display()
                );
            }
            document.write_to_file(project_path)?;
            println!("  {} Wrote manifest", "✓".green());
        }
        upgraded += 1;
    }

    println!(
        "{} Upgraded {} project(s), skipped {}",
        "✓".green().bold(),
        upgraded,
        skipped
    );
    Ok(())
}

/// Resolve the config layer stack relative to the upgrade target.
pub(crate) fn load_config(
    target: &Path,
    config_file: Option<&str>,
    overrides: &[String],
) -> Result<UpgradeConfig> {
    let config_dir = if target.is_dir() {
        target
    } else {
        target.parent().unwrap_or(Path::new("."))
    };
    UpgradeConfig::load(config_dir, config_file.map(Path::new), overrides)
}

/// Collect project files: the target itself, or a directory walk skipping
/// build output and hidden directories.
pub(crate) fn discover_projects(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.is_dir() {
        return Err(ProjupError::InvalidProject(format!(
            "no such file or directory: {}",
            target.display()
        )));
    }

    let mut projects = Vec::new();
    let walker = WalkDir::new(target)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("csproj")
        {
            projects.push(entry.path().to_path_buf());
        }
    }
    Ok(projects)
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    matches!(
        entry.file_name().to_str(),
        Some(name) if name == "bin" || name == "obj" || name.starts_with('.')
    )
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_skips_build_output_and_hidden_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("App")).unwrap();
        fs::create_dir_all(root.join("App/bin/Debug")).unwrap();
        fs::create_dir_all(root.join("App/obj")).unwrap();
        fs::create_dir_all(root.join(".vs")).unwrap();
        fs::write(root.join("App/App.csproj"), "<Project/>").unwrap();
        fs::write(root.join("App/bin/Debug/App.csproj"), "<Project/>").unwrap();
        fs::write(root.join("App/obj/App.csproj"), "<Project/>").unwrap();
        fs::write(root.join(".vs/Stale.csproj"), "<Project/>").unwrap();

        let projects = discover_projects(root).unwrap();
        assert_eq!(projects, vec![root.join("App/App.csproj")]);
    }

    #[test]
    fn test_discover_accepts_a_single_file_target() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("App.csproj");
        fs::write(&project, "<Project/>").unwrap();

        let projects = discover_projects(&project).unwrap();
        assert_eq!(projects, vec![project]);
    }

    #[test]
    fn test_backup_path_appends_bak() {
        assert_eq!(
            backup_path(Path::new("src/App.csproj")),
            PathBuf::from("src/App.csproj.bak")
        );
    }
}
