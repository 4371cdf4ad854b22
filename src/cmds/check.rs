use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::builder::REQUIRED_PROPERTY_KEY;
use crate::cmds::upgrade::{discover_projects, load_config};
use crate::errors::Result;
use crate::legacy::LegacyProject;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project file or directory to inspect
    #[arg(default_value = ".")]
    pub path: String,

    /// Metadata config file (default: projup.json next to the target)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override a config value (key=value, repeatable)
    #[arg(short, long)]
    pub set: Vec<String>,
}

/// Inspection result for one project file
#[derive(Debug)]
struct ProjectReport {
    file: String,
    sdk_style: bool,
    references: usize,
    dependencies: usize,
}

/// Run the check command
pub fn run(args: CheckArgs) -> Result<()> {
    println!("{} Inspecting project files...", "→".cyan());

    let target = Path::new(&args.path);
    let config = load_config(target, args.config.as_deref(), &args.set)?;

    let mut reports = Vec::new();
    for path in &discover_projects(target)? {
        let project = LegacyProject::from_file(path)?;
        reports.push(ProjectReport {
            file: path.display().to_string(),
            sdk_style: project.sdk_style,
            references: project.model.project_references.len(),
            dependencies: project.model.project_dependencies.len(),
        });
    }

    if reports.is_empty() {
        println!("{} No project files found.", "!".yellow());
        return Ok(());
    }

    for report in &reports {
        if report.sdk_style {
            println!("  {} {} (already SDK-style)", "✓".green(), report.file);
        } else {
            println!(
                "  {} {} ({} project reference(s), {} package(s))",
                "~".yellow(),
                report.file,
                report.references,
                report.dependencies
            );
        }
    }

    let pending = reports.iter().filter(|r| !r.sdk_style).count();
    println!(
        "{} {} of {} project(s) need upgrading.",
        "Summary:".yellow(),
        pending,
        reports.len()
    );

    if config.get(REQUIRED_PROPERTY_KEY).is_some() {
        println!("{} Required configuration present.", "✓".green());
    } else {
        println!(
            "{} Missing required configuration key '{}'. Upgrades will fail until it is provided.",
            "!".yellow(),
            REQUIRED_PROPERTY_KEY
        );
    }

    Ok(())
}
