use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use projup::errors::ProjupError;

#[derive(Parser)]
#[command(
    name = "projup",
    about = "projup — Legacy project upgrade tool",
    long_about = "Projup migrates legacy MSBuild project files (old-style csproj plus packages.config) to SDK-style manifests.",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade legacy project files to SDK-style manifests
    Upgrade(projup::cmds::upgrade::UpgradeArgs),

    /// Inspect project files and report what an upgrade would do
    Check(projup::cmds::check::CheckArgs),
}

fn main() -> Result<(), ProjupError> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Upgrade(args) => projup::cmds::upgrade::run(args),
        Commands::Check(args) => projup::cmds::check::run(args),
    }
}
