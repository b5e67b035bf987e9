mod config;
mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use labeler_core::Platform;
use labeler_project::{load_project, load_project_metadata, save_project};
use replay::{Editor, load_script};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "labeler")]
#[command(about = "Headless host for the audio label marker editor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which key a script's modifier events treat as the primary modifier.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScriptPlatform {
    /// Command is primary
    Mac,
    /// Ctrl is primary
    Other,
}

impl From<ScriptPlatform> for Platform {
    fn from(platform: ScriptPlatform) -> Self {
        match platform {
            ScriptPlatform::Mac => Platform::MacOs,
            ScriptPlatform::Other => Platform::Other,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded pointer script against a project
    Replay {
        project: PathBuf,
        script: PathBuf,

        /// Where to write the edited project; nothing is written if omitted
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Initial resolution in sample frames per pixel
        #[arg(long, short)]
        resolution: Option<u32>,

        /// Platform the script was recorded on; defaults to the current one
        #[arg(long, value_enum)]
        platform: Option<ScriptPlatform>,
    },
    /// Print a summary of a project file
    Inspect { project: PathBuf },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            project,
            script,
            output,
            resolution,
            platform,
        } => {
            let loaded = load_project(&project)
                .with_context(|| format!("loading project {}", project.display()))?;
            let events = load_script(&script)?;

            let platform = platform.map_or_else(Platform::current, Platform::from);
            let mut editor = Editor::new(loaded, Config::load(), resolution, platform);
            editor.run(&events)?;
            let (edited, report) = editor.finish()?;

            if let Some(output) = output {
                save_project(&output, &edited)
                    .with_context(|| format!("saving project {}", output.display()))?;
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Inspect { project } => {
            let metadata = load_project_metadata(&project)
                .with_context(|| format!("reading project {}", project.display()))?;
            println!("name:         {}", metadata.name);
            println!("label config: {}", metadata.label_config);
            println!("samples:      {}", metadata.sample_count);
            println!("entries:      {}", metadata.entry_count);
            println!("continuous:   {}", metadata.continuous);
        }
        Commands::Config => {
            if let Some(path) = Config::config_path() {
                log::info!("Config file: {}", path.display());
            }
            print!("{}", Config::load().to_toml()?);
        }
    }
    Ok(())
}
