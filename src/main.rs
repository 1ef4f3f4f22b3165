use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_reckon::cli::{self, ResolveArgs};
use git_reckon::config::load_project_config;
use git_reckon::domain::ResolvedVersionReport;
use git_reckon::ui;

#[derive(Parser)]
#[command(
    name = "git-reckon",
    version,
    about = "Infer the next build version from git history and conventional commits"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version the current build should carry
    Resolve {
        #[command(flatten)]
        inputs: ResolveInputs,

        #[arg(long, help = "Print the full resolution as JSON")]
        json: bool,

        #[arg(short, long, help = "Explain how the version was reached")]
        verbose: bool,
    },
    /// Show where the resolved version would be published and how it is signed
    Plan {
        #[command(flatten)]
        inputs: ResolveInputs,

        #[arg(long, help = "Print the plan as JSON")]
        json: bool,

        #[arg(long, help = "Fail when signing is required but no key is available")]
        check: bool,
    },
    /// Print the build descriptor produced by convention bundles
    Conventions {
        #[arg(required = true, help = "Bundle ids, applied in order")]
        bundles: Vec<String>,

        #[arg(long, default_value = ".", help = "Project directory")]
        path: PathBuf,

        #[arg(short, long, help = "Custom configuration file path")]
        config: Option<String>,

        #[arg(long, help = "Have the lock task write dependency locks")]
        write_locks: bool,

        #[arg(long, help = "Print the descriptor as JSON instead of TOML")]
        json: bool,
    },
}

#[derive(Args)]
struct ResolveInputs {
    #[arg(long, default_value = ".", help = "Directory inside the repository")]
    path: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'P', value_name = "KEY=VALUE", help = "Set a build property")]
    properties: Vec<String>,

    #[arg(long, help = "Release scope (major, minor, patch)")]
    scope: Option<String>,

    #[arg(long, help = "Release stage")]
    stage: Option<String>,
}

impl From<ResolveInputs> for ResolveArgs {
    fn from(inputs: ResolveInputs) -> Self {
        ResolveArgs {
            path: inputs.path,
            config_path: inputs.config,
            properties: inputs.properties,
            scope: inputs.scope,
            stage: inputs.stage,
        }
    }
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; RECKON_LOG_FORMAT=json switches to machine-parseable output.
fn init_tracing() {
    let log_format = std::env::var("RECKON_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            inputs,
            json,
            verbose,
        } => {
            let resolution = cli::run_resolve(&inputs.into())?;
            ui::display_boundary_warnings(&resolution.inspection.warnings);

            if json {
                let report = ResolvedVersionReport::from(&resolution.resolved);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if verbose {
                ui::display_resolution(&resolution.inspection.state, &resolution.resolved);
            } else {
                println!("{}", resolution.resolved);
            }
        }
        Command::Plan {
            inputs,
            json,
            check,
        } => {
            let (resolution, plan) = cli::run_plan(&inputs.into())?;
            ui::display_boundary_warnings(&resolution.inspection.warnings);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                ui::display_plan(&plan);
            }

            if check {
                plan.validate()?;
            }
        }
        Command::Conventions {
            bundles,
            path,
            config,
            write_locks,
            json,
        } => {
            let config = load_project_config(config.as_deref(), Some(&path))?;
            let project_name = match config.project.name.clone() {
                Some(name) => name,
                None => directory_name(&path)?,
            };

            let descriptor = cli::build_descriptor(&bundles, &config, &project_name, write_locks)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
            } else {
                print!("{}", toml::to_string_pretty(&descriptor)?);
            }
        }
    }

    Ok(())
}

fn directory_name(path: &Path) -> Result<String> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("resolving project directory {}", path.display()))?;

    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("project directory has no name; set [project] name in reckon.toml")
}
