use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use convgen::{
    Project,
    config::CONFIG_FILE,
    splice::update_version,
    verify::check_version,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{Level, info, warn};

#[derive(Debug, Parser)]
#[command(name = "convgen")]
#[command(about = "Deterministic conversion-function generator.", long_about = None)]
struct Cli {
    /// Log planning and emission steps.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate the schema.
    CheckSchema {
        #[arg(long, default_value = CONFIG_FILE, env = "CONVGEN_CONFIG")]
        config: PathBuf,
    },
    /// Print generated functions and names for one or all targets.
    Generate {
        #[arg(long, default_value = CONFIG_FILE, env = "CONVGEN_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        version: Option<String>,
    },
    /// Rewrite the generated sections of the target files.
    Update {
        #[arg(long, default_value = CONFIG_FILE, env = "CONVGEN_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        version: Option<String>,
    },
    /// Fail if a target file differs from fresh output.
    Verify {
        #[arg(long, default_value = CONFIG_FILE, env = "CONVGEN_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        version: Option<String>,
        /// Where fresh output is written for mismatched sections.
        #[arg(long, default_value = ".")]
        side_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    try_main(cli).map_err(|err| {
        eprintln!("{err:#}");
        err
    })
}

fn try_main(cli: Cli) -> Result<()> {
    match cli.command {
        Command::CheckSchema { config } => run_check_schema(&config),
        Command::Generate { config, version } => run_generate(&config, version.as_deref()),
        Command::Update { config, version } => run_update(&config, version.as_deref()),
        Command::Verify {
            config,
            version,
            side_dir,
        } => run_verify(&config, version.as_deref(), &side_dir),
    }
}

fn load(config: &Path) -> Result<Project> {
    Project::load(config).with_context(|| format!("load project: {}", config.display()))
}

// versions named on the command line, or every target in config order
fn versions(project: &Project, version: Option<&str>) -> Result<Vec<String>> {
    let targets = project.config.select(version)?;

    Ok(targets.into_iter().map(|t| t.version.clone()).collect())
}

fn run_check_schema(config: &Path) -> Result<()> {
    let project = load(config)?;
    let registry = &project.schema.registry;

    for version in registry.versions() {
        info!(%version, types = registry.known_types(version).count(), "version");
    }
    println!(
        "{} types in {} versions, {} overrides",
        registry.len(),
        registry.versions().count(),
        project.schema.overrides.len()
    );

    Ok(())
}

fn run_generate(config: &Path, version: Option<&str>) -> Result<()> {
    let project = load(config)?;
    let mut stdout = std::io::stdout().lock();

    for version in versions(&project, version)? {
        let output = project.generate(&version)?;

        writeln!(stdout, "// {version}: functions")?;
        stdout.write_all(output.functions.as_bytes())?;
        writeln!(stdout, "// {version}: names")?;
        stdout.write_all(output.names.as_bytes())?;
    }

    Ok(())
}

fn run_update(config: &Path, version: Option<&str>) -> Result<()> {
    let project = load(config)?;

    for version in versions(&project, version)? {
        if !update_version(&project, &version)? {
            info!(%version, "already up to date");
        }
    }

    Ok(())
}

fn run_verify(config: &Path, version: Option<&str>, side_dir: &Path) -> Result<()> {
    let project = load(config)?;
    let mut mismatched = 0;

    for version in versions(&project, version)? {
        let report = check_version(&project, &version, side_dir)?;
        for failure in &report.failures {
            warn!(%version, name = %failure.name, "type was not generated");
        }
        for err in report.errors() {
            eprintln!("{err}");
            mismatched += 1;
        }
    }

    if mismatched > 0 {
        bail!("{mismatched} generated section(s) differ; run `convgen update`");
    }
    println!("generated conversions are up to date");

    Ok(())
}
