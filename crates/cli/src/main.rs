use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{Term, style};
use std::path::{Path, PathBuf};

use ccb_core::{AttributeStore, Configuration};
use tracing_subscriber::EnvFilter;

/// ccb - build/packaging configuration for the coriolis source tree
#[derive(Parser)]
#[command(name = "ccb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration file and print its project summary
    Show {
        /// Explicit configuration file (default: educated guess)
        #[arg(long)]
        conf: Option<PathBuf>,
    },

    /// Dump the primary and secondary field namespaces
    Fields {
        /// Explicit configuration file to load first
        #[arg(long)]
        conf: Option<PathBuf>,
    },

    /// Show the host fingerprint and the derived layout
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();

    match cli.command {
        Commands::Show { conf } => cmd_show(conf.as_deref()),
        Commands::Fields { conf } => cmd_fields(conf.as_deref()),
        Commands::Status => cmd_status(),
    }
}

fn cmd_show(conf: Option<&Path>) -> Result<()> {
    let term = Term::stdout();

    let mut config = Configuration::new()?;
    config.load(conf)?;

    term.write_line(&format!(
        "{} CCB configuration",
        style("::").cyan().bold()
    ))?;
    if let Some(path) = config.conf_file() {
        term.write_line(&format!("  conf file:  {}", path.display()))?;
    }
    match config.svn_method() {
        Some(method) => term.write_line(&format!("  SVN method: {method}"))?,
        None => {
            term.write_line("  SVN method not defined, will not be able to checkout/commit")?;
        }
    }

    for project in config.projects() {
        term.write_line("")?;
        term.write_line(&format!(
            "  project {:<16} repository {}",
            style(project.name()).bold(),
            project.repository()
        ))?;
        for (order, tool) in project.tools().iter().enumerate() {
            term.write_line(&format!("    {:02}: {}", order + 1, tool))?;
        }
    }

    Ok(())
}

fn cmd_fields(conf: Option<&Path>) -> Result<()> {
    let term = Term::stdout();

    let mut config = Configuration::new()?;
    if conf.is_some() {
        config.load(conf)?;
    }

    term.write_line(&format!("{} Primary fields", style("::").cyan().bold()))?;
    for field in AttributeStore::primary_fields() {
        let value = config.get(field.as_str())?;
        term.write_line(&format!("  {:<16} {}", field.as_str(), value))?;
    }

    term.write_line(&format!("{} Secondary fields", style("::").cyan().bold()))?;
    for field in AttributeStore::secondary_fields() {
        let value = config.get(field.as_str())?;
        term.write_line(&format!("  {:<16} {}", field.as_str(), value))?;
    }

    Ok(())
}

fn cmd_status() -> Result<()> {
    let term = Term::stdout();
    let config = Configuration::new()?;

    term.write_line(&format!(
        "{} ccb v{}",
        style("::").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    ))?;
    term.write_line("")?;
    term.write_line(&format!("  OS type:     {}", config.os_type()))?;
    term.write_line(&format!(
        "  Lib suffix:  {}",
        config.lib_suffix().unwrap_or("-")
    ))?;
    term.write_line(&format!("  Build mode:  {}", config.build_mode()))?;
    term.write_line(&format!("  Lib mode:    {}", config.lib_mode()))?;
    term.write_line(&format!("  Root dir:    {}", config.root_dir().display()))?;
    term.write_line(&format!(
        "  Build dir:   {}",
        config.secondaries().build_dir.display()
    ))?;
    term.write_line(&format!(
        "  Install dir: {}",
        config.secondaries().install_dir.display()
    ))?;

    Ok(())
}
