//! Easyblock CLI - build and install one package from its config
//!
//! Usage:
//!   easyblock run <config.toml>        Configure, build, install and check
//!   easyblock layout <config.toml>     Show the paths the sanity check expects
//!   easyblock guess <config.toml>      Show module search path guesses
//!   easyblock list                     List available easyblocks

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use levitate_easyblock::{easyblock, output, Context, Executor, PackageConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Default root for installations (XDG compliant)
fn default_install_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("easyblock/software")
}

#[derive(Parser)]
#[command(name = "easyblock")]
#[command(about = "Build and install scientific software with version-gated recipes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Installation directory (default: <install root>/<name>/<version>)
    #[arg(short, long, global = true, env = "EASYBLOCK_INSTALLDIR")]
    installdir: Option<PathBuf>,

    /// Root under which per-package install dirs are created
    #[arg(long, global = true, env = "EASYBLOCK_INSTALLPATH")]
    installpath: Option<PathBuf>,

    /// Build directory (uses temp dir if not specified)
    #[arg(short, long, global = true, env = "EASYBLOCK_BUILDPATH")]
    build_dir: Option<PathBuf>,

    /// Machine identifier to build for (default: host)
    #[arg(long, global = true)]
    arch: Option<String>,

    /// Print commands without running them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Increase verbosity (-v shows commands, -vv debug logs)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure, build, install and sanity-check a package
    Run {
        /// Path to the package config (TOML)
        config: PathBuf,
    },

    /// Show the files and directories the sanity check expects
    Layout {
        /// Path to the package config (TOML)
        config: PathBuf,
    },

    /// Show environment variables a module for the package should extend
    Guess {
        /// Path to the package config (TOML)
        config: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available easyblocks
    List,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("levitate_easyblock=warn"),
        1 => EnvFilter::new("levitate_easyblock=info"),
        _ => EnvFilter::new("levitate_easyblock=debug,easyblock=debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Run { config } => {
            let cfg = load_config(config)?;
            let ctx = build_context(&cli, &cfg);
            let block = easyblock::lookup(cfg.easyblock_name(), &ctx)?;
            tracing::debug!(
                easyblock = block.name(),
                installdir = %ctx.installdir.display(),
                "resolved"
            );

            let report = Executor::new(ctx)
                .execute(block.as_ref(), cfg)
                .with_context(|| format!("Failed to install from {}", config.display()))?;

            output::info("Module search paths:");
            for (var, paths) in &report.module_guesses {
                output::list_item(var, &paths.join(":"));
            }
        }

        Commands::Layout { config } => {
            let cfg = load_config(config)?;
            let ctx = build_context(&cli, &cfg);
            let block = easyblock::lookup(cfg.easyblock_name(), &ctx)?;
            let layout = block.sanity_check_paths(&cfg);

            output::info(&format!("Expected under {}:", ctx.installdir.display()));
            for file in &layout.files {
                output::list_item(file, "file");
            }
            for dir in &layout.dirs {
                output::list_item(dir, "dir");
            }
        }

        Commands::Guess { config, json } => {
            let cfg = load_config(config)?;
            let ctx = build_context(&cli, &cfg);
            let block = easyblock::lookup(cfg.easyblock_name(), &ctx)?;
            let guesses = block.module_req_guess(&cfg);

            if *json {
                println!("{}", serde_json::to_string_pretty(&guesses)?);
            } else {
                for (var, paths) in &guesses {
                    output::list_item(var, &paths.join(":"));
                }
            }
        }

        Commands::List => {
            output::info("Available easyblocks:");
            for name in easyblock::AVAILABLE {
                output::list_item(name, "");
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<PackageConfig> {
    PackageConfig::load(path)
        .with_context(|| format!("Failed to load package config: {}", path.display()))
}

fn build_context(cli: &Cli, cfg: &PackageConfig) -> Context {
    let installdir = cli.installdir.clone().unwrap_or_else(|| {
        cli.installpath
            .clone()
            .unwrap_or_else(default_install_root)
            .join(&cfg.name)
            .join(cfg.version.to_string())
    });
    let build_dir = cli.build_dir.clone().unwrap_or_else(|| {
        std::env::temp_dir()
            .join("easyblock-build")
            .join(&cfg.name)
            .join(cfg.version.to_string())
    });

    let mut ctx = Context::with_installdir(installdir)
        .build_dir(build_dir)
        .dry_run(cli.dry_run)
        .verbose(cli.verbose > 0);
    if let Some(arch) = &cli.arch {
        ctx = ctx.arch(arch.clone());
    }
    ctx
}
