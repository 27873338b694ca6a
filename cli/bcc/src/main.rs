//! bcc — driver for the bcc ahead-of-time bitcode compiler.
//!
//! Builds a target configuration from flags or a `bcc.toml`, resolves it
//! against the backend registry and reports the result.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::target::ResolveOptions;

#[derive(Parser)]
#[command(name = "bcc", version, about = "Ahead-of-time bitcode compiler driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and resolve compilation targets
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Show toolchain diagnostics
    Doctor {
        /// Also check this triple
        #[arg(long)]
        triple: Option<String>,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List registered backend targets
    List,
    /// Classify a target triple
    Arch {
        /// Target triple (e.g., arm-linux-androideabi)
        triple: String,
    },
    /// Build and resolve a target configuration
    Resolve {
        /// Config file (default: nearest bcc.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Target triple, overriding the config file
        #[arg(long)]
        triple: Option<String>,
        /// Target CPU name
        #[arg(long)]
        cpu: Option<String>,
        /// Comma-separated feature toggles (e.g., +neon,-vfp)
        #[arg(long, allow_hyphen_values = true)]
        features: Option<String>,
        /// Optimization level (0-3, none, less, default, aggressive)
        #[arg(long)]
        opt_level: Option<String>,
        /// Code model (default, small, kernel, medium, large)
        #[arg(long)]
        code_model: Option<String>,
        /// Relocation model (default, static, pic, dynamic-no-pic)
        #[arg(long)]
        reloc: Option<String>,
        /// Do not apply architecture default features/relocation
        #[arg(long)]
        no_arch_defaults: bool,
        /// Output format (text, toml, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Write a starter bcc.toml
    Template {
        /// Target triple for the template
        #[arg(long)]
        triple: Option<String>,
        /// Output path (default: ./bcc.toml)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Target { action } => match action {
            TargetAction::List => commands::target::list(),
            TargetAction::Arch { triple } => commands::target::arch(&triple),
            TargetAction::Resolve {
                config,
                triple,
                cpu,
                features,
                opt_level,
                code_model,
                reloc,
                no_arch_defaults,
                format,
            } => {
                let options = ResolveOptions {
                    config,
                    triple,
                    cpu,
                    features,
                    opt_level,
                    code_model,
                    reloc,
                    no_arch_defaults,
                    format,
                };
                commands::target::resolve(&cwd, &options)
            }
            TargetAction::Template { triple, output } => {
                commands::target::template(&cwd, triple.as_deref(), output.as_deref())
            }
        },

        Commands::Doctor { triple } => commands::doctor::run(&cwd, triple.as_deref()),
    }
}
