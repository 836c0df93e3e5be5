mod init;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gantry_codegen::{backend, frontend, Project, Stubs};
use gantry_core::Name;

#[derive(Parser, Debug)]
#[clap(version, about = "Scaffold CRUD modules for the Gantry admin platform")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the backend module for an entity from its migration
    Backend(GenerateArgs),
    /// Generate the frontend module matching a generated backend module
    Frontend(GenerateArgs),
    /// Copy the stub templates into the project for customization
    Init {
        /// Project root
        #[clap(long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Module (grouping) name, e.g. Billing
    module: String,

    /// Entity name, e.g. Invoice
    entity: String,

    /// Project root containing server/ and web/
    #[clap(long, default_value = ".")]
    root: PathBuf,

    /// Load stub templates from this directory instead of the embedded set
    #[clap(long)]
    stubs: Option<PathBuf>,
}

impl GenerateArgs {
    fn split(&self) -> (Project, Stubs, Name, Name) {
        let stubs = match &self.stubs {
            Some(dir) => Stubs::from_dir(dir),
            None => Stubs::embedded(),
        };
        (
            Project::new(&self.root),
            stubs,
            Name::new(&self.module),
            Name::new(&self.entity),
        )
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Backend(args) => {
            let (project, stubs, module, entity) = args.split();
            backend::generate(&project, &stubs, &module, &entity).with_context(|| {
                format!("failed to generate backend module {}/{}", args.module, args.entity)
            })
        }
        Command::Frontend(args) => {
            let (project, stubs, module, entity) = args.split();
            frontend::generate(&project, &stubs, &module, &entity).with_context(|| {
                format!("failed to generate frontend module {}/{}", args.module, args.entity)
            })
        }
        Command::Init { root } => init::exec(&root),
    }
}
