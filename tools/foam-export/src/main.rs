//! foam-export - Foam model export tool
//!
//! Converts IQM and OBJ sources to .foam containers and inspects or extends
//! existing containers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use modules from library
use foam_export::{convert, inspect::ModelSummary, manifest, ModelContainer};

#[derive(Parser)]
#[command(name = "foam-export")]
#[command(about = "Foam model export tool")]
#[command(version)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build models from a manifest file
    Build {
        /// Path to foam.toml manifest
        #[arg(default_value = "foam.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to foam.toml manifest
        #[arg(default_value = "foam.toml")]
        manifest: PathBuf,
    },

    /// Convert a single model file
    Convert {
        /// Input model (IQM, OBJ or an existing .foam)
        input: PathBuf,

        /// Output .foam file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Container name (default: input file stem)
        #[arg(long)]
        name: Option<String>,

        /// Reverse winding, flip V and swap Y/Z of normals and tangents
        #[arg(long)]
        convert_basis: bool,
    },

    /// Print a summary of a .foam container
    Inspect {
        /// Container to inspect
        input: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage opaque extension blobs
    Extension {
        #[command(subcommand)]
        command: ExtensionCommands,
    },
}

#[derive(Subcommand)]
enum ExtensionCommands {
    /// Append a file's bytes as a named extension
    Add {
        /// Container to modify in place
        container: PathBuf,

        /// Extension name
        name: String,

        /// File whose bytes become the payload
        payload: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build { manifest, output } => {
            tracing::debug!("Building models from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Convert {
            input,
            output,
            name,
            convert_basis,
        } => {
            let output = output.unwrap_or_else(|| convert::default_output(&input));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            convert::convert(&input, &output, name.as_deref(), convert_basis)?;
            tracing::info!("Done!");
        }

        Commands::Inspect { input, json } => {
            let model = ModelContainer::from_file(&input)
                .map_err(|e| anyhow::anyhow!("Failed to load container {:?}: {}", input, e))?;
            let summary = ModelSummary::new(&model);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }

        Commands::Extension { command } => match command {
            ExtensionCommands::Add {
                container,
                name,
                payload,
            } => {
                convert::add_extension(&container, &name, &payload)?;
                tracing::info!("Done!");
            }
        },
    }

    Ok(())
}
