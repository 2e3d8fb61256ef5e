#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use stowage_core::Config;

#[derive(Parser, Debug)]
#[command(name = "stowage")]
#[command(author, version, about = "Bundled-package inventory and license compliance inspector", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Inventory bundled packages and print the pruned dependency graph
    Scan {
        /// Module root searched recursively for package.json files (repeatable)
        #[arg(long = "modules", value_name = "DIR")]
        modules: Vec<PathBuf>,

        /// The product's own package.json
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Audit the inventory against a license allow-list
    Licenses {
        /// Module root searched recursively for package.json files (repeatable)
        #[arg(long = "modules", value_name = "DIR")]
        modules: Vec<PathBuf>,

        /// The product's own package.json
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Allowed license name (repeatable)
        #[arg(long = "allow", value_name = "LICENSE")]
        allow: Vec<String>,

        /// JSON file containing an array of allowed license names
        #[arg(long, value_name = "FILE")]
        allow_file: Option<PathBuf>,
    },

    /// Report declared dependencies that resolve to no installed package
    Missing {
        /// Module root searched recursively for package.json files (repeatable)
        #[arg(long = "modules", value_name = "DIR")]
        modules: Vec<PathBuf>,

        /// The product's own package.json
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Require byte-exact specifier matches (no range evaluation)
        #[arg(long)]
        exact: bool,
    },

    /// Render the inventory as a text report grouped by license
    Report {
        /// Module root searched recursively for package.json files (repeatable)
        #[arg(long = "modules", value_name = "DIR")]
        modules: Vec<PathBuf>,

        /// The product's own package.json
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(&config);

    match cli.command {
        Commands::Version => commands::version::run(),
        Commands::Scan { modules, manifest } => {
            let (modules, manifest) = resolve_inputs(&config, modules, manifest);
            commands::scan::run(&modules, &manifest, cli.json)
        }
        Commands::Licenses {
            modules,
            manifest,
            allow,
            allow_file,
        } => {
            let (modules, manifest) = resolve_inputs(&config, modules, manifest);
            commands::licenses::run(&modules, &manifest, allow, allow_file.as_deref(), cli.json)
        }
        Commands::Missing {
            modules,
            manifest,
            exact,
        } => {
            let (modules, manifest) = resolve_inputs(&config, modules, manifest);
            commands::missing::run(&modules, &manifest, exact, cli.json)
        }
        Commands::Report {
            modules,
            manifest,
            output,
        } => {
            let (modules, manifest) = resolve_inputs(&config, modules, manifest);
            commands::report::run(&modules, &manifest, output.as_deref(), cli.json)
        }
    }
}

/// Apply working-directory defaults to the module roots and product manifest.
fn resolve_inputs(
    config: &Config,
    modules: Vec<PathBuf>,
    manifest: Option<PathBuf>,
) -> (Vec<PathBuf>, PathBuf) {
    let modules = if modules.is_empty() {
        vec![config.default_module_root()]
    } else {
        modules
    };
    let manifest = manifest.unwrap_or_else(|| config.default_manifest());
    (modules, manifest)
}
