//! CLI binary entry point for cv-showcase

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::convert::{
    ToPlatformArgs, handle_to_platform, handle_to_simplified,
};
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::init::handle_init;
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::{load_config, load_config_or_default};
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::variant::{
    handle_create, handle_delete, handle_info, handle_list, handle_rename, open_store,
};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cv-showcase")]
#[command(about = "Edit a DoYouBuzz CV as a YAML showcase and convert it back")]
#[command(version)]
struct Cli {
    /// Workspace holding .showcase.toml and the showcase store
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a DoYouBuzz profile export to a showcase YAML file
    #[command(name = "toSimplified", alias = "json2yaml")]
    ToSimplified {
        /// Platform JSON file
        input: PathBuf,
        /// Showcase YAML file to write
        output: PathBuf,
    },
    /// Convert a showcase YAML file to a DoYouBuzz profile
    #[command(name = "toPlatform", alias = "yaml2json")]
    ToPlatform {
        /// Showcase YAML file
        input: PathBuf,
        /// Platform JSON file to write
        output: PathBuf,
        /// Profile to start from when the showcase has no embedded metadata
        template: Option<PathBuf>,
        /// Write compact JSON regardless of configuration
        #[arg(long)]
        compact: bool,
    },
    /// Write a sample .showcase.toml into the workspace
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
    /// List the showcases in the store, baseline first
    List,
    /// Create a variant as a copy of another showcase
    Create {
        /// Name of the new variant
        variant: String,
        /// Showcase to copy (defaults to the baseline)
        #[arg(short, long)]
        from: Option<String>,
        /// What the variant is for
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a showcase (the baseline is protected)
    Delete {
        name: String,
    },
    /// Rename a showcase (the baseline is protected)
    Rename {
        old_name: String,
        new_name: String,
    },
    /// Show file and variant details of a showcase
    Info {
        name: String,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = cli.workspace;
    // only the store commands require a readable configuration
    let store = || load_config(&workspace).map(|config| open_store(&workspace, &config));
    let result = match cli.command {
        Commands::ToSimplified { input, output } => handle_to_simplified(&input, &output),
        Commands::ToPlatform {
            input,
            output,
            template,
            compact,
        } => {
            let config = load_config_or_default(&workspace);
            let args = ToPlatformArgs {
                input,
                output,
                template,
                pretty: config.export.pretty && !compact,
            };
            handle_to_platform(&args)
        }
        Commands::Init { force } => handle_init(&workspace, force).map(|_| ()),
        Commands::List => store().and_then(|store| handle_list(&store).map(|_| ())),
        Commands::Create {
            variant,
            from,
            description,
        } => store()
            .and_then(|store| handle_create(&store, &variant, from.as_deref(), &description)),
        Commands::Delete { name } => store().and_then(|store| handle_delete(&store, &name)),
        Commands::Rename { old_name, new_name } => {
            store().and_then(|store| handle_rename(&store, &old_name, &new_name))
        }
        Commands::Info { name } => store().and_then(|store| handle_info(&store, &name).map(|_| ())),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
