//! Conversion commands between platform JSON and showcase YAML

use crate::cli::error::CliError;
use crate::export::DoYouBuzzExporter;
use crate::import::DoYouBuzzImporter;
use std::path::{Path, PathBuf};

/// Arguments for the toPlatform command
#[derive(Debug, Clone)]
pub struct ToPlatformArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Profile to start from when the showcase has no embedded metadata
    pub template: Option<PathBuf>,
    pub pretty: bool,
}

/// Handle the toSimplified command
pub fn handle_to_simplified(input: &Path, output: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.to_path_buf()));
    }

    let template = DoYouBuzzImporter::new().import_file(input, output)?;

    println!("Converted {} to {}", input.display(), output.display());
    println!("Original JSON saved to {}", template.display());
    Ok(())
}

/// Handle the toPlatform command
pub fn handle_to_platform(args: &ToPlatformArgs) -> Result<(), CliError> {
    if !args.input.exists() {
        return Err(CliError::FileNotFound(args.input.clone()));
    }

    DoYouBuzzExporter::new()
        .with_pretty(args.pretty)
        .export_file(&args.input, &args.output, args.template.as_deref())?;

    println!(
        "Converted {} to {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}
