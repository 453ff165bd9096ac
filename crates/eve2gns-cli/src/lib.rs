//! eve2gns CLI library
//!
//! This module contains the core CLI logic for the EVE-NG to GNS3 converter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use eve2gns::{
    ConverterBuilder, Eve2GnsError,
    topology::{Topology, check_file_name},
};

/// Run the eve2gns CLI application
///
/// This function converts the input lab and writes the GNS3 project folder
/// `<dst_dir>/<lab>/`, holding `<lab>.gns3` and a `configs/` directory with
/// one `<node>_startup-config.cfg` per startup config. The `configs/`
/// directory is recreated on every run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `Eve2GnsError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Conversion errors
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), Eve2GnsError> {
    info!(
        input_path = args.input,
        dst_dir = args.dst_dir;
        "Converting lab"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(start_port) = args.console_start_port {
        app_config = app_config.with_console_start_port(start_port);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = ConverterBuilder::new(app_config);
    let records = builder.parse(&source)?;
    let topology = builder.convert(&records)?;
    let json = builder.render_json(&topology)?;

    // Names come from the lab file; check them before anything is written.
    let project_name = project_name(&topology, Path::new(&args.input))?;
    let configs = topology.configs()?;
    let project_dir = Path::new(&args.dst_dir).join(&project_name);
    fs::create_dir_all(&project_dir)?;

    let project_file = project_dir.join(format!("{project_name}.gns3"));
    fs::write(&project_file, &json)?;
    info!(output_file = project_file.display().to_string(); "GNS3 project written");

    let configs_dir = write_configs(&configs, &project_dir)?;
    info!(configs_dir = configs_dir.display().to_string(); "Startup configs written");

    if args.stdout {
        println!("{json}");
    }

    Ok(())
}

/// Name of the project folder and file: the lab name, or the input file
/// stem for labs without one.
fn project_name(topology: &Topology, input: &Path) -> Result<String, Eve2GnsError> {
    if !topology.name().is_empty() {
        return Ok(check_file_name(topology.name())?.to_string());
    }
    Ok(input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "lab".to_string()))
}

/// Recreates `<project_dir>/configs` and writes one file per startup config.
fn write_configs(
    configs: &[(&str, &[u8])],
    project_dir: &Path,
) -> Result<PathBuf, Eve2GnsError> {
    let configs_dir = project_dir.join("configs");

    if configs_dir.exists() {
        debug!(path = configs_dir.display().to_string(); "Removing previous configs directory");
        fs::remove_dir_all(&configs_dir)?;
    }
    fs::create_dir_all(&configs_dir)?;

    for &(name, data) in configs {
        let path = configs_dir.join(format!("{name}_startup-config.cfg"));
        debug!(node = name, bytes = data.len(); "Writing startup config");
        fs::write(path, data)?;
    }

    Ok(configs_dir)
}
