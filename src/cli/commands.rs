//! Command dispatch: resolve settings, generate, print the summary

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument, warn};

use crate::application::ForestGenerator;
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::domain::{ForestShape, NodeLabeler};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    if cli.init_config {
        let path = init_config(cli)?;
        output::info(&format!("Created config template: {}", path.display()));
        return Ok(());
    }

    let settings = resolve_settings(cli)?;
    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let path = cli
        .output
        .as_deref()
        .ok_or_else(|| CliError::Usage("missing output file".into()))?;
    let line = run_generate(path, cli.shape(), &settings)?;
    output::info(&line);
    Ok(())
}

/// Layered settings with command line flags applied last.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(prefix) = cli.prefix {
        settings.prefix = prefix;
    }
    if let Some(format) = cli.format {
        settings.format = format;
    }
    settings.validate()?;
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

/// Write the config template to `--config`, or to the global location.
pub fn init_config(cli: &Cli) -> CliResult<PathBuf> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => config::global_config_path()
            .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?,
    };
    Settings::write_template(&path)?;
    Ok(path)
}

/// Write the forest and return the summary line.
///
/// The edge total in the summary is the closed form, cross-checked against
/// the rows actually written.
#[instrument(skip(settings))]
pub fn run_generate(path: &Path, shape: ForestShape, settings: &Settings) -> CliResult<String> {
    let expected = shape
        .expected_edges()
        .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    info!(
        "generating {}: {} edges expected, seed {}",
        shape, expected, settings.seed
    );
    if shape.reference_total() != Some(expected) {
        debug!(
            "legacy summary formula gives {:?}, real edge count is {}",
            shape.reference_total(),
            expected
        );
    }

    let stats = ForestGenerator::new(shape)
        .with_labeler(NodeLabeler::new(settings.prefix)?)
        .with_format(settings.format)
        .generate_file(path, settings.seed)?;

    if stats.edges != expected {
        warn!(
            "wrote {} edges but closed form predicts {}",
            stats.edges, expected
        );
    }

    Ok(format!("Generated {}, {} edges in total.", shape, expected))
}
