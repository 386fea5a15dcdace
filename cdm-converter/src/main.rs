//! CDM/DAML JSON converter.
//!
//! Loads a CDM JSON event, overwrites its `meta.globalKey` so the same
//! contract can be loaded many times without key clashes, and writes the
//! DAML JSON API form of the event.

use anyhow::{Context, Result};
use cdm_converter::cli::{init_logging, MetadataArgs, MissingKeyArg};
use cdm_converter::{convert_cdm_file, ConvertConfig, RandomKeys};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cdm_daml_json_converter", version, about = "CDM/DAML JSON Converter")]
struct Args {
    /// CDM JSON file to convert
    #[arg(short, long)]
    input: PathBuf,

    /// Name of the output JSON file to write
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    metadata: MetadataArgs,

    /// What to do when the input has no meta.globalKey
    #[arg(long, value_enum, default_value_t = MissingKeyArg::Fail)]
    missing_key: MissingKeyArg,
}

/// Application converting one CDM file into one DAML file.
pub struct ConvertApp {
    input: PathBuf,
    output: PathBuf,
    config: ConvertConfig,
}

impl ConvertApp {
    /// Create a new conversion application.
    pub fn new(input: PathBuf, output: PathBuf, config: ConvertConfig) -> Self {

        Self { input, output, config }
    }

    /// Execute the conversion process.
    pub fn run(&self) -> Result<()> {

        let mut keys = RandomKeys::default();
        let key = convert_cdm_file(&self.input, &self.output, &self.config, &mut keys)
            .with_context(|| {
                format!(
                    "converting {} to {}",
                    self.input.display(),
                    self.output.display()
                )
            })?;
        info!("wrote {} with globalKey {key}", self.output.display());
        Ok(())
    }
}

fn main() -> Result<()> {

    init_logging();
    let args = Args::parse();
    let config = args.metadata.into_config(args.missing_key.into());
    ConvertApp::new(args.input, args.output, config).run()

}
