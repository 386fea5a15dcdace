//! DAML/CDM JSON converter.
//!
//! The inverse of `cdm_daml_json_converter`: reads a DAML JSON API payload
//! and writes the equivalent CDM JSON document. Global keys are kept.

use anyhow::{Context, Result};
use cdm_converter::cli::{init_logging, MetadataArgs};
use cdm_converter::{convert_daml_file, ConvertConfig, MissingKeyPolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daml_cdm_json_converter", version, about = "DAML/CDM JSON Converter")]
struct Args {
    /// DAML JSON file to convert
    #[arg(short, long)]
    input: PathBuf,

    /// Name of the output CDM JSON file to write
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    metadata: MetadataArgs,
}

/// Application converting one DAML file back into CDM.
pub struct RevertApp {
    input: PathBuf,
    output: PathBuf,
    config: ConvertConfig,
}

impl RevertApp {
    /// Create a new reverse conversion application.
    pub fn new(input: PathBuf, output: PathBuf, config: ConvertConfig) -> Self {

        Self { input, output, config }
    }

    /// Perform the conversion.
    pub fn run(&self) -> Result<()> {

        convert_daml_file(&self.input, &self.output, &self.config).with_context(|| {
            format!(
                "converting {} to {}",
                self.input.display(),
                self.output.display()
            )
        })
    }
}

fn main() -> Result<()> {

    init_logging();
    let args = Args::parse();
    // Key policy only matters when a key is rewritten, which this direction never does.
    let config = args.metadata.into_config(MissingKeyPolicy::default());
    RevertApp::new(args.input, args.output, config).run()

}
