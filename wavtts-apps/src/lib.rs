#![doc = include_str!("../README.md")]

mod app_config;
mod cli;
mod error;
pub mod utils;

pub use app_config::*;
pub use cli::*;
pub use error::*;

use std::path::Path;

use tracing::debug;
use wavtts::{verify_wav, Synthesizer, WavSummary};

/// Renders `text` into `path` with `synthesizer` and checks the written file.
///
/// The synthesizer is consumed: it is released as soon as its work is done.
pub async fn synthesize(
    synthesizer: impl Synthesizer,
    text: &str,
    path: &Path,
) -> Result<WavSummary, Error> {
    synthesizer.synthesize_to_file(text, path)?.await?;
    drop(synthesizer);
    debug!(?path, "synthesis finished");
    Ok(verify_wav(path)?)
}

/// Runs `text2wav` with parsed arguments and configuration.
pub async fn run(args: &Args, config: &AppConfig) -> Result<WavSummary, Error> {
    let text = args
        .text
        .to_str()
        .ok_or_else(|| Error::InvalidText(args.text.clone()))?;
    let synthesizer = config.create_synthesizer();
    synthesize(synthesizer, text, &args.output_path).await
}
