use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::debug;

use crate::{error::Error, traits::Synthesizer, WaitFuture};

/// Sample rate of the files written by [`DummySynthesizer`].
pub const DUMMY_SAMPLE_RATE: u32 = 16_000;
/// Number of silent samples written per character of text (50 ms).
pub const DUMMY_SAMPLES_PER_CHAR: u32 = DUMMY_SAMPLE_RATE / 20;

/// Dummy Synthesizer for debug or tests.
///
/// Writes a mono 16-bit silent WAV whose length is proportional to the
/// number of characters in the text. The output only depends on the text.
#[derive(Debug, Default)]
pub struct DummySynthesizer {
    pub last_request: Mutex<Option<(String, PathBuf)>>,
}

impl DummySynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_request(&self) -> Option<(String, PathBuf)> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Synthesizer for DummySynthesizer {
    fn synthesize_to_file(&self, text: &str, path: &Path) -> Result<WaitFuture, Error> {
        *self.last_request.lock().unwrap() = Some((text.to_string(), path.to_path_buf()));
        write_silence(path, sample_count(text.chars().count()))?;
        Ok(WaitFuture::ready())
    }
}

// at least one block so that empty text still yields audio
fn sample_count(chars: usize) -> u32 {
    u32::try_from(chars)
        .unwrap_or(u32::MAX)
        .max(1)
        .saturating_mul(DUMMY_SAMPLES_PER_CHAR)
}

fn write_silence(path: &Path, samples: u32) -> Result<(), Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: DUMMY_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    debug!(?path, samples, "writing silent wav");

    let mut writer = hound::WavWriter::create(path, spec)?;
    for _ in 0..samples {
        writer.write_sample(0i16)?;
    }
    writer.finalize()?;
    Ok(())
}
