use std::path::Path;

use tracing::warn;

use crate::error::Error;

/// Format of a WAV file as read back from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSummary {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Number of samples per channel.
    pub samples: u32,
}

impl WavSummary {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        f64::from(self.samples) / f64::from(self.sample_rate)
    }
}

/// Checks that `path` holds a readable WAV file and returns its format.
///
/// A file without any sample is accepted (some engines render empty text
/// that way), but a warning is emitted.
pub fn verify_wav(path: &Path) -> Result<WavSummary, Error> {
    let reader = hound::WavReader::open(path).map_err(|e| Error::InvalidOutput {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let spec = reader.spec();
    let summary = WavSummary {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        samples: reader.duration(),
    };
    if summary.samples == 0 {
        warn!(?path, "wav file contains no samples");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_wav(path: &Path, sample_rate: u32, samples: u32) {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..samples * 2 {
            writer.write_sample(1i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_verify_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.wav");
        write_wav(&path, 8_000, 4_000);

        let summary = verify_wav(&path).unwrap();
        assert_eq!(
            summary,
            WavSummary {
                channels: 2,
                sample_rate: 8_000,
                bits_per_sample: 16,
                samples: 4_000,
            }
        );
        assert!((summary.duration_secs() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_verify_empty_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.wav");
        write_wav(&path, 22_050, 0);

        assert_eq!(verify_wav(&path).unwrap().samples, 0);
    }

    #[test]
    fn test_verify_not_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.wav");
        fs::write(&path, "not a riff file").unwrap();

        let err = verify_wav(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidOutput { .. }), "{err:?}");
    }

    #[test]
    fn test_verify_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_wav(&dir.path().join("none.wav")).unwrap_err();
        assert!(matches!(err, Error::InvalidOutput { .. }), "{err:?}");
    }
}
