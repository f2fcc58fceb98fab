use std::path::Path;

use anyhow::Context;

use super::frame::StereoFrame;

#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // decoded audio, already at the output rate
}

impl SampleBuffer {
    pub fn from_frames(data: Vec<StereoFrame>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Load a WAV file from disk, converted to stereo f32 at `target_rate`
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let spec = reader.spec();
        let file_rate = spec.sample_rate;
        let file_channels = spec.channels as usize;
        if file_channels == 0 {
            anyhow::bail!("{} has no channels", path.display());
        }

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader // float, just pass it through
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => { // int, scale into -1..1
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
            #[allow(unreachable_patterns)]
            _ => anyhow::bail!("unsupported sample format: {:?}", spec.sample_format),
        };

        // mono gets duplicated, anything wider keeps its first two channels
        let frames: Vec<StereoFrame> = if file_channels == 1 {
            samples.into_iter().map(StereoFrame::mono).collect()
        } else {
            samples
                .chunks_exact(file_channels)
                .map(|c| StereoFrame { left: c[0], right: c[1] })
                .collect()
        };

        tracing::debug!(
            path = %path.display(),
            file_rate,
            target_rate,
            frames = frames.len(),
            "decoded wav"
        );

        Ok(Self { data: resample_linear(&frames, file_rate, target_rate) })
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || source_rate == 0 || target_rate == 0 {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio; // fractional position in the source
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx >= frames.len().saturating_sub(1) { // past the last pair, hold the tail
            out.push(frames.last().copied().unwrap_or_default());
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_mono_is_duplicated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kick.wav");
        write_wav(&path, 1, 44100, &[0, 16384, -16384]);

        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.data[1], StereoFrame::mono(0.5));
        assert_eq!(buf.data[2], StereoFrame::mono(-0.5));
    }

    #[test]
    fn test_stereo_keeps_sides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snare.wav");
        write_wav(&path, 2, 48000, &[16384, -16384, 0, 8192]);

        let buf = SampleBuffer::load_wav(&path, 48000).unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.data[0], StereoFrame { left: 0.5, right: -0.5 });
        assert_eq!(buf.data[1], StereoFrame { left: 0.0, right: 0.25 });
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SampleBuffer::load_wav(&dir.path().join("nope.wav"), 44100).unwrap_err();
        assert!(err.to_string().contains("nope.wav"));
    }

    #[test]
    fn test_resample_scales_length() {
        let frames: Vec<StereoFrame> = (0..100).map(|i| StereoFrame::mono(i as f32)).collect();
        let up = resample_linear(&frames, 24000, 48000);
        assert_eq!(up.len(), 200);
        assert_eq!(up[1], StereoFrame::mono(0.5)); // halfway between 0 and 1
        let down = resample_linear(&frames, 48000, 24000);
        assert_eq!(down.len(), 50);
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample_linear(&[], 22050, 44100).is_empty());
    }
}
