use std::path::Path;

use crate::audio::handle::ToneSink;
use crate::audio::tone::ToneSpec;
use crate::foundation::error::{DoofioError, DoofioResult};

pub(crate) fn check_sample_rate(sample_rate: u32) -> DoofioResult<()> {
    if !(8_000..=192_000).contains(&sample_rate) {
        return Err(DoofioError::audio(format!(
            "sample rate {sample_rate} is outside 8000..=192000"
        )));
    }
    Ok(())
}

/// Tone sink that schedules bursts on a timeline and mixes them offline.
#[derive(Clone, Debug)]
pub struct Mixdown {
    sample_rate: u32,
    channels: u16,
    scheduled: Vec<(u64, ToneSpec)>,
}

impl Mixdown {
    pub fn new(sample_rate: u32, channels: u16) -> DoofioResult<Self> {
        check_sample_rate(sample_rate)?;
        if !(1..=2).contains(&channels) {
            return Err(DoofioError::audio("mixdown supports 1 or 2 channels"));
        }
        Ok(Self {
            sample_rate,
            channels,
            scheduled: Vec::new(),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn scheduled(&self) -> &[(u64, ToneSpec)] {
        &self.scheduled
    }

    /// Length in ms needed to hold every scheduled burst.
    pub fn natural_len_ms(&self) -> u64 {
        self.scheduled
            .iter()
            .map(|(at, t)| at.saturating_add(t.duration_ms()))
            .max()
            .unwrap_or(0)
    }

    fn ms_to_sample(&self, ms: u64) -> u64 {
        let num = u128::from(ms) * u128::from(self.sample_rate);
        (num / 1000) as u64
    }

    /// Mix all bursts into interleaved PCM covering `[0, len_ms)`. Bursts are truncated at the end
    /// and the sum is clamped to `[-1, 1]`.
    pub fn render(&self, len_ms: u64) -> DoofioResult<Vec<f32>> {
        let frames = self.ms_to_sample(len_ms) as usize;
        let ch = usize::from(self.channels);
        let mut out = vec![0.0f32; frames * ch];

        for (at_ms, tone) in &self.scheduled {
            let start = self.ms_to_sample(*at_ms) as usize;
            if start >= frames {
                continue;
            }
            let pcm = tone.synthesize(self.sample_rate)?;
            for (i, v) in pcm.iter().enumerate() {
                let dst = start + i;
                if dst >= frames {
                    break;
                }
                for c in 0..ch {
                    out[dst * ch + c] += v;
                }
            }
        }

        for s in &mut out {
            *s = s.clamp(-1.0, 1.0);
        }
        Ok(out)
    }

    /// Mix and write a 32-bit float WAV file.
    #[tracing::instrument(skip(self), fields(tones = self.scheduled.len()))]
    pub fn write_wav(&self, out_path: &Path, len_ms: u64) -> DoofioResult<()> {
        let samples = self.render(len_ms)?;
        write_wav_f32(&samples, self.sample_rate, self.channels, out_path)
    }
}

impl ToneSink for Mixdown {
    fn play(&mut self, at_ms: u64, tone: &ToneSpec) -> DoofioResult<()> {
        if !(tone.duration_secs.is_finite() && tone.duration_secs > 0.0) {
            return Err(DoofioError::audio("tone duration must be > 0"));
        }
        self.scheduled.push((at_ms, *tone));
        Ok(())
    }
}

/// Write interleaved `f32` PCM samples as a WAV file.
pub fn write_wav_f32(
    samples_interleaved: &[f32],
    sample_rate: u32,
    channels: u16,
    out_path: &Path,
) -> DoofioResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DoofioError::audio(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let wav_err = |e: hound::Error| {
        DoofioError::audio(format!(
            "failed to write wav file '{}': {e}",
            out_path.display()
        ))
    };
    let mut writer = hound::WavWriter::create(out_path, spec).map_err(wav_err)?;
    for &s in samples_interleaved {
        writer.write_sample(s).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
