use rand::Rng;
use std::f32::consts::TAU;

use crate::foundation::error::DoofioResult;

/// Level the exponential decay lands on at the end of a burst.
pub const DECAY_FLOOR_GAIN: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Waveform {
    Sine,
    Square,
}

impl Waveform {
    /// Sample at `phase` in cycles.
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Self::Sine => (phase * TAU).sin(),
            Self::Square => {
                if phase.fract() < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Which cue a tone was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToneCue {
    /// One revealed character.
    Click,
    /// One completed line.
    Chime,
}

/// A short synthesized burst: linear attack to `peak_gain`, exponential decay to
/// [`DECAY_FLOOR_GAIN`] at `duration_secs`, frequency swept linearly over `sweep_secs`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToneSpec {
    pub cue: ToneCue,
    pub waveform: Waveform,
    pub freq_start_hz: f32,
    pub freq_end_hz: f32,
    pub sweep_secs: f32,
    pub peak_gain: f32,
    pub attack_secs: f32,
    pub duration_secs: f32,
}

impl ToneSpec {
    /// Typing click: square wave, pitch drawn from `[800, 1200)` Hz, 50 ms.
    pub fn click(rng: &mut impl Rng) -> Self {
        let freq = 800.0 + rng.r#gen::<f32>() * 400.0;
        Self {
            cue: ToneCue::Click,
            waveform: Waveform::Square,
            freq_start_hz: freq,
            freq_end_hz: freq,
            sweep_secs: 0.0,
            peak_gain: 0.02,
            attack_secs: 0.01,
            duration_secs: 0.05,
        }
    }

    /// Line-complete chime: sine rising 600 -> 800 Hz over 100 ms, 200 ms total.
    pub fn chime() -> Self {
        Self {
            cue: ToneCue::Chime,
            waveform: Waveform::Sine,
            freq_start_hz: 600.0,
            freq_end_hz: 800.0,
            sweep_secs: 0.1,
            peak_gain: 0.03,
            attack_secs: 0.01,
            duration_secs: 0.2,
        }
    }

    pub fn for_cue(cue: ToneCue, rng: &mut impl Rng) -> Self {
        match cue {
            ToneCue::Click => Self::click(rng),
            ToneCue::Chime => Self::chime(),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        (f64::from(self.duration_secs) * 1000.0).round() as u64
    }

    pub fn frequency_at(&self, t: f32) -> f32 {
        if self.sweep_secs <= 0.0 || t >= self.sweep_secs {
            return self.freq_end_hz;
        }
        let u = (t / self.sweep_secs).clamp(0.0, 1.0);
        self.freq_start_hz + (self.freq_end_hz - self.freq_start_hz) * u
    }

    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration_secs || self.peak_gain <= 0.0 {
            return 0.0;
        }
        if t < self.attack_secs {
            return self.peak_gain * (t / self.attack_secs);
        }
        let decay = (self.duration_secs - self.attack_secs).max(f32::EPSILON);
        let u = ((t - self.attack_secs) / decay).clamp(0.0, 1.0);
        self.peak_gain * (DECAY_FLOOR_GAIN / self.peak_gain).powf(u)
    }

    /// Render the burst as mono PCM.
    pub fn synthesize(&self, sample_rate: u32) -> DoofioResult<Vec<f32>> {
        crate::audio::mix::check_sample_rate(sample_rate)?;
        let sr = sample_rate as f32;
        let len = (self.duration_secs * sr).round().max(0.0) as usize;

        let mut out = Vec::with_capacity(len);
        let mut phase = 0.0f32;
        for i in 0..len {
            let t = i as f32 / sr;
            out.push(self.waveform.sample(phase) * self.gain_at(t));
            phase = (phase + self.frequency_at(t) / sr).fract();
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/tone.rs"]
mod tests;
