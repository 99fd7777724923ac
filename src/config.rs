use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Fps, Viewport};
use crate::foundation::error::{DoofioError, DoofioResult};
use crate::starfield::particle::StarfieldConfig;
use crate::typewriter::script::Script;
use crate::typewriter::sequencer::TypewriterTiming;

/// Sound settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Initial state of the sound toggle.
    pub sound_enabled: bool,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sample_rate: 48_000,
            channels: 2,
        }
    }
}

/// Everything needed to mount and render the welcome screen.
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WelcomeConfig {
    pub viewport: Viewport,
    pub fps: Fps,
    /// Length of an offline render.
    pub duration_ms: u64,
    /// Seed for star placement and click pitches.
    pub seed: u64,
    /// From mount to the page counting as loaded (content fades in, typewriter starts).
    pub load_delay_ms: u64,
    pub starfield: StarfieldConfig,
    pub script: Script,
    pub typewriter: TypewriterTiming,
    pub audio: AudioConfig,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            fps: Fps::default(),
            duration_ms: 6_000,
            seed: 0x0d00_f10,
            load_delay_ms: 500,
            starfield: StarfieldConfig::default(),
            script: Script::default(),
            typewriter: TypewriterTiming::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl WelcomeConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> DoofioResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| DoofioError::serde(format!("parse welcome config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> DoofioResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> DoofioResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DoofioError::validation(format!("open welcome config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> DoofioResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        self.starfield.validate()?;
        self.script.validate()?;
        self.typewriter.validate()?;
        crate::audio::mix::check_sample_rate(self.audio.sample_rate)
            .map_err(|e| DoofioError::validation(e.to_string()))?;
        if !(1..=2).contains(&self.audio.channels) {
            return Err(DoofioError::validation("audio channels must be 1 or 2"));
        }
        Ok(())
    }

    /// Total time until the buttons show, measured from mount.
    pub fn reveal_len_ms(&self) -> u64 {
        let timing = &self.typewriter;
        let chars: u64 = (0..self.script.len())
            .map(|i| self.script.line_chars(i) as u64)
            .sum();
        let lines = self.script.len() as u64;
        self.load_delay_ms
            .saturating_add(timing.initial_delay_ms)
            .saturating_add(timing.char_interval_ms.saturating_mul(chars))
            .saturating_add(timing.line_pause_ms.saturating_mul(lines.saturating_sub(1)))
            .saturating_add(timing.final_pause_ms)
    }

    pub fn to_json_pretty(&self) -> DoofioResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DoofioError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
