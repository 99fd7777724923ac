use crate::audio::handle::{AudioHandle, ToneSink};
use crate::config::WelcomeConfig;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::DoofioResult;
use crate::page::view::{WelcomeView, render_view};
use crate::render::surface::{DrawSurface, FrameRGBA};
use crate::starfield::field::Starfield;
use crate::typewriter::sequencer::{Sequencer, TimedEvent, TypewriterState};

/// A mounted welcome page.
///
/// The page owns its drawing surface and audio handle for its whole lifetime; [`unmount`]
/// consumes it, so no frame or resize callback can reach a page that is gone.
///
/// [`unmount`]: WelcomePage::unmount
pub struct WelcomePage<S> {
    config: WelcomeConfig,
    mounted_at_ms: u64,
    now_ms: u64,
    loaded: bool,
    pointer: Point,
    surface: Option<Box<dyn DrawSurface>>,
    starfield: Option<Starfield>,
    sequencer: Sequencer,
    audio: AudioHandle<S>,
}

impl<S: ToneSink> WelcomePage<S> {
    /// Mount at `now_ms`. Without a surface the starfield is skipped entirely; everything else
    /// runs as usual.
    #[tracing::instrument(skip_all, fields(viewport = ?config.viewport, now_ms = now_ms))]
    pub fn mount(
        config: WelcomeConfig,
        surface: Option<Box<dyn DrawSurface>>,
        mut audio: AudioHandle<S>,
        now_ms: u64,
    ) -> DoofioResult<Self> {
        config.validate()?;

        let mut surface = surface;
        if let Some(s) = surface.as_mut() {
            s.resize(config.viewport);
        }
        let starfield = match surface {
            Some(_) => Some(Starfield::new(
                config.starfield.clone(),
                config.viewport,
                config.seed,
            )?),
            None => {
                tracing::debug!("no drawing surface, starfield disabled");
                None
            }
        };
        let sequencer = Sequencer::new(config.script.clone(), config.typewriter)?;
        audio.set_muted(!config.audio.sound_enabled);
        if !audio.is_available() {
            tracing::debug!("audio unavailable, tone cues disabled");
        }

        Ok(Self {
            mounted_at_ms: now_ms,
            now_ms,
            loaded: false,
            pointer: Point::ZERO,
            surface,
            starfield,
            sequencer,
            audio,
            config,
        })
    }

    pub fn config(&self) -> &WelcomeConfig {
        &self.config
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn typewriter(&self) -> &TypewriterState {
        self.sequencer.state()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    pub fn audio(&self) -> &AudioHandle<S> {
        &self.audio
    }

    pub fn sound_enabled(&self) -> bool {
        !self.audio.is_muted()
    }

    /// Advance timers to `now_ms`: the load flag, then the typewriter.
    pub fn tick(&mut self, now_ms: u64) -> Vec<TimedEvent> {
        self.now_ms = self.now_ms.max(now_ms);

        let load_at = self.mounted_at_ms.saturating_add(self.config.load_delay_ms);
        if !self.loaded && self.now_ms >= load_at {
            self.loaded = true;
            self.sequencer.start(load_at);
        }
        self.sequencer.advance(self.now_ms, &mut self.audio)
    }

    /// One animation-frame callback: advance and paint the starfield.
    pub fn animation_frame(&mut self) {
        if let (Some(field), Some(surface)) = (self.starfield.as_mut(), self.surface.as_mut()) {
            field.render(surface.as_mut());
        }
    }

    /// Viewport resize: the surface follows, particles are kept.
    pub fn resize(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
        if let Some(field) = self.starfield.as_mut() {
            field.resize(viewport);
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
    }

    /// Flip the sound toggle. Returns whether sound is now enabled.
    pub fn toggle_sound(&mut self) -> bool {
        !self.audio.toggle_muted()
    }

    pub fn surface_size(&self) -> Option<Viewport> {
        self.surface.as_ref().map(|s| s.size())
    }

    /// Current starfield pixels, when the surface keeps them.
    pub fn snapshot(&mut self) -> Option<FrameRGBA> {
        self.surface.as_mut().and_then(|s| s.snapshot())
    }

    pub fn view(&self) -> WelcomeView {
        render_view(
            self.sequencer.state(),
            self.loaded,
            self.sound_enabled(),
            self.pointer,
        )
    }

    /// Release the page: the surface is dropped and the audio handle closed and handed back.
    pub fn unmount(mut self) -> AudioHandle<S> {
        self.audio.close();
        tracing::debug!(
            now_ms = self.now_ms,
            frames = self.starfield.as_ref().map_or(0, |f| f.frames()),
            "welcome page unmounted"
        );
        self.audio
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/welcome.rs"]
mod tests;
