use crate::{mix, output::AudioOutput, session::PlaybackSession};
use tint_modules::NOISE_BUFFER_DURATION_S;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// default: 0.08
    pub gain: f32,
    /// default: 2.0
    pub buffer_duration_s: f32,
    /// Time taken for the filters to reach new cutoffs after the mix changes. At 0 the
    /// cutoffs jump, which can be audible as a click on large changes.
    /// default: 0.0
    pub mix_ramp_s: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gain: 0.08,
            buffer_duration_s: NOISE_BUFFER_DURATION_S,
            mix_ramp_s: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

impl PlayState {
    /// Text for a button that toggles playback from this state.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Stopped => "Play",
            Self::Playing => "Pause",
        }
    }
}

/// Owns the (at most one) playback session and the output it plays on. The output is opened the
/// first time playback starts and then reused for every later session.
pub struct NoiseController<O: AudioOutput> {
    config: Config,
    open_output: Box<dyn FnMut() -> anyhow::Result<O>>,
    output: Option<O>,
    session: Option<PlaybackSession<O::Stream>>,
}

impl<O: AudioOutput> NoiseController<O> {
    pub fn new<F>(config: Config, open_output: F) -> Self
    where
        F: FnMut() -> anyhow::Result<O> + 'static,
    {
        Self {
            config,
            open_output: Box::new(open_output),
            output: None,
            session: None,
        }
    }

    pub fn state(&self) -> PlayState {
        if self.session.is_some() {
            PlayState::Playing
        } else {
            PlayState::Stopped
        }
    }

    pub fn session(&self) -> Option<&PlaybackSession<O::Stream>> {
        self.session.as_ref()
    }

    /// The output, if it has been opened.
    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    /// Start playing with a fresh noise buffer. Does nothing if already playing. On failure the
    /// controller remains stopped.
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.session.is_some() {
            log::debug!("start requested while already playing");
            return Ok(());
        }
        let mut output = match self.output.take() {
            Some(output) => output,
            None => {
                log::info!("opening audio output");
                (self.open_output)()?
            }
        };
        let session = PlaybackSession::start(&mut output, &self.config);
        self.output = Some(output);
        self.session = Some(session?);
        log::info!("playing (gain {})", self.config.gain);
        Ok(())
    }

    /// Stop playing and discard the session. Does nothing if already stopped.
    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            log::info!("stopped");
        }
    }

    pub fn toggle(&mut self) -> anyhow::Result<PlayState> {
        match self.state() {
            PlayState::Stopped => self.start()?,
            PlayState::Playing => self.stop(),
        }
        Ok(self.state())
    }

    /// Apply a mix value (0 = brown, 0.5 = pink, 1 = white) to the live session. Ignored when
    /// stopped.
    pub fn update_mix(&mut self, value: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(sanitized) = mix::sanitize(value) else {
            log::warn!("ignoring mix value {}", value);
            return;
        };
        if sanitized != value {
            log::warn!("mix value {} clamped to {}", value, sanitized);
        }
        let cutoffs = mix::cutoffs(sanitized);
        log::debug!(
            "mix {}: pink cutoff {}Hz, brown cutoff {}Hz",
            sanitized,
            cutoffs.pink_hz,
            cutoffs.brown_hz
        );
        session.set_cutoffs(cutoffs);
    }
}
