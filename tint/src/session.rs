use crate::{Config, mix::Cutoffs, output::AudioOutput};
use tint_core::{CellF32, SigT, cell_f32};
use tint_modules::{
    linear_ramp, loop_playback, low_pass_biquad, noise_buffer_with_duration,
};

/// Resonance (dB) of the first low-pass stage.
pub const PINK_RESONANCE: f32 = 1.0;

/// Resonance (dB) of the second low-pass stage.
pub const BROWN_RESONANCE: f32 = 0.7;

/// Everything that exists while noise is playing: a looping white noise source feeding two
/// low-pass stages in series, then a fixed gain. Dropping the session stops playback and frees
/// the noise buffer.
pub struct PlaybackSession<T> {
    pink_cutoff_hz: CellF32,
    brown_cutoff_hz: CellF32,
    cutoffs: Cutoffs,
    gain: f32,
    mix_ramp_s: f32,
    _stream: T,
}

impl<T> PlaybackSession<T> {
    pub fn start<O>(output: &mut O, config: &Config) -> anyhow::Result<Self>
    where
        O: AudioOutput<Stream = T>,
    {
        let noise = noise_buffer_with_duration(
            output.sample_rate_hz(),
            config.buffer_duration_s,
        );
        log::debug!("created noise buffer of {} samples", noise.len());
        let cutoffs = Cutoffs::INITIAL;
        let pink_cutoff_hz = cell_f32(cutoffs.pink_hz);
        let brown_cutoff_hz = cell_f32(cutoffs.brown_hz);
        let sig = loop_playback(noise)
            .filter(
                low_pass_biquad(pink_cutoff_hz.clone())
                    .resonance(PINK_RESONANCE),
            )
            .filter(
                low_pass_biquad(brown_cutoff_hz.clone())
                    .resonance(BROWN_RESONANCE),
            )
            .gain(config.gain);
        let stream = output.play(sig.boxed())?;
        Ok(Self {
            pink_cutoff_hz,
            brown_cutoff_hz,
            cutoffs,
            gain: config.gain,
            mix_ramp_s: config.mix_ramp_s,
            _stream: stream,
        })
    }

    /// The cutoffs most recently applied. When ramping is enabled these are the values the
    /// filters are moving towards.
    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    /// The cutoffs the filters were using at the end of the most recently computed batch. Before
    /// any audio has been computed this is the same as `cutoffs`.
    pub fn current_cutoffs(&self) -> Cutoffs {
        Cutoffs {
            pink_hz: self
                .pink_cutoff_hz
                .latest()
                .unwrap_or(self.cutoffs.pink_hz),
            brown_hz: self
                .brown_cutoff_hz
                .latest()
                .unwrap_or(self.cutoffs.brown_hz),
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Retune both filters. Takes effect from the next batch of samples the audio thread
    /// computes.
    pub fn set_cutoffs(&mut self, cutoffs: Cutoffs) {
        if self.mix_ramp_s > 0.0 {
            // start from wherever the filters are now so interrupting a ramp doesn't jump
            let current = self.current_cutoffs();
            self.pink_cutoff_hz.set(linear_ramp(
                current.pink_hz,
                cutoffs.pink_hz,
                self.mix_ramp_s,
            ));
            self.brown_cutoff_hz.set(linear_ramp(
                current.brown_hz,
                cutoffs.brown_hz,
                self.mix_ramp_s,
            ));
        } else {
            self.pink_cutoff_hz.set(cutoffs.pink_hz);
            self.brown_cutoff_hz.set(cutoffs.brown_hz);
        }
        self.cutoffs = cutoffs;
    }
}
