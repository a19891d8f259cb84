use std::{cell::RefCell, rc::Rc};
use tint_core::{Sig, SigBoxed, SigCtx, SigSampleIntoBufT};
use tint_player::{Player, PlayerHandle};

/// Somewhere a signal can be played. Playback continues until the returned stream is dropped.
pub trait AudioOutput {
    type Stream;

    fn sample_rate_hz(&self) -> f32;

    fn play(&mut self, sig: Sig<SigBoxed<f32>>) -> anyhow::Result<Self::Stream>;
}

impl AudioOutput for Player {
    type Stream = PlayerHandle;

    fn sample_rate_hz(&self) -> f32 {
        Player::sample_rate_hz(self)
    }

    fn play(&mut self, sig: Sig<SigBoxed<f32>>) -> anyhow::Result<Self::Stream> {
        self.play_mono(sig)
    }
}

struct Playing {
    stream_id: u64,
    sig: Sig<SigBoxed<f32>>,
    batch_index: u64,
}

#[derive(Default)]
struct OfflineState {
    playing: Option<Playing>,
    next_stream_id: u64,
}

/// An output that renders into memory on request rather than to a device. Clones share the
/// same playback state, so one clone can be handed to a controller while another is used to
/// pull samples out.
#[derive(Clone)]
pub struct Offline {
    sample_rate_hz: f32,
    state: Rc<RefCell<OfflineState>>,
}

pub struct OfflineStream {
    stream_id: u64,
    state: Rc<RefCell<OfflineState>>,
}

impl Drop for OfflineStream {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if state
            .playing
            .as_ref()
            .is_some_and(|playing| playing.stream_id == self.stream_id)
        {
            state.playing = None;
        }
    }
}

impl Offline {
    pub fn new(sample_rate_hz: f32) -> Self {
        Self {
            sample_rate_hz,
            state: Default::default(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing.is_some()
    }

    /// Compute the next `num_samples` samples of the signal currently playing, or `None` if
    /// nothing is playing.
    pub fn render(&self, num_samples: usize) -> Option<Vec<f32>> {
        let mut state = self.state.borrow_mut();
        let playing = state.playing.as_mut()?;
        let ctx = SigCtx {
            sample_rate_hz: self.sample_rate_hz,
            batch_index: playing.batch_index,
            num_samples,
        };
        let mut out = Vec::with_capacity(num_samples);
        playing.sig.sample_into_buf(&ctx, &mut out);
        playing.batch_index += 1;
        Some(out)
    }
}

impl AudioOutput for Offline {
    type Stream = OfflineStream;

    fn sample_rate_hz(&self) -> f32 {
        self.sample_rate_hz
    }

    fn play(&mut self, sig: Sig<SigBoxed<f32>>) -> anyhow::Result<Self::Stream> {
        let mut state = self.state.borrow_mut();
        let stream_id = state.next_stream_id;
        state.next_stream_id += 1;
        state.playing = Some(Playing {
            stream_id,
            sig,
            batch_index: 0,
        });
        Ok(OfflineStream {
            stream_id,
            state: Rc::clone(&self.state),
        })
    }
}
