use tint_core::{Buf, Sig, SigCtx, SigT};

/// Plays a buffer of samples from the start, jumping back to the start each time the end is
/// reached. There is no crossfade at the loop point.
pub struct LoopPlayback {
    samples: Vec<f32>,
    index: usize,
    buf: Vec<f32>,
}

impl SigT for LoopPlayback {
    type Item = f32;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        self.buf.clear();
        if self.samples.is_empty() {
            self.buf.resize(ctx.num_samples, 0.0);
            return &self.buf;
        }
        while self.buf.len() < ctx.num_samples {
            let remaining = ctx.num_samples - self.buf.len();
            let next_index = (self.index + remaining).min(self.samples.len());
            self.buf
                .extend_from_slice(&self.samples[self.index..next_index]);
            self.index = next_index % self.samples.len();
        }
        &self.buf
    }
}

/// Loop a buffer of samples forever.
pub fn loop_playback(samples: impl Into<Vec<f32>>) -> Sig<LoopPlayback> {
    Sig(LoopPlayback {
        samples: samples.into(),
        index: 0,
        buf: Vec::new(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_vec(sig: &mut Sig<LoopPlayback>, num_samples: usize) -> Vec<f32> {
        let ctx = SigCtx {
            sample_rate_hz: 48_000.0,
            batch_index: 0,
            num_samples,
        };
        let mut out = Vec::new();
        sig.sample(&ctx).clone_to_vec(&mut out);
        out
    }

    #[test]
    fn wraps_to_start() {
        let mut sig = loop_playback(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(sample_vec(&mut sig, 2), vec![1.0, 2.0]);
        assert_eq!(sample_vec(&mut sig, 5), vec![3.0, 1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn batch_longer_than_buffer() {
        let mut sig = loop_playback(vec![0.5f32, -0.5]);
        assert_eq!(
            sample_vec(&mut sig, 7),
            vec![0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5]
        );
    }

    #[test]
    fn empty_buffer_is_silent() {
        let mut sig = loop_playback(Vec::<f32>::new());
        assert_eq!(sample_vec(&mut sig, 3), vec![0.0; 3]);
    }
}
