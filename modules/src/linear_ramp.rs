use tint_core::{Buf, Sig, SigCtx, SigT};

pub struct LinearRamp {
    from: f32,
    to: f32,
    duration_s: f32,
    elapsed_samples: u64,
    buf: Vec<f32>,
}

impl SigT for LinearRamp {
    type Item = f32;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        let duration_samples = self.duration_s * ctx.sample_rate_hz;
        self.buf.resize(ctx.num_samples, 0.0);
        for out in self.buf.iter_mut() {
            let elapsed = self.elapsed_samples as f32;
            *out = if elapsed >= duration_samples {
                self.to
            } else {
                self.elapsed_samples += 1;
                self.from + ((self.to - self.from) * (elapsed / duration_samples))
            };
        }
        &self.buf
    }
}

/// Moves linearly from `from` to `to` over `duration_s` seconds and then holds `to`.
pub fn linear_ramp(from: f32, to: f32, duration_s: f32) -> Sig<LinearRamp> {
    Sig(LinearRamp {
        from,
        to,
        duration_s,
        elapsed_samples: 0,
        buf: Vec::new(),
    })
}
