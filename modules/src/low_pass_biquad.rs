use crate::low_level::biquad_filter::{self, low_pass};
use itertools::izip;
use tint_core::{Buf, Filter, SigCtx, SigT};

/// Resonance used when none is specified. Matches the default Q of a browser biquad filter node.
pub const DEFAULT_RESONANCE: f32 = 1.0;

pub struct Props<C, R>
where
    C: SigT<Item = f32>,
    R: SigT<Item = f32>,
{
    cutoff_hz: C,
    resonance: R,
}

/// A second-order low pass filter with adjustable resonance (in dB).
pub fn low_pass_biquad<C>(cutoff_hz: C) -> Props<C, f32>
where
    C: SigT<Item = f32>,
{
    Props {
        cutoff_hz,
        resonance: DEFAULT_RESONANCE,
    }
}

impl<C, R> Props<C, R>
where
    C: SigT<Item = f32>,
    R: SigT<Item = f32>,
{
    pub fn resonance<X>(self, resonance: X) -> Props<C, X>
    where
        X: SigT<Item = f32>,
    {
        Props {
            cutoff_hz: self.cutoff_hz,
            resonance,
        }
    }
}

impl<C, R> Filter for Props<C, R>
where
    C: SigT<Item = f32>,
    R: SigT<Item = f32>,
{
    type ItemIn = f32;

    type Out<S>
        = LowPassBiquad<S, C, R>
    where
        S: SigT<Item = Self::ItemIn>;

    fn into_sig<S>(self, sig: S) -> Self::Out<S>
    where
        S: SigT<Item = Self::ItemIn>,
    {
        LowPassBiquad {
            state: biquad_filter::State::new(),
            props: self,
            sig,
            buf: Vec::new(),
        }
    }
}

pub struct LowPassBiquad<S, C, R>
where
    S: SigT<Item = f32>,
    C: SigT<Item = f32>,
    R: SigT<Item = f32>,
{
    props: Props<C, R>,
    sig: S,
    state: biquad_filter::State,
    buf: Vec<f32>,
}

impl<S, C, R> SigT for LowPassBiquad<S, C, R>
where
    S: SigT<Item = f32>,
    C: SigT<Item = f32>,
    R: SigT<Item = f32>,
{
    type Item = f32;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        self.buf.resize(ctx.num_samples, 0.0);
        let sig = self.sig.sample(ctx);
        let cutoff_hz = self.props.cutoff_hz.sample(ctx);
        let resonance = self.props.resonance.sample(ctx);
        for (out, sample, cutoff_hz, resonance) in izip! {
            self.buf.iter_mut(),
            sig.iter(),
            cutoff_hz.iter(),
            resonance.iter(),
        } {
            *out = low_pass::run(
                &mut self.state,
                sample as f64,
                ctx.sample_rate_hz as f64,
                cutoff_hz as f64,
                resonance as f64,
            ) as f32;
        }
        &self.buf
    }
}
