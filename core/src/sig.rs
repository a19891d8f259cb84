use std::{iter, marker::PhantomData};

#[derive(Clone, Copy, Debug)]
pub struct SigCtx {
    pub sample_rate_hz: f32,
    pub batch_index: u64,
    pub num_samples: usize,
}

pub trait Buf<T>
where
    T: Clone,
{
    fn iter(&self) -> impl Iterator<Item = T>;

    /// Clears `out` and populates it with the contents of `self`.
    fn clone_to_vec(&self, out: &mut Vec<T>) {
        out.clear();
        for x in self.iter() {
            out.push(x);
        }
    }
}

impl<T> Buf<T> for &Vec<T>
where
    T: Clone,
{
    fn iter(&self) -> impl Iterator<Item = T> {
        self.as_slice().iter().cloned()
    }

    fn clone_to_vec(&self, out: &mut Vec<T>) {
        out.clear();
        out.extend_from_slice(self);
    }
}

pub struct ConstBuf<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Buf<T> for ConstBuf<T>
where
    T: Clone,
{
    fn iter(&self) -> impl Iterator<Item = T> {
        iter::repeat_n(&self.value, self.count).cloned()
    }

    fn clone_to_vec(&self, out: &mut Vec<T>) {
        out.clear();
        out.resize(self.count, self.value.clone());
    }
}

/// Used to implement `map` by deferring the mapped function until the iteration of the following
/// operation, preventing the need to buffer the result of the map.
pub struct MapBuf<B, F, I, O>
where
    I: Clone,
    O: Clone,
    B: Buf<I>,
    F: Fn(I) -> O,
{
    buf: B,
    f: F,
    phantom: PhantomData<(I, O)>,
}

impl<B, F, I, O> MapBuf<B, F, I, O>
where
    I: Clone,
    O: Clone,
    B: Buf<I>,
    F: Fn(I) -> O,
{
    pub fn new(buf: B, f: F) -> Self {
        Self {
            buf,
            f,
            phantom: PhantomData,
        }
    }
}

impl<B, F, I, O> Buf<O> for MapBuf<B, F, I, O>
where
    I: Clone,
    O: Clone,
    B: Buf<I>,
    F: Fn(I) -> O,
{
    fn iter(&self) -> impl Iterator<Item = O> {
        self.buf.iter().map(&self.f)
    }
}

/// A signal with values produced for each audio sample. Values are produced in batches of a size
/// determined by the audio driver. Control values such as filter cutoffs are also signals so they
/// can change smoothly at the audio sample rate.
pub trait SigT {
    type Item: Clone;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item>;

    fn filter<F>(self, filter: F) -> Sig<F::Out<Self>>
    where
        F: Filter<ItemIn = Self::Item>,
        Self: Sized,
    {
        Sig(filter.into_sig(self))
    }
}

/// Similar to `SigT` but less flexible as it needs to populate a `Vec`. However this trait is
/// possible to be boxed allowing for type erasure.
pub trait SigSampleIntoBufT {
    type Item: Clone;

    fn sample_into_buf(&mut self, ctx: &SigCtx, buf: &mut Vec<Self::Item>);
}

impl SigT for f32 {
    type Item = Self;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        ConstBuf {
            value: *self,
            count: ctx.num_samples,
        }
    }
}

/// Wrapper type for the `SigT` trait so combinators can be implemented as inherent methods.
#[derive(Clone)]
pub struct Sig<S>(pub S)
where
    S: SigT;

impl<S: SigT> SigT for Sig<S> {
    type Item = S::Item;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        self.0.sample(ctx)
    }
}

impl<S: SigT> SigSampleIntoBufT for Sig<S> {
    type Item = S::Item;

    fn sample_into_buf(&mut self, ctx: &SigCtx, buf: &mut Vec<Self::Item>) {
        let buf_internal = self.0.sample(ctx);
        buf_internal.clone_to_vec(buf);
    }
}

/// A type-erased signal. The audio thread owns one of these so that the concrete type of the
/// signal graph doesn't leak into the player.
pub struct SigBoxed<T>
where
    T: Clone,
{
    sig: Box<dyn SigSampleIntoBufT<Item = T> + Send>,
    buf: Vec<T>,
}

impl<T> SigSampleIntoBufT for SigBoxed<T>
where
    T: Clone,
{
    type Item = T;

    fn sample_into_buf(&mut self, ctx: &SigCtx, buf: &mut Vec<Self::Item>) {
        self.sig.sample_into_buf(ctx, buf);
    }
}

impl<T> SigT for SigBoxed<T>
where
    T: Clone,
{
    type Item = T;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        self.sig.sample_into_buf(ctx, &mut self.buf);
        &self.buf
    }
}

pub fn sig_boxed<S>(sig: S) -> Sig<SigBoxed<S::Item>>
where
    S: SigT + Send + 'static,
{
    Sig(SigBoxed {
        sig: Box::new(Sig(sig)),
        buf: Vec::new(),
    })
}

impl<S> Sig<S>
where
    S: SigT,
{
    pub fn map<T, F>(self, f: F) -> Sig<Map<S, T, F>>
    where
        T: Clone,
        F: Fn(S::Item) -> T,
    {
        Sig(Map { sig: self.0, f })
    }

    /// Erase the type of this signal.
    pub fn boxed(self) -> Sig<SigBoxed<S::Item>>
    where
        S: Send + 'static,
    {
        sig_boxed(self.0)
    }
}

impl<S> Sig<S>
where
    S: SigT<Item = f32>,
{
    /// Scale each sample by a constant.
    pub fn gain(self, gain: f32) -> Sig<Map<S, f32, impl Fn(f32) -> f32>> {
        self.map(move |x| x * gain)
    }
}

pub struct Map<S, T, F>
where
    S: SigT,
    T: Clone,
    F: Fn(S::Item) -> T,
{
    sig: S,
    f: F,
}

impl<S, T, F> SigT for Map<S, T, F>
where
    S: SigT,
    T: Clone,
    F: Fn(S::Item) -> T,
{
    type Item = T;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        MapBuf::new(self.sig.sample(ctx), &self.f)
    }
}

/// For signals yielding `f32`, this trait provides a general way of defining filters.
pub trait Filter {
    /// The type of the item of the input signal to this filter.
    type ItemIn;

    /// The type of the signal produced by this filter. Filters take an input signal (`S`) and wrap
    /// it in a new signal whose type is this associated type.
    type Out<S>: SigT
    where
        S: SigT<Item = Self::ItemIn>;

    /// Create a new signal from an existing signal, consuming self in the process.
    fn into_sig<S>(self, sig: S) -> Self::Out<S>
    where
        S: SigT<Item = Self::ItemIn>;
}

#[cfg(test)]
mod test {
    use super::*;

    fn ctx(num_samples: usize) -> SigCtx {
        SigCtx {
            sample_rate_hz: 48_000.0,
            batch_index: 0,
            num_samples,
        }
    }

    fn collect<S: SigT>(sig: &mut S, ctx: &SigCtx) -> Vec<S::Item> {
        let mut out = Vec::new();
        sig.sample(ctx).clone_to_vec(&mut out);
        out
    }

    #[test]
    fn const_f32_fills_batch() {
        let mut sig = 0.5f32;
        assert_eq!(collect(&mut sig, &ctx(4)), vec![0.5; 4]);
    }

    #[test]
    fn map_and_gain() {
        let mut sig = Sig(2.0f32).map(|x| x + 1.0).gain(0.5);
        assert_eq!(collect(&mut sig, &ctx(2)), vec![1.5, 1.5]);
    }

    #[test]
    fn boxed_signal_matches_unboxed() {
        let mut boxed = Sig(0.25f32).gain(4.0).boxed();
        let mut out = Vec::new();
        boxed.sample_into_buf(&ctx(3), &mut out);
        assert_eq!(out, vec![1.0; 3]);
    }
}
