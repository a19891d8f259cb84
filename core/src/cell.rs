use crate::sig::{
    Buf, Sig, SigBoxed, SigCtx, SigSampleIntoBufT, SigT, sig_boxed,
};
use std::sync::{Arc, Mutex};

/// Private inner type of the `Cell_` type. Caches the most recently computed batch so that every
/// clone of a cell observes the same values within a batch.
struct Inner<T: Clone> {
    sig: SigBoxed<T>,
    cache: Vec<T>,
    next_batch_index: u64,
}

impl<T: Clone> Inner<T> {
    fn sample_cached(&mut self, ctx: &SigCtx) -> &Vec<T> {
        if ctx.batch_index >= self.next_batch_index {
            self.next_batch_index = ctx.batch_index + 1;
            self.sig.sample_into_buf(ctx, &mut self.cache);
        }
        &self.cache
    }
}

pub struct Cell_<T: Clone> {
    inner: Arc<Mutex<Inner<T>>>,
    buf: Vec<T>,
}

impl<T: Clone> Clone for Cell_<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            buf: Vec::new(),
        }
    }
}

impl<T: Clone> Cell_<T> {
    pub fn new<S>(sig: S) -> Self
    where
        S: SigT<Item = T> + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                sig: sig_boxed(sig).0,
                cache: Vec::new(),
                next_batch_index: 0,
            })),
            buf: Vec::new(),
        }
    }

    pub fn set<S>(&self, sig: S)
    where
        S: SigT<Item = T> + Send + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        inner.sig = sig_boxed(sig).0;
        // force the new signal to be sampled on the next read
        inner.next_batch_index = 0;
    }

    /// The last value computed by the signal in the cell, or `None` if it hasn't produced any
    /// values yet. Replacing the signal doesn't change this until the cell is next sampled.
    pub fn latest(&self) -> Option<T> {
        self.inner.lock().unwrap().cache.last().cloned()
    }
}

impl<T: Clone> SigT for Cell_<T> {
    type Item = T;

    fn sample(&mut self, ctx: &SigCtx) -> impl Buf<Self::Item> {
        let mut inner = self.inner.lock().unwrap();
        self.buf.clone_from(inner.sample_cached(ctx));
        &self.buf
    }
}

impl<T: Clone> Sig<Cell_<T>> {
    pub fn set<S>(&self, sig: S)
    where
        S: SigT<Item = T> + Send + 'static,
    {
        self.0.set(sig);
    }

    pub fn latest(&self) -> Option<T> {
        self.0.latest()
    }
}

/// A container for a signal yielding a type `T` whose contents (a signal) can be changed to a
/// different signal later, from a different thread than the one sampling it. The type of the
/// signal is erased so signals of different types may be placed into the same cell. Call its
/// `set` method to update the signal contained in the cell.
pub type Cell<T> = Sig<Cell_<T>>;
pub type CellF32 = Cell<f32>;

pub fn cell<T>(initial_sig: impl SigT<Item = T> + Send + 'static) -> Cell<T>
where
    T: Clone,
{
    Sig(Cell_::new(initial_sig))
}

pub fn cell_f32(initial_sig: impl SigT<Item = f32> + Send + 'static) -> CellF32 {
    cell(initial_sig)
}
