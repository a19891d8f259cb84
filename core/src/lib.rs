mod sig;
pub use sig::{
    Buf, Filter, Map, Sig, SigBoxed, SigCtx, SigSampleIntoBufT, SigT, sig_boxed,
};
pub mod cell;
pub use cell::{Cell, CellF32, cell, cell_f32};
