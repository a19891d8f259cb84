pub mod command;
pub mod controller;
pub mod mix;
pub mod output;
pub mod session;

pub use command::Command;
pub use controller::{Config, NoiseController, PlayState};
pub use mix::{Cutoffs, Region};
pub use output::{AudioOutput, Offline};
pub use session::PlaybackSession;
