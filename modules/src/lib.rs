pub mod noise_buffer;
pub use noise_buffer::{
    NOISE_BUFFER_DURATION_S, NoiseBuffer, noise_buffer, noise_buffer_len,
    noise_buffer_with_duration, noise_buffer_with_rng,
};

pub mod loop_playback;
pub use loop_playback::loop_playback;

pub mod low_pass_biquad;
pub use low_pass_biquad::low_pass_biquad;

pub mod linear_ramp;
pub use linear_ramp::linear_ramp;

mod low_level;
