use rand::{Rng, SeedableRng, rngs::StdRng};

/// Duration of a noise buffer created with `noise_buffer`. The buffer is looped during playback so
/// this only needs to be long enough that the repetition isn't noticeable.
pub const NOISE_BUFFER_DURATION_S: f32 = 2.0;

/// A block of independent uniformly-distributed samples in [-1, 1). Immutable once created.
#[derive(Debug, Clone)]
pub struct NoiseBuffer {
    samples: Vec<f32>,
}

impl NoiseBuffer {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl From<NoiseBuffer> for Vec<f32> {
    fn from(noise_buffer: NoiseBuffer) -> Self {
        noise_buffer.samples
    }
}

/// Number of samples in a buffer of the given duration.
pub fn noise_buffer_len(sample_rate_hz: f32, duration_s: f32) -> usize {
    (sample_rate_hz * duration_s).round() as usize
}

pub fn noise_buffer_with_rng<R>(rng: &mut R, len: usize) -> NoiseBuffer
where
    R: Rng,
{
    let samples = (0..len).map(|_| rng.random::<f32>() * 2. - 1.).collect();
    NoiseBuffer { samples }
}

/// White noise lasting `duration_s`, freshly seeded from the OS.
pub fn noise_buffer_with_duration(
    sample_rate_hz: f32,
    duration_s: f32,
) -> NoiseBuffer {
    let len = noise_buffer_len(sample_rate_hz, duration_s);
    if len == 0 {
        log::warn!(
            "empty noise buffer (sample rate {}Hz, duration {}s)",
            sample_rate_hz,
            duration_s
        );
    }
    let mut rng = StdRng::from_os_rng();
    noise_buffer_with_rng(&mut rng, len)
}

/// Two seconds of white noise.
pub fn noise_buffer(sample_rate_hz: f32) -> NoiseBuffer {
    noise_buffer_with_duration(sample_rate_hz, NOISE_BUFFER_DURATION_S)
}
