use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, Device, OutputCallbackInfo, StreamConfig, SupportedBufferSize,
};
use tint_core::{sig_boxed, SigCtx, SigSampleIntoBufT, SigT};

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// default: 0.01
    pub target_latency_s: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_latency_s: 0.01,
        }
    }
}

/// The output device and the stream configuration chosen for it. A player is cheap to keep
/// around and can start any number of streams over its lifetime.
pub struct Player {
    device: Device,
    stream_config: StreamConfig,
}

/// Audio keeps playing for as long as this handle is alive.
pub struct PlayerHandle {
    _stream: cpal::Stream,
}

impl Player {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or(anyhow::anyhow!("no output device"))?;
        if let Ok(name) = device.name() {
            log::info!("cpal device: {}", name);
        } else {
            log::info!("cpal device: (no name)");
        }
        let stream_config = choose_config(&device, config)?;
        log::info!("sample rate: {}", stream_config.sample_rate.0);
        log::info!("num channels: {}", stream_config.channels);
        log::info!("buffer size: {:?}", stream_config.buffer_size);
        Ok(Self {
            device,
            stream_config,
        })
    }

    pub fn sample_rate_hz(&self) -> f32 {
        self.stream_config.sample_rate.0 as f32
    }

    /// Start playing a signal. The signal is moved to the audio thread and sampled there in
    /// batches sized by the driver. Every output channel receives the same sample.
    pub fn play_mono<S>(&self, sig: S) -> anyhow::Result<PlayerHandle>
    where
        S: SigT<Item = f32> + Send + 'static,
    {
        let mut sig = sig_boxed(sig);
        let channels = self.stream_config.channels as usize;
        let mut ctx = SigCtx {
            sample_rate_hz: self.sample_rate_hz(),
            batch_index: 0,
            num_samples: 0,
        };
        let mut buf = Vec::new();
        let stream = self.device.build_output_stream(
            &self.stream_config,
            move |data: &mut [f32], _: &OutputCallbackInfo| {
                ctx.num_samples = data.len() / channels;
                sig.sample_into_buf(&ctx, &mut buf);
                for (output, &input) in data.chunks_mut(channels).zip(buf.iter())
                {
                    for element in output {
                        *element = input;
                    }
                }
                ctx.batch_index += 1;
            },
            |err| log::error!("stream error: {}", err),
            None,
        )?;
        stream.play()?;
        Ok(PlayerHandle { _stream: stream })
    }
}

fn choose_config(
    device: &Device,
    config: Config,
) -> anyhow::Result<StreamConfig> {
    let default_config = device.default_output_config()?;
    let sample_rate = default_config.sample_rate();
    let channels = 2;
    let ideal_buffer_size =
        (sample_rate.0 as f32 * config.target_latency_s) as u32 * channels;
    // Round down to a multiple of 4. It's not clear why this is necessary but alsa complains
    // if the buffer size is not evenly divisible by 4.
    let ideal_buffer_size = ideal_buffer_size & (!3);
    let buffer_size = match default_config.buffer_size() {
        SupportedBufferSize::Range { min, max } => {
            BufferSize::Fixed(ideal_buffer_size.clamp(*min, *max))
        }
        SupportedBufferSize::Unknown => BufferSize::Default,
    };
    Ok(StreamConfig {
        channels: channels as u16,
        sample_rate,
        buffer_size,
    })
}
