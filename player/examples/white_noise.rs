use tint_core::*;
use tint_modules::*;
use tint_player::Player;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let player = Player::new(Default::default())?;
    let noise = noise_buffer(player.sample_rate_hz());
    let sig = loop_playback(noise)
        .filter(low_pass_biquad(1500.0f32))
        .gain(0.08);
    let _handle = player.play_mono(sig)?;
    std::thread::park();
    Ok(())
}
