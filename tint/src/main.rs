use clap::Parser;
use std::io::{self, BufRead, Write};
use tint::{Command, Config, NoiseController};
use tint_modules::NOISE_BUFFER_DURATION_S;
use tint_player::Player;

#[derive(Parser)]
#[command(name = "tint")]
#[command(
    about = "Play white, pink and brown noise. Enter an empty line to play/pause, a number between 0 (brown) and 1 (white) to change the mix, or q to quit."
)]
struct Cli {
    #[arg(long, default_value_t = 0.08)]
    gain: f32,
    #[arg(long, default_value_t = NOISE_BUFFER_DURATION_S)]
    buffer_s: f32,
    /// Seconds taken to move the filters to new cutoffs when the mix changes
    #[arg(long, default_value_t = 0.0)]
    mix_ramp_s: f32,
    #[arg(long, default_value_t = 0.01)]
    target_latency_s: f32,
    /// Start playing immediately
    #[arg(long)]
    autoplay: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let player_config = tint_player::Config {
        target_latency_s: cli.target_latency_s,
    };
    let mut controller = NoiseController::new(
        Config {
            gain: cli.gain,
            buffer_duration_s: cli.buffer_s,
            mix_ramp_s: cli.mix_ramp_s,
        },
        move || Player::new(player_config),
    );
    if cli.autoplay {
        controller.start()?;
    }
    let mut stdout = io::stdout();
    writeln!(stdout, "[{}]", controller.state().toggle_label())?;
    for line in io::stdin().lock().lines() {
        let command = match line?.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        let result = match command {
            Command::Toggle => controller.toggle().map(|_| ()),
            Command::Play => controller.start(),
            Command::Pause => {
                controller.stop();
                Ok(())
            }
            Command::Mix(value) => {
                controller.update_mix(value);
                Ok(())
            }
            Command::Quit => break,
        };
        if let Err(e) = result {
            log::error!("{:#}", e);
        }
        if !matches!(command, Command::Mix(_)) {
            writeln!(stdout, "[{}]", controller.state().toggle_label())?;
        }
    }
    controller.stop();
    Ok(())
}
