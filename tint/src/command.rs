use std::str::FromStr;

/// A line of input to the interactive player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Toggle,
    Play,
    Pause,
    /// Set the mix (0 = brown, 0.5 = pink, 1 = white).
    Mix(f32),
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "" | "t" | "toggle" => Ok(Self::Toggle),
            "p" | "play" => Ok(Self::Play),
            "pause" | "stop" | "s" => Ok(Self::Pause),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => other.parse::<f32>().map(Self::Mix).map_err(|_| {
                anyhow::anyhow!(
                    "unknown command {:?} (expected toggle, play, pause, quit or a mix value \
                     between 0 and 1)",
                    s
                )
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn words() {
        assert_eq!("".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!(" Toggle\n".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("play".parse::<Command>().unwrap(), Command::Play);
        assert_eq!("stop".parse::<Command>().unwrap(), Command::Pause);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn numbers_are_mix_values() {
        assert_eq!("0.5".parse::<Command>().unwrap(), Command::Mix(0.5));
        assert_eq!("1".parse::<Command>().unwrap(), Command::Mix(1.0));
    }

    #[test]
    fn unknown_is_an_error() {
        assert!("louder".parse::<Command>().is_err());
    }
}
