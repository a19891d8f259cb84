use tint::{Config, Cutoffs, NoiseController, Offline, PlayState};

const SAMPLE_RATE_HZ: f32 = 8_000.0;

fn controller_with(config: Config) -> (NoiseController<Offline>, Offline) {
    let output = Offline::new(SAMPLE_RATE_HZ);
    let controller = NoiseController::new(config, {
        let output = output.clone();
        move || Ok(output.clone())
    });
    (controller, output)
}

fn cutoffs(controller: &NoiseController<Offline>) -> Cutoffs {
    controller.session().unwrap().cutoffs()
}

/// Mean squared difference between neighbouring samples. Large for bright signals and small
/// for dark ones.
fn roughness(samples: &[f32]) -> f32 {
    let sum: f32 = samples.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    sum / (samples.len() - 1) as f32
}

fn render_settled(output: &Offline) -> Vec<f32> {
    // let the filters settle after a change
    output.render(1_000).unwrap();
    output.render(8_000).unwrap()
}

#[test]
fn sweep_from_brown_to_white_to_pink() {
    let (mut controller, _) = controller_with(Config::default());
    controller.start().unwrap();

    controller.update_mix(0.0);
    assert_eq!(
        cutoffs(&controller),
        Cutoffs {
            pink_hz: 800.0,
            brown_hz: 200.0
        }
    );

    controller.update_mix(1.0);
    assert_eq!(
        cutoffs(&controller),
        Cutoffs {
            pink_hz: 20_000.0,
            brown_hz: 18_600.0
        }
    );

    controller.update_mix(0.5);
    assert_eq!(
        cutoffs(&controller),
        Cutoffs {
            pink_hz: 1750.0,
            brown_hz: 550.0
        }
    );
}

#[test]
fn toggling_twice_returns_to_initial_state() {
    let (mut controller, output) = controller_with(Config::default());
    assert_eq!(controller.toggle().unwrap(), PlayState::Playing);
    assert!(output.is_playing());
    assert_eq!(controller.session().unwrap().gain(), 0.08);
    assert_eq!(controller.toggle().unwrap(), PlayState::Stopped);
    assert!(controller.session().is_none());
    assert!(!output.is_playing());
    assert!(output.render(16).is_none());
}

#[test]
fn output_is_quiet_and_finite() {
    let (mut controller, output) = controller_with(Config::default());
    controller.start().unwrap();
    for &mix in &[0.0, 0.25, 0.5, 0.75, 1.0] {
        controller.update_mix(mix);
        let samples = render_settled(&output);
        assert!(samples.iter().all(|x| x.is_finite()));
        let peak = samples.iter().fold(0.0f32, |acc, x| acc.max(x.abs()));
        assert!(peak > 0.0, "silent at mix {}", mix);
        assert!(peak < 0.08 * 4.0, "peak {} at mix {}", peak, mix);
    }
}

#[test]
fn brown_is_darker_than_white() {
    let (mut controller, output) = controller_with(Config::default());
    controller.start().unwrap();
    controller.update_mix(1.0);
    let white = roughness(&render_settled(&output));
    controller.update_mix(0.0);
    let brown = roughness(&render_settled(&output));
    assert!(brown * 10.0 < white, "brown {} white {}", brown, white);
}

#[test]
fn white_end_of_the_sweep_is_unfiltered_noise() {
    // both cutoffs are above the nyquist frequency at this sample rate so the filters pass the
    // buffer through unchanged
    let (mut controller, output) = controller_with(Config::default());
    controller.start().unwrap();
    controller.update_mix(1.0);
    let samples = render_settled(&output);
    let gain = controller.session().unwrap().gain();
    assert!(samples.iter().all(|x| (-gain..gain).contains(x)));
}

#[test]
fn mix_is_ignored_while_stopped_and_not_applied_on_start() {
    let (mut controller, output) = controller_with(Config::default());
    controller.update_mix(0.0);
    assert!(!output.is_playing());
    controller.start().unwrap();
    assert_eq!(cutoffs(&controller), Cutoffs::INITIAL);
}

#[test]
fn ramped_mix_reaches_target() {
    let (mut controller, output) = controller_with(Config {
        mix_ramp_s: 0.05,
        ..Default::default()
    });
    controller.start().unwrap();
    controller.update_mix(1.0);
    controller.update_mix(0.0);
    assert_eq!(
        cutoffs(&controller),
        Cutoffs {
            pink_hz: 800.0,
            brown_hz: 200.0
        }
    );
    let samples = render_settled(&output);
    assert!(samples.iter().all(|x| x.is_finite()));
}

/// Render a single sample and check that neither cutoff moved by more than `max_step`.
fn render_one_sample(
    controller: &NoiseController<Offline>,
    output: &Offline,
    prev: &mut Cutoffs,
    max_step: f32,
) {
    output.render(1).unwrap();
    let current = controller.session().unwrap().current_cutoffs();
    assert!(
        (current.pink_hz - prev.pink_hz).abs() <= max_step,
        "pink {} -> {}",
        prev.pink_hz,
        current.pink_hz
    );
    assert!(
        (current.brown_hz - prev.brown_hz).abs() <= max_step,
        "brown {} -> {}",
        prev.brown_hz,
        current.brown_hz
    );
    *prev = current;
}

#[test]
fn interrupting_a_ramp_continues_from_the_current_cutoffs() {
    let ramp_s = 0.05;
    let (mut controller, output) = controller_with(Config {
        mix_ramp_s: ramp_s,
        ..Default::default()
    });
    controller.start().unwrap();
    // the largest per-sample change either ramp below can make
    let max_step = (20_000.0 - 2_000.0) / (ramp_s * SAMPLE_RATE_HZ) + 0.1;
    let mut prev = controller.session().unwrap().current_cutoffs();
    assert_eq!(prev, Cutoffs::INITIAL);
    controller.update_mix(1.0);
    for _ in 0..40 {
        render_one_sample(&controller, &output, &mut prev, max_step);
    }
    // part way towards white, well short of the target
    assert!(prev.pink_hz < 5_000.0, "{}", prev.pink_hz);
    controller.update_mix(0.0);
    for _ in 0..500 {
        render_one_sample(&controller, &output, &mut prev, max_step);
    }
    assert_eq!(prev, cutoffs(&controller));
    assert_eq!(
        prev,
        Cutoffs {
            pink_hz: 800.0,
            brown_hz: 200.0
        }
    );
}
