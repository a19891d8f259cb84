// Second-order low-pass filter using the coefficient formulas from the audio EQ cookbook:
// https://www.w3.org/TR/audio-eq-cookbook/
// The resonance parameter is interpreted in decibels, the same way browser biquad filter nodes
// interpret Q for their low-pass type. Coefficients and state are kept in f64 since the cutoff can
// be very low relative to the sample rate.

#[derive(Clone, Copy, Debug, PartialEq)]
struct Coefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Coefficients {
    const PASS_THROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    const SILENCE: Self = Self {
        b0: 0.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };
}

pub struct State {
    coefficients: Coefficients,
    prev_cutoff_hz: f64,
    prev_resonance_db: f64,
    prev_sample_rate_hz: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        Self {
            // consistent with a cutoff of 0 which is the initial value of `prev_cutoff_hz`
            coefficients: Coefficients::SILENCE,
            prev_cutoff_hz: 0.0,
            prev_resonance_db: 0.0,
            prev_sample_rate_hz: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn update_if_changed(
        &mut self,
        sample_rate_hz: f64,
        cutoff_hz: f64,
        resonance_db: f64,
        f: impl FnOnce(f64, f64) -> Coefficients,
    ) {
        if cutoff_hz != self.prev_cutoff_hz
            || resonance_db != self.prev_resonance_db
            || sample_rate_hz != self.prev_sample_rate_hz
        {
            self.prev_cutoff_hz = cutoff_hz;
            self.prev_resonance_db = resonance_db;
            self.prev_sample_rate_hz = sample_rate_hz;
            self.coefficients = f(cutoff_hz / sample_rate_hz, resonance_db);
        }
    }

    fn apply(&mut self, sample: f64) -> f64 {
        let Coefficients { b0, b1, b2, a1, a2 } = self.coefficients;
        let output = (b0 * sample) + (b1 * self.x1) + (b2 * self.x2)
            - (a1 * self.y1)
            - (a2 * self.y2);
        self.x2 = self.x1;
        self.x1 = sample;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }
}

pub mod low_pass {
    use super::*;
    use std::f64::consts::PI;

    fn coefficients(
        cutoff_sample_rate_ratio: f64,
        resonance_db: f64,
    ) -> Coefficients {
        // cutoff relative to the nyquist frequency
        let cutoff_nyquist_ratio = cutoff_sample_rate_ratio * 2.0;
        if cutoff_nyquist_ratio >= 1.0 {
            return Coefficients::PASS_THROUGH;
        }
        if cutoff_nyquist_ratio <= 0.0 {
            return Coefficients::SILENCE;
        }
        let w0 = PI * cutoff_nyquist_ratio;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * 10f64.powf(resonance_db / 20.0));
        let a0 = 1.0 + alpha;
        let b1 = (1.0 - cos_w0) / a0;
        Coefficients {
            b0: b1 / 2.0,
            b1,
            b2: b1 / 2.0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// Run the low-pass filter for a single sample.
    pub fn run(
        state: &mut State,
        sample: f64,
        sample_rate_hz: f64,
        cutoff_hz: f64,
        resonance_db: f64,
    ) -> f64 {
        let cutoff_hz = cutoff_hz.max(0.0);
        state.update_if_changed(
            sample_rate_hz,
            cutoff_hz,
            resonance_db,
            coefficients,
        );
        state.apply(sample)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE_RATE_HZ: f64 = 48_000.0;

    #[test]
    fn dc_passes_with_unity_gain() {
        let mut state = State::new();
        let mut out = 0.0;
        for _ in 0..20_000 {
            out = low_pass::run(&mut state, 1.0, SAMPLE_RATE_HZ, 1000.0, 0.0);
        }
        assert!((out - 1.0).abs() < 1e-6, "settled at {}", out);
    }

    #[test]
    fn nyquist_is_removed() {
        let mut state = State::new();
        let mut max_tail: f64 = 0.0;
        for i in 0..20_000 {
            let x = if i % 2 == 0 { 1.0 } else { -1.0 };
            let out = low_pass::run(&mut state, x, SAMPLE_RATE_HZ, 500.0, 1.0);
            if i >= 19_000 {
                max_tail = max_tail.max(out.abs());
            }
        }
        assert!(max_tail < 1e-3, "tail amplitude {}", max_tail);
    }

    #[test]
    fn cutoff_above_nyquist_passes_through() {
        let mut state = State::new();
        for &x in &[0.3, -0.7, 0.1, 0.9] {
            let out = low_pass::run(&mut state, x, SAMPLE_RATE_HZ, 30_000.0, 1.0);
            assert_eq!(out, x);
        }
    }

    #[test]
    fn zero_cutoff_is_silent() {
        let mut state = State::new();
        for &x in &[0.3, -0.7, 0.1] {
            assert_eq!(low_pass::run(&mut state, x, SAMPLE_RATE_HZ, 0.0, 1.0), 0.0);
        }
    }

    #[test]
    fn coefficients_follow_parameter_changes() {
        let mut state = State::new();
        low_pass::run(&mut state, 0.0, SAMPLE_RATE_HZ, 800.0, 1.0);
        let at_800 = state.coefficients;
        low_pass::run(&mut state, 0.0, SAMPLE_RATE_HZ, 1500.0, 1.0);
        assert_ne!(state.coefficients, at_800);
        low_pass::run(&mut state, 0.0, SAMPLE_RATE_HZ, 800.0, 1.0);
        assert_eq!(state.coefficients, at_800);
    }
}
