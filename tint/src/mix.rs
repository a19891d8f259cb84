//! Mapping from the mix control (0 = brown, 0.5 = pink, 1 = white) onto the cutoff frequencies of
//! the two low-pass stages.
//!
//! The control range is split into three regions. Within a region both cutoffs move linearly
//! between fixed endpoints. Regions are independent: the brown region ends at a brown cutoff of
//! 600Hz but the pink region starts at 500Hz, so there is a jump at 0.25. A value exactly on a
//! boundary belongs to the region above it.

/// Values at or above this are in the white region.
pub const WHITE_THRESHOLD: f32 = 0.75;

/// Values at or above this (and below `WHITE_THRESHOLD`) are in the pink region.
pub const PINK_THRESHOLD: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cutoffs {
    pub pink_hz: f32,
    pub brown_hz: f32,
}

impl Cutoffs {
    /// Cutoffs of a newly-started session, before any mix value is applied.
    pub const INITIAL: Self = Self {
        pink_hz: 2000.0,
        brown_hz: 600.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Brown,
    Pink,
    White,
}

struct Span {
    start: f32,
    end: f32,
}

impl Span {
    fn at(&self, t: f32) -> f32 {
        lerp(self.start, self.end, t)
    }

    /// Like `at` but stays below `end`. Rounding can otherwise carry values just under a region
    /// boundary onto the end of the span, which belongs to the next region.
    fn at_below_end(&self, t: f32) -> f32 {
        let x = self.at(t);
        if x < self.end {
            x
        } else {
            // largest float below a positive `end`
            f32::from_bits(self.end.to_bits() - 1)
        }
    }
}

impl Region {
    pub fn of(value: f32) -> Self {
        if value >= WHITE_THRESHOLD {
            Self::White
        } else if value >= PINK_THRESHOLD {
            Self::Pink
        } else {
            Self::Brown
        }
    }

    fn value_span(self) -> Span {
        match self {
            Self::Brown => Span {
                start: 0.0,
                end: PINK_THRESHOLD,
            },
            Self::Pink => Span {
                start: PINK_THRESHOLD,
                end: WHITE_THRESHOLD,
            },
            Self::White => Span {
                start: WHITE_THRESHOLD,
                end: 1.0,
            },
        }
    }

    fn pink_hz_span(self) -> Span {
        match self {
            Self::Brown => Span {
                start: 800.0,
                end: 1500.0,
            },
            Self::Pink => Span {
                start: 1500.0,
                end: 2000.0,
            },
            Self::White => Span {
                start: 2000.0,
                end: 20_000.0,
            },
        }
    }

    fn brown_hz_span(self) -> Span {
        match self {
            Self::Brown => Span {
                start: 200.0,
                end: 600.0,
            },
            Self::Pink => Span {
                start: 500.0,
                end: 600.0,
            },
            Self::White => Span {
                start: 600.0,
                end: 18_600.0,
            },
        }
    }

    /// Position of `value` within this region, from 0 at the start to 1 at the end.
    fn amount(self, value: f32) -> f32 {
        let Span { start, end } = self.value_span();
        (value - start) / (end - start)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + ((b - a) * t)
}

/// Cutoffs for a mix value in [0, 1].
pub fn cutoffs(value: f32) -> Cutoffs {
    let region = Region::of(value);
    let amount = region.amount(value);
    let (pink_hz_span, brown_hz_span) =
        (region.pink_hz_span(), region.brown_hz_span());
    if region == Region::White {
        Cutoffs {
            pink_hz: pink_hz_span.at(amount),
            brown_hz: brown_hz_span.at(amount),
        }
    } else {
        Cutoffs {
            pink_hz: pink_hz_span.at_below_end(amount),
            brown_hz: brown_hz_span.at_below_end(amount),
        }
    }
}

/// Returns `None` for values that can't be interpreted as a mix (NaN or infinite), and clamps
/// everything else into [0, 1].
pub fn sanitize(value: f32) -> Option<f32> {
    if value.is_finite() {
        Some(value.clamp(0.0, 1.0))
    } else {
        None
    }
}
