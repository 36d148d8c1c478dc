pub mod numerals;
pub mod steps;

pub use steps::NormalizeStep;

use crate::error::CoreResult;

/// Characters removed from every transcript.
pub const STRIPPED_CHARS: &str = "`\",?!";

/// Ordered transcript normalization.
///
/// Steps run in sequence; the first failing step aborts the transcript and the
/// caller decides what to do with the line.
#[derive(Debug, Clone)]
pub struct Normalizer {
    steps: Vec<NormalizeStep>,
}

impl Normalizer {
    pub fn new(steps: Vec<NormalizeStep>) -> Self {
        Self { steps }
    }

    /// lowercase, strip punctuation, hyphens to spaces, drop one trailing
    /// period, "km" -> "kilometer", spell out the first number, trim.
    pub fn standard() -> CoreResult<Self> {
        Ok(Self::new(vec![
            NormalizeStep::Lowercase,
            NormalizeStep::strip_chars(STRIPPED_CHARS)?,
            NormalizeStep::HyphensToSpaces,
            NormalizeStep::DropTrailingPeriod,
            NormalizeStep::ReplaceAll {
                from: "km",
                to: "kilometer",
            },
            NormalizeStep::expand_first_number()?,
            NormalizeStep::Trim,
        ]))
    }

    pub fn steps(&self) -> &[NormalizeStep] {
        &self.steps
    }

    pub fn normalize(&self, raw: &str) -> CoreResult<String> {
        self.steps
            .iter()
            .try_fold(raw.to_string(), |text, step| step.apply(&text))
    }
}
