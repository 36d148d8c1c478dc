use super::numerals;
use crate::error::CoreResult;
use regex::Regex;

/// One string -> string transform of the transcript pipeline.
#[derive(Debug, Clone)]
pub enum NormalizeStep {
    Lowercase,
    /// Removes every match of the pattern.
    StripChars(Regex),
    HyphensToSpaces,
    /// Removes one trailing '.', if present.
    DropTrailingPeriod,
    /// Plain substring replacement, no word boundaries.
    ReplaceAll {
        from: &'static str,
        to: &'static str,
    },
    /// Spells out the first digit run only.
    ExpandFirstNumber(Regex),
    Trim,
}

impl NormalizeStep {
    pub fn strip_chars(chars: &str) -> CoreResult<Self> {
        let class: String = chars.chars().map(|c| regex::escape(&c.to_string())).collect();
        Ok(NormalizeStep::StripChars(Regex::new(&format!("[{}]", class))?))
    }

    pub fn expand_first_number() -> CoreResult<Self> {
        Ok(NormalizeStep::ExpandFirstNumber(Regex::new("[0-9]+")?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            NormalizeStep::Lowercase => "lowercase",
            NormalizeStep::StripChars(_) => "strip_chars",
            NormalizeStep::HyphensToSpaces => "hyphens_to_spaces",
            NormalizeStep::DropTrailingPeriod => "drop_trailing_period",
            NormalizeStep::ReplaceAll { .. } => "replace_all",
            NormalizeStep::ExpandFirstNumber(_) => "expand_first_number",
            NormalizeStep::Trim => "trim",
        }
    }

    pub fn apply(&self, text: &str) -> CoreResult<String> {
        let out = match self {
            NormalizeStep::Lowercase => text.to_lowercase(),
            NormalizeStep::StripChars(re) => re.replace_all(text, "").into_owned(),
            NormalizeStep::HyphensToSpaces => text.replace('-', " "),
            NormalizeStep::DropTrailingPeriod => text.strip_suffix('.').unwrap_or(text).to_string(),
            NormalizeStep::ReplaceAll { from, to } => text.replace(from, to),
            NormalizeStep::ExpandFirstNumber(re) => match re.find(text) {
                Some(m) => {
                    let words = numerals::to_words(m.as_str())?;
                    let mut out = text.to_string();
                    out.replace_range(m.range(), &words);
                    out
                }
                None => text.to_string(),
            },
            NormalizeStep::Trim => text.trim().to_string(),
        };
        Ok(out)
    }
}
