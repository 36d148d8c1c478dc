use crate::error::{CoreError, CoreResult};
use num2words::Num2Words;

/// 2^53 - 1; larger numerals are rejected rather than expanded imprecisely.
pub const MAX_EXPANDABLE: u64 = 9_007_199_254_740_991;

/// Expand a run of ASCII digits ("12", "007") into English words.
///
/// The result is already in normalized transcript form: compound tens are
/// space separated and scale groups carry no commas, so running the pipeline
/// again leaves it unchanged.
pub fn to_words(digits: &str) -> CoreResult<String> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidInput(format!(
            "not a decimal numeral: {:?}",
            digits
        )));
    }
    let significant = digits.trim_start_matches('0');
    // u64 holds at most 20 digits; anything that long is far past the limit anyway.
    let value = if significant.is_empty() {
        Some(0)
    } else if significant.len() > 19 {
        None
    } else {
        significant.parse::<u64>().ok()
    };
    let value = match value {
        Some(v) if v <= MAX_EXPANDABLE => v as i64,
        _ => return Err(CoreError::NumberOutOfRange(digits.to_string())),
    };

    let spoken = Num2Words::new(value)
        .to_words()
        .map_err(|e| CoreError::InvalidInput(format!("cannot spell {}: {}", digits, e)))?;
    Ok(spoken.replace('-', " ").replace(',', ""))
}
