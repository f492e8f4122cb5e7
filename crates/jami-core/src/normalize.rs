//! Birth input normalization: raw form text to a fully populated [`BirthInput`].
//!
//! Normalization is total. Text that is not a finite whole number is replaced by
//! the caller's fallback; real validation is left to the computation service.

use crate::shared::{BirthInput, Gender};
use serde::{Deserialize, Serialize};

/// Raw values as typed into the birth form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBirthFields {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub is_lunar: bool,
    #[serde(default)]
    pub is_intercalation: bool,
    #[serde(default)]
    pub gender: Gender,
}

impl Default for RawBirthFields {
    /// The form's initial field values.
    fn default() -> Self {
        Self {
            year: "1990".to_string(),
            month: "6".to_string(),
            day: "24".to_string(),
            hour: "12".to_string(),
            is_lunar: false,
            is_intercalation: false,
            gender: Gender::M,
        }
    }
}

/// Fallbacks used when a numeric field cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDefaults {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
}

impl Default for BirthDefaults {
    fn default() -> Self {
        Self {
            year: 1990,
            month: 1,
            day: 1,
            hour: 0,
        }
    }
}

/// Parses `value` as a whole number, or returns `fallback`.
///
/// Accepts integer text and finite float text without a fractional part
/// (`"12"`, `" 7 "`, `"1e3"`, `"6.0"`). Empty, non-numeric, infinite, NaN,
/// fractional and out-of-range text all yield `fallback`. Only decimal notation
/// is read: hex, octal and binary literals such as `"0x10"` also yield `fallback`
/// rather than being reinterpreted.
pub fn parse_number(value: &str, fallback: i32) -> i32 {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i32>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            f as i32
        }
        _ => fallback,
    }
}

/// Builds the request payload. Never fails.
pub fn normalize(raw: &RawBirthFields, defaults: &BirthDefaults) -> BirthInput {
    BirthInput {
        year: parse_number(&raw.year, defaults.year),
        month: parse_number(&raw.month, defaults.month),
        day: parse_number(&raw.day, defaults.day),
        hour: parse_number(&raw.hour, defaults.hour),
        is_lunar: raw.is_lunar,
        is_intercalation: raw.is_lunar.then_some(raw.is_intercalation),
        gender: raw.gender,
    }
}
