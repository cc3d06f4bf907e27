use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Label keys the card asks the host to localize.
///
/// The host dashboard owns the translation tables; the engine only ever
/// requests this small fixed set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum LabelKey {
    Solar,
    Grid,
    Home,
    Battery,
}

/// Capability to localize the card's node labels.
pub trait Localizer {
    fn localize(&self, key: LabelKey) -> String;
}

/// Fallback locale used when the host supplies none.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishLocale;

impl Localizer for EnglishLocale {
    fn localize(&self, key: LabelKey) -> String {
        match key {
            LabelKey::Solar => "Solar",
            LabelKey::Grid => "Grid",
            LabelKey::Home => "Home",
            LabelKey::Battery => "Battery",
        }
        .to_string()
    }
}

/// Capability to round and format numbers per the host's locale.
///
/// The engine only ever asks for "at most N fractional digits"; everything
/// else (grouping, decimal separator) belongs to the host.
pub trait NumberFormat {
    /// Round `value` to at most `digits` fractional digits.
    fn round(&self, value: f64, digits: u32) -> f64;

    /// Format `value` for display with at most `digits` fractional digits.
    fn format(&self, value: f64, digits: u32) -> String;
}

/// Locale-neutral formatter used when the host supplies none.
///
/// Matches the common "maximum fraction digits" convention: trailing zeros
/// are not shown, so 4.0 formats as "4" and 2.3 as "2.3".
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormat;

impl NumberFormat for PlainFormat {
    fn round(&self, value: f64, digits: u32) -> f64 {
        round_to_digits(value, digits)
    }

    fn format(&self, value: f64, digits: u32) -> String {
        let rounded = round_to_digits(value, digits);
        if digits == 0 {
            return format!("{:.0}", rounded);
        }
        let fixed = format!("{:.*}", digits as usize, rounded);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Round half away from zero to `digits` fractional digits.
///
/// Idempotent: rounding an already-rounded value returns it unchanged.
/// Non-finite input degrades to 0 rather than propagating NaN into the
/// scene.
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
