//! Zero-knowledge answer keys.
//!
//! A key stores only the normalization mode, an optional decimal precision,
//! and the SHA-256 digest of the normalized answer. The plaintext is consumed
//! by [`AnswerKey::seal`] and never retained. Verification is binary: there is
//! no partial credit in this mode.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::config::MAX_DECIMAL_PLACES;

/// How a raw answer is canonicalized before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    /// Trim surrounding whitespace only.
    Exact,
    /// Trim, then lowercase.
    TrimmedLowercase,
    /// Trim, lowercase, strip one leading `0x`.
    HexLowercase,
    /// Parse as a float and fix to `decimal_places`; falls back to the
    /// trimmed input when unparsable.
    NumericRounded,
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NormalizationMode::Exact => "exact",
            NormalizationMode::TrimmedLowercase => "trimmed-lowercase",
            NormalizationMode::HexLowercase => "hex-lowercase",
            NormalizationMode::NumericRounded => "numeric-rounded",
        };
        f.write_str(s)
    }
}

impl FromStr for NormalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(NormalizationMode::Exact),
            "trimmed-lowercase" | "lowercase" => Ok(NormalizationMode::TrimmedLowercase),
            "hex-lowercase" | "hex" => Ok(NormalizationMode::HexLowercase),
            "numeric-rounded" | "numeric" => Ok(NormalizationMode::NumericRounded),
            other => Err(format!("unknown normalization mode: {other}")),
        }
    }
}

/// Decimal places used by `numeric-rounded` when none are given.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Canonicalize a raw answer.
pub fn normalize(raw: &str, mode: NormalizationMode, decimal_places: Option<u32>) -> String {
    let trimmed = raw.trim();
    match mode {
        NormalizationMode::Exact => trimmed.to_string(),
        NormalizationMode::TrimmedLowercase => trimmed.to_lowercase(),
        NormalizationMode::HexLowercase => {
            let lower = trimmed.to_lowercase();
            match lower.strip_prefix("0x") {
                Some(rest) => rest.to_string(),
                None => lower,
            }
        }
        NormalizationMode::NumericRounded => match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let places = decimal_places
                    .unwrap_or(DEFAULT_DECIMAL_PLACES)
                    .min(MAX_DECIMAL_PLACES) as usize;
                let fixed = format!("{value:.places$}");
                // "-0.00" and "0.00" are the same answer.
                if fixed.starts_with('-') && fixed[1..].chars().all(|c| c == '0' || c == '.') {
                    fixed[1..].to_string()
                } else {
                    fixed
                }
            }
            _ => trimmed.to_string(),
        },
    }
}

/// SHA-256 of the normalized answer as lowercase hex.
pub fn hash_answer(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Stored verification material for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    pub hash: String,
    pub normalization: NormalizationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
}

impl AnswerKey {
    /// Normalize and hash the correct answer, discarding the plaintext.
    pub fn seal(answer: String, mode: NormalizationMode, decimal_places: Option<u32>) -> Self {
        let hash = hash_answer(&normalize(&answer, mode, decimal_places));
        drop(answer);
        Self {
            hash,
            normalization: mode,
            decimal_places,
        }
    }
}

/// Outcome of checking one submission against a key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub correct: bool,
    /// Always 1.0 or 0.0.
    pub score: f64,
}

/// Check a submission against a sealed key.
pub fn verify(user_answer: &str, key: &AnswerKey) -> Verification {
    let digest = hash_answer(&normalize(user_answer, key.normalization, key.decimal_places));
    let correct = constant_time_eq(digest.as_bytes(), key.hash.as_bytes());
    Verification {
        correct,
        score: if correct { 1.0 } else { 0.0 },
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Number of digits after the decimal point in a plain numeric literal.
pub fn decimal_places_of(literal: &str) -> u32 {
    literal
        .trim()
        .split_once('.')
        .map(|(_, frac)| frac.chars().take_while(|c| c.is_ascii_digit()).count() as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_modes() {
        assert_eq!(normalize("  Paris ", NormalizationMode::Exact, None), "Paris");
        assert_eq!(
            normalize("  Paris ", NormalizationMode::TrimmedLowercase, None),
            "paris"
        );
        assert_eq!(
            normalize(" 0xFF ", NormalizationMode::HexLowercase, None),
            "ff"
        );
        assert_eq!(normalize("FF", NormalizationMode::HexLowercase, None), "ff");
        assert_eq!(
            normalize("3.14159", NormalizationMode::NumericRounded, Some(3)),
            "3.142"
        );
        assert_eq!(
            normalize("abc", NormalizationMode::NumericRounded, Some(3)),
            "abc"
        );
        assert_eq!(
            normalize("-0.0001", NormalizationMode::NumericRounded, Some(2)),
            "0.00"
        );
        assert_eq!(
            normalize("7", NormalizationMode::NumericRounded, None),
            "7.00"
        );
    }

    #[test]
    fn oversized_precision_is_clamped() {
        let json = r#"{"hash":"00","normalization":"numeric-rounded","decimal_places":4294967295}"#;
        let key: AnswerKey = serde_json::from_str(json).unwrap();
        let normalized = normalize("1.5", key.normalization, key.decimal_places);
        assert_eq!(normalized, format!("1.{:0<width$}", 5, width = MAX_DECIMAL_PLACES as usize));
        assert!(!verify("1.5", &key).correct);
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_answer("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn seal_and_verify() {
        let key = AnswerKey::seal("Necessary".into(), NormalizationMode::TrimmedLowercase, None);
        assert!(verify("necessary", &key).correct);
        assert!(verify("Necessary ", &key).correct);
        assert!(!verify("neccessary", &key).correct);
        assert_eq!(verify("nope", &key).score, 0.0);
    }

    #[test]
    fn key_never_contains_plaintext() {
        let key = AnswerKey::seal("zebra".into(), NormalizationMode::Exact, None);
        let json = serde_json::to_string(&key).unwrap();
        assert!(!json.contains("zebra"));
        assert!(json.contains("\"normalization\":\"exact\""));
    }

    #[test]
    fn numeric_keys_accept_equivalent_forms() {
        let key = AnswerKey::seal("12.5000".into(), NormalizationMode::NumericRounded, Some(4));
        assert!(verify("12.5", &key).correct);
        assert!(verify(" 12.50000 ", &key).correct);
        assert!(!verify("12.5001", &key).correct);
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            NormalizationMode::Exact,
            NormalizationMode::TrimmedLowercase,
            NormalizationMode::HexLowercase,
            NormalizationMode::NumericRounded,
        ] {
            assert_eq!(mode.to_string().parse::<NormalizationMode>().unwrap(), mode);
        }
    }

    #[test]
    fn decimal_places_of_literals() {
        assert_eq!(decimal_places_of("3.1400"), 4);
        assert_eq!(decimal_places_of("-42"), 0);
        assert_eq!(decimal_places_of("0.0000001"), 7);
    }
}
