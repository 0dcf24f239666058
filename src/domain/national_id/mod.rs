use std::{fmt, str::FromStr};

use super::error::{Error, Result};

const LENGTH: usize = 11;

/// A national taxpayer id, checked with the two mod-11 check digits.
///
/// The string the customer typed (`529.982.247-25`) is kept for display;
/// validation runs on the canonical digits (`52998224725`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId {
    formatted: String,
    digits: String,
}

impl NationalId {
    pub fn parse(raw: &str) -> Result<Self> {
        let digits = canonical(raw);

        if !checksum_matches(&digits) {
            return Err(Error::InvalidNationalId {
                national_id: raw.to_string(),
            });
        }

        Ok(Self {
            formatted: raw.to_string(),
            digits,
        })
    }

    pub fn is_valid(raw: &str) -> bool {
        checksum_matches(&canonical(raw))
    }

    /// The id exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.formatted
    }

    pub fn canonical(&self) -> &str {
        &self.digits
    }
}

impl FromStr for NationalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

fn canonical(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn checksum_matches(digits: &str) -> bool {
    let digits: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != LENGTH || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weights run from `len + 1` down to 2; a remainder of 10 maps to 0.
fn check_digit(digits: &[u32]) -> u32 {
    let heaviest = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=heaviest).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        digit => digit,
    }
}
