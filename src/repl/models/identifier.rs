//! # Identifier Model
//!
//! Normalizes raw user input into a student identifier (matrícula) and
//! rejects input that can never be a valid lookup key. Validation is purely
//! local: nothing here touches the network or persisted state.

use std::fmt;
use thiserror::Error;

/// Fewest digits accepted after normalization
pub const DEFAULT_MIN_DIGITS: usize = 4;

/// Most digits accepted after normalization
pub const DEFAULT_MAX_DIGITS: usize = 20;

/// A normalized student identifier: ASCII digits only, length within bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons raw input was rejected before any request was issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, digite sua matrícula.")]
    Missing,
    #[error("Matrícula muito curta. Digite pelo menos {min} dígitos.")]
    TooShort { min: usize },
    #[error("Matrícula muito longa. Máximo de {max} dígitos.")]
    TooLong { max: usize },
}

/// Validates raw input against configurable digit-count bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierValidator {
    min_digits: usize,
    max_digits: usize,
}

impl IdentifierValidator {
    pub fn new(min_digits: usize, max_digits: usize) -> Self {
        Self {
            min_digits,
            max_digits,
        }
    }

    /// Strip every non-digit and check the remaining length
    pub fn validate(&self, raw: &str) -> Result<Identifier, ValidationError> {
        let digits = digits_only(raw);

        if digits.is_empty() {
            return Err(ValidationError::Missing);
        }
        if digits.len() < self.min_digits {
            return Err(ValidationError::TooShort {
                min: self.min_digits,
            });
        }
        if digits.len() > self.max_digits {
            return Err(ValidationError::TooLong {
                max: self.max_digits,
            });
        }

        Ok(Identifier(digits))
    }
}

impl Default for IdentifierValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DIGITS, DEFAULT_MAX_DIGITS)
    }
}

/// Keep only ASCII digits
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Clean clipboard text before it replaces the input content
pub fn sanitize_paste(text: &str) -> String {
    digits_only(text.trim())
}
