//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is shorter than the minimum length.
    #[error("phone number must be at least {min} characters")]
    TooShort {
        /// Minimum required length after the optional leading `+`.
        min: usize,
    },
    /// The input contains a character outside the accepted set.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A customer phone number.
///
/// Validation is deliberately permissive: an optional leading `+` followed by
/// at least eight characters drawn from digits, spaces, dashes, and
/// parentheses. Formatting is preserved as entered; [`Phone::digits`] yields
/// the canonical digit-only form used for order matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of characters after the optional leading `+`.
    pub const MIN_LENGTH: usize = 8;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too short, or contains a
    /// character outside digits, spaces, dashes, and parentheses.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let rest = s.strip_prefix('+').unwrap_or(s);

        if rest.len() < Self::MIN_LENGTH {
            return Err(PhoneError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if let Some(bad) = rest
            .chars()
            .find(|&c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')')))
        {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the digit-only form (separators and the leading `+` stripped).
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Digit-level comparison against another phone string.
    ///
    /// `+20 100-555-0199` and `201005550199` match.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        let theirs: String = other.chars().filter(char::is_ascii_digit).collect();
        !theirs.is_empty() && self.digits() == theirs
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
