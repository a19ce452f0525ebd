//! Validated primitive types shared across the MedVida crates.
//!
//! Everything here is constructed through a checked constructor, so once a value exists the
//! rest of the workspace can rely on it without re-validating.

use std::fmt;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating validated numeric types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AmountError {
    /// The value was NaN or infinite
    #[error("value must be a finite number")]
    NotFinite,
    /// The value was below zero
    #[error("value cannot be negative: {0}")]
    Negative(f64),
    /// A rating was outside the 0 to 5 scale
    #[error("rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(f64),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A consultation or subscription price in Brazilian reais, held as whole cents.
///
/// Catalog files carry prices as decimals (`14.99`); they are rounded to the nearest cent on
/// construction so equality and ordering are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    /// Creates a price from a whole number of cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a price from a decimal amount of reais.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] if `amount` is not finite or is negative.
    pub fn from_decimal(amount: f64) -> Result<Self, AmountError> {
        if !amount.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if amount < 0.0 {
            return Err(AmountError::Negative(amount));
        }
        Ok(Self((amount * 100.0).round() as u64))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// The amount in reais as a decimal, for wire formats.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    /// Formats in the pt-BR convention, e.g. `R$ 14,99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {},{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A star rating on a 0 to 5 scale with one decimal place of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// The highest possible rating.
    pub const MAX: Rating = Rating(50);

    /// Creates a rating from a decimal value such as `4.9`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] if `value` is not finite or falls outside `0.0..=5.0`.
    pub fn from_decimal(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if !(0.0..=5.0).contains(&value) {
            return Err(AmountError::RatingOutOfRange(value));
        }
        Ok(Self((value * 10.0).round() as u8))
    }

    pub fn as_decimal(&self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Number of whole stars, for star-strip rendering.
    pub fn whole_stars(&self) -> u8 {
        self.0 / 10
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Dra. Aline Santos ").expect("valid text");
        assert_eq!(text.as_str(), "Dra. Aline Santos");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn price_rounds_to_cents() {
        let price = Price::from_decimal(14.99).expect("valid price");
        assert_eq!(price.cents(), 1499);
        assert_eq!(price.to_string(), "R$ 14,99");
    }

    #[test]
    fn price_formats_whole_amounts() {
        let price = Price::from_decimal(39.0).expect("valid price");
        assert_eq!(price.to_string(), "R$ 39,00");
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert_eq!(Price::from_decimal(-1.0), Err(AmountError::Negative(-1.0)));
        assert_eq!(Price::from_decimal(f64::NAN), Err(AmountError::NotFinite));
    }

    #[test]
    fn rating_keeps_one_decimal() {
        let rating = Rating::from_decimal(4.9).expect("valid rating");
        assert_eq!(rating.to_string(), "4.9");
        assert_eq!(rating.whole_stars(), 4);
        assert!(rating < Rating::MAX);
    }

    #[test]
    fn rating_rejects_out_of_scale() {
        assert!(matches!(
            Rating::from_decimal(5.5),
            Err(AmountError::RatingOutOfRange(_))
        ));
    }
}
