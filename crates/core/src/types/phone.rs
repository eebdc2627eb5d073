//! Customer phone number type.
//!
//! The customer service stores phone numbers as JSON numbers. Forms collect
//! them as text and must contain exactly ten digits before submission.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`PhoneNumber`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input is empty.
    #[error("phone number is required")]
    Empty,
    /// The input contains something other than ASCII digits.
    #[error("phone number must contain digits only")]
    NonDigit,
    /// The input does not have exactly ten digits.
    #[error("phone number must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Number of digits supplied.
        actual: usize,
    },
}

/// A customer phone number.
///
/// Held as its digit string so leading zeros survive display; serialized as a
/// JSON number because that is what the customer service expects.
///
/// ```
/// use banking_console_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("9876543210").unwrap();
/// assert_eq!(serde_json::to_string(&phone).unwrap(), "9876543210");
///
/// assert!(PhoneNumber::parse("987654321").is_err());
/// assert!(PhoneNumber::parse("98765-43210").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits a registration form must supply.
    pub const DIGITS: usize = 10;

    /// Parse a phone number typed into a form.
    ///
    /// # Errors
    ///
    /// Returns an error unless the trimmed input is exactly ten ASCII digits.
    pub fn parse(input: &str) -> Result<Self, PhoneNumberError> {
        let s = input.trim();

        if s.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneNumberError::NonDigit);
        }

        if s.len() != Self::DIGITS {
            return Err(PhoneNumberError::WrongLength {
                expected: Self::DIGITS,
                actual: s.len(),
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as it should be displayed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(number) => serializer.serialize_u64(number),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PhoneNumberVisitor)
    }
}

/// Accepts integers, integral floats (`9.87654321E9`), and strings.
struct PhoneNumberVisitor;

impl Visitor<'_> for PhoneNumberVisitor {
    type Value = PhoneNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a phone number as a JSON number or string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PhoneNumber(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(|v| PhoneNumber(v.to_string()))
            .map_err(|_| E::custom(format!("negative phone number: {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
            Ok(PhoneNumber(format!("{v:.0}")))
        } else {
            Err(E::custom(format!("phone number is not a whole number: {v}")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PhoneNumber(v.trim().to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ten_digits() {
        let phone = PhoneNumber::parse(" 0123456789 ").unwrap();
        assert_eq!(phone.as_str(), "0123456789");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            PhoneNumber::parse("123456789"),
            Err(PhoneNumberError::WrongLength {
                expected: 10,
                actual: 9
            })
        );
        assert_eq!(
            PhoneNumber::parse("12345678901"),
            Err(PhoneNumberError::WrongLength {
                expected: 10,
                actual: 11
            })
        );
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert_eq!(
            PhoneNumber::parse("+123456789"),
            Err(PhoneNumberError::NonDigit)
        );
        assert_eq!(
            PhoneNumber::parse("12345 6789"),
            Err(PhoneNumberError::NonDigit)
        );
        assert_eq!(PhoneNumber::parse(""), Err(PhoneNumberError::Empty));
    }

    #[test]
    fn test_serializes_as_number() {
        let phone = PhoneNumber::parse("9876543210").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "9876543210");
    }

    #[test]
    fn test_deserializes_service_representations() {
        let from_int: PhoneNumber = serde_json::from_str("9876543210").unwrap();
        let from_float: PhoneNumber = serde_json::from_str("9.87654321E9").unwrap();
        let from_str: PhoneNumber = serde_json::from_str("\"9876543210\"").unwrap();

        assert_eq!(from_int.as_str(), "9876543210");
        assert_eq!(from_float.as_str(), "9876543210");
        assert_eq!(from_str.as_str(), "9876543210");
    }

    #[test]
    fn test_deserialize_rejects_fractional_number() {
        assert!(serde_json::from_str::<PhoneNumber>("12.5").is_err());
        assert!(serde_json::from_str::<PhoneNumber>("-5").is_err());
    }
}
