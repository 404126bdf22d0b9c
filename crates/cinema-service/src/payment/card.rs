//! Card number handling.

use crate::error::PaymentError;

/// A card number with separators removed and its digits checked.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    /// Strip spaces and dashes, then require 13 to 19 ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        let digits: String = raw.chars().filter(|c| *c != ' ' && *c != '-').collect();
        if !(13..=19).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaymentError::InvalidCardNumber);
        }
        Ok(Self(digits))
    }

    /// The last four digits.
    pub fn last4(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }
}

impl std::fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardNumber({})", mask_last4(self.last4()))
    }
}

/// `****-****-****-1234` style display for a card's last four digits.
pub fn mask_last4(last4: &str) -> String {
    format!("****-****-****-{last4}")
}
