//! Payment method and card number input.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Pix,
    Card,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Card => "Cartão de Crédito",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PaymentMethod::Pix => PaymentMethod::Card,
            PaymentMethod::Card => PaymentMethod::Pix,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Elo,
    Hipercard,
}

// Elo and Hipercard ranges overlap Visa and Mastercard, so they are checked first.
const ELO_PREFIXES: [&str; 15] = [
    "4011", "4312", "4389", "4514", "4576", "5041", "5066", "5067", "509", "6277", "6362",
    "6363", "650", "6516", "6550",
];
const HIPERCARD_PREFIXES: [&str; 2] = ["606282", "3841"];

impl CardBrand {
    /// Detect the brand from the leading digits of a card number.
    pub fn detect(digits: &str) -> Option<Self> {
        if ELO_PREFIXES.iter().any(|p| digits.starts_with(p)) {
            return Some(CardBrand::Elo);
        }
        if HIPERCARD_PREFIXES.iter().any(|p| digits.starts_with(p)) {
            return Some(CardBrand::Hipercard);
        }
        if digits.starts_with("34") || digits.starts_with("37") {
            return Some(CardBrand::Amex);
        }
        if digits.starts_with('4') {
            return Some(CardBrand::Visa);
        }
        let prefix = |len: usize| digits.get(..len).and_then(|p| p.parse::<u32>().ok());
        if prefix(2).is_some_and(|p| (51..=55).contains(&p))
            || prefix(4).is_some_and(|p| (2221..=2720).contains(&p))
        {
            return Some(CardBrand::Mastercard);
        }
        None
    }

    pub fn max_digits(&self) -> usize {
        match self {
            CardBrand::Amex => 15,
            _ => 16,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "American Express",
            CardBrand::Elo => "Elo",
            CardBrand::Hipercard => "Hipercard",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card number as typed: digits only, capped at the brand's length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardNumber {
    digits: String,
}

impl CardNumber {
    /// Keep the digits of `input`, dropping anything past the brand's maximum length.
    pub fn from_input(input: &str) -> Self {
        let mut digits: String = input.chars().filter(char::is_ascii_digit).collect();
        let max = CardBrand::detect(&digits).map_or(16, |b| b.max_digits());
        digits.truncate(max);
        Self { digits }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn brand(&self) -> Option<CardBrand> {
        CardBrand::detect(&self.digits)
    }

    pub fn is_complete(&self) -> bool {
        self.brand()
            .is_some_and(|b| self.digits.len() == b.max_digits())
    }

    /// Grouped for display: `4-6-5` for Amex, groups of four otherwise.
    pub fn formatted(&self) -> String {
        let groups: &[usize] = match self.brand() {
            Some(CardBrand::Amex) => &[4, 6, 5],
            _ => &[4, 4, 4, 4],
        };

        let mut out = String::with_capacity(self.digits.len() + groups.len());
        let mut rest = self.digits.as_str();
        for &size in groups {
            if rest.is_empty() {
                break;
            }
            let (group, tail) = rest.split_at(size.min(rest.len()));
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(group);
            rest = tail;
        }
        out
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
