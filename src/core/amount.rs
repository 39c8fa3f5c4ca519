//! Fixed-point amounts.
//!
//! The node reports every balance, stake and fee as an integer count of nano
//! units encoded as a decimal string. [`Amount`] holds the value in whole units
//! as an exact decimal so that sums over many small balances never drift.

use rust_decimal::Decimal;
use std::fmt::Display;
use std::iter::Sum;
use std::ops::Add;

/// Decimal places between a nano unit and a whole unit.
pub const NANO_SCALE: u32 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Converts a wire integer of nano units into whole units, i.e. `raw / 10^9`.
    ///
    /// Returns `None` when `raw` is not an unsigned base-10 integer or does not
    /// fit in a 96-bit decimal mantissa.
    pub fn from_nano(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !is_unsigned_digits(raw) {
            return None;
        }
        let nano: i128 = raw.parse().ok()?;
        Decimal::try_from_i128_with_scale(nano, NANO_SCALE)
            .ok()
            .map(|value| Amount(value.normalize()))
    }
}

/// True for a non-empty run of ASCII digits, with no sign.
pub(crate) fn is_unsigned_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
