//! Fixed-point decimal types for prices and quantities
//!
//! The wire carries `f64` fields; inside the book everything is keyed
//! and summed as `rust_decimal::Decimal` so that BTreeMap ordering and
//! level totals stay exact. Conversion happens once, at order
//! admission.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Price of a resting or incoming order.
///
/// Strictly positive for anything stored in the book. Ordered, so it
/// can key a price-level map directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a positive decimal.
    ///
    /// # Panics
    /// Panics if the value is not strictly positive.
    pub fn new(value: Decimal) -> Self {
        assert!(value > Decimal::ZERO, "Price must be positive");
        Self(value)
    }

    /// Convert a wire `f64` into a book price.
    ///
    /// Returns `None` for non-finite, zero or negative values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Decimal::from_f64(value).map(Self)
    }

    /// Convenience constructor for tests.
    pub fn from_u64(value: u64) -> Self {
        Self::new(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Wire representation.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity of an order or a fill.
///
/// Zero is allowed (filled quantity starts at zero); negative values
/// are not representable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a quantity from a non-negative decimal.
    ///
    /// # Panics
    /// Panics if the value is negative.
    pub fn new(value: Decimal) -> Self {
        assert!(value >= Decimal::ZERO, "Quantity cannot be negative");
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Convert a wire `f64` into a quantity.
    ///
    /// Returns `None` for non-finite, zero or negative values; an
    /// order with no size is invalid at admission.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Decimal::from_f64(value).map(Self)
    }

    /// Convenience constructor for tests.
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Smaller of the two quantities (fill sizing).
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "Quantity subtraction would go negative");
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        assert!(self.0 >= rhs.0, "Quantity subtraction would go negative");
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_f64() {
        let price = Price::from_f64(105.5).unwrap();
        assert_eq!(price.to_f64(), 105.5);
    }

    #[test]
    fn test_price_rejects_invalid() {
        assert!(Price::from_f64(0.0).is_none());
        assert!(Price::from_f64(-1.0).is_none());
        assert!(Price::from_f64(f64::NAN).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    #[should_panic(expected = "Price must be positive")]
    fn test_price_negative_panics() {
        Price::new(Decimal::from(-100));
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::from_u64(100) < Price::from_u64(101));
    }

    #[test]
    fn test_quantity_arithmetic() {
        let mut q = Quantity::from_u64(10);
        q += Quantity::from_u64(5);
        assert_eq!(q, Quantity::from_u64(15));
        q -= Quantity::from_u64(15);
        assert!(q.is_zero());
    }

    #[test]
    #[should_panic(expected = "go negative")]
    fn test_quantity_underflow_panics() {
        let _ = Quantity::from_u64(1) - Quantity::from_u64(2);
    }

    #[test]
    fn test_quantity_min() {
        let a = Quantity::from_u64(3);
        let b = Quantity::from_u64(7);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }

    #[test]
    fn test_quantity_rejects_zero_wire_value() {
        assert!(Quantity::from_f64(0.0).is_none());
        assert!(Quantity::from_f64(-2.5).is_none());
    }
}
