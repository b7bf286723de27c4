use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{PolyError, Result};

/// Trait for coefficient fields.
///
/// Implemented by [`Fraction`](crate::poly::raw::fraction::Fraction) (exact rationals) and
/// [`FiniteField`](crate::poly::raw::finitefield::FiniteField) (integers modulo a prime).
/// Addition, subtraction, multiplication and negation are total; everything that
/// divides goes through [`Field::inv`] and reports [`PolyError::DivideByZero`].
pub trait Field:
    Clone
    + Zero
    + One
    + Debug
    + Display
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Multiplicative inverse. Fails on the additive identity.
    fn inv(&self) -> Result<Self>;

    /// Embeds an integer.
    fn from_i64(n: i64) -> Self;

    /// Builds the element `num / den`, if the field supports fraction literals.
    fn from_fraction(num: i64, den: i64) -> Result<Self>;

    /// Parses an unsigned decimal literal.
    fn from_literal(digits: &str) -> Result<Self> {
        digits
            .parse::<i64>()
            .map(Self::from_i64)
            .map_err(|e| PolyError::MalformedInput(format!("integer literal {}: {}", digits, e)))
    }

    /// Whether the element prints with a leading minus sign.
    /// Only meaningful for ordered fields; residues are never negative.
    fn is_negative(&self) -> bool;

    /// Computes `self / other`.
    fn div(&self, other: &Self) -> Result<Self> {
        Ok(self.clone() * other.inv()?)
    }

    /// Computes `self^e` by binary exponentiation. A negative exponent inverts first.
    fn pow(&self, e: i64) -> Result<Self> {
        if e < 0 {
            return Ok(self.inv()?.pow_unsigned(e.unsigned_abs()));
        }
        Ok(self.pow_unsigned(e as u64))
    }

    #[doc(hidden)]
    fn pow_unsigned(&self, mut e: u64) -> Self {
        let mut r = Self::one();
        let mut b = self.clone();
        while e > 0 {
            if e & 1 == 1 {
                r = r * b.clone();
            }
            e >>= 1;
            if e > 0 {
                b = b.clone() * b;
            }
        }
        r
    }
}
