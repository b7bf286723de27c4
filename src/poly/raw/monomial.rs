use num_traits::{One, Zero};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{PolyError, Result};
use crate::parser;
use crate::poly::field::Field;
use crate::poly::variable::{AsciiOrder, Variable, VariableOrder};

/// A coefficient times a power product.
///
/// Every stored exponent is positive, and the coefficient is zero exactly when the
/// exponent map is empty and the monomial is the canonical zero monomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial<F: Field, V: VariableOrder = AsciiOrder> {
    coefficient: F,
    exponents: BTreeMap<Variable<V>, u32>,
}

impl<F: Field, V: VariableOrder> Monomial<F, V> {
    /// Builds a monomial from raw parts, dropping zero exponents.
    pub fn new(coefficient: F, mut exponents: BTreeMap<Variable<V>, u32>) -> Monomial<F, V> {
        if coefficient.is_zero() {
            exponents.clear();
        } else {
            exponents.retain(|_, e| *e > 0);
        }
        Monomial {
            coefficient,
            exponents,
        }
    }

    #[inline]
    pub fn zero() -> Monomial<F, V> {
        Monomial::constant(F::zero())
    }

    #[inline]
    pub fn one() -> Monomial<F, V> {
        Monomial::constant(F::one())
    }

    #[inline]
    pub fn constant(coefficient: F) -> Monomial<F, V> {
        Monomial {
            coefficient,
            exponents: BTreeMap::new(),
        }
    }

    /// Builds `coefficient * var^degree`.
    pub fn from_variable(coefficient: F, var: Variable<V>, degree: u32) -> Monomial<F, V> {
        let mut exponents = BTreeMap::new();
        exponents.insert(var, degree);
        Monomial::new(coefficient, exponents)
    }

    #[inline]
    pub fn coefficient(&self) -> &F {
        &self.coefficient
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// True for monomials without variables, including zero.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Total degree.
    pub fn degree(&self) -> u64 {
        self.exponents.values().map(|&e| e as u64).sum()
    }

    pub fn degree_of(&self, var: &Variable<V>) -> u32 {
        self.exponents.get(var).cloned().unwrap_or(0)
    }

    /// Variables with their degrees, least significant variable first.
    pub fn variables(&self) -> impl DoubleEndedIterator<Item = (&Variable<V>, u32)> {
        self.exponents.iter().map(|(v, e)| (v, *e))
    }

    pub(crate) fn exponent_map(&self) -> &BTreeMap<Variable<V>, u32> {
        &self.exponents
    }

    /// Adds `offset` to the coefficient, collapsing to zero if it cancels.
    pub fn increase_coefficient(&mut self, offset: F) {
        let c = std::mem::replace(&mut self.coefficient, F::zero());
        self.coefficient = c + offset;
        if self.coefficient.is_zero() {
            self.exponents.clear();
        }
    }

    pub fn scale_assign(&mut self, factor: &F) {
        let c = std::mem::replace(&mut self.coefficient, F::zero());
        self.coefficient = c * factor.clone();
        if self.coefficient.is_zero() {
            self.exponents.clear();
        }
    }

    pub fn scale(&self, factor: &F) -> Monomial<F, V> {
        let mut r = self.clone();
        r.scale_assign(factor);
        r
    }

    pub fn div_scalar(&self, divisor: &F) -> Result<Monomial<F, V>> {
        let inv = divisor.inv()?;
        Ok(self.scale(&inv))
    }

    pub fn neg(&self) -> Monomial<F, V> {
        Monomial {
            coefficient: -self.coefficient.clone(),
            exponents: self.exponents.clone(),
        }
    }

    pub fn mul_assign(&mut self, other: &Monomial<F, V>) {
        self.scale_assign(&other.coefficient);
        if self.is_zero() {
            return;
        }
        for (var, e) in &other.exponents {
            self.add_exponent(*var, *e);
        }
    }

    pub fn mul(&self, other: &Monomial<F, V>) -> Monomial<F, V> {
        let mut r = self.clone();
        r.mul_assign(other);
        r
    }

    /// Multiplies by a single variable.
    pub fn mul_variable(&mut self, var: Variable<V>) {
        if !self.is_zero() {
            self.add_exponent(var, 1);
        }
    }

    fn add_exponent(&mut self, var: Variable<V>, e: u32) {
        match self.exponents.entry(var) {
            Entry::Occupied(mut o) => {
                let ee = o.get_mut();
                *ee = ee.checked_add(e).expect("overflow in adding exponents");
            }
            Entry::Vacant(v) => {
                if e > 0 {
                    v.insert(e);
                }
            }
        }
    }

    /// Returns true if every exponent of `other` is at most the matching exponent of
    /// `self`. Nothing is divisible by the zero monomial; zero is divisible by
    /// everything else.
    pub fn is_divisible_by(&self, other: &Monomial<F, V>) -> bool {
        if other.is_zero() {
            return false;
        }
        if self.is_zero() {
            return true;
        }
        other
            .exponents
            .iter()
            .all(|(var, e)| self.degree_of(var) >= *e)
    }

    /// Exact division, or `None` if `other` does not divide `self`.
    pub fn quotient(&self, other: &Monomial<F, V>) -> Option<Monomial<F, V>> {
        if !self.is_divisible_by(other) {
            return None;
        }
        let inv = other.coefficient.inv().ok()?;
        let mut r = self.scale(&inv);
        if r.is_zero() {
            return Some(r);
        }
        for (var, e) in &other.exponents {
            if let Entry::Occupied(mut o) = r.exponents.entry(*var) {
                *o.get_mut() -= *e;
                if *o.get() == 0 {
                    o.remove();
                }
            }
        }
        Some(r)
    }

    /// Exact division that reports why it failed.
    pub fn div(&self, other: &Monomial<F, V>) -> Result<Monomial<F, V>> {
        if other.is_zero() {
            return Err(PolyError::DivideByZero);
        }
        self.quotient(other).ok_or_else(|| {
            PolyError::InvariantViolation(format!(
                "{} is not divisible by {}: exponents would become negative",
                self, other
            ))
        })
    }

    pub fn div_assign(&mut self, other: &Monomial<F, V>) -> Result<()> {
        *self = self.div(other)?;
        Ok(())
    }

    /// Greatest common divisor of the power products, with coefficient one.
    /// If either side is zero, the other one is returned.
    pub fn gcd(a: &Monomial<F, V>, b: &Monomial<F, V>) -> Monomial<F, V> {
        if a.is_zero() {
            return b.clone();
        }
        if b.is_zero() {
            return a.clone();
        }
        let exponents = a
            .exponents
            .iter()
            .filter_map(|(var, e)| {
                let m = (*e).min(b.degree_of(var));
                if m > 0 {
                    Some((*var, m))
                } else {
                    None
                }
            })
            .collect();
        Monomial {
            coefficient: F::one(),
            exponents,
        }
    }

    /// Least common multiple of the power products, with coefficient one.
    /// If either side is zero, the other one is returned.
    pub fn lcm(a: &Monomial<F, V>, b: &Monomial<F, V>) -> Monomial<F, V> {
        if a.is_zero() {
            return b.clone();
        }
        if b.is_zero() {
            return a.clone();
        }
        let mut exponents = a.exponents.clone();
        for (var, e) in &b.exponents {
            let ee = exponents.entry(*var).or_insert(0);
            *ee = (*ee).max(*e);
        }
        Monomial {
            coefficient: F::one(),
            exponents,
        }
    }
}

impl<F: Field, V: VariableOrder> fmt::Display for Monomial<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut coefficient = self.coefficient.clone();
        if coefficient.is_negative() {
            write!(f, "-")?;
            coefficient = -coefficient;
        }
        if !coefficient.is_one() || self.exponents.is_empty() {
            write!(f, "{}", coefficient)?;
        }
        for (var, e) in self.exponents.iter().rev() {
            write!(f, "{}", var)?;
            if *e > 1 {
                write!(f, "^{{{}}}", e)?;
            }
        }
        Ok(())
    }
}

impl<F: Field, V: VariableOrder> FromStr for Monomial<F, V> {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_monomial(s)
    }
}
