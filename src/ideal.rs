//! Ideals of a polynomial ring and Buchberger's algorithm.

use num_traits::One;
use std::fmt;

use crate::error::Result;
use crate::poly::field::Field;
use crate::poly::order::MonomialOrder;
use crate::poly::raw::monomial::Monomial;
use crate::poly::raw::multivar::Polynomial;
use crate::poly::variable::{AsciiOrder, VariableOrder};

/// How far the generating set has been upgraded. Each state implies the ones before it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BasisType {
    Any,
    Groebner,
    MinimalGroebner,
    ReducedGroebner,
}

/// An ideal given by a list of generators, all normalized and nonzero.
#[derive(Debug, Clone)]
pub struct Ideal<F: Field, V: VariableOrder = AsciiOrder> {
    store: Vec<Polynomial<F, V>>,
    basis_type: BasisType,
    order: MonomialOrder,
}

impl<F: Field, V: VariableOrder> Ideal<F, V> {
    /// The zero ideal.
    pub fn new(order: MonomialOrder) -> Self {
        Ideal {
            store: Vec::new(),
            basis_type: BasisType::Any,
            order,
        }
    }

    pub fn from_polynomials<I>(order: MonomialOrder, generators: I) -> Self
    where
        I: IntoIterator<Item = Polynomial<F, V>>,
    {
        let mut ideal = Ideal::new(order);
        for p in generators {
            ideal.insert(p);
        }
        ideal
    }

    /// Parses every generator under `order`.
    pub fn from_strs(order: MonomialOrder, generators: &[&str]) -> Result<Self> {
        let mut ideal = Ideal::new(order);
        for s in generators {
            ideal.insert_str(s)?;
        }
        Ok(ideal)
    }

    #[inline]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    #[inline]
    pub fn basis_type(&self) -> BasisType {
        self.basis_type
    }

    /// The generators in insertion order.
    #[inline]
    pub fn generators(&self) -> &[Polynomial<F, V>] {
        &self.store
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.basis_type = BasisType::Any;
    }

    /// Appends `p` made monic. The zero polynomial is ignored.
    pub fn insert(&mut self, mut p: Polynomial<F, V>) {
        if p.is_zero() {
            return;
        }
        assert_eq!(
            p.order(),
            self.order,
            "monomial orders mismatched between ideal and generator"
        );
        p.normalize();
        self.store.push(p);
        self.basis_type = BasisType::Any;
    }

    pub fn insert_str(&mut self, s: &str) -> Result<()> {
        let p = Polynomial::parse(s, self.order)?;
        self.insert(p);
        Ok(())
    }

    /// Runs one elementary reduction of `p` by every generator. Returns true if any
    /// of them changed `p`.
    pub fn reduce_by_set_once(&self, p: &mut Polynomial<F, V>) -> bool {
        reduce_by_set_once(&self.store, p)
    }

    /// Reduces `p` until no generator changes it any more.
    pub fn reduce(&self, p: &mut Polynomial<F, V>) {
        reduce_over(&self.store, p);
    }

    /// The fully reduced copy of `p`.
    pub fn normal_form(&self, p: &Polynomial<F, V>) -> Polynomial<F, V> {
        let mut r = p.clone();
        self.reduce(&mut r);
        r
    }

    pub fn is_reducible_to_zero(&self, p: &Polynomial<F, V>) -> bool {
        self.normal_form(p).is_zero()
    }

    /// Buchberger's algorithm. Does nothing unless the state is `Any`.
    pub fn make_groebner_basis(&mut self) {
        if self.basis_type != BasisType::Any {
            return;
        }

        // the store grows while pairs are visited; later generators get their
        // own turn as `i`
        let mut i = 0;
        while i < self.store.len() {
            for j in 0..i {
                if leading_monomials_coprime(&self.store[i], &self.store[j]) {
                    trace!("Skipping coprime pair ({}, {})", i, j);
                    continue;
                }

                let mut s = Polynomial::s_polynomial(&self.store[i], &self.store[j]);
                self.reduce(&mut s);
                if !s.is_zero() {
                    debug!("S-polynomial of ({}, {}) adds {}", i, j, s);
                    self.insert(s);
                }
            }
            i += 1;
        }

        self.basis_type = BasisType::Groebner;
        info!("Groebner basis with {} generators", self.store.len());
    }

    /// Drops generators whose leading term is divisible by the leading term of
    /// another one.
    pub fn make_minimal_groebner_basis(&mut self) {
        if self.basis_type >= BasisType::MinimalGroebner {
            return;
        }
        self.make_groebner_basis();

        let mut i = 0;
        while i < self.store.len() {
            let redundant = (0..self.store.len())
                .any(|j| j != i && leading_monomial_divides(&self.store[j], &self.store[i]));
            if redundant {
                debug!("Removing redundant generator {}", self.store[i]);
                self.store.remove(i);
            } else {
                i += 1;
            }
        }

        self.basis_type = BasisType::MinimalGroebner;
        info!("Minimal Groebner basis with {} generators", self.store.len());
    }

    /// Reduces every generator by all the others.
    pub fn make_reduced_groebner_basis(&mut self) {
        if self.basis_type >= BasisType::ReducedGroebner {
            return;
        }
        self.make_minimal_groebner_basis();

        for i in 0..self.store.len() {
            let mut p = self.store.remove(i);
            reduce_over(&self.store, &mut p);
            self.store.insert(i, p);
        }

        assert!(
            self.store
                .iter()
                .all(|p| p.leading_coefficient().map_or(false, |c| c.is_one())),
            "reduced basis contains a generator that is not monic"
        );
        self.basis_type = BasisType::ReducedGroebner;
        info!("Reduced Groebner basis with {} generators", self.store.len());
    }

    /// Ideal membership. Upgrades to a Groebner basis first.
    pub fn contains(&mut self, p: &Polynomial<F, V>) -> bool {
        self.make_groebner_basis();
        self.is_reducible_to_zero(p)
    }

    /// Returns true if `p` is literally one of the generators.
    pub fn basis_contains(&self, p: &Polynomial<F, V>) -> bool {
        self.store.iter().any(|g| g == p)
    }

    /// Returns true if the generators are exactly `basis`, in any order.
    pub fn is_basis_equal_to(&self, basis: &[Polynomial<F, V>]) -> bool {
        basis.len() == self.store.len() && basis.iter().all(|p| self.basis_contains(p))
    }
}

fn reduce_by_set_once<F: Field, V: VariableOrder>(
    generators: &[Polynomial<F, V>],
    p: &mut Polynomial<F, V>,
) -> bool {
    let mut reduced = false;
    for g in generators {
        reduced |= g.do_one_elementary_reduction_over(p);
    }
    reduced
}

fn reduce_over<F: Field, V: VariableOrder>(
    generators: &[Polynomial<F, V>],
    p: &mut Polynomial<F, V>,
) {
    while reduce_by_set_once(generators, p) {}
}

fn leading_monomials_coprime<F: Field, V: VariableOrder>(
    a: &Polynomial<F, V>,
    b: &Polynomial<F, V>,
) -> bool {
    match (a.leading_monomial(), b.leading_monomial()) {
        (Some(la), Some(lb)) => Monomial::gcd(la, lb).is_constant(),
        _ => false,
    }
}

/// Does the leading monomial of `divisor` divide the one of `p`?
fn leading_monomial_divides<F: Field, V: VariableOrder>(
    divisor: &Polynomial<F, V>,
    p: &Polynomial<F, V>,
) -> bool {
    match (p.leading_monomial(), divisor.leading_monomial()) {
        (Some(lp), Some(ld)) => lp.is_divisible_by(ld),
        _ => false,
    }
}

impl<F: Field, V: VariableOrder> fmt::Display for Ideal<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{{")?;
        for p in &self.store {
            writeln!(f, "\t{}", p)?;
        }
        write!(f, "}}")
    }
}
