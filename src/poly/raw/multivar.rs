use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::error::{PolyError, Result};
use crate::parser;
use crate::poly::field::Field;
use crate::poly::order::MonomialOrder;
use crate::poly::raw::monomial::Monomial;
use crate::poly::variable::{AsciiOrder, VariableOrder};

/// Multivariate polynomial stored as a sorted list of terms.
#[derive(Debug, Clone)]
pub struct Polynomial<F: Field, V: VariableOrder = AsciiOrder> {
    // Terms are kept sorted ascending under `order`, so the leading term is the
    // last one. No two terms share a power product and no term is zero.
    terms: Vec<Monomial<F, V>>,
    order: MonomialOrder,
}

impl<F: Field, V: VariableOrder> Polynomial<F, V> {
    /// Constructs a zero polynomial.
    #[inline]
    pub fn new(order: MonomialOrder) -> Self {
        Polynomial {
            terms: Vec::new(),
            order,
        }
    }

    /// Constructs a polynomial with a single term.
    pub fn from_monomial(monomial: Monomial<F, V>, order: MonomialOrder) -> Self {
        let mut p = Polynomial::new(order);
        p.add_monomial(monomial);
        p
    }

    #[inline]
    pub fn constant(c: F, order: MonomialOrder) -> Self {
        Polynomial::from_monomial(Monomial::constant(c), order)
    }

    /// Parses a polynomial in text notation, e.g. `x^2y - \frac{1}{2}z_1 + 3`.
    pub fn parse(s: &str, order: MonomialOrder) -> Result<Self> {
        parser::parse_polynomial(s, order)
    }

    #[inline]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if the polynomial has no variables (zero included).
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|t| t.is_constant())
    }

    /// The terms, least first.
    #[inline]
    pub fn terms(&self) -> &[Monomial<F, V>] {
        &self.terms
    }

    /// The terms, greatest first.
    pub fn iter_descending(&self) -> impl Iterator<Item = &Monomial<F, V>> {
        self.terms.iter().rev()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Greatest term under the polynomial's order, `None` for zero.
    #[inline]
    pub fn leading_monomial(&self) -> Option<&Monomial<F, V>> {
        self.terms.last()
    }

    #[inline]
    pub fn leading_coefficient(&self) -> Option<&F> {
        self.terms.last().map(|t| t.coefficient())
    }

    /// Maximal total degree of a term; 0 for zero.
    pub fn degree(&self) -> u64 {
        self.terms.iter().map(|t| t.degree()).max().unwrap_or(0)
    }

    /// Adds a single term, merging it with an existing term of the same power product.
    pub fn add_monomial(&mut self, monomial: Monomial<F, V>) {
        if monomial.is_zero() {
            return;
        }

        // Binary search to find the insert-point.
        let order = self.order;
        match self.terms.binary_search_by(|t| order.cmp(t, &monomial)) {
            Ok(i) => {
                self.terms[i].increase_coefficient(monomial.coefficient().clone());
                if self.terms[i].is_zero() {
                    self.terms.remove(i);
                }
            }
            Err(i) => self.terms.insert(i, monomial),
        }
    }

    pub fn sub_monomial(&mut self, monomial: &Monomial<F, V>) {
        self.add_monomial(monomial.neg());
    }

    fn check_order(&self, other: &Self) {
        assert_eq!(
            self.order, other.order,
            "monomial orders mismatched between operands"
        );
    }

    /// Merges the sorted terms of `other` into `self`.
    pub fn add_assign(&mut self, other: &Self) {
        self.check_order(other);
        if other.is_zero() {
            return;
        }
        if self.is_zero() {
            self.terms = other.terms.clone();
            return;
        }

        let order = self.order;
        let mut lhs = mem::replace(&mut self.terms, Vec::new()).into_iter().peekable();
        let mut rhs = other.terms.iter().peekable();
        let mut new_terms = Vec::with_capacity(lhs.len() + rhs.len());

        loop {
            let c = match (lhs.peek(), rhs.peek()) {
                (Some(a), Some(b)) => order.cmp(a, b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };
            match c {
                Ordering::Less => new_terms.extend(lhs.next()),
                Ordering::Greater => new_terms.extend(rhs.next().cloned()),
                Ordering::Equal => {
                    if let (Some(mut a), Some(b)) = (lhs.next(), rhs.next()) {
                        a.increase_coefficient(b.coefficient().clone());
                        if !a.is_zero() {
                            new_terms.push(a);
                        }
                    }
                }
            }
        }

        self.terms = new_terms;
    }

    pub fn sub_assign(&mut self, other: &Self) {
        self.add_assign(&other.neg());
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut r = self.clone();
        r.add_assign(other);
        r
    }

    pub fn sub(&self, other: &Self) -> Self {
        let mut r = self.clone();
        r.sub_assign(other);
        r
    }

    pub fn neg(&self) -> Self {
        Polynomial {
            terms: self.terms.iter().map(|t| t.neg()).collect(),
            order: self.order,
        }
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale_assign(&mut self, factor: &F) {
        if factor.is_zero() {
            self.terms.clear();
            return;
        }
        for t in &mut self.terms {
            t.scale_assign(factor);
        }
        // a composite modulus has zero divisors
        self.terms.retain(|t| !t.is_zero());
    }

    pub fn scale(&self, factor: &F) -> Self {
        let mut r = self.clone();
        r.scale_assign(factor);
        r
    }

    pub fn div_scalar_assign(&mut self, divisor: &F) -> Result<()> {
        let inv = divisor.inv()?;
        self.scale_assign(&inv);
        Ok(())
    }

    pub fn div_scalar(&self, divisor: &F) -> Result<Self> {
        let mut r = self.clone();
        r.div_scalar_assign(divisor)?;
        Ok(r)
    }

    /// Multiplies every term by `monomial` in place. Monomial orders are
    /// compatible with multiplication, so the terms stay sorted.
    pub fn mul_monomial_assign(&mut self, monomial: &Monomial<F, V>) {
        if monomial.is_zero() {
            self.terms.clear();
            return;
        }
        for t in &mut self.terms {
            t.mul_assign(monomial);
        }
        self.terms.retain(|t| !t.is_zero());
    }

    pub fn mul_monomial(&self, monomial: &Monomial<F, V>) -> Self {
        let mut r = self.clone();
        r.mul_monomial_assign(monomial);
        r
    }

    pub fn mul_assign(&mut self, other: &Self) {
        self.check_order(other);
        let mut r = Polynomial::new(self.order);
        for t in &other.terms {
            r.add_assign(&self.mul_monomial(t));
        }
        *self = r;
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut r = self.clone();
        r.mul_assign(other);
        r
    }

    /// Exact division of every term by `monomial`.
    pub fn div_monomial(&self, monomial: &Monomial<F, V>) -> Result<Self> {
        if monomial.is_zero() {
            return Err(PolyError::DivideByZero);
        }
        let mut r = Polynomial::new(self.order);
        for t in &self.terms {
            r.add_monomial(t.div(monomial)?);
        }
        Ok(r)
    }

    /// Returns true if every term is divisible by `monomial`. Always false for the
    /// zero monomial.
    pub fn is_divisible_by_monomial(&self, monomial: &Monomial<F, V>) -> bool {
        !monomial.is_zero() && self.terms.iter().all(|t| t.is_divisible_by(monomial))
    }

    /// Scans from the greatest term down and returns the first term divisible by
    /// `target`, or `None` if there is none.
    pub fn highest_monomial_divisible_by(&self, target: &Monomial<F, V>) -> Option<&Monomial<F, V>> {
        self.terms.iter().rev().find(|t| t.is_divisible_by(target))
    }

    /// One step of long division of `other` by `self`: the highest term of `other`
    /// divisible by the leading term of `self` is cancelled. Returns false if no
    /// term of `other` is divisible.
    pub fn do_one_elementary_reduction_over(&self, other: &mut Self) -> bool {
        let lead = match self.leading_monomial() {
            Some(lead) => lead,
            None => return false,
        };
        let quotient = match other
            .highest_monomial_divisible_by(lead)
            .and_then(|t| t.quotient(lead))
        {
            Some(q) => q,
            None => return false,
        };

        trace!("reducing {} by ({}) * ({})", other, quotient, self);
        other.sub_assign(&self.mul_monomial(&quotient));
        true
    }

    /// Divides by the leading coefficient so the leading term becomes monic.
    pub fn normalize(&mut self) {
        let lc = match self.leading_coefficient() {
            Some(lc) if !lc.is_one() => lc.clone(),
            _ => return,
        };
        if let Ok(inv) = lc.inv() {
            self.scale_assign(&inv);
        }
    }

    /// `lcm/lead(p) * p - lcm/lead(q) * q`, where `lcm` is the least common multiple
    /// of the leading terms. Zero if either side is zero.
    pub fn s_polynomial(p: &Self, q: &Self) -> Self {
        p.check_order(q);
        let (lp, lq) = match (p.leading_monomial(), q.leading_monomial()) {
            (Some(lp), Some(lq)) => (lp, lq),
            _ => return Polynomial::new(p.order),
        };
        let lcm = Monomial::lcm(lp, lq);
        match (lcm.quotient(lp), lcm.quotient(lq)) {
            (Some(fp), Some(fq)) => p.mul_monomial(&fp).sub(&q.mul_monomial(&fq)),
            _ => Polynomial::new(p.order),
        }
    }
}

impl<F: Field, V: VariableOrder> PartialEq for Polynomial<F, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        self.order == other.order && self.terms == other.terms
    }
}

impl<F: Field, V: VariableOrder> Eq for Polynomial<F, V> {}

impl<F: Field, V: VariableOrder> fmt::Display for Polynomial<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (i, t) in self.terms.iter().rev().enumerate() {
            if i == 0 {
                write!(f, "{}", t)?;
            } else if t.coefficient().is_negative() {
                write!(f, " - {}", t.neg())?;
            } else {
                write!(f, " + {}", t)?;
            }
        }
        Ok(())
    }
}

impl<F: Field, V: VariableOrder> FromStr for Polynomial<F, V> {
    type Err = PolyError;

    /// Parses under the default order, `Grlex`.
    fn from_str(s: &str) -> Result<Self> {
        Polynomial::parse(s, MonomialOrder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::raw::fraction::Fraction;
    use crate::poly::variable::InverseAsciiOrder;

    type MF = Monomial<Fraction, InverseAsciiOrder>;
    type PMF = Polynomial<Fraction, InverseAsciiOrder>;
    type PA = Polynomial<Fraction, AsciiOrder>;

    fn p(s: &str) -> PMF {
        s.parse().unwrap()
    }

    fn m(s: &str) -> MF {
        s.parse().unwrap()
    }

    fn q(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn lead(p: &PMF) -> MF {
        p.leading_monomial().cloned().unwrap()
    }

    #[test]
    fn arithmetic() {
        let mut p1 = p("abc + bca");
        assert_eq!(p1.to_string(), "2abc");
        p1.add_assign(&p("\\frac{1}{2}cba"));
        assert_eq!(p1.to_string(), "\\frac{5}{2}abc");
        p1.div_scalar_assign(&q(5, 2)).unwrap();
        assert_eq!(p1.to_string(), "abc");
        p1.mul_monomial_assign(&m("\\frac{990}{99}"));
        assert_eq!(p1.to_string(), "10abc");
        p1 = p1.div_monomial(&m("5")).unwrap();
        assert_eq!(p1.to_string(), "2abc");
        p1.mul_assign(&p1.clone());
        p1.mul_assign(&p1.clone());
        assert_eq!(p1.to_string(), "16a^{4}b^{4}c^{4}");
        p1 = p1.div_monomial(&lead(&p1)).unwrap();
        assert_eq!(p1.to_string(), "1");
        assert!(p1.is_divisible_by_monomial(&lead(&p1)));
        p1.sub_assign(&p("      1      - 001 + 1"));
        assert_eq!(p1.to_string(), "0");
        assert!(!p1.is_divisible_by_monomial(&m("0")));
    }

    #[test]
    fn products_and_division() {
        let mut p1 = p("4x_0y_0^2z_0");
        assert_eq!(p1.to_string(), "4x_{0}y_{0}^{2}z_{0}");
        p1 = p1.div_monomial(&lead(&p1)).unwrap();
        assert_eq!(p1.to_string(), "1");
        p1.mul_assign(&p("x + y").mul(&p("x - y")));
        assert_eq!(p1.to_string(), "x^{2} - y^{2}");
        p1 = p1.mul(&p1);
        assert_eq!(p1.to_string(), "x^{4} - 2x^{2}y^{2} + y^{4}");
        assert_eq!(p1.degree(), 4);
        let l = lead(&p1);
        p1.sub_monomial(&l);
        assert!(p1.is_divisible_by_monomial(&m("yy")));
        assert!(!p1.is_divisible_by_monomial(&m("y^3")));
        assert!(!p1.is_divisible_by_monomial(&lead(&p1)));
        p1 = p1.div_monomial(&m("y^2")).unwrap();
        assert_eq!(p1.to_string(), "-2x^{2} + y^{2}");
        let first = p1.iter_descending().next().cloned();
        assert_eq!(first, Some(m("-2x^2")));
        assert_eq!(p1.terms()[0], m("y^2"));
        assert!(matches!(
            p1.div_monomial(&m("x")),
            Err(PolyError::InvariantViolation(_))
        ));
        assert_eq!(p1.div_monomial(&m("0")), Err(PolyError::DivideByZero));
        assert_eq!(
            PMF::new(MonomialOrder::Grlex).div_monomial(&Monomial::zero()),
            Err(PolyError::DivideByZero)
        );
    }

    #[test]
    fn monomial_products_stay_sorted() {
        for &order in &[MonomialOrder::Lex, MonomialOrder::Grlex, MonomialOrder::Grevlex] {
            let mut p1: PMF = Polynomial::parse("x^3 + xy^2z + y^3 + z^2 - 2xz + 5", order).unwrap();
            let expected = Polynomial::parse(
                "x^4y + x^2y^3z + xy^4 + xyz^2 - 2x^2yz + 5xy",
                order,
            )
            .unwrap();
            p1.mul_monomial_assign(&m("xy"));
            assert!(p1.terms().windows(2).all(|w| order.cmp(&w[0], &w[1]).is_lt()));
            assert_eq!(p1, expected);
            p1.mul_monomial_assign(&m("0"));
            assert!(p1.is_zero());
        }
    }

    #[test]
    fn scalars_and_equality() {
        let p2 = p("x^2y + xy^2");
        let p3 = p("x + y");
        assert_eq!(p2.mul(&p3).to_string(), "x^{3}y + 2x^{2}y^{2} + xy^{3}");
        let mut p4 = p2.mul(&p3).div_scalar(&Fraction::from(2)).unwrap();
        assert_eq!(
            p4.to_string(),
            "\\frac{1}{2}x^{3}y + x^{2}y^{2} + \\frac{1}{2}xy^{3}"
        );
        assert_eq!(
            p4,
            p("\\frac{128}{-256}x^3y - \\frac{-5}{-5}x^2y^2 + \\frac{-10}{20}xy^3").neg()
        );
        assert_ne!(p4, p("\\frac{1}{2}x^3y + \\frac{2}{3}x^2y^2 + \\frac{1}{2}xy^3"));
        p4.scale_assign(&Fraction::from(2));
        assert_eq!(p4, p2.mul(&p3));
        p4.div_scalar_assign(&Fraction::from(5)).unwrap();
        assert_eq!(
            p4.to_string(),
            "\\frac{1}{5}x^{3}y + \\frac{2}{5}x^{2}y^{2} + \\frac{1}{5}xy^{3}"
        );
        p4 = p4.div_scalar(&q(1, 5)).unwrap();
        assert_eq!(p4.to_string(), "x^{3}y + 2x^{2}y^{2} + xy^{3}");
        assert_eq!(p4.div_scalar(&Fraction::zero()), Err(PolyError::DivideByZero));
        assert!(p4.scale(&Fraction::zero()).is_zero());

        let c = PMF::constant(q(3, 4), MonomialOrder::Grlex);
        assert!(c.is_constant());
        assert!(!p4.is_constant());
        assert_eq!(c.mul(&p4), p4.scale(&q(3, 4)));
        p4.clear();
        assert!(p4.is_zero() && p4.is_constant());
    }

    #[test]
    fn repeated_squaring() {
        let mut p4 = p("x^3y + 2x^2y^2 + xy^3");
        p4.sub_assign(&p("4yxxy"));
        assert_eq!(p4.to_string(), "x^{3}y - 2x^{2}y^{2} + xy^{3}");
        for _ in 0..4 {
            p4 = p4.mul(&p4);
        }
        assert_eq!(
            p4,
            p("x^48 y^16 - 32 x^47 y^17 + 496 x^46 y^18 - 4960 x^45 y^19 + 35960 x^44 y^20 - 201376 x^43 y^21 + \
               906192 x^42 y^22 - 3365856 x^41 y^23 + 10518300 x^40 y^24 - 28048800 x^39 y^25 + 64512240 x^38 \
               y^26 - 129024480 x^37 y^27 + 225792840 x^36 y^28 - 347373600 x^35 y^29 + 471435600 x^34 y^30 - \
               565722720 x^33 y^31 + 601080390 x^32 y^32 - 565722720 x^31 y^33 + 471435600 x^30 y^34 - \
               347373600 x^29 y^35 + 225792840 x^28 y^36 - 129024480 x^27 y^37 + 64512240 x^26 y^38 - 28048800 \
               x^25 y^39 + 10518300 x^24 y^40 - 3365856 x^23 y^41 + 906192 x^22 y^42 - 201376 x^21 y^43 + 35960 \
               x^20 y^44 - 4960 x^19 y^45 + 496 x^18 y^46 - 32 x^17 y^47 + x^16 y^48")
        );
        assert_eq!(p4.nterms(), 33);
        p4.sub_assign(&p4.clone());
        assert_eq!(p4, PMF::new(MonomialOrder::Grlex));
        assert_eq!(p4.to_string(), "0");
        p4.normalize();
        assert_eq!(p4.to_string(), "0");
    }

    #[test]
    fn normalize_and_divisible_search() {
        let mut p4 = p("-2x^2 + y^2");
        p4.normalize();
        assert_eq!(p4.to_string(), "x^{2} - \\frac{1}{2}y^{2}");
        assert_eq!(p4.leading_coefficient(), Some(&Fraction::one()));
        assert!(PMF::s_polynomial(&p("1"), &p("1")).is_zero());
        assert_eq!(
            p4.highest_monomial_divisible_by(&m("yy")),
            Some(&m("\\frac{-1}{2}yy"))
        );
        assert_eq!(p4.highest_monomial_divisible_by(&m("z")), None);
    }

    #[test]
    fn elementary_reduction() {
        let mut p1 = p("x_1x_2x_3");
        let p2 = p("x_1x_3-x_4");
        assert!(p2.do_one_elementary_reduction_over(&mut p1));
        assert_eq!(p1.to_string(), "x_{2}x_{4}");
        assert!(!p2.do_one_elementary_reduction_over(&mut p1));

        // a non-leading term gets eliminated
        let mut p3 = p("x^3 + yz");
        assert!(p("z - 1").do_one_elementary_reduction_over(&mut p3));
        assert_eq!(p3.to_string(), "x^{3} + y");
    }

    #[test]
    fn s_polynomial() {
        let f = p("x^3 - 2xy");
        let g = p("x^2y - 2y^2 + x");
        assert_eq!(PMF::s_polynomial(&f, &g), p("-x^2"));
        assert!(PMF::s_polynomial(&f, &PMF::new(MonomialOrder::Grlex)).is_zero());
    }

    #[test]
    fn render_under_each_order() {
        let s = "4xy^2z + 4z^2 - 5x^3 + 7x^2z^2";
        let lex = PMF::parse(s, MonomialOrder::Lex).unwrap();
        let grlex = PMF::parse(s, MonomialOrder::Grlex).unwrap();
        let grevlex = PMF::parse(s, MonomialOrder::Grevlex).unwrap();
        assert_eq!(lex.to_string(), "-5x^{3} + 7x^{2}z^{2} + 4xy^{2}z + 4z^{2}");
        assert_eq!(grlex.to_string(), "7x^{2}z^{2} + 4xy^{2}z - 5x^{3} + 4z^{2}");
        assert_eq!(grevlex.to_string(), "4xy^{2}z + 7x^{2}z^{2} - 5x^{3} + 4z^{2}");
        assert_ne!(lex, grlex);
        assert_eq!(PMF::parse(&grlex.to_string(), MonomialOrder::Grlex).unwrap(), grlex);
    }

    #[test]
    fn ascii_variable_order() {
        let p1 = PA::parse("x + y + z + x^2y + z^2y + z^2", MonomialOrder::Lex).unwrap();
        assert_eq!(p1.to_string(), "z^{2}y + z^{2} + z + yx^{2} + y + x");
        let p2 = PA::parse(
            "x_1 + x_2 + x_3 + x_2^100 + x_1x_3^10 + 2x_1x_2 + y",
            MonomialOrder::Lex,
        )
        .unwrap();
        assert_eq!(
            p2.to_string(),
            "y + 2x_{1}x_{2} + x_{1}x_{3}^{10} + x_{1} + x_{2}^{100} + x_{2} + x_{3}"
        );
    }

    #[test]
    #[should_panic(expected = "monomial orders mismatched")]
    fn mixing_orders_panics() {
        let a = PMF::parse("x", MonomialOrder::Lex).unwrap();
        let b = PMF::parse("y", MonomialOrder::Grlex).unwrap();
        a.add(&b);
    }
}
