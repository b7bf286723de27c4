//! Front end for the text notation: `\frac{N}{D}` or integer coefficients, factors
//! such as `x`, `x_3`, `x^2`, `x_{3}^{2}`, and terms joined by `+` and `-`.

use pest::iterators::Pair;
use pest::Parser;
use std::collections::BTreeMap;

use crate::error::{PolyError, Result};
use crate::poly::field::Field;
use crate::poly::order::MonomialOrder;
use crate::poly::raw::monomial::Monomial;
use crate::poly::raw::multivar::Polynomial;
use crate::poly::variable::{Variable, VariableOrder};

#[cfg(debug_assertions)]
const _GRAMMAR: &str = include_str!("grammar.pest");

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct PolyParser;

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_rule(rule: Rule, input: &str) -> Result<Pair<Rule>> {
    let mut pairs =
        PolyParser::parse(rule, input).map_err(|e| PolyError::MalformedInput(e.to_string()))?;
    pairs
        .next()
        .ok_or_else(|| PolyError::MalformedInput(format!("empty input {:?}", input)))
}

fn parse_i64(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| PolyError::MalformedInput(format!("integer {} does not fit in 64 bits", s)))
}

/// Reads the digits of a subscript or exponent.
fn parse_u32(pair: Pair<Rule>) -> Result<u32> {
    let text = pair.as_str();
    match pair.into_inner().find(|p| p.as_rule() == Rule::digits) {
        Some(d) => d.as_str().parse().map_err(|_| {
            PolyError::MalformedInput(format!("{} does not fit in 32 bits", d.as_str()))
        }),
        None => Err(PolyError::MalformedInput(format!("missing digits in {}", text))),
    }
}

fn parse_coefficient_pair<F: Field>(pair: Pair<Rule>) -> Result<F> {
    let text = pair.as_str();
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::frac => {
                let parts = p
                    .into_inner()
                    .map(|i| parse_i64(i.as_str()))
                    .collect::<Result<Vec<_>>>()?;
                if let [num, den] = *parts.as_slice() {
                    return F::from_fraction(num, den);
                }
            }
            Rule::digits => return F::from_literal(p.as_str()),
            r => unreachable!("unexpected {:?} in coefficient", r),
        }
    }
    Err(PolyError::MalformedInput(format!("bad coefficient {}", text)))
}

fn parse_factor<V: VariableOrder>(pair: Pair<Rule>) -> Result<(Variable<V>, u32)> {
    let text = pair.as_str();
    let mut letter = None;
    let mut index = None;
    let mut degree = 1;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::letter => letter = p.as_str().chars().next(),
            Rule::subscript => index = Some(parse_u32(p)?),
            Rule::exponent => degree = parse_u32(p)?,
            r => unreachable!("unexpected {:?} in factor", r),
        }
    }
    match letter {
        Some(l) => Ok((Variable::new(l, index)?, degree)),
        None => Err(PolyError::MalformedInput(format!("bad factor {}", text))),
    }
}

fn parse_term_body<F: Field, V: VariableOrder>(pair: Pair<Rule>) -> Result<Monomial<F, V>> {
    let mut coefficient = F::one();
    let mut exponents = BTreeMap::new();
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::coefficient => coefficient = parse_coefficient_pair(p)?,
            Rule::factor => {
                let (var, degree) = parse_factor(p)?;
                let d = exponents.entry(var).or_insert(0u32);
                *d = d.checked_add(degree).ok_or_else(|| {
                    PolyError::MalformedInput(format!("exponent of {} does not fit in 32 bits", var))
                })?;
            }
            r => unreachable!("unexpected {:?} in term", r),
        }
    }
    Ok(Monomial::new(coefficient, exponents))
}

/// Parses `first_term` and `next_term` pairs.
fn parse_signed_term<F: Field, V: VariableOrder>(pair: Pair<Rule>) -> Result<Monomial<F, V>> {
    let text = pair.as_str();
    let mut negative = false;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::sign => negative = p.as_str() == "-",
            Rule::term_body => {
                let m = parse_term_body(p)?;
                return Ok(if negative { m.neg() } else { m });
            }
            r => unreachable!("unexpected {:?} in term", r),
        }
    }
    Err(PolyError::MalformedInput(format!("bad term {}", text)))
}

/// Parses a single optionally signed coefficient.
pub fn parse_coefficient<F: Field>(s: &str) -> Result<F> {
    let input = strip_whitespace(s);
    let mut negative = false;
    for p in parse_rule(Rule::field_element, &input)?.into_inner() {
        match p.as_rule() {
            Rule::sign => negative = p.as_str() == "-",
            Rule::coefficient => {
                let c: F = parse_coefficient_pair(p)?;
                return Ok(if negative { -c } else { c });
            }
            r => unreachable!("unexpected {:?} in field element", r),
        }
    }
    Err(PolyError::MalformedInput(format!("bad coefficient {:?}", s)))
}

/// Parses a single term, such as `-\frac{3}{2}x^2y_1`.
pub fn parse_monomial<F: Field, V: VariableOrder>(s: &str) -> Result<Monomial<F, V>> {
    let input = strip_whitespace(s);
    for p in parse_rule(Rule::monomial, &input)?.into_inner() {
        match p.as_rule() {
            Rule::first_term => return parse_signed_term(p),
            r => unreachable!("unexpected {:?} in monomial", r),
        }
    }
    Err(PolyError::MalformedInput(format!("bad monomial {:?}", s)))
}

/// Parses a sum of terms. Terms with the same power product are merged.
pub fn parse_polynomial<F: Field, V: VariableOrder>(
    s: &str,
    order: MonomialOrder,
) -> Result<Polynomial<F, V>> {
    let input = strip_whitespace(s);
    let mut poly = Polynomial::new(order);
    for p in parse_rule(Rule::polynomial, &input)?.into_inner() {
        match p.as_rule() {
            Rule::first_term | Rule::next_term => poly.add_monomial(parse_signed_term(p)?),
            Rule::EOI => {}
            r => unreachable!("unexpected {:?} in polynomial", r),
        }
    }
    Ok(poly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::raw::finitefield::FiniteField;
    use crate::poly::raw::fraction::Fraction;
    use crate::poly::variable::{AsciiOrder, InverseAsciiOrder};

    type P = Polynomial<Fraction, InverseAsciiOrder>;

    fn poly(s: &str) -> Result<P> {
        parse_polynomial(s, MonomialOrder::Grlex)
    }

    fn is_malformed<T>(r: Result<T>) -> bool {
        match r {
            Err(PolyError::MalformedInput(_)) => true,
            _ => false,
        }
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(poly(" x ^ 2 y  -  3 z _ 1 ").unwrap(), poly("x^2y-3z_1").unwrap());
        assert_eq!(poly("\t1\n").unwrap().to_string(), "1");
    }

    #[test]
    fn signs_inside_fractions() {
        let p = poly("\\frac{-1}{2}x - \\frac{+3}{-4}y + \\frac{1}{1}").unwrap();
        assert_eq!(p.to_string(), "-\\frac{1}{2}x + \\frac{3}{4}y + 1");
    }

    #[test]
    fn braced_subscripts_and_exponents() {
        let p = poly("x_{12}^{3} + x_12^3").unwrap();
        assert_eq!(p.to_string(), "2x_{12}^{3}");
        let m: Monomial<Fraction, AsciiOrder> = parse_monomial("y^0x").unwrap();
        assert_eq!(m.to_string(), "x");
    }

    #[test]
    fn zero_and_cancelling_terms() {
        assert!(poly("0").unwrap().is_zero());
        assert!(poly("x - x + 0y").unwrap().is_zero());
        assert!(parse_monomial::<Fraction, AsciiOrder>("0xyz").unwrap().is_zero());
    }

    #[test]
    fn malformed_input() {
        assert!(is_malformed(poly("")));
        assert!(is_malformed(poly("x +")));
        assert!(is_malformed(poly("++x")));
        assert!(is_malformed(poly("x^")));
        assert!(is_malformed(poly("x_{1")));
        assert!(is_malformed(poly("\\frac{1}{2")));
        assert!(is_malformed(poly("\\frac{1}2")));
        assert!(is_malformed(poly("2*x")));
        assert!(is_malformed(poly("x^99999999999")));
        assert!(is_malformed(poly("99999999999999999999x")));
        assert!(is_malformed(parse_monomial::<Fraction, AsciiOrder>("x + y")));
        assert!(is_malformed(parse_coefficient::<Fraction>("x")));
    }

    #[test]
    fn finite_field_coefficients() {
        let p: Polynomial<FiniteField<7>, AsciiOrder> =
            parse_polynomial("8x - 99999999999999999999999y", MonomialOrder::Lex).unwrap();
        assert_eq!(p.to_string(), "3y + x");
        assert!(is_malformed(parse_polynomial::<FiniteField<7>, AsciiOrder>(
            "\\frac{1}{2}x",
            MonomialOrder::Lex
        )));
    }

    #[test]
    fn division_by_zero_in_fraction() {
        assert_eq!(poly("\\frac{3}{0}x"), Err(PolyError::DivideByZero));
    }
}
