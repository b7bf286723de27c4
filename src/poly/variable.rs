use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::{PolyError, Result};

/// Comparison policy between variable letters.
pub trait VariableOrder: Copy + Default + Debug + Eq + Hash + 'static {
    fn cmp_letters(a: u8, b: u8) -> Ordering;
}

/// `a < b < ... < z`: later letters are more significant.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct AsciiOrder;

/// `a > b > ... > z`: earlier letters are more significant.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct InverseAsciiOrder;

impl VariableOrder for AsciiOrder {
    #[inline]
    fn cmp_letters(a: u8, b: u8) -> Ordering {
        a.cmp(&b)
    }
}

impl VariableOrder for InverseAsciiOrder {
    #[inline]
    fn cmp_letters(a: u8, b: u8) -> Ordering {
        b.cmp(&a)
    }
}

/// A symbol `x` or `x_3`: an ASCII letter with an optional subscript.
///
/// Variables with the same letter compare by subscript descending, and a missing
/// subscript ranks above every subscript, so `x > x_0 > x_1 > x_2`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Variable<V: VariableOrder = AsciiOrder> {
    letter: u8,
    index: Option<u32>,
    order: PhantomData<V>,
}

impl<V: VariableOrder> Variable<V> {
    pub fn new(letter: char, index: Option<u32>) -> Result<Variable<V>> {
        if !letter.is_ascii_alphabetic() {
            return Err(PolyError::InvariantViolation(format!(
                "variable name must be a letter in [A-Za-z], got {:?}",
                letter
            )));
        }
        Ok(Variable {
            letter: letter as u8,
            index,
            order: PhantomData,
        })
    }

    #[inline]
    pub fn letter(&self) -> char {
        self.letter as char
    }

    #[inline]
    pub fn index(&self) -> Option<u32> {
        self.index
    }
}

impl<V: VariableOrder> PartialOrd for Variable<V> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: VariableOrder> Ord for Variable<V> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        V::cmp_letters(self.letter, other.letter).then_with(|| other.index.cmp(&self.index))
    }
}

impl<V: VariableOrder> fmt::Display for Variable<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}_{{{}}}", self.letter as char, i),
            None => write!(f, "{}", self.letter as char),
        }
    }
}

impl<V: VariableOrder> fmt::Debug for Variable<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var<V: VariableOrder>(letter: char, index: Option<u32>) -> Variable<V> {
        Variable::new(letter, index).unwrap()
    }

    #[test]
    fn ascii_order() {
        let x: Variable = var('x', None);
        let y: Variable = var('y', None);
        assert!(x < y);
        assert!(var::<AsciiOrder>('Z', None) < var('a', None));
    }

    #[test]
    fn inverse_ascii_order() {
        let x: Variable<InverseAsciiOrder> = var('x', None);
        let y = var('y', None);
        assert!(x > y);
    }

    #[test]
    fn subscripts() {
        let x: Variable = var('x', None);
        let x0 = var('x', Some(0));
        let x1 = var('x', Some(1));
        assert!(x > x0);
        assert!(x0 > x1);
        assert_ne!(x, x0);
        assert!(var::<AsciiOrder>('y', Some(7)) > x);
    }

    #[test]
    fn rejects_non_letters() {
        assert!(Variable::<AsciiOrder>::new('1', None).is_err());
        assert!(Variable::<AsciiOrder>::new('é', Some(2)).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(var::<AsciiOrder>('P', Some(314159)).to_string(), "P_{314159}");
        assert_eq!(var::<AsciiOrder>('a', None).to_string(), "a");
    }
}
