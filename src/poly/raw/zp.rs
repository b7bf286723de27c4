//! Modular arithmetic in Zp (commonly referred as GF(p)): each element x is in the range
//! `0 <= x < p`, where `p * p` must fit in an `i64` so that products never overflow.

/// Largest modulus whose square still fits in an `i64`.
pub const MAX_MODULUS: i64 = 3_037_000_499;

/// Returns true if `p` can back a finite field of this module.
#[inline]
pub const fn is_valid_modulus(p: i64) -> bool {
    p >= 2 && p <= MAX_MODULUS
}

/// Maps any integer to its representative in `[0, p)`.
#[inline]
pub fn reduce(x: i64, p: i64) -> i64 {
    debug_assert!(p > 0);
    let r = x % p;
    if r < 0 {
        r + p
    } else {
        r
    }
}

/// Computes `x + y` in Zp.
#[inline]
pub fn add(x: i64, y: i64, p: i64) -> i64 {
    debug_assert!(x >= 0 && x < p);
    debug_assert!(y >= 0 && y < p);
    let z = x + y;
    if z >= p {
        z - p
    } else {
        z
    }
}

/// Computes `x - y` in Zp.
#[inline]
pub fn sub(x: i64, y: i64, p: i64) -> i64 {
    debug_assert!(x >= 0 && x < p);
    debug_assert!(y >= 0 && y < p);
    let z = x - y;
    if z < 0 {
        z + p
    } else {
        z
    }
}

/// Computes `x * y` in Zp.
#[inline]
pub fn mul(x: i64, y: i64, p: i64) -> i64 {
    debug_assert!(x >= 0 && x < p);
    debug_assert!(y >= 0 && y < p);
    x * y % p
}

/// Computes `-x` in Zp.
#[inline]
pub fn neg(x: i64, p: i64) -> i64 {
    debug_assert!(x >= 0 && x < p);
    if x == 0 {
        0
    } else {
        p - x
    }
}

/// Computes `x^n` in Zp by exponentiation by squaring. `0^0` is 1.
pub fn pow(x: i64, mut n: u64, p: i64) -> i64 {
    debug_assert!(x >= 0 && x < p);
    let mut r = 1 % p;
    let mut b = x;
    while n > 0 {
        if n & 1 != 0 {
            r = mul(r, b, p);
        }
        b = mul(b, b, p);
        n >>= 1;
    }
    r
}

/// Computes `1/x` in Zp using Fermat's little theorem, `x^(p-2)`.
///
/// This is only an inverse when `p` is prime. No primality check is made: for a
/// composite `p` the result is some residue that is generally not an inverse.
#[inline]
pub fn inv(x: i64, p: i64) -> i64 {
    debug_assert!(x > 0 && x < p);
    pow(x, (p - 2) as u64, p)
}

#[test]
fn test_add_sub() {
    for &p in &[2, 97, 32003, 998244353] {
        for &(x, y) in &[(0, 0), (1, p - 1), (p / 2, (p - 1) / 2 + 1), (p - 1, p - 1)] {
            let s = add(x, y, p);
            assert_eq!(s, (x + y) % p);
            assert_eq!(sub(s, y, p), x);
            assert_eq!(sub(x, y, p), (p + x - y) % p);
        }
    }
}

#[test]
fn test_mul_neg() {
    assert_eq!(mul(96, 96, 97), 1);
    assert_eq!(mul(12, 34, 97), 12 * 34 % 97);
    assert_eq!(mul(0, 31999, 32003), 0);
    assert_eq!(mul(MAX_MODULUS - 1, MAX_MODULUS - 1, MAX_MODULUS), 1);
    for &x in &[0, 1, 48, 96] {
        assert_eq!(add(x, neg(x, 97), 97), 0);
    }
}

#[test]
fn test_pow_inv() {
    assert_eq!(pow(0, 0, 97), 1);
    assert_eq!(pow(5, 0, 97), 1);
    assert_eq!(pow(0, 7, 97), 0);
    for x in 2..7 {
        for n in 0..20 {
            assert_eq!(pow(x, n as u64, 32003), x.pow(n) % 32003);
        }
    }
    // Fermat: x^(p-1) = 1
    assert_eq!(pow(3, 998244352, 998244353), 1);
    for &(x, p) in &[(1, 2), (2, 97), (96, 97), (12345, 998244353)] {
        assert_eq!(mul(x, inv(x, p), p), 1);
    }
}

#[test]
fn test_reduce() {
    assert_eq!(reduce(-100, 998244353), 998244353 - 100);
    assert_eq!(reduce(-97, 97), 0);
    assert_eq!(reduce(i64::MIN, 97), i64::MIN.rem_euclid(97));
    assert!(is_valid_modulus(2) && is_valid_modulus(MAX_MODULUS));
    assert!(!is_valid_modulus(1) && !is_valid_modulus(MAX_MODULUS + 1));
}
