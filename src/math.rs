//! Exact big-integer helpers used by the attack-cost models.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Bit length above which values are rescaled before conversion to `f64`.
const F64_SAFE_BITS: u64 = 1000;

/// `2^exp` as a big integer.
pub fn pow2(exp: u32) -> BigUint {
    BigUint::one() << exp
}

/// Binomial coefficient `C(n, k)`, exact. Returns zero when `k > n`.
pub fn binomial(n: &BigUint, k: u64) -> BigUint {
    let k_big = BigUint::from(k);
    if k_big > *n {
        return BigUint::zero();
    }
    // C(n, k) == C(n, n - k); pick the shorter product when n - k is small
    let k = match (n - &k_big).to_u64() {
        Some(rest) => k.min(rest),
        None => k,
    };

    let mut acc = BigUint::one();
    for i in 0..k {
        acc *= n - BigUint::from(i);
        acc /= BigUint::from(i + 1);
    }
    acc
}

/// Binomial coefficient over signed indices, `C(n, k)`.
///
/// A negative index yields zero, as does `k > n`.
pub fn binomial_signed(n: i128, k: i128) -> BigUint {
    match (u128::try_from(n), u64::try_from(k)) {
        (Ok(n), Ok(k)) => binomial(&BigUint::from(n), k),
        _ => BigUint::zero(),
    }
}

/// `log2(n)` for an arbitrarily large integer. `n` must be non-zero.
pub fn log2(n: &BigUint) -> f64 {
    let bits = n.bits();
    if bits <= F64_SAFE_BITS {
        return n.to_f64().map_or(f64::INFINITY, f64::log2);
    }
    let shift = bits - 64;
    let head = (n >> shift).to_f64().unwrap_or(f64::INFINITY);
    head.log2() + shift as f64
}

/// Natural logarithm of an arbitrarily large integer. `n` must be non-zero.
pub fn ln(n: &BigUint) -> f64 {
    let bits = n.bits();
    if bits <= F64_SAFE_BITS {
        return n.to_f64().map_or(f64::INFINITY, f64::ln);
    }
    let shift = bits - 64;
    let head = (n >> shift).to_f64().unwrap_or(f64::INFINITY);
    head.ln() + shift as f64 * std::f64::consts::LN_2
}

/// `log2(2^a + 2^b)` without leaving the log domain.
pub fn log2_add(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (1.0 + (lo - hi).exp2()).log2()
}
