//! Addition-chain costs for S-box exponentiation.
//!
//! `ADD_CHAIN[d]` is the number of field multiplications needed to compute
//! `x^d` with the shortest known addition chain. Every constraint-count
//! formula in [`crate::families`] is built from this table.

use crate::error::{EstimatorError, EstimatorResult};

/// Multiplications needed for `x^d`, indexed by `d`.
pub const ADD_CHAIN: [u64; 10] = [0, 0, 1, 2, 2, 3, 3, 4, 3, 4];

/// Largest degree covered by [`ADD_CHAIN`].
pub const MAX_DEGREE: u64 = (ADD_CHAIN.len() - 1) as u64;

/// Number of multiplications for `x^degree`.
///
/// Degrees above [`MAX_DEGREE`] fail with [`EstimatorError::UnsupportedDegree`]
/// rather than returning a wrong count.
pub fn multiplications(degree: u64) -> EstimatorResult<u64> {
    usize::try_from(degree)
        .ok()
        .and_then(|d| ADD_CHAIN.get(d).copied())
        .ok_or(EstimatorError::UnsupportedDegree { degree, max: MAX_DEGREE })
}

/// Square-and-multiply program for `x^exp`, one statement per line.
///
/// `t` holds the running square and `x` the accumulator; the first set bit
/// initialises `x = t` and is not emitted. Every tenth statement ends with
/// `;`, all others with `,`, so the output can be pasted into a comma
/// expression.
pub fn square_and_multiply_steps(mut exp: u64) -> Vec<String> {
    fn terminator(i: usize) -> char {
        if i % 10 == 0 { ';' } else { ',' }
    }

    let mut steps = Vec::new();
    let mut i = 1usize;
    while exp > 0 {
        if exp & 1 == 1 && i != 1 {
            steps.push(format!("x *= t{}", terminator(i)));
            i += 1;
        }
        exp >>= 1;
        if exp > 0 {
            steps.push(format!("t *= t{}", terminator(i)));
            i += 1;
        }
    }
    steps
}
