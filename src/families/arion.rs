//! Arion round estimator.
//!
//! Arion mixes a low-degree S-box `x^d1` on `n - 1` branches with a
//! high-degree inverse S-box driven by `d2`. The attack degree after `r`
//! rounds is `(2^(n-1)·d2·(d1+1) - d1·d2)^r` and the Gröbner cost is the
//! minimum of a deterministic linear-algebra estimate and a probabilistic
//! one. Everything is evaluated in the log2 domain so large round counts
//! never overflow an `f64`.

use num_bigint::BigUint;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::addchain;
use crate::error::{EstimatorResult, ensure_degree, ensure_width};
use crate::estimator::{PermutationFamily, RoundCount, checked_product, checked_sum};
use crate::field::{FieldModulus, ReferenceField};
use crate::math;

/// First round count tried.
pub const START_ROUNDS: u64 = 4;

/// The search stops here; this value is also the fallback round count.
pub const SEARCH_CAP: u64 = 1000;

/// Linear-algebra exponent `ω` of the deterministic solver.
pub const LINEAR_ALGEBRA_EXPONENT: f64 = 2.0;

/// Arion instance over a prime field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArionParams {
    pub branches: u64,
    pub d1: u64,
    pub d2: u64,
    pub field: FieldModulus,
}

impl ArionParams {
    pub fn new(
        branches: u64,
        d1: u64,
        d2: u64,
        field: impl Into<FieldModulus>,
    ) -> EstimatorResult<Self> {
        let params = Self { branches, d1, d2, field: field.into() };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> EstimatorResult<()> {
        ensure_width("branches", self.branches)?;
        ensure_degree("d1", self.d1)?;
        ensure_degree("d2", self.d2)
    }

    /// Reference fields (BLS12-381, BN254 and the target field) on which
    /// `x^d2` is not a permutation.
    pub fn non_permutation_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = ReferenceField::ARION_CHECKED
            .iter()
            .filter(|f| !f.is_permutation(self.d2))
            .map(|f| f.label().to_string())
            .collect();
        let already_checked = self
            .field
            .reference()
            .is_some_and(|f| ReferenceField::ARION_CHECKED.contains(&f));
        if !already_checked && !self.field.is_permutation(self.d2) {
            fields.push(self.field.label());
        }
        fields
    }

    /// `log2` of the per-round attack-degree base.
    fn log2_degree_base(&self) -> f64 {
        let widened = (BigUint::from(self.d2) * (self.d1 + 1)) << (self.branches - 1);
        math::log2(&(widened - BigUint::from(self.d1) * self.d2))
    }
}

/// Arion round count and the security it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArionRounds {
    pub rounds: RoundCount,
    /// `log2` of the attack cost at the returned round count.
    pub security: f64,
}

impl ArionRounds {
    /// Security rounded to two decimals, printed without trailing zeros.
    fn security_label(&self) -> String {
        let rounded = (self.security * 100.0).round() / 100.0;
        if rounded.fract() == 0.0 { format!("{rounded:.1}") } else { rounded.to_string() }
    }
}

impl fmt::Display for ArionRounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (security level: {})", self.rounds, self.security_label())
    }
}

/// `log2` of the cheaper Gröbner attack after `r` rounds.
fn log2_attack_cost(params: &ArionParams, r: u64) -> f64 {
    let n = params.branches as f64;
    let lp = params.field.log2();
    let ld = r as f64 * params.log2_degree_base();
    let lld = ld.log2();

    let common = ld + (lp * ld * lld + ld * ld * lld).log2();
    let deterministic = math::log2_add(n.log2() + LINEAR_ALGEBRA_EXPONENT * ld, common);
    let probabilistic = math::log2_add(0.5 * n.log2() + (2.0 + (n - 1.0) / n) * ld, common);
    deterministic.min(probabilistic)
}

/// Minimal Arion round count for `security_level` bits.
///
/// The security reached is rounded half-to-even before the comparison.
pub fn rounds(params: &ArionParams, security_level: u32) -> EstimatorResult<ArionRounds> {
    params.validate()?;
    let target = f64::from(security_level);

    let mut security = 0.0;
    for r in START_ROUNDS..SEARCH_CAP {
        security = log2_attack_cost(params, r);
        trace!(r, security, "arion candidate");
        if security.round_ties_even() >= target {
            debug!(
                branches = params.branches,
                d1 = params.d1,
                d2 = params.d2,
                security_level,
                r,
                "arion rounds"
            );
            return Ok(ArionRounds { rounds: RoundCount::converged(r), security });
        }
    }

    warn!(
        branches = params.branches,
        d1 = params.d1,
        d2 = params.d2,
        security_level,
        "arion search exhausted"
    );
    Ok(ArionRounds { rounds: RoundCount::exhausted(SEARCH_CAP), security })
}

/// R1CS size: `(bitlen(d2) + (t - 1)(chain(d1) + 2)) · rounds`.
///
/// Assumes `d2 = 2^k + 1`, evaluated by `k` squarings and one multiplication.
pub fn constraint_count(params: &ArionParams, rounds: u64) -> EstimatorResult<u64> {
    let d2_bits = u64::from(u64::BITS - params.d2.leading_zeros());
    let per_branch = addchain::multiplications(params.d1)? + 2;
    let low_degree = checked_product(&[params.branches.saturating_sub(1), per_branch])?;
    checked_product(&[checked_sum(&[d2_bits, low_degree])?, rounds])
}

impl PermutationFamily for ArionParams {
    type Rounds = ArionRounds;
    const NAME: &'static str = "arion";

    fn rounds(&self, security_level: u32) -> EstimatorResult<ArionRounds> {
        rounds(self, security_level)
    }

    fn constraint_count(&self, rounds: &ArionRounds) -> EstimatorResult<u64> {
        constraint_count(self, rounds.rounds.rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bn254(branches: u64, d1: u64, d2: u64) -> ArionParams {
        ArionParams::new(branches, d1, d2, ReferenceField::Bn254).unwrap()
    }

    #[test]
    fn test_known_round_counts() {
        let cases = [
            // (branches, d1, d2, security_level, rounds, security)
            (3, 2, 5, 128, 12, 137.0375),
            (3, 3, 257, 128, 6, 142.0577),
            (4, 5, 5, 128, 9, 141.4675),
            (5, 2, 121, 128, 6, 151.6310),
            (3, 2, 5, 80, 7, 80.5989),
            (2, 3, 5, 192, 21, 196.0420),
        ];
        for (n, d1, d2, level, expected, security) in cases {
            let est = rounds(&bn254(n, d1, d2), level).unwrap();
            assert_eq!(est.rounds, RoundCount::converged(expected), "n={n} d1={d1} d2={d2}");
            assert!((est.security - security).abs() < 1e-3, "security {}", est.security);
        }
    }

    #[test]
    fn test_start_round_floor() {
        // a tiny target is met immediately, at the starting round count
        let est = rounds(&bn254(3, 3, 257), 16).unwrap();
        assert_eq!(est.rounds.rounds, START_ROUNDS);
    }

    #[test]
    fn test_attack_cost_increases_with_rounds() {
        let params = bn254(3, 2, 5);
        let costs: Vec<f64> = (START_ROUNDS..20).map(|r| log2_attack_cost(&params, r)).collect();
        assert!(costs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_exhaustion_fallback() {
        let est = rounds(&bn254(2, 2, 3), 60_000).unwrap();
        assert_eq!(est.rounds, RoundCount::exhausted(SEARCH_CAP));
        assert!(est.security > 0.0);
    }

    #[test]
    fn test_constraint_count() {
        // bitlen(5) = 3, (3 - 1)(1 + 2) = 6
        assert_eq!(constraint_count(&bn254(3, 2, 5), 5), Ok(45));
        // bitlen(257) = 9, (3 - 1)(2 + 2) = 8
        assert_eq!(constraint_count(&bn254(3, 3, 257), 5), Ok(85));
        assert!(constraint_count(&bn254(3, 10, 5), 5).is_err());
    }

    #[test]
    fn test_non_permutation_fields() {
        // 3 divides both BN254 - 1 and BLS12-381 - 1
        assert_eq!(bn254(3, 2, 3).non_permutation_fields(), vec!["BLS381", "BN254"]);
        assert!(bn254(3, 2, 5).non_permutation_fields().is_empty());

        let custom = FieldModulus::new(BigUint::from(101u32)).unwrap();
        let params = ArionParams::new(3, 2, 5, custom).unwrap();
        assert_eq!(params.non_permutation_fields(), vec!["0x65"]);
        // supplemental reference fields are named, not printed as hex
        let params = ArionParams::new(3, 2, 3, ReferenceField::Pallas).unwrap();
        assert_eq!(params.non_permutation_fields(), vec!["BLS381", "BN254", "Pallas"]);
        let params = ArionParams::new(3, 2, 5, ReferenceField::Bls12_377).unwrap();
        assert_eq!(params.non_permutation_fields(), vec!["BLS377"]);
    }

    #[test]
    fn test_security_display() {
        let est = |security| ArionRounds { rounds: RoundCount::converged(7), security };
        assert_eq!(est(80.5989).to_string(), "7 (security level: 80.6)");
        assert_eq!(est(137.0375).to_string(), "7 (security level: 137.04)");
        assert_eq!(est(140.0012).to_string(), "7 (security level: 140.0)");
    }
}
