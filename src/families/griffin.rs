//! Griffin round estimator.
//!
//! Combines an interpolation bound depending on the field size with a
//! Gröbner bound taken as the smaller of two binomial estimates, then
//! adds a 20% margin on top of the larger of the two (and of [`MIN_ROUNDS`]).

use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, trace, warn};

use crate::addchain;
use crate::error::{EstimatorError, EstimatorResult, ensure_degree, ensure_width};
use crate::estimator::{PermutationFamily, RoundCount, checked_product, checked_sum};
use crate::field::FieldModulus;
use crate::math;

/// Upper bound on the Gröbner round search; also its fallback value.
pub const GROEBNER_SEARCH_CAP: u64 = 100;

/// Minimum round count before the margin is applied.
pub const MIN_ROUNDS: u64 = 6;

/// Multiplicative security margin.
pub const SAFETY_FACTOR: f64 = 1.2;

/// Interpolation bound: `ceil(INTERPOLATION_FACTOR · κ / (log2 p - log2(d - 1)))`.
pub const INTERPOLATION_FACTOR: f64 = 2.5;

/// Griffin instance: state width `t` (`branches`) and S-box degree `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GriffinParams {
    pub branches: u64,
    pub d: u64,
    pub field: FieldModulus,
}

impl GriffinParams {
    pub fn new(branches: u64, d: u64, field: impl Into<FieldModulus>) -> EstimatorResult<Self> {
        let params = Self { branches, d, field: field.into() };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> EstimatorResult<()> {
        ensure_width("branches", self.branches)?;
        if self.branches < 2 {
            let reason = "Griffin needs a state of at least 2 elements";
            return Err(EstimatorError::invalid("branches", reason));
        }
        ensure_degree("d", self.d)?;
        if BigUint::from(self.d - 1) >= *self.field.value() {
            let reason = "d - 1 must be smaller than the field modulus";
            return Err(EstimatorError::invalid("d", reason));
        }
        Ok(())
    }
}

/// Round count forced by interpolation attacks.
pub fn interpolation_rounds(params: &GriffinParams, security_level: u32) -> EstimatorResult<u64> {
    params.validate()?;
    let denominator = params.field.log2() - ((params.d - 1) as f64).log2();
    let bound = (INTERPOLATION_FACTOR * f64::from(security_level) / denominator).ceil();
    Ok(bound.max(0.0) as u64)
}

/// First round count whose Gröbner cost reaches `2^(κ/2)`.
pub fn groebner_rounds(params: &GriffinParams, security_level: u32) -> EstimatorResult<RoundCount> {
    params.validate()?;
    let target = math::pow2(security_level >> 1);
    let (t, d) = (params.branches, params.d);

    for r in 0..GROEBNER_SEARCH_CAP {
        let by_width = math::binomial(&BigUint::from(r * (d + t) + 1), 1 + t * r);
        let exp = u32::try_from(r).map_err(|_| EstimatorError::invalid("rounds", "exceeds u32"))?;
        let by_degree = math::binomial(&(BigUint::from(d).pow(exp) + BigUint::one() + r), 1 + r);
        let cost = by_width.min(by_degree);
        trace!(r, log2_cost = cost.bits(), "griffin groebner candidate");
        if cost >= target {
            return Ok(RoundCount::converged(r));
        }
    }

    warn!(branches = t, d, security_level, "griffin groebner search exhausted");
    Ok(RoundCount::exhausted(GROEBNER_SEARCH_CAP))
}

/// Minimal Griffin round count for `security_level` bits.
pub fn rounds(params: &GriffinParams, security_level: u32) -> EstimatorResult<RoundCount> {
    let interpolation = interpolation_rounds(params, security_level)?;
    let groebner = groebner_rounds(params, security_level)?;

    let bound = MIN_ROUNDS.max(interpolation).max(1 + groebner.rounds);
    let nr = (SAFETY_FACTOR * bound as f64).ceil() as u64;
    debug!(
        branches = params.branches,
        d = params.d,
        security_level,
        interpolation,
        groebner = groebner.rounds,
        nr,
        "griffin rounds"
    );
    Ok(RoundCount { rounds: nr, outcome: groebner.outcome })
}

/// R1CS size: `(2·chain(d) + 2(t - 2)) · rounds`.
pub fn constraint_count(params: &GriffinParams, rounds: u64) -> EstimatorResult<u64> {
    let sbox = checked_product(&[2, addchain::multiplications(params.d)?])?;
    let linear = checked_product(&[2, params.branches.saturating_sub(2)])?;
    checked_product(&[checked_sum(&[sbox, linear])?, rounds])
}

impl PermutationFamily for GriffinParams {
    type Rounds = RoundCount;
    const NAME: &'static str = "griffin";

    fn rounds(&self, security_level: u32) -> EstimatorResult<RoundCount> {
        rounds(self, security_level)
    }

    fn constraint_count(&self, rounds: &RoundCount) -> EstimatorResult<u64> {
        constraint_count(self, rounds.rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ReferenceField;

    fn bn254(branches: u64, d: u64) -> GriffinParams {
        GriffinParams::new(branches, d, ReferenceField::Bn254).unwrap()
    }

    #[test]
    fn test_known_round_counts() {
        let cases = [
            // (branches, d, security_level, rounds)
            (3, 3, 128, 16),
            (3, 5, 128, 12),
            (4, 3, 128, 14),
            (4, 5, 128, 11),
            (8, 3, 128, 11),
            (8, 5, 128, 9),
            (3, 3, 80, 11),
            (3, 7, 256, 20),
        ];
        for (t, d, level, expected) in cases {
            assert_eq!(
                rounds(&bn254(t, d), level),
                Ok(RoundCount::converged(expected)),
                "t={t} d={d}"
            );
        }
    }

    #[test]
    fn test_components() {
        assert_eq!(interpolation_rounds(&bn254(3, 5), 128), Ok(2));
        assert_eq!(groebner_rounds(&bn254(3, 5), 128), Ok(RoundCount::converged(9)));
        assert_eq!(interpolation_rounds(&bn254(3, 3), 1000), Ok(10));
        assert_eq!(groebner_rounds(&bn254(3, 3), 1000), Ok(RoundCount::converged(84)));
    }

    #[test]
    fn test_same_answer_on_bls12_381() {
        let bls = GriffinParams::new(3, 5, ReferenceField::Bls12_381).unwrap();
        assert_eq!(rounds(&bls, 128), rounds(&bn254(3, 5), 128));
    }

    #[test]
    fn test_exhaustion_fallback() {
        // groebner search gives up at 100, 1 + 100 rounds with 20% margin
        assert_eq!(rounds(&bn254(3, 3), 4000), Ok(RoundCount::exhausted(122)));
    }

    #[test]
    fn test_constraint_count() {
        assert_eq!(constraint_count(&bn254(3, 3), 10), Ok(60));
        assert_eq!(constraint_count(&bn254(8, 5), 10), Ok(180));
        assert!(constraint_count(&bn254(3, 17), 10).is_err());
    }

    #[test]
    fn test_invalid_params() {
        assert!(GriffinParams::new(1, 3, ReferenceField::Bn254).is_err());
        assert!(GriffinParams::new(3, 1, ReferenceField::Bn254).is_err());
        let tiny = FieldModulus::new(BigUint::from(3u8)).unwrap();
        assert!(GriffinParams::new(3, 5, tiny).is_err());
    }
}
