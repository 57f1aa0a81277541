//! Anemoi round estimator.
//!
//! The Gröbner-basis cost is modelled by a binomial coefficient over the
//! variable count of the generalized Butterfly (the "Flystel" written as a
//! system in `2ℓr` unknowns). The attack cost is the square of that
//! coefficient. Two earlier cost models are kept alongside the current one
//! so their answers can be compared.

use num_bigint::BigUint;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::addchain;
use crate::error::{EstimatorResult, ensure_degree, ensure_width};
use crate::estimator::{PermutationFamily, RoundCount, checked_product};
use crate::math;

/// Upper bound on the Gröbner round search.
pub const SEARCH_CAP: u64 = 100;

/// Minimum round count of the current model.
pub const MIN_ROUNDS: u64 = 10;

/// Returned by [`rounds`] when the search is exhausted.
pub const FALLBACK_ROUNDS: u64 = 10;

/// Returned by [`rounds_legacy_kappa`] when the search is exhausted.
pub const LEGACY_KAPPA_FALLBACK_ROUNDS: u64 = 8;

/// Returned by [`rounds_legacy_unfloored`] when the search is exhausted.
pub const LEGACY_UNFLOORED_FALLBACK_ROUNDS: u64 = 10;

/// Degree-of-regularity offsets of the legacy model, indexed by `alpha`.
const KAPPA: [u64; 10] = [1, 1, 1, 1, 2, 2, 4, 4, 7, 7];
const KAPPA_BEYOND_TABLE: u64 = 9;

/// Anemoi instance: `ell` Flystel branches with S-box degree `alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnemoiParams {
    pub ell: u64,
    pub alpha: u64,
}

impl AnemoiParams {
    pub fn new(ell: u64, alpha: u64) -> EstimatorResult<Self> {
        let params = Self { ell, alpha };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> EstimatorResult<()> {
        ensure_width("ell", self.ell)?;
        ensure_degree("alpha", self.alpha)
    }
}

/// Which Anemoi cost model to evaluate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AnemoiModel {
    /// Squared Butterfly binomial, floored at [`MIN_ROUNDS`]
    #[default]
    Current,
    /// Kappa-offset binomial over `4ℓr + κ` variables
    LegacyKappa,
    /// Current Butterfly binomial without the round floor
    LegacyUnfloored,
}

impl AnemoiModel {
    pub fn rounds(self, params: &AnemoiParams, security_level: u32) -> EstimatorResult<RoundCount> {
        match self {
            Self::Current => rounds(params, security_level),
            Self::LegacyKappa => rounds_legacy_kappa(params, security_level),
            Self::LegacyUnfloored => rounds_legacy_unfloored(params, security_level),
        }
    }
}

impl fmt::Display for AnemoiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Current => "current",
            Self::LegacyKappa => "legacy-kappa",
            Self::LegacyUnfloored => "legacy-unfloored",
        })
    }
}

/// `C(2ℓr + α + 1 + 2(ℓr - 2), 2ℓr)`; zero while the upper index is negative.
fn butterfly_binomial(params: &AnemoiParams, r: u64) -> BigUint {
    let (ell, alpha, r) = (i128::from(params.ell), i128::from(params.alpha), i128::from(r));
    let vars = 2 * ell * r;
    math::binomial_signed(vars + alpha + 1 + 2 * (ell * r - 2), vars)
}

/// Minimal Anemoi round count for `security_level` bits.
pub fn rounds(params: &AnemoiParams, security_level: u32) -> EstimatorResult<RoundCount> {
    params.validate()?;
    let target = math::pow2(security_level);

    for r in 0..SEARCH_CAP {
        let b = butterfly_binomial(params, r);
        let cost = &b * &b;
        trace!(r, log2_cost = cost.bits(), "anemoi candidate");
        if cost >= target {
            let nr = MIN_ROUNDS.max(r + 1 + params.ell);
            debug!(ell = params.ell, alpha = params.alpha, security_level, nr, "anemoi rounds");
            return Ok(RoundCount::converged(nr));
        }
    }

    warn!(ell = params.ell, alpha = params.alpha, security_level, "anemoi search exhausted");
    Ok(RoundCount::exhausted(FALLBACK_ROUNDS))
}

/// Round count under the kappa-offset model.
pub fn rounds_legacy_kappa(
    params: &AnemoiParams,
    security_level: u32,
) -> EstimatorResult<RoundCount> {
    params.validate()?;
    let target = math::pow2(security_level);
    let kappa = usize::try_from(params.alpha)
        .ok()
        .and_then(|a| KAPPA.get(a).copied())
        .unwrap_or(KAPPA_BEYOND_TABLE);

    for r in 0..SEARCH_CAP {
        let vars = 2 * params.ell * r;
        let b = math::binomial(&BigUint::from(2 * vars + kappa), vars);
        let cost = &b * &b;
        if cost >= target {
            let nr = 8u64.max(5u64.min(1 + params.ell) + 2 + r);
            let (ell, alpha) = (params.ell, params.alpha);
            debug!(ell, alpha, security_level, nr, "anemoi legacy-kappa rounds");
            return Ok(RoundCount::converged(nr));
        }
    }

    let (ell, alpha) = (params.ell, params.alpha);
    warn!(ell, alpha, security_level, "anemoi legacy-kappa search exhausted");
    Ok(RoundCount::exhausted(LEGACY_KAPPA_FALLBACK_ROUNDS))
}

/// Round count under the Butterfly model without the [`MIN_ROUNDS`] floor.
pub fn rounds_legacy_unfloored(
    params: &AnemoiParams,
    security_level: u32,
) -> EstimatorResult<RoundCount> {
    params.validate()?;
    let target = math::pow2(security_level);

    for r in 0..SEARCH_CAP {
        let b = butterfly_binomial(params, r);
        if &b * &b >= target {
            let nr = 1 + params.ell + r;
            let (ell, alpha) = (params.ell, params.alpha);
            debug!(ell, alpha, security_level, nr, "anemoi legacy-unfloored rounds");
            return Ok(RoundCount::converged(nr));
        }
    }

    let (ell, alpha) = (params.ell, params.alpha);
    warn!(ell, alpha, security_level, "anemoi legacy-unfloored search exhausted");
    Ok(RoundCount::exhausted(LEGACY_UNFLOORED_FALLBACK_ROUNDS))
}

/// R1CS size: `(chain(α) + 2) · ℓ · rounds`.
pub fn constraint_count(params: &AnemoiParams, rounds: u64) -> EstimatorResult<u64> {
    let per_branch = addchain::multiplications(params.alpha)? + 2;
    checked_product(&[per_branch, params.ell, rounds])
}

/// An Anemoi instance bound to one cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anemoi {
    pub params: AnemoiParams,
    pub model: AnemoiModel,
}

impl PermutationFamily for Anemoi {
    type Rounds = RoundCount;
    const NAME: &'static str = "anemoi";

    fn rounds(&self, security_level: u32) -> EstimatorResult<RoundCount> {
        self.model.rounds(&self.params, security_level)
    }

    fn constraint_count(&self, rounds: &RoundCount) -> EstimatorResult<u64> {
        constraint_count(&self.params, rounds.rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ell: u64, alpha: u64) -> AnemoiParams {
        AnemoiParams::new(ell, alpha).unwrap()
    }

    #[test]
    fn test_known_round_counts() {
        let cases = [
            // (ell, alpha, security_level, rounds)
            (1, 3, 128, 19),
            (1, 5, 128, 19),
            (1, 7, 128, 18),
            (2, 5, 128, 12),
            (2, 7, 256, 19),
            (3, 5, 256, 15),
            (3, 5, 128, 10),
            (1, 5, 64, 11),
        ];
        for (ell, alpha, level, expected) in cases {
            let nr = rounds(&params(ell, alpha), level).unwrap();
            let context = format!("ell={ell} alpha={alpha} level={level}");
            assert_eq!(nr, RoundCount::converged(expected), "{context}");
        }
    }

    #[test]
    fn test_legacy_models() {
        assert_eq!(rounds_legacy_kappa(&params(1, 5), 128).unwrap().rounds, 21);
        assert_eq!(rounds_legacy_kappa(&params(2, 7), 128).unwrap().rounds, 13);
        assert_eq!(rounds_legacy_unfloored(&params(1, 5), 128).unwrap().rounds, 19);
        assert_eq!(rounds_legacy_unfloored(&params(3, 7), 128).unwrap().rounds, 10);
    }

    #[test]
    fn test_floor_applies() {
        for ell in 1..=4 {
            for alpha in [3, 5, 7] {
                assert!(rounds(&params(ell, alpha), 32).unwrap().rounds >= MIN_ROUNDS);
            }
        }
    }

    #[test]
    fn test_exhaustion_fallback() {
        // 2^4000 is out of reach within the round cap for a single branch
        let nr = rounds(&params(1, 3), 4000).unwrap();
        assert_eq!(nr, RoundCount::exhausted(FALLBACK_ROUNDS));
        let nr = rounds_legacy_kappa(&params(1, 3), 4000).unwrap();
        assert_eq!(nr, RoundCount::exhausted(LEGACY_KAPPA_FALLBACK_ROUNDS));
    }

    #[test]
    fn test_negative_upper_index_is_skipped() {
        // alpha = 2, r = 0 gives C(-1, 0); the search must move on
        let nr = rounds(&params(1, 2), 128).unwrap();
        assert!(nr.is_verified());
    }

    #[test]
    fn test_constraint_count() {
        assert_eq!(constraint_count(&params(1, 5), 19), Ok(5 * 19));
        assert_eq!(constraint_count(&params(2, 3), 12), Ok(4 * 2 * 12));
        assert!(constraint_count(&AnemoiParams { ell: 1, alpha: 11 }, 19).is_err());
    }

    #[test]
    fn test_invalid_params() {
        assert!(AnemoiParams::new(0, 5).is_err());
        assert!(AnemoiParams::new(1, 1).is_err());
        assert!(rounds(&AnemoiParams { ell: 1, alpha: 1 }, 128).is_err());
    }
}
