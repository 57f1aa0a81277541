//! MiMC round estimator.
//!
//! The interpolation attack is the only model: the permutation must reach
//! full degree, so `rounds = ceil(log_d(p))`. No search is involved.

use num_bigint::BigUint;
use tracing::debug;

use crate::addchain;
use crate::error::{EstimatorResult, ensure_degree};
use crate::estimator::{PermutationFamily, RoundCount, checked_product};
use crate::field::FieldModulus;

/// MiMC instance: field modulus `p` and S-box degree `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimcParams {
    pub modulus: FieldModulus,
    pub d: u64,
}

impl MimcParams {
    pub fn new(modulus: impl Into<FieldModulus>, d: u64) -> EstimatorResult<Self> {
        let params = Self { modulus: modulus.into(), d };
        ensure_degree("d", params.d)?;
        Ok(params)
    }

    /// Convenience constructor from a raw modulus.
    pub fn from_modulus(p: BigUint, d: u64) -> EstimatorResult<Self> {
        Self::new(FieldModulus::new(p)?, d)
    }
}

/// `ceil(ln p / ln d)`.
pub fn rounds(params: &MimcParams) -> EstimatorResult<RoundCount> {
    ensure_degree("d", params.d)?;
    let nr = (params.modulus.ln() / (params.d as f64).ln()).ceil() as u64;
    debug!(p_bits = params.modulus.bits(), d = params.d, nr, "mimc rounds");
    Ok(RoundCount::converged(nr))
}

/// R1CS size: `chain(d) · rounds`.
pub fn constraint_count(params: &MimcParams, rounds: u64) -> EstimatorResult<u64> {
    checked_product(&[addchain::multiplications(params.d)?, rounds])
}

impl PermutationFamily for MimcParams {
    type Rounds = RoundCount;
    const NAME: &'static str = "mimc";
    const USES_SECURITY_LEVEL: bool = false;

    /// The round count depends only on the field; `security_level` is unused.
    fn rounds(&self, _security_level: u32) -> EstimatorResult<RoundCount> {
        rounds(self)
    }

    fn constraint_count(&self, rounds: &RoundCount) -> EstimatorResult<u64> {
        constraint_count(self, rounds.rounds)
    }
}
