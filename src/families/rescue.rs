//! Rescue round estimator.
//!
//! Gröbner-basis bound over a sponge with `m = rate + capacity` elements:
//! after `N` rounds the system has `v(N) = m(N - 1) + rate` variables and
//! degree of regularity `dcon(N) = floor((α - 1)·m·(N - 1) / 2) + 2`. The
//! attack costs `C(v + dcon, v)^2`.

use num_bigint::BigUint;
use tracing::{debug, trace, warn};

use crate::addchain;
use crate::error::{EstimatorError, EstimatorResult, ensure_degree, ensure_width};
use crate::estimator::{PermutationFamily, RoundCount, checked_product};
use crate::math;

/// Round counts tried: `SEARCH_START..SEARCH_END`.
pub const SEARCH_START: u64 = 1;
pub const SEARCH_END: u64 = 25;

/// Minimum round count before the margin is applied.
pub const MIN_ROUNDS: u64 = 5;

/// Multiplicative security margin.
pub const SAFETY_FACTOR: f64 = 1.5;

/// Rescue sponge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescueParams {
    pub rate: u64,
    pub capacity: u64,
    pub alpha: u64,
}

impl RescueParams {
    pub fn new(rate: u64, capacity: u64, alpha: u64) -> EstimatorResult<Self> {
        let params = Self { rate, capacity, alpha };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> EstimatorResult<()> {
        ensure_width("rate", self.rate)?;
        let width = self
            .rate
            .checked_add(self.capacity)
            .ok_or_else(|| EstimatorError::invalid("capacity", "rate + capacity overflows"))?;
        ensure_width("rate + capacity", width)?;
        ensure_degree("alpha", self.alpha)
    }

    /// State width `m = rate + capacity`, saturating at `u64::MAX`.
    pub fn width(&self) -> u64 {
        self.rate.saturating_add(self.capacity)
    }

    /// Degree of regularity after `n` rounds.
    fn dcon(&self, n: u64) -> u64 {
        (self.alpha - 1) * self.width() * (n - 1) / 2 + 2
    }

    /// Variable count after `n` rounds.
    fn variables(&self, n: u64) -> u64 {
        self.width() * (n - 1) + self.rate
    }
}

/// Minimal Rescue round count for `security_level` bits, floored at
/// [`MIN_ROUNDS`] and scaled by [`SAFETY_FACTOR`].
pub fn rounds(params: &RescueParams, security_level: u32) -> EstimatorResult<RoundCount> {
    params.validate()?;
    let target = math::pow2(security_level);

    let mut found = None;
    for n in SEARCH_START..SEARCH_END {
        let v = params.variables(n);
        let b = math::binomial(&BigUint::from(v + params.dcon(n)), v);
        trace!(n, log2_cost = 2 * b.bits(), "rescue candidate");
        if &b * &b > target {
            found = Some(n);
            break;
        }
    }

    let with_margin = |n: u64| (SAFETY_FACTOR * MIN_ROUNDS.max(n) as f64).ceil() as u64;
    let nr = match found {
        Some(n) => RoundCount::converged(with_margin(n)),
        None => {
            warn!(
                rate = params.rate,
                capacity = params.capacity,
                alpha = params.alpha,
                security_level,
                "rescue search exhausted"
            );
            RoundCount::exhausted(with_margin(SEARCH_END - 1))
        }
    };
    debug!(
        rate = params.rate,
        capacity = params.capacity,
        alpha = params.alpha,
        security_level,
        nr = nr.rounds,
        "rescue rounds"
    );
    Ok(nr)
}

/// R1CS size: `2·chain(α)·m·rounds`.
pub fn constraint_count(params: &RescueParams, rounds: u64) -> EstimatorResult<u64> {
    params.validate()?;
    checked_product(&[2, addchain::multiplications(params.alpha)?, params.width(), rounds])
}

impl PermutationFamily for RescueParams {
    type Rounds = RoundCount;
    const NAME: &'static str = "rescue";

    fn rounds(&self, security_level: u32) -> EstimatorResult<RoundCount> {
        rounds(self, security_level)
    }

    fn constraint_count(&self, rounds: &RoundCount) -> EstimatorResult<u64> {
        constraint_count(self, rounds.rounds)
    }
}
