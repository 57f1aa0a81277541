//! Poseidon round estimators.
//!
//! Two independently published estimators are kept side by side:
//!
//! - [`rounds_legacy`]: a lookup of base partial-round counts per security
//!   level plus a `log_α(t)` correction, with fixed answers for the common
//!   128-bit widths 3, 5 and 9;
//! - [`rounds_grobner`]: the maximum of four Gröbner-basis lower bounds and
//!   an interpolation-style minimal-degree bound.
//!
//! Both add a 7.5% margin to the partial rounds and always use
//! [`FULL_ROUNDS`] full rounds. They disagree on purpose; callers get both.

use num_bigint::BigUint;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, trace, warn};

use crate::addchain;
use crate::error::{EstimatorError, EstimatorResult, ensure_degree, ensure_width};
use crate::estimator::{PermutationFamily, SearchOutcome, checked_product, checked_sum};
use crate::field::FieldModulus;
use crate::math;

/// Full rounds used by both estimators.
pub const FULL_ROUNDS: u64 = 8;

/// Margin applied to the partial rounds.
pub const PARTIAL_ROUNDS_MARGIN: f64 = 1.075;

/// Upper bound on the first Gröbner bound search.
pub const GROBNER_SEARCH_CAP: u64 = 1000;

/// Base partial rounds of the legacy estimator, by security level.
const LEGACY_BASE_PARTIAL_ROUNDS: [(u32, u64); 3] = [(80, 35), (128, 56), (256, 111)];

/// Fixed legacy answers at 128 bits, by width.
const LEGACY_PARTIAL_ROUNDS_128: [(u64, u64); 3] = [(3, 57), (5, 60), (9, 63)];

/// Poseidon instance: width `t`, S-box degree `alpha`, field for the
/// Gröbner estimator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseidonParams {
    pub width: u64,
    pub alpha: u64,
    pub field: FieldModulus,
}

impl PoseidonParams {
    pub fn new(width: u64, alpha: u64, field: impl Into<FieldModulus>) -> EstimatorResult<Self> {
        let params = Self { width, alpha, field: field.into() };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> EstimatorResult<()> {
        ensure_width("width", self.width)?;
        ensure_degree("alpha", self.alpha)
    }
}

/// Full and partial round counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PoseidonRounds {
    pub full: u64,
    pub partial: u64,
    pub outcome: SearchOutcome,
}

impl PoseidonRounds {
    pub fn total(&self) -> u64 {
        self.full + self.partial
    }
}

impl fmt::Display for PoseidonRounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.full, self.partial)?;
        if self.outcome == SearchOutcome::Exhausted {
            f.write_str(" (search exhausted, conservative default)")?;
        }
        Ok(())
    }
}

/// Answers of both estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoseidonEstimates {
    /// `None` when the security level has no legacy table entry.
    pub legacy: Option<PoseidonRounds>,
    pub grobner: PoseidonRounds,
}

impl fmt::Display for PoseidonEstimates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.legacy {
            Some(legacy) => write!(f, "legacy {legacy}, ")?,
            None => f.write_str("legacy n/a, ")?,
        }
        write!(f, "grobner {}", self.grobner)
    }
}

/// Legacy table-driven estimator.
///
/// Only security levels 80, 128 and 256 are known; others fail with
/// [`EstimatorError::UnsupportedSecurityLevel`].
pub fn rounds_legacy(
    params: &PoseidonParams,
    security_level: u32,
) -> EstimatorResult<PoseidonRounds> {
    params.validate()?;
    let base = LEGACY_BASE_PARTIAL_ROUNDS
        .iter()
        .find(|(level, _)| *level == security_level)
        .map(|&(_, base)| base)
        .ok_or(EstimatorError::UnsupportedSecurityLevel(security_level))?;

    if security_level == 128 {
        let tabulated = LEGACY_PARTIAL_ROUNDS_128.iter().find(|(t, _)| *t == params.width);
        if let Some(&(_, partial)) = tabulated {
            let outcome = SearchOutcome::Converged;
            return Ok(PoseidonRounds { full: FULL_ROUNDS, partial, outcome });
        }
    }

    let l_alpha = ((params.width as f64).log2() / (params.alpha as f64).log2()).ceil();
    let partial = (PARTIAL_ROUNDS_MARGIN * (l_alpha + base as f64)).ceil() as u64;
    let (width, alpha) = (params.width, params.alpha);
    debug!(width, alpha, security_level, partial, "poseidon legacy rounds");
    Ok(PoseidonRounds { full: FULL_ROUNDS, partial, outcome: SearchOutcome::Converged })
}

/// First Gröbner bound: smallest `g` with
/// `C(4t + 5(t-1) + 2g + α, 3(t-1) + g + α) >= 2^(κ/2)`.
///
/// Sponge mode with rate `t - 1` and capacity 1 is assumed.
fn first_grobner_bound(params: &PoseidonParams, security_level: u32) -> (u64, SearchOutcome) {
    let (t, alpha) = (params.width, params.alpha);
    let limit = math::pow2(security_level / 2);

    for g in 1..=GROBNER_SEARCH_CAP {
        let upper = 4 * t + 5 * (t - 1) + 2 * g + alpha;
        let lower = 3 * (t - 1) + g + alpha;
        let qty = math::binomial(&BigUint::from(upper), lower);
        trace!(g, log2_qty = qty.bits(), "poseidon groebner candidate");
        if qty >= limit {
            return (g, SearchOutcome::Converged);
        }
    }

    warn!(width = t, alpha, security_level, "poseidon groebner search exhausted");
    (GROBNER_SEARCH_CAP, SearchOutcome::Exhausted)
}

/// Gröbner-basis estimator over `params.field`.
pub fn rounds_grobner(
    params: &PoseidonParams,
    security_level: u32,
) -> EstimatorResult<PoseidonRounds> {
    params.validate()?;
    let t = params.width as f64;
    let kappa = f64::from(security_level);
    let log_alpha = (params.alpha as f64).log2();
    let log_p = params.field.log2();
    let sl = kappa.min(log_p);

    let min_degree = sl / log_alpha + t.log2() / log_alpha - 5.0;

    let (grob_1, outcome) = first_grobner_bound(params, security_level);
    let grob_2 = 1.0 / log_alpha * sl - 6.0;
    let grob_3 = t - 7.0 + 1.0 / log_alpha * (kappa / (t + 1.0)).min(log_p / 2.0);
    let grob_4 = kappa / (2.0 * log_alpha) - 5.0 * t + 4.0;
    let grob = (grob_1 as f64).max(grob_2).max(grob_3).max(grob_4);

    let partial = (PARTIAL_ROUNDS_MARGIN * min_degree.max(grob).ceil()).ceil() as u64;
    debug!(
        width = params.width,
        alpha = params.alpha,
        security_level,
        grob_1,
        grob_2,
        grob_3,
        grob_4,
        partial,
        "poseidon grobner rounds"
    );
    Ok(PoseidonRounds { full: FULL_ROUNDS, partial, outcome })
}

/// R1CS size: `chain(α)(R_F + R_P) + chain(α)(t - 1)R_F`.
pub fn constraint_count(params: &PoseidonParams, rounds: &PoseidonRounds) -> EstimatorResult<u64> {
    let chain = addchain::multiplications(params.alpha)?;
    let sboxes = checked_product(&[chain, checked_sum(&[rounds.full, rounds.partial])?])?;
    let full_extra = checked_product(&[chain, params.width.saturating_sub(1), rounds.full])?;
    checked_sum(&[sboxes, full_extra])
}

impl PermutationFamily for PoseidonParams {
    type Rounds = PoseidonEstimates;
    const NAME: &'static str = "poseidon";

    fn rounds(&self, security_level: u32) -> EstimatorResult<PoseidonEstimates> {
        let legacy = match rounds_legacy(self, security_level) {
            Ok(rounds) => Some(rounds),
            Err(err @ EstimatorError::UnsupportedSecurityLevel(_)) => {
                warn!(%err, "poseidon legacy estimator skipped");
                None
            }
            Err(err) => return Err(err),
        };
        let grobner = rounds_grobner(self, security_level)?;
        Ok(PoseidonEstimates { legacy, grobner })
    }

    /// Priced with the Gröbner round counts.
    fn constraint_count(&self, rounds: &PoseidonEstimates) -> EstimatorResult<u64> {
        constraint_count(self, &rounds.grobner)
    }

    fn render_rounds(&self, rounds: &PoseidonEstimates, out: &mut dyn Write) -> io::Result<()> {
        match &rounds.legacy {
            Some(legacy) => writeln!(out, "Number of rounds: {legacy}")?,
            None => {
                writeln!(out, "Number of rounds: n/a (no legacy table for this security level)")?
            }
        }
        writeln!(out, "Number of rounds new: {}", rounds.grobner)
    }
}
