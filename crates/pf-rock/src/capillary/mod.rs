//! Capillary pressure models.
//!
//! Every model maps wetting-phase saturation to `pc = p_nonwetting - p_wetting`
//! (drainage branch, non-increasing in saturation) and back. Both directions are
//! pure functions of the model parameters and share one [`SaturationNormalizer`].

mod brooks_corey;
mod leverett;
mod van_genuchten;

pub use brooks_corey::BrooksCorey;
pub use leverett::{LeverettJ, RockDescriptor, j_value, pc_from_j};
pub use van_genuchten::VanGenuchten;

use crate::error::{RockError, RockResult};
use crate::saturation::SaturationNormalizer;

/// Forward and inverse capillary pressure evaluation.
///
/// Implementations must be thread-safe (Send + Sync) so callers can sweep grid
/// cells in parallel.
pub trait CapillaryPressure: Send + Sync + std::fmt::Debug {
    /// Canonical registry name.
    fn name(&self) -> &str;

    /// Endpoint saturations used for normalisation.
    fn normalizer(&self) -> &SaturationNormalizer;

    /// Capillary pressure at wetting-phase saturation `sw`.
    fn pressure(&self, sw: f64) -> RockResult<f64>;

    /// Wetting-phase saturation at capillary pressure `pc`.
    fn saturation(&self, pc: f64) -> RockResult<f64>;
}

/// Normalised saturation that must be strictly positive for a power law with a
/// negative exponent.
pub(crate) fn positive_s_star(
    normalizer: &SaturationNormalizer,
    sw: f64,
    what: &'static str,
) -> RockResult<f64> {
    let s_star = normalizer.normalize(sw)?;
    if s_star <= 0.0 {
        return Err(RockError::Domain {
            what,
            value: s_star,
        });
    }
    Ok(s_star)
}

pub(crate) fn non_negative_pressure(pc: f64, what: &'static str) -> RockResult<f64> {
    if !pc.is_finite() || pc < 0.0 {
        return Err(RockError::Domain { what, value: pc });
    }
    Ok(pc)
}

pub(crate) fn finite_result(value: f64, what: &'static str) -> RockResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RockError::Domain { what, value })
    }
}
