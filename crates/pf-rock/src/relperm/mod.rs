//! Three-phase relative permeability.
//!
//! Water and gas relative permeabilities come straight from the two-phase
//! [`CoreyCurves`]; the oil value is a model-specific blend of the oil-water and
//! gas-oil oil curves. The shared pre/post-processing (saturation-sum check,
//! two-phase lookup, flooring and bounding) lives in
//! [`ThreePhaseRelPerm::evaluate`] so each model only supplies its blend.

mod aziz_settari;
mod corey;
mod hustad_holt;
mod stone1;
mod stone2;

pub use aziz_settari::AzizSettari;
pub use corey::{CoreyCurves, CoreyParams, TwoPhaseValues};
pub use hustad_holt::{DEFAULT_HUSTAD_HOLT_EXPONENT, HustadHolt};
pub use stone1::{StoneI, minimum_oil_saturation};
pub use stone2::StoneII;

use crate::error::{RockError, RockResult};
use crate::saturation::{DEFAULT_SUM_TOLERANCE, ThreePhaseSaturation};
use pf_core::numeric::{floor_to_zero, unit_clamp};

/// `(kro, krw, krg)` for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelPermTriple {
    pub kro: f64,
    pub krw: f64,
    pub krg: f64,
}

impl RelPermTriple {
    /// Reject non-finite values, floor round-off residue and bound to `[0, 1]`.
    pub fn bounded(kro: f64, krw: f64, krg: f64) -> RockResult<Self> {
        for (what, value) in [("kro", kro), ("krw", krw), ("krg", krg)] {
            if !value.is_finite() {
                return Err(RockError::Domain { what, value });
            }
        }
        Ok(Self {
            kro: unit_clamp(floor_to_zero(kro)),
            krw: unit_clamp(floor_to_zero(krw)),
            krg: unit_clamp(floor_to_zero(krg)),
        })
    }
}

/// Three-phase relative permeability model.
///
/// Implementations must be thread-safe (Send + Sync) to support parallel evaluation.
pub trait ThreePhaseRelPerm: Send + Sync + std::fmt::Debug {
    /// Canonical registry name.
    fn name(&self) -> &str;

    /// Two-phase input curves.
    fn curves(&self) -> &CoreyCurves;

    /// Allowed deviation of `Sw + So + Sg` from one.
    fn sum_tolerance(&self) -> f64 {
        DEFAULT_SUM_TOLERANCE
    }

    /// Model-specific three-phase oil relative permeability.
    fn oil(&self, sat: &ThreePhaseSaturation, two_phase: &TwoPhaseValues) -> RockResult<f64>;

    /// Evaluate `(kro, krw, krg)` at the given saturations.
    fn evaluate(&self, sw: f64, so: f64, sg: f64) -> RockResult<RelPermTriple> {
        let sat = ThreePhaseSaturation::with_tolerance(sw, so, sg, self.sum_tolerance())?;
        let two_phase = self.curves().two_phase(&sat)?;
        let kro = self.oil(&sat, &two_phase)?;
        RelPermTriple::bounded(kro, two_phase.krw, two_phase.krg)
    }
}

pub(crate) fn check_sum_tolerance(tolerance: f64) -> RockResult<f64> {
    if tolerance > 0.0 && tolerance < 1.0 {
        Ok(tolerance)
    } else {
        Err(RockError::invalid("sum_tolerance", tolerance, "must lie in (0, 1)"))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn curves() -> CoreyCurves {
        CoreyCurves::new(CoreyParams {
            swc: 0.2,
            sorw: 0.25,
            sorg: 0.1,
            sgc: 0.05,
            krocw: 0.8,
            krw_max: 0.3,
            krg_max: 0.9,
            nw: 2.0,
            now: 2.5,
            ng: 2.0,
            nog: 2.0,
        })
        .unwrap()
    }
}
