use super::{CoreyCurves, ThreePhaseRelPerm, TwoPhaseValues, check_sum_tolerance, minimum_oil_saturation};
use crate::error::{RockError, RockResult};
use crate::params::{fraction, positive};
use crate::saturation::{DEFAULT_SUM_TOLERANCE, ThreePhaseSaturation};

/// Literature default for the Hustad-Holt exponent. `n = 1` recovers the
/// normalised Stone I product (exactly so when `Sgc = 0`).
pub const DEFAULT_HUSTAD_HOLT_EXPONENT: f64 = 1.0;

/// Hustad-Holt modification of Stone I:
///
/// `kro = (krow * krog / krocw) * beta^n`, `beta = So* / ((1 - Sw*) * (1 - Sg*))`
///
/// with saturations normalised by `1 - Swc - Som - Sgc`. Larger `n` bends the
/// isoperms towards the oil apex, `n -> 0` gives the plain product of the
/// two-phase curves.
#[derive(Debug, Clone)]
pub struct HustadHolt {
    curves: CoreyCurves,
    n: f64,
    som: Option<f64>,
    sum_tolerance: f64,
}

impl HustadHolt {
    pub fn new(curves: CoreyCurves, n: f64, som: Option<f64>) -> RockResult<Self> {
        positive("n", n)?;
        if let Some(som) = som {
            fraction("som", som)?;
        }
        Ok(Self {
            curves,
            n,
            som,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        })
    }

    /// Uses [`DEFAULT_HUSTAD_HOLT_EXPONENT`] and an estimated `Som`.
    pub fn with_defaults(curves: CoreyCurves) -> Self {
        Self {
            curves,
            n: DEFAULT_HUSTAD_HOLT_EXPONENT,
            som: None,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }

    pub fn with_sum_tolerance(mut self, tolerance: f64) -> RockResult<Self> {
        self.sum_tolerance = check_sum_tolerance(tolerance)?;
        Ok(self)
    }

    pub fn exponent(&self) -> f64 {
        self.n
    }
}

impl ThreePhaseRelPerm for HustadHolt {
    fn name(&self) -> &str {
        "hustad_holt"
    }

    fn curves(&self) -> &CoreyCurves {
        &self.curves
    }

    fn sum_tolerance(&self) -> f64 {
        self.sum_tolerance
    }

    fn oil(&self, sat: &ThreePhaseSaturation, kr: &TwoPhaseValues) -> RockResult<f64> {
        let p = self.curves.params();
        let som = match self.som {
            Some(som) => som,
            None => minimum_oil_saturation(&self.curves, Some(sat.sg))?,
        };

        let span = 1.0 - p.swc - som - p.sgc;
        if span <= 0.0 {
            return Err(RockError::InvalidBounds {
                irreducible: p.swc + p.sgc,
                residual: som,
            });
        }

        // So* exceeds one when Sw + Sg < Swc + Sgc
        let so_star = ((sat.so - som) / span).clamp(0.0, 1.0);
        if so_star == 0.0 {
            return Ok(0.0);
        }
        let sw_star = ((sat.sw - p.swc) / span).clamp(0.0, 1.0);
        let sg_star = ((sat.sg - p.sgc) / span).clamp(0.0, 1.0);

        let water_factor = (1.0 - sw_star).max(so_star);
        let gas_factor = (1.0 - sg_star).max(so_star);
        let beta = (so_star / (water_factor * gas_factor)).min(1.0);

        Ok(kr.krow * kr.krog / p.krocw * beta.powf(self.n))
    }
}
