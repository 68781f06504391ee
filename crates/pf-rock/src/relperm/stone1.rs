use super::{CoreyCurves, ThreePhaseRelPerm, TwoPhaseValues, check_sum_tolerance};
use crate::error::{RockError, RockResult};
use crate::params::fraction;
use crate::saturation::{DEFAULT_SUM_TOLERANCE, ThreePhaseSaturation};

/// Fayers-Matthews estimate of the minimum oil saturation:
/// `Som = a*Sorw + (1 - a)*Sorg` with `a = 1 - Sg / (1 - Swc - Sorg)`.
///
/// The weighting depends on the gas saturation; without it the estimate is
/// undefined.
pub fn minimum_oil_saturation(curves: &CoreyCurves, sg: Option<f64>) -> RockResult<f64> {
    let sg = sg.ok_or(RockError::UnresolvedParameter {
        what: "minimum oil saturation needs the gas saturation",
    })?;
    let p = curves.params();
    // Positive: the gas-oil normaliser already validated 1 - Swc - Sorg - Sgc > 0
    let liquid_span = 1.0 - p.swc - p.sorg;
    let a = (1.0 - sg / liquid_span).clamp(0.0, 1.0);
    Ok(a * p.sorw + (1.0 - a) * p.sorg)
}

/// Stone's Model I in the normalised form of Aziz and Settari:
///
/// `kro = So* * krow * krog / (krocw * (1 - Sw*) * (1 - Sg*))`
///
/// with `So* = (So - Som)/(1 - Swc - Som)`, `Sw* = (Sw - Swc)/(1 - Swc - Som)`
/// and `Sg* = Sg/(1 - Swc - Som)`.
#[derive(Debug, Clone)]
pub struct StoneI {
    curves: CoreyCurves,
    som: Option<f64>,
    sum_tolerance: f64,
}

impl StoneI {
    /// `som = None` estimates the minimum oil saturation per evaluation.
    pub fn new(curves: CoreyCurves, som: Option<f64>) -> RockResult<Self> {
        if let Some(som) = som {
            fraction("som", som)?;
        }
        Ok(Self {
            curves,
            som,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        })
    }

    pub fn with_sum_tolerance(mut self, tolerance: f64) -> RockResult<Self> {
        self.sum_tolerance = check_sum_tolerance(tolerance)?;
        Ok(self)
    }

    pub fn som(&self) -> Option<f64> {
        self.som
    }
}

impl ThreePhaseRelPerm for StoneI {
    fn name(&self) -> &str {
        "stones_I"
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

        let span = 1.0 - p.swc - som;
        if span <= 0.0 {
            return Err(RockError::InvalidBounds {
                irreducible: p.swc,
                residual: som,
            });
        }

        let so_star = ((sat.so - som) / span).clamp(0.0, 1.0);
        if so_star == 0.0 {
            return Ok(0.0);
        }
        let sw_star = ((sat.sw - p.swc) / span).clamp(0.0, 1.0);
        let sg_star = (sat.sg / span).clamp(0.0, 1.0);

        // 1 - Sw* = So* + Sg* on a consistent triple; keep the divisors off zero
        let water_factor = (1.0 - sw_star).max(so_star);
        let gas_factor = (1.0 - sg_star).max(so_star);

        Ok(so_star * kr.krow * kr.krog / (p.krocw * water_factor * gas_factor))
    }
}
