use super::{CoreyCurves, ThreePhaseRelPerm, TwoPhaseValues, check_sum_tolerance};
use crate::error::RockResult;
use crate::saturation::{DEFAULT_SUM_TOLERANCE, ThreePhaseSaturation};

/// Stone's Model II (normalised by Aziz and Settari):
///
/// `kro = krocw * [(krow/krocw + krw) * (krog/krocw + krg) - (krw + krg)]`
///
/// Negative results are a known artefact of the form near the oil endpoint and
/// are floored to zero.
#[derive(Debug, Clone)]
pub struct StoneII {
    curves: CoreyCurves,
    sum_tolerance: f64,
}

impl StoneII {
    pub fn new(curves: CoreyCurves) -> Self {
        Self {
            curves,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }

    pub fn with_sum_tolerance(mut self, tolerance: f64) -> RockResult<Self> {
        self.sum_tolerance = check_sum_tolerance(tolerance)?;
        Ok(self)
    }
}

impl ThreePhaseRelPerm for StoneII {
    fn name(&self) -> &str {
        "stones_II"
    }

    fn curves(&self) -> &CoreyCurves {
        &self.curves
    }

    fn sum_tolerance(&self) -> f64 {
        self.sum_tolerance
    }

    fn oil(&self, _sat: &ThreePhaseSaturation, kr: &TwoPhaseValues) -> RockResult<f64> {
        let krocw = self.curves.params().krocw;
        let kro = krocw * ((kr.krow / krocw + kr.krw) * (kr.krog / krocw + kr.krg) - (kr.krw + kr.krg));
        Ok(kro.max(0.0))
    }
}
