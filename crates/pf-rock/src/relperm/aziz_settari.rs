use super::{CoreyCurves, ThreePhaseRelPerm, TwoPhaseValues, check_sum_tolerance};
use crate::error::RockResult;
use crate::saturation::{DEFAULT_SUM_TOLERANCE, ThreePhaseSaturation};

const MAX_BISECTIONS: usize = 200;
const LEVEL_TOLERANCE: f64 = 1e-15;

/// Interpolation between the oil-water and gas-oil oil curves along linear
/// isoperms (Baker), as tabulated by Aziz and Settari.
///
/// In movable coordinates `x = Sw - Swc` and `y = Sg`, the isoperm of level
/// `kro` is the straight segment joining the point on the oil-water edge where
/// `krow = kro` to the point on the gas-oil edge (connate water) where
/// `krog = kro`. A saturation triple takes the level of the isoperm through it:
///
/// `x / x_w(kro) + y / y_g(kro) = 1`
///
/// so the movable water and gas ratios to the edge points weight the two
/// curves. Isoperms of higher level sit strictly closer to the oil apex, hence
/// `kro` never decreases when oil replaces water or gas. The model equals
/// `krow` without gas and `krog` at connate water.
#[derive(Debug, Clone)]
pub struct AzizSettari {
    curves: CoreyCurves,
    sum_tolerance: f64,
}

impl AzizSettari {
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

    /// Level of the isoperm through `(movable_water, gas)`, both positive.
    ///
    /// Edge points come from inverting the Corey oil curves: at level
    /// `u * krocw` they sit at `x_w = (1 - Swc - Sorw)(1 - u^(1/now))` and
    /// `y_g = (1 - Swc - Sorg)(1 - u^(1/nog))`.
    fn isoperm_level(&self, movable_water: f64, gas: f64) -> f64 {
        let p = self.curves.params();
        let water_span = 1.0 - p.swc - p.sorw;
        let gas_span = 1.0 - p.swc - p.sorg;

        // Increasing in u; negative while the point lies on the apex side
        let offset = |u: f64| {
            let x_w = water_span * (1.0 - u.powf(1.0 / p.now));
            let y_g = gas_span * (1.0 - u.powf(1.0 / p.nog));
            if x_w <= 0.0 || y_g <= 0.0 {
                f64::INFINITY
            } else {
                movable_water / x_w + gas / y_g - 1.0
            }
        };

        // Beyond the zero isoperm the oil is immobile
        if offset(0.0) >= 0.0 {
            return 0.0;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..MAX_BISECTIONS {
            let mid = 0.5 * (lo + hi);
            if offset(mid) < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo <= LEVEL_TOLERANCE {
                break;
            }
        }
        p.krocw * 0.5 * (lo + hi)
    }
}

impl ThreePhaseRelPerm for AzizSettari {
    fn name(&self) -> &str {
        "aziz_settari"
    }

    fn curves(&self) -> &CoreyCurves {
        &self.curves
    }

    fn sum_tolerance(&self) -> f64 {
        self.sum_tolerance
    }

    fn oil(&self, sat: &ThreePhaseSaturation, kr: &TwoPhaseValues) -> RockResult<f64> {
        let movable_water = (sat.sw - self.curves.params().swc).max(0.0);
        if sat.sg <= 0.0 {
            return Ok(kr.krow);
        }
        if movable_water <= 0.0 {
            return Ok(kr.krog);
        }
        Ok(self.isoperm_level(movable_water, sat.sg))
    }
}
