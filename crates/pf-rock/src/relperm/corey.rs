use crate::error::{RockError, RockResult};
use crate::params::{fraction, positive};
use crate::saturation::{RangePolicy, SaturationNormalizer, ThreePhaseSaturation};

/// Endpoints and exponents of the two-phase Corey curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreyParams {
    /// Connate water saturation
    pub swc: f64,
    /// Residual oil saturation to water
    pub sorw: f64,
    /// Residual oil saturation to gas
    pub sorg: f64,
    /// Critical gas saturation
    pub sgc: f64,
    /// Oil relative permeability at connate water
    pub krocw: f64,
    /// Water relative permeability at residual oil
    pub krw_max: f64,
    /// Gas relative permeability at connate liquid
    pub krg_max: f64,
    pub nw: f64,
    pub now: f64,
    pub ng: f64,
    pub nog: f64,
}

/// Two-phase oil-water and gas-oil power-law curves.
///
/// Oil-water system (function of `Sw`):
/// - `krw  = krw_max * ((Sw - Swc) / (1 - Swc - Sorw))^nw`
/// - `krow = krocw * ((1 - Sw - Sorw) / (1 - Swc - Sorw))^now`
///
/// Gas-oil system at connate water (function of `Sg`):
/// - `krg  = krg_max * ((Sg - Sgc) / (1 - Swc - Sorg - Sgc))^ng`
/// - `krog = krocw * ((1 - Swc - Sorg - Sg) / (1 - Swc - Sorg))^nog`
#[derive(Debug, Clone)]
pub struct CoreyCurves {
    params: CoreyParams,
    water: SaturationNormalizer,
    gas: SaturationNormalizer,
    oil_in_gas: SaturationNormalizer,
}

/// Two-phase curve values looked up at one saturation triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPhaseValues {
    pub krw: f64,
    pub krow: f64,
    pub krg: f64,
    pub krog: f64,
}

impl CoreyCurves {
    pub fn new(params: CoreyParams) -> RockResult<Self> {
        Self::with_policy(params, RangePolicy::default())
    }

    /// Curves whose lookups apply `policy` to saturations outside each
    /// curve's mobile range. Under [`RangePolicy::Reject`] a gas-free lookup
    /// fails whenever `Sgc > 0`.
    pub fn with_policy(params: CoreyParams, policy: RangePolicy) -> RockResult<Self> {
        for (name, value) in [
            ("swc", params.swc),
            ("sorw", params.sorw),
            ("sorg", params.sorg),
            ("sgc", params.sgc),
        ] {
            fraction(name, value)?;
        }
        for (name, value) in [
            ("krocw", params.krocw),
            ("krw_max", params.krw_max),
            ("krg_max", params.krg_max),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(RockError::invalid(name, value, "must lie in (0, 1]"));
            }
        }
        for (name, value) in [
            ("nw", params.nw),
            ("now", params.now),
            ("ng", params.ng),
            ("nog", params.nog),
        ] {
            positive(name, value)?;
        }

        let water = SaturationNormalizer::with_policy(params.swc, params.sorw, policy)?;
        let gas = SaturationNormalizer::with_policy(params.sgc, params.swc + params.sorg, policy)?;
        let oil_in_gas = SaturationNormalizer::with_policy(0.0, params.swc + params.sorg, policy)?;

        Ok(Self {
            params,
            water,
            gas,
            oil_in_gas,
        })
    }

    pub fn params(&self) -> &CoreyParams {
        &self.params
    }

    pub fn policy(&self) -> RangePolicy {
        self.water.policy()
    }

    pub fn krw(&self, sw: f64) -> RockResult<f64> {
        let s = self.water.normalize(sw)?;
        Ok(self.params.krw_max * s.powf(self.params.nw))
    }

    pub fn krow(&self, sw: f64) -> RockResult<f64> {
        let s = self.water.normalize(sw)?;
        Ok(self.params.krocw * (1.0 - s).powf(self.params.now))
    }

    pub fn krg(&self, sg: f64) -> RockResult<f64> {
        let s = self.gas.normalize(sg)?;
        Ok(self.params.krg_max * s.powf(self.params.ng))
    }

    pub fn krog(&self, sg: f64) -> RockResult<f64> {
        let s = self.oil_in_gas.normalize(sg)?;
        Ok(self.params.krocw * (1.0 - s).powf(self.params.nog))
    }

    pub fn two_phase(&self, sat: &ThreePhaseSaturation) -> RockResult<TwoPhaseValues> {
        Ok(TwoPhaseValues {
            krw: self.krw(sat.sw)?,
            krow: self.krow(sat.sw)?,
            krg: self.krg(sat.sg)?,
            krog: self.krog(sat.sg)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relperm::fixtures;

    #[test]
    fn oil_water_endpoints() {
        let c = fixtures::curves();
        assert_eq!(c.krw(0.2).unwrap(), 0.0);
        assert!((c.krow(0.2).unwrap() - 0.8).abs() < 1e-15);
        assert!((c.krw(0.75).unwrap() - 0.3).abs() < 1e-15);
        assert_eq!(c.krow(0.75).unwrap(), 0.0);
    }

    #[test]
    fn gas_oil_endpoints() {
        let c = fixtures::curves();
        assert_eq!(c.krg(0.05).unwrap(), 0.0);
        assert!((c.krog(0.0).unwrap() - 0.8).abs() < 1e-15);
        // Sg = 1 - Swc - Sorg
        assert!((c.krg(0.7).unwrap() - 0.9).abs() < 1e-15);
        assert_eq!(c.krog(0.7).unwrap(), 0.0);
    }

    #[test]
    fn reject_policy_applies_to_every_curve() {
        let params = *fixtures::curves().params();
        let c = CoreyCurves::with_policy(params, RangePolicy::Reject).unwrap();
        assert_eq!(c.policy(), RangePolicy::Reject);
        assert!(matches!(c.krow(0.1), Err(RockError::Domain { .. })));
        assert!(matches!(c.krw(0.9), Err(RockError::Domain { .. })));
        assert!(matches!(c.krg(0.0), Err(RockError::Domain { .. })));
        assert!((c.krow(0.2).unwrap() - 0.8).abs() < 1e-15);
        assert_eq!(CoreyCurves::new(params).unwrap().krow(0.1).unwrap(), 0.8);
    }

    #[test]
    fn midpoint_values() {
        let c = fixtures::curves();
        // Sw* = 0.5
        let sw = 0.2 + 0.5 * 0.55;
        assert!((c.krw(sw).unwrap() - 0.3 * 0.25).abs() < 1e-12);
        assert!((c.krow(sw).unwrap() - 0.8 * 0.5_f64.powf(2.5)).abs() < 1e-12);
    }

    #[test]
    fn invalid_endpoints_rejected() {
        let mut p = *fixtures::curves().params();
        p.swc = 0.6;
        p.sorw = 0.5;
        assert!(matches!(CoreyCurves::new(p), Err(RockError::InvalidBounds { .. })));

        let mut p = *fixtures::curves().params();
        p.nw = -1.0;
        assert!(CoreyCurves::new(p).unwrap_err().is_invalid_parameter());

        let mut p = *fixtures::curves().params();
        p.krocw = 0.0;
        assert!(CoreyCurves::new(p).is_err());
    }
}
