use super::{CapillaryPressure, finite_result, non_negative_pressure, positive_s_star};
use crate::error::{RockError, RockResult};
use crate::params::positive;
use crate::saturation::SaturationNormalizer;

/// Van Genuchten curve: `pc = (1/gamma) * (S*^(-1/m) - 1)^(1/n)`,
/// inverse `S* = ((gamma*pc)^n + 1)^(-m)`.
///
/// # Reference
///
/// * van Genuchten MT (1980) A closed-form equation for predicting the hydraulic
///   conductivity of unsaturated soils. Soil Sci. Soc. Am. J. 44(5), 892-898.
#[derive(Debug, Clone)]
pub struct VanGenuchten {
    normalizer: SaturationNormalizer,
    gamma: f64, // inverse of the characteristic pressure
    n: f64,
    m: f64,
}

impl VanGenuchten {
    pub fn new(normalizer: SaturationNormalizer, gamma: f64, n: f64, m: f64) -> RockResult<Self> {
        Ok(Self {
            normalizer,
            gamma: positive("gamma", gamma)?,
            n: positive("n", n)?,
            m: positive("m", m)?,
        })
    }

    /// Mualem restriction `m = 1 - 1/n`; needs `n > 1`.
    pub fn mualem(normalizer: SaturationNormalizer, gamma: f64, n: f64) -> RockResult<Self> {
        if n <= 1.0 {
            return Err(RockError::invalid("n", n, "must exceed 1 when m is derived as 1 - 1/n"));
        }
        Self::new(normalizer, gamma, n, 1.0 - 1.0 / n)
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn m(&self) -> f64 {
        self.m
    }
}

impl CapillaryPressure for VanGenuchten {
    fn name(&self) -> &str {
        "van_genuchten"
    }

    fn normalizer(&self) -> &SaturationNormalizer {
        &self.normalizer
    }

    fn pressure(&self, sw: f64) -> RockResult<f64> {
        let s_star = positive_s_star(&self.normalizer, sw, "van Genuchten normalized saturation")?;
        // S* <= 1 keeps the base non-negative; max() absorbs round-off
        let base = (s_star.powf(-1.0 / self.m) - 1.0).max(0.0);
        let pc = base.powf(1.0 / self.n) / self.gamma;
        finite_result(pc, "van Genuchten capillary pressure")
    }

    fn saturation(&self, pc: f64) -> RockResult<f64> {
        let pc = non_negative_pressure(pc, "van Genuchten capillary pressure")?;
        let s_star = ((self.gamma * pc).powf(self.n) + 1.0).powf(-self.m);
        Ok(self.normalizer.denormalize(s_star))
    }
}
