use super::{CapillaryPressure, finite_result, non_negative_pressure, positive_s_star};
use crate::error::RockResult;
use crate::params::positive;
use crate::saturation::SaturationNormalizer;

/// Brooks-Corey power law: `pc = pd * S*^(-1/lambda)`.
///
/// Below the entry pressure `pd` the wetting phase fills the whole mobile range,
/// so the inverse returns `1 - residual` for any `pc <= pd`.
///
/// # Reference
///
/// * Brooks RH and Corey AT (1964) Hydraulic properties of porous media.
///   Hydrology Papers 3, Colorado State University.
#[derive(Debug, Clone)]
pub struct BrooksCorey {
    normalizer: SaturationNormalizer,
    entry_pressure: f64, // pd
    lambda: f64,         // pore-size distribution index
}

impl BrooksCorey {
    pub fn new(normalizer: SaturationNormalizer, entry_pressure: f64, lambda: f64) -> RockResult<Self> {
        Ok(Self {
            normalizer,
            entry_pressure: positive("entry_pressure", entry_pressure)?,
            lambda: positive("lambda", lambda)?,
        })
    }

    pub fn entry_pressure(&self) -> f64 {
        self.entry_pressure
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl CapillaryPressure for BrooksCorey {
    fn name(&self) -> &str {
        "brooks_corey"
    }

    fn normalizer(&self) -> &SaturationNormalizer {
        &self.normalizer
    }

    fn pressure(&self, sw: f64) -> RockResult<f64> {
        let s_star = positive_s_star(&self.normalizer, sw, "Brooks-Corey normalized saturation")?;
        let pc = self.entry_pressure * s_star.powf(-1.0 / self.lambda);
        finite_result(pc, "Brooks-Corey capillary pressure")
    }

    fn saturation(&self, pc: f64) -> RockResult<f64> {
        let pc = non_negative_pressure(pc, "Brooks-Corey capillary pressure")?;
        let s_star = if pc <= self.entry_pressure {
            1.0
        } else {
            (self.entry_pressure / pc).powf(self.lambda)
        };
        Ok(self.normalizer.denormalize(s_star))
    }
}
