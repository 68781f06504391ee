//! Saturation normalisation shared by every capillary and relperm model.

use crate::error::{RockError, RockResult};
use crate::params::fraction;
use serde::{Deserialize, Serialize};

/// What to do with a saturation outside `[irreducible, 1 - residual]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Clamp the normalised value into `[0, 1]`. Keeps curve evaluation total.
    #[default]
    Clamp,
    /// Fail with [`RockError::Domain`].
    Reject,
}

/// Maps a raw saturation onto the mobile range:
/// `S* = (s - irreducible) / (1 - irreducible - residual)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationNormalizer {
    irreducible: f64,
    residual: f64,
    span: f64,
    policy: RangePolicy,
}

impl SaturationNormalizer {
    /// Normaliser with the default [`RangePolicy::Clamp`].
    pub fn new(irreducible: f64, residual: f64) -> RockResult<Self> {
        Self::with_policy(irreducible, residual, RangePolicy::default())
    }

    pub fn with_policy(irreducible: f64, residual: f64, policy: RangePolicy) -> RockResult<Self> {
        fraction("irreducible", irreducible)?;
        fraction("residual", residual)?;

        let span = 1.0 - irreducible - residual;
        if span <= 0.0 {
            return Err(RockError::InvalidBounds {
                irreducible,
                residual,
            });
        }

        Ok(Self {
            irreducible,
            residual,
            span,
            policy,
        })
    }

    pub fn irreducible(&self) -> f64 {
        self.irreducible
    }

    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Width of the mobile range, `1 - irreducible - residual`.
    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Upper end of the mobile range, `1 - residual`.
    pub fn max_saturation(&self) -> f64 {
        1.0 - self.residual
    }

    /// Raw saturation → `S*`.
    pub fn normalize(&self, s: f64) -> RockResult<f64> {
        if !s.is_finite() {
            return Err(RockError::Domain {
                what: "saturation",
                value: s,
            });
        }
        let s_star = (s - self.irreducible) / self.span;
        match self.policy {
            RangePolicy::Clamp => Ok(s_star.clamp(0.0, 1.0)),
            RangePolicy::Reject => {
                // Tolerate round-off at the endpoints
                const EDGE: f64 = 1e-12;
                if s_star < -EDGE || s_star > 1.0 + EDGE {
                    tracing::warn!(
                        saturation = s,
                        irreducible = self.irreducible,
                        residual = self.residual,
                        "saturation outside mobile range rejected"
                    );
                    return Err(RockError::Domain {
                        what: "saturation outside [irreducible, 1 - residual]",
                        value: s,
                    });
                }
                Ok(s_star.clamp(0.0, 1.0))
            }
        }
    }

    /// `S*` → raw saturation.
    pub fn denormalize(&self, s_star: f64) -> f64 {
        self.irreducible + s_star * self.span
    }
}

/// Default tolerance on `Sw + So + Sg = 1`.
pub const DEFAULT_SUM_TOLERANCE: f64 = 1e-6;

/// A validated three-phase saturation triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePhaseSaturation {
    pub sw: f64,
    pub so: f64,
    pub sg: f64,
}

impl ThreePhaseSaturation {
    pub fn new(sw: f64, so: f64, sg: f64) -> RockResult<Self> {
        Self::with_tolerance(sw, so, sg, DEFAULT_SUM_TOLERANCE)
    }

    pub fn with_tolerance(sw: f64, so: f64, sg: f64, tolerance: f64) -> RockResult<Self> {
        for value in [sw, so, sg] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RockError::Domain {
                    what: "phase saturation",
                    value,
                });
            }
        }

        let sum = sw + so + sg;
        if (sum - 1.0).abs() > tolerance {
            return Err(RockError::SaturationSum {
                sw,
                so,
                sg,
                sum,
                tolerance,
            });
        }
        Ok(Self { sw, so, sg })
    }
}
